//! Page elements the search autocomplete binds to.

use anyhow::{Context, Result};

pub const SEARCH_INPUT_ID: &str = "search-input";
pub const SUGGESTIONS_ID: &str = "search-suggestions";
pub const TOWN_SELECT_ID: &str = "town-select";
pub const FLAT_TYPE_SELECT_ID: &str = "flat-type-select";
pub const SEARCH_FORM_SELECTOR: &str = ".search-form";

/// Finds elements in a document
pub trait ElementLookup {
    type Element;

    fn find_by_id(&self, id: &str) -> Result<Option<Self::Element>>;

    fn find_by_selector(&self, selector: &str) -> Result<Option<Self::Element>>;
}

/// The search box, its suggestion panel, the form and the two filter selects
#[derive(Debug, Clone, PartialEq)]
pub struct SearchElements<E> {
    pub input: E,
    pub panel: E,
    pub form: E,
    pub town: Option<E>,
    pub flat_type: Option<E>,
}

impl<E> SearchElements<E> {
    /// Resolve every element once; fails naming the first required one missing.
    /// The selects are optional.
    pub fn bind<L>(lookup: &L) -> Result<Self>
    where
        L: ElementLookup<Element = E>,
    {
        let required = |id: &str| -> Result<E> {
            lookup
                .find_by_id(id)?
                .with_context(|| format!("Missing required element #{}", id))
        };

        Ok(Self {
            input: required(SEARCH_INPUT_ID)?,
            panel: required(SUGGESTIONS_ID)?,
            form: lookup
                .find_by_selector(SEARCH_FORM_SELECTOR)?
                .with_context(|| format!("Missing required element {}", SEARCH_FORM_SELECTOR))?,
            town: lookup.find_by_id(TOWN_SELECT_ID)?,
            flat_type: lookup.find_by_id(FLAT_TYPE_SELECT_ID)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    /// Elements keyed by `#id` or selector
    #[derive(Default)]
    struct FakeDocument {
        elements: HashMap<String, &'static str>,
    }

    impl FakeDocument {
        fn with(keys: &[&'static str]) -> Self {
            Self {
                elements: keys.iter().map(|k| (k.to_string(), *k)).collect(),
            }
        }
    }

    impl ElementLookup for FakeDocument {
        type Element = &'static str;

        fn find_by_id(&self, id: &str) -> Result<Option<&'static str>> {
            Ok(self.elements.get(&format!("#{}", id)).copied())
        }

        fn find_by_selector(&self, selector: &str) -> Result<Option<&'static str>> {
            Ok(self.elements.get(selector).copied())
        }
    }

    #[test]
    fn binds_every_element() {
        let document = FakeDocument::with(&[
            "#search-input",
            "#search-suggestions",
            ".search-form",
            "#town-select",
            "#flat-type-select",
        ]);
        let elements = SearchElements::bind(&document).unwrap();
        assert_eq!(elements.input, "#search-input");
        assert_eq!(elements.form, ".search-form");
        assert_eq!(elements.town, Some("#town-select"));
    }

    #[test]
    fn selects_are_optional() {
        let document = FakeDocument::with(&["#search-input", "#search-suggestions", ".search-form"]);
        let elements = SearchElements::bind(&document).unwrap();
        assert_eq!(elements.town, None);
        assert_eq!(elements.flat_type, None);
    }

    #[test]
    fn missing_required_element_is_named() {
        let cases = [
            (&["#search-suggestions", ".search-form"][..], "#search-input"),
            (&["#search-input", ".search-form"][..], "#search-suggestions"),
            (&["#search-input", "#search-suggestions"][..], ".search-form"),
        ];
        for (present, missing) in cases {
            let err = SearchElements::bind(&FakeDocument::with(present)).unwrap_err();
            assert_eq!(err.to_string(), format!("Missing required element {}", missing));
        }
    }

    #[test]
    fn lookup_failure_propagates() {
        struct Broken;

        impl ElementLookup for Broken {
            type Element = ();

            fn find_by_id(&self, _: &str) -> Result<Option<()>> {
                anyhow::bail!("document detached")
            }

            fn find_by_selector(&self, _: &str) -> Result<Option<()>> {
                Ok(Some(()))
            }
        }

        let err = SearchElements::bind(&Broken).unwrap_err();
        assert_eq!(err.to_string(), "document detached");
    }
}
