use serde::{Deserialize, Deserializer, Serialize};

/// One candidate flat returned by the suggestion endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Suggestion {
    /// Listing identifier; absent for generic refinements
    #[serde(default)]
    pub id: Option<u64>,
    pub block: String,
    pub street_name: String,
    pub town: String,
    pub flat_type: String,
    /// Missing or `null` prices decode as zero
    #[serde(default, deserialize_with = "price_or_zero")]
    pub resale_price: f64,
}

fn price_or_zero<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or_default())
}

/// Town and flat type last used on the search form
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SearchPreferences {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub town: Option<String>,
    #[serde(
        rename = "flatType",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub flat_type: Option<String>,
}

impl SearchPreferences {
    /// Capture the current select values; absent values are stored as empty strings
    pub fn from_form(town: Option<&str>, flat_type: Option<&str>) -> Self {
        Self {
            town: Some(town.unwrap_or_default().to_string()),
            flat_type: Some(flat_type.unwrap_or_default().to_string()),
        }
    }

    /// Town to prefill, if one was stored
    pub fn town(&self) -> Option<&str> {
        self.town.as_deref().filter(|t| !t.is_empty())
    }

    /// Flat type to prefill, if one was stored
    pub fn flat_type(&self) -> Option<&str> {
        self.flat_type.as_deref().filter(|t| !t.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suggestion_ignores_extra_fields() {
        let raw = r#"{"id":7,"block":"123","street_name":"Bishan St 11","town":"Bishan",
            "flat_type":"4 ROOM","resale_price":450000,"storey_range":"04 TO 06"}"#;
        let suggestion: Suggestion = serde_json::from_str(raw).unwrap();
        assert_eq!(suggestion.id, Some(7));
        assert_eq!(suggestion.resale_price, 450000.0);
    }

    #[test]
    fn suggestion_without_id_is_a_refinement() {
        let raw = r#"{"block":"5","street_name":"Bedok North St 3","town":"Bedok",
            "flat_type":"3 ROOM","resale_price":385000.0}"#;
        let suggestion: Suggestion = serde_json::from_str(raw).unwrap();
        assert_eq!(suggestion.id, None);
    }

    #[test]
    fn null_price_keeps_the_rest_of_the_list() {
        let raw = r#"[
            {"id":1,"block":"123","street_name":"Bishan St 11","town":"Bishan",
             "flat_type":"4 ROOM","resale_price":400000},
            {"id":2,"block":"124","street_name":"Bishan St 12","town":"Bishan",
             "flat_type":"5 ROOM","resale_price":null}
        ]"#;
        let suggestions: Vec<Suggestion> = serde_json::from_str(raw).unwrap();
        assert_eq!(suggestions.len(), 2);
        assert_eq!(suggestions[0].resale_price, 400000.0);
        assert_eq!(suggestions[1].resale_price, 0.0);
    }

    #[test]
    fn preferences_use_camel_case_flat_type() {
        let prefs = SearchPreferences::from_form(Some("Bishan"), None);
        let json = serde_json::to_string(&prefs).unwrap();
        assert_eq!(json, r#"{"town":"Bishan","flatType":""}"#);
        assert_eq!(prefs.town(), Some("Bishan"));
        assert_eq!(prefs.flat_type(), None);
    }
}
