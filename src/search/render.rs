use crate::search::types::{Panel, PanelContent, SuggestionRow};

/// Escape text for interpolation into markup or attribute values
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Markup for the suggestion panel's contents
pub fn panel_html(panel: &Panel) -> String {
    match &panel.content {
        PanelContent::Empty => String::new(),
        PanelContent::Loading => message_html(&panel.content, false),
        PanelContent::NoResults | PanelContent::Unavailable => message_html(&panel.content, true),
        PanelContent::Rows(rows) => rows
            .iter()
            .enumerate()
            .map(|(i, row)| row_html(i, row, panel.active == Some(i)))
            .collect(),
    }
}

fn message_html(content: &PanelContent, muted: bool) -> String {
    let class = if muted {
        "suggestion-item text-muted"
    } else {
        "suggestion-item"
    };
    format!(
        r#"<div class="{}">{}</div>"#,
        class,
        content.message().unwrap_or_default()
    )
}

fn row_html(index: usize, row: &SuggestionRow, active: bool) -> String {
    let class = if active {
        "suggestion-item active"
    } else {
        "suggestion-item"
    };
    let flat_id = row
        .listing_id
        .map(|id| format!(r#" data-flat-id="{}""#, id))
        .unwrap_or_default();

    format!(
        r#"<div class="{class}" data-index="{index}"{flat_id} data-suggestion="{fallback}">
    <div class="d-flex justify-content-between align-items-center">
        <div>
            <strong>{title}</strong><br>
            <small class="text-muted">{detail}</small>
        </div>
        <div class="text-end">
            <strong class="text-success">{price}</strong>
        </div>
    </div>
</div>"#,
        fallback = html_escape(&row.fallback),
        title = html_escape(&row.title),
        detail = html_escape(&row.detail),
        price = html_escape(&row.price),
    )
}

/// Dismissible error banner shown above page content
pub fn alert_html(message: &str) -> String {
    format!(
        r#"<div class="alert alert-danger alert-dismissible fade show" role="alert">
    <i class="fas fa-exclamation-triangle me-2"></i>
    {}
    <button type="button" class="btn-close" data-bs-dismiss="alert"></button>
</div>"#,
        html_escape(message)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Suggestion;
    use scraper::{Html, Selector};

    fn bishan_row(id: Option<u64>) -> SuggestionRow {
        SuggestionRow::from(&Suggestion {
            id,
            block: "123".to_string(),
            street_name: "Bishan St 11".to_string(),
            town: "Bishan".to_string(),
            flat_type: "4 ROOM".to_string(),
            resale_price: 450000.0,
        })
    }

    fn text_of(doc: &Html, selector: &str) -> Vec<String> {
        let selector = Selector::parse(selector).unwrap();
        doc.select(&selector)
            .map(|el| el.text().collect::<String>().trim().to_string())
            .collect()
    }

    #[test]
    fn renders_listing_row() {
        let panel = Panel {
            visible: true,
            content: PanelContent::Rows(vec![bishan_row(Some(7))]),
            active: None,
        };
        let doc = Html::parse_fragment(&panel_html(&panel));

        let item_selector = Selector::parse(".suggestion-item").unwrap();
        let items: Vec<_> = doc.select(&item_selector).collect();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].value().attr("data-flat-id"), Some("7"));
        assert_eq!(items[0].value().attr("data-suggestion"), Some("123 Bishan St 11"));
        assert_eq!(items[0].value().attr("data-index"), Some("0"));

        assert_eq!(text_of(&doc, "strong:not(.text-success)"), vec!["Block 123, Bishan St 11"]);
        assert_eq!(text_of(&doc, "small.text-muted"), vec!["Bishan • 4 ROOM"]);
        assert_eq!(text_of(&doc, "strong.text-success"), vec!["$450,000"]);
    }

    #[test]
    fn marks_only_the_active_row() {
        let panel = Panel {
            visible: true,
            content: PanelContent::Rows(vec![bishan_row(Some(1)), bishan_row(None)]),
            active: Some(1),
        };
        let doc = Html::parse_fragment(&panel_html(&panel));

        let active = Selector::parse(".suggestion-item.active").unwrap();
        let active: Vec<_> = doc.select(&active).collect();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].value().attr("data-index"), Some("1"));
        assert_eq!(active[0].value().attr("data-flat-id"), None);
    }

    #[test]
    fn message_rows_are_distinct() {
        let render = |content| {
            panel_html(&Panel {
                visible: true,
                content,
                active: None,
            })
        };

        assert_eq!(
            render(PanelContent::Loading),
            r#"<div class="suggestion-item">Searching...</div>"#
        );
        assert_eq!(
            render(PanelContent::NoResults),
            r#"<div class="suggestion-item text-muted">No suggestions found</div>"#
        );
        assert_eq!(
            render(PanelContent::Unavailable),
            r#"<div class="suggestion-item text-muted">Search temporarily unavailable</div>"#
        );
        assert_eq!(render(PanelContent::Empty), "");
    }

    #[test]
    fn escapes_untrusted_fields() {
        let mut row = bishan_row(Some(3));
        row.title = "Block <b>1</b>".to_string();
        row.fallback = r#"1 "Main" St"#.to_string();
        let panel = Panel {
            visible: true,
            content: PanelContent::Rows(vec![row]),
            active: None,
        };
        let html = panel_html(&panel);
        assert!(html.contains("Block &lt;b&gt;1&lt;/b&gt;"));

        let doc = Html::parse_fragment(&html);
        let item = Selector::parse(".suggestion-item").unwrap();
        let item = doc.select(&item).next().unwrap();
        assert_eq!(item.value().attr("data-suggestion"), Some(r#"1 "Main" St"#));
    }

    #[test]
    fn alert_escapes_message() {
        let html = alert_html("Flat <unknown>");
        assert!(html.contains("alert-danger"));
        assert!(html.contains("Flat &lt;unknown&gt;"));
    }
}
