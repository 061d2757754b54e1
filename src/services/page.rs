use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

static BODY_SELECTOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("body").unwrap());
static FOOTER_SELECTORS: LazyLock<Vec<Selector>> = LazyLock::new(|| {
    ["footer", ".footer", "#footer"]
        .iter()
        .map(|s| Selector::parse(s).unwrap())
        .collect()
});

/// Read-only handle over a parsed document. Every extractor component queries
/// this; none of them mutate it.
pub struct ParsedPage {
    html: Html,
    pub resolved_url: String,
    pub input_url: Option<String>,
}

impl ParsedPage {
    pub fn parse(markup: &str, resolved_url: &str, input_url: Option<&str>) -> Self {
        ParsedPage {
            html: Html::parse_document(markup),
            resolved_url: resolved_url.to_string(),
            input_url: input_url.map(str::to_string),
        }
    }

    pub fn document(&self) -> &Html {
        &self.html
    }

    pub fn select_first(&self, selector: &Selector) -> Option<ElementRef<'_>> {
        self.html.select(selector).next()
    }

    /// First non-empty value of `attr` on the first element matching
    /// `selector`. A present-but-empty attribute counts as not found.
    pub fn first_attr(&self, selector: &Selector, attr: &str) -> Option<String> {
        self.html
            .select(selector)
            .filter_map(|el| el.value().attr(attr))
            .map(str::trim)
            .find(|value| !value.is_empty())
            .map(str::to_string)
    }

    pub fn first_text(&self, selector: &Selector) -> Option<String> {
        self.html
            .select(selector)
            .map(element_text)
            .find(|text| !text.is_empty())
    }

    pub fn body_text(&self) -> String {
        match self.select_first(&BODY_SELECTOR) {
            Some(body) => element_text(body),
            None => element_text(self.html.root_element()),
        }
    }

    /// Text of the page footer: `<footer>`, then `.footer`, then `#footer`,
    /// then the whole body as a last resort.
    pub fn footer_text(&self) -> String {
        FOOTER_SELECTORS
            .iter()
            .find_map(|selector| self.select_first(selector))
            .map(element_text)
            .unwrap_or_else(|| self.body_text())
    }
}

fn element_text(element: ElementRef) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|chunk| !chunk.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_attr_counts_as_not_found() {
        let page = ParsedPage::parse(
            r#"<html><head><meta property="og:title" content="">
               <meta property="og:title" content="Punjab University"></head></html>"#,
            "",
            None,
        );
        let selector = Selector::parse(r#"meta[property="og:title"]"#).unwrap();

        assert_eq!(
            page.first_attr(&selector, "content").as_deref(),
            Some("Punjab University")
        );
    }

    #[test]
    fn footer_text_falls_back_through_class_id_then_body() {
        let with_class = ParsedPage::parse(
            r#"<body><p>top</p><div class="footer">Lahore Campus</div></body>"#,
            "",
            None,
        );
        assert_eq!(with_class.footer_text(), "Lahore Campus");

        let without_footer = ParsedPage::parse("<body><p>Karachi only</p></body>", "", None);
        assert_eq!(without_footer.footer_text(), "Karachi only");
    }

    #[test]
    fn body_text_joins_fragments_with_spaces() {
        let page = ParsedPage::parse("<body><p>Main</p><p>Campus</p></body>", "", None);
        assert_eq!(page.body_text(), "Main Campus");
    }
}
