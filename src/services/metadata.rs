use std::sync::LazyLock;

use scraper::Selector;

use super::page::ParsedPage;

static OG_TITLE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"meta[property="og:title"]"#).unwrap());
static TWITTER_TITLE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"meta[name="twitter:title"]"#).unwrap());
static TITLE: LazyLock<Selector> = LazyLock::new(|| Selector::parse("title").unwrap());
static H1: LazyLock<Selector> = LazyLock::new(|| Selector::parse("h1").unwrap());
static OG_DESCRIPTION: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"meta[property="og:description"]"#).unwrap());
static META_DESCRIPTION: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"meta[name="description"]"#).unwrap());
static OG_SITE_NAME: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"meta[property="og:site_name"]"#).unwrap());
static OG_IMAGE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"meta[property="og:image"]"#).unwrap());

#[derive(Debug, Clone, Default)]
pub struct PageMeta {
    pub title: String,
    pub description: String,
    pub site_name: String,
    /// Raw `og:image` content; resolved later against the computed base.
    pub og_image: String,
}

pub fn extract_meta(page: &ParsedPage) -> PageMeta {
    let title = page
        .first_attr(&OG_TITLE, "content")
        .or_else(|| page.first_attr(&TWITTER_TITLE, "content"))
        .or_else(|| page.first_text(&TITLE))
        .or_else(|| page.first_text(&H1))
        .unwrap_or_default();

    let description = page
        .first_attr(&OG_DESCRIPTION, "content")
        .or_else(|| page.first_attr(&META_DESCRIPTION, "content"))
        .unwrap_or_default();

    PageMeta {
        title,
        description,
        site_name: page.first_attr(&OG_SITE_NAME, "content").unwrap_or_default(),
        og_image: page.first_attr(&OG_IMAGE, "content").unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn og_title_wins_over_title_tag() {
        let page = ParsedPage::parse(
            r#"<head><title>Long Page Title - Admissions</title>
               <meta property="og:title" content="Punjab University"></head>"#,
            "",
            None,
        );
        assert_eq!(extract_meta(&page).title, "Punjab University");
    }

    #[test]
    fn empty_og_title_continues_down_the_chain() {
        let page = ParsedPage::parse(
            r#"<head><meta property="og:title" content="">
               <meta name="twitter:title" content=""></head>
               <body><h1>Institute of Space Technology</h1></body>"#,
            "",
            None,
        );
        assert_eq!(extract_meta(&page).title, "Institute of Space Technology");
    }

    #[test]
    fn description_prefers_og_over_meta_name() {
        let page = ParsedPage::parse(
            r#"<head><meta name="description" content="plain">
               <meta property="og:description" content="og wins"></head>"#,
            "",
            None,
        );
        let meta = extract_meta(&page);
        assert_eq!(meta.description, "og wins");
    }

    #[test]
    fn missing_everything_yields_empty_fields() {
        let page = ParsedPage::parse("<body></body>", "", None);
        let meta = extract_meta(&page);
        assert_eq!(meta.title, "");
        assert_eq!(meta.description, "");
        assert_eq!(meta.site_name, "");
        assert_eq!(meta.og_image, "");
    }
}
