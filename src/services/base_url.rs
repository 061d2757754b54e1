use std::sync::LazyLock;

use scraper::Selector;
use url::Url;

use super::page::ParsedPage;

static BASE_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("base[href]").unwrap());
static CANONICAL_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"link[rel="canonical"]"#).unwrap());
static OG_URL_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"meta[property="og:url"]"#).unwrap());

/// Best origin for resolving relative links, first match wins:
/// `<base href>` verbatim, canonical link origin, `og:url` origin, then the
/// origin of the URL the caller gave us. Empty string when nothing resolves.
pub fn resolve_base(page: &ParsedPage) -> String {
    if let Some(href) = page.first_attr(&BASE_SELECTOR, "href") {
        return href;
    }

    page.first_attr(&CANONICAL_SELECTOR, "href")
        .as_deref()
        .and_then(origin_of)
        .or_else(|| {
            page.first_attr(&OG_URL_SELECTOR, "content")
                .as_deref()
                .and_then(origin_of)
        })
        .or_else(|| origin_of(&page.resolved_url))
        .or_else(|| page.input_url.as_deref().and_then(origin_of))
        .unwrap_or_default()
}

/// Resolve `relative` against `origin`. Already-absolute inputs (scheme or
/// protocol-relative) pass through untouched, and any join failure returns the
/// input unchanged rather than raising.
pub fn resolve_url(origin: &str, relative: &str) -> String {
    if relative.is_empty() || relative.starts_with("//") || has_scheme(relative) {
        return relative.to_string();
    }

    Url::parse(origin)
        .and_then(|base| base.join(relative))
        .map(|joined| joined.to_string())
        .unwrap_or_else(|_| relative.to_string())
}

fn has_scheme(candidate: &str) -> bool {
    match candidate.split_once(':') {
        Some((scheme, _)) => {
            !scheme.is_empty()
                && scheme.chars().next().is_some_and(|c| c.is_ascii_alphabetic())
                && scheme
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        }
        None => false,
    }
}

fn origin_of(candidate: &str) -> Option<String> {
    let parsed = Url::parse(candidate).ok()?;
    let origin = parsed.origin();
    match origin.is_tuple() {
        true => Some(origin.ascii_serialization()),
        false => None,
    }
}
