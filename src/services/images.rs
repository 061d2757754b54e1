use std::sync::LazyLock;

use scraper::Selector;

use super::{base_url::resolve_url, metadata::PageMeta, page::ParsedPage};
use crate::domain::org_record::OrganizationRecord;

static IMG_SELECTOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("img").unwrap());
static ICON_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"link[rel="icon"]"#).unwrap());
static SHORTCUT_ICON_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"link[rel="shortcut icon"]"#).unwrap());

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageImages {
    pub icon_url: String,
    pub banner_url: String,
}

/// Pick an icon and a representative banner image. Both fall through their
/// whole priority chain to empty string; the winners are resolved against
/// `base`.
pub fn select_images(
    page: &ParsedPage,
    record: &OrganizationRecord,
    meta: &PageMeta,
    base: &str,
) -> PageImages {
    let icon = record
        .logo
        .clone()
        .or_else(|| logo_img_src(page))
        .or_else(|| page.first_attr(&ICON_SELECTOR, "href"))
        .or_else(|| page.first_attr(&SHORTCUT_ICON_SELECTOR, "href"));

    let banner = banner_img_src(page).or_else(|| match meta.og_image.is_empty() {
        true => None,
        false => Some(meta.og_image.clone()),
    });

    PageImages {
        icon_url: icon.map(|raw| resolve_url(base, &raw)).unwrap_or_default(),
        banner_url: banner.map(|raw| resolve_url(base, &raw)).unwrap_or_default(),
    }
}

fn logo_img_src(page: &ParsedPage) -> Option<String> {
    page.document().select(&IMG_SELECTOR).find_map(|img| {
        let alt = img.value().attr("alt").unwrap_or_default().to_lowercase();
        let class = img.value().attr("class").unwrap_or_default().to_lowercase();
        match alt.contains("logo") || class.contains("logo") {
            true => non_empty_attr(&img, "src"),
            false => None,
        }
    })
}

/// First image in document order that has a source and either a
/// banner/slider class or a campus/university alt text.
fn banner_img_src(page: &ParsedPage) -> Option<String> {
    page.document().select(&IMG_SELECTOR).find_map(|img| {
        let src = non_empty_attr(&img, "src").or_else(|| non_empty_attr(&img, "data-src"))?;
        let class = img.value().attr("class").unwrap_or_default().to_lowercase();
        let alt = img.value().attr("alt").unwrap_or_default().to_lowercase();

        let class_hit = class.contains("banner") || class.contains("slider");
        let alt_hit = alt.contains("campus") || alt.contains("university");
        match class_hit || alt_hit {
            true => Some(src),
            false => None,
        }
    })
}

fn non_empty_attr(img: &scraper::ElementRef, attr: &str) -> Option<String> {
    img.value()
        .attr(attr)
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
