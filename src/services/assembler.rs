use crate::domain::{
    extraction::{ExtractionResult, Heuristics},
    org_record::{OrgAddress, OrganizationRecord},
};

use super::{
    base_url::resolve_base,
    heuristics::extract_heuristics,
    images::{select_images, PageImages},
    metadata::{extract_meta, PageMeta},
    page::ParsedPage,
    structured_data::extract_json_ld,
};

/// Run the whole read-only pipeline over a markup string. `resolved_url` is
/// where the markup actually came from (post-redirect), `input_url` whatever
/// the caller originally asked for; both may be absent in paste-markup mode.
pub fn extract_from_markup(
    markup: &str,
    resolved_url: &str,
    input_url: Option<&str>,
) -> ExtractionResult {
    let page = ParsedPage::parse(markup, resolved_url, input_url);

    let base = resolve_base(&page);
    let meta = extract_meta(&page);
    let record = extract_json_ld(&page);
    let images = select_images(&page, &record, &meta, &base);
    let heuristics = extract_heuristics(&page);

    assemble(meta, record, images, heuristics)
}

/// Merge structured-data fields over heuristic/meta fields. Publisher-authored
/// JSON-LD wins wherever both carry a value; disciplines and size only ever
/// come from the text heuristics.
pub fn assemble(
    meta: PageMeta,
    record: OrganizationRecord,
    images: PageImages,
    mut heuristics: Heuristics,
) -> ExtractionResult {
    let title = record
        .name
        .clone()
        .filter(|name| !name.is_empty())
        .or_else(|| non_empty(meta.site_name))
        .or_else(|| non_empty(meta.title))
        .unwrap_or_default();

    if let Some(email) = record.email.as_ref().and_then(|e| non_empty(e.clone())) {
        heuristics.email = email;
    }
    if let Some(phone) = record.telephone.as_ref().and_then(|p| non_empty(p.clone())) {
        heuristics.phone = phone;
    }

    match record.address.as_ref() {
        Some(OrgAddress::Literal(street)) => {
            heuristics.address = street.clone();
        }
        Some(OrgAddress::Postal {
            street_address,
            address_locality,
        }) => {
            if let Some(street) = street_address {
                heuristics.address = street.clone();
            }
            if let Some(locality) = address_locality {
                heuristics.city = locality.clone();
            }
        }
        None => {}
    }

    ExtractionResult {
        title,
        description: meta.description,
        image_url: images.banner_url,
        icon_url: images.icon_url,
        structured_data: record,
        heuristics,
    }
}

fn non_empty(value: String) -> Option<String> {
    match value.is_empty() {
        true => None,
        false => Some(value),
    }
}
