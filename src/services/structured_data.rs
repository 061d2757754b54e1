use std::sync::LazyLock;

use scraper::Selector;
use serde_json::Value;

use super::page::ParsedPage;
use crate::domain::org_record::OrganizationRecord;

static LD_JSON_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"script[type="application/ld+json"]"#).unwrap());

const ORG_TYPES: [&str; 3] = [
    "Organization",
    "EducationalOrganization",
    "CollegeOrUniversity",
];

/// Merge every organization-typed JSON-LD block on the page, in document
/// order. A malformed script is skipped without aborting the rest; blocks of
/// other types contribute nothing at all.
pub fn extract_json_ld(page: &ParsedPage) -> OrganizationRecord {
    let mut record = OrganizationRecord::default();

    for script in page.document().select(&LD_JSON_SELECTOR) {
        let content: String = script.text().collect();
        let parsed: Value = match serde_json::from_str(&content) {
            Ok(value) => value,
            Err(e) => {
                log::warn!("Skipping malformed ld+json block: {}", e);
                continue;
            }
        };
        merge_candidate(&mut record, &parsed);
    }

    record
}

fn merge_candidate(record: &mut OrganizationRecord, value: &Value) {
    let Some(object) = value.as_object() else {
        return;
    };

    if type_matches(value) {
        record.merge_object(object);
        return;
    }

    // Nested graphs: only the first organization-typed element counts.
    if let Some(graph) = object.get("@graph").and_then(Value::as_array) {
        if let Some(element) = graph.iter().find(|el| type_matches(el)) {
            if let Some(element_object) = element.as_object() {
                record.merge_object(element_object);
            }
        }
    }
}

fn type_matches(value: &Value) -> bool {
    match value.get("@type") {
        Some(Value::String(t)) => ORG_TYPES.contains(&t.as_str()),
        Some(Value::Array(types)) => types
            .iter()
            .filter_map(Value::as_str)
            .any(|t| ORG_TYPES.contains(&t)),
        _ => false,
    }
}
