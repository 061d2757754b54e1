use serde::Serialize;

use super::org_record::OrganizationRecord;

/// Markup obtained for one extraction request, plus where it actually came
/// from after redirects.
#[derive(Debug, Clone)]
pub struct FetchOutcome {
    pub html: String,
    pub resolved_url: String,
    pub used_fallback: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Heuristics {
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub disciplines: Vec<String>,
    pub size: String,
}

/// The normalized record handed back to the caller. Immutable once built;
/// the persistence layer copies whatever it wants out of it.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ExtractionResult {
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub icon_url: String,
    pub structured_data: OrganizationRecord,
    pub heuristics: Heuristics,
}
