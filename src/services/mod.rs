pub mod assembler;
pub mod base_url;
pub mod batch;
pub mod droid;
pub mod fetcher;
pub mod heuristics;
pub mod images;
pub mod metadata;
pub mod page;
pub mod structured_data;

use crate::{configuration::WebDriverSettings, domain::extraction::ExtractionResult};

use fetcher::FetchError;

/// Full pipeline for a single URL: two-stage fetch, then the read-only
/// extractor pass over the resulting markup.
pub async fn extract_from_url(
    settings: &WebDriverSettings,
    url: &str,
) -> Result<ExtractionResult, FetchError> {
    let outcome = fetcher::fetch(settings, url).await?;
    if outcome.used_fallback {
        log::info!("Used plain-GET fallback for {}", url);
    }

    Ok(assembler::extract_from_markup(
        &outcome.html,
        &outcome.resolved_url,
        Some(url),
    ))
}
