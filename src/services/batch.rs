use std::future::Future;

use serde::Serialize;

use super::fetcher::FetchError;
use crate::{configuration::WebDriverSettings, domain::extraction::ExtractionResult};

/// A bulk request never processes more than this many URLs.
pub const MAX_BATCH_URLS: usize = 10;

#[derive(Debug, Clone, Serialize)]
pub struct BatchProgress {
    pub current: usize,
    pub total: usize,
    pub current_url: String,
}

#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BatchOutcome {
    Success {
        url: String,
        result: ExtractionResult,
    },
    Error {
        url: String,
        error_message: String,
    },
}

pub async fn extract_batch(
    settings: &WebDriverSettings,
    urls: &[String],
    progress: impl FnMut(BatchProgress),
) -> Vec<BatchOutcome> {
    process_batch(urls, progress, |url| async move {
        super::extract_from_url(settings, &url).await
    })
    .await
}

/// Process each URL independently, in order. Progress fires before every
/// item; one URL failing is recorded and never aborts the rest.
pub async fn process_batch<F, Fut>(
    urls: &[String],
    mut progress: impl FnMut(BatchProgress),
    mut extract_one: F,
) -> Vec<BatchOutcome>
where
    F: FnMut(String) -> Fut,
    Fut: Future<Output = Result<ExtractionResult, FetchError>>,
{
    let total = urls.len().min(MAX_BATCH_URLS);
    let mut outcomes = Vec::with_capacity(total);

    for (index, url) in urls.iter().take(MAX_BATCH_URLS).enumerate() {
        progress(BatchProgress {
            current: index + 1,
            total,
            current_url: url.clone(),
        });

        let outcome = match extract_one(url.clone()).await {
            Ok(result) => BatchOutcome::Success {
                url: url.clone(),
                result,
            },
            Err(e) => {
                log::error!("Extraction failed for {}: {}", url, e);
                BatchOutcome::Error {
                    url: url.clone(),
                    error_message: e.to_string(),
                }
            }
        };
        outcomes.push(outcome);
    }

    outcomes
}
