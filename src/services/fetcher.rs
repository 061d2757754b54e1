use std::{path::Path, time::Duration};

use thirtyfour::error::WebDriverError;

use super::droid::Droid;
use crate::{configuration::WebDriverSettings, domain::extraction::FetchOutcome};

pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/122.0.0.0 Safari/537.36";

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("page render timed out after {0}s")]
    RenderTimeout(u64),
    #[error("page render failed: {0}")]
    RenderFailure(String),
    #[error("fallback request returned status {0}")]
    HttpStatus(u16),
    #[error("fallback request failed: {0}")]
    HttpFailure(String),
    #[error("fetched page contained no markup")]
    EmptyMarkup,
}

/// Two-stage fetch: rendered load through the WebDriver first, plain GET with
/// the same user-agent only if the render raises.
pub async fn fetch(settings: &WebDriverSettings, url: &str) -> Result<FetchOutcome, FetchError> {
    run_stages(url, fetch_rendered(settings, url), fetch_plain(url)).await
}

/// The orchestration itself, over the two stages as plain futures. The plain
/// GET is only polled when the render raises, and when both stages fail the
/// Stage-1 error is surfaced; the fallback failure never masks it.
async fn run_stages<F1, F2>(url: &str, rendered: F1, plain: F2) -> Result<FetchOutcome, FetchError>
where
    F1: std::future::Future<Output = Result<FetchOutcome, FetchError>>,
    F2: std::future::Future<Output = Result<FetchOutcome, FetchError>>,
{
    let outcome = match rendered.await {
        Ok(outcome) => outcome,
        Err(render_error) => {
            log::warn!(
                "Rendered load failed for {}: {}. Falling back to plain GET",
                url,
                render_error
            );
            match plain.await {
                Ok(outcome) => outcome,
                Err(fallback_error) => {
                    log::error!("Fallback GET also failed for {}: {}", url, fallback_error);
                    return Err(render_error);
                }
            }
        }
    };

    match outcome.html.trim().is_empty() {
        true => Err(FetchError::EmptyMarkup),
        false => Ok(outcome),
    }
}

async fn fetch_rendered(
    settings: &WebDriverSettings,
    url: &str,
) -> Result<FetchOutcome, FetchError> {
    let timeout_secs = settings.navigation_timeout_secs;
    let droid = Droid::new(settings)
        .await
        .map_err(|e| classify_render_error(e, timeout_secs))?;

    let navigation = navigate(&droid, url).await;

    if navigation.is_ok() {
        if let Some(dir) = settings.screenshot_dir.as_deref() {
            save_debug_screenshot(&droid, url, dir).await;
        }
    }
    droid.quit().await;

    navigation
        .map(|(html, resolved_url)| FetchOutcome {
            html,
            resolved_url,
            used_fallback: false,
        })
        .map_err(|e| classify_render_error(e, timeout_secs))
}

async fn navigate(droid: &Droid, url: &str) -> Result<(String, String), WebDriverError> {
    droid.driver.goto(url).await?;
    let html = droid.driver.source().await?;
    let resolved_url = droid.driver.current_url().await?;
    Ok((html, resolved_url.to_string()))
}

// Diagnostics only; never allowed to change the fetch outcome.
async fn save_debug_screenshot(droid: &Droid, url: &str, dir: &str) {
    if let Err(e) = std::fs::create_dir_all(dir) {
        log::warn!("Could not create screenshot dir {}: {}", dir, e);
        return;
    }

    let host = url::Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_string))
        .unwrap_or_else(|| "page".to_string());
    let path = Path::new(dir).join(format!("{}.png", host));

    if let Err(e) = droid.driver.screenshot(&path).await {
        log::warn!("Could not save screenshot for {}: {}", url, e);
    }
}

fn classify_render_error(error: WebDriverError, timeout_secs: u64) -> FetchError {
    classify_render_message(error.to_string(), timeout_secs)
}

fn classify_render_message(message: String, timeout_secs: u64) -> FetchError {
    let lowered = message.to_lowercase();
    match lowered.contains("timeout") || lowered.contains("timed out") {
        true => FetchError::RenderTimeout(timeout_secs),
        false => FetchError::RenderFailure(message),
    }
}

async fn fetch_plain(url: &str) -> Result<FetchOutcome, FetchError> {
    let client = reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(Duration::from_secs(30))
        .build()
        .map_err(|e| FetchError::HttpFailure(e.to_string()))?;

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| FetchError::HttpFailure(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::HttpStatus(status.as_u16()));
    }

    let resolved_url = response.url().to_string();
    let html = response
        .text()
        .await
        .map_err(|e| FetchError::HttpFailure(e.to_string()))?;

    Ok(FetchOutcome {
        html,
        resolved_url,
        used_fallback: true,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(html: &str, used_fallback: bool) -> FetchOutcome {
        FetchOutcome {
            html: html.to_string(),
            resolved_url: "https://uni.edu.pk/".to_string(),
            used_fallback,
        }
    }

    #[tokio::test]
    async fn stage_two_body_is_used_when_the_render_raises() {
        let result = run_stages(
            "https://uni.edu.pk",
            async { Err(FetchError::RenderFailure("renderer crashed".to_string())) },
            async { Ok(outcome("<html>plain body</html>", true)) },
        )
        .await
        .unwrap();

        assert_eq!(result.html, "<html>plain body</html>");
        assert!(result.used_fallback);
    }

    #[tokio::test]
    async fn stage_one_error_survives_a_failed_fallback() {
        let result = run_stages(
            "https://uni.edu.pk",
            async { Err(FetchError::RenderTimeout(30)) },
            async { Err(FetchError::HttpStatus(503)) },
        )
        .await;

        assert!(matches!(result, Err(FetchError::RenderTimeout(30))));
    }

    #[tokio::test]
    async fn blank_markup_maps_to_empty_markup() {
        let result = run_stages(
            "https://uni.edu.pk",
            async { Ok(outcome("  \n  ", false)) },
            async { Err(FetchError::HttpFailure("never polled".to_string())) },
        )
        .await;

        assert!(matches!(result, Err(FetchError::EmptyMarkup)));
    }

    #[test]
    fn timeout_messages_classify_as_render_timeout() {
        let classified = classify_render_message("navigation Timeout after 30s".to_string(), 30);
        assert!(matches!(classified, FetchError::RenderTimeout(30)));
    }

    #[test]
    fn other_render_errors_classify_as_render_failure() {
        let classified = classify_render_message("session not created".to_string(), 30);
        assert!(matches!(classified, FetchError::RenderFailure(_)));
    }
}
