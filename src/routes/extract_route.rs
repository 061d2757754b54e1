use actix_web::{post, web, HttpResponse};
use serde::Deserialize;
use serde_json::json;

use crate::{
    configuration::Settings,
    services::{
        self,
        assembler::extract_from_markup,
        batch::{BatchProgress, MAX_BATCH_URLS},
        fetcher::FetchError,
    },
};

#[derive(Deserialize)]
pub struct ExtractUrlBody {
    pub url: String,
}

#[derive(Deserialize)]
pub struct ExtractMarkupBody {
    pub markup: String,
    pub url: Option<String>,
}

#[derive(Deserialize)]
pub struct ExtractBatchBody {
    pub urls: Vec<String>,
}

#[post("/url")]
pub async fn extract_url(
    settings: web::Data<Settings>,
    body: web::Json<ExtractUrlBody>,
) -> HttpResponse {
    match services::extract_from_url(&settings.webdriver, &body.url).await {
        Ok(result) => HttpResponse::Ok().json(result),
        Err(e @ FetchError::EmptyMarkup) => HttpResponse::BadGateway().json(json!({
            "kind": "empty_page",
            "error": e.to_string(),
        })),
        Err(e) => HttpResponse::BadGateway().json(json!({
            "kind": "fetch_failed",
            "error": e.to_string(),
        })),
    }
}

#[post("/markup")]
pub async fn extract_markup(body: web::Json<ExtractMarkupBody>) -> HttpResponse {
    if body.markup.trim().is_empty() {
        return HttpResponse::BadRequest().json(json!({"error": "markup is empty"}));
    }

    let resolved_url = body.url.as_deref().unwrap_or("");
    let result = extract_from_markup(&body.markup, resolved_url, body.url.as_deref());

    HttpResponse::Ok().json(result)
}

#[post("/batch")]
pub async fn extract_batch(
    settings: web::Data<Settings>,
    body: web::Json<ExtractBatchBody>,
) -> HttpResponse {
    if body.urls.is_empty() {
        return HttpResponse::BadRequest().json(json!({"error": "no urls given"}));
    }
    if body.urls.len() > MAX_BATCH_URLS {
        return HttpResponse::BadRequest().json(json!({
            "error": format!("a batch is limited to {} urls", MAX_BATCH_URLS),
        }));
    }

    let outcomes = services::batch::extract_batch(&settings.webdriver, &body.urls, |p: BatchProgress| {
        log::info!("Batch progress {}/{}: {}", p.current, p.total, p.current_url);
    })
    .await;

    HttpResponse::Ok().json(outcomes)
}
