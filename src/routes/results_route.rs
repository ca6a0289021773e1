use actix_web::{get, post, web, HttpResponse};
use serde::Deserialize;

use crate::services::PollerRegistry;

#[derive(Deserialize)]
pub struct ResultsQuery {
    pub email: String,
}

/// Current state of the account's result poller: the accumulated or
/// replaced prospect set plus the loading/refreshing flags the display
/// layer keys off.
#[get("/results")]
pub async fn get_results(
    registry: web::Data<PollerRegistry>,
    query: web::Query<ResultsQuery>,
) -> HttpResponse {
    match registry.snapshot(&query.email) {
        Some(snapshot) => HttpResponse::Ok().json(snapshot),
        None => HttpResponse::NotFound().body(format!("No active search for {}", query.email)),
    }
}

/// User-triggered refetch, bypassing the poller's timers.
#[post("/results/refetch")]
pub async fn refetch_results(
    registry: web::Data<PollerRegistry>,
    query: web::Query<ResultsQuery>,
) -> HttpResponse {
    if registry.refetch(&query.email) {
        HttpResponse::Ok().json(serde_json::json!({ "status": "refetching" }))
    } else {
        HttpResponse::NotFound().body(format!("No active search for {}", query.email))
    }
}
