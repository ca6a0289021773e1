use actix_web::{get, HttpResponse};
use chrono::Utc;
use serde::Serialize;

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    timestamp: String,
}

#[get("/health")]
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse {
        status: "Server is running".to_string(),
        timestamp: Utc::now().to_rfc3339(),
    })
}
