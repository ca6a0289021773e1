use actix_web::{get, web, HttpResponse};

use crate::{
    dal::preference_store::PreferenceStore,
    domain::{export, prospect::apply_sort},
    services::ProspectSource,
};

/// Proxy over the sheet export. Always answers 200 with a renderable
/// array: mock data when nothing is configured, a fallback record when the
/// configured sheet cannot be read.
#[get("/prospects")]
pub async fn get_prospects(source: web::Data<ProspectSource>) -> HttpResponse {
    let prospects = source.fetch_with_fallback().await;
    HttpResponse::Ok().json(prospects)
}

#[get("/prospects/export")]
pub async fn export_prospects(
    source: web::Data<ProspectSource>,
    preferences: web::Data<PreferenceStore>,
) -> HttpResponse {
    let prospects = source.fetch_with_fallback().await;
    let prospects = apply_sort(prospects, preferences.sort_order());

    HttpResponse::Ok()
        .content_type("text/csv; charset=utf-8")
        .insert_header((
            "Content-Disposition",
            "attachment; filename=\"prospects.csv\"",
        ))
        .body(export::to_csv(&prospects))
}
