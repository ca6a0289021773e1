use actix_web::{get, post, web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::{dal::preference_store::PreferenceStore, domain::prospect::SortOrder};

#[derive(Serialize, Deserialize)]
pub struct SortOrderBody {
    #[serde(rename = "sortOrder")]
    pub sort_order: SortOrder,
}

#[get("/preferences/sort-order")]
pub async fn get_sort_order(store: web::Data<PreferenceStore>) -> HttpResponse {
    HttpResponse::Ok().json(SortOrderBody {
        sort_order: store.sort_order(),
    })
}

#[post("/preferences/sort-order")]
pub async fn set_sort_order(
    store: web::Data<PreferenceStore>,
    body: web::Json<SortOrderBody>,
) -> HttpResponse {
    match store.set_sort_order(body.sort_order) {
        Ok(()) => HttpResponse::Ok().json(SortOrderBody {
            sort_order: body.sort_order,
        }),
        Err(e) => {
            log::error!("Failed to persist sort order: {:?}", e);
            HttpResponse::InternalServerError().body("Failed to persist preference")
        }
    }
}
