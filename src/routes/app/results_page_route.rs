use actix_web::{get, web, HttpResponse};
use askama::Template;
use serde::Deserialize;

use crate::{
    dal::preference_store::PreferenceStore,
    domain::prospect::apply_sort,
    services::{facts, PollerRegistry},
};

pub struct ProspectView {
    pub name: String,
    pub title: String,
    pub linkedin_url: String,
    pub about: String,
    pub image_url: String,
}

#[derive(Template)]
#[template(path = "results.html")]
struct ResultsTemplate {
    email: String,
    is_loading: bool,
    is_refreshing: bool,
    fun_fact: &'static str,
    prospects: Vec<ProspectView>,
    total: usize,
}

#[derive(Deserialize)]
pub struct ResultsPageQuery {
    #[serde(default)]
    pub email: String,
}

#[get("/results")]
pub async fn results_page(
    registry: web::Data<PollerRegistry>,
    preferences: web::Data<PreferenceStore>,
    query: web::Query<ResultsPageQuery>,
) -> HttpResponse {
    let snapshot = match registry.snapshot(&query.email) {
        Some(snapshot) => snapshot,
        // No search running for this account: back to the outreach form.
        None => {
            return HttpResponse::SeeOther()
                .insert_header(("Location", format!("/app/outreach?email={}", query.email)))
                .finish()
        }
    };

    let prospects = apply_sort(snapshot.prospects, preferences.sort_order());
    let total = prospects.len();
    let prospects = prospects
        .into_iter()
        .map(|p| {
            let image_url = p.display_image();
            ProspectView {
                name: p.name,
                title: p.title,
                linkedin_url: p.linkedin_url,
                about: p.about,
                image_url,
            }
        })
        .collect();

    let template = ResultsTemplate {
        email: query.email.clone(),
        is_loading: snapshot.is_loading,
        is_refreshing: snapshot.is_refreshing,
        fun_fact: facts::random_fun_fact(),
        prospects,
        total,
    };

    HttpResponse::Ok().body(template.render().unwrap())
}
