use actix_web::{get, HttpResponse};
use askama::Template;

#[derive(Template)]
#[template(path = "home.html")]
struct HomeTemplate {}

#[get("/")]
pub async fn home() -> HttpResponse {
    HttpResponse::Ok().body(HomeTemplate {}.render().unwrap())
}
