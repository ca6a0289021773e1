use actix_web::{get, post, web, Either, HttpResponse};
use askama::Template;
use serde::{Deserialize, Serialize};

use crate::configuration::Settings;

#[derive(Template)]
#[template(path = "login.html")]
struct LoginTemplate {}

#[get("/login")]
pub async fn login_page() -> HttpResponse {
    HttpResponse::Ok().body(LoginTemplate {}.render().unwrap())
}

#[derive(Deserialize)]
pub struct LoginBody {
    pub email: String,
    pub password: String,
}

#[derive(Serialize)]
struct LoginResponse {
    email: String,
    #[serde(rename = "webhookUrl")]
    webhook_url: String,
    #[serde(rename = "sheetName")]
    sheet_name: String,
}

/// Credential check against the configured account list.
#[post("/login")]
pub async fn login(
    settings: web::Data<Settings>,
    body: Either<web::Json<LoginBody>, web::Form<LoginBody>>,
) -> HttpResponse {
    let (body, from_form) = match body {
        Either::Left(json) => (json.into_inner(), false),
        Either::Right(form) => (form.into_inner(), true),
    };

    let account = settings
        .accounts
        .iter()
        .find(|a| a.email == body.email && a.password == body.password);

    match account {
        Some(account) if from_form => HttpResponse::SeeOther()
            .insert_header(("Location", format!("/app/outreach?email={}", account.email)))
            .finish(),
        Some(account) => HttpResponse::Ok().json(LoginResponse {
            email: account.email.clone(),
            webhook_url: account.webhook_url.clone(),
            sheet_name: account.sheet_name.clone(),
        }),
        None => HttpResponse::Unauthorized().body("Invalid credentials. Please try again."),
    }
}
