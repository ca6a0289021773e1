use actix_web::{post, web, Either, HttpResponse};
use serde::Deserialize;
use serde_aux::field_attributes::deserialize_number_from_string;

use crate::{
    configuration::Settings,
    domain::criteria::SearchCriteria,
    services::{OutreachClient, PollerRegistry},
};

#[derive(Deserialize)]
pub struct OutreachRequest {
    pub email: String,
    #[serde(default)]
    pub designation: String,
    #[serde(default)]
    pub industry: String,
    #[serde(default)]
    pub location: String,
    #[serde(default, rename = "organizationType")]
    pub organization_type: String,
    #[serde(
        default,
        rename = "startIndex",
        deserialize_with = "deserialize_number_from_string"
    )]
    pub start_index: usize,
}

impl OutreachRequest {
    fn criteria(&self) -> SearchCriteria {
        SearchCriteria {
            designation: self.designation.clone(),
            industry: self.industry.clone(),
            location: self.location.clone(),
            organization_type: self.organization_type.clone(),
            start_index: self.start_index,
        }
    }
}

/// Kick off a campaign: forward the criteria to the account's automation
/// webhook and start polling the sheet for generated prospects.
#[post("/outreach")]
pub async fn trigger_outreach(
    settings: web::Data<Settings>,
    outreach_client: web::Data<OutreachClient>,
    registry: web::Data<PollerRegistry>,
    body: Either<web::Json<OutreachRequest>, web::Form<OutreachRequest>>,
) -> HttpResponse {
    let (request, from_form) = match body {
        Either::Left(json) => (json.into_inner(), false),
        Either::Right(form) => (form.into_inner(), true),
    };

    let account = match settings.account(&request.email) {
        Some(account) => account.clone(),
        None => {
            return HttpResponse::NotFound()
                .body(format!("No account configured for {}", request.email))
        }
    };

    let criteria = request.criteria();

    // Fire and forget: the user moves on to the results view no matter how
    // the webhook call goes.
    let client = outreach_client.get_ref().clone();
    let webhook_criteria = criteria.clone();
    tokio::spawn(async move { client.trigger(&account, &webhook_criteria).await });

    registry.start_search(&request.email, criteria);

    if from_form {
        HttpResponse::SeeOther()
            .insert_header(("Location", format!("/app/results?email={}", request.email)))
            .finish()
    } else {
        HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
    }
}
