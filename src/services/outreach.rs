use serde::Serialize;
use url::Url;
use uuid::Uuid;

use crate::{configuration::AccountSettings, domain::criteria::SearchCriteria};

/// Fire-and-forget client for the per-account automation webhook. The
/// webhook's response is ignored; a failed trigger must never block the
/// user's path to the results view.
#[derive(Clone)]
pub struct OutreachClient {
    client: reqwest::Client,
}

#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct WebhookPayload {
    pub designation: String,
    pub industry: String,
    pub location: String,
    #[serde(rename = "organizationType")]
    pub organization_type: String,
    #[serde(rename = "startIndex")]
    pub start_index: String,
}

impl WebhookPayload {
    pub fn from_criteria(criteria: &SearchCriteria) -> Self {
        WebhookPayload {
            designation: criteria.designation.trim().to_string(),
            industry: criteria.industry.trim().to_string(),
            location: criteria.location.trim().to_string(),
            organization_type: criteria.organization_type.trim().to_string(),
            // The automation expects a 1-based start index, sent as text.
            start_index: (criteria.start_index + 1).to_string(),
        }
    }
}

impl OutreachClient {
    pub fn new() -> Self {
        OutreachClient {
            client: reqwest::Client::new(),
        }
    }

    pub async fn trigger(&self, account: &AccountSettings, criteria: &SearchCriteria) {
        let request_id = Uuid::new_v4();

        let webhook_url = match Url::parse(&account.webhook_url) {
            Ok(url) => url,
            Err(e) => {
                log::error!(
                    "Outreach {} dropped, invalid webhook url for {}: {}",
                    request_id,
                    account.email,
                    e
                );
                return;
            }
        };

        let payload = WebhookPayload::from_criteria(criteria);
        match self.client.post(webhook_url).json(&payload).send().await {
            Ok(response) => log::info!(
                "Outreach {} for {} answered with status {}",
                request_id,
                account.email,
                response.status()
            ),
            Err(e) => log::error!(
                "Outreach {} for {} failed: {:?}",
                request_id,
                account.email,
                e
            ),
        }
    }
}

impl Default for OutreachClient {
    fn default() -> Self {
        Self::new()
    }
}
