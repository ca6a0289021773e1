use std::sync::Arc;

use crate::{
    domain::prospect::{avatar_url, ProspectRecord},
    services::sheet_adapter::{AdapterError, SheetAdapter},
};

/// Sheet-backed prospect source with the fallback policy of the proxy
/// endpoint: the caller always receives a renderable set, never an error.
pub struct ProspectSource {
    adapter: Arc<SheetAdapter>,
}

impl ProspectSource {
    pub fn new(adapter: Arc<SheetAdapter>) -> Self {
        ProspectSource { adapter }
    }

    pub async fn fetch_with_fallback(&self) -> Vec<ProspectRecord> {
        match self.adapter.fetch_prospects().await {
            Ok(records) => records,
            Err(AdapterError::NotConfigured) => {
                log::info!("No sheet export url configured, serving mock prospects");
                mock_prospects()
            }
            Err(e) => {
                log::error!("Serving fallback prospects, sheet fetch failed: {}", e);
                fallback_prospects()
            }
        }
    }
}

fn mock_record(name: &str, title: &str, slug: &str, about: &str) -> ProspectRecord {
    ProspectRecord {
        name: name.to_string(),
        title: title.to_string(),
        linkedin_url: format!("https://linkedin.com/in/{}", slug),
        about: about.to_string(),
        image_url: avatar_url(name),
    }
}

/// Demo set served when no sheet export url is configured at all.
pub fn mock_prospects() -> Vec<ProspectRecord> {
    vec![
        mock_record(
            "Sarah Johnson",
            "Senior Event Manager at EventPro",
            "sarah-johnson",
            "Experienced event planner with 8+ years in the FMCG industry. Specializes in product launches, trade shows, and corporate events across India. Led over 200+ successful events for major brands.",
        ),
        mock_record(
            "Rahul Sharma",
            "Event Coordinator at BrandEvents India",
            "rahul-sharma",
            "Dynamic event professional focused on FMCG brand activations. Expert in consumer engagement strategies and experiential marketing campaigns throughout India.",
        ),
        mock_record(
            "Priya Patel",
            "Marketing Events Lead at ConsumerGoods Corp",
            "priya-patel",
            "Strategic event planner with deep FMCG industry knowledge. Manages pan-India product launches and consumer experience events for leading brands.",
        ),
        mock_record(
            "Amit Kumar",
            "Brand Activation Manager at FastGoods Ltd",
            "amit-kumar",
            "Creative event strategist specializing in FMCG consumer engagement. Has executed over 150 successful brand activation campaigns across major Indian cities.",
        ),
        mock_record(
            "Neha Gupta",
            "Event Planning Director at MegaEvents",
            "neha-gupta",
            "Award-winning event director with expertise in FMCG product launches. Known for creating memorable consumer experiences that drive brand loyalty and sales growth.",
        ),
    ]
}

/// Single-record set served when the configured sheet cannot be reached or
/// parsed.
pub fn fallback_prospects() -> Vec<ProspectRecord> {
    vec![mock_record(
        "Fallback User",
        "Sample Event Manager",
        "fallback",
        "This is fallback data shown when sheet data cannot be retrieved.",
    )]
}
