use actix_web::{get, web, HttpResponse};
use askama::Template;
use serde::Deserialize;

pub struct RangeOption {
    pub label: &'static str,
    pub value: usize,
}

#[derive(Template)]
#[template(path = "outreach.html")]
struct OutreachTemplate {
    email: String,
    designations: Vec<&'static str>,
    industries: Vec<&'static str>,
    locations: Vec<&'static str>,
    organization_types: Vec<&'static str>,
    ranges: Vec<RangeOption>,
}

#[derive(Deserialize)]
pub struct OutreachPageQuery {
    #[serde(default)]
    pub email: String,
}

#[get("/outreach")]
pub async fn outreach_page(query: web::Query<OutreachPageQuery>) -> HttpResponse {
    let template = OutreachTemplate {
        email: query.email.clone(),
        designations: vec![
            "CEO",
            "CTO",
            "Founders",
            "Co-founder",
            "AI Engineers",
            "Digital Marketing",
            "Freelancers",
            "Event Planners",
            "Marketing Manager",
            "Software Engineer",
            "Product Manager",
            "Sales Manager",
            "HR Manager",
            "Business Development",
        ],
        industries: vec![
            "Information Technology",
            "Travel",
            "Healthcare",
            "Finance",
            "Automobile",
            "Malls",
            "E-commerce",
            "Education",
            "Real Estate",
            "Manufacturing",
            "Consulting",
            "Media & Entertainment",
        ],
        locations: vec![
            "Mumbai",
            "Delhi",
            "Bangalore",
            "Chennai",
            "Kolkata",
            "Hyderabad",
            "Pune",
            "Ahmedabad",
            "Jaipur",
            "Surat",
            "Lucknow",
            "Kanpur",
            "Nagpur",
            "UAE",
            "Saudi Arabia",
            "Kuwait",
            "Qatar",
            "Bahrain",
            "Oman",
            "Remote",
        ],
        organization_types: vec![
            "SME's",
            "Mid Size Company",
            "Enterprise",
            "MNC's",
            "Startup's",
            "Non-profit",
            "Government",
            "Educational Institution",
        ],
        ranges: vec![
            RangeOption { label: "Show 1\u{2013}10", value: 0 },
            RangeOption { label: "Show 11\u{2013}20", value: 10 },
            RangeOption { label: "Show 21\u{2013}30", value: 20 },
            RangeOption { label: "Show 31\u{2013}40", value: 30 },
            RangeOption { label: "Show 41\u{2013}50", value: 40 },
        ],
    };

    HttpResponse::Ok().body(template.render().unwrap())
}
