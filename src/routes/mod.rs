pub mod app;
pub mod default_route;
pub mod health_route;
pub mod outreach_route;
pub mod preference_route;
pub mod prospect_route;
pub mod results_route;
