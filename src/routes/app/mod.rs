pub mod login_route;
pub mod outreach_page_route;
pub mod results_page_route;
