use std::net::TcpListener;

use actix_files::Files;
use actix_web::{dev::Server, middleware::Logger, web, App, HttpServer};

use crate::{
    configuration::Settings,
    dal::preference_store::PreferenceStore,
    routes::{
        app, default_route, health_route, outreach_route, preference_route, prospect_route,
        results_route,
    },
    services::{OutreachClient, PollerRegistry, ProspectSource},
};

pub fn run(
    listener: TcpListener,
    settings: Settings,
    prospect_source: ProspectSource,
    outreach_client: OutreachClient,
    poller_registry: PollerRegistry,
    preference_store: PreferenceStore,
) -> Result<Server, std::io::Error> {
    let settings = web::Data::new(settings);
    let prospect_source = web::Data::new(prospect_source);
    let outreach_client = web::Data::new(outreach_client);
    let poller_registry = web::Data::new(poller_registry);
    let preference_store = web::Data::new(preference_store);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .service(Files::new("/static", "./templates/static").prefer_utf8(true))
            .service(default_route::home)
            .service(health_route::health)
            .service(outreach_route::trigger_outreach)
            .service(
                web::scope("/api")
                    .service(prospect_route::get_prospects)
                    .service(prospect_route::export_prospects)
                    .service(results_route::get_results)
                    .service(results_route::refetch_results)
                    .service(preference_route::get_sort_order)
                    .service(preference_route::set_sort_order),
            )
            .service(
                web::scope("/app")
                    .service(app::login_route::login_page)
                    .service(app::login_route::login)
                    .service(app::outreach_page_route::outreach_page)
                    .service(app::results_page_route::results_page),
            )
            .app_data(settings.clone())
            .app_data(prospect_source.clone())
            .app_data(outreach_client.clone())
            .app_data(poller_registry.clone())
            .app_data(preference_store.clone())
    })
    .listen(listener)?
    .run();

    Ok(server)
}
