use std::{net::TcpListener, sync::Arc};

use anyhow::Context;
use env_logger::Env;
use linkreach::{
    configuration::get_configuration,
    dal::preference_store::PreferenceStore,
    services::{OutreachClient, PollerRegistry, ProspectSource, SheetAdapter},
    startup::run,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let configuration = get_configuration().context("Failed to read configuration.")?;

    let address = format!(
        "{}:{}",
        configuration.application.host, configuration.application.port
    );
    let listener = TcpListener::bind(address)?;

    let adapter = Arc::new(SheetAdapter::new(configuration.sheet.clone()));
    let prospect_source = ProspectSource::new(Arc::clone(&adapter));
    let outreach_client = OutreachClient::new();
    let poller_registry = PollerRegistry::new(adapter, configuration.poller.clone());
    let preference_store = PreferenceStore::new(configuration.preferences_path.clone());

    run(
        listener,
        configuration,
        prospect_source,
        outreach_client,
        poller_registry,
        preference_store,
    )?
    .await?;

    Ok(())
}
