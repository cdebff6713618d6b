use actfarm::ai::AnthropicProvider;
use actfarm::api;
use actfarm::app_state::AppState;
use actfarm::chat::ChatAssistant;
use actfarm::config::AppConfig;
use actfarm::contact::ContactService;
use actfarm::crm::GhlClient;
use actfarm::map::Catalog;
use actfarm::routing::RouteTable;
use actfarm::storage;
use log::{info, warn};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Warn)
        .filter_module("actfarm", log::LevelFilter::Info)
        .filter_module("sqlx", log::LevelFilter::Error)
        .filter_module("sea_orm", log::LevelFilter::Error)
        .init();

    let config = AppConfig::from_env()?;

    let catalog = Catalog::builtin();
    catalog.validate()?;
    info!("map catalog loaded: {} locations", catalog.locations.len());

    let db = Arc::new(storage::establish_connection(&config.database_url).await?);

    let crm = Arc::new(GhlClient::new(&config.crm));
    let routes = RouteTable::new(&config.routing);
    let contacts = Arc::new(ContactService::new(crm, routes, config.enable_pipelines));

    let provider = config
        .anthropic_api_key
        .as_ref()
        .map(|key| AnthropicProvider::new(key.clone(), config.anthropic_base_url.clone()));
    if provider.is_none() {
        warn!("ANTHROPIC_API_KEY not set; chat will answer with the unavailable fallback");
    }
    let assistant = Arc::new(ChatAssistant::new(
        provider,
        Some(db.clone()),
        config.chat_model.clone(),
    ));

    let state = AppState {
        catalog: Arc::new(catalog),
        contacts,
        assistant,
    };

    let app = api::router(state);
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!("listening on http://{}", config.bind_addr);
    axum::serve(listener, app).await?;

    Ok(())
}
