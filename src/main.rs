mod bot;
mod config;
mod data;
mod error;
mod model;
mod scheduler;
mod service;
mod startup;
mod state;
mod util;

#[cfg(test)]
mod test_support;

use std::sync::Arc;

use serenity::http::Http;

use crate::{
    bot::gateway::SerenityGateway,
    config::Config,
    error::AppError,
    scheduler::auto_events::{start_scheduler, AutoEventScheduler},
    service::{conversation::ConversationEngine, gateway::MessagingGateway, roster::RaidRoster},
    state::BotState,
};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    startup::init_tracing();

    if let Err(e) = run().await {
        tracing::error!("Fatal error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), AppError> {
    let config = Config::from_env()?;

    let db = startup::connect_to_database(&config).await?;

    let http = Arc::new(Http::new(&config.discord_bot_token));
    let gateway: Arc<dyn MessagingGateway> = Arc::new(SerenityGateway::new(http));
    let catalog = startup::build_catalog(&config, &gateway).await;

    // Events whose messages are gone are dropped here; a failure to load is fatal.
    let roster = RaidRoster::load(db.clone(), gateway.clone()).await?;

    let auto_events = AutoEventScheduler::new().await?;
    let state = BotState::new(
        db,
        gateway,
        catalog,
        roster,
        auto_events,
        config.max_auto_events,
    );
    start_scheduler(&state).await?;

    tracing::info!("Starting bot");

    let engine = Arc::new(ConversationEngine::new(state));
    let client = bot::start::init_bot(&config, engine).await?;
    bot::start::start_bot(client).await
}
