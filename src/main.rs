use anyhow::Result;
use sqlx::postgres::PgPool;
use std::sync::Arc;
use teloxide::dispatching::dialogue::InMemStorage;
use teloxide::prelude::*;
use tracing::info;
use tracing_subscriber::EnvFilter;

use wayfinder::bot;
use wayfinder::config::BotConfig;
use wayfinder::db;
use wayfinder::dialogue::SearchState;
use wayfinder::localization;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("Starting Wayfinder recommendation bot");

    let config = BotConfig::from_env()?;

    // Fail fast on missing or broken locale resources
    localization::init_localization()?;

    info!("Connecting to database");
    let pool = PgPool::connect(&config.database_url).await?;
    db::init_database_schema(&pool).await?;

    let bot = Bot::new(config.bot_token.clone());

    info!("Bot initialized, starting dispatcher");

    let handler = dptree::entry()
        .branch(
            Update::filter_message()
                .enter_dialogue::<Message, InMemStorage<SearchState>, SearchState>()
                .endpoint(bot::message_handler),
        )
        .branch(
            Update::filter_callback_query()
                .enter_dialogue::<CallbackQuery, InMemStorage<SearchState>, SearchState>()
                .endpoint(bot::callback_handler),
        );

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![
            InMemStorage::<SearchState>::new(),
            Arc::new(pool),
            Arc::new(config)
        ])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    Ok(())
}
