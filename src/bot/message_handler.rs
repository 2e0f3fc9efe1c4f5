//! Message Handler module for processing incoming Telegram messages

use anyhow::Result;
use sqlx::postgres::PgPool;
use std::sync::Arc;
use teloxide::prelude::*;
use teloxide::types::Location;
use tracing::{debug, error, info};

// Import localization
use crate::localization::t_lang;

use crate::config::BotConfig;
use crate::dialogue::{SearchDialogue, SearchState};

use super::dialogue_manager::{show_nearby_city_menu, show_search_mode_menu};

async fn handle_text_message(
    bot: &Bot,
    msg: &Message,
    text: &str,
    dialogue: SearchDialogue,
) -> Result<()> {
    // Extract user's language code from Telegram
    let language_code = msg
        .from
        .as_ref()
        .and_then(|user| user.language_code.as_deref());

    // Handle /start and /restart commands: both reset the session
    if text == "/start" || text == "/restart" {
        info!(user_id = %msg.chat.id, "Starting new search session");
        show_search_mode_menu(bot, msg.chat.id, &dialogue, language_code).await?;
    }
    // Handle /help command
    else if text == "/help" {
        bot.send_message(msg.chat.id, t_lang("help-text", language_code))
            .await?;
    }
    // Everything else: the bot is driven by menu buttons
    else {
        debug!(user_id = %msg.chat.id, "Received free-form text outside any menu step");
        bot.send_message(msg.chat.id, t_lang("text-hint", language_code))
            .await?;
    }

    Ok(())
}

async fn handle_location_message(
    bot: &Bot,
    msg: &Message,
    location: &Location,
    pool: Arc<PgPool>,
    config: Arc<BotConfig>,
    dialogue: SearchDialogue,
) -> Result<()> {
    let language_code = msg
        .from
        .as_ref()
        .and_then(|user| user.language_code.as_deref());

    let state = dialogue.get().await?.unwrap_or_default();

    if !matches!(state, SearchState::AwaitingLocation) {
        debug!(user_id = %msg.chat.id, "Location shared outside the location step");
        bot.send_message(msg.chat.id, t_lang("location-not-needed", language_code))
            .await?;
        return Ok(());
    }

    info!(user_id = %msg.chat.id, "Received location, searching nearest cities");

    if let Err(e) = show_nearby_city_menu(
        bot,
        msg.chat.id,
        &pool,
        &dialogue,
        location.latitude,
        location.longitude,
        config.nearby_city_limit,
        language_code,
    )
    .await
    {
        error!(user_id = %msg.chat.id, error = %e, "Nearest-city lookup failed");
        bot.send_message(msg.chat.id, t_lang("no-nearby-cities", language_code))
            .await?;
    }

    Ok(())
}

pub async fn message_handler(
    bot: Bot,
    msg: Message,
    pool: Arc<PgPool>,
    config: Arc<BotConfig>,
    dialogue: SearchDialogue,
) -> Result<()> {
    if let Some(location) = msg.location() {
        handle_location_message(&bot, &msg, location, pool, config, dialogue).await?;
    } else if let Some(text) = msg.text() {
        handle_text_message(&bot, &msg, text, dialogue).await?;
    } else {
        // Photos, stickers and the rest play no part in the menu flow
        debug!(user_id = %msg.chat.id, "Ignoring unsupported message type");
    }

    Ok(())
}
