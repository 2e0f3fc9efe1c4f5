//! Callback Handler module for processing inline keyboard callback queries

use anyhow::Result;
use sqlx::postgres::PgPool;
use std::sync::Arc;
use teloxide::prelude::*;
use teloxide::types::MessageId;
use tracing::{debug, error, warn};

// Import localization
use crate::localization::t_lang;

use crate::dialogue::{CallbackAction, SearchDialogue, SearchState};

use super::dialogue_manager::{
    show_category_menu, show_city_menu, show_continent_menu, show_country_menu,
    show_recommendation, show_search_mode_menu,
};

/// Handle callback queries from inline keyboards
pub async fn callback_handler(
    bot: Bot,
    q: CallbackQuery,
    pool: Arc<PgPool>,
    dialogue: SearchDialogue,
) -> Result<()> {
    debug!(user_id = %q.from.id, data = ?q.data, "Received callback query from user");

    let Some(msg) = q.message.as_ref() else {
        // Inaccessible origin message; nothing to render into
        bot.answer_callback_query(q.id).await?;
        return Ok(());
    };
    let chat_id = msg.chat().id;

    let language_code = q.from.language_code.as_deref();
    let state = dialogue.get().await?.unwrap_or_default();

    // Remove the menu the user just acted on. The recommendation view
    // carries no tracked message id and stays in the chat.
    if let Some(message_id) = state.last_message_id() {
        if let Err(e) = bot.delete_message(chat_id, MessageId(message_id)).await {
            warn!(user_id = %q.from.id, error = %e, "Failed to delete previous menu message");
        }
    }

    match CallbackAction::parse(q.data.as_deref().unwrap_or("")) {
        Some(action) => {
            if let Err(e) =
                advance(&bot, chat_id, &pool, &dialogue, state, action, language_code).await
            {
                error!(user_id = %q.from.id, error = %e, "Failed to advance search dialogue");
                bot.send_message(chat_id, t_lang("error-generic", language_code))
                    .await?;
            }
        }
        None => {
            debug!(user_id = %q.from.id, "Ignoring unrecognized callback data");
        }
    }

    // Answer the callback query to remove the loading state
    bot.answer_callback_query(q.id).await?;

    Ok(())
}

/// Dispatch one step of the conversation. Selections are only honored when
/// they match the step the session is in; anything else is a stale button
/// press and is dropped.
#[allow(clippy::too_many_arguments)]
async fn advance(
    bot: &Bot,
    chat_id: ChatId,
    pool: &PgPool,
    dialogue: &SearchDialogue,
    state: SearchState,
    action: CallbackAction,
    language_code: Option<&str>,
) -> Result<()> {
    match (state, action) {
        // Back and restart work from any step
        (_, CallbackAction::Restart | CallbackAction::BackToSearchMode) => {
            show_search_mode_menu(bot, chat_id, dialogue, language_code).await
        }
        (_, CallbackAction::BackToContinents) => {
            show_continent_menu(bot, chat_id, pool, dialogue, language_code).await
        }
        (SearchState::ChoosingCity { continent_id, .. }, CallbackAction::BackToCountries) => {
            show_country_menu(bot, chat_id, pool, dialogue, continent_id, language_code).await
        }

        (SearchState::ChoosingSearchMode { .. }, CallbackAction::SearchByLocation) => {
            bot.send_message(chat_id, t_lang("send-location-prompt", language_code))
                .await?;
            dialogue.update(SearchState::AwaitingLocation).await?;
            Ok(())
        }
        (SearchState::ChoosingSearchMode { .. }, CallbackAction::SearchManually) => {
            show_continent_menu(bot, chat_id, pool, dialogue, language_code).await
        }
        (
            SearchState::ChoosingContinent { .. },
            CallbackAction::SelectContinent(continent_id),
        ) => show_country_menu(bot, chat_id, pool, dialogue, continent_id, language_code).await,
        (
            SearchState::ChoosingCountry { continent_id, .. },
            CallbackAction::SelectCountry(country_id),
        ) => {
            show_city_menu(
                bot,
                chat_id,
                pool,
                dialogue,
                continent_id,
                country_id,
                language_code,
            )
            .await
        }
        (
            SearchState::ChoosingCity { .. } | SearchState::ChoosingNearbyCity { .. },
            CallbackAction::SelectCity(city_id),
        ) => show_category_menu(bot, chat_id, pool, dialogue, city_id, language_code).await,
        (
            SearchState::ChoosingCategory { city_id, .. },
            CallbackAction::SelectCategory(category_id),
        ) => {
            show_recommendation(
                bot,
                chat_id,
                pool,
                dialogue,
                city_id,
                category_id,
                language_code,
            )
            .await
        }

        (state, action) => {
            debug!(
                ?state,
                ?action,
                "Callback does not match the current step, ignoring"
            );
            Ok(())
        }
    }
}
