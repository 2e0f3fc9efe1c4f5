//! Dialogue Manager module: renders each menu and advances the dialogue
//! state so the callback handler can stay a thin dispatch table.

use anyhow::Result;
use sqlx::postgres::PgPool;
use teloxide::prelude::*;
use teloxide::types::{InputFile, ParseMode};
use tracing::{debug, info, warn};
use url::Url;

// Import localization
use crate::localization::t_lang;

use crate::db;
use crate::dialogue::{SearchDialogue, SearchState};

use super::ui_builder;

/// Show the initial search mode menu and reset the session to it.
pub async fn show_search_mode_menu(
    bot: &Bot,
    chat_id: ChatId,
    dialogue: &SearchDialogue,
    language_code: Option<&str>,
) -> Result<()> {
    let sent = bot
        .send_message(chat_id, t_lang("search-prompt", language_code))
        .reply_markup(ui_builder::search_mode_keyboard(language_code))
        .await?;

    dialogue
        .update(SearchState::ChoosingSearchMode {
            last_message_id: Some(sent.id.0),
        })
        .await?;

    Ok(())
}

pub async fn show_continent_menu(
    bot: &Bot,
    chat_id: ChatId,
    pool: &PgPool,
    dialogue: &SearchDialogue,
    language_code: Option<&str>,
) -> Result<()> {
    let continents = db::list_continents(pool).await?;
    debug!(user_id = %chat_id, count = continents.len(), "Showing continent menu");

    let sent = bot
        .send_message(chat_id, t_lang("select-continent", language_code))
        .reply_markup(ui_builder::continent_keyboard(&continents))
        .await?;

    dialogue
        .update(SearchState::ChoosingContinent {
            last_message_id: Some(sent.id.0),
        })
        .await?;

    Ok(())
}

pub async fn show_country_menu(
    bot: &Bot,
    chat_id: ChatId,
    pool: &PgPool,
    dialogue: &SearchDialogue,
    continent_id: i32,
    language_code: Option<&str>,
) -> Result<()> {
    let countries = db::list_countries(pool, continent_id).await?;
    debug!(user_id = %chat_id, continent_id, count = countries.len(), "Showing country menu");

    let sent = bot
        .send_message(chat_id, t_lang("select-country", language_code))
        .reply_markup(ui_builder::country_keyboard(&countries, language_code))
        .await?;

    dialogue
        .update(SearchState::ChoosingCountry {
            continent_id,
            last_message_id: Some(sent.id.0),
        })
        .await?;

    Ok(())
}

#[allow(clippy::too_many_arguments)]
pub async fn show_city_menu(
    bot: &Bot,
    chat_id: ChatId,
    pool: &PgPool,
    dialogue: &SearchDialogue,
    continent_id: i32,
    country_id: i32,
    language_code: Option<&str>,
) -> Result<()> {
    let cities = db::list_cities(pool, country_id).await?;
    debug!(user_id = %chat_id, country_id, count = cities.len(), "Showing city menu");

    let sent = bot
        .send_message(chat_id, t_lang("select-city", language_code))
        .reply_markup(ui_builder::city_keyboard(&cities, language_code))
        .await?;

    dialogue
        .update(SearchState::ChoosingCity {
            continent_id,
            country_id,
            last_message_id: Some(sent.id.0),
        })
        .await?;

    Ok(())
}

/// Run the nearest-city lookup for a shared location and offer the
/// results as a menu. An empty city table leaves the user in the
/// location-sharing step so they can start over.
#[allow(clippy::too_many_arguments)]
pub async fn show_nearby_city_menu(
    bot: &Bot,
    chat_id: ChatId,
    pool: &PgPool,
    dialogue: &SearchDialogue,
    latitude: f64,
    longitude: f64,
    limit: i64,
    language_code: Option<&str>,
) -> Result<()> {
    let cities = db::find_nearest_cities(pool, latitude, longitude, limit).await?;

    if cities.is_empty() {
        warn!(user_id = %chat_id, "No cities stored, nearest-city search came up empty");
        bot.send_message(chat_id, t_lang("no-nearby-cities", language_code))
            .await?;
        return Ok(());
    }

    info!(
        user_id = %chat_id,
        count = cities.len(),
        nearest = %cities[0].name,
        "Offering nearest cities"
    );

    let sent = bot
        .send_message(chat_id, t_lang("nearby-cities-prompt", language_code))
        .reply_markup(ui_builder::nearby_city_keyboard(&cities, language_code))
        .await?;

    dialogue
        .update(SearchState::ChoosingNearbyCity {
            last_message_id: Some(sent.id.0),
        })
        .await?;

    Ok(())
}

pub async fn show_category_menu(
    bot: &Bot,
    chat_id: ChatId,
    pool: &PgPool,
    dialogue: &SearchDialogue,
    city_id: i32,
    language_code: Option<&str>,
) -> Result<()> {
    let categories = db::list_categories(pool).await?;
    debug!(user_id = %chat_id, city_id, count = categories.len(), "Showing category menu");

    let sent = bot
        .send_message(chat_id, t_lang("select-category", language_code))
        .reply_markup(ui_builder::category_keyboard(&categories))
        .await?;

    dialogue
        .update(SearchState::ChoosingCategory {
            city_id,
            last_message_id: Some(sent.id.0),
        })
        .await?;

    Ok(())
}

/// Fetch and render the recommendation for the selected city and category.
/// Sent as a photo when the stored image URL parses, as text otherwise.
#[allow(clippy::too_many_arguments)]
pub async fn show_recommendation(
    bot: &Bot,
    chat_id: ChatId,
    pool: &PgPool,
    dialogue: &SearchDialogue,
    city_id: i32,
    category_id: i32,
    language_code: Option<&str>,
) -> Result<()> {
    let recommendations = db::find_recommendations(pool, city_id, category_id).await?;
    let keyboard = ui_builder::restart_keyboard(language_code);

    let Some(recommendation) = recommendations.first() else {
        info!(user_id = %chat_id, city_id, category_id, "No recommendations for selection");
        bot.send_message(chat_id, t_lang("no-recommendations", language_code))
            .reply_markup(keyboard)
            .await?;
        dialogue.update(SearchState::ShowingRecommendation).await?;
        return Ok(());
    };

    info!(
        user_id = %chat_id,
        recommendation = %recommendation.name,
        "Sending recommendation"
    );

    let caption = ui_builder::format_recommendation(recommendation, language_code);

    match recommendation.image_url.as_deref() {
        Some(raw_url) => match Url::parse(raw_url) {
            Ok(image_url) => {
                bot.send_photo(chat_id, InputFile::url(image_url))
                    .caption(caption)
                    .parse_mode(ParseMode::Markdown)
                    .reply_markup(keyboard)
                    .await?;
            }
            Err(e) => {
                warn!(
                    recommendation = %recommendation.name,
                    error = %e,
                    "Stored image URL does not parse, falling back to text"
                );
                bot.send_message(chat_id, caption)
                    .parse_mode(ParseMode::Markdown)
                    .reply_markup(keyboard)
                    .await?;
            }
        },
        None => {
            bot.send_message(chat_id, caption)
                .parse_mode(ParseMode::Markdown)
                .reply_markup(keyboard)
                .await?;
        }
    }

    dialogue.update(SearchState::ShowingRecommendation).await?;

    Ok(())
}
