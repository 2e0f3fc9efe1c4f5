//! Conversation state for the recommendation search dialogue.

use serde::{Deserialize, Serialize};
use teloxide::dispatching::dialogue::{Dialogue, InMemStorage};

/// Per-chat conversation state. Each menu step stores the ids selected so
/// far (so back transitions can re-render the previous menu) and the id of
/// the menu message currently on screen (so it can be deleted before the
/// next menu renders).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub enum SearchState {
    #[default]
    Start,
    ChoosingSearchMode {
        last_message_id: Option<i32>,
    },
    AwaitingLocation,
    ChoosingContinent {
        last_message_id: Option<i32>,
    },
    ChoosingCountry {
        continent_id: i32,
        last_message_id: Option<i32>,
    },
    ChoosingCity {
        continent_id: i32,
        country_id: i32,
        last_message_id: Option<i32>,
    },
    ChoosingNearbyCity {
        last_message_id: Option<i32>,
    },
    ChoosingCategory {
        city_id: i32,
        last_message_id: Option<i32>,
    },
    ShowingRecommendation,
}

impl SearchState {
    /// Message id of the menu currently on screen, if any. The
    /// recommendation view deliberately has none: it stays in the chat
    /// when the user restarts.
    pub fn last_message_id(&self) -> Option<i32> {
        match self {
            Self::ChoosingSearchMode { last_message_id }
            | Self::ChoosingContinent { last_message_id }
            | Self::ChoosingCountry {
                last_message_id, ..
            }
            | Self::ChoosingCity {
                last_message_id, ..
            }
            | Self::ChoosingNearbyCity { last_message_id }
            | Self::ChoosingCategory {
                last_message_id, ..
            } => *last_message_id,
            Self::Start | Self::AwaitingLocation | Self::ShowingRecommendation => None,
        }
    }
}

/// Type alias for the search dialogue
pub type SearchDialogue = Dialogue<SearchState, InMemStorage<SearchState>>;

/// An action encoded in inline-keyboard callback data.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CallbackAction {
    SearchByLocation,
    SearchManually,
    SelectContinent(i32),
    SelectCountry(i32),
    SelectCity(i32),
    SelectCategory(i32),
    BackToSearchMode,
    BackToContinents,
    BackToCountries,
    Restart,
}

impl CallbackAction {
    /// Parse callback data sent back by Telegram. Unknown or malformed
    /// payloads return `None` and are ignored by the handler.
    pub fn parse(data: &str) -> Option<Self> {
        match data {
            "search_location" => return Some(Self::SearchByLocation),
            "search_manual" => return Some(Self::SearchManually),
            "back_search" => return Some(Self::BackToSearchMode),
            "back_continent" => return Some(Self::BackToContinents),
            "back_country" => return Some(Self::BackToCountries),
            "restart" => return Some(Self::Restart),
            _ => {}
        }

        if let Some(raw) = data.strip_prefix("continent_") {
            raw.parse().ok().map(Self::SelectContinent)
        } else if let Some(raw) = data.strip_prefix("country_") {
            raw.parse().ok().map(Self::SelectCountry)
        } else if let Some(raw) = data.strip_prefix("city_") {
            raw.parse().ok().map(Self::SelectCity)
        } else if let Some(raw) = data.strip_prefix("category_") {
            raw.parse().ok().map(Self::SelectCategory)
        } else {
            None
        }
    }

    /// Callback data string for this action, the inverse of [`parse`].
    ///
    /// [`parse`]: Self::parse
    pub fn as_data(&self) -> String {
        match self {
            Self::SearchByLocation => "search_location".to_string(),
            Self::SearchManually => "search_manual".to_string(),
            Self::SelectContinent(id) => format!("continent_{id}"),
            Self::SelectCountry(id) => format!("country_{id}"),
            Self::SelectCity(id) => format!("city_{id}"),
            Self::SelectCategory(id) => format!("category_{id}"),
            Self::BackToSearchMode => "back_search".to_string(),
            Self::BackToContinents => "back_continent".to_string(),
            Self::BackToCountries => "back_country".to_string(),
            Self::Restart => "restart".to_string(),
        }
    }
}
