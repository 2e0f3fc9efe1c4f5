//! UI Builder module for creating keyboards and formatting messages

use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};

// Import localization
use crate::localization::{t_args_lang, t_lang};

use crate::db::{Category, City, Continent, Country, NearbyCity, RecommendationView};
use crate::dialogue::CallbackAction;

fn back_row(action: CallbackAction, language_code: Option<&str>) -> Vec<InlineKeyboardButton> {
    vec![InlineKeyboardButton::callback(
        t_lang("back-button", language_code),
        action.as_data(),
    )]
}

/// Initial menu: search by current location vs. manual drill-down.
pub fn search_mode_keyboard(language_code: Option<&str>) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![
        vec![InlineKeyboardButton::callback(
            t_lang("search-by-location", language_code),
            CallbackAction::SearchByLocation.as_data(),
        )],
        vec![InlineKeyboardButton::callback(
            t_lang("search-manually", language_code),
            CallbackAction::SearchManually.as_data(),
        )],
    ])
}

/// One continent per row.
pub fn continent_keyboard(continents: &[Continent]) -> InlineKeyboardMarkup {
    let buttons = continents
        .iter()
        .map(|continent| {
            vec![InlineKeyboardButton::callback(
                continent.name.clone(),
                CallbackAction::SelectContinent(continent.continent_id).as_data(),
            )]
        })
        .collect::<Vec<_>>();

    InlineKeyboardMarkup::new(buttons)
}

/// Countries of the chosen continent, with a back button.
pub fn country_keyboard(
    countries: &[Country],
    language_code: Option<&str>,
) -> InlineKeyboardMarkup {
    let mut buttons = countries
        .iter()
        .map(|country| {
            vec![InlineKeyboardButton::callback(
                country.name.clone(),
                CallbackAction::SelectCountry(country.country_id).as_data(),
            )]
        })
        .collect::<Vec<_>>();
    buttons.push(back_row(CallbackAction::BackToContinents, language_code));

    InlineKeyboardMarkup::new(buttons)
}

/// Cities of the chosen country, with a back button.
pub fn city_keyboard(cities: &[City], language_code: Option<&str>) -> InlineKeyboardMarkup {
    let mut buttons = cities
        .iter()
        .map(|city| {
            vec![InlineKeyboardButton::callback(
                city.name.clone(),
                CallbackAction::SelectCity(city.city_id).as_data(),
            )]
        })
        .collect::<Vec<_>>();
    buttons.push(back_row(CallbackAction::BackToCountries, language_code));

    InlineKeyboardMarkup::new(buttons)
}

/// The cities nearest to the shared location; back returns to the initial
/// search mode menu.
pub fn nearby_city_keyboard(
    cities: &[NearbyCity],
    language_code: Option<&str>,
) -> InlineKeyboardMarkup {
    let mut buttons = cities
        .iter()
        .map(|city| {
            vec![InlineKeyboardButton::callback(
                city.name.clone(),
                CallbackAction::SelectCity(city.city_id).as_data(),
            )]
        })
        .collect::<Vec<_>>();
    buttons.push(back_row(CallbackAction::BackToSearchMode, language_code));

    InlineKeyboardMarkup::new(buttons)
}

/// One category per row.
pub fn category_keyboard(categories: &[Category]) -> InlineKeyboardMarkup {
    let buttons = categories
        .iter()
        .map(|category| {
            vec![InlineKeyboardButton::callback(
                category.name.clone(),
                CallbackAction::SelectCategory(category.category_id).as_data(),
            )]
        })
        .collect::<Vec<_>>();

    InlineKeyboardMarkup::new(buttons)
}

/// Single Restart button shown under the recommendation view.
pub fn restart_keyboard(language_code: Option<&str>) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![vec![InlineKeyboardButton::callback(
        t_lang("restart-button", language_code),
        CallbackAction::Restart.as_data(),
    )]])
}

/// Markdown caption for a recommendation: header line, bold name, then
/// description, address and rating.
pub fn format_recommendation(
    recommendation: &RecommendationView,
    language_code: Option<&str>,
) -> String {
    let header = t_args_lang(
        "recommendation-header",
        &[
            ("category", &recommendation.category_name),
            ("city", &recommendation.city_name),
        ],
        language_code,
    );
    let rating_line = t_args_lang(
        "rec-rating-line",
        &[("rating", &format!("{:.1}", recommendation.rating))],
        language_code,
    );

    format!(
        "{}\n\n*{}*\n{}: {}\n{}: {}\n{}",
        header,
        recommendation.name,
        t_lang("rec-description-label", language_code),
        recommendation.description,
        t_lang("rec-address-label", language_code),
        recommendation.address,
        rating_line,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use teloxide::types::InlineKeyboardButtonKind;

    fn callback_data(button: &InlineKeyboardButton) -> &str {
        match &button.kind {
            InlineKeyboardButtonKind::CallbackData(data) => data,
            other => panic!("Expected callback button, got {:?}", other),
        }
    }

    fn sample_recommendation() -> RecommendationView {
        RecommendationView {
            name: "Louvre Museum".to_string(),
            description: "The world's largest art museum.".to_string(),
            address: "Rue de Rivoli, 75001 Paris, France".to_string(),
            rating: 4.8,
            image_url: None,
            city_name: "Paris".to_string(),
            category_name: "Museums".to_string(),
        }
    }

    #[test]
    fn test_search_mode_keyboard_layout() {
        let keyboard = search_mode_keyboard(None);

        assert_eq!(keyboard.inline_keyboard.len(), 2);
        assert_eq!(callback_data(&keyboard.inline_keyboard[0][0]), "search_location");
        assert_eq!(callback_data(&keyboard.inline_keyboard[1][0]), "search_manual");
    }

    #[test]
    fn test_continent_keyboard_has_no_back_button() {
        let continents = vec![
            Continent {
                continent_id: 1,
                name: "Europe".to_string(),
            },
            Continent {
                continent_id: 2,
                name: "Asia".to_string(),
            },
        ];

        let keyboard = continent_keyboard(&continents);

        assert_eq!(keyboard.inline_keyboard.len(), 2);
        assert_eq!(keyboard.inline_keyboard[0][0].text, "Europe");
        assert_eq!(callback_data(&keyboard.inline_keyboard[0][0]), "continent_1");
        assert_eq!(callback_data(&keyboard.inline_keyboard[1][0]), "continent_2");
    }

    #[test]
    fn test_country_keyboard_appends_back_button() {
        let countries = vec![Country {
            country_id: 10,
            continent_id: 1,
            name: "France".to_string(),
        }];

        let keyboard = country_keyboard(&countries, None);

        assert_eq!(keyboard.inline_keyboard.len(), 2);
        assert_eq!(callback_data(&keyboard.inline_keyboard[0][0]), "country_10");
        assert_eq!(
            callback_data(&keyboard.inline_keyboard[1][0]),
            "back_continent"
        );
    }

    #[test]
    fn test_city_keyboard_back_goes_to_countries() {
        let cities = vec![City {
            city_id: 5,
            country_id: 10,
            name: "Paris".to_string(),
            lat: 48.8566,
            lng: 2.3522,
        }];

        let keyboard = city_keyboard(&cities, None);

        assert_eq!(callback_data(&keyboard.inline_keyboard[0][0]), "city_5");
        assert_eq!(callback_data(&keyboard.inline_keyboard[1][0]), "back_country");
    }

    #[test]
    fn test_nearby_city_keyboard_back_goes_to_search_mode() {
        let cities = vec![
            NearbyCity {
                city_id: 5,
                name: "Paris".to_string(),
                lat: 48.8566,
                lng: 2.3522,
                distance_km: 1.2,
            },
            NearbyCity {
                city_id: 6,
                name: "Lyon".to_string(),
                lat: 45.764,
                lng: 4.8357,
                distance_km: 391.4,
            },
        ];

        let keyboard = nearby_city_keyboard(&cities, None);

        assert_eq!(keyboard.inline_keyboard.len(), 3);
        assert_eq!(callback_data(&keyboard.inline_keyboard[0][0]), "city_5");
        assert_eq!(callback_data(&keyboard.inline_keyboard[1][0]), "city_6");
        assert_eq!(callback_data(&keyboard.inline_keyboard[2][0]), "back_search");
    }

    #[test]
    fn test_empty_country_list_still_offers_back() {
        let keyboard = country_keyboard(&[], None);

        assert_eq!(keyboard.inline_keyboard.len(), 1);
        assert_eq!(
            callback_data(&keyboard.inline_keyboard[0][0]),
            "back_continent"
        );
    }

    #[test]
    fn test_restart_keyboard() {
        let keyboard = restart_keyboard(None);

        assert_eq!(keyboard.inline_keyboard.len(), 1);
        assert_eq!(callback_data(&keyboard.inline_keyboard[0][0]), "restart");
    }

    #[test]
    fn test_format_recommendation_contains_all_fields() {
        let caption = format_recommendation(&sample_recommendation(), None);

        assert!(caption.contains("*Louvre Museum*"));
        assert!(caption.contains("The world's largest art museum."));
        assert!(caption.contains("Rue de Rivoli, 75001 Paris, France"));
        assert!(caption.contains("Rating: 4.8"));
        assert!(caption.contains("Paris"));
        assert!(caption.contains("Museums"));
    }

    #[test]
    fn test_format_recommendation_rounds_rating() {
        let mut recommendation = sample_recommendation();
        recommendation.rating = 4.0;

        let caption = format_recommendation(&recommendation, None);

        assert!(caption.contains("Rating: 4.0"));
    }
}
