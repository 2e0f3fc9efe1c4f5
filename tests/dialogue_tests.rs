use anyhow::Result;

use wayfinder::dialogue::{CallbackAction, SearchState};

/// The dialogue starts every new chat at the initial step
#[test]
fn test_default_state_is_start() {
    assert_eq!(SearchState::default(), SearchState::Start);
}

/// Dialogue states must survive a serde round trip; teloxide storage
/// backends rely on it
#[tokio::test]
async fn test_dialogue_state_serialization() -> Result<()> {
    let states = vec![
        SearchState::Start,
        SearchState::ChoosingSearchMode {
            last_message_id: Some(17),
        },
        SearchState::AwaitingLocation,
        SearchState::ChoosingContinent {
            last_message_id: None,
        },
        SearchState::ChoosingCountry {
            continent_id: 2,
            last_message_id: Some(18),
        },
        SearchState::ChoosingCity {
            continent_id: 2,
            country_id: 9,
            last_message_id: Some(19),
        },
        SearchState::ChoosingNearbyCity {
            last_message_id: Some(20),
        },
        SearchState::ChoosingCategory {
            city_id: 42,
            last_message_id: Some(21),
        },
        SearchState::ShowingRecommendation,
    ];

    for state in states {
        let json = serde_json::to_string(&state)?;
        let restored: SearchState = serde_json::from_str(&json)?;
        assert_eq!(restored, state);
    }

    Ok(())
}

/// Selected ids accumulate along the manual drill-down so back transitions
/// can re-render the previous menu
#[test]
fn test_city_step_keeps_drill_down_context() {
    let state = SearchState::ChoosingCity {
        continent_id: 2,
        country_id: 9,
        last_message_id: Some(33),
    };

    match state {
        SearchState::ChoosingCity {
            continent_id,
            country_id,
            ..
        } => {
            assert_eq!(continent_id, 2);
            assert_eq!(country_id, 9);
        }
        _ => panic!("Unexpected dialogue state"),
    }
}

/// Only menu steps track an on-screen message to delete
#[test]
fn test_last_message_id_only_on_menu_steps() {
    assert_eq!(SearchState::Start.last_message_id(), None);
    assert_eq!(SearchState::AwaitingLocation.last_message_id(), None);
    assert_eq!(SearchState::ShowingRecommendation.last_message_id(), None);
    assert_eq!(
        SearchState::ChoosingNearbyCity {
            last_message_id: Some(7)
        }
        .last_message_id(),
        Some(7)
    );
}

/// Callback payloads round trip through the parser
#[test]
fn test_callback_action_round_trip() {
    let actions = [
        CallbackAction::SearchByLocation,
        CallbackAction::SearchManually,
        CallbackAction::SelectContinent(3),
        CallbackAction::SelectCountry(14),
        CallbackAction::SelectCity(159),
        CallbackAction::SelectCategory(2),
        CallbackAction::BackToSearchMode,
        CallbackAction::BackToContinents,
        CallbackAction::BackToCountries,
        CallbackAction::Restart,
    ];

    for action in actions {
        assert_eq!(CallbackAction::parse(&action.as_data()), Some(action));
    }
}

/// Garbage payloads are dropped rather than misrouted
#[test]
fn test_callback_action_rejects_garbage() {
    for data in ["", "city_", "city_NaN", "continent_1_2", "edit_3", "confirm"] {
        assert_eq!(CallbackAction::parse(data), None, "parsed {:?}", data);
    }
}
