use wayfinder::localization::{
    detect_language, get_localization_manager, init_localization, t_args_lang, t_lang,
};

#[test]
fn test_english_locale_loads() {
    init_localization().expect("Failed to initialize localization");

    let manager = get_localization_manager();

    assert!(
        manager.is_language_supported("en"),
        "English should be supported"
    );
    assert!(
        !manager.is_language_supported("es"),
        "Spanish should not be supported"
    );
}

#[test]
fn test_language_detection() {
    init_localization().expect("Failed to initialize localization");

    assert_eq!(detect_language(Some("en")), "en");
    assert_eq!(detect_language(Some("en-US")), "en");

    // Unsupported languages fall back to English
    assert_eq!(detect_language(Some("fr")), "en");
    assert_eq!(detect_language(Some("zh-CN")), "en");
    assert_eq!(detect_language(None), "en");
}

#[test]
fn test_menu_messages_resolve() {
    init_localization().expect("Failed to initialize localization");

    let keys = [
        "help-text",
        "text-hint",
        "search-prompt",
        "search-by-location",
        "search-manually",
        "send-location-prompt",
        "nearby-cities-prompt",
        "no-nearby-cities",
        "location-not-needed",
        "select-continent",
        "select-country",
        "select-city",
        "select-category",
        "back-button",
        "rec-description-label",
        "rec-address-label",
        "no-recommendations",
        "restart-button",
        "error-generic",
    ];

    for key in keys {
        let message = t_lang(key, None);
        assert!(!message.is_empty(), "{key} resolved to an empty string");
        assert!(
            !message.starts_with("Missing translation"),
            "{key} has no translation"
        );
    }
}

#[test]
fn test_argument_substitution() {
    init_localization().expect("Failed to initialize localization");

    let rating_line = t_args_lang("rec-rating-line", &[("rating", "4.8")], None);
    assert_eq!(rating_line, "Rating: 4.8");

    let header = t_args_lang(
        "recommendation-header",
        &[("category", "Museums"), ("city", "Paris")],
        None,
    );
    assert_eq!(header, "Top Museums pick in Paris");
}

#[test]
fn test_missing_key_reports_itself() {
    init_localization().expect("Failed to initialize localization");

    let message = t_lang("definitely-not-a-key", None);
    assert!(message.starts_with("Missing translation"));
}
