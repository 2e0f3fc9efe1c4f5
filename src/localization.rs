//! Fluent-based localization for all user-facing bot messages.

use anyhow::{anyhow, Context, Result};
use fluent_bundle::concurrent::FluentBundle;
use fluent_bundle::{FluentArgs, FluentResource, FluentValue};
use std::collections::HashMap;
use std::fs;
use std::sync::{Arc, OnceLock};
use unic_langid::LanguageIdentifier;

const FALLBACK_LANGUAGE: &str = "en";
const SUPPORTED_LANGUAGES: &[&str] = &["en"];

/// Localization manager for the Wayfinder bot
pub struct LocalizationManager {
    bundles: HashMap<String, Arc<FluentBundle<FluentResource>>>,
}

impl LocalizationManager {
    /// Create a new localization manager with every supported locale loaded
    pub fn new() -> Result<Self> {
        let mut bundles = HashMap::new();

        for language in SUPPORTED_LANGUAGES {
            let locale: LanguageIdentifier = language.parse()?;
            let bundle = Self::create_bundle(&locale)?;
            bundles.insert((*language).to_string(), Arc::new(bundle));
        }

        Ok(Self { bundles })
    }

    /// Create a fluent bundle for a specific locale
    fn create_bundle(locale: &LanguageIdentifier) -> Result<FluentBundle<FluentResource>> {
        let mut bundle = FluentBundle::new_concurrent(vec![locale.clone()]);
        // Keep interpolated values free of Unicode isolation marks; Telegram
        // renders them as visible garbage.
        bundle.set_use_isolating(false);

        let resource_path = format!("./locales/{}/main.ftl", locale);
        let content = fs::read_to_string(&resource_path)
            .with_context(|| format!("Failed to read locale resource {resource_path}"))?;
        let resource = FluentResource::try_new(content)
            .map_err(|(_, errors)| anyhow!("Failed to parse {resource_path}: {errors:?}"))?;
        bundle
            .add_resource(resource)
            .map_err(|errors| anyhow!("Failed to add {resource_path} to bundle: {errors:?}"))?;

        Ok(bundle)
    }

    /// Whether a locale was loaded for the given language.
    pub fn is_language_supported(&self, language: &str) -> bool {
        self.bundles.contains_key(language)
    }

    /// Get a localized message in a specific language, falling back to
    /// English when the language or the key is missing.
    pub fn get_message_in_language(
        &self,
        key: &str,
        language: &str,
        args: Option<&FluentArgs>,
    ) -> String {
        let bundle = self
            .bundles
            .get(language)
            .or_else(|| self.bundles.get(FALLBACK_LANGUAGE));

        let Some(bundle) = bundle else {
            return format!("Missing translation: {}", key);
        };

        let msg = match bundle.get_message(key) {
            Some(msg) => msg,
            None => return format!("Missing translation: {}", key),
        };

        let pattern = match msg.value() {
            Some(pattern) => pattern,
            None => return format!("Missing value for key: {}", key),
        };

        let mut errors = vec![];
        bundle.format_pattern(pattern, args, &mut errors).to_string()
    }
}

static LOCALIZATION_MANAGER: OnceLock<LocalizationManager> = OnceLock::new();

/// Initialize the global localization manager eagerly, surfacing resource
/// errors at startup rather than on the first message.
pub fn init_localization() -> Result<()> {
    if LOCALIZATION_MANAGER.get().is_some() {
        return Ok(());
    }
    let manager = LocalizationManager::new()?;
    let _ = LOCALIZATION_MANAGER.set(manager);
    Ok(())
}

/// Get the global localization manager
pub fn get_localization_manager() -> &'static LocalizationManager {
    LOCALIZATION_MANAGER
        .get_or_init(|| LocalizationManager::new().expect("Failed to load locale resources"))
}

/// Map a Telegram language code onto a supported language, stripping any
/// region subtag ("fr-FR" becomes "fr") and defaulting to English.
pub fn detect_language(language_code: Option<&str>) -> &'static str {
    let Some(code) = language_code else {
        return FALLBACK_LANGUAGE;
    };
    let primary = code.split('-').next().unwrap_or(code);

    SUPPORTED_LANGUAGES
        .iter()
        .copied()
        .find(|language| *language == primary)
        .unwrap_or(FALLBACK_LANGUAGE)
}

/// Convenience function to get a localized message for a Telegram user
pub fn t_lang(key: &str, language_code: Option<&str>) -> String {
    get_localization_manager().get_message_in_language(key, detect_language(language_code), None)
}

/// Convenience function to get a localized message with arguments
pub fn t_args_lang(key: &str, args: &[(&str, &str)], language_code: Option<&str>) -> String {
    let fluent_args =
        FluentArgs::from_iter(args.iter().map(|(k, v)| (*k, FluentValue::from(*v))));

    get_localization_manager().get_message_in_language(
        key,
        detect_language(language_code),
        Some(&fluent_args),
    )
}
