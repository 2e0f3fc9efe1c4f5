//! Runtime configuration loaded from environment variables.

use anyhow::{bail, Context, Result};
use std::env;

/// How many nearby cities are offered after a location share.
pub const DEFAULT_NEARBY_CITY_LIMIT: i64 = 3;

/// Bot configuration resolved at startup.
#[derive(Debug, Clone)]
pub struct BotConfig {
    pub bot_token: String,
    pub database_url: String,
    pub nearby_city_limit: i64,
}

impl BotConfig {
    /// Read configuration from the environment. `TELEGRAM_BOT_TOKEN` and
    /// `DATABASE_URL` are required, `NEARBY_CITY_LIMIT` is optional.
    pub fn from_env() -> Result<Self> {
        let bot_token =
            env::var("TELEGRAM_BOT_TOKEN").context("TELEGRAM_BOT_TOKEN must be set")?;
        let database_url = env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
        let nearby_city_limit = parse_nearby_city_limit(env::var("NEARBY_CITY_LIMIT").ok())?;

        Ok(Self {
            bot_token,
            database_url,
            nearby_city_limit,
        })
    }
}

fn parse_nearby_city_limit(raw: Option<String>) -> Result<i64> {
    let Some(raw) = raw else {
        return Ok(DEFAULT_NEARBY_CITY_LIMIT);
    };

    let limit: i64 = raw
        .trim()
        .parse()
        .context("NEARBY_CITY_LIMIT must be an integer")?;

    if limit < 1 {
        bail!("NEARBY_CITY_LIMIT must be at least 1, got {limit}");
    }

    Ok(limit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nearby_city_limit_default() {
        assert_eq!(
            parse_nearby_city_limit(None).unwrap(),
            DEFAULT_NEARBY_CITY_LIMIT
        );
    }

    #[test]
    fn test_nearby_city_limit_parsing() {
        assert_eq!(parse_nearby_city_limit(Some("5".to_string())).unwrap(), 5);
        assert_eq!(parse_nearby_city_limit(Some(" 7 ".to_string())).unwrap(), 7);
    }

    #[test]
    fn test_nearby_city_limit_rejects_invalid_values() {
        assert!(parse_nearby_city_limit(Some("0".to_string())).is_err());
        assert!(parse_nearby_city_limit(Some("-3".to_string())).is_err());
        assert!(parse_nearby_city_limit(Some("three".to_string())).is_err());
    }
}
