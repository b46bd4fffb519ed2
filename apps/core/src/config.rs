//! Runtime configuration, read from the environment (and `.env` when present).

use crate::error::AppError;
use std::env;
use std::str::FromStr;
use std::time::Duration;
use validator::Validate;

pub const DEFAULT_LINE_API_URL: &str = "https://api.line.me";
pub const DEFAULT_YOUTUBE_API_URL: &str = "https://www.googleapis.com/youtube/v3";
pub const DEFAULT_WEATHER_API_URL: &str = "https://api.openweathermap.org/data/2.5";
pub const DEFAULT_ADVICE_API_URL: &str = "https://api.adviceslip.com";
pub const DEFAULT_SEARCH_TIMEOUT_SECS: u64 = 3;
pub const DEFAULT_RESPONDER_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_TYPING_DELAY_MS: (u64, u64) = (1000, 2000);

#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct ResponderConfig {
    pub channel_access_token: Option<String>,
    #[validate(url)]
    pub line_api_url: String,
    /// Participant whose profile `master` shows in group chats.
    pub master_user_id: Option<String>,
    #[validate(url)]
    pub youtube_api_url: String,
    pub youtube_api_key: Option<String>,
    #[validate(url)]
    pub weather_api_url: String,
    pub weather_api_key: Option<String>,
    #[validate(url)]
    pub advice_api_url: String,
    #[validate(range(min = 1, max = 60))]
    pub search_timeout_secs: u64,
    /// Inclusive millisecond range the typing pause is drawn from.
    pub typing_delay_ms: (u64, u64),
    #[validate(range(min = 1, max = 600))]
    pub responder_timeout_secs: u64,
}

/// Test profile: default endpoints, no typing pause.
impl Default for ResponderConfig {
    fn default() -> Self {
        Self {
            channel_access_token: None,
            line_api_url: DEFAULT_LINE_API_URL.to_string(),
            master_user_id: None,
            youtube_api_url: DEFAULT_YOUTUBE_API_URL.to_string(),
            youtube_api_key: None,
            weather_api_url: DEFAULT_WEATHER_API_URL.to_string(),
            weather_api_key: None,
            advice_api_url: DEFAULT_ADVICE_API_URL.to_string(),
            search_timeout_secs: DEFAULT_SEARCH_TIMEOUT_SECS,
            typing_delay_ms: (0, 0),
            responder_timeout_secs: DEFAULT_RESPONDER_TIMEOUT_SECS,
        }
    }
}

impl ResponderConfig {
    /// Loads `.env` if there is one, then reads every setting from the environment.
    pub fn from_env() -> Result<Self, AppError> {
        dotenv::dotenv().ok();

        let defaults = Self::default();
        let config = Self {
            channel_access_token: optional_var("LINE_CHANNEL_TOKEN"),
            line_api_url: optional_var("LINE_API_URL").unwrap_or(defaults.line_api_url),
            master_user_id: optional_var("YURI_MASTER_USER_ID"),
            youtube_api_url: optional_var("YOUTUBE_API_URL").unwrap_or(defaults.youtube_api_url),
            youtube_api_key: optional_var("YOUTUBE_API_KEY"),
            weather_api_url: optional_var("OPENWEATHER_API_URL")
                .unwrap_or(defaults.weather_api_url),
            weather_api_key: optional_var("OPENWEATHER_API_KEY"),
            advice_api_url: optional_var("ADVICE_API_URL").unwrap_or(defaults.advice_api_url),
            search_timeout_secs: parsed_var("YURI_SEARCH_TIMEOUT_SECS", DEFAULT_SEARCH_TIMEOUT_SECS)?,
            typing_delay_ms: match optional_var("YURI_TYPING_DELAY_MS") {
                Some(raw) => parse_delay_range(&raw)?,
                None => DEFAULT_TYPING_DELAY_MS,
            },
            responder_timeout_secs: parsed_var(
                "YURI_RESPONDER_TIMEOUT_SECS",
                DEFAULT_RESPONDER_TIMEOUT_SECS,
            )?,
        };
        config.check()?;
        Ok(config)
    }

    /// Field validation plus the checks the derive can't express.
    pub fn check(&self) -> Result<(), AppError> {
        self.validate()?;
        let (min, max) = self.typing_delay_ms;
        if min > max {
            return Err(AppError::Config(format!(
                "typing delay minimum {}ms exceeds maximum {}ms",
                min, max
            )));
        }
        // the pause runs inside the responder's request window
        let window_ms = self.responder_timeout_secs.saturating_mul(1000);
        if max >= window_ms {
            return Err(AppError::Config(format!(
                "typing delay maximum {}ms must be shorter than the {}s responder timeout",
                max, self.responder_timeout_secs
            )));
        }
        Ok(())
    }

    pub fn search_timeout(&self) -> Duration {
        Duration::from_secs(self.search_timeout_secs)
    }

    pub fn responder_timeout(&self) -> Duration {
        Duration::from_secs(self.responder_timeout_secs)
    }
}

fn optional_var(key: &str) -> Option<String> {
    env::var(key).ok().map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn parsed_var<T: FromStr>(key: &str, default: T) -> Result<T, AppError> {
    match optional_var(key) {
        Some(raw) => raw
            .parse()
            .map_err(|_| AppError::Config(format!("{} has an invalid value: {}", key, raw))),
        None => Ok(default),
    }
}

/// Parses `"min-max"` or a single `"ms"` value into an inclusive range.
pub fn parse_delay_range(raw: &str) -> Result<(u64, u64), AppError> {
    let invalid = || AppError::Config(format!("YURI_TYPING_DELAY_MS has an invalid value: {}", raw));
    let parse = |part: &str| part.trim().parse::<u64>().map_err(|_| invalid());
    match raw.split_once('-') {
        Some((min, max)) => Ok((parse(min)?, parse(max)?)),
        None => {
            let fixed = parse(raw)?;
            Ok((fixed, fixed))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_VARS: [&str; 11] = [
        "LINE_CHANNEL_TOKEN",
        "LINE_API_URL",
        "YURI_MASTER_USER_ID",
        "YOUTUBE_API_URL",
        "YOUTUBE_API_KEY",
        "OPENWEATHER_API_URL",
        "OPENWEATHER_API_KEY",
        "ADVICE_API_URL",
        "YURI_SEARCH_TIMEOUT_SECS",
        "YURI_TYPING_DELAY_MS",
        "YURI_RESPONDER_TIMEOUT_SECS",
    ];

    // Every known variable unset except the given overrides.
    fn env_with(overrides: &[(&'static str, &'static str)]) -> Vec<(&'static str, Option<&'static str>)> {
        ALL_VARS
            .iter()
            .map(|key| {
                let value = overrides.iter().find(|(k, _)| k == key).map(|(_, v)| *v);
                (*key, value)
            })
            .collect()
    }

    #[test]
    fn test_defaults_when_environment_is_empty() {
        temp_env::with_vars(env_with(&[]), || {
            let config = ResponderConfig::from_env().unwrap();
            assert_eq!(config.line_api_url, DEFAULT_LINE_API_URL);
            assert_eq!(config.search_timeout(), Duration::from_secs(3));
            assert_eq!(config.typing_delay_ms, (1000, 2000));
            assert_eq!(config.master_user_id, None);
            assert_eq!(config.channel_access_token, None);
        });
    }

    #[test]
    fn test_reads_overrides() {
        let vars = env_with(&[
            ("LINE_CHANNEL_TOKEN", "secret"),
            ("YURI_MASTER_USER_ID", "Umaster"),
            ("YURI_SEARCH_TIMEOUT_SECS", "10"),
            ("YURI_TYPING_DELAY_MS", "0"),
            ("OPENWEATHER_API_URL", "http://localhost:9000"),
        ]);
        temp_env::with_vars(vars, || {
            let config = ResponderConfig::from_env().unwrap();
            assert_eq!(config.channel_access_token.as_deref(), Some("secret"));
            assert_eq!(config.master_user_id.as_deref(), Some("Umaster"));
            assert_eq!(config.search_timeout_secs, 10);
            assert_eq!(config.typing_delay_ms, (0, 0));
            assert_eq!(config.weather_api_url, "http://localhost:9000");
        });
    }

    #[test]
    fn test_out_of_range_timeout_is_rejected() {
        let vars = env_with(&[("YURI_SEARCH_TIMEOUT_SECS", "0")]);
        temp_env::with_vars(vars, || {
            assert!(matches!(ResponderConfig::from_env(), Err(AppError::Config(_))));
        });
    }

    #[test]
    fn test_non_numeric_timeout_is_rejected() {
        let vars = env_with(&[("YURI_RESPONDER_TIMEOUT_SECS", "soon")]);
        temp_env::with_vars(vars, || {
            match ResponderConfig::from_env() {
                Err(AppError::Config(msg)) => assert!(msg.contains("YURI_RESPONDER_TIMEOUT_SECS")),
                other => panic!("expected Config error, got {:?}", other),
            }
        });
    }

    #[test]
    fn test_bad_url_is_rejected() {
        let vars = env_with(&[("LINE_API_URL", "not a url")]);
        temp_env::with_vars(vars, || {
            assert!(matches!(ResponderConfig::from_env(), Err(AppError::Config(_))));
        });
    }

    #[test]
    fn test_delay_range_parsing() {
        assert_eq!(parse_delay_range("1000-2000").unwrap(), (1000, 2000));
        assert_eq!(parse_delay_range(" 250 ").unwrap(), (250, 250));
        assert!(parse_delay_range("fast").is_err());
        assert!(parse_delay_range("10-").is_err());
    }

    #[test]
    fn test_inverted_delay_range_fails_check() {
        let config = ResponderConfig {
            typing_delay_ms: (2000, 1000),
            ..ResponderConfig::default()
        };
        assert!(matches!(config.check(), Err(AppError::Config(_))));
    }

    #[test]
    fn test_typing_delay_must_fit_responder_timeout() {
        let config = ResponderConfig {
            typing_delay_ms: (1500, 1500),
            responder_timeout_secs: 1,
            ..ResponderConfig::default()
        };
        match config.check() {
            Err(AppError::Config(msg)) => assert!(msg.contains("1500ms")),
            other => panic!("expected Config error, got {:?}", other),
        }

        let vars = env_with(&[
            ("YURI_TYPING_DELAY_MS", "500-1000"),
            ("YURI_RESPONDER_TIMEOUT_SECS", "1"),
        ]);
        temp_env::with_vars(vars, || {
            assert!(matches!(ResponderConfig::from_env(), Err(AppError::Config(_))));
        });

        let fits = ResponderConfig {
            typing_delay_ms: (1500, 1999),
            responder_timeout_secs: 2,
            ..ResponderConfig::default()
        };
        assert!(fits.check().is_ok());
    }

    #[test]
    fn test_default_profile_is_valid() {
        assert!(ResponderConfig::default().check().is_ok());
    }
}
