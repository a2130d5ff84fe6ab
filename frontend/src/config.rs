use std::str::FromStr;

use shared::AuthMode;
use shared::paging::HistoryPaging;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000/api";

/// Build-time settings, read once in `main` and handed down to the pages.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub api_base_url: String,
    pub auth_mode: AuthMode,
    pub history_paging: HistoryPaging,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            auth_mode: AuthMode::default(),
            history_paging: HistoryPaging::default(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_values(
            option_env!("DF_API_BASE_URL"),
            option_env!("DF_AUTH_MODE"),
            option_env!("DF_HISTORY_PAGING"),
        )
    }

    pub fn from_values(base_url: Option<&str>, auth_mode: Option<&str>, history_paging: Option<&str>) -> Self {
        let api_base_url = base_url
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .unwrap_or(DEFAULT_API_BASE_URL)
            .trim_end_matches('/')
            .to_string();

        Self {
            api_base_url,
            auth_mode: parse_or_default("DF_AUTH_MODE", auth_mode),
            history_paging: parse_or_default("DF_HISTORY_PAGING", history_paging),
        }
    }
}

fn parse_or_default<T>(name: &str, raw: Option<&str>) -> T
where
    T: FromStr + Default,
{
    match raw.map(str::trim).filter(|value| !value.is_empty()) {
        None => T::default(),
        Some(value) => T::from_str(&value.to_ascii_lowercase()).unwrap_or_else(|_| {
            log::warn!("Ignoring unrecognised {} value {:?}", name, value);
            T::default()
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_environment() {
        assert_eq!(AppConfig::from_values(None, None, None), AppConfig::default());
    }

    #[test]
    fn reads_values() {
        let config = AppConfig::from_values(Some("https://api.example.com/v1/"), Some("Bearer"), Some("reveal"));
        assert_eq!(config.api_base_url, "https://api.example.com/v1");
        assert_eq!(config.auth_mode, AuthMode::Bearer);
        assert_eq!(config.history_paging, HistoryPaging::Reveal);
    }

    #[test]
    fn bad_values_fall_back() {
        let config = AppConfig::from_values(Some("  "), Some("oauth"), Some("infinite"));
        assert_eq!(config, AppConfig::default());
    }
}
