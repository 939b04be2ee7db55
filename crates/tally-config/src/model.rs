use serde::{Deserialize, Serialize};

/// Overrides [`Config::api_base_url`] when set.
pub const API_URL_ENV: &str = "TALLY_API_URL";

/// Client preferences persisted between runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "Config::default_api_base_url")]
    pub api_base_url: String,
    #[serde(default = "Config::default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default = "Config::default_currency_symbol")]
    pub currency_symbol: String,
    #[serde(default = "Config::default_log_filter")]
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: Self::default_api_base_url(),
            request_timeout_secs: Self::default_request_timeout_secs(),
            currency_symbol: Self::default_currency_symbol(),
            log_filter: Self::default_log_filter(),
        }
    }
}

impl Config {
    pub const KEYS: [&'static str; 4] = [
        "api_base_url",
        "request_timeout_secs",
        "currency_symbol",
        "log_filter",
    ];

    pub fn default_api_base_url() -> String {
        "http://localhost:8080/api".into()
    }

    pub fn default_request_timeout_secs() -> u64 {
        15
    }

    pub fn default_currency_symbol() -> String {
        "₹".into()
    }

    pub fn default_log_filter() -> String {
        "tally=info".into()
    }

    /// Applies environment overrides from the process environment.
    pub fn apply_env(&mut self) {
        self.apply_env_from(|key| std::env::var(key).ok());
    }

    pub fn apply_env_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup(API_URL_ENV).filter(|value| !value.trim().is_empty()) {
            self.api_base_url = url.trim().to_string();
        }
    }

    /// Current value of `key` rendered as text.
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "api_base_url" => Some(self.api_base_url.clone()),
            "request_timeout_secs" => Some(self.request_timeout_secs.to_string()),
            "currency_symbol" => Some(self.currency_symbol.clone()),
            "log_filter" => Some(self.log_filter.clone()),
            _ => None,
        }
    }

    /// Updates one key from user input.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), crate::ConfigError> {
        let value = value.trim();
        let invalid = |reason: &str| crate::ConfigError::InvalidValue {
            key: key.to_string(),
            reason: reason.to_string(),
        };
        match key {
            "api_base_url" => {
                if !(value.starts_with("http://") || value.starts_with("https://")) {
                    return Err(invalid("expected an http:// or https:// URL"));
                }
                self.api_base_url = value.trim_end_matches('/').to_string();
            }
            "request_timeout_secs" => {
                let secs: u64 = value
                    .parse()
                    .map_err(|_| invalid("expected a whole number of seconds"))?;
                if secs == 0 {
                    return Err(invalid("timeout must be at least one second"));
                }
                self.request_timeout_secs = secs;
            }
            "currency_symbol" => {
                if value.is_empty() {
                    return Err(invalid("symbol cannot be empty"));
                }
                self.currency_symbol = value.to_string();
            }
            "log_filter" => {
                if value.is_empty() {
                    return Err(invalid("filter cannot be empty"));
                }
                self.log_filter = value.to_string();
            }
            other => return Err(crate::ConfigError::UnknownKey(other.to_string())),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let cfg: Config = serde_json::from_str(r#"{"currency_symbol":"$"}"#).unwrap();
        assert_eq!(cfg.currency_symbol, "$");
        assert_eq!(cfg.api_base_url, "http://localhost:8080/api");
        assert_eq!(cfg.request_timeout_secs, 15);
    }

    #[test]
    fn env_override_replaces_base_url() {
        let mut cfg = Config::default();
        cfg.apply_env_from(|key| (key == API_URL_ENV).then(|| "https://api.example.com".into()));
        assert_eq!(cfg.api_base_url, "https://api.example.com");

        cfg.apply_env_from(|_| Some("   ".into()));
        assert_eq!(cfg.api_base_url, "https://api.example.com");
    }

    #[test]
    fn set_validates_values() {
        let mut cfg = Config::default();
        cfg.set("request_timeout_secs", "30").unwrap();
        assert_eq!(cfg.get("request_timeout_secs").as_deref(), Some("30"));

        assert!(cfg.set("request_timeout_secs", "0").is_err());
        assert!(cfg.set("api_base_url", "ftp://nope").is_err());
        assert!(matches!(
            cfg.set("theme", "dark"),
            Err(crate::ConfigError::UnknownKey(_))
        ));
    }
}
