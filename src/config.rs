use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use crate::ui::banner::DEFAULT_HIDE_AFTER;

#[derive(Debug, Clone)]
pub struct FrontendConfig {
    pub activities_api_url: String,
    pub host: String,
    pub port: u16,
    pub static_dir: PathBuf,
    pub message_hide_after: Duration,
}

impl Default for FrontendConfig {
    fn default() -> Self {
        Self {
            activities_api_url: "http://127.0.0.1:8000".to_string(),
            host: "127.0.0.1".to_string(),
            port: 3000,
            static_dir: PathBuf::from("static"),
            message_hide_after: DEFAULT_HIDE_AFTER,
        }
    }
}

impl FrontendConfig {
    /// Reads the environment (after `.env` has been loaded). Unset or unparsable
    /// values fall back to the defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let non_empty = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        Self {
            activities_api_url: non_empty("ACTIVITIES_API_URL")
                .unwrap_or(defaults.activities_api_url),
            host: non_empty("HOST").unwrap_or(defaults.host),
            port: non_empty("PORT")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.port),
            static_dir: non_empty("STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.static_dir),
            message_hide_after: non_empty("MESSAGE_HIDE_MS")
                .and_then(|v| v.parse().ok())
                .map(Duration::from_millis)
                .unwrap_or(defaults.message_hide_after),
        }
    }

    pub fn bind_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.host, self.port).parse()
    }

    pub fn fallback_bind_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.host, self.port.saturating_add(1)).parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> FrontendConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        FrontendConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_environment_is_empty() {
        let cfg = config_from(&[]);
        assert_eq!(cfg.activities_api_url, "http://127.0.0.1:8000");
        assert_eq!(cfg.port, 3000);
        assert_eq!(cfg.message_hide_after, Duration::from_millis(5000));
        assert_eq!(cfg.bind_addr().expect("addr").to_string(), "127.0.0.1:3000");
        assert_eq!(
            cfg.fallback_bind_addr().expect("addr").to_string(),
            "127.0.0.1:3001"
        );
    }

    #[test]
    fn reads_overrides_and_ignores_garbage() {
        let cfg = config_from(&[
            ("ACTIVITIES_API_URL", " http://backend:8000 "),
            ("PORT", "not-a-port"),
            ("HOST", "0.0.0.0"),
            ("MESSAGE_HIDE_MS", "1500"),
            ("STATIC_DIR", ""),
        ]);
        assert_eq!(cfg.activities_api_url, "http://backend:8000");
        assert_eq!(cfg.port, 3000);
        assert_eq!(cfg.host, "0.0.0.0");
        assert_eq!(cfg.message_hide_after, Duration::from_millis(1500));
        assert_eq!(cfg.static_dir, PathBuf::from("static"));
    }
}
