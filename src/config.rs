use std::time::Duration;

use actix_web::cookie::Key;

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8080/api/admin";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Runtime settings, read from the environment (and `.env` if present).
#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: String,
    pub backend_url: String,
    pub backend_timeout: Duration,
    pub cookie_secure: bool,
    session_key: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind_addr = lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let backend_url = lookup("BACKEND_URL").unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string());

        let timeout_secs = match lookup("BACKEND_TIMEOUT_SECS") {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => {
                    log::warn!("BACKEND_TIMEOUT_SECS='{raw}' is not a positive number, using {DEFAULT_TIMEOUT_SECS}");
                    DEFAULT_TIMEOUT_SECS
                }
            },
            None => DEFAULT_TIMEOUT_SECS,
        };

        let cookie_secure = lookup("COOKIE_SECURE")
            .map(|v| matches!(v.trim(), "1" | "true" | "yes"))
            .unwrap_or(false);

        Self {
            bind_addr,
            backend_url,
            backend_timeout: Duration::from_secs(timeout_secs),
            cookie_secure,
            session_key: lookup("SESSION_KEY"),
        }
    }

    /// Session encryption key; falls back to a random one (sessions lost on
    /// restart) when `SESSION_KEY` is missing or too short.
    pub fn session_key(&self) -> Key {
        match &self.session_key {
            Some(val) if val.len() >= 64 => {
                log::info!("Using SESSION_KEY from environment");
                Key::from(val.as_bytes())
            }
            Some(val) => {
                log::warn!("SESSION_KEY too short ({} bytes, need 64+), generating random key", val.len());
                Key::generate()
            }
            None => {
                log::warn!("No SESSION_KEY set, generating random key (sessions lost on restart)");
                Key::generate()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Config {
        let map: HashMap<String, String> =
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        Config::from_lookup(|name| map.get(name).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        let cfg = config_from(&[]);
        assert_eq!(cfg.bind_addr, DEFAULT_BIND_ADDR);
        assert_eq!(cfg.backend_url, DEFAULT_BACKEND_URL);
        assert_eq!(cfg.backend_timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        assert!(!cfg.cookie_secure);
    }

    #[test]
    fn bad_timeout_falls_back() {
        let cfg = config_from(&[("BACKEND_TIMEOUT_SECS", "soon")]);
        assert_eq!(cfg.backend_timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        let cfg = config_from(&[("BACKEND_TIMEOUT_SECS", "0")]);
        assert_eq!(cfg.backend_timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        let cfg = config_from(&[("BACKEND_TIMEOUT_SECS", "3"), ("COOKIE_SECURE", "true")]);
        assert_eq!(cfg.backend_timeout, Duration::from_secs(3));
        assert!(cfg.cookie_secure);
    }
}
