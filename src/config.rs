use crate::utils::AppError;
use std::time::Duration;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_DATABASE: &str = "registration";
const DEFAULT_MAX_POOL_SIZE: u32 = 20;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Process configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub mongo_uri: String,
    pub mongo_database: String,
    pub mongo_max_pool_size: u32,
    pub request_timeout: Duration,
    pub cors_allowed_origins: Vec<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mongo_uri = lookup("MONGO_URI")
            .filter(|uri| !uri.trim().is_empty())
            .ok_or_else(|| AppError::Configuration("MONGO_URI must be set".to_string()))?;

        let cors_allowed_origins = lookup("CORS_ALLOWED_ORIGINS")
            .map(|origins| {
                origins
                    .split(',')
                    .map(str::trim)
                    .filter(|origin| !origin.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            host: lookup("HOST")
                .filter(|host| !host.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: parse_or(&lookup, "PORT", DEFAULT_PORT)?,
            mongo_uri,
            mongo_database: lookup("MONGO_DATABASE").unwrap_or_else(|| DEFAULT_DATABASE.to_string()),
            mongo_max_pool_size: parse_or(&lookup, "MONGO_MAX_POOL_SIZE", DEFAULT_MAX_POOL_SIZE)?,
            request_timeout: Duration::from_secs(parse_or(
                &lookup,
                "REQUEST_TIMEOUT_SECS",
                DEFAULT_REQUEST_TIMEOUT_SECS,
            )?),
            cors_allowed_origins,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, AppError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    // Blank counts as unset, like `process.env.PORT || 3000`
    match lookup(key).filter(|raw| !raw.trim().is_empty()) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| AppError::Configuration(format!("{} must be a number, got '{}'", key, raw))),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup_from(&[("MONGO_URI", "mongodb://localhost:27017")])).unwrap();

        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 3000);
        assert_eq!(config.mongo_database, "registration");
        assert_eq!(config.mongo_max_pool_size, 20);
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert!(config.cors_allowed_origins.is_empty());
        assert_eq!(config.bind_address(), "0.0.0.0:3000");
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("MONGO_URI", "mongodb://db:27017/accounts"),
            ("HOST", "127.0.0.1"),
            ("PORT", "8080"),
            ("REQUEST_TIMEOUT_SECS", "5"),
            ("CORS_ALLOWED_ORIGINS", "http://localhost:8081, http://127.0.0.1:19006,"),
        ]))
        .unwrap();

        assert_eq!(config.bind_address(), "127.0.0.1:8080");
        assert_eq!(config.request_timeout, Duration::from_secs(5));
        assert_eq!(
            config.cors_allowed_origins,
            vec!["http://localhost:8081".to_string(), "http://127.0.0.1:19006".to_string()]
        );
    }

    #[test]
    fn test_blank_values_use_defaults() {
        let config = Config::from_lookup(lookup_from(&[
            ("MONGO_URI", "mongodb://localhost:27017"),
            ("HOST", ""),
            ("PORT", ""),
            ("REQUEST_TIMEOUT_SECS", "  "),
        ]))
        .unwrap();

        assert_eq!(config.bind_address(), "0.0.0.0:3000");
        assert_eq!(config.request_timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_missing_mongo_uri() {
        let result = Config::from_lookup(lookup_from(&[("PORT", "3000")]));
        assert!(matches!(result, Err(AppError::Configuration(_))));
    }

    #[test]
    fn test_invalid_port() {
        let result = Config::from_lookup(lookup_from(&[
            ("MONGO_URI", "mongodb://localhost:27017"),
            ("PORT", "three-thousand"),
        ]));
        assert!(matches!(result, Err(AppError::Configuration(_))));
    }
}
