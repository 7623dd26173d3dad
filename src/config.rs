//! Application configuration loaded from environment variables.

use serde::Deserialize;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    // === Redis Connection ===
    /// Redis host (`REDIS_HOST`).
    #[serde(default = "default_redis_host")]
    pub redis_host: String,

    /// Redis port (`REDIS_PORT`).
    #[serde(default = "default_redis_port")]
    pub redis_port: u16,

    /// Redis auth password (`REDIS_PASSWORD`), if the server requires one.
    #[serde(default)]
    pub redis_password: Option<String>,

    // === Server Configuration ===
    /// HTTP listen port (`PORT`).
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_redis_host() -> String {
    "localhost".to_string()
}

fn default_redis_port() -> u16 {
    6379
}

fn default_port() -> u16 {
    3000
}

impl Config {
    /// Load configuration from environment, reading .env file first.
    pub fn load() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();
        envy::from_env()
    }

    /// Check if the configuration is valid.
    pub fn validate(&self) -> Result<(), String> {
        if self.redis_host.is_empty() {
            return Err("REDIS_HOST must not be empty".to_string());
        }

        if self.redis_port == 0 {
            return Err("REDIS_PORT must be non-zero".to_string());
        }

        Ok(())
    }

    /// Configured Redis address as `host:port`.
    pub fn redis_addr(&self) -> String {
        format!("{}:{}", self.redis_host, self.redis_port)
    }

    /// Whether an auth password was supplied.
    pub fn has_redis_password(&self) -> bool {
        self.redis_password.is_some()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn default_values_are_sensible() {
        assert_eq!(default_redis_host(), "localhost");
        assert_eq!(default_redis_port(), 6379);
        assert_eq!(default_port(), 3000);
    }

    #[test]
    fn absent_variables_fall_back_to_defaults() {
        let config: Config = envy::from_iter(Vec::<(String, String)>::new()).unwrap();

        assert_eq!(config.redis_host, "localhost");
        assert_eq!(config.redis_port, 6379);
        assert_eq!(config.redis_password, None);
        assert_eq!(config.port, 3000);
    }

    #[test]
    fn present_variables_override_defaults() {
        let vars = vec![
            ("REDIS_HOST".to_string(), "redis.internal".to_string()),
            ("REDIS_PORT".to_string(), "6380".to_string()),
            ("REDIS_PASSWORD".to_string(), "hunter2".to_string()),
            ("PORT".to_string(), "8081".to_string()),
        ];

        let config: Config = envy::from_iter(vars).unwrap();

        assert_eq!(config.redis_host, "redis.internal");
        assert_eq!(config.redis_port, 6380);
        assert_eq!(config.redis_password.as_deref(), Some("hunter2"));
        assert_eq!(config.port, 8081);
    }

    #[test]
    fn validate_rejects_empty_redis_host() {
        let config = Config {
            redis_host: String::new(),
            redis_port: default_redis_port(),
            redis_password: None,
            port: default_port(),
        };

        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_redis_port() {
        let config = Config {
            redis_host: default_redis_host(),
            redis_port: 0,
            redis_password: None,
            port: default_port(),
        };

        assert!(config.validate().is_err());
    }

    #[test]
    fn redis_addr_formats_host_and_port() {
        let config = Config {
            redis_host: "cache.example".to_string(),
            redis_port: 6380,
            redis_password: None,
            port: default_port(),
        };

        assert_eq!(config.redis_addr(), "cache.example:6380");
    }
}
