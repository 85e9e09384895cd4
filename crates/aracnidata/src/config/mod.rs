use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use reqwest::Url;

use crate::consultation::DEFAULT_REPLY_DELAY;
use crate::projects::DEFAULT_EVALUATOR_URL;

pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:3000";

/// Entries each in-memory store keeps before evicting the oldest.
pub const DEFAULT_STORE_CAPACITY: usize = 1_000;

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub evaluator: EvaluatorConfig,
    pub submission: SubmissionConfig,
    pub consultation: ConsultationConfig,
    pub store: StoreConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
        let format = LogFormat::from_str(
            &env::var("APP_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string()),
        );

        let evaluator_raw =
            env::var("EVALUATOR_URL").unwrap_or_else(|_| DEFAULT_EVALUATOR_URL.to_string());
        let endpoint = Url::parse(&evaluator_raw).map_err(|err| {
            ConfigError::InvalidEvaluatorUrl {
                value: evaluator_raw.clone(),
                reason: err.to_string(),
            }
        })?;

        let api_base_raw =
            env::var("QUIZ_API_BASE").unwrap_or_else(|_| DEFAULT_API_BASE.to_string());
        let api_base =
            Url::parse(&api_base_raw).map_err(|err| ConfigError::InvalidApiBase {
                value: api_base_raw.clone(),
                reason: err.to_string(),
            })?;

        let reply_delay = match env::var("CONSULTANT_REPLY_DELAY_MS") {
            Ok(raw) => raw
                .trim()
                .parse::<u64>()
                .map(Duration::from_millis)
                .map_err(|_| ConfigError::InvalidReplyDelay)?,
            Err(_) => DEFAULT_REPLY_DELAY,
        };

        let capacity = match env::var("APP_STORE_CAPACITY") {
            Ok(raw) => raw
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|capacity| *capacity > 0)
                .ok_or(ConfigError::InvalidStoreCapacity)?,
            Err(_) => DEFAULT_STORE_CAPACITY,
        };

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level, format },
            evaluator: EvaluatorConfig { endpoint },
            submission: SubmissionConfig { api_base },
            consultation: ConsultationConfig { reply_delay },
            store: StoreConfig { capacity },
        })
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Json,
}

impl LogFormat {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "json" => Self::Json,
            _ => Self::Compact,
        }
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
    pub format: LogFormat,
}

/// Remote project evaluator endpoint.
#[derive(Debug, Clone)]
pub struct EvaluatorConfig {
    pub endpoint: Url,
}

/// Base URL the terminal quiz posts its summary to.
#[derive(Debug, Clone)]
pub struct SubmissionConfig {
    pub api_base: Url,
}

#[derive(Debug, Clone)]
pub struct ConsultationConfig {
    pub reply_delay: Duration,
}

/// Bound on the in-memory session and project stores.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub capacity: usize,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost {
        source: std::net::AddrParseError,
    },
    InvalidEvaluatorUrl {
        value: String,
        reason: String,
    },
    InvalidApiBase {
        value: String,
        reason: String,
    },
    InvalidReplyDelay,
    InvalidStoreCapacity,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidEvaluatorUrl { value, reason } => {
                write!(f, "EVALUATOR_URL '{value}' is not a valid URL ({reason})")
            }
            ConfigError::InvalidApiBase { value, reason } => {
                write!(f, "QUIZ_API_BASE '{value}' is not a valid URL ({reason})")
            }
            ConfigError::InvalidReplyDelay => {
                write!(f, "CONSULTANT_REPLY_DELAY_MS must be a whole number of milliseconds")
            }
            ConfigError::InvalidStoreCapacity => {
                write!(f, "APP_STORE_CAPACITY must be a positive whole number")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidEvaluatorUrl { .. }
            | ConfigError::InvalidApiBase { .. }
            | ConfigError::InvalidReplyDelay
            | ConfigError::InvalidStoreCapacity => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        for key in [
            "APP_ENV",
            "APP_HOST",
            "APP_PORT",
            "APP_LOG_LEVEL",
            "APP_LOG_FORMAT",
            "EVALUATOR_URL",
            "QUIZ_API_BASE",
            "CONSULTANT_REPLY_DELAY_MS",
            "APP_STORE_CAPACITY",
        ] {
            env::remove_var(key);
        }
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.telemetry.log_level, "info");
        assert_eq!(config.telemetry.format, LogFormat::Compact);
        assert_eq!(
            config.evaluator.endpoint.as_str(),
            "http://localhost:8000/evaluate"
        );
        assert_eq!(config.submission.api_base.as_str(), "http://127.0.0.1:3000/");
        assert_eq!(config.consultation.reply_delay, Duration::from_millis(1500));
        assert_eq!(config.store.capacity, DEFAULT_STORE_CAPACITY);
    }

    #[test]
    fn accepts_localhost_host() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_HOST", "localhost");
        let config = AppConfig::load().expect("config loads");
        let addr = config.server.socket_addr().expect("localhost resolves");
        assert_eq!(addr, SocketAddr::new(IpAddr::from([127, 0, 0, 1]), 3000));
        reset_env();
    }

    #[test]
    fn reads_overrides_for_remote_endpoints() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("EVALUATOR_URL", "https://eval.internal/v2/evaluate");
        env::set_var("APP_LOG_FORMAT", "JSON");
        env::set_var("CONSULTANT_REPLY_DELAY_MS", "0");
        let config = AppConfig::load().expect("config loads");
        assert_eq!(config.evaluator.endpoint.host_str(), Some("eval.internal"));
        assert_eq!(config.telemetry.format, LogFormat::Json);
        assert_eq!(config.consultation.reply_delay, Duration::ZERO);
        reset_env();
    }

    #[test]
    fn rejects_malformed_values() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("EVALUATOR_URL", "not a url");
        let err = AppConfig::load().expect_err("invalid evaluator url");
        assert!(matches!(err, ConfigError::InvalidEvaluatorUrl { .. }));

        reset_env();
        env::set_var("CONSULTANT_REPLY_DELAY_MS", "soon");
        let err = AppConfig::load().expect_err("invalid delay");
        assert!(matches!(err, ConfigError::InvalidReplyDelay));

        reset_env();
        env::set_var("APP_STORE_CAPACITY", "0");
        let err = AppConfig::load().expect_err("zero capacity");
        assert!(matches!(err, ConfigError::InvalidStoreCapacity));
        reset_env();
    }
}
