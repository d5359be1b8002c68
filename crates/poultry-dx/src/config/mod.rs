use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use crate::diagnosis::knowledge::{KnowledgeBase, KnowledgeBaseError};

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
    pub diagnosis: DiagnosisConfig,
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

        let knowledge_base_path = env::var("APP_KNOWLEDGE_BASE")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);
        let extractor_seed = env::var("APP_EXTRACTOR_SEED")
            .unwrap_or_else(|_| DEFAULT_EXTRACTOR_SEED.to_string())
            .parse::<u64>()
            .map_err(|_| ConfigError::InvalidSeed)?;

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            diagnosis: DiagnosisConfig {
                knowledge_base_path,
                extractor_seed,
            },
        })
    }
}

const DEFAULT_EXTRACTOR_SEED: u64 = 42;

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

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Where disease knowledge comes from and how the specimen extractor is seeded.
#[derive(Debug, Clone)]
pub struct DiagnosisConfig {
    pub knowledge_base_path: Option<PathBuf>,
    pub extractor_seed: u64,
}

impl DiagnosisConfig {
    /// Loads the configured knowledge base file, or the built-in tables when
    /// no path is set.
    pub fn knowledge_base(&self) -> Result<KnowledgeBase, KnowledgeBaseError> {
        match &self.knowledge_base_path {
            Some(path) => {
                let knowledge = KnowledgeBase::from_path(path)?;
                tracing::info!(
                    path = %path.display(),
                    diseases = knowledge.diseases().len(),
                    breeds = knowledge.breeds().len(),
                    "loaded knowledge base"
                );
                Ok(knowledge)
            }
            None => Ok(KnowledgeBase::standard()),
        }
    }
}

impl Default for DiagnosisConfig {
    fn default() -> Self {
        Self {
            knowledge_base_path: None,
            extractor_seed: DEFAULT_EXTRACTOR_SEED,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidSeed,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidSeed => write!(f, "APP_EXTRACTOR_SEED must be a valid u64"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort | ConfigError::InvalidSeed => None,
            ConfigError::InvalidHost { source } => Some(source),
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
        env::remove_var("APP_ENV");
        env::remove_var("APP_HOST");
        env::remove_var("APP_PORT");
        env::remove_var("APP_LOG_LEVEL");
        env::remove_var("APP_KNOWLEDGE_BASE");
        env::remove_var("APP_EXTRACTOR_SEED");
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
        assert!(config.diagnosis.knowledge_base_path.is_none());
        assert_eq!(config.diagnosis.extractor_seed, 42);
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
    fn rejects_invalid_port_and_seed() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_PORT", "70000");
        assert!(matches!(AppConfig::load(), Err(ConfigError::InvalidPort)));

        reset_env();
        env::set_var("APP_EXTRACTOR_SEED", "-1");
        assert!(matches!(AppConfig::load(), Err(ConfigError::InvalidSeed)));
        reset_env();
    }

    #[test]
    fn reads_diagnosis_settings() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_ENV", "prod");
        env::set_var("APP_KNOWLEDGE_BASE", "/etc/poultry/diseases.json");
        env::set_var("APP_EXTRACTOR_SEED", "7");
        let config = AppConfig::load().expect("config loads");
        assert_eq!(config.environment, AppEnvironment::Production);
        assert_eq!(
            config.diagnosis.knowledge_base_path,
            Some(PathBuf::from("/etc/poultry/diseases.json"))
        );
        assert_eq!(config.diagnosis.extractor_seed, 7);
        reset_env();
    }

    #[test]
    fn knowledge_base_defaults_to_standard_tables() {
        let knowledge = DiagnosisConfig::default()
            .knowledge_base()
            .expect("standard tables");
        assert_eq!(knowledge, KnowledgeBase::standard());
    }

    #[test]
    fn knowledge_base_path_errors_propagate() {
        let config = DiagnosisConfig {
            knowledge_base_path: Some(PathBuf::from("./missing-diseases.json")),
            extractor_seed: 1,
        };
        assert!(matches!(
            config.knowledge_base(),
            Err(KnowledgeBaseError::Io(_))
        ));
    }
}
