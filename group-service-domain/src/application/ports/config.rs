use crate::domain::errors::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

/// Directory provider (Keycloak) configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Base URL, e.g. `https://id.example.com`. `None` leaves the service
    /// running without a provider; group requests then report the dependency
    /// as unavailable.
    pub url: Option<String>,
    pub verify_ssl: bool,
}

impl ProviderConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(url) = &self.url {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(ConfigError::InvalidValue {
                    key: "KEYCLOAK_URL".to_string(),
                    message: "Must start with http:// or https://".to_string(),
                });
            }
        }
        Ok(())
    }
}

/// HTTP client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    pub timeout_seconds: u64,
    pub connect_timeout_seconds: u64,
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: 30,
            connect_timeout_seconds: 10,
            user_agent: "group-service/0.1.0".to_string(),
        }
    }
}

impl HttpConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timeout_seconds == 0 {
            return Err(ConfigError::InvalidValue {
                key: "HTTP_TIMEOUT_SECONDS".to_string(),
                message: "Must be greater than 0".to_string(),
            });
        }

        if self.connect_timeout_seconds == 0 {
            return Err(ConfigError::InvalidValue {
                key: "HTTP_CONNECT_TIMEOUT_SECONDS".to_string(),
                message: "Must be greater than 0".to_string(),
            });
        }

        Ok(())
    }

    pub fn get_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    pub fn get_connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_seconds)
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: LogLevel,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            format: LogFormat::Compact,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Trace => write!(f, "trace"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Error => write!(f, "error"),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

/// Capability grants for the configuration-backed authorizer
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthorizationConfig {
    /// username -> capability names; `*` grants everything
    pub grants: HashMap<String, Vec<String>>,
}

/// Member count aggregation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregationConfig {
    /// Membership lookups in flight at once while listing groups
    pub member_count_concurrency: usize,
}

impl Default for AggregationConfig {
    fn default() -> Self {
        Self {
            member_count_concurrency: 4,
        }
    }
}

impl AggregationConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.member_count_concurrency == 0 {
            return Err(ConfigError::InvalidValue {
                key: "MEMBER_COUNT_CONCURRENCY".to_string(),
                message: "Must be greater than 0".to_string(),
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Test,
    Staging,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Staging => write!(f, "staging"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Complete application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: Environment,
    pub provider: ProviderConfig,
    pub http: HttpConfig,
    pub logging: LoggingConfig,
    pub authorization: AuthorizationConfig,
    pub aggregation: AggregationConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            environment: Environment::Development,
            provider: ProviderConfig {
                url: None,
                verify_ssl: true,
            },
            http: HttpConfig::default(),
            logging: LoggingConfig::default(),
            authorization: AuthorizationConfig::default(),
            aggregation: AggregationConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.provider.validate()?;
        self.http.validate()?;
        self.aggregation.validate()?;

        if self.is_production() && self.provider.url.is_none() {
            return Err(ConfigError::MissingRequired {
                key: "KEYCLOAK_URL".to_string(),
            });
        }

        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from any key/value source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = lookup("ENVIRONMENT")
            .unwrap_or_else(|| "development".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidValue {
                key: "ENVIRONMENT".to_string(),
                message: "Must be one of: development, test, staging, production".to_string(),
            })?;

        let provider = ProviderConfig {
            url: lookup("KEYCLOAK_URL").filter(|url| !url.trim().is_empty()),
            verify_ssl: parse_or(&lookup, "KEYCLOAK_VERIFY_SSL", true)?,
        };

        let defaults = HttpConfig::default();
        let http = HttpConfig {
            timeout_seconds: parse_or(&lookup, "HTTP_TIMEOUT_SECONDS", defaults.timeout_seconds)?,
            connect_timeout_seconds: parse_or(
                &lookup,
                "HTTP_CONNECT_TIMEOUT_SECONDS",
                defaults.connect_timeout_seconds,
            )?,
            user_agent: lookup("HTTP_USER_AGENT").unwrap_or(defaults.user_agent),
        };

        let logging = LoggingConfig {
            level: parse_or(&lookup, "LOG_LEVEL", LogLevel::Info)?,
            format: parse_or(&lookup, "LOG_FORMAT", LogFormat::Compact)?,
        };

        let authorization = AuthorizationConfig {
            grants: load_grants(&lookup)?,
        };

        let aggregation = AggregationConfig {
            member_count_concurrency: parse_or(
                &lookup,
                "MEMBER_COUNT_CONCURRENCY",
                AggregationConfig::default().member_count_concurrency,
            )?,
        };

        let config = AppConfig {
            environment,
            provider,
            http,
            logging,
            authorization,
            aggregation,
        };

        config.validate()?;
        Ok(config)
    }
}

/// Unset keys take `default`; a set value that does not parse is an error.
fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: format!("Cannot parse '{raw}': {e}"),
        }),
    }
}

/// Grants come inline from `CAPABILITY_GRANTS` or from the JSON file named by
/// `CAPABILITY_GRANTS_FILE`; inline wins when both are set.
fn load_grants<F>(lookup: &F) -> Result<HashMap<String, Vec<String>>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let raw = match (lookup("CAPABILITY_GRANTS"), lookup("CAPABILITY_GRANTS_FILE")) {
        (Some(inline), _) => inline,
        (None, Some(path)) => {
            std::fs::read_to_string(&path).map_err(|e| ConfigError::FileError {
                message: format!("Failed to read {path}: {e}"),
            })?
        }
        (None, None) => return Ok(HashMap::new()),
    };

    serde_json::from_str(&raw).map_err(|e| ConfigError::InvalidValue {
        key: "CAPABILITY_GRANTS".to_string(),
        message: format!("Expected a JSON object of username to capability list: {e}"),
    })
}

impl std::str::FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "test" => Ok(Environment::Test),
            "staging" | "stage" => Ok(Environment::Staging),
            "production" | "prod" => Ok(Environment::Production),
            _ => Err(format!("Invalid environment: {s}")),
        }
    }
}

impl std::str::FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(format!("Invalid log level: {s}")),
        }
    }
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "compact" => Ok(LogFormat::Compact),
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            _ => Err(format!("Invalid log format: {s}")),
        }
    }
}
