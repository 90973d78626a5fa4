use crate::analytics::domain::ValidationError;
use crate::analytics::scoring::ScoringProfile;
use chrono::Datelike;
use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};

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
    pub analytics: AnalyticsConfig,
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
        let ansi = match env::var("APP_LOG_ANSI") {
            Ok(raw) => parse_flag(&raw).ok_or(ConfigError::InvalidAnsiFlag)?,
            Err(_) => false,
        };

        let portfolio_csv = env::var("APP_PORTFOLIO_CSV")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);

        let scoring_profile = match env::var("APP_SCORING_PROFILE") {
            Ok(path) if !path.trim().is_empty() => load_scoring_profile(Path::new(path.trim()))?,
            _ => ScoringProfile::default(),
        };

        let reference_year = match env::var("APP_REFERENCE_YEAR") {
            Ok(raw) => raw
                .trim()
                .parse::<i32>()
                .map_err(|_| ConfigError::InvalidReferenceYear)?,
            Err(_) => chrono::Local::now().year(),
        };

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level, ansi },
            analytics: AnalyticsConfig {
                portfolio_csv,
                scoring_profile,
                reference_year,
            },
        })
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Reads a JSON scoring profile. Missing sections keep their defaults.
pub fn load_scoring_profile(path: &Path) -> Result<ScoringProfile, ConfigError> {
    let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::ScoringProfileIo {
        path: path.to_path_buf(),
        source,
    })?;
    let profile: ScoringProfile =
        serde_json::from_str(&raw).map_err(|source| ConfigError::ScoringProfileFormat {
            path: path.to_path_buf(),
            source,
        })?;
    profile.validate().map_err(ConfigError::InvalidScoringProfile)?;
    Ok(profile)
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

/// Tracing output controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
    pub ansi: bool,
}

/// Inputs for the scoring engine and the portfolio it starts with.
#[derive(Debug, Clone)]
pub struct AnalyticsConfig {
    /// CSV used to seed the store; the sample portfolio when absent.
    pub portfolio_csv: Option<PathBuf>,
    pub scoring_profile: ScoringProfile,
    /// Year the property-age heuristic measures against.
    pub reference_year: i32,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost {
        source: std::net::AddrParseError,
    },
    InvalidAnsiFlag,
    InvalidReferenceYear,
    ScoringProfileIo {
        path: PathBuf,
        source: std::io::Error,
    },
    ScoringProfileFormat {
        path: PathBuf,
        source: serde_json::Error,
    },
    InvalidScoringProfile(ValidationError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidAnsiFlag => write!(f, "APP_LOG_ANSI must be true or false"),
            ConfigError::InvalidReferenceYear => {
                write!(f, "APP_REFERENCE_YEAR must be a calendar year")
            }
            ConfigError::ScoringProfileIo { path, .. } => {
                write!(f, "unable to read scoring profile {}", path.display())
            }
            ConfigError::ScoringProfileFormat { path, source } => {
                write!(f, "scoring profile {} is not valid JSON: {}", path.display(), source)
            }
            ConfigError::InvalidScoringProfile(err) => {
                write!(f, "scoring profile rejected: {}", err)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort
            | ConfigError::InvalidAnsiFlag
            | ConfigError::InvalidReferenceYear => None,
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::ScoringProfileIo { source, .. } => Some(source),
            ConfigError::ScoringProfileFormat { source, .. } => Some(source),
            ConfigError::InvalidScoringProfile(err) => Some(err),
        }
    }
}
