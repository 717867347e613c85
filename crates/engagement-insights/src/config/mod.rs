use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

pub const DEFAULT_INPUT_PATH: &str = "input/employee_data.csv";
pub const DEFAULT_DEPARTMENTS_OUTPUT: &str = "outputs/task1/departments_high_satisfaction.csv";
pub const DEFAULT_VALUED_OUTPUT: &str = "outputs/task2/valued_no_suggestions.txt";

/// Share of highly satisfied and engaged employees a department must exceed
/// (in percent) to be reported.
pub const DEFAULT_DEPARTMENT_THRESHOLD: f64 = 50.0;

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
    pub analysis: AnalysisConfig,
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

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            analysis: AnalysisConfig::from_env()?,
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

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Input/output locations and the department threshold used by the batch tasks.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisConfig {
    pub input_path: PathBuf,
    pub departments_output: PathBuf,
    pub valued_output: PathBuf,
    pub department_threshold: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from(DEFAULT_INPUT_PATH),
            departments_output: PathBuf::from(DEFAULT_DEPARTMENTS_OUTPUT),
            valued_output: PathBuf::from(DEFAULT_VALUED_OUTPUT),
            department_threshold: DEFAULT_DEPARTMENT_THRESHOLD,
        }
    }
}

impl AnalysisConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let path_var = |name: &str, fallback: PathBuf| {
            env::var_os(name)
                .filter(|value| !value.is_empty())
                .map(PathBuf::from)
                .unwrap_or(fallback)
        };

        let department_threshold = match env::var("ENGAGEMENT_DEPARTMENT_THRESHOLD") {
            Ok(raw) => parse_threshold(&raw).map_err(|_| ConfigError::InvalidThreshold(raw))?,
            Err(_) => defaults.department_threshold,
        };

        Ok(Self {
            input_path: path_var("ENGAGEMENT_INPUT_PATH", defaults.input_path),
            departments_output: path_var(
                "ENGAGEMENT_DEPARTMENTS_OUTPUT",
                defaults.departments_output,
            ),
            valued_output: path_var("ENGAGEMENT_VALUED_OUTPUT", defaults.valued_output),
            department_threshold,
        })
    }
}

/// Parses a percentage threshold, accepting finite values in `[0, 100]`.
///
/// Shared by the environment loader and the CLI `--threshold` flag.
pub fn parse_threshold(raw: &str) -> Result<f64, String> {
    let value = raw
        .trim()
        .parse::<f64>()
        .map_err(|err| format!("failed to parse '{raw}' as a percentage ({err})"))?;

    if !value.is_finite() || !(0.0..=100.0).contains(&value) {
        return Err(format!("threshold '{raw}' must be between 0 and 100"));
    }

    Ok(value)
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidThreshold(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidThreshold(value) => write!(
                f,
                "ENGAGEMENT_DEPARTMENT_THRESHOLD must be a percentage between 0 and 100 (got '{}')",
                value
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort | ConfigError::InvalidThreshold(_) => None,
            ConfigError::InvalidHost { source } => Some(source),
        }
    }
}
