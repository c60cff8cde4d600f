//! Application configuration structs
//!
//! Loads configuration from environment variables (and a `.env` file).

use chrono::{FixedOffset, NaiveTime};
use mentor_core::availability::AvailabilityRules;
use mentor_core::time::offset_from_minutes;
use mentor_core::value_objects::parse_time;
use mentor_core::CompletionPolicy;
use serde::Deserialize;
use std::env;
use std::str::FromStr;

/// Main application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub app: AppSettings,
    pub api: ServerConfig,
    pub storage: StorageConfig,
    pub database: Option<DatabaseConfig>,
    pub scheduling: SchedulingConfig,
    pub rate_limit: RateLimitConfig,
    pub cors: CorsConfig,
}

/// General application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default = "default_env")]
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Which storage adapter backs the repositories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Memory,
    Postgres,
}

/// Storage selection
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,
    /// Populate the directory with demo mentors and students on startup
    pub seed_demo_data: bool,
}

/// Database configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    #[serde(default = "default_run_migrations")]
    pub run_migrations: bool,
}

/// Scheduling rules
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchedulingConfig {
    pub horizon_days: u32,
    pub slot_minutes: u32,
    pub candidate_times: Vec<NaiveTime>,
    pub min_slots_per_day: usize,
    pub max_slots_per_day: usize,
    /// Scheduling timezone, minutes east of UTC
    pub utc_offset_minutes: i32,
    pub completion_policy: CompletionPolicy,
}

impl Default for SchedulingConfig {
    fn default() -> Self {
        let rules = AvailabilityRules::default();
        Self {
            horizon_days: rules.horizon_days,
            slot_minutes: rules.slot_minutes,
            candidate_times: rules.candidate_times,
            min_slots_per_day: rules.min_slots_per_day,
            max_slots_per_day: rules.max_slots_per_day,
            utc_offset_minutes: 0,
            completion_policy: CompletionPolicy::default(),
        }
    }
}

impl SchedulingConfig {
    /// Reject settings no policy could satisfy
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.candidate_times.is_empty() {
            return Err(ConfigError::InvalidValue(
                "SCHEDULING_CANDIDATE_TIMES",
                "at least one time is required".to_string(),
            ));
        }
        if self.horizon_days == 0 {
            return Err(ConfigError::InvalidValue(
                "SCHEDULING_HORIZON_DAYS",
                "must be positive".to_string(),
            ));
        }
        if self.slot_minutes == 0 {
            return Err(ConfigError::InvalidValue(
                "SCHEDULING_SLOT_MINUTES",
                "must be positive".to_string(),
            ));
        }
        if self.min_slots_per_day > self.max_slots_per_day {
            return Err(ConfigError::InvalidValue(
                "SCHEDULING_MIN_SLOTS_PER_DAY",
                format!(
                    "{} exceeds SCHEDULING_MAX_SLOTS_PER_DAY ({})",
                    self.min_slots_per_day, self.max_slots_per_day
                ),
            ));
        }
        if self.utc_offset_minutes.abs() >= 24 * 60 {
            return Err(ConfigError::InvalidValue(
                "SCHEDULING_UTC_OFFSET_MINUTES",
                self.utc_offset_minutes.to_string(),
            ));
        }
        Ok(())
    }

    /// Rules handed to the availability policy
    #[must_use]
    pub fn rules(&self) -> AvailabilityRules {
        AvailabilityRules {
            horizon_days: self.horizon_days,
            candidate_times: self.candidate_times.clone(),
            min_slots_per_day: self.min_slots_per_day,
            max_slots_per_day: self.max_slots_per_day,
            slot_minutes: self.slot_minutes,
        }
    }

    /// The scheduling timezone
    #[must_use]
    pub fn offset(&self) -> FixedOffset {
        offset_from_minutes(self.utc_offset_minutes)
    }
}

/// Rate limiting configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitConfig {
    #[serde(default = "default_requests_per_second")]
    pub requests_per_second: u32,
    #[serde(default = "default_burst")]
    pub burst: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            requests_per_second: default_requests_per_second(),
            burst: default_burst(),
        }
    }
}

/// CORS configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CorsConfig {
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

// Default value functions
fn default_app_name() -> String {
    "mentor-scheduler".to_string()
}

fn default_env() -> Environment {
    Environment::Development
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_max_connections() -> u32 {
    20
}

fn default_min_connections() -> u32 {
    5
}

fn default_run_migrations() -> bool {
    true
}

fn default_requests_per_second() -> u32 {
    10
}

fn default_burst() -> u32 {
    50
}

/// Parse an optional variable, failing loudly on a malformed value
fn parse_var<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
) -> Result<Option<T>, ConfigError> {
    match lookup(key) {
        None => Ok(None),
        Some(raw) if raw.trim().is_empty() => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue(key, raw)),
    }
}

fn parse_bool(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
) -> Result<Option<bool>, ConfigError> {
    match lookup(key) {
        None => Ok(None),
        Some(raw) => match raw.trim().to_ascii_lowercase().as_str() {
            "" => Ok(None),
            "1" | "true" | "yes" | "on" => Ok(Some(true)),
            "0" | "false" | "no" | "off" => Ok(Some(false)),
            _ => Err(ConfigError::InvalidValue(key, raw)),
        },
    }
}

fn parse_list(lookup: &impl Fn(&str) -> Option<String>, key: &'static str) -> Option<Vec<String>> {
    lookup(key).map(|s| {
        s.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect()
    })
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if a required variable is missing or a value is malformed
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let env = match lookup("APP_ENV") {
            None => Environment::default(),
            Some(s) => match s.to_lowercase().as_str() {
                "production" => Environment::Production,
                "staging" => Environment::Staging,
                "development" => Environment::Development,
                _ => return Err(ConfigError::InvalidValue("APP_ENV", s)),
            },
        };

        let backend = match lookup("STORAGE_BACKEND") {
            None => StorageBackend::default(),
            Some(s) => match s.to_lowercase().as_str() {
                "memory" => StorageBackend::Memory,
                "postgres" | "postgresql" => StorageBackend::Postgres,
                _ => return Err(ConfigError::InvalidValue("STORAGE_BACKEND", s)),
            },
        };

        let database = match lookup("DATABASE_URL") {
            Some(url) => Some(DatabaseConfig {
                url,
                max_connections: parse_var(&lookup, "DATABASE_MAX_CONNECTIONS")?
                    .unwrap_or_else(default_max_connections),
                min_connections: parse_var(&lookup, "DATABASE_MIN_CONNECTIONS")?
                    .unwrap_or_else(default_min_connections),
                run_migrations: parse_bool(&lookup, "DATABASE_RUN_MIGRATIONS")?
                    .unwrap_or_else(default_run_migrations),
            }),
            None if backend == StorageBackend::Postgres => {
                return Err(ConfigError::MissingVar("DATABASE_URL"));
            }
            None => None,
        };

        let defaults = SchedulingConfig::default();
        let candidate_times = match parse_list(&lookup, "SCHEDULING_CANDIDATE_TIMES") {
            Some(raw) => {
                let mut times = raw
                    .iter()
                    .map(|t| {
                        parse_time(t).map_err(|_| {
                            ConfigError::InvalidValue("SCHEDULING_CANDIDATE_TIMES", t.clone())
                        })
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                times.sort_unstable();
                times.dedup();
                times
            }
            None => defaults.candidate_times.clone(),
        };
        let completion_policy = match lookup("SCHEDULING_COMPLETION_POLICY") {
            Some(s) => s
                .parse::<CompletionPolicy>()
                .map_err(|_| ConfigError::InvalidValue("SCHEDULING_COMPLETION_POLICY", s))?,
            None => defaults.completion_policy,
        };
        let scheduling = SchedulingConfig {
            horizon_days: parse_var(&lookup, "SCHEDULING_HORIZON_DAYS")?
                .unwrap_or(defaults.horizon_days),
            slot_minutes: parse_var(&lookup, "SCHEDULING_SLOT_MINUTES")?
                .unwrap_or(defaults.slot_minutes),
            candidate_times,
            min_slots_per_day: parse_var(&lookup, "SCHEDULING_MIN_SLOTS_PER_DAY")?
                .unwrap_or(defaults.min_slots_per_day),
            max_slots_per_day: parse_var(&lookup, "SCHEDULING_MAX_SLOTS_PER_DAY")?
                .unwrap_or(defaults.max_slots_per_day),
            utc_offset_minutes: parse_var(&lookup, "SCHEDULING_UTC_OFFSET_MINUTES")?
                .unwrap_or(defaults.utc_offset_minutes),
            completion_policy,
        };
        scheduling.validate()?;

        Ok(Self {
            app: AppSettings {
                name: lookup("APP_NAME").unwrap_or_else(default_app_name),
                env,
            },
            api: ServerConfig {
                host: lookup("API_HOST").unwrap_or_else(default_host),
                port: parse_var(&lookup, "API_PORT")?.unwrap_or_else(default_port),
            },
            storage: StorageConfig {
                backend,
                seed_demo_data: parse_bool(&lookup, "SEED_DEMO_DATA")?
                    .unwrap_or(backend == StorageBackend::Memory),
            },
            database,
            scheduling,
            rate_limit: RateLimitConfig {
                requests_per_second: parse_var(&lookup, "RATE_LIMIT_REQUESTS_PER_SECOND")?
                    .unwrap_or_else(default_requests_per_second),
                burst: parse_var(&lookup, "RATE_LIMIT_BURST")?.unwrap_or_else(default_burst),
            },
            cors: CorsConfig {
                allowed_origins: parse_list(&lookup, "CORS_ALLOWED_ORIGINS").unwrap_or_default(),
            },
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
