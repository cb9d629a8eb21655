use config::{Config, ConfigError, Environment, File};
use domain::BusinessCalendar;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct HttpConfig {
    pub host: String,
    pub port: u16,
    /// Directory holding the UI bundle, served for unknown routes
    #[serde(default)]
    pub static_dir: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DatabaseConfig {
    /// Falls back to the DATABASE_URL environment variable
    #[serde(default)]
    pub url: Option<String>,
    pub max_connections: u32,
    pub run_migrations: bool,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ReportConfig {
    /// Maximum number of scan records a single fleet report reads
    pub record_cap: u64,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct CalendarConfig {
    /// Offset of the operators' local time from UTC; host offset when unset
    #[serde(default)]
    pub utc_offset_minutes: Option<i32>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub server: HttpConfig,
    pub database: DatabaseConfig,
    pub report: ReportConfig,
    #[serde(default)]
    pub calendar: CalendarConfig,
}

impl ServerConfig {
    pub fn load(config_dir: &str) -> Result<Self, ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = Config::builder()
            // Start with default settings
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            .set_default("database.max_connections", 10)?
            .set_default("database.run_migrations", true)?
            .set_default("report.record_cap", 10_000)?
            // Local config file, e.g. config/default.toml
            .add_source(File::with_name(&format!("{}/default", config_dir)).required(false))
            // Per-environment overrides, e.g. config/production.toml
            .add_source(File::with_name(&format!("{}/{}", config_dir, run_mode)).required(false))
            // Environment variables (e.g. INVENTORY__SERVER__PORT=8080)
            .add_source(Environment::with_prefix("INVENTORY").separator("__"))
            .build()?;

        s.try_deserialize()
    }

    pub fn database_url(&self) -> Result<String, ConfigError> {
        match &self.database.url {
            Some(url) if !url.is_empty() => Ok(url.clone()),
            _ => std::env::var("DATABASE_URL")
                .map_err(|_| ConfigError::NotFound("database.url or DATABASE_URL".to_string())),
        }
    }

    pub fn calendar(&self) -> Result<BusinessCalendar, ConfigError> {
        match self.calendar.utc_offset_minutes {
            Some(minutes) => {
                BusinessCalendar::new(minutes).map_err(|e| ConfigError::Message(e.to_string()))
            }
            None => Ok(BusinessCalendar::local()),
        }
    }
}
