//! Configuration management for campaignweb
//!
//! This module handles loading, validation, and management of
//! campaignweb configuration from YAML files. Every field has a default,
//! so an empty file (or no file at all) gives a working setup.

pub mod error;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub use error::{ConfigError, ConfigErrorCode, ConfigErrorSeverity, ConfigResult};

// ==================== Configuration Types ====================

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,
    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8050
}

/// Candidate data layout
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// Base directory with one subfolder per candidate
    #[serde(default = "default_data_path")]
    pub path: PathBuf,
    /// Revenue workbook inside each candidate folder
    #[serde(default = "default_revenue_file")]
    pub revenue_file: String,
    /// Worksheet holding the revenue rows
    #[serde(default = "default_revenue_sheet")]
    pub revenue_sheet: String,
    /// Expense CSV inside each candidate folder
    #[serde(default = "default_expense_file")]
    pub expense_file: String,
    /// Field delimiter of the expense CSV
    #[serde(default = "default_expense_delimiter")]
    pub expense_delimiter: String,
    /// Candidate photo inside each folder
    #[serde(default = "default_photo_file")]
    pub photo_file: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            path: default_data_path(),
            revenue_file: default_revenue_file(),
            revenue_sheet: default_revenue_sheet(),
            expense_file: default_expense_file(),
            expense_delimiter: default_expense_delimiter(),
            photo_file: default_photo_file(),
        }
    }
}

impl DataConfig {
    /// Delimiter as the single byte the CSV reader expects
    pub fn delimiter_byte(&self) -> u8 {
        self.expense_delimiter.as_bytes().first().copied().unwrap_or(b';')
    }
}

fn default_data_path() -> PathBuf {
    PathBuf::from("dados")
}

fn default_revenue_file() -> String {
    "receitas.xlsx".to_string()
}

fn default_revenue_sheet() -> String {
    "Receitas".to_string()
}

fn default_expense_file() -> String {
    "despesas.csv".to_string()
}

fn default_expense_delimiter() -> String {
    ";".to_string()
}

fn default_photo_file() -> String {
    "foto.jpg".to_string()
}

/// Chart and visualization settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartConfig {
    /// Number of top items to show before linking to the full table
    #[serde(default = "default_top_items")]
    pub top_items_count: usize,
    /// Color of the revenue bar in the totals chart
    #[serde(default = "default_revenue_color")]
    pub revenue_color: String,
    /// Color of expense bars, in the expense chart and the totals chart
    #[serde(default = "default_expense_color")]
    pub expense_color: String,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            top_items_count: default_top_items(),
            revenue_color: default_revenue_color(),
            expense_color: default_expense_color(),
        }
    }
}

fn default_top_items() -> usize {
    15
}

fn default_revenue_color() -> String {
    "dodgerblue".to_string()
}

fn default_expense_color() -> String {
    "lightcoral".to_string()
}

/// Dashboard page settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Page heading
    #[serde(default = "default_title")]
    pub title: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self { title: default_title() }
    }
}

fn default_title() -> String {
    "Relatório de Receitas e Despesas dos candidatos a prefeitura de São Paulo 2024".to_string()
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: error, warn, info, debug, trace
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: default_log_level() }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

const LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Server settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Data directory settings
    #[serde(default)]
    pub data: DataConfig,
    /// Chart settings
    #[serde(default)]
    pub charts: ChartConfig,
    /// Dashboard settings
    #[serde(default)]
    pub dashboard: DashboardConfig,
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a YAML file
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                ConfigError::FileNotFound { path: path.display().to_string() }
            } else {
                ConfigError::IoError { path: path.display().to_string(), source }
            }
        })?;

        Self::from_yaml(&content)
    }

    /// Load configuration, falling back to defaults when the file is absent
    pub fn load_or_default(path: impl AsRef<Path>) -> ConfigResult<Self> {
        match Self::load(path) {
            Err(ConfigError::FileNotFound { .. }) => Ok(Self::default()),
            other => other,
        }
    }

    /// Parse and validate configuration from YAML text
    pub fn from_yaml(content: &str) -> ConfigResult<Self> {
        // An empty document deserializes to unit, not to a mapping
        let config: Config = if content.trim().is_empty() {
            Config::default()
        } else {
            serde_yaml::from_str(content)
                .map_err(|e| ConfigError::InvalidYaml { message: e.to_string() })?
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> ConfigResult<()> {
        if self.server.port == 0 {
            return Err(ConfigError::InvalidValue {
                field: "server.port".to_string(),
                reason: "Port must be greater than 0".to_string(),
            });
        }

        if self.charts.top_items_count == 0 {
            return Err(ConfigError::InvalidValue {
                field: "charts.top_items_count".to_string(),
                reason: "At least one item must be shown per chart".to_string(),
            });
        }

        let delimiter = &self.data.expense_delimiter;
        if delimiter.len() != 1 || !delimiter.is_ascii() {
            return Err(ConfigError::InvalidValue {
                field: "data.expense_delimiter".to_string(),
                reason: "Delimiter must be a single ASCII character".to_string(),
            });
        }

        if !LOG_LEVELS.contains(&self.logging.level.to_lowercase().as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "logging.level".to_string(),
                reason: format!("Log level must be one of: {}", LOG_LEVELS.join(", ")),
            });
        }

        Ok(())
    }

    /// Generate a default configuration file
    pub fn generate_default() -> &'static str {
        include_str!("../templates/default_config.yaml")
    }

    /// Full path of a candidate's revenue workbook
    pub fn revenue_path(&self, folder: &Path) -> PathBuf {
        folder.join(&self.data.revenue_file)
    }

    /// Full path of a candidate's expense CSV
    pub fn expense_path(&self, folder: &Path) -> PathBuf {
        folder.join(&self.data.expense_file)
    }

    /// Full path of a candidate's photo
    pub fn photo_path(&self, folder: &Path) -> PathBuf {
        folder.join(&self.data.photo_file)
    }
}

// ==================== Tests ====================
