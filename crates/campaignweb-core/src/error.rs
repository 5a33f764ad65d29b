//! Error types for campaignweb-core
//!
//! Missing folders and files end the current request; they are reported
//! with a code and a severity so the HTTP layer can map them to a status.

use campaignweb_parser::ParseError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error codes for programmatic error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Candidate folder unknown
    FolderNotFound,
    /// A source file or photo is missing
    FileNotFound,
    /// A source file exists but could not be decoded
    InvalidSource,
    /// IO error
    IoError,
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCode::FolderNotFound => write!(f, "FOLDER_NOT_FOUND"),
            ErrorCode::FileNotFound => write!(f, "FILE_NOT_FOUND"),
            ErrorCode::InvalidSource => write!(f, "INVALID_SOURCE"),
            ErrorCode::IoError => write!(f, "IO_ERROR"),
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorSeverity {
    /// Informational
    Info,
    /// Error - the request failed
    Error,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "info"),
            ErrorSeverity::Error => write!(f, "error"),
        }
    }
}

/// Detailed error information for API responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetails {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// Suggestions for resolution
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
    /// File involved (if applicable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

impl ErrorDetails {
    /// Create a new error detail
    pub fn new(code: ErrorCode, message: String) -> Self {
        Self {
            code,
            message,
            suggestions: vec![],
            file: None,
        }
    }

    /// Add a suggestion
    pub fn with_suggestion(mut self, suggestion: String) -> Self {
        self.suggestions.push(suggestion);
        self
    }

    /// Add the file involved
    pub fn with_file(mut self, file: String) -> Self {
        self.file = Some(file);
        self
    }
}

impl std::fmt::Display for ErrorDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(ref file) = self.file {
            write!(f, "\nFile: {}", file)?;
        }
        if !self.suggestions.is_empty() {
            write!(f, "\nSuggestions:")?;
            for suggestion in &self.suggestions {
                write!(f, "\n  - {}", suggestion)?;
            }
        }
        Ok(())
    }
}

/// Main error type for campaignweb-core
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Folder not found: {folder}")]
    FolderNotFound { folder: String },

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("Invalid source file: {source}")]
    InvalidSource {
        #[source]
        source: ParseError,
    },

    #[error("IO error reading {path}: {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl CoreError {
    /// Get the error code
    pub fn code(&self) -> ErrorCode {
        match self {
            CoreError::FolderNotFound { .. } => ErrorCode::FolderNotFound,
            CoreError::FileNotFound { .. } => ErrorCode::FileNotFound,
            CoreError::InvalidSource { .. } => ErrorCode::InvalidSource,
            CoreError::IoError { .. } => ErrorCode::IoError,
        }
    }

    /// Get the severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            CoreError::FolderNotFound { .. } => ErrorSeverity::Info,
            _ => ErrorSeverity::Error,
        }
    }

    /// Convert to detailed error info
    pub fn to_details(&self) -> ErrorDetails {
        let details = ErrorDetails::new(self.code(), self.to_string());

        match self {
            CoreError::FolderNotFound { .. } => details
                .with_suggestion("Pick a candidate from the dashboard dropdown.".to_string()),
            CoreError::FileNotFound { path } => details
                .with_file(path.clone())
                .with_suggestion("Each candidate folder needs receitas.xlsx, despesas.csv and foto.jpg.".to_string()),
            CoreError::InvalidSource { source } => details
                .with_file(source.path().to_string())
                .with_suggestion("Check the sheet name and the counterparty/Valor column headers.".to_string()),
            CoreError::IoError { path, .. } => details.with_file(path.clone()),
        }
    }

    pub(crate) fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            CoreError::FileNotFound { path: path.display().to_string() }
        } else {
            CoreError::IoError { path: path.display().to_string(), source }
        }
    }
}

impl From<ParseError> for CoreError {
    fn from(error: ParseError) -> Self {
        if error.is_not_found() {
            CoreError::FileNotFound { path: error.path().to_string() }
        } else {
            CoreError::InvalidSource { source: error }
        }
    }
}

/// Result type with CoreError
pub type CoreResult<T> = Result<T, CoreError>;

// ==================== Tests ====================
