//! Hidro Processor Library
//!
//! A Rust library for turning daily rain-gauge station series into
//! completeness indices and descriptive statistics.
//!
//! This library provides tools for:
//! - Loading a station inventory and fetching each station's daily series
//! - Classifying series into ALL / VALID / ABOVE_THRESHOLD / NONZERO subsets
//! - Computing statistics blocks at overall, monthly and yearly resolution
//! - Calendar-aware completeness indices (leap years, variable month lengths)
//! - An append-only processing ledger recording every station attempt
//! - Compiling combined tables and a station time-series matrix

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod batch;
        pub mod date_range;
        pub mod ledger;
        pub mod series_classifier;
        pub mod source_gateway;
        pub mod station_inventory;
        pub mod statistics;
        pub mod table_writer;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{ObservationSeries, StationDescriptor, SubsetKind};
pub use config::ProcessingConfig;

/// Result type alias for the Hidro processor
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for batch processing operations
///
/// Only batch-level failures surface here. Per-station failures (transport
/// errors, empty or insufficient series) are absorbed by the orchestrator and
/// recorded in the ledger instead.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// CSV parsing error
    #[error("CSV parsing error in file '{file}': {message}")]
    CsvParsing {
        file: String,
        message: String,
        #[source]
        source: Option<csv::Error>,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Station inventory error
    #[error("Station inventory error: {message}")]
    Inventory { message: String },

    /// Processing ledger error
    #[error("Processing ledger error: {message}")]
    Ledger { message: String },

    /// Table emission error
    #[error("Table writing error: {message}")]
    TableWriting {
        message: String,
        #[source]
        source: polars::error::PolarsError,
    },

    /// Data validation error
    #[error("Data validation error: {message}")]
    DataValidation { message: String },

    /// Date/time parsing error
    #[error("Date/time parsing error: {message}")]
    DateTimeParsing {
        message: String,
        #[source]
        source: chrono::ParseError,
    },
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a CSV parsing error with context
    pub fn csv_parsing(
        file: impl Into<String>,
        message: impl Into<String>,
        source: Option<csv::Error>,
    ) -> Self {
        Self::CsvParsing {
            file: file.into(),
            message: message.into(),
            source,
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a station inventory error
    pub fn inventory(message: impl Into<String>) -> Self {
        Self::Inventory {
            message: message.into(),
        }
    }

    /// Create a processing ledger error
    pub fn ledger(message: impl Into<String>) -> Self {
        Self::Ledger {
            message: message.into(),
        }
    }

    /// Create a table writing error
    pub fn table_writing(message: impl Into<String>, source: polars::error::PolarsError) -> Self {
        Self::TableWriting {
            message: message.into(),
            source,
        }
    }

    /// Create a data validation error
    pub fn data_validation(message: impl Into<String>) -> Self {
        Self::DataValidation {
            message: message.into(),
        }
    }

    /// Create a date/time parsing error
    pub fn datetime_parsing(message: impl Into<String>, source: chrono::ParseError) -> Self {
        Self::DateTimeParsing {
            message: message.into(),
            source,
        }
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<csv::Error> for Error {
    fn from(error: csv::Error) -> Self {
        Self::CsvParsing {
            file: "unknown".to_string(),
            message: "CSV parsing failed".to_string(),
            source: Some(error),
        }
    }
}

impl From<chrono::ParseError> for Error {
    fn from(error: chrono::ParseError) -> Self {
        Self::DateTimeParsing {
            message: "Date/time parsing failed".to_string(),
            source: error,
        }
    }
}

impl From<polars::error::PolarsError> for Error {
    fn from(error: polars::error::PolarsError) -> Self {
        Self::TableWriting {
            message: "Polars operation failed".to_string(),
            source: error,
        }
    }
}
