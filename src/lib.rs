//! Unload Processor Library
//!
//! A Rust library for converting z/OS administrative "unload" datasets into
//! queryable Polars DataFrames.
//!
//! Two unload families are supported:
//! - IRRDBU00 security-database unloads (record types `0100`, `0200`, ...),
//!   length-prefixed variable records with fixed-column ASCII payloads
//! - DCOLLECT storage-management collection files (record types `D`, `V`,
//!   `DC`, ...), block-buffered binary records with EBCDIC text, big-endian
//!   integers, bit flags, and packed julian dates
//!
//! This library provides tools for:
//! - Streaming large unload files record by record without whole-file loads
//! - Classifying records by type code and selecting a versioned field layout
//! - Decoding mainframe field encodings into typed column values
//! - Accumulating one DataFrame per record type, in file order
//! - Running the whole pass in the background with a pollable status object
//! - Deriving security and storage views on top of completed tables

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod field_decoder;
        pub mod frame_builder;
        pub mod parse_session;
        pub mod schema_registry;
        pub mod unload_reader;
    }
    pub mod views;
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{Diagnostic, DiagnosticKind, RecordFamily, Value};
pub use app::services::parse_session::{ParseSession, ParseState, ParseStatus, UnloadSet};
pub use config::ParseOptions;

/// Result type alias for the unload processor
pub type Result<T> = std::result::Result<T, Error>;

/// Comprehensive error types for unload processing operations
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Record framing violated the family's physical contract.
    ///
    /// Fatal to the session: offsets after a framing failure cannot be
    /// trusted, so there is no guess-and-continue.
    #[error("framing error at byte offset {offset}: {message}")]
    Framing { offset: u64, message: String },

    /// Configuration error raised before a session reaches Running
    #[error("configuration error: {message}")]
    Configuration { message: String },

    /// The parse pass was cancelled before completion
    #[error(
        "parse cancelled after {records_processed} records ({bytes_processed} bytes); \
         partial tables are not exposed"
    )]
    Cancelled {
        records_processed: u64,
        bytes_processed: u64,
    },

    /// A requested table is not present in the completed set
    #[error("no table named '{name}' in this unload set")]
    MissingTable { name: String },

    /// DataFrame construction or query failed
    #[error("table error: {message}")]
    Table {
        message: String,
        #[source]
        source: polars::error::PolarsError,
    },

    /// Parquet export error
    #[error("export error for '{path}': {message}")]
    Export { path: String, message: String },

    /// Generic-pattern translation produced an invalid expression
    #[error("invalid profile pattern '{pattern}': {message}")]
    Pattern { pattern: String, message: String },

    /// The background task died without reporting a result
    #[error("background parse task failed: {message}")]
    Background { message: String },
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a framing error at a file byte offset
    pub fn framing(offset: u64, message: impl Into<String>) -> Self {
        Self::Framing {
            offset,
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a cancellation error carrying how far the pass got
    pub fn cancelled(records_processed: u64, bytes_processed: u64) -> Self {
        Self::Cancelled {
            records_processed,
            bytes_processed,
        }
    }

    /// Create a missing-table error
    pub fn missing_table(name: impl Into<String>) -> Self {
        Self::MissingTable { name: name.into() }
    }

    /// Create a table error with context
    pub fn table(message: impl Into<String>, source: polars::error::PolarsError) -> Self {
        Self::Table {
            message: message.into(),
            source,
        }
    }

    /// Create a parquet export error
    pub fn export(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Export {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a pattern translation error
    pub fn pattern(pattern: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Pattern {
            pattern: pattern.into(),
            message: message.into(),
        }
    }

    /// Create a background task error
    pub fn background(message: impl Into<String>) -> Self {
        Self::Background {
            message: message.into(),
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

impl From<polars::error::PolarsError> for Error {
    fn from(error: polars::error::PolarsError) -> Self {
        Self::Table {
            message: "DataFrame operation failed".to_string(),
            source: error,
        }
    }
}
