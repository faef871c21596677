//! STASH Requester Library
//!
//! A Rust library for translating the CMIP data request (one spreadsheet row
//! per requested variable) into UM STASH output profile requests.
//!
//! This library provides tools for:
//! - Classifying dimension strings into STASH domain profiles
//! - Deriving time and usage profiles from frequency and cell-method metadata
//! - Applying situational dependency corrections keyed by STASH code
//! - Assembling per-variable requests and routing undefined/unwanted rows
//! - Detecting exact duplicate requests via content identity keys
//! - Content-addressed re-indexing and merging of suite configuration trees

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod assembler;
        pub mod classifier;
        pub mod cmor_lookup;
        pub mod corrector;
        pub mod deduplicator;
        pub mod report_writer;
        pub mod rose_config;
        pub mod row_reader;
        pub mod stash_registry;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{DiagnosticRecord, DiagnosticRow, RequestCollections};
pub use config::RunConfig;

/// Result type alias for the STASH requester
pub type Result<T> = std::result::Result<T, Error>;

/// Comprehensive error types for data request processing operations
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

    /// JSON serialization/deserialization error
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Derived per-row attribute vectors disagree in length
    #[error("Structural error in sheet '{sheet}': {message}")]
    StructuralMismatch { sheet: String, message: String },

    /// Corrected domain name exceeds the fixed-width limit of the
    /// downstream namelist format
    #[error("Domain name '{domain}' for {stash} exceeds {limit} characters")]
    DomainWidth {
        stash: String,
        domain: String,
        limit: usize,
    },

    /// A limited-area package carried a domain with no regional counterpart
    #[error("Unrecognised domain '{domain}' for LTD package on {stash}")]
    LtdDomain { stash: String, domain: String },

    /// Content-addressed renaming produced a section identifier that is
    /// already occupied
    #[error("Section rename collision: '{old_id}' and '{other_id}' both map to '{new_id}'")]
    SectionCollision {
        old_id: String,
        other_id: String,
        new_id: String,
    },

    /// Malformed section identifier in a configuration tree
    #[error("Invalid section identifier '{section}': {message}")]
    InvalidSection { section: String, message: String },

    /// STASH registry error
    #[error("STASH registry error: {message}")]
    StashRegistry { message: String },
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

    /// Create a structural mismatch error for a sheet
    pub fn structural_mismatch(sheet: impl Into<String>, message: impl Into<String>) -> Self {
        Self::StructuralMismatch {
            sheet: sheet.into(),
            message: message.into(),
        }
    }

    /// Create a domain width error
    pub fn domain_width(stash: impl Into<String>, domain: impl Into<String>) -> Self {
        Self::DomainWidth {
            stash: stash.into(),
            domain: domain.into(),
            limit: constants::MAX_DOMAIN_NAME_LEN,
        }
    }

    /// Create a limited-area domain error
    pub fn ltd_domain(stash: impl Into<String>, domain: impl Into<String>) -> Self {
        Self::LtdDomain {
            stash: stash.into(),
            domain: domain.into(),
        }
    }

    /// Create an invalid section identifier error
    pub fn invalid_section(section: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidSection {
            section: section.into(),
            message: message.into(),
        }
    }

    /// Create a STASH registry error
    pub fn stash_registry(message: impl Into<String>) -> Self {
        Self::StashRegistry {
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

impl From<csv::Error> for Error {
    fn from(error: csv::Error) -> Self {
        Self::CsvParsing {
            file: "unknown".to_string(),
            message: "CSV parsing failed".to_string(),
            source: Some(error),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Self::Json {
            message: "JSON processing failed".to_string(),
            source: error,
        }
    }
}
