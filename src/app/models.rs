//! Core data structures for data request translation.
//!
//! Defines the raw input row, the classifier profile outputs, the assembled
//! STASH request record, and the routed output collections.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::constants::{self, NONE_SENTINEL};

/// One raw data-request row, as read from a sheet.
///
/// All fields are strings; absence is carried as the literal `"None"`,
/// never as an empty or missing field. Rows are immutable once read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosticRow {
    /// Dash-joined dimension tokens, e.g. `longitude-latitude-plev19-time`
    pub dimensions: String,
    /// Cell-method descriptor, e.g. `time: mean`
    pub cell_method: String,
    /// Requested output frequency label, e.g. `mon`
    pub frequency: String,
    /// CMIP priority indicator
    pub cmip_priority: String,
    /// Met Office priority indicator
    pub mo_priority: String,
    /// Candidate STASH code string, comma-separable
    pub stash_codes: String,
    /// CMOR variable name
    pub cmor_name: String,
    /// Long variable name from the request
    pub variable_name: String,
    /// Requested units
    pub units: String,
    /// Modelling realm (atmos, ocean, seaIce, ...)
    pub realm: String,
    /// Unique row identity from the request
    pub unique_key: String,
}

/// A named sheet of data-request rows.
///
/// The sheet name doubles as the time-period label (`emmon`, `primday`,
/// `aero`, ...) that steers the usage-profile lookup.
#[derive(Debug, Clone)]
pub struct Sheet {
    pub name: String,
    pub rows: Vec<DiagnosticRow>,
}

impl Sheet {
    pub fn new(name: impl Into<String>, rows: Vec<DiagnosticRow>) -> Self {
        Self {
            name: name.into(),
            rows,
        }
    }

    /// Derive the period key used for usage-profile lookup from the sheet
    /// name: `em`/`prim` prefixes are stripped, easy-aerosol sheets are
    /// pinned to monthly.
    pub fn period(&self) -> String {
        if let Some(stripped) = self.name.strip_prefix("em") {
            stripped.to_string()
        } else if self.name.contains("prim") {
            self.name.chars().skip(4).collect()
        } else if self.name.contains("aero") {
            "aeromon".to_string()
        } else {
            self.name.clone()
        }
    }

    /// Whether this sheet carries no STASH-mappable variables
    pub fn is_skipped(&self) -> bool {
        constants::SHEETS_TO_SKIP.contains(&self.name.as_str())
    }
}

/// Spatial domain classification of a request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainProfile {
    pub name: String,
    pub lbproc: i32,
}

impl DomainProfile {
    pub fn new(name: impl Into<String>, lbproc: i32) -> Self {
        Self {
            name: name.into(),
            lbproc,
        }
    }

    /// The fallback profile for unclassifiable dimension strings
    pub fn unknown() -> Self {
        Self::new(constants::UNKNOWN_PROFILE, 0)
    }
}

/// Temporal processing and output destination classification of a request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeUsageProfile {
    pub time_name: String,
    pub usage_name: String,
    pub lbproc: i32,
}

impl TimeUsageProfile {
    pub fn new(time_name: impl Into<String>, usage_name: impl Into<String>, lbproc: i32) -> Self {
        Self {
            time_name: time_name.into(),
            usage_name: usage_name.into(),
            lbproc,
        }
    }
}

/// One assembled STASH output request.
///
/// Field names are fixed by the downstream consumer; `section` is 2-digit
/// and `item` 3-digit zero-padded. The invariant
/// `dom_name.len() <= MAX_DOMAIN_NAME_LEN` holds for every record that
/// survives dependency correction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosticRecord {
    pub tim_name: String,
    pub use_name: String,
    pub cmip_dim: String,
    pub dom_name: String,
    pub priority: String,
    pub cmor: String,
    pub package: String,
    pub period: String,
    pub sheet_name: String,
    pub stash: String,
    pub item: String,
    pub section: String,
    pub lbproc: i32,
}

impl DiagnosticRecord {
    /// Content identity of this request.
    ///
    /// Two records with equal identity keys are exact duplicates regardless
    /// of their row keys.
    pub fn identity_key(&self) -> String {
        format!(
            "{}{}{}{}{}{}",
            self.section, self.item, self.dom_name, self.tim_name, self.use_name, self.package
        )
    }

    /// Output stream this request is routed to, from its usage profile
    pub fn stream(&self) -> String {
        constants::stream_for_usage(&self.use_name)
    }
}

/// Reduced record for requests satisfied by the ocean/sea-ice models,
/// which bypass STASH classification entirely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassthroughRecord {
    pub period: String,
    pub sheet_name: String,
    pub cmor: String,
    pub cmip_dim: String,
    pub priority: String,
}

/// The five routed output collections of a translation run.
///
/// All maps are insertion-ordered and keyed by the synthetic row key
/// (the row's unique key, suffixed `_N` for the Nth code of a multi-code
/// row).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RequestCollections {
    /// Atmosphere requests retained after deduplication
    pub atmosphere: IndexMap<String, DiagnosticRecord>,
    /// Exact duplicates removed from the primary set
    pub duplicates: IndexMap<String, DiagnosticRecord>,
    /// Rows with no recognisable STASH translation
    pub undefined: IndexMap<String, DiagnosticRecord>,
    /// Rows explicitly excluded by the upstream priority
    pub not_wanted: IndexMap<String, DiagnosticRecord>,
    /// Ocean/sea-ice rows passed through unclassified
    pub ocean_seaice: IndexMap<String, PassthroughRecord>,
}

impl RequestCollections {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of records across all five collections
    pub fn total(&self) -> usize {
        self.atmosphere.len()
            + self.duplicates.len()
            + self.undefined.len()
            + self.not_wanted.len()
            + self.ocean_seaice.len()
    }

    /// Count of retained atmosphere requests per output stream
    pub fn stream_counts(&self) -> IndexMap<String, usize> {
        let mut counts: IndexMap<String, usize> = IndexMap::new();
        for record in self.atmosphere.values() {
            *counts.entry(record.stream()).or_insert(0) += 1;
        }
        counts
    }
}

/// Normalize an absent or empty value to the `"None"` sentinel
pub fn normalize_value(value: &str) -> String {
    if value.trim().is_empty() {
        NONE_SENTINEL.to_string()
    } else {
        value.to_string()
    }
}
