//! Application constants for the STASH requester
//!
//! This module contains the fixed classification tables, sentinel values,
//! and namelist section mappings used throughout the request translation
//! pipeline.

// =============================================================================
// Frequencies and Usage Profiles
// =============================================================================

/// Frequencies the time/usage classifier recognises
pub const POSSIBLE_FREQUENCIES: &[&str] = &["mon", "day", "6hr", "3hr", "1hr", "subhr"];

/// Sheets in the data request that carry no STASH-mappable variables
pub const SHEETS_TO_SKIP: &[&str] = &["Oclim", "fx"];

/// Usage profile for a sheet period or frequency key
///
/// The sheet-level period is consulted first so that table variants
/// (`amon`, `cfmon`, `monz`, ...) land in their dedicated streams; plain
/// frequencies fall back to the generic entry.
pub fn usage_for(key: &str) -> Option<&'static str> {
    match key {
        "amon" | "limon" => Some("UP4"),
        "mon" | "cfmon" => Some("UP5"),
        "monz" => Some("UPV"),
        "day" => Some("UP6"),
        "6hr" => Some("UP7"),
        "3hr" => Some("UP8"),
        "1hr" => Some("UP9"),
        "subhr" => Some("UPT"),
        _ => None,
    }
}

// =============================================================================
// lbproc Processing Flags
// =============================================================================

/// Time- and space-processing contributions to the record `lbproc` value
///
/// The final value is the sum of the domain contribution and the time
/// contribution.
pub mod lbproc {
    /// Instantaneous output, no processing
    pub const INSTANT: i32 = 0;

    /// Zonal mean applied over the domain
    pub const ZONAL_MEAN: i32 = 64;

    /// Time mean over the output period
    pub const TIME_MEAN: i32 = 128;

    /// Minimum over the output period
    pub const TIME_MIN: i32 = 4096;

    /// Maximum over the output period
    pub const TIME_MAX: i32 = 8192;
}

// =============================================================================
// Sentinels and Limits
// =============================================================================

/// Sentinel for a domain or usage profile that could not be classified
pub const UNKNOWN_PROFILE: &str = "UNKNOWN";

/// Sentinel for a time profile that could not be inferred from cell methods
pub const UNKNOWN_TIME_PROFILE: &str = "unknown";

/// Sentinel for a zonal-mean request with no recognised level set
pub const ZONAL_MEAN_SENTINEL: &str = "ZNMN_OF_SOME_KIND";

/// Literal used for absent values throughout the input rows
pub const NONE_SENTINEL: &str = "None";

/// Fixed-width limit on domain profile names in the downstream namelist
pub const MAX_DOMAIN_NAME_LEN: usize = 11;

/// Code prefix identifying atmosphere-model STASH requests
pub const ATMOS_MODEL_PREFIX: &str = "m01";

/// Package marker meaning the Met Office explicitly does not want the value
pub const NOT_WANTED_MARKER: &str = "MO_NO";

/// Package assigned to pressure-level requests outside the allowed sections
pub const NO_ALEV_PLEV_PACKAGE: &str = "NO_ALEV_PLEV";

// =============================================================================
// Namelist Section Families
// =============================================================================

/// Section families subject to content-addressed re-indexing
pub const REINDEXED_FAMILIES: &[&str] = &[
    "namelist:domain",
    "namelist:streq",
    "namelist:time",
    "namelist:use",
];

/// The stash request family itself
pub const STREQ_FAMILY: &str = "namelist:streq";

/// Options excluded from a family's content hash (free-text name fields)
pub fn excluded_options(family: &str) -> &'static [&'static str] {
    match family {
        "namelist:domain" => &["dom_name"],
        "namelist:time" => &["tim_name"],
        "namelist:use" => &["use_name"],
        "namelist:items" => &["ancilfilename"],
        _ => &[],
    }
}

/// Number of hexadecimal characters kept from a section content hash
pub const HASH_PREFIX_LEN: usize = 8;

// =============================================================================
// Helper Functions
// =============================================================================

/// Convert a usage profile name to its output stream name
///
/// `UPx` profiles map onto `APx` streams; the climate-mean pseudo profile
/// maps onto the mean stream. Anything else passes through unchanged.
pub fn stream_for_usage(usage: &str) -> String {
    if usage.starts_with("UP") && usage.len() == 3 {
        format!("AP{}", &usage[2..])
    } else if usage == "UPMEAN" {
        "APM".to_string()
    } else {
        usage.to_string()
    }
}

/// Check whether a package marks a request as explicitly not wanted
pub fn is_not_wanted_package(package: &str) -> bool {
    package.contains(NOT_WANTED_MARKER)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usage_lookup() {
        assert_eq!(usage_for("mon"), Some("UP5"));
        assert_eq!(usage_for("amon"), Some("UP4"));
        assert_eq!(usage_for("monz"), Some("UPV"));
        assert_eq!(usage_for("subhr"), Some("UPT"));
        assert_eq!(usage_for("daily"), None);
    }

    #[test]
    fn test_stream_conversion() {
        assert_eq!(stream_for_usage("UP5"), "AP5");
        assert_eq!(stream_for_usage("UPV"), "APV");
        assert_eq!(stream_for_usage("UPMEAN"), "APM");
        assert_eq!(stream_for_usage("UNKNOWN"), "UNKNOWN");
    }

    #[test]
    fn test_excluded_options_per_family() {
        assert_eq!(excluded_options("namelist:domain"), &["dom_name"]);
        assert_eq!(excluded_options("namelist:time"), &["tim_name"]);
        assert_eq!(excluded_options("namelist:use"), &["use_name"]);
        assert!(excluded_options("namelist:streq").is_empty());
    }

    #[test]
    fn test_not_wanted_marker() {
        assert!(is_not_wanted_package("MO_NO_CMIP_1"));
        assert!(!is_not_wanted_package("MO_PR1"));
    }
}
