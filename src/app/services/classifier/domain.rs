//! Spatial domain derivation from dimension strings
//!
//! The dimension string is a dash-joined token list such as
//! `longitude-latitude-plev19-time`. Horizontal fields (both `longitude`
//! and `latitude` present) and zonal means (`latitude` only) each have an
//! ordered rule table, evaluated first match wins, so precedence between
//! overlapping token patterns stays auditable.

use crate::app::models::DomainProfile;
use crate::constants::{UNKNOWN_PROFILE, ZONAL_MEAN_SENTINEL, lbproc};

/// Tokenised view of a dimension string
pub struct DimTokens<'a> {
    joined: &'a str,
    tokens: Vec<&'a str>,
}

impl<'a> DimTokens<'a> {
    pub fn new(dimensions: &'a str) -> Self {
        Self {
            joined: dimensions,
            tokens: dimensions.split('-').collect(),
        }
    }

    fn contains(&self, needle: &str) -> bool {
        self.joined.contains(needle)
    }

    fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Token at position `index`, or the empty string past the end
    fn token(&self, index: usize) -> &str {
        self.tokens.get(index).copied().unwrap_or("")
    }

    fn has_token(&self, needle: &str) -> bool {
        self.tokens.contains(&needle)
    }
}

/// A named domain rule; returns the domain name when it applies
pub type DomainRule = (&'static str, fn(&DimTokens) -> Option<String>);

/// Horizontal-field rules, in precedence order
pub const HORIZONTAL_RULES: &[DomainRule] = &[
    ("model-levels-full", model_levels_full),
    ("plain-horizontal", plain_horizontal),
    ("horizontal-with-time", horizontal_with_time),
    ("simulator-tau-histogram", simulator_tau_histogram),
    ("model-half-levels", model_half_levels),
    ("lowest-model-level", lowest_model_level),
    ("pressure-level-set", pressure_level_set),
    ("single-pressure-level", single_pressure_level),
    ("simulator-pressure-bins", simulator_pressure_bins),
    ("simulator-height-bins", simulator_height_bins),
    ("simulator-solar-angles", simulator_solar_angles),
    ("soil-top-level", soil_top_level),
    ("soil-levels", soil_levels),
    ("fixed-heights", fixed_heights),
    ("surface-types", surface_types),
];

fn model_levels_full(dims: &DimTokens) -> Option<String> {
    // theta-level default; the dependency corrector moves rho-level
    // diagnostics to DALLRH afterwards
    dims.contains("alevel").then(|| "DALLTH".to_string())
}

fn plain_horizontal(dims: &DimTokens) -> Option<String> {
    (dims.len() == 2).then(|| "DIAG".to_string())
}

fn horizontal_with_time(dims: &DimTokens) -> Option<String> {
    (dims.len() == 3 && dims.token(2).contains("time")).then(|| "DIAG".to_string())
}

fn simulator_tau_histogram(dims: &DimTokens) -> Option<String> {
    let matched = dims.len() == 5
        && (dims.has_token("plev7c") || dims.has_token("plev7"))
        && dims.token(3).contains("time")
        && dims.token(4).contains("tau");
    matched.then(|| "DCOSP7x7".to_string())
}

fn model_half_levels(dims: &DimTokens) -> Option<String> {
    dims.contains("alevhalf").then(|| "DALLRH".to_string())
}

fn lowest_model_level(dims: &DimTokens) -> Option<String> {
    dims.contains("alev1").then(|| "DLEV1".to_string())
}

fn pressure_level_set(dims: &DimTokens) -> Option<String> {
    dims.token(2)
        .starts_with("plev")
        .then(|| dims.token(2).to_uppercase())
}

fn single_pressure_level(dims: &DimTokens) -> Option<String> {
    (dims.token(2).starts_with('p') && dims.contains("p100"))
        .then(|| format!("D{}", dims.token(2).to_uppercase()))
}

fn simulator_pressure_bins(dims: &DimTokens) -> Option<String> {
    if !dims.token(3).starts_with('p') {
        return None;
    }
    // p840/p560/p220 are the satellite-simulator sampling pressures, output
    // on the plain horizontal domain
    if dims.contains("p840") || dims.contains("p560") || dims.contains("p220") {
        Some("DIAG".to_string())
    } else {
        Some(format!("D{}", dims.token(3).to_uppercase()))
    }
}

fn simulator_height_bins(dims: &DimTokens) -> Option<String> {
    dims.contains("alt40").then(|| "DCOSP40".to_string())
}

fn simulator_solar_angles(dims: &DimTokens) -> Option<String> {
    dims.contains("sza5").then(|| "DCOSP_5".to_string())
}

fn soil_top_level(dims: &DimTokens) -> Option<String> {
    dims.contains("sdepth1").then(|| "DSOIL1".to_string())
}

fn soil_levels(dims: &DimTokens) -> Option<String> {
    dims.contains("sdepth").then(|| "DSOIL".to_string())
}

fn fixed_heights(dims: &DimTokens) -> Option<String> {
    if !dims.contains("height") {
        return None;
    }
    for token in [dims.token(2), dims.token(3)] {
        match token {
            t if t.contains("height2m") || t.contains("height10m") || t.contains("height50m") => {
                return Some("DIAG".to_string());
            }
            t if t.contains("height100m") => return Some("RLEVEL3".to_string()),
            _ => {}
        }
    }
    None
}

fn surface_types(dims: &DimTokens) -> Option<String> {
    // vegetation/surface type pseudo-dimensions are output per gridbox
    dims.contains("type").then(|| "DIAG".to_string())
}

/// Derive the spatial domain profile for a dimension string.
///
/// Horizontal fields run the [`HORIZONTAL_RULES`] table; zonal means get
/// the pressure-level zonal domain or the generic zonal sentinel, both with
/// the zonal-mean lbproc contribution. Anything else is `UNKNOWN`.
///
/// # Examples
///
/// A simple surface field has a DIAG domain profile:
/// ```
/// # use stash_requester::app::services::classifier::derive_domain;
/// let profile = derive_domain("longitude-latitude-time");
/// assert_eq!((profile.name.as_str(), profile.lbproc), ("DIAG", 0));
/// ```
///
/// Requested diagnostics on pressure levels return the matching
/// pressure-level domain:
/// ```
/// # use stash_requester::app::services::classifier::derive_domain;
/// let profile = derive_domain("longitude-latitude-plev19-time");
/// assert_eq!((profile.name.as_str(), profile.lbproc), ("PLEV19", 0));
/// ```
///
/// Zonal means are supported, and update the lbproc:
/// ```
/// # use stash_requester::app::services::classifier::derive_domain;
/// let profile = derive_domain("latitude-plev19-time");
/// assert_eq!((profile.name.as_str(), profile.lbproc), ("PLEV19Z", 64));
/// ```
pub fn derive_domain(dimensions: &str) -> DomainProfile {
    let dims = DimTokens::new(dimensions);
    let horizontal = dims.contains("longitude") && dims.contains("latitude");

    if horizontal {
        for &(name, rule) in HORIZONTAL_RULES {
            if let Some(domain) = rule(&dims) {
                tracing::trace!(rule = name, domain, "matched horizontal domain rule");
                return DomainProfile::new(domain, lbproc::INSTANT);
            }
        }
        tracing::debug!(dimensions, "no horizontal domain rule matched");
        DomainProfile::unknown()
    } else if dims.contains("latitude") {
        if dims.token(1).starts_with("plev") {
            DomainProfile::new(
                format!("{}Z", dims.token(1).to_uppercase()),
                lbproc::ZONAL_MEAN,
            )
        } else {
            DomainProfile::new(ZONAL_MEAN_SENTINEL, lbproc::ZONAL_MEAN)
        }
    } else {
        DomainProfile::new(UNKNOWN_PROFILE, lbproc::INSTANT)
    }
}
