//! The ordered correction rule table
//!
//! Rule order matters: the limited-area remap must see the domain the
//! height rules produced, and the pressure-level guard must run after it so
//! regional domains are no longer pressure-level ones.

use tracing::debug;

use super::CorrectionContext;
use crate::app::models::DiagnosticRecord;
use crate::constants::{NO_ALEV_PLEV_PACKAGE, UNKNOWN_PROFILE};
use crate::{Error, Result};

/// A named correction rule
pub type CorrectionRule = (
    &'static str,
    fn(&mut DiagnosticRecord, &CorrectionContext) -> Result<()>,
);

/// The full correction pass, evaluated in this order
pub const RULES: &[CorrectionRule] = &[
    ("satellite-simulator", satellite_simulator),
    ("tile-domain", tile_domain),
    ("soil-domain", soil_domain),
    ("tem-levels", tem_levels),
    ("limited-area", limited_area),
    ("pressure-level-guard", pressure_level_guard),
    ("pressure-from-cmor", pressure_from_cmor),
    ("wind-model-levels", wind_model_levels),
    ("fixed-overrides", fixed_overrides),
];

/// Simulator item range within section 2
const SIMULATOR_ITEMS: std::ops::RangeInclusive<u32> = 320..=390;

/// Simulator family for an item, where one is defined
fn simulator_family(item: u32) -> Option<&'static str> {
    match item {
        320..=327 | 340..=347 | 372..=390 => Some("COSP_CAL"),
        330..=337 => Some("COSP_ISC"),
        348 => Some("COSP_PAR"),
        370..=371 => Some("COSP_CAL40"),
        _ => None,
    }
}

/// Satellite-simulator diagnostics are averaged from hourly data on
/// radiation timesteps, so their time profiles and package labels are
/// overridden wholesale.
fn satellite_simulator(record: &mut DiagnosticRecord, context: &CorrectionContext) -> Result<()> {
    if context.section != 2 || !SIMULATOR_ITEMS.contains(&context.item) {
        return Ok(());
    }

    let period = record.period.to_lowercase();
    record.tim_name = if period.contains("day") {
        "TRADDAYM".to_string()
    } else if period.contains("mon") {
        "TRADMONM".to_string()
    } else if period.contains("6hr") {
        if record.tim_name.ends_with("MN") {
            "TRAD6HRMN".to_string()
        } else {
            "T6HR".to_string()
        }
    } else if period.contains("3hr") {
        if record.tim_name.ends_with("MN") {
            "TRAD3HRMN".to_string()
        } else {
            "T3HR".to_string()
        }
    } else {
        UNKNOWN_PROFILE.to_string()
    };

    if let Some(family) = simulator_family(context.item) {
        let suffix = format!("_{family}");
        if !record.package.ends_with(&suffix) {
            record.package.push_str(&suffix);
        }
        if context.item == 348 {
            record.dom_name = "DCOSP_5".to_string();
        }
    }

    // item 337 is the tau/pressure histogram and needs the 7x7 domain
    if context.item == 337 {
        record.dom_name = "DCOSP7x7".to_string();
    }

    Ok(())
}

/// Diagnostics on surface tiles always use the tile domain
fn tile_domain(record: &mut DiagnosticRecord, context: &CorrectionContext) -> Result<()> {
    if context.stash_name.contains("TILE") {
        record.dom_name = "DTILE".to_string();
    }
    Ok(())
}

/// Soil diagnostics in section 8 left on the generic domain move to the
/// soil-level domain
fn soil_domain(record: &mut DiagnosticRecord, context: &CorrectionContext) -> Result<()> {
    if context.stash_name.contains("SOIL") && record.dom_name == "DIAG" && context.section == 8 {
        record.dom_name = "DSOIL".to_string();
    }
    Ok(())
}

/// TEM diagnostics (30310-30316) are already zonal means on a single fixed
/// level set; mixing level sets would fail in the model
fn tem_levels(record: &mut DiagnosticRecord, context: &CorrectionContext) -> Result<()> {
    if context.section == 30
        && (310..=316).contains(&context.item)
        && record.dom_name.ends_with('Z')
    {
        record.dom_name = "DP39CCM".to_string();
    }
    Ok(())
}

/// Limited-area priority requests move onto the regional European domains,
/// level-for-level. Already-remapped domains pass through; anything else
/// cannot be output regionally and is a structural error.
fn limited_area(record: &mut DiagnosticRecord, _context: &CorrectionContext) -> Result<()> {
    if !record.package.contains("LTD") {
        return Ok(());
    }
    record.dom_name = match record.dom_name.as_str() {
        "RLEVEL3" => "DEUROPER3".to_string(),
        "RLEVEL2" => "DEUROPER2".to_string(),
        "DIAG" => "DEUROPE".to_string(),
        "DEUROPE" | "DEUROPER2" | "DEUROPER3" => return Ok(()),
        other => return Err(Error::ltd_domain(&record.stash, other)),
    };
    Ok(())
}

/// Section-16 items allowed to stay on pressure levels
const SECTION_16_PLEV_ITEMS: &[u32] = &[202, 203, 204, 205, 256];

/// Pressure-level output belongs in section 30; elsewhere it is flagged as
/// not wanted unless the diagnostic is one of the known exceptions.
fn pressure_level_guard(record: &mut DiagnosticRecord, context: &CorrectionContext) -> Result<()> {
    if !record.dom_name.contains("PLEV") || context.section == 30 {
        return Ok(());
    }
    let allowed = match context.section {
        6 => context.stash_name.contains("P LEV"),
        16 => SECTION_16_PLEV_ITEMS.contains(&context.item),
        _ => false,
    };
    if !allowed {
        debug!(
            stash = %record.stash,
            domain = %record.dom_name,
            "variable on pressure levels outside section 30"
        );
        record.package = NO_ALEV_PLEV_PACKAGE.to_string();
    }
    Ok(())
}

/// Section-30 single-level diagnostics (items 2xx/3xx) cannot sit on the
/// generic domain; the pressure value is recovered from the cmor name
/// (ua850, va850, ta500, ...).
fn pressure_from_cmor(record: &mut DiagnosticRecord, context: &CorrectionContext) -> Result<()> {
    if context.section != 30 || !(200..=399).contains(&context.item) || record.dom_name != "DIAG" {
        return Ok(());
    }
    let trailing = record
        .cmor
        .len()
        .checked_sub(3)
        .and_then(|start| record.cmor.get(start..));
    record.dom_name = match trailing {
        Some(t) if t.chars().all(|c| c.is_ascii_digit()) => format!("DP{t}"),
        _ => UNKNOWN_PROFILE.to_string(),
    };
    Ok(())
}

/// Wind diagnostics requested on full model levels live on rho levels
fn wind_model_levels(record: &mut DiagnosticRecord, context: &CorrectionContext) -> Result<()> {
    if record.dom_name.contains("DALL") && context.stash_name.contains("WIND") {
        record.dom_name = "DALLRH".to_string();
    }
    Ok(())
}

/// A single per-code domain override
struct DomainOverride {
    section: u32,
    item: u32,
    /// Only fires when the current domain matches; `None` fires always
    requires: Option<&'static str>,
    domain: &'static str,
}

/// Individual codes whose level sets the data request does not describe
const DOMAIN_OVERRIDES: &[DomainOverride] = &[
    DomainOverride { section: 1, item: 223, requires: Some("DIAG"), domain: "DALLTH" },
    DomainOverride { section: 1, item: 241, requires: Some("DIAG"), domain: "DALLTH" },
    DomainOverride { section: 2, item: 308, requires: Some("DIAG"), domain: "DALLTH" },
    DomainOverride { section: 2, item: 309, requires: Some("DIAG"), domain: "DALLTH" },
    DomainOverride { section: 0, item: 407, requires: Some("DIAG"), domain: "DALLRH" },
    DomainOverride { section: 0, item: 408, requires: Some("DIAG"), domain: "DALLTH" },
    DomainOverride { section: 3, item: 471, requires: None, domain: "D52TH" },
    DomainOverride { section: 3, item: 472, requires: None, domain: "D52RH" },
    DomainOverride { section: 2, item: 205, requires: Some("DALLRH"), domain: "DIAG" },
    DomainOverride { section: 3, item: 332, requires: Some("DALLRH"), domain: "DIAG" },
];

fn fixed_overrides(record: &mut DiagnosticRecord, context: &CorrectionContext) -> Result<()> {
    for entry in DOMAIN_OVERRIDES {
        if entry.section == context.section
            && entry.item == context.item
            && entry.requires.is_none_or(|required| record.dom_name == required)
        {
            record.dom_name = entry.domain.to_string();
        }
    }
    Ok(())
}
