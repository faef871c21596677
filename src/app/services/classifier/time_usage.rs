//! Time and usage profile derivation
//!
//! The time profile encodes how a quantity is processed over its output
//! period (instantaneous, mean, minimum, maximum) and contributes the time
//! component of `lbproc`; the usage profile selects the output stream from
//! the sheet period or the request frequency.

use crate::app::models::TimeUsageProfile;
use crate::constants::{POSSIBLE_FREQUENCIES, UNKNOWN_PROFILE, UNKNOWN_TIME_PROFILE, lbproc, usage_for};

/// Parsed `processing: detail` halves of a cell-method descriptor
fn split_cell_method(cell_method: &str) -> Option<(&str, &str)> {
    let (processing, detail) = cell_method.split_once(':')?;
    Some((processing.trim(), detail.trim()))
}

/// Usage profile for a request, preferring the sheet period over the
/// row frequency; unrecognised frequencies have no stream
fn derive_usage(sheet_period: &str, frequency: &str) -> String {
    if !POSSIBLE_FREQUENCIES.contains(&frequency) {
        return UNKNOWN_PROFILE.to_string();
    }
    usage_for(&sheet_period.to_lowercase())
        .or_else(|| usage_for(frequency))
        .unwrap_or(UNKNOWN_PROFILE)
        .to_string()
}

/// Derive the time and usage profiles for one request.
///
/// The time profile name is always built from the uppercased frequency,
/// even when the frequency itself is unrecognised; only the usage profile
/// falls back to `UNKNOWN` in that case. A cell method that mentions
/// neither time nor area processing, or that cannot be split into
/// `processing: detail` halves, yields the lowercase `unknown` time
/// sentinel with no lbproc contribution.
///
/// # Examples
///
/// A monthly frequency with cell method point has a plain time profile and
/// no processing flag:
/// ```
/// # use stash_requester::app::services::classifier::derive_time_usage;
/// let profile = derive_time_usage("mon", "mon", "time: point");
/// assert_eq!(
///     (profile.time_name.as_str(), profile.usage_name.as_str(), profile.lbproc),
///     ("TMON", "UP5", 0)
/// );
/// ```
///
/// But a monthly time mean goes to the same usage with a different time
/// profile and lbproc:
/// ```
/// # use stash_requester::app::services::classifier::derive_time_usage;
/// let profile = derive_time_usage("mon", "mon", "time: mean");
/// assert_eq!(
///     (profile.time_name.as_str(), profile.usage_name.as_str(), profile.lbproc),
///     ("TMONMN", "UP5", 128)
/// );
/// ```
pub fn derive_time_usage(sheet_period: &str, frequency: &str, cell_method: &str) -> TimeUsageProfile {
    let usage = derive_usage(sheet_period, frequency);
    let base = format!("T{}", frequency.to_uppercase());

    let (time_name, time_lbproc) = match split_cell_method(cell_method) {
        Some((processing, detail)) if processing.contains("time") => match detail {
            d if d.contains("mean") => (format!("{base}MN"), lbproc::TIME_MEAN),
            d if d.contains("point") => (base, lbproc::INSTANT),
            d if d.contains("minimum") => (format!("{base}MIN"), lbproc::TIME_MIN),
            d if d.contains("maximum") => (format!("{base}MAX"), lbproc::TIME_MAX),
            _ => (UNKNOWN_TIME_PROFILE.to_string(), lbproc::INSTANT),
        },
        Some((processing, detail)) if processing.contains("area") => match detail {
            d if d.contains("point") => (base, lbproc::INSTANT),
            d if d.contains("mean") => (format!("{base}MN"), lbproc::TIME_MEAN),
            _ => (UNKNOWN_TIME_PROFILE.to_string(), lbproc::INSTANT),
        },
        _ => {
            tracing::trace!(cell_method, "cell method carries no time processing");
            (UNKNOWN_TIME_PROFILE.to_string(), lbproc::INSTANT)
        }
    };

    TimeUsageProfile::new(time_name, usage, time_lbproc)
}
