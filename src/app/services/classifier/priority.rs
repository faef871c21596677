//! Priority merge of the CMIP and Met Office priority sources
//!
//! Every request row carries two priority indicators: the CMIP priority
//! (a small integer) and the Met Office production indicator (free text).
//! The merged value becomes both the record priority and its initial
//! package switch, so the literal spellings here are load-bearing for the
//! downstream package rules.

use tracing::warn;

use crate::constants::NONE_SENTINEL;

/// Merge the two priority sources into a single package/priority value.
///
/// Ordered literal rules first, then a numeric comparison fallback when
/// both sides parse as integers. An unparseable pair keeps the CMIP value
/// and logs a diagnostic rather than failing.
pub fn merge_priority(cmip_priority: &str, mo_priority: &str) -> String {
    let cmip_absent = cmip_priority == NONE_SENTINEL;
    let mo_absent = mo_priority == NONE_SENTINEL;

    if cmip_absent && mo_absent {
        return NONE_SENTINEL.to_string();
    }
    if cmip_absent {
        return mo_priority.to_string();
    }
    if mo_absent {
        let initial = cmip_priority.chars().next().unwrap_or('?');
        return format!("HRMIP_{initial}");
    }

    match mo_priority {
        "UM:1" => "MO_PR1".to_string(),
        "UM:2" => "MO_PR2".to_string(),
        "NEMO:1" => "MO_NEMO1".to_string(),
        "CICE:1" => "MO_CICE1".to_string(),
        "JULES:1" => "MO_JULES1".to_string(),
        "CICE:1 & JULES:1" => "MO_JULCIC1".to_string(),
        "LIMITED" => "PRIM_LTD".to_string(),
        "False" => format!("MO_NO_CMIP_{cmip_priority}"),
        "CHECK" => "MO_CHECK".to_string(),
        _ if mo_priority.contains("check") => "MO_RECHECK".to_string(),
        "ANCIL" => "FROM_ANCIL".to_string(),
        _ => compare_numeric(cmip_priority, mo_priority),
    }
}

/// Numeric fallback: whichever side holds the smaller integer wins
fn compare_numeric(cmip_priority: &str, mo_priority: &str) -> String {
    match (cmip_priority.parse::<i32>(), mo_priority.parse::<i32>()) {
        (Ok(cmip), Ok(mo)) if cmip < mo => "1_CMIP_OVER_MO".to_string(),
        (Ok(cmip), Ok(mo)) if mo < cmip => "1_MO_OVER_CMIP".to_string(),
        (Ok(_), Ok(_)) => cmip_priority.to_string(),
        _ => {
            warn!(
                cmip_priority,
                mo_priority, "priority values cannot be compared as integers"
            );
            cmip_priority.to_string()
        }
    }
}
