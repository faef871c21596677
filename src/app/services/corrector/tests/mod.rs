//! Tests for the dependency corrector


use crate::app::models::DiagnosticRecord;
use crate::app::services::corrector::CorrectionContext;

/// A plausible assembled record for a given code, before correction
pub fn record_for(section: u32, item: u32, dom_name: &str) -> DiagnosticRecord {
    DiagnosticRecord {
        tim_name: "TMONMN".to_string(),
        use_name: "UP5".to_string(),
        cmip_dim: "longitude-latitude-time".to_string(),
        dom_name: dom_name.to_string(),
        priority: "MO_PR1".to_string(),
        cmor: "tas".to_string(),
        package: "MO_PR1".to_string(),
        period: "mon".to_string(),
        sheet_name: "emmon".to_string(),
        stash: format!("m01s{section:02}i{item:03}"),
        item: format!("{item:03}"),
        section: format!("{section:02}"),
        lbproc: 128,
    }
}

/// A correction context with an explicit STASH name
pub fn context_for(section: u32, item: u32, stash_name: &str) -> CorrectionContext {
    CorrectionContext {
        section,
        item,
        stash_name: stash_name.to_string(),
    }
}
