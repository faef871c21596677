//! Climate-meaning to STASH-meaning conversion
//!
//! Reference suites output monthly means through the climate-mean system
//! (`TDMPMN`/`UPMEAN` and friends); the request pipeline needs every
//! diagnostic on plain STASH meaning so frequencies and streams stay one
//! to one. This pass rewrites the affected `namelist:streq` sections in
//! place and gives every bare package switch the standard label.

use tracing::debug;

use crate::app::services::stash_registry::StashRegistry;

use super::tree::{ConfigTree, split_section_id};

/// Known duplicate requests in the reference suite, matched on their
/// (time, domain, usage) profile triple and switched off via the package
const KNOWN_DUPLICATES: &[(&str, &str, &str)] = &[
    ("TDAYM", "DIAG", "UPJ"),
    ("TDAY", "DIAG", "UPJ"),
    ("TDAYMIN", "DIAG", "UPJ"),
    ("TDAYMAX", "DIAG", "UPJ"),
];

/// Package switch applied to reference diagnostics with no label
const STANDARD_PACKAGE: &str = "STD_GA7";

/// Rewrite climate-meaning streq sections onto STASH meaning.
///
/// The STASH registry resolves diagnostic names for the stream split
/// (dust diagnostics share the section-30 stream).
pub fn convert_to_stash_meaning(tree: &mut ConfigTree, registry: &StashRegistry) {
    for id in tree.section_ids() {
        let (family, _) = split_section_id(&id);
        if family != "namelist:streq" {
            continue;
        }
        let Some(section) = tree.get(&id) else {
            continue;
        };

        let tim_name = section.option("tim_name").unwrap_or("").to_string();
        let use_name = section.option("use_name").unwrap_or("").to_string();
        let dom_name = section.option("dom_name").unwrap_or("").to_string();
        let package = section.option("package").unwrap_or("").to_string();
        let isec = section.option("isec").unwrap_or("").to_string();
        let item = section.option("item").unwrap_or("").to_string();

        let stash_name = match (isec.trim().parse::<u32>(), item.trim().parse::<u32>()) {
            (Ok(section_num), Ok(item_num)) => registry
                .name_for(section_num, item_num)
                .unwrap_or("")
                .to_string(),
            _ => String::new(),
        };

        let Some(section) = tree.get_mut(&id) else {
            continue;
        };

        if KNOWN_DUPLICATES
            .iter()
            .any(|(tim, dom, usage)| tim_name == *tim && dom_name == *dom && use_name == *usage)
        {
            section.set_option("package", "DUPLICATE");
        }

        // dump-mean monthly profiles move to plain monthly means; UKCA and
        // EasyAerosol go to their own stream, section 30 and dust share UP2
        if tim_name.contains("TDMPMN") && use_name == "UPMEAN" {
            section.set_option("tim_name", "TMONMN");
            let stream = if package.contains("UKCA") || package.contains("EASYA") {
                "UP3"
            } else if isec.trim() == "30" || stash_name.contains("Dust") {
                "UP2"
            } else {
                "UP1"
            };
            section.set_option("use_name", stream);
            debug!(section = %id, stream, "converted dump mean to stash meaning");
        }

        // six-hourly-sampled monthly means, as used by the simulator
        if tim_name.contains("T6HDMPM") && use_name == "UPMEAN" {
            section.set_option("tim_name", "T6HMONM");
            let stream = if isec.trim() == "30" || stash_name.contains("Dust") {
                "UP2"
            } else {
                "UP1"
            };
            section.set_option("use_name", stream);
        }

        // diurnal-cycle profiles keep their sampling period in the name
        if tim_name.contains("TMPMN") {
            section.set_option("package", "DIURNAL");
            let period: String = tim_name.chars().skip(tim_name.len().saturating_sub(2)).collect();
            section.set_option("tim_name", format!("TMONMN{period}"));
            section.set_option("use_name", "UPK");
        }

        // radiation-timestep dump means
        if tim_name.contains("TRADDM") && use_name == "UPMEAN" {
            section.set_option("tim_name", "TRADMONM");
            section.set_option("use_name", "UP1");
        }

        // 90-day instantaneous output becomes 30-day
        if tim_name.contains("T90DAY") {
            section.set_option("tim_name", "T30DAY");
            section.set_option("use_name", "UPU");
        }

        // timestep diagnostics move to the timestep stream
        if tim_name.contains("TSTEPGI") {
            section.set_option("use_name", "UPT");
            section.set_option("package", "TSTEP_STD_GA7");
        }

        if section.option("package").is_none_or(str::is_empty) {
            section.set_option("package", STANDARD_PACKAGE);
        }
    }
}
