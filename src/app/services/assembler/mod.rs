//! Request assembly
//!
//! The assembler walks a sheet row by row, combining classifier output with
//! each resolved STASH code into candidate [`DiagnosticRecord`]s, running
//! the dependency corrector over each, and routing rows that cannot become
//! requests into the undefined, not-wanted, or ocean/sea-ice collections.
//!
//! Rows are processed strictly in input order; within a row, codes are
//! processed in the order listed. A row with several codes yields several
//! records sharing one set of profiles, keyed `key`, `key_1`, `key_2`, ...

pub mod code;

#[cfg(test)]
pub mod tests;

use tracing::{debug, info};

use crate::app::models::{
    DiagnosticRecord, DomainProfile, PassthroughRecord, RequestCollections, Sheet,
    TimeUsageProfile,
};
use crate::app::services::classifier::{derive_domain, derive_time_usage, merge_priority};
use crate::app::services::cmor_lookup::CmorStashLookup;
use crate::app::services::corrector::{self, CorrectionContext};
use crate::app::services::stash_registry::StashRegistry;
use crate::constants::{ATMOS_MODEL_PREFIX, MAX_DOMAIN_NAME_LEN, NONE_SENTINEL, UNKNOWN_PROFILE, is_not_wanted_package};
use crate::{Error, Result};

use code::StashCode;

/// Assembles diagnostic requests from data-request sheets.
///
/// The lookup tables are threaded in explicitly; the assembler holds no
/// other state between sheets.
pub struct Assembler<'a> {
    registry: &'a StashRegistry,
    cmor_lookup: &'a CmorStashLookup,
}

impl<'a> Assembler<'a> {
    pub fn new(registry: &'a StashRegistry, cmor_lookup: &'a CmorStashLookup) -> Self {
        Self {
            registry,
            cmor_lookup,
        }
    }

    /// Assemble every row of a sheet into the output collections.
    ///
    /// Skip-listed sheets are ignored. Any disagreement between the derived
    /// per-row attribute vectors is a structural error that aborts the run.
    pub fn assemble_sheet(
        &self,
        sheet: &Sheet,
        collections: &mut RequestCollections,
    ) -> Result<()> {
        if sheet.is_skipped() {
            info!(sheet = %sheet.name, "skipping sheet");
            return Ok(());
        }

        let sheet_period = sheet.period();
        debug!(sheet = %sheet.name, period = %sheet_period, "processing sheet");

        let domains: Vec<DomainProfile> = sheet
            .rows
            .iter()
            .map(|row| derive_domain(&row.dimensions))
            .collect();
        let time_usages: Vec<TimeUsageProfile> = sheet
            .rows
            .iter()
            .map(|row| derive_time_usage(&sheet_period, &row.frequency, &row.cell_method))
            .collect();
        let priorities: Vec<String> = sheet
            .rows
            .iter()
            .map(|row| merge_priority(&row.cmip_priority, &row.mo_priority))
            .collect();

        ensure_aligned(
            &sheet.name,
            sheet.rows.len(),
            &[
                ("domain", domains.len()),
                ("time/usage", time_usages.len()),
                ("priority", priorities.len()),
            ],
        )?;

        for (index, row) in sheet.rows.iter().enumerate() {
            self.assemble_row(
                sheet,
                row,
                &domains[index],
                &time_usages[index],
                &priorities[index],
                collections,
            )?;
        }

        Ok(())
    }

    /// Assemble a single row, one record per resolvable code
    fn assemble_row(
        &self,
        sheet: &Sheet,
        row: &crate::app::models::DiagnosticRow,
        domain: &DomainProfile,
        time_usage: &TimeUsageProfile,
        priority: &str,
        collections: &mut RequestCollections,
    ) -> Result<()> {
        // ocean and sea-ice requests are satisfied by other models and
        // bypass STASH classification entirely
        if !self.is_atmosphere_row(row) {
            collections.ocean_seaice.insert(
                row.unique_key.clone(),
                PassthroughRecord {
                    period: row.frequency.clone(),
                    sheet_name: sheet.name.clone(),
                    cmor: row.cmor_name.clone(),
                    cmip_dim: row.dimensions.clone(),
                    priority: priority.to_string(),
                },
            );
            return Ok(());
        }

        let lbproc = domain.lbproc + time_usage.lbproc;

        for (position, candidate) in row.stash_codes.split(',').map(str::trim).enumerate() {
            let key = if position == 0 {
                row.unique_key.clone()
            } else {
                format!("{}_{}", row.unique_key, position)
            };

            match StashCode::parse(candidate) {
                Some(code) => {
                    let mut record = DiagnosticRecord {
                        tim_name: time_usage.time_name.clone(),
                        use_name: time_usage.usage_name.clone(),
                        cmip_dim: row.dimensions.clone(),
                        dom_name: domain.name.clone(),
                        priority: priority.to_string(),
                        cmor: row.cmor_name.clone(),
                        package: priority.to_string(),
                        period: row.frequency.clone(),
                        sheet_name: sheet.name.clone(),
                        stash: code.to_string(),
                        item: code.item_str(),
                        section: code.section_str(),
                        lbproc,
                    };

                    let context = CorrectionContext::resolve(&code, self.registry);
                    corrector::correct(&mut record, &context)?;

                    if record.dom_name.len() > MAX_DOMAIN_NAME_LEN {
                        return Err(Error::domain_width(&record.stash, &record.dom_name));
                    }

                    collections.atmosphere.insert(key, record);
                }
                None => {
                    let record = DiagnosticRecord {
                        tim_name: time_usage.time_name.clone(),
                        use_name: time_usage.usage_name.clone(),
                        cmip_dim: row.dimensions.clone(),
                        dom_name: domain.name.clone(),
                        priority: priority.to_string(),
                        cmor: row.cmor_name.clone(),
                        package: priority.to_string(),
                        period: row.frequency.clone(),
                        sheet_name: sheet.name.clone(),
                        stash: candidate.to_string(),
                        item: UNKNOWN_PROFILE.to_string(),
                        section: UNKNOWN_PROFILE.to_string(),
                        lbproc,
                    };
                    if is_not_wanted_package(priority) {
                        collections.not_wanted.insert(key, record);
                    } else {
                        collections.undefined.insert(key, record);
                    }
                }
            }
        }

        Ok(())
    }

    /// Whether a row's request is produced by the atmosphere model.
    ///
    /// Either the row's own candidate code or the external cmor translation
    /// must carry the atmosphere model prefix. Disagreements between the
    /// two are logged but the row-level codes win.
    fn is_atmosphere_row(&self, row: &crate::app::models::DiagnosticRow) -> bool {
        let cmor_or_var = if row.cmor_name == NONE_SENTINEL && row.variable_name != NONE_SENTINEL {
            &row.variable_name
        } else {
            &row.cmor_name
        };

        let translation = self
            .cmor_lookup
            .translate(cmor_or_var)
            .unwrap_or(NONE_SENTINEL);

        if !row.stash_codes.contains(translation) {
            debug!(
                cmor = %cmor_or_var,
                translation,
                sheet_codes = %row.stash_codes,
                "cmor translation differs from sheet codes"
            );
        }

        translation.starts_with(ATMOS_MODEL_PREFIX)
            || row.stash_codes.starts_with(ATMOS_MODEL_PREFIX)
    }
}

/// Verify that every derived attribute vector matches the row count.
///
/// A mismatch means the sheet is structurally invalid and the whole run
/// must stop rather than skip rows.
fn ensure_aligned(sheet: &str, rows: usize, derived: &[(&str, usize)]) -> Result<()> {
    for (name, len) in derived {
        if *len != rows {
            return Err(Error::structural_mismatch(
                sheet,
                format!("{name} vector has {len} entries for {rows} rows"),
            ));
        }
    }
    Ok(())
}
