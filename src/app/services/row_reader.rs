//! Sheet ingestion
//!
//! The data request arrives as one CSV file per sheet, exported from the
//! request workbook; the file stem is the sheet name. Every cell is read
//! as a string and empty cells are normalized to the `"None"` sentinel so
//! absence is always represented the same way downstream.

use std::path::Path;

use serde::Deserialize;
use tracing::{debug, info};

use crate::app::models::{DiagnosticRow, Sheet, normalize_value};
use crate::{Error, Result};

/// Raw CSV row, before sentinel normalization
#[derive(Debug, Deserialize)]
struct RawRow {
    #[serde(default)]
    dimensions: String,
    #[serde(default)]
    cell_method: String,
    #[serde(default)]
    frequency: String,
    #[serde(default)]
    cmip_priority: String,
    #[serde(default)]
    mo_priority: String,
    #[serde(default)]
    stash_codes: String,
    #[serde(default)]
    cmor_name: String,
    #[serde(default)]
    variable_name: String,
    #[serde(default)]
    units: String,
    #[serde(default)]
    realm: String,
    #[serde(default)]
    unique_key: String,
}

impl RawRow {
    fn normalize(self) -> DiagnosticRow {
        DiagnosticRow {
            dimensions: normalize_value(&self.dimensions),
            cell_method: normalize_value(&self.cell_method),
            frequency: normalize_value(&self.frequency),
            cmip_priority: normalize_value(&self.cmip_priority),
            mo_priority: normalize_value(&self.mo_priority),
            stash_codes: normalize_value(&self.stash_codes),
            cmor_name: normalize_value(&self.cmor_name),
            variable_name: normalize_value(&self.variable_name),
            units: normalize_value(&self.units),
            realm: normalize_value(&self.realm),
            unique_key: normalize_value(&self.unique_key),
        }
    }
}

/// Read one sheet CSV file; the file stem becomes the sheet name
pub fn read_sheet(path: &Path) -> Result<Sheet> {
    let name = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().to_string())
        .ok_or_else(|| {
            Error::configuration(format!("sheet path has no file name: {}", path.display()))
        })?;

    let mut reader = csv::Reader::from_path(path).map_err(|e| {
        Error::csv_parsing(path.display().to_string(), "failed to open sheet", Some(e))
    })?;

    let mut rows = Vec::new();
    for result in reader.deserialize() {
        let raw: RawRow = result.map_err(|e| {
            Error::csv_parsing(path.display().to_string(), "malformed sheet row", Some(e))
        })?;
        rows.push(raw.normalize());
    }

    debug!(sheet = %name, rows = rows.len(), "read sheet");
    Ok(Sheet::new(name, rows))
}

/// Read every sheet CSV in a directory, in file-name order.
///
/// Strict input ordering keeps the run deterministic regardless of
/// directory iteration order.
pub fn read_sheet_dir(dir: &Path) -> Result<Vec<Sheet>> {
    let mut paths = Vec::new();
    for entry in std::fs::read_dir(dir)
        .map_err(|e| Error::io(format!("failed to read sheet directory {}", dir.display()), e))?
    {
        let path = entry
            .map_err(|e| Error::io("failed to read sheet directory entry", e))?
            .path();
        if path.extension().is_some_and(|ext| ext == "csv") {
            paths.push(path);
        }
    }
    paths.sort();

    if paths.is_empty() {
        return Err(Error::configuration(format!(
            "no sheet CSV files found in {}",
            dir.display()
        )));
    }

    let sheets = paths
        .iter()
        .map(|path| read_sheet(path))
        .collect::<Result<Vec<_>>>()?;
    info!(sheets = sheets.len(), "read data request sheets");
    Ok(sheets)
}
