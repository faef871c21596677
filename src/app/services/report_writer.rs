//! Output collection serialization
//!
//! The five routed collections are written as pretty-printed JSON
//! key-to-object mappings, one file each. Writing happens only after the
//! whole run has succeeded, so a fatal error never leaves partial output
//! behind.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::info;

use crate::app::models::RequestCollections;
use crate::{Error, Result};

/// Output file names, fixed by the downstream consumer
pub const ATMOSPHERE_FILENAME: &str = "atmosphere_requests.json";
pub const OCEAN_SEAICE_FILENAME: &str = "ocean_seaice_requests.json";
pub const DUPLICATES_FILENAME: &str = "duplicate_requests.json";
pub const UNDEFINED_FILENAME: &str = "undefined_requests.json";
pub const NOT_WANTED_FILENAME: &str = "not_wanted_requests.json";

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let file = File::create(path)
        .map_err(|e| Error::io(format!("failed to create {}", path.display()), e))?;
    serde_json::to_writer_pretty(BufWriter::new(file), value)?;
    Ok(())
}

/// Write all five collections into the output directory, returning the
/// paths written
pub fn write_collections(output_dir: &Path, collections: &RequestCollections) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(output_dir).map_err(|e| {
        Error::io(
            format!("failed to create output directory {}", output_dir.display()),
            e,
        )
    })?;

    let atmosphere = output_dir.join(ATMOSPHERE_FILENAME);
    let ocean_seaice = output_dir.join(OCEAN_SEAICE_FILENAME);
    let duplicates = output_dir.join(DUPLICATES_FILENAME);
    let undefined = output_dir.join(UNDEFINED_FILENAME);
    let not_wanted = output_dir.join(NOT_WANTED_FILENAME);

    write_json(&atmosphere, &collections.atmosphere)?;
    write_json(&ocean_seaice, &collections.ocean_seaice)?;
    write_json(&duplicates, &collections.duplicates)?;
    write_json(&undefined, &collections.undefined)?;
    write_json(&not_wanted, &collections.not_wanted)?;

    info!(directory = %output_dir.display(), "wrote request collections");
    Ok(vec![atmosphere, ocean_seaice, duplicates, undefined, not_wanted])
}
