//! End-to-end integration tests for the request translation pipeline
//!
//! Builds a small data request export on disk (sheet CSVs plus the two
//! lookup files), runs the full library pipeline over it, and checks the
//! routed collections and written output files.

use std::io::Write;
use std::path::Path;

use stash_requester::app::models::RequestCollections;
use stash_requester::app::services::assembler::Assembler;
use stash_requester::app::services::cmor_lookup::CmorStashLookup;
use stash_requester::app::services::deduplicator;
use stash_requester::app::services::report_writer;
use stash_requester::app::services::row_reader;
use stash_requester::app::services::stash_registry::StashRegistry;

const SHEET_HEADER: &str = "dimensions,cell_method,frequency,cmip_priority,mo_priority,\
                            stash_codes,cmor_name,variable_name,units,realm,unique_key";

fn write_file(path: &Path, lines: &[&str]) {
    let mut file = std::fs::File::create(path).unwrap();
    for line in lines {
        writeln!(file, "{line}").unwrap();
    }
}

fn write_lookups(dir: &Path) {
    write_file(
        &dir.join("stashmaster.csv"),
        &[
            "section,item,name",
            "3,236,TEMPERATURE AT 1.5M",
            "0,2,U COMPNT OF WIND AFTER TIMESTEP",
            "30,201,U COMPNT OF WIND ON P LEV/UV GRID",
            "8,223,SOIL MOISTURE CONTENT IN A LAYER",
        ],
    );
    write_file(
        &dir.join("cmor_mappings.csv"),
        &[
            "cmor,stash",
            "tas,m01s03i236",
            "ua,\"m01s00i002,m01s30i201\"",
            "mrsol,m01s08i223",
            "clt,m01s02i204",
        ],
    );
}

fn run_pipeline(input_dir: &Path) -> RequestCollections {
    let registry = StashRegistry::from_csv_path(&input_dir.join("stashmaster.csv")).unwrap();
    let lookup = CmorStashLookup::from_csv_path(&input_dir.join("cmor_mappings.csv")).unwrap();
    let sheets = row_reader::read_sheet_dir(&input_dir.join("sheets")).unwrap();

    let assembler = Assembler::new(&registry, &lookup);
    let mut collections = RequestCollections::new();
    for sheet in &sheets {
        assembler.assemble_sheet(sheet, &mut collections).unwrap();
    }
    deduplicator::deduplicate(&mut collections, None);
    collections
}

#[test]
fn test_full_translation_run() {
    let dir = tempfile::tempdir().unwrap();
    write_lookups(dir.path());
    let sheets = dir.path().join("sheets");
    std::fs::create_dir(&sheets).unwrap();

    write_file(
        &sheets.join("emmon.csv"),
        &[
            SHEET_HEADER,
            // plain surface temperature, monthly mean
            "longitude-latitude-time,time: mean,mon,1,UM:1,m01s03i236,tas,tas,K,atmos,mon_tas",
            // wind on model levels, two codes on one row
            "longitude-latitude-alevel-time,time: mean,mon,1,UM:1,\"m01s00i002,m01s30i201\",\
             ua,ua,m s-1,atmos,mon_ua",
            // ocean variable, no STASH translation
            "longitude-latitude-time,time: mean,mon,1,NEMO:1,None,tos,tos,K,ocean,mon_tos",
            // no translation and not wanted upstream
            "longitude-latitude-time,time: mean,mon,2,False,unknown,clt,clt,%,atmos,mon_clt",
        ],
    );
    write_file(
        &sheets.join("mon.csv"),
        &[
            SHEET_HEADER,
            // exact duplicate identity of the emmon tas request
            "longitude-latitude-time,time: mean,mon,1,UM:1,m01s03i236,tasmax,tasmax,K,atmos,\
             mon_tasmax",
        ],
    );

    let collections = run_pipeline(dir.path());

    // primary set: tas + two ua records; the primday duplicate is pruned
    assert_eq!(collections.atmosphere.len(), 3);
    assert!(collections.atmosphere.contains_key("mon_tas"));
    assert!(collections.atmosphere.contains_key("mon_ua"));
    assert!(collections.atmosphere.contains_key("mon_ua_1"));

    // first-encountered representative retained, later one flagged
    assert_eq!(collections.duplicates.len(), 1);
    assert_eq!(collections.duplicates["mon_tasmax"].cmor, "tasmax");

    assert_eq!(collections.ocean_seaice.len(), 1);
    assert_eq!(collections.ocean_seaice["mon_tos"].cmor, "tos");

    assert_eq!(collections.not_wanted.len(), 1);
    assert_eq!(collections.not_wanted["mon_clt"].package, "MO_NO_CMIP_2");
    assert!(collections.undefined.is_empty());

    // classified profiles on the retained surface record
    let tas = &collections.atmosphere["mon_tas"];
    assert_eq!(tas.dom_name, "DIAG");
    assert_eq!(tas.tim_name, "TMONMN");
    assert_eq!(tas.use_name, "UP5");
    assert_eq!(tas.lbproc, 128);

    // the wind correction moved the model-level records onto rho levels
    assert_eq!(collections.atmosphere["mon_ua"].dom_name, "DALLRH");
}

#[test]
fn test_collection_counts_balance() {
    let dir = tempfile::tempdir().unwrap();
    write_lookups(dir.path());
    let sheets = dir.path().join("sheets");
    std::fs::create_dir(&sheets).unwrap();

    write_file(
        &sheets.join("emmon.csv"),
        &[
            SHEET_HEADER,
            "longitude-latitude-time,time: mean,mon,1,UM:1,m01s03i236,tas,tas,K,atmos,a",
            "longitude-latitude-time,time: mean,mon,1,UM:1,m01s03i236,tasx,tasx,K,atmos,b",
            "longitude-latitude-time,time: mean,mon,1,UM:1,m01s03i236,tasy,tasy,K,atmos,c",
        ],
    );

    let collections = run_pipeline(dir.path());
    assert_eq!(collections.atmosphere.len(), 1);
    assert_eq!(collections.duplicates.len(), 2);
    // retained plus duplicates equals the number assembled
    assert_eq!(collections.atmosphere.len() + collections.duplicates.len(), 3);
}

#[test]
fn test_outputs_written_after_successful_run() {
    let dir = tempfile::tempdir().unwrap();
    write_lookups(dir.path());
    let sheets = dir.path().join("sheets");
    std::fs::create_dir(&sheets).unwrap();

    write_file(
        &sheets.join("emmon.csv"),
        &[
            SHEET_HEADER,
            "longitude-latitude-time,time: mean,mon,1,UM:1,m01s03i236,tas,tas,K,atmos,mon_tas",
        ],
    );

    let collections = run_pipeline(dir.path());
    let output_dir = dir.path().join("out");
    let paths = report_writer::write_collections(&output_dir, &collections).unwrap();

    assert_eq!(paths.len(), 5);
    for path in paths {
        assert!(path.exists());
    }

    let text = std::fs::read_to_string(output_dir.join("atmosphere_requests.json")).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(parsed["mon_tas"]["tim_name"], "TMONMN");
    assert_eq!(parsed["mon_tas"]["use_name"], "UP5");
    assert_eq!(parsed["mon_tas"]["dom_name"], "DIAG");
    assert_eq!(parsed["mon_tas"]["section"], "03");
    assert_eq!(parsed["mon_tas"]["item"], "236");
    assert_eq!(parsed["mon_tas"]["lbproc"], 128);
}

#[test]
fn test_pressure_level_sheet_rows() {
    let dir = tempfile::tempdir().unwrap();
    write_lookups(dir.path());
    let sheets = dir.path().join("sheets");
    std::fs::create_dir(&sheets).unwrap();

    write_file(
        &sheets.join("emmon.csv"),
        &[
            SHEET_HEADER,
            "longitude-latitude-plev19-time,time: mean,mon,1,UM:1,m01s30i201,ua,ua,m s-1,\
             atmos,mon_ua19",
            "latitude-plev19-time,time: mean,mon,1,UM:1,m01s30i201,uaz,uaz,m s-1,atmos,\
             mon_uaz",
        ],
    );

    let collections = run_pipeline(dir.path());

    let horizontal = &collections.atmosphere["mon_ua19"];
    assert_eq!(horizontal.dom_name, "PLEV19");
    assert_eq!(horizontal.lbproc, 128);

    let zonal = &collections.atmosphere["mon_uaz"];
    assert_eq!(zonal.dom_name, "PLEV19Z");
    // zonal-mean and time-mean contributions sum
    assert_eq!(zonal.lbproc, 192);
}

#[test]
fn test_skip_listed_sheets_are_ignored() {
    let dir = tempfile::tempdir().unwrap();
    write_lookups(dir.path());
    let sheets = dir.path().join("sheets");
    std::fs::create_dir(&sheets).unwrap();

    write_file(
        &sheets.join("fx.csv"),
        &[
            SHEET_HEADER,
            "longitude-latitude,time: point,mon,1,UM:1,m01s00i033,orog,orog,m,atmos,fx_orog",
        ],
    );
    write_file(
        &sheets.join("emmon.csv"),
        &[
            SHEET_HEADER,
            "longitude-latitude-time,time: mean,mon,1,UM:1,m01s03i236,tas,tas,K,atmos,mon_tas",
        ],
    );

    let collections = run_pipeline(dir.path());
    assert_eq!(collections.total(), 1);
    assert!(collections.atmosphere.contains_key("mon_tas"));
}
