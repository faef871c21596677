//! Tests for sheet assembly and routing

use super::{lookup, registry, row};
use crate::app::models::{RequestCollections, Sheet};
use crate::app::services::assembler::Assembler;

fn assemble(sheet: Sheet) -> RequestCollections {
    let registry = registry();
    let lookup = lookup();
    let assembler = Assembler::new(&registry, &lookup);
    let mut collections = RequestCollections::new();
    assembler.assemble_sheet(&sheet, &mut collections).unwrap();
    collections
}

#[test]
fn test_single_code_row_becomes_one_record() {
    let sheet = Sheet::new("emmon", vec![row("mon_tas", "tas", "m01s03i236")]);
    let collections = assemble(sheet);

    assert_eq!(collections.atmosphere.len(), 1);
    let record = &collections.atmosphere["mon_tas"];
    assert_eq!(record.stash, "m01s03i236");
    assert_eq!(record.section, "03");
    assert_eq!(record.item, "236");
    assert_eq!(record.tim_name, "TMONMN");
    assert_eq!(record.use_name, "UP5");
    assert_eq!(record.dom_name, "DIAG");
    assert_eq!(record.package, "MO_PR1");
    assert_eq!(record.period, "mon");
    assert_eq!(record.sheet_name, "emmon");
    assert_eq!(record.lbproc, 128);
}

#[test]
fn test_multi_code_row_splits_with_suffixed_keys() {
    let mut multi = row("mon_ua", "ua", "m01s00i002,m01s30i201");
    multi.dimensions = "longitude-latitude-alevel-time".to_string();
    let sheet = Sheet::new("emmon", vec![multi]);
    let collections = assemble(sheet);

    assert_eq!(collections.atmosphere.len(), 2);
    assert!(collections.atmosphere.contains_key("mon_ua"));
    assert!(collections.atmosphere.contains_key("mon_ua_1"));
    assert_eq!(collections.atmosphere["mon_ua"].stash, "m01s00i002");
    assert_eq!(collections.atmosphere["mon_ua_1"].stash, "m01s30i201");
    // both records share the row's profiles
    assert_eq!(
        collections.atmosphere["mon_ua"].tim_name,
        collections.atmosphere["mon_ua_1"].tim_name
    );
}

#[test]
fn test_wind_correction_applied_during_assembly() {
    let mut wind = row("mon_ua", "ua", "m01s00i002");
    wind.dimensions = "longitude-latitude-alevel-time".to_string();
    let sheet = Sheet::new("emmon", vec![wind]);
    let collections = assemble(sheet);

    // classifier said DALLTH, the WIND name correction moves it to DALLRH
    assert_eq!(collections.atmosphere["mon_ua"].dom_name, "DALLRH");
}

#[test]
fn test_unparseable_code_routes_to_undefined() {
    let sheet = Sheet::new("emmon", vec![row("mon_x", "tas", "unknown")]);
    let collections = assemble(sheet);

    assert!(collections.atmosphere.is_empty());
    assert_eq!(collections.undefined.len(), 1);
    let record = &collections.undefined["mon_x"];
    assert_eq!(record.section, "UNKNOWN");
    assert_eq!(record.item, "UNKNOWN");
}

#[test]
fn test_explicitly_unwanted_row_routes_to_not_wanted() {
    let mut unwanted = row("mon_x", "tas", "unknown");
    unwanted.mo_priority = "False".to_string();
    let sheet = Sheet::new("emmon", vec![unwanted]);
    let collections = assemble(sheet);

    assert!(collections.undefined.is_empty());
    assert_eq!(collections.not_wanted.len(), 1);
    assert_eq!(collections.not_wanted["mon_x"].package, "MO_NO_CMIP_1");
}

#[test]
fn test_ocean_row_routes_to_passthrough() {
    let mut ocean = row("omon_tos", "tos", "None");
    ocean.realm = "ocean".to_string();
    let sheet = Sheet::new("emmon", vec![ocean]);
    let collections = assemble(sheet);

    assert!(collections.atmosphere.is_empty());
    assert!(collections.undefined.is_empty());
    assert_eq!(collections.ocean_seaice.len(), 1);
    let record = &collections.ocean_seaice["omon_tos"];
    assert_eq!(record.cmor, "tos");
    assert_eq!(record.period, "mon");
    assert_eq!(record.sheet_name, "emmon");
}

#[test]
fn test_atmosphere_row_recognised_via_cmor_translation() {
    // sheet has no code, but the mapping file translates tas to STASH
    let sheet = Sheet::new("emmon", vec![row("mon_tas", "tas", "unknown")]);
    let collections = assemble(sheet);

    assert_eq!(collections.undefined.len(), 1);
}

#[test]
fn test_skip_listed_sheet_yields_nothing() {
    let sheet = Sheet::new("fx", vec![row("fx_orog", "orog", "m01s00i033")]);
    let collections = assemble(sheet);
    assert_eq!(collections.total(), 0);
}

#[test]
fn test_domain_width_violation_is_fatal() {
    // a zonal-mean sentinel domain is wider than the namelist allows
    let mut zonal = row("mon_x", "tas", "m01s03i236");
    zonal.dimensions = "latitude-alevel-time".to_string();
    let registry = registry();
    let lookup = lookup();
    let assembler = Assembler::new(&registry, &lookup);
    let mut collections = RequestCollections::new();
    let sheet = Sheet::new("emmon", vec![zonal]);

    let result = assembler.assemble_sheet(&sheet, &mut collections);
    assert!(matches!(result, Err(crate::Error::DomainWidth { .. })));
}

#[test]
fn test_rows_processed_in_input_order() {
    let sheet = Sheet::new(
        "emmon",
        vec![
            row("key_a", "tas", "m01s03i236"),
            row("key_b", "tas", "m01s03i236"),
        ],
    );
    let collections = assemble(sheet);
    let keys: Vec<_> = collections.atmosphere.keys().cloned().collect();
    assert_eq!(keys, vec!["key_a".to_string(), "key_b".to_string()]);
}
