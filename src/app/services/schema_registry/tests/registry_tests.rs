//! Lookup, version selection, and table-consistency tests for the registry

use crate::app::models::RecordFamily;
use crate::app::services::schema_registry::{
    self, ColumnType, FieldKind, FieldLen, Schema,
};
use crate::config::VersionSelection;

fn fields_end(schema: &Schema) -> usize {
    schema
        .fields
        .iter()
        .map(|f| match f.len {
            FieldLen::Fixed(len) => f.offset + len,
            FieldLen::Prefixed { len_bytes, max } => f.offset + len_bytes + max,
        })
        .max()
        .unwrap_or(0)
}

/// Every schema's declared minimum length covers its last field
#[test]
fn min_len_covers_every_field() {
    for family in [RecordFamily::SecurityUnload, RecordFamily::StorageCollection] {
        for (code, _) in schema_registry::known_types(family) {
            let schema = schema_registry::newest(family, code).expect("registered type");
            assert!(
                schema.min_len >= fields_end(schema),
                "{} {}: min_len {} < last field end {}",
                family,
                code,
                schema.min_len,
                fields_end(schema)
            );
        }
    }
}

/// Column names are unique within each schema
#[test]
fn column_names_are_unique() {
    for family in [RecordFamily::SecurityUnload, RecordFamily::StorageCollection] {
        for (code, _) in schema_registry::known_types(family) {
            let schema = schema_registry::newest(family, code).expect("registered type");
            let plan = schema.column_plan();
            let mut names: Vec<&str> = plan.iter().map(|c| c.name.as_str()).collect();
            names.sort_unstable();
            names.dedup();
            assert_eq!(names.len(), plan.len(), "duplicate column in {family} {code}");
        }
    }
}

/// Newer schema versions extend older ones: the older column plan must be a
/// prefix of the newer, so one table can hold rows from both.
#[test]
fn versions_share_a_column_prefix() {
    for (family, code) in [
        (RecordFamily::SecurityUnload, "0100"),
        (RecordFamily::SecurityUnload, "0200"),
    ] {
        let oldest = schema_registry::lookup(family, code, 0, VersionSelection::LongestFitting)
            .expect("oldest version");
        let newest = schema_registry::newest(family, code).expect("newest version");
        assert!(oldest.key.version < newest.key.version);
        let old_plan = oldest.column_plan();
        let new_plan = newest.column_plan();
        assert!(old_plan.len() < new_plan.len());
        assert_eq!(&new_plan[..old_plan.len()], &old_plan[..]);
    }
}

#[test]
fn unknown_type_code_is_not_found() {
    assert!(
        schema_registry::lookup(
            RecordFamily::SecurityUnload,
            "9999",
            4096,
            VersionSelection::LongestFitting
        )
        .is_none()
    );
    assert!(schema_registry::lookup(
        RecordFamily::StorageCollection,
        "VL",
        4096,
        VersionSelection::LongestFitting
    )
    .is_none());
}

#[test]
fn longest_fitting_selects_by_record_length() {
    // A long record selects the newest GPBD layout
    let long = schema_registry::lookup(
        RecordFamily::SecurityUnload,
        "0100",
        400,
        VersionSelection::LongestFitting,
    )
    .expect("schema");
    assert_eq!(long.key.version, 2);

    // A record too short for the UNIVERSAL field falls back to version 1
    let short = schema_registry::lookup(
        RecordFamily::SecurityUnload,
        "0100",
        357,
        VersionSelection::LongestFitting,
    )
    .expect("schema");
    assert_eq!(short.key.version, 1);

    // Shorter than every layout still resolves (oldest version, degraded)
    let tiny = schema_registry::lookup(
        RecordFamily::SecurityUnload,
        "0100",
        40,
        VersionSelection::LongestFitting,
    )
    .expect("schema");
    assert_eq!(tiny.key.version, 1);
}

#[test]
fn newest_selection_ignores_record_length() {
    let schema = schema_registry::lookup(
        RecordFamily::SecurityUnload,
        "0200",
        100,
        VersionSelection::Newest,
    )
    .expect("schema");
    assert_eq!(schema.key.version, 2);
}

#[test]
fn resolve_type_accepts_codes_and_names() {
    let by_code = schema_registry::resolve_type(RecordFamily::SecurityUnload, "0200");
    let by_name = schema_registry::resolve_type(RecordFamily::SecurityUnload, "USBD");
    assert_eq!(by_code, Some("0200"));
    assert_eq!(by_name, Some("0200"));
    assert_eq!(
        schema_registry::resolve_type(RecordFamily::StorageCollection, "DC"),
        Some("DC")
    );
    assert_eq!(
        schema_registry::resolve_type(RecordFamily::SecurityUnload, "NOSUCH"),
        None
    );
}

#[test]
fn known_types_cover_both_families() {
    let security = schema_registry::known_types(RecordFamily::SecurityUnload);
    assert!(security.len() >= 25);
    assert!(security.iter().any(|(code, name)| *code == "0100" && *name == "GPBD"));

    let storage = schema_registry::known_types(RecordFamily::StorageCollection);
    assert_eq!(storage.len(), 3);
    assert!(storage.iter().any(|(code, _)| *code == "V"));
}

/// The data-class layout exercises every descriptor feature: prefixed
/// lengths, mapped flags, and a repeated group flattened into numbered
/// columns.
#[test]
fn data_class_plan_flattens_key_labels() {
    let schema = schema_registry::newest(RecordFamily::StorageCollection, "DC").expect("DC");
    assert!(schema
        .fields
        .iter()
        .any(|f| matches!(f.kind, FieldKind::RepeatedGroup(_))));

    let plan = schema.column_plan();
    let names: Vec<&str> = plan.iter().map(|c| c.name.as_str()).collect();
    let first = names.iter().position(|n| *n == "DDCKLBN_1").expect("occurrence 1");
    let second = names.iter().position(|n| *n == "DDCKLBN_2").expect("occurrence 2");
    assert!(first < second, "occurrence order must be preserved");

    let klbn = plan.iter().find(|c| c.name == "DDCKLBN_1").expect("column");
    assert_eq!(klbn.dtype, ColumnType::Text);
    let klbl = plan.iter().find(|c| c.name == "DDCKLBL_1").expect("column");
    assert_eq!(klbl.dtype, ColumnType::Int);
}

#[test]
fn column_types_follow_field_kinds() {
    let schema = schema_registry::newest(RecordFamily::SecurityUnload, "0100").expect("GPBD");
    let plan = schema.column_plan();
    let by_name = |name: &str| {
        plan.iter()
            .find(|c| c.name == name)
            .unwrap_or_else(|| panic!("missing column {name}"))
            .dtype
    };
    assert_eq!(by_name("GPBD_NAME"), ColumnType::Text);
    assert_eq!(by_name("GPBD_CREATE_DATE"), ColumnType::Date);
    assert_eq!(by_name("GPBD_NOTERMUACC"), ColumnType::Text);

    let volume = schema_registry::newest(RecordFamily::StorageCollection, "V").expect("V");
    let plan = volume.column_plan();
    assert_eq!(
        plan.iter().find(|c| c.name == "DCVCYLMG").expect("flag").dtype,
        ColumnType::Bool
    );
    assert_eq!(
        plan.iter().find(|c| c.name == "DCVFRESP").expect("binary").dtype,
        ColumnType::Int
    );
}
