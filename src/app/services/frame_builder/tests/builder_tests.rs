//! Dispatch state machine and table accumulation tests

use std::collections::BTreeSet;

use crate::app::models::{DiagnosticKind, RawRecord, RecordFamily};
use crate::app::services::frame_builder::{FrameBuilder, RecordOutcome};
use crate::config::{FieldFailurePolicy, ParseOptions};

/// Build a security RawRecord with a blank-padded payload
fn security_record(offset: u64, len: usize, splices: &[(usize, &str)]) -> RawRecord {
    let mut payload = vec![b' '; len];
    for (start, text) in splices {
        let offset = start - 1;
        payload[offset..offset + text.len()].copy_from_slice(text.as_bytes());
    }
    RawRecord {
        type_code: String::from_utf8_lossy(&payload[..4]).trim().to_string(),
        consumed: (payload.len() + 4) as u64,
        payload,
        offset,
    }
}

fn subgroup_record(offset: u64, name: &str, subgroup: &str) -> RawRecord {
    security_record(offset, 22, &[(1, "0101"), (6, name), (15, subgroup)])
}

#[test]
fn appends_rows_in_file_order() {
    let options = ParseOptions::default();
    let mut builder = FrameBuilder::new(RecordFamily::SecurityUnload, None, &options);

    for (i, sub) in ["SUB1", "SUB2", "SUB3"].iter().enumerate() {
        let outcome = builder.ingest(&subgroup_record(i as u64 * 26, "SYS1", sub));
        assert_eq!(outcome, RecordOutcome::Appended);
    }

    let (frames, stats, diagnostics) = builder.finish().expect("finish");
    assert!(stats.is_balanced());
    assert_eq!(stats.records_appended, 3);
    assert!(diagnostics.is_empty());

    let frame = frames.get("GPSGRP").expect("GPSGRP table");
    assert_eq!(frame.height(), 3);
    let subs = frame
        .column("GPSGRP_SUBGRP_ID")
        .expect("column")
        .as_materialized_series()
        .str()
        .expect("text column")
        .into_iter()
        .map(|s| s.map(str::to_string))
        .collect::<Vec<_>>();
    assert_eq!(
        subs,
        vec![
            Some("SUB1".to_string()),
            Some("SUB2".to_string()),
            Some("SUB3".to_string())
        ]
    );
}

#[test]
fn unknown_type_is_skipped_and_counted() {
    let options = ParseOptions::default();
    let mut builder = FrameBuilder::new(RecordFamily::SecurityUnload, None, &options);

    let outcome = builder.ingest(&security_record(0, 40, &[(1, "9999")]));
    assert_eq!(outcome, RecordOutcome::Skipped);

    builder.ingest(&subgroup_record(44, "SYS1", "SUB1"));
    let (frames, stats, diagnostics) = builder.finish().expect("finish");

    assert!(stats.is_balanced());
    assert_eq!(stats.records_skipped_unrecognized, 1);
    assert_eq!(stats.per_type.get("9999").expect("counted").seen, 1);
    assert_eq!(stats.per_type.get("9999").expect("counted").appended, 0);
    assert!(!frames.contains_key("9999"));
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].kind, DiagnosticKind::UnrecognizedType);
}

#[test]
fn filtered_types_are_read_but_not_tabled() {
    let filter: BTreeSet<String> = [String::from("0101")].into();
    let options = ParseOptions::default();
    let mut builder = FrameBuilder::new(RecordFamily::SecurityUnload, Some(filter), &options);

    builder.ingest(&subgroup_record(0, "SYS1", "SUB1"));
    let member = security_record(26, 31, &[(1, "0102"), (6, "SYS1"), (15, "USER01")]);
    assert_eq!(builder.ingest(&member), RecordOutcome::Skipped);

    let (frames, stats, _) = builder.finish().expect("finish");
    assert!(stats.is_balanced());
    assert_eq!(stats.records_skipped_filtered, 1);
    assert_eq!(stats.per_type.get("0102").expect("still counted").seen, 1);
    assert!(frames.contains_key("GPSGRP"));
    assert!(!frames.contains_key("GPMEM"));
}

#[test]
fn field_failure_keeps_the_record_by_default() {
    let options = ParseOptions::default();
    let mut builder = FrameBuilder::new(RecordFamily::SecurityUnload, None, &options);

    // GPOMVS with a non-numeric GID
    let record = security_record(0, 24, &[(1, "0120"), (6, "OMVSGRP"), (15, "BOGUS")]);
    assert_eq!(builder.ingest(&record), RecordOutcome::Appended);

    let (frames, stats, diagnostics) = builder.finish().expect("finish");
    assert_eq!(stats.records_appended, 1);
    assert_eq!(stats.field_failures, 1);
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].kind, DiagnosticKind::FieldDecodeFailure);
    assert_eq!(diagnostics[0].field.as_deref(), Some("GPOMVS_GID"));

    let frame = frames.get("GPOMVS").expect("table");
    assert_eq!(frame.height(), 1);
    let gid = frame
        .column("GPOMVS_GID")
        .expect("column")
        .as_materialized_series()
        .i64()
        .expect("int column");
    assert_eq!(gid.get(0), None);
}

#[test]
fn record_fatal_policy_drops_degraded_records() {
    let options = ParseOptions {
        field_failure_policy: FieldFailurePolicy::RecordFatal,
        ..ParseOptions::default()
    };
    let mut builder = FrameBuilder::new(RecordFamily::SecurityUnload, None, &options);

    let record = security_record(0, 24, &[(1, "0120"), (6, "OMVSGRP"), (15, "BOGUS")]);
    assert_eq!(builder.ingest(&record), RecordOutcome::Errored);

    let (frames, stats, diagnostics) = builder.finish().expect("finish");
    assert!(stats.is_balanced());
    assert_eq!(stats.records_errored, 1);
    assert!(!frames.contains_key("GPOMVS"));
    assert!(diagnostics
        .iter()
        .any(|d| d.kind == DiagnosticKind::RecordDropped));
}

/// Rows decoded under an older schema version fit the newest version's
/// column set with trailing nulls.
#[test]
fn mixed_schema_versions_share_one_table() {
    let options = ParseOptions::default();
    let mut builder = FrameBuilder::new(RecordFamily::SecurityUnload, None, &options);

    // v2-length record with UNIVERSAL, then a v1-length record without it
    let v2 = security_record(
        0,
        362,
        &[(1, "0100"), (6, "NEWGRP"), (53, "NO"), (359, "YES")],
    );
    let v1 = security_record(366, 357, &[(1, "0100"), (6, "OLDGRP"), (53, "NO")]);
    assert_eq!(builder.ingest(&v2), RecordOutcome::Appended);
    assert_eq!(builder.ingest(&v1), RecordOutcome::Appended);

    let (frames, stats, diagnostics) = builder.finish().expect("finish");
    assert!(diagnostics.is_empty(), "{diagnostics:?}");
    assert_eq!(stats.records_appended, 2);

    let frame = frames.get("GPBD").expect("table");
    assert_eq!(frame.height(), 2);
    let universal = frame
        .column("GPBD_UNIVERSAL")
        .expect("newest-version column")
        .as_materialized_series()
        .str()
        .expect("text column");
    assert_eq!(universal.get(0), Some("YES"));
    assert_eq!(universal.get(1), None);
}

#[test]
fn no_rows_means_no_table() {
    let options = ParseOptions::default();
    let builder = FrameBuilder::new(RecordFamily::SecurityUnload, None, &options);
    let (frames, stats, _) = builder.finish().expect("finish");
    assert!(frames.is_empty());
    assert_eq!(stats.records_seen, 0);
}
