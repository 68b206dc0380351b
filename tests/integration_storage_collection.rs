//! End-to-end tests over synthetic DCOLLECT storage collection files
//!
//! Fixtures are binary records: a 2-byte big-endian inclusive length field,
//! two filler bytes, the EBCDIC type code, then the documented layout with
//! EBCDIC text, big-endian integers, bit flags, and packed julian dates.

use std::io::Write;

use chrono::{Datelike, NaiveDate};
use tempfile::NamedTempFile;

use unload_processor::app::services::field_decoder::ebcdic::encode_cp500;
use unload_processor::app::views::StorageViews;
use unload_processor::{ParseOptions, ParseSession, RecordFamily, UnloadSet};

/// Frame a payload with its embedded length field
fn frame(payload: &[u8]) -> Vec<u8> {
    let declared = (payload.len() + 2) as u16;
    let mut framed = declared.to_be_bytes().to_vec();
    framed.extend_from_slice(payload);
    framed
}

/// EBCDIC-blank payload with the type code at bytes 2..4
fn base_payload(type_code: &str, len: usize) -> Vec<u8> {
    let mut payload = vec![0x40u8; len];
    payload[0] = 0;
    payload[1] = 0;
    let mut code = encode_cp500(type_code);
    code.resize(2, 0x40);
    payload[2..4].copy_from_slice(&code);
    payload
}

fn put_text(payload: &mut [u8], offset: usize, text: &str) {
    let encoded = encode_cp500(text);
    payload[offset..offset + encoded.len()].copy_from_slice(&encoded);
}

fn put_u16(payload: &mut [u8], offset: usize, value: u16) {
    payload[offset..offset + 2].copy_from_slice(&value.to_be_bytes());
}

fn put_u32(payload: &mut [u8], offset: usize, value: u32) {
    payload[offset..offset + 4].copy_from_slice(&value.to_be_bytes());
}

fn put_julian(payload: &mut [u8], offset: usize, date: Option<NaiveDate>) {
    let bytes = match date {
        None => [0u8; 4],
        Some(d) => {
            let packed = d.year() as u32 * 1000 + d.ordinal();
            let mut nibbles = [0u8; 8];
            let mut value = packed;
            for i in (0..7).rev() {
                nibbles[i] = (value % 10) as u8;
                value /= 10;
            }
            nibbles[7] = 0x0F;
            [
                (nibbles[0] << 4) | nibbles[1],
                (nibbles[2] << 4) | nibbles[3],
                (nibbles[4] << 4) | nibbles[5],
                (nibbles[6] << 4) | nibbles[7],
            ]
        }
    };
    payload[offset..offset + 4].copy_from_slice(&bytes);
}

/// An active-dataset record with name, flags, volume, sizes, and dates
fn dataset_record(
    dsname: &str,
    volser: &str,
    smsm: bool,
    lrecl: u16,
    created: NaiveDate,
    expires: Option<NaiveDate>,
) -> Vec<u8> {
    let mut payload = base_payload("D", 258);
    put_text(&mut payload, 22, dsname);
    for byte in &mut payload[66..76] {
        *byte = 0;
    }
    if smsm {
        payload[67] |= 0x40;
    }
    payload[74] = 0x80; // RECFM fixed
    payload[75] = 1; // one extent
    put_text(&mut payload, 76, volser);
    put_u16(&mut payload, 82, 27920);
    put_u16(&mut payload, 84, lrecl);
    for byte in &mut payload[86..102] {
        *byte = 0;
    }
    put_julian(&mut payload, 102, Some(created));
    put_julian(&mut payload, 106, expires);
    put_julian(&mut payload, 110, None);
    put_text(&mut payload, 132, "STANDARD");
    put_text(&mut payload, 228, "SGPROD");
    payload
}

fn volume_record(volser: &str, free: u32, alloc: u32, capacity: u32) -> Vec<u8> {
    let mut payload = base_payload("V", 120);
    put_text(&mut payload, 22, volser);
    payload[33] = 80;
    put_u32(&mut payload, 34, free);
    put_u32(&mut payload, 38, alloc);
    put_u32(&mut payload, 42, capacity);
    for byte in &mut payload[46..66] {
        *byte = 0;
    }
    put_text(&mut payload, 66, "3390");
    put_u16(&mut payload, 74, 0x0A3F);
    put_text(&mut payload, 80, "SGPROD");
    put_text(&mut payload, 110, "DASD");
    payload[119] = 0;
    payload
}

/// A data-class record exercising prefixed text, mapped flags, and the
/// repeated key-label group
fn data_class_record(name: &str, keylabel1: &str, keylabel2: &str) -> Vec<u8> {
    let mut payload = base_payload("DC", 534);
    put_u16(&mut payload, 22, name.len() as u16);
    put_text(&mut payload, 24, name);
    put_text(&mut payload, 54, "SYSADM");
    put_text(&mut payload, 62, "2023-11-05");
    put_text(&mut payload, 74, "14:30:22");
    put_text(&mut payload, 82, "payroll master files");
    // binary region: flags, enums, sizes
    for byte in &mut payload[202..330] {
        *byte = 0;
    }
    payload[202] = 0b1100_0000; // RECORG + LRECL specified
    payload[206] = 1; // VSAM_KSDS
    payload[207] = 6; // FIXED
    put_u32(&mut payload, 242, 4096);
    put_text(&mut payload, 272, "LOGSTREAM.A");
    // two key-label occurrences, 68 bytes apart
    put_u16(&mut payload, 330, keylabel1.len() as u16);
    put_text(&mut payload, 332, keylabel1);
    payload[396] = 1;
    payload[397] = 0;
    put_u16(&mut payload, 398, keylabel2.len() as u16);
    put_text(&mut payload, 400, keylabel2);
    payload[464] = 2;
    for byte in &mut payload[465..470] {
        *byte = 0;
    }
    payload[467] = 1; // RMODE ALL
    put_u16(&mut payload, 468, 8);
    put_text(&mut payload, 470, "DASDKEY1");
    payload
}

fn write_collection(records: &[Vec<u8>]) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    for record in records {
        file.write_all(&frame(record)).expect("write record");
    }
    file.flush().expect("flush");
    file
}

async fn parse(file: &NamedTempFile) -> unload_processor::Result<UnloadSet> {
    ParseSession::start(
        file.path(),
        RecordFamily::StorageCollection,
        ParseOptions::default(),
    )
    .expect("session start")
    .wait()
    .await
}

fn text_cell(frame: &polars::prelude::DataFrame, column: &str, row: usize) -> Option<String> {
    frame
        .column(column)
        .expect("column")
        .as_materialized_series()
        .str()
        .expect("text column")
        .get(row)
        .map(str::to_string)
}

fn int_cell(frame: &polars::prelude::DataFrame, column: &str, row: usize) -> Option<i64> {
    frame
        .column(column)
        .expect("column")
        .as_materialized_series()
        .i64()
        .expect("int column")
        .get(row)
}

fn bool_cell(frame: &polars::prelude::DataFrame, column: &str, row: usize) -> Option<bool> {
    frame
        .column(column)
        .expect("column")
        .as_materialized_series()
        .bool()
        .expect("bool column")
        .get(row)
}

#[tokio::test]
async fn dataset_records_decode_ebcdic_flags_and_dates() {
    let created = NaiveDate::from_ymd_opt(2020, 2, 29).expect("leap day");
    let file = write_collection(&[dataset_record(
        "PROD.PAYROLL.DATA",
        "PRD001",
        true,
        133,
        created,
        None,
    )]);

    let set = parse(&file).await.expect("ready");
    assert!(set.diagnostics().is_empty(), "{:?}", set.diagnostics());

    let table = set.table("D").expect("table");
    assert_eq!(table.height(), 1);
    assert_eq!(text_cell(table, "DCDDSNAM", 0).as_deref(), Some("PROD.PAYROLL.DATA"));
    assert_eq!(text_cell(table, "DCDVOLSR", 0).as_deref(), Some("PRD001"));
    assert_eq!(text_cell(table, "DCDSTGRP", 0).as_deref(), Some("SGPROD"));
    assert_eq!(bool_cell(table, "DCDSMSM", 0), Some(true));
    assert_eq!(bool_cell(table, "DCDRACFD", 0), Some(false));
    assert_eq!(bool_cell(table, "DCDRECFF", 0), Some(true));
    assert_eq!(int_cell(table, "DCDLRECL", 0), Some(133));
    assert_eq!(int_cell(table, "DCDBKLNG", 0), Some(27920));

    let dates: Vec<Option<NaiveDate>> = table
        .column("DCDCREDT")
        .expect("column")
        .as_materialized_series()
        .date()
        .expect("date column")
        .as_date_iter()
        .collect();
    assert_eq!(dates[0], Some(created));

    // the all-zero expiration decodes to absent, never an epoch
    let expiry: Vec<Option<NaiveDate>> = table
        .column("DCDEXPDT")
        .expect("column")
        .as_materialized_series()
        .date()
        .expect("date column")
        .as_date_iter()
        .collect();
    assert_eq!(expiry[0], None);
}

#[tokio::test]
async fn data_class_records_decode_prefixed_and_grouped_fields() {
    let file = write_collection(&[data_class_record("DCPAYROL", "PROD.MASTER.KEY", "PROD.SPARE.KEY")]);

    let set = parse(&file).await.expect("ready");
    assert!(set.diagnostics().is_empty(), "{:?}", set.diagnostics());

    let table = set.table("DC").expect("table");
    assert_eq!(text_cell(table, "DDCNAME", 0).as_deref(), Some("DCPAYROL"));
    assert_eq!(text_cell(table, "DDCUSER", 0).as_deref(), Some("SYSADM"));
    assert_eq!(text_cell(table, "DDCRCORG", 0).as_deref(), Some("VSAM_KSDS"));
    assert_eq!(text_cell(table, "DDCRECFM", 0).as_deref(), Some("FIXED"));
    assert_eq!(text_cell(table, "DDCRMODE", 0).as_deref(), Some("ALL"));
    assert_eq!(bool_cell(table, "DDCFRORG", 0), Some(true));
    assert_eq!(bool_cell(table, "DDCFRFM", 0), Some(false));
    assert_eq!(int_cell(table, "DDCLRECL", 0), Some(4096));

    // repeated group: both occurrences, in order, with their own lengths
    assert_eq!(text_cell(table, "DDCKLBN_1", 0).as_deref(), Some("PROD.MASTER.KEY"));
    assert_eq!(int_cell(table, "DDCKLBL_1", 0), Some(15));
    assert_eq!(int_cell(table, "DDCKYCD_1", 0), Some(1));
    assert_eq!(text_cell(table, "DDCKLBN_2", 0).as_deref(), Some("PROD.SPARE.KEY"));
    assert_eq!(int_cell(table, "DDCKYCD_2", 0), Some(2));

    assert_eq!(text_cell(table, "DDCDKLBN", 0).as_deref(), Some("DASDKEY1"));
}

#[tokio::test]
async fn unsupported_collection_types_are_counted_not_tabled() {
    let created = NaiveDate::from_ymd_opt(2021, 1, 1).expect("date");
    let file = write_collection(&[
        volume_record("PRD001", 100, 400, 500),
        base_payload("A", 120),
        base_payload("VL", 80),
        base_payload("SC", 80),
        dataset_record("PROD.DATA", "PRD001", false, 80, created, None),
    ]);

    let set = parse(&file).await.expect("ready");
    let stats = set.stats();
    assert!(stats.is_balanced());
    assert_eq!(stats.records_seen, 5);
    assert_eq!(stats.records_appended, 2);
    assert_eq!(stats.records_skipped_unrecognized, 3);
    assert_eq!(stats.per_type.get("VL").expect("counted").seen, 1);
    assert!(set.get_table("A").is_none());
}

#[tokio::test]
async fn storage_views_answer_volume_queries() {
    let created = NaiveDate::from_ymd_opt(2021, 1, 1).expect("date");
    let file = write_collection(&[
        volume_record("PRD001", 100, 400, 500),
        dataset_record("B.SECOND", "PRD001", false, 80, created, None),
        dataset_record("A.FIRST", "PRD001", false, 80, created, None),
    ]);

    let set = parse(&file).await.expect("ready");
    let views = StorageViews::new(&set).expect("views");
    assert_eq!(
        views.datasets_on_volume("PRD001").expect("volume"),
        ["A.FIRST", "B.SECOND"]
    );

    let space = views.volume_space().expect("space");
    assert_eq!(int_cell(&space, "FREE_KB", 0), Some(100));
    assert_eq!(int_cell(&space, "ALLOCATED_KB", 0), Some(400));
}

/// Two independent sessions over the same file agree exactly.
#[tokio::test]
async fn storage_parse_is_idempotent() {
    let created = NaiveDate::from_ymd_opt(2022, 7, 4).expect("date");
    let file = write_collection(&[
        volume_record("PRD001", 100, 400, 500),
        dataset_record("PROD.DATA", "PRD001", true, 80, created, None),
    ]);

    let first = parse(&file).await.expect("ready");
    let second = parse(&file).await.expect("ready");
    assert_eq!(first.table_names(), second.table_names());
    for (name, table) in first.tables() {
        let other = second.table(name).expect("same table");
        assert_eq!(table.height(), other.height());
        assert_eq!(table.get_column_names(), other.get_column_names());
    }
}
