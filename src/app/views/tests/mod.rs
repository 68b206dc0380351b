//! View test suite with in-memory unload set builders

mod pattern_tests;

use crate::app::models::{RawRecord, RecordFamily};
use crate::app::services::frame_builder::FrameBuilder;
use crate::app::services::parse_session::UnloadSet;
use crate::config::ParseOptions;

/// Blank-padded security payload with 1-based splices
pub fn security_payload(len: usize, splices: &[(usize, &str)]) -> Vec<u8> {
    let mut bytes = vec![b' '; len];
    for (start, text) in splices {
        let offset = start - 1;
        bytes[offset..offset + text.len()].copy_from_slice(text.as_bytes());
    }
    bytes
}

/// Assemble an UnloadSet directly from raw payloads, bypassing file I/O
pub fn build_set(family: RecordFamily, payloads: Vec<Vec<u8>>) -> UnloadSet {
    let options = ParseOptions::default();
    let mut builder = FrameBuilder::new(family, None, &options);
    let mut offset = 0u64;
    for payload in payloads {
        let type_code = match family {
            RecordFamily::SecurityUnload => {
                String::from_utf8_lossy(&payload[..4]).trim().to_string()
            }
            RecordFamily::StorageCollection => {
                crate::app::services::field_decoder::ebcdic::decode_cp500(&payload[2..4])
                    .trim()
                    .to_string()
            }
        };
        let consumed = (payload.len() + 4) as u64;
        let record = RawRecord {
            payload,
            offset,
            type_code,
            consumed,
        };
        offset += consumed;
        builder.ingest(&record);
    }
    let (tables, stats, diagnostics) = builder.finish().expect("finish");
    UnloadSet::new(family, tables, stats, diagnostics)
}

/// USBD record with the four attribute flags and a name
pub fn user_record(name: &str, special: &str, oper: &str, auditor: &str, revoke: &str) -> Vec<u8> {
    security_payload(
        637,
        &[
            (1, "0200"),
            (6, name),
            (15, "2020-01-15"),
            (26, "IBMUSER"),
            (40, special),
            (45, oper),
            (50, revoke),
            (386, auditor),
            (96, "SYS1"),
        ],
    )
}

pub fn group_record(name: &str, superior: &str) -> Vec<u8> {
    security_payload(362, &[(1, "0100"), (6, name), (15, superior), (53, "NO")])
}

pub fn connect_record(group: &str, user: &str) -> Vec<u8> {
    security_payload(124, &[(1, "0205"), (6, group), (15, user)])
}

pub fn dataset_record(name: &str, uacc: &str) -> Vec<u8> {
    security_payload(455, &[(1, "0400"), (6, name), (124, uacc)])
}

pub fn dataset_access_record(name: &str, auth_id: &str, access: &str) -> Vec<u8> {
    security_payload(
        80,
        &[(1, "0404"), (6, name), (58, auth_id), (67, access)],
    )
}

pub fn general_access_record(name: &str, class: &str, auth_id: &str) -> Vec<u8> {
    security_payload(
        284,
        &[(1, "0505"), (6, name), (253, class), (262, auth_id)],
    )
}
