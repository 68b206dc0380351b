//! Core domain models for unload processing
//!
//! Record families, raw framed records, decoded cell values, and the
//! diagnostics entries accumulated against a parse pass.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The two supported unload families.
///
/// The family determines record framing, the payload text encoding, and
/// which half of the schema registry answers type-code lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecordFamily {
    /// IRRDBU00 security-database unload: length-prefixed variable records,
    /// ASCII payloads, numeric four-character type codes.
    SecurityUnload,
    /// DCOLLECT storage-management collection: block-buffered records with
    /// embedded length fields, EBCDIC payloads, short alphabetic type codes.
    StorageCollection,
}

impl RecordFamily {
    /// Stable lowercase identifier used in CLI arguments and log output
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SecurityUnload => "security",
            Self::StorageCollection => "storage",
        }
    }
}

impl std::fmt::Display for RecordFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One logical record as yielded by the record reader.
#[derive(Debug, Clone)]
pub struct RawRecord {
    /// Record payload, framing stripped
    pub payload: Vec<u8>,
    /// Byte offset of the record (including its framing) in the input file
    pub offset: u64,
    /// Type code extracted per the family's convention
    pub type_code: String,
    /// Total bytes this record consumed in the file, framing included
    pub consumed: u64,
}

/// A decoded field value.
///
/// The variant is fixed by the field's declared kind, so every value in a
/// given column shares one variant; absent values are represented as `None`
/// at the column level, never as a `Value`.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Transcoded, right-trimmed text (also carries surfaced raw flag codes)
    Text(String),
    /// Signed integer from textual, binary, or packed-decimal encodings
    Int(i64),
    /// Calendar date
    Date(NaiveDate),
    /// Boolean from a bit flag
    Bool(bool),
}

/// Classification of a recoverable per-record anomaly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiagnosticKind {
    /// The record's type code has no schema in the registry
    UnrecognizedType,
    /// A single field's bytes did not conform to its declared kind
    FieldDecodeFailure,
    /// A record was dropped whole under the record-fatal failure policy
    RecordDropped,
}

/// One entry in the per-session diagnostics log.
///
/// Diagnostics never halt the pass; they are kept in file order, keyed by
/// the byte offset of the offending record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Byte offset of the record in the input file
    pub offset: u64,
    /// Type code of the record, as extracted
    pub type_code: String,
    /// Anomaly classification
    pub kind: DiagnosticKind,
    /// Field name for field-scoped failures
    pub field: Option<String>,
    /// Human-readable detail
    pub detail: String,
}

impl Diagnostic {
    /// Diagnostic for a type code absent from the registry
    pub fn unrecognized_type(offset: u64, type_code: impl Into<String>) -> Self {
        let type_code = type_code.into();
        Self {
            detail: format!("no schema registered for type code '{type_code}'"),
            offset,
            type_code,
            kind: DiagnosticKind::UnrecognizedType,
            field: None,
        }
    }

    /// Diagnostic for a field-scoped decode failure
    pub fn field_failure(
        offset: u64,
        type_code: impl Into<String>,
        field: impl Into<String>,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            offset,
            type_code: type_code.into(),
            kind: DiagnosticKind::FieldDecodeFailure,
            field: Some(field.into()),
            detail: detail.into(),
        }
    }

    /// Diagnostic for a record dropped under the record-fatal policy
    pub fn record_dropped(offset: u64, type_code: impl Into<String>, failures: usize) -> Self {
        Self {
            offset,
            type_code: type_code.into(),
            kind: DiagnosticKind::RecordDropped,
            field: None,
            detail: format!("record dropped: {failures} field decode failure(s)"),
        }
    }
}
