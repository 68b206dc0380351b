//! Field decoder for unload record payloads
//!
//! Given a byte slice and a field descriptor, produces a typed value.
//! Failures are always field-scoped: one bad field becomes a null cell and
//! a recorded failure, never a lost record.
//!
//! ## Architecture
//!
//! - [`ebcdic`] - CP500 transcoding for storage-collection text
//! - [`numeric`] - digit runs, big-endian binary, packed decimal
//! - [`dates`] - textual and packed julian calendar dates
//!
//! The entry point is [`decode_record`], which walks a schema's field list
//! and yields one cell per flattened column, aligned with
//! [`Schema::column_plan`](crate::app::services::schema_registry::Schema::column_plan).

pub mod dates;
pub mod ebcdic;
pub mod numeric;

#[cfg(test)]
pub mod tests;

use crate::app::models::{RecordFamily, Value};
use crate::app::services::schema_registry::{
    CountSource, FieldDef, FieldKind, FieldLen, FlagCoding, GroupField, ScalarKind, Schema,
};
use crate::constants::{FLAG_NO, FLAG_YES};

/// One field-scoped decode failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldFailure {
    pub field: String,
    pub detail: String,
}

/// A fully decoded record: one cell per flattened column of the schema,
/// plus any field-scoped failures encountered along the way.
#[derive(Debug, Clone)]
pub struct DecodedRecord {
    pub values: Vec<Option<Value>>,
    pub failures: Vec<FieldFailure>,
}

/// Decode every field of `schema` from `payload`.
///
/// The returned cells line up one-to-one with the schema's column plan.
/// A field whose bytes lie beyond the end of a short record, or whose
/// content does not conform to its kind, decodes to `None` and records a
/// failure; the rest of the record is unaffected.
pub fn decode_record(schema: &Schema, payload: &[u8], family: RecordFamily) -> DecodedRecord {
    let mut values = Vec::new();
    let mut failures = Vec::new();

    for field in schema.fields {
        match &field.kind {
            FieldKind::Scalar(kind) => {
                values.push(decode_cell(field, *kind, payload, family, &mut failures));
            }
            FieldKind::RepeatedGroup(group) => {
                let count = match group.count {
                    CountSource::Fixed(n) => n,
                    CountSource::Field { offset, len } => {
                        match slice(payload, offset, len).map(numeric::decode_binary) {
                            Some(Ok(n)) => n as usize,
                            Some(Err(detail)) => {
                                failures.push(FieldFailure {
                                    field: field.name.to_string(),
                                    detail: format!("occurrence count: {detail}"),
                                });
                                0
                            }
                            None => {
                                failures.push(FieldFailure {
                                    field: field.name.to_string(),
                                    detail: "occurrence count lies past the end of the record"
                                        .to_string(),
                                });
                                0
                            }
                        }
                    }
                };
                if count > group.max_occurs {
                    failures.push(FieldFailure {
                        field: field.name.to_string(),
                        detail: format!(
                            "declared {count} occurrences, layout allows {}",
                            group.max_occurs
                        ),
                    });
                }
                let decoded = count.min(group.max_occurs);
                for occurrence in 0..group.max_occurs {
                    for member in group.fields {
                        if occurrence < decoded {
                            let base = field.offset + occurrence * group.stride;
                            values.push(decode_group_cell(
                                member,
                                base,
                                occurrence + 1,
                                payload,
                                family,
                                &mut failures,
                            ));
                        } else {
                            values.push(None);
                        }
                    }
                }
            }
        }
    }

    DecodedRecord { values, failures }
}

/// Decode a single scalar kind from raw field bytes.
pub fn decode_scalar(
    kind: ScalarKind,
    bytes: &[u8],
    family: RecordFamily,
) -> Result<Option<Value>, String> {
    match kind {
        ScalarKind::FixedText => Ok(Some(Value::Text(transcode_trimmed(bytes, family)))),
        ScalarKind::Number => {
            let text = transcode_trimmed(bytes, family);
            numeric::decode_digits(&text).map(|opt| opt.map(Value::Int))
        }
        ScalarKind::Binary => numeric::decode_binary(bytes).map(|v| Some(Value::Int(v))),
        ScalarKind::PackedNumber => numeric::decode_packed(bytes).map(|v| Some(Value::Int(v))),
        ScalarKind::Date => match family {
            RecordFamily::SecurityUnload => {
                let text = transcode_trimmed(bytes, family);
                dates::decode_text_date(&text).map(|opt| opt.map(Value::Date))
            }
            RecordFamily::StorageCollection => {
                dates::decode_julian_date(bytes).map(|opt| opt.map(Value::Date))
            }
        },
        ScalarKind::Flag(coding) => decode_flag(coding, bytes, family),
    }
}

/// Transcode field bytes per the family's text encoding and trim the pad.
fn transcode_trimmed(bytes: &[u8], family: RecordFamily) -> String {
    let text = match family {
        RecordFamily::SecurityUnload => String::from_utf8_lossy(bytes).into_owned(),
        RecordFamily::StorageCollection => ebcdic::decode_cp500(bytes),
    };
    text.trim_end_matches(crate::constants::TEXT_PAD).to_string()
}

fn decode_flag(
    coding: FlagCoding,
    bytes: &[u8],
    family: RecordFamily,
) -> Result<Option<Value>, String> {
    match coding {
        FlagCoding::YesNo => {
            let code = transcode_trimmed(bytes, family);
            let code = code.trim().to_string();
            Ok(match code.as_str() {
                "" => None,
                "YES" | "Y" => Some(Value::Text(FLAG_YES.to_string())),
                "NO" | "N" => Some(Value::Text(FLAG_NO.to_string())),
                // unmapped codes surface as-is, no silent coercion
                _ => Some(Value::Text(code)),
            })
        }
        FlagCoding::Bit { mask } => {
            let byte = bytes
                .first()
                .ok_or_else(|| "empty flag byte".to_string())?;
            Ok(Some(Value::Bool((byte & mask) != 0)))
        }
        FlagCoding::Mapped { table } => {
            let byte = bytes
                .first()
                .ok_or_else(|| "empty flag byte".to_string())?;
            let text = table
                .iter()
                .find(|(code, _)| code == byte)
                .map(|(_, label)| (*label).to_string())
                // unmapped values surface as decimal text
                .unwrap_or_else(|| byte.to_string());
            Ok(Some(Value::Text(text)))
        }
    }
}

fn slice(payload: &[u8], offset: usize, len: usize) -> Option<&[u8]> {
    payload.get(offset..offset + len)
}

fn decode_cell(
    field: &FieldDef,
    kind: ScalarKind,
    payload: &[u8],
    family: RecordFamily,
    failures: &mut Vec<FieldFailure>,
) -> Option<Value> {
    let bytes = match field.len {
        FieldLen::Fixed(len) => slice(payload, field.offset, len),
        FieldLen::Prefixed { len_bytes, max } => {
            match slice(payload, field.offset, len_bytes).map(numeric::decode_binary) {
                Some(Ok(declared)) => {
                    let declared = declared as usize;
                    if declared > max {
                        failures.push(FieldFailure {
                            field: field.name.to_string(),
                            detail: format!("declared length {declared} exceeds maximum {max}"),
                        });
                    }
                    slice(payload, field.offset + len_bytes, declared.min(max))
                }
                Some(Err(detail)) => {
                    failures.push(FieldFailure {
                        field: field.name.to_string(),
                        detail: format!("length prefix: {detail}"),
                    });
                    return None;
                }
                None => None,
            }
        }
    };
    let Some(bytes) = bytes else {
        failures.push(FieldFailure {
            field: field.name.to_string(),
            detail: "field lies past the end of the record".to_string(),
        });
        return None;
    };
    match decode_scalar(kind, bytes, family) {
        Ok(value) => value,
        Err(detail) => {
            failures.push(FieldFailure {
                field: field.name.to_string(),
                detail,
            });
            None
        }
    }
}

fn decode_group_cell(
    member: &GroupField,
    base: usize,
    occurrence: usize,
    payload: &[u8],
    family: RecordFamily,
    failures: &mut Vec<FieldFailure>,
) -> Option<Value> {
    let name = format!("{}_{}", member.name, occurrence);
    let Some(bytes) = slice(payload, base + member.offset, member.len) else {
        failures.push(FieldFailure {
            field: name,
            detail: "occurrence lies past the end of the record".to_string(),
        });
        return None;
    };
    match decode_scalar(member.kind, bytes, family) {
        Ok(value) => value,
        Err(detail) => {
            failures.push(FieldFailure { field: name, detail });
            None
        }
    }
}
