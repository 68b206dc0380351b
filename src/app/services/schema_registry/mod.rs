//! Schema registry for unload record layouts
//!
//! A static mapping from (record family, type code, version) to an ordered
//! list of field descriptors. Layouts are declarative const tables — one row
//! per field — so supporting a new record type means adding a table, never
//! writing per-field code.
//!
//! ## Architecture
//!
//! - [`security`] - IRRDBU00 record layouts (groups, users, datasets, general resources)
//! - [`storage`] - DCOLLECT record layouts (data sets, volumes, data classes)
//!
//! The registry is assembled once on first use and is immutable for the
//! process lifetime. Lookup never fails hard: an unknown type code returns
//! `None`, which dispatch treats as a per-record classification outcome.

pub mod security;
pub mod storage;

#[cfg(test)]
pub mod tests;

use std::collections::HashMap;
use std::sync::LazyLock;

use crate::app::models::RecordFamily;
use crate::config::VersionSelection;

/// How many bytes a field occupies in the record payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldLen {
    /// Fixed width
    Fixed(usize),
    /// A binary length field of `len_bytes` immediately precedes the data;
    /// decoded data is capped at `max` bytes
    Prefixed { len_bytes: usize, max: usize },
}

/// Family-specific flag codings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagCoding {
    /// Textual YES/NO codes (security unload); unmapped codes surface raw
    YesNo,
    /// Single bit within a flag byte (storage collection)
    Bit { mask: u8 },
    /// Coded byte mapped to a small enumeration; unmapped values surface
    /// as decimal text
    Mapped { table: &'static [(u8, &'static str)] },
}

/// Scalar decode kinds; the variant fixes the resulting column type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarKind {
    /// Fixed-width text, transcoded and right-trimmed
    FixedText,
    /// Textual digit run with optional sign
    Number,
    /// Big-endian unsigned binary integer (1-8 bytes)
    Binary,
    /// Packed decimal, sign in the low nibble
    PackedNumber,
    /// Calendar date; all-zero / all-blank decodes to absent
    Date,
    /// Flag per the family coding
    Flag(FlagCoding),
}

/// Where a repeated group's occurrence count comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountSource {
    /// The layout declares a fixed occurrence count
    Fixed(usize),
    /// A binary count field at this payload offset
    Field { offset: usize, len: usize },
}

/// One field inside a repeated group occurrence; `offset` is relative to
/// the start of the occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupField {
    pub name: &'static str,
    pub offset: usize,
    pub len: usize,
    pub kind: ScalarKind,
}

/// Layout of a counted, fixed-stride repeated group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupLayout {
    pub count: CountSource,
    pub stride: usize,
    /// Upper bound on occurrences; defines the flattened column set
    pub max_occurs: usize,
    pub fields: &'static [GroupField],
}

/// Decode kind of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Scalar(ScalarKind),
    RepeatedGroup(GroupLayout),
}

/// One field of a record layout. Order within a schema defines column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDef {
    pub name: &'static str,
    /// 0-based byte offset from the start of the record payload
    pub offset: usize,
    pub len: FieldLen,
    pub kind: FieldKind,
}

/// Identity of one schema version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SchemaKey {
    pub family: RecordFamily,
    pub type_code: &'static str,
    pub version: u8,
}

/// A versioned record layout.
#[derive(Debug)]
pub struct Schema {
    pub key: SchemaKey,
    /// Well-known identifier for the record type (table name)
    pub name: &'static str,
    /// Minimum payload length this layout requires
    pub min_len: usize,
    pub fields: &'static [FieldDef],
}

/// Column type of a flattened table column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Text,
    Int,
    Date,
    Bool,
}

/// Name and type of one flattened table column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSpec {
    pub name: String,
    pub dtype: ColumnType,
}

fn scalar_column_type(kind: ScalarKind) -> ColumnType {
    match kind {
        ScalarKind::FixedText => ColumnType::Text,
        ScalarKind::Number | ScalarKind::Binary | ScalarKind::PackedNumber => ColumnType::Int,
        ScalarKind::Date => ColumnType::Date,
        ScalarKind::Flag(FlagCoding::Bit { .. }) => ColumnType::Bool,
        ScalarKind::Flag(_) => ColumnType::Text,
    }
}

impl Schema {
    /// The flattened column set this layout produces, in declaration order.
    ///
    /// Repeated groups expand occurrence-major into numbered columns
    /// (`NAME_1`, `NAME_2`, ...) up to the layout's `max_occurs`.
    pub fn column_plan(&self) -> Vec<ColumnSpec> {
        let mut plan = Vec::new();
        for field in self.fields {
            match &field.kind {
                FieldKind::Scalar(kind) => plan.push(ColumnSpec {
                    name: field.name.to_string(),
                    dtype: scalar_column_type(*kind),
                }),
                FieldKind::RepeatedGroup(group) => {
                    for occurrence in 1..=group.max_occurs {
                        for member in group.fields {
                            plan.push(ColumnSpec {
                                name: format!("{}_{}", member.name, occurrence),
                                dtype: scalar_column_type(member.kind),
                            });
                        }
                    }
                }
            }
        }
        plan
    }
}

type FamilyMap = HashMap<&'static str, Vec<&'static Schema>>;
type RegistryMap = HashMap<RecordFamily, FamilyMap>;

/// All registered schemas, grouped by family then type code and sorted by
/// ascending version. Built once, never mutated.
static REGISTRY: LazyLock<RegistryMap> = LazyLock::new(|| {
    let mut map: RegistryMap = HashMap::new();
    for schema in security::SCHEMAS.iter().chain(storage::SCHEMAS.iter()) {
        map.entry(schema.key.family)
            .or_default()
            .entry(schema.key.type_code)
            .or_default()
            .push(schema);
    }
    for family in map.values_mut() {
        for versions in family.values_mut() {
            versions.sort_by_key(|schema| schema.key.version);
        }
    }
    map
});

fn versions_of(family: RecordFamily, type_code: &str) -> Option<&'static Vec<&'static Schema>> {
    REGISTRY.get(&family)?.get(type_code)
}

/// Look up the schema for a record, selecting a version per the heuristic.
///
/// `LongestFitting` picks the highest version whose minimum layout length
/// fits the payload, falling back to the oldest version when none fits
/// (a degraded decode beats a lost record). `Newest` always picks the
/// highest registered version. Unknown type codes return `None` — a
/// classification outcome, not an error.
pub fn lookup(
    family: RecordFamily,
    type_code: &str,
    payload_len: usize,
    selection: VersionSelection,
) -> Option<&'static Schema> {
    let versions = versions_of(family, type_code)?;
    match selection {
        VersionSelection::Newest => versions.last().copied(),
        VersionSelection::LongestFitting => versions
            .iter()
            .rev()
            .find(|schema| schema.min_len <= payload_len)
            .copied()
            .or_else(|| versions.first().copied()),
    }
}

/// The newest registered schema version for a type code.
///
/// The flattened column set of a table is always derived from the newest
/// version, so rows decoded under older versions pad their missing trailing
/// columns with nulls.
pub fn newest(family: RecordFamily, type_code: &str) -> Option<&'static Schema> {
    versions_of(family, type_code).and_then(|versions| versions.last().copied())
}

/// All (type code, well-known name) pairs registered for a family,
/// sorted by type code.
pub fn known_types(family: RecordFamily) -> Vec<(&'static str, &'static str)> {
    let mut types: Vec<(&'static str, &'static str)> = REGISTRY
        .get(&family)
        .into_iter()
        .flatten()
        .filter_map(|(code, versions)| versions.last().map(|s| (*code, s.name)))
        .collect();
    types.sort_by_key(|(code, _)| *code);
    types
}

/// Resolve a type code or well-known name to its canonical type code.
pub fn resolve_type(family: RecordFamily, code_or_name: &str) -> Option<&'static str> {
    if let Some(versions) = versions_of(family, code_or_name) {
        return versions.first().map(|schema| schema.key.type_code);
    }
    REGISTRY
        .get(&family)?
        .iter()
        .find(|(_, versions)| versions.iter().any(|s| s.name == code_or_name))
        .map(|(code, _)| *code)
}

/// The well-known name for a type code, if registered.
pub fn name_for(family: RecordFamily, type_code: &str) -> Option<&'static str> {
    newest(family, type_code).map(|schema| schema.name)
}
