//! DCOLLECT storage-collection record layouts
//!
//! Offsets are 0-based indices into the record payload (the bytes following
//! the embedded length field), matching the IBM DCOLLECT record-structure
//! documentation. Text fields are EBCDIC CP500; integers are big-endian
//! binary; dates are packed julian (yyyydddF).

use super::{
    CountSource, FieldDef, FieldKind, FieldLen, FlagCoding, GroupField, GroupLayout, ScalarKind,
    Schema, SchemaKey,
};
use crate::app::models::RecordFamily;

const fn key(type_code: &'static str) -> SchemaKey {
    SchemaKey {
        family: RecordFamily::StorageCollection,
        type_code,
        version: 1,
    }
}

const fn field(name: &'static str, offset: usize, len: usize, kind: ScalarKind) -> FieldDef {
    FieldDef {
        name,
        offset,
        len: FieldLen::Fixed(len),
        kind: FieldKind::Scalar(kind),
    }
}

const fn text(name: &'static str, offset: usize, len: usize) -> FieldDef {
    field(name, offset, len, ScalarKind::FixedText)
}

const fn binary(name: &'static str, offset: usize, len: usize) -> FieldDef {
    field(name, offset, len, ScalarKind::Binary)
}

const fn julian(name: &'static str, offset: usize) -> FieldDef {
    field(name, offset, crate::constants::STORAGE_DATE_LEN, ScalarKind::Date)
}

const fn bit(name: &'static str, offset: usize, mask: u8) -> FieldDef {
    field(name, offset, 1, ScalarKind::Flag(FlagCoding::Bit { mask }))
}

const fn mapped(name: &'static str, offset: usize, table: &'static [(u8, &'static str)]) -> FieldDef {
    field(name, offset, 1, ScalarKind::Flag(FlagCoding::Mapped { table }))
}

/// Text with a 2-byte binary length field immediately before it.
const fn prefixed_text(name: &'static str, offset: usize, max: usize) -> FieldDef {
    FieldDef {
        name,
        offset,
        len: FieldLen::Prefixed { len_bytes: 2, max },
        kind: FieldKind::Scalar(ScalarKind::FixedText),
    }
}

// ---------------------------------------------------------------------------
// 'D' — active data set records
// ---------------------------------------------------------------------------

const DATASET: &[FieldDef] = &[
    text("DCDDSNAM", 22, 44),
    bit("DCDRACFD", 67, 0x80),
    bit("DCDSMSM", 67, 0x40),
    bit("DCDTEMP", 67, 0x20),
    bit("DCDPDSE", 67, 0x10),
    bit("DCDGDS", 67, 0x08),
    bit("DCDREBLK", 67, 0x04),
    bit("DCDCHIND", 67, 0x02),
    bit("DCDCKDSI", 67, 0x01),
    bit("DCDNOVVR", 68, 0x80),
    bit("DCDINTCG", 68, 0x40),
    bit("DCDINICF", 68, 0x20),
    bit("DCDALLFG", 68, 0x08),
    bit("DCDUSEFG", 68, 0x04),
    bit("DCDSECFG", 68, 0x02),
    bit("DCDNMBFG", 68, 0x01),
    bit("DCDPDSEX", 69, 0x80),
    bit("DCDSTRP", 69, 0x40),
    bit("DCDDDMEX", 69, 0x20),
    bit("DCDCPOIT", 69, 0x10),
    bit("DCDGT64K", 69, 0x08),
    bit("DCDCMPTV", 69, 0x04),
    bit("DCDDSGIS", 72, 0x80),
    bit("DCDDSGPS", 72, 0x40),
    bit("DCDDSGDA", 72, 0x20),
    bit("DCDDSGPO", 72, 0x02),
    bit("DCDDSGU", 72, 0x01),
    bit("DCDDSGGS", 73, 0x80),
    bit("DCDDSGVS", 73, 0x08),
    bit("DCDRECFF", 74, 0x80),
    bit("DCDRECFV", 74, 0x40),
    bit("DCDRECFT", 74, 0x20),
    bit("DCDRECFB", 74, 0x10),
    bit("DCDRECFS", 74, 0x08),
    bit("DCDRECFA", 74, 0x04),
    bit("DCDRECFC", 74, 0x02),
    binary("DCDNMEXT", 75, 1),
    text("DCDVOLSR", 76, 6),
    binary("DCDBKLNG", 82, 2),
    binary("DCDLRECL", 84, 2),
    binary("DCDALLSP", 86, 4),
    binary("DCDUSESP", 90, 4),
    binary("DCDSCALL", 94, 4),
    binary("DCDNMBLK", 98, 4),
    julian("DCDCREDT", 102),
    julian("DCDEXPDT", 106),
    julian("DCDLSTRF", 110),
    text("DCDATCL", 132, 30),
    text("DCDSTGCL", 164, 30),
    text("DCDMGTCL", 196, 30),
    text("DCDSTGRP", 228, 30),
];

// ---------------------------------------------------------------------------
// 'V' — volume records
// ---------------------------------------------------------------------------

const VOLUME: &[FieldDef] = &[
    text("DCVVOLSR", 22, 6),
    binary("DCVPERCT", 33, 1),
    binary("DCVFRESP", 34, 4),
    binary("DCVALLOC", 38, 4),
    binary("DCVVLCAP", 42, 4),
    binary("DCVFRAGI", 46, 4),
    binary("DCVLGEXT", 50, 4),
    binary("DCVFREXT", 54, 4),
    binary("DCVFDSCB", 58, 4),
    binary("DCVFVIRS", 62, 4),
    text("DCVDVTYP", 66, 8),
    binary("DCVDVNUM", 74, 2),
    text("DCVSGTCL", 80, 30),
    text("DCVDPTYP", 110, 8),
    bit("DCVCYLMG", 119, 0x80),
];

// ---------------------------------------------------------------------------
// 'DC' — data class construct records
// ---------------------------------------------------------------------------

const RCORG_MAP: &[(u8, &str)] = &[
    (0, "NULL"),
    (1, "VSAM_KSDS"),
    (2, "VSAM_ESDS"),
    (3, "VSAM_RRDS"),
    (4, "VSAM_LDS"),
];

const RECFM_MAP: &[(u8, &str)] = &[
    (0, "NULL"),
    (1, "UNDEFINED"),
    (2, "VARIABLE"),
    (3, "VARIABLE_SPANNED"),
    (4, "VARIABLE_BLOCKED"),
    (5, "VARIABLE_BLOCKED_SPANNED"),
    (6, "FIXED"),
    (7, "FIXED_STANDARD"),
    (8, "FIXED_BLOCKED"),
    (9, "FIXED_BLOCKED_SPANNED"),
];

const AVREC_MAP: &[(u8, &str)] = &[
    (0, "NONE"),
    (1, "BYTES"),
    (2, "KILOBYTES"),
    (3, "MEGABYTES"),
];

const BIAS_MAP: &[(u8, &str)] = &[(0, "USER"), (1, "SYSTEM")];

const RMODE_MAP: &[(u8, &str)] = &[
    (0, "BLANK"),
    (1, "ALL"),
    (2, "BUFF"),
    (3, "CB"),
    (4, "NONE"),
];

/// Encryption key-label pair: a 2-byte label length, a 64-byte label name,
/// a key code byte, and a filler byte. Two occurrences, back to back.
const KEY_LABEL_FIELDS: &[GroupField] = &[
    GroupField { name: "DDCKLBL", offset: 0, len: 2, kind: ScalarKind::Binary },
    GroupField { name: "DDCKLBN", offset: 2, len: 64, kind: ScalarKind::FixedText },
    GroupField { name: "DDCKYCD", offset: 66, len: 1, kind: ScalarKind::Binary },
];

const KEY_LABEL_GROUP: GroupLayout = GroupLayout {
    count: CountSource::Fixed(2),
    stride: 68,
    max_occurs: 2,
    fields: KEY_LABEL_FIELDS,
};

const DATA_CLASS: &[FieldDef] = &[
    prefixed_text("DDCNAME", 22, 30),
    text("DDCUSER", 54, 8),
    text("DDCDATE", 62, 10),
    text("DDCTIME", 74, 8),
    text("DDCDESC", 82, 120),
    bit("DDCFRORG", 202, 0x80),
    bit("DDCFLREC", 202, 0x40),
    bit("DDCFRFM", 202, 0x20),
    bit("DDCFKLEN", 202, 0x10),
    bit("DDCFKOFF", 202, 0x08),
    bit("DDCFEXP", 202, 0x04),
    bit("DDCFRET", 202, 0x02),
    bit("DDCFPSP", 202, 0x01),
    bit("DDCFSSP", 203, 0x80),
    bit("DDCFDIR", 203, 0x40),
    bit("DDCFAUN", 203, 0x20),
    bit("DDCFAVR", 203, 0x10),
    bit("DDCFVOL", 203, 0x08),
    bit("DDCFCIS", 203, 0x04),
    bit("DDCFCIF", 203, 0x02),
    bit("DDCFCAF", 203, 0x01),
    bit("DDCFXREG", 204, 0x80),
    bit("DDCFXSYS", 204, 0x40),
    bit("DDCFIMBD", 204, 0x20),
    bit("DDCFRPLC", 204, 0x10),
    bit("DDCFCOMP", 204, 0x08),
    bit("DDCFMEDI", 204, 0x04),
    bit("DDCFRECT", 204, 0x02),
    bit("DDCFVEA", 204, 0x01),
    bit("DDCSPRLF", 205, 0x80),
    bit("DDCREDUS", 205, 0x40),
    bit("DDCRABS", 205, 0x20),
    bit("DDCFCT", 205, 0x10),
    bit("DDCBLMT", 205, 0x08),
    bit("DDCCFS", 205, 0x04),
    bit("DDCDVCS", 205, 0x02),
    bit("DDCFSCAL", 205, 0x01),
    mapped("DDCRCORG", 206, RCORG_MAP),
    mapped("DDCRECFM", 207, RECFM_MAP),
    bit("DDCBLK", 208, 0x80),
    bit("DDCSTSP", 208, 0x40),
    binary("DDCCNTL", 209, 1),
    binary("DDCRETPD", 210, 4),
    binary("DDCVOLCT", 214, 2),
    binary("DDCDSNTY", 216, 2),
    binary("DDCSPPRI", 218, 4),
    binary("DDCSPSEC", 222, 4),
    binary("DDCDIBLK", 226, 4),
    mapped("DDCAVREC", 230, AVREC_MAP),
    binary("DDCREDUC", 231, 1),
    mapped("DDCRBIAS", 232, BIAS_MAP),
    binary("DDCDVC", 233, 1),
    binary("DDCAUNIT", 234, 4),
    binary("DDCBSZLM", 238, 4),
    binary("DDCLRECL", 242, 4),
    binary("DDCCISZ", 246, 4),
    binary("DDCCIPCT", 250, 2),
    binary("DDCCAPCT", 252, 2),
    binary("DDCXREG", 254, 1),
    binary("DDCXSYS", 255, 1),
    bit("DDCIMBED", 256, 0x80),
    bit("DDCREPLC", 256, 0x40),
    binary("DDCKLEN", 257, 1),
    binary("DDCKOFF", 258, 2),
    binary("DDCLOGLN", 270, 2),
    text("DDCLOGID", 272, 26),
    FieldDef {
        name: "DDCKEYLABELS",
        offset: 330,
        len: FieldLen::Fixed(136),
        kind: FieldKind::RepeatedGroup(KEY_LABEL_GROUP),
    },
    mapped("DDCRMODE", 467, RMODE_MAP),
    prefixed_text("DDCDKLBN", 468, 64),
];

/// Every registered storage-collection schema.
pub static SCHEMAS: &[Schema] = &[
    Schema { key: key("D"), name: "D", min_len: 258, fields: DATASET },
    Schema { key: key("V"), name: "V", min_len: 120, fields: VOLUME },
    Schema { key: key("DC"), name: "DC", min_len: 534, fields: DATA_CLASS },
];
