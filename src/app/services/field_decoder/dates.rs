//! Date field decoding
//!
//! Security-unload dates are textual `yyyy-mm-dd`; storage-collection dates
//! are 4-byte packed julian `yyyydddF`. In both representations an all-zero
//! or all-blank pattern means "no date" and decodes to the explicit absent
//! value, never to some epoch.

use chrono::NaiveDate;

use crate::constants::SECURITY_DATE_FORMAT;

/// Decode a textual `yyyy-mm-dd` date field.
pub fn decode_text_date(text: &str) -> Result<Option<NaiveDate>, String> {
    let trimmed = text.trim();
    if trimmed.is_empty() || trimmed.bytes().all(|b| b == b'0' || b == b'-') {
        return Ok(None);
    }
    NaiveDate::parse_from_str(trimmed, SECURITY_DATE_FORMAT)
        .map(Some)
        .map_err(|e| format!("invalid date '{trimmed}': {e}"))
}

/// Decode a 4-byte packed julian date (`yyyydddF`): seven digit nibbles —
/// four-digit year, three-digit day of year — and a sign nibble that is
/// not inspected.
///
/// An all-zero field or a zero day of year is an absent date.
pub fn decode_julian_date(bytes: &[u8]) -> Result<Option<NaiveDate>, String> {
    if bytes.len() != 4 {
        return Err(format!("julian date field of {} bytes, expected 4", bytes.len()));
    }
    let mut digits = [0u8; 7];
    for (i, digit) in digits.iter_mut().enumerate() {
        let byte = bytes[i / 2];
        let nibble = if i % 2 == 0 { byte >> 4 } else { byte & 0x0F };
        if nibble > 9 {
            return Err(format!("invalid digit nibble 0x{nibble:X} in julian date"));
        }
        *digit = nibble;
    }
    let year = i32::from(digits[0]) * 1000
        + i32::from(digits[1]) * 100
        + i32::from(digits[2]) * 10
        + i32::from(digits[3]);
    let ordinal = u32::from(digits[4]) * 100 + u32::from(digits[5]) * 10 + u32::from(digits[6]);
    if ordinal == 0 {
        // covers the all-zero pattern and year-only placeholders
        return Ok(None);
    }
    NaiveDate::from_yo_opt(year, ordinal)
        .map(Some)
        .ok_or_else(|| format!("invalid julian date {year:04}.{ordinal:03}"))
}

/// Encode a date as packed julian bytes with a positive sign nibble.
///
/// Counterpart of [`decode_julian_date`], used by synthetic-record tooling.
pub fn encode_julian_date(date: Option<NaiveDate>) -> [u8; 4] {
    use chrono::Datelike;
    match date {
        None => [0, 0, 0, 0],
        Some(d) => {
            let year = d.year().clamp(0, 9999) as u32;
            let ordinal = d.ordinal();
            let packed: u32 = year * 1000 + ordinal;
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
    }
}
