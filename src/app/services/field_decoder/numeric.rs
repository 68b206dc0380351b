//! Numeric field decoding
//!
//! Three encodings appear across the unload families: textual digit runs
//! (security unload), big-endian unsigned binary integers (storage
//! collection), and packed decimal with the sign in the low nibble.

/// Decode a textual digit run with an optional leading sign.
///
/// An empty (all-blank) field is absent, not an error. Any non-digit
/// content is a field-scoped decode failure.
pub fn decode_digits(text: &str) -> Result<Option<i64>, String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    let digits = trimmed
        .strip_prefix(['+', '-'])
        .unwrap_or(trimmed);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(format!("non-digit content '{trimmed}'"));
    }
    trimmed
        .parse::<i64>()
        .map(Some)
        .map_err(|_| format!("digit run '{trimmed}' exceeds the signed 64-bit range"))
}

/// Decode a big-endian unsigned binary integer of 1-8 bytes.
pub fn decode_binary(bytes: &[u8]) -> Result<i64, String> {
    if bytes.is_empty() || bytes.len() > 8 {
        return Err(format!("binary field of {} bytes is unsupported", bytes.len()));
    }
    let mut value: u64 = 0;
    for &b in bytes {
        value = (value << 8) | u64::from(b);
    }
    i64::try_from(value).map_err(|_| "binary value exceeds the signed 64-bit range".to_string())
}

/// Decode packed decimal: two digits per byte, sign in the low nibble of
/// the last byte (0xD negative; 0xA, 0xC, 0xE, 0xF positive).
pub fn decode_packed(bytes: &[u8]) -> Result<i64, String> {
    if bytes.is_empty() || bytes.len() > 10 {
        return Err(format!("packed field of {} bytes is unsupported", bytes.len()));
    }
    let mut nibbles = Vec::with_capacity(bytes.len() * 2);
    for &b in bytes {
        nibbles.push(b >> 4);
        nibbles.push(b & 0x0F);
    }
    let sign = nibbles.pop().unwrap_or(0x0C);
    let negative = match sign {
        0x0D => true,
        0x0A | 0x0C | 0x0E | 0x0F => false,
        other => return Err(format!("invalid sign nibble 0x{other:X}")),
    };
    let mut value: i64 = 0;
    for nibble in nibbles {
        if nibble > 9 {
            return Err(format!("invalid digit nibble 0x{nibble:X}"));
        }
        value = value
            .checked_mul(10)
            .and_then(|v| v.checked_add(i64::from(nibble)))
            .ok_or_else(|| "packed value exceeds the signed 64-bit range".to_string())?;
    }
    Ok(if negative { -value } else { value })
}
