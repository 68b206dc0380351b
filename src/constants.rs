//! Application constants for the unload processor
//!
//! Framing geometry, field encoding sentinels, and default values shared
//! across the reader, decoder, and CLI layers.

// =============================================================================
// Record Framing
// =============================================================================

/// Size of the record descriptor preceding every security-unload record:
/// a 2-byte big-endian length (inclusive of the descriptor) plus 2 reserved
/// bytes, the z/OS RECFM=VB record descriptor word.
pub const RECORD_DESCRIPTOR_LEN: usize = 4;

/// Maximum physical chunk consumed per read by the storage-collection block
/// reader. Matches the BLKSIZE the DCOLLECT job allocates for its output
/// dataset (RECFM=VB,BLKSIZE=27998).
pub const STORAGE_BLOCK_SIZE: usize = 27_998;

/// Size of the embedded sub-record length field that begins every
/// storage-collection record (inclusive of itself).
pub const STORAGE_LENGTH_FIELD_LEN: usize = 2;

/// Byte range of the type code within a storage-collection record payload
/// (two filler bytes precede it).
pub const STORAGE_TYPE_RANGE: std::ops::Range<usize> = 2..4;

/// Length of the numeric type code opening every security-unload record.
pub const SECURITY_TYPE_LEN: usize = 4;

// =============================================================================
// Field Encoding
// =============================================================================

/// Pad character trimmed from the right of fixed-width text fields.
pub const TEXT_PAD: char = ' ';

/// Textual date layout used by the security-unload family.
pub const SECURITY_DATE_FORMAT: &str = "%Y-%m-%d";

/// Width of a textual security-unload date field.
pub const SECURITY_DATE_LEN: usize = 10;

/// Width of a packed julian (yyyydddF) storage-collection date field.
pub const STORAGE_DATE_LEN: usize = 4;

/// Canonical affirmative/negative flag texts in security-unload records.
pub const FLAG_YES: &str = "YES";
pub const FLAG_NO: &str = "NO";

// =============================================================================
// CLI Defaults
// =============================================================================

/// Poll interval for the CLI progress display, in milliseconds.
pub const PROGRESS_POLL_MS: u64 = 100;
