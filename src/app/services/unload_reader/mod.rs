//! Streaming record readers for unload files
//!
//! Splits an input file into discrete logical records without materializing
//! the whole file. Framing differs per family:
//!
//! - [`variable`] - security unloads: every record opens with a 4-byte
//!   descriptor (2-byte big-endian inclusive length + 2 reserved bytes)
//! - [`block`] - storage collections: the file is consumed in physical
//!   chunks and segmented by the embedded 2-byte inclusive length field
//!   that begins every sub-record
//!
//! Both readers validate declared lengths against the remaining file bytes
//! and fail with a framing error carrying the offending record's byte
//! offset; offsets after a framing failure cannot be trusted, so there is
//! no resynchronization.

pub mod block;
pub mod variable;

#[cfg(test)]
pub mod tests;

use std::io::Read;
use std::path::Path;

use crate::app::models::{RawRecord, RecordFamily};
use crate::app::services::field_decoder::ebcdic;
use crate::constants::{SECURITY_TYPE_LEN, STORAGE_TYPE_RANGE};
use crate::{Error, Result};

pub use block::BlockRecordReader;
pub use variable::VariableRecordReader;

/// One framed record before type-code extraction.
#[derive(Debug, Clone)]
pub struct FramedRecord {
    pub payload: Vec<u8>,
    /// Byte offset of the record (framing included) in the file
    pub offset: u64,
    /// Bytes consumed from the file, framing included
    pub consumed: u64,
}

/// Family-dispatching record reader.
pub enum UnloadReader {
    Security(VariableRecordReader),
    Storage(BlockRecordReader),
}

impl UnloadReader {
    /// Open a reader at the start of the file.
    pub fn open(path: &Path, family: RecordFamily) -> Result<Self> {
        Self::open_at(path, family, 0)
    }

    /// Open a reader positioned at an arbitrary byte offset. The offset must
    /// fall on a record boundary; it is used to resume a pass without
    /// re-decoding prior bytes.
    pub fn open_at(path: &Path, family: RecordFamily, offset: u64) -> Result<Self> {
        match family {
            RecordFamily::SecurityUnload => {
                VariableRecordReader::open_at(path, offset).map(Self::Security)
            }
            RecordFamily::StorageCollection => {
                BlockRecordReader::open_at(path, offset).map(Self::Storage)
            }
        }
    }

    pub fn family(&self) -> RecordFamily {
        match self {
            Self::Security(_) => RecordFamily::SecurityUnload,
            Self::Storage(_) => RecordFamily::StorageCollection,
        }
    }

    /// Yield the next record, or `None` at a clean end of file.
    pub fn next_record(&mut self) -> Result<Option<RawRecord>> {
        let family = self.family();
        let framed = match self {
            Self::Security(reader) => reader.next_record()?,
            Self::Storage(reader) => reader.next_record()?,
        };
        framed.map(|framed| classify(framed, family)).transpose()
    }
}

/// Extract the type code per the family's convention.
fn classify(framed: FramedRecord, family: RecordFamily) -> Result<RawRecord> {
    let type_code = match family {
        RecordFamily::SecurityUnload => {
            if framed.payload.len() < SECURITY_TYPE_LEN {
                return Err(Error::framing(
                    framed.offset,
                    "record too short to carry a type code",
                ));
            }
            String::from_utf8_lossy(&framed.payload[..SECURITY_TYPE_LEN])
                .trim()
                .to_string()
        }
        RecordFamily::StorageCollection => {
            if framed.payload.len() < STORAGE_TYPE_RANGE.end {
                return Err(Error::framing(
                    framed.offset,
                    "record too short to carry a type code",
                ));
            }
            ebcdic::decode_cp500(&framed.payload[STORAGE_TYPE_RANGE])
                .trim()
                .to_string()
        }
    };
    Ok(RawRecord {
        payload: framed.payload,
        offset: framed.offset,
        type_code,
        consumed: framed.consumed,
    })
}

/// Read until the buffer is full or the stream ends; returns bytes read.
pub(super) fn read_full<R: Read>(reader: &mut R, buf: &mut [u8]) -> std::io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..])? {
            0 => break,
            n => filled += n,
        }
    }
    Ok(filled)
}
