//! Fixed-block record reader (storage collections)
//!
//! The file is consumed in physical chunks of at most one block and
//! logically segmented by the 2-byte big-endian length field (inclusive of
//! itself) that begins every sub-record. Records may straddle chunk
//! boundaries; the carry buffer preserves the remainder between reads.

use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;

use tracing::debug;

use super::FramedRecord;
use crate::constants::{STORAGE_BLOCK_SIZE, STORAGE_LENGTH_FIELD_LEN};
use crate::{Error, Result};

pub struct BlockRecordReader {
    file: File,
    /// Buffered bytes not yet segmented into records
    buf: Vec<u8>,
    /// Read position within `buf`
    pos: usize,
    /// File offset of `buf[0]`
    base_offset: u64,
    eof: bool,
}

impl BlockRecordReader {
    /// Open a reader at the start of the file.
    pub fn open(path: &Path) -> Result<Self> {
        Self::open_at(path, 0)
    }

    /// Open a reader positioned at a record boundary.
    pub fn open_at(path: &Path, offset: u64) -> Result<Self> {
        let mut file = File::open(path)
            .map_err(|e| Error::io(format!("failed to open '{}'", path.display()), e))?;
        if offset > 0 {
            file.seek(SeekFrom::Start(offset))
                .map_err(|e| Error::io(format!("failed to seek to offset {offset}"), e))?;
        }
        debug!("opened storage collection '{}' at offset {}", path.display(), offset);
        Ok(Self {
            file,
            buf: Vec::with_capacity(STORAGE_BLOCK_SIZE),
            pos: 0,
            base_offset: offset,
            eof: false,
        })
    }

    fn available(&self) -> usize {
        self.buf.len() - self.pos
    }

    /// Pull more chunks until `needed` bytes are buffered or the file ends.
    fn fill(&mut self, needed: usize) -> Result<()> {
        while self.available() < needed && !self.eof {
            if self.pos > 0 {
                self.buf.drain(..self.pos);
                self.base_offset += self.pos as u64;
                self.pos = 0;
            }
            let mut chunk = vec![0u8; STORAGE_BLOCK_SIZE];
            let read = self.file.read(&mut chunk)?;
            if read == 0 {
                self.eof = true;
            } else {
                self.buf.extend_from_slice(&chunk[..read]);
            }
        }
        Ok(())
    }

    /// Yield the next framed record, or `None` at a clean end of file.
    pub fn next_record(&mut self) -> Result<Option<FramedRecord>> {
        self.fill(STORAGE_LENGTH_FIELD_LEN)?;
        let record_offset = self.base_offset + self.pos as u64;
        match self.available() {
            0 => return Ok(None),
            n if n < STORAGE_LENGTH_FIELD_LEN => {
                return Err(Error::framing(record_offset, "truncated record length field"));
            }
            _ => {}
        }

        let declared = usize::from(u16::from_be_bytes([
            self.buf[self.pos],
            self.buf[self.pos + 1],
        ]));
        if declared < STORAGE_LENGTH_FIELD_LEN {
            return Err(Error::framing(
                record_offset,
                format!("declared record length {declared} is smaller than its length field"),
            ));
        }

        self.fill(declared)?;
        if self.available() < declared {
            return Err(Error::framing(
                record_offset,
                format!(
                    "declared record length {declared} exceeds the {} remaining file bytes",
                    self.available()
                ),
            ));
        }

        let payload = self.buf[self.pos + STORAGE_LENGTH_FIELD_LEN..self.pos + declared].to_vec();
        self.pos += declared;
        Ok(Some(FramedRecord {
            payload,
            offset: record_offset,
            consumed: declared as u64,
        }))
    }
}
