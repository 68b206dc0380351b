//! Length-prefixed variable record reader (security unloads)
//!
//! Every record opens with a record descriptor: a 2-byte big-endian length
//! inclusive of the 4-byte descriptor itself, then 2 reserved bytes. The
//! declared length is validated against the remaining file bytes before the
//! payload is handed out.

use std::fs::File;
use std::io::{BufReader, Seek, SeekFrom};
use std::path::Path;

use tracing::debug;

use super::{read_full, FramedRecord};
use crate::constants::RECORD_DESCRIPTOR_LEN;
use crate::{Error, Result};

pub struct VariableRecordReader {
    reader: BufReader<File>,
    /// File offset of the next record descriptor
    offset: u64,
}

impl VariableRecordReader {
    /// Open a reader at the start of the file.
    pub fn open(path: &Path) -> Result<Self> {
        Self::open_at(path, 0)
    }

    /// Open a reader positioned at a record boundary.
    pub fn open_at(path: &Path, offset: u64) -> Result<Self> {
        let file = File::open(path)
            .map_err(|e| Error::io(format!("failed to open '{}'", path.display()), e))?;
        let mut reader = BufReader::new(file);
        if offset > 0 {
            reader
                .seek(SeekFrom::Start(offset))
                .map_err(|e| Error::io(format!("failed to seek to offset {offset}"), e))?;
        }
        debug!("opened security unload '{}' at offset {}", path.display(), offset);
        Ok(Self { reader, offset })
    }

    /// Yield the next framed record, or `None` at a clean end of file.
    pub fn next_record(&mut self) -> Result<Option<FramedRecord>> {
        let mut descriptor = [0u8; RECORD_DESCRIPTOR_LEN];
        let filled = read_full(&mut self.reader, &mut descriptor)?;
        if filled == 0 {
            return Ok(None);
        }
        if filled < RECORD_DESCRIPTOR_LEN {
            return Err(Error::framing(self.offset, "truncated record descriptor"));
        }

        let declared = usize::from(u16::from_be_bytes([descriptor[0], descriptor[1]]));
        if declared < RECORD_DESCRIPTOR_LEN {
            return Err(Error::framing(
                self.offset,
                format!("declared record length {declared} is smaller than its descriptor"),
            ));
        }

        let payload_len = declared - RECORD_DESCRIPTOR_LEN;
        let mut payload = vec![0u8; payload_len];
        let filled = read_full(&mut self.reader, &mut payload)?;
        if filled < payload_len {
            return Err(Error::framing(
                self.offset,
                format!(
                    "declared record length {declared} exceeds the {} remaining file bytes",
                    RECORD_DESCRIPTOR_LEN + filled
                ),
            ));
        }

        let record = FramedRecord {
            payload,
            offset: self.offset,
            consumed: declared as u64,
        };
        self.offset += declared as u64;
        Ok(Some(record))
    }
}
