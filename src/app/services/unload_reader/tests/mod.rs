//! Record reader test suite, with fixture writers shared by both framings


use std::io::Write;

use tempfile::NamedTempFile;

use crate::app::services::field_decoder::ebcdic::encode_cp500;
use crate::constants::RECORD_DESCRIPTOR_LEN;

/// Frame a security-unload payload with its record descriptor.
pub fn frame_security(payload: &[u8]) -> Vec<u8> {
    let declared = (payload.len() + RECORD_DESCRIPTOR_LEN) as u16;
    let mut framed = Vec::with_capacity(payload.len() + RECORD_DESCRIPTOR_LEN);
    framed.extend_from_slice(&declared.to_be_bytes());
    framed.extend_from_slice(&[0, 0]);
    framed.extend_from_slice(payload);
    framed
}

/// Frame a storage-collection payload with its embedded length field.
pub fn frame_storage(payload: &[u8]) -> Vec<u8> {
    let declared = (payload.len() + 2) as u16;
    let mut framed = Vec::with_capacity(payload.len() + 2);
    framed.extend_from_slice(&declared.to_be_bytes());
    framed.extend_from_slice(payload);
    framed
}

/// Storage payload skeleton: two filler bytes, then the EBCDIC type code.
pub fn storage_payload(type_code: &str, body_len: usize) -> Vec<u8> {
    let mut payload = vec![0u8; 2];
    let mut code = encode_cp500(type_code);
    code.resize(2, 0x40); // blank-pad the code field
    payload.extend_from_slice(&code);
    payload.extend(std::iter::repeat_n(0x40, body_len));
    payload
}

/// Write framed bytes to a temp file.
pub fn write_fixture(chunks: &[Vec<u8>]) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    for chunk in chunks {
        file.write_all(chunk).expect("write fixture");
    }
    file.flush().expect("flush fixture");
    file
}
