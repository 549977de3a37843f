//! Value-to-byte encoding for pattern construction.
//!
//! The target image stores its numeric fields little-endian, so every encoder
//! normalizes to little-endian regardless of host byte order. Patterns and
//! replacements are always built from known values; nothing is ever decoded
//! back.

/// Encode a 32-bit integer as little-endian bytes
pub fn encode_i32(value: i32) -> [u8; 4] {
    value.to_le_bytes()
}

/// Encode a 32-bit float as little-endian bytes
pub fn encode_f32(value: f32) -> [u8; 4] {
    value.to_le_bytes()
}

/// Encode a 64-bit float as little-endian bytes
pub fn encode_f64(value: f64) -> [u8; 8] {
    value.to_le_bytes()
}

/// Encode a single 16-bit character unit as little-endian bytes
pub fn encode_u16(value: u16) -> [u8; 2] {
    value.to_le_bytes()
}

/// Encode text as 2-byte-per-unit UTF-16LE, the string encoding the target
/// image uses for embedded labels
pub fn encode_utf16(text: &str) -> Vec<u8> {
    text.encode_utf16().flat_map(encode_u16).collect()
}

/// Concatenate i32 encodings into one search pattern
pub fn merge_i32(values: &[i32]) -> Vec<u8> {
    values.iter().flat_map(|v| v.to_le_bytes()).collect()
}

/// Concatenate f32 encodings into one search pattern
pub fn merge_f32(values: &[f32]) -> Vec<u8> {
    values.iter().flat_map(|v| v.to_le_bytes()).collect()
}
