// Base64-wrapped upload payloads

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::error::SheetError;

/// Decode a base64 payload as stored by binary form fields.
///
/// Line breaks and other ASCII whitespace are ignored, as MIME-style encoders
/// wrap at 76 columns.
pub fn decode_base64(payload: &[u8]) -> Result<Vec<u8>, SheetError> {
    let compact: Vec<u8> = payload.iter().copied().filter(|b| !b.is_ascii_whitespace()).collect();
    STANDARD.decode(&compact).map_err(|e| SheetError::Base64(e.to_string()))
}
