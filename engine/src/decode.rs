//! `decode <text>`: base64 or 8-bit binary octets to text.

use base64::{Engine as _, engine::general_purpose::STANDARD};

use crate::error::CommandError;

/// Which encoding a payload was read as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    Binary,
    Base64,
}

impl Encoding {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Encoding::Binary => "binary",
            Encoding::Base64 => "base64",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    pub encoding: Encoding,
    pub text: String,
}

/// Decode `input`, trying binary octets first and then padded base64.
pub fn decode(input: &str) -> Result<Decoded, CommandError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(CommandError::MissingArgument("decode <text>"));
    }

    let (encoding, bytes) = if let Some(bytes) = binary_octets(input) {
        (Encoding::Binary, bytes)
    } else {
        let compact: String = input.split_whitespace().collect();
        let bytes = STANDARD
            .decode(compact.as_bytes())
            .map_err(|_| CommandError::InvalidDecodeInput("not base64 or binary"))?;
        (Encoding::Base64, bytes)
    };

    let text = String::from_utf8(bytes)
        .map_err(|_| CommandError::InvalidDecodeInput("decoded bytes are not text"))?;
    if text.chars().any(|c| c.is_control() && !c.is_whitespace()) {
        return Err(CommandError::InvalidDecodeInput(
            "decoded text contains control characters",
        ));
    }
    if text.trim().is_empty() {
        return Err(CommandError::InvalidDecodeInput("decoded text is empty"));
    }

    Ok(Decoded { encoding, text })
}

/// `01001000 01101001` style input. Every token must be exactly eight bits.
fn binary_octets(input: &str) -> Option<Vec<u8>> {
    input
        .split_whitespace()
        .map(|token| {
            if token.len() == 8 && token.bytes().all(|b| b == b'0' || b == b'1') {
                u8::from_str_radix(token, 2).ok()
            } else {
                None
            }
        })
        .collect()
}
