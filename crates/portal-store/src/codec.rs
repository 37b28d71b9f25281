//! Reversible password obfuscation
//!
//! The password is kept base64-encoded at rest so it does not sit in
//! the config file as plain text. This is obfuscation against casual
//! inspection only, NOT encryption: the settings editor decodes the
//! stored value back into the visible field, so the encoding must stay
//! reversible.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

/// Encode a password for storage. Total: never fails for any input.
pub fn encode(plain: &str) -> String {
    STANDARD.encode(plain.as_bytes())
}

/// Decode a stored password.
///
/// Malformed input (invalid base64 or non-UTF-8 payload) yields the
/// empty string, which callers treat the same as "no password saved".
pub fn decode(stored: &str) -> String {
    match STANDARD.decode(stored.as_bytes()) {
        Ok(bytes) => String::from_utf8(bytes).unwrap_or_default(),
        Err(_) => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        for plain in ["Secret#1", "a", "päss wörd", "日本語", "sp ace\ttab"] {
            assert_eq!(decode(&encode(plain)), plain);
        }
    }

    #[test]
    fn test_empty_round_trip() {
        assert_eq!(encode(""), "");
        assert_eq!(decode(""), "");
    }

    #[test]
    fn test_decode_invalid_base64() {
        assert_eq!(decode("not base64 at all!!"), "");
        assert_eq!(decode("===="), "");
    }

    #[test]
    fn test_decode_invalid_utf8() {
        // 0xFF is never valid UTF-8
        let stored = STANDARD.encode([0xFFu8, 0xFE, 0xFD]);
        assert_eq!(decode(&stored), "");
    }
}
