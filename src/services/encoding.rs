use std::fs;
use std::path::Path;

use chardetng::EncodingDetector;
use encoding_rs::Encoding;

use crate::error::{ArbError, Result};

/// Reads a file as text, honoring a byte-order mark.
pub fn read_text(path: &Path) -> Result<String> {
    let bytes = fs::read(path)?;
    decode_bytes(&bytes)
}

/// UTF-8/UTF-16 BOM first, then plain UTF-8, then the `chardetng` guess.
pub fn decode_bytes(bytes: &[u8]) -> Result<String> {
    if let Some((encoding, bom_len)) = Encoding::for_bom(bytes) {
        return decode_with(encoding, &bytes[bom_len..]);
    }

    if let Ok(text) = std::str::from_utf8(bytes) {
        return Ok(text.to_string());
    }

    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    let encoding = detector.guess(None, true);

    tracing::debug!("input is not UTF-8, decoding as {}", encoding.name());

    decode_with(encoding, bytes)
}

fn decode_with(encoding: &'static Encoding, bytes: &[u8]) -> Result<String> {
    let (text, had_errors) = encoding.decode_without_bom_handling(bytes);
    if had_errors {
        return Err(ArbError::format(format!(
            "text is not valid {}",
            encoding.name()
        )));
    }
    Ok(text.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_utf8_bom() {
        let mut bytes = vec![0xEF, 0xBB, 0xBF];
        bytes.extend_from_slice(br#"{"a":"b"}"#);
        assert_eq!(decode_bytes(&bytes).unwrap(), r#"{"a":"b"}"#);
    }

    #[test]
    fn decodes_utf16le_with_bom() {
        let mut bytes = vec![0xFF, 0xFE];
        for unit in r#"{"k":"ü"}"#.encode_utf16() {
            bytes.extend_from_slice(&unit.to_le_bytes());
        }
        assert_eq!(decode_bytes(&bytes).unwrap(), r#"{"k":"ü"}"#);
    }

    #[test]
    fn plain_utf8_passes_through() {
        assert_eq!(decode_bytes("héllo".as_bytes()).unwrap(), "héllo");
    }

    #[test]
    fn legacy_latin_text_is_detected() {
        let sentence = "Le café est très chaud à midi, même en été. ";
        let repeated = sentence.repeat(8);
        let (bytes, _, _) = encoding_rs::WINDOWS_1252.encode(&repeated);
        let text = decode_bytes(&bytes).unwrap();
        assert!(text.contains("café"));
    }
}
