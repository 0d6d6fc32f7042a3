//! Registry persistence layer
//!
//! The persisted form is an ordered JSON array of external shortcut
//! records, rewritten whole on every change. Decoding is all-or-nothing:
//! a malformed resource yields an error, never a partial list.

use core_types::Rgb565;
use serde::{Deserialize, Serialize};

/// One persisted external shortcut.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortcutRecord {
    pub name: String,
    pub path: String,
    pub color: Rgb565,
}

/// Serializes records to the persisted form
pub fn encode_records(records: &[ShortcutRecord]) -> Result<Vec<u8>, serde_json::Error> {
    serde_json::to_vec(records)
}

/// Parses the persisted form back into records
pub fn decode_records(bytes: &[u8]) -> Result<Vec<ShortcutRecord>, serde_json::Error> {
    serde_json::from_slice(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip() {
        let records = vec![
            ShortcutRecord {
                name: "Doom".to_string(),
                path: "/doom.bin".to_string(),
                color: Rgb565::new(0xF800),
            },
            ShortcutRecord {
                name: "Snake".to_string(),
                path: "/snake.bin".to_string(),
                color: Rgb565::new(0x07E0),
            },
        ];
        let bytes = encode_records(&records).unwrap();
        assert_eq!(decode_records(&bytes).unwrap(), records);
    }

    #[test]
    fn test_decode_rejects_malformed_document() {
        assert!(decode_records(b"{ not json").is_err());
        // an object where an array is expected is malformed too
        assert!(decode_records(b"{\"name\":\"x\"}").is_err());
    }

    #[test]
    fn test_decode_known_document() {
        let json = br#"[{"name":"Doom","path":"/doom.bin","color":63488}]"#;
        let records = decode_records(json).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].color, Rgb565::new(0xF800));
    }
}
