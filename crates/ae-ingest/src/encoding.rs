//! Byte-level encoding detection for source exports.
//!
//! EDC systems hand over a mix of UTF-8 and Latin-1 files. UTF-8 wins
//! whenever the bytes validate as such; otherwise Latin-1 is accepted
//! unless the bytes contain control characters that no text export
//! produces, in which case the file is rejected rather than silently
//! mangled.

use tracing::debug;

/// Encodings the loader will accept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    Utf8,
    Latin1,
}

impl Encoding {
    pub fn as_str(&self) -> &'static str {
        match self {
            Encoding::Utf8 => "UTF-8",
            Encoding::Latin1 => "Latin-1",
        }
    }
}

/// Outcome of sniffing a byte buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncodingDetection {
    Detected(Encoding),
    Failed { reason: String },
}

fn is_disallowed_control(byte: u8) -> bool {
    matches!(byte, 0x00..=0x08 | 0x0B | 0x0C | 0x0E..=0x1F)
}

/// Sniff the buffer. UTF-8 is tried first; Latin-1 is the fallback for
/// any byte sequence free of non-text control bytes (tab, LF and CR
/// stay allowed).
pub fn detect_encoding(bytes: &[u8]) -> EncodingDetection {
    if std::str::from_utf8(bytes).is_ok() {
        return EncodingDetection::Detected(Encoding::Utf8);
    }
    if let Some(position) = bytes.iter().position(|byte| is_disallowed_control(*byte)) {
        return EncodingDetection::Failed {
            reason: format!(
                "byte 0x{:02X} at offset {position} is not valid in UTF-8 or Latin-1 text",
                bytes[position]
            ),
        };
    }
    debug!("input is not UTF-8, falling back to Latin-1");
    EncodingDetection::Detected(Encoding::Latin1)
}

/// Decode the buffer with a known encoding. Latin-1 maps each byte to
/// the code point of the same value, so it never fails.
pub fn decode(bytes: &[u8], encoding: Encoding) -> String {
    match encoding {
        Encoding::Utf8 => String::from_utf8_lossy(bytes).into_owned(),
        Encoding::Latin1 => bytes.iter().map(|byte| char::from(*byte)).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_ascii_detects_as_utf8() {
        let detection = detect_encoding(b"STUDYID,USUBJID\nABC-001,101\n");
        assert_eq!(detection, EncodingDetection::Detected(Encoding::Utf8));
    }

    #[test]
    fn multibyte_utf8_detects_as_utf8() {
        let detection = detect_encoding("AETERM,Sjögren\n".as_bytes());
        assert_eq!(detection, EncodingDetection::Detected(Encoding::Utf8));
    }

    #[test]
    fn high_bytes_fall_back_to_latin1() {
        // 0xE9 is é in Latin-1 but an invalid UTF-8 lead byte here.
        let detection = detect_encoding(b"AETERM\nc\xE9phal\xE9e\n");
        assert_eq!(detection, EncodingDetection::Detected(Encoding::Latin1));
    }

    #[test]
    fn control_bytes_fail_detection() {
        let detection = detect_encoding(b"AETERM\x00\xE9\n");
        match detection {
            EncodingDetection::Failed { reason } => {
                assert!(reason.contains("0x00"));
            }
            other => panic!("expected detection failure, got {other:?}"),
        }
    }

    #[test]
    fn tab_and_newlines_do_not_fail_latin1() {
        let detection = detect_encoding(b"AETERM\tAESEV\r\n\xE9\tMILD\r\n");
        assert_eq!(detection, EncodingDetection::Detected(Encoding::Latin1));
    }

    #[test]
    fn latin1_decode_maps_bytes_to_code_points() {
        assert_eq!(decode(b"c\xE9phal\xE9e", Encoding::Latin1), "céphalée");
    }

    #[test]
    fn utf8_decode_round_trips() {
        let text = "Sjögren syndrome";
        assert_eq!(decode(text.as_bytes(), Encoding::Utf8), text);
    }
}
