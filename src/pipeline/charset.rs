//! Encoding normalization: arbitrary markup bytes in, UTF-8 out.
//!
//! Markup arrives in whatever encoding the producing tool felt like using.
//! The downstream HTML renderer wants exactly one thing: valid UTF-8 with no
//! byte-order mark. Normalization runs in four steps:
//!
//! 1. sniff a window of up to the first 512 bytes against a fixed BOM
//!    heuristic table;
//! 2. prefer a `charset=` parameter declared inside the window, fall back to
//!    the sniffed charset, fall back to UTF-8;
//! 3. transcode the full stream — the sniffed window is replayed, never
//!    dropped — to UTF-8;
//! 4. strip exactly one leading UTF-8 byte-order mark if present.
//!
//! Unknown charset labels fail with [`ExtractError::UnsupportedEncoding`];
//! read failures propagate as [`ExtractError::Io`].

use crate::error::ExtractError;
use encoding_rs::Encoding;
use once_cell::sync::Lazy;
use regex::Regex;
use std::io::Read;
use tracing::debug;

/// Size of the sniff window, matching common content-type sniffers.
const SNIFF_WINDOW: usize = 512;

/// Fixed heuristic table: byte-order marks and the charset they imply.
/// Longest prefix first so the UTF-8 mark is not shadowed by `FF FE`/`FE FF`.
const BOM_TABLE: &[(&[u8], &str)] = &[
    (&[0xEF, 0xBB, 0xBF], "utf-8"),
    (&[0xFE, 0xFF], "utf-16be"),
    (&[0xFF, 0xFE], "utf-16le"),
];

/// Declared charset parameter inside the sniff window, e.g.
/// `<meta charset="gbk">` or `content="text/html; charset=iso-8859-1"`.
static RE_DECLARED_CHARSET: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?i)charset\s*=\s*["']?([A-Za-z0-9._:-]+)"#).unwrap());

/// Read a markup byte stream and return its content as UTF-8 text.
///
/// The declared charset wins over the sniffed one; absent both, UTF-8 is
/// assumed. The leading byte-order mark, if any, is removed.
pub fn normalize_to_utf8<R: Read>(mut source: R) -> Result<String, ExtractError> {
    // Sniff window first, then the remainder; both are decoded, so the
    // window is replayed rather than consumed.
    let mut data = Vec::with_capacity(SNIFF_WINDOW);
    let mut window = [0u8; SNIFF_WINDOW];
    let mut filled = 0;
    while filled < SNIFF_WINDOW {
        let n = source.read(&mut window[filled..])?;
        if n == 0 {
            break;
        }
        filled += n;
    }
    data.extend_from_slice(&window[..filled]);
    source.read_to_end(&mut data)?;

    let declared = declared_charset(&data[..filled]);
    let label = declared
        .as_deref()
        .or_else(|| sniffed_charset(&data[..filled]))
        .unwrap_or("utf-8");

    let encoding = Encoding::for_label(label.as_bytes()).ok_or_else(|| {
        ExtractError::UnsupportedEncoding {
            label: label.to_string(),
        }
    })?;
    debug!("normalizing {} bytes from charset '{}'", data.len(), encoding.name());

    let (text, _had_errors) = encoding.decode_without_bom_handling(&data);
    let text = text.into_owned();
    Ok(match text.strip_prefix('\u{feff}') {
        Some(stripped) => stripped.to_string(),
        None => text,
    })
}

/// Charset implied by a byte-order mark at the start of the window.
fn sniffed_charset(window: &[u8]) -> Option<&'static str> {
    BOM_TABLE
        .iter()
        .find(|(bom, _)| window.starts_with(bom))
        .map(|&(_, label)| label)
}

/// Charset declared in a `charset=` parameter within the window, if any.
fn declared_charset(window: &[u8]) -> Option<String> {
    // The window may cut a multi-byte sequence or contain undecoded legacy
    // bytes; a lossy view is fine because the declaration itself is ASCII.
    let head = String::from_utf8_lossy(window);
    RE_DECLARED_CHARSET
        .captures(&head)
        .map(|caps| caps[1].to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_utf8_passes_through() {
        let text = normalize_to_utf8("<p>héllo</p>".as_bytes()).unwrap();
        assert_eq!(text, "<p>héllo</p>");
    }

    #[test]
    fn utf8_bom_is_stripped_once() {
        let mut bytes = vec![0xEF, 0xBB, 0xBF];
        bytes.extend_from_slice("<p>x</p>".as_bytes());
        let text = normalize_to_utf8(bytes.as_slice()).unwrap();
        assert_eq!(text, "<p>x</p>");
        assert!(!text.contains('\u{feff}'));
    }

    #[test]
    fn utf16le_bom_is_transcoded() {
        let mut bytes = vec![0xFF, 0xFE];
        for unit in "<p>ab</p>".encode_utf16() {
            bytes.extend_from_slice(&unit.to_le_bytes());
        }
        let text = normalize_to_utf8(bytes.as_slice()).unwrap();
        assert_eq!(text, "<p>ab</p>");
    }

    #[test]
    fn utf16be_bom_is_transcoded() {
        let mut bytes = vec![0xFE, 0xFF];
        for unit in "hi".encode_utf16() {
            bytes.extend_from_slice(&unit.to_be_bytes());
        }
        assert_eq!(normalize_to_utf8(bytes.as_slice()).unwrap(), "hi");
    }

    #[test]
    fn declared_charset_wins() {
        let html = r#"<meta charset="iso-8859-1"><p>caf\xe9</p>"#;
        let mut bytes = html.as_bytes().to_vec();
        // Replace the escape placeholder with the actual latin-1 byte.
        let pos = html.find(r"\xe9").unwrap();
        bytes.splice(pos..pos + 4, [0xE9]);
        let text = normalize_to_utf8(bytes.as_slice()).unwrap();
        assert!(text.contains("café"), "got: {text}");
    }

    #[test]
    fn unknown_declared_charset_fails() {
        let html = r#"<meta charset="x-no-such-charset"><p>x</p>"#;
        let err = normalize_to_utf8(html.as_bytes()).unwrap_err();
        assert!(
            matches!(err, ExtractError::UnsupportedEncoding { ref label } if label == "x-no-such-charset"),
            "got: {err:?}"
        );
    }

    #[test]
    fn sniff_window_is_replayed_not_dropped() {
        // Content longer than the window: the head must still be present.
        let mut html = String::from("<p>start</p>");
        html.push_str(&"x".repeat(2 * SNIFF_WINDOW));
        let text = normalize_to_utf8(html.as_bytes()).unwrap();
        assert!(text.starts_with("<p>start</p>"));
        assert_eq!(text.len(), html.len());
    }

    #[test]
    fn empty_input_is_empty_output() {
        assert_eq!(normalize_to_utf8(&b""[..]).unwrap(), "");
    }
}
