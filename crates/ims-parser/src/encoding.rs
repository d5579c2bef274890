//! Conversion of the raw feed bytes to UTF-8.
//!
//! IMS serves its feeds as ISO-8859-8 (Hebrew). The converted document keeps
//! its XML declaration but with `encoding="UTF-8"`, so it can be saved and
//! re-read as plain UTF-8.

use encoding_rs::Encoding;
use tracing::{debug, info};

use crate::error::{ParseError, Result};

/// Encoding assumed when the document carries no declaration.
pub const DEFAULT_FEED_ENCODING: &str = "ISO-8859-8";

/// Bytes of the `<?xml ... ?>` prolog, if present.
fn prolog(raw: &[u8]) -> Option<&[u8]> {
    if !raw.starts_with(b"<?xml") {
        return None;
    }
    let end = raw.windows(2).position(|w| w == b"?>")?;
    Some(&raw[..end])
}

/// Byte range of the encoding label inside the prolog.
fn encoding_label_range(prolog: &[u8]) -> Option<(usize, usize)> {
    let key = prolog.windows(8).position(|w| w == b"encoding")?;
    let rest = &prolog[key + 8..];
    let quote_offset = rest.iter().position(|b| *b == b'"' || *b == b'\'')?;
    let quote = rest[quote_offset];
    let start = key + 8 + quote_offset + 1;
    let len = prolog[start..].iter().position(|b| *b == quote)?;
    Some((start, start + len))
}

/// Encoding label from the XML declaration, e.g. `ISO-8859-8`.
pub fn declared_encoding(raw: &[u8]) -> Option<String> {
    let prolog = prolog(raw)?;
    let (start, end) = encoding_label_range(prolog)?;
    Some(String::from_utf8_lossy(&prolog[start..end]).into_owned())
}

/// Decode a raw feed and rewrite its declaration to UTF-8.
pub fn to_utf8(raw: &[u8]) -> Result<String> {
    let label = declared_encoding(raw).unwrap_or_else(|| DEFAULT_FEED_ENCODING.to_string());
    let encoding = Encoding::for_label(label.as_bytes())
        .ok_or_else(|| ParseError::Encoding(format!("unknown encoding label '{}'", label)))?;

    let text = encoding
        .decode_without_bom_handling_and_without_replacement(raw)
        .ok_or_else(|| {
            ParseError::Encoding(format!("input is not valid {}", encoding.name()))
        })?;
    info!(encoding = encoding.name(), bytes = raw.len(), "Decoded feed");

    Ok(rewrite_declaration(&text))
}

/// Replace the declared encoding with UTF-8, leaving the rest untouched.
pub fn rewrite_declaration(xml: &str) -> String {
    let Some(prolog) = prolog(xml.as_bytes()) else {
        return xml.to_string();
    };
    let Some((start, end)) = encoding_label_range(prolog) else {
        return xml.to_string();
    };

    debug!(from = &xml[start..end], "Rewriting XML encoding declaration");
    format!("{}UTF-8{}", &xml[..start], &xml[end..])
}
