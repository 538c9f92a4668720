//! Percent Encoding
//!
//! The three host policies. They differ in which ASCII characters pass
//! through unescaped and in where the escaped bytes come from:
//!
//! | policy | extra unescaped | non-ASCII source |
//! |---|---|---|
//! | `escape` | `@*_+-./` | UTF-16 code unit (`%XX` or `%uXXXX`) |
//! | `encodeURI` | `-_.!~*'()` and `;/?:@&=+$,#` | UTF-8 bytes |
//! | `encodeURIComponent` | `-_.!~*'()` | UTF-8 bytes |

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{CodecError, JsString, Result};

const HEX: &[u8; 16] = b"0123456789ABCDEF";

/// Left alone by `escape`
const ESCAPE_SAFE: &[u8] = b"@*_+-./";
/// Unreserved marks, left alone by both URI encoders
const URI_MARKS: &[u8] = b"-_.!~*'()";
/// Reserved characters, left alone by `encodeURI` and kept escaped by `decodeURI`
const URI_RESERVED: &[u8] = b";/?:@&=+$,#";

/// Which percent-encoding rules to apply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PercentPolicy {
    /// `escape` / `unescape`
    Legacy,
    /// `encodeURI` / `decodeURI`
    Uri,
    /// `encodeURIComponent` / `decodeURIComponent`
    #[default]
    UriComponent,
}

impl PercentPolicy {
    pub const ALL: [PercentPolicy; 3] = [Self::Legacy, Self::Uri, Self::UriComponent];

    /// Whether `c` passes through this policy's encoder untouched
    pub fn is_unescaped(&self, c: char) -> bool {
        if !c.is_ascii() {
            return false;
        }
        let b = c as u8;
        if b.is_ascii_alphanumeric() {
            return true;
        }
        match self {
            PercentPolicy::Legacy => ESCAPE_SAFE.contains(&b),
            PercentPolicy::Uri => URI_MARKS.contains(&b) || URI_RESERVED.contains(&b),
            PercentPolicy::UriComponent => URI_MARKS.contains(&b),
        }
    }

    pub fn encode(&self, input: &str) -> String {
        match self {
            PercentPolicy::Legacy => escape(input),
            PercentPolicy::Uri => encode_uri(input),
            PercentPolicy::UriComponent => encode_uri_component(input),
        }
    }

    /// Encode raw code units; the UTF-8 policies reject lone surrogates
    pub fn encode_units(&self, units: &[u16]) -> Result<String> {
        match self {
            PercentPolicy::Legacy => Ok(escape_units(units)),
            PercentPolicy::Uri | PercentPolicy::UriComponent => {
                let mut out = String::with_capacity(units.len() * 3);
                let mut index = 0;
                for decoded in char::decode_utf16(units.iter().copied()) {
                    let c = decoded.map_err(|_| CodecError::UnpairedSurrogate { index })?;
                    index += c.len_utf16();
                    self.push_utf8(&mut out, c);
                }
                Ok(out)
            }
        }
    }

    pub fn decode(&self, input: &str) -> Result<String> {
        match self {
            PercentPolicy::Legacy => String::try_from(unescape(input)),
            PercentPolicy::Uri => decode_uri(input),
            PercentPolicy::UriComponent => decode_uri_component(input),
        }
    }

    /// Host function implementing the encoder
    pub fn name(&self) -> &'static str {
        match self {
            PercentPolicy::Legacy => "escape",
            PercentPolicy::Uri => "encodeURI",
            PercentPolicy::UriComponent => "encodeURIComponent",
        }
    }

    fn push_utf8(&self, out: &mut String, c: char) {
        if self.is_unescaped(c) {
            out.push(c);
            return;
        }
        let mut buf = [0u8; 4];
        for &byte in c.encode_utf8(&mut buf).as_bytes() {
            push_byte_escape(out, byte);
        }
    }

    fn encode_chars(&self, input: &str) -> String {
        let mut out = String::with_capacity(input.len() * 3);
        for c in input.chars() {
            self.push_utf8(&mut out, c);
        }
        out
    }
}

impl fmt::Display for PercentPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn push_byte_escape(out: &mut String, byte: u8) {
    out.push('%');
    out.push(HEX[(byte >> 4) as usize] as char);
    out.push(HEX[(byte & 0x0f) as usize] as char);
}

fn hex_value(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

// ============================================================================
// escape / unescape
// ============================================================================

/// `escape(s)`
pub fn escape(input: &str) -> String {
    let units: Vec<u16> = input.encode_utf16().collect();
    escape_units(&units)
}

/// `escape` over raw code units; lone surrogates become `%uD800` etc.
pub fn escape_units(units: &[u16]) -> String {
    let mut out = String::with_capacity(units.len() * 3);
    for &unit in units {
        if unit < 0x80 && PercentPolicy::Legacy.is_unescaped(unit as u8 as char) {
            out.push(unit as u8 as char);
        } else if unit < 0x100 {
            push_byte_escape(&mut out, unit as u8);
        } else {
            out.push_str("%u");
            for shift in [12, 8, 4, 0] {
                out.push(HEX[((unit >> shift) & 0x0f) as usize] as char);
            }
        }
    }
    out
}

/// `unescape(s)`. Never fails: anything that is not `%XX` or `%uXXXX` is
/// copied through as-is.
pub fn unescape(input: &str) -> JsString {
    let units: Vec<u16> = input.encode_utf16().collect();
    let hex = |i: usize| units.get(i).and_then(|&u| u8::try_from(u).ok()).and_then(hex_value);

    let mut out = Vec::with_capacity(units.len());
    let mut i = 0;
    while i < units.len() {
        let unit = units[i];
        if unit == u16::from(b'%') {
            if units.get(i + 1) == Some(&u16::from(b'u')) {
                let digits = (hex(i + 2), hex(i + 3), hex(i + 4), hex(i + 5));
                if let (Some(a), Some(b), Some(c), Some(d)) = digits {
                    let unit = u16::from(a) << 12 | u16::from(b) << 8 | u16::from(c) << 4;
                    out.push(unit | u16::from(d));
                    i += 6;
                    continue;
                }
            }
            if let (Some(a), Some(b)) = (hex(i + 1), hex(i + 2)) {
                out.push(u16::from(a << 4 | b));
                i += 3;
                continue;
            }
        }
        out.push(unit);
        i += 1;
    }
    JsString::from_units(out)
}

// ============================================================================
// encodeURI / decodeURI
// ============================================================================

/// `encodeURI(s)`
pub fn encode_uri(input: &str) -> String {
    PercentPolicy::Uri.encode_chars(input)
}

/// `encodeURIComponent(s)`
pub fn encode_uri_component(input: &str) -> String {
    PercentPolicy::UriComponent.encode_chars(input)
}

/// `decodeURI(s)`. Escapes of reserved characters stay escaped.
pub fn decode_uri(input: &str) -> Result<String> {
    decode_utf8_escapes(input, URI_RESERVED)
}

/// `decodeURIComponent(s)`
pub fn decode_uri_component(input: &str) -> Result<String> {
    decode_utf8_escapes(input, &[])
}

fn malformed(position: usize, reason: &'static str) -> CodecError {
    tracing::debug!(position, reason, "rejected percent-encoded input");
    CodecError::Malformed { position, reason }
}

/// Read the `%XX` at `pos`
fn escaped_byte(bytes: &[u8], pos: usize) -> Result<u8> {
    if bytes.get(pos) != Some(&b'%') {
        return Err(malformed(pos, "expected '%'"));
    }
    let digit = |at: usize| bytes.get(at).and_then(|&b| hex_value(b));
    match (digit(pos + 1), digit(pos + 2)) {
        (Some(hi), Some(lo)) => Ok(hi << 4 | lo),
        _ => Err(malformed(pos, "'%' not followed by two hex digits")),
    }
}

fn decode_utf8_escapes(input: &str, keep_escaped: &[u8]) -> Result<String> {
    let bytes = input.as_bytes();
    let mut out = String::with_capacity(bytes.len());
    let mut copied_from = 0;
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] != b'%' {
            i += 1;
            continue;
        }
        out.push_str(&input[copied_from..i]);
        let start = i;
        let lead = escaped_byte(bytes, i)?;
        i += 3;

        if lead < 0x80 {
            if keep_escaped.contains(&lead) {
                out.push_str(&input[start..i]);
            } else {
                out.push(lead as char);
            }
            copied_from = i;
            continue;
        }

        let width = match lead {
            0xC2..=0xDF => 2,
            0xE0..=0xEF => 3,
            0xF0..=0xF4 => 4,
            _ => return Err(malformed(start, "invalid UTF-8 lead byte")),
        };
        let mut seq = [lead, 0, 0, 0];
        for slot in seq.iter_mut().take(width).skip(1) {
            let byte = escaped_byte(bytes, i)?;
            if byte & 0xC0 != 0x80 {
                return Err(malformed(i, "invalid UTF-8 continuation byte"));
            }
            *slot = byte;
            i += 3;
        }
        let decoded = std::str::from_utf8(&seq[..width])
            .map_err(|_| malformed(start, "overlong or surrogate UTF-8 sequence"))?;
        out.push_str(decoded);
        copied_from = i;
    }

    out.push_str(&input[copied_from..]);
    Ok(out)
}
