//! quirks text codecs
//!
//! Conversions between text and bytes as the host runtime performs them.
//!
//! Features:
//! - `JsString`: text as 16-bit code units, `fromCharCode` / `charCodeAt`
//! - `escape`, `encodeURI`, `encodeURIComponent` and their inverses
//! - base64 (`btoa`, `atob`, and the UTF-8 server-side form)

pub mod base64;
mod js_string;
pub mod uri;

pub use base64::{Base64Alphabet, Base64Config};
pub use js_string::{JsString, from_char_codes};
pub use uri::{
    PercentPolicy, decode_uri, decode_uri_component, encode_uri, encode_uri_component, escape,
    unescape,
};

/// Text codec errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    /// Value outside the 16-bit code unit range
    #[error("code unit {value} is outside 0..=65535")]
    Range { value: u32 },

    /// Code unit index past the end of the string
    #[error("index {index} out of range for length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// Input that no encoding could have produced
    #[error("malformed input at {position}: {reason}")]
    Malformed { position: usize, reason: &'static str },

    /// `btoa` given a char that is not a single byte
    #[error("character {ch:?} is outside the Latin-1 range")]
    InvalidCharacter { ch: char },

    /// Lone surrogate where well-formed UTF-16 is required
    #[error("unpaired surrogate at code unit {index}")]
    UnpairedSurrogate { index: usize },
}

pub type Result<T> = std::result::Result<T, CodecError>;
