//! JsString
//!
//! Host strings are sequences of 16-bit code units and may hold unpaired
//! surrogates, which a Rust `String` cannot.

use std::fmt;

use crate::{CodecError, Result};

/// Text as UTF-16 code units
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct JsString {
    units: Vec<u16>,
}

/// `String.fromCharCode(..)`
pub fn from_char_codes(codes: &[u32]) -> Result<JsString> {
    JsString::from_char_codes(codes)
}

impl JsString {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_units(units: Vec<u16>) -> Self {
        Self { units }
    }

    /// Concatenate code units; every value must fit in 16 bits
    pub fn from_char_codes(codes: &[u32]) -> Result<Self> {
        let units = codes
            .iter()
            .map(|&value| u16::try_from(value).map_err(|_| CodecError::Range { value }))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { units })
    }

    pub fn len(&self) -> usize { self.units.len() }
    pub fn is_empty(&self) -> bool { self.units.is_empty() }
    pub fn as_units(&self) -> &[u16] { &self.units }
    pub fn into_units(self) -> Vec<u16> { self.units }

    /// `charCodeAt(index)`
    pub fn char_code_at(&self, index: usize) -> Result<u16> {
        self.units
            .get(index)
            .copied()
            .ok_or(CodecError::IndexOutOfRange { index, len: self.units.len() })
    }

    /// `charAt(index)`, the single code unit at `index`
    pub fn char_at(&self, index: usize) -> Result<JsString> {
        self.char_code_at(index).map(|unit| Self { units: vec![unit] })
    }

    /// Index of the first surrogate without a partner
    pub fn first_unpaired_surrogate(&self) -> Option<usize> {
        let mut index = 0;
        for decoded in char::decode_utf16(self.units.iter().copied()) {
            match decoded {
                Ok(c) => index += c.len_utf16(),
                Err(_) => return Some(index),
            }
        }
        None
    }

    /// Decode, replacing unpaired surrogates with U+FFFD
    pub fn to_string_lossy(&self) -> String {
        String::from_utf16_lossy(&self.units)
    }
}

impl From<&str> for JsString {
    fn from(s: &str) -> Self {
        Self { units: s.encode_utf16().collect() }
    }
}

impl From<String> for JsString {
    fn from(s: String) -> Self {
        Self::from(s.as_str())
    }
}

impl From<char> for JsString {
    fn from(c: char) -> Self {
        let mut buf = [0u16; 2];
        Self { units: c.encode_utf16(&mut buf).to_vec() }
    }
}

impl TryFrom<&JsString> for String {
    type Error = CodecError;

    fn try_from(s: &JsString) -> Result<String> {
        match s.first_unpaired_surrogate() {
            Some(index) => Err(CodecError::UnpairedSurrogate { index }),
            None => Ok(s.to_string_lossy()),
        }
    }
}

impl TryFrom<JsString> for String {
    type Error = CodecError;

    fn try_from(s: JsString) -> Result<String> {
        String::try_from(&s)
    }
}

impl PartialEq<str> for JsString {
    fn eq(&self, other: &str) -> bool {
        self.units.iter().copied().eq(other.encode_utf16())
    }
}

impl PartialEq<&str> for JsString {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

impl fmt::Display for JsString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_lossy())
    }
}
