//! Finished digests and their text encodings

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use quirks_text::{Base64Config, base64};

use crate::{HashAlgorithm, HashError};

/// How `digest(enc)` renders the bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DigestEncoding {
    Hex,
    Base64,
    Base64Url,
    /// One char per byte, U+0000..=U+00FF
    Latin1,
}

impl FromStr for DigestEncoding {
    type Err = HashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "hex" => Ok(Self::Hex),
            "base64" => Ok(Self::Base64),
            "base64url" => Ok(Self::Base64Url),
            "latin1" | "binary" => Ok(Self::Latin1),
            _ => Err(HashError::UnknownEncoding(s.to_string())),
        }
    }
}

/// Output of a finished hash
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Digest {
    algorithm: HashAlgorithm,
    bytes: Vec<u8>,
}

impl Digest {
    pub(crate) fn new(algorithm: HashAlgorithm, bytes: Vec<u8>) -> Self {
        Self { algorithm, bytes }
    }

    pub fn algorithm(&self) -> HashAlgorithm { self.algorithm }
    pub fn as_bytes(&self) -> &[u8] { &self.bytes }
    pub fn into_bytes(self) -> Vec<u8> { self.bytes }

    /// Lower-case hex
    pub fn hex(&self) -> String {
        const HEX: &[u8; 16] = b"0123456789abcdef";
        let mut out = String::with_capacity(self.bytes.len() * 2);
        for &b in &self.bytes {
            out.push(HEX[(b >> 4) as usize] as char);
            out.push(HEX[(b & 0x0f) as usize] as char);
        }
        out
    }

    pub fn base64(&self) -> String {
        base64::encode(&self.bytes)
    }

    pub fn encode(&self, encoding: DigestEncoding) -> String {
        match encoding {
            DigestEncoding::Hex => self.hex(),
            DigestEncoding::Base64 => self.base64(),
            DigestEncoding::Base64Url => Base64Config::URL_SAFE.encode(&self.bytes),
            DigestEncoding::Latin1 => self.bytes.iter().copied().map(char::from).collect(),
        }
    }
}

impl AsRef<[u8]> for Digest {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.hex())
    }
}
