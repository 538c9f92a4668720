//! Base64 (RFC 4648)
//!
//! Encoding always emits complete groups. Decoding follows the forgiving
//! rules browsers use for `atob`: ASCII whitespace is skipped, padding is
//! optional, but a dangling single character or anything outside the
//! alphabet is rejected.

use serde::{Deserialize, Serialize};

use crate::{CodecError, Result};

const STANDARD: &[u8; 64] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";
const URL_SAFE: &[u8; 64] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_";

const INVALID: u8 = 0xff;

const fn decode_table(alphabet: &[u8; 64]) -> [u8; 256] {
    let mut table = [INVALID; 256];
    let mut i = 0;
    while i < 64 {
        table[alphabet[i] as usize] = i as u8;
        i += 1;
    }
    table
}

const STANDARD_DECODE: [u8; 256] = decode_table(STANDARD);
const URL_SAFE_DECODE: [u8; 256] = decode_table(URL_SAFE);

/// 64-character alphabet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Base64Alphabet {
    /// `A-Z a-z 0-9 + /`
    #[default]
    Standard,
    /// `A-Z a-z 0-9 - _`
    UrlSafe,
}

impl Base64Alphabet {
    fn symbols(&self) -> &'static [u8; 64] {
        match self {
            Base64Alphabet::Standard => STANDARD,
            Base64Alphabet::UrlSafe => URL_SAFE,
        }
    }

    fn decode_table(&self) -> &'static [u8; 256] {
        match self {
            Base64Alphabet::Standard => &STANDARD_DECODE,
            Base64Alphabet::UrlSafe => &URL_SAFE_DECODE,
        }
    }
}

/// Alphabet and padding choice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Base64Config {
    pub alphabet: Base64Alphabet,
    /// Emit trailing `=`. Decoding accepts input with or without it.
    pub padding: bool,
}

impl Default for Base64Config {
    fn default() -> Self {
        Self::STANDARD
    }
}

impl Base64Config {
    pub const STANDARD: Self = Self { alphabet: Base64Alphabet::Standard, padding: true };
    /// What `Buffer#toString("base64url")` produces
    pub const URL_SAFE: Self = Self { alphabet: Base64Alphabet::UrlSafe, padding: false };

    pub fn encode(&self, data: &[u8]) -> String {
        let symbols = self.alphabet.symbols();
        let mut result = String::with_capacity(data.len().div_ceil(3) * 4);

        for chunk in data.chunks(3) {
            let b0 = chunk[0];
            let b1 = chunk.get(1).copied().unwrap_or(0);
            let b2 = chunk.get(2).copied().unwrap_or(0);

            result.push(symbols[(b0 >> 2) as usize] as char);
            result.push(symbols[((b0 & 0x03) << 4 | (b1 >> 4)) as usize] as char);

            if chunk.len() > 1 {
                result.push(symbols[((b1 & 0x0f) << 2 | (b2 >> 6)) as usize] as char);
            } else if self.padding {
                result.push('=');
            }

            if chunk.len() > 2 {
                result.push(symbols[(b2 & 0x3f) as usize] as char);
            } else if self.padding {
                result.push('=');
            }
        }

        result
    }

    pub fn decode(&self, input: &str) -> Result<Vec<u8>> {
        let table = self.alphabet.decode_table();

        // (position in input, byte) with whitespace removed
        let mut data: Vec<(usize, u8)> = input
            .bytes()
            .enumerate()
            .filter(|(_, b)| !matches!(b, b' ' | b'\t' | b'\n' | b'\x0c' | b'\r'))
            .collect();

        if data.len() % 4 == 0 {
            for _ in 0..2 {
                if data.last().is_some_and(|&(_, b)| b == b'=') {
                    data.pop();
                }
            }
        }

        if data.len() % 4 == 1 {
            let position = data.last().map_or(0, |&(pos, _)| pos);
            tracing::debug!(len = data.len(), "base64 input has a dangling character");
            return Err(CodecError::Malformed { position, reason: "length is 1 more than a multiple of 4" });
        }

        let mut out = Vec::with_capacity(data.len() * 3 / 4);
        let mut acc: u32 = 0;
        let mut bits: u32 = 0;

        for (position, b) in data {
            let value = table[b as usize];
            if value == INVALID {
                tracing::debug!(position, "base64 input has a character outside the alphabet");
                return Err(CodecError::Malformed { position, reason: "character outside the base64 alphabet" });
            }
            acc = (acc << 6) | u32::from(value);
            bits += 6;
            if bits >= 8 {
                bits -= 8;
                out.push((acc >> bits) as u8);
                acc &= (1 << bits) - 1;
            }
        }

        Ok(out)
    }
}

/// Standard padded encoding
pub fn encode(data: &[u8]) -> String {
    Base64Config::STANDARD.encode(data)
}

/// Standard decoding
pub fn decode(input: &str) -> Result<Vec<u8>> {
    Base64Config::STANDARD.decode(input)
}

/// `btoa(s)`: every char must be a single Latin-1 byte
pub fn btoa(input: &str) -> Result<String> {
    let bytes = input
        .chars()
        .map(|ch| u8::try_from(ch).map_err(|_| CodecError::InvalidCharacter { ch }))
        .collect::<Result<Vec<u8>>>()?;
    Ok(encode(&bytes))
}

/// `atob(s)`: each decoded byte becomes the Latin-1 char of the same value
pub fn atob(input: &str) -> Result<String> {
    Ok(decode(input)?.into_iter().map(char::from).collect())
}

/// `Buffer.from(s).toString("base64")`
pub fn encode_str(input: &str) -> String {
    encode(input.as_bytes())
}

/// `Buffer.from(s, "base64").toString()`; invalid UTF-8 becomes U+FFFD
pub fn decode_to_string(input: &str) -> Result<String> {
    Ok(String::from_utf8_lossy(&decode(input)?).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hello_world() {
        assert_eq!(btoa("hello, world").unwrap(), "aGVsbG8sIHdvcmxk");
        assert_eq!(atob("aGVsbG8sIHdvcmxk").unwrap(), "hello, world");
        assert_eq!(encode_str("hello, world"), "aGVsbG8sIHdvcmxk");
        assert_eq!(decode_to_string("aGVsbG8sIHdvcmxk").unwrap(), "hello, world");
    }

    #[test]
    fn test_rfc4648_vectors() {
        let vectors = [
            ("", ""),
            ("f", "Zg=="),
            ("fo", "Zm8="),
            ("foo", "Zm9v"),
            ("foob", "Zm9vYg=="),
            ("fooba", "Zm9vYmE="),
            ("foobar", "Zm9vYmFy"),
        ];
        for (plain, encoded) in vectors {
            assert_eq!(encode(plain.as_bytes()), encoded);
            assert_eq!(decode(encoded).unwrap(), plain.as_bytes());
        }
    }

    #[test]
    fn test_round_trip_every_length() {
        let data: Vec<u8> = (0..=255).collect();
        for len in 0..=data.len() {
            let encoded = encode(&data[..len]);
            assert_eq!(encoded.len() % 4, 0);
            assert_eq!(decode(&encoded).unwrap(), &data[..len]);
        }
    }

    #[test]
    fn test_padding_optional_on_decode() {
        assert_eq!(decode("Zg").unwrap(), b"f");
        assert_eq!(decode("Zm8").unwrap(), b"fo");
        assert_eq!(decode(" Zm9v\nYg== ").unwrap(), b"foob");
    }

    #[test]
    fn test_dangling_character_rejected() {
        for input in ["A", "AAAAA", "Zm9vY", "Zm9vY===", "ABCDEFGHI="] {
            assert!(
                matches!(decode(input), Err(CodecError::Malformed { .. })),
                "{input} should be rejected"
            );
        }
    }

    #[test]
    fn test_bad_characters_rejected() {
        assert_eq!(
            decode("Zm9v*A=="),
            Err(CodecError::Malformed { position: 4, reason: "character outside the base64 alphabet" })
        );
        assert!(decode("Zg=").is_err());
        assert!(decode("Z=g=").is_err());
        assert!(decode("Zm9v-_").is_err());
        assert!(decode("中文").is_err());
    }

    #[test]
    fn test_url_safe() {
        let data = [0xfb, 0xff, 0xbf];
        assert_eq!(encode(&data), "+/+/");
        assert_eq!(Base64Config::URL_SAFE.encode(&data), "-_-_");
        assert_eq!(Base64Config::URL_SAFE.encode(b"f"), "Zg");
        assert_eq!(Base64Config::URL_SAFE.decode("-_-_").unwrap(), data);
        assert!(Base64Config::URL_SAFE.decode("+/+/").is_err());
    }

    #[test]
    fn test_btoa_rejects_wide_chars() {
        assert_eq!(btoa("中"), Err(CodecError::InvalidCharacter { ch: '中' }));
        assert_eq!(btoa("\u{ff}").unwrap(), "/w==");
        assert_eq!(atob("/w==").unwrap(), "\u{ff}");
    }

    #[test]
    fn test_decode_to_string_is_lossy() {
        assert_eq!(decode_to_string("/w==").unwrap(), "\u{FFFD}");
    }

    #[test]
    fn test_config_serde() {
        let config: Base64Config = serde_json::from_str(r#"{"alphabet":"url-safe"}"#).unwrap();
        assert_eq!(config, Base64Config { alphabet: Base64Alphabet::UrlSafe, padding: true });
        assert_eq!(
            serde_json::to_string(&Base64Config::URL_SAFE).unwrap(),
            r#"{"alphabet":"url-safe","padding":false}"#
        );
    }
}
