//! Integration tests - the documented codec behaviour end to end
//!
//! Byte views, char codes, percent encoding, base64 and digests, checked
//! against the values the host runtime prints.

use quirks::text::{self, base64, uri};
use quirks::*;

// ============================================================================
// BYTE VIEWS
// ============================================================================

#[test]
fn test_uint32_reads_little_endian_bytes() {
    let buffer = ArrayBuffer::from_bytes(vec![0, 0, 1, 0]);
    let words = TypedArray::over(TypedArrayKind::Uint32, &buffer).unwrap();
    assert_eq!(words.to_vec(&buffer), vec![65536.0]);

    let view = DataView::new(&buffer, 0, None).unwrap();
    assert_eq!(view.get_uint32(&buffer, 0, true).unwrap(), 65536);
}

#[test]
fn test_views_share_bytes() {
    let (mut buffer, floats) = TypedArray::from_values(TypedArrayKind::Float64, &[std::f64::consts::PI]).unwrap();
    let bytes = TypedArray::over(TypedArrayKind::Uint8, &buffer).unwrap();
    assert_eq!(bytes.to_vec(&buffer), vec![24.0, 45.0, 68.0, 84.0, 251.0, 33.0, 9.0, 64.0]);

    // flip the sign bit through the byte view
    bytes.set(&mut buffer, 7, 64.0 + 128.0);
    assert_eq!(floats.get(&buffer, 0), Some(-std::f64::consts::PI));
}

#[test]
fn test_every_width_round_trips_bytes() {
    for len in [0usize, 8, 16, 64] {
        let original: Vec<u8> = (0..len).map(|i| (i * 7 + 3) as u8).collect();
        for kind in [
            TypedArrayKind::Uint8,
            TypedArrayKind::Uint16,
            TypedArrayKind::Uint32,
            TypedArrayKind::Float64,
        ] {
            let buffer = ArrayBuffer::from_bytes(original.clone());
            let view = TypedArray::over(kind, &buffer).unwrap();
            assert_eq!(view.length(), len / kind.byte_size());

            let bytes = TypedArray::over(TypedArrayKind::Uint8, &buffer).unwrap();
            let read: Vec<u8> = bytes.to_vec(&buffer).into_iter().map(|b| b as u8).collect();
            assert_eq!(read, original, "{} over {} bytes", kind.name(), len);
        }
    }
}

#[test]
fn test_size_mismatch_for_every_width() {
    for kind in [TypedArrayKind::Uint16, TypedArrayKind::Uint32, TypedArrayKind::Float64] {
        let width = kind.byte_size();
        let buffer = ArrayBuffer::new(width + 1);
        assert_eq!(
            TypedArray::over(kind, &buffer),
            Err(BufferError::SizeMismatch { byte_length: width + 1, element_size: width })
        );
    }
}

// ============================================================================
// CHAR CODES
// ============================================================================

#[test]
fn test_char_code_conversions() {
    assert_eq!(text::from_char_codes(&[75]).unwrap(), "K");
    assert_eq!(JsString::from("K").char_code_at(0), Ok(75));
    assert_eq!(text::from_char_codes(&[97, 98, 99, 100, 101]).unwrap(), "abcde");
    assert!(matches!(text::from_char_codes(&[70000]), Err(CodecError::Range { value: 70000 })));
    assert!(matches!(JsString::from("K").char_code_at(5), Err(CodecError::IndexOutOfRange { .. })));
}

// ============================================================================
// PERCENT ENCODING
// ============================================================================

#[test]
fn test_documented_percent_vectors() {
    assert_eq!(text::escape("hello world!"), "hello%20world%21");
    assert_eq!(text::encode_uri("hello world!"), "hello%20world!");
    assert_eq!(text::escape("中文"), "%u4E2D%u6587");
    assert_eq!(text::unescape("%u4E2D%u6587"), "中文");
    assert_eq!(text::encode_uri("中文"), "%E4%B8%AD%E6%96%87");
    assert_eq!(text::decode_uri("%E4%B8%AD%E6%96%87").unwrap(), "中文");
    assert_eq!(text::encode_uri("中文/what?"), "%E4%B8%AD%E6%96%87/what?");
    assert_eq!(text::encode_uri_component("中文/what?"), "%E4%B8%AD%E6%96%87%2Fwhat%3F");
}

#[test]
fn test_legacy_round_trips_any_code_units() {
    // every BMP code unit, including lone surrogates
    let units: Vec<u16> = (0..=u16::MAX).collect();
    let escaped = uri::escape_units(&units);
    assert!(escaped.is_ascii());
    assert_eq!(text::unescape(&escaped).as_units(), units.as_slice());
}

#[test]
fn test_utf8_policies_round_trip_any_text() {
    let sample: String = (0u32..0x3000)
        .chain(0x1F600..0x1F650)
        .filter_map(char::from_u32)
        .collect();
    for policy in [PercentPolicy::Uri, PercentPolicy::UriComponent] {
        let encoded = policy.encode(&sample);
        assert!(encoded.is_ascii());
        assert_eq!(policy.decode(&encoded).unwrap(), sample, "{policy}");
    }
    assert_eq!(PercentPolicy::Legacy.decode(&PercentPolicy::Legacy.encode(&sample)).unwrap(), sample);
}

#[test]
fn test_policies_are_distinguishable() {
    let outputs: Vec<String> = PercentPolicy::ALL.iter().map(|p| p.encode("a b!/?")).collect();
    assert_eq!(outputs, ["a%20b%21/%3F", "a%20b!/?", "a%20b!%2F%3F"]);
}

#[test]
fn test_percent_decode_rejects_malformed() {
    for input in ["%", "%4", "%G0", "%FF", "%E4%B8"] {
        for policy in [PercentPolicy::Uri, PercentPolicy::UriComponent] {
            assert!(matches!(policy.decode(input), Err(CodecError::Malformed { .. })), "{policy} {input}");
        }
    }
}

// ============================================================================
// BASE64
// ============================================================================

#[test]
fn test_documented_base64_vectors() {
    assert_eq!(base64::btoa("hello, world").unwrap(), "aGVsbG8sIHdvcmxk");
    assert_eq!(base64::atob("aGVsbG8sIHdvcmxk").unwrap(), "hello, world");
    assert_eq!(base64::encode_str("hello, world"), "aGVsbG8sIHdvcmxk");
    assert_eq!(base64::decode_to_string("aGVsbG8sIHdvcmxk").unwrap(), "hello, world");
}

#[test]
fn test_base64_round_trip() {
    assert_eq!(base64::decode(&base64::encode(&[])).unwrap(), Vec::<u8>::new());
    for config in [Base64Config::STANDARD, Base64Config::URL_SAFE] {
        for len in 0..64usize {
            let data: Vec<u8> = (0..len).map(|i| (i * 97 + 13) as u8).collect();
            assert_eq!(config.decode(&config.encode(&data)).unwrap(), data);
        }
    }
}

#[test]
fn test_base64_dangling_character_always_fails() {
    let alphabet = "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";
    for groups in 0..4 {
        for extra in alphabet.chars() {
            let input = format!("{}{}", "QUJD".repeat(groups), extra);
            assert!(matches!(base64::decode(&input), Err(CodecError::Malformed { .. })), "{input}");
        }
    }
}

// ============================================================================
// DIGESTS
// ============================================================================

#[test]
fn test_documented_digests() {
    let mut md5 = create_hash("md5").unwrap();
    md5.update("blahblah");
    assert_eq!(md5.digest().hex(), "42d388f8b1db997faaf7dab487f11290");

    let md4 = create_hash("md4").unwrap().chain_update("blahblah").digest();
    assert_eq!(md4.hex(), "9eeabb89921283da6cfe48f66c4adb89");

    let sha1 = Hash::new(HashAlgorithm::Sha1).chain_update(b"blahblah").digest();
    assert_eq!(sha1.to_string(), "d3395867d05cc4c27f013d6e6f48d644e96d8241");
}

#[test]
fn test_digest_base64_matches_codec() {
    let digest = create_hash("sha256").unwrap().chain_update("hello, world").digest();
    assert_eq!(base64::decode(&digest.base64()).unwrap(), digest.as_bytes());
    assert_eq!(digest.hex(), "09ca7e4eaa6e8ae9c7d261167129184883644d07dfba7cbfbc4c8a2e08360d5b");
}

// ============================================================================
// CONFIGURATION
// ============================================================================

#[test]
fn test_config_values_deserialize() {
    #[derive(serde::Deserialize)]
    struct Settings {
        policy: PercentPolicy,
        base64: Base64Config,
        algorithm: HashAlgorithm,
    }

    let settings: Settings = serde_json::from_str(
        r#"{"policy":"uri","base64":{"alphabet":"url-safe","padding":false},"algorithm":"sha256"}"#,
    )
    .unwrap();
    assert_eq!(settings.policy, PercentPolicy::Uri);
    assert_eq!(settings.base64, Base64Config::URL_SAFE);
    assert_eq!(settings.algorithm, HashAlgorithm::Sha256);
}
