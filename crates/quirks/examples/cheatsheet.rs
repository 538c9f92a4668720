//! Example: print the cheat-sheet vectors

use quirks::text::{self, base64, PercentPolicy};
use quirks::{ArrayBuffer, TypedArray, TypedArrayKind, create_hash};

fn main() -> anyhow::Result<()> {
    // Initialize logging
    quirks::init_logging();

    tracing::info!("quirks v{} initialized", quirks::VERSION);

    // Views over one buffer
    let (buffer, _) = TypedArray::from_values(TypedArrayKind::Uint32, &[65536.0])?;
    println!("Uint8Array(Uint32Array([2**16]).buffer) = {:?}", buffer.as_slice());

    let (buffer, _) = TypedArray::from_values(TypedArrayKind::Float64, &[std::f64::consts::PI])?;
    println!("Uint8Array(Float64Array([PI]).buffer)   = {:?}", buffer.as_slice());

    let raw = ArrayBuffer::from_bytes(vec![0, 0, 1, 0]);
    let words = TypedArray::over(TypedArrayKind::Uint32, &raw)?;
    println!("Uint32Array([0, 0, 1, 0])               = {:?}", words.to_vec(&raw));

    // Char codes
    let abcde = text::from_char_codes(&[97, 98, 99, 100, 101])?;
    println!("String.fromCharCode(97..=101)           = {abcde}");
    println!("\"K\".charCodeAt(0)                       = {}", text::JsString::from("K").char_code_at(0)?);

    // Percent encoding
    for input in ["hello world!", "中文", "中文/what?"] {
        for policy in PercentPolicy::ALL {
            println!("{:<20} {:<14} -> {}", policy, input, policy.encode(input));
        }
    }

    // Base64
    println!("btoa(\"hello, world\")                    = {}", base64::btoa("hello, world")?);
    println!("atob(\"aGVsbG8sIHdvcmxk\")                = {}", base64::atob("aGVsbG8sIHdvcmxk")?);

    // Digests
    for name in ["md4", "md5", "sha1"] {
        let digest = create_hash(name)?.chain_update("blahblah").digest();
        println!("{name:<6} blahblah = {}", digest.hex());
    }

    Ok(())
}
