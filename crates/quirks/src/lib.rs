//! quirks
//!
//! Byte and text codecs from a scripting-language cheat sheet, with the
//! host runtime's exact semantics.
//!
//! # Contents
//! - [`buffer`]: `ArrayBuffer`, typed array views, `DataView`
//! - [`text`]: char codes, `escape` / `encodeURI` / `encodeURIComponent`, base64
//! - [`hash`]: `createHash`-style digests
//!
//! # Example
//! ```rust
//! use quirks::text::{self, PercentPolicy};
//!
//! assert_eq!(text::escape("中文"), "%u4E2D%u6587");
//! assert_eq!(PercentPolicy::Uri.encode("中文"), "%E4%B8%AD%E6%96%87");
//! assert_eq!(text::base64::encode_str("hello, world"), "aGVsbG8sIHdvcmxk");
//! ```

use tracing_subscriber::EnvFilter;

// Re-export sub-crates
pub use quirks_buffer as buffer;
pub use quirks_hash as hash;
pub use quirks_text as text;

pub use quirks_buffer::{ArrayBuffer, BufferError, DataView, TypedArray, TypedArrayKind};
pub use quirks_hash::{Digest, Hash, HashAlgorithm, HashError, create_hash};
pub use quirks_text::{Base64Config, CodecError, JsString, PercentPolicy};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Install a `fmt` subscriber filtered by `RUST_LOG` (default `warn`).
/// Returns false if a global subscriber was already set.
pub fn init_logging() -> bool {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let installed = tracing_subscriber::fmt().with_env_filter(filter).try_init().is_ok();
    if installed {
        tracing::debug!("quirks v{} logging initialised", VERSION);
    }
    installed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_logging_is_idempotent() {
        init_logging();
        assert!(!init_logging());
    }

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
