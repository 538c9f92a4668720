//! quirks message digests
//!
//! `createHash(alg).update(data).digest(enc)` over the RustCrypto hashers.
//!
//! # Example
//! ```rust
//! use quirks_hash::create_hash;
//!
//! let mut hash = create_hash("md5").unwrap();
//! hash.update("blahblah");
//! assert_eq!(hash.digest().hex(), "42d388f8b1db997faaf7dab487f11290");
//! ```

mod algorithm;
mod digest;

pub use algorithm::HashAlgorithm;
pub use digest::{Digest, DigestEncoding};

use std::fmt;

use sha2::digest::DynDigest;

/// Hashing errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HashError {
    #[error("unknown hash algorithm: {0}")]
    UnknownAlgorithm(String),

    #[error("unknown digest encoding: {0}")]
    UnknownEncoding(String),
}

pub type Result<T> = std::result::Result<T, HashError>;

/// Running hash. `digest` consumes it, so it cannot be finalised twice.
pub struct Hash {
    algorithm: HashAlgorithm,
    state: Box<dyn DynDigest + Send + Sync>,
}

/// `crypto.createHash(name)`
pub fn create_hash(name: &str) -> Result<Hash> {
    Ok(Hash::new(name.parse()?))
}

impl Hash {
    pub fn new(algorithm: HashAlgorithm) -> Self {
        tracing::trace!(%algorithm, "creating hash");
        let state: Box<dyn DynDigest + Send + Sync> = match algorithm {
            HashAlgorithm::Md4 => Box::new(md4::Md4::default()),
            HashAlgorithm::Md5 => Box::new(md5::Md5::default()),
            HashAlgorithm::Sha1 => Box::new(sha1::Sha1::default()),
            HashAlgorithm::Sha256 => Box::new(sha2::Sha256::default()),
            HashAlgorithm::Sha384 => Box::new(sha2::Sha384::default()),
            HashAlgorithm::Sha512 => Box::new(sha2::Sha512::default()),
        };
        Self { algorithm, state }
    }

    pub fn algorithm(&self) -> HashAlgorithm {
        self.algorithm
    }

    /// Feed more input; strings are hashed as their UTF-8 bytes
    pub fn update(&mut self, data: impl AsRef<[u8]>) -> &mut Self {
        self.state.update(data.as_ref());
        self
    }

    /// By-value `update`, for one-expression hashing
    pub fn chain_update(mut self, data: impl AsRef<[u8]>) -> Self {
        self.update(data);
        self
    }

    pub fn digest(self) -> Digest {
        Digest::new(self.algorithm, self.state.finalize().into_vec())
    }
}

impl fmt::Debug for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hash").field("algorithm", &self.algorithm).finish_non_exhaustive()
    }
}
