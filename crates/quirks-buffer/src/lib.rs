//! quirks byte buffers
//!
//! Raw byte arenas and the fixed-width views the host runtime lays over them.
//!
//! Features:
//! - `ArrayBuffer`: owned, zero-initialised bytes
//! - `TypedArray`: non-copying element views (`Uint8`, `Uint32`, `Float64`, ...)
//! - `DataView`: explicit-offset, explicit-endianness accessors
//! - host numeric conversions (`ToUint32`, `ToUint8Clamp`, ...)
//!
//! # Example
//! ```rust
//! use quirks_buffer::{TypedArray, TypedArrayKind};
//!
//! let (buffer, _) = TypedArray::from_values(TypedArrayKind::Uint32, &[65536.0]).unwrap();
//! assert_eq!(buffer.as_slice(), &[0, 0, 1, 0]);
//! ```

mod array_buffer;
pub mod convert;
mod data_view;
mod typed_array;

pub use array_buffer::ArrayBuffer;
pub use data_view::DataView;
pub use typed_array::{TypedArray, TypedArrayKind};

/// Buffer and view errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BufferError {
    /// Byte length is not a multiple of the element size
    #[error("size mismatch: {byte_length} bytes is not a multiple of element size {element_size}")]
    SizeMismatch { byte_length: usize, element_size: usize },

    /// View offset is not a multiple of the element size
    #[error("misaligned: offset {offset} is not a multiple of element size {element_size}")]
    Misaligned { offset: usize, element_size: usize },

    /// Access or window outside the buffer
    #[error("out of bounds: {len} bytes at offset {offset} exceeds buffer of {byte_length} bytes")]
    OutOfBounds { offset: usize, len: usize, byte_length: usize },

    /// Numeric values given to a BigInt view or the other way around
    #[error("element kind {0:?} does not accept these values")]
    KindMismatch(TypedArrayKind),
}

pub type Result<T> = std::result::Result<T, BufferError>;
