//! TypedArrays
//!
//! Element views over an `ArrayBuffer`. A `TypedArray` is only a window
//! description; the bytes stay in the buffer, so any number of views over
//! the same buffer alias each other exactly.

use crate::convert;
use crate::{ArrayBuffer, BufferError, Result};

/// TypedArray element type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypedArrayKind {
    Int8,
    Uint8,
    Uint8Clamped,
    Int16,
    Uint16,
    Int32,
    Uint32,
    Float32,
    Float64,
    BigInt64,
    BigUint64,
}

impl TypedArrayKind {
    pub fn byte_size(&self) -> usize {
        match self {
            TypedArrayKind::Int8 | TypedArrayKind::Uint8 | TypedArrayKind::Uint8Clamped => 1,
            TypedArrayKind::Int16 | TypedArrayKind::Uint16 => 2,
            TypedArrayKind::Int32 | TypedArrayKind::Uint32 | TypedArrayKind::Float32 => 4,
            TypedArrayKind::Float64 | TypedArrayKind::BigInt64 | TypedArrayKind::BigUint64 => 8,
        }
    }

    /// BigInt kinds hold integers that do not fit an f64
    pub fn is_big(&self) -> bool {
        matches!(self, TypedArrayKind::BigInt64 | TypedArrayKind::BigUint64)
    }

    /// Constructor name in the host runtime
    pub fn name(&self) -> &'static str {
        match self {
            TypedArrayKind::Int8 => "Int8Array",
            TypedArrayKind::Uint8 => "Uint8Array",
            TypedArrayKind::Uint8Clamped => "Uint8ClampedArray",
            TypedArrayKind::Int16 => "Int16Array",
            TypedArrayKind::Uint16 => "Uint16Array",
            TypedArrayKind::Int32 => "Int32Array",
            TypedArrayKind::Uint32 => "Uint32Array",
            TypedArrayKind::Float32 => "Float32Array",
            TypedArrayKind::Float64 => "Float64Array",
            TypedArrayKind::BigInt64 => "BigInt64Array",
            TypedArrayKind::BigUint64 => "BigUint64Array",
        }
    }
}

/// View over a run of fixed-width elements in an `ArrayBuffer`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypedArray {
    kind: TypedArrayKind,
    byte_offset: usize,
    length: usize,
}

impl TypedArray {
    /// View the whole buffer. Its length must be a multiple of the element size.
    pub fn over(kind: TypedArrayKind, buffer: &ArrayBuffer) -> Result<Self> {
        Self::with_offset(kind, buffer, 0, None)
    }

    /// View `length` elements starting at `byte_offset`, or everything after
    /// the offset when `length` is `None`
    pub fn with_offset(
        kind: TypedArrayKind,
        buffer: &ArrayBuffer,
        byte_offset: usize,
        length: Option<usize>,
    ) -> Result<Self> {
        let size = kind.byte_size();
        let byte_length = buffer.byte_length();

        if byte_offset % size != 0 {
            tracing::debug!("{} offset {} is not aligned", kind.name(), byte_offset);
            return Err(BufferError::Misaligned { offset: byte_offset, element_size: size });
        }
        if byte_offset > byte_length {
            return Err(BufferError::OutOfBounds { offset: byte_offset, len: 0, byte_length });
        }

        let length = match length {
            Some(length) => {
                let len = length.checked_mul(size).ok_or(BufferError::OutOfBounds {
                    offset: byte_offset,
                    len: usize::MAX,
                    byte_length,
                })?;
                // byte_offset <= byte_length was checked above
                if len > byte_length - byte_offset {
                    return Err(BufferError::OutOfBounds { offset: byte_offset, len, byte_length });
                }
                length
            }
            None => {
                let remaining = byte_length - byte_offset;
                if remaining % size != 0 {
                    tracing::debug!("{} cannot cover {} bytes", kind.name(), remaining);
                    return Err(BufferError::SizeMismatch {
                        byte_length: remaining,
                        element_size: size,
                    });
                }
                remaining / size
            }
        };

        Ok(Self { kind, byte_offset, length })
    }

    /// Allocate a fresh buffer holding `values`, like `new Uint32Array([..])`
    pub fn from_values(kind: TypedArrayKind, values: &[f64]) -> Result<(ArrayBuffer, Self)> {
        if kind.is_big() {
            return Err(BufferError::KindMismatch(kind));
        }
        let mut buffer = ArrayBuffer::new(values.len() * kind.byte_size());
        let view = Self { kind, byte_offset: 0, length: values.len() };
        for (i, &value) in values.iter().enumerate() {
            view.set(&mut buffer, i, value);
        }
        Ok((buffer, view))
    }

    /// Allocate a fresh buffer holding BigInt `values`
    pub fn from_big_values(kind: TypedArrayKind, values: &[i128]) -> Result<(ArrayBuffer, Self)> {
        if !kind.is_big() {
            return Err(BufferError::KindMismatch(kind));
        }
        let mut buffer = ArrayBuffer::new(values.len() * kind.byte_size());
        let view = Self { kind, byte_offset: 0, length: values.len() };
        for (i, &value) in values.iter().enumerate() {
            view.set_big(&mut buffer, i, value);
        }
        Ok((buffer, view))
    }

    pub fn kind(&self) -> TypedArrayKind { self.kind }
    pub fn byte_offset(&self) -> usize { self.byte_offset }
    pub fn length(&self) -> usize { self.length }
    pub fn byte_length(&self) -> usize { self.length * self.kind.byte_size() }

    /// Byte range of element `index`, if it exists in both view and buffer
    fn element<'a>(&self, bytes: &'a [u8], index: usize) -> Option<&'a [u8]> {
        if index >= self.length { return None; }
        let offset = self.byte_offset + index * self.kind.byte_size();
        bytes.get(offset..offset + self.kind.byte_size())
    }

    fn element_mut<'a>(&self, bytes: &'a mut [u8], index: usize) -> Option<&'a mut [u8]> {
        if index >= self.length { return None; }
        let offset = self.byte_offset + index * self.kind.byte_size();
        bytes.get_mut(offset..offset + self.kind.byte_size())
    }

    /// Get element (returns f64 for all numeric kinds)
    pub fn get(&self, buffer: &ArrayBuffer, index: usize) -> Option<f64> {
        let b = self.element(buffer.as_slice(), index)?;

        let value = match self.kind {
            TypedArrayKind::Int8 => b[0] as i8 as f64,
            TypedArrayKind::Uint8 | TypedArrayKind::Uint8Clamped => b[0] as f64,
            TypedArrayKind::Int16 => i16::from_le_bytes(b.try_into().ok()?) as f64,
            TypedArrayKind::Uint16 => u16::from_le_bytes(b.try_into().ok()?) as f64,
            TypedArrayKind::Int32 => i32::from_le_bytes(b.try_into().ok()?) as f64,
            TypedArrayKind::Uint32 => u32::from_le_bytes(b.try_into().ok()?) as f64,
            TypedArrayKind::Float32 => f32::from_le_bytes(b.try_into().ok()?) as f64,
            TypedArrayKind::Float64 => f64::from_le_bytes(b.try_into().ok()?),
            TypedArrayKind::BigInt64 | TypedArrayKind::BigUint64 => return None,
        };
        Some(value)
    }

    /// Set element, converting `value` the way the host does on store
    pub fn set(&self, buffer: &mut ArrayBuffer, index: usize, value: f64) -> bool {
        let kind = self.kind;
        let Some(slot) = self.element_mut(buffer.as_mut_slice(), index) else {
            return false;
        };

        match kind {
            TypedArrayKind::Int8 => slot[0] = convert::to_int8(value) as u8,
            TypedArrayKind::Uint8 => slot[0] = convert::to_uint8(value),
            TypedArrayKind::Uint8Clamped => slot[0] = convert::to_uint8_clamp(value),
            TypedArrayKind::Int16 => slot.copy_from_slice(&convert::to_int16(value).to_le_bytes()),
            TypedArrayKind::Uint16 => {
                slot.copy_from_slice(&convert::to_uint16(value).to_le_bytes())
            }
            TypedArrayKind::Int32 => slot.copy_from_slice(&convert::to_int32(value).to_le_bytes()),
            TypedArrayKind::Uint32 => {
                slot.copy_from_slice(&convert::to_uint32(value).to_le_bytes())
            }
            TypedArrayKind::Float32 => slot.copy_from_slice(&(value as f32).to_le_bytes()),
            TypedArrayKind::Float64 => slot.copy_from_slice(&value.to_le_bytes()),
            TypedArrayKind::BigInt64 | TypedArrayKind::BigUint64 => return false,
        }
        true
    }

    /// Get a BigInt element
    pub fn get_big(&self, buffer: &ArrayBuffer, index: usize) -> Option<i128> {
        let b = self.element(buffer.as_slice(), index)?;
        match self.kind {
            TypedArrayKind::BigInt64 => Some(i64::from_le_bytes(b.try_into().ok()?) as i128),
            TypedArrayKind::BigUint64 => Some(u64::from_le_bytes(b.try_into().ok()?) as i128),
            _ => None,
        }
    }

    /// Set a BigInt element, wrapping modulo 2^64
    pub fn set_big(&self, buffer: &mut ArrayBuffer, index: usize, value: i128) -> bool {
        let kind = self.kind;
        let Some(slot) = self.element_mut(buffer.as_mut_slice(), index) else {
            return false;
        };
        match kind {
            TypedArrayKind::BigInt64 => {
                slot.copy_from_slice(&convert::to_big_int64(value).to_le_bytes())
            }
            TypedArrayKind::BigUint64 => {
                slot.copy_from_slice(&convert::to_big_uint64(value).to_le_bytes())
            }
            _ => return false,
        }
        true
    }

    /// Read every numeric element. BigInt views yield nothing here; use
    /// [`TypedArray::to_big_vec`] for those.
    pub fn to_vec(&self, buffer: &ArrayBuffer) -> Vec<f64> {
        (0..self.length).filter_map(|i| self.get(buffer, i)).collect()
    }

    /// Read every BigInt element (empty for numeric views)
    pub fn to_big_vec(&self, buffer: &ArrayBuffer) -> Vec<i128> {
        (0..self.length).filter_map(|i| self.get_big(buffer, i)).collect()
    }

    /// The bytes this view covers
    pub fn bytes<'a>(&self, buffer: &'a ArrayBuffer) -> Option<&'a [u8]> {
        buffer.as_slice().get(self.byte_offset..self.byte_offset + self.byte_length())
    }
}
