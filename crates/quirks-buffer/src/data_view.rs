//! DataView
//!
//! Explicit-offset, explicit-width accessors over a window of an
//! `ArrayBuffer`. Unlike typed arrays the byte order is chosen per call.

use std::ops::Range;

use crate::{ArrayBuffer, BufferError, Result};

/// Window into a buffer with per-access endianness
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataView {
    byte_offset: usize,
    byte_length: usize,
}

macro_rules! accessors {
    ($($get:ident, $set:ident => $ty:ty;)*) => {
        $(
            pub fn $get(&self, buffer: &ArrayBuffer, offset: usize, little_endian: bool) -> Result<$ty> {
                const N: usize = std::mem::size_of::<$ty>();
                let range = self.range(buffer, offset, N)?;
                let mut raw = [0u8; N];
                raw.copy_from_slice(&buffer.as_slice()[range]);
                Ok(if little_endian { <$ty>::from_le_bytes(raw) } else { <$ty>::from_be_bytes(raw) })
            }

            pub fn $set(&self, buffer: &mut ArrayBuffer, offset: usize, value: $ty, little_endian: bool) -> Result<()> {
                const N: usize = std::mem::size_of::<$ty>();
                let range = self.range(buffer, offset, N)?;
                let raw = if little_endian { value.to_le_bytes() } else { value.to_be_bytes() };
                buffer.as_mut_slice()[range].copy_from_slice(&raw);
                Ok(())
            }
        )*
    };
}

impl DataView {
    /// View `byte_length` bytes at `byte_offset`, or the rest of the buffer
    pub fn new(buffer: &ArrayBuffer, byte_offset: usize, byte_length: Option<usize>) -> Result<Self> {
        let total = buffer.byte_length();
        if byte_offset > total {
            return Err(BufferError::OutOfBounds { offset: byte_offset, len: 0, byte_length: total });
        }
        let byte_length = byte_length.unwrap_or(total - byte_offset);
        if byte_length > total - byte_offset {
            return Err(BufferError::OutOfBounds { offset: byte_offset, len: byte_length, byte_length: total });
        }
        Ok(Self { byte_offset, byte_length })
    }

    pub fn byte_offset(&self) -> usize { self.byte_offset }
    pub fn byte_length(&self) -> usize { self.byte_length }

    fn range(&self, buffer: &ArrayBuffer, offset: usize, width: usize) -> Result<Range<usize>> {
        let fits = offset
            .checked_add(width)
            .is_some_and(|end| end <= self.byte_length && self.byte_offset + end <= buffer.byte_length());
        if !fits {
            tracing::debug!("DataView access of {} bytes at {} rejected", width, offset);
            return Err(BufferError::OutOfBounds { offset, len: width, byte_length: self.byte_length });
        }
        let start = self.byte_offset + offset;
        Ok(start..start + width)
    }

    pub fn get_uint8(&self, buffer: &ArrayBuffer, offset: usize) -> Result<u8> {
        let range = self.range(buffer, offset, 1)?;
        Ok(buffer.as_slice()[range.start])
    }

    pub fn get_int8(&self, buffer: &ArrayBuffer, offset: usize) -> Result<i8> {
        self.get_uint8(buffer, offset).map(|b| b as i8)
    }

    pub fn set_uint8(&self, buffer: &mut ArrayBuffer, offset: usize, value: u8) -> Result<()> {
        let range = self.range(buffer, offset, 1)?;
        buffer.as_mut_slice()[range.start] = value;
        Ok(())
    }

    pub fn set_int8(&self, buffer: &mut ArrayBuffer, offset: usize, value: i8) -> Result<()> {
        self.set_uint8(buffer, offset, value as u8)
    }

    accessors! {
        get_uint16, set_uint16 => u16;
        get_int16, set_int16 => i16;
        get_uint32, set_uint32 => u32;
        get_int32, set_int32 => i32;
        get_float32, set_float32 => f32;
        get_float64, set_float64 => f64;
        get_big_uint64, set_big_uint64 => u64;
        get_big_int64, set_big_int64 => i64;
    }
}
