//! ArrayBuffer
//!
//! The backing store every view reads and writes.

/// Fixed-length byte arena, like the result of `malloc`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArrayBuffer {
    data: Vec<u8>,
}

impl ArrayBuffer {
    /// Allocate `byte_length` zeroed bytes
    pub fn new(byte_length: usize) -> Self {
        Self { data: vec![0; byte_length] }
    }

    /// Take ownership of existing bytes
    pub fn from_bytes(data: Vec<u8>) -> Self {
        Self { data }
    }

    pub fn byte_length(&self) -> usize { self.data.len() }
    pub fn is_empty(&self) -> bool { self.data.is_empty() }
    pub fn as_slice(&self) -> &[u8] { &self.data }
    pub fn as_mut_slice(&mut self) -> &mut [u8] { &mut self.data }
    pub fn into_bytes(self) -> Vec<u8> { self.data }

    /// Copy `[begin, end)` into a new buffer; both ends are clamped
    pub fn slice(&self, begin: usize, end: usize) -> Self {
        let end = end.min(self.data.len());
        let begin = begin.min(end);
        Self { data: self.data[begin..end].to_vec() }
    }
}

impl From<Vec<u8>> for ArrayBuffer {
    fn from(data: Vec<u8>) -> Self {
        Self::from_bytes(data)
    }
}

impl From<&[u8]> for ArrayBuffer {
    fn from(data: &[u8]) -> Self {
        Self::from_bytes(data.to_vec())
    }
}

impl AsRef<[u8]> for ArrayBuffer {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}
