//! Host numeric conversions
//!
//! What a store into a typed view does to a number: integer kinds truncate
//! toward zero and wrap modulo 2^bits, non-finite values become 0.

/// Truncate and reduce modulo 2^bits
fn wrap(value: f64, bits: i32) -> u64 {
    if !value.is_finite() {
        return 0;
    }
    value.trunc().rem_euclid(2f64.powi(bits)) as u64
}

pub fn to_uint8(value: f64) -> u8 { wrap(value, 8) as u8 }
pub fn to_int8(value: f64) -> i8 { wrap(value, 8) as u8 as i8 }
pub fn to_uint16(value: f64) -> u16 { wrap(value, 16) as u16 }
pub fn to_int16(value: f64) -> i16 { wrap(value, 16) as u16 as i16 }
pub fn to_uint32(value: f64) -> u32 { wrap(value, 32) as u32 }
pub fn to_int32(value: f64) -> i32 { wrap(value, 32) as u32 as i32 }

/// `Uint8ClampedArray` store: clamp to 0..=255, round half to even
pub fn to_uint8_clamp(value: f64) -> u8 {
    if value.is_nan() {
        return 0;
    }
    value.clamp(0.0, 255.0).round_ties_even() as u8
}

/// BigInt64 store: wrap modulo 2^64 into the signed range
pub fn to_big_int64(value: i128) -> i64 { value as i64 }

/// BigUint64 store: wrap modulo 2^64
pub fn to_big_uint64(value: i128) -> u64 { value as u64 }
