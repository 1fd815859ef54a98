//! Fixed-width IEEE 754 coding.
//!
//! Floats are stored as their raw bit patterns in little-endian byte order. No rounding
//! or canonicalisation happens, so NaN payloads and signed zeros survive a round trip.

use crate::errors::Result;
use bytes::Buf;

/// Encoded width of a single-precision float.
pub const F32_LEN: usize = 4;
/// Encoded width of a double-precision float.
pub const F64_LEN: usize = 8;

#[inline]
pub fn f32_to_le(f: f32) -> [u8; F32_LEN] { u32::to_le_bytes(f.to_bits()) }

#[inline]
pub fn f64_to_le(f: f64) -> [u8; F64_LEN] { u64::to_le_bytes(f.to_bits()) }

fn fill<B: Buf>(buf: &mut B, dst: &mut [u8], what: &str) -> Result<()> {
    if buf.remaining() < dst.len() {
        parse_bail!(
            "unexpected EOF in {}: needed {} bytes, found {}",
            what,
            dst.len(),
            buf.remaining()
        );
    }
    buf.copy_to_slice(dst);
    Ok(())
}

/// Reads four little-endian bytes as an `f32`.
pub fn read_f32<B: Buf>(buf: &mut B) -> Result<f32> {
    let mut bs = [0u8; F32_LEN];
    fill(buf, &mut bs, "float")?;
    Ok(f32::from_bits(u32::from_le_bytes(bs)))
}

/// Reads eight little-endian bytes as an `f64`.
pub fn read_f64<B: Buf>(buf: &mut B) -> Result<f64> {
    let mut bs = [0u8; F64_LEN];
    fill(buf, &mut bs, "double")?;
    Ok(f64::from_bits(u64::from_le_bytes(bs)))
}
