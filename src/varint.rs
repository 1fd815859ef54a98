//! LEB128 coding of unsigned 64-bit magnitudes.
//!
//! Each byte carries 7 bits of the magnitude, least significant group first. The high bit
//! is set on every byte except the last.

use crate::errors::Result;
use bytes::Buf;
use smallvec::SmallVec;

/// Longest LEB128 encoding of a `u64`.
pub const MAX_LEN: usize = 10;

const CONTINUE: u8 = 0b1000_0000;
const GROUP: u8 = 0b0111_1111;

/// The encoded bytes of one magnitude.
pub type Leb128 = SmallVec<[u8; MAX_LEN]>;

/// Encodes `num` as LEB128. Always produces at least one byte.
///
/// # Example
///
/// ```
/// use nbon::varint::u64_to_leb128;
///
/// assert_eq!(&u64_to_leb128(0)[..], &[0x00]);
/// assert_eq!(&u64_to_leb128(128)[..], &[0x80, 0x01]);
/// ```
pub fn u64_to_leb128(mut num: u64) -> Leb128 {
    let mut out = Leb128::new();
    loop {
        let byte = num as u8 & GROUP;
        num >>= 7;
        if num == 0 {
            out.push(byte);
            return out;
        }
        out.push(byte | CONTINUE);
    }
}

/// Reads one LEB128 magnitude from `buf`.
///
/// Non-minimal encodings are accepted. Fails if the buffer ends before a byte with the
/// high bit clear, or if the encoding sets bits beyond the 64th.
pub fn read_leb128<B: Buf>(buf: &mut B) -> Result<u64> {
    let mut num = 0u64;
    let mut shift = 0u32;
    loop {
        if !buf.has_remaining() {
            parse_bail!("unexpected EOF in LEB128 integer");
        }
        let byte = buf.get_u8();
        let bits = u64::from(byte & GROUP);
        if bits != 0 {
            if shift >= 64 || (bits << shift) >> shift != bits {
                parse_bail!("LEB128 integer overflows 64 bits");
            }
            num |= bits << shift;
        }
        if byte & CONTINUE == 0 {
            return Ok(num);
        }
        shift = shift.saturating_add(7);
    }
}
