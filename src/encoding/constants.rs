/// `true`
pub(crate) const TAG_TRUE: u8 = b'T';
/// `false`
pub(crate) const TAG_FALSE: u8 = b'F';
/// `null`
pub(crate) const TAG_NULL: u8 = b'N';
/// Zero-terminated UTF-8 string.
pub(crate) const TAG_STRING: u8 = b'S';
/// LEB128 length followed by raw bytes.
pub(crate) const TAG_BINARY: u8 = b'B';
/// Single-precision float, 4 bytes little-endian.
pub(crate) const TAG_FLOAT: u8 = b'f';
/// Double-precision float, 8 bytes little-endian.
pub(crate) const TAG_DOUBLE: u8 = b'd';
/// Non-negative integer, LEB128 magnitude.
pub(crate) const TAG_POS_INT: u8 = b'+';
/// Negative integer, LEB128 absolute magnitude.
pub(crate) const TAG_NEG_INT: u8 = b'-';

/// Immediate integers `0`..=`9` are a single ASCII digit.
pub(crate) const DIGIT_ZERO: u8 = b'0';
pub(crate) const DIGIT_NINE: u8 = b'9';
pub(crate) const IMMEDIATE_MAX: u64 = (DIGIT_NINE - DIGIT_ZERO) as u64;

pub(crate) const ARRAY_OPEN: u8 = b'[';
pub(crate) const ARRAY_CLOSE: u8 = b']';
pub(crate) const OBJECT_OPEN: u8 = b'{';
pub(crate) const OBJECT_CLOSE: u8 = b'}';

/// Ends strings and object keys.
pub(crate) const TERMINATOR: u8 = 0x00;
