//! # NBON binary encoder and decoder
//!
//! Streaming cursors for NBON, plus functions that encode and decode whole [`Value`]s.
//!
//! # Example
//!
//! ```
//! use nbon::prelude::*;
//!
//! // a value to store
//! let v = Value::Array(vec![Value::from(true), Value::from("hi"), Value::from(-3)]);
//!
//! // and we've encoded it
//! let enc_full = encode_full(&v).unwrap();
//!
//! // let's encode it a different way too
//!
//! // create a buffer
//! let out = &mut BytesMut::with_capacity(16);
//!
//! // and we've encoded it a different way
//! encode(&v, out).unwrap();
//!
//! // but they are equivalent
//! assert_eq!(out[..], enc_full[..]);
//! assert_eq!(enc_full, b"[TShi\x00-\x03]");
//!
//! // Note: decoding returns a `Result`
//! let dec = decode_full(&enc_full).unwrap();
//!
//! // success!
//! assert_eq!(dec, v);
//! ```

use crate::{
    errors::{Error, Result},
    value::Value,
};
use bytes::{Buf, IntoBuf};

pub mod ser;
pub use ser::*;
pub mod de;
pub use de::*;
mod constants;
use constants::*;

/// Encodes a [`Value`], storing output in `out`.
///
/// # Arguments
///
/// * `v: &Value` - A reference to the [`Value`] to be encoded.
/// * `out: &mut S` - The [`Sink`] where the encoder output will be stored.
///
/// # Example
///
/// ```
/// use nbon::prelude::*;
///
/// // output buffer
/// let out = &mut Vec::new();
///
/// // encode value
/// encode(&Value::Null, out).unwrap();
/// assert_eq!(*out, b"N");
/// ```
pub fn encode<S: Sink>(v: &Value, out: &mut S) -> Result<()> { Writer::new(out).write_value(v) }

/// Decodes one [`Value`] from the front of a buffer, leaving anything after it unread.
///
/// # Example
///
/// ```
/// use nbon::prelude::*;
///
/// let buf = &mut (&b"7Sleft\x00"[..]).into_buf();
///
/// // Did the decoding succeed?
/// let dec = match decode(buf) {
///     Ok(value) => value,
///     Err(_e) => panic!("Oh no. Whatever will I do?"),
/// };
///
/// assert_eq!(dec, Value::from(7u8));
/// assert_eq!(buf.remaining(), 6);
/// ```
pub fn decode<B: Buf>(data: &mut B) -> Result<Value> { Reader::new(data).read_value() }

/// Encodes a [`Value`] into a vector of bytes.
///
/// # Example
///
/// ```
/// use nbon::prelude::*;
///
/// let enc: Vec<u8> = encode_full(&Value::from(200)).unwrap();
/// assert_eq!(enc, b"+\xc8\x01");
/// ```
pub fn encode_full(v: &Value) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    encode(v, &mut out)?;
    Ok(out)
}

/// Decodes a bytestring holding exactly one value, returns an error if decoding fails or
/// bytes are left over.
///
/// # Example
///
/// ```
/// use nbon::prelude::*;
///
/// assert_eq!(decode_full(&b"N"[..]).unwrap(), Value::Null);
/// assert!(decode_full(&b"NN"[..]).is_err());
/// ```
pub fn decode_full<B: IntoBuf>(bs: B) -> Result<Value> {
    let buf = &mut bs.into_buf();
    let v = decode(buf)?;
    if buf.has_remaining() {
        return Err(Error::Parse(format!(
            "{} trailing bytes after value",
            buf.remaining()
        )));
    }
    Ok(v)
}
