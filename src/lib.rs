//! # NBON
//!
//! NBON is a compact binary serialization format for the JSON value model, extended with
//! raw binary blobs and separate single and double precision floats. Every value starts
//! with a one-byte tag, so a stream can be read one value at a time without building a
//! tree in memory.
//!
//! # Usage
//!
//! Values are written with a [`Writer`](encoding::Writer) and read back with a
//! [`Reader`](encoding::Reader). Arrays and objects are opened as scopes that borrow the
//! cursor they came from, so nothing can be written at the wrong depth while a scope is
//! open.
//!
//! For example:
//!
//! ```
//! use nbon::prelude::*;
//!
//! let mut out = Vec::new();
//! let mut w = Writer::new(&mut out);
//!
//! w.write_object(|o| {
//!     o.key("name").write_string("probe")?;
//!     o.key("readings").write_array(|w| {
//!         for r in &[1.5, -0.25] {
//!             w.write_double(*r)?;
//!         }
//!         Ok(())
//!     })?;
//!     o.key("id").write_uint(4)
//! })
//! .unwrap();
//!
//! let buf = &mut out.into_buf();
//! let mut r = Reader::new(buf);
//!
//! let mut total = 0.0;
//! r.read_object(|key, mut v| {
//!     match key {
//!         "readings" => {
//!             v.read_array(|mut x| {
//!                 total += x.get_double()?;
//!                 Ok(())
//!             })
//!         }
//!         _ => v.skip(),
//!     }
//! })
//! .unwrap();
//!
//! assert_eq!(total, 1.25);
//! ```
//!
//! If you would rather not stream, [`encode_full`](encoding::encode_full) and
//! [`decode_full`](encoding::decode_full) convert whole [`Value`]s.
//!
//! # Errors
//!
//! Every operation returns a [`Result`](errors::Result). There are two kinds of
//! [`Error`](errors::Error):
//!
//! * *Logic errors* mean a cursor was used out of turn: a parent was used while a scope it
//!   opened was never closed, or a single-value cursor was used twice.
//! * *Parse errors* mean the input is malformed or truncated. Their messages say what was
//!   expected and what was found instead.
//!
//! # Specification
//!
//! This section describes the NBON binary format.
//!
//! ## Tags
//!
//! The first byte of every value is its *tag*, an ASCII character.
//!
//! | Tag         | Value                 | Followed by                                  |
//! | ---         | ---                   | ---                                          |
//! | `T`         | `true`                |                                              |
//! | `F`         | `false`               |                                              |
//! | `N`         | `null`                |                                              |
//! | `0` ... `9` | integer `0` ... `9`   |                                              |
//! | `+`         | non-negative integer  | LEB128 magnitude                             |
//! | `-`         | negative integer      | LEB128 absolute magnitude                    |
//! | `f`         | single precision      | 4 bytes, little endian                       |
//! | `d`         | double precision      | 8 bytes, little endian                       |
//! | `S`         | string                | UTF-8 bytes, then a zero byte                |
//! | `B`         | binary                | LEB128 length, then that many bytes          |
//! | `[`         | array                 | values, then `]`                             |
//! | `{`         | object                | entries, then `}`                            |
//!
//! ## Integers
//!
//! Integers between 0 and 9 are written as their ASCII digit. Larger non-negative
//! integers are written as `+` followed by their LEB128 encoding: seven bits per byte,
//! least significant group first, with the high bit set on every byte but the last.
//! Negative integers are written as `-` followed by the LEB128 encoding of their absolute
//! value.
//!
//! Writers always produce the shortest encoding. Readers accept longer ones.
//!
//! ## Strings and keys
//!
//! Strings and object keys are UTF-8 and end at the first zero byte, so they cannot
//! contain one. Writers do not check for this.
//!
//! ## Objects
//!
//! Each entry is a key (without a tag) followed by its value. Entries keep the order in
//! which they were written, and the format does not forbid duplicate keys.

#![warn(
    deprecated_in_future,
    unsafe_code,
    unused_labels,
    keyword_idents,
    missing_copy_implementations,
    missing_debug_implementations,
    macro_use_extern_crate,
    trivial_casts,
    trivial_numeric_casts,
    unused_extern_crates,
    unused_import_braces
)]
#![allow(clippy::cast_lossless)]

#[macro_use]
mod util;

pub mod encoding;
pub mod errors;
pub mod float;
pub mod prelude;
mod rentable;
pub mod value;
pub mod varint;

pub use value::Value;
