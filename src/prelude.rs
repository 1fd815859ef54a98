pub use crate::{
    encoding::{
        decode, decode_full, encode, encode_full, ArrayReader, ArrayWriter, ObjectReader,
        ObjectWriter, Reader, Sink, Type, Writer, DEFAULT_MAX_DEPTH,
    },
    errors::{Error, ErrorKind},
    Value,
};
pub use bytes::{Buf, Bytes, BytesMut, IntoBuf};
