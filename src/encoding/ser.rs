use super::*;
use crate::{
    float::{f32_to_le, f64_to_le},
    rentable::{Rent, Rentable, State},
    varint::u64_to_leb128,
};
use bytes::{Bytes, BytesMut};
use std::ops::{Deref, DerefMut};

/// A byte sink that encoded values are written into.
pub trait Sink {
    /// The type of the output value.
    type Out;
    /// Add a byte to the output value.
    fn put_u8(&mut self, u: u8);
    /// Add a slice to the output value.
    fn put_slice(&mut self, slice: &[u8]);
    /// Return the output value.
    fn finalize(self) -> Self::Out;
}

impl Sink for Vec<u8> {
    type Out = Self;

    fn put_u8(&mut self, u: u8) { self.push(u) }

    fn put_slice(&mut self, slice: &[u8]) { self.extend_from_slice(slice) }

    fn finalize(self) -> Self::Out { self }
}

impl Sink for BytesMut {
    type Out = Bytes;

    fn put_u8(&mut self, u: u8) { self.extend_from_slice(&[u]) }

    fn put_slice(&mut self, slice: &[u8]) { self.extend_from_slice(slice) }

    fn finalize(self) -> Bytes { self.freeze() }
}

/// A cursor that writes values into a [`Sink`].
///
/// A writer made with [`Writer::new`] accepts any number of consecutive values, as does
/// the element cursor of an [`ArrayWriter`]. The cursor returned by
/// [`ObjectWriter::key`] accepts exactly one.
///
/// # Example
///
/// ```
/// use nbon::prelude::*;
///
/// let mut out = Vec::new();
/// let mut w = Writer::new(&mut out);
///
/// w.write_array(|w| {
///     w.write_true()?;
///     w.write_false()?;
///     w.write_array(|w| {
///         w.write_bool(false)?;
///         w.write_bool(true)
///     })?;
///     w.write_null()
/// })
/// .unwrap();
///
/// assert_eq!(out, b"[TF[FT]N]");
/// ```
#[derive(Debug)]
pub struct Writer<'a, S: Sink> {
    out: &'a mut S,
    ready: Rentable<'a>,
}

impl<'a, S: Sink> Writer<'a, S> {
    /// Creates a writer over `out`.
    pub fn new(out: &'a mut S) -> Writer<'a, S> {
        Writer {
            out,
            ready: Rentable::stream(),
        }
    }

    #[inline]
    fn scalar<F: FnOnce(&mut S)>(&mut self, put: F) -> Result<()> {
        self.ready.check()?;
        put(&mut *self.out);
        self.ready.complete();
        Ok(())
    }

    pub fn write_true(&mut self) -> Result<()> { self.scalar(|out| out.put_u8(TAG_TRUE)) }

    pub fn write_false(&mut self) -> Result<()> { self.scalar(|out| out.put_u8(TAG_FALSE)) }

    pub fn write_bool(&mut self, b: bool) -> Result<()> {
        if b {
            self.write_true()
        } else {
            self.write_false()
        }
    }

    pub fn write_null(&mut self) -> Result<()> { self.scalar(|out| out.put_u8(TAG_NULL)) }

    /// Writes a zero-terminated string.
    ///
    /// The format cannot represent strings containing a zero byte. This is not checked:
    /// such a string ends early when read back, and the rest of its bytes are read as the
    /// next value.
    pub fn write_string(&mut self, s: &str) -> Result<()> {
        self.scalar(|out| {
            out.put_u8(TAG_STRING);
            out.put_slice(s.as_bytes());
            out.put_u8(TERMINATOR);
        })
    }

    /// Writes a length-prefixed binary blob.
    pub fn write_binary(&mut self, data: &[u8]) -> Result<()> {
        self.scalar(|out| {
            out.put_u8(TAG_BINARY);
            out.put_slice(&u64_to_leb128(data.len() as u64));
            out.put_slice(data);
        })
    }

    pub fn write_float(&mut self, f: f32) -> Result<()> {
        self.scalar(|out| {
            out.put_u8(TAG_FLOAT);
            out.put_slice(&f32_to_le(f));
        })
    }

    pub fn write_double(&mut self, d: f64) -> Result<()> {
        self.scalar(|out| {
            out.put_u8(TAG_DOUBLE);
            out.put_slice(&f64_to_le(d));
        })
    }

    /// Writes a signed integer. `0`..=`9` use the one-byte immediate form.
    pub fn write_int(&mut self, i: i64) -> Result<()> {
        if i < 0 {
            // unsigned_abs covers i64::MIN, whose magnitude is 2^63
            self.scalar(|out| put_magnitude(out, TAG_NEG_INT, i.unsigned_abs()))
        } else {
            self.write_uint(i as u64)
        }
    }

    /// Writes an unsigned integer. `0`..=`9` use the one-byte immediate form.
    pub fn write_uint(&mut self, u: u64) -> Result<()> {
        self.scalar(|out| {
            if u <= IMMEDIATE_MAX {
                out.put_u8(DIGIT_ZERO + u as u8);
            } else {
                put_magnitude(out, TAG_POS_INT, u);
            }
        })
    }

    /// Opens an array. Elements are written through the returned [`ArrayWriter`]; the
    /// array is closed by [`ArrayWriter::finish`] or when the guard is dropped.
    ///
    /// This cursor cannot be used until then.
    pub fn begin_array(&mut self) -> Result<ArrayWriter<'_, S>> {
        self.ready.check()?;
        self.out.put_u8(ARRAY_OPEN);
        Ok(ArrayWriter {
            inner: Writer {
                out: &mut *self.out,
                ready: Rentable::stream(),
            },
            rent: self.ready.rent(),
            closed: false,
        })
    }

    /// Opens an object. Entries are written through the returned [`ObjectWriter`]; the
    /// object is closed by [`ObjectWriter::finish`] or when the guard is dropped.
    ///
    /// This cursor cannot be used until then.
    pub fn begin_object(&mut self) -> Result<ObjectWriter<'_, S>> {
        self.ready.check()?;
        self.out.put_u8(OBJECT_OPEN);
        Ok(ObjectWriter {
            out: &mut *self.out,
            rent: self.ready.rent(),
            entry: State::Spent,
            closed: false,
        })
    }

    /// Writes an array whose elements are emitted by `f`.
    pub fn write_array<F>(&mut self, f: F) -> Result<()>
    where
        F: FnOnce(&mut Writer<'_, S>) -> Result<()>,
    {
        let mut arr = self.begin_array()?;
        f(&mut *arr)?;
        arr.finish()
    }

    /// Writes an object whose entries are emitted by `f`.
    ///
    /// # Example
    ///
    /// ```
    /// use nbon::prelude::*;
    ///
    /// let mut out = Vec::new();
    /// Writer::new(&mut out)
    ///     .write_object(|o| {
    ///         o.key("x").write_int(2)?;
    ///         o.key("y").write_int(4)
    ///     })
    ///     .unwrap();
    ///
    /// assert_eq!(out, b"{x\x002y\x004}");
    /// ```
    pub fn write_object<F>(&mut self, f: F) -> Result<()>
    where
        F: FnOnce(&mut ObjectWriter<'_, S>) -> Result<()>,
    {
        let mut obj = self.begin_object()?;
        f(&mut obj)?;
        obj.finish()
    }

    /// Writes an owned [`Value`].
    pub fn write_value(&mut self, v: &Value) -> Result<()> {
        match v {
            Value::Null => self.write_null(),
            Value::Bool(b) => self.write_bool(*b),
            Value::Int(i) => self.write_int(*i),
            Value::UInt(u) => self.write_uint(*u),
            Value::Float(f) => self.write_float(*f),
            Value::Double(d) => self.write_double(*d),
            Value::String(s) => self.write_string(s),
            Value::Binary(b) => self.write_binary(b),
            Value::Array(vs) => {
                self.write_array(|w| {
                    for v in vs {
                        w.write_value(v)?;
                    }
                    Ok(())
                })
            }
            Value::Object(entries) => {
                self.write_object(|o| {
                    for (k, v) in entries {
                        o.key(k).write_value(v)?;
                    }
                    Ok(())
                })
            }
        }
    }
}

#[inline]
fn put_magnitude<S: Sink>(out: &mut S, tag: u8, mag: u64) {
    out.put_u8(tag);
    out.put_slice(&u64_to_leb128(mag));
}

/// An open array. Dereferences to the [`Writer`] that emits its elements.
#[derive(Debug)]
pub struct ArrayWriter<'a, S: Sink> {
    inner: Writer<'a, S>,
    rent: Rent<'a>,
    closed: bool,
}

impl<'a, S: Sink> ArrayWriter<'a, S> {
    fn close(&mut self) {
        if !self.closed {
            self.closed = true;
            self.inner.out.put_u8(ARRAY_CLOSE);
            self.rent.replace();
        }
    }

    /// Writes the closing delimiter and hands control back to the parent cursor.
    ///
    /// Fails if a nested scope opened through this array was never closed; the array is
    /// closed regardless.
    pub fn finish(mut self) -> Result<()> {
        let res = self.inner.ready.check();
        self.close();
        res
    }
}

impl<'a, S: Sink> Deref for ArrayWriter<'a, S> {
    type Target = Writer<'a, S>;

    fn deref(&self) -> &Writer<'a, S> { &self.inner }
}

impl<'a, S: Sink> DerefMut for ArrayWriter<'a, S> {
    fn deref_mut(&mut self) -> &mut Writer<'a, S> { &mut self.inner }
}

impl<'a, S: Sink> Drop for ArrayWriter<'a, S> {
    fn drop(&mut self) { self.close() }
}

/// An open object.
#[derive(Debug)]
pub struct ObjectWriter<'a, S: Sink> {
    out: &'a mut S,
    rent: Rent<'a>,
    entry: State,
    closed: bool,
}

impl<'a, S: Sink> ObjectWriter<'a, S> {
    /// Writes `key` and returns the cursor for its value. The cursor accepts exactly one
    /// value.
    ///
    /// Like [`Writer::write_string`], keys must not contain a zero byte; this is not
    /// checked.
    pub fn key(&mut self, key: &str) -> Writer<'_, S> {
        self.out.put_slice(key.as_bytes());
        self.out.put_u8(TERMINATOR);
        Writer {
            out: &mut *self.out,
            ready: Rentable::single(&mut self.entry),
        }
    }

    fn close(&mut self) {
        if !self.closed {
            self.closed = true;
            self.out.put_u8(OBJECT_CLOSE);
            self.rent.replace();
        }
    }

    /// Writes the closing delimiter and hands control back to the parent cursor.
    ///
    /// Fails if a nested scope opened through the last entry was never closed; the object
    /// is closed regardless.
    pub fn finish(mut self) -> Result<()> {
        let res = if self.entry == State::Busy {
            Err(Error::Logic("object closed while an entry's scope is still open"))
        } else {
            Ok(())
        };
        self.close();
        res
    }
}

impl<'a, S: Sink> Drop for ObjectWriter<'a, S> {
    fn drop(&mut self) { self.close() }
}
