use super::*;
use crate::{
    float::{read_f32, read_f64},
    rentable::{Rent, Rentable, State},
    util::show_byte,
    varint::read_leb128,
};
use bytes::Buf;
use std::convert::TryFrom;

/// Default limit on how deeply arrays and objects may nest when read.
pub const DEFAULT_MAX_DEPTH: usize = 1000;

/// NBON types, as classified from a tag byte.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Type {
    Bool,
    Null,
    String,
    Binary,
    Float,
    Double,
    /// A `'-'` tagged integer.
    Int,
    /// A `'+'` tagged integer, or an immediate digit.
    UInt,
    Array,
    Object,
}

impl Type {
    /// Classifies a tag byte. Returns `None` if no value starts with `byte`.
    ///
    /// # Example
    ///
    /// ```
    /// use nbon::encoding::Type;
    ///
    /// assert_eq!(Type::from_tag(b'7'), Some(Type::UInt));
    /// assert_eq!(Type::from_tag(b'x'), None);
    /// ```
    pub fn from_tag(byte: u8) -> Option<Type> {
        use Type::*;
        match byte {
            TAG_TRUE | TAG_FALSE => Some(Bool),
            TAG_NULL => Some(Null),
            TAG_FLOAT => Some(Float),
            TAG_DOUBLE => Some(Double),
            TAG_STRING => Some(String),
            TAG_BINARY => Some(Binary),
            DIGIT_ZERO..=DIGIT_NINE | TAG_POS_INT => Some(UInt),
            TAG_NEG_INT => Some(Int),
            ARRAY_OPEN => Some(Array),
            OBJECT_OPEN => Some(Object),
            _ => None,
        }
    }
}

#[inline]
fn peek_byte<B: Buf>(buf: &B) -> Option<u8> {
    if buf.has_remaining() {
        buf.bytes().first().copied()
    } else {
        None
    }
}

#[inline]
fn take_byte<B: Buf>(buf: &mut B) -> Result<u8> {
    if buf.has_remaining() {
        Ok(buf.get_u8())
    } else {
        parse_bail!("unexpected EOF")
    }
}

#[inline]
fn expect_byte<B: Buf>(buf: &mut B, want: u8, ctx: &str) -> Result<()> {
    if !buf.has_remaining() {
        parse_bail!("{}: expected {}, found EOF", ctx, show_byte(want));
    }
    let found = buf.get_u8();
    if found != want {
        parse_bail!(
            "{}: expected {}, found {}",
            ctx,
            show_byte(want),
            show_byte(found)
        );
    }
    Ok(())
}

/// Consumes bytes up to and including the next zero byte, collecting the bytes before it
/// into `out` if given.
fn read_terminated<B: Buf>(buf: &mut B, mut out: Option<&mut Vec<u8>>, ctx: &str) -> Result<()> {
    loop {
        let (used, done) = {
            let chunk = buf.bytes();
            if chunk.is_empty() {
                parse_bail!("{}: unexpected EOF before terminator", ctx);
            }
            match chunk.iter().position(|&b| b == TERMINATOR) {
                Some(pos) => {
                    if let Some(out) = out.as_mut() {
                        out.extend_from_slice(&chunk[..pos]);
                    }
                    (pos + 1, true)
                }
                None => {
                    if let Some(out) = out.as_mut() {
                        out.extend_from_slice(chunk);
                    }
                    (chunk.len(), false)
                }
            }
        };
        buf.advance(used);
        if done {
            return Ok(());
        }
    }
}

/// Reads a zero-terminated UTF-8 string into `dst`, reusing its allocation.
fn read_string<B: Buf>(buf: &mut B, dst: &mut String, ctx: &str) -> Result<()> {
    let mut bytes = std::mem::replace(dst, String::new()).into_bytes();
    bytes.clear();
    read_terminated(buf, Some(&mut bytes), ctx)?;
    match String::from_utf8(bytes) {
        Ok(s) => {
            *dst = s;
            Ok(())
        }
        Err(e) => parse_bail!("{}: invalid UTF-8: {}", ctx, e.utf8_error()),
    }
}

/// Reads a binary length prefix and checks that the buffer holds that many bytes.
fn binary_len<B: Buf>(buf: &mut B, ctx: &str) -> Result<usize> {
    let declared = read_leb128(buf)?;
    let len = match usize::try_from(declared) {
        Ok(len) => len,
        Err(_) => parse_bail!("{}: length {} does not fit in memory", ctx, declared),
    };
    if buf.remaining() < len {
        parse_bail!(
            "{}: expected {} bytes, found {}",
            ctx,
            len,
            buf.remaining()
        );
    }
    Ok(len)
}

fn check_nesting(level: usize, max_depth: usize) -> Result<()> {
    if level >= max_depth {
        parse_bail!("nesting too deep: more than {} levels", max_depth);
    }
    Ok(())
}

fn classify<B: Buf>(buf: &B) -> Result<Type> {
    match peek_byte(buf) {
        None => parse_bail!("unexpected EOF"),
        Some(b) => {
            match Type::from_tag(b) {
                Some(t) => Ok(t),
                None => parse_bail!("unexpected character {}", show_byte(b)),
            }
        }
    }
}

fn bool_from<B: Buf>(buf: &mut B) -> Result<bool> {
    match take_byte(buf)? {
        TAG_TRUE => Ok(true),
        TAG_FALSE => Ok(false),
        b => parse_bail!("getBool: expected 'T' or 'F', found {}", show_byte(b)),
    }
}

fn null_from<B: Buf>(buf: &mut B) -> Result<()> { expect_byte(buf, TAG_NULL, "getNull") }

fn string_from<B: Buf>(buf: &mut B, s: &mut String) -> Result<()> {
    expect_byte(buf, TAG_STRING, "getString")?;
    read_string(buf, s, "getString")
}

fn skip_string_from<B: Buf>(buf: &mut B) -> Result<()> {
    expect_byte(buf, TAG_STRING, "skipString")?;
    read_terminated(buf, None, "skipString")
}

fn binary_from<B: Buf>(buf: &mut B) -> Result<Vec<u8>> {
    expect_byte(buf, TAG_BINARY, "getBinary")?;
    let mut out = vec![0; binary_len(buf, "getBinary")?];
    buf.copy_to_slice(&mut out);
    Ok(out)
}

fn skip_binary_from<B: Buf>(buf: &mut B) -> Result<()> {
    expect_byte(buf, TAG_BINARY, "skipBinary")?;
    let len = binary_len(buf, "skipBinary")?;
    buf.advance(len);
    Ok(())
}

fn float_from<B: Buf>(buf: &mut B) -> Result<f32> {
    expect_byte(buf, TAG_FLOAT, "getFloat")?;
    read_f32(buf)
}

fn double_from<B: Buf>(buf: &mut B) -> Result<f64> {
    expect_byte(buf, TAG_DOUBLE, "getDouble")?;
    read_f64(buf)
}

fn int_from<B: Buf>(buf: &mut B) -> Result<i64> {
    match take_byte(buf)? {
        b @ DIGIT_ZERO..=DIGIT_NINE => Ok(i64::from(b - DIGIT_ZERO)),
        TAG_POS_INT => Ok(read_leb128(buf)? as i64),
        TAG_NEG_INT => Ok((read_leb128(buf)? as i64).wrapping_neg()),
        b => {
            parse_bail!(
                "getInt: expected '0'-'9', '+' or '-', found {}",
                show_byte(b)
            )
        }
    }
}

fn uint_from<B: Buf>(buf: &mut B) -> Result<u64> {
    match take_byte(buf)? {
        b @ DIGIT_ZERO..=DIGIT_NINE => Ok(u64::from(b - DIGIT_ZERO)),
        TAG_POS_INT => read_leb128(buf),
        b => {
            parse_bail!(
                "getUInt: expected '0'-'9' or '+', found {}",
                show_byte(b)
            )
        }
    }
}

/// An array or object being filled in by [`tree_from`].
enum Frame {
    Array(Vec<Value>),
    /// Entries so far, and the key of the entry being read.
    Object(Vec<(String, Value)>, String),
}

impl Frame {
    fn close(&self) -> u8 {
        match self {
            Frame::Array(_) => ARRAY_CLOSE,
            Frame::Object(..) => OBJECT_CLOSE,
        }
    }

    fn push(&mut self, v: Value) {
        match self {
            Frame::Array(vs) => vs.push(v),
            Frame::Object(entries, key) => entries.push((std::mem::replace(key, String::new()), v)),
        }
    }

    fn into_value(self) -> Value {
        match self {
            Frame::Array(vs) => Value::Array(vs),
            Frame::Object(entries, _) => Value::Object(entries),
        }
    }
}

enum Step {
    Value(Value),
    Open(Frame),
}

/// Reads a scalar, or consumes the opening delimiter of an array or object.
fn step_from<B: Buf>(buf: &mut B) -> Result<Step> {
    let v = match classify(&*buf)? {
        Type::Bool => Value::Bool(bool_from(buf)?),
        Type::Null => {
            null_from(buf)?;
            Value::Null
        }
        Type::String => {
            let mut s = String::new();
            string_from(buf, &mut s)?;
            Value::String(s)
        }
        Type::Binary => Value::Binary(binary_from(buf)?),
        Type::Float => Value::Float(float_from(buf)?),
        Type::Double => Value::Double(double_from(buf)?),
        Type::Int => Value::Int(int_from(buf)?),
        Type::UInt => Value::UInt(uint_from(buf)?),
        Type::Array => {
            buf.advance(1);
            return Ok(Step::Open(Frame::Array(Vec::new())));
        }
        Type::Object => {
            buf.advance(1);
            return Ok(Step::Open(Frame::Object(Vec::new(), String::new())));
        }
    };
    Ok(Step::Value(v))
}

/// Reads one complete value. Open composites live on a heap stack rather than the call
/// stack, so any nesting up to `max_depth` is safe.
fn tree_from<B: Buf>(buf: &mut B, depth: usize, max_depth: usize) -> Result<Value> {
    let mut stack: Vec<Frame> = Vec::new();
    loop {
        let mut done = match step_from(buf)? {
            Step::Value(v) => Some(v),
            Step::Open(frame) => {
                check_nesting(depth + stack.len(), max_depth)?;
                stack.push(frame);
                None
            }
        };
        loop {
            let top = match stack.last_mut() {
                Some(top) => top,
                None => {
                    if let Some(v) = done {
                        return Ok(v);
                    }
                    break;
                }
            };
            if let Some(v) = done.take() {
                top.push(v);
            }
            if peek_byte(&*buf) != Some(top.close()) {
                break;
            }
            buf.advance(1);
            done = stack.pop().map(Frame::into_value);
        }
        if let Some(Frame::Object(_, key)) = stack.last_mut() {
            read_string(buf, key, "ObjectReader::next")?;
        }
    }
}

/// Consumes one complete value without materializing it, tracking open composites by
/// their expected closing delimiters.
fn skip_tree_from<B: Buf>(buf: &mut B, depth: usize, max_depth: usize) -> Result<()> {
    let mut open: Vec<u8> = Vec::new();
    loop {
        match classify(&*buf)? {
            Type::Bool => bool_from(buf).map(drop)?,
            Type::Null => null_from(buf)?,
            Type::String => skip_string_from(buf)?,
            Type::Binary => skip_binary_from(buf)?,
            Type::Float => float_from(buf).map(drop)?,
            Type::Double => double_from(buf).map(drop)?,
            Type::Int => int_from(buf).map(drop)?,
            Type::UInt => uint_from(buf).map(drop)?,
            Type::Array => {
                buf.advance(1);
                check_nesting(depth + open.len(), max_depth)?;
                open.push(ARRAY_CLOSE);
            }
            Type::Object => {
                buf.advance(1);
                check_nesting(depth + open.len(), max_depth)?;
                open.push(OBJECT_CLOSE);
            }
        }
        while let Some(&close) = open.last() {
            if peek_byte(&*buf) != Some(close) {
                break;
            }
            buf.advance(1);
            open.pop();
        }
        match open.last() {
            None => return Ok(()),
            Some(&OBJECT_CLOSE) => read_terminated(buf, None, "ObjectReader::next")?,
            Some(_) => {}
        }
    }
}

/// A cursor that reads values from a [`Buf`].
///
/// A reader made with [`Reader::new`] reads any number of consecutive values. Readers
/// handed out by [`ArrayReader::next`] and [`ObjectReader::next`] read exactly one.
///
/// # Example
///
/// ```
/// use nbon::prelude::*;
///
/// let buf = &mut (&b"{x\x002y\x00+\x80\x01}"[..]).into_buf();
/// let mut r = Reader::new(buf);
///
/// let mut sum = 0;
/// r.read_object(|_key, mut v| {
///     sum += v.get_int()?;
///     Ok(())
/// })
/// .unwrap();
///
/// assert_eq!(sum, 130);
/// assert!(!r.has_next());
/// ```
#[derive(Debug)]
pub struct Reader<'a, B: Buf> {
    buf: &'a mut B,
    ready: Rentable<'a>,
    depth: usize,
    max_depth: usize,
}

impl<'a, B: Buf> Reader<'a, B> {
    /// Creates a reader over `buf` that allows [`DEFAULT_MAX_DEPTH`] levels of nesting.
    pub fn new(buf: &'a mut B) -> Reader<'a, B> { Reader::with_max_depth(buf, DEFAULT_MAX_DEPTH) }

    /// Creates a reader over `buf` that allows `max_depth` levels of nesting. Opening an
    /// array or object beyond that is a parse error.
    pub fn with_max_depth(buf: &'a mut B, max_depth: usize) -> Reader<'a, B> {
        Reader {
            buf,
            ready: Rentable::stream(),
            depth: 0,
            max_depth,
        }
    }

    /// Does the underlying buffer have any bytes left?
    pub fn has_next(&self) -> bool { self.buf.has_remaining() }

    /// Classifies the next value without consuming it.
    pub fn get_type(&self) -> Result<Type> {
        self.ready.check()?;
        classify(&*self.buf)
    }

    #[inline]
    fn scalar<T, F: FnOnce(&mut B) -> Result<T>>(&mut self, get: F) -> Result<T> {
        self.ready.check()?;
        let t = get(&mut *self.buf)?;
        self.ready.complete();
        Ok(t)
    }

    pub fn get_bool(&mut self) -> Result<bool> { self.scalar(bool_from) }

    pub fn get_null(&mut self) -> Result<()> { self.scalar(null_from) }

    /// Reads a string into `s`, replacing its contents.
    pub fn get_string_into(&mut self, s: &mut String) -> Result<()> {
        self.scalar(|buf| string_from(buf, s))
    }

    pub fn get_string(&mut self) -> Result<String> {
        let mut s = String::new();
        self.get_string_into(&mut s)?;
        Ok(s)
    }

    /// Consumes a string without decoding it.
    pub fn skip_string(&mut self) -> Result<()> { self.scalar(skip_string_from) }

    pub fn get_binary(&mut self) -> Result<Vec<u8>> { self.scalar(binary_from) }

    /// Consumes a binary blob without copying it.
    pub fn skip_binary(&mut self) -> Result<()> { self.scalar(skip_binary_from) }

    pub fn get_float(&mut self) -> Result<f32> { self.scalar(float_from) }

    pub fn get_double(&mut self) -> Result<f64> { self.scalar(double_from) }

    /// Reads an integer of either sign.
    ///
    /// `'+'` magnitudes above `i64::MAX` and `'-'` magnitudes above 2^63 wrap rather than
    /// fail; only magnitudes up to 2^53 - 1 are required to round trip.
    pub fn get_int(&mut self) -> Result<i64> { self.scalar(int_from) }

    /// Reads a non-negative integer. A `'-'` tagged value is a parse error.
    pub fn get_uint(&mut self) -> Result<u64> { self.scalar(uint_from) }

    /// Opens an array. Elements are read through the returned [`ArrayReader`], which must
    /// be closed with [`ArrayReader::finish`]. If it is dropped instead, this cursor stays
    /// unusable.
    pub fn begin_array(&mut self) -> Result<ArrayReader<'_, B>> {
        self.ready.check()?;
        expect_byte(self.buf, ARRAY_OPEN, "getArray")?;
        check_nesting(self.depth, self.max_depth)?;
        Ok(ArrayReader {
            buf: &mut *self.buf,
            rent: self.ready.rent(),
            entry: State::Spent,
            depth: self.depth + 1,
            max_depth: self.max_depth,
        })
    }

    /// Opens an object. Entries are read through the returned [`ObjectReader`], which
    /// must be closed with [`ObjectReader::finish`]. If it is dropped instead, this cursor
    /// stays unusable.
    pub fn begin_object(&mut self) -> Result<ObjectReader<'_, B>> {
        self.ready.check()?;
        expect_byte(self.buf, OBJECT_OPEN, "getObject")?;
        check_nesting(self.depth, self.max_depth)?;
        Ok(ObjectReader {
            buf: &mut *self.buf,
            rent: self.ready.rent(),
            entry: State::Spent,
            depth: self.depth + 1,
            max_depth: self.max_depth,
        })
    }

    /// Reads an array, handing the open [`ArrayReader`] to `f`.
    pub fn get_array<T, F>(&mut self, f: F) -> Result<T>
    where
        F: FnOnce(&mut ArrayReader<'_, B>) -> Result<T>,
    {
        let mut arr = self.begin_array()?;
        let t = f(&mut arr)?;
        arr.finish()?;
        Ok(t)
    }

    /// Reads an array, calling `f` once per element.
    pub fn read_array<F>(&mut self, f: F) -> Result<()>
    where
        F: FnMut(Reader<'_, B>) -> Result<()>,
    {
        self.get_array(|arr| arr.for_each(f))
    }

    /// Reads an object, handing the open [`ObjectReader`] to `f`.
    pub fn get_object<T, F>(&mut self, f: F) -> Result<T>
    where
        F: FnOnce(&mut ObjectReader<'_, B>) -> Result<T>,
    {
        let mut obj = self.begin_object()?;
        let t = f(&mut obj)?;
        obj.finish()?;
        Ok(t)
    }

    /// Reads an object, calling `f` once per entry.
    pub fn read_object<F>(&mut self, f: F) -> Result<()>
    where
        F: FnMut(&str, Reader<'_, B>) -> Result<()>,
    {
        self.get_object(|obj| obj.for_each(f))
    }

    /// Consumes the next value, whatever its type, including everything nested in it.
    pub fn skip(&mut self) -> Result<()> {
        self.ready.check()?;
        skip_tree_from(&mut *self.buf, self.depth, self.max_depth)?;
        self.ready.complete();
        Ok(())
    }

    /// Reads the next value into an owned [`Value`].
    pub fn read_value(&mut self) -> Result<Value> {
        self.ready.check()?;
        let v = tree_from(&mut *self.buf, self.depth, self.max_depth)?;
        self.ready.complete();
        Ok(v)
    }
}

/// An open array.
#[derive(Debug)]
pub struct ArrayReader<'a, B: Buf> {
    buf: &'a mut B,
    rent: Rent<'a>,
    entry: State,
    depth: usize,
    max_depth: usize,
}

impl<'a, B: Buf> ArrayReader<'a, B> {
    /// Is there another element before the closing `]`?
    pub fn has_next(&self) -> bool {
        match peek_byte(&*self.buf) {
            None | Some(ARRAY_CLOSE) => false,
            Some(_) => true,
        }
    }

    fn check_entry(&self) -> Result<()> {
        if self.entry == State::Busy {
            logic_bail!("array element's nested scope was never finished");
        }
        Ok(())
    }

    /// Returns a reader for the next element.
    ///
    /// Fails if a scope opened through the previous element was never finished.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Result<Reader<'_, B>> {
        self.check_entry()?;
        Ok(Reader {
            buf: &mut *self.buf,
            ready: Rentable::single(&mut self.entry),
            depth: self.depth,
            max_depth: self.max_depth,
        })
    }

    /// Calls `f` with a reader for each remaining element. `f` must consume the element.
    pub fn for_each<F>(&mut self, mut f: F) -> Result<()>
    where
        F: FnMut(Reader<'_, B>) -> Result<()>,
    {
        while self.has_next() {
            f(self.next()?)?;
            if self.entry != State::Spent {
                logic_bail!("array element was not consumed");
            }
        }
        Ok(())
    }

    /// Consumes the closing `]` and hands control back to the parent cursor.
    pub fn finish(mut self) -> Result<()> {
        self.check_entry()?;
        expect_byte(self.buf, ARRAY_CLOSE, "getArray")?;
        self.rent.replace();
        Ok(())
    }
}

/// An open object.
#[derive(Debug)]
pub struct ObjectReader<'a, B: Buf> {
    buf: &'a mut B,
    rent: Rent<'a>,
    entry: State,
    depth: usize,
    max_depth: usize,
}

impl<'a, B: Buf> ObjectReader<'a, B> {
    /// Is there another entry before the closing `}`?
    pub fn has_next(&self) -> bool {
        match peek_byte(&*self.buf) {
            None | Some(OBJECT_CLOSE) => false,
            Some(_) => true,
        }
    }

    fn check_entry(&self) -> Result<()> {
        if self.entry == State::Busy {
            logic_bail!("object value's nested scope was never finished");
        }
        Ok(())
    }

    /// Reads the next key into `key` and returns a reader for its value.
    ///
    /// Fails if a scope opened through the previous value was never finished.
    pub fn next_into(&mut self, key: &mut String) -> Result<Reader<'_, B>> {
        self.check_entry()?;
        read_string(self.buf, key, "ObjectReader::next")?;
        Ok(Reader {
            buf: &mut *self.buf,
            ready: Rentable::single(&mut self.entry),
            depth: self.depth,
            max_depth: self.max_depth,
        })
    }

    /// Reads the next key and returns it along with a reader for its value.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Result<(String, Reader<'_, B>)> {
        let mut key = String::new();
        let val = self.next_into(&mut key)?;
        Ok((key, val))
    }

    /// Calls `f` with each remaining key and a reader for its value. `f` must consume the
    /// value.
    pub fn for_each<F>(&mut self, mut f: F) -> Result<()>
    where
        F: FnMut(&str, Reader<'_, B>) -> Result<()>,
    {
        let mut key = String::new();
        while self.has_next() {
            let val = self.next_into(&mut key)?;
            f(&key, val)?;
            if self.entry != State::Spent {
                logic_bail!("object value was not consumed");
            }
        }
        Ok(())
    }

    /// Consumes the closing `}` and hands control back to the parent cursor.
    pub fn finish(mut self) -> Result<()> {
        self.check_entry()?;
        expect_byte(self.buf, OBJECT_CLOSE, "getObject")?;
        self.rent.replace();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::IntoBuf;
    use std::io::Cursor;

    fn buf(bs: &[u8]) -> Cursor<&[u8]> { bs.into_buf() }

    #[test]
    fn classify() {
        let cases = [
            (b'T', Type::Bool),
            (b'F', Type::Bool),
            (b'N', Type::Null),
            (b'f', Type::Float),
            (b'd', Type::Double),
            (b'S', Type::String),
            (b'B', Type::Binary),
            (b'0', Type::UInt),
            (b'9', Type::UInt),
            (b'+', Type::UInt),
            (b'-', Type::Int),
            (b'[', Type::Array),
            (b'{', Type::Object),
        ];
        for &(tag, ty) in &cases {
            let bytes = [tag];
            let b = &mut buf(&bytes);
            let r = Reader::new(b);
            assert_eq!(r.get_type().unwrap(), ty);
            // lookahead only
            assert!(r.has_next());
        }

        let b = &mut buf(b"x");
        assert!(Reader::new(b).get_type().unwrap_err().is_parse());
        let b = &mut buf(b"]");
        assert!(Reader::new(b).get_type().unwrap_err().is_parse());
        let b = &mut buf(b"");
        assert!(Reader::new(b).get_type().unwrap_err().is_parse());
    }

    #[test]
    fn scalars() {
        let b = &mut buf(b"TFNShello\x00B\x03abcf\x00\x00\x20\x41d\x00\x00\x00\x00\x00\x00\x24\x40");
        let mut r = Reader::new(b);
        assert_eq!(r.get_bool(), Ok(true));
        assert_eq!(r.get_bool(), Ok(false));
        assert_eq!(r.get_null(), Ok(()));
        assert_eq!(r.get_string().unwrap(), "hello");
        assert_eq!(r.get_binary().unwrap(), b"abc");
        assert_eq!(r.get_float(), Ok(10.0));
        assert_eq!(r.get_double(), Ok(10.0));
        assert!(!r.has_next());
    }

    #[test]
    fn integers() {
        let b = &mut buf(b"3+\x03+\x80\x01-\x01-\x42");
        let mut r = Reader::new(b);
        assert_eq!(r.get_int(), Ok(3));
        assert_eq!(r.get_uint(), Ok(3));
        assert_eq!(r.get_uint(), Ok(128));
        assert_eq!(r.get_int(), Ok(-1));
        assert_eq!(r.get_int(), Ok(-66));
    }

    #[test]
    fn most_negative() {
        let enc = [
            b'-', 0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x01,
        ];
        let b = &mut buf(&enc);
        assert_eq!(Reader::new(b).get_int(), Ok(i64::min_value()));
    }

    #[test]
    fn uint_rejects_negative() {
        let b = &mut buf(b"-\x01");
        assert!(Reader::new(b).get_uint().unwrap_err().is_parse());
    }

    #[test]
    fn type_mismatch() {
        let b = &mut buf(b"N");
        assert_eq!(
            Reader::new(b).get_bool(),
            Err(Error::parse("getBool: expected 'T' or 'F', found 'N'"))
        );
        let b = &mut buf(b"T");
        assert_eq!(
            Reader::new(b).get_string(),
            Err(Error::parse("getString: expected 'S', found 'T'"))
        );
        let b = &mut buf(b"T");
        assert!(Reader::new(b).begin_array().unwrap_err().is_parse());
    }

    #[test]
    fn truncation() {
        let b = &mut buf(b"Sunterminated");
        assert!(Reader::new(b).get_string().unwrap_err().is_parse());
        let b = &mut buf(b"B\x05abc");
        assert!(Reader::new(b).get_binary().unwrap_err().is_parse());
        let b = &mut buf(b"B\x05abc");
        assert!(Reader::new(b).skip_binary().unwrap_err().is_parse());
        let b = &mut buf(b"f\x00\x00");
        assert!(Reader::new(b).get_float().unwrap_err().is_parse());
        let b = &mut buf(b"+\x80");
        assert!(Reader::new(b).get_uint().unwrap_err().is_parse());
        let b = &mut buf(b"[TF");
        assert!(Reader::new(b).read_array(|mut r| r.skip()).unwrap_err().is_parse());
        let b = &mut buf(b"{key");
        assert!(Reader::new(b)
            .read_object(|_, mut r| r.skip())
            .unwrap_err()
            .is_parse());
    }

    #[test]
    fn invalid_utf8() {
        let b = &mut buf(b"S\xff\xfe\x00");
        assert!(Reader::new(b).get_string().unwrap_err().is_parse());
        // skipping does not decode
        let b = &mut buf(b"S\xff\xfe\x00");
        assert!(Reader::new(b).skip_string().is_ok());
    }

    #[test]
    fn nested_arrays() {
        let b = &mut buf(b"[TF[FT]N]");
        let mut r = Reader::new(b);
        let mut seen = Vec::new();
        r.read_array(|mut r| {
            match r.get_type()? {
                Type::Array => {
                    r.read_array(|mut r| {
                        seen.push(format!("inner {}", r.get_bool()?));
                        Ok(())
                    })
                }
                Type::Bool => {
                    seen.push(format!("{}", r.get_bool()?));
                    Ok(())
                }
                _ => {
                    r.get_null()?;
                    seen.push("null".to_owned());
                    Ok(())
                }
            }
        })
        .unwrap();
        assert_eq!(
            seen,
            vec!["true", "false", "inner false", "inner true", "null"]
        );
        assert!(!r.has_next());
    }

    #[test]
    fn object_entries() {
        let b = &mut buf(b"{Hello\x00TGoodbye\x00FSubObj\x00{hello world\x003}x\x002y\x004}");
        let mut r = Reader::new(b);
        let mut obj = r.begin_object().unwrap();

        let (k, mut v) = obj.next().unwrap();
        assert_eq!((k.as_str(), v.get_bool()), ("Hello", Ok(true)));
        let (k, mut v) = obj.next().unwrap();
        assert_eq!((k.as_str(), v.get_bool()), ("Goodbye", Ok(false)));
        let (k, mut v) = obj.next().unwrap();
        assert_eq!(k, "SubObj");
        v.read_object(|k, mut v| {
            assert_eq!(k, "hello world");
            assert_eq!(v.get_int()?, 3);
            Ok(())
        })
        .unwrap();

        let mut key = String::new();
        let mut total = 0;
        while obj.has_next() {
            total += obj.next_into(&mut key).unwrap().get_uint().unwrap();
        }
        assert_eq!(total, 6);
        obj.finish().unwrap();
        assert!(!r.has_next());
    }

    #[test]
    fn element_reader_is_single_value() {
        let b = &mut buf(b"[12]");
        let mut r = Reader::new(b);
        let res = r.read_array(|mut r| {
            r.get_int()?;
            r.get_int().map(drop)
        });
        assert!(res.unwrap_err().is_logic());
    }

    #[test]
    fn unconsumed_element() {
        let b = &mut buf(b"[12]");
        let res = Reader::new(b).read_array(|_| Ok(()));
        assert!(res.unwrap_err().is_logic());

        let b = &mut buf(b"{a\x001}");
        let res = Reader::new(b).read_object(|_, _| Ok(()));
        assert!(res.unwrap_err().is_logic());
    }

    #[test]
    fn unfinished_scope_blocks_parent() {
        let b = &mut buf(b"[]T");
        let mut r = Reader::new(b);
        drop(r.begin_array().unwrap());
        assert!(r.get_type().unwrap_err().is_logic());
        assert!(r.get_bool().unwrap_err().is_logic());
        assert!(r.skip().unwrap_err().is_logic());
    }

    #[test]
    fn mismatched_close() {
        let b = &mut buf(b"[T}");
        let res = Reader::new(b).read_array(|mut r| r.skip());
        assert_eq!(res, Err(Error::parse("getArray: expected ']', found '}'")));
    }

    #[test]
    fn skip_lands_after_value() {
        let docs: &[&[u8]] = &[
            b"T",
            b"N",
            b"7",
            b"+\xff\x01",
            b"-\x80\x01",
            b"Sabc\x00",
            b"B\x02\x00\x00",
            b"f\x00\x00\x80\x7f",
            b"d\x00\x00\x00\x00\x00\x00\xf0\x7f",
            b"[]",
            b"{}",
            b"[T[N[S\x00]]{a\x00[1]}]",
            b"{a\x00{b\x00{c\x00[B\x01]]}}d\x00-\x05}",
        ];
        for doc in docs {
            let mut bytes = doc.to_vec();
            bytes.extend_from_slice(b"Sxyz\x00");
            let b = &mut buf(&bytes);
            let mut r = Reader::new(b);
            r.skip().unwrap();
            assert_eq!(r.get_string().unwrap(), "xyz");
            assert!(!r.has_next());
        }
    }

    #[test]
    fn depth_limit() {
        let b = &mut buf(b"[[[]]]");
        assert!(Reader::with_max_depth(b, 3).skip().is_ok());
        let b = &mut buf(b"[[[]]]");
        assert!(Reader::with_max_depth(b, 2).skip().unwrap_err().is_parse());

        let deep = {
            let mut v = vec![b'['; 2000];
            v.extend(std::iter::repeat(b']').take(2000));
            v
        };
        let b = &mut buf(&deep);
        assert_eq!(
            Reader::with_max_depth(b, 64).skip(),
            Err(Error::parse("nesting too deep: more than 64 levels"))
        );
    }

    fn nested_doc(open: &[u8], leaf: &[u8], close: u8, levels: usize) -> Vec<u8> {
        let mut doc = Vec::new();
        for _ in 0..levels {
            doc.extend_from_slice(open);
        }
        doc.extend_from_slice(leaf);
        doc.extend(std::iter::repeat(close).take(levels));
        doc
    }

    fn nesting(mut v: &Value) -> usize {
        let mut levels = 0;
        loop {
            v = match v {
                Value::Array(vs) if !vs.is_empty() => &vs[0],
                Value::Object(entries) if !entries.is_empty() => &entries[0].1,
                Value::Array(_) | Value::Object(_) => return levels + 1,
                _ => return levels,
            };
            levels += 1;
        }
    }

    #[test]
    fn default_depth_is_readable() {
        let docs = [
            (nested_doc(b"[", b"", b']', DEFAULT_MAX_DEPTH), DEFAULT_MAX_DEPTH),
            (nested_doc(b"{k\x00", b"N", b'}', DEFAULT_MAX_DEPTH), DEFAULT_MAX_DEPTH),
            (nested_doc(b"[", b"7", b']', DEFAULT_MAX_DEPTH), DEFAULT_MAX_DEPTH),
        ];
        for (doc, levels) in docs.iter() {
            let b = &mut buf(doc);
            let v = Reader::new(b).read_value().unwrap();
            assert_eq!(nesting(&v), *levels);
            assert!(!b.has_remaining());

            assert_eq!(nesting(&decode_full(&doc[..]).unwrap()), *levels);

            let b = &mut buf(doc);
            Reader::new(b).skip().unwrap();
            assert!(!b.has_remaining());
        }

        let too_deep = [
            nested_doc(b"[", b"", b']', DEFAULT_MAX_DEPTH + 1),
            nested_doc(b"{k\x00", b"N", b'}', DEFAULT_MAX_DEPTH + 1),
        ];
        for doc in too_deep.iter() {
            assert!(decode_full(&doc[..]).unwrap_err().is_parse());
            let b = &mut buf(doc);
            assert!(Reader::new(b).skip().unwrap_err().is_parse());
        }
    }

    #[test]
    fn finish_rejects_unfinished_child() {
        let b = &mut buf(b"[[]]T");
        let mut r = Reader::new(b);
        {
            let mut outer = r.begin_array().unwrap();
            drop(outer.next().unwrap().begin_array().unwrap());
            assert_eq!(
                outer.finish(),
                Err(Error::Logic("array element's nested scope was never finished"))
            );
        }
        assert!(r.get_type().unwrap_err().is_logic());

        let b = &mut buf(b"{a\x00{}}T");
        let mut r = Reader::new(b);
        {
            let mut outer = r.begin_object().unwrap();
            drop(outer.next().unwrap().1.begin_object().unwrap());
            assert!(outer.finish().unwrap_err().is_logic());
        }
        assert!(r.get_bool().unwrap_err().is_logic());
    }

    #[test]
    fn next_rejects_unfinished_sibling() {
        let b = &mut buf(b"[[T]F]");
        let mut r = Reader::new(b);
        let mut outer = r.begin_array().unwrap();
        drop(outer.next().unwrap().begin_array().unwrap());
        assert!(outer.has_next());
        assert!(outer.next().unwrap_err().is_logic());

        let b = &mut buf(b"{a\x00[T]b\x00F}");
        let mut r = Reader::new(b);
        let mut outer = r.begin_object().unwrap();
        drop(outer.next().unwrap().1.begin_array().unwrap());
        let mut key = String::new();
        assert!(outer.next_into(&mut key).unwrap_err().is_logic());
        assert!(key.is_empty());
    }

    #[test]
    fn read_values() {
        let b = &mut buf(b"{a\x00[1-\x02Sx\x00]b\x00N}");
        let v = Reader::new(b).read_value().unwrap();
        assert_eq!(
            v,
            Value::Object(vec![
                (
                    "a".to_owned(),
                    Value::Array(vec![
                        Value::UInt(1),
                        Value::Int(-2),
                        Value::String("x".to_owned())
                    ])
                ),
                ("b".to_owned(), Value::Null),
            ])
        );
    }
}
