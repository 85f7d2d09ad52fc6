//! Primitive XDR encoding (RFC 4506) over a growable buffer and a byte cursor.
//!
//! Every XDR item occupies a multiple of four bytes. Integers are big-endian,
//! opaque blocks and strings are zero-padded to the next 4-byte boundary, and
//! variable-length items carry a `u32` length prefix. Composite types are
//! written by straight-line sequencing of these calls, so the field order in
//! an `encode` body *is* the wire format.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use super::error::XdrError;

/// Number of zero bytes needed to pad `len` up to a multiple of four.
pub fn padding_for(len: usize) -> usize {
    (4 - len % 4) % 4
}

// ---------------------------------------------------------------------------
// Traits
// ---------------------------------------------------------------------------

/// A value with a fixed XDR encoding.
pub trait XdrEncode {
    /// Appends the encoding of `self` to the writer.
    fn encode(&self, w: &mut XdrWriter);

    /// Encodes `self` into a fresh byte vector.
    fn to_xdr(&self) -> Vec<u8> {
        let mut w = XdrWriter::new();
        self.encode(&mut w);
        w.into_bytes()
    }

    /// Encodes `self` and wraps the bytes in standard base64, the form
    /// Horizon accepts and returns.
    fn to_xdr_base64(&self) -> String {
        STANDARD.encode(self.to_xdr())
    }
}

/// A value that can be read back from its XDR encoding.
pub trait XdrDecode: Sized {
    /// Reads one value from the cursor, consuming exactly its encoded bytes.
    fn decode(r: &mut XdrReader<'_>) -> Result<Self, XdrError>;

    /// Decodes a complete buffer. Leftover bytes are an error.
    fn from_xdr(bytes: &[u8]) -> Result<Self, XdrError> {
        let mut r = XdrReader::new(bytes);
        let value = Self::decode(&mut r)?;
        r.finish()?;
        Ok(value)
    }

    /// Decodes a base64-wrapped buffer.
    fn from_xdr_base64(encoded: &str) -> Result<Self, XdrError> {
        let bytes = STANDARD
            .decode(encoded.trim())
            .map_err(|e| XdrError::InvalidEncoding(format!("base64: {e}")))?;
        Self::from_xdr(&bytes)
    }
}

// ---------------------------------------------------------------------------
// Writer
// ---------------------------------------------------------------------------

/// Append-only XDR output buffer.
#[derive(Debug, Default, Clone)]
pub struct XdrWriter {
    buf: Vec<u8>,
}

impl XdrWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    pub fn write_u32(&mut self, value: u32) {
        self.buf.extend_from_slice(&value.to_be_bytes());
    }

    pub fn write_i32(&mut self, value: i32) {
        self.buf.extend_from_slice(&value.to_be_bytes());
    }

    pub fn write_u64(&mut self, value: u64) {
        self.buf.extend_from_slice(&value.to_be_bytes());
    }

    pub fn write_i64(&mut self, value: i64) {
        self.buf.extend_from_slice(&value.to_be_bytes());
    }

    /// Booleans are 32-bit integers; only 0 and 1 are ever written.
    pub fn write_bool(&mut self, value: bool) {
        self.write_u32(u32::from(value));
    }

    /// Union discriminants are signed 32-bit integers.
    pub fn write_discriminant(&mut self, discriminant: i32) {
        self.write_i32(discriminant);
    }

    /// Fixed-length opaque data: the width is known from context and is not
    /// written, only the bytes and their padding.
    pub fn write_fixed_opaque(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
        self.pad(bytes.len());
    }

    /// Variable-length opaque data: `u32` length, bytes, padding.
    pub fn write_var_opaque(&mut self, bytes: &[u8]) {
        self.write_u32(bytes.len() as u32);
        self.write_fixed_opaque(bytes);
    }

    /// Strings are variable-length opaque data over their UTF-8 bytes.
    pub fn write_string(&mut self, value: &str) {
        self.write_var_opaque(value.as_bytes());
    }

    /// Optional value: presence flag, then the value when present.
    pub fn write_optional<T: XdrEncode>(&mut self, value: Option<&T>) {
        self.write_optional_with(value, |w, v| v.encode(w));
    }

    /// Optional value written as a variable-length array of zero or one
    /// elements. Byte-identical to [`write_optional`](Self::write_optional);
    /// the difference is only in how a decoder rejects bad counts.
    pub fn write_optional_as_array<T: XdrEncode>(&mut self, value: Option<&T>) {
        self.write_optional(value);
    }

    /// Optional value whose body is written by `write`.
    pub fn write_optional_with<T>(&mut self, value: Option<T>, write: impl FnOnce(&mut Self, T)) {
        match value {
            Some(v) => {
                self.write_u32(1);
                write(self, v);
            }
            None => self.write_u32(0),
        }
    }

    /// Variable-length array: element count, then each element.
    pub fn write_array<T: XdrEncode>(&mut self, items: &[T]) {
        self.write_u32(items.len() as u32);
        self.write_fixed_array(items);
    }

    /// Fixed-length array: elements only, no count.
    pub fn write_fixed_array<T: XdrEncode>(&mut self, items: &[T]) {
        for item in items {
            item.encode(self);
        }
    }

    fn pad(&mut self, len: usize) {
        let padding = padding_for(len);
        self.buf.extend(std::iter::repeat(0u8).take(padding));
    }
}

// ---------------------------------------------------------------------------
// Reader
// ---------------------------------------------------------------------------

/// Forward-only cursor over an XDR byte slice.
#[derive(Debug, Clone)]
pub struct XdrReader<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> XdrReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, offset: 0 }
    }

    /// Current cursor position.
    pub fn position(&self) -> usize {
        self.offset
    }

    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.offset)
    }

    /// Asserts the whole input was consumed.
    pub fn finish(self) -> Result<(), XdrError> {
        match self.remaining() {
            0 => Ok(()),
            remaining => Err(XdrError::TrailingBytes { remaining }),
        }
    }

    fn take(&mut self, count: usize) -> Result<&'a [u8], XdrError> {
        if count > self.remaining() {
            return Err(XdrError::TruncatedInput {
                offset: self.offset,
                needed: count,
                remaining: self.remaining(),
            });
        }
        let slice = &self.data[self.offset..self.offset + count];
        self.offset += count;
        Ok(slice)
    }

    fn take_array<const N: usize>(&mut self) -> Result<[u8; N], XdrError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }

    fn skip_padding(&mut self, len: usize) -> Result<(), XdrError> {
        let start = self.offset;
        let padding = self.take(padding_for(len))?;
        if padding.iter().any(|b| *b != 0) {
            return Err(XdrError::InvalidPadding { offset: start });
        }
        Ok(())
    }

    pub fn read_u32(&mut self) -> Result<u32, XdrError> {
        Ok(u32::from_be_bytes(self.take_array()?))
    }

    pub fn read_i32(&mut self) -> Result<i32, XdrError> {
        Ok(i32::from_be_bytes(self.take_array()?))
    }

    pub fn read_u64(&mut self) -> Result<u64, XdrError> {
        Ok(u64::from_be_bytes(self.take_array()?))
    }

    pub fn read_i64(&mut self) -> Result<i64, XdrError> {
        Ok(i64::from_be_bytes(self.take_array()?))
    }

    /// Any nonzero value decodes as `true`.
    pub fn read_bool(&mut self) -> Result<bool, XdrError> {
        Ok(self.read_u32()? != 0)
    }

    pub fn read_discriminant(&mut self) -> Result<i32, XdrError> {
        self.read_i32()
    }

    /// Builds the error for a discriminant just read that matched no arm.
    pub fn unknown_variant(&self, union: &'static str, discriminant: i32) -> XdrError {
        XdrError::UnknownVariant {
            union,
            discriminant,
            offset: self.offset.saturating_sub(4),
        }
    }

    pub fn read_fixed_opaque<const N: usize>(&mut self) -> Result<[u8; N], XdrError> {
        let bytes = self.take_array::<N>()?;
        self.skip_padding(N)?;
        Ok(bytes)
    }

    /// Reads a length-prefixed opaque block of at most `max` bytes.
    pub fn read_var_opaque(&mut self, max: usize) -> Result<Vec<u8>, XdrError> {
        let len = self.read_length(max)?;
        if len > self.remaining() {
            return Err(XdrError::LengthMismatch {
                offset: self.offset - 4,
                declared: len,
                allowed: self.remaining(),
            });
        }
        let bytes = self.take(len)?.to_vec();
        self.skip_padding(len)?;
        Ok(bytes)
    }

    /// Reads a UTF-8 string of at most `max` bytes.
    pub fn read_string(&mut self, max: usize) -> Result<String, XdrError> {
        let start = self.offset;
        let bytes = self.read_var_opaque(max)?;
        String::from_utf8(bytes)
            .map_err(|e| XdrError::InvalidEncoding(format!("string at offset {start}: {e}")))
    }

    pub fn read_optional<T: XdrDecode>(&mut self) -> Result<Option<T>, XdrError> {
        self.read_optional_with(T::decode)
    }

    /// Optional value whose body is read by `read`.
    pub fn read_optional_with<T>(
        &mut self,
        read: impl FnOnce(&mut Self) -> Result<T, XdrError>,
    ) -> Result<Option<T>, XdrError> {
        let offset = self.offset;
        match self.read_u32()? {
            0 => Ok(None),
            1 => Ok(Some(read(self)?)),
            flag => Err(XdrError::InvalidDiscriminant { offset, flag }),
        }
    }

    /// Reads an optional value carried as a zero-or-one element array.
    pub fn read_optional_as_array<T: XdrDecode>(&mut self) -> Result<Option<T>, XdrError> {
        self.read_optional_as_array_with(T::decode)
    }

    /// Zero-or-one element array whose element is read by `read`. A count
    /// above one is a length error, not a presence-flag error.
    pub fn read_optional_as_array_with<T>(
        &mut self,
        read: impl FnOnce(&mut Self) -> Result<T, XdrError>,
    ) -> Result<Option<T>, XdrError> {
        match self.read_length(1)? {
            0 => Ok(None),
            _ => Ok(Some(read(self)?)),
        }
    }

    /// Reads a counted array of at most `max` elements. The bound is checked
    /// before anything is allocated.
    pub fn read_array<T: XdrDecode>(&mut self, max: usize) -> Result<Vec<T>, XdrError> {
        let count = self.read_length(max)?;
        self.read_fixed_array(count)
    }

    pub fn read_fixed_array<T: XdrDecode>(&mut self, count: usize) -> Result<Vec<T>, XdrError> {
        let mut items = Vec::with_capacity(count);
        for _ in 0..count {
            items.push(T::decode(self)?);
        }
        Ok(items)
    }

    fn read_length(&mut self, max: usize) -> Result<usize, XdrError> {
        let offset = self.offset;
        let declared = self.read_u32()? as usize;
        if declared > max {
            return Err(XdrError::LengthMismatch {
                offset,
                declared,
                allowed: max,
            });
        }
        Ok(declared)
    }
}

// ---------------------------------------------------------------------------
// Primitive impls
// ---------------------------------------------------------------------------

macro_rules! impl_xdr_int {
    ($ty:ty, $write:ident, $read:ident) => {
        impl XdrEncode for $ty {
            fn encode(&self, w: &mut XdrWriter) {
                w.$write(*self);
            }
        }

        impl XdrDecode for $ty {
            fn decode(r: &mut XdrReader<'_>) -> Result<Self, XdrError> {
                r.$read()
            }
        }
    };
}

impl_xdr_int!(u32, write_u32, read_u32);
impl_xdr_int!(i32, write_i32, read_i32);
impl_xdr_int!(u64, write_u64, read_u64);
impl_xdr_int!(i64, write_i64, read_i64);
impl_xdr_int!(bool, write_bool, read_bool);

impl<const N: usize> XdrEncode for [u8; N] {
    fn encode(&self, w: &mut XdrWriter) {
        w.write_fixed_opaque(self);
    }
}

impl<const N: usize> XdrDecode for [u8; N] {
    fn decode(r: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        r.read_fixed_opaque::<N>()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
