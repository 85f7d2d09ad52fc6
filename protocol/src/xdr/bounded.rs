//! Length-bounded holders for the grammar's variable-length fields.
//!
//! Strings, opaque blocks and arrays on the wire carry a maximum length
//! (`string<28>`, `opaque<64>`, `Operation<100>`). Fields of those types are
//! stored in these wrappers, whose only constructors check the bound, so
//! anything that can be encoded will also decode.

use std::fmt;
use std::ops::{Deref, DerefMut};
use std::str::FromStr;

use super::codec::{XdrDecode, XdrEncode, XdrReader, XdrWriter};
use super::error::XdrError;

fn check_len(len: usize, max: usize) -> Result<(), XdrError> {
    if len > max {
        return Err(XdrError::TooLong { len, max });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// BoundedVec
// ---------------------------------------------------------------------------

/// A variable-length array of at most `MAX` elements.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BoundedVec<T, const MAX: usize>(Vec<T>);

impl<T, const MAX: usize> BoundedVec<T, MAX> {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Appends `item`, or hands back `TooLong` when already at `MAX`.
    pub fn push(&mut self, item: T) -> Result<(), XdrError> {
        check_len(self.0.len() + 1, MAX)?;
        self.0.push(item);
        Ok(())
    }

    pub fn is_full(&self) -> bool {
        self.0.len() >= MAX
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn as_slice(&self) -> &[T] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<T> {
        self.0
    }
}

impl<T, const MAX: usize> Default for BoundedVec<T, MAX> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, const MAX: usize> TryFrom<Vec<T>> for BoundedVec<T, MAX> {
    type Error = XdrError;

    fn try_from(items: Vec<T>) -> Result<Self, Self::Error> {
        check_len(items.len(), MAX)?;
        Ok(Self(items))
    }
}

impl<T, const MAX: usize> From<BoundedVec<T, MAX>> for Vec<T> {
    fn from(items: BoundedVec<T, MAX>) -> Self {
        items.0
    }
}

impl<T, const MAX: usize> Deref for BoundedVec<T, MAX> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.0
    }
}

// Slices can change elements but never the length.
impl<T, const MAX: usize> DerefMut for BoundedVec<T, MAX> {
    fn deref_mut(&mut self) -> &mut [T] {
        &mut self.0
    }
}

impl<'a, T, const MAX: usize> IntoIterator for &'a BoundedVec<T, MAX> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<T: XdrEncode, const MAX: usize> XdrEncode for BoundedVec<T, MAX> {
    fn encode(&self, w: &mut XdrWriter) {
        w.write_array(&self.0);
    }
}

impl<T: XdrDecode, const MAX: usize> XdrDecode for BoundedVec<T, MAX> {
    fn decode(r: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        r.read_array(MAX).map(Self)
    }
}

// ---------------------------------------------------------------------------
// BoundedString
// ---------------------------------------------------------------------------

/// A UTF-8 string of at most `MAX` bytes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct BoundedString<const MAX: usize>(String);

impl<const MAX: usize> BoundedString<MAX> {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl<const MAX: usize> TryFrom<String> for BoundedString<MAX> {
    type Error = XdrError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        check_len(value.len(), MAX)?;
        Ok(Self(value))
    }
}

impl<const MAX: usize> TryFrom<&str> for BoundedString<MAX> {
    type Error = XdrError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::try_from(value.to_string())
    }
}

impl<const MAX: usize> FromStr for BoundedString<MAX> {
    type Err = XdrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from(s)
    }
}

impl<const MAX: usize> Deref for BoundedString<MAX> {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl<const MAX: usize> fmt::Display for BoundedString<MAX> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<const MAX: usize> XdrEncode for BoundedString<MAX> {
    fn encode(&self, w: &mut XdrWriter) {
        w.write_string(&self.0);
    }
}

impl<const MAX: usize> XdrDecode for BoundedString<MAX> {
    fn decode(r: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        r.read_string(MAX).map(Self)
    }
}

// ---------------------------------------------------------------------------
// BoundedBytes
// ---------------------------------------------------------------------------

/// Variable-length opaque data of at most `MAX` bytes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct BoundedBytes<const MAX: usize>(Vec<u8>);

impl<const MAX: usize> BoundedBytes<MAX> {
    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.0
    }
}

impl<const MAX: usize> TryFrom<Vec<u8>> for BoundedBytes<MAX> {
    type Error = XdrError;

    fn try_from(value: Vec<u8>) -> Result<Self, Self::Error> {
        check_len(value.len(), MAX)?;
        Ok(Self(value))
    }
}

impl<const MAX: usize> TryFrom<&[u8]> for BoundedBytes<MAX> {
    type Error = XdrError;

    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        Self::try_from(value.to_vec())
    }
}

impl<const MAX: usize> Deref for BoundedBytes<MAX> {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.0
    }
}

impl<const MAX: usize> XdrEncode for BoundedBytes<MAX> {
    fn encode(&self, w: &mut XdrWriter) {
        w.write_var_opaque(&self.0);
    }
}

impl<const MAX: usize> XdrDecode for BoundedBytes<MAX> {
    fn decode(r: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        r.read_var_opaque(MAX).map(Self)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
