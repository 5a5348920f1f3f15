//! # Packed Bytes
//!
//! Big-endian `abi.encodePacked`-style builder and the matching cursor used
//! to parse extension payloads field by field.

use crate::address::Address;
use crate::errors::{encode_hex, PrimitiveError};
use crate::hash::Hash;
use primitive_types::U256;

/// Appends fixed-width big-endian integers and raw bytes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BytesBuilder {
    buf: Vec<u8>,
}

impl BytesBuilder {
    /// Empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes the low `width` bytes of `value`, failing if it does not fit.
    pub fn add_uint(&mut self, value: u64, width: usize) -> Result<&mut Self, PrimitiveError> {
        if width < 8 && value >> (width * 8) != 0 {
            return Err(PrimitiveError::Overflow { bits: width * 8 });
        }
        let be = value.to_be_bytes();
        self.buf.resize(self.buf.len() + width.saturating_sub(8), 0);
        self.buf.extend_from_slice(&be[8 - width.min(8)..]);
        Ok(self)
    }

    /// `uint8`.
    pub fn add_u8(&mut self, value: u8) -> &mut Self {
        self.buf.push(value);
        self
    }

    /// `uint16`.
    pub fn add_u16(&mut self, value: u16) -> &mut Self {
        self.buf.extend_from_slice(&value.to_be_bytes());
        self
    }

    /// `uint24`.
    pub fn add_u24(&mut self, value: u32) -> Result<&mut Self, PrimitiveError> {
        self.add_uint(u64::from(value), 3)
    }

    /// `uint32`.
    pub fn add_u32(&mut self, value: u32) -> &mut Self {
        self.buf.extend_from_slice(&value.to_be_bytes());
        self
    }

    /// `uint64`.
    pub fn add_u64(&mut self, value: u64) -> &mut Self {
        self.buf.extend_from_slice(&value.to_be_bytes());
        self
    }

    /// `uint256`.
    pub fn add_u256(&mut self, value: U256) -> &mut Self {
        let mut word = [0u8; 32];
        value.to_big_endian(&mut word);
        self.buf.extend_from_slice(&word);
        self
    }

    /// 20 raw address bytes.
    pub fn add_address(&mut self, value: &Address) -> &mut Self {
        self.buf.extend_from_slice(value.as_bytes());
        self
    }

    /// 32 raw bytes.
    pub fn add_bytes32(&mut self, value: &Hash) -> &mut Self {
        self.buf.extend_from_slice(value.as_bytes());
        self
    }

    /// Raw bytes.
    pub fn add_bytes(&mut self, value: &[u8]) -> &mut Self {
        self.buf.extend_from_slice(value);
        self
    }

    /// Bytes written so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// True when nothing was written.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// `0x`-prefixed hex of the contents.
    #[must_use]
    pub fn as_hex(&self) -> String {
        encode_hex(&self.buf)
    }

    /// Consumes the builder.
    #[must_use]
    pub fn finish(self) -> Vec<u8> {
        self.buf
    }
}

/// Forward-only cursor over packed bytes.
#[derive(Debug, Clone)]
pub struct BytesIter<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> BytesIter<'a> {
    /// Cursor at the start of `data`.
    #[must_use]
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Bytes not yet consumed.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// True when everything was consumed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Next `n` bytes.
    pub fn next_bytes(&mut self, n: usize) -> Result<&'a [u8], PrimitiveError> {
        if n > self.remaining() {
            return Err(PrimitiveError::UnexpectedEnd {
                needed: n,
                remaining: self.remaining(),
            });
        }
        let out = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(out)
    }

    /// Everything left.
    pub fn rest(&mut self) -> &'a [u8] {
        let out = &self.data[self.pos..];
        self.pos = self.data.len();
        out
    }

    /// Next big-endian unsigned integer of `width` bytes (at most 8).
    pub fn next_uint(&mut self, width: usize) -> Result<u64, PrimitiveError> {
        if width > 8 {
            return Err(PrimitiveError::Overflow { bits: 64 });
        }
        let bytes = self.next_bytes(width)?;
        Ok(bytes.iter().fold(0u64, |acc, b| (acc << 8) | u64::from(*b)))
    }

    /// `uint8`.
    pub fn next_u8(&mut self) -> Result<u8, PrimitiveError> {
        Ok(self.next_bytes(1)?[0])
    }

    /// `uint16`.
    pub fn next_u16(&mut self) -> Result<u16, PrimitiveError> {
        let b = self.next_bytes(2)?;
        Ok(u16::from_be_bytes([b[0], b[1]]))
    }

    /// `uint24`.
    pub fn next_u24(&mut self) -> Result<u32, PrimitiveError> {
        let b = self.next_bytes(3)?;
        Ok(u32::from_be_bytes([0, b[0], b[1], b[2]]))
    }

    /// `uint32`.
    pub fn next_u32(&mut self) -> Result<u32, PrimitiveError> {
        let b = self.next_bytes(4)?;
        Ok(u32::from_be_bytes([b[0], b[1], b[2], b[3]]))
    }

    /// `uint256`.
    pub fn next_u256(&mut self) -> Result<U256, PrimitiveError> {
        Ok(U256::from_big_endian(self.next_bytes(32)?))
    }

    /// 20 raw address bytes.
    pub fn next_address(&mut self) -> Result<Address, PrimitiveError> {
        Address::from_slice(self.next_bytes(20)?)
    }

    /// 32 raw bytes.
    pub fn next_bytes32(&mut self) -> Result<Hash, PrimitiveError> {
        Hash::from_slice(self.next_bytes(32)?)
    }
}
