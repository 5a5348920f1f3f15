//! # ABI Words
//!
//! Solidity ABI encoding restricted to what the escrow contracts use: static
//! 32-byte words (`bytes32`, `uint256`, `address`) and a single dynamic
//! `bytes32[]` tail.

use crate::address::Address;
use crate::errors::PrimitiveError;
use crate::hash::Hash;
use primitive_types::U256;

/// Size of one ABI word.
pub const WORD: usize = 32;

/// Big-endian 32-byte word of an integer.
#[must_use]
pub fn u256_word(value: U256) -> [u8; 32] {
    let mut word = [0u8; 32];
    value.to_big_endian(&mut word);
    word
}

/// Appends ABI words to an output buffer.
#[derive(Debug, Clone, Default)]
pub struct AbiEncoder {
    buf: Vec<u8>,
}

impl AbiEncoder {
    /// Empty encoder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw 32-byte word.
    pub fn word(&mut self, word: [u8; 32]) -> &mut Self {
        self.buf.extend_from_slice(&word);
        self
    }

    /// `uint256`.
    pub fn uint(&mut self, value: U256) -> &mut Self {
        self.word(u256_word(value))
    }

    /// `bytes32`.
    pub fn bytes32(&mut self, value: &Hash) -> &mut Self {
        self.word(value.0)
    }

    /// `address`, left-padded.
    pub fn address(&mut self, value: &Address) -> &mut Self {
        self.word(value.to_word())
    }

    /// Dynamic `bytes32[]` tail: length word followed by the elements.
    pub fn bytes32_array(&mut self, values: &[Hash]) -> &mut Self {
        self.uint(U256::from(values.len()));
        for value in values {
            self.bytes32(value);
        }
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

    /// Consumes the encoder.
    #[must_use]
    pub fn finish(self) -> Vec<u8> {
        self.buf
    }
}

/// Reads static ABI words by index.
#[derive(Debug, Clone, Copy)]
pub struct AbiDecoder<'a> {
    data: &'a [u8],
}

impl<'a> AbiDecoder<'a> {
    /// Wraps `data`, which must be a whole number of words.
    pub fn new(data: &'a [u8]) -> Result<Self, PrimitiveError> {
        if data.len() % WORD != 0 {
            return Err(PrimitiveError::MalformedAbi {
                offset: data.len() - data.len() % WORD,
                reason: "trailing partial word",
            });
        }
        Ok(Self { data })
    }

    /// Wraps `data` and requires exactly `words` words.
    pub fn exact(data: &'a [u8], words: usize) -> Result<Self, PrimitiveError> {
        if data.len() != words * WORD {
            return Err(PrimitiveError::InvalidLength {
                expected: words * WORD,
                actual: data.len(),
            });
        }
        Ok(Self { data })
    }

    /// Number of words.
    #[must_use]
    pub fn words(&self) -> usize {
        self.data.len() / WORD
    }

    /// Raw word at `index`.
    pub fn word(&self, index: usize) -> Result<[u8; 32], PrimitiveError> {
        let start = index * WORD;
        let slice = self
            .data
            .get(start..start + WORD)
            .ok_or(PrimitiveError::UnexpectedEnd {
                needed: start + WORD,
                remaining: self.data.len(),
            })?;
        let mut word = [0u8; 32];
        word.copy_from_slice(slice);
        Ok(word)
    }

    /// `uint256` at `index`.
    pub fn uint(&self, index: usize) -> Result<U256, PrimitiveError> {
        Ok(U256::from_big_endian(&self.word(index)?))
    }

    /// `bytes32` at `index`.
    pub fn bytes32(&self, index: usize) -> Result<Hash, PrimitiveError> {
        Ok(Hash::new(self.word(index)?))
    }

    /// `address` at `index`; padding must be zero.
    pub fn address(&self, index: usize) -> Result<Address, PrimitiveError> {
        Address::from_word(&self.word(index)?).map_err(|_| PrimitiveError::MalformedAbi {
            offset: index * WORD,
            reason: "address word has non-zero padding",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_static_words() {
        let mut enc = AbiEncoder::new();
        enc.uint(U256::from(1u8)).address(&Address::new([0xAA; 20]));
        let out = enc.finish();
        assert_eq!(out.len(), 64);
        assert_eq!(out[31], 1);
        assert_eq!(&out[32..44], &[0u8; 12]);
        assert_eq!(&out[44..], &[0xAA; 20]);
    }

    #[test]
    fn test_bytes32_array_tail() {
        let mut enc = AbiEncoder::new();
        enc.bytes32_array(&[Hash::new([1; 32]), Hash::new([2; 32])]);
        let out = enc.finish();
        assert_eq!(out.len(), 96);
        assert_eq!(out[31], 2);
        assert_eq!(out[32], 1);
        assert_eq!(out[64], 2);
    }

    #[test]
    fn test_decoder_reads_back() {
        let mut enc = AbiEncoder::new();
        enc.bytes32(&Hash::new([7; 32]))
            .uint(U256::from(42u64))
            .address(&Address::new([3; 20]));
        let bytes = enc.finish();
        let dec = AbiDecoder::exact(&bytes, 3).unwrap();
        assert_eq!(dec.bytes32(0).unwrap(), Hash::new([7; 32]));
        assert_eq!(dec.uint(1).unwrap(), U256::from(42u64));
        assert_eq!(dec.address(2).unwrap(), Address::new([3; 20]));
        assert!(dec.word(3).is_err());
    }

    #[test]
    fn test_decoder_rejects_partial_word() {
        assert!(AbiDecoder::new(&[0u8; 33]).is_err());
        assert!(matches!(
            AbiDecoder::exact(&[0u8; 64], 3),
            Err(PrimitiveError::InvalidLength {
                expected: 96,
                actual: 64
            })
        ));
    }

    #[test]
    fn test_dirty_address_padding() {
        let mut word = [0u8; 32];
        word[0] = 1;
        let dec = AbiDecoder::new(&word).unwrap();
        assert!(matches!(
            dec.address(0),
            Err(PrimitiveError::MalformedAbi { offset: 0, .. })
        ));
    }
}
