//! # Resolver Whitelist
//!
//! Which resolvers may fill an order, and from when.
//!
//! Each entry stores the last 10 bytes of a resolver address and a delay
//! relative to the previous entry; the first delay is relative to the
//! resolving start. The first resolver whose allowed time is strictly
//! earlier than everyone else's holds an exclusivity window.

use crate::errors::AuctionError;
use cl_primitives::{Address, BytesBuilder, BytesIter, PrimitiveError, UINT_16_MAX, UINT_32_MAX};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Last 10 bytes of a resolver address.
pub type AddressHalf = [u8; 10];

/// One whitelisted resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WhitelistItem {
    /// Address suffix.
    #[serde(with = "half_hex")]
    pub address_half: AddressHalf,
    /// Seconds after the previous entry's allowed time.
    pub delay: u64,
}

mod half_hex {
    use super::AddressHalf;
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(half: &AddressHalf, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&cl_primitives::encode_hex(half))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<AddressHalf, D::Error> {
        let raw = String::deserialize(d)?;
        let bytes = cl_primitives::decode_hex(&raw).map_err(D::Error::custom)?;
        AddressHalf::try_from(bytes.as_slice()).map_err(D::Error::custom)
    }
}

/// Resolver whitelist anchored at a resolving start time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Whitelist {
    resolving_start_time: u64,
    whitelist: Vec<WhitelistItem>,
}

impl Whitelist {
    /// Build from resolvers and the time each may start filling.
    ///
    /// Times earlier than `resolving_start_time` are clamped to it; entries
    /// are ordered by allowed time.
    pub fn new(
        resolving_start_time: u64,
        entries: &[(Address, u64)],
    ) -> Result<Self, AuctionError> {
        if entries.is_empty() {
            return Err(AuctionError::EmptyWhitelist);
        }
        if resolving_start_time > UINT_32_MAX {
            return Err(AuctionError::FieldTooWide {
                field: "resolvingStartTime",
                bits: 32,
                value: resolving_start_time,
            });
        }

        let mut sorted: Vec<(AddressHalf, u64)> = entries
            .iter()
            .map(|(address, allow_from)| {
                (address.last_half(), (*allow_from).max(resolving_start_time))
            })
            .collect();
        sorted.sort_by_key(|(_, allow_from)| *allow_from);

        let mut cumulative = resolving_start_time;
        let mut whitelist = Vec::with_capacity(sorted.len());
        for (address_half, allow_from) in sorted {
            let delay = allow_from - cumulative;
            cumulative = allow_from;
            whitelist.push(WhitelistItem {
                address_half,
                delay,
            });
        }

        debug!(
            "[cl-auction] Built whitelist of {} resolvers from {}",
            whitelist.len(),
            resolving_start_time
        );
        Self::from_items(resolving_start_time, whitelist)
    }

    /// Wrap already delay-encoded entries.
    pub fn from_items(
        resolving_start_time: u64,
        whitelist: Vec<WhitelistItem>,
    ) -> Result<Self, AuctionError> {
        if whitelist.is_empty() {
            return Err(AuctionError::EmptyWhitelist);
        }
        if whitelist.len() > u8::MAX as usize {
            return Err(AuctionError::FieldTooWide {
                field: "whitelist",
                bits: 8,
                value: whitelist.len() as u64,
            });
        }
        if let Some(item) = whitelist.iter().find(|item| item.delay >= UINT_16_MAX) {
            return Err(AuctionError::WhitelistDelayTooBig(item.delay));
        }
        Ok(Self {
            resolving_start_time,
            whitelist,
        })
    }

    /// Resolving start, unix seconds.
    pub fn resolving_start_time(&self) -> u64 {
        self.resolving_start_time
    }

    /// Entries in allowed-time order.
    pub fn items(&self) -> &[WhitelistItem] {
        &self.whitelist
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.whitelist.len()
    }

    /// Always false for a constructed whitelist.
    pub fn is_empty(&self) -> bool {
        self.whitelist.is_empty()
    }

    /// Check if `executor` may fill at `time`.
    pub fn can_execute_at(&self, executor: &Address, time: u64) -> bool {
        let half = executor.last_half();
        let mut allowed_from = self.resolving_start_time;

        for item in &self.whitelist {
            allowed_from += item.delay;
            if item.address_half == half {
                return time >= allowed_from;
            }
            if time < allowed_from {
                return false;
            }
        }
        false
    }

    /// Check if `time` falls in the first resolver's exclusive window.
    pub fn is_exclusivity_period(&self, time: u64) -> bool {
        match self.whitelist.as_slice() {
            [_] => true,
            [first, second, ..] if first.delay == second.delay => false,
            [_, second, ..] => time <= self.resolving_start_time + second.delay,
            [] => false,
        }
    }

    /// Check if `resolver` is the one holding the exclusivity window.
    pub fn is_exclusive_resolver(&self, resolver: &Address) -> bool {
        let half = resolver.last_half();
        match self.whitelist.as_slice() {
            [first, second, ..] if first.delay == second.delay => false,
            [first, ..] => first.address_half == half,
            [] => false,
        }
    }

    /// Check if `address` appears at all.
    pub fn is_whitelisted(&self, address: &Address) -> bool {
        let half = address.last_half();
        self.whitelist.iter().any(|item| item.address_half == half)
    }

    /// Packed bytes: u32 start, u8 count, then 10-byte half and u16 delay per entry.
    pub fn encode(&self) -> Vec<u8> {
        let mut out = BytesBuilder::new();
        self.encode_into(&mut out);
        out.finish()
    }

    /// Append the packed bytes to `out`.
    pub fn encode_into(&self, out: &mut BytesBuilder) {
        out.add_u32(self.resolving_start_time as u32);
        out.add_u8(self.whitelist.len() as u8);
        for item in &self.whitelist {
            out.add_bytes(&item.address_half);
            out.add_u16(item.delay as u16);
        }
    }

    /// Parse packed bytes; trailing bytes are an error.
    pub fn decode(data: &[u8]) -> Result<Self, AuctionError> {
        let mut iter = BytesIter::new(data);
        let whitelist = Self::decode_from(&mut iter)?;
        if !iter.is_empty() {
            return Err(PrimitiveError::InvalidLength {
                expected: data.len() - iter.remaining(),
                actual: data.len(),
            }
            .into());
        }
        Ok(whitelist)
    }

    /// Parse packed bytes from a cursor, leaving the rest unread.
    pub fn decode_from(iter: &mut BytesIter<'_>) -> Result<Self, AuctionError> {
        let resolving_start_time = iter.next_u32()? as u64;
        let count = iter.next_u8()?;
        let mut whitelist = Vec::with_capacity(count as usize);
        for _ in 0..count {
            let mut address_half = [0u8; 10];
            address_half.copy_from_slice(iter.next_bytes(10)?);
            let delay = iter.next_u16()? as u64;
            whitelist.push(WhitelistItem {
                address_half,
                delay,
            });
        }
        Self::from_items(resolving_start_time, whitelist)
    }
}
