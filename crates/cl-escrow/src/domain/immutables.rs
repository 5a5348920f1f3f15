//! # Immutables
//!
//! The parameter record an escrow is deployed with. Its keccak256 hash is
//! the CREATE2 salt, so every field here pins the escrow address.
//!
//! Encoded as the ABI tuple
//! `(bytes32 orderHash, bytes32 hashlock, address maker, address taker,
//! address token, uint256 amount, uint256 safetyDeposit, uint256 timelocks)`.

use super::errors::EscrowError;
use super::hash_lock::HashLock;
use super::time_locks::TimeLocks;
use cl_primitives::{keccak256, AbiDecoder, AbiEncoder, Address, Hash, U256};
use serde::{Deserialize, Serialize};

/// Encoded size: eight static words.
pub const IMMUTABLES_ENCODED_LEN: usize = 8 * 32;

/// Constructor arguments for [`Immutables`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImmutablesParams {
    /// Limit-order hash
    pub order_hash: Hash,
    /// Single-fill lock or the Merkle leaf being filled
    pub hash_lock: HashLock,
    /// Maker
    pub maker: Address,
    /// Address that may withdraw; receives funds on public withdrawal
    pub taker: Address,
    /// Escrowed token; zero means the native coin
    pub token: Address,
    /// Escrowed amount
    pub amount: U256,
    /// Native-coin deposit paid to whoever completes the escrow
    pub safety_deposit: U256,
    /// Stage delays and deployment anchor
    pub time_locks: TimeLocks,
}

/// Destination-side fields learned from the source escrow event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DstImmutablesComplement {
    /// Maker address on the destination chain
    pub maker: Address,
    /// Amount to lock on the destination chain
    pub amount: U256,
    /// Token on the destination chain
    pub token: Address,
    /// Destination safety deposit
    pub safety_deposit: U256,
}

impl DstImmutablesComplement {
    /// Creates a complement; a zero token means the native coin.
    pub fn new(maker: Address, amount: U256, token: Address, safety_deposit: U256) -> Self {
        Self {
            maker,
            amount,
            token,
            safety_deposit,
        }
    }
}

/// JSON shape of [`Immutables`]: hex values, decimal integers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImmutablesData {
    /// Order hash
    pub order_hash: Hash,
    /// Hash-lock value
    pub hashlock: Hash,
    /// Maker
    pub maker: Address,
    /// Taker
    pub taker: Address,
    /// Token; zero address for the native coin
    pub token: Address,
    /// Decimal amount
    pub amount: String,
    /// Decimal safety deposit
    pub safety_deposit: String,
    /// Decimal packed time-locks
    pub timelocks: String,
}

/// Canonical escrow parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Immutables {
    order_hash: Hash,
    hash_lock: HashLock,
    maker: Address,
    taker: Address,
    token: Address,
    amount: U256,
    safety_deposit: U256,
    time_locks: TimeLocks,
}

fn canonical_token(token: Address) -> Address {
    if token.is_zero() {
        Address::NATIVE_CURRENCY
    } else {
        token
    }
}

fn parse_decimal(value: &str) -> Result<U256, EscrowError> {
    U256::from_dec_str(value).map_err(|_| EscrowError::InvalidAmount(value.to_string()))
}

impl Immutables {
    /// Creates immutables; a zero token becomes the native-currency sentinel.
    pub fn new(params: ImmutablesParams) -> Self {
        Self {
            order_hash: params.order_hash,
            hash_lock: params.hash_lock,
            maker: params.maker,
            taker: params.taker,
            token: canonical_token(params.token),
            amount: params.amount,
            safety_deposit: params.safety_deposit,
            time_locks: params.time_locks,
        }
    }

    /// ABI-decode the fixed tuple.
    pub fn decode(bytes: &[u8]) -> Result<Self, EscrowError> {
        let dec = AbiDecoder::exact(bytes, 8)?;
        Ok(Self::new(ImmutablesParams {
            order_hash: dec.bytes32(0)?,
            hash_lock: HashLock::new(dec.bytes32(1)?),
            maker: dec.address(2)?,
            taker: dec.address(3)?,
            token: dec.address(4)?,
            amount: dec.uint(5)?,
            safety_deposit: dec.uint(6)?,
            time_locks: TimeLocks::from_u256(dec.uint(7)?)?,
        }))
    }

    /// ABI-encode the fixed tuple; the native coin is written as zero.
    pub fn encode(&self) -> Vec<u8> {
        let mut enc = AbiEncoder::new();
        enc.bytes32(&self.order_hash)
            .bytes32(&self.hash_lock.value())
            .address(&self.maker)
            .address(&self.taker)
            .address(&self.serialized_token())
            .uint(self.amount)
            .uint(self.safety_deposit)
            .uint(self.time_locks.build());
        enc.finish()
    }

    /// keccak256 of [`Self::encode`]; the CREATE2 salt.
    pub fn hash(&self) -> Hash {
        keccak256(self.encode())
    }

    /// JSON shape.
    pub fn build(&self) -> ImmutablesData {
        ImmutablesData {
            order_hash: self.order_hash,
            hashlock: self.hash_lock.value(),
            maker: self.maker,
            taker: self.taker,
            token: self.serialized_token(),
            amount: self.amount.to_string(),
            safety_deposit: self.safety_deposit.to_string(),
            timelocks: self.time_locks.build().to_string(),
        }
    }

    /// Parse the JSON shape.
    pub fn from_data(data: &ImmutablesData) -> Result<Self, EscrowError> {
        Ok(Self::new(ImmutablesParams {
            order_hash: data.order_hash,
            hash_lock: HashLock::new(data.hashlock),
            maker: data.maker,
            taker: data.taker,
            token: data.token,
            amount: parse_decimal(&data.amount)?,
            safety_deposit: parse_decimal(&data.safety_deposit)?,
            time_locks: TimeLocks::from_u256(parse_decimal(&data.timelocks)?)?,
        }))
    }

    fn params(&self) -> ImmutablesParams {
        ImmutablesParams {
            order_hash: self.order_hash,
            hash_lock: self.hash_lock,
            maker: self.maker,
            taker: self.taker,
            token: self.token,
            amount: self.amount,
            safety_deposit: self.safety_deposit,
            time_locks: self.time_locks,
        }
    }

    /// Copy with the destination-side fields replaced.
    pub fn with_complement(&self, complement: &DstImmutablesComplement) -> Self {
        Self::new(ImmutablesParams {
            maker: complement.maker,
            amount: complement.amount,
            token: complement.token,
            safety_deposit: complement.safety_deposit,
            ..self.params()
        })
    }

    /// Copy with a different taker.
    pub fn with_taker(&self, taker: Address) -> Self {
        Self::new(ImmutablesParams {
            taker,
            ..self.params()
        })
    }

    /// Copy with time-locks anchored at `time`.
    pub fn with_deployed_at(&self, time: u64) -> Result<Self, EscrowError> {
        Ok(Self::new(ImmutablesParams {
            time_locks: self.time_locks.with_deployed_at(time)?,
            ..self.params()
        }))
    }

    /// Copy with a different hash-lock.
    pub fn with_hash_lock(&self, hash_lock: HashLock) -> Self {
        Self::new(ImmutablesParams {
            hash_lock,
            ..self.params()
        })
    }

    /// Copy with a different amount.
    pub fn with_amount(&self, amount: U256) -> Self {
        Self::new(ImmutablesParams {
            amount,
            ..self.params()
        })
    }

    fn serialized_token(&self) -> Address {
        if self.token.is_native() {
            Address::ZERO
        } else {
            self.token
        }
    }

    /// Order hash.
    pub fn order_hash(&self) -> Hash {
        self.order_hash
    }

    /// Hash-lock.
    pub fn hash_lock(&self) -> HashLock {
        self.hash_lock
    }

    /// Maker.
    pub fn maker(&self) -> Address {
        self.maker
    }

    /// Taker.
    pub fn taker(&self) -> Address {
        self.taker
    }

    /// Token; [`Address::NATIVE_CURRENCY`] for the native coin.
    pub fn token(&self) -> Address {
        self.token
    }

    /// Amount.
    pub fn amount(&self) -> U256 {
        self.amount
    }

    /// Safety deposit.
    pub fn safety_deposit(&self) -> U256 {
        self.safety_deposit
    }

    /// Time-locks.
    pub fn time_locks(&self) -> TimeLocks {
        self.time_locks
    }
}

impl Serialize for Immutables {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.build().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Immutables {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let data = ImmutablesData::deserialize(deserializer)?;
        Self::from_data(&data).map_err(serde::de::Error::custom)
    }
}
