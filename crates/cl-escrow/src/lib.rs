//! # Crosslock Escrow
//!
//! Parameters of the two escrows behind a cross-chain atomic swap.
//!
//! ## Purpose
//!
//! Makers, resolvers and relayers compute the same escrow parameters
//! independently and must agree bit for bit with the on-chain contracts:
//! - Hash-locks binding one or many secrets to a withdrawal right
//! - Time-lock stages deciding who may withdraw or cancel, and when
//! - Immutables, the hashed record that pins an escrow address
//! - Deterministic escrow addresses (CREATE2 and zkSync Era)
//!
//! ## Module Structure
//!
//! ```text
//! cl-escrow/
//! ├── domain/          # HashLock, TimeLocks, Immutables, ChainId, errors
//! ├── algorithms/      # Merkle tree, secrets, CREATE2
//! └── factory          # EscrowFactory, EscrowFactoryZksync, facade
//! ```
//!
//! Everything here is a pure function of its inputs. Time is always a
//! parameter.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod algorithms;
pub mod domain;
pub mod factory;

// Re-exports
pub use algorithms::{
    calc_proxy_bytecode_hash, create2_address, generate_random_secret, hash_secret,
    verify_secret, zksync_create2_address, SortedPairMerkleTree,
};
pub use domain::{
    ChainId, DstImmutablesComplement, DstStage, DstTimeLocks, EscrowAction, EscrowError,
    EscrowPhase, EscrowSide, HashLock, Immutables, ImmutablesData, ImmutablesParams,
    RescueStart, SecureSecret, SrcStage, SrcTimeLocks, TimeLockDurations, TimeLockParams,
    TimeLocks, DEFAULT_RESCUE_DELAY,
};
pub use factory::{
    EscrowAddressDerivation, EscrowFactory, EscrowFactoryFacade, EscrowFactoryZksync,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
