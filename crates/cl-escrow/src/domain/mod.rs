//! # Domain Module
//!
//! Core value types for escrow parameters.

pub mod errors;
pub mod hash_lock;
pub mod immutables;
pub mod secure_secret;
pub mod time_locks;
pub mod value_objects;

pub use errors::*;
pub use hash_lock::{HashLock, PARTS_COUNT_MASK};
pub use immutables::{
    DstImmutablesComplement, Immutables, ImmutablesData, ImmutablesParams,
    IMMUTABLES_ENCODED_LEN,
};
pub use secure_secret::SecureSecret;
pub use time_locks::{
    DstStage, DstTimeLocks, RescueStart, SrcStage, SrcTimeLocks, TimeLockDurations,
    TimeLockParams, TimeLocks, DEFAULT_RESCUE_DELAY,
};
pub use value_objects::*;
