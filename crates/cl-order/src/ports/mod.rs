//! # Ports Module
//!
//! Outbound ports to the relayer, the orders API, a signer and the order
//! event feed. Transport lives outside this crate.

pub mod outbound;

pub use outbound::*;
