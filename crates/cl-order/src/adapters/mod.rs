//! # Adapters
//!
//! In-memory implementations of the outbound ports.

mod in_memory;

pub use in_memory::{InMemoryEventFeed, InMemoryRelayer, EVENT_CHANNEL_CAPACITY};
