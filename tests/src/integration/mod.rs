//! # Integration Flows
//!
//! One swap followed from order creation to the last secret.

pub mod swap_flow;
