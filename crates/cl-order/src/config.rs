//! # Chain Configuration
//!
//! Deployment addresses and the supported chain set.
//!
//! | Env var | Format | Default |
//! |---------|--------|---------|
//! | `CL_SUPPORTED_CHAINS` | comma-separated chain ids | every [`ChainId`] |
//! | `CL_TRUE_ERC20` | `chainId=0xaddress,...` | shared placeholder on every chain |

use crate::errors::OrderError;
use cl_escrow::ChainId;
use cl_primitives::Address;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::str::FromStr;

/// Limit-order protocol v4 on every chain except zkSync Era.
pub const LIMIT_ORDER_PROTOCOL: &str = "0x111111125421ca6dc452d289314280a0f8842a65";

/// Limit-order protocol v4 on zkSync Era.
pub const LIMIT_ORDER_PROTOCOL_ZKSYNC: &str = "0x6fd4383cb451173d5f9304f041c7bcbf27d561ff";

/// ERC-20 placeholder used as the source-side taker asset.
pub const TRUE_ERC20: &str = "0xda0000d4000015a526378bb6fafc650cea5966f8";

/// Which chains orders may use and the contracts deployed on them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainConfig {
    /// Chain ids orders may reference.
    pub supported_chains: BTreeSet<u64>,
    /// Limit-order protocol address per chain.
    pub limit_order_protocol: BTreeMap<u64, Address>,
    /// Placeholder taker asset per chain.
    pub true_erc20: BTreeMap<u64, Address>,
}

fn default_address(raw: &str) -> Address {
    Address::from_str(raw).unwrap_or(Address::ZERO)
}

impl Default for ChainConfig {
    fn default() -> Self {
        let lop = default_address(LIMIT_ORDER_PROTOCOL);
        let lop_zksync = default_address(LIMIT_ORDER_PROTOCOL_ZKSYNC);
        let true_erc20 = default_address(TRUE_ERC20);

        let mut supported_chains = BTreeSet::new();
        let mut limit_order_protocol = BTreeMap::new();
        let mut true_erc20_map = BTreeMap::new();
        for chain in ChainId::ALL {
            supported_chains.insert(chain.id());
            let protocol = match chain {
                ChainId::ZkSync => lop_zksync,
                _ => lop,
            };
            limit_order_protocol.insert(chain.id(), protocol);
            true_erc20_map.insert(chain.id(), true_erc20);
        }

        Self {
            supported_chains,
            limit_order_protocol,
            true_erc20: true_erc20_map,
        }
    }
}

impl ChainConfig {
    /// Defaults overridden by `CL_*` environment variables.
    pub fn from_env() -> Result<Self, OrderError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by values from `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, OrderError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup("CL_SUPPORTED_CHAINS") {
            let mut chains = BTreeSet::new();
            for part in raw.split(',').map(str::trim).filter(|p| !p.is_empty()) {
                let id = part.parse::<u64>().map_err(|e| OrderError::Config {
                    key: "CL_SUPPORTED_CHAINS",
                    reason: format!("{part}: {e}"),
                })?;
                chains.insert(id);
            }
            config.supported_chains = chains;
        }

        if let Some(raw) = lookup("CL_TRUE_ERC20") {
            for part in raw.split(',').map(str::trim).filter(|p| !p.is_empty()) {
                let (chain, address) = part.split_once('=').ok_or_else(|| OrderError::Config {
                    key: "CL_TRUE_ERC20",
                    reason: format!("expected chainId=address, got {part}"),
                })?;
                let chain = chain.trim().parse::<u64>().map_err(|e| OrderError::Config {
                    key: "CL_TRUE_ERC20",
                    reason: format!("{chain}: {e}"),
                })?;
                let address =
                    Address::from_str(address.trim()).map_err(|e| OrderError::Config {
                        key: "CL_TRUE_ERC20",
                        reason: e.to_string(),
                    })?;
                config.true_erc20.insert(chain, address);
            }
        }

        Ok(config)
    }

    /// Check if `chain_id` is in the supported set.
    pub fn is_supported(&self, chain_id: u64) -> bool {
        self.supported_chains.contains(&chain_id)
    }

    /// Limit-order protocol on `chain_id`.
    pub fn limit_order_protocol(&self, chain_id: u64) -> Result<Address, OrderError> {
        self.limit_order_protocol
            .get(&chain_id)
            .copied()
            .ok_or(OrderError::UnsupportedChain(chain_id))
    }

    /// Placeholder taker asset on `chain_id`.
    pub fn true_erc20(&self, chain_id: u64) -> Result<Address, OrderError> {
        self.true_erc20
            .get(&chain_id)
            .copied()
            .ok_or(OrderError::UnsupportedChain(chain_id))
    }
}
