//! # Escrow Factories
//!
//! Address derivation for escrows deployed by the escrow factory contract.
//!
//! | Chain | Strategy |
//! |-------|----------|
//! | zkSync Era | [`EscrowFactoryZksync`] |
//! | everything else | [`EscrowFactory`] (CREATE2 minimal proxy) |
//!
//! [`EscrowFactoryFacade`] picks the strategy from the chain id.

use crate::algorithms::{calc_proxy_bytecode_hash, create2_address, zksync_create2_address};
use crate::domain::{ChainId, DstImmutablesComplement, EscrowError, Immutables};
use cl_primitives::{AbiEncoder, Address, Hash, Interaction, U256};
use tracing::debug;

/// Derives escrow addresses for one factory deployment.
pub trait EscrowAddressDerivation {
    /// Factory contract address.
    fn address(&self) -> Address;

    /// Escrow address for an immutables hash and implementation.
    fn escrow_address(&self, immutables_hash: &Hash, implementation: &Address) -> Address;

    /// Source escrow address; `src` must carry the real `deployedAt`.
    fn src_escrow_address(&self, src: &Immutables, implementation: &Address) -> Address {
        self.escrow_address(&src.hash(), implementation)
    }

    /// Destination escrow address from the source immutables and the
    /// destination deployment event.
    fn dst_escrow_address(
        &self,
        src: &Immutables,
        complement: &DstImmutablesComplement,
        block_time: u64,
        taker: Address,
        implementation: &Address,
    ) -> Result<Address, EscrowError> {
        let dst = src
            .with_complement(complement)
            .with_taker(taker)
            .with_deployed_at(block_time)?;
        Ok(self.escrow_address(&dst.hash(), implementation))
    }

    /// Interaction proving which Merkle leaf a partial fill consumes.
    ///
    /// Payload is `abi.encode((bytes32[] proof, uint256 idx, bytes32 secretHash))`
    /// without its leading tuple offset word.
    fn multiple_fill_interaction(
        &self,
        proof: &[Hash],
        idx: u64,
        secret_hash: &Hash,
    ) -> Interaction {
        let mut enc = AbiEncoder::new();
        enc.uint(U256::from(3 * 32))
            .uint(U256::from(idx))
            .bytes32(secret_hash)
            .bytes32_array(proof);
        Interaction::new(self.address(), enc.finish())
    }
}

/// Factory on chains with standard CREATE2.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EscrowFactory {
    address: Address,
}

impl EscrowFactory {
    /// Factory at `address`.
    pub fn new(address: Address) -> Self {
        Self { address }
    }

    /// keccak256 of the minimal proxy init code for `implementation`.
    pub fn calc_proxy_bytecode_hash(implementation: &Address) -> Hash {
        calc_proxy_bytecode_hash(implementation)
    }
}

impl EscrowAddressDerivation for EscrowFactory {
    fn address(&self) -> Address {
        self.address
    }

    fn escrow_address(&self, immutables_hash: &Hash, implementation: &Address) -> Address {
        let escrow = create2_address(
            &self.address,
            immutables_hash,
            &calc_proxy_bytecode_hash(implementation),
        );
        debug!(
            "[cl-escrow] Derived escrow {} (factory {}, salt {})",
            escrow, self.address, immutables_hash
        );
        escrow
    }
}

/// Factory on zkSync Era.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EscrowFactoryZksync {
    address: Address,
}

impl EscrowFactoryZksync {
    /// Factory at `address`.
    pub fn new(address: Address) -> Self {
        Self { address }
    }
}

impl EscrowAddressDerivation for EscrowFactoryZksync {
    fn address(&self) -> Address {
        self.address
    }

    fn escrow_address(&self, immutables_hash: &Hash, implementation: &Address) -> Address {
        let escrow = zksync_create2_address(&self.address, immutables_hash, implementation);
        debug!(
            "[cl-escrow] Derived zkSync escrow {} (factory {}, salt {})",
            escrow, self.address, immutables_hash
        );
        escrow
    }
}

/// Factory selected by chain id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EscrowFactoryFacade {
    /// Standard CREATE2.
    Create2(EscrowFactory),
    /// zkSync Era.
    Zksync(EscrowFactoryZksync),
}

impl EscrowFactoryFacade {
    /// Factory at `address` on `chain`.
    pub fn new(chain: ChainId, address: Address) -> Self {
        match chain {
            ChainId::ZkSync => Self::Zksync(EscrowFactoryZksync::new(address)),
            _ => Self::Create2(EscrowFactory::new(address)),
        }
    }

    fn inner(&self) -> &dyn EscrowAddressDerivation {
        match self {
            Self::Create2(f) => f,
            Self::Zksync(f) => f,
        }
    }
}

impl EscrowAddressDerivation for EscrowFactoryFacade {
    fn address(&self) -> Address {
        self.inner().address()
    }

    fn escrow_address(&self, immutables_hash: &Hash, implementation: &Address) -> Address {
        self.inner().escrow_address(immutables_hash, implementation)
    }
}
