//! # Domain Value Objects
//!
//! Chain identifiers and the predicted escrow life-cycle.

use super::time_locks::{DstStage, SrcStage};
use serde::{Deserialize, Serialize};
use std::fmt;

/// EVM networks the escrow contracts are deployed on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "u64", try_from = "u64")]
pub enum ChainId {
    /// Ethereum mainnet.
    Ethereum,
    /// Optimism.
    Optimism,
    /// BNB Chain.
    Binance,
    /// Gnosis.
    Gnosis,
    /// Polygon PoS.
    Polygon,
    /// zkSync Era, which derives contract addresses differently.
    ZkSync,
    /// Base.
    Base,
    /// Arbitrum One.
    Arbitrum,
    /// Avalanche C-Chain.
    Avalanche,
    /// Linea.
    Linea,
}

impl ChainId {
    /// Every known network.
    pub const ALL: [ChainId; 10] = [
        ChainId::Ethereum,
        ChainId::Optimism,
        ChainId::Binance,
        ChainId::Gnosis,
        ChainId::Polygon,
        ChainId::ZkSync,
        ChainId::Base,
        ChainId::Arbitrum,
        ChainId::Avalanche,
        ChainId::Linea,
    ];

    /// EIP-155 chain id.
    pub fn id(&self) -> u64 {
        match self {
            ChainId::Ethereum => 1,
            ChainId::Optimism => 10,
            ChainId::Binance => 56,
            ChainId::Gnosis => 100,
            ChainId::Polygon => 137,
            ChainId::ZkSync => 324,
            ChainId::Base => 8453,
            ChainId::Arbitrum => 42161,
            ChainId::Avalanche => 43114,
            ChainId::Linea => 59144,
        }
    }
}

impl TryFrom<u64> for ChainId {
    type Error = String;

    fn try_from(id: u64) -> Result<Self, Self::Error> {
        ChainId::ALL
            .iter()
            .copied()
            .find(|c| c.id() == id)
            .ok_or_else(|| format!("unknown chain id {id}"))
    }
}

impl From<ChainId> for u64 {
    fn from(chain: ChainId) -> Self {
        chain.id()
    }
}

impl fmt::Display for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({})", self, self.id())
    }
}

/// Which escrow of the swap.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EscrowSide {
    /// Holds the maker's funds on the source chain.
    Source,
    /// Holds the taker's funds on the destination chain.
    Destination,
}

/// Predicted escrow life-cycle. The on-chain contract remains the authority.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EscrowPhase {
    /// Order signed, escrow not yet deployed.
    #[default]
    Created,
    /// Deployed, waiting for chain finality.
    FinalityLock,
    /// Only the taker may withdraw.
    PrivateWithdrawal,
    /// Any resolver may withdraw.
    PublicWithdrawal,
    /// Only the taker may cancel.
    PrivateCancellation,
    /// Any resolver may cancel. Source escrow only.
    PublicCancellation,
}

/// An escrow call that may be valid in a given phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EscrowAction {
    /// Taker reveals the secret and withdraws.
    Withdraw,
    /// Any access-token holder reveals the secret on the taker's behalf.
    PublicWithdraw,
    /// Taker returns the funds.
    Cancel,
    /// Any access-token holder returns the funds.
    PublicCancel,
}

impl EscrowPhase {
    /// Check if transition is valid.
    pub fn can_transition_to(&self, next: EscrowPhase, side: EscrowSide) -> bool {
        match (self, next) {
            (Self::Created, Self::FinalityLock) => true,
            (Self::FinalityLock, Self::PrivateWithdrawal) => true,
            (Self::PrivateWithdrawal, Self::PublicWithdrawal) => true,
            (Self::PublicWithdrawal, Self::PrivateCancellation) => true,
            (Self::PrivateCancellation, Self::PublicCancellation) => side == EscrowSide::Source,
            _ => false,
        }
    }

    /// Check if no later phase exists.
    pub fn is_terminal(&self, side: EscrowSide) -> bool {
        match side {
            EscrowSide::Source => *self == Self::PublicCancellation,
            EscrowSide::Destination => *self == Self::PrivateCancellation,
        }
    }

    /// Calls the escrow accepts in this phase.
    pub fn allowed_actions(&self) -> &'static [EscrowAction] {
        match self {
            Self::Created | Self::FinalityLock => &[],
            Self::PrivateWithdrawal => &[EscrowAction::Withdraw],
            Self::PublicWithdrawal => &[EscrowAction::Withdraw, EscrowAction::PublicWithdraw],
            Self::PrivateCancellation => &[EscrowAction::Cancel],
            Self::PublicCancellation => &[EscrowAction::Cancel, EscrowAction::PublicCancel],
        }
    }

    /// Next phase, if any.
    pub fn next(&self, side: EscrowSide) -> Option<EscrowPhase> {
        let next = match self {
            Self::Created => Self::FinalityLock,
            Self::FinalityLock => Self::PrivateWithdrawal,
            Self::PrivateWithdrawal => Self::PublicWithdrawal,
            Self::PublicWithdrawal => Self::PrivateCancellation,
            Self::PrivateCancellation => Self::PublicCancellation,
            Self::PublicCancellation => return None,
        };
        self.can_transition_to(next, side).then_some(next)
    }
}

impl From<SrcStage> for EscrowPhase {
    fn from(stage: SrcStage) -> Self {
        match stage {
            SrcStage::FinalityLock => Self::FinalityLock,
            SrcStage::PrivateWithdrawal => Self::PrivateWithdrawal,
            SrcStage::PublicWithdrawal => Self::PublicWithdrawal,
            SrcStage::PrivateCancellation => Self::PrivateCancellation,
            SrcStage::PublicCancellation => Self::PublicCancellation,
        }
    }
}

impl From<DstStage> for EscrowPhase {
    fn from(stage: DstStage) -> Self {
        match stage {
            DstStage::FinalityLock => Self::FinalityLock,
            DstStage::PrivateWithdrawal => Self::PrivateWithdrawal,
            DstStage::PublicWithdrawal => Self::PublicWithdrawal,
            DstStage::PrivateCancellation => Self::PrivateCancellation,
        }
    }
}
