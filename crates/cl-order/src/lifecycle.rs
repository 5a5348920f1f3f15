//! # Escrow Lifecycle
//!
//! Predicts what may happen to each escrow of a swap at a given time.
//!
//! ```text
//! Created -> FinalityLock -> PrivateWithdrawal -> PublicWithdrawal
//!         -> PrivateCancellation -> PublicCancellation (source only)
//! ```
//!
//! The contracts stay the authority; this only saves a resolver from
//! sending calls that would revert.

use crate::errors::OrderError;
use cl_escrow::{
    DstTimeLocks, EscrowAction, EscrowPhase, EscrowSide, RescueStart, SrcTimeLocks, TimeLocks,
};
use serde::Serialize;

/// What an escrow accepts now and when that changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NextAction {
    /// Escrow the prediction is for.
    pub side: EscrowSide,
    /// Current phase.
    pub phase: EscrowPhase,
    /// Calls accepted in this phase.
    pub actions: &'static [EscrowAction],
    /// Following phase, if any.
    pub next_phase: Option<EscrowPhase>,
    /// When the following phase starts; unknown before deployment.
    pub next_phase_at: Option<u64>,
    /// When leftover funds may be rescued; unknown before deployment.
    pub rescue_at: Option<u64>,
}

impl NextAction {
    /// Check if `action` would be accepted now.
    pub fn allows(&self, action: EscrowAction) -> bool {
        self.actions.contains(&action)
    }

    /// Check if only the taker may act now.
    pub fn is_taker_only(&self) -> bool {
        matches!(
            self.phase,
            EscrowPhase::PrivateWithdrawal | EscrowPhase::PrivateCancellation
        )
    }

    fn created(side: EscrowSide) -> Self {
        Self {
            side,
            phase: EscrowPhase::Created,
            actions: EscrowPhase::Created.allowed_actions(),
            next_phase: EscrowPhase::Created.next(side),
            next_phase_at: None,
            rescue_at: None,
        }
    }

    fn at(side: EscrowSide, phase: EscrowPhase, next_phase_at: Option<u64>, rescue_at: u64) -> Self {
        Self {
            side,
            phase,
            actions: phase.allowed_actions(),
            next_phase: phase.next(side),
            next_phase_at,
            rescue_at: Some(rescue_at),
        }
    }
}

/// Source escrow prediction at `time`.
pub fn src_next_action(locks: &SrcTimeLocks, time: u64) -> Result<NextAction, OrderError> {
    let phase = EscrowPhase::from(locks.get_stage(time));
    let next_phase_at = match phase {
        EscrowPhase::Created | EscrowPhase::FinalityLock => Some(locks.private_withdrawal()),
        EscrowPhase::PrivateWithdrawal => Some(locks.public_withdrawal()),
        EscrowPhase::PublicWithdrawal => Some(locks.private_cancellation()),
        EscrowPhase::PrivateCancellation => Some(locks.public_cancellation()),
        EscrowPhase::PublicCancellation => None,
    };
    Ok(NextAction::at(
        EscrowSide::Source,
        phase,
        next_phase_at,
        locks.default_rescue_start()?,
    ))
}

/// Destination escrow prediction at `time`.
pub fn dst_next_action(locks: &DstTimeLocks, time: u64) -> Result<NextAction, OrderError> {
    let phase = EscrowPhase::from(locks.get_stage(time));
    let next_phase_at = match phase {
        EscrowPhase::Created | EscrowPhase::FinalityLock => Some(locks.private_withdrawal()),
        EscrowPhase::PrivateWithdrawal => Some(locks.public_withdrawal()),
        EscrowPhase::PublicWithdrawal => Some(locks.private_cancellation()),
        EscrowPhase::PrivateCancellation | EscrowPhase::PublicCancellation => None,
    };
    Ok(NextAction::at(
        EscrowSide::Destination,
        phase,
        next_phase_at,
        locks.default_rescue_start()?,
    ))
}

/// Prediction for one side of a swap.
///
/// `deployed_at` is `None` while the escrow has not been observed on chain.
pub fn next_action(
    time_locks: &TimeLocks,
    side: EscrowSide,
    deployed_at: Option<u64>,
    time: u64,
) -> Result<NextAction, OrderError> {
    let Some(deployed_at) = deployed_at else {
        return Ok(NextAction::created(side));
    };
    match side {
        EscrowSide::Source => src_next_action(&time_locks.to_src_time_locks_at(deployed_at)?, time),
        EscrowSide::Destination => {
            dst_next_action(&time_locks.to_dst_time_locks_at(deployed_at)?, time)
        }
    }
}
