//! # Time-Locks
//!
//! Per-chain stage delays packed into one `uint256`, and the absolute-time
//! calculators derived from them once the escrow is deployed.
//!
//! ## Word Layout
//!
//! | Bits | Field |
//! |------|-------|
//! | [0,32) | deployedAt |
//! | [32,64) | dstCancellation |
//! | [64,96) | dstPublicWithdrawal |
//! | [96,128) | dstWithdrawal |
//! | [128,160) | srcPublicCancellation |
//! | [160,192) | srcCancellation |
//! | [192,224) | srcPublicWithdrawal |
//! | [224,256) | srcWithdrawal |
//!
//! ## Intervals
//!
//! ```text
//! src: | finality lock | private withdrawal | public withdrawal | private cancellation | public cancellation |
//! dst: | finality lock | private withdrawal | public withdrawal | private cancellation |
//!      ^deployedAt
//! ```

use super::errors::EscrowError;
use cl_primitives::{BitMask, U256, UINT_32_MAX};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Rescue becomes possible a week after deployment unless the factory says otherwise.
pub const DEFAULT_RESCUE_DELAY: u64 = 604_800;

/// Stage delays relative to `deployedAt`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeLockParams {
    /// Start of src private withdrawal
    pub src_withdrawal: u64,
    /// Start of src public withdrawal
    pub src_public_withdrawal: u64,
    /// Start of src private cancellation
    pub src_cancellation: u64,
    /// Start of src public cancellation
    pub src_public_cancellation: u64,
    /// Start of dst private withdrawal
    pub dst_withdrawal: u64,
    /// Start of dst public withdrawal
    pub dst_public_withdrawal: u64,
    /// Start of dst private cancellation
    pub dst_cancellation: u64,
}

/// Length of each stage; converted to cumulative delays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeLockDurations {
    /// Src finality lock length
    pub src_finality_lock: u64,
    /// Src private withdrawal length
    pub src_private_withdrawal: u64,
    /// Src public withdrawal length
    pub src_public_withdrawal: u64,
    /// Src private cancellation length
    pub src_private_cancellation: u64,
    /// Dst finality lock length
    pub dst_finality_lock: u64,
    /// Dst private withdrawal length
    pub dst_private_withdrawal: u64,
    /// Dst public withdrawal length
    pub dst_public_withdrawal: u64,
}

/// Stage delays for both chains plus the deployment anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeLocks {
    src_withdrawal: u64,
    src_public_withdrawal: u64,
    src_cancellation: u64,
    src_public_cancellation: u64,
    dst_withdrawal: u64,
    dst_public_withdrawal: u64,
    dst_cancellation: u64,
    deployed_at: u64,
}

fn check_u32(field: &'static str, value: u64) -> Result<(), EscrowError> {
    if value > UINT_32_MAX {
        return Err(EscrowError::TimeLockOverflow { field, value });
    }
    Ok(())
}

fn check_order(stages: &[(&'static str, u64)]) -> Result<(), EscrowError> {
    for &(name, value) in stages {
        check_u32(name, value)?;
    }
    for pair in stages.windows(2) {
        let (earlier, earlier_value) = pair[0];
        let (later, later_value) = pair[1];
        if earlier_value >= later_value {
            return Err(EscrowError::TimeLockOrder {
                earlier,
                earlier_value,
                later,
                later_value,
            });
        }
    }
    Ok(())
}

fn check_anchor(deployed_at: u64, stages: &[(&'static str, u64)]) -> Result<(), EscrowError> {
    if deployed_at == 0 || deployed_at > UINT_32_MAX {
        return Err(EscrowError::InvalidDeployedAt(deployed_at));
    }
    for &(field, delay) in stages {
        if deployed_at <= delay {
            return Err(EscrowError::DeployedAtBeforeDelay {
                deployed_at,
                field,
                delay,
            });
        }
    }
    Ok(())
}

impl TimeLocks {
    fn validated(params: TimeLockParams, deployed_at: u64) -> Result<Self, EscrowError> {
        check_u32("deployedAt", deployed_at)?;
        check_order(&[
            ("srcWithdrawal", params.src_withdrawal),
            ("srcPublicWithdrawal", params.src_public_withdrawal),
            ("srcCancellation", params.src_cancellation),
            ("srcPublicCancellation", params.src_public_cancellation),
        ])?;
        check_order(&[
            ("dstWithdrawal", params.dst_withdrawal),
            ("dstPublicWithdrawal", params.dst_public_withdrawal),
            ("dstCancellation", params.dst_cancellation),
        ])?;

        Ok(Self {
            src_withdrawal: params.src_withdrawal,
            src_public_withdrawal: params.src_public_withdrawal,
            src_cancellation: params.src_cancellation,
            src_public_cancellation: params.src_public_cancellation,
            dst_withdrawal: params.dst_withdrawal,
            dst_public_withdrawal: params.dst_public_withdrawal,
            dst_cancellation: params.dst_cancellation,
            deployed_at,
        })
    }

    /// Time-locks from stage delays, not yet anchored (`deployedAt = 0`).
    pub fn new(params: TimeLockParams) -> Result<Self, EscrowError> {
        Self::validated(params, 0)
    }

    /// Time-locks from stage lengths.
    pub fn from_durations(d: TimeLockDurations) -> Result<Self, EscrowError> {
        let src_withdrawal = d.src_finality_lock;
        let src_public_withdrawal = src_withdrawal.saturating_add(d.src_private_withdrawal);
        let src_cancellation = src_public_withdrawal.saturating_add(d.src_public_withdrawal);
        let src_public_cancellation = src_cancellation.saturating_add(d.src_private_cancellation);
        let dst_withdrawal = d.dst_finality_lock;
        let dst_public_withdrawal = dst_withdrawal.saturating_add(d.dst_private_withdrawal);
        let dst_cancellation = dst_public_withdrawal.saturating_add(d.dst_public_withdrawal);

        Self::new(TimeLockParams {
            src_withdrawal,
            src_public_withdrawal,
            src_cancellation,
            src_public_cancellation,
            dst_withdrawal,
            dst_public_withdrawal,
            dst_cancellation,
        })
    }

    /// Unpack a `uint256` word.
    pub fn from_u256(value: U256) -> Result<Self, EscrowError> {
        let field = |i: usize| BitMask::new(i * 32, (i + 1) * 32).get(value).low_u64();
        Self::validated(
            TimeLockParams {
                src_withdrawal: field(7),
                src_public_withdrawal: field(6),
                src_cancellation: field(5),
                src_public_cancellation: field(4),
                dst_withdrawal: field(3),
                dst_public_withdrawal: field(2),
                dst_cancellation: field(1),
            },
            field(0),
        )
    }

    /// Pack into a `uint256` word.
    pub fn build(&self) -> U256 {
        [
            self.src_withdrawal,
            self.src_public_withdrawal,
            self.src_cancellation,
            self.src_public_cancellation,
            self.dst_withdrawal,
            self.dst_public_withdrawal,
            self.dst_cancellation,
            self.deployed_at,
        ]
        .iter()
        .fold(U256::zero(), |acc, v| (acc << 32) | U256::from(*v))
    }

    /// Copy anchored at `time`.
    pub fn with_deployed_at(&self, time: u64) -> Result<Self, EscrowError> {
        check_u32("deployedAt", time)?;
        Ok(Self {
            deployed_at: time,
            ..*self
        })
    }

    /// Anchor timestamp (0 until the source escrow is observed).
    pub fn deployed_at(&self) -> u64 {
        self.deployed_at
    }

    /// Stage delays.
    pub fn params(&self) -> TimeLockParams {
        TimeLockParams {
            src_withdrawal: self.src_withdrawal,
            src_public_withdrawal: self.src_public_withdrawal,
            src_cancellation: self.src_cancellation,
            src_public_cancellation: self.src_public_cancellation,
            dst_withdrawal: self.dst_withdrawal,
            dst_public_withdrawal: self.dst_public_withdrawal,
            dst_cancellation: self.dst_cancellation,
        }
    }

    /// Source-chain calculator anchored at the stored `deployedAt`.
    pub fn to_src_time_locks(&self) -> Result<SrcTimeLocks, EscrowError> {
        self.to_src_time_locks_at(self.deployed_at)
    }

    /// Source-chain calculator anchored at `deployed_at`.
    pub fn to_src_time_locks_at(&self, deployed_at: u64) -> Result<SrcTimeLocks, EscrowError> {
        SrcTimeLocks::new(
            deployed_at,
            self.src_withdrawal,
            self.src_public_withdrawal,
            self.src_cancellation,
            self.src_public_cancellation,
        )
    }

    /// Destination-chain calculator anchored at the stored `deployedAt`.
    pub fn to_dst_time_locks(&self) -> Result<DstTimeLocks, EscrowError> {
        self.to_dst_time_locks_at(self.deployed_at)
    }

    /// Destination-chain calculator anchored at `deployed_at`.
    pub fn to_dst_time_locks_at(&self, deployed_at: u64) -> Result<DstTimeLocks, EscrowError> {
        DstTimeLocks::new(
            deployed_at,
            self.dst_withdrawal,
            self.dst_public_withdrawal,
            self.dst_cancellation,
        )
    }
}

impl Serialize for TimeLocks {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format!("0x{:x}", self.build()))
    }
}

impl<'de> Deserialize<'de> for TimeLocks {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let trimmed = s.strip_prefix("0x").unwrap_or(&s);
        let value = U256::from_str_radix(trimmed, 16).map_err(serde::de::Error::custom)?;
        Self::from_u256(value).map_err(serde::de::Error::custom)
    }
}

// =============================================================================
// ANCHORED CALCULATORS
// =============================================================================

/// Computes the emergency rescue timestamp of a deployed escrow.
pub trait RescueStart {
    /// Deployment timestamp.
    fn deployed_at(&self) -> u64;

    /// `deployedAt + rescue_delay`.
    fn rescue_start(&self, rescue_delay: u64) -> Result<u64, EscrowError> {
        self.deployed_at()
            .checked_add(rescue_delay)
            .ok_or(EscrowError::RescueDelayOverflow(rescue_delay))
    }

    /// Rescue start with [`DEFAULT_RESCUE_DELAY`].
    fn default_rescue_start(&self) -> Result<u64, EscrowError> {
        self.rescue_start(DEFAULT_RESCUE_DELAY)
    }
}

/// Source-chain escrow stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SrcStage {
    /// Nobody may act.
    FinalityLock,
    /// Taker may withdraw.
    PrivateWithdrawal,
    /// Any resolver may withdraw for the taker.
    PublicWithdrawal,
    /// Taker may cancel.
    PrivateCancellation,
    /// Any resolver may cancel.
    PublicCancellation,
}

/// Destination-chain escrow stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DstStage {
    /// Nobody may act.
    FinalityLock,
    /// Taker may withdraw.
    PrivateWithdrawal,
    /// Any resolver may withdraw for the maker.
    PublicWithdrawal,
    /// Taker may cancel.
    PrivateCancellation,
}

/// Source-chain stage boundaries as absolute timestamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SrcTimeLocks {
    deployed_at: u64,
    withdrawal: u64,
    public_withdrawal: u64,
    cancellation: u64,
    public_cancellation: u64,
}

impl SrcTimeLocks {
    /// Anchor source-chain delays at `deployed_at`.
    pub fn new(
        deployed_at: u64,
        withdrawal: u64,
        public_withdrawal: u64,
        cancellation: u64,
        public_cancellation: u64,
    ) -> Result<Self, EscrowError> {
        let stages = [
            ("withdrawal", withdrawal),
            ("publicWithdrawal", public_withdrawal),
            ("cancellation", cancellation),
            ("publicCancellation", public_cancellation),
        ];
        check_order(&stages)?;
        check_anchor(deployed_at, &stages)?;
        Ok(Self {
            deployed_at,
            withdrawal,
            public_withdrawal,
            cancellation,
            public_cancellation,
        })
    }

    /// End of finality lock, start of private withdrawal.
    pub fn private_withdrawal(&self) -> u64 {
        self.deployed_at + self.withdrawal
    }

    /// Start of public withdrawal.
    pub fn public_withdrawal(&self) -> u64 {
        self.deployed_at + self.public_withdrawal
    }

    /// Start of private cancellation.
    pub fn private_cancellation(&self) -> u64 {
        self.deployed_at + self.cancellation
    }

    /// Start of public cancellation.
    pub fn public_cancellation(&self) -> u64 {
        self.deployed_at + self.public_cancellation
    }

    /// `time` before private withdrawal opens.
    pub fn is_finality_lock(&self, time: u64) -> bool {
        time < self.private_withdrawal()
    }

    /// `time` in `[private_withdrawal, public_withdrawal)`.
    pub fn is_private_withdrawal(&self, time: u64) -> bool {
        time >= self.private_withdrawal() && time < self.public_withdrawal()
    }

    /// `time` in `[public_withdrawal, private_cancellation)`.
    pub fn is_public_withdrawal(&self, time: u64) -> bool {
        time >= self.public_withdrawal() && time < self.private_cancellation()
    }

    /// `time` in `[private_cancellation, public_cancellation)`.
    pub fn is_private_cancellation(&self, time: u64) -> bool {
        time >= self.private_cancellation() && time < self.public_cancellation()
    }

    /// `time` at or after public cancellation.
    pub fn is_public_cancellation(&self, time: u64) -> bool {
        time >= self.public_cancellation()
    }

    /// The single stage active at `time`.
    pub fn get_stage(&self, time: u64) -> SrcStage {
        if self.is_finality_lock(time) {
            SrcStage::FinalityLock
        } else if self.is_private_withdrawal(time) {
            SrcStage::PrivateWithdrawal
        } else if self.is_public_withdrawal(time) {
            SrcStage::PublicWithdrawal
        } else if self.is_private_cancellation(time) {
            SrcStage::PrivateCancellation
        } else {
            SrcStage::PublicCancellation
        }
    }
}

impl RescueStart for SrcTimeLocks {
    fn deployed_at(&self) -> u64 {
        self.deployed_at
    }
}

/// Destination-chain stage boundaries as absolute timestamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DstTimeLocks {
    deployed_at: u64,
    withdrawal: u64,
    public_withdrawal: u64,
    cancellation: u64,
}

impl DstTimeLocks {
    /// Anchor destination-chain delays at `deployed_at`.
    pub fn new(
        deployed_at: u64,
        withdrawal: u64,
        public_withdrawal: u64,
        cancellation: u64,
    ) -> Result<Self, EscrowError> {
        let stages = [
            ("withdrawal", withdrawal),
            ("publicWithdrawal", public_withdrawal),
            ("cancellation", cancellation),
        ];
        check_order(&stages)?;
        check_anchor(deployed_at, &stages)?;
        Ok(Self {
            deployed_at,
            withdrawal,
            public_withdrawal,
            cancellation,
        })
    }

    /// End of finality lock, start of private withdrawal.
    pub fn private_withdrawal(&self) -> u64 {
        self.deployed_at + self.withdrawal
    }

    /// Start of public withdrawal.
    pub fn public_withdrawal(&self) -> u64 {
        self.deployed_at + self.public_withdrawal
    }

    /// Start of private cancellation.
    pub fn private_cancellation(&self) -> u64 {
        self.deployed_at + self.cancellation
    }

    /// `time` before private withdrawal opens.
    pub fn is_finality_lock(&self, time: u64) -> bool {
        time < self.private_withdrawal()
    }

    /// `time` in `[private_withdrawal, public_withdrawal)`.
    pub fn is_private_withdrawal(&self, time: u64) -> bool {
        time >= self.private_withdrawal() && time < self.public_withdrawal()
    }

    /// `time` in `[public_withdrawal, private_cancellation)`.
    pub fn is_public_withdrawal(&self, time: u64) -> bool {
        time >= self.public_withdrawal() && time < self.private_cancellation()
    }

    /// `time` at or after private cancellation.
    pub fn is_private_cancellation(&self, time: u64) -> bool {
        time >= self.private_cancellation()
    }

    /// The single stage active at `time`.
    pub fn get_stage(&self, time: u64) -> DstStage {
        if self.is_finality_lock(time) {
            DstStage::FinalityLock
        } else if self.is_private_withdrawal(time) {
            DstStage::PrivateWithdrawal
        } else if self.is_public_withdrawal(time) {
            DstStage::PublicWithdrawal
        } else {
            DstStage::PrivateCancellation
        }
    }
}

impl RescueStart for DstTimeLocks {
    fn deployed_at(&self) -> u64 {
        self.deployed_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn durations() -> TimeLockDurations {
        TimeLockDurations {
            src_finality_lock: 10,
            src_private_withdrawal: 20,
            src_public_withdrawal: 30,
            src_private_cancellation: 40,
            dst_finality_lock: 5,
            dst_private_withdrawal: 15,
            dst_public_withdrawal: 25,
        }
    }

    #[test]
    fn test_from_durations_cumulative() {
        let p = TimeLocks::from_durations(durations()).unwrap().params();
        assert_eq!(
            (p.src_withdrawal, p.src_public_withdrawal, p.src_cancellation, p.src_public_cancellation),
            (10, 30, 60, 100)
        );
        assert_eq!(
            (p.dst_withdrawal, p.dst_public_withdrawal, p.dst_cancellation),
            (5, 20, 45)
        );
    }

    #[test]
    fn test_stage_at_1015_is_private_withdrawal() {
        let locks = TimeLocks::from_durations(durations())
            .unwrap()
            .with_deployed_at(1000)
            .unwrap();
        let src = locks.to_src_time_locks().unwrap();
        assert_eq!(src.get_stage(1015), SrcStage::PrivateWithdrawal);
        assert_eq!(src.get_stage(1009), SrcStage::FinalityLock);
        assert_eq!(src.get_stage(1030), SrcStage::PublicWithdrawal);
        assert_eq!(src.get_stage(1060), SrcStage::PrivateCancellation);
        assert_eq!(src.get_stage(1100), SrcStage::PublicCancellation);
    }

    #[test]
    fn test_dst_stages() {
        let dst = TimeLocks::from_durations(durations())
            .unwrap()
            .to_dst_time_locks_at(1000)
            .unwrap();
        assert_eq!(dst.get_stage(1004), DstStage::FinalityLock);
        assert_eq!(dst.get_stage(1005), DstStage::PrivateWithdrawal);
        assert_eq!(dst.get_stage(1020), DstStage::PublicWithdrawal);
        assert_eq!(dst.get_stage(1045), DstStage::PrivateCancellation);
        assert_eq!(dst.get_stage(u64::from(u32::MAX)), DstStage::PrivateCancellation);
    }

    #[test]
    fn test_bit_layout() {
        let locks = TimeLocks::new(TimeLockParams {
            src_withdrawal: 1,
            src_public_withdrawal: 2,
            src_cancellation: 3,
            src_public_cancellation: 4,
            dst_withdrawal: 5,
            dst_public_withdrawal: 6,
            dst_cancellation: 7,
        })
        .unwrap()
        .with_deployed_at(8)
        .unwrap();
        let word = locks.build();
        let at = |i: usize| BitMask::new(i * 32, (i + 1) * 32).get(word).low_u64();
        assert_eq!(at(0), 8);
        assert_eq!(at(1), 7);
        assert_eq!(at(2), 6);
        assert_eq!(at(3), 5);
        assert_eq!(at(4), 4);
        assert_eq!(at(5), 3);
        assert_eq!(at(6), 2);
        assert_eq!(at(7), 1);
        assert_eq!(TimeLocks::from_u256(word).unwrap(), locks);
    }

    #[test]
    fn test_rejects_unordered_src() {
        let err = TimeLocks::new(TimeLockParams {
            src_withdrawal: 10,
            src_public_withdrawal: 10,
            src_cancellation: 30,
            src_public_cancellation: 40,
            dst_withdrawal: 1,
            dst_public_withdrawal: 2,
            dst_cancellation: 3,
        })
        .unwrap_err();
        assert!(matches!(
            err,
            EscrowError::TimeLockOrder {
                earlier: "srcWithdrawal",
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_overflow() {
        let err = TimeLocks::new(TimeLockParams {
            src_withdrawal: 1,
            src_public_withdrawal: 2,
            src_cancellation: 3,
            src_public_cancellation: UINT_32_MAX + 1,
            dst_withdrawal: 1,
            dst_public_withdrawal: 2,
            dst_cancellation: 3,
        })
        .unwrap_err();
        assert!(matches!(err, EscrowError::TimeLockOverflow { .. }));
    }

    #[test]
    fn test_anchor_checks() {
        let locks = TimeLocks::from_durations(durations()).unwrap();
        assert_eq!(
            locks.to_src_time_locks().unwrap_err(),
            EscrowError::InvalidDeployedAt(0)
        );
        assert!(matches!(
            locks.to_src_time_locks_at(50),
            Err(EscrowError::DeployedAtBeforeDelay { .. })
        ));
        assert!(locks.to_dst_time_locks_at(UINT_32_MAX + 1).is_err());
    }

    #[test]
    fn test_rescue_start() {
        let src = TimeLocks::from_durations(durations())
            .unwrap()
            .to_src_time_locks_at(1000)
            .unwrap();
        assert_eq!(src.default_rescue_start().unwrap(), 1000 + DEFAULT_RESCUE_DELAY);
        assert_eq!(src.rescue_start(60).unwrap(), 1060);
        assert_eq!(
            src.rescue_start(u64::MAX),
            Err(EscrowError::RescueDelayOverflow(u64::MAX))
        );

        let dst = TimeLocks::from_durations(durations())
            .unwrap()
            .to_dst_time_locks_at(UINT_32_MAX)
            .unwrap();
        assert_eq!(dst.rescue_start(u64::MAX - UINT_32_MAX).unwrap(), u64::MAX);
        assert!(dst.rescue_start(u64::MAX - UINT_32_MAX + 1).is_err());
    }

    #[test]
    fn test_json_is_hex_word() {
        let locks = TimeLocks::from_durations(durations())
            .unwrap()
            .with_deployed_at(1000)
            .unwrap();
        let json = serde_json::to_string(&locks).unwrap();
        assert!(json.starts_with("\"0x"));
        let back: TimeLocks = serde_json::from_str(&json).unwrap();
        assert_eq!(back, locks);
    }
}
