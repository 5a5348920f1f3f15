//! # Auction Details
//!
//! Dutch-auction parameters as carried in the order extension.
//!
//! ## Packed Layout
//!
//! | Field | Width |
//! |-------|-------|
//! | gasBumpEstimate | u24 |
//! | gasPriceEstimate | u32 |
//! | startTime | u32 |
//! | duration | u24 |
//! | initialRateBump | u24 |
//! | points count | u8 |
//! | per point: coefficient, delay | u24, u16 |

use crate::errors::AuctionError;
use cl_primitives::{BytesBuilder, BytesIter, UINT_16_MAX, UINT_24_MAX, UINT_32_MAX};
use serde::{Deserialize, Serialize};

/// One knot of the piecewise-linear rate curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuctionPoint {
    /// Seconds after the previous point (or the auction start).
    pub delay: u64,
    /// Rate bump reached at this point, in `1e-7` units.
    pub coefficient: u64,
}

/// Gas-price compensation estimates folded into the rate bump.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuctionGasCostInfo {
    /// Rate bump covering the estimated gas cost, `1e-7` units.
    pub gas_bump_estimate: u64,
    /// Base fee the estimate assumed, divided by `1e6`.
    pub gas_price_estimate: u64,
}

/// Validated auction parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawAuctionDetails")]
pub struct AuctionDetails {
    start_time: u64,
    duration: u64,
    initial_rate_bump: u64,
    points: Vec<AuctionPoint>,
    gas_cost: AuctionGasCostInfo,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawAuctionDetails {
    start_time: u64,
    duration: u64,
    initial_rate_bump: u64,
    points: Vec<AuctionPoint>,
    gas_cost: AuctionGasCostInfo,
}

impl TryFrom<RawAuctionDetails> for AuctionDetails {
    type Error = AuctionError;

    fn try_from(raw: RawAuctionDetails) -> Result<Self, Self::Error> {
        Self::new(
            raw.start_time,
            raw.duration,
            raw.initial_rate_bump,
            raw.points,
            raw.gas_cost,
        )
    }
}

fn check_width(field: &'static str, value: u64, max: u64, bits: u32) -> Result<(), AuctionError> {
    if value > max {
        return Err(AuctionError::FieldTooWide { field, bits, value });
    }
    Ok(())
}

impl AuctionDetails {
    /// Create and bound-check auction parameters.
    pub fn new(
        start_time: u64,
        duration: u64,
        initial_rate_bump: u64,
        points: Vec<AuctionPoint>,
        gas_cost: AuctionGasCostInfo,
    ) -> Result<Self, AuctionError> {
        check_width("startTime", start_time, UINT_32_MAX, 32)?;
        check_width("duration", duration, UINT_24_MAX, 24)?;
        check_width("initialRateBump", initial_rate_bump, UINT_24_MAX, 24)?;
        check_width(
            "gasBumpEstimate",
            gas_cost.gas_bump_estimate,
            UINT_24_MAX,
            24,
        )?;
        check_width(
            "gasPriceEstimate",
            gas_cost.gas_price_estimate,
            UINT_32_MAX,
            32,
        )?;
        check_width("points", points.len() as u64, u8::MAX as u64, 8)?;
        for point in &points {
            check_width("coefficient", point.coefficient, UINT_24_MAX, 24)?;
            check_width("delay", point.delay, UINT_16_MAX, 16)?;
        }

        Ok(Self {
            start_time,
            duration,
            initial_rate_bump,
            points,
            gas_cost,
        })
    }

    /// Auction start, unix seconds.
    pub fn start_time(&self) -> u64 {
        self.start_time
    }

    /// Auction length in seconds.
    pub fn duration(&self) -> u64 {
        self.duration
    }

    /// `start_time + duration`.
    pub fn end_time(&self) -> u64 {
        self.start_time + self.duration
    }

    /// Rate bump at the start.
    pub fn initial_rate_bump(&self) -> u64 {
        self.initial_rate_bump
    }

    /// Curve points.
    pub fn points(&self) -> &[AuctionPoint] {
        &self.points
    }

    /// Gas compensation estimates.
    pub fn gas_cost(&self) -> AuctionGasCostInfo {
        self.gas_cost
    }

    /// Packed bytes.
    pub fn encode(&self) -> Vec<u8> {
        let mut out = BytesBuilder::new();
        self.encode_into(&mut out);
        out.finish()
    }

    /// Append the packed bytes to `out`.
    pub fn encode_into(&self, out: &mut BytesBuilder) {
        // Widths were checked in `new`, so none of the fallible adds can fail.
        let _ = out.add_uint(self.gas_cost.gas_bump_estimate, 3);
        let _ = out.add_uint(self.gas_cost.gas_price_estimate, 4);
        let _ = out.add_uint(self.start_time, 4);
        let _ = out.add_uint(self.duration, 3);
        let _ = out.add_uint(self.initial_rate_bump, 3);
        out.add_u8(self.points.len() as u8);
        for point in &self.points {
            let _ = out.add_uint(point.coefficient, 3);
            let _ = out.add_uint(point.delay, 2);
        }
    }

    /// Parse packed bytes; trailing bytes are an error.
    pub fn decode(data: &[u8]) -> Result<Self, AuctionError> {
        let mut iter = BytesIter::new(data);
        let details = Self::decode_from(&mut iter)?;
        if !iter.is_empty() {
            return Err(AuctionError::Primitive(
                cl_primitives::PrimitiveError::InvalidLength {
                    expected: data.len() - iter.remaining(),
                    actual: data.len(),
                },
            ));
        }
        Ok(details)
    }

    /// Parse packed bytes from a cursor, leaving the rest unread.
    pub fn decode_from(iter: &mut BytesIter<'_>) -> Result<Self, AuctionError> {
        let gas_bump_estimate = iter.next_uint(3)?;
        let gas_price_estimate = iter.next_uint(4)?;
        let start_time = iter.next_uint(4)?;
        let duration = iter.next_uint(3)?;
        let initial_rate_bump = iter.next_uint(3)?;
        let count = iter.next_u8()?;

        let mut points = Vec::with_capacity(count as usize);
        for _ in 0..count {
            let coefficient = iter.next_uint(3)?;
            let delay = iter.next_uint(2)?;
            points.push(AuctionPoint { delay, coefficient });
        }

        Self::new(
            start_time,
            duration,
            initial_rate_bump,
            points,
            AuctionGasCostInfo {
                gas_bump_estimate,
                gas_price_estimate,
            },
        )
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn sample() -> AuctionDetails {
        AuctionDetails::new(
            1000,
            1000,
            1_000_000,
            vec![
                AuctionPoint {
                    delay: 200,
                    coefficient: 500_000,
                },
                AuctionPoint {
                    delay: 300,
                    coefficient: 200_000,
                },
            ],
            AuctionGasCostInfo {
                gas_bump_estimate: 10_000,
                gas_price_estimate: 1000,
            },
        )
        .unwrap()
    }

    #[test]
    fn test_encode_layout() {
        let encoded = sample().encode();
        assert_eq!(
            cl_primitives::encode_hex(&encoded),
            concat!(
                "0x",
                "002710",   // gas bump 10_000
                "000003e8", // gas price 1000
                "000003e8", // start 1000
                "0003e8",   // duration 1000
                "0f4240",   // initial rate bump 1_000_000
                "02",
                "07a120", "00c8", // 500_000 after 200s
                "030d40", "012c", // 200_000 after 300s
            )
        );
        assert_eq!(AuctionDetails::decode(&encoded).unwrap(), sample());
    }

    #[test]
    fn test_bounds() {
        let err = AuctionDetails::new(0, 1 << 24, 0, vec![], AuctionGasCostInfo::default());
        assert!(matches!(
            err,
            Err(AuctionError::FieldTooWide { field: "duration", .. })
        ));

        let err = AuctionDetails::new(
            0,
            10,
            0,
            vec![AuctionPoint {
                delay: 1 << 16,
                coefficient: 1,
            }],
            AuctionGasCostInfo::default(),
        );
        assert!(matches!(
            err,
            Err(AuctionError::FieldTooWide { field: "delay", .. })
        ));
    }

    #[test]
    fn test_decode_rejects_truncated_and_trailing() {
        let encoded = sample().encode();
        assert!(AuctionDetails::decode(&encoded[..encoded.len() - 1]).is_err());

        let mut longer = encoded.clone();
        longer.push(0);
        assert!(AuctionDetails::decode(&longer).is_err());

        let mut iter = BytesIter::new(&longer);
        assert_eq!(AuctionDetails::decode_from(&mut iter).unwrap(), sample());
        assert_eq!(iter.remaining(), 1);
    }

    #[test]
    fn test_json_shape() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["startTime"], 1000);
        assert_eq!(json["points"][1]["coefficient"], 200_000);
        assert_eq!(json["gasCost"]["gasBumpEstimate"], 10_000);

        let back: AuctionDetails = serde_json::from_value(json.clone()).unwrap();
        assert_eq!(back, sample());

        let mut wide = json;
        wide["duration"] = serde_json::json!(1u64 << 24);
        assert!(serde_json::from_value::<AuctionDetails>(wide).is_err());
    }
}
