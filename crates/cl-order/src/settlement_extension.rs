//! # Settlement Extension
//!
//! Auction, fee and whitelist data handed to the settlement contract
//! through the order extension.
//!
//! ## Layout
//!
//! ```text
//! makingAmountData = takingAmountData =
//!     settlement ++ auctionDetails ++ feeBlock ++ u8 count ++ 10-byte halves
//!
//! postInteraction =
//!     settlement ++ u8 flags ++ integratorReceiver ++ protocolReceiver
//!     ++ [customReceiver] ++ feeBlock ++ whitelist
//!
//! feeBlock = u16 integratorFee ++ u8 integratorShare ++ u16 resolverFee
//!     ++ u8 (100 - whitelistDiscount)
//! ```

use crate::errors::OrderError;
use crate::extension::{Extension, ExtensionBuilder};
use cl_auction::{
    AmountCalculator, AuctionCalculator, AuctionDetails, FeeCalculator, Fees, IntegratorFee,
    ResolverFee, Whitelist, FEE_BASE_1E2,
};
use cl_primitives::{Address, BytesBuilder, BytesIter, Interaction};

/// Flag bit set when a custom receiver follows the fee receivers.
pub const CUSTOM_RECEIVER_FLAG_BIT: u8 = 0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct FeeBlock {
    integrator_fee: u64,
    integrator_share: u64,
    resolver_fee: u64,
    whitelist_discount: u64,
}

impl FeeBlock {
    fn from_fees(fees: Option<&Fees>) -> Self {
        fees.map(|f| Self {
            integrator_fee: f.integrator.fee,
            integrator_share: f.integrator.share,
            resolver_fee: f.resolver.fee,
            whitelist_discount: f.resolver.whitelist_discount,
        })
        .unwrap_or_default()
    }

    fn encode_into(&self, out: &mut BytesBuilder) -> Result<(), OrderError> {
        if self.whitelist_discount > FEE_BASE_1E2 {
            return Err(OrderError::InvalidExtension(format!(
                "whitelist discount {} above 100%",
                self.whitelist_discount
            )));
        }
        out.add_uint(self.integrator_fee, 2)?
            .add_uint(self.integrator_share, 1)?
            .add_uint(self.resolver_fee, 2)?
            .add_uint(FEE_BASE_1E2 - self.whitelist_discount, 1)?;
        Ok(())
    }

    fn decode_from(iter: &mut BytesIter<'_>) -> Result<Self, OrderError> {
        let integrator_fee = iter.next_uint(2)?;
        let integrator_share = iter.next_uint(1)?;
        let resolver_fee = iter.next_uint(2)?;
        let kept = iter.next_uint(1)?;
        let whitelist_discount = FEE_BASE_1E2.checked_sub(kept).ok_or_else(|| {
            OrderError::InvalidExtension(format!("whitelist discount byte {kept} above 100"))
        })?;
        Ok(Self {
            integrator_fee,
            integrator_share,
            resolver_fee,
            whitelist_discount,
        })
    }
}

fn target(field: &[u8], name: &str) -> Result<Address, OrderError> {
    if field.len() < 20 {
        return Err(OrderError::InvalidExtension(format!("{name} has no target")));
    }
    Ok(Address::from_slice(&field[..20])?)
}

/// Settlement-side part of an order extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettlementExtension {
    address: Address,
    auction_details: AuctionDetails,
    whitelist: Whitelist,
    fees: Option<Fees>,
    maker_permit: Option<Interaction>,
    custom_receiver: Option<Address>,
}

impl SettlementExtension {
    /// Extension calling `address`; a zero custom receiver counts as none.
    pub fn new(
        address: Address,
        auction_details: AuctionDetails,
        whitelist: Whitelist,
        fees: Option<Fees>,
        maker_permit: Option<Interaction>,
        custom_receiver: Option<Address>,
    ) -> Self {
        Self {
            address,
            auction_details,
            whitelist,
            fees,
            maker_permit,
            custom_receiver: custom_receiver.filter(|r| !r.is_zero()),
        }
    }

    /// Contract the getters and post-interaction call.
    pub fn address(&self) -> Address {
        self.address
    }

    /// Auction parameters.
    pub fn auction_details(&self) -> &AuctionDetails {
        &self.auction_details
    }

    /// Resolver whitelist.
    pub fn whitelist(&self) -> &Whitelist {
        &self.whitelist
    }

    /// Fees, if any.
    pub fn fees(&self) -> Option<&Fees> {
        self.fees.as_ref()
    }

    /// Maker permit, if any.
    pub fn maker_permit(&self) -> Option<&Interaction> {
        self.maker_permit.as_ref()
    }

    /// Receiver chosen by the maker when fees route funds via the settlement.
    pub fn custom_receiver(&self) -> Option<Address> {
        self.custom_receiver
    }

    /// Amount calculator over this auction and fees.
    pub fn amount_calculator(&self) -> AmountCalculator {
        AmountCalculator::new(
            AuctionCalculator::from_auction_details(&self.auction_details),
            self.fees
                .map(|fees| FeeCalculator::new(fees, self.whitelist.clone())),
        )
    }

    fn amount_getter_data(&self) -> Result<Vec<u8>, OrderError> {
        let mut out = BytesBuilder::new();
        self.auction_details.encode_into(&mut out);
        FeeBlock::from_fees(self.fees.as_ref()).encode_into(&mut out)?;
        out.add_u8(self.whitelist.len() as u8);
        for item in self.whitelist.items() {
            out.add_bytes(&item.address_half);
        }
        Ok(out.finish())
    }

    fn interaction_data(&self) -> Result<Vec<u8>, OrderError> {
        let receiver = self.custom_receiver.unwrap_or(Address::ZERO);
        let flags = u8::from(!receiver.is_zero()) << CUSTOM_RECEIVER_FLAG_BIT;
        let (integrator, protocol) = match &self.fees {
            Some(fees) => (fees.integrator.integrator, fees.protocol()),
            None => (Address::ZERO, Address::ZERO),
        };

        let mut out = BytesBuilder::new();
        out.add_u8(flags)
            .add_address(&integrator)
            .add_address(&protocol);
        if !receiver.is_zero() {
            out.add_address(&receiver);
        }
        FeeBlock::from_fees(self.fees.as_ref()).encode_into(&mut out)?;
        self.whitelist.encode_into(&mut out);
        Ok(out.finish())
    }

    /// Limit-order extension fields.
    pub fn build(&self) -> Result<Extension, OrderError> {
        let amount_data = self.amount_getter_data()?;
        let mut builder = ExtensionBuilder::new()
            .with_making_amount_data(&self.address, &amount_data)
            .with_taking_amount_data(&self.address, &amount_data)
            .with_post_interaction(&Interaction::new(self.address, self.interaction_data()?));
        if let Some(permit) = &self.maker_permit {
            builder = builder.with_maker_permit(&permit.target, &permit.data);
        }
        Ok(builder.build())
    }

    /// Parse encoded extension bytes.
    pub fn decode(bytes: &[u8]) -> Result<Self, OrderError> {
        Self::from_extension(&Extension::decode(bytes)?)
    }

    /// Recover the settlement fields and check both copies agree.
    pub fn from_extension(extension: &Extension) -> Result<Self, OrderError> {
        let address = target(&extension.making_amount_data, "makingAmountData")?;
        if target(&extension.taking_amount_data, "takingAmountData")? != address
            || target(&extension.post_interaction, "postInteraction")? != address
        {
            return Err(OrderError::InvalidExtension(
                "all calls should be to the same address".to_string(),
            ));
        }
        if extension.taking_amount_data != extension.making_amount_data {
            return Err(OrderError::InvalidExtension(
                "taking amount data must be equal to making amount data".to_string(),
            ));
        }

        let mut interaction = BytesIter::new(&extension.post_interaction[20..]);
        let flags = interaction.next_u8()?;
        let integrator_receiver = interaction.next_address()?;
        let protocol_receiver = interaction.next_address()?;
        let custom_receiver = if flags & (1 << CUSTOM_RECEIVER_FLAG_BIT) != 0 {
            Some(interaction.next_address()?)
        } else {
            None
        };
        let interaction_fees = FeeBlock::decode_from(&mut interaction)?;
        let whitelist = Whitelist::decode_from(&mut interaction)?;

        let mut amounts = BytesIter::new(&extension.making_amount_data[20..]);
        let auction_details = AuctionDetails::decode_from(&mut amounts)?;
        let amount_fees = FeeBlock::decode_from(&mut amounts)?;
        let count = amounts.next_u8()? as usize;
        if count != whitelist.len() {
            return Err(OrderError::InvalidExtension(
                "whitelist size differs between amount data and interaction".to_string(),
            ));
        }
        for item in whitelist.items() {
            if amounts.next_bytes(10)? != item.address_half.as_slice() {
                return Err(OrderError::InvalidExtension(
                    "whitelist addresses differ between amount data and interaction".to_string(),
                ));
            }
        }
        if amount_fees != interaction_fees {
            return Err(OrderError::InvalidExtension(
                "fees differ between amount data and interaction".to_string(),
            ));
        }

        let maker_permit = if extension.has_maker_permit() {
            Some(Interaction::decode(&extension.maker_permit)?)
        } else {
            None
        };

        let fees = if integrator_receiver.is_zero() && protocol_receiver.is_zero() {
            None
        } else {
            let resolver = if interaction_fees.resolver_fee == 0 {
                ResolverFee::zero()
            } else {
                ResolverFee::new(
                    protocol_receiver,
                    interaction_fees.resolver_fee,
                    interaction_fees.whitelist_discount,
                )?
            };
            let integrator = if interaction_fees.integrator_fee == 0 {
                IntegratorFee::zero()
            } else {
                IntegratorFee::new(
                    integrator_receiver,
                    protocol_receiver,
                    interaction_fees.integrator_fee,
                    interaction_fees.integrator_share,
                )?
            };
            Some(Fees::new(resolver, integrator))
        };

        Ok(Self::new(
            address,
            auction_details,
            whitelist,
            fees,
            maker_permit,
            custom_receiver,
        ))
    }
}
