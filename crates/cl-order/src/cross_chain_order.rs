//! # Cross-Chain Order
//!
//! The maker order of a cross-chain swap. On the source chain it is a plain
//! limit order whose extension carries the auction, the whitelist, the fees
//! and the escrow trailer.
//!
//! | Inner field | Value |
//! |-------------|-------|
//! | `takerAsset` | placeholder ERC-20 of the source chain |
//! | `receiver` | escrow factory when fees are charged, the maker's receiver otherwise |
//! | `makerTraits` | expiration, fill flags, post-interaction, optional nonce |
//! | `salt` | 96-bit base salt over the extension commitment |
//!
//! The real destination token lives in the escrow trailer and is what
//! [`CrossChainOrder::taker_asset`] returns.

use crate::config::ChainConfig;
use crate::eip712::EIP712TypedData;
use crate::errors::OrderError;
use crate::escrow_extension::{EscrowExtension, EscrowExtraData};
use crate::extension::Extension;
use crate::limit_order::{LimitOrder, LimitOrderV4Struct, OrderInfo};
use crate::maker_traits::MakerTraits;
use crate::settlement_extension::SettlementExtension;
use cl_auction::{
    calc_taking_amount, mul_div, AmountCalculator, AuctionDetails, Fees, Rounding, Whitelist,
};
use cl_escrow::{HashLock, Immutables, ImmutablesParams, TimeLocks};
use cl_primitives::{Address, Hash, Interaction, U256};
use tracing::debug;

/// Default seconds an order stays valid after its auction ends.
pub const DEFAULT_ORDER_EXPIRATION_DELAY: u64 = 12;

/// What the maker swaps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrossChainOrderInfo {
    /// Maker
    pub maker: Address,
    /// Source-chain asset the maker sells
    pub maker_asset: Address,
    /// Destination-chain asset the maker buys; zero for the native coin
    pub taker_asset: Address,
    /// Amount of maker asset
    pub making_amount: U256,
    /// Amount of taker asset
    pub taking_amount: U256,
    /// Destination receiver, zero for the maker
    pub receiver: Address,
    /// 96-bit base salt; random when `None`
    pub salt: Option<U256>,
}

/// Escrow parameters fixed at order creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EscrowParams {
    /// Single-fill lock or Merkle root
    pub hash_lock: HashLock,
    /// Source chain id
    pub src_chain_id: u64,
    /// Destination chain id
    pub dst_chain_id: u64,
    /// Safety deposit on the source escrow
    pub src_safety_deposit: U256,
    /// Safety deposit on the destination escrow
    pub dst_safety_deposit: U256,
    /// Stage delays
    pub time_locks: TimeLocks,
}

/// Auction and resolver settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Details {
    /// Price curve
    pub auction: AuctionDetails,
    /// Resolvers allowed to fill and when
    pub whitelist: Whitelist,
    /// Fees, if any
    pub fees: Option<Fees>,
}

/// Optional order flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extra {
    /// Allow the order to be filled in parts
    pub allow_partial_fills: bool,
    /// Allow more than one fill
    pub allow_multiple_fills: bool,
    /// Unwrap the wrapped native token for the maker
    pub unwrap_native: bool,
    /// Pull maker funds through Permit2
    pub enable_permit2: bool,
    /// Seconds the order stays valid after the auction ends
    pub order_expiration_delay: u64,
    /// Nonce; required when the bit invalidator tracks the order
    pub nonce: Option<u64>,
    /// Maker permit call data on the maker asset
    pub permit: Option<Vec<u8>>,
}

impl Default for Extra {
    fn default() -> Self {
        Self {
            allow_partial_fills: true,
            allow_multiple_fills: true,
            unwrap_native: false,
            enable_permit2: false,
            order_expiration_delay: DEFAULT_ORDER_EXPIRATION_DELAY,
            nonce: None,
            permit: None,
        }
    }
}

/// A signed-able cross-chain swap order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrossChainOrder {
    inner: LimitOrder,
    escrow_extension: EscrowExtension,
    extra: Extra,
    config: ChainConfig,
}

impl CrossChainOrder {
    /// Build an order for `escrow_factory` on the source chain.
    ///
    /// Both chains must be supported and different.
    pub fn new(
        escrow_factory: Address,
        info: CrossChainOrderInfo,
        params: EscrowParams,
        details: Details,
        extra: Extra,
        config: &ChainConfig,
    ) -> Result<Self, OrderError> {
        for chain in [params.src_chain_id, params.dst_chain_id] {
            if !config.is_supported(chain) {
                return Err(OrderError::UnsupportedChain(chain));
            }
        }
        if params.src_chain_id == params.dst_chain_id {
            return Err(OrderError::SameChain(params.src_chain_id));
        }

        let settlement = SettlementExtension::new(
            escrow_factory,
            details.auction,
            details.whitelist,
            details.fees,
            extra
                .permit
                .as_ref()
                .map(|permit| Interaction::new(info.maker_asset, permit.clone())),
            Some(info.receiver),
        );
        let escrow_extension = EscrowExtension::new(
            settlement,
            EscrowExtraData {
                hash_lock: params.hash_lock,
                dst_chain_id: params.dst_chain_id,
                dst_token: info.taker_asset,
                src_safety_deposit: params.src_safety_deposit,
                dst_safety_deposit: params.dst_safety_deposit,
                time_locks: params.time_locks,
            },
        )?;

        let true_erc20 = config.true_erc20(params.src_chain_id)?;
        let order = Self::assemble(escrow_extension, info, true_erc20, extra, config)?;
        debug!(
            "[cl-order] Created cross-chain order {} -> {} (maker {}, hashlock {})",
            params.src_chain_id,
            params.dst_chain_id,
            order.maker(),
            params.hash_lock
        );
        Ok(order)
    }

    fn assemble(
        escrow_extension: EscrowExtension,
        info: CrossChainOrderInfo,
        inner_taker_asset: Address,
        extra: Extra,
        config: &ChainConfig,
    ) -> Result<Self, OrderError> {
        let settlement = escrow_extension.settlement();
        let auction = settlement.auction_details();
        let deadline = auction
            .end_time()
            .checked_add(extra.order_expiration_delay)
            .ok_or(OrderError::Overflow("order deadline"))?;

        let mut traits = MakerTraits::default()
            .with_expiration(deadline)?
            .set_partial_fills(extra.allow_partial_fills)
            .set_multiple_fills(extra.allow_multiple_fills)
            .enable_post_interaction();
        if extra.unwrap_native {
            traits = traits.enable_native_unwrap();
        }
        if extra.enable_permit2 {
            traits = traits.enable_permit2();
        }
        match extra.nonce {
            Some(nonce) => traits = traits.with_nonce(nonce)?,
            None if traits.is_bit_invalidator_mode() => return Err(OrderError::NonceRequired),
            None => {}
        }

        let receiver = if settlement.fees().is_some() {
            settlement.address()
        } else {
            info.receiver
        };

        let extension = escrow_extension.build()?;
        let base_salt = info.salt.unwrap_or_else(LimitOrder::random_base_salt);
        let salt = LimitOrder::build_salt(&extension, base_salt)?;

        let inner = LimitOrder::new(
            OrderInfo {
                maker: info.maker,
                maker_asset: info.maker_asset,
                taker_asset: inner_taker_asset,
                making_amount: info.making_amount,
                taking_amount: info.taking_amount,
                receiver,
                salt,
            },
            traits,
            extension,
        )?;

        Ok(Self {
            inner,
            escrow_extension,
            extra,
            config: config.clone(),
        })
    }

    /// Rebuild an order from its signed fields and extension.
    pub fn from_data_and_extension(
        order: &LimitOrderV4Struct,
        extension: Extension,
        config: &ChainConfig,
    ) -> Result<Self, OrderError> {
        let escrow_extension = EscrowExtension::from_extension(&extension)?;
        let settlement = escrow_extension.settlement();
        let traits = MakerTraits::new(order.maker_traits);

        let deadline = traits
            .expiration()
            .ok_or(OrderError::InvalidMakerTraits("order has no expiration"))?;
        let order_expiration_delay = deadline
            .checked_sub(settlement.auction_details().end_time())
            .ok_or(OrderError::InvalidMakerTraits("order expires before its auction ends"))?;

        let receiver = if settlement.fees().is_some() {
            settlement.custom_receiver().unwrap_or(Address::ZERO)
        } else {
            order.receiver
        };
        let extra = Extra {
            allow_partial_fills: traits.is_partial_fill_allowed(),
            allow_multiple_fills: traits.is_multiple_fills_allowed(),
            unwrap_native: traits.is_native_unwrap_enabled(),
            enable_permit2: traits.is_permit2(),
            order_expiration_delay,
            nonce: Some(traits.nonce_or_epoch()),
            permit: settlement.maker_permit().map(|permit| permit.data.clone()),
        };
        let info = CrossChainOrderInfo {
            maker: order.maker,
            maker_asset: order.maker_asset,
            taker_asset: escrow_extension.dst_token(),
            making_amount: order.making_amount,
            taking_amount: order.taking_amount,
            receiver,
            salt: Some(order.salt >> 160),
        };

        let rebuilt = Self::assemble(escrow_extension, info, order.taker_asset, extra, config)?;
        if rebuilt.inner.salt() != order.salt {
            return Err(OrderError::SaltMismatch);
        }
        if rebuilt.inner.maker_traits().as_u256() != order.maker_traits {
            return Err(OrderError::InvalidMakerTraits(
                "maker traits carry flags a cross-chain order never sets",
            ));
        }
        Ok(rebuilt)
    }

    /// Signed fields.
    pub fn build(&self) -> LimitOrderV4Struct {
        self.inner.build()
    }

    /// Typed data to sign on the source chain.
    pub fn typed_data(&self, src_chain_id: u64) -> Result<EIP712TypedData, OrderError> {
        let protocol = self.config.limit_order_protocol(src_chain_id)?;
        Ok(self.inner.typed_data(src_chain_id, protocol))
    }

    /// EIP-712 order hash on the source chain.
    pub fn order_hash(&self, src_chain_id: u64) -> Result<Hash, OrderError> {
        let protocol = self.config.limit_order_protocol(src_chain_id)?;
        Ok(self.inner.order_hash(src_chain_id, protocol))
    }

    /// Amount calculator over this order's auction and fees.
    pub fn amount_calculator(&self) -> AmountCalculator {
        self.escrow_extension.settlement().amount_calculator()
    }

    /// Taker asset `taker` must provide for `making_amount` at `time`.
    pub fn calc_taking_amount(
        &self,
        taker: &Address,
        making_amount: U256,
        time: u64,
        base_fee: U256,
    ) -> Result<U256, OrderError> {
        let taking = calc_taking_amount(
            making_amount,
            self.making_amount(),
            self.taking_amount(),
        )?;
        Ok(self
            .amount_calculator()
            .required_taking_amount(taker, taking, time, base_fee)?)
    }

    /// Resolver fee for filling `making_amount`, the whole order when `None`.
    pub fn resolver_fee(
        &self,
        taker: &Address,
        time: u64,
        base_fee: U256,
        making_amount: Option<U256>,
    ) -> Result<U256, OrderError> {
        let taking = calc_taking_amount(
            making_amount.unwrap_or(self.making_amount()),
            self.making_amount(),
            self.taking_amount(),
        )?;
        Ok(self
            .amount_calculator()
            .resolver_fee(taker, taking, time, base_fee)?)
    }

    /// Check if `executor` may fill at `time`.
    pub fn can_execute_at(&self, executor: &Address, time: u64) -> bool {
        self.whitelist().can_execute_at(executor, time)
    }

    /// Check if the order is past its deadline at `time`.
    pub fn is_expired_at(&self, time: u64) -> bool {
        time > self.deadline()
    }

    /// Check if `wallet` holds the exclusivity window.
    pub fn is_exclusive_resolver(&self, wallet: &Address) -> bool {
        self.whitelist().is_exclusive_resolver(wallet)
    }

    /// Check if `time` falls in the exclusivity window.
    pub fn is_exclusivity_period(&self, time: u64) -> bool {
        self.whitelist().is_exclusivity_period(time)
    }

    /// Source escrow immutables for a fill of `amount` by `taker`.
    ///
    /// `deployedAt` stays zero until the escrow is observed on chain. A partial
    /// fill must name the Merkle leaf it consumes.
    pub fn to_src_immutables(
        &self,
        src_chain_id: u64,
        taker: Address,
        amount: U256,
        hash_lock: Option<HashLock>,
    ) -> Result<Immutables, OrderError> {
        let root = self.escrow_extension.hash_lock();
        let hash_lock = hash_lock.unwrap_or(root);
        if amount != self.making_amount() && hash_lock == root {
            return Err(OrderError::PartialFillNeedsLeaf);
        }

        Ok(Immutables::new(ImmutablesParams {
            order_hash: self.order_hash(src_chain_id)?,
            hash_lock,
            maker: self.maker(),
            taker,
            token: self.maker_asset(),
            amount,
            safety_deposit: self.escrow_extension.src_safety_deposit(),
            time_locks: self.escrow_extension.time_locks(),
        }))
    }

    /// Merkle leaf index a fill of `fill_amount` must reveal.
    ///
    /// `remaining_amount` defaults to the whole making amount. The fill that
    /// takes everything left uses the extra last secret.
    pub fn get_multiple_fill_idx(
        &self,
        fill_amount: U256,
        remaining_amount: Option<U256>,
    ) -> Result<u64, OrderError> {
        if !self.multiple_fills_allowed() {
            return Err(OrderError::MultipleFillsDisabled);
        }
        let making = self.making_amount();
        let remaining = remaining_amount.unwrap_or(making);
        if fill_amount.is_zero() || fill_amount > remaining || remaining > making {
            return Err(OrderError::InvalidFillAmount {
                fill: fill_amount.to_string(),
                remaining: remaining.to_string(),
            });
        }

        let parts = U256::from(self.escrow_extension.hash_lock().get_parts_count());
        let filled = making - remaining + fill_amount - 1;
        let idx = mul_div(filled, parts, making, Rounding::Floor)?;
        let idx = if remaining == fill_amount { idx + 1 } else { idx };
        Ok(idx.low_u64())
    }

    fn whitelist(&self) -> &Whitelist {
        self.escrow_extension.settlement().whitelist()
    }

    /// Escrow extension.
    pub fn escrow_extension(&self) -> &EscrowExtension {
        &self.escrow_extension
    }

    /// Encoded-form extension.
    pub fn extension(&self) -> &Extension {
        self.inner.extension()
    }

    /// Destination chain id.
    pub fn dst_chain_id(&self) -> u64 {
        self.escrow_extension.dst_chain_id()
    }

    /// Maker.
    pub fn maker(&self) -> Address {
        self.inner.maker()
    }

    /// Source-chain asset the maker sells.
    pub fn maker_asset(&self) -> Address {
        self.inner.maker_asset()
    }

    /// Destination-chain asset the maker buys.
    pub fn taker_asset(&self) -> Address {
        self.escrow_extension.dst_token()
    }

    /// Making amount.
    pub fn making_amount(&self) -> U256 {
        self.inner.making_amount()
    }

    /// Taking amount.
    pub fn taking_amount(&self) -> U256 {
        self.inner.taking_amount()
    }

    /// Full salt.
    pub fn salt(&self) -> U256 {
        self.inner.salt()
    }

    /// Receiver in the signed order; zero means the maker.
    pub fn receiver(&self) -> Address {
        self.inner.receiver()
    }

    /// Address that finally gets the taker asset.
    pub fn real_receiver(&self) -> Address {
        let settlement = self.escrow_extension.settlement();
        let receiver = if settlement.fees().is_some() {
            settlement.custom_receiver().unwrap_or(Address::ZERO)
        } else {
            self.inner.receiver()
        };
        if receiver.is_zero() {
            self.maker()
        } else {
            receiver
        }
    }

    /// Last second the order can be filled.
    ///
    /// Construction already checked this sum.
    pub fn deadline(&self) -> u64 {
        self.auction_end_time() + self.extra.order_expiration_delay
    }

    /// Auction start.
    pub fn auction_start_time(&self) -> u64 {
        self.escrow_extension.settlement().auction_details().start_time()
    }

    /// Auction end.
    pub fn auction_end_time(&self) -> u64 {
        self.escrow_extension.settlement().auction_details().end_time()
    }

    /// Nonce or epoch.
    pub fn nonce(&self) -> u64 {
        self.inner.maker_traits().nonce_or_epoch()
    }

    /// Check if the order may be filled in parts.
    pub fn partial_fill_allowed(&self) -> bool {
        self.inner.maker_traits().is_partial_fill_allowed()
    }

    /// Check if the order may be filled more than once.
    pub fn multiple_fills_allowed(&self) -> bool {
        self.inner.maker_traits().is_multiple_fills_allowed()
    }

    /// Flags the order was built with.
    pub fn extra(&self) -> &Extra {
        &self.extra
    }
}
