use crate::external::AdminMintConstraint;
use commons::{
    BidId, ContractTokenId, ProjectKey, ADMIN_MINT_CONSTRAINT_UPDATED_TAG,
    AUCTION_CONFIGURED_TAG, AUCTION_TIMESTAMP_END_UPDATED_TAG, BID_CREATED_TAG, BID_MINTED_TAG,
    BID_REFUNDED_TAG, BID_REMOVED_TAG, BID_SETTLED_TAG, BID_TOPPED_UP_TAG,
    PENDING_PAYOUT_CLAIMED_TAG, PENDING_PAYOUT_CREDITED_TAG, PROJECT_MAX_INVOCATIONS_UPDATED_TAG,
    PURCHASE_TAG, REVENUES_COLLECTED_TAG,
};
use concordium_std::*;

/// Auction configuration event data.
#[derive(Debug, Serial)]
pub struct AuctionConfiguredEvent {
    pub project: ProjectKey,
    pub timestamp_start: Timestamp,
    pub timestamp_end: Timestamp,
    pub base_price: Amount,
    pub num_tokens_in_auction: u32,
    pub allow_extra_time: bool,
    pub admin_artist_only_mint_period_if_sellout: bool,
}

/// New bid event data.
#[derive(Debug, Serial)]
pub struct BidCreatedEvent {
    pub project: ProjectKey,
    pub bid_id: BidId,
    pub bidder: AccountAddress,
    pub slot_index: u16,
    pub value: Amount,
}

/// Top-up event data.
#[derive(Debug, Serial)]
pub struct BidToppedUpEvent {
    pub project: ProjectKey,
    pub bid_id: BidId,
    pub old_slot_index: u16,
    pub new_slot_index: u16,
    pub added_value: Amount,
}

/// Eviction of an outbid bid.
#[derive(Debug, Serial)]
pub struct BidRemovedEvent {
    pub project: ProjectKey,
    pub bid_id: BidId,
    pub bidder: AccountAddress,
    /// Value returned to the bidder.
    pub refund: Amount,
}

#[derive(Debug, Serial)]
pub struct AuctionTimestampEndUpdatedEvent {
    pub project: ProjectKey,
    pub timestamp_end: Timestamp,
}

#[derive(Debug, Serial)]
pub struct BidMintedEvent {
    pub project: ProjectKey,
    pub bid_id: BidId,
    pub token_id: ContractTokenId,
}

/// Payment of the part of a bid above the clearing price.
#[derive(Debug, Serial)]
pub struct BidSettledEvent {
    pub project: ProjectKey,
    pub bid_id: BidId,
    pub bidder: AccountAddress,
    pub amount: Amount,
}

#[derive(Debug, Serial)]
pub struct BidRefundedEvent {
    pub project: ProjectKey,
    pub bid_id: BidId,
    pub bidder: AccountAddress,
    pub amount: Amount,
}

#[derive(Debug, Serial)]
pub struct RevenuesCollectedEvent {
    pub project: ProjectKey,
    pub artist_share: Amount,
    pub platform_share: Amount,
}

/// Payment that could not be transferred and waits for `claimPendingPayout`.
#[derive(Debug, Serial)]
pub struct PendingPayoutEvent {
    pub recipient: AccountAddress,
    pub amount: Amount,
}

#[derive(Debug, Serial)]
pub struct PurchaseEvent {
    pub project: ProjectKey,
    pub to: AccountAddress,
    pub price: Amount,
    pub token_id: ContractTokenId,
}

#[derive(Debug, Serial)]
pub struct ProjectMaxInvocationsUpdatedEvent {
    pub project: ProjectKey,
    pub max_invocations: u64,
    /// False when following the core contract again.
    pub manually_limited: bool,
}

#[derive(Debug, Serial)]
pub struct AdminMintConstraintUpdatedEvent {
    pub project: ProjectKey,
    pub admin_mint_constraint: AdminMintConstraint,
}

/// Tagged event to be serialized for the event log.
#[derive(Debug)]
pub enum RamMinterEvent {
    AuctionConfigured(AuctionConfiguredEvent),
    BidCreated(BidCreatedEvent),
    BidToppedUp(BidToppedUpEvent),
    BidRemoved(BidRemovedEvent),
    AuctionTimestampEndUpdated(AuctionTimestampEndUpdatedEvent),
    BidMinted(BidMintedEvent),
    BidSettled(BidSettledEvent),
    BidRefunded(BidRefundedEvent),
    RevenuesCollected(RevenuesCollectedEvent),
    PendingPayoutCredited(PendingPayoutEvent),
    PendingPayoutClaimed(PendingPayoutEvent),
    Purchase(PurchaseEvent),
    ProjectMaxInvocationsUpdated(ProjectMaxInvocationsUpdatedEvent),
    AdminMintConstraintUpdated(AdminMintConstraintUpdatedEvent),
}

impl RamMinterEvent {
    pub fn timestamp_end_updated(project: ProjectKey, timestamp_end: Timestamp) -> Self {
        Self::AuctionTimestampEndUpdated(AuctionTimestampEndUpdatedEvent {
            project,
            timestamp_end,
        })
    }

    pub fn settled(project: ProjectKey, bid_id: BidId, bidder: AccountAddress, amount: Amount) -> Self {
        Self::BidSettled(BidSettledEvent {
            project,
            bid_id,
            bidder,
            amount,
        })
    }

    pub fn refunded(project: ProjectKey, bid_id: BidId, bidder: AccountAddress, amount: Amount) -> Self {
        Self::BidRefunded(BidRefundedEvent {
            project,
            bid_id,
            bidder,
            amount,
        })
    }
}

impl Serial for RamMinterEvent {
    fn serial<W: Write>(&self, out: &mut W) -> Result<(), W::Err> {
        match self {
            RamMinterEvent::AuctionConfigured(event) => {
                out.write_u8(AUCTION_CONFIGURED_TAG)?;
                event.serial(out)
            }
            RamMinterEvent::BidCreated(event) => {
                out.write_u8(BID_CREATED_TAG)?;
                event.serial(out)
            }
            RamMinterEvent::BidToppedUp(event) => {
                out.write_u8(BID_TOPPED_UP_TAG)?;
                event.serial(out)
            }
            RamMinterEvent::BidRemoved(event) => {
                out.write_u8(BID_REMOVED_TAG)?;
                event.serial(out)
            }
            RamMinterEvent::AuctionTimestampEndUpdated(event) => {
                out.write_u8(AUCTION_TIMESTAMP_END_UPDATED_TAG)?;
                event.serial(out)
            }
            RamMinterEvent::BidMinted(event) => {
                out.write_u8(BID_MINTED_TAG)?;
                event.serial(out)
            }
            RamMinterEvent::BidSettled(event) => {
                out.write_u8(BID_SETTLED_TAG)?;
                event.serial(out)
            }
            RamMinterEvent::BidRefunded(event) => {
                out.write_u8(BID_REFUNDED_TAG)?;
                event.serial(out)
            }
            RamMinterEvent::RevenuesCollected(event) => {
                out.write_u8(REVENUES_COLLECTED_TAG)?;
                event.serial(out)
            }
            RamMinterEvent::PendingPayoutCredited(event) => {
                out.write_u8(PENDING_PAYOUT_CREDITED_TAG)?;
                event.serial(out)
            }
            RamMinterEvent::PendingPayoutClaimed(event) => {
                out.write_u8(PENDING_PAYOUT_CLAIMED_TAG)?;
                event.serial(out)
            }
            RamMinterEvent::Purchase(event) => {
                out.write_u8(PURCHASE_TAG)?;
                event.serial(out)
            }
            RamMinterEvent::ProjectMaxInvocationsUpdated(event) => {
                out.write_u8(PROJECT_MAX_INVOCATIONS_UPDATED_TAG)?;
                event.serial(out)
            }
            RamMinterEvent::AdminMintConstraintUpdated(event) => {
                out.write_u8(ADMIN_MINT_CONSTRAINT_UPDATED_TAG)?;
                event.serial(out)
            }
        }
    }
}
