/// Tag for the AuctionConfigured event.
pub const AUCTION_CONFIGURED_TAG: u8 = u8::MAX;

/// Tag for the BidCreated event.
pub const BID_CREATED_TAG: u8 = u8::MAX - 1;

/// Tag for the BidToppedUp event.
pub const BID_TOPPED_UP_TAG: u8 = u8::MAX - 2;

/// Tag for the BidRemoved event, logged when a bid is outbid and evicted.
pub const BID_REMOVED_TAG: u8 = u8::MAX - 3;

/// Tag for the AuctionTimestampEndUpdated event.
pub const AUCTION_TIMESTAMP_END_UPDATED_TAG: u8 = u8::MAX - 4;

/// Tag for the BidMinted event.
pub const BID_MINTED_TAG: u8 = u8::MAX - 5;

/// Tag for the BidSettled event.
pub const BID_SETTLED_TAG: u8 = u8::MAX - 6;

/// Tag for the BidRefunded event.
pub const BID_REFUNDED_TAG: u8 = u8::MAX - 7;

/// Tag for the RevenuesCollected event.
pub const REVENUES_COLLECTED_TAG: u8 = u8::MAX - 8;

/// Tag for the PendingPayoutCredited event.
pub const PENDING_PAYOUT_CREDITED_TAG: u8 = u8::MAX - 9;

/// Tag for the PendingPayoutClaimed event.
pub const PENDING_PAYOUT_CLAIMED_TAG: u8 = u8::MAX - 10;

/// Tag for the Purchase event.
pub const PURCHASE_TAG: u8 = u8::MAX - 11;

/// Tag for the ProjectMaxInvocationsUpdated event.
pub const PROJECT_MAX_INVOCATIONS_UPDATED_TAG: u8 = u8::MAX - 12;

/// Tag for the AdminMintConstraintUpdated event.
pub const ADMIN_MINT_CONSTRAINT_UPDATED_TAG: u8 = u8::MAX - 13;
