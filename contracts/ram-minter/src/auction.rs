//! Auction of one project and its state machine.
use crate::{
    bid_book::{BidBook, BidStore},
    external::SetAuctionDetailsParams,
    price::{self, NUM_SLOTS},
};
use commons::{BidId, CustomContractError};
use concordium_std::*;
use core::convert::TryFrom;

const MINUTE_MILLIS: u64 = 60 * 1000;
const HOUR_MILLIS: u64 = 60 * MINUTE_MILLIS;

/// Shortest allowed auction.
pub const MIN_AUCTION_DURATION_MILLIS: u64 = 10 * MINUTE_MILLIS;
/// Bids this close to the end of a sold out auction push the end back.
pub const AUCTION_BUFFER_MILLIS: u64 = 5 * MINUTE_MILLIS;
/// Cap of buffer extensions past the scheduled end.
pub const MAX_AUCTION_EXTRA_MILLIS: u64 = 60 * MINUTE_MILLIS;
/// Cap of a single admin emergency extension.
pub const MAX_ADMIN_EMERGENCY_EXTENSION_HOURS: u32 = 72;
/// Length of the admin/artist-only mint window after a sold out auction.
pub const ADMIN_ARTIST_ONLY_MINT_MILLIS: u64 = 72 * HOUR_MILLIS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, SchemaType)]
pub enum AuctionState {
    /// Configured, not started.
    PreAuction,
    /// Accepting bids and top-ups.
    LiveAuction,
    /// Ended sold out; only the admin or artist may mint for a while.
    PostAuctionSellOutAdminArtistMint,
    /// Ended; winners may mint and purchases are open.
    PostAuctionOpenMint,
    /// Ended; every winning bid is minted or refunded.
    PostAuctionAllBidsHandled,
}

impl AuctionState {
    pub fn is_post_auction(&self) -> bool {
        !matches!(self, Self::PreAuction | Self::LiveAuction)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Auction {
    pub timestamp_start: Timestamp,
    pub timestamp_end: Timestamp,
    /// End as configured, reference point of the extra time cap.
    pub timestamp_end_scheduled: Timestamp,
    pub base_price: Amount,
    pub num_tokens_in_auction: u32,
    pub num_bids_minted_tokens: u32,
    pub num_bids_error_refunded: u32,
    /// Cached lowest populated slot.
    pub min_bid_slot_index: Option<u16>,
    pub allow_extra_time: bool,
    pub admin_artist_only_mint_period_if_sellout: bool,
    pub revenues_collected: bool,
    /// CCD held by the minter on behalf of this auction.
    pub project_balance: Amount,
    pub book: BidBook,
}

/// Bid that lost its place to a new bid and must be refunded.
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvictedBid {
    pub bid_id: BidId,
    pub bidder: AccountAddress,
    pub value: Amount,
}

#[must_use]
#[derive(Debug)]
pub struct BidReceipt {
    pub bid_id: BidId,
    pub evicted: Option<EvictedBid>,
    pub timestamp_end_extended: Option<Timestamp>,
}

#[must_use]
#[derive(Debug)]
pub struct TopUpReceipt {
    pub old_slot_index: u16,
    pub timestamp_end_extended: Option<Timestamp>,
}

impl Auction {
    pub fn new(
        params: &SetAuctionDetailsParams,
        now: Timestamp,
        num_tokens_in_auction: u64,
    ) -> Result<Self, CustomContractError> {
        ensure!(
            params.timestamp_start > now,
            CustomContractError::InvalidTimestamps
        );
        ensure!(
            params.timestamp_end.timestamp_millis()
                >= params
                    .timestamp_start
                    .timestamp_millis()
                    .saturating_add(MIN_AUCTION_DURATION_MILLIS),
            CustomContractError::InvalidDuration
        );
        ensure!(
            price::is_valid_base_price(params.base_price),
            CustomContractError::InvalidBasePrice
        );
        ensure!(
            num_tokens_in_auction > 0,
            CustomContractError::NoTokensInAuction
        );

        Ok(Self {
            timestamp_start: params.timestamp_start,
            timestamp_end: params.timestamp_end,
            timestamp_end_scheduled: params.timestamp_end,
            base_price: params.base_price,
            num_tokens_in_auction: u32::try_from(num_tokens_in_auction).unwrap_or(u32::MAX),
            num_bids_minted_tokens: 0,
            num_bids_error_refunded: 0,
            min_bid_slot_index: None,
            allow_extra_time: params.allow_extra_time,
            admin_artist_only_mint_period_if_sellout: params
                .admin_artist_only_mint_period_if_sellout,
            revenues_collected: false,
            project_balance: Amount::zero(),
            book: BidBook::new(params.project),
        })
    }

    pub fn state(&self, now: Timestamp) -> AuctionState {
        if now < self.timestamp_start {
            return AuctionState::PreAuction;
        }
        if now < self.timestamp_end {
            return AuctionState::LiveAuction;
        }
        if self.num_pending_bids() == 0 {
            return AuctionState::PostAuctionAllBidsHandled;
        }

        let admin_window_end = self
            .timestamp_end
            .timestamp_millis()
            .saturating_add(ADMIN_ARTIST_ONLY_MINT_MILLIS);
        if self.admin_artist_only_mint_period_if_sellout
            && self.is_sold_out()
            && now.timestamp_millis() < admin_window_end
        {
            AuctionState::PostAuctionSellOutAdminArtistMint
        } else {
            AuctionState::PostAuctionOpenMint
        }
    }

    pub fn ensure_live(&self, now: Timestamp) -> Result<(), CustomContractError> {
        ensure_eq!(
            self.state(now),
            AuctionState::LiveAuction,
            CustomContractError::OnlyLiveAuction
        );
        Ok(())
    }

    pub fn ensure_post_auction(&self, now: Timestamp) -> Result<AuctionState, CustomContractError> {
        let state = self.state(now);
        ensure!(state.is_post_auction(), CustomContractError::OnlyPostAuction);
        Ok(state)
    }

    /// Post auction and past the admin/artist-only mint window.
    pub fn ensure_open_mint(&self, now: Timestamp) -> Result<AuctionState, CustomContractError> {
        let state = self.ensure_post_auction(now)?;
        ensure!(
            state != AuctionState::PostAuctionSellOutAdminArtistMint,
            CustomContractError::OnlyPostAuctionOpenMint
        );
        Ok(state)
    }

    pub fn num_bids(&self) -> u32 {
        self.book.num_bids()
    }

    pub fn num_live_bids(&self) -> u32 {
        self.book.live_count()
    }

    /// Live bids that are neither minted nor error refunded.
    pub fn num_pending_bids(&self) -> u32 {
        self.num_live_bids()
            .saturating_sub(self.num_bids_minted_tokens)
            .saturating_sub(self.num_bids_error_refunded)
    }

    pub fn is_sold_out(&self) -> bool {
        self.num_live_bids() >= self.num_tokens_in_auction
    }

    pub fn bid_value(&self, slot_index: u16) -> Result<Amount, CustomContractError> {
        price::slot_amount(self.base_price, slot_index)
    }

    pub fn lowest_bid_value(&self) -> Result<Amount, CustomContractError> {
        let slot = self
            .min_bid_slot_index
            .ok_or(CustomContractError::NoBidsInAuction)?;
        self.bid_value(slot)
    }

    /// Price every winner pays: the lowest bid once sold out, else the base
    /// price.
    pub fn clearing_price(&self) -> Result<Amount, CustomContractError> {
        if self.is_sold_out() {
            self.lowest_bid_value()
        } else {
            Ok(self.base_price)
        }
    }

    /// Cheapest slot a new bid may use, with its value.
    pub fn minimum_next_bid(&self) -> Result<(u16, Amount), CustomContractError> {
        if !self.is_sold_out() {
            return Ok((0, self.base_price));
        }
        let min_slot = self.book.min_slot()?;
        let min_value = self.bid_value(min_slot)?;
        for slot in min_slot + 1..NUM_SLOTS {
            let value = self.bid_value(slot)?;
            if price::is_sufficient_outbid(value, min_value) {
                return Ok((slot, value));
            }
        }
        bail!(CustomContractError::InsufficientBidValue)
    }

    /// Places a bid paying `value` into `slot_index`, evicting the oldest
    /// lowest bid when the auction is sold out.
    pub fn create_bid<S: HasStateApi>(
        &mut self,
        bids: &mut BidStore<S>,
        now: Timestamp,
        bidder: AccountAddress,
        slot_index: u16,
        value: Amount,
    ) -> Result<BidReceipt, CustomContractError> {
        self.ensure_live(now)?;
        let bid_value = self.bid_value(slot_index)?;
        ensure_eq!(value, bid_value, CustomContractError::ValueMismatch);

        let evicted = if self.is_sold_out() {
            let min_value = self.lowest_bid_value()?;
            ensure!(
                price::is_sufficient_outbid(value, min_value),
                CustomContractError::InsufficientBidValue
            );
            let bid = self.book.evict_oldest_at_min_slot(bids)?;
            Some(EvictedBid {
                bid_id: bid.id,
                bidder: bid.bidder,
                value: min_value,
            })
        } else {
            None
        };

        let bid_id = self.book.insert(bids, slot_index, bidder)?;
        self.min_bid_slot_index = self.book.min_slot().ok();
        self.project_balance += value;
        if let Some(evicted) = evicted.as_ref() {
            self.debit(evicted.value)?;
        }

        Ok(BidReceipt {
            bid_id,
            evicted,
            timestamp_end_extended: self.extend_into_buffer(now),
        })
    }

    /// Moves a live bid to `new_slot_index`; `added_value` must be exactly
    /// the difference of the two slot values.
    pub fn top_up_bid<S: HasStateApi>(
        &mut self,
        bids: &mut BidStore<S>,
        now: Timestamp,
        bidder: &AccountAddress,
        bid_id: BidId,
        new_slot_index: u16,
        added_value: Amount,
    ) -> Result<TopUpReceipt, CustomContractError> {
        self.ensure_live(now)?;
        let bid = self.book.get(bids, bid_id)?;
        ensure!(self.book.is_live(bids, bid_id), CustomContractError::InvalidBidId);
        ensure!(bid.bidder == *bidder, CustomContractError::OnlyBidder);
        ensure!(
            new_slot_index > bid.slot_index,
            CustomContractError::InsufficientBidValue
        );

        let old_value = self.bid_value(bid.slot_index)?;
        let new_value = self.bid_value(new_slot_index)?;
        ensure_eq!(
            added_value,
            Amount::from_micro_ccd(new_value.micro_ccd - old_value.micro_ccd),
            CustomContractError::ValueMismatch
        );

        let old_slot_index = self.book.top_up(bids, bid_id, bidder, new_slot_index)?;
        self.min_bid_slot_index = self.book.min_slot().ok();
        self.project_balance += added_value;

        Ok(TopUpReceipt {
            old_slot_index,
            timestamp_end_extended: self.extend_into_buffer(now),
        })
    }

    /// Pending bids that cannot be minted with `available_supply` tokens
    /// left. Zero before the auction ended.
    pub fn error_e1_deficit(&self, now: Timestamp, available_supply: u64) -> u32 {
        if !self.state(now).is_post_auction() {
            return 0;
        }
        let deficit = u64::from(self.num_pending_bids()).saturating_sub(available_supply);
        u32::try_from(deficit).unwrap_or(u32::MAX)
    }

    /// Pushes end and scheduled end back by `hours`.
    pub fn add_emergency_hours(
        &mut self,
        now: Timestamp,
        hours: u32,
    ) -> Result<Timestamp, CustomContractError> {
        ensure!(
            !self.state(now).is_post_auction(),
            CustomContractError::OnlyPreOrLiveAuction
        );
        ensure!(
            hours > 0 && hours <= MAX_ADMIN_EMERGENCY_EXTENSION_HOURS,
            CustomContractError::InvalidDuration
        );

        let extension = u64::from(hours) * HOUR_MILLIS;
        self.timestamp_end = shift(self.timestamp_end, extension);
        self.timestamp_end_scheduled = shift(self.timestamp_end_scheduled, extension);
        Ok(self.timestamp_end)
    }

    /// Moves the end forward to `timestamp_end`.
    pub fn reduce_length(
        &mut self,
        now: Timestamp,
        timestamp_end: Timestamp,
    ) -> Result<(), CustomContractError> {
        ensure!(
            !self.state(now).is_post_auction(),
            CustomContractError::OnlyPreOrLiveAuction
        );
        ensure!(
            timestamp_end < self.timestamp_end && timestamp_end > now,
            CustomContractError::InvalidTimestamps
        );
        ensure!(
            timestamp_end.timestamp_millis()
                >= shift(self.timestamp_start, MIN_AUCTION_DURATION_MILLIS).timestamp_millis(),
            CustomContractError::InvalidDuration
        );

        self.timestamp_end = timestamp_end;
        if self.timestamp_end_scheduled > timestamp_end {
            self.timestamp_end_scheduled = timestamp_end;
        }
        Ok(())
    }

    pub(crate) fn debit(&mut self, amount: Amount) -> Result<(), CustomContractError> {
        let balance = self
            .project_balance
            .micro_ccd
            .checked_sub(amount.micro_ccd)
            .ok_or(CustomContractError::InsufficientProjectBalance)?;
        self.project_balance = Amount::from_micro_ccd(balance);
        Ok(())
    }

    /// Moves the end to `now + buffer` when a sold out auction with extra
    /// time receives a bid inside the buffer. Returns the new end.
    fn extend_into_buffer(&mut self, now: Timestamp) -> Option<Timestamp> {
        if !self.allow_extra_time || !self.is_sold_out() {
            return None;
        }
        let buffered_end = now.timestamp_millis().saturating_add(AUCTION_BUFFER_MILLIS);
        if buffered_end <= self.timestamp_end.timestamp_millis() {
            return None;
        }

        let cap = shift(self.timestamp_end_scheduled, MAX_AUCTION_EXTRA_MILLIS).timestamp_millis();
        let new_end = buffered_end.min(cap);
        if new_end <= self.timestamp_end.timestamp_millis() {
            return None;
        }
        self.timestamp_end = Timestamp::from_timestamp_millis(new_end);
        Some(self.timestamp_end)
    }
}

fn shift(timestamp: Timestamp, millis: u64) -> Timestamp {
    Timestamp::from_timestamp_millis(timestamp.timestamp_millis().saturating_add(millis))
}

#[concordium_cfg_test]
mod tests {
    use super::*;
    use commons::ProjectKey;
    use concordium_std::test_infrastructure::*;

    const START: u64 = 10_000_000;
    const END: u64 = START + HOUR_MILLIS;
    const BIDDER: AccountAddress = AccountAddress([5; 32]);

    fn at(millis: u64) -> Timestamp {
        Timestamp::from_timestamp_millis(millis)
    }

    fn params(base_price: Amount, allow_extra_time: bool) -> SetAuctionDetailsParams {
        SetAuctionDetailsParams {
            project: ProjectKey {
                core: ContractAddress {
                    index: 1,
                    subindex: 0,
                },
                project_id: 0,
            },
            timestamp_start: at(START),
            timestamp_end: at(END),
            base_price,
            allow_extra_time,
            admin_artist_only_mint_period_if_sellout: true,
        }
    }

    fn auction(num_tokens: u64, allow_extra_time: bool) -> Auction {
        Auction::new(&params(Amount::from_ccd(1), allow_extra_time), at(0), num_tokens)
            .expect_report("Auction should be valid")
    }

    fn bid_store() -> BidStore<TestStateApi> {
        BidStore::new(&mut TestStateBuilder::new())
    }

    fn bid(
        auction: &mut Auction,
        bids: &mut BidStore<TestStateApi>,
        now: u64,
        slot_index: u16,
    ) -> BidReceipt {
        let value = auction.bid_value(slot_index).expect_report("Slot should exist");
        auction
            .create_bid(bids, at(now), BIDDER, slot_index, value)
            .expect_report("Bid should be accepted")
    }

    #[concordium_test]
    fn test_new_validates_configuration() {
        let mut short = params(Amount::from_ccd(1), false);
        short.timestamp_end = at(START + MIN_AUCTION_DURATION_MILLIS - 1);
        claim_eq!(
            Auction::new(&short, at(0), 5).map(|_| ()),
            Err(CustomContractError::InvalidDuration)
        );
        claim_eq!(
            Auction::new(&params(Amount::from_ccd(1), false), at(START), 5).map(|_| ()),
            Err(CustomContractError::InvalidTimestamps)
        );
        claim_eq!(
            Auction::new(&params(Amount::from_micro_ccd(10), false), at(0), 5).map(|_| ()),
            Err(CustomContractError::InvalidBasePrice)
        );
        claim_eq!(
            Auction::new(&params(Amount::from_ccd(1), false), at(0), 0).map(|_| ()),
            Err(CustomContractError::NoTokensInAuction)
        );
    }

    #[concordium_test]
    fn test_state_transitions() {
        let mut auction = auction(2, false);
        let mut bids = bid_store();
        claim_eq!(auction.state(at(START - 1)), AuctionState::PreAuction);
        claim_eq!(auction.state(at(START)), AuctionState::LiveAuction);
        claim_eq!(auction.state(at(END)), AuctionState::PostAuctionAllBidsHandled);

        let _ = bid(&mut auction, &mut bids, START, 0);
        claim_eq!(auction.state(at(END)), AuctionState::PostAuctionOpenMint);

        let _ = bid(&mut auction, &mut bids, START, 1);
        claim_eq!(
            auction.state(at(END)),
            AuctionState::PostAuctionSellOutAdminArtistMint
        );
        claim_eq!(
            auction.state(at(END + ADMIN_ARTIST_ONLY_MINT_MILLIS)),
            AuctionState::PostAuctionOpenMint
        );

        auction.num_bids_minted_tokens = 2;
        claim_eq!(auction.state(at(END)), AuctionState::PostAuctionAllBidsHandled);
    }

    #[concordium_test]
    fn test_bids_only_while_live() {
        let mut auction = auction(2, false);
        let mut bids = bid_store();
        let value = Amount::from_ccd(1);
        claim_eq!(
            auction.create_bid(&mut bids, at(START - 1), BIDDER, 0, value).map(|_| ()),
            Err(CustomContractError::OnlyLiveAuction)
        );
        claim_eq!(
            auction.create_bid(&mut bids, at(END), BIDDER, 0, value).map(|_| ()),
            Err(CustomContractError::OnlyLiveAuction)
        );
        claim_eq!(
            auction.create_bid(&mut bids, at(START), BIDDER, 1, value).map(|_| ()),
            Err(CustomContractError::ValueMismatch)
        );
        claim_eq!(
            auction.create_bid(&mut bids, at(START), BIDDER, NUM_SLOTS, value).map(|_| ()),
            Err(CustomContractError::SlotOutOfRange)
        );
    }

    #[concordium_test]
    fn test_sold_out_auction_evicts_lowest_bid() {
        let mut auction = auction(2, false);
        let mut bids = bid_store();
        let _ = bid(&mut auction, &mut bids, START, 0);
        let _ = bid(&mut auction, &mut bids, START, 5);
        claim!(auction.is_sold_out());
        claim_eq!(auction.minimum_next_bid(), Ok((2, Amount::from_micro_ccd(1_031_250))));

        let value = auction.bid_value(1).expect_report("Slot should exist");
        claim_eq!(
            auction.create_bid(&mut bids, at(START), BIDDER, 1, value).map(|_| ()),
            Err(CustomContractError::InsufficientBidValue)
        );

        let receipt = bid(&mut auction, &mut bids, START, 2);
        claim_eq!(receipt.bid_id, 3);
        claim_eq!(
            receipt.evicted,
            Some(EvictedBid {
                bid_id: 1,
                bidder: BIDDER,
                value: Amount::from_ccd(1),
            })
        );
        claim_eq!(auction.num_live_bids(), 2);
        claim_eq!(auction.min_bid_slot_index, Some(2));
        let expected_balance = auction.bid_value(2).expect_report("Slot should exist")
            + auction.bid_value(5).expect_report("Slot should exist");
        claim_eq!(auction.project_balance, expected_balance);
    }

    #[concordium_test]
    fn test_top_up_requires_exact_delta() {
        let mut auction = auction(3, false);
        let mut bids = bid_store();
        let _ = bid(&mut auction, &mut bids, START, 0);
        let delta = Amount::from_micro_ccd(1_031_250 - 1_000_000);

        claim_eq!(
            auction
                .top_up_bid(&mut bids, at(START), &BIDDER, 1, 2, Amount::from_micro_ccd(1))
                .map(|_| ()),
            Err(CustomContractError::ValueMismatch)
        );
        claim_eq!(
            auction
                .top_up_bid(&mut bids, at(START), &AccountAddress([6; 32]), 1, 2, delta)
                .map(|_| ()),
            Err(CustomContractError::OnlyBidder)
        );
        claim_eq!(
            auction.top_up_bid(&mut bids, at(START), &BIDDER, 1, 0, Amount::zero()).map(|_| ()),
            Err(CustomContractError::InsufficientBidValue)
        );

        let receipt = auction
            .top_up_bid(&mut bids, at(START), &BIDDER, 1, 2, delta)
            .expect_report("Top-up should be accepted");
        claim_eq!(receipt.old_slot_index, 0);
        claim_eq!(auction.min_bid_slot_index, Some(2));
        claim_eq!(auction.project_balance, Amount::from_micro_ccd(1_031_250));
        claim_eq!(auction.num_bids(), 1);
    }

    #[concordium_test]
    fn test_buffer_extension() {
        let mut auction = auction(1, true);
        let mut bids = bid_store();
        let receipt = bid(&mut auction, &mut bids, END - 30_000, 0);
        claim_eq!(
            receipt.timestamp_end_extended,
            Some(at(END - 30_000 + AUCTION_BUFFER_MILLIS))
        );

        // Extensions stop at the extra time cap.
        let mut now = auction.timestamp_end.timestamp_millis() - 1;
        let mut slot = 0;
        while auction.timestamp_end.timestamp_millis() < END + MAX_AUCTION_EXTRA_MILLIS {
            let (next_slot, _) = auction.minimum_next_bid().expect_report("Next bid should exist");
            slot = next_slot.max(slot + 1);
            let _ = bid(&mut auction, &mut bids, now, slot);
            now = auction.timestamp_end.timestamp_millis() - 1;
        }
        claim_eq!(auction.timestamp_end, at(END + MAX_AUCTION_EXTRA_MILLIS));
        let (next_slot, _) = auction.minimum_next_bid().expect_report("Next bid should exist");
        let receipt = bid(&mut auction, &mut bids, now, next_slot);
        claim_eq!(receipt.timestamp_end_extended, None);
    }

    #[concordium_test]
    fn test_no_extension_without_sell_out_or_flag() {
        let mut auction = auction(2, true);
        let mut bids = bid_store();
        let receipt = bid(&mut auction, &mut bids, END - 1, 0);
        claim_eq!(receipt.timestamp_end_extended, None);

        let mut auction = self::auction(1, false);

        let mut bids = bid_store();
        let receipt = bid(&mut auction, &mut bids, END - 1, 0);
        claim_eq!(receipt.timestamp_end_extended, None);
        claim_eq!(auction.timestamp_end, at(END));
    }

    #[concordium_test]
    fn test_error_e1_deficit() {
        let mut auction = auction(3, false);
        let mut bids = bid_store();
        for slot in 0..3 {
            let _ = bid(&mut auction, &mut bids, START, slot);
        }
        claim_eq!(auction.error_e1_deficit(at(START), 1), 0);
        claim_eq!(auction.error_e1_deficit(at(END), 1), 2);
        claim_eq!(auction.error_e1_deficit(at(END), 3), 0);

        auction.num_bids_error_refunded = 2;
        claim_eq!(auction.error_e1_deficit(at(END), 1), 0);
    }

    #[concordium_test]
    fn test_emergency_hours_and_reduction() {
        let mut auction = auction(3, false);
        claim_eq!(
            auction.add_emergency_hours(at(START), MAX_ADMIN_EMERGENCY_EXTENSION_HOURS + 1),
            Err(CustomContractError::InvalidDuration)
        );
        claim_eq!(
            auction.add_emergency_hours(at(START), 2),
            Ok(at(END + 2 * HOUR_MILLIS))
        );
        claim_eq!(auction.timestamp_end_scheduled, at(END + 2 * HOUR_MILLIS));

        claim_eq!(
            auction.reduce_length(at(START), at(START + MIN_AUCTION_DURATION_MILLIS - 1)),
            Err(CustomContractError::InvalidDuration)
        );
        claim_eq!(
            auction.reduce_length(at(START), at(END + 3 * HOUR_MILLIS)),
            Err(CustomContractError::InvalidTimestamps)
        );
        claim_eq!(auction.reduce_length(at(START), at(END)), Ok(()));
        claim_eq!(auction.timestamp_end_scheduled, at(END));

        claim_eq!(
            auction.add_emergency_hours(at(END), 1),
            Err(CustomContractError::OnlyPreOrLiveAuction)
        );
    }
}
