//! Settlement of an ended auction: minting to winners, paying back the excess
//! over the clearing price, error refunds and revenue withdrawal.
//!
//! Every operation only updates the auction and its bid records and returns
//! what is owed. The
//! contract executes the returned orders after storing the auction.
use crate::{
    auction::Auction,
    bid_book::{Bid, BidMark, BidStore, SlotOrder},
};
use commons::{BidId, CustomContractError};
use concordium_std::*;

/// Token owed to a winning bid, plus the excess paid back alongside it.
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MintOrder {
    pub bid_id: BidId,
    pub recipient: AccountAddress,
    pub settlement: Amount,
}

/// CCD owed to a bidder.
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payout {
    pub bid_id: BidId,
    pub recipient: AccountAddress,
    pub amount: Amount,
}

impl Auction {
    /// Part of the bid's value above the clearing price.
    pub fn settlement_excess(&self, bid: &Bid) -> Result<Amount, CustomContractError> {
        let paid = self.bid_value(bid.slot_index)?;
        let clearing_price = self.clearing_price()?;
        Ok(Amount::from_micro_ccd(
            paid.micro_ccd.saturating_sub(clearing_price.micro_ccd),
        ))
    }

    /// Mints to the `num_tokens` lowest pending bids, oldest first within a
    /// slot. Resolved bids are skipped.
    pub fn auto_mint<S: HasStateApi>(
        &mut self,
        bids: &mut BidStore<S>,
        num_tokens: u32,
    ) -> Result<Vec<MintOrder>, CustomContractError> {
        ensure!(
            num_tokens <= self.num_pending_bids(),
            CustomContractError::TooManyTokensToMint
        );
        let bid_ids = self.pending_bids(bids, SlotOrder::OldestFirst, num_tokens);
        bid_ids.into_iter().map(|bid_id| self.mint(bids, bid_id)).collect()
    }

    /// Mints to the listed bids. Fails on evicted or resolved bids and, when
    /// `bidder` is given, on bids of other accounts.
    pub fn direct_mint<S: HasStateApi>(
        &mut self,
        bids: &mut BidStore<S>,
        bid_ids: &[BidId],
        bidder: Option<&AccountAddress>,
    ) -> Result<Vec<MintOrder>, CustomContractError> {
        bid_ids
            .iter()
            .map(|&bid_id| {
                self.ensure_unresolved(bids, bid_id, bidder)?;
                self.mint(bids, bid_id)
            })
            .collect()
    }

    /// Settles the excess of the listed bids of `bidder`. Bids already settled
    /// or refunded are skipped; zero excess settles without a payout.
    pub fn collect_settlements<S: HasStateApi>(
        &mut self,
        bids: &mut BidStore<S>,
        bid_ids: &[BidId],
        bidder: &AccountAddress,
    ) -> Result<Vec<Payout>, CustomContractError> {
        let mut payouts = Vec::new();
        for &bid_id in bid_ids {
            let bid = self.live_bid(bids, bid_id, Some(bidder))?;
            if bid.is_settled || bid.is_refunded {
                continue;
            }
            let amount = self.settle(bids, &bid)?;
            if amount > Amount::zero() {
                payouts.push(Payout {
                    bid_id,
                    recipient: *bidder,
                    amount,
                });
            }
        }
        Ok(payouts)
    }

    /// Refunds the `num_bids` lowest pending bids, newest first within a slot.
    pub fn auto_refund<S: HasStateApi>(
        &mut self,
        bids: &mut BidStore<S>,
        num_bids: u32,
        deficit: u32,
    ) -> Result<Vec<Payout>, CustomContractError> {
        self.ensure_refundable(num_bids as usize, deficit)?;
        let bid_ids = self.pending_bids(bids, SlotOrder::NewestFirst, num_bids);
        bid_ids.into_iter().map(|bid_id| self.refund(bids, bid_id)).collect()
    }

    /// Refunds the listed bids. Fails on evicted or resolved bids and, when
    /// `bidder` is given, on bids of other accounts.
    pub fn direct_refund<S: HasStateApi>(
        &mut self,
        bids: &mut BidStore<S>,
        bid_ids: &[BidId],
        bidder: Option<&AccountAddress>,
        deficit: u32,
    ) -> Result<Vec<Payout>, CustomContractError> {
        self.ensure_refundable(bid_ids.len(), deficit)?;
        bid_ids
            .iter()
            .map(|&bid_id| {
                self.ensure_unresolved(bids, bid_id, bidder)?;
                self.refund(bids, bid_id)
            })
            .collect()
    }

    /// Withdraws the clearing price of every winning bid, once.
    pub fn collect_revenues(&mut self) -> Result<Amount, CustomContractError> {
        ensure!(
            !self.revenues_collected,
            CustomContractError::RevenuesAlreadyCollected
        );
        let winners = self
            .num_live_bids()
            .saturating_sub(self.num_bids_error_refunded);
        let revenue = if winners == 0 {
            Amount::zero()
        } else {
            let clearing_price = self.clearing_price()?;
            clearing_price
                .micro_ccd
                .checked_mul(u64::from(winners))
                .map(Amount::from_micro_ccd)
                .ok_or(CustomContractError::InsufficientProjectBalance)?
        };

        self.debit(revenue)?;
        self.revenues_collected = true;
        Ok(revenue)
    }

    fn pending_bids<S: HasStateApi>(
        &self,
        bids: &BidStore<S>,
        order: SlotOrder,
        limit: u32,
    ) -> Vec<BidId> {
        self.book
            .walk(bids, order)
            .filter(|bid| !bid.is_resolved())
            .take(limit as usize)
            .map(|bid| bid.id)
            .collect()
    }

    fn live_bid<S: HasStateApi>(
        &self,
        bids: &BidStore<S>,
        bid_id: BidId,
        bidder: Option<&AccountAddress>,
    ) -> Result<Bid, CustomContractError> {
        let bid = self.book.get(bids, bid_id)?;
        ensure!(self.book.is_live(bids, bid_id), CustomContractError::InvalidBidId);
        if let Some(bidder) = bidder {
            ensure!(bid.bidder == *bidder, CustomContractError::OnlyBidder);
        }
        Ok(bid)
    }

    fn ensure_unresolved<S: HasStateApi>(
        &self,
        bids: &BidStore<S>,
        bid_id: BidId,
        bidder: Option<&AccountAddress>,
    ) -> Result<(), CustomContractError> {
        let bid = self.live_bid(bids, bid_id, bidder)?;
        ensure!(!bid.is_resolved(), CustomContractError::BidAlreadyResolved);
        Ok(())
    }

    fn ensure_refundable(&self, num_bids: usize, deficit: u32) -> Result<(), CustomContractError> {
        ensure!(
            !self.revenues_collected,
            CustomContractError::RevenuesAlreadyCollected
        );
        ensure!(
            num_bids <= deficit as usize,
            CustomContractError::TooManyBidsToRefund
        );
        Ok(())
    }

    fn settle<S: HasStateApi>(
        &mut self,
        bids: &mut BidStore<S>,
        bid: &Bid,
    ) -> Result<Amount, CustomContractError> {
        let amount = self.settlement_excess(bid)?;
        self.debit(amount)?;
        self.book.mark(bids, bid.id, BidMark::Settled)?;
        Ok(amount)
    }

    fn mint<S: HasStateApi>(
        &mut self,
        bids: &mut BidStore<S>,
        bid_id: BidId,
    ) -> Result<MintOrder, CustomContractError> {
        let bid = self.book.get(bids, bid_id)?;
        let settlement = if bid.is_settled {
            Amount::zero()
        } else {
            self.settle(bids, &bid)?
        };
        self.book.mark(bids, bid_id, BidMark::Minted)?;
        self.num_bids_minted_tokens += 1;

        Ok(MintOrder {
            bid_id,
            recipient: bid.bidder,
            settlement,
        })
    }

    /// Returns the full paid value. A bid whose excess was already settled
    /// gets the clearing price, the part still held.
    fn refund<S: HasStateApi>(
        &mut self,
        bids: &mut BidStore<S>,
        bid_id: BidId,
    ) -> Result<Payout, CustomContractError> {
        let bid = self.book.get(bids, bid_id)?;
        let paid = self.bid_value(bid.slot_index)?;
        let amount = if bid.is_settled {
            Amount::from_micro_ccd(paid.micro_ccd - self.settlement_excess(&bid)?.micro_ccd)
        } else {
            paid
        };

        self.debit(amount)?;
        self.book.mark(bids, bid_id, BidMark::Settled)?;
        self.book.mark(bids, bid_id, BidMark::Refunded)?;
        self.num_bids_error_refunded += 1;

        Ok(Payout {
            bid_id,
            recipient: bid.bidder,
            amount,
        })
    }
}

#[concordium_cfg_test]
mod tests {
    use super::*;
    use crate::external::SetAuctionDetailsParams;
    use commons::ProjectKey;
    use concordium_std::test_infrastructure::*;

    const START: u64 = 10_000_000;
    const END: u64 = START + 60 * 60 * 1000;
    const ALICE: AccountAddress = AccountAddress([1; 32]);
    const BOB: AccountAddress = AccountAddress([2; 32]);

    fn at(millis: u64) -> Timestamp {
        Timestamp::from_timestamp_millis(millis)
    }

    /// Ended auction with one bid per `(bidder, slot)` pair.
    fn ended_auction(
        num_tokens: u64,
        bids: &[(AccountAddress, u16)],
    ) -> (Auction, BidStore<TestStateApi>) {
        let params = SetAuctionDetailsParams {
            project: ProjectKey {
                core: ContractAddress {
                    index: 1,
                    subindex: 0,
                },
                project_id: 0,
            },
            timestamp_start: at(START),
            timestamp_end: at(END),
            base_price: Amount::from_ccd(1),
            allow_extra_time: false,
            admin_artist_only_mint_period_if_sellout: false,
        };
        let mut auction =
            Auction::new(&params, at(0), num_tokens).expect_report("Auction should be valid");
        let mut store = BidStore::new(&mut TestStateBuilder::new());
        for (bidder, slot) in bids {
            let value = auction.bid_value(*slot).expect_report("Slot should exist");
            let _ = auction
                .create_bid(&mut store, at(START), *bidder, *slot, value)
                .expect_report("Bid should be accepted");
        }
        (auction, store)
    }

    fn value(auction: &Auction, slot: u16) -> Amount {
        auction.bid_value(slot).expect_report("Slot should exist")
    }

    #[concordium_test]
    fn test_clearing_price() {
        let (auction, _) = ended_auction(3, &[(ALICE, 4), (BOB, 8)]);
        claim_eq!(auction.clearing_price(), Ok(Amount::from_ccd(1)));

        let (auction, _) = ended_auction(2, &[(ALICE, 4), (BOB, 8)]);
        claim_eq!(auction.clearing_price(), Ok(value(&auction, 4)));
    }

    #[concordium_test]
    fn test_collect_settlements_is_idempotent() {
        let (mut auction, mut bids) = ended_auction(2, &[(ALICE, 0), (BOB, 8)]);
        let balance = auction.project_balance;
        let excess = value(&auction, 8) - Amount::from_ccd(1);

        claim_eq!(
            auction.collect_settlements(&mut bids, &[2], &ALICE),
            Err(CustomContractError::OnlyBidder)
        );
        claim_eq!(
            auction.collect_settlements(&mut bids, &[9], &BOB),
            Err(CustomContractError::InvalidBidId)
        );

        let payouts = auction.collect_settlements(&mut bids, &[2], &BOB);
        claim_eq!(
            payouts,
            Ok(vec![Payout {
                bid_id: 2,
                recipient: BOB,
                amount: excess,
            }])
        );
        claim_eq!(auction.project_balance, balance - excess);

        claim_eq!(auction.collect_settlements(&mut bids, &[2, 2], &BOB), Ok(Vec::new()));
        claim_eq!(auction.project_balance, balance - excess);

        // Bid at the clearing price settles without a payout.
        claim_eq!(auction.collect_settlements(&mut bids, &[1], &ALICE), Ok(Vec::new()));
        claim!(auction.book.get(&bids, 1).map_or(false, |bid| bid.is_settled));
    }

    #[concordium_test]
    fn test_auto_mint_walks_ladder_upward() {
        let (mut auction, mut bids) = ended_auction(
            5,
            &[(ALICE, 3), (BOB, 1), (ALICE, 1), (BOB, 9)],
        );

        claim_eq!(
            auction.auto_mint(&mut bids, 5).map(|orders| orders.len()),
            Err(CustomContractError::TooManyTokensToMint)
        );

        let orders = auction.auto_mint(&mut bids, 3).expect_report("Mint should succeed");
        let minted: Vec<BidId> = orders.iter().map(|order| order.bid_id).collect();
        claim_eq!(minted, vec![2, 3, 1]);
        claim_eq!(orders[0].settlement, value(&auction, 1) - Amount::from_ccd(1));
        claim_eq!(auction.num_bids_minted_tokens, 3);
        claim_eq!(auction.num_pending_bids(), 1);

        let orders = auction.auto_mint(&mut bids, 1).expect_report("Mint should succeed");
        claim_eq!(orders[0].bid_id, 4);
        claim_eq!(auction.num_pending_bids(), 0);
        claim_eq!(auction.state(at(END)), crate::auction::AuctionState::PostAuctionAllBidsHandled);
    }

    #[concordium_test]
    fn test_direct_mint_checks_each_bid() {
        let (mut auction, mut bids) = ended_auction(3, &[(ALICE, 0), (BOB, 2)]);

        claim_eq!(
            auction.direct_mint(&mut bids, &[2], Some(&ALICE)),
            Err(CustomContractError::OnlyBidder)
        );
        claim_eq!(
            auction.direct_mint(&mut bids, &[0], None),
            Err(CustomContractError::InvalidBidId)
        );

        let orders = auction.direct_mint(&mut bids, &[2], Some(&BOB)).expect_report("Mint should succeed");
        claim_eq!(
            orders,
            vec![MintOrder {
                bid_id: 2,
                recipient: BOB,
                settlement: value(&auction, 2) - Amount::from_ccd(1),
            }]
        );
        claim_eq!(
            auction.direct_mint(&mut bids, &[2], None),
            Err(CustomContractError::BidAlreadyResolved)
        );
    }

    #[concordium_test]
    fn test_settled_bid_mints_without_second_payout() {
        let (mut auction, mut bids) = ended_auction(3, &[(ALICE, 0), (BOB, 2)]);
        let _ = auction
            .collect_settlements(&mut bids, &[2], &BOB)
            .expect_report("Settlement should succeed");

        let orders = auction.direct_mint(&mut bids, &[2], None).expect_report("Mint should succeed");
        claim_eq!(orders[0].settlement, Amount::zero());
    }

    #[concordium_test]
    fn test_refunds_return_full_paid_value() {
        let (mut auction, mut bids) = ended_auction(4, &[(ALICE, 0), (BOB, 0), (ALICE, 6), (BOB, 3)]);
        let balance = auction.project_balance;

        claim_eq!(
            auction.auto_refund(&mut bids, 2, 1).map(|payouts| payouts.len()),
            Err(CustomContractError::TooManyBidsToRefund)
        );

        // Newest bid of the lowest slot goes first.
        let payouts = auction.auto_refund(&mut bids, 1, 2).expect_report("Refund should succeed");
        claim_eq!(
            payouts,
            vec![Payout {
                bid_id: 2,
                recipient: BOB,
                amount: Amount::from_ccd(1),
            }]
        );

        // Settled excess plus the refund add up to the paid value.
        let settled = auction
            .collect_settlements(&mut bids, &[3], &ALICE)
            .expect_report("Settlement should succeed");
        let payouts = auction
            .direct_refund(&mut bids, &[3], Some(&ALICE), 1)
            .expect_report("Refund should succeed");
        claim_eq!(settled[0].amount + payouts[0].amount, value(&auction, 6));
        claim_eq!(auction.num_bids_error_refunded, 2);
        claim_eq!(
            auction.project_balance,
            balance - Amount::from_ccd(1) - value(&auction, 6)
        );

        claim_eq!(
            auction.direct_refund(&mut bids, &[3], None, 1),
            Err(CustomContractError::BidAlreadyResolved)
        );
        claim_eq!(
            auction.direct_mint(&mut bids, &[2], None),
            Err(CustomContractError::BidAlreadyResolved)
        );
    }

    #[concordium_test]
    fn test_revenues_collected_once() {
        let (mut auction, mut bids) = ended_auction(2, &[(ALICE, 4), (BOB, 8), (ALICE, 10)]);
        let clearing_price = auction.clearing_price().expect_report("Auction is sold out");
        claim_eq!(clearing_price, value(&auction, 8));

        claim_eq!(auction.collect_revenues(), Ok(clearing_price + clearing_price));
        claim_eq!(
            auction.collect_revenues(),
            Err(CustomContractError::RevenuesAlreadyCollected)
        );
        claim_eq!(
            auction.auto_refund(&mut bids, 1, 1).map(|payouts| payouts.len()),
            Err(CustomContractError::RevenuesAlreadyCollected)
        );

        let orders = auction.auto_mint(&mut bids, 2).expect_report("Mint should succeed");
        let excess: u64 = orders.iter().map(|order| order.settlement.micro_ccd).sum();
        claim_eq!(
            Amount::from_micro_ccd(excess),
            value(&auction, 10) - clearing_price
        );
        claim_eq!(auction.project_balance, Amount::zero());
    }
}
