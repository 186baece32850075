//! Bid records of every auction, linked into per-slot lists.
//!
//! Records and slot lists live in flat [`StateMap`]s of the [`BidStore`], so a
//! bid operation only touches the entries it relinks. Each auction carries a
//! small [`BidBook`] with its counters and the [`SlotBitmap`] of non-empty
//! slots. Every slot keeps a doubly linked list of its live bids, newest at
//! the head and oldest at the tail. Bids are never deleted: an evicted bid
//! keeps its record but is unlinked from every list.
use crate::{bitmap::SlotBitmap, price::NUM_SLOTS};
use commons::{BidId, CustomContractError, ProjectKey};
use concordium_std::*;

/// Link value meaning "no bid".
pub const NO_BID: BidId = 0;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, SchemaType)]
pub struct Bid {
    pub id: BidId,
    pub bidder: AccountAddress,
    pub slot_index: u16,
    pub is_minted: bool,
    pub is_settled: bool,
    pub is_refunded: bool,
}

impl Bid {
    /// Minted or refunded; nothing is owed on it anymore except a pending
    /// settlement of a minted bid.
    pub fn is_resolved(&self) -> bool {
        self.is_minted || self.is_refunded
    }
}

/// Status change applied to a bid during settlement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BidMark {
    Minted,
    Settled,
    Refunded,
}

/// Order of bids inside a slot during a ladder walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotOrder {
    OldestFirst,
    NewestFirst,
}

/// Bid record with its links inside the slot list.
#[derive(Debug, Clone, Serialize)]
pub struct Entry {
    bid: Bid,
    /// Neighbour towards the head, the next newer bid.
    newer: BidId,
    /// Neighbour towards the tail, the next older bid.
    older: BidId,
    linked: bool,
}

/// Newest and oldest live bid of a slot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SlotList {
    head: BidId,
    tail: BidId,
}

/// Contract-wide storage of bid records and slot lists, keyed by project.
#[derive(Serial, DeserialWithState)]
#[concordium(state_parameter = "S")]
pub struct BidStore<S: HasStateApi> {
    entries: StateMap<(ProjectKey, BidId), Entry, S>,
    slots: StateMap<(ProjectKey, u16), SlotList, S>,
}

impl<S: HasStateApi> BidStore<S> {
    pub fn new(state_builder: &mut StateBuilder<S>) -> Self {
        Self {
            entries: state_builder.new_map(),
            slots: state_builder.new_map(),
        }
    }

    fn entry(&self, project: ProjectKey, bid_id: BidId) -> Result<Entry, CustomContractError> {
        self.entries
            .get(&(project, bid_id))
            .map(|entry| entry.clone())
            .ok_or(CustomContractError::InvalidBidId)
    }

    fn put_entry(&mut self, project: ProjectKey, entry: Entry) {
        let _ = self.entries.insert((project, entry.bid.id), entry);
    }

    fn slot(&self, project: ProjectKey, slot_index: u16) -> SlotList {
        self.slots
            .get(&(project, slot_index))
            .map(|list| *list)
            .unwrap_or_default()
    }

    fn put_slot(&mut self, project: ProjectKey, slot_index: u16, list: SlotList) {
        if list.head == NO_BID {
            self.slots.remove(&(project, slot_index));
        } else {
            let _ = self.slots.insert((project, slot_index), list);
        }
    }

    fn update_entry<F: FnOnce(&mut Entry)>(
        &mut self,
        project: ProjectKey,
        bid_id: BidId,
        f: F,
    ) -> Result<(), CustomContractError> {
        let mut entry = self.entry(project, bid_id)?;
        f(&mut entry);
        self.put_entry(project, entry);
        Ok(())
    }
}

/// Per-auction view of the [`BidStore`].
#[derive(Debug, Clone, Serialize)]
pub struct BidBook {
    project: ProjectKey,
    bitmap: SlotBitmap,
    num_bids: u32,
    live: u32,
}

impl BidBook {
    pub fn new(project: ProjectKey) -> Self {
        Self {
            project,
            bitmap: SlotBitmap::new(),
            num_bids: 0,
            live: 0,
        }
    }

    /// Bids ever created, the last assigned id.
    pub fn num_bids(&self) -> u32 {
        self.num_bids
    }

    /// Bids currently linked into a slot.
    pub fn live_count(&self) -> u32 {
        self.live
    }

    pub fn get<S: HasStateApi>(
        &self,
        store: &BidStore<S>,
        bid_id: BidId,
    ) -> Result<Bid, CustomContractError> {
        store.entry(self.project, bid_id).map(|entry| entry.bid)
    }

    /// Whether the bid exists and has not been evicted.
    pub fn is_live<S: HasStateApi>(&self, store: &BidStore<S>, bid_id: BidId) -> bool {
        store
            .entry(self.project, bid_id)
            .map_or(false, |entry| entry.linked)
    }

    pub fn min_slot(&self) -> Result<u16, CustomContractError> {
        self.bitmap.min().ok_or(CustomContractError::NoBidsInAuction)
    }

    pub fn next_populated_slot(&self, slot: u16) -> Option<u16> {
        self.bitmap.next_at_or_after(slot)
    }

    /// Adds a bid as the newest of `slot_index` and returns its id.
    pub fn insert<S: HasStateApi>(
        &mut self,
        store: &mut BidStore<S>,
        slot_index: u16,
        bidder: AccountAddress,
    ) -> Result<BidId, CustomContractError> {
        ensure!(slot_index < NUM_SLOTS, CustomContractError::SlotOutOfRange);
        let bid_id = self
            .num_bids
            .checked_add(1)
            .ok_or(CustomContractError::InvalidBidId)?;

        let entry = Entry {
            bid: Bid {
                id: bid_id,
                bidder,
                slot_index,
                is_minted: false,
                is_settled: false,
                is_refunded: false,
            },
            newer: NO_BID,
            older: NO_BID,
            linked: false,
        };
        self.num_bids = bid_id;
        self.link(store, entry)?;
        Ok(bid_id)
    }

    /// Moves a live bid of `bidder` to a higher slot, keeping its id.
    /// Returns the slot it left.
    pub fn top_up<S: HasStateApi>(
        &mut self,
        store: &mut BidStore<S>,
        bid_id: BidId,
        bidder: &AccountAddress,
        new_slot_index: u16,
    ) -> Result<u16, CustomContractError> {
        ensure!(new_slot_index < NUM_SLOTS, CustomContractError::SlotOutOfRange);
        let entry = store.entry(self.project, bid_id)?;
        ensure!(entry.linked, CustomContractError::InvalidBidId);
        ensure!(entry.bid.bidder == *bidder, CustomContractError::OnlyBidder);
        let old_slot_index = entry.bid.slot_index;
        ensure!(
            new_slot_index > old_slot_index,
            CustomContractError::InsufficientBidValue
        );

        let mut entry = self.unlink(store, entry)?;
        entry.bid.slot_index = new_slot_index;
        self.link(store, entry)?;
        Ok(old_slot_index)
    }

    /// Unlinks a live bid and returns its record.
    pub fn remove<S: HasStateApi>(
        &mut self,
        store: &mut BidStore<S>,
        bid_id: BidId,
    ) -> Result<Bid, CustomContractError> {
        let entry = store.entry(self.project, bid_id)?;
        ensure!(entry.linked, CustomContractError::InvalidBidId);
        self.unlink(store, entry).map(|entry| entry.bid)
    }

    /// Unlinks the oldest bid of the lowest populated slot.
    pub fn evict_oldest_at_min_slot<S: HasStateApi>(
        &mut self,
        store: &mut BidStore<S>,
    ) -> Result<Bid, CustomContractError> {
        let slot = self.min_slot()?;
        let bid_id = store.slot(self.project, slot).tail;
        self.remove(store, bid_id)
    }

    pub fn mark<S: HasStateApi>(
        &self,
        store: &mut BidStore<S>,
        bid_id: BidId,
        mark: BidMark,
    ) -> Result<Bid, CustomContractError> {
        let mut entry = store.entry(self.project, bid_id)?;
        match mark {
            BidMark::Minted => entry.bid.is_minted = true,
            BidMark::Settled => entry.bid.is_settled = true,
            BidMark::Refunded => entry.bid.is_refunded = true,
        }
        let bid = entry.bid.clone();
        store.put_entry(self.project, entry);
        Ok(bid)
    }

    /// Live bids slot by slot from the lowest populated slot upward.
    pub fn walk<'a, S: HasStateApi>(
        &'a self,
        store: &'a BidStore<S>,
        order: SlotOrder,
    ) -> LadderWalk<'a, S> {
        LadderWalk {
            book: self,
            store,
            order,
            next_slot: self.bitmap.min(),
            cursor: NO_BID,
        }
    }

    fn link<S: HasStateApi>(
        &mut self,
        store: &mut BidStore<S>,
        mut entry: Entry,
    ) -> Result<(), CustomContractError> {
        let bid_id = entry.bid.id;
        let slot = entry.bid.slot_index;
        let mut list = store.slot(self.project, slot);

        entry.newer = NO_BID;
        entry.older = list.head;
        entry.linked = true;

        if list.head == NO_BID {
            list.tail = bid_id;
            self.bitmap.set(slot);
        } else {
            store.update_entry(self.project, list.head, |head| head.newer = bid_id)?;
        }
        list.head = bid_id;

        store.put_entry(self.project, entry);
        store.put_slot(self.project, slot, list);
        self.live += 1;
        Ok(())
    }

    /// Stores the entry unlinked and returns it.
    fn unlink<S: HasStateApi>(
        &mut self,
        store: &mut BidStore<S>,
        mut entry: Entry,
    ) -> Result<Entry, CustomContractError> {
        let slot = entry.bid.slot_index;
        let mut list = store.slot(self.project, slot);

        if entry.newer == NO_BID {
            list.head = entry.older;
        } else {
            let older = entry.older;
            store.update_entry(self.project, entry.newer, |newer| newer.older = older)?;
        }
        if entry.older == NO_BID {
            list.tail = entry.newer;
        } else {
            let newer = entry.newer;
            store.update_entry(self.project, entry.older, |older| older.newer = newer)?;
        }

        entry.newer = NO_BID;
        entry.older = NO_BID;
        entry.linked = false;
        store.put_entry(self.project, entry.clone());
        store.put_slot(self.project, slot, list);

        if list.head == NO_BID {
            self.bitmap.clear(slot);
        }
        self.live -= 1;
        Ok(entry)
    }
}

/// Iterator returned by [`BidBook::walk`].
pub struct LadderWalk<'a, S: HasStateApi> {
    book: &'a BidBook,
    store: &'a BidStore<S>,
    order: SlotOrder,
    next_slot: Option<u16>,
    cursor: BidId,
}

impl<'a, S: HasStateApi> Iterator for LadderWalk<'a, S> {
    type Item = Bid;

    fn next(&mut self) -> Option<Self::Item> {
        let project = self.book.project;
        if self.cursor == NO_BID {
            let slot = self.next_slot?;
            let list = self.store.slot(project, slot);
            self.cursor = match self.order {
                SlotOrder::OldestFirst => list.tail,
                SlotOrder::NewestFirst => list.head,
            };
            self.next_slot = self.book.next_populated_slot(slot + 1);
        }

        let entry = self.store.entry(project, self.cursor).ok()?;
        self.cursor = match self.order {
            SlotOrder::OldestFirst => entry.newer,
            SlotOrder::NewestFirst => entry.older,
        };
        Some(entry.bid)
    }
}

#[concordium_cfg_test]
mod tests {
    use super::*;
    use concordium_std::test_infrastructure::*;

    const ALICE: AccountAddress = AccountAddress([1; 32]);
    const BOB: AccountAddress = AccountAddress([2; 32]);

    type TestStore = BidStore<TestStateApi>;

    fn project(project_id: u32) -> ProjectKey {
        ProjectKey {
            core: ContractAddress {
                index: 1,
                subindex: 0,
            },
            project_id,
        }
    }

    fn setup() -> (BidBook, TestStore) {
        let mut state_builder = TestStateBuilder::new();
        (BidBook::new(project(0)), BidStore::new(&mut state_builder))
    }

    fn ids(book: &BidBook, store: &TestStore, order: SlotOrder) -> Vec<BidId> {
        book.walk(store, order).map(|bid| bid.id).collect()
    }

    #[concordium_test]
    fn test_insert_assigns_sequential_ids() {
        let (mut book, mut store) = setup();
        claim_eq!(book.min_slot(), Err(CustomContractError::NoBidsInAuction));

        claim_eq!(book.insert(&mut store, 10, ALICE), Ok(1));
        claim_eq!(book.insert(&mut store, 3, BOB), Ok(2));
        claim_eq!(
            book.insert(&mut store, NUM_SLOTS, BOB),
            Err(CustomContractError::SlotOutOfRange)
        );

        claim_eq!(book.num_bids(), 2);
        claim_eq!(book.live_count(), 2);
        claim_eq!(book.min_slot(), Ok(3));
        claim_eq!(book.get(&store, 1).map(|bid| bid.slot_index), Ok(10));
        claim_eq!(book.get(&store, 0), Err(CustomContractError::InvalidBidId));
        claim_eq!(book.get(&store, 3), Err(CustomContractError::InvalidBidId));
    }

    #[concordium_test]
    fn test_projects_share_the_store() {
        let (mut book, mut store) = setup();
        let mut other = BidBook::new(project(1));

        claim_eq!(book.insert(&mut store, 0, ALICE), Ok(1));
        claim_eq!(other.insert(&mut store, 5, BOB), Ok(1));
        claim_eq!(other.insert(&mut store, 0, BOB), Ok(2));

        claim_eq!(book.get(&store, 1).map(|bid| bid.bidder), Ok(ALICE));
        claim_eq!(book.get(&store, 2), Err(CustomContractError::InvalidBidId));
        claim_eq!(other.get(&store, 1).map(|bid| bid.bidder), Ok(BOB));
        claim_eq!(ids(&book, &store, SlotOrder::OldestFirst), vec![1]);
        claim_eq!(ids(&other, &store, SlotOrder::OldestFirst), vec![2, 1]);

        let evicted = other
            .evict_oldest_at_min_slot(&mut store)
            .expect_report("Eviction should succeed");
        claim_eq!(evicted.id, 2);
        claim!(book.is_live(&store, 1));
    }

    #[concordium_test]
    fn test_evicts_oldest_bid_of_lowest_slot() {
        let (mut book, mut store) = setup();
        book.insert(&mut store, 0, ALICE).expect_report("Insert should succeed");
        book.insert(&mut store, 0, BOB).expect_report("Insert should succeed");
        book.insert(&mut store, 1, ALICE).expect_report("Insert should succeed");

        let evicted = book
            .evict_oldest_at_min_slot(&mut store)
            .expect_report("Eviction should succeed");
        claim_eq!(evicted.id, 1);
        claim!(!book.is_live(&store, 1));
        claim_eq!(book.min_slot(), Ok(0));

        let evicted = book
            .evict_oldest_at_min_slot(&mut store)
            .expect_report("Eviction should succeed");
        claim_eq!(evicted.id, 2);
        claim_eq!(book.min_slot(), Ok(1));
        claim_eq!(book.live_count(), 1);
        claim_eq!(book.num_bids(), 3);
    }

    #[concordium_test]
    fn test_top_up_keeps_id_and_moves_slot() {
        let (mut book, mut store) = setup();
        book.insert(&mut store, 4, ALICE).expect_report("Insert should succeed");
        book.insert(&mut store, 4, BOB).expect_report("Insert should succeed");

        claim_eq!(
            book.top_up(&mut store, 1, &BOB, 9),
            Err(CustomContractError::OnlyBidder)
        );
        claim_eq!(
            book.top_up(&mut store, 1, &ALICE, 4),
            Err(CustomContractError::InsufficientBidValue)
        );
        claim_eq!(book.top_up(&mut store, 1, &ALICE, 9), Ok(4));

        claim_eq!(book.get(&store, 1).map(|bid| bid.slot_index), Ok(9));
        claim_eq!(book.min_slot(), Ok(4));
        claim_eq!(book.live_count(), 2);

        claim_eq!(book.top_up(&mut store, 2, &BOB, 9), Ok(4));
        claim_eq!(book.min_slot(), Ok(9));
        // Bid 2 became the newest bid of slot 9.
        claim_eq!(ids(&book, &store, SlotOrder::NewestFirst), vec![2, 1]);
    }

    #[concordium_test]
    fn test_evicted_bid_is_frozen() {
        let (mut book, mut store) = setup();
        book.insert(&mut store, 0, ALICE).expect_report("Insert should succeed");
        book.evict_oldest_at_min_slot(&mut store)
            .expect_report("Eviction should succeed");

        claim_eq!(
            book.top_up(&mut store, 1, &ALICE, 5),
            Err(CustomContractError::InvalidBidId)
        );
        claim_eq!(book.remove(&mut store, 1), Err(CustomContractError::InvalidBidId));
        claim_eq!(
            book.evict_oldest_at_min_slot(&mut store),
            Err(CustomContractError::NoBidsInAuction)
        );
        claim_eq!(book.get(&store, 1).map(|bid| bid.bidder), Ok(ALICE));
    }

    #[concordium_test]
    fn test_remove_from_middle_of_slot() {
        let (mut book, mut store) = setup();
        for _ in 0..3 {
            book.insert(&mut store, 7, ALICE).expect_report("Insert should succeed");
        }

        claim_eq!(book.remove(&mut store, 2).map(|bid| bid.id), Ok(2));
        claim_eq!(ids(&book, &store, SlotOrder::OldestFirst), vec![1, 3]);
        claim_eq!(ids(&book, &store, SlotOrder::NewestFirst), vec![3, 1]);

        book.remove(&mut store, 1).expect_report("Remove should succeed");
        book.remove(&mut store, 3).expect_report("Remove should succeed");
        claim_eq!(book.next_populated_slot(0), None);
        claim_eq!(store.slot(project(0), 7), SlotList::default());
    }

    #[concordium_test]
    fn test_walk_orders() {
        let (mut book, mut store) = setup();
        book.insert(&mut store, 5, ALICE).expect_report("Insert should succeed");
        book.insert(&mut store, 2, BOB).expect_report("Insert should succeed");
        book.insert(&mut store, 5, BOB).expect_report("Insert should succeed");
        book.insert(&mut store, 300, ALICE).expect_report("Insert should succeed");
        book.insert(&mut store, 2, ALICE).expect_report("Insert should succeed");

        claim_eq!(ids(&book, &store, SlotOrder::OldestFirst), vec![2, 5, 1, 3, 4]);
        claim_eq!(ids(&book, &store, SlotOrder::NewestFirst), vec![5, 2, 3, 1, 4]);
        claim_eq!(book.next_populated_slot(6), Some(300));
    }

    #[concordium_test]
    fn test_marks_are_recorded() {
        let (mut book, mut store) = setup();
        book.insert(&mut store, 0, ALICE).expect_report("Insert should succeed");

        claim!(!book.get(&store, 1).map_or(true, |bid| bid.is_resolved()));
        book.mark(&mut store, 1, BidMark::Settled)
            .expect_report("Mark should succeed");
        claim!(!book.get(&store, 1).map_or(true, |bid| bid.is_resolved()));
        let bid = book
            .mark(&mut store, 1, BidMark::Minted)
            .expect_report("Mark should succeed");
        claim!(bid.is_minted && bid.is_settled && !bid.is_refunded);
        claim_eq!(book.get(&store, 1), Ok(bid));
        claim_eq!(
            book.mark(&mut store, 2, BidMark::Refunded),
            Err(CustomContractError::InvalidBidId)
        );
    }
}
