use crate::{
    auction::{Auction, AuctionState},
    collaborators::{Delivery, MinterAuthority, PaymentSplitter, RevenueSplit, TokenMinter},
    events::*,
    external::*,
    guard::non_reentrant,
    price,
    settlement::{MintOrder, Payout},
    state::{ProjectConfig, State},
};
use commons::{AuthorityUpdateParams, AuthorityViewParams, CustomContractError, ProjectKey};
use concordium_std::*;
use core::convert::TryFrom;

/// Initialize the minter. The sender becomes its first admin.
#[init(contract = "RamMinter", parameter = "InitParams")]
fn init<S: HasStateApi>(
    ctx: &impl HasInitContext,
    state_builder: &mut StateBuilder<S>,
) -> InitResult<State<S>> {
    let params = InitParams::deserial(&mut ctx.parameter_cursor())?;
    ensure!(
        params.platform_share.is_valid_share(),
        CustomContractError::InvalidPercentage.into()
    );
    Ok(State::new(state_builder, ctx.init_origin(), params))
}

/// Configure the auction of a project.
///
/// It rejects if:
/// - Sender is not the project artist.
/// - The minter filter does not assign this minter to the project.
/// - An auction of the project already started.
/// - Timestamps, base price or the admin mint constraint are violated.
/// - The project has no tokens left to auction.
#[receive(
    mutable,
    contract = "RamMinter",
    name = "setAuctionDetails",
    parameter = "SetAuctionDetailsParams",
    enable_logger
)]
fn set_auction_details<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ReceiveResult<()> {
    let params = SetAuctionDetailsParams::deserial(&mut ctx.parameter_cursor())?;
    let project = params.project;

    non_reentrant(host, |host| {
        ensure_artist(ctx, host, &project)?;
        ensure_assigned_minter(ctx, host, &project)?;

        let now = ctx.metadata().slot_time();
        if let Ok(existing) = host.state().auction(&project) {
            ensure_eq!(
                existing.state(now),
                AuctionState::PreAuction,
                CustomContractError::AuctionAlreadyStarted.into()
            );
        }
        host.state()
            .project_config(&project)
            .admin_mint_constraint
            .check(params.admin_artist_only_mint_period_if_sellout)?;

        let num_tokens = available_supply(host, &project)?;
        let auction = Auction::new(&params, now, num_tokens)?;

        logger.log(&RamMinterEvent::AuctionConfigured(AuctionConfiguredEvent {
            project,
            timestamp_start: auction.timestamp_start,
            timestamp_end: auction.timestamp_end,
            base_price: auction.base_price,
            num_tokens_in_auction: auction.num_tokens_in_auction,
            allow_extra_time: auction.allow_extra_time,
            admin_artist_only_mint_period_if_sellout: auction.admin_artist_only_mint_period_if_sellout,
        }))?;
        host.state_mut().store_auction(project, auction);

        Ok(())
    })
}

/// Place a bid into a slot, paying exactly the slot value. On a sold out
/// auction the oldest bid of the lowest slot is evicted and refunded.
#[receive(
    mutable,
    payable,
    contract = "RamMinter",
    name = "createBid",
    parameter = "CreateBidParams",
    enable_logger
)]
fn create_bid<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    amount: Amount,
    logger: &mut impl HasLogger,
) -> ReceiveResult<()> {
    let params = CreateBidParams::deserial(&mut ctx.parameter_cursor())?;
    let bidder = sender_account(ctx)?;
    let project = params.project;

    non_reentrant(host, |host| {
        ensure_assigned_minter(ctx, host, &project)?;
        let mut auction = host.state().auction(&project)?;
        let receipt = auction.create_bid(
            &mut host.state_mut().bids,
            ctx.metadata().slot_time(),
            bidder,
            params.slot_index,
            amount,
        )?;
        host.state_mut().store_auction(project, auction);

        logger.log(&RamMinterEvent::BidCreated(BidCreatedEvent {
            project,
            bid_id: receipt.bid_id,
            bidder,
            slot_index: params.slot_index,
            value: amount,
        }))?;
        if let Some(timestamp_end) = receipt.timestamp_end_extended {
            logger.log(&RamMinterEvent::timestamp_end_updated(project, timestamp_end))?;
        }
        if let Some(evicted) = receipt.evicted {
            logger.log(&RamMinterEvent::BidRemoved(BidRemovedEvent {
                project,
                bid_id: evicted.bid_id,
                bidder: evicted.bidder,
                refund: evicted.value,
            }))?;
            deliver(host, logger, &evicted.bidder, evicted.value)?;
        }

        Ok(())
    })
}

/// Move an own live bid to a higher slot, paying the value difference.
#[receive(
    mutable,
    payable,
    contract = "RamMinter",
    name = "topUpBid",
    parameter = "TopUpBidParams",
    enable_logger
)]
fn top_up_bid<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    amount: Amount,
    logger: &mut impl HasLogger,
) -> ReceiveResult<()> {
    let params = TopUpBidParams::deserial(&mut ctx.parameter_cursor())?;
    let bidder = sender_account(ctx)?;
    let project = params.project;

    non_reentrant(host, |host| {
        ensure_assigned_minter(ctx, host, &project)?;
        let mut auction = host.state().auction(&project)?;
        let receipt = auction.top_up_bid(
            &mut host.state_mut().bids,
            ctx.metadata().slot_time(),
            &bidder,
            params.bid_id,
            params.new_slot_index,
            amount,
        )?;
        host.state_mut().store_auction(project, auction);

        logger.log(&RamMinterEvent::BidToppedUp(BidToppedUpEvent {
            project,
            bid_id: params.bid_id,
            old_slot_index: receipt.old_slot_index,
            new_slot_index: params.new_slot_index,
            added_value: amount,
        }))?;
        if let Some(timestamp_end) = receipt.timestamp_end_extended {
            logger.log(&RamMinterEvent::timestamp_end_updated(project, timestamp_end))?;
        }

        Ok(())
    })
}

/// Collect the excess over the clearing price of own bids after the auction.
#[receive(
    mutable,
    contract = "RamMinter",
    name = "collectSettlements",
    parameter = "BidIdsParams",
    enable_logger
)]
fn collect_settlements<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ReceiveResult<()> {
    let params = BidIdsParams::deserial(&mut ctx.parameter_cursor())?;
    let bidder = sender_account(ctx)?;
    let project = params.project;

    non_reentrant(host, |host| {
        let mut auction = host.state().auction(&project)?;
        auction.ensure_post_auction(ctx.metadata().slot_time())?;
        let payouts = auction.collect_settlements(&mut host.state_mut().bids, &params.bid_ids, &bidder)?;
        host.state_mut().store_auction(project, auction);

        let mut total = Amount::zero();
        for payout in payouts.iter() {
            logger.log(&RamMinterEvent::settled(
                project,
                payout.bid_id,
                payout.recipient,
                payout.amount,
            ))?;
            total += payout.amount;
        }
        deliver(host, logger, &bidder, total)
    })
}

/// Mint to the lowest pending winning bids.
#[receive(
    mutable,
    contract = "RamMinter",
    name = "adminArtistAutoMintTokensToWinners",
    parameter = "AutoMintParams",
    enable_logger
)]
fn admin_artist_auto_mint_tokens_to_winners<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ReceiveResult<()> {
    let params = AutoMintParams::deserial(&mut ctx.parameter_cursor())?;
    let project = params.project;

    non_reentrant(host, |host| {
        ensure_admin_or_artist(ctx, host, &project)?;
        let now = ctx.metadata().slot_time();
        let mut auction = host.state().auction(&project)?;
        auction.ensure_post_auction(now)?;
        ensure_no_error_e1(host, &project, &auction, now)?;
        let orders = auction.auto_mint(&mut host.state_mut().bids, params.num_tokens)?;
        host.state_mut().store_auction(project, auction);
        execute_mint_orders(host, logger, &project, orders)
    })
}

/// Mint to the listed winning bids.
#[receive(
    mutable,
    contract = "RamMinter",
    name = "adminArtistDirectMintTokensToWinners",
    parameter = "BidIdsParams",
    enable_logger
)]
fn admin_artist_direct_mint_tokens_to_winners<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ReceiveResult<()> {
    let params = BidIdsParams::deserial(&mut ctx.parameter_cursor())?;
    let project = params.project;

    non_reentrant(host, |host| {
        ensure_admin_or_artist(ctx, host, &project)?;
        let now = ctx.metadata().slot_time();
        let mut auction = host.state().auction(&project)?;
        auction.ensure_post_auction(now)?;
        ensure_no_error_e1(host, &project, &auction, now)?;
        let orders = auction.direct_mint(&mut host.state_mut().bids, &params.bid_ids, None)?;
        host.state_mut().store_auction(project, auction);
        execute_mint_orders(host, logger, &project, orders)
    })
}

/// Mint own winning bids once the admin/artist-only window is over.
#[receive(
    mutable,
    contract = "RamMinter",
    name = "winnerDirectMintTokens",
    parameter = "BidIdsParams",
    enable_logger
)]
fn winner_direct_mint_tokens<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ReceiveResult<()> {
    let params = BidIdsParams::deserial(&mut ctx.parameter_cursor())?;
    let bidder = sender_account(ctx)?;
    let project = params.project;

    non_reentrant(host, |host| {
        let now = ctx.metadata().slot_time();
        let mut auction = host.state().auction(&project)?;
        auction.ensure_open_mint(now)?;
        ensure_no_error_e1(host, &project, &auction, now)?;
        let orders = auction.direct_mint(&mut host.state_mut().bids, &params.bid_ids, Some(&bidder))?;
        host.state_mut().store_auction(project, auction);
        execute_mint_orders(host, logger, &project, orders)
    })
}

/// Refund the lowest pending bids while more bids are pending than tokens
/// can be minted.
#[receive(
    mutable,
    contract = "RamMinter",
    name = "adminAutoRefundWinners",
    parameter = "AutoRefundParams",
    enable_logger
)]
fn admin_auto_refund_winners<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ReceiveResult<()> {
    let params = AutoRefundParams::deserial(&mut ctx.parameter_cursor())?;
    let project = params.project;

    non_reentrant(host, |host| {
        ensure_admin_or_artist(ctx, host, &project)?;
        let now = ctx.metadata().slot_time();
        let mut auction = host.state().auction(&project)?;
        let deficit = ensure_error_e1(host, &project, &auction, now)?;
        let payouts = auction.auto_refund(&mut host.state_mut().bids, params.num_bids, deficit)?;
        host.state_mut().store_auction(project, auction);
        execute_refunds(host, logger, &project, payouts)
    })
}

/// Refund the listed bids while more bids are pending than tokens can be
/// minted.
#[receive(
    mutable,
    contract = "RamMinter",
    name = "adminArtistDirectRefundWinners",
    parameter = "BidIdsParams",
    enable_logger
)]
fn admin_artist_direct_refund_winners<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ReceiveResult<()> {
    let params = BidIdsParams::deserial(&mut ctx.parameter_cursor())?;
    let project = params.project;

    non_reentrant(host, |host| {
        ensure_admin_or_artist(ctx, host, &project)?;
        let now = ctx.metadata().slot_time();
        let mut auction = host.state().auction(&project)?;
        let deficit = ensure_error_e1(host, &project, &auction, now)?;
        let payouts = auction.direct_refund(&mut host.state_mut().bids, &params.bid_ids, None, deficit)?;
        host.state_mut().store_auction(project, auction);
        execute_refunds(host, logger, &project, payouts)
    })
}

/// Refund own bids while more bids are pending than tokens can be minted.
#[receive(
    mutable,
    contract = "RamMinter",
    name = "winnerDirectRefund",
    parameter = "BidIdsParams",
    enable_logger
)]
fn winner_direct_refund<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ReceiveResult<()> {
    let params = BidIdsParams::deserial(&mut ctx.parameter_cursor())?;
    let bidder = sender_account(ctx)?;
    let project = params.project;

    non_reentrant(host, |host| {
        let now = ctx.metadata().slot_time();
        let mut auction = host.state().auction(&project)?;
        auction.ensure_open_mint(now)?;
        let deficit = ensure_error_e1(host, &project, &auction, now)?;
        let payouts = auction.direct_refund(
            &mut host.state_mut().bids,
            &params.bid_ids,
            Some(&bidder),
            deficit,
        )?;
        host.state_mut().store_auction(project, auction);
        execute_refunds(host, logger, &project, payouts)
    })
}

/// Buy a token at the clearing price after the auction.
#[receive(
    mutable,
    payable,
    contract = "RamMinter",
    name = "purchase",
    parameter = "ProjectKey",
    enable_logger
)]
fn purchase<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    amount: Amount,
    logger: &mut impl HasLogger,
) -> ReceiveResult<()> {
    let project = ProjectKey::deserial(&mut ctx.parameter_cursor())?;
    let to = sender_account(ctx)?;
    purchase_for(ctx, host, amount, logger, project, to)
}

/// Buy a token at the clearing price for another account.
#[receive(
    mutable,
    payable,
    contract = "RamMinter",
    name = "purchaseTo",
    parameter = "PurchaseToParams",
    enable_logger
)]
fn purchase_to<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    amount: Amount,
    logger: &mut impl HasLogger,
) -> ReceiveResult<()> {
    let params = PurchaseToParams::deserial(&mut ctx.parameter_cursor())?;
    purchase_for(ctx, host, amount, logger, params.project, params.to)
}

/// Withdraw the clearing price of every winning bid to the artist and the
/// platform beneficiary.
#[receive(
    mutable,
    contract = "RamMinter",
    name = "withdrawArtistAndAdminRevenues",
    parameter = "ProjectKey",
    enable_logger
)]
fn withdraw_artist_and_admin_revenues<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ReceiveResult<()> {
    let project = ProjectKey::deserial(&mut ctx.parameter_cursor())?;

    non_reentrant(host, |host| {
        ensure_admin_or_artist(ctx, host, &project)?;
        let now = ctx.metadata().slot_time();
        let mut auction = host.state().auction(&project)?;
        auction.ensure_post_auction(now)?;
        ensure_no_error_e1(host, &project, &auction, now)?;
        let revenue = auction.collect_revenues()?;
        host.state_mut().store_auction(project, auction);

        let artist = host
            .project_artist(&project.core, project.project_id)
            .map_err(CustomContractError::from)?;
        let split = host.split_revenues(&artist, revenue);
        logger.log(&RamMinterEvent::RevenuesCollected(RevenuesCollectedEvent {
            project,
            artist_share: split.artist_share,
            platform_share: split.platform_share,
        }))?;
        log_split_deliveries(host, logger, &artist, &split)
    })
}

/// Transfer the sender's pending payout.
#[receive(
    mutable,
    contract = "RamMinter",
    name = "claimPendingPayout",
    enable_logger
)]
fn claim_pending_payout<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ReceiveResult<()> {
    let recipient = sender_account(ctx)?;

    non_reentrant(host, |host| {
        let amount = host.state_mut().take_pending_payout(&recipient)?;
        host.invoke_transfer(&recipient, amount)
            .map_err(CustomContractError::from)?;
        logger.log(&RamMinterEvent::PendingPayoutClaimed(PendingPayoutEvent {
            recipient,
            amount,
        }))?;
        Ok(())
    })
}

/// Set the admin mint constraint of a project. Admin only.
#[receive(
    mutable,
    contract = "RamMinter",
    name = "setContractConfig",
    parameter = "ContractConfigParams",
    enable_logger
)]
fn set_contract_config<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ReceiveResult<()> {
    let params = ContractConfigParams::deserial(&mut ctx.parameter_cursor())?;
    ensure_admin(ctx, host)?;

    host.state_mut()
        .update_project_config(params.project, |config| {
            config.admin_mint_constraint = params.admin_mint_constraint
        });
    logger.log(&RamMinterEvent::AdminMintConstraintUpdated(
        AdminMintConstraintUpdatedEvent {
            project: params.project,
            admin_mint_constraint: params.admin_mint_constraint,
        },
    ))?;

    Ok(())
}

/// Limit the project's max invocations below the core contract's value.
#[receive(
    mutable,
    contract = "RamMinter",
    name = "manuallyLimitProjectMaxInvocations",
    parameter = "MaxInvocationsParams",
    enable_logger
)]
fn manually_limit_project_max_invocations<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ReceiveResult<()> {
    let params = MaxInvocationsParams::deserial(&mut ctx.parameter_cursor())?;
    let project = params.project;

    non_reentrant(host, |host| {
        ensure_artist(ctx, host, &project)?;
        let supply = host
            .project_supply(&project.core, project.project_id)
            .map_err(CustomContractError::from)?;
        ensure!(
            params.max_invocations >= supply.invocations
                && params.max_invocations <= supply.max_invocations,
            CustomContractError::InvalidMaxInvocations.into()
        );

        update_max_invocations(ctx, host, &project, Some(params.max_invocations))?;
        logger.log(&RamMinterEvent::ProjectMaxInvocationsUpdated(
            ProjectMaxInvocationsUpdatedEvent {
                project,
                max_invocations: params.max_invocations,
                manually_limited: true,
            },
        ))?;

        Ok(())
    })
}

/// Drop the manual limit and follow the core contract's max invocations.
#[receive(
    mutable,
    contract = "RamMinter",
    name = "syncProjectMaxInvocationsToCore",
    parameter = "ProjectKey",
    enable_logger
)]
fn sync_project_max_invocations_to_core<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ReceiveResult<()> {
    let project = ProjectKey::deserial(&mut ctx.parameter_cursor())?;

    non_reentrant(host, |host| {
        ensure_artist(ctx, host, &project)?;
        let supply = host
            .project_supply(&project.core, project.project_id)
            .map_err(CustomContractError::from)?;
        update_max_invocations(ctx, host, &project, None)?;
        logger.log(&RamMinterEvent::ProjectMaxInvocationsUpdated(
            ProjectMaxInvocationsUpdatedEvent {
                project,
                max_invocations: supply.max_invocations,
                manually_limited: false,
            },
        ))?;

        Ok(())
    })
}

/// Extend a pending or live auction. Admin only.
#[receive(
    mutable,
    contract = "RamMinter",
    name = "adminAddEmergencyAuctionHours",
    parameter = "EmergencyHoursParams",
    enable_logger
)]
fn admin_add_emergency_auction_hours<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ReceiveResult<()> {
    let params = EmergencyHoursParams::deserial(&mut ctx.parameter_cursor())?;
    ensure_admin(ctx, host)?;

    let mut auction = host.state().auction(&params.project)?;
    let timestamp_end = auction.add_emergency_hours(ctx.metadata().slot_time(), params.hours)?;
    host.state_mut().store_auction(params.project, auction);
    logger.log(&RamMinterEvent::timestamp_end_updated(
        params.project,
        timestamp_end,
    ))?;

    Ok(())
}

/// Bring the end of a pending or live auction forward. Artist only.
#[receive(
    mutable,
    contract = "RamMinter",
    name = "reduceAuctionLength",
    parameter = "ReduceAuctionLengthParams",
    enable_logger
)]
fn reduce_auction_length<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ReceiveResult<()> {
    let params = ReduceAuctionLengthParams::deserial(&mut ctx.parameter_cursor())?;

    non_reentrant(host, |host| {
        ensure_artist(ctx, host, &params.project)?;
        let mut auction = host.state().auction(&params.project)?;
        auction.reduce_length(ctx.metadata().slot_time(), params.timestamp_end)?;
        host.state_mut().store_auction(params.project, auction);
        logger.log(&RamMinterEvent::timestamp_end_updated(
            params.project,
            params.timestamp_end,
        ))?;

        Ok(())
    })
}

#[receive(
    contract = "RamMinter",
    name = "getAuctionDetails",
    parameter = "ProjectKey",
    return_value = "AuctionDetailsView"
)]
fn get_auction_details<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ReceiveResult<AuctionDetailsView> {
    let project = ProjectKey::deserial(&mut ctx.parameter_cursor())?;
    let auction = host.state().auction(&project)?;

    Ok(AuctionDetailsView {
        state: auction.state(ctx.metadata().slot_time()),
        timestamp_start: auction.timestamp_start,
        timestamp_end: auction.timestamp_end,
        base_price: auction.base_price,
        num_tokens_in_auction: auction.num_tokens_in_auction,
        num_bids: auction.num_bids(),
        num_live_bids: auction.num_live_bids(),
        num_bids_minted_tokens: auction.num_bids_minted_tokens,
        num_bids_error_refunded: auction.num_bids_error_refunded,
        min_bid_slot_index: auction.min_bid_slot_index,
        allow_extra_time: auction.allow_extra_time,
        admin_artist_only_mint_period_if_sellout: auction.admin_artist_only_mint_period_if_sellout,
        revenues_collected: auction.revenues_collected,
    })
}

#[receive(
    contract = "RamMinter",
    name = "getAuctionState",
    parameter = "ProjectKey",
    return_value = "AuctionState"
)]
fn get_auction_state<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ReceiveResult<AuctionState> {
    let project = ProjectKey::deserial(&mut ctx.parameter_cursor())?;
    let auction = host.state().auction(&project)?;
    Ok(auction.state(ctx.metadata().slot_time()))
}

#[receive(
    contract = "RamMinter",
    name = "getBid",
    parameter = "BidViewParams",
    return_value = "BidView"
)]
fn get_bid<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ReceiveResult<BidView> {
    let params = BidViewParams::deserial(&mut ctx.parameter_cursor())?;
    let auction = host.state().auction(&params.project)?;
    let bids = &host.state().bids;
    let bid = auction.book.get(bids, params.bid_id)?;

    Ok(BidView {
        value: auction.bid_value(bid.slot_index)?,
        is_live: auction.book.is_live(bids, params.bid_id),
        bid,
    })
}

#[receive(
    contract = "RamMinter",
    name = "getMinimumNextBid",
    parameter = "ProjectKey",
    return_value = "MinimumNextBidView"
)]
fn get_minimum_next_bid<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ReceiveResult<MinimumNextBidView> {
    let project = ProjectKey::deserial(&mut ctx.parameter_cursor())?;
    let (slot_index, value) = host.state().auction(&project)?.minimum_next_bid()?;
    Ok(MinimumNextBidView { slot_index, value })
}

#[receive(
    contract = "RamMinter",
    name = "getLowestBidValue",
    parameter = "ProjectKey",
    return_value = "Amount"
)]
fn get_lowest_bid_value<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ReceiveResult<Amount> {
    let project = ProjectKey::deserial(&mut ctx.parameter_cursor())?;
    Ok(host.state().auction(&project)?.lowest_bid_value()?)
}

#[receive(
    contract = "RamMinter",
    name = "slotIndexToBidValue",
    parameter = "SlotValueParams",
    return_value = "Amount"
)]
fn slot_index_to_bid_value<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    _host: &impl HasHost<State<S>, StateApiType = S>,
) -> ReceiveResult<Amount> {
    let params = SlotValueParams::deserial(&mut ctx.parameter_cursor())?;
    Ok(price::slot_amount(params.base_price, params.slot_index)?)
}

#[receive(
    contract = "RamMinter",
    name = "getIsErrorE1",
    parameter = "ProjectKey",
    return_value = "ErrorE1View"
)]
fn get_is_error_e1<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ReceiveResult<ErrorE1View> {
    let project = ProjectKey::deserial(&mut ctx.parameter_cursor())?;
    let auction = host.state().auction(&project)?;
    let num_bids_to_refund =
        error_e1_deficit(host, &project, &auction, ctx.metadata().slot_time())?;

    Ok(ErrorE1View {
        is_error: num_bids_to_refund > 0,
        num_bids_to_refund,
    })
}

#[receive(
    contract = "RamMinter",
    name = "getProjectBalance",
    parameter = "ProjectKey",
    return_value = "Amount"
)]
fn get_project_balance<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ReceiveResult<Amount> {
    let project = ProjectKey::deserial(&mut ctx.parameter_cursor())?;
    Ok(host.state().auction(&project)?.project_balance)
}

#[receive(
    contract = "RamMinter",
    name = "getProjectConfig",
    parameter = "ProjectKey",
    return_value = "ProjectConfig"
)]
fn get_project_config<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ReceiveResult<ProjectConfig> {
    let project = ProjectKey::deserial(&mut ctx.parameter_cursor())?;
    Ok(host.state().project_config(&project))
}

#[receive(
    contract = "RamMinter",
    name = "getPendingPayout",
    parameter = "AccountAddress",
    return_value = "Amount"
)]
fn get_pending_payout<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ReceiveResult<Amount> {
    let account = AccountAddress::deserial(&mut ctx.parameter_cursor())?;
    Ok(host.state().pending_payout(&account))
}

/// Function to manage addresses that are allowed to maintain and modify the state of the contract.
#[receive(
    mutable,
    contract = "RamMinter",
    name = "updateAuthority",
    parameter = "AuthorityUpdateParams"
)]
fn update_authority<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
) -> ReceiveResult<()> {
    let params = AuthorityUpdateParams::deserial(&mut ctx.parameter_cursor())?;
    host.state_mut()
        .authority
        .handle_update(ctx.sender(), params)?;
    Ok(())
}

/// Function to view addresses that are allowed to maintain and modify the state of the contract.
#[receive(
    contract = "RamMinter",
    name = "viewAuthority",
    parameter = "AuthorityViewParams",
    return_value = "Vec<Address>"
)]
fn view_authority<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ReceiveResult<Vec<Address>> {
    let params = AuthorityViewParams::deserial(&mut ctx.parameter_cursor())?;
    Ok(host.state().authority.handle_view(params))
}

/// Function to update values required for internal contract functionality. This includes:
/// - MinterFilter. Contract that assigns minters to projects.
/// - PlatformBeneficiary. Account address that receives the platform share.
/// - PlatformShare. Part of the revenues paid to the platform.
///
///  It rejects if:
///  - Fails to parse `InternalValue` parameters.
///  - If sender is neither one of the admins nor one of the maintainers.
///  - The platform share is above 100%.
#[receive(
    mutable,
    contract = "RamMinter",
    name = "updateInternalValue",
    parameter = "InternalValue"
)]
fn update_internal_value<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
) -> ReceiveResult<()> {
    if !host.state().authority.has_maintainer_rights(&ctx.sender()) {
        return Err(CustomContractError::Unauthorized.into());
    }

    let params = InternalValue::deserial(&mut ctx.parameter_cursor())?;
    let state = host.state_mut();
    match params {
        InternalValue::MinterFilter(address) => state.minter_filter = address,
        InternalValue::PlatformBeneficiary(account) => state.platform_beneficiary = account,
        InternalValue::PlatformShare(share) => {
            ensure!(
                share.is_valid_share(),
                CustomContractError::InvalidPercentage.into()
            );
            state.platform_share = share;
        }
    }

    Ok(())
}

/// Function to view values required for internal contract functionality.
#[receive(
    contract = "RamMinter",
    name = "viewInternalValue",
    parameter = "ViewInternalValueParams",
    return_value = "InternalValue"
)]
fn view_internal_value<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ReceiveResult<InternalValue> {
    let state = host.state();
    let params = ViewInternalValueParams::deserial(&mut ctx.parameter_cursor())?;

    let value = match params {
        ViewInternalValueParams::MinterFilter => InternalValue::MinterFilter(state.minter_filter),
        ViewInternalValueParams::PlatformBeneficiary => {
            InternalValue::PlatformBeneficiary(state.platform_beneficiary)
        }
        ViewInternalValueParams::PlatformShare => InternalValue::PlatformShare(state.platform_share),
    };

    Ok(value)
}

fn sender_account(ctx: &impl HasReceiveContext) -> Result<AccountAddress, CustomContractError> {
    match ctx.sender() {
        Address::Account(account) => Ok(account),
        Address::Contract(_) => Err(CustomContractError::OnlyAccountAddress),
    }
}

fn ensure_admin<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ReceiveResult<()> {
    ensure!(
        host.state().authority.has_admin_rights(&ctx.sender()),
        CustomContractError::Unauthorized.into()
    );
    Ok(())
}

fn ensure_artist<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
    project: &ProjectKey,
) -> ReceiveResult<()> {
    let artist = host
        .project_artist(&project.core, project.project_id)
        .map_err(CustomContractError::from)?;
    ensure!(
        ctx.sender().matches_account(&artist),
        CustomContractError::OnlyArtist.into()
    );
    Ok(())
}

fn ensure_admin_or_artist<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
    project: &ProjectKey,
) -> ReceiveResult<()> {
    if host.state().authority.has_admin_rights(&ctx.sender()) {
        return Ok(());
    }
    ensure_artist(ctx, host, project)
}

fn ensure_assigned_minter<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
    project: &ProjectKey,
) -> ReceiveResult<()> {
    let minter_filter = host.state().minter_filter;
    let minter = host
        .minter_for_project(&minter_filter, project)
        .map_err(CustomContractError::from)?
        .ok_or(CustomContractError::NoMinterAssigned)?;
    ensure_eq!(
        minter,
        ctx.self_address(),
        CustomContractError::MinterNotActive.into()
    );
    Ok(())
}

/// Tokens the project can still mint, honoring a manual limit.
fn available_supply<S: HasStateApi>(
    host: &impl HasHost<State<S>, StateApiType = S>,
    project: &ProjectKey,
) -> ReceiveResult<u64> {
    let limit = host.state().project_config(project).max_invocations;
    available_supply_under(host, project, limit)
}

/// Tokens the project could still mint under `limit`.
fn available_supply_under<S: HasStateApi>(
    host: &impl HasHost<State<S>, StateApiType = S>,
    project: &ProjectKey,
    limit: Option<u64>,
) -> ReceiveResult<u64> {
    let supply = host
        .project_supply(&project.core, project.project_id)
        .map_err(CustomContractError::from)?;
    let max_invocations = limit.map_or(supply.max_invocations, |limit| {
        limit.min(supply.max_invocations)
    });
    Ok(max_invocations.saturating_sub(supply.invocations))
}

fn error_e1_deficit<S: HasStateApi>(
    host: &impl HasHost<State<S>, StateApiType = S>,
    project: &ProjectKey,
    auction: &Auction,
    now: Timestamp,
) -> ReceiveResult<u32> {
    if !auction.state(now).is_post_auction() {
        return Ok(0);
    }
    Ok(auction.error_e1_deficit(now, available_supply(host, project)?))
}

fn ensure_no_error_e1<S: HasStateApi>(
    host: &impl HasHost<State<S>, StateApiType = S>,
    project: &ProjectKey,
    auction: &Auction,
    now: Timestamp,
) -> ReceiveResult<()> {
    ensure_eq!(
        error_e1_deficit(host, project, auction, now)?,
        0,
        CustomContractError::OnlyNonErrorState.into()
    );
    Ok(())
}

/// Returns the deficit, rejecting when there is none.
fn ensure_error_e1<S: HasStateApi>(
    host: &impl HasHost<State<S>, StateApiType = S>,
    project: &ProjectKey,
    auction: &Auction,
    now: Timestamp,
) -> ReceiveResult<u32> {
    let deficit = error_e1_deficit(host, project, auction, now)?;
    ensure!(deficit > 0, CustomContractError::OnlyErrorE1.into());
    Ok(deficit)
}

/// Stores the manual limit and resizes an auction that has not started.
///
/// Once revenues are collected, pending bids can no longer be refunded, so
/// the limit must leave a token for each of them.
fn update_max_invocations<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    project: &ProjectKey,
    max_invocations: Option<u64>,
) -> ReceiveResult<()> {
    let auction = host.state().auction(project).ok();
    let state = auction
        .as_ref()
        .map(|auction| auction.state(ctx.metadata().slot_time()));
    ensure!(
        state != Some(AuctionState::LiveAuction),
        CustomContractError::AuctionLive.into()
    );
    if let Some(auction) = auction.as_ref().filter(|auction| auction.revenues_collected) {
        let available = available_supply_under(host, project, max_invocations)?;
        ensure!(
            available >= u64::from(auction.num_pending_bids()),
            CustomContractError::InvalidMaxInvocations.into()
        );
    }

    host.state_mut()
        .update_project_config(*project, |config| config.max_invocations = max_invocations);

    if let (Some(mut auction), Some(AuctionState::PreAuction)) = (auction, state) {
        let available = available_supply(host, project)?;
        ensure!(available > 0, CustomContractError::NoTokensInAuction.into());
        auction.num_tokens_in_auction = u32::try_from(available).unwrap_or(u32::MAX);
        host.state_mut().store_auction(*project, auction);
    }

    Ok(())
}

fn purchase_for<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    amount: Amount,
    logger: &mut impl HasLogger,
    project: ProjectKey,
    to: AccountAddress,
) -> ReceiveResult<()> {
    non_reentrant(host, |host| {
        ensure_assigned_minter(ctx, host, &project)?;
        let now = ctx.metadata().slot_time();
        let auction = host.state().auction(&project)?;
        auction.ensure_open_mint(now)?;
        ensure_no_error_e1(host, &project, &auction, now)?;
        let available = available_supply(host, &project)?;
        ensure!(
            available > u64::from(auction.num_pending_bids()),
            CustomContractError::NoTokensAvailable.into()
        );
        let price = auction.clearing_price()?;
        ensure_eq!(amount, price, CustomContractError::ValueMismatch.into());

        let token_id = host
            .mint_to(&project.core, project.project_id, &to)
            .map_err(CustomContractError::from)?;
        logger.log(&RamMinterEvent::Purchase(PurchaseEvent {
            project,
            to,
            price,
            token_id,
        }))?;

        let artist = host
            .project_artist(&project.core, project.project_id)
            .map_err(CustomContractError::from)?;
        let split = host.split_revenues(&artist, amount);
        log_split_deliveries(host, logger, &artist, &split)
    })
}

fn execute_mint_orders<S: HasStateApi>(
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
    project: &ProjectKey,
    orders: Vec<MintOrder>,
) -> ReceiveResult<()> {
    for order in orders {
        let token_id = host
            .mint_to(&project.core, project.project_id, &order.recipient)
            .map_err(CustomContractError::from)?;
        logger.log(&RamMinterEvent::BidMinted(BidMintedEvent {
            project: *project,
            bid_id: order.bid_id,
            token_id,
        }))?;

        if order.settlement > Amount::zero() {
            logger.log(&RamMinterEvent::settled(
                *project,
                order.bid_id,
                order.recipient,
                order.settlement,
            ))?;
            deliver(host, logger, &order.recipient, order.settlement)?;
        }
    }
    Ok(())
}

fn execute_refunds<S: HasStateApi>(
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
    project: &ProjectKey,
    payouts: Vec<Payout>,
) -> ReceiveResult<()> {
    for payout in payouts {
        logger.log(&RamMinterEvent::refunded(
            *project,
            payout.bid_id,
            payout.recipient,
            payout.amount,
        ))?;
        deliver(host, logger, &payout.recipient, payout.amount)?;
    }
    Ok(())
}

/// Pays `amount`, logging a pull credit when the transfer fails.
fn deliver<S: HasStateApi>(
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
    recipient: &AccountAddress,
    amount: Amount,
) -> ReceiveResult<()> {
    let delivery = host.pay(recipient, amount);
    log_delivery(logger, recipient, amount, delivery)
}

fn log_split_deliveries<S: HasStateApi>(
    host: &impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
    artist: &AccountAddress,
    split: &RevenueSplit,
) -> ReceiveResult<()> {
    log_delivery(logger, artist, split.artist_share, split.artist_delivery)?;
    log_delivery(
        logger,
        &host.state().platform_beneficiary,
        split.platform_share,
        split.platform_delivery,
    )
}

fn log_delivery(
    logger: &mut impl HasLogger,
    recipient: &AccountAddress,
    amount: Amount,
    delivery: Delivery,
) -> ReceiveResult<()> {
    if delivery == Delivery::Credited {
        logger.log(&RamMinterEvent::PendingPayoutCredited(PendingPayoutEvent {
            recipient: *recipient,
            amount,
        }))?;
    }
    Ok(())
}

#[concordium_cfg_test]
mod tests {
    use super::*;
    use crate::auction::ADMIN_ARTIST_ONLY_MINT_MILLIS;
    use commons::test::*;
    use commons::{AuthorityField, AuthorityUpdateKind, BidId, Percentage, ProjectId};
    use concordium_cis2::TokenIdU64;
    use concordium_std::test_infrastructure::*;

    const CORE: ContractAddress = ContractAddress {
        index: 1,
        subindex: 0,
    };
    const MINTER_FILTER: ContractAddress = ContractAddress {
        index: 2,
        subindex: 0,
    };
    const MINTER: ContractAddress = ContractAddress {
        index: 3,
        subindex: 0,
    };
    const OTHER_MINTER: ContractAddress = ContractAddress {
        index: 4,
        subindex: 0,
    };
    const PROJECT: ProjectKey = ProjectKey {
        core: CORE,
        project_id: 7,
    };

    const ADMIN: AccountAddress = AccountAddress([1; 32]);
    const ARTIST: AccountAddress = AccountAddress([2; 32]);
    const BENEFICIARY: AccountAddress = AccountAddress([3; 32]);
    const MAINTAINER: AccountAddress = AccountAddress([4; 32]);

    const START: u64 = 1_000_000_000;
    const END: u64 = START + 60 * 60 * 1000;
    const CONFIGURED_AT: u64 = START - 1000;

    fn bidder(n: u8) -> AccountAddress {
        AccountAddress([100 + n; 32])
    }

    fn receive_ctx<'a>(
        sender: AccountAddress,
        now: u64,
        parameter: &'a [u8],
    ) -> TestReceiveContext<'a> {
        let mut ctx = TestReceiveContext::empty();
        ctx.set_sender(Address::Account(sender))
            .set_invoker(sender)
            .set_self_address(MINTER)
            .set_metadata_slot_time(Timestamp::from_timestamp_millis(now))
            .set_parameter(parameter);
        ctx
    }

    fn init_params() -> InitParams {
        InitParams {
            minter_filter: MINTER_FILTER,
            platform_beneficiary: BENEFICIARY,
            platform_share: Percentage::from_percent(10),
        }
    }

    fn setup_supply(host: &mut TestHost<State<TestStateApi>>, invocations: u64, max_invocations: u64) {
        host.setup_mock_entrypoint(
            CORE,
            OwnedEntrypointName::new_unchecked(String::from("projectSupply")),
            parse_and_ok_mock::<ProjectId, _>(ProjectSupply {
                invocations,
                max_invocations,
            }),
        );
    }

    fn setup_assigned_minter(host: &mut TestHost<State<TestStateApi>>, minter: Option<ContractAddress>) {
        host.setup_mock_entrypoint(
            MINTER_FILTER,
            OwnedEntrypointName::new_unchecked(String::from("getMinterForProject")),
            parse_and_ok_mock::<MinterForProjectParams, _>(minter),
        );
    }

    fn default_host(max_invocations: u64) -> TestHost<State<TestStateApi>> {
        let mut ctx = TestInitContext::empty();
        let bytes = to_bytes(&init_params());
        ctx.set_init_origin(ADMIN).set_parameter(&bytes);
        let mut state_builder = TestStateBuilder::new();
        let state = init(&ctx, &mut state_builder).expect_report("Failed during init_RamMinter");
        let mut host = TestHost::new(state, state_builder);

        let params = AuthorityUpdateParams {
            field: AuthorityField::Maintainer,
            kind: AuthorityUpdateKind::Add,
            address: Address::Account(MAINTAINER),
        };
        let bytes = to_bytes(&params);
        let ctx = receive_ctx(ADMIN, 0, &bytes);
        claim_eq!(update_authority(&ctx, &mut host), Ok(()));

        setup_supply(&mut host, 0, max_invocations);
        setup_assigned_minter(&mut host, Some(MINTER));
        host.setup_mock_entrypoint(
            CORE,
            OwnedEntrypointName::new_unchecked(String::from("projectArtist")),
            parse_and_ok_mock::<ProjectId, _>(ARTIST),
        );
        host.setup_mock_entrypoint(
            CORE,
            OwnedEntrypointName::new_unchecked(String::from("mintTo")),
            parse_and_ok_mock::<MintToParams, _>(TokenIdU64(1)),
        );
        host.set_self_balance(Amount::from_ccd(1_000_000));

        host
    }

    fn auction_params(base_price: Amount, allow_extra_time: bool, admin_window: bool) -> SetAuctionDetailsParams {
        SetAuctionDetailsParams {
            project: PROJECT,
            timestamp_start: Timestamp::from_timestamp_millis(START),
            timestamp_end: Timestamp::from_timestamp_millis(END),
            base_price,
            allow_extra_time,
            admin_artist_only_mint_period_if_sellout: admin_window,
        }
    }

    fn configure(
        host: &mut TestHost<State<TestStateApi>>,
        params: &SetAuctionDetailsParams,
    ) -> ReceiveResult<()> {
        let bytes = to_bytes(params);
        let ctx = receive_ctx(ARTIST, CONFIGURED_AT, &bytes);
        let mut logger = TestLogger::init();
        set_auction_details(&ctx, host, &mut logger)
    }

    /// Host with a configured auction of `num_tokens` tokens at 1 CCD.
    fn auction_host(num_tokens: u64, admin_window: bool) -> TestHost<State<TestStateApi>> {
        let mut host = default_host(num_tokens);
        let params = auction_params(Amount::from_ccd(1), false, admin_window);
        claim_eq!(configure(&mut host, &params), Ok(()));
        host
    }

    fn auction(host: &TestHost<State<TestStateApi>>) -> Auction {
        host.state()
            .auction(&PROJECT)
            .expect_report("Auction should be configured")
    }

    fn slot_value(host: &TestHost<State<TestStateApi>>, slot_index: u16) -> Amount {
        auction(host)
            .bid_value(slot_index)
            .expect_report("Slot should exist")
    }

    fn bid(
        host: &mut TestHost<State<TestStateApi>>,
        from: AccountAddress,
        slot_index: u16,
        now: u64,
    ) -> ReceiveResult<()> {
        let value = slot_value(host, slot_index);
        let bytes = to_bytes(&CreateBidParams {
            project: PROJECT,
            slot_index,
        });
        let ctx = receive_ctx(from, now, &bytes);
        let mut logger = TestLogger::init();
        create_bid(&ctx, host, value, &mut logger)
    }

    fn bid_ids_params(bid_ids: &[BidId]) -> Vec<u8> {
        to_bytes(&BidIdsParams {
            project: PROJECT,
            bid_ids: bid_ids.to_vec(),
        })
    }

    fn auto_mint(
        host: &mut TestHost<State<TestStateApi>>,
        sender: AccountAddress,
        num_tokens: u32,
        now: u64,
    ) -> ReceiveResult<()> {
        let bytes = to_bytes(&AutoMintParams {
            project: PROJECT,
            num_tokens,
        });
        let ctx = receive_ctx(sender, now, &bytes);
        let mut logger = TestLogger::init();
        admin_artist_auto_mint_tokens_to_winners(&ctx, host, &mut logger)
    }

    fn auction_state(host: &TestHost<State<TestStateApi>>, now: u64) -> AuctionState {
        let bytes = to_bytes(&PROJECT);
        let ctx = receive_ctx(ADMIN, now, &bytes);
        get_auction_state(&ctx, host).expect_report("Auction state should be readable")
    }
    #[concordium_test]
    fn test_init() {
        let host = default_host(15);
        let state = host.state();

        claim_eq!(state.minter_filter, MINTER_FILTER);
        claim_eq!(state.platform_beneficiary, BENEFICIARY);
        claim_eq!(state.platform_share, Percentage::from_percent(10));
        claim!(state.authority.has_admin_rights(&Address::Account(ADMIN)));
        claim!(state
            .authority
            .has_maintainer_rights(&Address::Account(MAINTAINER)));
        claim!(!state.locked);

        let mut ctx = TestInitContext::empty();
        let mut params = init_params();
        params.platform_share = Percentage::from_percent(101);
        let bytes = to_bytes(&params);
        ctx.set_init_origin(ADMIN).set_parameter(&bytes);
        let mut state_builder = TestStateBuilder::new();
        claim_eq!(
            init(&ctx, &mut state_builder).err(),
            Some(CustomContractError::InvalidPercentage.into())
        );
    }

    #[concordium_test]
    fn test_set_auction_details() {
        let mut host = default_host(15);
        let params = auction_params(Amount::from_ccd(1), false, true);
        let bytes = to_bytes(&params);

        let ctx = receive_ctx(bidder(0), CONFIGURED_AT, &bytes);
        let mut logger = TestLogger::init();
        claim_eq!(
            set_auction_details(&ctx, &mut host, &mut logger),
            Err(CustomContractError::OnlyArtist.into())
        );

        setup_assigned_minter(&mut host, None);
        claim_eq!(
            configure(&mut host, &params),
            Err(CustomContractError::NoMinterAssigned.into())
        );
        setup_assigned_minter(&mut host, Some(OTHER_MINTER));
        claim_eq!(
            configure(&mut host, &params),
            Err(CustomContractError::MinterNotActive.into())
        );
        setup_assigned_minter(&mut host, Some(MINTER));

        host.state_mut().update_project_config(PROJECT, |config| {
            config.admin_mint_constraint = AdminMintConstraint::ForbidAdminArtistOnlyMintPeriod
        });
        claim_eq!(
            configure(&mut host, &params),
            Err(CustomContractError::AdminMintConstraintViolated.into())
        );
        host.state_mut().update_project_config(PROJECT, |config| {
            config.admin_mint_constraint = AdminMintConstraint::RequireAdminArtistOnlyMintPeriod
        });

        let ctx = receive_ctx(ARTIST, CONFIGURED_AT, &bytes);
        let mut logger = TestLogger::init();
        claim_eq!(set_auction_details(&ctx, &mut host, &mut logger), Ok(()));
        claim_eq!(
            logger.logs,
            vec![to_bytes(&RamMinterEvent::AuctionConfigured(
                AuctionConfiguredEvent {
                    project: PROJECT,
                    timestamp_start: params.timestamp_start,
                    timestamp_end: params.timestamp_end,
                    base_price: params.base_price,
                    num_tokens_in_auction: 15,
                    allow_extra_time: false,
                    admin_artist_only_mint_period_if_sellout: true,
                }
            ))]
        );
        claim_eq!(auction_state(&host, CONFIGURED_AT), AuctionState::PreAuction);
        claim_eq!(auction(&host).num_tokens_in_auction, 15);

        // Reconfiguring is allowed until the auction starts.
        let mut later = params.clone();
        later.timestamp_start = Timestamp::from_timestamp_millis(START + 1000);
        later.timestamp_end = Timestamp::from_timestamp_millis(END + 1000);
        let bytes = to_bytes(&later);
        let ctx = receive_ctx(ARTIST, START, &bytes);
        let mut logger = TestLogger::init();
        claim_eq!(
            set_auction_details(&ctx, &mut host, &mut logger),
            Err(CustomContractError::AuctionAlreadyStarted.into())
        );
    }

    #[concordium_test]
    fn test_sell_out_evicts_lowest_bid() {
        let mut host = auction_host(2, false);
        claim_eq!(bid(&mut host, bidder(0), 0, START), Ok(()));
        claim_eq!(bid(&mut host, bidder(1), 0, START + 1), Ok(()));

        // Slot 1 is below the outbid threshold of 2.5%.
        claim_eq!(
            bid(&mut host, bidder(2), 1, START + 2),
            Err(CustomContractError::InsufficientBidValue.into())
        );

        let bytes = to_bytes(&PROJECT);
        let ctx = receive_ctx(bidder(2), START + 2, &bytes);
        claim_eq!(
            get_minimum_next_bid(&ctx, &host),
            Ok(MinimumNextBidView {
                slot_index: 2,
                value: Amount::from_micro_ccd(1_031_250),
            })
        );

        let bytes = to_bytes(&CreateBidParams {
            project: PROJECT,
            slot_index: 2,
        });
        let ctx = receive_ctx(bidder(2), START + 2, &bytes);
        let mut logger = TestLogger::init();
        let result = create_bid(&ctx, &mut host, Amount::from_micro_ccd(1_031_250), &mut logger);
        claim_eq!(result, Ok(()));
        claim!(host.transfer_occurred(&bidder(0), Amount::from_ccd(1)));
        claim!(logger.logs.contains(&to_bytes(&RamMinterEvent::BidRemoved(
            BidRemovedEvent {
                project: PROJECT,
                bid_id: 1,
                bidder: bidder(0),
                refund: Amount::from_ccd(1),
            }
        ))));

        let auction = auction(&host);
        claim_eq!(auction.num_bids(), 3);
        claim_eq!(auction.num_live_bids(), 2);
        claim_eq!(auction.min_bid_slot_index, Some(0));
        claim_eq!(
            auction.project_balance,
            Amount::from_micro_ccd(2_031_250)
        );
        claim!(!auction.book.is_live(&host.state().bids, 1));
    }

    #[concordium_test]
    fn test_outbid_threshold_below_half_ccd() {
        let mut host = default_host(1);
        let params = auction_params(Amount::from_micro_ccd(100_000), false, false);
        claim_eq!(configure(&mut host, &params), Ok(()));
        claim_eq!(bid(&mut host, bidder(0), 0, START), Ok(()));

        // Small bids need 5% more: slot 3 (104_687) fails, slot 4 (106_250) passes.
        claim_eq!(slot_value(&host, 3), Amount::from_micro_ccd(104_687));
        claim_eq!(
            bid(&mut host, bidder(1), 3, START),
            Err(CustomContractError::InsufficientBidValue.into())
        );
        claim_eq!(bid(&mut host, bidder(1), 4, START), Ok(()));
        claim!(host.transfer_occurred(&bidder(0), Amount::from_micro_ccd(100_000)));
    }

    #[concordium_test]
    fn test_bid_in_buffer_extends_auction() {
        let mut host = default_host(1);
        let params = auction_params(Amount::from_ccd(1), true, false);
        claim_eq!(configure(&mut host, &params), Ok(()));

        let now = END - 60_000;
        let bytes = to_bytes(&CreateBidParams {
            project: PROJECT,
            slot_index: 0,
        });
        let ctx = receive_ctx(bidder(0), now, &bytes);
        let mut logger = TestLogger::init();
        claim_eq!(
            create_bid(&ctx, &mut host, Amount::from_ccd(1), &mut logger),
            Ok(())
        );

        let timestamp_end = Timestamp::from_timestamp_millis(now + 5 * 60 * 1000);
        claim_eq!(auction(&host).timestamp_end, timestamp_end);
        claim!(logger.logs.contains(&to_bytes(
            &RamMinterEvent::timestamp_end_updated(PROJECT, timestamp_end)
        )));
        claim_eq!(auction_state(&host, END), AuctionState::LiveAuction);
    }

    #[concordium_test]
    fn test_top_up_bid() {
        let mut host = auction_host(3, false);
        claim_eq!(bid(&mut host, bidder(0), 0, START), Ok(()));

        let bytes = to_bytes(&TopUpBidParams {
            project: PROJECT,
            bid_id: 1,
            new_slot_index: 3,
        });
        let delta = Amount::from_micro_ccd(46_875);

        let ctx = receive_ctx(bidder(1), START, &bytes);
        let mut logger = TestLogger::init();
        claim_eq!(
            top_up_bid(&ctx, &mut host, delta, &mut logger),
            Err(CustomContractError::OnlyBidder.into())
        );

        let ctx = receive_ctx(bidder(0), START, &bytes);
        claim_eq!(
            top_up_bid(&ctx, &mut host, Amount::from_micro_ccd(1), &mut logger),
            Err(CustomContractError::ValueMismatch.into())
        );
        claim_eq!(top_up_bid(&ctx, &mut host, delta, &mut logger), Ok(()));

        let bytes = to_bytes(&BidViewParams {
            project: PROJECT,
            bid_id: 1,
        });
        let ctx = receive_ctx(bidder(0), START, &bytes);
        let view = get_bid(&ctx, &host).expect_report("Bid should exist");
        claim_eq!(view.bid.slot_index, 3);
        claim_eq!(view.value, Amount::from_micro_ccd(1_046_875));
        claim!(view.is_live);
        claim_eq!(auction(&host).project_balance, Amount::from_micro_ccd(1_046_875));
    }

    #[concordium_test]
    fn test_collect_settlements() {
        let mut host = auction_host(3, false);
        claim_eq!(bid(&mut host, bidder(0), 0, START), Ok(()));
        claim_eq!(bid(&mut host, bidder(1), 10, START), Ok(()));
        claim_eq!(bid(&mut host, bidder(2), 20, START), Ok(()));

        let bytes = bid_ids_params(&[3]);
        let ctx = receive_ctx(bidder(2), START, &bytes);
        let mut logger = TestLogger::init();
        claim_eq!(
            collect_settlements(&ctx, &mut host, &mut logger),
            Err(CustomContractError::OnlyPostAuction.into())
        );

        let ctx = receive_ctx(bidder(1), END, &bytes);
        claim_eq!(
            collect_settlements(&ctx, &mut host, &mut logger),
            Err(CustomContractError::OnlyBidder.into())
        );

        let ctx = receive_ctx(bidder(2), END, &bytes);
        let mut logger = TestLogger::init();
        claim_eq!(collect_settlements(&ctx, &mut host, &mut logger), Ok(()));
        claim!(host.transfer_occurred(&bidder(2), Amount::from_micro_ccd(312_500)));
        claim_eq!(
            logger.logs,
            vec![to_bytes(&RamMinterEvent::settled(
                PROJECT,
                3,
                bidder(2),
                Amount::from_micro_ccd(312_500)
            ))]
        );

        // Settling again pays nothing.
        let balance = auction(&host).project_balance;
        let mut logger = TestLogger::init();
        claim_eq!(collect_settlements(&ctx, &mut host, &mut logger), Ok(()));
        claim!(logger.logs.is_empty());
        claim_eq!(auction(&host).project_balance, balance);

        // Minting a settled bid pays no further excess.
        claim_eq!(auto_mint(&mut host, ADMIN, 3, END), Ok(()));
        claim_eq!(auction(&host).project_balance, Amount::from_ccd(3));
        claim_eq!(auction_state(&host, END), AuctionState::PostAuctionAllBidsHandled);
    }

    #[concordium_test]
    fn test_admin_artist_only_mint_window() {
        let mut host = auction_host(2, true);
        claim_eq!(bid(&mut host, bidder(0), 0, START), Ok(()));
        claim_eq!(bid(&mut host, bidder(1), 3, START), Ok(()));
        claim_eq!(
            auction_state(&host, END),
            AuctionState::PostAuctionSellOutAdminArtistMint
        );

        let bytes = bid_ids_params(&[2]);
        let ctx = receive_ctx(bidder(1), END, &bytes);
        let mut logger = TestLogger::init();
        claim_eq!(
            winner_direct_mint_tokens(&ctx, &mut host, &mut logger),
            Err(CustomContractError::OnlyPostAuctionOpenMint.into())
        );
        claim_eq!(
            auto_mint(&mut host, bidder(1), 1, END),
            Err(CustomContractError::OnlyArtist.into())
        );
        claim_eq!(auto_mint(&mut host, ARTIST, 1, END), Ok(()));

        let open = END + ADMIN_ARTIST_ONLY_MINT_MILLIS;
        claim_eq!(auction_state(&host, open), AuctionState::PostAuctionOpenMint);
        let ctx = receive_ctx(bidder(1), open, &bytes);
        let mut logger = TestLogger::init();
        claim_eq!(
            winner_direct_mint_tokens(&ctx, &mut host, &mut logger),
            Ok(())
        );
        claim!(host.transfer_occurred(&bidder(1), Amount::from_micro_ccd(46_875)));
        claim!(logger.logs.contains(&to_bytes(&RamMinterEvent::BidMinted(
            BidMintedEvent {
                project: PROJECT,
                bid_id: 2,
                token_id: TokenIdU64(1),
            }
        ))));

        let mut logger = TestLogger::init();
        claim_eq!(
            winner_direct_mint_tokens(&ctx, &mut host, &mut logger),
            Err(CustomContractError::BidAlreadyResolved.into())
        );
        claim_eq!(auction_state(&host, open), AuctionState::PostAuctionAllBidsHandled);
    }

    #[concordium_test]
    fn test_error_e1_refunds() {
        let mut host = auction_host(15, false);
        for n in 0..15 {
            claim_eq!(bid(&mut host, bidder(n), 0, START), Ok(()));
        }
        // The core minted 14 tokens elsewhere, one is left.
        setup_supply(&mut host, 14, 15);

        let bytes = to_bytes(&PROJECT);
        let ctx = receive_ctx(ADMIN, END, &bytes);
        claim_eq!(
            get_is_error_e1(&ctx, &host),
            Ok(ErrorE1View {
                is_error: true,
                num_bids_to_refund: 14,
            })
        );
        claim_eq!(
            auto_mint(&mut host, ADMIN, 1, END),
            Err(CustomContractError::OnlyNonErrorState.into())
        );

        let refund = |host: &mut TestHost<State<TestStateApi>>, num_bids: u32| {
            let bytes = to_bytes(&AutoRefundParams {
                project: PROJECT,
                num_bids,
            });
            let ctx = receive_ctx(ADMIN, END, &bytes);
            let mut logger = TestLogger::init();
            admin_auto_refund_winners(&ctx, host, &mut logger)
        };
        claim_eq!(
            refund(&mut host, 15),
            Err(CustomContractError::TooManyBidsToRefund.into())
        );
        claim_eq!(refund(&mut host, 14), Ok(()));

        // Newest bids are refunded first.
        claim!(host.transfer_occurred(&bidder(14), Amount::from_ccd(1)));
        claim!(host.transfer_occurred(&bidder(1), Amount::from_ccd(1)));
        claim!(!host.transfer_occurred(&bidder(0), Amount::from_ccd(1)));
        claim_eq!(
            get_is_error_e1(&ctx, &host),
            Ok(ErrorE1View {
                is_error: false,
                num_bids_to_refund: 0,
            })
        );
        claim_eq!(
            refund(&mut host, 1),
            Err(CustomContractError::OnlyErrorE1.into())
        );

        claim_eq!(auto_mint(&mut host, ADMIN, 1, END), Ok(()));
        let auction = auction(&host);
        claim_eq!(auction.num_bids_error_refunded, 14);
        claim_eq!(auction.num_bids_minted_tokens, 1);
        claim_eq!(auction.project_balance, Amount::from_ccd(1));
        claim_eq!(auction_state(&host, END), AuctionState::PostAuctionAllBidsHandled);
    }

    #[concordium_test]
    fn test_withdraw_revenues() {
        let mut host = auction_host(3, false);
        for n in 0..3 {
            claim_eq!(bid(&mut host, bidder(n), 0, START), Ok(()));
        }

        let bytes = to_bytes(&PROJECT);
        let ctx = receive_ctx(bidder(0), END, &bytes);
        let mut logger = TestLogger::init();
        claim_eq!(
            withdraw_artist_and_admin_revenues(&ctx, &mut host, &mut logger),
            Err(CustomContractError::OnlyArtist.into())
        );

        let ctx = receive_ctx(ARTIST, END, &bytes);
        let mut logger = TestLogger::init();
        claim_eq!(
            withdraw_artist_and_admin_revenues(&ctx, &mut host, &mut logger),
            Ok(())
        );
        claim!(host.transfer_occurred(&ARTIST, Amount::from_micro_ccd(2_700_000)));
        claim!(host.transfer_occurred(&BENEFICIARY, Amount::from_micro_ccd(300_000)));
        claim_eq!(auction(&host).project_balance, Amount::zero());

        let mut logger = TestLogger::init();
        claim_eq!(
            withdraw_artist_and_admin_revenues(&ctx, &mut host, &mut logger),
            Err(CustomContractError::RevenuesAlreadyCollected.into())
        );
    }

    #[concordium_test]
    fn test_purchase() {
        let mut host = auction_host(3, false);
        claim_eq!(bid(&mut host, bidder(0), 0, START), Ok(()));

        let bytes = to_bytes(&PROJECT);
        let ctx = receive_ctx(bidder(1), START, &bytes);
        let mut logger = TestLogger::init();
        claim_eq!(
            purchase(&ctx, &mut host, Amount::from_ccd(1), &mut logger),
            Err(CustomContractError::OnlyPostAuction.into())
        );

        host.setup_mock_entrypoint(
            CORE,
            OwnedEntrypointName::new_unchecked(String::from("mintTo")),
            parse_and_check_mock(
                |params: &MintToParams| {
                    params.project_id == PROJECT.project_id && params.to == bidder(1)
                },
                TokenIdU64(1),
            ),
        );
        let ctx = receive_ctx(bidder(1), END, &bytes);
        claim_eq!(
            purchase(&ctx, &mut host, Amount::from_micro_ccd(999_999), &mut logger),
            Err(CustomContractError::ValueMismatch.into())
        );
        let mut logger = TestLogger::init();
        claim_eq!(
            purchase(&ctx, &mut host, Amount::from_ccd(1), &mut logger),
            Ok(())
        );
        claim!(host.transfer_occurred(&ARTIST, Amount::from_micro_ccd(900_000)));
        claim!(host.transfer_occurred(&BENEFICIARY, Amount::from_micro_ccd(100_000)));
        claim!(logger.logs.contains(&to_bytes(&RamMinterEvent::Purchase(
            PurchaseEvent {
                project: PROJECT,
                to: bidder(1),
                price: Amount::from_ccd(1),
                token_id: TokenIdU64(1),
            }
        ))));
        claim_eq!(auction(&host).project_balance, Amount::from_ccd(1));

        // The remaining token belongs to the pending bid.
        setup_supply(&mut host, 2, 3);
        let bytes = to_bytes(&PurchaseToParams {
            project: PROJECT,
            to: bidder(2),
        });
        let ctx = receive_ctx(bidder(1), END, &bytes);
        let mut logger = TestLogger::init();
        claim_eq!(
            purchase_to(&ctx, &mut host, Amount::from_ccd(1), &mut logger),
            Err(CustomContractError::NoTokensAvailable.into())
        );
    }

    #[concordium_test]
    fn test_failed_mint_rejects() {
        let mut host = auction_host(1, false);
        claim_eq!(bid(&mut host, bidder(0), 0, START), Ok(()));
        host.setup_mock_entrypoint(
            CORE,
            OwnedEntrypointName::new_unchecked(String::from("mintTo")),
            trapping_mock::<MintToParams, _>(),
        );

        claim_eq!(
            auto_mint(&mut host, ADMIN, 1, END),
            Err(CustomContractError::InvokeContractError.into())
        );
        claim!(!host.state().locked);
    }

    #[concordium_test]
    fn test_failed_transfer_is_credited() {
        let mut host = auction_host(1, false);
        claim_eq!(bid(&mut host, bidder(0), 0, START), Ok(()));

        host.set_self_balance(Amount::zero());
        let bytes = to_bytes(&CreateBidParams {
            project: PROJECT,
            slot_index: 2,
        });
        let ctx = receive_ctx(bidder(1), START, &bytes);
        let mut logger = TestLogger::init();
        claim_eq!(
            create_bid(&ctx, &mut host, Amount::from_micro_ccd(1_031_250), &mut logger),
            Ok(())
        );
        claim!(logger.logs.contains(&to_bytes(
            &RamMinterEvent::PendingPayoutCredited(PendingPayoutEvent {
                recipient: bidder(0),
                amount: Amount::from_ccd(1),
            })
        )));

        let bytes = to_bytes(&bidder(0));
        let ctx = receive_ctx(bidder(0), START, &bytes);
        claim_eq!(get_pending_payout(&ctx, &host), Ok(Amount::from_ccd(1)));

        host.set_self_balance(Amount::from_ccd(10));
        let ctx = receive_ctx(bidder(0), START, &[]);
        let mut logger = TestLogger::init();
        claim_eq!(claim_pending_payout(&ctx, &mut host, &mut logger), Ok(()));
        claim!(host.transfer_occurred(&bidder(0), Amount::from_ccd(1)));
        claim_eq!(host.state().pending_payout(&bidder(0)), Amount::zero());

        let mut logger = TestLogger::init();
        claim_eq!(
            claim_pending_payout(&ctx, &mut host, &mut logger),
            Err(CustomContractError::NothingToClaim.into())
        );
    }

    #[concordium_test]
    fn test_reentrancy_guard() {
        let mut host = auction_host(2, false);

        // A rejected body releases the lock.
        let bytes = to_bytes(&CreateBidParams {
            project: PROJECT,
            slot_index: 0,
        });
        let ctx = receive_ctx(bidder(0), START, &bytes);
        let mut logger = TestLogger::init();
        claim_eq!(
            create_bid(&ctx, &mut host, Amount::from_micro_ccd(1), &mut logger),
            Err(CustomContractError::ValueMismatch.into())
        );
        claim!(!host.state().locked);

        host.state_mut().locked = true;
        claim_eq!(
            bid(&mut host, bidder(0), 0, START),
            Err(CustomContractError::ReentrantCall.into())
        );

        let bytes = to_bytes(&TopUpBidParams {
            project: PROJECT,
            bid_id: 1,
            new_slot_index: 3,
        });
        let ctx = receive_ctx(bidder(0), START, &bytes);
        let mut logger = TestLogger::init();
        claim_eq!(
            top_up_bid(&ctx, &mut host, Amount::from_micro_ccd(46_875), &mut logger),
            Err(CustomContractError::ReentrantCall.into())
        );

        // The lock is checked before the artist is queried.
        let params = auction_params(Amount::from_ccd(1), false, false);
        claim_eq!(
            configure(&mut host, &params),
            Err(CustomContractError::ReentrantCall.into())
        );
        let bytes = to_bytes(&params);
        let ctx = receive_ctx(bidder(0), CONFIGURED_AT, &bytes);
        let mut logger = TestLogger::init();
        claim_eq!(
            set_auction_details(&ctx, &mut host, &mut logger),
            Err(CustomContractError::ReentrantCall.into())
        );

        let bytes = to_bytes(&MaxInvocationsParams {
            project: PROJECT,
            max_invocations: 1,
        });
        let ctx = receive_ctx(ARTIST, CONFIGURED_AT, &bytes);
        let mut logger = TestLogger::init();
        claim_eq!(
            manually_limit_project_max_invocations(&ctx, &mut host, &mut logger),
            Err(CustomContractError::ReentrantCall.into())
        );

        host.state_mut().locked = false;
        claim_eq!(bid(&mut host, bidder(0), 0, START), Ok(()));
    }

    #[concordium_test]
    fn test_manual_max_invocations() {
        let mut host = default_host(15);
        setup_supply(&mut host, 2, 15);
        let params = auction_params(Amount::from_ccd(1), false, false);
        claim_eq!(configure(&mut host, &params), Ok(()));
        claim_eq!(auction(&host).num_tokens_in_auction, 13);

        let limit = |host: &mut TestHost<State<TestStateApi>>,
                     sender: AccountAddress,
                     max_invocations: u64,
                     now: u64| {
            let bytes = to_bytes(&MaxInvocationsParams {
                project: PROJECT,
                max_invocations,
            });
            let ctx = receive_ctx(sender, now, &bytes);
            let mut logger = TestLogger::init();
            manually_limit_project_max_invocations(&ctx, host, &mut logger)
        };

        claim_eq!(
            limit(&mut host, ADMIN, 10, CONFIGURED_AT),
            Err(CustomContractError::OnlyArtist.into())
        );
        claim_eq!(
            limit(&mut host, ARTIST, 1, CONFIGURED_AT),
            Err(CustomContractError::InvalidMaxInvocations.into())
        );
        claim_eq!(
            limit(&mut host, ARTIST, 16, CONFIGURED_AT),
            Err(CustomContractError::InvalidMaxInvocations.into())
        );
        claim_eq!(
            limit(&mut host, ARTIST, 10, START),
            Err(CustomContractError::AuctionLive.into())
        );
        claim_eq!(limit(&mut host, ARTIST, 10, CONFIGURED_AT), Ok(()));
        claim_eq!(auction(&host).num_tokens_in_auction, 8);
        claim_eq!(
            host.state().project_config(&PROJECT).max_invocations,
            Some(10)
        );

        let bytes = to_bytes(&PROJECT);
        let ctx = receive_ctx(ARTIST, CONFIGURED_AT, &bytes);
        let mut logger = TestLogger::init();
        claim_eq!(
            sync_project_max_invocations_to_core(&ctx, &mut host, &mut logger),
            Ok(())
        );
        claim_eq!(auction(&host).num_tokens_in_auction, 13);
        claim_eq!(host.state().project_config(&PROJECT).max_invocations, None);
        claim_eq!(
            logger.logs,
            vec![to_bytes(&RamMinterEvent::ProjectMaxInvocationsUpdated(
                ProjectMaxInvocationsUpdatedEvent {
                    project: PROJECT,
                    max_invocations: 15,
                    manually_limited: false,
                }
            ))]
        );
    }

    #[concordium_test]
    fn test_limit_after_revenues_keeps_pending_bids_mintable() {
        let mut host = auction_host(2, false);
        claim_eq!(bid(&mut host, bidder(0), 0, START), Ok(()));
        claim_eq!(bid(&mut host, bidder(1), 0, START), Ok(()));

        let bytes = to_bytes(&PROJECT);
        let ctx = receive_ctx(ARTIST, END, &bytes);
        let mut logger = TestLogger::init();
        claim_eq!(
            withdraw_artist_and_admin_revenues(&ctx, &mut host, &mut logger),
            Ok(())
        );

        let limit = |host: &mut TestHost<State<TestStateApi>>, max_invocations: u64| {
            let bytes = to_bytes(&MaxInvocationsParams {
                project: PROJECT,
                max_invocations,
            });
            let ctx = receive_ctx(ARTIST, END, &bytes);
            let mut logger = TestLogger::init();
            manually_limit_project_max_invocations(&ctx, host, &mut logger)
        };

        // Refunds are closed, so a deficit could never be cleared.
        claim_eq!(
            limit(&mut host, 1),
            Err(CustomContractError::InvalidMaxInvocations.into())
        );
        claim_eq!(host.state().project_config(&PROJECT).max_invocations, None);
        let ctx = receive_ctx(ADMIN, END, &bytes);
        claim_eq!(
            get_is_error_e1(&ctx, &host),
            Ok(ErrorE1View {
                is_error: false,
                num_bids_to_refund: 0,
            })
        );

        claim_eq!(limit(&mut host, 2), Ok(()));
        claim_eq!(auto_mint(&mut host, ADMIN, 2, END), Ok(()));
        claim_eq!(auction_state(&host, END), AuctionState::PostAuctionAllBidsHandled);
    }

    #[concordium_test]
    fn test_sold_out_auction_evicts_first_bid() {
        let mut host = auction_host(15, false);
        for n in 0..15 {
            claim_eq!(bid(&mut host, bidder(n), 0, START), Ok(()));
        }
        claim_eq!(bid(&mut host, bidder(15), 2, START + 1), Ok(()));
        claim!(host.transfer_occurred(&bidder(0), Amount::from_ccd(1)));

        let auction = auction(&host);
        claim_eq!(auction.num_bids(), 16);
        claim_eq!(auction.num_live_bids(), 15);
        claim_eq!(auction.min_bid_slot_index, Some(0));

        let view = |host: &TestHost<State<TestStateApi>>, bid_id: BidId| {
            let bytes = to_bytes(&BidViewParams {
                project: PROJECT,
                bid_id,
            });
            let ctx = receive_ctx(ADMIN, START + 1, &bytes);
            get_bid(&ctx, host).expect_report("Bid should exist")
        };
        let evicted = view(&host, 1);
        claim!(!evicted.is_live);
        claim_eq!(evicted.bid.bidder, bidder(0));
        let newest = view(&host, 16);
        claim!(newest.is_live);
        claim_eq!(newest.value, Amount::from_micro_ccd(1_031_250));
        claim!(view(&host, 2).is_live);
    }

    #[concordium_test]
    fn test_limit_in_admin_window_forces_refund() {
        let mut host = auction_host(15, true);
        for n in 0..15 {
            claim_eq!(bid(&mut host, bidder(n), 0, START), Ok(()));
        }
        claim_eq!(
            auction_state(&host, END),
            AuctionState::PostAuctionSellOutAdminArtistMint
        );

        let bytes = to_bytes(&MaxInvocationsParams {
            project: PROJECT,
            max_invocations: 14,
        });
        let ctx = receive_ctx(ARTIST, END, &bytes);
        let mut logger = TestLogger::init();
        claim_eq!(
            manually_limit_project_max_invocations(&ctx, &mut host, &mut logger),
            Ok(())
        );

        let bytes = to_bytes(&PROJECT);
        let ctx = receive_ctx(ADMIN, END, &bytes);
        claim_eq!(
            get_is_error_e1(&ctx, &host),
            Ok(ErrorE1View {
                is_error: true,
                num_bids_to_refund: 1,
            })
        );

        let refund_bytes = to_bytes(&AutoRefundParams {
            project: PROJECT,
            num_bids: 1,
        });
        let refund_ctx = receive_ctx(ADMIN, END, &refund_bytes);
        let mut logger = TestLogger::init();
        claim_eq!(
            admin_auto_refund_winners(&refund_ctx, &mut host, &mut logger),
            Ok(())
        );
        claim!(host.transfer_occurred(&bidder(14), Amount::from_ccd(1)));
        claim_eq!(
            logger.logs,
            vec![to_bytes(&RamMinterEvent::refunded(
                PROJECT,
                15,
                bidder(14),
                Amount::from_ccd(1)
            ))]
        );
        claim_eq!(
            get_is_error_e1(&ctx, &host),
            Ok(ErrorE1View {
                is_error: false,
                num_bids_to_refund: 0,
            })
        );

        let bytes = bid_ids_params(&[15]);
        let ctx = receive_ctx(ADMIN, END, &bytes);
        let mut logger = TestLogger::init();
        claim_eq!(
            admin_artist_direct_mint_tokens_to_winners(&ctx, &mut host, &mut logger),
            Err(CustomContractError::BidAlreadyResolved.into())
        );
        claim_eq!(auto_mint(&mut host, ADMIN, 14, END), Ok(()));
        claim_eq!(auction_state(&host, END), AuctionState::PostAuctionAllBidsHandled);
    }

    #[concordium_test]
    fn test_auction_length_changes() {
        let mut host = auction_host(3, false);

        let bytes = to_bytes(&EmergencyHoursParams {
            project: PROJECT,
            hours: 2,
        });
        let ctx = receive_ctx(ARTIST, START, &bytes);
        let mut logger = TestLogger::init();
        claim_eq!(
            admin_add_emergency_auction_hours(&ctx, &mut host, &mut logger),
            Err(CustomContractError::Unauthorized.into())
        );
        let ctx = receive_ctx(ADMIN, START, &bytes);
        claim_eq!(
            admin_add_emergency_auction_hours(&ctx, &mut host, &mut logger),
            Ok(())
        );
        let extended_end = END + 2 * 60 * 60 * 1000;
        claim_eq!(
            auction(&host).timestamp_end,
            Timestamp::from_timestamp_millis(extended_end)
        );

        let bytes = to_bytes(&ReduceAuctionLengthParams {
            project: PROJECT,
            timestamp_end: Timestamp::from_timestamp_millis(END),
        });
        let ctx = receive_ctx(ADMIN, START, &bytes);
        let mut logger = TestLogger::init();
        claim_eq!(
            reduce_auction_length(&ctx, &mut host, &mut logger),
            Err(CustomContractError::OnlyArtist.into())
        );
        let ctx = receive_ctx(ARTIST, START, &bytes);
        claim_eq!(reduce_auction_length(&ctx, &mut host, &mut logger), Ok(()));
        claim_eq!(auction_state(&host, END), AuctionState::PostAuctionAllBidsHandled);

        let ctx = receive_ctx(ARTIST, END, &bytes);
        claim_eq!(
            reduce_auction_length(&ctx, &mut host, &mut logger),
            Err(CustomContractError::OnlyPreOrLiveAuction.into())
        );
    }

    #[concordium_test]
    fn test_update_internal_value() {
        let mut host = default_host(15);

        let bytes = to_bytes(&InternalValue::PlatformShare(Percentage::from_percent(20)));
        let ctx = receive_ctx(bidder(0), 0, &bytes);
        claim_eq!(
            update_internal_value(&ctx, &mut host),
            Err(CustomContractError::Unauthorized.into())
        );
        let ctx = receive_ctx(MAINTAINER, 0, &bytes);
        claim_eq!(update_internal_value(&ctx, &mut host), Ok(()));

        let bytes = to_bytes(&InternalValue::PlatformShare(Percentage::from_percent(101)));
        let ctx = receive_ctx(MAINTAINER, 0, &bytes);
        claim_eq!(
            update_internal_value(&ctx, &mut host),
            Err(CustomContractError::InvalidPercentage.into())
        );

        let bytes = to_bytes(&ViewInternalValueParams::PlatformShare);
        let ctx = receive_ctx(bidder(0), 0, &bytes);
        let value = view_internal_value(&ctx, &host).expect_report("View should succeed");
        claim!(matches!(value, InternalValue::PlatformShare(share) if share == Percentage::from_percent(20)));
    }
}
