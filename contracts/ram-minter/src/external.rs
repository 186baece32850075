//! Entrypoint parameters, views and collaborator wire types.
use crate::{auction::AuctionState, bid_book::Bid};
use commons::{BidId, CustomContractError, Percentage, ProjectId, ProjectKey};
use concordium_std::*;

#[derive(Debug, Clone, SchemaType, Serialize)]
pub struct InitParams {
    /// Contract assigning minters to projects.
    pub minter_filter: ContractAddress,
    /// Receiver of the platform share of revenues.
    pub platform_beneficiary: AccountAddress,
    /// Platform share of revenues.
    pub platform_share: Percentage,
}

#[derive(Debug, Clone, SchemaType, Serialize)]
pub struct SetAuctionDetailsParams {
    pub project: ProjectKey,
    pub timestamp_start: Timestamp,
    pub timestamp_end: Timestamp,
    pub base_price: Amount,
    /// Bids in the last minutes of a sold out auction extend it.
    pub allow_extra_time: bool,
    /// A sold out auction is followed by an admin/artist-only mint window.
    pub admin_artist_only_mint_period_if_sellout: bool,
}

#[derive(Debug, Clone, SchemaType, Serialize)]
pub struct CreateBidParams {
    pub project: ProjectKey,
    pub slot_index: u16,
}

#[derive(Debug, Clone, SchemaType, Serialize)]
pub struct TopUpBidParams {
    pub project: ProjectKey,
    pub bid_id: BidId,
    pub new_slot_index: u16,
}

#[derive(Debug, Clone, SchemaType, Serialize)]
pub struct BidIdsParams {
    pub project: ProjectKey,
    pub bid_ids: Vec<BidId>,
}

#[derive(Debug, Clone, SchemaType, Serialize)]
pub struct AutoMintParams {
    pub project: ProjectKey,
    pub num_tokens: u32,
}

#[derive(Debug, Clone, SchemaType, Serialize)]
pub struct AutoRefundParams {
    pub project: ProjectKey,
    pub num_bids: u32,
}

#[derive(Debug, Clone, SchemaType, Serialize)]
pub struct PurchaseToParams {
    pub project: ProjectKey,
    pub to: AccountAddress,
}

#[derive(Debug, Clone, SchemaType, Serialize)]
pub struct ContractConfigParams {
    pub project: ProjectKey,
    pub admin_mint_constraint: AdminMintConstraint,
}

#[derive(Debug, Clone, SchemaType, Serialize)]
pub struct MaxInvocationsParams {
    pub project: ProjectKey,
    pub max_invocations: u64,
}

#[derive(Debug, Clone, SchemaType, Serialize)]
pub struct EmergencyHoursParams {
    pub project: ProjectKey,
    pub hours: u32,
}

#[derive(Debug, Clone, SchemaType, Serialize)]
pub struct ReduceAuctionLengthParams {
    pub project: ProjectKey,
    pub timestamp_end: Timestamp,
}

#[derive(Debug, Clone, SchemaType, Serialize)]
pub struct BidViewParams {
    pub project: ProjectKey,
    pub bid_id: BidId,
}

#[derive(Debug, Clone, SchemaType, Serialize)]
pub struct SlotValueParams {
    pub base_price: Amount,
    pub slot_index: u16,
}

/// Admin imposed rule on the admin/artist-only mint window of a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, SchemaType, Serialize)]
pub enum AdminMintConstraint {
    Unconstrained,
    RequireAdminArtistOnlyMintPeriod,
    ForbidAdminArtistOnlyMintPeriod,
}

impl Default for AdminMintConstraint {
    fn default() -> Self {
        Self::Unconstrained
    }
}

impl AdminMintConstraint {
    pub fn check(&self, admin_artist_only_mint_period: bool) -> Result<(), CustomContractError> {
        let allowed = match self {
            Self::Unconstrained => true,
            Self::RequireAdminArtistOnlyMintPeriod => admin_artist_only_mint_period,
            Self::ForbidAdminArtistOnlyMintPeriod => !admin_artist_only_mint_period,
        };
        ensure!(allowed, CustomContractError::AdminMintConstraintViolated);
        Ok(())
    }
}

#[derive(Debug, Clone, SchemaType, Serialize)]
pub enum InternalValue {
    MinterFilter(ContractAddress),
    PlatformBeneficiary(AccountAddress),
    PlatformShare(Percentage),
}

#[derive(Debug, Clone, SchemaType, Serialize)]
pub enum ViewInternalValueParams {
    MinterFilter,
    PlatformBeneficiary,
    PlatformShare,
}

#[derive(Debug, Clone, PartialEq, Eq, SchemaType, Serialize)]
pub struct AuctionDetailsView {
    pub state: AuctionState,
    pub timestamp_start: Timestamp,
    pub timestamp_end: Timestamp,
    pub base_price: Amount,
    pub num_tokens_in_auction: u32,
    pub num_bids: u32,
    pub num_live_bids: u32,
    pub num_bids_minted_tokens: u32,
    pub num_bids_error_refunded: u32,
    pub min_bid_slot_index: Option<u16>,
    pub allow_extra_time: bool,
    pub admin_artist_only_mint_period_if_sellout: bool,
    pub revenues_collected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, SchemaType, Serialize)]
pub struct BidView {
    pub bid: Bid,
    /// Value paid for the bid's current slot.
    pub value: Amount,
    /// False once the bid was outbid.
    pub is_live: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, SchemaType, Serialize)]
pub struct MinimumNextBidView {
    pub slot_index: u16,
    pub value: Amount,
}

#[derive(Debug, Clone, PartialEq, Eq, SchemaType, Serialize)]
pub struct ErrorE1View {
    pub is_error: bool,
    pub num_bids_to_refund: u32,
}

/// Parameter of the core `mintTo` entrypoint.
#[derive(Debug, Clone, SchemaType, Serialize)]
pub struct MintToParams {
    pub project_id: ProjectId,
    pub to: AccountAddress,
}

/// Return value of the core `projectSupply` entrypoint.
#[derive(Debug, Clone, PartialEq, Eq, SchemaType, Serialize)]
pub struct ProjectSupply {
    pub invocations: u64,
    pub max_invocations: u64,
}

/// Parameter of the minter filter `getMinterForProject` entrypoint.
#[derive(Debug, Clone, SchemaType, Serialize)]
pub struct MinterForProjectParams {
    pub core: ContractAddress,
    pub project_id: ProjectId,
}
