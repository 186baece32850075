use crate::{
    auction::Auction,
    bid_book::BidStore,
    external::{AdminMintConstraint, InitParams},
};
use commons::{Authority, CustomContractError, Percentage, ProjectKey};
use concordium_std::*;

/// Minter settings of one project.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, SchemaType)]
pub struct ProjectConfig {
    /// Artist imposed limit below the core contract's max invocations.
    /// `None` follows the core contract.
    pub max_invocations: Option<u64>,
    pub admin_mint_constraint: AdminMintConstraint,
}

#[derive(Serial, DeserialWithState)]
#[concordium(state_parameter = "S")]
pub struct State<S: HasStateApi> {
    pub authority: Authority<S>,
    /// Contract assigning minters to projects.
    pub minter_filter: ContractAddress,
    pub platform_beneficiary: AccountAddress,
    pub platform_share: Percentage,
    pub projects: StateMap<ProjectKey, ProjectConfig, S>,
    pub auctions: StateMap<ProjectKey, Auction, S>,
    /// Bid records and slot lists of all auctions.
    pub bids: BidStore<S>,
    /// Payments that failed to transfer, claimable by their recipient.
    pub pending_payouts: StateMap<AccountAddress, Amount, S>,
    /// Set while an entrypoint that calls out is executing.
    pub locked: bool,
}

impl<S: HasStateApi> State<S> {
    pub fn new(state_builder: &mut StateBuilder<S>, origin: AccountAddress, params: InitParams) -> Self {
        Self {
            authority: Authority::new(state_builder, Address::Account(origin)),
            minter_filter: params.minter_filter,
            platform_beneficiary: params.platform_beneficiary,
            platform_share: params.platform_share,
            projects: state_builder.new_map(),
            auctions: state_builder.new_map(),
            bids: BidStore::new(state_builder),
            pending_payouts: state_builder.new_map(),
            locked: false,
        }
    }

    pub fn auction(&self, project: &ProjectKey) -> Result<Auction, CustomContractError> {
        self.auctions
            .get(project)
            .map(|auction| auction.clone())
            .ok_or(CustomContractError::UnknownAuction)
    }

    pub fn store_auction(&mut self, project: ProjectKey, auction: Auction) {
        self.auctions.insert(project, auction);
    }

    pub fn project_config(&self, project: &ProjectKey) -> ProjectConfig {
        self.projects
            .get(project)
            .map(|config| config.clone())
            .unwrap_or_default()
    }

    pub fn update_project_config<F: FnOnce(&mut ProjectConfig)>(&mut self, project: ProjectKey, f: F) {
        let mut config = self.project_config(&project);
        f(&mut config);
        self.projects.insert(project, config);
    }

    pub fn credit_pending_payout(&mut self, recipient: AccountAddress, amount: Amount) {
        let mut pending = self
            .pending_payouts
            .entry(recipient)
            .or_insert_with(Amount::zero);
        *pending += amount;
    }

    pub fn pending_payout(&self, account: &AccountAddress) -> Amount {
        self.pending_payouts
            .get(account)
            .map(|amount| *amount)
            .unwrap_or_else(Amount::zero)
    }

    pub fn take_pending_payout(&mut self, account: &AccountAddress) -> Result<Amount, CustomContractError> {
        self.pending_payouts
            .remove_and_get(account)
            .filter(|amount| *amount > Amount::zero())
            .ok_or(CustomContractError::NothingToClaim)
    }
}
