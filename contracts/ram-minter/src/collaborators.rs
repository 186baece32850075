//! Calls to the contracts and accounts the minter works with.
use crate::{
    external::{MintToParams, MinterForProjectParams, ProjectSupply},
    state::State,
};
use commons::{ContractReadError, ContractTokenId, ProjectId, ProjectKey};
use concordium_std::*;

/// Core token contract holding the projects.
pub trait TokenMinter<S>: HasHost<S> {
    fn mint_to(
        &mut self,
        core: &ContractAddress,
        project_id: ProjectId,
        to: &AccountAddress,
    ) -> Result<ContractTokenId, ContractReadError<Self::ReturnValueType>> {
        let (_, result) = self
            .invoke_contract(
                core,
                &MintToParams {
                    project_id,
                    to: *to,
                },
                EntrypointName::new_unchecked("mintTo"),
                Amount::zero(),
            )
            .map_err(ContractReadError::Call)?;
        let mut result = result.ok_or(ContractReadError::Compatibility)?;

        ContractTokenId::deserial(&mut result).map_err(|_| ContractReadError::Parse)
    }

    fn project_supply(
        &self,
        core: &ContractAddress,
        project_id: ProjectId,
    ) -> Result<ProjectSupply, ContractReadError<Self::ReturnValueType>> {
        let mut result = self
            .invoke_contract_read_only(
                core,
                &project_id,
                EntrypointName::new_unchecked("projectSupply"),
                Amount::zero(),
            )
            .map_err(ContractReadError::Call)?
            .ok_or(ContractReadError::Compatibility)?;

        ProjectSupply::deserial(&mut result).map_err(|_| ContractReadError::Parse)
    }

    fn project_artist(
        &self,
        core: &ContractAddress,
        project_id: ProjectId,
    ) -> Result<AccountAddress, ContractReadError<Self::ReturnValueType>> {
        let mut result = self
            .invoke_contract_read_only(
                core,
                &project_id,
                EntrypointName::new_unchecked("projectArtist"),
                Amount::zero(),
            )
            .map_err(ContractReadError::Call)?
            .ok_or(ContractReadError::Compatibility)?;

        AccountAddress::deserial(&mut result).map_err(|_| ContractReadError::Parse)
    }
}

impl<S, H: HasHost<S>> TokenMinter<S> for H {}

/// Minter filter deciding which minter serves a project.
pub trait MinterAuthority<S>: HasHost<S> {
    fn minter_for_project(
        &self,
        minter_filter: &ContractAddress,
        project: &ProjectKey,
    ) -> Result<Option<ContractAddress>, ContractReadError<Self::ReturnValueType>> {
        let mut result = self
            .invoke_contract_read_only(
                minter_filter,
                &MinterForProjectParams {
                    core: project.core,
                    project_id: project.project_id,
                },
                EntrypointName::new_unchecked("getMinterForProject"),
                Amount::zero(),
            )
            .map_err(ContractReadError::Call)?
            .ok_or(ContractReadError::Compatibility)?;

        <Option<ContractAddress>>::deserial(&mut result).map_err(|_| ContractReadError::Parse)
    }
}

impl<S, H: HasHost<S>> MinterAuthority<S> for H {}

/// How a payment reached its recipient.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    Transferred,
    /// Transfer failed; the amount waits in the recipient's pending payout.
    Credited,
}

/// Artist and platform parts of a revenue payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevenueSplit {
    pub artist_share: Amount,
    pub artist_delivery: Delivery,
    pub platform_share: Amount,
    pub platform_delivery: Delivery,
}

/// Outgoing CCD of the minter. Payments never fail: a rejected transfer is
/// credited to the recipient instead.
pub trait PaymentSplitter<S: HasStateApi>: HasHost<State<S>, StateApiType = S> {
    fn pay(&mut self, recipient: &AccountAddress, amount: Amount) -> Delivery {
        if amount == Amount::zero() {
            return Delivery::Transferred;
        }
        match self.invoke_transfer(recipient, amount) {
            Ok(()) => Delivery::Transferred,
            Err(_) => {
                self.state_mut().credit_pending_payout(*recipient, amount);
                Delivery::Credited
            }
        }
    }

    /// Pays `amount` to the artist minus the platform share, which goes to
    /// the platform beneficiary.
    fn split_revenues(&mut self, artist: &AccountAddress, amount: Amount) -> RevenueSplit {
        let (platform_share, artist_share) = self.state().platform_share.split(amount);
        let beneficiary = self.state().platform_beneficiary;

        RevenueSplit {
            artist_share,
            artist_delivery: self.pay(artist, artist_share),
            platform_share,
            platform_delivery: self.pay(&beneficiary, platform_share),
        }
    }
}

impl<S: HasStateApi, H: HasHost<State<S>, StateApiType = S>> PaymentSplitter<S> for H {}
