use crate::CustomContractError;
use concordium_std::*;

/// Access list of the minter.
///
/// Admins may configure any project and update both lists. Maintainers may
/// change the runtime configuration of the minter and the maintainer list.
/// The admin list never becomes empty.
#[derive(Serial, DeserialWithState)]
#[concordium(state_parameter = "S")]
pub struct Authority<S: HasStateApi> {
    admins: StateSet<Address, S>,
    maintainers: StateSet<Address, S>,
}

impl<S: HasStateApi> Authority<S> {
    pub fn new(state_builder: &mut StateBuilder<S>, admin: Address) -> Self {
        let mut admins = state_builder.new_set();
        admins.insert(admin);
        Self {
            admins,
            maintainers: state_builder.new_set(),
        }
    }

    pub fn has_admin_rights(&self, address: &Address) -> bool {
        self.admins.contains(address)
    }

    pub fn has_maintainer_rights(&self, address: &Address) -> bool {
        self.maintainers.contains(address) || self.has_admin_rights(address)
    }

    pub fn handle_update(
        &mut self,
        sender: Address,
        update: AuthorityUpdateParams,
    ) -> Result<(), CustomContractError> {
        let allowed = match update.field {
            AuthorityField::Maintainer => self.has_maintainer_rights(&sender),
            AuthorityField::Admin => self.has_admin_rights(&sender),
        };
        ensure!(allowed, CustomContractError::Unauthorized);

        match (update.field, update.kind) {
            (AuthorityField::Admin, AuthorityUpdateKind::Remove) => {
                let is_last_admin = self.admins.contains(&update.address)
                    && self.admins.iter().take(2).count() == 1;
                ensure!(!is_last_admin, CustomContractError::Unauthorized);
                self.admins.remove(&update.address);
            }
            (AuthorityField::Admin, AuthorityUpdateKind::Add) => {
                self.admins.insert(update.address);
            }
            (AuthorityField::Maintainer, AuthorityUpdateKind::Remove) => {
                self.maintainers.remove(&update.address);
            }
            (AuthorityField::Maintainer, AuthorityUpdateKind::Add) => {
                self.maintainers.insert(update.address);
            }
        }

        Ok(())
    }

    pub fn handle_view(&self, view: AuthorityViewParams) -> Vec<Address> {
        let list = match view.field {
            AuthorityField::Maintainer => &self.maintainers,
            AuthorityField::Admin => &self.admins,
        };

        list.iter()
            .skip(view.skip as usize)
            .take(view.show as usize)
            .map(|address| *address)
            .collect()
    }
}

#[derive(Debug, Clone, Copy, SchemaType, Serialize)]
pub enum AuthorityField {
    Maintainer,
    Admin,
}

#[derive(Debug, Clone, Copy, SchemaType, Serialize)]
pub enum AuthorityUpdateKind {
    Remove,
    Add,
}

#[derive(Debug, SchemaType, Serialize)]
pub struct AuthorityUpdateParams {
    pub field: AuthorityField,
    pub kind: AuthorityUpdateKind,
    pub address: Address,
}

#[derive(Debug, SchemaType, Serialize)]
pub struct AuthorityViewParams {
    pub field: AuthorityField,
    pub skip: u32,
    pub show: u32,
}

#[concordium_cfg_test]
mod tests {
    use super::*;
    use concordium_std::test_infrastructure::*;

    const ADMIN: Address = Address::Account(AccountAddress([1; 32]));
    const MAINTAINER: Address = Address::Account(AccountAddress([2; 32]));
    const ADMIN_CONTRACT: Address = Address::Contract(ContractAddress {
        index: 1,
        subindex: 0,
    });
    const USER: Address = Address::Account(AccountAddress([16; 32]));

    fn default_authority() -> Authority<TestStateApi> {
        let mut state_builder = TestStateBuilder::new();
        let mut authority = Authority::new(&mut state_builder, ADMIN);
        authority.maintainers.insert(MAINTAINER);
        authority
    }

    fn update(
        field: AuthorityField,
        kind: AuthorityUpdateKind,
        address: Address,
    ) -> AuthorityUpdateParams {
        AuthorityUpdateParams {
            field,
            kind,
            address,
        }
    }

    #[concordium_test]
    fn test_admin_manages_both_lists() {
        let mut authority = default_authority();

        let result = authority.handle_update(
            ADMIN,
            update(AuthorityField::Admin, AuthorityUpdateKind::Add, ADMIN_CONTRACT),
        );
        claim_eq!(result, Ok(()));
        claim!(authority.has_admin_rights(&ADMIN_CONTRACT));
        claim!(authority.has_maintainer_rights(&ADMIN_CONTRACT));

        let result = authority.handle_update(
            ADMIN_CONTRACT,
            update(AuthorityField::Maintainer, AuthorityUpdateKind::Add, USER),
        );
        claim_eq!(result, Ok(()));
        claim!(!authority.has_admin_rights(&USER));
        claim!(authority.has_maintainer_rights(&USER));
    }

    #[concordium_test]
    fn test_maintainer_cannot_touch_admins() {
        let mut authority = default_authority();

        let result = authority.handle_update(
            MAINTAINER,
            update(AuthorityField::Admin, AuthorityUpdateKind::Add, USER),
        );
        claim_eq!(result, Err(CustomContractError::Unauthorized));
        claim!(!authority.has_admin_rights(&USER));

        let result = authority.handle_update(
            MAINTAINER,
            update(AuthorityField::Admin, AuthorityUpdateKind::Remove, ADMIN),
        );
        claim_eq!(result, Err(CustomContractError::Unauthorized));
        claim!(authority.has_admin_rights(&ADMIN));

        let result = authority.handle_update(
            MAINTAINER,
            update(AuthorityField::Maintainer, AuthorityUpdateKind::Add, USER),
        );
        claim_eq!(result, Ok(()));
        claim!(authority.has_maintainer_rights(&USER));
    }

    #[concordium_test]
    fn test_outsider_is_unauthorized() {
        let mut authority = default_authority();

        let result = authority.handle_update(
            USER,
            update(AuthorityField::Maintainer, AuthorityUpdateKind::Remove, MAINTAINER),
        );
        claim_eq!(result, Err(CustomContractError::Unauthorized));
        claim!(authority.has_maintainer_rights(&MAINTAINER));
    }

    #[concordium_test]
    fn test_last_admin_is_kept() {
        let mut authority = default_authority();

        let result = authority.handle_update(
            ADMIN,
            update(AuthorityField::Admin, AuthorityUpdateKind::Remove, ADMIN),
        );
        claim_eq!(result, Err(CustomContractError::Unauthorized));
        claim!(authority.has_admin_rights(&ADMIN));

        authority.admins.insert(ADMIN_CONTRACT);
        let result = authority.handle_update(
            ADMIN_CONTRACT,
            update(AuthorityField::Admin, AuthorityUpdateKind::Remove, ADMIN),
        );
        claim_eq!(result, Ok(()));
        claim!(!authority.has_admin_rights(&ADMIN));
        claim!(authority.has_admin_rights(&ADMIN_CONTRACT));
    }

    #[concordium_test]
    fn test_view_pages_through_list() {
        let mut authority = default_authority();
        authority.maintainers.insert(USER);

        let all = authority.handle_view(AuthorityViewParams {
            field: AuthorityField::Maintainer,
            skip: 0,
            show: 10,
        });
        claim_eq!(all.len(), 2);
        claim!(all.contains(&MAINTAINER));
        claim!(all.contains(&USER));

        let page = authority.handle_view(AuthorityViewParams {
            field: AuthorityField::Maintainer,
            skip: 1,
            show: 10,
        });
        claim_eq!(page.len(), 1);

        let admins = authority.handle_view(AuthorityViewParams {
            field: AuthorityField::Admin,
            skip: 0,
            show: 10,
        });
        claim_eq!(admins, vec![ADMIN]);
    }
}
