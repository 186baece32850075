use super::*;
use concordium_cis2::TokenIdU64;

/// Project number inside a core token contract.
pub type ProjectId = u32;

/// Identifier of a bid, unique within one auction. Ids start at 1.
pub type BidId = u32;

/// Token identifier handed out by core token contracts.
pub type ContractTokenId = TokenIdU64;

/// Key of every per-project record kept by the minter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, SchemaType)]
pub struct ProjectKey {
    /// Core token contract the project lives on.
    pub core: ContractAddress,
    pub project_id: ProjectId,
}
