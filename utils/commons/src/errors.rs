use super::*;

/// The custom errors the contract can produce.
#[derive(Serialize, Debug, PartialEq, Eq, Reject, SchemaType)]
pub enum CustomContractError {
    /// Failed parsing the parameter (Error code: -1).
    #[from(ParseError)]
    ParseParams,
    /// Failed logging: Log is full (Error code: -2).
    LogFull,
    /// Failed logging: Log is malformed (Error code: -3).
    LogMalformed,
    /// Failed to invoke a contract (Error code: -4).
    InvokeContractError,
    /// Failed to invoke a transfer (Error code: -5).
    InvokeTransferError,
    /// Collaborator answered with an unexpected return value (Error code: -6).
    Incompatible,
    /// Sender lacks the required authority (Error code: -7).
    Unauthorized,
    /// Only account addresses may bid or claim (Error code: -8).
    OnlyAccountAddress,
    /// Only the project artist has access (Error code: -9).
    OnlyArtist,
    /// Only the owner of the bid has access (Error code: -10).
    OnlyBidder,
    /// The minter is already executing a call (Error code: -11).
    ReentrantCall,
    /// The minter filter has no minter for the project (Error code: -12).
    NoMinterAssigned,
    /// The minter filter assigned another minter to the project (Error code: -13).
    MinterNotActive,
    /// No auction is configured for the project (Error code: -14).
    UnknownAuction,
    /// Operation needs a live auction (Error code: -15).
    OnlyLiveAuction,
    /// Operation needs an ended auction (Error code: -16).
    OnlyPostAuction,
    /// Operation needs an ended auction past the admin/artist-only mint
    /// window (Error code: -17).
    OnlyPostAuctionOpenMint,
    /// Operation needs an auction that has not ended (Error code: -18).
    OnlyPreOrLiveAuction,
    /// Operation needs more pending bids than mintable tokens (Error code: -19).
    OnlyErrorE1,
    /// Operation is blocked while pending bids exceed mintable tokens
    /// (Error code: -20).
    OnlyNonErrorState,
    /// Auction already started and can no longer be configured (Error code: -21).
    AuctionAlreadyStarted,
    /// Base price cannot back the slot ladder (Error code: -22).
    InvalidBasePrice,
    /// Slot index is not below 512 (Error code: -23).
    SlotOutOfRange,
    /// Sent amount differs from the required value (Error code: -24).
    ValueMismatch,
    /// Bid does not beat the required value (Error code: -25).
    InsufficientBidValue,
    /// No tokens can be auctioned (Error code: -26).
    NoTokensInAuction,
    /// No tokens are left for purchase (Error code: -27).
    NoTokensAvailable,
    /// Auction holds no bids (Error code: -28).
    NoBidsInAuction,
    /// Requested more mints than pending bids (Error code: -29).
    TooManyTokensToMint,
    /// Requested more refunds than the error deficit (Error code: -30).
    TooManyBidsToRefund,
    /// Bid does not exist or was outbid (Error code: -31).
    InvalidBidId,
    /// Bid was already minted or refunded (Error code: -32).
    BidAlreadyResolved,
    /// Timestamps are out of order or in the past (Error code: -33).
    InvalidTimestamps,
    /// Duration is too short or too long (Error code: -34).
    InvalidDuration,
    /// Max invocations outside the allowed range (Error code: -35).
    InvalidMaxInvocations,
    /// Admin/artist-only mint period setting conflicts with the project
    /// constraint (Error code: -36).
    AdminMintConstraintViolated,
    /// Revenues were already withdrawn (Error code: -37).
    RevenuesAlreadyCollected,
    /// Project balance cannot cover the payout (Error code: -38).
    InsufficientProjectBalance,
    /// Caller has no pending payout (Error code: -39).
    NothingToClaim,
    /// Share is above 100% (Error code: -40).
    InvalidPercentage,
    /// Operation is not allowed while the auction is live (Error code: -41).
    AuctionLive,
}

/// Mapping the logging errors to CustomContractError.
impl From<LogError> for CustomContractError {
    fn from(le: LogError) -> Self {
        match le {
            LogError::Full => Self::LogFull,
            LogError::Malformed => Self::LogMalformed,
        }
    }
}

/// Mapping errors related to contract invocations to CustomContractError.
impl<T> From<CallContractError<T>> for CustomContractError {
    fn from(_cce: CallContractError<T>) -> Self {
        Self::InvokeContractError
    }
}

/// Mapping errors related to transfers to CustomContractError.
impl From<TransferError> for CustomContractError {
    fn from(_te: TransferError) -> Self {
        Self::InvokeTransferError
    }
}

/// Failure of a call to a collaborator contract that returns a value.
#[derive(Debug)]
pub enum ContractReadError<R> {
    Call(CallContractError<R>),
    Compatibility,
    Parse,
}

impl<R> From<ContractReadError<R>> for CustomContractError {
    fn from(error: ContractReadError<R>) -> Self {
        match error {
            ContractReadError::Call(_) => Self::InvokeContractError,
            ContractReadError::Compatibility | ContractReadError::Parse => Self::Incompatible,
        }
    }
}

#[concordium_cfg_test]
mod tests {
    use super::*;

    fn error_code(error: CustomContractError) -> i32 {
        Reject::from(error).error_code.into()
    }

    #[concordium_test]
    fn test_error_codes_follow_declaration_order() {
        claim_eq!(error_code(CustomContractError::ParseParams), -1);
        claim_eq!(error_code(CustomContractError::UnknownAuction), -14);
        claim_eq!(error_code(CustomContractError::OnlyLiveAuction), -15);
        claim_eq!(error_code(CustomContractError::OnlyPreOrLiveAuction), -18);
        claim_eq!(error_code(CustomContractError::InvalidMaxInvocations), -35);
        claim_eq!(error_code(CustomContractError::AuctionLive), -41);
    }
}
