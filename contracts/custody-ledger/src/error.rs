use cosmwasm_std::{OverflowError, StdError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("{0}")]
    Overflow(#[from] OverflowError),

    #[error("Amount outside the allowed deposit range")]
    InvalidAmount {},

    #[error("Withdrawal exceeds deposited balance")]
    InsufficientBalance {},

    #[error("Custody transfer failed: {reason}")]
    TransferFailed { reason: String },

    #[error("Interest accrual not due yet")]
    AccrualNotDue {},

    #[error("Invalid config: {reason}")]
    InvalidConfig { reason: String },

    #[error("Unknown reply id: {id}")]
    UnknownReplyId { id: u64 },
}
