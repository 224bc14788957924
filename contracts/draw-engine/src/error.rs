use cosmwasm_std::StdError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("unauthorized: {reason}")]
    Unauthorized { reason: String },

    #[error("no draw is held on {date} (sunday)")]
    NoDraw { date: String },

    #[error("category {category} does not match a {weekday} draw date")]
    CategoryMismatch { category: String, weekday: String },

    #[error("draw already executed for {category} on {date}")]
    DuplicateDraw { category: String, date: String },

    #[error("no eligible subscribers in pool of {pool_size}")]
    NoEligibleSubscribers { pool_size: u32 },

    #[error("duplicate msisdn in pool: {msisdn}")]
    DuplicateSubscriber { msisdn: String },

    #[error("invalid randomness: {reason}")]
    InvalidRandomness { reason: String },

    #[error("invalid prize structure: {reason}")]
    InvalidPrizeStructure { reason: String },

    #[error("invariant violation: {reason}")]
    InvariantViolation { reason: String },
}
