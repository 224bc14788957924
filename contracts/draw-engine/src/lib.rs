pub mod contract;
pub mod error;
pub mod execute;
pub mod msg;
pub mod query;
pub mod selection;
pub mod state;

pub use crate::error::ContractError;
