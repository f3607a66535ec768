use rust_decimal::Decimal;
use std::path::PathBuf;
use thiserror::Error;

use crate::reversal::GenerationBlock;

#[derive(Error, Debug)]
pub enum PayoutError {
    #[error("Data directory not found at {0}. Run 'payout init' to create it.")]
    DataDirNotFound(PathBuf),

    #[error("Data file not found: {0}")]
    DataFileNotFound(PathBuf),

    #[error("Failed to parse data file {path}: {source}")]
    DataParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to serialize state: {0}")]
    StateSerialize(#[from] toml::ser::Error),

    #[error("Failed to serialize JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Data directory already exists at {0}")]
    AlreadyInitialized(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Owner '{0}' not found in owners.toml")]
    OwnerNotFound(String),

    #[error("Property '{0}' not found in properties.toml")]
    PropertyNotFound(String),

    #[error("Property '{property}' refers to unknown owner '{owner}'")]
    UnknownPropertyOwner { property: String, owner: String },

    #[error("Invalid date '{0}'. Expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Receipt amount must be greater than zero")]
    InvalidReceiptAmount,

    #[error("Commission {commission} cannot be negative or exceed the rent collected ({total})")]
    InvalidCommission { commission: Decimal, total: Decimal },

    #[error("Receipt '{id}' in state.toml is invalid: {source}")]
    InvalidStoredReceipt {
        id: String,
        #[source]
        source: Box<PayoutError>,
    },

    #[error("Amounts are too large to total exactly")]
    AmountOverflow,

    #[error("Cannot generate reversal for '{owner}': {reason}")]
    GenerationBlocked {
        owner: String,
        reason: GenerationBlock,
    },

    #[error("Failed to record payout for '{owner}' (nothing was committed, retry the command): {source}")]
    RecordFailed {
        owner: String,
        #[source]
        source: Box<PayoutError>,
    },

    #[error("Payout {payout} was recorded but the fee draft could not be cleared; remove its fees with 'payout fee remove' before the next reversal: {source}")]
    DraftNotCleared {
        payout: String,
        #[source]
        source: Box<PayoutError>,
    },
}

pub type Result<T> = std::result::Result<T, PayoutError>;
