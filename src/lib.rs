pub mod config;
pub mod error;
pub mod money;
pub mod reversal;

pub use config::{Config, Owner, Property, State};
pub use error::{PayoutError, Result};
pub use reversal::{
    compute, filter_period, generate_reversal, DeductibleFee, FeeCategory, FeeLedger,
    GenerationBlock, OwnerTransaction, PaymentMethod, Period, RentReceipt, ReversalDetails,
};
