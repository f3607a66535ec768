mod calculator;
mod fees;
mod generator;
mod period;
mod receipt;
mod recorder;

pub use calculator::{compute, GenerationBlock, ReversalDetails};
pub use fees::{DeductibleFee, FeeCategory, FeeLedger};
pub use generator::{generate_reversal, preview_reversal, PaymentDetails};
pub use period::{filter_period, Period};
pub use receipt::{derive_commission, receipts_for_owner, RentReceipt};
pub use recorder::{
    audit_notes, LedgerRecorder, OwnerTransaction, PaymentMethod, PayoutRecorder, PayoutRequest,
};
