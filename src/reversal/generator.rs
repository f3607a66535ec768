use chrono::NaiveDate;

use super::calculator::{compute, ReversalDetails};
use super::fees::FeeLedger;
use super::period::{filter_period, Period};
use super::receipt::RentReceipt;
use super::recorder::{OwnerTransaction, PaymentMethod, PayoutRecorder, PayoutRequest};
use crate::error::{PayoutError, Result};

/// How the owner is being paid
#[derive(Debug, Clone)]
pub struct PaymentDetails {
    pub method: PaymentMethod,
    pub reference: Option<String>,
    pub notes: Option<String>,
    pub date: NaiveDate,
}

/// Compute the reversal of `draft`'s owner for `period` from that owner's
/// receipts, without recording anything.
pub fn preview_reversal<'a, I>(
    owner_receipts: I,
    draft: &FeeLedger,
    period: Period,
) -> Result<ReversalDetails>
where
    I: IntoIterator<Item = &'a RentReceipt>,
{
    if period.is_inverted() {
        log::warn!("Period end {} is before start {}", period.end_date, period.start_date);
    }
    let selected = filter_period(owner_receipts, &period);
    log::debug!(
        "{} receipt(s) in {} for '{}'",
        selected.len(),
        period,
        draft.owner()
    );
    compute(period, selected, draft.fees())
}

/// Compute, check and record a reversal. The draft's fees are cleared only
/// once the recorder has succeeded; on any failure the draft is untouched.
pub fn generate_reversal<'a, I, R>(
    recorder: &mut R,
    draft: &mut FeeLedger,
    owner_receipts: I,
    period: Period,
    payment: PaymentDetails,
) -> Result<(ReversalDetails, OwnerTransaction)>
where
    I: IntoIterator<Item = &'a RentReceipt>,
    R: PayoutRecorder,
{
    let details = preview_reversal(owner_receipts, draft, period)?;
    let owner = draft.owner().to_string();

    if let Some(reason) = details.generation_block() {
        return Err(PayoutError::GenerationBlocked { owner, reason });
    }

    let request = PayoutRequest {
        owner_id: owner.clone(),
        amount: details.net_amount,
        payment_method: payment.method,
        reference: payment.reference,
        notes: payment.notes,
        date: payment.date,
    };

    let transaction = recorder
        .record(request, &details)
        .map_err(|e| PayoutError::RecordFailed {
            owner,
            source: Box::new(e),
        })?;

    draft.clear();
    Ok((details, transaction))
}
