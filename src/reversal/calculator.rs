use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;

use super::fees::DeductibleFee;
use super::period::Period;
use super::receipt::RentReceipt;
use crate::error::{PayoutError, Result};
use crate::money::checked_sum;

/// Snapshot of what an owner is owed for a period
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReversalDetails {
    pub period: Period,
    pub total_rent: Decimal,
    pub total_commission: Decimal,
    pub total_fees: Decimal,
    pub net_amount: Decimal,
    pub payments_count: usize,
    pub fees: Vec<DeductibleFee>,
}

/// Why a reversal cannot be generated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationBlock {
    NoPayments,
    NonPositiveBalance,
}

impl fmt::Display for GenerationBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerationBlock::NoPayments => {
                write!(f, "no rent payments were received in the selected period")
            }
            GenerationBlock::NonPositiveBalance => write!(
                f,
                "commission and fees leave nothing to pay (net amount is not positive)"
            ),
        }
    }
}

impl ReversalDetails {
    /// `None` when the payout may be generated
    pub fn generation_block(&self) -> Option<GenerationBlock> {
        if self.payments_count == 0 {
            Some(GenerationBlock::NoPayments)
        } else if self.net_amount <= Decimal::ZERO {
            Some(GenerationBlock::NonPositiveBalance)
        } else {
            None
        }
    }

    pub fn can_generate(&self) -> bool {
        self.generation_block().is_none()
    }
}

/// Totals for the receipts already selected for `period`, less `fees`.
/// Fails with `AmountOverflow` rather than wrapping or panicking.
pub fn compute<'a, I>(
    period: Period,
    period_receipts: I,
    fees: &[DeductibleFee],
) -> Result<ReversalDetails>
where
    I: IntoIterator<Item = &'a RentReceipt>,
{
    let mut total_rent = Decimal::ZERO;
    let mut total_commission = Decimal::ZERO;
    let mut payments_count = 0;

    for receipt in period_receipts {
        total_rent = total_rent
            .checked_add(receipt.total_amount)
            .ok_or(PayoutError::AmountOverflow)?;
        total_commission = total_commission
            .checked_add(receipt.commission())
            .ok_or(PayoutError::AmountOverflow)?;
        payments_count += 1;
    }

    let total_fees = checked_sum(fees.iter().map(|f| f.amount))?;
    let net_amount = total_rent
        .checked_sub(total_commission)
        .and_then(|v| v.checked_sub(total_fees))
        .ok_or(PayoutError::AmountOverflow)?;

    Ok(ReversalDetails {
        period,
        total_rent,
        total_commission,
        total_fees,
        net_amount,
        payments_count,
        fees: fees.to_vec(),
    })
}
