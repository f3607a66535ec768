use chrono::NaiveDateTime;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::config::Property;
use crate::error::{PayoutError, Result};

/// A rent payment collected by the agency for one property
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RentReceipt {
    pub id: String,
    pub property_id: String,
    pub total_amount: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commission_amount: Option<Decimal>,
    pub payment_date: NaiveDateTime,
}

impl RentReceipt {
    /// Build a receipt, rejecting amounts that break `0 <= commission <= total`
    pub fn new(
        id: String,
        property_id: String,
        total_amount: Decimal,
        commission_amount: Option<Decimal>,
        payment_date: NaiveDateTime,
    ) -> Result<Self> {
        let receipt = Self {
            id,
            property_id,
            total_amount,
            commission_amount,
            payment_date,
        };
        receipt.validate()?;
        Ok(receipt)
    }

    /// Check `total > 0` and `0 <= commission <= total`
    pub fn validate(&self) -> Result<()> {
        if self.total_amount <= Decimal::ZERO {
            return Err(PayoutError::InvalidReceiptAmount);
        }
        if let Some(commission) = self.commission_amount {
            if commission.is_sign_negative() || commission > self.total_amount {
                return Err(PayoutError::InvalidCommission {
                    commission,
                    total: self.total_amount,
                });
            }
        }
        Ok(())
    }

    /// Commission kept by the agency, zero when none was recorded
    pub fn commission(&self) -> Decimal {
        self.commission_amount.unwrap_or(Decimal::ZERO)
    }
}

/// Commission owed on `total` at `rate`, rounded half away from zero
pub fn derive_commission(total: Decimal, rate: Decimal, decimals: u32) -> Result<Decimal> {
    let commission = total
        .checked_mul(rate)
        .ok_or(PayoutError::AmountOverflow)?;
    Ok(commission.round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero))
}

/// All receipts collected on properties belonging to `owner_id`
pub fn receipts_for_owner<'a>(
    properties: &HashMap<String, Property>,
    receipts: &'a [RentReceipt],
    owner_id: &str,
) -> Vec<&'a RentReceipt> {
    receipts
        .iter()
        .filter(|r| {
            properties
                .get(&r.property_id)
                .is_some_and(|p| p.owner == owner_id)
        })
        .collect()
}
