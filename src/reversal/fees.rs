use chrono::{DateTime, Local};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Result;
use crate::money::checked_sum;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FeeCategory {
    /// Repairs carried out on the property
    Reparation,
    /// Recurring charges paid on the owner's behalf
    Charge,
    #[default]
    Autre,
}

impl fmt::Display for FeeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeeCategory::Reparation => write!(f, "reparation"),
            FeeCategory::Charge => write!(f, "charge"),
            FeeCategory::Autre => write!(f, "autre"),
        }
    }
}

impl FromStr for FeeCategory {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "reparation" => Ok(FeeCategory::Reparation),
            "charge" => Ok(FeeCategory::Charge),
            "autre" => Ok(FeeCategory::Autre),
            _ => Err(format!(
                "unknown fee category '{s}' (use reparation, charge or autre)"
            )),
        }
    }
}

/// An ad-hoc charge subtracted from an owner's payout
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct DeductibleFee {
    pub id: u32,
    pub description: String,
    pub amount: Decimal,
    pub date: DateTime<Local>,
    pub category: FeeCategory,
}

/// Fees gathered for one owner's next reversal.
///
/// Ids are handed out from a per-ledger sequence and never reused, so a
/// removed fee's id cannot come back and point at a different charge.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FeeLedger {
    owner: String,
    #[serde(default = "first_id")]
    next_id: u32,
    #[serde(default)]
    fees: Vec<DeductibleFee>,
}

fn first_id() -> u32 {
    1
}

impl FeeLedger {
    pub fn new(owner: &str) -> Self {
        Self {
            owner: owner.to_string(),
            next_id: first_id(),
            fees: Vec::new(),
        }
    }

    /// Reuse `previous` when it belongs to `owner`, otherwise start empty
    pub fn reopen(previous: Option<FeeLedger>, owner: &str) -> Self {
        match previous {
            Some(ledger) if ledger.owner == owner => ledger,
            Some(ledger) => {
                if !ledger.is_empty() {
                    log::info!(
                        "Discarding fee draft of '{}' ({} fee(s))",
                        ledger.owner,
                        ledger.len()
                    );
                }
                FeeLedger::new(owner)
            }
            None => FeeLedger::new(owner),
        }
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn fees(&self) -> &[DeductibleFee] {
        &self.fees
    }

    pub fn len(&self) -> usize {
        self.fees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fees.is_empty()
    }

    pub fn total(&self) -> Result<Decimal> {
        checked_sum(self.fees.iter().map(|f| f.amount))
    }

    /// Append a fee. Returns `None` and leaves the ledger untouched when the
    /// description is blank or the amount is not positive.
    pub fn add_fee(
        &mut self,
        description: &str,
        amount: Decimal,
        category: FeeCategory,
    ) -> Option<&DeductibleFee> {
        let description = description.trim();
        if description.is_empty() || amount <= Decimal::ZERO {
            log::debug!("Rejected fee '{description}' of {amount}");
            return None;
        }

        let id = self.next_id;
        self.next_id += 1;
        self.fees.push(DeductibleFee {
            id,
            description: description.to_string(),
            amount,
            date: Local::now(),
            category,
        });
        self.fees.last()
    }

    /// Remove the fee with `id`, if any
    pub fn remove_fee(&mut self, id: u32) -> Option<DeductibleFee> {
        let idx = self.fees.iter().position(|f| f.id == id)?;
        Some(self.fees.remove(idx))
    }

    pub fn clear(&mut self) {
        self.fees.clear();
    }
}
