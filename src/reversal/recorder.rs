use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use super::calculator::ReversalDetails;
use crate::config::{format_sequence, load_state, save_state, CurrencySettings};
use crate::error::Result;
use crate::money::format_money;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PaymentMethod {
    Cash,
    #[default]
    Transfer,
    Check,
    MobileMoney,
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentMethod::Cash => write!(f, "cash"),
            PaymentMethod::Transfer => write!(f, "transfer"),
            PaymentMethod::Check => write!(f, "check"),
            PaymentMethod::MobileMoney => write!(f, "mobile-money"),
        }
    }
}

impl FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "cash" => Ok(PaymentMethod::Cash),
            "transfer" => Ok(PaymentMethod::Transfer),
            "check" => Ok(PaymentMethod::Check),
            "mobile-money" | "mobile_money" => Ok(PaymentMethod::MobileMoney),
            _ => Err(format!(
                "unknown payment method '{s}' (use cash, transfer, check or mobile-money)"
            )),
        }
    }
}

/// A debit row of the owner ledger
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct OwnerTransaction {
    pub id: String,
    pub owner_id: String,
    pub amount: Decimal,
    pub payment_method: PaymentMethod,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub date: NaiveDate,
}

/// What the caller asks to pay out
#[derive(Debug, Clone)]
pub struct PayoutRequest {
    pub owner_id: String,
    pub amount: Decimal,
    pub payment_method: PaymentMethod,
    pub reference: Option<String>,
    pub notes: Option<String>,
    pub date: NaiveDate,
}

/// Persists a reversal as a ledger debit. Called at most once per reversal.
pub trait PayoutRecorder {
    fn record(
        &mut self,
        request: PayoutRequest,
        details: &ReversalDetails,
    ) -> Result<OwnerTransaction>;
}

/// Records payouts in the data directory's state.toml
pub struct LedgerRecorder {
    data_dir: PathBuf,
    number_format: String,
    currency: CurrencySettings,
}

impl LedgerRecorder {
    pub fn new(data_dir: PathBuf, number_format: String, currency: CurrencySettings) -> Self {
        Self {
            data_dir,
            number_format,
            currency,
        }
    }
}

impl PayoutRecorder for LedgerRecorder {
    fn record(
        &mut self,
        request: PayoutRequest,
        details: &ReversalDetails,
    ) -> Result<OwnerTransaction> {
        let mut state = load_state(&self.data_dir)?;

        let year = request.date.year() as u32;
        let seq = state.counter.payouts.advance(year);
        let transaction = OwnerTransaction {
            id: format_sequence(&self.number_format, year, seq),
            owner_id: request.owner_id,
            amount: request.amount,
            payment_method: request.payment_method,
            reference: request.reference,
            description: format!("Owner reversal {}", details.period),
            notes: Some(audit_notes(details, request.notes.as_deref(), &self.currency)),
            date: request.date,
        };

        state.transactions.push(transaction.clone());
        save_state(&self.data_dir, &state)?;

        log::info!(
            "Recorded payout {} of {} for '{}'",
            transaction.id,
            transaction.amount,
            transaction.owner_id
        );
        Ok(transaction)
    }
}

/// Human-readable breakdown kept with the ledger entry
pub fn audit_notes(
    details: &ReversalDetails,
    user_notes: Option<&str>,
    currency: &CurrencySettings,
) -> String {
    let mut lines = vec![format!(
        "Rent {} - commission {} - fees {} = {} ({} payment(s))",
        format_money(details.total_rent, currency),
        format_money(details.total_commission, currency),
        format_money(details.total_fees, currency),
        format_money(details.net_amount, currency),
        details.payments_count
    )];

    for fee in &details.fees {
        lines.push(format!(
            "Fee [{}] {}: {}",
            fee.category,
            fee.description,
            format_money(fee.amount, currency)
        ));
    }

    if let Some(notes) = user_notes.map(str::trim).filter(|n| !n.is_empty()) {
        lines.push(notes.to_string());
    }

    lines.join("\n")
}
