use serde::{Deserialize, Serialize};

use crate::reversal::PaymentMethod;

#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    pub agency: Agency,
    pub currency: CurrencySettings,
    #[serde(default)]
    pub payout: PayoutSettings,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Agency {
    pub name: String,
    pub city: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct CurrencySettings {
    pub code: String,
    pub symbol: String,
    /// Number of fractional digits amounts are displayed and rounded with
    #[serde(default)]
    pub decimals: u32,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct PayoutSettings {
    #[serde(default = "default_number_format")]
    pub number_format: String,
    #[serde(default = "default_receipt_format")]
    pub receipt_format: String,
    #[serde(default)]
    pub default_method: PaymentMethod,
}

impl Default for PayoutSettings {
    fn default() -> Self {
        Self {
            number_format: default_number_format(),
            receipt_format: default_receipt_format(),
            default_method: PaymentMethod::default(),
        }
    }
}

fn default_number_format() -> String {
    "PAY-{year}-{seq:04}".to_string()
}

fn default_receipt_format() -> String {
    "RCP-{year}-{seq:04}".to_string()
}
