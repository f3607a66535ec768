use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Owner {
    pub name: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Property {
    /// Owner identifier from owners.toml
    pub owner: String,
    pub name: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub monthly_rent: Option<Decimal>,
    /// Fraction of collected rent kept by the agency (0.10 for 10%)
    #[serde(default)]
    pub commission_rate: Decimal,
}
