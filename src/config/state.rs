use chrono::Datelike;
use serde::{Deserialize, Serialize};

use crate::reversal::{OwnerTransaction, RentReceipt};

#[derive(Debug, Deserialize, Serialize, Default)]
pub struct State {
    #[serde(default)]
    pub counter: Counters,
    #[serde(default)]
    pub receipts: Vec<RentReceipt>,
    #[serde(default)]
    pub transactions: Vec<OwnerTransaction>,
}

#[derive(Debug, Deserialize, Serialize, Default)]
pub struct Counters {
    #[serde(default)]
    pub receipts: Counter,
    #[serde(default)]
    pub payouts: Counter,
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy)]
pub struct Counter {
    pub last_number: u32,
    pub last_year: u32,
}

impl Default for Counter {
    fn default() -> Self {
        Self {
            last_number: 0,
            last_year: chrono::Local::now().year() as u32,
        }
    }
}

impl Counter {
    /// Sequence number the next id would get in `year`
    pub fn peek(&self, year: u32) -> u32 {
        if self.last_year == year {
            self.last_number + 1
        } else {
            1 // Reset for new year
        }
    }

    /// Claim the next sequence number for `year`
    pub fn advance(&mut self, year: u32) -> u32 {
        let seq = self.peek(year);
        self.last_number = seq;
        self.last_year = year;
        seq
    }
}
