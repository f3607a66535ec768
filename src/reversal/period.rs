use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::receipt::RentReceipt;

/// Inclusive calendar-date range used to select rent receipts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl Period {
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            start_date,
            end_date,
        }
    }

    /// End falls before start. Filtering still runs but selects nothing.
    pub fn is_inverted(&self) -> bool {
        self.end_date < self.start_date
    }

    /// Whether a timestamp lies within [start 00:00:00, end 23:59:59]
    pub fn contains(&self, at: NaiveDateTime) -> bool {
        let day = at.date();
        day >= self.start_date && day <= self.end_date
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.start_date, self.end_date)
    }
}

/// Select the receipts paid within `period`
pub fn filter_period<'a, I>(receipts: I, period: &Period) -> Vec<&'a RentReceipt>
where
    I: IntoIterator<Item = &'a RentReceipt>,
{
    receipts
        .into_iter()
        .filter(|r| period.contains(r.payment_date))
        .collect()
}
