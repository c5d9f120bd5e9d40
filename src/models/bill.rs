use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A recurring fixed obligation, due on the same day every month.
///
/// Bills are read-only inputs to the engine; only the obligation-management
/// collaborator ever mutates them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bill {
    pub id: String,
    pub name: String,
    pub amount: Decimal,
    /// Day of the month the bill is due (1–31).
    pub due_day: u32,
    /// When the bill was last funded, if ever. Set by the persistence
    /// collaborator after a committed allocation.
    pub last_funded: Option<NaiveDate>,
}

impl Bill {
    pub fn new(id: String, name: String, amount: Decimal, due_day: u32) -> Self {
        Self {
            id,
            name,
            amount,
            due_day,
            last_funded: None,
        }
    }
}
