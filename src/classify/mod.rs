use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::models::Bill;
use crate::schedule::CycleWindow;

/// Days before the due date by which a bill must be fully funded, leaving
/// room for payment processing to clear.
pub const FUNDING_LEAD_DAYS: u64 = 2;

/// Whether a bill needs money this cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BillStatus {
    /// Funding deadline falls inside the cycle window, or has already
    /// lapsed unfunded. Must be funded now.
    Required,
    /// Funding deadline falls after the window; safe to defer.
    Ghosted,
    /// Already funded this cycle; needs nothing further.
    Covered,
}

impl BillStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Required => "REQUIRED",
            Self::Ghosted => "GHOSTED",
            Self::Covered => "COVERED",
        }
    }
}

impl std::fmt::Display for BillStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Classify a bill against the current pay-cycle window.
///
/// The bill's next due instance is this month when the due day has not yet
/// passed, otherwise next month; the funding deadline sits
/// [`FUNDING_LEAD_DAYS`] before it. A deadline past the window end is
/// deferrable; a deadline inside the window — or one that already lapsed —
/// demands funding. An overdue bill is never silently dropped.
///
/// Pure function of its inputs; rerunning with the same snapshot always
/// yields the same status.
pub fn classify(bill: &Bill, window: &CycleWindow) -> Result<BillStatus, EngineError> {
    if bill.due_day == 0 || bill.due_day > 31 {
        return Err(EngineError::InvalidDueDay(bill.due_day));
    }

    if let Some(funded) = bill.last_funded {
        if window.contains(funded) {
            return Ok(BillStatus::Covered);
        }
    }

    let deadline = funding_deadline(bill.due_day, window.start)?;
    if deadline > window.end {
        Ok(BillStatus::Ghosted)
    } else {
        Ok(BillStatus::Required)
    }
}

/// The date by which money must be set aside for a bill due on `due_day`,
/// relative to `today`.
pub fn funding_deadline(due_day: u32, today: NaiveDate) -> Result<NaiveDate, EngineError> {
    if due_day == 0 || due_day > 31 {
        return Err(EngineError::InvalidDueDay(due_day));
    }

    let (year, month) = if due_day >= today.day() {
        (today.year(), today.month())
    } else if today.month() == 12 {
        (today.year() + 1, 1)
    } else {
        (today.year(), today.month() + 1)
    };

    let due_date =
        clamped_ymd(year, month, due_day).ok_or(EngineError::InvalidDueDay(due_day))?;
    Ok(due_date
        .checked_sub_days(Days::new(FUNDING_LEAD_DAYS))
        .unwrap_or(due_date))
}

/// Build a date, pulling the day back to the month's last day when the
/// month is shorter (e.g. due day 31 in February).
fn clamped_ymd(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    (1..=day)
        .rev()
        .find_map(|d| NaiveDate::from_ymd_opt(year, month, d))
}

#[cfg(test)]
mod tests;
