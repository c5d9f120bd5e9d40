use chrono::{Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};

/// How often a paycheck arrives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PayFrequency {
    Weekly,
    BiWeekly,
    SemiMonthly,
    Monthly,
}

impl PayFrequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Weekly => "weekly",
            Self::BiWeekly => "bi-weekly",
            Self::SemiMonthly => "semi-monthly",
            Self::Monthly => "monthly",
        }
    }

    /// Unknown strings fall back to bi-weekly, the most common cadence.
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "weekly" => Self::Weekly,
            "bi-weekly" | "biweekly" => Self::BiWeekly,
            "semi-monthly" | "semimonthly" => Self::SemiMonthly,
            "monthly" => Self::Monthly,
            _ => Self::BiWeekly,
        }
    }

    pub fn all() -> &'static [PayFrequency] {
        &[
            Self::Weekly,
            Self::BiWeekly,
            Self::SemiMonthly,
            Self::Monthly,
        ]
    }
}

impl std::fmt::Display for PayFrequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The date the next paycheck lands, given the current one.
///
/// Monthly cadence adds one calendar month, clamping into shorter months
/// (Jan 31 → Feb 28/29). The fallible chrono arithmetic only fails at the
/// edge of the representable calendar, where the input date is returned.
pub fn next_pay_date(from: NaiveDate, frequency: PayFrequency) -> NaiveDate {
    let next = match frequency {
        PayFrequency::Weekly => from.checked_add_days(Days::new(7)),
        PayFrequency::BiWeekly => from.checked_add_days(Days::new(14)),
        PayFrequency::SemiMonthly => from.checked_add_days(Days::new(15)),
        PayFrequency::Monthly => from.checked_add_months(Months::new(1)),
    };
    next.unwrap_or(from)
}

/// How many paychecks arrive in `(from, until]`, at least 1.
///
/// Used to spread an annual goal across the cycles left before it is due.
pub fn paychecks_until(from: NaiveDate, until: NaiveDate, frequency: PayFrequency) -> u32 {
    let mut count = 0u32;
    let mut cursor = from;
    while cursor < until {
        let next = next_pay_date(cursor, frequency);
        if next == cursor {
            break;
        }
        cursor = next;
        count += 1;
    }
    count.max(1)
}

/// The current pay cycle: `[start, end]` on whole calendar days.
///
/// `start` is the day the paycheck arrived; `end` is the last day before
/// the next one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl CycleWindow {
    /// Build the window for a cycle starting at `current`. An explicitly
    /// known next-pay date wins over the frequency-derived one.
    pub fn new(current: NaiveDate, frequency: PayFrequency, explicit_end: Option<NaiveDate>) -> Self {
        Self {
            start: current,
            end: explicit_end.unwrap_or_else(|| next_pay_date(current, frequency)),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}
