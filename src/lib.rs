//! Deterministic paycheck allocation with a debt-snowball strategy.
//!
//! One paycheck plus read-only snapshots of bills, sinking funds, and debts
//! go in; one immutable [`AllocationResult`] comes out. The engine performs
//! no I/O, reads no clock, and holds no state between runs — persistence
//! and presentation are the caller's collaborators.
//!
//! ```
//! use chrono::NaiveDate;
//! use rust_decimal::Decimal;
//! use snowplan::{allocate, AllocationRequest, PayFrequency};
//!
//! let payday = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
//! let request = AllocationRequest::new(Decimal::from(2500), payday, PayFrequency::BiWeekly);
//! let result = allocate(&request).unwrap();
//! assert_eq!(result.surplus, Decimal::from(2500));
//! ```

pub mod allocate;
pub mod classify;
pub mod error;
pub mod ledger;
pub mod models;
pub mod review;
pub mod schedule;
pub mod snowball;
pub mod transfer;

pub use allocate::{allocate, AllocationRequest, AllocationResult, MAX_PAYCHECK};
pub use classify::{classify, funding_deadline, BillStatus, FUNDING_LEAD_DAYS};
pub use error::EngineError;
pub use ledger::{commit_plan, CommitPlan, EntryKind, LedgerEntry};
pub use models::{Bill, Debt, FundKind, SinkingFund};
pub use review::{detect_shortfall, review_month, MonthReview, ShortfallReport};
pub use schedule::{next_pay_date, paychecks_until, CycleWindow, PayFrequency};
pub use snowball::{freed_snowball_power, snowball, SnowballOutcome};
pub use transfer::{plan_expense, plan_transfer, ExpensePlan, TransferPlan};
