#![allow(clippy::unwrap_used)]

use rust_decimal_macros::dec;

use super::*;
use crate::schedule::PayFrequency;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn bill(due_day: u32) -> Bill {
    Bill::new("b1".into(), "Rent".into(), dec!(1000), due_day)
}

/// Jan 10 → Jan 24, the window used throughout.
fn window() -> CycleWindow {
    CycleWindow::new(date(2024, 1, 10), PayFrequency::BiWeekly, None)
}

// ── classify ──────────────────────────────────────────────────

#[test]
fn test_due_inside_window_is_required() {
    // Due Jan 15, deadline Jan 13: inside Jan 10–24.
    assert_eq!(classify(&bill(15), &window()).unwrap(), BillStatus::Required);
}

#[test]
fn test_due_past_window_is_ghosted() {
    // Due Jan 28, deadline Jan 26: after Jan 24.
    assert_eq!(classify(&bill(28), &window()).unwrap(), BillStatus::Ghosted);
}

#[test]
fn test_deadline_on_window_end_is_required() {
    // Due Jan 26, deadline Jan 24: exactly the window end.
    assert_eq!(classify(&bill(26), &window()).unwrap(), BillStatus::Required);
}

#[test]
fn test_lapsed_deadline_is_required() {
    // Due Jan 11, deadline Jan 9: already past the window start. An overdue
    // bill is not safe to defer.
    assert_eq!(classify(&bill(11), &window()).unwrap(), BillStatus::Required);
}

#[test]
fn test_due_day_before_today_rolls_to_next_month() {
    // Due day 5 on Jan 10: next instance Feb 5, deadline Feb 3 — ghosted.
    assert_eq!(classify(&bill(5), &window()).unwrap(), BillStatus::Ghosted);
}

#[test]
fn test_funded_this_cycle_is_covered() {
    let mut b = bill(15);
    b.last_funded = Some(date(2024, 1, 10));
    assert_eq!(classify(&b, &window()).unwrap(), BillStatus::Covered);
}

#[test]
fn test_funded_last_cycle_not_covered() {
    let mut b = bill(15);
    b.last_funded = Some(date(2023, 12, 27));
    assert_eq!(classify(&b, &window()).unwrap(), BillStatus::Required);
}

#[test]
fn test_invalid_due_day_rejected() {
    assert_eq!(
        classify(&bill(0), &window()),
        Err(EngineError::InvalidDueDay(0))
    );
    assert_eq!(
        classify(&bill(32), &window()),
        Err(EngineError::InvalidDueDay(32))
    );
}

#[test]
fn test_classification_is_idempotent() {
    let b = bill(15);
    let w = window();
    let first = classify(&b, &w).unwrap();
    for _ in 0..3 {
        assert_eq!(classify(&b, &w).unwrap(), first);
    }
}

// ── funding_deadline ──────────────────────────────────────────

#[test]
fn test_deadline_two_days_before_due() {
    assert_eq!(
        funding_deadline(15, date(2024, 1, 10)).unwrap(),
        date(2024, 1, 13)
    );
}

#[test]
fn test_deadline_rolls_over_december() {
    // Due day 5 seen from Dec 20: due Jan 5, deadline Jan 3.
    assert_eq!(
        funding_deadline(5, date(2023, 12, 20)).unwrap(),
        date(2024, 1, 3)
    );
}

#[test]
fn test_deadline_clamps_short_month() {
    // Due day 31 seen from Feb 1 2023: February has 28 days, so the due
    // instance clamps to Feb 28 and the deadline is Feb 26.
    assert_eq!(
        funding_deadline(31, date(2023, 2, 1)).unwrap(),
        date(2023, 2, 26)
    );
}

#[test]
fn test_due_today_counts_as_this_month() {
    // Due day equals today: the instance is today, deadline two days ago.
    assert_eq!(
        funding_deadline(10, date(2024, 1, 10)).unwrap(),
        date(2024, 1, 8)
    );
}
