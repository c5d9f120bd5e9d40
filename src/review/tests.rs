#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;
use rust_decimal_macros::dec;

use super::*;
use crate::allocate::allocate;
use crate::models::{Bill, Debt};
use crate::schedule::PayFrequency;

fn request(paycheck: Decimal) -> AllocationRequest {
    let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    AllocationRequest::new(paycheck, date, PayFrequency::BiWeekly)
}

fn event(id: &str, source: &str, amount: Decimal) -> ReallocationEvent {
    ReallocationEvent {
        id: id.into(),
        source_name: source.into(),
        target_name: "Electric".into(),
        amount,
    }
}

// ── detect_shortfall ──────────────────────────────────────────

#[test]
fn test_funded_cycle_reports_nothing() {
    let mut req = request(dec!(2000));
    req.bills.push(Bill::new("rent".into(), "Rent".into(), dec!(1000), 5));
    req.debts.push(Debt::new("visa".into(), "Visa".into(), dec!(500), dec!(50), dec!(20)));

    let result = allocate(&req).unwrap();
    assert!(detect_shortfall(&req, &result).is_none());
}

#[test]
fn test_short_cycle_reports_the_gap() {
    let mut req = request(dec!(900));
    req.bills.push(Bill::new("rent".into(), "Rent".into(), dec!(1000), 5));
    req.debts.push(Debt::new("visa".into(), "Visa".into(), dec!(500), dec!(50), dec!(20)));

    let result = allocate(&req).unwrap();
    let report = detect_shortfall(&req, &result).unwrap();

    assert_eq!(report.required_total, dec!(1050));
    assert_eq!(report.funded_total, dec!(900));
    assert_eq!(report.gap, dec!(150));
    assert_eq!(report.underfunded_bills, vec!["rent".to_string()]);
    assert_eq!(report.underfunded_debts, vec!["visa".to_string()]);
}

#[test]
fn test_ghosted_bills_are_not_required() {
    let mut req = request(dec!(10));
    // Due day 28: ghosted in the Jan 1–15 window, so not owed this cycle.
    req.bills.push(Bill::new("netflix".into(), "Netflix".into(), dec!(20), 28));

    let result = allocate(&req).unwrap();
    assert!(detect_shortfall(&req, &result).is_none());
}

#[test]
fn test_snowball_topup_does_not_mask_a_shorted_minimum() {
    // Two debts; money covers the first minimum and then snowballs onto the
    // smallest balance, but the second minimum stayed short.
    let mut req = request(dec!(60));
    req.debts.push(Debt::new("small".into(), "Small".into(), dec!(100), dec!(40), dec!(20)));
    req.debts.push(Debt::new("big".into(), "Big".into(), dec!(5000), dec!(100), dec!(20)));

    let result = allocate(&req).unwrap();
    let report = detect_shortfall(&req, &result).unwrap();
    assert_eq!(report.underfunded_debts, vec!["big".to_string()]);
    assert_eq!(report.gap, dec!(80));
}

// ── review_month ──────────────────────────────────────────────

#[test]
fn test_clean_month_scores_100() {
    let review = review_month(&[], &[]);
    assert_eq!(review.accuracy_score, 100);
    assert!(review.reallocations.is_empty());
    assert!(review.suggestions.is_empty());
}

#[test]
fn test_each_rescue_costs_points() {
    // Two events, $30 moved: 100 - 2*5 - 3 = 87.
    let events = vec![event("e1", "Dining", dec!(20)), event("e2", "Travel", dec!(10))];
    let review = review_month(&events, &[]);
    assert_eq!(review.accuracy_score, 87);
}

#[test]
fn test_score_floors_at_zero() {
    let events = vec![event("e1", "Dining", dec!(2000))];
    let review = review_month(&events, &[]);
    assert_eq!(review.accuracy_score, 0);
}

#[test]
fn test_keeps_three_largest_events() {
    let events = vec![
        event("e1", "A", dec!(5)),
        event("e2", "B", dec!(50)),
        event("e3", "C", dec!(20)),
        event("e4", "D", dec!(35)),
    ];
    let review = review_month(&events, &[]);
    let ids: Vec<&str> = review.reallocations.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["e2", "e4", "e3"]);
}

#[test]
fn test_suggests_decreasing_the_top_source() {
    let events = vec![event("e1", "Dining", dec!(40))];
    let review = review_month(&events, &[]);
    let decrease = &review.suggestions[0];
    assert_eq!(decrease.kind, SuggestionKind::Decrease);
    assert_eq!(decrease.fund_name, "Dining");
    assert_eq!(decrease.amount, dec!(20));
}

#[test]
fn test_suggests_increasing_a_tight_fund() {
    let mut fund = SinkingFund::new("f1".into(), "Groceries".into(), dec!(500), 5);
    fund.current_amount = dec!(20); // under 10% of target
    let review = review_month(&[], &[fund]);

    let increase = &review.suggestions[0];
    assert_eq!(increase.kind, SuggestionKind::Increase);
    assert_eq!(increase.fund_name, "Groceries");
    assert_eq!(increase.amount, dec!(50));
}

#[test]
fn test_healthy_fund_not_flagged() {
    let mut fund = SinkingFund::new("f1".into(), "Groceries".into(), dec!(500), 5);
    fund.current_amount = dec!(200);
    let review = review_month(&[], &[fund]);
    assert!(review.suggestions.is_empty());
}
