use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::allocate::{AllocationRequest, AllocationResult};
use crate::classify::BillStatus;
use crate::models::SinkingFund;

/// A cycle where required obligations outran the paycheck.
///
/// Produced by comparing an [`AllocationResult`] against what the cycle
/// demanded; the engine itself never errors on a shortfall.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShortfallReport {
    /// Required bills plus every debt minimum.
    pub required_total: Decimal,
    /// What those obligations actually received.
    pub funded_total: Decimal,
    /// `required_total - funded_total`; always positive in a report.
    pub gap: Decimal,
    pub underfunded_bills: Vec<String>,
    pub underfunded_debts: Vec<String>,
}

/// Decide whether an allocation left required obligations short.
///
/// Returns `None` when every required bill and debt minimum was fully
/// funded. Surfacing the report to the user (and what to do about it) is
/// presentation policy, not engine behavior.
pub fn detect_shortfall(
    request: &AllocationRequest,
    result: &AllocationResult,
) -> Option<ShortfallReport> {
    let mut required_total = Decimal::ZERO;
    let mut funded_total = Decimal::ZERO;
    let mut underfunded_bills = Vec::new();
    let mut underfunded_debts = Vec::new();

    for bill in &request.bills {
        if result.bill_statuses.get(&bill.id) != Some(&BillStatus::Required) {
            continue;
        }
        let funded = result
            .bill_allocations
            .get(&bill.id)
            .copied()
            .unwrap_or(Decimal::ZERO);
        required_total += bill.amount;
        funded_total += funded;
        if funded < bill.amount {
            underfunded_bills.push(bill.id.clone());
        }
    }

    for debt in &request.debts {
        let funded = result
            .debt_allocations
            .get(&debt.id)
            .copied()
            .unwrap_or(Decimal::ZERO);
        required_total += debt.min_payment;
        // Snowball top-ups count toward the minimum, never against it.
        funded_total += funded.min(debt.min_payment);
        if funded < debt.min_payment {
            underfunded_debts.push(debt.id.clone());
        }
    }

    let gap = required_total - funded_total;
    if gap <= Decimal::ZERO {
        return None;
    }
    Some(ShortfallReport {
        required_total,
        funded_total,
        gap,
        underfunded_bills,
        underfunded_debts,
    })
}

/// One mid-cycle rescue: money pulled out of a fund to cover something else.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReallocationEvent {
    pub id: String,
    pub source_name: String,
    pub target_name: String,
    pub amount: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionKind {
    Increase,
    Decrease,
}

/// A nudge to recalibrate a fund's per-cycle contribution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalibrationSuggestion {
    pub fund_name: String,
    pub kind: SuggestionKind,
    pub amount: Decimal,
    pub reason: String,
}

/// How well a month's plan held up.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthReview {
    /// 0–100. Starts at 100; each rescue costs 5 points and every $10
    /// moved costs another.
    pub accuracy_score: u32,
    /// The three largest rescues, largest first.
    pub reallocations: Vec<ReallocationEvent>,
    pub suggestions: Vec<CalibrationSuggestion>,
}

/// Score a month of reallocation events and suggest calibrations.
///
/// The caller extracts the events from its ledger; this only does the
/// arithmetic. A fund sitting under 10% of its target reads as
/// consistently tight; the fund most often raided reads as over-budgeted.
pub fn review_month(events: &[ReallocationEvent], funds: &[SinkingFund]) -> MonthReview {
    let mut reallocations: Vec<ReallocationEvent> = events.to_vec();
    reallocations.sort_by(|a, b| b.amount.cmp(&a.amount));
    reallocations.truncate(3);

    let total_moved: Decimal = reallocations.iter().map(|r| r.amount).sum();
    let event_penalty = reallocations.len() as u32 * 5;
    let amount_penalty = (total_moved / Decimal::TEN).trunc().to_u32().unwrap_or(u32::MAX);
    let accuracy_score = 100u32
        .saturating_sub(event_penalty)
        .saturating_sub(amount_penalty);

    let mut suggestions = Vec::new();
    if let Some(top) = reallocations.first() {
        suggestions.push(CalibrationSuggestion {
            fund_name: top.source_name.clone(),
            kind: SuggestionKind::Decrease,
            amount: Decimal::from(20),
            reason: "Leftover budget moved often".into(),
        });
    }
    if let Some(tight) = funds.iter().find(|f| {
        f.target_amount > Decimal::ZERO
            && f.current_amount < f.target_amount * Decimal::new(1, 1)
    }) {
        suggestions.push(CalibrationSuggestion {
            fund_name: tight.name.clone(),
            kind: SuggestionKind::Increase,
            amount: Decimal::from(50),
            reason: "Consistently tight budget".into(),
        });
    }

    MonthReview {
        accuracy_score,
        reallocations,
        suggestions,
    }
}

#[cfg(test)]
mod tests;
