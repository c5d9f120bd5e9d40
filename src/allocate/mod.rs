use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::classify::{classify, BillStatus};
use crate::error::EngineError;
use crate::models::{Bill, Debt, FundKind, SinkingFund};
use crate::schedule::{paychecks_until, CycleWindow, PayFrequency};
use crate::snowball::snowball;

/// Largest paycheck the engine accepts. Anything above this is treated as
/// malformed input rather than money.
pub const MAX_PAYCHECK: i64 = 1_000_000;

/// One allocation run's inputs: a paycheck plus read-only snapshots of the
/// obligation set, captured atomically before the call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllocationRequest {
    pub paycheck: Decimal,
    pub bills: Vec<Bill>,
    pub funds: Vec<SinkingFund>,
    pub debts: Vec<Debt>,
    pub frequency: PayFrequency,
    /// The day the paycheck arrived; the engine never reads a clock.
    pub current_date: NaiveDate,
    /// Known next-pay date, when the user has one; otherwise derived from
    /// the frequency.
    pub cycle_end: Option<NaiveDate>,
    pub current_ef: Decimal,
    pub target_ef: Decimal,
    /// Capacity recycled from previously retired debts. External money,
    /// owned by the caller's accumulator.
    pub snowball_power: Decimal,
}

impl AllocationRequest {
    pub fn new(paycheck: Decimal, current_date: NaiveDate, frequency: PayFrequency) -> Self {
        Self {
            paycheck,
            bills: Vec::new(),
            funds: Vec::new(),
            debts: Vec::new(),
            frequency,
            current_date,
            cycle_end: None,
            current_ef: Decimal::ZERO,
            target_ef: Decimal::ZERO,
            snowball_power: Decimal::ZERO,
        }
    }
}

/// The engine's sole output: a snapshot of where every cent went.
///
/// Maps are sparse: an id appears only when it received money. The
/// conservation law is
/// `allocated_total() - snowball_from_power + surplus == paycheck`;
/// recycled power is found money on top of the paycheck.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationResult {
    pub bill_allocations: HashMap<String, Decimal>,
    pub bill_statuses: HashMap<String, BillStatus>,
    pub emergency_fund: Decimal,
    pub fund_allocations: HashMap<String, Decimal>,
    /// Minimum payment plus any snowball top-up, combined per debt.
    pub debt_allocations: HashMap<String, Decimal>,
    /// Total snowball applied this cycle, recycled power included.
    pub snowball_total: Decimal,
    /// The slice of `snowball_total` covered by recycled power.
    pub snowball_from_power: Decimal,
    /// Unconsumed paycheck money. Never negative.
    pub surplus: Decimal,
}

impl AllocationResult {
    /// Everything handed out this run: all four maps plus the emergency
    /// fund. Surplus not included.
    pub fn allocated_total(&self) -> Decimal {
        let bills: Decimal = self.bill_allocations.values().copied().sum();
        let funds: Decimal = self.fund_allocations.values().copied().sum();
        let debts: Decimal = self.debt_allocations.values().copied().sum();
        bills + funds + debts + self.emergency_fund
    }
}

/// Run the allocation waterfall for one paycheck.
///
/// Strict priority order on a single remaining-money accumulator:
/// required bills (input order) → debt minimums (input order) → annual
/// fund drip → emergency-fund top-up → debt snowball → lifestyle funds.
/// A shortfall is not an error; the waterfall completes and later items
/// are simply shorted. Fails fast only on malformed input.
pub fn allocate(request: &AllocationRequest) -> Result<AllocationResult, EngineError> {
    validate(request)?;

    let window = CycleWindow::new(request.current_date, request.frequency, request.cycle_end);
    let mut remaining = request.paycheck;

    // Classify every bill up front; due-day errors surface before any
    // money moves.
    let mut bill_statuses = HashMap::with_capacity(request.bills.len());
    for bill in &request.bills {
        bill_statuses.insert(bill.id.clone(), classify(bill, &window)?);
    }

    // Required fixed bills, in input order. When money runs out the later
    // bills are the ones shorted.
    let mut bill_allocations = HashMap::new();
    for bill in &request.bills {
        if bill_statuses.get(&bill.id) != Some(&BillStatus::Required) {
            continue;
        }
        let allocated = remaining.min(bill.amount);
        if allocated > Decimal::ZERO {
            bill_allocations.insert(bill.id.clone(), allocated);
            remaining -= allocated;
        }
    }

    // Debt minimums, in input order. A shorted minimum is not retried.
    let mut debt_allocations = HashMap::new();
    for debt in &request.debts {
        let allocated = remaining.min(debt.min_payment);
        if allocated > Decimal::ZERO {
            debt_allocations.insert(debt.id.clone(), allocated);
            remaining -= allocated;
        }
    }

    // Annual drip: spread each unmet goal across the paychecks left before
    // it is due, never exceeding what is left in the cycle.
    let mut fund_allocations = HashMap::new();
    for fund in &request.funds {
        if fund.kind != FundKind::Annual {
            continue;
        }
        let Some(due) = fund.due_date else { continue };
        let drip = drip_amount(fund, request.current_date, due, request.frequency);
        let allocated = remaining.min(drip);
        if allocated > Decimal::ZERO {
            fund_allocations.insert(fund.id.clone(), allocated);
            remaining -= allocated;
        }
    }

    // Emergency-fund top-up.
    let mut emergency_fund = Decimal::ZERO;
    if request.current_ef < request.target_ef {
        let gap = request.target_ef - request.current_ef;
        emergency_fund = remaining.min(gap).max(Decimal::ZERO);
        remaining -= emergency_fund;
    }

    // Snowball the surplus, recycled power included. Only the portion not
    // covered by recycled power comes out of this paycheck.
    let outcome = snowball(
        remaining,
        &request.debts,
        request.snowball_power,
        &debt_allocations,
    );
    for (id, amount) in &outcome.allocations {
        *debt_allocations.entry(id.clone()).or_insert(Decimal::ZERO) += *amount;
    }
    let snowball_from_power = request.snowball_power.min(outcome.total_applied);
    remaining -= outcome.total_applied - snowball_from_power;

    // Whatever survives the snowball spreads across lifestyle funds by
    // priority weight; the rounding residue stays surplus.
    distribute_lifestyle(&mut fund_allocations, &mut remaining, &request.funds);

    Ok(AllocationResult {
        bill_allocations,
        bill_statuses,
        emergency_fund,
        fund_allocations,
        debt_allocations,
        snowball_total: outcome.total_applied,
        snowball_from_power,
        surplus: remaining.max(Decimal::ZERO),
    })
}

fn validate(request: &AllocationRequest) -> Result<(), EngineError> {
    if request.paycheck <= Decimal::ZERO {
        return Err(EngineError::InvalidPaycheck(format!(
            "must be positive, got {}",
            request.paycheck
        )));
    }
    if request.paycheck > Decimal::from(MAX_PAYCHECK) {
        return Err(EngineError::InvalidPaycheck(format!(
            "exceeds {MAX_PAYCHECK}, got {}",
            request.paycheck
        )));
    }
    for bill in &request.bills {
        if bill.amount < Decimal::ZERO {
            return Err(EngineError::InvalidAmount(format!(
                "bill {} has negative amount",
                bill.id
            )));
        }
    }
    for debt in &request.debts {
        if debt.min_payment < Decimal::ZERO || debt.current_balance < Decimal::ZERO {
            return Err(EngineError::InvalidAmount(format!(
                "debt {} has negative balance or minimum",
                debt.id
            )));
        }
    }
    for fund in &request.funds {
        if fund.target_amount < Decimal::ZERO {
            return Err(EngineError::InvalidAmount(format!(
                "fund {} has negative target",
                fund.id
            )));
        }
    }
    if request.snowball_power < Decimal::ZERO {
        return Err(EngineError::InvalidAmount(
            "snowball power cannot be negative".into(),
        ));
    }
    Ok(())
}

/// Per-cycle contribution toward an annual goal: the unmet remainder split
/// across the paychecks left before the due date, rounded down to the cent.
fn drip_amount(
    fund: &SinkingFund,
    current: NaiveDate,
    due: NaiveDate,
    frequency: PayFrequency,
) -> Decimal {
    let unmet = fund.remaining_to_target();
    if unmet.is_zero() {
        return Decimal::ZERO;
    }
    let cycles = Decimal::from(paychecks_until(current, due, frequency));
    (unmet / cycles)
        .round_dp_with_strategy(2, RoundingStrategy::ToZero)
        .min(unmet)
}

/// Spread leftover money across non-annual funds proportionally to their
/// priority weight (clamped to 1–10). Each share is rounded down to the
/// cent and capped by the fund's unmet target when one is set.
fn distribute_lifestyle(
    fund_allocations: &mut HashMap<String, Decimal>,
    remaining: &mut Decimal,
    funds: &[SinkingFund],
) {
    if *remaining <= Decimal::ZERO {
        return;
    }
    let lifestyle: Vec<&SinkingFund> = funds.iter().filter(|f| f.kind != FundKind::Annual).collect();
    let total_weight: u32 = lifestyle.iter().copied().map(weight).sum();
    if total_weight == 0 {
        return;
    }

    let pot = *remaining;
    for fund in lifestyle {
        let share = (pot * Decimal::from(weight(fund)) / Decimal::from(total_weight))
            .round_dp_with_strategy(2, RoundingStrategy::ToZero);
        let capped = if fund.target_amount > Decimal::ZERO {
            share.min(fund.remaining_to_target())
        } else {
            share
        };
        let allocated = capped.min(*remaining);
        if allocated > Decimal::ZERO {
            *fund_allocations.entry(fund.id.clone()).or_insert(Decimal::ZERO) += allocated;
            *remaining -= allocated;
        }
    }
}

fn weight(fund: &SinkingFund) -> u32 {
    u32::from(fund.priority.clamp(1, 10))
}
