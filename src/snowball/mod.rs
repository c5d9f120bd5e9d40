use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::Debt;

/// What the snowball pass decided: per-debt top-ups and their sum.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SnowballOutcome {
    /// Extra payment per debt id, on top of any minimum already allocated.
    pub allocations: HashMap<String, Decimal>,
    pub total_applied: Decimal,
}

/// Route surplus money at the smallest debts first.
///
/// The pool is `surplus + recycled_power`. Debts with a positive balance are
/// walked smallest balance first (ties keep input order); each receives at
/// most what would retire it — `balance` minus whatever `already_allocated`
/// says it got earlier this cycle — and the exact remainder rolls to the
/// next debt. Ids in `already_allocated` that match no debt are read as
/// zero rather than rejected. Pool left over after every debt is retired is
/// not redistributed here; the caller decides where true over-snowball
/// surplus goes.
pub fn snowball(
    surplus: Decimal,
    debts: &[Debt],
    recycled_power: Decimal,
    already_allocated: &HashMap<String, Decimal>,
) -> SnowballOutcome {
    let mut outcome = SnowballOutcome::default();
    let mut pool = surplus + recycled_power;
    if pool <= Decimal::ZERO {
        return outcome;
    }

    let mut open: Vec<&Debt> = debts
        .iter()
        .filter(|d| d.current_balance > Decimal::ZERO)
        .collect();
    // Stable sort: equal balances keep their input order.
    open.sort_by(|a, b| a.current_balance.cmp(&b.current_balance));

    for debt in open {
        if pool <= Decimal::ZERO {
            break;
        }
        let already = already_allocated
            .get(&debt.id)
            .copied()
            .unwrap_or(Decimal::ZERO);
        let needed = (debt.current_balance - already).max(Decimal::ZERO);
        if needed.is_zero() {
            // Minimum payment alone retires this debt; nothing more to add.
            continue;
        }
        let applied = pool.min(needed);
        outcome.allocations.insert(debt.id.clone(), applied);
        outcome.total_applied += applied;
        pool -= applied;
    }

    outcome
}

/// Minimum-payment capacity freed by debts retired between two snapshots.
///
/// A debt counts as retired when it carried a positive balance in
/// `previous` and a zero balance in `current`. Debts absent from `current`
/// free nothing: a deletion cannot be told apart from a payoff. The caller
/// owns the running snowball-power accumulator; this only computes the
/// increment.
pub fn freed_snowball_power(previous: &[Debt], current: &[Debt]) -> Decimal {
    previous
        .iter()
        .filter(|prev| prev.current_balance > Decimal::ZERO)
        .filter_map(|prev| current.iter().find(|cur| cur.id == prev.id))
        .filter(|cur| cur.is_retired())
        .map(|cur| cur.min_payment)
        .sum()
}
