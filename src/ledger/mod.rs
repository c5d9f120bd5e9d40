use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::allocate::{AllocationRequest, AllocationResult};

/// What a ledger entry records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    Income,
    AllocationBill,
    AllocationFund,
    AllocationDebt,
    ReallocationOut,
    Expense,
}

impl EntryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::AllocationBill => "allocation_bill",
            Self::AllocationFund => "allocation_fund",
            Self::AllocationDebt => "allocation_debt",
            Self::ReallocationOut => "reallocation_out",
            Self::Expense => "expense",
        }
    }
}

impl std::fmt::Display for EntryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One row the persistence collaborator appends to the ledger.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub kind: EntryKind,
    pub description: String,
    pub amount: Decimal,
    /// Id of the bill/fund/debt the entry concerns, when it concerns one.
    pub related_id: Option<String>,
    pub category: String,
}

/// The batch of writes a committed allocation implies.
///
/// Data only: the collaborator must apply the whole plan atomically or not
/// at all. Balance maps hold the *new* balances, not deltas.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitPlan {
    pub entries: Vec<LedgerEntry>,
    pub fund_balances: HashMap<String, Decimal>,
    /// New debt balances, clamped at zero.
    pub debt_balances: HashMap<String, Decimal>,
    pub new_emergency_fund: Decimal,
    /// Bills whose last-funded marker moves to the commit date.
    pub funded_bills: Vec<String>,
}

/// Expand an allocation result into its commit batch.
///
/// Mirrors the ledger the original system kept: one income row, one row per
/// positive allocation, and the balance updates that follow from them. Ids
/// in the result that match nothing in the request's snapshots still get an
/// entry (with a generic description) but no balance update.
pub fn commit_plan(request: &AllocationRequest, result: &AllocationResult) -> CommitPlan {
    let mut entries = vec![LedgerEntry {
        kind: EntryKind::Income,
        description: "Paycheck Income".into(),
        amount: request.paycheck,
        related_id: None,
        category: "Income".into(),
    }];
    let mut fund_balances = HashMap::new();
    let mut debt_balances = HashMap::new();
    let mut funded_bills = Vec::new();

    for bill in &request.bills {
        let Some(amount) = positive(result.bill_allocations.get(&bill.id)) else {
            continue;
        };
        entries.push(LedgerEntry {
            kind: EntryKind::AllocationBill,
            description: format!("Allocated to {}", bill.name),
            amount,
            related_id: Some(bill.id.clone()),
            category: "Fixed Bills".into(),
        });
        funded_bills.push(bill.id.clone());
    }

    for fund in &request.funds {
        let Some(amount) = positive(result.fund_allocations.get(&fund.id)) else {
            continue;
        };
        entries.push(LedgerEntry {
            kind: EntryKind::AllocationFund,
            description: format!("Allocated to {}", fund.name),
            amount,
            related_id: Some(fund.id.clone()),
            category: "Sinking Funds".into(),
        });
        fund_balances.insert(fund.id.clone(), fund.current_amount + amount);
    }

    if result.emergency_fund > Decimal::ZERO {
        entries.push(LedgerEntry {
            kind: EntryKind::AllocationFund,
            description: "Allocated to Emergency Fund".into(),
            amount: result.emergency_fund,
            related_id: Some("emergency_fund".into()),
            category: "Savings".into(),
        });
    }

    for debt in &request.debts {
        let Some(amount) = positive(result.debt_allocations.get(&debt.id)) else {
            continue;
        };
        entries.push(LedgerEntry {
            kind: EntryKind::AllocationDebt,
            description: format!("Payment to {}", debt.name),
            amount,
            related_id: Some(debt.id.clone()),
            category: "Debt".into(),
        });
        debt_balances.insert(
            debt.id.clone(),
            (debt.current_balance - amount).max(Decimal::ZERO),
        );
    }

    // Allocations referencing ids absent from the snapshots still deserve a
    // ledger row; they just cannot update any balance.
    for (id, amount) in &result.bill_allocations {
        if !request.bills.iter().any(|b| &b.id == id) {
            entries.push(orphan_entry(
                EntryKind::AllocationBill,
                "Allocated to Bill",
                "Fixed Bills",
                id,
                *amount,
            ));
        }
    }
    for (id, amount) in &result.fund_allocations {
        if !request.funds.iter().any(|f| &f.id == id) {
            entries.push(orphan_entry(
                EntryKind::AllocationFund,
                "Allocated to Fund",
                "Sinking Funds",
                id,
                *amount,
            ));
        }
    }
    for (id, amount) in &result.debt_allocations {
        if !request.debts.iter().any(|d| &d.id == id) {
            entries.push(orphan_entry(
                EntryKind::AllocationDebt,
                "Payment to Debt",
                "Debt",
                id,
                *amount,
            ));
        }
    }

    CommitPlan {
        entries,
        fund_balances,
        debt_balances,
        new_emergency_fund: request.current_ef + result.emergency_fund,
        funded_bills,
    }
}

fn positive(amount: Option<&Decimal>) -> Option<Decimal> {
    amount.copied().filter(|a| *a > Decimal::ZERO)
}

fn orphan_entry(
    kind: EntryKind,
    description: &str,
    category: &str,
    id: &str,
    amount: Decimal,
) -> LedgerEntry {
    LedgerEntry {
        kind,
        description: description.into(),
        amount,
        related_id: Some(id.to_string()),
        category: category.into(),
    }
}
