use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::ledger::{EntryKind, LedgerEntry};
use crate::models::{Bill, SinkingFund};

/// A user-directed move of saved money onto a bill, ready to commit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferPlan {
    pub source_fund_id: String,
    pub target_bill_id: String,
    pub amount: Decimal,
    /// The source fund's balance after the transfer.
    pub new_fund_balance: Decimal,
    /// Paired ledger rows: money out of the fund, money onto the bill.
    pub entries: Vec<LedgerEntry>,
}

/// An expense charged against a sinking fund, ready to commit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpensePlan {
    pub fund_id: String,
    pub amount: Decimal,
    /// May be negative: overspending a fund is allowed and visible.
    pub new_fund_balance: Decimal,
    pub entry: LedgerEntry,
}

/// Plan covering a bill from a sinking fund's balance.
///
/// The transfer must be positive and the fund must actually hold the money;
/// unlike an expense, a reallocation never overdraws its source.
pub fn plan_transfer(
    fund: &SinkingFund,
    bill: &Bill,
    amount: Decimal,
) -> Result<TransferPlan, EngineError> {
    if amount <= Decimal::ZERO {
        return Err(EngineError::InvalidAmount(
            "transfer amount must be positive".into(),
        ));
    }
    if fund.current_amount < amount {
        return Err(EngineError::InsufficientFunds(format!(
            "{} holds {}, needs {}",
            fund.name, fund.current_amount, amount
        )));
    }

    let entries = vec![
        LedgerEntry {
            kind: EntryKind::ReallocationOut,
            description: format!("Transferred to {}", bill.name),
            amount: -amount,
            related_id: Some(fund.id.clone()),
            category: "Reallocation".into(),
        },
        LedgerEntry {
            kind: EntryKind::AllocationBill,
            description: format!("Covered by {}", fund.name),
            amount,
            related_id: Some(bill.id.clone()),
            category: "Fixed Bills".into(),
        },
    ];

    Ok(TransferPlan {
        source_fund_id: fund.id.clone(),
        target_bill_id: bill.id.clone(),
        amount,
        new_fund_balance: fund.current_amount - amount,
        entries,
    })
}

/// Plan spending out of a sinking fund.
pub fn plan_expense(
    fund: &SinkingFund,
    amount: Decimal,
    memo: &str,
) -> Result<ExpensePlan, EngineError> {
    if amount <= Decimal::ZERO {
        return Err(EngineError::InvalidAmount(
            "expense amount must be positive".into(),
        ));
    }

    let description = if memo.is_empty() { "Expense" } else { memo };
    Ok(ExpensePlan {
        fund_id: fund.id.clone(),
        amount,
        new_fund_balance: fund.current_amount - amount,
        entry: LedgerEntry {
            kind: EntryKind::Expense,
            description: description.into(),
            amount: -amount,
            related_id: Some(fund.id.clone()),
            category: fund.name.clone(),
        },
    })
}
