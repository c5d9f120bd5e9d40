use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// How a sinking fund participates in allocation.
///
/// `Annual` funds receive drip contributions inside the waterfall; `Simple`
/// funds only share in whatever is left after the snowball.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FundKind {
    Annual,
    Simple,
}

impl FundKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Annual => "annual",
            Self::Simple => "simple",
        }
    }

    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "annual" => Self::Annual,
            _ => Self::Simple,
        }
    }
}

impl std::fmt::Display for FundKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A savings goal the user contributes to over many pay cycles.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SinkingFund {
    pub id: String,
    pub name: String,
    pub target_amount: Decimal,
    pub current_amount: Decimal,
    /// Weight used when distributing leftover money (1–10, 10 highest).
    pub priority: u8,
    pub kind: FundKind,
    /// For annual funds, when the expense comes due.
    pub due_date: Option<NaiveDate>,
}

impl SinkingFund {
    pub fn new(id: String, name: String, target_amount: Decimal, priority: u8) -> Self {
        Self {
            id,
            name,
            target_amount,
            current_amount: Decimal::ZERO,
            priority,
            kind: FundKind::Simple,
            due_date: None,
        }
    }

    /// How much is still missing toward the target. Never negative.
    pub fn remaining_to_target(&self) -> Decimal {
        (self.target_amount - self.current_amount).max(Decimal::ZERO)
    }
}
