use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A revolving liability with a contractual minimum payment.
///
/// `current_balance` never goes below zero and only decreases across
/// allocation runs (new charges are outside the engine).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Debt {
    pub id: String,
    pub name: String,
    /// Balance when the debt was first tracked.
    pub original_balance: Decimal,
    pub current_balance: Decimal,
    pub min_payment: Decimal,
    /// Annual percentage rate. Informational; the allocation math ignores it.
    pub apr: Decimal,
}

impl Debt {
    pub fn new(
        id: String,
        name: String,
        original_balance: Decimal,
        min_payment: Decimal,
        apr: Decimal,
    ) -> Self {
        Self {
            id,
            name,
            original_balance,
            current_balance: original_balance,
            min_payment,
            apr,
        }
    }

    pub fn is_retired(&self) -> bool {
        self.current_balance <= Decimal::ZERO
    }
}
