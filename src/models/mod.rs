mod bill;
mod debt;
mod fund;

pub use bill::Bill;
pub use debt::Debt;
pub use fund::{FundKind, SinkingFund};
