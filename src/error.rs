use thiserror::Error;

/// Errors raised before any allocation math runs.
///
/// A shortfall (required obligations exceeding the paycheck) is not an
/// error: the waterfall still completes and the caller inspects the result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("invalid paycheck amount: {0}")]
    InvalidPaycheck(String),

    #[error("invalid due day {0}: must be between 1 and 31")]
    InvalidDueDay(u32),

    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    #[error("insufficient funds: {0}")]
    InsufficientFunds(String),
}
