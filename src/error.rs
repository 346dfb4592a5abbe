use rust_decimal::Decimal;

/// Errors produced while validating input or running a payoff simulation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PayoffError {
    #[error("Invalid debt at index {index}: {field} {reason}")]
    InvalidDebt {
        index: usize,
        field: &'static str,
        reason: &'static str,
    },

    #[error("Additional payment cannot be negative: {0}")]
    InvalidAdditionalPayment(Decimal),

    /// Payments never outpace accruing interest within the month ceiling, or the balance
    /// grew past what `Decimal` can hold. `remaining_balance` saturates at `Decimal::MAX`.
    #[error(
        "Debts not paid off within {max_months} months (remaining balance {remaining_balance}); payments are too low to cover the interest"
    )]
    NotConverging {
        max_months: u32,
        remaining_balance: Decimal,
    },

    #[error("Unknown payoff strategy: {0}")]
    UnknownStrategy(String),
}
