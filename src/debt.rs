use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::PayoffError;

/// A single outstanding debt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Debt {
    /// The current outstanding balance.
    pub amount: Decimal,
    /// The nominal annual interest rate as a decimal fraction (e.g., 0.18 for 18% APR).
    pub interest_rate: Decimal,
    /// The required minimum monthly payment.
    pub minimum_payment: Decimal,
}

impl Debt {
    pub fn new(amount: Decimal, interest_rate: Decimal, minimum_payment: Decimal) -> Self {
        Self {
            amount,
            interest_rate,
            minimum_payment,
        }
    }

    /// Interest accrued on the current balance over one month, or `None` on overflow.
    pub fn monthly_interest(&self) -> Option<Decimal> {
        accrued_interest(self.amount, self.interest_rate)
    }

    pub fn is_paid_off(&self) -> bool {
        self.amount <= Decimal::ZERO
    }

    /// Checks that every field is non-negative. `index` is the debt's position in the
    /// caller's input and is reported back in the error.
    pub fn validate(&self, index: usize) -> Result<(), PayoffError> {
        let fields = [
            ("amount", self.amount),
            ("interest_rate", self.interest_rate),
            ("minimum_payment", self.minimum_payment),
        ];
        for (field, value) in fields {
            if value < Decimal::ZERO {
                return Err(PayoffError::InvalidDebt {
                    index,
                    field,
                    reason: "cannot be negative",
                });
            }
        }
        Ok(())
    }
}

/// Simple monthly interest on `balance` at a nominal annual rate.
///
/// Returns `None` when the product does not fit in a `Decimal`.
pub fn accrued_interest(balance: Decimal, annual_rate: Decimal) -> Option<Decimal> {
    balance.checked_mul(annual_rate)?.checked_div(dec!(12))
}

/// The order in which extra payments are directed at debts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Smallest balance first, regardless of interest rate.
    Snowball,
    /// Highest interest rate first, regardless of balance.
    Avalanche,
}

impl Strategy {
    pub const ALL: [Strategy; 2] = [Strategy::Snowball, Strategy::Avalanche];

    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Snowball => "snowball",
            Strategy::Avalanche => "avalanche",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Strategy {
    type Err = PayoffError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "snowball" => Ok(Strategy::Snowball),
            "avalanche" => Ok(Strategy::Avalanche),
            _ => Err(PayoffError::UnknownStrategy(s.to_string())),
        }
    }
}

/// Returns the indices of `debts` in payoff priority order.
///
/// The sort is stable, so debts that tie on the sort key keep their input order.
/// The input slice is left untouched.
pub fn order_debts(debts: &[Debt], strategy: Strategy) -> Vec<usize> {
    let mut order: Vec<usize> = (0..debts.len()).collect();
    match strategy {
        Strategy::Snowball => order.sort_by(|&a, &b| debts[a].amount.cmp(&debts[b].amount)),
        Strategy::Avalanche => {
            order.sort_by(|&a, &b| debts[b].interest_rate.cmp(&debts[a].interest_rate))
        }
    }
    order
}
