//! `debt_payoff` is a Rust library for planning how to pay off a set of debts.
//!
//! It simulates repayment month by month under the two common payoff strategies:
//! - **Snowball**: extra money goes to the debt with the smallest balance first.
//! - **Avalanche**: extra money goes to the debt with the highest interest rate first.
//!
//! Every debt receives its minimum payment each month. The current priority debt also
//! receives the extra payment, and once a debt is paid off its minimum payment is rolled
//! into the extra payment for the debts that remain.
//!
//! ## Usage
//!
//! Add `debt_payoff` to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! debt_payoff = "0.1.0"
//! rust_decimal = "1.39.0"
//! rust_decimal_macros = "1.39.0"
//! ```
//!
//! Then, use the `calculate_debt_payoff` function to get the month-by-month plan:
//!
//! ```rust
//! use debt_payoff::{calculate_debt_payoff, Debt, Strategy};
//! use rust_decimal_macros::dec;
//!
//! fn main() {
//!     let debts = vec![
//!         Debt::new(dec!(2_500), dec!(0.199), dec!(75)),
//!         Debt::new(dec!(800), dec!(0.07), dec!(30)),
//!     ];
//!
//!     match calculate_debt_payoff(&debts, Strategy::Avalanche, dec!(150)) {
//!         Ok(result) => {
//!             println!("Debt free in:   {} months", result.months);
//!             println!("Total interest: {:.2}", result.total_interest);
//!             for payoff in &result.payoff_timeline {
//!                 println!("Debt {} paid off in month {}", payoff.debt_index, payoff.month);
//!             }
//!         }
//!         Err(e) => {
//!             eprintln!("Error calculating payoff plan: {}", e);
//!         }
//!     }
//! }
//! ```

pub mod comparison;
pub mod config;
pub mod debt;
pub mod error;
pub mod simulation;

pub use comparison::{StrategyComparison, compare_strategies};
pub use config::{FreedPaymentRule, SimulationConfig, load_config, load_optional_config};
pub use debt::{Debt, Strategy, accrued_interest, order_debts};
pub use error::PayoffError;
pub use simulation::{
    DebtPayoff, MonthlyPaymentRecord, PayoffResult, calculate_debt_payoff,
    calculate_debt_payoff_with,
};
