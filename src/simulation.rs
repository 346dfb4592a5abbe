use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::{FreedPaymentRule, SimulationConfig};
use crate::debt::{Debt, Strategy, accrued_interest, order_debts};
use crate::error::PayoffError;

/// Totals for a single simulated month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyPaymentRecord {
    /// 1-based month index.
    pub month: u32,
    /// The total paid across all debts this month.
    pub payment: Decimal,
    /// The sum of all balances at the end of the month.
    pub remaining_balance: Decimal,
    /// The interest accrued across all debts this month.
    pub interest_paid: Decimal,
    /// The extra payment pool offered to the priority debt this month.
    pub extra_payment: Decimal,
}

/// The month in which a debt reached a zero balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DebtPayoff {
    /// Position of the debt in the caller's input.
    pub debt_index: usize,
    pub month: u32,
}

/// The outcome of a payoff simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayoffResult {
    /// Months until every balance reached zero.
    pub months: u32,
    pub total_interest: Decimal,
    pub monthly_payments: Vec<MonthlyPaymentRecord>,
    /// Debts in the order they were paid off.
    pub payoff_timeline: Vec<DebtPayoff>,
}

impl PayoffResult {
    fn empty() -> Self {
        Self {
            months: 0,
            total_interest: Decimal::ZERO,
            monthly_payments: Vec::new(),
            payoff_timeline: Vec::new(),
        }
    }

    /// The total paid over the whole plan, principal and interest. Saturates at
    /// `Decimal::MAX`.
    pub fn total_paid(&self) -> Decimal {
        self.monthly_payments
            .iter()
            .try_fold(Decimal::ZERO, |total, record| total.checked_add(record.payment))
            .unwrap_or(Decimal::MAX)
    }

    /// The month in which the debt at `debt_index` was paid off, if it was part of the plan.
    pub fn payoff_month(&self, debt_index: usize) -> Option<u32> {
        self.payoff_timeline
            .iter()
            .find(|payoff| payoff.debt_index == debt_index)
            .map(|payoff| payoff.month)
    }
}

/// Working copy of a debt that still has a balance.
#[derive(Debug, Clone)]
struct ActiveDebt {
    index: usize,
    balance: Decimal,
    interest_rate: Decimal,
    minimum_payment: Decimal,
}

/// Tracks how much extra money goes to the priority debt each month.
#[derive(Debug)]
struct PaymentPool {
    additional_payment: Decimal,
    rule: FreedPaymentRule,
    reference_minimum: Decimal,
    eliminated: u32,
    freed_minimums: Decimal,
}

impl PaymentPool {
    fn new(
        additional_payment: Decimal,
        rule: FreedPaymentRule,
        reference_minimum: Decimal,
    ) -> Self {
        Self {
            additional_payment,
            rule,
            reference_minimum,
            eliminated: 0,
            freed_minimums: Decimal::ZERO,
        }
    }

    fn release(&mut self, debt: &ActiveDebt) -> Option<()> {
        self.eliminated += 1;
        self.freed_minimums = self.freed_minimums.checked_add(debt.minimum_payment)?;
        Some(())
    }

    /// Debts that started at a zero balance. Only the reference rule counts them.
    fn release_already_paid(&mut self, count: u32) {
        if self.rule == FreedPaymentRule::ReferenceMinimum {
            self.eliminated += count;
        }
    }

    fn available(&self) -> Option<Decimal> {
        match self.rule {
            FreedPaymentRule::EliminatedMinimums => {
                self.additional_payment.checked_add(self.freed_minimums)
            }
            FreedPaymentRule::ReferenceMinimum => Decimal::from(self.eliminated)
                .checked_mul(self.reference_minimum)?
                .checked_add(self.additional_payment),
        }
    }
}

/// Balance of a debt after one month, and what it accrued and paid on the way.
struct MonthStep {
    balance: Decimal,
    interest: Decimal,
    payment: Decimal,
}

impl ActiveDebt {
    /// Returns `None` when the arithmetic leaves the range `Decimal` can hold.
    fn step(&self, extra_payment: Option<Decimal>) -> Option<MonthStep> {
        let interest = accrued_interest(self.balance, self.interest_rate)?;
        let budget = match extra_payment {
            Some(extra) => self.minimum_payment.checked_add(extra)?,
            None => self.minimum_payment,
        };
        let owed = self.balance.checked_add(interest)?;
        let payment = owed.min(budget);
        Some(MonthStep {
            balance: (owed - payment).max(Decimal::ZERO),
            interest,
            payment,
        })
    }
}

/// Sum of balances still owed, saturating at `Decimal::MAX`.
fn outstanding(remaining: &[ActiveDebt]) -> Decimal {
    remaining
        .iter()
        .try_fold(Decimal::ZERO, |total, debt| total.checked_add(debt.balance))
        .unwrap_or(Decimal::MAX)
}

fn not_converging(
    remaining: &[ActiveDebt],
    config: &SimulationConfig,
    month: u32,
) -> PayoffError {
    let remaining_balance = outstanding(remaining);
    tracing::warn!(
        max_months = config.max_months,
        month,
        %remaining_balance,
        "Payoff simulation did not converge"
    );
    PayoffError::NotConverging {
        max_months: config.max_months,
        remaining_balance,
    }
}

/// Simulates paying off `debts` with the default settings.
///
/// # Errors
///
/// See [`calculate_debt_payoff_with`].
pub fn calculate_debt_payoff(
    debts: &[Debt],
    strategy: Strategy,
    additional_payment: Decimal,
) -> Result<PayoffResult, PayoffError> {
    calculate_debt_payoff_with(
        debts,
        strategy,
        additional_payment,
        &SimulationConfig::default(),
    )
}

/// Simulates paying off `debts` month by month.
///
/// Each month every active debt accrues `balance * rate / 12` and receives its minimum
/// payment. The highest priority debt also receives the extra payment pool. No debt is
/// ever paid more than it owes. Once a debt reaches zero its minimum payment is added
/// to the pool for the following months according to `config.freed_payment`.
///
/// # Arguments
///
/// * `debts` - The debts to pay off. The slice is not modified.
/// * `strategy` - Decides which debt receives the extra payment.
/// * `additional_payment` - Money available each month beyond the minimum payments.
/// * `config` - Month ceiling and freed payment rule.
///
/// # Errors
///
/// Returns an error if a debt or the additional payment is negative, or if debts remain
/// after `config.max_months` months. Balances that grow past what `Decimal` can hold
/// are reported as not converging as well.
pub fn calculate_debt_payoff_with(
    debts: &[Debt],
    strategy: Strategy,
    additional_payment: Decimal,
    config: &SimulationConfig,
) -> Result<PayoffResult, PayoffError> {
    for (index, debt) in debts.iter().enumerate() {
        debt.validate(index)?;
    }
    if additional_payment < Decimal::ZERO {
        return Err(PayoffError::InvalidAdditionalPayment(additional_payment));
    }

    let order = order_debts(debts, strategy);
    let reference_minimum = order
        .first()
        .map(|&index| debts[index].minimum_payment)
        .unwrap_or_default();

    let mut remaining: Vec<ActiveDebt> = order
        .iter()
        .filter(|&&index| !debts[index].is_paid_off())
        .map(|&index| ActiveDebt {
            index,
            balance: debts[index].amount,
            interest_rate: debts[index].interest_rate,
            minimum_payment: debts[index].minimum_payment,
        })
        .collect();
    let already_paid = (order.len() - remaining.len()) as u32;

    tracing::debug!(
        debts = remaining.len(),
        already_paid,
        %strategy,
        %additional_payment,
        "Starting payoff simulation"
    );

    let mut pool = PaymentPool::new(additional_payment, config.freed_payment, reference_minimum);
    let mut result = PayoffResult::empty();

    while !remaining.is_empty() {
        if result.months >= config.max_months {
            return Err(not_converging(&remaining, config, result.months));
        }

        let month = result.months + 1;
        let Some(extra_payment) = pool.available() else {
            return Err(not_converging(&remaining, config, month));
        };

        let mut steps = Vec::with_capacity(remaining.len());
        let mut month_payment = Decimal::ZERO;
        let mut month_interest = Decimal::ZERO;
        for (position, debt) in remaining.iter().enumerate() {
            let extra = (position == 0).then_some(extra_payment);
            let totals = debt.step(extra).and_then(|step| {
                month_interest = month_interest.checked_add(step.interest)?;
                month_payment = month_payment.checked_add(step.payment)?;
                Some(step)
            });
            match totals {
                Some(step) => steps.push(step),
                None => return Err(not_converging(&remaining, config, month)),
            }
        }
        let Some(total_interest) = result.total_interest.checked_add(month_interest) else {
            return Err(not_converging(&remaining, config, month));
        };

        for (debt, step) in remaining.iter_mut().zip(steps) {
            debt.balance = step.balance;
        }
        result.months = month;
        result.total_interest = total_interest;

        let mut released = Some(());
        remaining.retain(|debt| {
            if !debt.balance.is_zero() {
                return true;
            }
            tracing::debug!(debt_index = debt.index, month, "Debt paid off");
            released = released.and(pool.release(debt));
            result.payoff_timeline.push(DebtPayoff {
                debt_index: debt.index,
                month,
            });
            false
        });
        if month == 1 {
            pool.release_already_paid(already_paid);
        }
        if released.is_none() {
            return Err(not_converging(&remaining, config, month));
        }

        result.monthly_payments.push(MonthlyPaymentRecord {
            month,
            payment: month_payment,
            remaining_balance: outstanding(&remaining),
            interest_paid: month_interest,
            extra_payment,
        });
    }

    Ok(result)
}
