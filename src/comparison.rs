use std::cmp::Ordering;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::SimulationConfig;
use crate::debt::{Debt, Strategy};
use crate::error::PayoffError;
use crate::simulation::{PayoffResult, calculate_debt_payoff_with};

/// Payoff plans for the same debts under both strategies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyComparison {
    pub snowball: PayoffResult,
    pub avalanche: PayoffResult,
}

impl StrategyComparison {
    pub fn result(&self, strategy: Strategy) -> &PayoffResult {
        match strategy {
            Strategy::Snowball => &self.snowball,
            Strategy::Avalanche => &self.avalanche,
        }
    }

    /// Interest avoided by choosing avalanche over snowball. Negative when snowball is cheaper.
    pub fn interest_saved(&self) -> Decimal {
        self.snowball.total_interest - self.avalanche.total_interest
    }

    /// Months avoided by choosing avalanche over snowball.
    pub fn months_saved(&self) -> i64 {
        i64::from(self.snowball.months) - i64::from(self.avalanche.months)
    }

    /// The cheaper strategy. Ties on interest go to the shorter plan, then to snowball.
    pub fn recommended(&self) -> Strategy {
        let by_interest = self
            .avalanche
            .total_interest
            .cmp(&self.snowball.total_interest);
        match by_interest.then(self.avalanche.months.cmp(&self.snowball.months)) {
            Ordering::Less => Strategy::Avalanche,
            Ordering::Equal | Ordering::Greater => Strategy::Snowball,
        }
    }
}

/// Runs the payoff simulation for every strategy on the same input.
///
/// # Errors
///
/// Returns the first error either simulation produces.
pub fn compare_strategies(
    debts: &[Debt],
    additional_payment: Decimal,
    config: &SimulationConfig,
) -> Result<StrategyComparison, PayoffError> {
    let snowball =
        calculate_debt_payoff_with(debts, Strategy::Snowball, additional_payment, config)?;
    let avalanche =
        calculate_debt_payoff_with(debts, Strategy::Avalanche, additional_payment, config)?;

    tracing::debug!(
        snowball_months = snowball.months,
        avalanche_months = avalanche.months,
        snowball_interest = %snowball.total_interest,
        avalanche_interest = %avalanche.total_interest,
        "Compared payoff strategies"
    );

    Ok(StrategyComparison {
        snowball,
        avalanche,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_avalanche_saves_interest_when_small_debt_is_cheap() {
        let debts = vec![
            Debt::new(dec!(1000), dec!(0.02), dec!(30)),
            Debt::new(dec!(5000), dec!(0.24), dec!(100)),
        ];
        let comparison =
            compare_strategies(&debts, dec!(200), &SimulationConfig::default()).unwrap();

        assert_eq!(comparison.snowball.payoff_timeline[0].debt_index, 0);
        assert_eq!(comparison.avalanche.payoff_timeline[0].debt_index, 1);
        assert!(comparison.interest_saved() > Decimal::ZERO);
        assert_eq!(comparison.recommended(), Strategy::Avalanche);
    }

    #[test]
    fn test_identical_orderings_recommend_snowball() {
        // Smallest balance also carries the highest rate, so both plans are the same.
        let debts = vec![
            Debt::new(dec!(500), dec!(0.10), dec!(50)),
            Debt::new(dec!(100), dec!(0.25), dec!(25)),
            Debt::new(dec!(900), dec!(0.05), dec!(40)),
        ];
        let comparison =
            compare_strategies(&debts, dec!(100), &SimulationConfig::default()).unwrap();

        assert_eq!(comparison.snowball, comparison.avalanche);
        assert_eq!(comparison.interest_saved(), Decimal::ZERO);
        assert_eq!(comparison.months_saved(), 0);
        assert_eq!(comparison.recommended(), Strategy::Snowball);
    }

    #[test]
    fn test_result_lookup_by_strategy() {
        let debts = vec![Debt::new(dec!(200), dec!(0.12), dec!(50))];
        let comparison = compare_strategies(&debts, dec!(0), &SimulationConfig::default()).unwrap();
        for strategy in Strategy::ALL {
            assert_eq!(comparison.result(strategy).payoff_month(0), Some(5));
        }
    }

    #[test]
    fn test_errors_propagate() {
        let debts = vec![Debt::new(dec!(1000), dec!(0.36), dec!(10))];
        let config = SimulationConfig::default().with_max_months(24);
        let err = compare_strategies(&debts, dec!(0), &config).unwrap_err();
        assert!(matches!(err, PayoffError::NotConverging { max_months: 24, .. }));
    }
}
