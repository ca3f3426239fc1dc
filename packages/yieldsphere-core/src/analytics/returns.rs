//! Return and value calculations.

use crate::types::{Position, ReturnsSummary};

/// Percentage change from `previous` to `current`.
///
/// Measured against `|previous|` so a move away from a negative base keeps
/// its sign. Returns `0` when `previous` is zero.
pub fn percentage_change(current: f64, previous: f64) -> f64 {
    if previous == 0.0 {
        return 0.0;
    }
    ((current - previous) / previous.abs()) * 100.0
}

/// Sum of `quantity * price` over all positions.
pub fn portfolio_value(positions: &[Position]) -> f64 {
    positions.iter().map(Position::value).sum()
}

/// Total and annualized return for a holding period.
///
/// # Arguments
///
/// * `initial` - Starting value, must be positive
/// * `current` - Current value
/// * `years` - Holding period in years, must be positive
///
/// A zero `initial` or `years` is not guarded and yields `NaN` or infinite
/// fields.
pub fn annualized_returns(initial: f64, current: f64, years: f64) -> ReturnsSummary {
    let total_return = ((current - initial) / initial) * 100.0;
    let annualized_return = ((current / initial).powf(1.0 / years) - 1.0) * 100.0;

    ReturnsSummary {
        total_return,
        annualized_return,
    }
}

/// Compound annual growth rate in percent. Returns `0` for a non-positive horizon.
pub fn cagr(initial: f64, final_value: f64, years: f64) -> f64 {
    if years <= 0.0 {
        return 0.0;
    }
    ((final_value / initial).powf(1.0 / years) - 1.0) * 100.0
}

/// Return on investment in percent. Returns `0` for a zero investment.
pub fn roi(initial_investment: f64, final_value: f64) -> f64 {
    if initial_investment == 0.0 {
        return 0.0;
    }
    ((final_value - initial_investment) / initial_investment) * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_percentage_change() {
        assert_relative_eq!(percentage_change(110.0, 100.0), 10.0, epsilon = 1e-9);
        assert_relative_eq!(percentage_change(90.0, 100.0), -10.0, epsilon = 1e-9);
        // Negative base: -50 -> -25 is an improvement
        assert_relative_eq!(percentage_change(-25.0, -50.0), 50.0, epsilon = 1e-9);
    }

    #[test]
    fn test_percentage_change_zero_previous() {
        for current in [0.0, 1.0, -42.0, 1e12, f64::INFINITY] {
            assert_eq!(percentage_change(current, 0.0), 0.0);
        }
    }

    #[test]
    fn test_portfolio_value() {
        let positions = vec![
            Position::new("ETH", 2.0, 1500.0, "defi"),
            Position::new("USDC", 500.0, 1.0, "stable"),
            Position::new("AAVE", 4.0, 80.0, "defi"),
        ];
        assert_eq!(portfolio_value(&positions), 3000.0 + 500.0 + 320.0);
    }

    #[test]
    fn test_portfolio_value_empty() {
        assert_eq!(portfolio_value(&[]), 0.0);
    }

    #[test]
    fn test_annualized_returns() {
        let summary = annualized_returns(10_000.0, 12_100.0, 2.0);
        assert_relative_eq!(summary.total_return, 21.0, epsilon = 1e-9);
        // sqrt(1.21) = 1.1
        assert_relative_eq!(summary.annualized_return, 10.0, epsilon = 1e-9);
    }

    #[test]
    fn test_annualized_returns_zero_initial_is_not_finite() {
        let summary = annualized_returns(0.0, 100.0, 1.0);
        assert!(!summary.total_return.is_finite());
        assert!(!summary.annualized_return.is_finite());
    }

    #[test]
    fn test_cagr() {
        // 1000 -> 1331 over 3 years is 10% a year
        assert_relative_eq!(cagr(1000.0, 1331.0, 3.0), 10.0, epsilon = 1e-9);
        assert_eq!(cagr(1000.0, 2000.0, 0.0), 0.0);
        assert_eq!(cagr(1000.0, 2000.0, -1.0), 0.0);
    }

    #[test]
    fn test_roi() {
        assert_relative_eq!(roi(10_000.0, 11_500.0), 15.0, epsilon = 1e-9);
        assert_relative_eq!(roi(200.0, 150.0), -25.0, epsilon = 1e-9);
        assert_eq!(roi(0.0, 150.0), 0.0);
    }
}
