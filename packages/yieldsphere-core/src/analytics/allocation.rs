//! Allocation breakdown and position sizing.

use std::collections::BTreeMap;

use crate::types::{AllocationSlice, Position};

/// Tolerance used when checking that allocation percentages add up to 100.
const ALLOCATION_TOLERANCE: f64 = 0.01;

/// Group positions by category and compute each category's share.
///
/// Percentages are computed independently per category as
/// `category_value / total_value * 100`; no rounding correction is applied,
/// so they sum to 100 only within floating-point error. A zero total leaves
/// every percentage `NaN`.
pub fn asset_allocation(positions: &[Position]) -> BTreeMap<String, AllocationSlice> {
    let mut allocation: BTreeMap<String, AllocationSlice> = BTreeMap::new();

    for position in positions {
        allocation
            .entry(position.category.clone())
            .or_default()
            .value += position.value();
    }

    let total_value: f64 = allocation.values().map(|slice| slice.value).sum();
    for slice in allocation.values_mut() {
        slice.percentage = (slice.value / total_value) * 100.0;
    }

    allocation
}

/// Position size that risks `risk_percentage` of the portfolio when the
/// stop loss sits `stop_loss_percentage` away from entry.
///
/// A zero stop loss is not guarded and yields an infinite size.
pub fn position_size(portfolio_value: f64, risk_percentage: f64, stop_loss_percentage: f64) -> f64 {
    let risk_amount = portfolio_value * (risk_percentage / 100.0);
    risk_amount / (stop_loss_percentage / 100.0)
}

/// Check that allocation percentages add up to 100 (within 0.01).
pub fn validate_allocation(percentages: &[f64]) -> bool {
    let sum: f64 = percentages.iter().sum();
    (sum - 100.0).abs() < ALLOCATION_TOLERANCE
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn sample_positions() -> Vec<Position> {
        vec![
            Position::new("ETH", 2.0, 1500.0, "defi"),
            Position::new("AAVE", 10.0, 95.5, "defi"),
            Position::new("USDC", 1234.56, 1.0, "stable"),
            Position::new("DPI", 7.0, 113.3, "index"),
        ]
    }

    #[test]
    fn test_asset_allocation_groups_by_category() {
        let allocation = asset_allocation(&sample_positions());

        assert_eq!(allocation.len(), 3);
        assert_relative_eq!(allocation["defi"].value, 3955.0, epsilon = 1e-9);
        assert_relative_eq!(allocation["stable"].value, 1234.56, epsilon = 1e-9);

        let total = 3955.0 + 1234.56 + 793.1;
        assert_relative_eq!(
            allocation["defi"].percentage,
            3955.0 / total * 100.0,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_asset_allocation_sums_to_hundred() {
        let allocation = asset_allocation(&sample_positions());
        let sum: f64 = allocation.values().map(|s| s.percentage).sum();
        assert!((sum - 100.0).abs() < 1e-9);

        let percentages: Vec<f64> = allocation.values().map(|s| s.percentage).collect();
        assert!(validate_allocation(&percentages));
    }

    #[test]
    fn test_asset_allocation_single_category() {
        let positions = vec![Position::new("USDC", 100.0, 1.0, "stable")];
        let allocation = asset_allocation(&positions);
        assert_eq!(allocation["stable"].percentage, 100.0);
    }

    #[test]
    fn test_asset_allocation_empty() {
        assert!(asset_allocation(&[]).is_empty());
    }

    #[test]
    fn test_asset_allocation_zero_total() {
        let positions = vec![Position::new("ETH", 0.0, 1500.0, "defi")];
        let allocation = asset_allocation(&positions);
        assert!(allocation["defi"].percentage.is_nan());
    }

    #[test]
    fn test_position_size() {
        // Risk 2% of 50k with a 5% stop: 1000 / 0.05
        assert_relative_eq!(position_size(50_000.0, 2.0, 5.0), 20_000.0, epsilon = 1e-6);
        assert!(position_size(50_000.0, 2.0, 0.0).is_infinite());
    }

    #[test]
    fn test_validate_allocation() {
        assert!(validate_allocation(&[50.0, 30.0, 20.0]));
        assert!(validate_allocation(&[33.333, 33.333, 33.334]));
        assert!(!validate_allocation(&[50.0, 30.0]));
        assert!(!validate_allocation(&[]));
    }
}
