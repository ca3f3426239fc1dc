//! Portfolio analytics.
//!
//! Pure functions over return and value series. Nothing here keeps state,
//! performs I/O or returns an error: degenerate input propagates as `0`,
//! `NaN` or `Infinity`.

mod allocation;
mod returns;
mod risk;

pub use allocation::{asset_allocation, position_size, validate_allocation};
pub use returns::{
    annualized_returns, cagr, percentage_change, portfolio_value, roi,
};
pub use risk::{
    annualized_volatility, calculate_risk_metrics, correlation, correlation_matrix,
    cumulative_growth, expected_shortfall, labeled_correlation_matrix, max_drawdown, mean,
    risk_adjusted_returns, sample_std_dev, sharpe_ratio, value_at_risk, TRADING_DAYS,
};
