//! Risk metrics over return series.
//!
//! Returns are periodic percentages (`1.5` means +1.5% for the period).
//! Standard deviations use the sample (`n - 1`) denominator, so a series
//! needs at least two points before the ratios become meaningful.

use crate::types::{AssetReturns, CorrelationMatrix, RiskAdjustedReturns, RiskMetrics};

/// Trading days per year used for annualization.
pub const TRADING_DAYS: f64 = 252.0;

/// Multiplier used to derive the proxy market series for beta.
const MARKET_PROXY_FACTOR: f64 = 1.2;

/// Arithmetic mean. `NaN` for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation (Bessel's correction).
///
/// A single value divides by zero and yields `NaN`.
pub fn sample_std_dev(values: &[f64]) -> f64 {
    let avg = mean(values);
    let sum_sq = values.iter().map(|v| (v - avg).powi(2)).sum::<f64>();
    (sum_sq / (values.len() as f64 - 1.0)).sqrt()
}

/// Sharpe ratio: `(mean - risk_free_rate) / sample_std_dev`.
///
/// Not annualized; `risk_free_rate` must be in the same period units as
/// `returns`. Fewer than two returns gives `NaN`, a constant series gives
/// an infinite ratio.
pub fn sharpe_ratio(returns: &[f64], risk_free_rate: f64) -> f64 {
    (mean(returns) - risk_free_rate) / sample_std_dev(returns)
}

/// Sharpe, Sortino and Treynor ratios in one pass over the series.
///
/// Sortino uses the root mean square of the negative returns only. Treynor
/// uses a proxy beta, which measures the series against itself scaled by a
/// fixed market factor.
pub fn risk_adjusted_returns(returns: &[f64], risk_free_rate: f64) -> RiskAdjustedReturns {
    let excess = mean(returns) - risk_free_rate;
    let std_dev = sample_std_dev(returns);

    let downside: Vec<f64> = returns.iter().copied().filter(|&r| r < 0.0).collect();
    let downside_deviation =
        (downside.iter().map(|r| r.powi(2)).sum::<f64>() / downside.len() as f64).sqrt();

    RiskAdjustedReturns {
        sharpe_ratio: excess / std_dev,
        sortino_ratio: excess / downside_deviation,
        treynor_ratio: excess / proxy_beta(returns),
    }
}

/// Beta against a proxy market series of `returns * 1.2`.
///
/// There is no market feed behind the dashboard, so this is a fixed
/// `1 / 1.2` for any series with a non-zero value and `NaN` otherwise.
fn proxy_beta(returns: &[f64]) -> f64 {
    let covariance: f64 = returns
        .iter()
        .map(|r| r * (r * MARKET_PROXY_FACTOR))
        .sum();
    let market_variance: f64 = returns
        .iter()
        .map(|r| (r * MARKET_PROXY_FACTOR).powi(2))
        .sum();
    covariance / market_variance
}

/// Annualized volatility: sample standard deviation scaled by `sqrt(252)`.
pub fn annualized_volatility(returns: &[f64]) -> f64 {
    sample_std_dev(returns) * TRADING_DAYS.sqrt()
}

/// Maximum drawdown of a value series, in percent.
///
/// Single left-to-right pass tracking the running peak. An empty series has
/// no drawdown and a `NaN` value anywhere makes the result `NaN`. A zero peak
/// produces a `0/0` drawdown which never wins the comparison, so the result
/// stays within `0..=100` for non-negative values.
pub fn max_drawdown(values: &[f64]) -> f64 {
    let Some(&first) = values.first() else {
        return 0.0;
    };

    let mut peak = first;
    let mut max_drawdown = 0.0;

    for &value in values {
        if value.is_nan() {
            return f64::NAN;
        }
        if value > peak {
            peak = value;
        }
        let drawdown = ((peak - value) / peak) * 100.0;
        if drawdown > max_drawdown {
            max_drawdown = drawdown;
        }
    }

    max_drawdown
}

/// Growth of 100 compounded through the percentage returns.
///
/// The starting value is included so a loss in the first period shows up
/// as a drawdown.
pub fn cumulative_growth(returns: &[f64]) -> Vec<f64> {
    let mut curve = Vec::with_capacity(returns.len() + 1);
    let mut value = 100.0;
    curve.push(value);
    for r in returns {
        value *= 1.0 + r / 100.0;
        curve.push(value);
    }
    curve
}

/// Historical-simulation Value at Risk.
///
/// Sorts the returns ascending and picks the element at
/// `floor((1 - confidence) * n)`. Higher confidence therefore never yields a
/// larger value. An empty series, a `NaN` confidence, or an index outside the
/// series is `NaN`.
pub fn value_at_risk(returns: &[f64], confidence: f64) -> f64 {
    let mut sorted = returns.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let index = ((1.0 - confidence) * sorted.len() as f64).floor();
    if !index.is_finite() || index < 0.0 {
        return f64::NAN;
    }
    sorted.get(index as usize).copied().unwrap_or(f64::NAN)
}

/// Expected shortfall: mean of every return at or below the VaR cutoff.
pub fn expected_shortfall(returns: &[f64], confidence: f64) -> f64 {
    let var = value_at_risk(returns, confidence);
    let tail: Vec<f64> = returns.iter().copied().filter(|&r| r <= var).collect();
    mean(&tail)
}

/// Pearson correlation over the common prefix of two series.
///
/// A series with zero variance yields `NaN`.
pub fn correlation(a: &[f64], b: &[f64]) -> f64 {
    let n = a.len().min(b.len());
    let (a, b) = (&a[..n], &b[..n]);

    let mean_a = mean(a);
    let mean_b = mean(b);

    let mut variance_a = 0.0;
    let mut variance_b = 0.0;
    let mut covariance = 0.0;
    for (x, y) in a.iter().zip(b) {
        let dx = x - mean_a;
        let dy = y - mean_b;
        variance_a += dx * dx;
        variance_b += dy * dy;
        covariance += dx * dy;
    }

    covariance / (variance_a * variance_b).sqrt()
}

/// Correlation matrix of the assets' return series.
///
/// The diagonal is fixed to `1`; each off-diagonal pair is computed once and
/// mirrored, so the matrix is symmetric by construction.
pub fn correlation_matrix(assets: &[AssetReturns]) -> Vec<Vec<f64>> {
    let n = assets.len();
    let mut matrix = vec![vec![1.0; n]; n];

    for i in 0..n {
        for j in (i + 1)..n {
            let coefficient = correlation(&assets[i].returns, &assets[j].returns);
            matrix[i][j] = coefficient;
            matrix[j][i] = coefficient;
        }
    }

    matrix
}

/// [`correlation_matrix`] with the asset symbols attached.
pub fn labeled_correlation_matrix(assets: &[AssetReturns]) -> CorrelationMatrix {
    CorrelationMatrix {
        assets: assets.iter().map(|a| a.symbol.clone()).collect(),
        matrix: correlation_matrix(assets),
    }
}

/// Calculate the full set of risk metrics for a return series.
///
/// # Arguments
///
/// * `returns` - Periodic returns in percent
/// * `risk_free_rate` - Risk-free rate per period, in percent
/// * `confidence` - Confidence level for VaR and expected shortfall (e.g. 0.95)
///
/// Never fails. Short or flat series leave `NaN`/infinite fields; see
/// [`RiskMetrics::is_finite`].
pub fn calculate_risk_metrics(returns: &[f64], risk_free_rate: f64, confidence: f64) -> RiskMetrics {
    let ratios = risk_adjusted_returns(returns, risk_free_rate);

    RiskMetrics {
        volatility: annualized_volatility(returns),
        sharpe_ratio: ratios.sharpe_ratio,
        sortino_ratio: ratios.sortino_ratio,
        max_drawdown: max_drawdown(&cumulative_growth(returns)),
        beta: proxy_beta(returns),
        var: value_at_risk(returns, confidence),
        expected_shortfall: expected_shortfall(returns, confidence),
        treynor_ratio: ratios.treynor_ratio,
    }
}
