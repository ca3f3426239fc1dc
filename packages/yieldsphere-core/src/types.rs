//! Core data types for YieldSphere analytics.

use serde::{Deserialize, Serialize};

/// A snapshot of one holding.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Position {
    /// Asset symbol (uppercase)
    #[serde(default)]
    pub symbol: String,
    /// Units held
    pub quantity: f64,
    /// Current price per unit
    pub price: f64,
    /// Grouping used for allocation (e.g. "defi", "stable", "index")
    pub category: String,
}

impl Position {
    /// Create a new position.
    pub fn new(symbol: &str, quantity: f64, price: f64, category: &str) -> Self {
        Self {
            symbol: symbol.to_uppercase(),
            quantity,
            price,
            category: category.to_string(),
        }
    }

    /// Market value of this position (quantity * price).
    pub fn value(&self) -> f64 {
        self.quantity * self.price
    }
}

/// Return series for one asset, used for correlation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AssetReturns {
    pub symbol: String,
    pub returns: Vec<f64>,
}

impl AssetReturns {
    pub fn new(symbol: &str, returns: Vec<f64>) -> Self {
        Self {
            symbol: symbol.to_uppercase(),
            returns,
        }
    }
}

/// Pairwise correlations labelled with the asset symbols, in input order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CorrelationMatrix {
    pub assets: Vec<String>,
    pub matrix: Vec<Vec<f64>>,
}

/// Total and annualized return over a holding period, both in percent.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReturnsSummary {
    pub total_return: f64,
    pub annualized_return: f64,
}

/// Excess return per unit of total, downside and systematic risk.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RiskAdjustedReturns {
    pub sharpe_ratio: f64,
    pub sortino_ratio: f64,
    pub treynor_ratio: f64,
}

/// Risk metrics for a return series.
///
/// Computed fresh on every call. Fields may be `NaN` or infinite when the
/// series is too short or has no variance.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RiskMetrics {
    /// Annualized volatility (sample std dev * sqrt(trading days))
    pub volatility: f64,
    pub sharpe_ratio: f64,
    pub sortino_ratio: f64,
    /// Largest peak-to-trough decline of the cumulative growth curve, in percent
    pub max_drawdown: f64,
    pub beta: f64,
    /// Historical VaR at the requested confidence
    pub var: f64,
    pub expected_shortfall: f64,
    pub treynor_ratio: f64,
}

impl RiskMetrics {
    /// True when every metric is a finite number.
    pub fn is_finite(&self) -> bool {
        [
            self.volatility,
            self.sharpe_ratio,
            self.sortino_ratio,
            self.max_drawdown,
            self.beta,
            self.var,
            self.expected_shortfall,
            self.treynor_ratio,
        ]
        .iter()
        .all(|v| v.is_finite())
    }
}

/// One category's share of a portfolio.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct AllocationSlice {
    /// Summed market value of the category
    pub value: f64,
    /// Share of total portfolio value, in percent
    pub percentage: f64,
}

/// API response wrapper used by the CLI.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    /// Create a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            ok: true,
            data: Some(data),
            error: None,
        }
    }

    /// Create an error response.
    pub fn err(error: impl Into<String>) -> Self {
        Self {
            ok: false,
            data: None,
            error: Some(error.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_new() {
        let pos = Position::new("eth", 2.0, 1500.0, "defi");
        assert_eq!(pos.symbol, "ETH");
        assert_eq!(pos.category, "defi");
        assert_eq!(pos.value(), 3000.0);
    }

    #[test]
    fn test_position_deserialize_without_symbol() {
        let pos: Position =
            serde_json::from_str(r#"{"quantity": 3, "price": 10.5, "category": "stable"}"#)
                .unwrap();
        assert_eq!(pos.symbol, "");
        assert_eq!(pos.value(), 31.5);
    }

    #[test]
    fn test_risk_metrics_serializes_camel_case() {
        let metrics = RiskMetrics {
            volatility: 0.2,
            sharpe_ratio: 1.1,
            sortino_ratio: 1.4,
            max_drawdown: 12.0,
            beta: 0.8,
            var: -2.5,
            expected_shortfall: -3.1,
            treynor_ratio: 0.9,
        };
        let json = serde_json::to_value(metrics).unwrap();
        assert_eq!(json["sharpeRatio"], 1.1);
        assert_eq!(json["expectedShortfall"], -3.1);
        assert!(metrics.is_finite());
    }

    #[test]
    fn test_risk_metrics_not_finite() {
        let metrics = RiskMetrics {
            volatility: f64::NAN,
            sharpe_ratio: 0.0,
            sortino_ratio: 0.0,
            max_drawdown: 0.0,
            beta: 0.0,
            var: 0.0,
            expected_shortfall: 0.0,
            treynor_ratio: 0.0,
        };
        assert!(!metrics.is_finite());
    }

    #[test]
    fn test_api_response() {
        let response: ApiResponse<String> = ApiResponse::ok("test".to_string());
        assert!(response.ok);
        assert_eq!(response.data, Some("test".to_string()));

        let err_response: ApiResponse<String> = ApiResponse::err("error");
        assert!(!err_response.ok);
        assert_eq!(err_response.error, Some("error".to_string()));
    }
}
