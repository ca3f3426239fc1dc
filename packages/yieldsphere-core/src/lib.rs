//! YieldSphere Core - Portfolio analytics and dashboard access control.
//!
//! This crate provides the logic behind the YieldSphere dashboard:
//!
//! - **Return analytics**: percentage change, portfolio value, CAGR, ROI
//! - **Risk metrics**: Sharpe, Sortino and Treynor ratios, max drawdown,
//!   historical VaR, expected shortfall, correlation matrix
//! - **Allocation**: category breakdown and position sizing
//! - **Auth gate**: route guarding driven by an external wallet-login session
//!
//! Analytics functions are pure and never fail. Ill-conditioned input (empty
//! series, zero variance, zero denominators) comes back as `0`, `NaN` or
//! `Infinity` and callers decide how to display it.
//!
//! # Example
//!
//! ```rust
//! use yieldsphere_core::analytics::{asset_allocation, sharpe_ratio};
//! use yieldsphere_core::Position;
//!
//! let positions = vec![
//!     Position::new("ETH", 2.0, 1500.0, "defi"),
//!     Position::new("USDC", 1000.0, 1.0, "stable"),
//! ];
//! let allocation = asset_allocation(&positions);
//! assert_eq!(allocation.len(), 2);
//!
//! let sharpe = sharpe_ratio(&[1.2, -0.4, 0.8, 0.3], 0.1);
//! assert!(sharpe.is_finite());
//! ```

pub mod analytics;
pub mod auth;
pub mod config;
pub mod format;
pub mod routes;
pub mod types;
pub mod validation;

// Re-export commonly used types
pub use types::{
    AllocationSlice, ApiResponse, AssetReturns, CorrelationMatrix, Position, ReturnsSummary,
    RiskAdjustedReturns, RiskMetrics,
};

// Re-export main functionality
pub use analytics::{
    annualized_returns, asset_allocation, calculate_risk_metrics, correlation_matrix,
    expected_shortfall, max_drawdown, percentage_change, portfolio_value, sharpe_ratio,
    value_at_risk,
};
pub use auth::{AuthGate, AuthSession, AuthSessionProvider, AuthState, GateDecision};
pub use config::Config;

/// Error types for yieldsphere-core operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type for yieldsphere-core operations.
pub type Result<T> = std::result::Result<T, Error>;
