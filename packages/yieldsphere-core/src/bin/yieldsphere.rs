//! YieldSphere CLI - Command line access to the dashboard analytics.
//!
//! Every command prints an `ApiResponse` JSON envelope on stdout. Logs go to
//! stderr and are controlled with `RUST_LOG`.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use clap::{Parser, Subcommand, ValueEnum};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::json;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use yieldsphere_core::{
    analytics::{
        annualized_returns, asset_allocation, cagr, calculate_risk_metrics,
        labeled_correlation_matrix, max_drawdown, percentage_change, portfolio_value,
        position_size, roi,
    },
    auth::{AuthGate, AuthSession, AuthSessionProvider, GateDecision},
    routes,
    validation::{is_valid_ethereum_address, validate_transaction, TransactionSide},
    ApiResponse, AssetReturns, Config, Error, Position, Result,
};

#[derive(Parser)]
#[command(name = "yieldsphere")]
#[command(about = "YieldSphere CLI - portfolio analytics and access checks")]
#[command(version)]
struct Cli {
    /// Config file (defaults to YIELDSPHERE_CONFIG or the user config dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Percentage change between two values
    Change {
        #[arg(long)]
        current: f64,
        #[arg(long)]
        previous: f64,
    },
    /// Total value of positions read from a JSON file ("-" for stdin)
    Value {
        #[arg(short, long)]
        file: PathBuf,
    },
    /// Total, annualized, CAGR and ROI figures for a holding period
    Returns {
        #[arg(long)]
        initial: f64,
        #[arg(long)]
        current: f64,
        #[arg(long)]
        years: f64,
    },
    /// Risk metrics for comma-separated percentage returns
    Risk {
        /// e.g. "1.2,-0.4,0.8"
        #[arg(short, long, allow_hyphen_values = true)]
        returns: String,
        /// Risk-free rate per period (defaults to config)
        #[arg(long)]
        risk_free_rate: Option<f64>,
        /// Confidence level for VaR (defaults to config)
        #[arg(long)]
        confidence: Option<f64>,
    },
    /// Maximum drawdown of comma-separated portfolio values
    Drawdown {
        #[arg(short, long)]
        values: String,
    },
    /// Category allocation of positions read from a JSON file ("-" for stdin)
    Allocation {
        #[arg(short, long)]
        file: PathBuf,
    },
    /// Correlation matrix of asset return series read from a JSON file
    Correlation {
        #[arg(short, long)]
        file: PathBuf,
    },
    /// Position size for a risk budget and stop loss
    PositionSize {
        #[arg(long)]
        portfolio_value: f64,
        /// Percent of the portfolio to risk
        #[arg(long)]
        risk: f64,
        /// Stop-loss distance in percent
        #[arg(long)]
        stop_loss: f64,
    },
    /// Evaluate the auth gate for a route and session
    Gate {
        /// Requested location
        #[arg(short, long, default_value = routes::DASHBOARD)]
        path: String,
        #[arg(long)]
        ready: bool,
        #[arg(long)]
        authenticated: bool,
    },
    /// Input validation
    Validate {
        #[command(subcommand)]
        action: ValidateAction,
    },
}

#[derive(Subcommand)]
enum ValidateAction {
    /// Check that a buy or sell is affordable
    Transaction {
        #[arg(long, value_enum)]
        side: Side,
        #[arg(long)]
        amount: f64,
        #[arg(long)]
        balance: f64,
        #[arg(long)]
        price: f64,
    },
    /// Check an Ethereum address
    Address { address: String },
}

#[derive(Clone, Copy, ValueEnum)]
enum Side {
    Buy,
    Sell,
}

impl From<Side> for TransactionSide {
    fn from(side: Side) -> Self {
        match side {
            Side::Buy => TransactionSide::Buy,
            Side::Sell => TransactionSide::Sell,
        }
    }
}

/// Fixed session from command-line flags. There is no wallet SDK behind the
/// CLI, so login and logout always fail.
struct StaticSession(AuthSession);

#[async_trait]
impl AuthSessionProvider for StaticSession {
    fn session(&self) -> AuthSession {
        self.0
    }

    async fn login(&self) -> Result<()> {
        Err(Error::Auth("no wallet provider available in the CLI".to_string()))
    }

    async fn logout(&self) -> Result<()> {
        Err(Error::Auth("no wallet provider available in the CLI".to_string()))
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();

    let result = load_config(cli.config.as_deref()).and_then(|config| run(cli.command, &config));
    println!("{}", envelope(result)?);
    Ok(())
}

/// Wrap a command result in the `ApiResponse` JSON printed on stdout.
fn envelope(result: Result<serde_json::Value>) -> serde_json::Result<String> {
    match result {
        Ok(data) => serde_json::to_string_pretty(&ApiResponse::ok(data)),
        Err(e) => {
            tracing::warn!("Command failed: {}", e);
            serde_json::to_string_pretty(&ApiResponse::<()>::err(e.to_string()))
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => {
            let mut config = Config::load_from_path(path)?;
            config.apply_env();
            Ok(config)
        }
        None => Config::load(),
    }
}

fn run(command: Commands, config: &Config) -> Result<serde_json::Value> {
    match command {
        Commands::Change { current, previous } => Ok(json!({
            "percentageChange": percentage_change(current, previous),
        })),
        Commands::Value { file } => {
            let positions: Vec<Position> = read_json(&file)?;
            Ok(json!({
                "positions": positions.len(),
                "portfolioValue": portfolio_value(&positions),
            }))
        }
        Commands::Returns {
            initial,
            current,
            years,
        } => {
            let summary = annualized_returns(initial, current, years);
            Ok(json!({
                "totalReturn": summary.total_return,
                "annualizedReturn": summary.annualized_return,
                "cagr": cagr(initial, current, years),
                "roi": roi(initial, current),
            }))
        }
        Commands::Risk {
            returns,
            risk_free_rate,
            confidence,
        } => {
            let returns = parse_series(&returns)?;
            let risk_free_rate = risk_free_rate.unwrap_or(config.risk_free_rate);
            let confidence = confidence.unwrap_or(config.confidence_level);
            let metrics = calculate_risk_metrics(&returns, risk_free_rate, confidence);
            if !metrics.is_finite() {
                tracing::warn!(
                    "Risk metrics contain non-finite values for {} returns",
                    returns.len()
                );
            }
            to_value(metrics)
        }
        Commands::Drawdown { values } => {
            let values = parse_series(&values)?;
            Ok(json!({ "maxDrawdown": max_drawdown(&values) }))
        }
        Commands::Allocation { file } => {
            let positions: Vec<Position> = read_json(&file)?;
            to_value(asset_allocation(&positions))
        }
        Commands::Correlation { file } => {
            let assets: Vec<AssetReturns> = read_json(&file)?;
            to_value(labeled_correlation_matrix(&assets))
        }
        Commands::PositionSize {
            portfolio_value,
            risk,
            stop_loss,
        } => Ok(json!({
            "positionSize": position_size(portfolio_value, risk, stop_loss),
        })),
        Commands::Gate {
            path,
            ready,
            authenticated,
        } => {
            let gate = AuthGate::new(StaticSession(AuthSession::new(ready, authenticated)))
                .with_login_route(config.login_route.clone());
            let protected = routes::is_protected(&path);
            let decision = if protected {
                gate.evaluate(&path)
            } else {
                GateDecision::Render
            };
            Ok(json!({
                "path": path,
                "protected": protected,
                "state": gate.state(),
                "decision": decision,
            }))
        }
        Commands::Validate { action } => match action {
            ValidateAction::Transaction {
                side,
                amount,
                balance,
                price,
            } => {
                validate_transaction(side.into(), amount, balance, price)?;
                Ok(json!({ "valid": true }))
            }
            ValidateAction::Address { address } => Ok(json!({
                "address": address,
                "valid": is_valid_ethereum_address(&address),
            })),
        },
    }
}

fn to_value<T: Serialize>(data: T) -> Result<serde_json::Value> {
    Ok(serde_json::to_value(data)?)
}

/// Parse a comma-separated list of numbers.
fn parse_series(raw: &str) -> Result<Vec<f64>> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<f64>()
                .map_err(|_| Error::InvalidInput(format!("not a number: {}", s)))
        })
        .collect()
}

/// Read JSON from a file, or stdin when the path is "-".
fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = if path == Path::new("-") {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        fs::read_to_string(path)?
    };
    Ok(serde_json::from_str(&content)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_bad_config_is_reported_in_envelope() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "confidence_level = \"high\"").unwrap();

        let result = load_config(Some(&path)).and_then(|config| {
            run(
                Commands::Change {
                    current: 110.0,
                    previous: 100.0,
                },
                &config,
            )
        });
        let json: serde_json::Value = serde_json::from_str(&envelope(result).unwrap()).unwrap();
        assert_eq!(json["ok"], false);
        assert!(json["error"].as_str().unwrap().starts_with("Config error"));
    }

    #[test]
    fn test_command_result_is_wrapped() {
        let config = Config::default();
        let result = run(
            Commands::Change {
                current: 110.0,
                previous: 100.0,
            },
            &config,
        );
        let json: serde_json::Value = serde_json::from_str(&envelope(result).unwrap()).unwrap();
        assert_eq!(json["ok"], true);
        let change = json["data"]["percentageChange"].as_f64().unwrap();
        assert!((change - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_parse_series() {
        assert_eq!(parse_series("1.5, -2,,3").unwrap(), vec![1.5, -2.0, 3.0]);
        assert!(matches!(parse_series("1,x"), Err(Error::InvalidInput(_))));
    }
}
