//! # Financial Statement Analyzer
//!
//! A library for comparative two-year financial statement analysis: growth
//! rates, composition shares and a liquidity ratio computed from a small
//! three-column table, with optional AI-assisted commentary over the results.
//!
//! ## Core Concepts
//!
//! - **Line Item**: one statement row holding a label, a prior-year value and a current-year value
//! - **Derived Table**: the input rows plus growth rate and each item's share of total assets
//! - **Current Ratio**: current assets over current liabilities, computed per year and downgraded
//!   to "unavailable" instead of failing when the inputs are missing or zero
//! - **AI Narrative** (feature `gemini`): one-shot commentary and a chat session seeded with the
//!   computed data snapshot
//!
//! ## Example
//!
//! ```rust
//! use financial_statement_analyzer::*;
//!
//! let rows = vec![
//!     LineItem::new("CURRENT ASSETS", 400.0, 600.0),
//!     LineItem::new("TOTAL ASSETS", 1000.0, 1200.0),
//!     LineItem::new("CURRENT LIABILITIES", 200.0, 300.0),
//! ];
//!
//! let analysis = analyze_statement(&rows)?;
//! println!("{}", report::text_table(&analysis));
//! # Ok::<(), AnalysisError>(())
//! ```

pub mod conversation;
pub mod error;
pub mod ingestion;
pub mod metrics;
pub mod report;
pub mod schema;

#[cfg(feature = "gemini")]
pub mod llm;

pub use conversation::{ChatTurn, ConversationState, Role, SessionSlot};
pub use error::{AnalysisError, FailureClass, Result};
pub use ingestion::{read_csv, read_statement, rows_from_records};
pub use metrics::{compute_current_ratio, compute_metrics, EPSILON};
pub use schema::*;

use log::{debug, info};
use serde::{Deserialize, Serialize};

/// One row of the derived table: the original values preserved unchanged,
/// plus the computed columns (all percentages).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DerivedRow {
    pub label: String,
    pub prior_value: f64,
    pub current_value: f64,
    /// Year-over-year growth in percent.
    pub growth_rate: f64,
    /// Share of prior-year total assets, in percent.
    pub prior_share: f64,
    /// Share of current-year total assets, in percent.
    pub current_share: f64,
}

/// A ratio value that may be undefined for a year. The unavailable case is
/// explicit; no raw division-by-zero result ever escapes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub enum RatioValue {
    Available(f64),
    Unavailable,
}

impl RatioValue {
    pub fn value(&self) -> Option<f64> {
        match self {
            Self::Available(v) => Some(*v),
            Self::Unavailable => None,
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Self::Available(_))
    }
}

/// The current ratio for both reporting years. Each year stands on its own:
/// one being unavailable says nothing about the other.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct CurrentRatio {
    pub prior: RatioValue,
    pub current: RatioValue,
}

impl CurrentRatio {
    /// Year-over-year change of the ratio, when both years are available.
    pub fn delta(&self) -> Option<f64> {
        match (self.prior.value(), self.current.value()) {
            (Some(prior), Some(current)) => Some(current - prior),
            _ => None,
        }
    }
}

/// Everything computed from one statement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatementAnalysis {
    pub rows: Vec<DerivedRow>,
    pub current_ratio: CurrentRatio,
}

pub struct StatementAnalyzer;

impl StatementAnalyzer {
    /// Runs the full metrics pass over a statement: derived table plus the
    /// per-year current ratio.
    pub fn analyze(rows: &[LineItem]) -> Result<StatementAnalysis> {
        if rows.is_empty() {
            return Err(AnalysisError::EmptyInput);
        }

        info!("Analyzing statement with {} line items", rows.len());

        let derived = metrics::compute_metrics(rows)?;
        let current_ratio = metrics::compute_current_ratio(rows);

        debug!(
            "Derived {} rows; current ratio prior={:?} current={:?}",
            derived.len(),
            current_ratio.prior,
            current_ratio.current
        );

        Ok(StatementAnalysis {
            rows: derived,
            current_ratio,
        })
    }
}

pub fn analyze_statement(rows: &[LineItem]) -> Result<StatementAnalysis> {
    StatementAnalyzer::analyze(rows)
}
