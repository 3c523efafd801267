use crate::error::{AnalysisError, Result};
use crate::schema::{
    find_row, LineItem, CURRENT_ASSETS_LABEL, CURRENT_LIABILITIES_LABEL, TOTAL_ASSETS_LABEL,
};
use crate::{CurrentRatio, DerivedRow, RatioValue};
use log::warn;

/// Substitute for a zero denominator. Keeps every derived column finite
/// instead of special-casing zero baselines as undefined.
pub const EPSILON: f64 = 1e-9;

fn guarded(x: f64) -> f64 {
    if x == 0.0 {
        EPSILON
    } else {
        x
    }
}

// NaN/infinities smuggled in by a caller behave like unparseable input: zero.
fn sanitize(x: f64) -> f64 {
    if x.is_finite() {
        x
    } else {
        0.0
    }
}

/// Computes the derived table: growth rate plus prior- and current-year
/// composition shares for every row.
///
/// Shares are taken against the row matching `TOTAL ASSETS` (case-insensitive
/// substring), each year against its own total. Without that row the whole
/// computation fails with [`AnalysisError::MissingKeyRow`]; there is no
/// partial output.
pub fn compute_metrics(rows: &[LineItem]) -> Result<Vec<DerivedRow>> {
    let total_assets = find_row(rows, TOTAL_ASSETS_LABEL)
        .ok_or_else(|| AnalysisError::MissingKeyRow(TOTAL_ASSETS_LABEL.to_string()))?;

    let total_prior = guarded(sanitize(total_assets.prior_value));
    let total_current = guarded(sanitize(total_assets.current_value));

    let derived = rows
        .iter()
        .map(|row| {
            let prior = sanitize(row.prior_value);
            let current = sanitize(row.current_value);
            DerivedRow {
                label: row.label.clone(),
                prior_value: prior,
                current_value: current,
                growth_rate: (current - prior) / guarded(prior) * 100.0,
                prior_share: prior / total_prior * 100.0,
                current_share: current / total_current * 100.0,
            }
        })
        .collect();

    Ok(derived)
}

/// Computes the current ratio (current assets / current liabilities) for each
/// year independently.
///
/// This is a secondary metric: missing rows or a zero denominator downgrade
/// the affected value(s) to [`RatioValue::Unavailable`] with a warning rather
/// than failing the analysis.
pub fn compute_current_ratio(rows: &[LineItem]) -> CurrentRatio {
    let assets = find_row(rows, CURRENT_ASSETS_LABEL);
    let liabilities = find_row(rows, CURRENT_LIABILITIES_LABEL);

    let (assets, liabilities) = match (assets, liabilities) {
        (Some(a), Some(l)) => (a, l),
        _ => {
            warn!(
                "Current ratio unavailable: no rows matching '{}' and '{}'",
                CURRENT_ASSETS_LABEL, CURRENT_LIABILITIES_LABEL
            );
            return CurrentRatio {
                prior: RatioValue::Unavailable,
                current: RatioValue::Unavailable,
            };
        }
    };

    let ratio_for = |year: &str, numerator: f64, denominator: f64| {
        let numerator = sanitize(numerator);
        let denominator = sanitize(denominator);
        if denominator == 0.0 {
            warn!("Current ratio unavailable for {year}: current liabilities are zero");
            RatioValue::Unavailable
        } else {
            RatioValue::Available(numerator / denominator)
        }
    };

    CurrentRatio {
        prior: ratio_for("prior year", assets.prior_value, liabilities.prior_value),
        current: ratio_for(
            "current year",
            assets.current_value,
            liabilities.current_value,
        ),
    }
}
