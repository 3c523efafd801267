use serde::{Deserialize, Serialize};

/// Label of the row holding the balance-sheet total, matched case-insensitively.
pub const TOTAL_ASSETS_LABEL: &str = "TOTAL ASSETS";

/// Label of the short-term assets row used for the current ratio.
pub const CURRENT_ASSETS_LABEL: &str = "CURRENT ASSETS";

/// Label of the short-term liabilities row used for the current ratio.
pub const CURRENT_LIABILITIES_LABEL: &str = "CURRENT LIABILITIES";

/// One row of a comparative statement: a line-item label and its value for
/// each of the two reporting years.
///
/// Rows have no identity beyond their position; only the three sentinel
/// labels above are ever looked up individually.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineItem {
    pub label: String,
    pub prior_value: f64,
    pub current_value: f64,
}

impl LineItem {
    pub fn new(label: impl Into<String>, prior_value: f64, current_value: f64) -> Self {
        Self {
            label: label.into(),
            prior_value,
            current_value,
        }
    }
}

/// Finds the first row whose label contains `needle`, ignoring case.
///
/// When several rows match, the topmost one wins.
pub fn find_row<'a>(rows: &'a [LineItem], needle: &str) -> Option<&'a LineItem> {
    let needle = needle.to_lowercase();
    rows.iter()
        .find(|row| row.label.to_lowercase().contains(&needle))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_rows() -> Vec<LineItem> {
        vec![
            LineItem::new("A. CURRENT ASSETS", 400.0, 600.0),
            LineItem::new("Cash and equivalents", 100.0, 150.0),
            LineItem::new("TOTAL ASSETS", 1000.0, 1200.0),
            LineItem::new("C. Current liabilities", 200.0, 300.0),
        ]
    }

    #[test]
    fn test_find_row_matches_substring_case_insensitively() {
        let rows = sample_rows();
        let found = find_row(&rows, CURRENT_LIABILITIES_LABEL).unwrap();
        assert_eq!(found.label, "C. Current liabilities");
    }

    #[test]
    fn test_find_row_takes_first_of_several_matches() {
        let rows = sample_rows();
        // "CURRENT ASSETS" is a substring of the first row only, but "ASSETS"
        // appears in two rows; the scan stops at the topmost hit.
        let found = find_row(&rows, "assets").unwrap();
        assert_eq!(found.label, "A. CURRENT ASSETS");
    }

    #[test]
    fn test_find_row_returns_none_when_absent() {
        let rows = vec![LineItem::new("Inventory", 50.0, 60.0)];
        assert!(find_row(&rows, TOTAL_ASSETS_LABEL).is_none());
    }

    #[test]
    fn test_serialization_round_trip() {
        let row = LineItem::new("TOTAL ASSETS", 1000.0, 1200.0);
        let json = serde_json::to_string(&row).unwrap();
        assert!(json.contains("TOTAL ASSETS"));

        let back: LineItem = serde_json::from_str(&json).unwrap();
        assert_eq!(back, row);
    }
}
