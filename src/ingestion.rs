use crate::error::{AnalysisError, Result};
use crate::schema::LineItem;
use calamine::{open_workbook_auto, Data, Reader};
use log::{debug, info};
use std::fs::File;
use std::path::Path;

const EXPECTED_COLUMNS: usize = 3;

/// Reads a comparative statement from disk, dispatching on the file
/// extension: `.csv` through the CSV reader, `.xlsx`/`.xlsm`/`.xls`/
/// `.xlsb`/`.ods` through calamine.
///
/// The first row is treated as a header and must have exactly three columns
/// (line item, prior year, current year); the columns are interpreted
/// positionally regardless of what the header calls them.
pub fn read_statement(path: impl AsRef<Path>) -> Result<Vec<LineItem>> {
    let path = path.as_ref();
    info!("Loading statement from {}", path.display());

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    let rows = match extension.as_str() {
        "csv" => read_csv(File::open(path)?)?,
        "xlsx" | "xlsm" | "xls" | "xlsb" | "ods" => read_spreadsheet(path)?,
        other => return Err(AnalysisError::UnsupportedFormat(other.to_string())),
    };

    debug!("Parsed {} data rows", rows.len());
    Ok(rows)
}

/// Reads CSV content from any reader. Ragged records are accepted so that
/// trailing blank cells do not fail the load; width is checked against the
/// header instead.
pub fn read_csv(reader: impl std::io::Read) -> Result<Vec<LineItem>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut records = Vec::new();
    for record in csv_reader.records() {
        let record = record?;
        records.push(record.iter().map(str::to_string).collect());
    }

    rows_from_records(records)
}

fn read_spreadsheet(path: &Path) -> Result<Vec<LineItem>> {
    let mut workbook = open_workbook_auto(path)?;
    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or(AnalysisError::EmptyInput)?;
    debug!("Reading sheet '{sheet_name}'");

    let range = workbook.worksheet_range(&sheet_name)?;
    let records = range
        .rows()
        .map(|row| row.iter().map(cell_to_string).collect())
        .collect();

    rows_from_records(records)
}

/// Converts a raw record grid (header row included) into line items.
///
/// The header must have exactly three columns once trailing blanks are
/// dropped. Data rows may be short (missing cells read as empty) but never
/// wider than the header; fully blank rows are skipped.
pub fn rows_from_records(records: Vec<Vec<String>>) -> Result<Vec<LineItem>> {
    let mut records = records.into_iter().map(trim_trailing_blanks);

    let header = records.next().ok_or(AnalysisError::EmptyInput)?;
    if header.len() != EXPECTED_COLUMNS {
        return Err(AnalysisError::ColumnCount {
            expected: EXPECTED_COLUMNS,
            found: header.len(),
        });
    }

    let mut rows = Vec::new();
    for record in records {
        if record.is_empty() {
            continue;
        }
        if record.len() > EXPECTED_COLUMNS {
            return Err(AnalysisError::ColumnCount {
                expected: EXPECTED_COLUMNS,
                found: record.len(),
            });
        }

        let cell = |idx: usize| record.get(idx).map(String::as_str).unwrap_or("");
        rows.push(LineItem::new(
            cell(0).trim(),
            parse_cell_value(cell(1)),
            parse_cell_value(cell(2)),
        ));
    }

    if rows.is_empty() {
        return Err(AnalysisError::EmptyInput);
    }
    Ok(rows)
}

// Anything that fails to parse as a number is worth zero, matching how the
// rest of the pipeline treats missing values.
fn parse_cell_value(cell: &str) -> f64 {
    let trimmed = cell.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    if let Ok(value) = trimmed.parse::<f64>() {
        return value;
    }
    // Retry with thousands separators stripped: "1,234,567.89"
    let stripped: String = trimmed.chars().filter(|c| *c != ',').collect();
    stripped.parse::<f64>().unwrap_or(0.0)
}

fn trim_trailing_blanks(mut cells: Vec<String>) -> Vec<String> {
    while cells.last().is_some_and(|c| c.trim().is_empty()) {
        cells.pop();
    }
    cells
}

fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(f) => f.to_string(),
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::Error(e) => format!("#{e:?}"),
        Data::DateTime(dt) => dt.as_f64().to_string(),
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_CSV: &str = "\
Line item,2023,2024
CURRENT ASSETS,400,600
TOTAL ASSETS,\"1,000\",\"1,200\"
CURRENT LIABILITIES,200,300
";

    #[test]
    fn test_read_csv_parses_three_columns_positionally() {
        let rows = read_csv(SAMPLE_CSV.as_bytes()).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0], LineItem::new("CURRENT ASSETS", 400.0, 600.0));
        assert_eq!(rows[1], LineItem::new("TOTAL ASSETS", 1000.0, 1200.0));
    }

    #[test]
    fn test_header_with_wrong_column_count_is_rejected() {
        let err = read_csv("label,prior\na,1\n".as_bytes()).unwrap_err();
        match err {
            AnalysisError::ColumnCount { expected, found } => {
                assert_eq!(expected, 3);
                assert_eq!(found, 2);
            }
            other => panic!("expected ColumnCount, got {other:?}"),
        }

        let err = read_csv("label,prior,current,extra\na,1,2,3\n".as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            AnalysisError::ColumnCount { found: 4, .. }
        ));
    }

    #[test]
    fn test_empty_input_is_rejected() {
        assert!(matches!(
            read_csv("".as_bytes()).unwrap_err(),
            AnalysisError::EmptyInput
        ));
        // A header alone carries no data rows.
        assert!(matches!(
            read_csv("label,prior,current\n".as_bytes()).unwrap_err(),
            AnalysisError::EmptyInput
        ));
    }

    #[test]
    fn test_unparseable_cells_coerce_to_zero() {
        let rows = read_csv("label,prior,current\nCash,n/a,12x\n".as_bytes()).unwrap();
        assert_eq!(rows[0].prior_value, 0.0);
        assert_eq!(rows[0].current_value, 0.0);
    }

    #[test]
    fn test_short_and_padded_rows_are_tolerated() {
        let input = "label,prior,current\nCash,100\nInventory,50,60,,\n";
        let rows = read_csv(input.as_bytes()).unwrap();
        assert_eq!(rows[0], LineItem::new("Cash", 100.0, 0.0));
        assert_eq!(rows[1], LineItem::new("Inventory", 50.0, 60.0));
    }

    #[test]
    fn test_data_row_wider_than_header_is_rejected() {
        let input = "label,prior,current\nCash,100,120,extra\n";
        assert!(matches!(
            read_csv(input.as_bytes()).unwrap_err(),
            AnalysisError::ColumnCount { found: 4, .. }
        ));
    }

    #[test]
    fn test_unsupported_extension_is_rejected() {
        let err = read_statement("statement.txt").unwrap_err();
        assert!(matches!(err, AnalysisError::UnsupportedFormat(ext) if ext == "txt"));
    }

    #[test]
    fn test_parse_cell_value_handles_separators_and_noise() {
        assert_eq!(parse_cell_value("1,234,567.89"), 1234567.89);
        assert_eq!(parse_cell_value("  42  "), 42.0);
        assert_eq!(parse_cell_value("-3.5"), -3.5);
        assert_eq!(parse_cell_value(""), 0.0);
        assert_eq!(parse_cell_value("abc"), 0.0);
    }

    #[test]
    fn test_cell_to_string_covers_common_variants() {
        assert_eq!(cell_to_string(&Data::Empty), "");
        assert_eq!(cell_to_string(&Data::String("x".into())), "x");
        assert_eq!(cell_to_string(&Data::Float(1.5)), "1.5");
        assert_eq!(cell_to_string(&Data::Int(7)), "7");
        assert_eq!(cell_to_string(&Data::Bool(true)), "true");
    }
}
