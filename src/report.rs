use crate::{CurrentRatio, RatioValue, StatementAnalysis};

const HEADERS: [&str; 6] = [
    "Line Item",
    "Prior Year",
    "Current Year",
    "Growth Rate (%)",
    "Prior-Year Share (%)",
    "Current-Year Share (%)",
];

pub fn format_thousands(value: f64) -> String {
    // Group the float's own decimal expansion; casting through an integer
    // type would clamp magnitudes beyond its range.
    let rounded = value.round();
    let digits = format!("{:.0}", rounded.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if rounded < 0.0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

pub fn format_percent(value: f64) -> String {
    format!("{value:.2}")
}

pub fn format_ratio(ratio: &RatioValue) -> String {
    match ratio {
        RatioValue::Available(v) => format!("{v:.2} times"),
        RatioValue::Unavailable => "N/A".to_string(),
    }
}

fn formatted_cells(analysis: &StatementAnalysis) -> Vec<[String; 6]> {
    analysis
        .rows
        .iter()
        .map(|row| {
            [
                row.label.clone(),
                format_thousands(row.prior_value),
                format_thousands(row.current_value),
                format_percent(row.growth_rate),
                format_percent(row.prior_share),
                format_percent(row.current_share),
            ]
        })
        .collect()
}

fn ratio_lines(ratio: &CurrentRatio) -> String {
    let mut output = String::new();
    output.push_str(&format!(
        "Prior-year current ratio: {}\n",
        format_ratio(&ratio.prior)
    ));
    output.push_str(&format!(
        "Current-year current ratio: {}\n",
        format_ratio(&ratio.current)
    ));
    output
}

/// Renders an aligned plain-text table followed by the current-ratio lines,
/// suitable for terminal display.
pub fn text_table(analysis: &StatementAnalysis) -> String {
    let cells = formatted_cells(analysis);

    let mut widths: Vec<usize> = HEADERS.iter().map(|h| h.len()).collect();
    for row in &cells {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.len());
        }
    }

    let render_line = |cells: &[String]| -> String {
        let mut line = String::new();
        for (i, cell) in cells.iter().enumerate() {
            if i > 0 {
                line.push_str("  ");
            }
            if i == 0 {
                line.push_str(&format!("{cell:<width$}", width = widths[i]));
            } else {
                line.push_str(&format!("{cell:>width$}", width = widths[i]));
            }
        }
        // Left-aligned label padding leaves trailing spaces on short rows.
        line.trim_end().to_string()
    };

    let mut output = String::new();
    let header_cells: Vec<String> = HEADERS.iter().map(|h| h.to_string()).collect();
    output.push_str(&render_line(&header_cells));
    output.push('\n');
    for row in &cells {
        output.push_str(&render_line(row));
        output.push('\n');
    }

    output.push('\n');
    output.push_str(&ratio_lines(&analysis.current_ratio));
    if let Some(delta) = analysis.current_ratio.delta() {
        output.push_str(&format!("Year-over-year ratio change: {delta:+.2}\n"));
    }

    output
}

pub fn markdown_table(analysis: &StatementAnalysis) -> String {
    let mut output = String::new();

    output.push_str(&format!("| {} |\n", HEADERS.join(" | ")));
    output.push_str(&format!("|{}\n", " --- |".repeat(HEADERS.len())));
    for row in formatted_cells(analysis) {
        output.push_str(&format!("| {} |\n", row.join(" | ")));
    }

    output
}

/// Builds the text snapshot handed to the AI layer: the derived table as
/// markdown plus the two current-ratio lines. Both the one-shot commentary
/// prompt and the chat system instruction embed this string.
pub fn ai_summary(analysis: &StatementAnalysis) -> String {
    let mut output = String::new();
    output.push_str("Comparative financial statement with derived metrics:\n\n");
    output.push_str(&markdown_table(analysis));
    output.push('\n');
    output.push_str(&ratio_lines(&analysis.current_ratio));
    output
}
