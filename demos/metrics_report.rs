use financial_statement_analyzer::{analyze_statement, read_statement, report, LineItem};

fn sample_statement() -> Vec<LineItem> {
    vec![
        LineItem::new("Cash and cash equivalents", 120_000.0, 95_000.0),
        LineItem::new("Trade receivables", 180_000.0, 240_000.0),
        LineItem::new("Inventories", 150_000.0, 205_000.0),
        LineItem::new("TOTAL CURRENT ASSETS", 450_000.0, 540_000.0),
        LineItem::new("Property, plant and equipment", 520_000.0, 610_000.0),
        LineItem::new("Intangible assets", 30_000.0, 50_000.0),
        LineItem::new("TOTAL ASSETS", 1_000_000.0, 1_200_000.0),
        LineItem::new("Trade payables", 140_000.0, 200_000.0),
        LineItem::new("Short-term borrowings", 85_000.0, 100_000.0),
        LineItem::new("TOTAL CURRENT LIABILITIES", 225_000.0, 300_000.0),
        LineItem::new("Long-term debt", 300_000.0, 330_000.0),
        LineItem::new("Shareholders' equity", 475_000.0, 570_000.0),
    ]
}

fn main() -> anyhow::Result<()> {
    let statement = match std::env::args().nth(1) {
        Some(path) => read_statement(&path)?,
        None => {
            println!("No statement file given, using the built-in sample.\n");
            sample_statement()
        }
    };

    let analysis = analyze_statement(&statement)?;
    println!("{}", report::text_table(&analysis));

    Ok(())
}
