use dotenv::dotenv;
use financial_statement_analyzer::conversation::WELCOME_MESSAGE;
use financial_statement_analyzer::llm::{prompts, GeminiClient, NarrativeAnalyst};
use financial_statement_analyzer::{analyze_statement, read_statement, report, SessionSlot};
use std::error::Error;
use std::io::{self, Write};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenv().ok();

    let path = std::env::args()
        .nth(1)
        .ok_or("usage: analyze_statement <statement.csv|statement.xlsx>")?;

    println!("💬 Starting Statement Analysis...\n");

    let statement = read_statement(&path)?;
    let analysis = analyze_statement(&statement)?;

    println!("{}", report::text_table(&analysis));

    let client = match GeminiClient::from_env() {
        Ok(client) => client,
        Err(err) => {
            eprintln!("❌ AI features disabled: {}", err);
            return Ok(());
        }
    };
    let analyst = NarrativeAnalyst::new(client);
    let summary = report::ai_summary(&analysis);

    println!("\nAI analysis:\n");
    println!("{}\n", analyst.analyze(&summary).await);

    let instruction = prompts::chat_system_instruction(&summary);
    let mut slot = SessionSlot::new();
    slot.get_or_create(&instruction);

    println!("🤖 {}", WELCOME_MESSAGE);
    println!("Ask follow-up questions about the statement (type 'quit' to exit).");
    println!("------------------------------------------------------------------");

    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;
        let question = input.trim();

        if question.eq_ignore_ascii_case("quit") || question.eq_ignore_ascii_case("exit") {
            break;
        }

        if question.is_empty() {
            continue;
        }

        println!("\nThinking...");

        let session = slot.get_or_create(&instruction);
        let reply = analyst.send(session, question).await;
        println!("\n{}\n", reply);
        println!("------------------------------------------------------------------");
    }

    Ok(())
}
