// Prompts for the one-shot commentary and the chat session

pub const ANALYST_PERSONA: &str = r#"You are an experienced financial analyst reviewing a comparative two-year financial statement. The table you receive already includes derived metrics: year-over-year growth rates and each item's share of total assets, all in percent."#;

pub const ANALYSIS_INSTRUCTIONS: &str = r#"
Write a brief commentary covering:
1. Overall asset growth and the line items driving it
2. Notable shifts in asset composition between the two years
3. Short-term liquidity, based on the current ratio

Keep it under 300 words, in plain professional language, and ground every
observation in the figures provided. Do not invent numbers that are not in
the table."#;

/// Builds the complete one-shot commentary prompt around a data summary.
pub fn analysis_prompt(summary: &str) -> String {
    format!("{ANALYST_PERSONA}\n\n{summary}\n{ANALYSIS_INSTRUCTIONS}")
}

/// Builds the fixed system instruction for a chat session. The summary is
/// the session's data snapshot; the session keeps this instruction for its
/// whole lifetime.
pub fn chat_system_instruction(summary: &str) -> String {
    format!(
        "{ANALYST_PERSONA}\n\nThe user will ask follow-up questions about the dataset below. \
Answer from these figures, concisely and in plain professional language. \
When a question cannot be answered from the data, say so plainly instead of guessing.\n\n{summary}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analysis_prompt_embeds_summary() {
        let prompt = analysis_prompt("| TOTAL ASSETS | 1,000 | 1,200 |");
        assert!(prompt.contains("| TOTAL ASSETS | 1,000 | 1,200 |"));
        assert!(prompt.contains("current ratio"));
    }

    #[test]
    fn test_chat_instruction_embeds_summary() {
        let instruction = chat_system_instruction("Prior-year current ratio: 2.00 times");
        assert!(instruction.contains("Prior-year current ratio: 2.00 times"));
        assert!(instruction.contains("follow-up questions"));
    }
}
