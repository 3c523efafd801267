use crate::conversation::{ConversationState, Role};
use crate::llm::client::{GeminiClient, DEFAULT_MODEL};
use crate::llm::prompts;
use crate::llm::types::Content;
use log::warn;

/// Turns computed metrics into narrative text.
///
/// Both entry points return displayable strings: a service failure comes back
/// as a descriptive message, never as an error the caller has to branch on.
#[derive(Clone)]
pub struct NarrativeAnalyst {
    client: GeminiClient,
    model: String,
}

impl NarrativeAnalyst {
    pub fn new(client: GeminiClient) -> Self {
        Self {
            client,
            model: DEFAULT_MODEL.to_string(),
        }
    }

    pub fn with_model(client: GeminiClient, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }

    /// One-shot commentary over a data summary built by
    /// [`crate::report::ai_summary`].
    pub async fn analyze(&self, summary: &str) -> String {
        let prompt = prompts::analysis_prompt(summary);
        let contents = vec![Content::text("user", prompt)];

        match self.client.generate_content(&self.model, None, contents).await {
            Ok(text) => text,
            Err(err) => {
                warn!("One-shot analysis failed: {err}");
                format!("The AI analysis is unavailable: {err}")
            }
        }
    }

    /// Sends one user message within an ongoing session and returns the
    /// reply text.
    ///
    /// On success the exchange joins the session's wire transcript. On
    /// failure the session stays usable: the failed user turn is kept for
    /// display but excluded from future context, and the returned message
    /// is also recorded as a visible notice.
    pub async fn send(&self, state: &mut ConversationState, user_text: &str) -> String {
        let turn_index = state.push_user(user_text);

        let mut contents: Vec<Content> = state
            .wire_turns()
            .map(|turn| Content::text(wire_role(turn.role), turn.text.clone()))
            .collect();
        contents.push(Content::text("user", user_text));

        let result = self
            .client
            .generate_content(&self.model, Some(state.system_instruction()), contents)
            .await;

        match result {
            Ok(reply) => {
                state.mark_in_context(turn_index);
                state.push_assistant(reply.clone());
                reply
            }
            Err(err) => {
                warn!("Chat exchange failed: {err}");
                let notice = format!("I couldn't reach the AI service: {err}");
                state.push_notice(notice.clone());
                notice
            }
        }
    }
}

fn wire_role(role: Role) -> &'static str {
    match role {
        Role::User => "user",
        Role::Assistant => "model",
    }
}
