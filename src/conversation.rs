use crate::error::FailureClass;
use chrono::{DateTime, Utc};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

/// Seeded assistant greeting shown when a session is created. Display-only;
/// it is never part of the transcript sent to the model.
pub const WELCOME_MESSAGE: &str =
    "Hello! I've taken a first look at the figures. Ask me anything about growth, asset composition, or liquidity.";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

/// One transcript entry. `in_context` separates what the user sees from what
/// the model sees: welcome and error notices are displayed but excluded from
/// the wire transcript, as is a user turn whose send failed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: Role,
    pub text: String,
    pub at: DateTime<Utc>,
    pub in_context: bool,
}

impl ChatTurn {
    fn new(role: Role, text: impl Into<String>, in_context: bool) -> Self {
        Self {
            role,
            text: text.into(),
            at: Utc::now(),
            in_context,
        }
    }
}

/// The conversational context for one loaded dataset.
///
/// The system instruction is fixed when the session is created and contains
/// the data snapshot the conversation is about; reloading data means a new
/// session, not a mutated one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationState {
    system_instruction: String,
    turns: Vec<ChatTurn>,
    created_at: DateTime<Utc>,
}

impl ConversationState {
    pub fn new(system_instruction: impl Into<String>) -> Self {
        let mut state = Self {
            system_instruction: system_instruction.into(),
            turns: Vec::new(),
            created_at: Utc::now(),
        };
        state.push_notice(WELCOME_MESSAGE);
        state
    }

    pub fn system_instruction(&self) -> &str {
        &self.system_instruction
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Full display transcript, notices included.
    pub fn turns(&self) -> &[ChatTurn] {
        &self.turns
    }

    /// The turns forwarded to the model.
    pub fn wire_turns(&self) -> impl Iterator<Item = &ChatTurn> {
        self.turns.iter().filter(|t| t.in_context)
    }

    /// Appends a user turn, initially excluded from the wire transcript.
    /// Returns its index so the turn can be confirmed once the exchange
    /// succeeds.
    pub fn push_user(&mut self, text: impl Into<String>) -> usize {
        self.turns.push(ChatTurn::new(Role::User, text, false));
        self.turns.len() - 1
    }

    /// Confirms a turn into the wire transcript after a successful exchange.
    pub fn mark_in_context(&mut self, index: usize) {
        if let Some(turn) = self.turns.get_mut(index) {
            turn.in_context = true;
        }
    }

    pub fn push_assistant(&mut self, text: impl Into<String>) {
        self.turns.push(ChatTurn::new(Role::Assistant, text, true));
    }

    /// Appends a display-only assistant notice (welcome text, transport
    /// errors). Never forwarded to the model.
    pub fn push_notice(&mut self, text: impl Into<String>) {
        self.turns.push(ChatTurn::new(Role::Assistant, text, false));
    }
}

/// Holder for the at-most-one conversation session of the current dataset.
///
/// Absent until the first successful load, Active afterwards; reloading
/// invalidates it and the next access recreates it against the fresh data.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionSlot {
    session: Option<ConversationState>,
}

impl SessionSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    pub fn active(&self) -> Option<&ConversationState> {
        self.session.as_ref()
    }

    pub fn active_mut(&mut self) -> Option<&mut ConversationState> {
        self.session.as_mut()
    }

    /// Returns the current session, creating one with the given system
    /// instruction if the slot is empty. An existing session keeps the
    /// instruction it was created with.
    pub fn get_or_create(&mut self, system_instruction: &str) -> &mut ConversationState {
        if self.session.is_none() {
            debug!("Creating conversation session");
            self.session = Some(ConversationState::new(system_instruction));
        }
        self.session.as_mut().unwrap()
    }

    /// Drops the session and its history. Called when a new dataset is
    /// loaded so the next chat starts from the fresh snapshot.
    pub fn invalidate(&mut self) {
        if self.session.take().is_some() {
            debug!("Invalidated conversation session");
        }
    }

    /// Applies the load-failure policy: structural input problems keep the
    /// session so the user can fix the file and continue, anything else
    /// discards it.
    pub fn apply_load_failure(&mut self, class: FailureClass) {
        match class {
            FailureClass::Structural => {}
            FailureClass::Unclassified => {
                if self.session.is_some() {
                    warn!("Discarding conversation session after unclassified load failure");
                    self.invalidate();
                }
            }
        }
    }
}
