use crate::core::classifier::{classify, SupportCategory};
use crate::core::responses::{ResponseCatalog, GREETING};
use crate::models::{Conversation, ConversationTurn, Origin};

/// A user turn that has been recorded but not yet answered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub struct PendingReply {
    pub user_turn_id: u64,
    pub category: SupportCategory,
}

/// Rule-based support dialogue: classify, look up guidance, append turns
///
/// Turns are only ever appended. Blank input is ignored without producing a
/// turn or a reply.
#[derive(Debug, Clone, Copy, Default)]
pub struct DialogueEngine {
    catalog: ResponseCatalog,
}

impl DialogueEngine {
    pub fn new(catalog: ResponseCatalog) -> Self {
        Self { catalog }
    }

    /// A conversation opened with the assistant greeting and starter suggestions
    pub fn start_conversation(&self) -> Conversation {
        let mut conversation = Conversation::new();
        conversation.append(
            Origin::Assistant,
            GREETING.message.to_string(),
            Some(GREETING.suggestions()),
        );
        conversation
    }

    /// Record the user's message and classify it
    ///
    /// Returns `None` for empty or whitespace-only text, leaving the
    /// conversation untouched.
    pub fn record_user_turn(&self, conversation: &mut Conversation, text: &str) -> Option<PendingReply> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        let category = classify(text);
        let user_turn_id = conversation.append(Origin::User, text.to_string(), None).id;

        Some(PendingReply {
            user_turn_id,
            category,
        })
    }

    /// Append the assistant's guidance for a recorded user turn
    pub fn reply<'a>(&self, conversation: &'a mut Conversation, pending: PendingReply) -> &'a ConversationTurn {
        let guidance = self.catalog.respond(pending.category);

        tracing::debug!(
            "Replying to turn {} with {} guidance",
            pending.user_turn_id,
            pending.category
        );

        conversation.append(
            Origin::Assistant,
            guidance.message.to_string(),
            Some(guidance.suggestions()),
        )
    }

    /// Record a user message and answer it in one step
    pub fn submit(&self, conversation: &mut Conversation, text: &str) -> Option<ConversationTurn> {
        let pending = self.record_user_turn(conversation, text)?;
        Some(self.reply(conversation, pending).clone())
    }
}
