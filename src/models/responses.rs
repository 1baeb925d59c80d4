use crate::core::classifier::SupportCategory;
use crate::core::journey::FeedbackSummary;
use crate::core::responses::QuickAction;
use crate::models::domain::{Conversation, ConversationTurn, JourneyState, NavigationPrompt, ScoredVenue};
use serde::Serialize;

/// Response for the rank venues endpoint
#[derive(Debug, Clone, Serialize)]
pub struct RankVenuesResponse {
    pub venues: Vec<ScoredVenue>,
    #[serde(rename = "totalResults")]
    pub total_results: usize,
}

/// A freshly opened conversation
#[derive(Debug, Clone, Serialize)]
pub struct ConversationResponse {
    pub conversation: Conversation,
    #[serde(rename = "quickActions")]
    pub quick_actions: Vec<QuickAction>,
}

/// Conversation after a message was submitted
#[derive(Debug, Clone, Serialize)]
pub struct SubmitMessageResponse {
    pub conversation: Conversation,
    /// Absent when the submitted text was blank
    pub reply: Option<ConversationTurn>,
    pub category: Option<SupportCategory>,
}

/// Journey state together with its current status line
#[derive(Debug, Clone, Serialize)]
pub struct JourneyResponse {
    pub journey: JourneyState,
    #[serde(rename = "statusLine")]
    pub status_line: String,
}

/// Journey after a tick
#[derive(Debug, Clone, Serialize)]
pub struct TickResponse {
    pub journey: JourneyState,
    #[serde(rename = "statusLine")]
    pub status_line: String,
    pub prompts: Vec<NavigationPrompt>,
    pub arrival: Option<NavigationPrompt>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AcknowledgePromptResponse {
    pub journey: JourneyState,
    pub removed: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct FeedbackResponse {
    pub accepted: bool,
    pub summary: FeedbackSummary,
}

/// Health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub venues: usize,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
