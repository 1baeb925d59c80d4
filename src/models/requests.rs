use crate::core::journey::PromptResponse;
use crate::models::domain::{Conversation, JourneyState, Milestone, SensitivityProfile, SensoryRatings, Venue};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to rank venues for a profile
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RankVenuesRequest {
    pub profile: SensitivityProfile,
    /// Catalog to rank; the server catalog is used when absent
    #[serde(default)]
    #[validate(length(max = 1000))]
    pub venues: Option<Vec<Venue>>,
}

/// Request to add a user message to a conversation
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SubmitMessageRequest {
    #[serde(default)]
    pub conversation: Conversation,
    #[validate(length(max = 2000))]
    pub text: String,
}

/// Request to begin a journey to a catalog venue
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct StartJourneyRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "venue_id", rename = "venueId")]
    pub venue_id: String,
}

/// Request to advance a journey
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct TickRequest {
    pub journey: JourneyState,
    #[validate(range(min = 1, max = 100))]
    #[serde(default)]
    pub amount: Option<u32>,
}

/// Request to dismiss a milestone prompt
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AcknowledgePromptRequest {
    pub journey: JourneyState,
    pub milestone: Milestone,
    #[serde(default = "default_prompt_response")]
    pub response: PromptResponse,
}

fn default_prompt_response() -> PromptResponse {
    PromptResponse::Declined
}

/// Feedback left after arriving
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct FeedbackRequest {
    pub journey: JourneyState,
    #[validate(range(min = 1, max = 5))]
    pub rating: u8,
    #[serde(rename = "sensoryRatings", default)]
    pub sensory_ratings: SensoryRatings,
    #[validate(length(max = 2000))]
    #[serde(default)]
    pub comment: Option<String>,
}
