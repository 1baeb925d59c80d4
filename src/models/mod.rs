// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    Conversation, ConversationTurn, Destination, InvalidSessionState, JourneyPhase, JourneyState,
    MatchBand, Milestone, NavigationPrompt, Origin, PromptKind, ScoredVenue, SensitivityLevel,
    SensitivityProfile, SensoryAxis, SensoryRatings, Venue, VenueFeature, VenueFeatures,
};
pub use requests::{
    AcknowledgePromptRequest, FeedbackRequest, RankVenuesRequest, StartJourneyRequest,
    SubmitMessageRequest, TickRequest,
};
pub use responses::{
    AcknowledgePromptResponse, ConversationResponse, ErrorResponse, FeedbackResponse,
    HealthResponse, JourneyResponse, RankVenuesResponse, SubmitMessageResponse, TickResponse,
};
