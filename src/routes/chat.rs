use super::{validation_failed, AppState};
use crate::core::responses::QUICK_ACTIONS;
use crate::models::{ConversationResponse, SubmitMessageRequest, SubmitMessageResponse};
use actix_web::{web, HttpResponse, Responder};
use validator::Validate;

/// Configure support chat routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/chat/start", web::post().to(start_conversation))
        .route("/chat/messages", web::post().to(submit_message));
}

/// Open a conversation with the assistant greeting
///
/// POST /api/v1/chat/start
async fn start_conversation(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(ConversationResponse {
        conversation: state.dialogue.start_conversation(),
        quick_actions: QUICK_ACTIONS.to_vec(),
    })
}

/// Submit a user message
///
/// POST /api/v1/chat/messages
///
/// Request body:
/// ```json
/// {
///   "conversation": { "turns": [ ... ] },
///   "text": "I'm overwhelmed by sounds"
/// }
/// ```
///
/// Blank text returns the conversation unchanged with no reply.
async fn submit_message(
    state: web::Data<AppState>,
    req: web::Json<SubmitMessageRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failed(errors);
    }

    let SubmitMessageRequest { mut conversation, text } = req.into_inner();

    let pending = state.dialogue.record_user_turn(&mut conversation, &text);
    let category = pending.map(|p| p.category);
    let reply = pending.map(|p| state.dialogue.reply(&mut conversation, p).clone());

    match category {
        Some(c) => tracing::debug!("Message routed to {} ({} turns)", c, conversation.len()),
        None => tracing::debug!("Ignored blank message"),
    }

    HttpResponse::Ok().json(SubmitMessageResponse {
        conversation,
        reply,
        category,
    })
}
