use super::{journey_error, validation_failed, AppState};
use crate::core::journey::{self, record_feedback, status_line};
use crate::models::{
    AcknowledgePromptRequest, AcknowledgePromptResponse, FeedbackRequest, FeedbackResponse,
    JourneyResponse, StartJourneyRequest, TickRequest, TickResponse,
};
use actix_web::{web, HttpResponse, Responder};
use validator::Validate;

/// Configure journey routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/journeys", web::post().to(start_journey))
        .route("/journeys/tick", web::post().to(tick_journey))
        .route("/journeys/acknowledge", web::post().to(acknowledge_prompt))
        .route("/journeys/feedback", web::post().to(submit_feedback));
}

/// Start a journey to a catalog venue
///
/// POST /api/v1/journeys
///
/// Request body:
/// ```json
/// { "venueId": "string" }
/// ```
async fn start_journey(
    state: web::Data<AppState>,
    req: web::Json<StartJourneyRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failed(errors);
    }

    match state.journeys.start_by_id(state.catalog.venues(), &req.venue_id) {
        Ok(journey) => HttpResponse::Ok().json(JourneyResponse {
            status_line: status_line(&journey),
            journey,
        }),
        Err(e) => {
            tracing::info!("Cannot start journey: {}", e);
            journey_error(&e)
        }
    }
}

/// Advance a journey by one tick
///
/// POST /api/v1/journeys/tick
///
/// Request body:
/// ```json
/// { "journey": { ... }, "amount": 2 }
/// ```
async fn tick_journey(
    state: web::Data<AppState>,
    req: web::Json<TickRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failed(errors);
    }

    let TickRequest { mut journey, amount } = req.into_inner();
    let amount = amount.unwrap_or_else(|| state.journeys.tick_amount());

    match journey::tick(&mut journey, amount) {
        Ok(outcome) => HttpResponse::Ok().json(TickResponse {
            status_line: status_line(&journey),
            journey,
            prompts: outcome.prompts,
            arrival: outcome.arrival,
        }),
        Err(e) => {
            tracing::warn!("Rejected tick: {}", e);
            journey_error(&e)
        }
    }
}

/// Dismiss a milestone prompt
///
/// POST /api/v1/journeys/acknowledge
///
/// Request body:
/// ```json
/// { "journey": { ... }, "milestone": "quieter_route", "response": "accepted" }
/// ```
async fn acknowledge_prompt(req: web::Json<AcknowledgePromptRequest>) -> impl Responder {
    let AcknowledgePromptRequest {
        mut journey,
        milestone,
        response,
    } = req.into_inner();

    let removed = journey::acknowledge(&mut journey, milestone, response);

    HttpResponse::Ok().json(AcknowledgePromptResponse { journey, removed })
}

/// Record feedback once the journey has arrived
///
/// POST /api/v1/journeys/feedback
async fn submit_feedback(req: web::Json<FeedbackRequest>) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failed(errors);
    }

    match record_feedback(&req.journey, req.rating, &req.sensory_ratings) {
        Ok(summary) => {
            tracing::info!(
                "Feedback for venue {}: {} ({})",
                summary.venue_id,
                summary.rating,
                summary.rating_label
            );
            HttpResponse::Ok().json(FeedbackResponse {
                accepted: true,
                summary,
            })
        }
        Err(e) => journey_error(&e),
    }
}
