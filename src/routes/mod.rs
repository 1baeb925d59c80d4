// Route exports
pub mod chat;
pub mod journeys;
pub mod venues;

use crate::core::{DialogueEngine, JourneyError, JourneyStateMachine, VenueRanker};
use crate::models::ErrorResponse;
use crate::services::{CatalogError, VenueCatalog};
use actix_web::{web, HttpResponse};
use std::sync::Arc;

/// Application state shared across all handlers
///
/// Everything here is read-only; per-session state travels in the requests.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<VenueCatalog>,
    pub ranker: VenueRanker,
    pub dialogue: DialogueEngine,
    pub journeys: JourneyStateMachine,
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(venues::configure)
            .configure(chat::configure)
            .configure(journeys::configure),
    );
}

fn validation_failed(errors: validator::ValidationErrors) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse {
        error: "Validation failed".to_string(),
        message: errors.to_string(),
        status_code: 400,
    })
}

fn catalog_error(err: &CatalogError) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse {
        error: "Invalid venues".to_string(),
        message: err.to_string(),
        status_code: 400,
    })
}

fn journey_error(err: &JourneyError) -> HttpResponse {
    match err {
        JourneyError::InvalidState(_) => HttpResponse::Conflict().json(ErrorResponse {
            error: "Invalid journey state".to_string(),
            message: err.to_string(),
            status_code: 409,
        }),
        JourneyError::UnknownVenue(_) => HttpResponse::NotFound().json(ErrorResponse {
            error: "Venue not found".to_string(),
            message: err.to_string(),
            status_code: 404,
        }),
        JourneyError::InvalidRating(_) => HttpResponse::BadRequest().json(ErrorResponse {
            error: "Invalid rating".to_string(),
            message: err.to_string(),
            status_code: 400,
        }),
    }
}
