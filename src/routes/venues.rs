use super::{catalog_error, validation_failed, AppState};
use crate::models::{HealthResponse, RankVenuesRequest, RankVenuesResponse};
use crate::services::VenueCatalog;
use actix_web::{web, HttpResponse, Responder};
use validator::Validate;

/// Configure health and venue routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/venues", web::get().to(list_venues))
        .route("/venues/rank", web::post().to(rank_venues));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        venues: state.catalog.len(),
        timestamp: chrono::Utc::now(),
    })
}

/// List the configured venue catalog
///
/// GET /api/v1/venues
async fn list_venues(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "venues": state.catalog.venues(),
        "count": state.catalog.len(),
    }))
}

/// Rank venues for a sensitivity profile
///
/// POST /api/v1/venues/rank
///
/// Request body:
/// ```json
/// {
///   "profile": {
///     "lightSensitivity": "high",
///     "soundSensitivity": "high",
///     "crowdTolerance": "low",
///     "smellSensitivity": "low",
///     "motionSensitivity": "low",
///     "temperatureSensitivity": "low"
///   },
///   "venues": [ ... ]
/// }
/// ```
async fn rank_venues(
    state: web::Data<AppState>,
    req: web::Json<RankVenuesRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failed(errors);
    }

    let RankVenuesRequest { profile, venues } = req.into_inner();

    if !profile.is_complete() {
        tracing::warn!("Ranking with an incomplete profile, unset axes score zero");
    }

    // supplied venues get the same checks as the server catalog
    let supplied = match venues.map(VenueCatalog::new).transpose() {
        Ok(supplied) => supplied,
        Err(e) => {
            tracing::info!("Rejected supplied venues: {}", e);
            return catalog_error(&e);
        }
    };
    let catalog = supplied.as_ref().unwrap_or_else(|| state.catalog.as_ref());

    let result = state.ranker.rank(&profile, catalog.venues());

    tracing::info!(
        "Returning {} ranked venues (from {} in catalog)",
        result.venues.len(),
        result.total_venues
    );

    HttpResponse::Ok().json(RankVenuesResponse {
        venues: result.venues,
        total_results: result.total_venues,
    })
}
