use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;
use validator::Validate;

use crate::core::{RankError, Ranker};
use crate::models::{ErrorResponse, HealthResponse, RecommendRequest, RecommendResponse};
use crate::services::{RosterProfile, RosterStore};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<RosterStore>,
    pub developers: Ranker,
    pub engineers: Ranker,
    pub max_top_n: i64,
}

impl AppState {
    fn ranker_for(&self, profile: RosterProfile) -> &Ranker {
        match profile {
            RosterProfile::Developers => &self.developers,
            RosterProfile::Engineers => &self.engineers,
        }
    }
}

/// Configure all recommendation routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/recommend/developers", web::post().to(recommend_developers))
        .route("/recommend/engineers", web::post().to(recommend_engineers));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let rosters_ok = state.store.health_check().await;

    let status = if rosters_ok { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Recommend developers endpoint
///
/// POST /api/v1/recommend/developers
///
/// Request body:
/// ```json
/// {
///   "clients": ["Acme"],
///   "skills": ["go,rust", "python"],
///   "top_n": 5
/// }
/// ```
async fn recommend_developers(
    state: web::Data<AppState>,
    req: web::Json<RecommendRequest>,
) -> impl Responder {
    recommend(state, req.into_inner(), RosterProfile::Developers).await
}

/// Recommend engineers endpoint
///
/// POST /api/v1/recommend/engineers
///
/// Same body as the developers endpoint; ranks against the engineer roster
/// with the skill-weighted profile.
async fn recommend_engineers(
    state: web::Data<AppState>,
    req: web::Json<RecommendRequest>,
) -> impl Responder {
    recommend(state, req.into_inner(), RosterProfile::Engineers).await
}

async fn recommend(
    state: web::Data<AppState>,
    req: RecommendRequest,
    profile: RosterProfile,
) -> HttpResponse {
    // Validate request
    if let Err(errors) = req.validate() {
        tracing::info!(
            "Validation failed for {} recommendation request: {:?}",
            profile.as_str(),
            errors
        );
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    // Cap top_n to keep responses bounded
    let top_n = req.top_n.min(state.max_top_n);

    // Callers may join skills with commas; flatten before ranking
    let skills = req.flattened_skills();

    tracing::info!(
        "Recommending {}: {} requested clients, {} requested skills, top_n: {}",
        profile.as_str(),
        req.clients.len(),
        skills.len(),
        top_n
    );

    let roster = match state.store.load(profile).await {
        Ok(roster) => roster,
        Err(e) => {
            tracing::error!("Failed to load {} roster: {}", profile.as_str(), e);
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to load roster".to_string(),
                message: e.to_string(),
                status_code: 500,
            });
        }
    };

    match state
        .ranker_for(profile)
        .recommend(&req.clients, &skills, &roster, top_n)
    {
        Ok(outcome) => {
            tracing::info!(
                "Returning {} {} recommendations (from {} candidates)",
                outcome.recommendations.len(),
                profile.as_str(),
                outcome.total_candidates
            );

            HttpResponse::Ok().json(RecommendResponse {
                recommendations: outcome.recommendations,
                total_candidates: outcome.total_candidates,
            })
        }
        Err(e @ RankError::InvalidLimit(_)) => HttpResponse::BadRequest().json(ErrorResponse {
            error: "invalid_limit".to_string(),
            message: e.to_string(),
            status_code: 400,
        }),
    }
}
