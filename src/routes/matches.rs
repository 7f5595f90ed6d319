use actix_web::{web, HttpRequest, HttpResponse, Responder};
use validator::Validate;
use crate::config::MatchingSettings;
use crate::core::{MatchError, MatchFinder};
use crate::models::{ErrorResponse, HealthResponse, MatchQuery, MatchesResponse};
use crate::routes::auth::JwtVerifier;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub finder: MatchFinder,
    pub verifier: Option<JwtVerifier>,
    pub matching: MatchingSettings,
}

/// Configure all matchmaking routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route(
            "/matchmaking/mentors-for-startup/{startup_id}",
            web::get().to(mentors_for_startup),
        )
        .route(
            "/matchmaking/startups-for-mentor/{mentor_id}",
            web::get().to(startups_for_mentor),
        );
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let healthy = match state.finder.directory().health_check().await {
        Ok(healthy) => healthy,
        Err(e) => {
            tracing::warn!("Directory health check failed: {}", e);
            false
        }
    };

    let status = if healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Mentor matches for a startup
///
/// GET /api/v1/matchmaking/mentors-for-startup/{startupId}?limit=10
async fn mentors_for_startup(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<MatchQuery>,
    req: HttpRequest,
) -> impl Responder {
    let startup_id = path.into_inner();

    let limit = match authorize(&state, &req).and_then(|_| resolve_limit(&state, &query)) {
        Ok(limit) => limit,
        Err(response) => return response,
    };

    let request_id = uuid::Uuid::new_v4();
    tracing::info!("[{}] Finding mentors for startup: {}, limit: {}", request_id, startup_id, limit);

    match state.finder.find_mentor_matches(&startup_id, limit).await {
        Ok(matches) => {
            tracing::info!("[{}] Returning {} mentor matches for startup {}", request_id, matches.len(), startup_id);
            HttpResponse::Ok().json(MatchesResponse::new(matches))
        }
        Err(e) => match_error_response(request_id, &e),
    }
}

/// Startup matches for a mentor
///
/// GET /api/v1/matchmaking/startups-for-mentor/{mentorId}?limit=10
async fn startups_for_mentor(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<MatchQuery>,
    req: HttpRequest,
) -> impl Responder {
    let mentor_id = path.into_inner();

    let limit = match authorize(&state, &req).and_then(|_| resolve_limit(&state, &query)) {
        Ok(limit) => limit,
        Err(response) => return response,
    };

    let request_id = uuid::Uuid::new_v4();
    tracing::info!("[{}] Finding startups for mentor: {}, limit: {}", request_id, mentor_id, limit);

    match state.finder.find_startup_matches(&mentor_id, limit).await {
        Ok(matches) => {
            tracing::info!("[{}] Returning {} startup matches for mentor {}", request_id, matches.len(), mentor_id);
            HttpResponse::Ok().json(MatchesResponse::new(matches))
        }
        Err(e) => match_error_response(request_id, &e),
    }
}

/// Check the bearer token when a verifier is configured
fn authorize(state: &AppState, req: &HttpRequest) -> Result<(), HttpResponse> {
    let Some(verifier) = &state.verifier else {
        return Ok(());
    };

    match verifier.verify_request(req) {
        Ok(claims) => {
            tracing::debug!("Authorized user {}", claims.id);
            Ok(())
        }
        Err(e) => {
            tracing::info!("Rejected request to {}: {}", req.path(), e);
            Err(HttpResponse::Unauthorized().json(ErrorResponse::new(
                "Unauthorized",
                e.to_string(),
                401,
            )))
        }
    }
}

fn resolve_limit(state: &AppState, query: &MatchQuery) -> Result<usize, HttpResponse> {
    let bad_request = |message: String| {
        HttpResponse::BadRequest().json(ErrorResponse::new("Validation failed", message, 400))
    };

    if let Err(errors) = query.validate() {
        return Err(bad_request(errors.to_string()));
    }

    query
        .resolve_limit(state.matching.default_limit, state.matching.max_limit)
        .map_err(bad_request)
}

fn match_error_response(request_id: uuid::Uuid, err: &MatchError) -> HttpResponse {
    match err {
        MatchError::NotFound { .. } => {
            tracing::info!("[{}] {}", request_id, err);
            HttpResponse::NotFound().json(ErrorResponse::new("Not found", err.to_string(), 404))
        }
        MatchError::Upstream(e) => {
            tracing::error!("[{}] Directory failure: {}", request_id, e);
            HttpResponse::BadGateway().json(ErrorResponse::new(
                "Directory unavailable",
                e.to_string(),
                502,
            ))
        }
    }
}
