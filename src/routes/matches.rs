use actix_web::{http::StatusCode, web, HttpResponse, ResponseError};
use thiserror::Error;
use validator::Validate;

use crate::core::{explain_with_weights, risk_flags, LookupTables, Matcher};
use crate::models::{
    ErrorResponse, ExplainRequest, ExplainResponse, FindMatchesRequest, FindMatchesResponse,
    HealthResponse, MatchingConfigOverrides, RiskFlagsRequest, RiskFlagsResponse,
};

/// Default cap on openings accepted in one request
pub const DEFAULT_MAX_OPENINGS_PER_REQUEST: usize = 5000;

/// Application state shared across all handlers
#[derive(Debug, Clone)]
pub struct AppState {
    /// Matcher configured with the deployment baseline
    pub matcher: Matcher,
    pub max_openings_per_request: usize,
}

impl AppState {
    pub fn new(matcher: Matcher) -> Self {
        Self {
            matcher,
            max_openings_per_request: DEFAULT_MAX_OPENINGS_PER_REQUEST,
        }
    }
}

/// Errors returned by the match endpoints
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Validation failed: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Too many openings: {count} exceeds the limit of {limit}")]
    TooManyOpenings { count: usize, limit: usize },

    #[error("Match run failed: {0}")]
    Worker(#[from] tokio::task::JoinError),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Worker(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let error = match self {
            ApiError::Validation(_) => "validation_failed",
            ApiError::TooManyOpenings { .. } => "too_many_openings",
            ApiError::Worker(_) => "internal_error",
        };
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: error.to_string(),
            message: self.to_string(),
            status_code: self.status_code().as_u16(),
        })
    }
}

/// Configure all match-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/matches/find", web::post().to(find_matches))
        .route("/matches/explain", web::post().to(explain_match))
        .route("/matches/risk-flags", web::post().to(risk_flags_for_referral));
}

/// Health check endpoint
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Find matches endpoint
///
/// POST /api/v1/matches/find
///
/// Request body:
/// ```json
/// {
///   "referral": { "county": "Hennepin", "funding_source": "CADI", ... },
///   "openings": [ ... ],
///   "organizations": [ ... ],
///   "sites": [ ... ],
///   "licenses": [ ... ],
///   "capability_profiles": [ ... ],
///   "config": { "weights": { ... }, "constraints": { ... }, "thresholds": { ... } }
/// }
/// ```
async fn find_matches(
    state: web::Data<AppState>,
    req: web::Json<FindMatchesRequest>,
) -> Result<HttpResponse, ApiError> {
    req.validate()?;

    let limit = state.max_openings_per_request;
    if req.openings.len() > limit {
        return Err(ApiError::TooManyOpenings {
            count: req.openings.len(),
            limit,
        });
    }

    let run_id = uuid::Uuid::new_v4().to_string();
    let req = req.into_inner();
    let matcher = match &req.config {
        Some(overrides) => state.matcher.with_overrides(overrides),
        None => state.matcher.clone(),
    };

    let config_warnings = matcher.config().diagnostics();
    for warning in &config_warnings {
        tracing::warn!("Run {}: questionable matching config: {}", run_id, warning);
    }

    // Scoring is CPU-bound; keep it off the async workers
    let run = tokio::task::spawn_blocking(move || {
        let tables = LookupTables::new(
            &req.organizations,
            &req.sites,
            &req.licenses,
            &req.capability_profiles,
        );
        matcher.run(&req.referral, &req.openings, &tables)
    })
    .await?;

    tracing::info!(
        "Run {}: returning {} matches from {} openings",
        run_id,
        run.meta.matches_found,
        run.meta.openings_searched
    );

    Ok(HttpResponse::Ok().json(FindMatchesResponse {
        run_id,
        results: run.results,
        meta: run.meta,
        config_warnings,
    }))
}

/// Re-explain a stored score
///
/// POST /api/v1/matches/explain
async fn explain_match(
    state: web::Data<AppState>,
    req: web::Json<ExplainRequest>,
) -> Result<HttpResponse, ApiError> {
    req.validate()?;

    let weights = match &req.weights {
        Some(weights) => {
            let overrides = MatchingConfigOverrides {
                weights: Some(weights.clone()),
                ..Default::default()
            };
            state.matcher.config().merged(&overrides).weights
        }
        None => state.matcher.config().weights,
    };

    let explanation = explain_with_weights(
        &req.score_breakdown,
        req.total_score,
        &req.opening,
        &req.referral,
        req.organization.as_ref(),
        req.site.as_ref(),
        &weights,
    );

    Ok(HttpResponse::Ok().json(ExplainResponse { explanation }))
}

/// Advisory risk flags for a referral
///
/// POST /api/v1/matches/risk-flags
async fn risk_flags_for_referral(req: web::Json<RiskFlagsRequest>) -> HttpResponse {
    let flags = risk_flags(&req.referral, req.match_result.as_ref());
    tracing::debug!("Raised {} risk flags", flags.len());

    HttpResponse::Ok().json(RiskFlagsResponse { flags })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_check_response() {
        let response = HealthResponse {
            status: "healthy".to_string(),
            version: "0.1.0".to_string(),
            timestamp: chrono::Utc::now(),
        };

        assert_eq!(response.status, "healthy");
    }

    #[test]
    fn test_too_many_openings_is_bad_request() {
        let error = ApiError::TooManyOpenings { count: 12, limit: 10 };

        assert_eq!(error.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(error.to_string(), "Too many openings: 12 exceeds the limit of 10");
    }
}
