// HTTP routes
pub mod matches;

use actix_web::web;

pub use matches::{ApiError, AppState, DEFAULT_MAX_OPENINGS_PER_REQUEST};

/// Mount the placement endpoints under `/api/v1`
///
/// - `GET  /api/v1/health`
/// - `POST /api/v1/matches/find`
/// - `POST /api/v1/matches/explain`
/// - `POST /api/v1/matches/risk-flags`
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/api/v1").configure(matches::configure));
}
