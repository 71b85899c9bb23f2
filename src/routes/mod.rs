pub mod candidate_routes;
pub mod employee_routes;
pub mod health;
pub mod sync_routes;

use axum::routing::{get, post};
use axum::Router;

pub fn api_router() -> Router<crate::AppState> {
    Router::new()
        .route("/health", get(health::health))
        .route(
            "/api/candidates",
            get(candidate_routes::list_candidates).post(candidate_routes::create_candidate),
        )
        .route(
            "/api/candidates/pipeline-stats",
            get(candidate_routes::get_pipeline_stats),
        )
        .route(
            "/api/candidates/:id",
            get(candidate_routes::get_candidate)
                .put(candidate_routes::update_candidate)
                .delete(candidate_routes::delete_candidate),
        )
        .route(
            "/api/candidates/:id/approve",
            post(candidate_routes::approve_candidate),
        )
        .route(
            "/api/candidates/:id/deny",
            post(candidate_routes::deny_candidate),
        )
        .route(
            "/api/indeed/sync-candidates",
            post(sync_routes::sync_candidates),
        )
        .route(
            "/api/indeed/push-candidate-status",
            post(sync_routes::push_candidate_status),
        )
        .route("/api/indeed/sync-status", get(sync_routes::get_sync_status))
        .route(
            "/api/employees",
            get(employee_routes::list_employees).post(employee_routes::create_employee),
        )
        .route(
            "/api/employees/:id",
            get(employee_routes::get_employee)
                .put(employee_routes::update_employee)
                .delete(employee_routes::delete_employee),
        )
}
