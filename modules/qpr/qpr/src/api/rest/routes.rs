use axum::Router;
use axum::routing::{get, post, put};
use tower_http::trace::TraceLayer;

use crate::api::rest::handlers;
use crate::api::rest::state::AppState;

/// Assemble the REST surface under `/api`.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/auth/register", post(handlers::register))
        .route("/api/auth/login", post(handlers::login))
        .route("/api/auth/logout", post(handlers::logout))
        .route("/api/auth/change-password", post(handlers::change_password))
        .route("/api/hods", get(handlers::hod_groups))
        .route(
            "/api/profile",
            get(handlers::get_profile).put(handlers::update_profile),
        )
        .route("/api/profile/office", put(handlers::update_office))
        .route(
            "/api/records",
            get(handlers::list_records).post(handlers::save_record),
        )
        .route(
            "/api/records/{id}",
            get(handlers::get_record).delete(handlers::delete_record),
        )
        .route("/api/request-edit", post(handlers::request_edit))
        .route("/api/hod/dashboard", get(handlers::hod_dashboard))
        .route("/api/hod/people", get(handlers::hod_people))
        .route("/api/admin/dashboard", get(handlers::admin_dashboard))
        .route("/api/admin/employees", get(handlers::admin_employees))
        .route(
            "/api/admin/requests/{id}/decide",
            post(handlers::decide_request),
        )
        .route("/api/admin/hods", post(handlers::create_hod))
        .route("/api/admin/hods/rename", post(handlers::rename_hod))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
