//! REST handlers. Thin over the domain services: extract identity, call the
//! service, map the result into the wire DTOs.

use axum::Json;
use axum::extract::{Path, Query, State};
use http::StatusCode;
use qpr_sdk::{EmployeeDirectory, HodDashboard, HodPersonRow, ProfileView, ReportView};

use crate::api::rest::auth::AuthSession;
use crate::api::rest::dto::{
    AdminDashboardResponse, ChangePasswordRequest, CreateHodRequest, DecideRequest,
    EmployeeListQuery, HodGroupsResponse, LoginRequest, MessageResponse, RegisterRequest,
    RenameHodRequest, RenameHodResponse, RequestEditRequest, SaveReportRequest, SavedResponse,
    SessionResponse, UpdateOfficeRequest, UpdateProfileRequest,
};
use crate::api::rest::error::{ApiResult, Problem};
use crate::api::rest::state::AppState;
use crate::domain::service::accounts::{NewHod, Registration};
use crate::domain::service::dashboards::EmployeeFilter;
use crate::domain::service::reports::SaveReport;
use crate::domain::model::HodRename;

pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<SessionResponse>)> {
    let identity = state
        .accounts
        .register(Registration {
            employee_code: req.employee_code,
            password: req.password,
            password_confirm: req.password_confirm,
            hod_group: req.hod_group,
        })
        .await?;

    let response = SessionResponse {
        employee_code: identity.employee_code.clone(),
        role: identity.role,
        token: state.sessions.issue(identity),
    };
    Ok((StatusCode::CREATED, Json(response)))
}

pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<SessionResponse>> {
    let identity = state
        .accounts
        .login(&req.employee_code, &req.password, req.role)
        .await?;

    Ok(Json(SessionResponse {
        employee_code: identity.employee_code.clone(),
        role: identity.role,
        token: state.sessions.issue(identity),
    }))
}

pub async fn logout(
    session: AuthSession,
    State(state): State<AppState>,
) -> Json<MessageResponse> {
    state.sessions.revoke(&session.token);
    Json(MessageResponse {
        message: "logged out".to_owned(),
    })
}

pub async fn change_password(
    session: AuthSession,
    State(state): State<AppState>,
    Json(req): Json<ChangePasswordRequest>,
) -> ApiResult<Json<MessageResponse>> {
    state
        .accounts
        .change_password(
            &session.identity,
            &req.old_password,
            &req.new_password,
            &req.new_password_confirm,
        )
        .await?;
    Ok(Json(MessageResponse {
        message: "password changed successfully".to_owned(),
    }))
}

pub async fn hod_groups(State(state): State<AppState>) -> ApiResult<Json<HodGroupsResponse>> {
    let hods = state.accounts.hod_group_options().await?;
    Ok(Json(HodGroupsResponse { hods }))
}

pub async fn get_profile(
    session: AuthSession,
    State(state): State<AppState>,
) -> ApiResult<Json<ProfileView>> {
    Ok(Json(state.profiles.view(&session.identity).await?))
}

pub async fn update_profile(
    session: AuthSession,
    State(state): State<AppState>,
    Json(req): Json<UpdateProfileRequest>,
) -> ApiResult<Json<MessageResponse>> {
    state
        .profiles
        .update(&session.identity, &req.name, &req.email, &req.hod_group)
        .await?;
    Ok(Json(MessageResponse {
        message: "profile updated successfully".to_owned(),
    }))
}

pub async fn update_office(
    session: AuthSession,
    State(state): State<AppState>,
    Json(req): Json<UpdateOfficeRequest>,
) -> ApiResult<Json<MessageResponse>> {
    state
        .profiles
        .update_office(&session.identity, &req.office_name, &req.office_code)
        .await?;
    Ok(Json(MessageResponse {
        message: "office details updated successfully".to_owned(),
    }))
}

pub async fn list_records(
    session: AuthSession,
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<ReportView>>> {
    Ok(Json(state.reports.list(&session.identity).await?))
}

pub async fn save_record(
    session: AuthSession,
    State(state): State<AppState>,
    Json(req): Json<SaveReportRequest>,
) -> ApiResult<Json<SavedResponse>> {
    let id = state
        .reports
        .save(
            &session.identity,
            SaveReport {
                id: req.id,
                office_name: req.office_name,
                office_code: req.office_code,
                region: req.region,
                quarter: req.quarter,
                year: req.year,
                status: req.status,
                phone: req.phone,
                email: req.email,
                details: req.details,
            },
        )
        .await?;
    Ok(Json(SavedResponse {
        id,
        message: "saved successfully".to_owned(),
    }))
}

pub async fn get_record(
    session: AuthSession,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<ReportView>> {
    Ok(Json(state.reports.get(&session.identity, id).await?))
}

pub async fn delete_record(
    session: AuthSession,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<MessageResponse>> {
    state.reports.delete(&session.identity, id).await?;
    Ok(Json(MessageResponse {
        message: "deleted".to_owned(),
    }))
}

pub async fn request_edit(
    session: AuthSession,
    State(state): State<AppState>,
    Json(req): Json<RequestEditRequest>,
) -> ApiResult<Json<MessageResponse>> {
    state
        .requests
        .request_edit(
            &session.identity,
            req.request_type,
            req.record_id,
            &req.reason,
        )
        .await?;
    Ok(Json(MessageResponse {
        message: "request sent to admin for approval".to_owned(),
    }))
}

pub async fn hod_dashboard(
    session: AuthSession,
    State(state): State<AppState>,
) -> ApiResult<Json<HodDashboard>> {
    Ok(Json(state.dashboards.hod_dashboard(&session.identity).await?))
}

pub async fn hod_people(
    session: AuthSession,
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<HodPersonRow>>> {
    Ok(Json(state.dashboards.hod_people(&session.identity).await?))
}

pub async fn admin_dashboard(
    session: AuthSession,
    State(state): State<AppState>,
) -> ApiResult<Json<AdminDashboardResponse>> {
    let (groups, pending_requests) = state.dashboards.admin_overview(&session.identity).await?;
    Ok(Json(AdminDashboardResponse {
        total_groups: groups.len() as u32,
        groups,
        pending_requests,
    }))
}

pub async fn admin_employees(
    session: AuthSession,
    State(state): State<AppState>,
    Query(query): Query<EmployeeListQuery>,
) -> ApiResult<Json<EmployeeDirectory>> {
    let directory = state
        .dashboards
        .employee_directory(
            &session.identity,
            &EmployeeFilter {
                employee_code: query.employee_code.trim().to_owned(),
                name: query.name.trim().to_owned(),
                quarter: query.quarter.trim().to_owned(),
                year: query.year.trim().to_owned(),
            },
        )
        .await?;
    Ok(Json(directory))
}

pub async fn decide_request(
    session: AuthSession,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<DecideRequest>,
) -> ApiResult<Json<MessageResponse>> {
    let approve = match req.action.as_str() {
        "approve" => true,
        "reject" => false,
        _ => {
            return Err(Problem::new(
                StatusCode::BAD_REQUEST,
                "Bad Request",
                "action must be 'approve' or 'reject'",
            ));
        }
    };
    state
        .requests
        .decide(&session.identity, id, approve)
        .await?;
    Ok(Json(MessageResponse {
        message: if approve {
            "request approved successfully".to_owned()
        } else {
            "request rejected".to_owned()
        },
    }))
}

pub async fn create_hod(
    session: AuthSession,
    State(state): State<AppState>,
    Json(req): Json<CreateHodRequest>,
) -> ApiResult<(StatusCode, Json<MessageResponse>)> {
    let profile = state
        .accounts
        .create_hod(
            &session.identity,
            NewHod {
                employee_code: req.employee_code,
                name: req.name,
                email: req.email,
            },
        )
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: format!(
                "HOD {} created successfully",
                profile.name.as_deref().unwrap_or(&profile.employee_code)
            ),
        }),
    ))
}

pub async fn rename_hod(
    session: AuthSession,
    State(state): State<AppState>,
    Json(req): Json<RenameHodRequest>,
) -> ApiResult<Json<RenameHodResponse>> {
    let new_name = req.new_hod_name.clone();
    let cascaded = state
        .accounts
        .rename_hod(
            &session.identity,
            HodRename {
                old_employee_code: req.old_employee_code,
                new_employee_code: req.new_employee_code,
                old_name: req.old_hod_name,
                new_name: req.new_hod_name,
            },
        )
        .await?;
    Ok(Json(RenameHodResponse {
        message: "HOD updated successfully".to_owned(),
        new_hod_name: new_name,
        cascaded_users: cascaded,
    }))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::Router;
    use axum::body::Body;
    use http::{Request, StatusCode, header};
    use serde_json::{Value, json};
    use tower::ServiceExt as _;

    use crate::api::rest::routes::router;
    use crate::api::rest::state::AppState;
    use crate::config::QprConfig;
    use crate::domain::service::test_support::{
        InMemoryProfiles, InMemoryReports, InMemoryRequests,
    };

    fn test_app() -> Router {
        let state = AppState::new(
            Arc::new(InMemoryProfiles::default()),
            Arc::new(InMemoryReports::default()),
            Arc::new(InMemoryRequests::default()),
            QprConfig::default(),
        );
        router(state)
    }

    async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(req).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    fn post(uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    fn get(uri: &str, token: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().method("GET").uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        builder.body(Body::empty()).unwrap()
    }

    async fn register(app: &Router, code: &str) -> String {
        let (status, body) = send(
            app,
            post(
                "/api/auth/register",
                None,
                json!({
                    "employee_code": code,
                    "password": "secret1",
                    "password_confirm": "secret1",
                    "hod_group": "gayathri",
                }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        body["token"].as_str().unwrap().to_owned()
    }

    #[tokio::test]
    async fn records_require_authentication() {
        let app = test_app();
        let (status, body) = send(&app, get("/api/records", None)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["status"], 401);
    }

    #[tokio::test]
    async fn register_create_and_fetch_record() {
        let app = test_app();
        let token = register(&app, "905").await;

        let (status, body) = send(
            &app,
            post(
                "/api/records",
                Some(&token),
                json!({
                    "officeName": "Regional Office",
                    "officeCode": "RO-12",
                    "region": "South",
                    "quarter": "Q1",
                    "status": "Draft",
                    "details": {"s1_total": "5"},
                }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let id = body["id"].as_i64().unwrap();

        let (status, body) = send(&app, get(&format!("/api/records/{id}"), Some(&token))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["details"]["s1_total"], 5);
        assert_eq!(body["can_edit"], true);
        assert_eq!(body["year"], "2025-2026");
    }

    #[tokio::test]
    async fn foreign_records_read_as_not_found() {
        let app = test_app();
        let owner = register(&app, "905").await;
        let other = register(&app, "906").await;

        let (_, body) = send(
            &app,
            post(
                "/api/records",
                Some(&owner),
                json!({"officeName": "RO", "officeCode": "1", "quarter": "Q1"}),
            ),
        )
        .await;
        let id = body["id"].as_i64().unwrap();

        let (status, _) = send(&app, get(&format!("/api/records/{id}"), Some(&other))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn hod_views_reject_plain_users() {
        let app = test_app();
        let token = register(&app, "905").await;
        let (status, _) = send(&app, get("/api/hod/dashboard", Some(&token))).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn admin_dashboard_rejects_plain_users() {
        let app = test_app();
        let token = register(&app, "905").await;
        let (status, _) = send(&app, get("/api/admin/dashboard", Some(&token))).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn duplicate_registration_is_a_validation_problem() {
        let app = test_app();
        register(&app, "905").await;

        let (status, body) = send(
            &app,
            post(
                "/api/auth/register",
                None,
                json!({
                    "employee_code": "905",
                    "password": "secret1",
                    "password_confirm": "secret1",
                    "hod_group": "gayathri",
                }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(
            body["detail"]
                .as_str()
                .unwrap()
                .contains("already registered")
        );
    }

    #[tokio::test]
    async fn logout_invalidates_the_token() {
        let app = test_app();
        let token = register(&app, "905").await;

        let (status, _) = send(&app, post("/api/auth/logout", Some(&token), json!({}))).await;
        assert_eq!(status, StatusCode::OK);

        let (status, _) = send(&app, get("/api/records", Some(&token))).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn login_enforces_claimed_role() {
        let app = test_app();
        register(&app, "905").await;

        let (status, _) = send(
            &app,
            post(
                "/api/auth/login",
                None,
                json!({"employee_code": "905", "password": "secret1", "role": "hod"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, body) = send(
            &app,
            post(
                "/api/auth/login",
                None,
                json!({"employee_code": "905", "password": "secret1", "role": "user"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["role"], "user");
    }

    #[tokio::test]
    async fn hod_group_options_list_is_public() {
        let app = test_app();
        // Registered users carry a group label; with no HOD account behind
        // it the dropdown stays empty.
        register(&app, "905").await;
        let (status, body) = send(&app, get("/api/hods", None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["hods"], json!([]));
    }
}
