//! End-to-end workflow tests over the real SeaORM repositories and an
//! in-memory SQLite database, driven through the HTTP router.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode, header};
use qpr::api::rest::{AppState, router};
use qpr::config::QprConfig;
use qpr::domain::model::{Identity, NewAccountRecord};
use qpr::domain::repos::ProfilesRepository as _;
use qpr::infra::storage::connect_and_migrate;
use qpr::infra::storage::repos::{
    SeaOrmProfilesRepository, SeaOrmReportsRepository, SeaOrmRequestsRepository,
};
use qpr_sdk::Role;
use serde_json::{Value, json};
use tower::ServiceExt as _;

struct TestApp {
    app: Router,
    state: AppState,
    profiles: Arc<SeaOrmProfilesRepository>,
}

async fn test_app() -> TestApp {
    let db = connect_and_migrate("sqlite::memory:").await.unwrap();
    let profiles = Arc::new(SeaOrmProfilesRepository::new(db.clone()));
    let state = AppState::new(
        profiles.clone(),
        Arc::new(SeaOrmReportsRepository::new(db.clone())),
        Arc::new(SeaOrmRequestsRepository::new(db)),
        QprConfig::default(),
    );
    TestApp {
        app: router(state.clone()),
        state,
        profiles,
    }
}

impl TestApp {
    /// Seed an admin account directly and issue it a session.
    async fn admin_token(&self) -> String {
        let profile = self
            .profiles
            .create_account(NewAccountRecord {
                employee_code: "1".to_owned(),
                password_hash: "unused".to_owned(),
                role: Role::Admin,
                hod_group: None,
                name: Some("Manager".to_owned()),
                email: Some("manager@office.gov".to_owned()),
                finalized: true,
            })
            .await
            .unwrap();
        self.state.sessions.issue(Identity {
            account_id: profile.account_id,
            employee_code: profile.employee_code,
            role: profile.role,
        })
    }

    async fn send(&self, req: Request<Body>) -> (StatusCode, Value) {
        let response = self.app.clone().oneshot(req).await.unwrap();
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

    async fn register(&self, code: &str, hod_group: &str) -> String {
        let (status, body) = self
            .send(post(
                "/api/auth/register",
                None,
                json!({
                    "employee_code": code,
                    "password": "secret1",
                    "password_confirm": "secret1",
                    "hod_group": hod_group,
                }),
            ))
            .await;
        assert_eq!(status, StatusCode::CREATED, "register failed: {body}");
        body["token"].as_str().unwrap().to_owned()
    }
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

#[tokio::test]
async fn draft_submit_approve_consume_cycle() {
    let t = test_app().await;
    let admin = t.admin_token().await;
    let user = t.register("905", "gayathri").await;

    // Create a draft with one section value.
    let (status, body) = t
        .send(post(
            "/api/records",
            Some(&user),
            json!({
                "officeName": "Regional Office",
                "officeCode": "RO-12",
                "region": "South",
                "quarter": "Q1",
                "status": "Draft",
                "details": {"s1_total": "5"},
            }),
        ))
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    let id = body["id"].as_i64().unwrap();

    let (_, body) = t.send(get(&format!("/api/records/{id}"), Some(&user))).await;
    assert_eq!(body["details"]["s1_total"], 5);
    assert_eq!(body["can_edit"], true);

    // Submit: record freezes.
    let submit = json!({
        "id": id,
        "officeName": "Regional Office",
        "officeCode": "RO-12",
        "region": "South",
        "quarter": "Q1",
        "status": "Submitted",
        "details": {"s1_total": "5"},
    });
    let (status, _) = t.send(post("/api/records", Some(&user), submit.clone())).await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = t.send(get(&format!("/api/records/{id}"), Some(&user))).await;
    assert_eq!(body["can_edit"], false);

    // Direct edit of the frozen record is forbidden.
    let (status, _) = t.send(post("/api/records", Some(&user), submit.clone())).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // File an edit request; the admin sees and approves it.
    let (status, _) = t
        .send(post(
            "/api/request-edit",
            Some(&user),
            json!({"request_type": "qpr", "record_id": id, "reason": "typo in s1"}),
        ))
        .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = t.send(get("/api/admin/dashboard", Some(&admin))).await;
    let pending = body["pending_requests"].as_array().unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0]["requester_code"], "905");
    let request_id = pending[0]["id"].as_i64().unwrap();

    let (status, _) = t
        .send(post(
            &format!("/api/admin/requests/{request_id}/decide"),
            Some(&admin),
            json!({"action": "approve"}),
        ))
        .await;
    assert_eq!(status, StatusCode::OK);

    // The grant unlocks exactly one save.
    let (_, body) = t.send(get(&format!("/api/records/{id}"), Some(&user))).await;
    assert_eq!(body["edit_approved"], true);
    assert_eq!(body["can_edit"], true);

    let (status, _) = t.send(post("/api/records", Some(&user), submit.clone())).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = t.send(post("/api/records", Some(&user), submit)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // Deciding the consumed (deleted) request again is a 404; deciding a
    // resolved-but-present one is covered in the unit tests.
    let (status, _) = t
        .send(post(
            &format!("/api/admin/requests/{request_id}/decide"),
            Some(&admin),
            json!({"action": "reject"}),
        ))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn duplicate_employee_code_leaves_original_untouched() {
    let t = test_app().await;
    t.register("905", "gayathri").await;

    let (status, body) = t
        .send(post(
            "/api/auth/register",
            None,
            json!({
                "employee_code": "905",
                "password": "other99",
                "password_confirm": "other99",
                "hod_group": "shyam",
            }),
        ))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["detail"].as_str().unwrap().contains("already registered"));

    // Original credentials and group survive.
    let (status, body) = t
        .send(post(
            "/api/auth/login",
            None,
            json!({"employee_code": "905", "password": "secret1", "role": "user"}),
        ))
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");

    let profile = t
        .profiles
        .find_by_employee_code("905")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(profile.hod_group.as_deref(), Some("gayathri"));
}

#[tokio::test]
async fn hod_rename_cascades_case_insensitively() {
    let t = test_app().await;
    let admin = t.admin_token().await;

    let (status, _) = t
        .send(post(
            "/api/admin/hods",
            Some(&admin),
            json!({"employee_code": "910", "name": "ram", "email": "ram@office.gov"}),
        ))
        .await;
    assert_eq!(status, StatusCode::CREATED);

    t.register("20", "ram").await;
    t.register("21", "RAM").await;
    t.register("22", "shyam").await;

    let (status, body) = t
        .send(post(
            "/api/admin/hods/rename",
            Some(&admin),
            json!({
                "old_hod_name": "ram",
                "new_hod_name": "Ram Kumar",
                "old_employee_code": "910",
                "new_employee_code": "911",
            }),
        ))
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["cascaded_users"], 2);

    for code in ["20", "21"] {
        let profile = t
            .profiles
            .find_by_employee_code(code)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(profile.hod_group.as_deref(), Some("Ram Kumar"));
    }
    let untouched = t
        .profiles
        .find_by_employee_code("22")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(untouched.hod_group.as_deref(), Some("shyam"));

    // The renamed HOD logs in with the new employee code.
    let (status, _) = t
        .send(post(
            "/api/auth/login",
            None,
            json!({"employee_code": "911", "password": "123456", "role": "hod"}),
        ))
        .await;
    assert_eq!(status, StatusCode::OK);

    // The HOD's group view picks up the cascaded members.
    let (_, body) = t
        .send(post(
            "/api/auth/login",
            None,
            json!({"employee_code": "911", "password": "123456", "role": "hod"}),
        ))
        .await;
    let hod_token = body["token"].as_str().unwrap().to_owned();
    let (status, body) = t.send(get("/api/hod/dashboard", Some(&hod_token))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["group_name"], "Ram Kumar");
    assert_eq!(body["total_users"], 2);
}

#[tokio::test]
async fn deleting_a_report_removes_its_sections() {
    let t = test_app().await;
    let user = t.register("905", "gayathri").await;

    let (_, body) = t
        .send(post(
            "/api/records",
            Some(&user),
            json!({
                "officeName": "RO",
                "officeCode": "1",
                "quarter": "Q1",
                "details": {"s1_total": "5", "s9_date": "2025-04-01", "s12_1": "rollout"},
            }),
        ))
        .await;
    let id = body["id"].as_i64().unwrap();

    let (status, _) = t
        .send(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/records/{id}"))
                .header(header::AUTHORIZATION, format!("Bearer {user}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = t.send(get(&format!("/api/records/{id}"), Some(&user))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Re-creating under the same owner starts from empty sections.
    let (_, body) = t
        .send(post(
            "/api/records",
            Some(&user),
            json!({"officeName": "RO", "officeCode": "1", "quarter": "Q2", "details": {}}),
        ))
        .await;
    let new_id = body["id"].as_i64().unwrap();
    let (_, body) = t
        .send(get(&format!("/api/records/{new_id}"), Some(&user)))
        .await;
    assert_eq!(body["details"].as_object().unwrap().len(), 0);
}

#[tokio::test]
async fn admin_employee_list_groups_and_filters() {
    let t = test_app().await;
    let admin = t.admin_token().await;

    let (status, _) = t
        .send(post(
            "/api/admin/hods",
            Some(&admin),
            json!({"employee_code": "910", "name": "Gayathri", "email": "g@office.gov"}),
        ))
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let user = t.register("20", "gayathri").await;
    t.register("30", "gayathri").await;

    let (_, body) = t
        .send(post(
            "/api/records",
            Some(&user),
            json!({
                "officeName": "Regional Office",
                "officeCode": "RO-12",
                "quarter": "Q1",
                "year": "2025-2026",
                "status": "Submitted",
                "details": {},
            }),
        ))
        .await;
    assert!(body["id"].is_i64());

    let (status, body) = t
        .send(get("/api/admin/employees?quarter=q1", Some(&admin)))
        .await;
    assert_eq!(status, StatusCode::OK);
    let groups = body["groups"].as_array().unwrap();
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0]["group_name"], "Gayathri");
    assert_eq!(groups[0]["user_count"], 1);
    assert_eq!(groups[0]["users"][0]["employee_code"], "20");
    assert_eq!(groups[0]["users"][0]["report_status"], "Submitted");
    assert_eq!(body["quarters"], json!(["Q1"]));

    // Unfiltered, both users appear in the one led group.
    let (_, body) = t.send(get("/api/admin/employees", Some(&admin))).await;
    assert_eq!(body["groups"][0]["user_count"], 2);
}
