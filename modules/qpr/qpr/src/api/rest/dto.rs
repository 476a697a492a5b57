//! Request and response bodies of the REST surface.

use qpr_sdk::{GroupStats, PendingRequestView, RequestKind, Role};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct RegisterRequest {
    pub employee_code: String,
    pub password: String,
    pub password_confirm: String,
    pub hod_group: String,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub employee_code: String,
    pub password: String,
    /// Claimed role; must match the stored profile role.
    pub role: Role,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SessionResponse {
    pub token: String,
    pub employee_code: String,
    pub role: Role,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ChangePasswordRequest {
    pub old_password: String,
    pub new_password: String,
    pub new_password_confirm: String,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateProfileRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub hod_group: String,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateOfficeRequest {
    #[serde(default)]
    pub office_name: String,
    #[serde(default)]
    pub office_code: String,
}

/// Create-or-update payload for a QPR record; an `id` makes it an update.
/// Office fields keep their historical camelCase wire names.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct SaveReportRequest {
    pub id: Option<i64>,
    #[serde(rename = "officeName", default)]
    pub office_name: String,
    #[serde(rename = "officeCode", default)]
    pub office_code: String,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub quarter: String,
    pub year: Option<String>,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    #[schema(value_type = Object)]
    pub details: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SavedResponse {
    pub id: i64,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct RequestEditRequest {
    pub request_type: RequestKind,
    pub record_id: Option<i64>,
    #[serde(default)]
    pub reason: String,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct DecideRequest {
    /// Either `approve` or `reject`.
    pub action: String,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateHodRequest {
    pub employee_code: String,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct RenameHodRequest {
    pub old_hod_name: String,
    pub new_hod_name: String,
    pub old_employee_code: String,
    pub new_employee_code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RenameHodResponse {
    pub message: String,
    pub new_hod_name: String,
    pub cascaded_users: u64,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct EmployeeListQuery {
    #[serde(default)]
    pub employee_code: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub quarter: String,
    #[serde(default)]
    pub year: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AdminDashboardResponse {
    pub groups: Vec<GroupStats>,
    pub total_groups: u32,
    pub pending_requests: Vec<PendingRequestView>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HodGroupsResponse {
    pub hods: Vec<String>,
}
