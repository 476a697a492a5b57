//! Shared models of the QPR module.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Account role in the office hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Hod,
    Admin,
}

impl Role {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Hod => "hod",
            Role::Admin => "admin",
        }
    }

    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "user" => Some(Role::User),
            "hod" => Some(Role::Hod),
            "admin" => Some(Role::Admin),
            _ => None,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What an edit request asks to unlock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum RequestKind {
    Profile,
    Qpr,
    Both,
}

impl RequestKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            RequestKind::Profile => "profile",
            RequestKind::Qpr => "qpr",
            RequestKind::Both => "both",
        }
    }

    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "profile" => Some(RequestKind::Profile),
            "qpr" => Some(RequestKind::Qpr),
            "both" => Some(RequestKind::Both),
            _ => None,
        }
    }

    /// Whether a grant of this kind unlocks edits asked for by `wanted`.
    #[must_use]
    pub fn covers(self, wanted: RequestKind) -> bool {
        self == wanted || self == RequestKind::Both
    }
}

/// Lifecycle state of an edit request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    Pending,
    Approved,
    Rejected,
}

impl RequestStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            RequestStatus::Pending => "pending",
            RequestStatus::Approved => "approved",
            RequestStatus::Rejected => "rejected",
        }
    }

    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(RequestStatus::Pending),
            "approved" => Some(RequestStatus::Approved),
            "rejected" => Some(RequestStatus::Rejected),
            _ => None,
        }
    }
}

/// A user profile as seen by its owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ProfileView {
    pub employee_code: String,
    pub role: Role,
    pub hod_group: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub office_name: Option<String>,
    pub office_code: Option<String>,
    pub finalized: bool,
    pub can_edit: bool,
    pub edit_approved: bool,
    pub edit_pending: bool,
}

/// A QPR record in its flat external shape.
///
/// `details` is the flat section map keyed by the stable external keys
/// (`s1_total`, `s6_b_eng`, ...); numeric nulls surface as empty strings and
/// dates as ISO-8601 strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ReportView {
    pub id: i64,
    #[serde(rename = "officeName")]
    pub office_name: String,
    #[serde(rename = "officeCode")]
    pub office_code: String,
    pub region: String,
    pub quarter: String,
    pub year: String,
    pub status: String,
    pub phone: String,
    pub email: String,
    #[schema(value_type = Object)]
    pub details: serde_json::Map<String, serde_json::Value>,
    pub can_edit: bool,
    pub edit_approved: bool,
}

/// Per-group completion statistics on the admin overview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct GroupStats {
    pub group_name: String,
    /// Employee code of the leading HOD account, when one exists.
    pub employee_code: Option<String>,
    pub members: u32,
    pub profiles_finalized: u32,
    pub reports_submitted: u32,
    pub completion_pct: u32,
}

/// A pending edit request as listed on the admin dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PendingRequestView {
    pub id: i64,
    pub requester_code: String,
    pub requester_name: String,
    pub kind: RequestKind,
    pub reason: String,
    pub created_at: DateTime<Utc>,
}

/// One employee row on the admin employee list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct EmployeeRow {
    pub employee_code: String,
    pub name: String,
    pub email: String,
    pub office_name: String,
    pub office_code: String,
    pub quarter: String,
    pub year: String,
    pub report_status: String,
}

/// One HOD group on the admin employee list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct EmployeeGroup {
    pub group_name: String,
    pub hod_email: String,
    pub hod_employee_code: String,
    pub user_count: u32,
    pub users: Vec<EmployeeRow>,
}

/// Admin employee list plus the filter dropdown data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct EmployeeDirectory {
    pub groups: Vec<EmployeeGroup>,
    pub quarters: Vec<String>,
    pub years: Vec<String>,
}

/// Completion totals for the viewer's own HOD group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HodDashboard {
    pub group_name: String,
    pub total_users: u32,
    pub reports_submitted: u32,
    pub reports_pending: u32,
    pub profiles_finalized: u32,
}

/// One person row on the HOD people list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HodPersonRow {
    pub employee_code: String,
    pub name: String,
    pub email: String,
    pub office_code: String,
    pub office_name: String,
    pub profile_complete: bool,
    pub report_complete: bool,
    pub has_pending_edit_request: bool,
}
