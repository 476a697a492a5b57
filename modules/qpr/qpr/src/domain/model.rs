//! Domain entities of the QPR module.

use chrono::{DateTime, Utc};
use qpr_sdk::{RequestKind, RequestStatus, Role};

use crate::domain::sections::SectionSet;

/// Authenticated caller identity, resolved from the session layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub account_id: i64,
    pub employee_code: String,
    pub role: Role,
}

impl Identity {
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    #[must_use]
    pub fn is_hod(&self) -> bool {
        self.role == Role::Hod
    }
}

/// A user profile, one per account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub id: i64,
    pub account_id: i64,
    pub employee_code: String,
    pub role: Role,
    /// HOD-group label; `None` means the user is their own group.
    pub hod_group: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub office_name: Option<String>,
    pub office_code: Option<String>,
    pub finalized: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Profile {
    /// Display name used where the profile stands in for its account.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|n| !n.is_empty())
            .unwrap_or(&self.employee_code)
    }
}

/// Everything needed to create an account together with its profile.
#[derive(Debug, Clone)]
pub struct NewAccountRecord {
    pub employee_code: String,
    pub password_hash: String,
    pub role: Role,
    pub hod_group: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub finalized: bool,
}

/// Header fields of a QPR record, without its sections.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportHeader {
    pub office_name: String,
    pub office_code: String,
    pub region: String,
    pub quarter: String,
    pub year: String,
    pub status: String,
    pub phone: String,
    pub email: String,
}

/// A full QPR record with its section children.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub id: i64,
    pub account_id: i64,
    pub header: ReportHeader,
    /// Derived freeze flag; always equals `status == "Submitted"`.
    pub submitted: bool,
    pub sections: SectionSet,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Header-level projection used by the aggregation views.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportSummary {
    pub id: i64,
    pub account_id: i64,
    pub office_name: String,
    pub office_code: String,
    pub quarter: String,
    pub year: String,
    pub status: String,
    pub submitted: bool,
}

/// An edit-permission grant request routed to an admin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditRequest {
    pub id: i64,
    pub requester_id: i64,
    pub recipient_id: i64,
    pub kind: RequestKind,
    pub reason: String,
    pub status: RequestStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Parameters of an admin HOD rename, cascading to the group members.
#[derive(Debug, Clone)]
pub struct HodRename {
    pub old_employee_code: String,
    pub new_employee_code: String,
    pub old_name: String,
    pub new_name: String,
}
