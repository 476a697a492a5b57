//! Repository traits at the domain/storage seam.
//!
//! Implementations live in `infra::storage`; services depend on these traits
//! only, which keeps the domain testable against in-memory mocks.

use async_trait::async_trait;
use qpr_sdk::{RequestKind, Role};

use crate::domain::model::{
    EditRequest, HodRename, NewAccountRecord, Profile, Report, ReportHeader, ReportSummary,
};
use crate::domain::sections::SectionSet;

#[async_trait]
pub trait ProfilesRepository: Send + Sync {
    /// Create the account and its profile in one transaction.
    async fn create_account(&self, new: NewAccountRecord) -> anyhow::Result<Profile>;

    async fn find_by_employee_code(&self, employee_code: &str) -> anyhow::Result<Option<Profile>>;

    async fn find_by_account(&self, account_id: i64) -> anyhow::Result<Option<Profile>>;

    async fn password_hash(&self, account_id: i64) -> anyhow::Result<Option<String>>;

    async fn set_password_hash(&self, account_id: i64, hash: &str) -> anyhow::Result<()>;

    async fn list_by_role(&self, role: Role) -> anyhow::Result<Vec<Profile>>;

    /// Save the editable profile details and mark the profile finalized.
    async fn update_details(
        &self,
        account_id: i64,
        name: &str,
        email: &str,
        hod_group: &str,
    ) -> anyhow::Result<Profile>;

    async fn update_office(
        &self,
        account_id: i64,
        office_name: &str,
        office_code: &str,
    ) -> anyhow::Result<Profile>;

    /// Rename a HOD and cascade the group label to every `user`-role profile
    /// whose group matches the old name case-insensitively. Returns the
    /// number of cascaded member profiles.
    async fn rename_hod(&self, hod_account_id: i64, rename: &HodRename) -> anyhow::Result<u64>;
}

#[async_trait]
pub trait ReportsRepository: Send + Sync {
    /// All reports of one owner, newest first, with section children.
    async fn list_by_owner(&self, account_id: i64) -> anyhow::Result<Vec<Report>>;

    /// A single owned report; `None` covers both absence and foreign
    /// ownership.
    async fn find_owned(&self, id: i64, account_id: i64) -> anyhow::Result<Option<Report>>;

    async fn create(
        &self,
        account_id: i64,
        header: ReportHeader,
        sections: SectionSet,
    ) -> anyhow::Result<Report>;

    async fn update(
        &self,
        id: i64,
        header: ReportHeader,
        sections: SectionSet,
    ) -> anyhow::Result<Report>;

    /// Delete an owned report, cascading its sections. Returns deleted rows.
    async fn delete_owned(&self, id: i64, account_id: i64) -> anyhow::Result<u64>;

    /// Header projections of every report, for the aggregation views.
    async fn summaries(&self) -> anyhow::Result<Vec<ReportSummary>>;
}

#[async_trait]
pub trait RequestsRepository: Send + Sync {
    async fn create(
        &self,
        requester_id: i64,
        recipient_id: i64,
        kind: RequestKind,
        reason: &str,
    ) -> anyhow::Result<EditRequest>;

    async fn find(&self, id: i64) -> anyhow::Result<Option<EditRequest>>;

    async fn set_status(&self, id: i64, status: qpr_sdk::RequestStatus) -> anyhow::Result<()>;

    /// Pending requests addressed to one recipient, newest first.
    async fn pending_for_recipient(&self, recipient_id: i64) -> anyhow::Result<Vec<EditRequest>>;

    /// Whether an approved grant covering `kind` exists for the requester.
    async fn has_approved(&self, requester_id: i64, kind: RequestKind) -> anyhow::Result<bool>;

    /// Whether a pending request covering `kind` exists for the requester.
    async fn has_pending(&self, requester_id: i64, kind: RequestKind) -> anyhow::Result<bool>;

    /// Consume (delete) every approved grant covering `kind` for the
    /// requester. Returns deleted rows.
    async fn delete_approved(&self, requester_id: i64, kind: RequestKind) -> anyhow::Result<u64>;

    /// Requester account ids with a pending request covering `kind`.
    async fn pending_requester_ids(&self, kind: RequestKind) -> anyhow::Result<Vec<i64>>;
}
