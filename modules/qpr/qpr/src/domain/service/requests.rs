//! Edit-request fan-out and admin resolution.

use std::sync::Arc;

use qpr_sdk::{RequestKind, Role};
use tracing::{info, instrument};

use crate::domain::error::DomainError;
use crate::domain::model::Identity;
use crate::domain::repos::{ProfilesRepository, ReportsRepository, RequestsRepository};
use crate::domain::service::require_admin;
use crate::domain::workflow;

pub struct RequestsService {
    profiles: Arc<dyn ProfilesRepository>,
    reports: Arc<dyn ReportsRepository>,
    requests: Arc<dyn RequestsRepository>,
}

impl RequestsService {
    pub fn new(
        profiles: Arc<dyn ProfilesRepository>,
        reports: Arc<dyn ReportsRepository>,
        requests: Arc<dyn RequestsRepository>,
    ) -> Self {
        Self {
            profiles,
            reports,
            requests,
        }
    }

    /// File an edit request; one pending request is created per admin
    /// account. Returns the number of admins notified.
    #[instrument(skip_all, fields(account_id = identity.account_id, kind = %kind.as_str()))]
    pub async fn request_edit(
        &self,
        identity: &Identity,
        kind: RequestKind,
        record_id: Option<i64>,
        reason: &str,
    ) -> Result<usize, DomainError> {
        let reason = match kind {
            RequestKind::Qpr => {
                let id = record_id.ok_or_else(|| {
                    DomainError::validation("record_id", "record id is required for QPR requests")
                })?;
                let record = self
                    .reports
                    .find_owned(id, identity.account_id)
                    .await?
                    .ok_or(DomainError::NotFound("record"))?;
                format!(
                    "Edit request for QPR ({} - {}): {reason}",
                    record.header.office_name, record.header.quarter
                )
            }
            RequestKind::Profile => format!("Edit request for profile: {reason}"),
            RequestKind::Both => {
                return Err(DomainError::validation(
                    "request_type",
                    "invalid request type",
                ));
            }
        };

        let admins = self.profiles.list_by_role(Role::Admin).await?;
        if admins.is_empty() {
            return Err(DomainError::validation(
                "recipient",
                "no admin accounts exist",
            ));
        }

        for admin in &admins {
            self.requests
                .create(identity.account_id, admin.account_id, kind, &reason)
                .await?;
        }

        info!(admins = admins.len(), "edit request filed");
        Ok(admins.len())
    }

    /// Admin-only: resolve a pending request. Resolution is terminal;
    /// deciding an already-resolved request fails.
    #[instrument(skip_all, fields(request_id = request_id, approve = approve))]
    pub async fn decide(
        &self,
        identity: &Identity,
        request_id: i64,
        approve: bool,
    ) -> Result<(), DomainError> {
        require_admin(identity)?;

        let request = self
            .requests
            .find(request_id)
            .await?
            .ok_or(DomainError::NotFound("request"))?;

        let next = workflow::resolve(request.status, approve).ok_or_else(|| {
            DomainError::validation("status", "request is already resolved")
        })?;

        self.requests.set_status(request_id, next).await?;
        info!(request_id, status = %next.as_str(), "edit request resolved");
        Ok(())
    }
}
