//! Profile viewing and the finalize/approval workflow.

use std::sync::Arc;

use qpr_sdk::{ProfileView, RequestKind};
use tracing::{info, instrument};

use crate::domain::error::DomainError;
use crate::domain::model::Identity;
use crate::domain::repos::{ProfilesRepository, RequestsRepository};
use crate::domain::workflow;

pub struct ProfilesService {
    profiles: Arc<dyn ProfilesRepository>,
    requests: Arc<dyn RequestsRepository>,
}

impl ProfilesService {
    pub fn new(
        profiles: Arc<dyn ProfilesRepository>,
        requests: Arc<dyn RequestsRepository>,
    ) -> Self {
        Self { profiles, requests }
    }

    #[instrument(skip_all, fields(account_id = identity.account_id))]
    pub async fn view(&self, identity: &Identity) -> Result<ProfileView, DomainError> {
        let profile = self
            .profiles
            .find_by_account(identity.account_id)
            .await?
            .ok_or(DomainError::NotFound("profile"))?;

        let (edit_approved, edit_pending) = if profile.finalized {
            (
                self.requests
                    .has_approved(identity.account_id, RequestKind::Profile)
                    .await?,
                self.requests
                    .has_pending(identity.account_id, RequestKind::Profile)
                    .await?,
            )
        } else {
            (false, false)
        };

        Ok(ProfileView {
            employee_code: profile.employee_code,
            role: profile.role,
            hod_group: profile.hod_group,
            name: profile.name,
            email: profile.email,
            office_name: profile.office_name,
            office_code: profile.office_code,
            finalized: profile.finalized,
            can_edit: workflow::can_edit(profile.finalized, edit_approved),
            edit_approved,
            edit_pending,
        })
    }

    /// Save the profile details. The first save finalizes the profile;
    /// further saves require an approved `profile` grant, which the save
    /// consumes.
    #[instrument(skip_all, fields(account_id = identity.account_id))]
    pub async fn update(
        &self,
        identity: &Identity,
        name: &str,
        email: &str,
        hod_group: &str,
    ) -> Result<(), DomainError> {
        if name.trim().is_empty() || email.trim().is_empty() {
            return Err(DomainError::validation(
                "name",
                "name and email are required",
            ));
        }
        if hod_group.trim().is_empty() {
            return Err(DomainError::validation("hod_group", "HOD name is required"));
        }

        let profile = self
            .profiles
            .find_by_account(identity.account_id)
            .await?
            .ok_or(DomainError::NotFound("profile"))?;

        let grant = if profile.finalized {
            let approved = self
                .requests
                .has_approved(identity.account_id, RequestKind::Profile)
                .await?;
            if !approved {
                return Err(DomainError::permission_denied(
                    "profile is submitted; request edit approval first",
                ));
            }
            true
        } else {
            false
        };

        self.profiles
            .update_details(identity.account_id, name, email, hod_group)
            .await?;

        if grant {
            let consumed = self
                .requests
                .delete_approved(identity.account_id, RequestKind::Profile)
                .await?;
            info!(consumed, "profile saved under an edit grant");
        } else {
            info!("profile saved");
        }
        Ok(())
    }

    /// Office details are not part of the freeze workflow.
    #[instrument(skip_all, fields(account_id = identity.account_id))]
    pub async fn update_office(
        &self,
        identity: &Identity,
        office_name: &str,
        office_code: &str,
    ) -> Result<(), DomainError> {
        if office_name.trim().is_empty() || office_code.trim().is_empty() {
            return Err(DomainError::validation(
                "office_name",
                "office name and code are required",
            ));
        }
        self.profiles
            .update_office(identity.account_id, office_name, office_code)
            .await?;
        Ok(())
    }
}
