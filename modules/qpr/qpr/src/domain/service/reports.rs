//! QPR record CRUD with the freeze/approval workflow.

use std::sync::Arc;

use qpr_sdk::{ReportView, RequestKind};
use serde_json::{Map, Value};
use tracing::{info, instrument};

use crate::config::QprConfig;
use crate::domain::error::DomainError;
use crate::domain::model::{Identity, Report, ReportHeader};
use crate::domain::repos::{ReportsRepository, RequestsRepository};
use crate::domain::sections::{self, SectionSet};
use crate::domain::workflow;

/// An incoming create-or-update payload in its flat external shape.
/// An `id` makes it an update of an owned record.
#[derive(Debug, Clone, Default)]
pub struct SaveReport {
    pub id: Option<i64>,
    pub office_name: String,
    pub office_code: String,
    pub region: String,
    pub quarter: String,
    pub year: Option<String>,
    pub status: String,
    pub phone: String,
    pub email: String,
    pub details: Map<String, Value>,
}

pub struct ReportsService {
    reports: Arc<dyn ReportsRepository>,
    requests: Arc<dyn RequestsRepository>,
    config: QprConfig,
}

impl ReportsService {
    pub fn new(
        reports: Arc<dyn ReportsRepository>,
        requests: Arc<dyn RequestsRepository>,
        config: QprConfig,
    ) -> Self {
        Self {
            reports,
            requests,
            config,
        }
    }

    #[instrument(skip_all, fields(account_id = identity.account_id))]
    pub async fn list(&self, identity: &Identity) -> Result<Vec<ReportView>, DomainError> {
        let records = self.reports.list_by_owner(identity.account_id).await?;
        // One grant per owner covers all of their frozen records, so the
        // lookup happens once, not per record.
        let grant = self
            .requests
            .has_approved(identity.account_id, RequestKind::Qpr)
            .await?;
        Ok(records.into_iter().map(|r| to_view(&r, grant)).collect())
    }

    #[instrument(skip_all, fields(account_id = identity.account_id, record_id = id))]
    pub async fn get(&self, identity: &Identity, id: i64) -> Result<ReportView, DomainError> {
        let record = self
            .reports
            .find_owned(id, identity.account_id)
            .await?
            .ok_or(DomainError::NotFound("record"))?;
        let grant = self
            .requests
            .has_approved(identity.account_id, RequestKind::Qpr)
            .await?;
        Ok(to_view(&record, grant))
    }

    /// Create or update a record. Updating a submitted record requires an
    /// approved `qpr` grant; the successful save consumes it.
    #[instrument(skip_all, fields(account_id = identity.account_id, record_id = input.id))]
    pub async fn save(&self, identity: &Identity, input: SaveReport) -> Result<i64, DomainError> {
        match input.id {
            Some(id) => self.update_existing(identity, id, input).await,
            None => self.create_new(identity, input).await,
        }
    }

    async fn create_new(
        &self,
        identity: &Identity,
        input: SaveReport,
    ) -> Result<i64, DomainError> {
        let year = non_empty(input.year.clone())
            .unwrap_or_else(|| self.config.default_year.clone());
        let header = header_from(&input, year);

        let mut section_set = SectionSet::default();
        sections::apply_external(&mut section_set, &input.details);

        let record = self
            .reports
            .create(identity.account_id, header, section_set)
            .await?;
        info!(record_id = record.id, "created QPR record");
        Ok(record.id)
    }

    async fn update_existing(
        &self,
        identity: &Identity,
        id: i64,
        input: SaveReport,
    ) -> Result<i64, DomainError> {
        let existing = self
            .reports
            .find_owned(id, identity.account_id)
            .await?
            .ok_or(DomainError::NotFound("record"))?;

        let frozen = existing.submitted;
        if frozen {
            let grant = self
                .requests
                .has_approved(identity.account_id, RequestKind::Qpr)
                .await?;
            if !workflow::can_edit(frozen, grant) {
                return Err(DomainError::permission_denied(
                    "record is submitted; request edit approval first",
                ));
            }
        }

        let year = non_empty(input.year.clone()).unwrap_or_else(|| existing.header.year.clone());
        let header = header_from(&input, year);

        let mut section_set = existing.sections;
        sections::apply_external(&mut section_set, &input.details);

        self.reports.update(id, header, section_set).await?;

        if frozen {
            let consumed = self
                .requests
                .delete_approved(identity.account_id, RequestKind::Qpr)
                .await?;
            info!(record_id = id, consumed, "saved frozen QPR record under an edit grant");
        } else {
            info!(record_id = id, "saved QPR record");
        }
        Ok(id)
    }

    #[instrument(skip_all, fields(account_id = identity.account_id, record_id = id))]
    pub async fn delete(&self, identity: &Identity, id: i64) -> Result<(), DomainError> {
        let deleted = self.reports.delete_owned(id, identity.account_id).await?;
        if deleted == 0 {
            return Err(DomainError::NotFound("record"));
        }
        info!(record_id = id, "deleted QPR record");
        Ok(())
    }
}

fn header_from(input: &SaveReport, year: String) -> ReportHeader {
    let status = if input.status.is_empty() {
        workflow::STATUS_DRAFT.to_owned()
    } else {
        input.status.clone()
    };
    ReportHeader {
        office_name: input.office_name.clone(),
        office_code: input.office_code.clone(),
        region: input.region.clone(),
        quarter: input.quarter.clone(),
        year,
        status,
        phone: input.phone.clone(),
        email: input.email.clone(),
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn to_view(record: &Report, grant: bool) -> ReportView {
    let edit_approved = record.submitted && grant;
    ReportView {
        id: record.id,
        office_name: record.header.office_name.clone(),
        office_code: record.header.office_code.clone(),
        region: record.header.region.clone(),
        quarter: record.header.quarter.clone(),
        year: record.header.year.clone(),
        status: record.header.status.clone(),
        phone: record.header.phone.clone(),
        email: record.header.email.clone(),
        details: sections::to_external(&record.sections),
        can_edit: workflow::can_edit(record.submitted, edit_approved),
        edit_approved,
    }
}
