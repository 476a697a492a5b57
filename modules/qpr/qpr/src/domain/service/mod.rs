//! Domain services. Each service owns the business rules of one surface and
//! talks to storage through the repository traits only.

pub mod accounts;
pub mod dashboards;
pub mod profiles;
pub mod reports;
pub mod requests;

pub use accounts::AccountsService;
pub use dashboards::DashboardsService;
pub use profiles::ProfilesService;
pub use reports::ReportsService;
pub use requests::RequestsService;

use qpr_sdk::Role;

use crate::domain::error::DomainError;
use crate::domain::model::Identity;

pub(crate) fn require_admin(identity: &Identity) -> Result<(), DomainError> {
    if identity.role == Role::Admin {
        Ok(())
    } else {
        Err(DomainError::permission_denied("admin only"))
    }
}

pub(crate) fn require_hod(identity: &Identity) -> Result<(), DomainError> {
    if identity.role == Role::Hod {
        Ok(())
    } else {
        Err(DomainError::permission_denied("HOD only"))
    }
}

/// In-memory repository fakes backing the service and handler tests.
#[cfg(test)]
pub(crate) mod test_support {
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicI64, Ordering};

    use async_trait::async_trait;
    use chrono::Utc;
    use qpr_sdk::{RequestKind, RequestStatus, Role};

    use crate::domain::model::{
        EditRequest, HodRename, NewAccountRecord, Profile, Report, ReportHeader, ReportSummary,
    };
    use crate::domain::repos::{ProfilesRepository, ReportsRepository, RequestsRepository};
    use crate::domain::sections::SectionSet;
    use crate::domain::workflow;

    fn norm(s: &str) -> String {
        s.trim().to_lowercase()
    }

    #[derive(Default)]
    pub struct InMemoryProfiles {
        rows: Mutex<Vec<Profile>>,
        hashes: Mutex<HashMap<i64, String>>,
        next_id: AtomicI64,
    }

    impl InMemoryProfiles {
        pub fn seed(&self, new: NewAccountRecord) -> Profile {
            let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
            let now = Utc::now();
            let profile = Profile {
                id,
                account_id: id,
                employee_code: new.employee_code,
                role: new.role,
                hod_group: new.hod_group,
                name: new.name,
                email: new.email,
                office_name: None,
                office_code: None,
                finalized: new.finalized,
                created_at: now,
                updated_at: now,
            };
            self.hashes
                .lock()
                .unwrap()
                .insert(id, new.password_hash);
            self.rows.lock().unwrap().push(profile.clone());
            profile
        }
    }

    #[async_trait]
    impl ProfilesRepository for InMemoryProfiles {
        async fn create_account(&self, new: NewAccountRecord) -> anyhow::Result<Profile> {
            if self
                .rows
                .lock()
                .unwrap()
                .iter()
                .any(|p| p.employee_code == new.employee_code)
            {
                anyhow::bail!("unique constraint violated: employee_code");
            }
            Ok(self.seed(new))
        }

        async fn find_by_employee_code(
            &self,
            employee_code: &str,
        ) -> anyhow::Result<Option<Profile>> {
            Ok(self
                .rows
                .lock()
                .unwrap()
                .iter()
                .find(|p| p.employee_code == employee_code)
                .cloned())
        }

        async fn find_by_account(&self, account_id: i64) -> anyhow::Result<Option<Profile>> {
            Ok(self
                .rows
                .lock()
                .unwrap()
                .iter()
                .find(|p| p.account_id == account_id)
                .cloned())
        }

        async fn password_hash(&self, account_id: i64) -> anyhow::Result<Option<String>> {
            Ok(self.hashes.lock().unwrap().get(&account_id).cloned())
        }

        async fn set_password_hash(&self, account_id: i64, hash: &str) -> anyhow::Result<()> {
            self.hashes
                .lock()
                .unwrap()
                .insert(account_id, hash.to_owned());
            Ok(())
        }

        async fn list_by_role(&self, role: Role) -> anyhow::Result<Vec<Profile>> {
            Ok(self
                .rows
                .lock()
                .unwrap()
                .iter()
                .filter(|p| p.role == role)
                .cloned()
                .collect())
        }

        async fn update_details(
            &self,
            account_id: i64,
            name: &str,
            email: &str,
            hod_group: &str,
        ) -> anyhow::Result<Profile> {
            let mut rows = self.rows.lock().unwrap();
            let profile = rows
                .iter_mut()
                .find(|p| p.account_id == account_id)
                .ok_or_else(|| anyhow::anyhow!("profile missing"))?;
            profile.name = Some(name.to_owned());
            profile.email = Some(email.to_owned());
            profile.hod_group = Some(hod_group.to_owned());
            profile.finalized = true;
            profile.updated_at = Utc::now();
            Ok(profile.clone())
        }

        async fn update_office(
            &self,
            account_id: i64,
            office_name: &str,
            office_code: &str,
        ) -> anyhow::Result<Profile> {
            let mut rows = self.rows.lock().unwrap();
            let profile = rows
                .iter_mut()
                .find(|p| p.account_id == account_id)
                .ok_or_else(|| anyhow::anyhow!("profile missing"))?;
            profile.office_name = Some(office_name.to_owned());
            profile.office_code = Some(office_code.to_owned());
            profile.updated_at = Utc::now();
            Ok(profile.clone())
        }

        async fn rename_hod(
            &self,
            hod_account_id: i64,
            rename: &HodRename,
        ) -> anyhow::Result<u64> {
            let mut rows = self.rows.lock().unwrap();
            let old_norm = norm(&rename.old_name);
            let mut cascaded = 0;
            for p in rows.iter_mut() {
                if p.account_id == hod_account_id {
                    p.name = Some(rename.new_name.clone());
                    p.hod_group = Some(rename.new_name.clone());
                    p.employee_code = rename.new_employee_code.clone();
                } else if p.role == Role::User
                    && p.hod_group.as_deref().map(norm) == Some(old_norm.clone())
                {
                    p.hod_group = Some(rename.new_name.clone());
                    cascaded += 1;
                }
            }
            Ok(cascaded)
        }
    }

    #[derive(Default)]
    pub struct InMemoryReports {
        rows: Mutex<Vec<Report>>,
        next_id: AtomicI64,
    }

    #[async_trait]
    impl ReportsRepository for InMemoryReports {
        async fn list_by_owner(&self, account_id: i64) -> anyhow::Result<Vec<Report>> {
            let mut out: Vec<Report> = self
                .rows
                .lock()
                .unwrap()
                .iter()
                .filter(|r| r.account_id == account_id)
                .cloned()
                .collect();
            out.sort_by_key(|r| std::cmp::Reverse(r.id));
            Ok(out)
        }

        async fn find_owned(&self, id: i64, account_id: i64) -> anyhow::Result<Option<Report>> {
            Ok(self
                .rows
                .lock()
                .unwrap()
                .iter()
                .find(|r| r.id == id && r.account_id == account_id)
                .cloned())
        }

        async fn create(
            &self,
            account_id: i64,
            header: ReportHeader,
            sections: SectionSet,
        ) -> anyhow::Result<Report> {
            let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
            let now = Utc::now();
            let report = Report {
                id,
                account_id,
                submitted: workflow::is_submitted(&header.status),
                header,
                sections,
                created_at: now,
                updated_at: now,
            };
            self.rows.lock().unwrap().push(report.clone());
            Ok(report)
        }

        async fn update(
            &self,
            id: i64,
            header: ReportHeader,
            sections: SectionSet,
        ) -> anyhow::Result<Report> {
            let mut rows = self.rows.lock().unwrap();
            let report = rows
                .iter_mut()
                .find(|r| r.id == id)
                .ok_or_else(|| anyhow::anyhow!("report missing"))?;
            report.submitted = workflow::is_submitted(&header.status);
            report.header = header;
            report.sections = sections;
            report.updated_at = Utc::now();
            Ok(report.clone())
        }

        async fn delete_owned(&self, id: i64, account_id: i64) -> anyhow::Result<u64> {
            let mut rows = self.rows.lock().unwrap();
            let before = rows.len();
            rows.retain(|r| !(r.id == id && r.account_id == account_id));
            Ok((before - rows.len()) as u64)
        }

        async fn summaries(&self) -> anyhow::Result<Vec<ReportSummary>> {
            Ok(self
                .rows
                .lock()
                .unwrap()
                .iter()
                .map(|r| ReportSummary {
                    id: r.id,
                    account_id: r.account_id,
                    office_name: r.header.office_name.clone(),
                    office_code: r.header.office_code.clone(),
                    quarter: r.header.quarter.clone(),
                    year: r.header.year.clone(),
                    status: r.header.status.clone(),
                    submitted: r.submitted,
                })
                .collect())
        }
    }

    #[derive(Default)]
    pub struct InMemoryRequests {
        rows: Mutex<Vec<EditRequest>>,
        next_id: AtomicI64,
    }

    #[async_trait]
    impl RequestsRepository for InMemoryRequests {
        async fn create(
            &self,
            requester_id: i64,
            recipient_id: i64,
            kind: RequestKind,
            reason: &str,
        ) -> anyhow::Result<EditRequest> {
            let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
            let now = Utc::now();
            let request = EditRequest {
                id,
                requester_id,
                recipient_id,
                kind,
                reason: reason.to_owned(),
                status: RequestStatus::Pending,
                created_at: now,
                updated_at: now,
            };
            self.rows.lock().unwrap().push(request.clone());
            Ok(request)
        }

        async fn find(&self, id: i64) -> anyhow::Result<Option<EditRequest>> {
            Ok(self
                .rows
                .lock()
                .unwrap()
                .iter()
                .find(|r| r.id == id)
                .cloned())
        }

        async fn set_status(&self, id: i64, status: RequestStatus) -> anyhow::Result<()> {
            let mut rows = self.rows.lock().unwrap();
            let request = rows
                .iter_mut()
                .find(|r| r.id == id)
                .ok_or_else(|| anyhow::anyhow!("request missing"))?;
            request.status = status;
            request.updated_at = Utc::now();
            Ok(())
        }

        async fn pending_for_recipient(
            &self,
            recipient_id: i64,
        ) -> anyhow::Result<Vec<EditRequest>> {
            let mut out: Vec<EditRequest> = self
                .rows
                .lock()
                .unwrap()
                .iter()
                .filter(|r| r.recipient_id == recipient_id && r.status == RequestStatus::Pending)
                .cloned()
                .collect();
            out.sort_by_key(|r| std::cmp::Reverse(r.id));
            Ok(out)
        }

        async fn has_approved(
            &self,
            requester_id: i64,
            kind: RequestKind,
        ) -> anyhow::Result<bool> {
            Ok(self.rows.lock().unwrap().iter().any(|r| {
                r.requester_id == requester_id
                    && r.status == RequestStatus::Approved
                    && r.kind.covers(kind)
            }))
        }

        async fn has_pending(&self, requester_id: i64, kind: RequestKind) -> anyhow::Result<bool> {
            Ok(self.rows.lock().unwrap().iter().any(|r| {
                r.requester_id == requester_id
                    && r.status == RequestStatus::Pending
                    && r.kind.covers(kind)
            }))
        }

        async fn delete_approved(
            &self,
            requester_id: i64,
            kind: RequestKind,
        ) -> anyhow::Result<u64> {
            let mut rows = self.rows.lock().unwrap();
            let before = rows.len();
            rows.retain(|r| {
                !(r.requester_id == requester_id
                    && r.status == RequestStatus::Approved
                    && r.kind.covers(kind))
            });
            Ok((before - rows.len()) as u64)
        }

        async fn pending_requester_ids(&self, kind: RequestKind) -> anyhow::Result<Vec<i64>> {
            let mut ids: Vec<i64> = self
                .rows
                .lock()
                .unwrap()
                .iter()
                .filter(|r| r.status == RequestStatus::Pending && r.kind.covers(kind))
                .map(|r| r.requester_id)
                .collect();
            ids.sort_unstable();
            ids.dedup();
            Ok(ids)
        }
    }
}
