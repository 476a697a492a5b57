//! Completion aggregation for the admin and HOD dashboards.
//!
//! Profiles are grouped by the denormalized HOD-group label using
//! case-insensitive matching, in three partitions: groups led by an actual
//! HOD account, orphaned group labels with no HOD behind them, and
//! null-group users standing alone. Every `user`-role profile lands in
//! exactly one group.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;

use qpr_sdk::{
    EmployeeDirectory, EmployeeGroup, EmployeeRow, GroupStats, HodDashboard, HodPersonRow,
    PendingRequestView, RequestKind, Role,
};
use tracing::instrument;

use crate::domain::error::DomainError;
use crate::domain::model::{Identity, Profile, ReportSummary};
use crate::domain::repos::{ProfilesRepository, ReportsRepository, RequestsRepository};
use crate::domain::service::{require_admin, require_hod};

/// Per-user filters on the admin employee list. Empty strings match
/// everything.
#[derive(Debug, Clone, Default)]
pub struct EmployeeFilter {
    pub employee_code: String,
    pub name: String,
    pub quarter: String,
    pub year: String,
}

/// Which partition a group came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GroupKind {
    Led,
    Orphan,
    Singleton,
}

/// One resolved HOD group over borrowed profiles.
struct ProfileGroup<'a> {
    label: String,
    kind: GroupKind,
    leader: Option<&'a Profile>,
    members: Vec<&'a Profile>,
}

fn norm(s: &str) -> String {
    s.trim().to_lowercase()
}

fn group_label(p: &Profile) -> Option<String> {
    p.hod_group.clone().filter(|g| !g.trim().is_empty())
}

/// Partition users into HOD groups. Total-covering: every user lands in
/// exactly one group. Led groups come first (HOD listing order), then
/// orphaned labels sorted, then singletons sorted by display name.
fn partition_groups<'a>(hods: &'a [Profile], users: &'a [Profile]) -> Vec<ProfileGroup<'a>> {
    let mut led: Vec<ProfileGroup<'a>> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    let mut sorted_hods: Vec<&Profile> = hods.iter().collect();
    sorted_hods.sort_by(|a, b| a.display_name().cmp(b.display_name()));

    for hod in sorted_hods {
        let label = group_label(hod)
            .or_else(|| hod.name.clone().filter(|n| !n.is_empty()))
            .unwrap_or_else(|| hod.employee_code.clone());
        let key = norm(&label);
        // Two HOD accounts sharing a group label collapse into one group.
        if !index.contains_key(&key) {
            index.insert(key, led.len());
            led.push(ProfileGroup {
                label,
                kind: GroupKind::Led,
                leader: Some(hod),
                members: Vec::new(),
            });
        }
    }

    let mut orphans: BTreeMap<String, ProfileGroup<'a>> = BTreeMap::new();
    let mut singletons: Vec<ProfileGroup<'a>> = Vec::new();

    for user in users {
        match group_label(user) {
            Some(label) => {
                let key = norm(&label);
                if let Some(&i) = index.get(&key) {
                    led[i].members.push(user);
                } else {
                    orphans
                        .entry(key)
                        .or_insert_with(|| ProfileGroup {
                            label,
                            kind: GroupKind::Orphan,
                            leader: None,
                            members: Vec::new(),
                        })
                        .members
                        .push(user);
                }
            }
            None => singletons.push(ProfileGroup {
                label: user.display_name().to_owned(),
                kind: GroupKind::Singleton,
                leader: Some(user),
                members: vec![user],
            }),
        }
    }

    singletons.sort_by(|a, b| a.label.cmp(&b.label));

    led.into_iter()
        .chain(orphans.into_values())
        .chain(singletons)
        .collect()
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn completion_pct(submitted: u32, members: u32) -> u32 {
    if members == 0 {
        0
    } else {
        (f64::from(submitted) * 100.0 / f64::from(members)).round() as u32
    }
}

/// Latest (highest-id) report per account.
fn latest_by_account(summaries: &[ReportSummary]) -> HashMap<i64, &ReportSummary> {
    let mut latest: HashMap<i64, &ReportSummary> = HashMap::new();
    for s in summaries {
        latest
            .entry(s.account_id)
            .and_modify(|cur| {
                if s.id > cur.id {
                    *cur = s;
                }
            })
            .or_insert(s);
    }
    latest
}

fn submitted_accounts(summaries: &[ReportSummary]) -> HashSet<i64> {
    summaries
        .iter()
        .filter(|s| s.submitted)
        .map(|s| s.account_id)
        .collect()
}

pub struct DashboardsService {
    profiles: Arc<dyn ProfilesRepository>,
    reports: Arc<dyn ReportsRepository>,
    requests: Arc<dyn RequestsRepository>,
}

impl DashboardsService {
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

    /// Admin overview: per-group completion stats plus pending edit
    /// requests addressed to the caller (from `user`-role requesters).
    #[instrument(skip_all, fields(account_id = identity.account_id))]
    pub async fn admin_overview(
        &self,
        identity: &Identity,
    ) -> Result<(Vec<GroupStats>, Vec<PendingRequestView>), DomainError> {
        require_admin(identity)?;

        let users = self.profiles.list_by_role(Role::User).await?;
        let hods = self.profiles.list_by_role(Role::Hod).await?;
        let summaries = self.reports.summaries().await?;
        let submitted = submitted_accounts(&summaries);

        let stats = partition_groups(&hods, &users)
            .into_iter()
            .map(|g| {
                let members = g.members.len() as u32;
                let finalized = g.members.iter().filter(|p| p.finalized).count() as u32;
                let complete = g
                    .members
                    .iter()
                    .filter(|p| submitted.contains(&p.account_id))
                    .count() as u32;
                GroupStats {
                    group_name: g.label.to_uppercase(),
                    employee_code: match g.kind {
                        GroupKind::Led => g.leader.map(|l| l.employee_code.clone()),
                        GroupKind::Orphan | GroupKind::Singleton => None,
                    },
                    members,
                    profiles_finalized: finalized,
                    reports_submitted: complete,
                    completion_pct: completion_pct(complete, members),
                }
            })
            .collect();

        let by_account: HashMap<i64, &Profile> =
            users.iter().map(|p| (p.account_id, p)).collect();
        let pending = self
            .requests
            .pending_for_recipient(identity.account_id)
            .await?
            .into_iter()
            .filter_map(|r| {
                // Requests filed by HODs or other admins are handled out of
                // band; the dashboard lists user-filed ones only.
                by_account.get(&r.requester_id).map(|p| PendingRequestView {
                    id: r.id,
                    requester_code: p.employee_code.clone(),
                    requester_name: p.display_name().to_owned(),
                    kind: r.kind,
                    reason: r.reason,
                    created_at: r.created_at,
                })
            })
            .collect();

        Ok((stats, pending))
    }

    /// Admin employee list: grouped rows with per-user filtering. Groups
    /// emptied by the filters are omitted.
    #[instrument(skip_all, fields(account_id = identity.account_id))]
    pub async fn employee_directory(
        &self,
        identity: &Identity,
        filter: &EmployeeFilter,
    ) -> Result<EmployeeDirectory, DomainError> {
        require_admin(identity)?;

        let users = self.profiles.list_by_role(Role::User).await?;
        let hods = self.profiles.list_by_role(Role::Hod).await?;
        let summaries = self.reports.summaries().await?;
        let latest = latest_by_account(&summaries);

        let groups = partition_groups(&hods, &users)
            .into_iter()
            .filter_map(|g| {
                let rows: Vec<EmployeeRow> = g
                    .members
                    .iter()
                    .filter(|p| matches_filter(p, latest.get(&p.account_id).copied(), filter))
                    .map(|p| employee_row(p, latest.get(&p.account_id).copied()))
                    .collect();
                if rows.is_empty() {
                    return None;
                }
                let leader = g.leader;
                Some(EmployeeGroup {
                    group_name: g.label,
                    hod_email: leader
                        .and_then(|l| l.email.clone())
                        .unwrap_or_else(|| "-".to_owned()),
                    hod_employee_code: leader
                        .map(|l| l.employee_code.clone())
                        .unwrap_or_else(|| "-".to_owned()),
                    user_count: rows.len() as u32,
                    users: rows,
                })
            })
            .collect();

        let mut quarters: Vec<String> = summaries
            .iter()
            .map(|s| s.quarter.clone())
            .filter(|q| !q.is_empty())
            .collect();
        quarters.sort();
        quarters.dedup();
        let mut years: Vec<String> = summaries
            .iter()
            .map(|s| s.year.clone())
            .filter(|y| !y.is_empty())
            .collect();
        years.sort();
        years.dedup();

        Ok(EmployeeDirectory {
            groups,
            quarters,
            years,
        })
    }

    /// HOD dashboard: completion totals for the viewer's own group.
    #[instrument(skip_all, fields(account_id = identity.account_id))]
    pub async fn hod_dashboard(&self, identity: &Identity) -> Result<HodDashboard, DomainError> {
        require_hod(identity)?;

        let (profile, members) = self.own_group(identity).await?;
        let summaries = self.reports.summaries().await?;
        let submitted = submitted_accounts(&summaries);

        let total = members.len() as u32;
        let complete = members
            .iter()
            .filter(|p| submitted.contains(&p.account_id))
            .count() as u32;
        let finalized = members.iter().filter(|p| p.finalized).count() as u32;

        Ok(HodDashboard {
            group_name: group_label(&profile).unwrap_or_else(|| profile.display_name().to_owned()),
            total_users: total,
            reports_submitted: complete,
            reports_pending: total - complete,
            profiles_finalized: finalized,
        })
    }

    /// HOD people list: one row per group member with completion flags.
    #[instrument(skip_all, fields(account_id = identity.account_id))]
    pub async fn hod_people(&self, identity: &Identity) -> Result<Vec<HodPersonRow>, DomainError> {
        require_hod(identity)?;

        let (_, members) = self.own_group(identity).await?;
        let summaries = self.reports.summaries().await?;
        let submitted = submitted_accounts(&summaries);
        let latest = latest_by_account(&summaries);
        let pending: HashSet<i64> = self
            .requests
            .pending_requester_ids(RequestKind::Qpr)
            .await?
            .into_iter()
            .collect();

        Ok(members
            .iter()
            .map(|p| {
                let last = latest.get(&p.account_id).copied();
                HodPersonRow {
                    employee_code: p.employee_code.clone(),
                    name: p
                        .name
                        .clone()
                        .filter(|n| !n.is_empty())
                        .unwrap_or_else(|| "Not Set".to_owned()),
                    email: p.email.clone().unwrap_or_default(),
                    office_code: last.map(|s| s.office_code.clone()).unwrap_or_default(),
                    office_name: last.map(|s| s.office_name.clone()).unwrap_or_default(),
                    profile_complete: p.finalized,
                    report_complete: submitted.contains(&p.account_id),
                    has_pending_edit_request: pending.contains(&p.account_id),
                }
            })
            .collect())
    }

    async fn own_group(&self, identity: &Identity) -> Result<(Profile, Vec<Profile>), DomainError> {
        let profile = self
            .profiles
            .find_by_account(identity.account_id)
            .await?
            .ok_or(DomainError::NotFound("profile"))?;

        let members = match group_label(&profile) {
            Some(label) => {
                let key = norm(&label);
                self.profiles
                    .list_by_role(Role::User)
                    .await?
                    .into_iter()
                    .filter(|p| group_label(p).map(|g| norm(&g)) == Some(key.clone()))
                    .collect()
            }
            None => Vec::new(),
        };
        Ok((profile, members))
    }
}

fn matches_filter(
    profile: &Profile,
    latest: Option<&ReportSummary>,
    filter: &EmployeeFilter,
) -> bool {
    if !filter.employee_code.is_empty()
        && !profile
            .employee_code
            .to_lowercase()
            .contains(&filter.employee_code.to_lowercase())
    {
        return false;
    }
    if !filter.name.is_empty()
        && !profile
            .display_name()
            .to_lowercase()
            .contains(&filter.name.to_lowercase())
    {
        return false;
    }
    if !filter.quarter.is_empty() {
        let Some(last) = latest else { return false };
        if !last
            .quarter
            .to_lowercase()
            .contains(&filter.quarter.to_lowercase())
        {
            return false;
        }
    }
    if !filter.year.is_empty() {
        let Some(last) = latest else { return false };
        if last.year != filter.year {
            return false;
        }
    }
    true
}

fn employee_row(profile: &Profile, latest: Option<&ReportSummary>) -> EmployeeRow {
    let not_set = || "Not Set".to_owned();
    EmployeeRow {
        employee_code: profile.employee_code.clone(),
        name: profile
            .name
            .clone()
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| profile.employee_code.clone()),
        email: profile.email.clone().unwrap_or_default(),
        office_name: profile
            .office_name
            .clone()
            .filter(|o| !o.is_empty())
            .or_else(|| latest.map(|s| s.office_name.clone()))
            .unwrap_or_else(not_set),
        office_code: profile
            .office_code
            .clone()
            .filter(|o| !o.is_empty())
            .or_else(|| latest.map(|s| s.office_code.clone()))
            .unwrap_or_else(not_set),
        quarter: latest.map(|s| s.quarter.clone()).unwrap_or_else(not_set),
        year: latest.map(|s| s.year.clone()).unwrap_or_else(not_set),
        report_status: latest
            .map(|s| s.status.clone())
            .unwrap_or_else(|| "Not Submitted".to_owned()),
    }
}
