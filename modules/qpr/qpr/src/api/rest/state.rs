use std::sync::Arc;

use crate::api::rest::auth::Sessions;
use crate::config::QprConfig;
use crate::domain::repos::{ProfilesRepository, ReportsRepository, RequestsRepository};
use crate::domain::service::{
    AccountsService, DashboardsService, ProfilesService, ReportsService, RequestsService,
};

/// Shared handler state: the services plus the session map.
#[derive(Clone)]
pub struct AppState {
    pub accounts: Arc<AccountsService>,
    pub profiles: Arc<ProfilesService>,
    pub reports: Arc<ReportsService>,
    pub requests: Arc<RequestsService>,
    pub dashboards: Arc<DashboardsService>,
    pub sessions: Arc<Sessions>,
}

impl AppState {
    pub fn new(
        profiles_repo: Arc<dyn ProfilesRepository>,
        reports_repo: Arc<dyn ReportsRepository>,
        requests_repo: Arc<dyn RequestsRepository>,
        config: QprConfig,
    ) -> Self {
        Self {
            accounts: Arc::new(AccountsService::new(profiles_repo.clone(), config.clone())),
            profiles: Arc::new(ProfilesService::new(
                profiles_repo.clone(),
                requests_repo.clone(),
            )),
            reports: Arc::new(ReportsService::new(
                reports_repo.clone(),
                requests_repo.clone(),
                config,
            )),
            requests: Arc::new(RequestsService::new(
                profiles_repo.clone(),
                reports_repo.clone(),
                requests_repo.clone(),
            )),
            dashboards: Arc::new(DashboardsService::new(
                profiles_repo,
                reports_repo,
                requests_repo,
            )),
            sessions: Arc::new(Sessions::new()),
        }
    }
}
