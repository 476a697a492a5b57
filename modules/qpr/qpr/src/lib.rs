//! QPR Module Implementation
//!
//! Quarterly-progress-report entry and approval workflow for a three-tier
//! office hierarchy (user, HOD, admin). The public models live in `qpr-sdk`
//! and are re-exported here.

pub use qpr_sdk::{
    EmployeeDirectory, EmployeeGroup, EmployeeRow, GroupStats, HodDashboard, HodPersonRow,
    PendingRequestView, ProfileView, ReportView, RequestKind, RequestStatus, Role,
};

pub mod api;
pub mod config;
pub mod domain;
pub mod infra;
