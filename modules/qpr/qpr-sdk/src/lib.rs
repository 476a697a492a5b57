//! Public models for the QPR module.
//!
//! Transport-agnostic data structures that define the contract between the
//! QPR module and its consumers: roles, report payloads, edit-request kinds
//! and the dashboard row types.

pub mod models;

pub use models::{
    EmployeeDirectory, EmployeeGroup, EmployeeRow, GroupStats, HodDashboard, HodPersonRow,
    PendingRequestView, ProfileView, ReportView, RequestKind, RequestStatus, Role,
};
