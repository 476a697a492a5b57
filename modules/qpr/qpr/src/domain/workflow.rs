//! Submission and approval workflow rules.
//!
//! A report freezes when its status reaches `Submitted`; saving it again with
//! `Draft` re-opens it. Frozen entities may only be saved under an approved
//! edit grant, and a successful save consumes the grant. Edit requests
//! resolve exactly once.

use qpr_sdk::RequestStatus;

/// Status value that freezes a report. Any other status is treated as an
/// editable draft.
pub const STATUS_SUBMITTED: &str = "Submitted";

/// Default status for new records.
pub const STATUS_DRAFT: &str = "Draft";

/// Derived freeze flag; must stay equal to `status == "Submitted"`.
#[must_use]
pub fn is_submitted(status: &str) -> bool {
    status == STATUS_SUBMITTED
}

/// Whether a frozen entity may be saved: either it is not frozen, or the
/// owner holds an approved grant.
#[must_use]
pub fn can_edit(frozen: bool, has_grant: bool) -> bool {
    !frozen || has_grant
}

/// Resolve a pending request. Returns `None` when the request is no longer
/// pending; resolution is terminal.
#[must_use]
pub fn resolve(current: RequestStatus, approve: bool) -> Option<RequestStatus> {
    match current {
        RequestStatus::Pending => Some(if approve {
            RequestStatus::Approved
        } else {
            RequestStatus::Rejected
        }),
        RequestStatus::Approved | RequestStatus::Rejected => None,
    }
}
