//! The fixed provisioning lifecycle: statuses and legal transitions.

use crate::schema::{Status, StatusTransition};

pub const STATUS_DRAFT: &str = "draft";
pub const STATUS_READY: &str = "ready";
pub const STATUS_IN_PROGRESS: &str = "in_progress";
pub const STATUS_ACTIVE: &str = "active";
pub const STATUS_DEACTIVATE: &str = "deactivate";
pub const STATUS_REPROVISION: &str = "reprovision";
pub const STATUS_COMPLETE: &str = "complete";

/// Every lifecycle status, in declaration order. Draft comes first and is
/// the initial status of the behavior definition.
pub fn lifecycle_statuses() -> Vec<Status> {
    vec![
        Status::new(STATUS_DRAFT, "Draft"),
        Status::new(STATUS_READY, "Ready"),
        Status::new(STATUS_IN_PROGRESS, "In Progress"),
        Status::new(STATUS_ACTIVE, "Active"),
        Status::new(STATUS_DEACTIVATE, "Deactivate"),
        Status::new(STATUS_REPROVISION, "Reprovision"),
        Status::new(STATUS_COMPLETE, "Complete"),
    ]
}

/// Every legal transition. The main path runs draft → ready → in_progress →
/// active; from active a provision is either torn down (deactivate →
/// complete) or rebuilt (reprovision → in_progress), and complete loops back
/// to ready so a finished provision can run again.
pub fn lifecycle_transitions() -> Vec<StatusTransition> {
    vec![
        StatusTransition::new(STATUS_DRAFT, STATUS_READY),
        StatusTransition::new(STATUS_READY, STATUS_IN_PROGRESS),
        StatusTransition::new(STATUS_IN_PROGRESS, STATUS_ACTIVE),
        StatusTransition::new(STATUS_ACTIVE, STATUS_DEACTIVATE),
        StatusTransition::new(STATUS_ACTIVE, STATUS_REPROVISION),
        StatusTransition::new(STATUS_DEACTIVATE, STATUS_COMPLETE),
        StatusTransition::new(STATUS_REPROVISION, STATUS_IN_PROGRESS),
        StatusTransition::new(STATUS_COMPLETE, STATUS_READY),
    ]
}
