//! Behavior definitions: reusable state-machine schemas.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::status::{Status, StatusTransition};

/// Presentation rule for one field while an instance sits in one status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDescriptorLink {
    pub field_id: Uuid,
    pub visible: bool,
    pub read_only: bool,
    pub required_for_status: bool,
}

/// Ties one section definition into one status, with per-field rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusSectionLink {
    pub status_id: String,
    pub section_id: Uuid,
    pub field_links: Vec<FieldDescriptorLink>,
}

impl StatusSectionLink {
    pub fn new(status_id: impl Into<String>, section_id: Uuid) -> Self {
        Self {
            status_id: status_id.into(),
            section_id,
            field_links: Vec::new(),
        }
    }

    pub fn with_field_links(mut self, field_links: Vec<FieldDescriptorLink>) -> Self {
        self.field_links = field_links;
        self
    }
}

/// A named, reusable state machine attached to a top-level definition:
/// the status set, the legal transitions, and the per-status section links.
///
/// Once created in the store, a behavior definition is never reshaped by the
/// provisioning run; schema growth goes through section definitions instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BehaviorDefinition {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub id: Option<Uuid>,
    pub name: String,
    pub initial_status_id: String,
    pub statuses: Vec<Status>,
    pub transitions: Vec<StatusTransition>,
    pub status_section_links: Vec<StatusSectionLink>,
}

impl BehaviorDefinition {
    /// Transitions leaving `status_id`.
    pub fn transitions_from(&self, status_id: &str) -> Vec<&StatusTransition> {
        self.transitions
            .iter()
            .filter(|t| t.from_status_id == status_id)
            .collect()
    }

    /// Section links scoped to `status_id`, in declaration order.
    pub fn links_for_status(&self, status_id: &str) -> Vec<&StatusSectionLink> {
        self.status_section_links
            .iter()
            .filter(|l| l.status_id == status_id)
            .collect()
    }
}
