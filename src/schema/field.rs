//! Field descriptors: the typed fields a section definition groups together.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Value type carried by a field descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldType {
    /// Free-form text.
    Text,
    /// Identifier of another provisioned object-model instance.
    InstanceReference,
}

/// One typed field inside a section definition.
///
/// Descriptors built locally carry no identifier; the store assigns one when
/// the owning section definition is created or updated. A descriptor is never
/// deleted or renamed once it reached the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDescriptor {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub id: Option<Uuid>,
    pub name: String,
    pub tooltip: String,
    pub field_type: FieldType,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>, tooltip: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            id: None,
            name: name.into(),
            tooltip: tooltip.into(),
            field_type,
        }
    }

    /// Build a free-text field descriptor.
    pub fn text(name: impl Into<String>, tooltip: impl Into<String>) -> Self {
        Self::new(name, tooltip, FieldType::Text)
    }

    /// Build a reference field descriptor pointing at another instance.
    pub fn instance_reference(name: impl Into<String>, tooltip: impl Into<String>) -> Self {
        Self::new(name, tooltip, FieldType::InstanceReference)
    }
}
