//! Top-level object definitions: the schema root provisioned instances reference.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The root schema object, joining section definitions and one behavior
/// definition under a single name.
///
/// Unlike sections, the definition is reconciled by full replace: the section
/// links and behavior reference always end up exactly as desired, under the
/// identifier the store already knows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectDefinition {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub id: Option<Uuid>,
    pub name: String,
    /// Identifiers of the linked section definitions.
    pub section_links: Vec<Uuid>,
    /// Identifier of the behavior definition governing instances.
    pub behavior_definition_id: Uuid,
}

impl ObjectDefinition {
    pub fn new(name: impl Into<String>, section_links: Vec<Uuid>, behavior_definition_id: Uuid) -> Self {
        Self {
            id: None,
            name: name.into(),
            section_links,
            behavior_definition_id,
        }
    }
}
