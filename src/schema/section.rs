//! Section definitions: named, reusable groups of typed fields.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::field::FieldDescriptor;

/// A named group of field descriptors, looked up in the store by exact name.
///
/// Field names are unique within a section. Reconciliation only ever adds
/// descriptors; an existing field is never removed or overwritten.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionDefinition {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub id: Option<Uuid>,
    pub name: String,
    #[serde(default)]
    pub fields: Vec<FieldDescriptor>,
}

impl SectionDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            fields: Vec::new(),
        }
    }

    pub fn with_fields(mut self, fields: Vec<FieldDescriptor>) -> Self {
        for field in fields {
            self.add_or_replace_field(field);
        }
        self
    }

    /// Attach a descriptor, replacing any existing one with the same name.
    pub fn add_or_replace_field(&mut self, field: FieldDescriptor) {
        match self.fields.iter_mut().find(|f| f.name == field.name) {
            Some(existing) => *existing = field,
            None => self.fields.push(field),
        }
    }

    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.field(name).is_some()
    }

    /// Names of every attached descriptor, in attachment order.
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }
}
