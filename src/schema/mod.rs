//! Typed object-model entities the provisioning run reconciles.
//!
//! All durable state lives in the remote store; these types are transient
//! in-memory representations, addressed remotely by their unique names and
//! by the identifiers the store assigns on create.

pub mod behavior;
pub mod definition;
pub mod field;
pub mod section;
pub mod status;

pub use behavior::{BehaviorDefinition, FieldDescriptorLink, StatusSectionLink};
pub use definition::ObjectDefinition;
pub use field::{FieldDescriptor, FieldType};
pub use section::SectionDefinition;
pub use status::{Status, StatusTransition};
