//! Section-definition reconciliation: find, create, or additively merge.

use anyhow::Result;
use log::{debug, info};

use crate::api::{Filter, ObjectStore};
use crate::schema::{FieldDescriptor, SectionDefinition};

pub const PROVISION_INFO_SECTION: &str = "Provision Info";
pub const INSTANCE_LINKS_SECTION: &str = "Instance Links";

pub const FIELD_PROVISION_NAME: &str = "Provision Name";
pub const FIELD_EVENT_ID: &str = "Event ID";
pub const FIELD_SOURCE_ELEMENT: &str = "Source Element";
pub const FIELD_MONITORING: &str = "Monitoring";
pub const FIELD_PLAYOUT: &str = "Playout";
pub const FIELD_DISTRIBUTION: &str = "Distribution";

/// Desired fields of the "Provision Info" section: the free-text facts an
/// operator fills in while a provision is drafted.
pub fn provision_info_fields() -> Vec<FieldDescriptor> {
    vec![
        FieldDescriptor::text(
            FIELD_PROVISION_NAME,
            "A name describing the event or channel being provisioned.",
        ),
        FieldDescriptor::text(
            FIELD_EVENT_ID,
            "Unique ID linking the provision to an event or channel.",
        ),
        FieldDescriptor::text(
            FIELD_SOURCE_ELEMENT,
            "Identifier of the element configured to receive progress updates, if any.",
        ),
    ]
}

/// Desired fields of the "Instance Links" section: references to the
/// per-system instances provisioned alongside this one.
pub fn instance_links_fields() -> Vec<FieldDescriptor> {
    vec![
        FieldDescriptor::instance_reference(
            FIELD_MONITORING,
            "Link to the instance that holds the monitoring provision for this event.",
        ),
        FieldDescriptor::instance_reference(
            FIELD_PLAYOUT,
            "Link to the instance that holds the playout provision for this event.",
        ),
        FieldDescriptor::instance_reference(
            FIELD_DISTRIBUTION,
            "Link to the instance that holds the distribution provision for this event.",
        ),
    ]
}

/// Converge the section definition named `name` toward `desired_fields`.
///
/// Absent: created with all desired fields. Present: any desired field the
/// section lacks (case-sensitive name match) is attached and one update is
/// issued. Present and already complete: returned as-is without a write, so
/// a converged schema stays write-free on re-runs. Fields the section
/// carries beyond the desired ones are never touched.
pub async fn reconcile_section(
    store: &dyn ObjectStore,
    name: &str,
    desired_fields: Vec<FieldDescriptor>,
) -> Result<SectionDefinition> {
    let existing = store.query_sections(&Filter::name(name)).await?;

    let Some(mut section) = existing.into_iter().next() else {
        info!(
            "Section definition '{}' not found, creating it with {} field(s)",
            name,
            desired_fields.len()
        );
        let section = SectionDefinition::new(name).with_fields(desired_fields);
        return store.create_section(section).await;
    };

    let missing = missing_fields(&section, &desired_fields);
    if missing.is_empty() {
        debug!("Section definition '{}' already carries every desired field", name);
        return Ok(section);
    }

    info!(
        "Adding {} missing field(s) to section definition '{}'",
        missing.len(),
        name
    );
    for field in missing {
        section.add_or_replace_field(field);
    }
    store.update_section(section).await
}

/// Desired descriptors whose names the existing section does not carry.
fn missing_fields(existing: &SectionDefinition, desired: &[FieldDescriptor]) -> Vec<FieldDescriptor> {
    desired
        .iter()
        .filter(|field| !existing.has_field(&field.name))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_ignores_extra_remote_fields() {
        let existing = SectionDefinition::new("Provision Info").with_fields(vec![
            FieldDescriptor::text("Event ID", "An event ID."),
            FieldDescriptor::text("Legacy Notes", "Kept from an older schema."),
        ]);
        let desired = vec![
            FieldDescriptor::text("Provision Name", "A name."),
            FieldDescriptor::text("Event ID", "An event ID."),
        ];

        let missing = missing_fields(&existing, &desired);

        assert_eq!(missing.len(), 1);
        assert_eq!(missing[0].name, "Provision Name");
    }

    #[test]
    fn test_missing_fields_empty_when_superset() {
        let existing = SectionDefinition::new("Provision Info").with_fields(vec![
            FieldDescriptor::text("Provision Name", "A name."),
            FieldDescriptor::text("Event ID", "An event ID."),
            FieldDescriptor::text("Source Element", "An element."),
        ]);
        let desired = vec![FieldDescriptor::text("Provision Name", "A name.")];

        assert!(missing_fields(&existing, &desired).is_empty());
    }

    #[test]
    fn test_missing_fields_is_case_sensitive() {
        let existing = SectionDefinition::new("Provision Info")
            .with_fields(vec![FieldDescriptor::text("event id", "Lowercase variant.")]);
        let desired = vec![FieldDescriptor::text("Event ID", "An event ID.")];

        assert_eq!(missing_fields(&existing, &desired).len(), 1);
    }

    #[test]
    fn test_desired_sections_have_three_fields_each() {
        assert_eq!(provision_info_fields().len(), 3);
        assert_eq!(instance_links_fields().len(), 3);
    }
}
