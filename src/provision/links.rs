//! Per-status field-visibility rules linking the sections into the behavior.
//!
//! Only the initial draft status permits edits (and makes the identifying
//! fields mandatory); every later status shows the same fields read-only.

use std::collections::HashMap;

use anyhow::Result;
use uuid::Uuid;

use crate::schema::{FieldDescriptorLink, SectionDefinition, StatusSectionLink};

use super::sections::{
    FIELD_DISTRIBUTION, FIELD_EVENT_ID, FIELD_MONITORING, FIELD_PLAYOUT, FIELD_PROVISION_NAME,
    FIELD_SOURCE_ELEMENT,
};
use super::statuses::STATUS_DRAFT;

/// How one field is presented while an instance sits in a given status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldPolicy {
    /// Editable, and must be filled for the status to be left.
    EditableRequired,
    /// Editable, may stay empty.
    EditableOptional,
    /// Shown but locked.
    ReadOnly,
}

impl FieldPolicy {
    fn read_only(self) -> bool {
        matches!(self, Self::ReadOnly)
    }

    fn required_for_status(self) -> bool {
        matches!(self, Self::EditableRequired)
    }
}

/// Field-name to store-identifier map built from the reconciled sections.
///
/// Construction fails if any descriptor still lacks its store identifier,
/// and lookups fail on unknown names; either means the sections were not
/// reconciled before the behavior was assembled, or the schema drifted.
#[derive(Debug)]
pub struct FieldLookup {
    ids: HashMap<String, Uuid>,
}

impl FieldLookup {
    pub fn from_sections(sections: &[&SectionDefinition]) -> Result<Self> {
        let mut ids = HashMap::new();
        for section in sections {
            for field in &section.fields {
                let id = field.id.ok_or_else(|| {
                    anyhow::anyhow!(
                        "Field '{}' in section definition '{}' has no store identifier yet",
                        field.name,
                        section.name
                    )
                })?;
                ids.insert(field.name.clone(), id);
            }
        }
        Ok(Self { ids })
    }

    pub fn id_of(&self, name: &str) -> Result<Uuid> {
        self.ids
            .get(name)
            .copied()
            .ok_or_else(|| anyhow::anyhow!("No field named '{}' in the reconciled sections", name))
    }
}

/// Per-field policies for the "Provision Info" section in one status.
fn provision_info_policies(status_id: &str) -> Vec<(&'static str, FieldPolicy)> {
    if status_id == STATUS_DRAFT {
        vec![
            (FIELD_PROVISION_NAME, FieldPolicy::EditableRequired),
            (FIELD_EVENT_ID, FieldPolicy::EditableRequired),
            (FIELD_SOURCE_ELEMENT, FieldPolicy::EditableOptional),
        ]
    } else {
        vec![
            (FIELD_PROVISION_NAME, FieldPolicy::ReadOnly),
            (FIELD_EVENT_ID, FieldPolicy::ReadOnly),
            (FIELD_SOURCE_ELEMENT, FieldPolicy::ReadOnly),
        ]
    }
}

/// Per-field policies for the "Instance Links" section in one status.
fn instance_links_policies(status_id: &str) -> Vec<(&'static str, FieldPolicy)> {
    let policy = if status_id == STATUS_DRAFT {
        FieldPolicy::EditableOptional
    } else {
        FieldPolicy::ReadOnly
    };
    vec![
        (FIELD_MONITORING, policy),
        (FIELD_PLAYOUT, policy),
        (FIELD_DISTRIBUTION, policy),
    ]
}

/// Build the link tying `section` into `status_id`, one field link per policy
/// entry. Every field stays visible in every status; the policy only decides
/// editability and requiredness.
fn section_link(
    status_id: &str,
    section: &SectionDefinition,
    policies: &[(&str, FieldPolicy)],
    fields: &FieldLookup,
) -> Result<StatusSectionLink> {
    let section_id = section.id.ok_or_else(|| {
        anyhow::anyhow!(
            "Section definition '{}' has no store identifier yet",
            section.name
        )
    })?;

    let mut field_links = Vec::with_capacity(policies.len());
    for (name, policy) in policies {
        field_links.push(FieldDescriptorLink {
            field_id: fields.id_of(name)?,
            visible: true,
            read_only: policy.read_only(),
            required_for_status: policy.required_for_status(),
        });
    }

    Ok(StatusSectionLink::new(status_id, section_id).with_field_links(field_links))
}

/// Both section links for one status: provision info first, instance links
/// second.
pub fn status_section_links(
    status_id: &str,
    provision_info: &SectionDefinition,
    instance_links: &SectionDefinition,
    fields: &FieldLookup,
) -> Result<Vec<StatusSectionLink>> {
    Ok(vec![
        section_link(status_id, provision_info, &provision_info_policies(status_id), fields)?,
        section_link(status_id, instance_links, &instance_links_policies(status_id), fields)?,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::FieldDescriptor;

    fn stored_section(name: &str, fields: Vec<FieldDescriptor>) -> SectionDefinition {
        let mut section = SectionDefinition::new(name).with_fields(fields);
        section.id = Some(Uuid::new_v4());
        for field in &mut section.fields {
            field.id = Some(Uuid::new_v4());
        }
        section
    }

    fn reconciled_sections() -> (SectionDefinition, SectionDefinition) {
        let provision_info = stored_section(
            super::super::sections::PROVISION_INFO_SECTION,
            super::super::sections::provision_info_fields(),
        );
        let instance_links = stored_section(
            super::super::sections::INSTANCE_LINKS_SECTION,
            super::super::sections::instance_links_fields(),
        );
        (provision_info, instance_links)
    }

    #[test]
    fn test_draft_links_permit_edits_and_require_identity_fields() -> Result<()> {
        let (provision_info, instance_links) = reconciled_sections();
        let fields = FieldLookup::from_sections(&[&provision_info, &instance_links])?;

        let links = status_section_links(STATUS_DRAFT, &provision_info, &instance_links, &fields)?;

        assert_eq!(links.len(), 2);
        assert_eq!(links[0].section_id, provision_info.id.unwrap());
        assert_eq!(links[1].section_id, instance_links.id.unwrap());

        let provision_links = &links[0].field_links;
        assert_eq!(provision_links.len(), 3);
        // Provision Name and Event ID are mandatory while drafting.
        assert!(provision_links[0].required_for_status);
        assert!(provision_links[1].required_for_status);
        assert!(!provision_links[2].required_for_status);
        for link in provision_links {
            assert!(link.visible);
            assert!(!link.read_only);
        }

        // Reference fields are editable but never mandatory.
        for link in &links[1].field_links {
            assert!(link.visible);
            assert!(!link.read_only);
            assert!(!link.required_for_status);
        }
        Ok(())
    }

    #[test]
    fn test_post_draft_links_are_read_only_display() -> Result<()> {
        let (provision_info, instance_links) = reconciled_sections();
        let fields = FieldLookup::from_sections(&[&provision_info, &instance_links])?;

        for status_id in ["ready", "in_progress", "active", "deactivate", "reprovision", "complete"] {
            let links = status_section_links(status_id, &provision_info, &instance_links, &fields)?;

            assert_eq!(links.len(), 2);
            for link in &links {
                assert_eq!(link.status_id, status_id);
                assert_eq!(link.field_links.len(), 3);
                for field_link in &link.field_links {
                    assert!(field_link.visible);
                    assert!(field_link.read_only);
                    assert!(!field_link.required_for_status);
                }
            }
        }
        Ok(())
    }

    #[test]
    fn test_unknown_field_name_aborts_link_construction() -> Result<()> {
        let (provision_info, instance_links) = reconciled_sections();
        // A lookup missing the reference fields models a drifted schema.
        let fields = FieldLookup::from_sections(&[&provision_info])?;

        let result = status_section_links(STATUS_DRAFT, &provision_info, &instance_links, &fields);

        let error = result.unwrap_err();
        assert!(error.to_string().contains("Monitoring"));
        Ok(())
    }

    #[test]
    fn test_unstored_field_aborts_lookup_construction() {
        let mut section = SectionDefinition::new("Provision Info")
            .with_fields(super::super::sections::provision_info_fields());
        section.id = Some(Uuid::new_v4());
        // Descriptors keep id = None, as before any store round trip.

        let result = FieldLookup::from_sections(&[&section]);

        assert!(result.is_err());
    }
}
