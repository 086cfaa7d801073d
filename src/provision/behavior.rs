//! Behavior definition assembly and reconciliation.
//!
//! The behavior carries the full lifecycle: every status, every allowed
//! transition, and the per-status section links built in [`super::links`].
//! Reconciliation is create-only. A behavior that already exists in the
//! store is left exactly as found, even if its contents have drifted from
//! what this module would build, because rewriting a lifecycle under live
//! instances can strand them in states the new lifecycle no longer has.

use anyhow::Result;

use crate::api::{Filter, ObjectStore};
use crate::schema::{BehaviorDefinition, SectionDefinition};

use super::links::{status_section_links, FieldLookup};
use super::statuses::{lifecycle_statuses, lifecycle_transitions, STATUS_DRAFT};

/// Assemble the desired behavior definition from two reconciled sections.
///
/// Both sections (and all their fields) must already carry store
/// identifiers; the links reference fields by id, not by name.
pub fn build_behavior(
    name: impl Into<String>,
    provision_info: &SectionDefinition,
    instance_links: &SectionDefinition,
) -> Result<BehaviorDefinition> {
    let fields = FieldLookup::from_sections(&[provision_info, instance_links])?;

    let statuses = lifecycle_statuses();
    let mut links = Vec::with_capacity(statuses.len() * 2);
    for status in &statuses {
        links.extend(status_section_links(
            &status.id,
            provision_info,
            instance_links,
            &fields,
        )?);
    }

    Ok(BehaviorDefinition {
        id: None,
        name: name.into(),
        initial_status_id: STATUS_DRAFT.to_string(),
        statuses,
        transitions: lifecycle_transitions(),
        status_section_links: links,
    })
}

/// Ensure a behavior definition with the given name exists in the store.
///
/// Returns the stored behavior: the existing one untouched when found,
/// otherwise a freshly created one.
pub async fn reconcile_behavior(
    store: &dyn ObjectStore,
    name: &str,
    provision_info: &SectionDefinition,
    instance_links: &SectionDefinition,
) -> Result<BehaviorDefinition> {
    let found = store.query_behaviors(&Filter::name(name)).await?;

    if let Some(existing) = found.into_iter().next() {
        log::debug!("Behavior definition '{}' already exists, leaving it untouched", name);
        return Ok(existing);
    }

    log::info!("Creating behavior definition '{}'", name);
    let desired = build_behavior(name, provision_info, instance_links)?;
    store.create_behavior(desired).await
}
