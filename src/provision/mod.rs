//! Idempotent provisioning of the media-provision schema.
//!
//! One run converges the remote object-model store on the full schema:
//! two section definitions, the lifecycle behavior, and the top-level
//! object definition wiring them together. Against an already converged
//! store the sections and the behavior see no writes; only the top-level
//! definition is rewritten, with identical content and its existing
//! identifier.
//!
//! Steps run strictly in order because each depends on identifiers the
//! store assigned in the previous one. A failed step aborts the run;
//! nothing downstream of it is attempted, and whatever earlier steps
//! committed stays in place for the next run to pick up. Concurrent runs
//! against the same store are not coordinated: two racing runs can both
//! miss an existing record and create duplicates.

pub mod behavior;
pub mod definition;
pub mod links;
pub mod sections;
pub mod statuses;

use anyhow::{Context, Result};
use uuid::Uuid;

use crate::api::ObjectStore;
use crate::schema::{BehaviorDefinition, ObjectDefinition, SectionDefinition};

pub use links::{status_section_links, FieldLookup, FieldPolicy};
pub use sections::{instance_links_fields, provision_info_fields, reconcile_section};
pub use statuses::{lifecycle_statuses, lifecycle_transitions};

/// Name of the top-level object definition.
pub const DEFINITION_NAME: &str = "Media Provision";

/// Name of the lifecycle behavior governing provision instances.
pub const BEHAVIOR_NAME: &str = "Media Provision Behavior";

/// Everything one provisioning run reconciled, as stored.
#[derive(Debug)]
pub struct ProvisionOutcome {
    pub provision_info: SectionDefinition,
    pub instance_links: SectionDefinition,
    pub behavior: BehaviorDefinition,
    pub definition: ObjectDefinition,
}

/// Converge the store on the media-provision schema.
pub async fn run(store: &dyn ObjectStore) -> Result<ProvisionOutcome> {
    let provision_info = reconcile_section(
        store,
        sections::PROVISION_INFO_SECTION,
        provision_info_fields(),
    )
    .await
    .with_context(|| format!("Reconciling section '{}'", sections::PROVISION_INFO_SECTION))?;

    let instance_links = reconcile_section(
        store,
        sections::INSTANCE_LINKS_SECTION,
        instance_links_fields(),
    )
    .await
    .with_context(|| format!("Reconciling section '{}'", sections::INSTANCE_LINKS_SECTION))?;

    let behavior = behavior::reconcile_behavior(store, BEHAVIOR_NAME, &provision_info, &instance_links)
        .await
        .with_context(|| format!("Reconciling behavior '{}'", BEHAVIOR_NAME))?;

    let section_ids = vec![
        stored_id(provision_info.id, "section definition", &provision_info.name)?,
        stored_id(instance_links.id, "section definition", &instance_links.name)?,
    ];
    let behavior_id = stored_id(behavior.id, "behavior definition", &behavior.name)?;

    let definition = definition::reconcile_definition(store, DEFINITION_NAME, section_ids, behavior_id)
        .await
        .with_context(|| format!("Reconciling definition '{}'", DEFINITION_NAME))?;

    Ok(ProvisionOutcome {
        provision_info,
        instance_links,
        behavior,
        definition,
    })
}

/// Identifier of a record the store just returned; absence means the store
/// broke its contract of assigning ids on create.
fn stored_id(id: Option<Uuid>, kind: &str, name: &str) -> Result<Uuid> {
    id.ok_or_else(|| anyhow::anyhow!("Store returned {} '{}' without an identifier", kind, name))
}
