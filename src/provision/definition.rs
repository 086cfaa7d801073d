//! Top-level object definition reconciliation.
//!
//! Unlike behaviors, the definition is kept in full sync: when one with the
//! matching name already exists it is overwritten with the freshly built
//! desired state, keeping only the store identifier so references to it
//! stay valid.

use anyhow::Result;
use uuid::Uuid;

use crate::api::{Filter, ObjectStore};
use crate::schema::ObjectDefinition;

/// Ensure the object definition exists and matches the desired shape.
///
/// `section_ids` are the store identifiers of the sections the definition
/// is composed of, `behavior_id` the lifecycle behavior it is governed by.
pub async fn reconcile_definition(
    store: &dyn ObjectStore,
    name: &str,
    section_ids: Vec<Uuid>,
    behavior_id: Uuid,
) -> Result<ObjectDefinition> {
    let mut desired = ObjectDefinition::new(name, section_ids, behavior_id);

    let found = store.query_definitions(&Filter::name(name)).await?;

    if let Some(existing) = found.into_iter().next() {
        desired.id = existing.id;
        log::info!("Updating object definition '{}'", name);
        return store.update_definition(desired).await;
    }

    log::info!("Creating object definition '{}'", name);
    store.create_definition(desired).await
}
