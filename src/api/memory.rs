//! In-process implementation of the object-model store contract.
//!
//! Behaves like the remote store from a reconciler's point of view: it
//! assigns identifiers on create, replaces by identifier on update, and
//! reads by exact name match. Write calls are counted per entity kind so
//! tests can assert exactly how many writes a run issued. Backs the test
//! suite; the binary always talks to a real store.

use std::sync::{Mutex, MutexGuard};

use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

use crate::schema::{BehaviorDefinition, ObjectDefinition, SectionDefinition};

use super::filter::Filter;
use super::store::ObjectStore;

/// Write-call counts per entity kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StoreCounters {
    pub section_creates: usize,
    pub section_updates: usize,
    pub behavior_creates: usize,
    pub behavior_updates: usize,
    pub definition_creates: usize,
    pub definition_updates: usize,
}

#[derive(Debug, Default)]
struct Inner {
    sections: Vec<SectionDefinition>,
    behaviors: Vec<BehaviorDefinition>,
    definitions: Vec<ObjectDefinition>,
    counters: StoreCounters,
}

/// In-memory object-model store.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    inner: Mutex<Inner>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().expect("store lock poisoned")
    }

    /// Snapshot of the write counters.
    pub fn counters(&self) -> StoreCounters {
        self.lock().counters
    }

    /// Zero the write counters, keeping the stored entities. Lets a test
    /// separate the writes of one run from the seeding that preceded it.
    pub fn reset_counters(&self) {
        self.lock().counters = StoreCounters::default();
    }

    /// Snapshot of every stored section definition.
    pub fn sections(&self) -> Vec<SectionDefinition> {
        self.lock().sections.clone()
    }

    /// Snapshot of every stored behavior definition.
    pub fn behaviors(&self) -> Vec<BehaviorDefinition> {
        self.lock().behaviors.clone()
    }

    /// Snapshot of every stored object definition.
    pub fn definitions(&self) -> Vec<ObjectDefinition> {
        self.lock().definitions.clone()
    }
}

/// The store indexes entities by name only; any other filter field is a bug
/// in the caller, not an empty result.
fn filtered_name(filter: &Filter) -> Result<&str> {
    if filter.field() != "name" {
        anyhow::bail!("The in-memory store only filters on 'name', got '{}'", filter.field());
    }
    Ok(filter.value())
}

fn assign_field_ids(section: &mut SectionDefinition) {
    for field in &mut section.fields {
        field.id.get_or_insert_with(Uuid::new_v4);
    }
}

#[async_trait]
impl ObjectStore for InMemoryStore {
    async fn query_sections(&self, filter: &Filter) -> Result<Vec<SectionDefinition>> {
        let wanted = filtered_name(filter)?;
        Ok(self
            .lock()
            .sections
            .iter()
            .filter(|s| s.name == wanted)
            .cloned()
            .collect())
    }

    async fn create_section(&self, mut section: SectionDefinition) -> Result<SectionDefinition> {
        section.id.get_or_insert_with(Uuid::new_v4);
        assign_field_ids(&mut section);

        let mut inner = self.lock();
        inner.sections.push(section.clone());
        inner.counters.section_creates += 1;
        Ok(section)
    }

    async fn update_section(&self, mut section: SectionDefinition) -> Result<SectionDefinition> {
        let id = section
            .id
            .ok_or_else(|| anyhow::anyhow!("Cannot update a section definition without an identifier"))?;
        assign_field_ids(&mut section);

        let mut inner = self.lock();
        let slot = inner
            .sections
            .iter_mut()
            .find(|s| s.id == Some(id))
            .ok_or_else(|| anyhow::anyhow!("No section definition with identifier {} exists", id))?;
        *slot = section.clone();
        inner.counters.section_updates += 1;
        Ok(section)
    }

    async fn query_behaviors(&self, filter: &Filter) -> Result<Vec<BehaviorDefinition>> {
        let wanted = filtered_name(filter)?;
        Ok(self
            .lock()
            .behaviors
            .iter()
            .filter(|b| b.name == wanted)
            .cloned()
            .collect())
    }

    async fn create_behavior(&self, mut behavior: BehaviorDefinition) -> Result<BehaviorDefinition> {
        behavior.id.get_or_insert_with(Uuid::new_v4);

        let mut inner = self.lock();
        inner.behaviors.push(behavior.clone());
        inner.counters.behavior_creates += 1;
        Ok(behavior)
    }

    async fn update_behavior(&self, behavior: BehaviorDefinition) -> Result<BehaviorDefinition> {
        let id = behavior
            .id
            .ok_or_else(|| anyhow::anyhow!("Cannot update a behavior definition without an identifier"))?;

        let mut inner = self.lock();
        let slot = inner
            .behaviors
            .iter_mut()
            .find(|b| b.id == Some(id))
            .ok_or_else(|| anyhow::anyhow!("No behavior definition with identifier {} exists", id))?;
        *slot = behavior.clone();
        inner.counters.behavior_updates += 1;
        Ok(behavior)
    }

    async fn query_definitions(&self, filter: &Filter) -> Result<Vec<ObjectDefinition>> {
        let wanted = filtered_name(filter)?;
        Ok(self
            .lock()
            .definitions
            .iter()
            .filter(|d| d.name == wanted)
            .cloned()
            .collect())
    }

    async fn create_definition(&self, mut definition: ObjectDefinition) -> Result<ObjectDefinition> {
        definition.id.get_or_insert_with(Uuid::new_v4);

        let mut inner = self.lock();
        inner.definitions.push(definition.clone());
        inner.counters.definition_creates += 1;
        Ok(definition)
    }

    async fn update_definition(&self, definition: ObjectDefinition) -> Result<ObjectDefinition> {
        let id = definition
            .id
            .ok_or_else(|| anyhow::anyhow!("Cannot update an object definition without an identifier"))?;

        let mut inner = self.lock();
        let slot = inner
            .definitions
            .iter_mut()
            .find(|d| d.id == Some(id))
            .ok_or_else(|| anyhow::anyhow!("No object definition with identifier {} exists", id))?;
        *slot = definition.clone();
        inner.counters.definition_updates += 1;
        Ok(definition)
    }
}
