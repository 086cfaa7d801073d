//! The remote object-model store contract.

use anyhow::Result;
use async_trait::async_trait;

use crate::schema::{BehaviorDefinition, ObjectDefinition, SectionDefinition};

use super::filter::Filter;

/// Typed read and upsert access, one method set per entity kind.
///
/// `query_*` is a filtered read. `create_*` hands the entity to the store and
/// returns it with every store-assigned identifier populated. `update_*`
/// replaces the stored entity carrying the same identifier and is idempotent
/// when nothing actually changed. The store owns all durable state; callers
/// keep nothing between runs.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    async fn query_sections(&self, filter: &Filter) -> Result<Vec<SectionDefinition>>;
    async fn create_section(&self, section: SectionDefinition) -> Result<SectionDefinition>;
    async fn update_section(&self, section: SectionDefinition) -> Result<SectionDefinition>;

    async fn query_behaviors(&self, filter: &Filter) -> Result<Vec<BehaviorDefinition>>;
    async fn create_behavior(&self, behavior: BehaviorDefinition) -> Result<BehaviorDefinition>;
    /// Part of the store contract, but never issued by the provisioning run:
    /// deployed behavior definitions are left untouched.
    async fn update_behavior(&self, behavior: BehaviorDefinition) -> Result<BehaviorDefinition>;

    async fn query_definitions(&self, filter: &Filter) -> Result<Vec<ObjectDefinition>>;
    async fn create_definition(&self, definition: ObjectDefinition) -> Result<ObjectDefinition>;
    async fn update_definition(&self, definition: ObjectDefinition) -> Result<ObjectDefinition>;
}
