use anyhow::Result;
use async_trait::async_trait;
use provision_cli::api::{Filter, InMemoryStore, ObjectStore};
use provision_cli::provision;
use provision_cli::provision::sections::{
    FIELD_EVENT_ID, FIELD_PROVISION_NAME, FIELD_SOURCE_ELEMENT, INSTANCE_LINKS_SECTION,
    PROVISION_INFO_SECTION,
};
use provision_cli::schema::{
    BehaviorDefinition, FieldDescriptor, ObjectDefinition, SectionDefinition,
};

#[tokio::test]
async fn test_first_run_builds_the_full_schema() -> Result<()> {
    let store = InMemoryStore::new();

    let outcome = provision::run(&store).await?;

    // Two sections, three fields each, everything carrying store identifiers.
    let sections = store.sections();
    assert_eq!(sections.len(), 2);
    for section in &sections {
        assert!(section.id.is_some());
        assert_eq!(section.fields.len(), 3);
        assert!(section.fields.iter().all(|field| field.id.is_some()));
    }
    assert_eq!(outcome.provision_info.name, PROVISION_INFO_SECTION);
    assert_eq!(outcome.instance_links.name, INSTANCE_LINKS_SECTION);

    // One behavior spanning the whole lifecycle.
    let behaviors = store.behaviors();
    assert_eq!(behaviors.len(), 1);
    assert_eq!(behaviors[0].name, provision::BEHAVIOR_NAME);
    assert_eq!(behaviors[0].initial_status_id, "draft");
    assert_eq!(behaviors[0].statuses.len(), 7);
    assert_eq!(behaviors[0].transitions.len(), 8);
    assert_eq!(behaviors[0].status_section_links.len(), 14);
    // Both sections are linked into every status; active is the only fork.
    for status in &behaviors[0].statuses {
        assert_eq!(behaviors[0].links_for_status(&status.id).len(), 2);
    }
    assert_eq!(behaviors[0].transitions_from("active").len(), 2);
    assert_eq!(behaviors[0].transitions_from("draft").len(), 1);

    // One definition referencing both sections and the behavior.
    let definitions = store.definitions();
    assert_eq!(definitions.len(), 1);
    assert_eq!(definitions[0].name, provision::DEFINITION_NAME);
    assert_eq!(
        definitions[0].section_links,
        vec![
            outcome.provision_info.id.unwrap(),
            outcome.instance_links.id.unwrap()
        ]
    );
    assert_eq!(
        definitions[0].behavior_definition_id,
        outcome.behavior.id.unwrap()
    );

    let counters = store.counters();
    assert_eq!(counters.section_creates, 2);
    assert_eq!(counters.section_updates, 0);
    assert_eq!(counters.behavior_creates, 1);
    assert_eq!(counters.behavior_updates, 0);
    assert_eq!(counters.definition_creates, 1);
    assert_eq!(counters.definition_updates, 0);
    Ok(())
}

#[tokio::test]
async fn test_rerun_is_write_free_for_sections_and_behavior() -> Result<()> {
    let store = InMemoryStore::new();
    let first = provision::run(&store).await?;
    store.reset_counters();

    let second = provision::run(&store).await?;

    // Converged sections and behavior see no further writes.
    let counters = store.counters();
    assert_eq!(counters.section_creates, 0);
    assert_eq!(counters.section_updates, 0);
    assert_eq!(counters.behavior_creates, 0);
    assert_eq!(counters.behavior_updates, 0);

    // The definition is rewritten with identical content and the same id.
    assert_eq!(counters.definition_creates, 0);
    assert_eq!(counters.definition_updates, 1);
    assert_eq!(second.definition.id, first.definition.id);
    assert_eq!(second.definition.section_links, first.definition.section_links);
    assert_eq!(
        second.definition.behavior_definition_id,
        first.definition.behavior_definition_id
    );

    // Nothing got duplicated.
    assert_eq!(store.sections().len(), 2);
    assert_eq!(store.behaviors().len(), 1);
    assert_eq!(store.definitions().len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_partially_seeded_section_is_completed_with_one_update() -> Result<()> {
    let store = InMemoryStore::new();
    let seeded = SectionDefinition::new(PROVISION_INFO_SECTION)
        .with_fields(vec![FieldDescriptor::text("Provision Name", "Name of the provision")]);
    store.create_section(seeded).await?;
    store.reset_counters();

    provision::run(&store).await?;

    let sections = store.sections();
    let provision_info = sections
        .iter()
        .find(|section| section.name == PROVISION_INFO_SECTION)
        .unwrap();
    let mut names = provision_info.field_names();
    names.sort();
    assert_eq!(
        names,
        vec![FIELD_EVENT_ID, FIELD_PROVISION_NAME, FIELD_SOURCE_ELEMENT]
    );

    // One update for the seeded section, one create for the other.
    let counters = store.counters();
    assert_eq!(counters.section_updates, 1);
    assert_eq!(counters.section_creates, 1);
    Ok(())
}

#[tokio::test]
async fn test_merge_update_never_drops_an_existing_field() -> Result<()> {
    let store = InMemoryStore::new();
    // One desired field plus a stray one the run knows nothing about, so
    // completing the section forces an update that must carry the stray.
    let seeded = SectionDefinition::new(PROVISION_INFO_SECTION).with_fields(vec![
        FieldDescriptor::text(FIELD_EVENT_ID, "An event ID."),
        FieldDescriptor::text("Legacy Notes", "Kept from an older schema revision."),
    ]);
    store.create_section(seeded).await?;
    store.reset_counters();

    provision::run(&store).await?;

    let sections = store.sections();
    let provision_info = sections
        .iter()
        .find(|section| section.name == PROVISION_INFO_SECTION)
        .unwrap();
    let mut names = provision_info.field_names();
    names.sort();
    assert_eq!(
        names,
        vec![
            FIELD_EVENT_ID,
            "Legacy Notes",
            FIELD_PROVISION_NAME,
            FIELD_SOURCE_ELEMENT
        ]
    );

    let counters = store.counters();
    assert_eq!(counters.section_updates, 1);
    assert_eq!(counters.section_creates, 1);
    Ok(())
}

#[tokio::test]
async fn test_superset_section_stays_untouched() -> Result<()> {
    let store = InMemoryStore::new();
    let mut fields = provision::provision_info_fields();
    fields.push(FieldDescriptor::text("Operator Notes", "Free-form handover notes"));
    let seeded = SectionDefinition::new(PROVISION_INFO_SECTION).with_fields(fields);
    store.create_section(seeded).await?;
    store.reset_counters();

    provision::run(&store).await?;

    // The extra field survives and no update was issued for the section.
    let sections = store.sections();
    let provision_info = sections
        .iter()
        .find(|section| section.name == PROVISION_INFO_SECTION)
        .unwrap();
    assert_eq!(provision_info.fields.len(), 4);
    assert!(provision_info.has_field("Operator Notes"));

    let counters = store.counters();
    assert_eq!(counters.section_updates, 0);
    assert_eq!(counters.section_creates, 1);
    Ok(())
}

#[tokio::test]
async fn test_existing_behavior_is_returned_as_found() -> Result<()> {
    let store = InMemoryStore::new();
    // A behavior whose shape disagrees with what a fresh run would build.
    let seeded = BehaviorDefinition {
        id: None,
        name: provision::BEHAVIOR_NAME.to_string(),
        initial_status_id: "ready".to_string(),
        statuses: vec![],
        transitions: vec![],
        status_section_links: vec![],
    };
    let seeded = store.create_behavior(seeded).await?;
    store.reset_counters();

    let outcome = provision::run(&store).await?;

    assert_eq!(outcome.behavior.id, seeded.id);
    assert_eq!(outcome.behavior.initial_status_id, "ready");
    assert!(outcome.behavior.statuses.is_empty());

    let counters = store.counters();
    assert_eq!(counters.behavior_creates, 0);
    assert_eq!(counters.behavior_updates, 0);

    // The definition still points at the found behavior.
    assert_eq!(
        store.definitions()[0].behavior_definition_id,
        seeded.id.unwrap()
    );
    Ok(())
}

#[tokio::test]
async fn test_section_failure_skips_the_downstream_definition() -> Result<()> {
    let store = FailingStore {
        inner: InMemoryStore::new(),
        fail_point: FailPoint::InstanceLinksSectionQuery,
    };

    let error = provision::run(&store).await.unwrap_err();

    assert!(format!("{:#}", error).contains(INSTANCE_LINKS_SECTION));
    // The first section went through; everything downstream was skipped.
    assert_eq!(store.inner.sections().len(), 1);
    assert!(store.inner.behaviors().is_empty());
    assert!(store.inner.definitions().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_rerun_after_partial_failure_converges() -> Result<()> {
    let store = FailingStore {
        inner: InMemoryStore::new(),
        fail_point: FailPoint::BehaviorCreate,
    };

    let error = provision::run(&store).await.unwrap_err();
    assert!(format!("{:#}", error).contains(provision::BEHAVIOR_NAME));
    assert_eq!(store.inner.sections().len(), 2);
    assert!(store.inner.definitions().is_empty());

    // The next run picks up the committed sections without duplicating them.
    store.inner.reset_counters();
    provision::run(&store.inner).await?;

    assert_eq!(store.inner.sections().len(), 2);
    assert_eq!(store.inner.behaviors().len(), 1);
    assert_eq!(store.inner.definitions().len(), 1);
    let counters = store.inner.counters();
    assert_eq!(counters.section_creates, 0);
    assert_eq!(counters.section_updates, 0);
    Ok(())
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum FailPoint {
    InstanceLinksSectionQuery,
    BehaviorCreate,
}

/// Store wrapper that fails one chosen operation, for partial-failure runs.
struct FailingStore {
    inner: InMemoryStore,
    fail_point: FailPoint,
}

#[async_trait]
impl ObjectStore for FailingStore {
    async fn query_sections(&self, filter: &Filter) -> Result<Vec<SectionDefinition>> {
        if self.fail_point == FailPoint::InstanceLinksSectionQuery
            && filter.value() == INSTANCE_LINKS_SECTION
        {
            anyhow::bail!("store unavailable");
        }
        self.inner.query_sections(filter).await
    }

    async fn create_section(&self, section: SectionDefinition) -> Result<SectionDefinition> {
        self.inner.create_section(section).await
    }

    async fn update_section(&self, section: SectionDefinition) -> Result<SectionDefinition> {
        self.inner.update_section(section).await
    }

    async fn query_behaviors(&self, filter: &Filter) -> Result<Vec<BehaviorDefinition>> {
        self.inner.query_behaviors(filter).await
    }

    async fn create_behavior(&self, behavior: BehaviorDefinition) -> Result<BehaviorDefinition> {
        if self.fail_point == FailPoint::BehaviorCreate {
            anyhow::bail!("store unavailable");
        }
        self.inner.create_behavior(behavior).await
    }

    async fn update_behavior(&self, behavior: BehaviorDefinition) -> Result<BehaviorDefinition> {
        self.inner.update_behavior(behavior).await
    }

    async fn query_definitions(&self, filter: &Filter) -> Result<Vec<ObjectDefinition>> {
        self.inner.query_definitions(filter).await
    }

    async fn create_definition(&self, definition: ObjectDefinition) -> Result<ObjectDefinition> {
        self.inner.create_definition(definition).await
    }

    async fn update_definition(&self, definition: ObjectDefinition) -> Result<ObjectDefinition> {
        self.inner.update_definition(definition).await
    }
}
