//! Shared scene helper
//!
//! [`SceneBase`] holds a scene id and knows which entities belong to it.
//! Concrete scenes embed one and spawn through it so their entities can be
//! found again by [`Tag`] at dispose or reset time.

use super::Tag;
use crate::ecs::{Entity, World};

/// Id and entity bookkeeping shared by every scene
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneBase {
    id: String,
}

impl SceneBase {
    /// Create a base for the scene named `id`
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }

    /// Scene id
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Create an entity tagged as owned by this scene
    pub fn create_entity(&self, world: &mut World) -> Entity {
        world.spawn(Tag::new(self.id.as_str()))
    }

    /// Whether `entity` carries this scene's tag
    pub fn owns(&self, world: &World, entity: Entity) -> bool {
        world.get::<Tag>(entity).is_some_and(|tag| tag.is(&self.id))
    }

    /// Every live entity tagged with this scene's id
    pub fn owned_entities(&self, world: &World) -> Vec<Entity> {
        world
            .query::<(Tag,)>()
            .iter()
            .filter(|(_, (tag,))| tag.is(&self.id))
            .map(|(entity, _)| entity)
            .collect()
    }

    /// Destroy every entity tagged with this scene's id
    ///
    /// Returns how many entities were destroyed.
    pub fn cleanup(&self, world: &mut World) -> usize {
        self.cleanup_except(world, &[])
    }

    /// Destroy this scene's entities except the ones in `keep`
    pub fn cleanup_except(&self, world: &mut World, keep: &[Entity]) -> usize {
        let doomed: Vec<Entity> = self
            .owned_entities(world)
            .into_iter()
            .filter(|entity| !keep.contains(entity))
            .collect();

        let destroyed = doomed.into_iter().filter(|&entity| world.destroy_entity(entity)).count();
        log::debug!("Scene '{}' cleaned up {} entities", self.id, destroyed);
        destroyed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_entity_tags_owner() {
        let mut world = World::new();
        let base = SceneBase::new("level_1");
        let e = base.create_entity(&mut world);

        assert_eq!(world.get::<Tag>(e), Some(&Tag::new("level_1")));
        assert!(base.owns(&world, e));
        assert!(!SceneBase::new("level_2").owns(&world, e));
    }

    #[test]
    fn test_cleanup_only_touches_own_tag() {
        let mut world = World::new();
        let mine = SceneBase::new("mine");
        let theirs = SceneBase::new("theirs");
        for _ in 0..3 {
            mine.create_entity(&mut world);
        }
        let other = theirs.create_entity(&mut world);
        let untagged = world.create_entity();

        assert_eq!(mine.cleanup(&mut world), 3);
        assert_eq!(world.all_entities().len(), 2);
        assert!(world.entity_exists(other));
        assert!(world.entity_exists(untagged));
        assert_eq!(mine.cleanup(&mut world), 0);
    }

    #[test]
    fn test_cleanup_adopts_foreign_entities_with_same_tag() {
        let mut world = World::new();
        let base = SceneBase::new("arena");
        let adopted = world.spawn(Tag::new("arena"));

        assert_eq!(base.owned_entities(&world), vec![adopted]);
        base.cleanup(&mut world);
        assert!(!world.entity_exists(adopted));
    }

    #[test]
    fn test_cleanup_except_keeps_listed() {
        let mut world = World::new();
        let base = SceneBase::new("hud");
        let keep = base.create_entity(&mut world);
        let drop = base.create_entity(&mut world);

        assert_eq!(base.cleanup_except(&mut world, &[keep]), 1);
        assert!(world.entity_exists(keep));
        assert!(!world.entity_exists(drop));
    }
}
