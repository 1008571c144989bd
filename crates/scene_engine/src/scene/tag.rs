//! Scene ownership tag

use crate::ecs::Component;

/// Records which scene created an entity
///
/// [`SceneBase::create_entity`](super::SceneBase::create_entity) attaches a
/// `Tag` whose value is the scene id; disposing the scene destroys every
/// entity carrying that value. Anything else that writes a `Tag` with the
/// same value opts its entity into that cleanup.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Tag {
    /// Id of the owning scene
    pub value: String,
}

impl Tag {
    /// Create a tag for the given scene id
    pub fn new(value: impl Into<String>) -> Self {
        Self { value: value.into() }
    }

    /// Whether this tag names `scene_id`
    pub fn is(&self, scene_id: &str) -> bool {
        self.value == scene_id
    }
}

impl Component for Tag {}
