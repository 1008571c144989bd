//! Scene lifecycle contract

use super::{SceneBase, SceneError};
use crate::ecs::World;

/// A unit of content with a managed lifecycle
///
/// The [`SceneManager`](super::SceneManager) and its lifecycle driver call
/// the hooks in this order:
///
/// - `create` once, then `init`, when the scene first becomes current
/// - `update` every frame while it is the active scene
/// - `pause` when another scene is pushed over it, `resume` when that one is
///   popped
/// - `reset` on request while active
/// - `dispose` once when the scene is popped or replaced
///
/// Only `base` and `init` are required. The default `dispose` destroys every
/// entity tagged with the scene id and the default `reset` is dispose
/// followed by `init`.
pub trait Scene {
    /// Shared id and entity helper
    fn base(&self) -> &SceneBase;

    /// Scene id, fixed for the scene's lifetime
    fn id(&self) -> &str {
        self.base().id()
    }

    /// One-time setup that does not touch the world
    fn create(&mut self) -> Result<(), SceneError> {
        Ok(())
    }

    /// Populate the world
    fn init(&mut self, world: &mut World) -> Result<(), SceneError>;

    /// Another scene was pushed on top of this one
    fn pause(&mut self, _world: &mut World) -> Result<(), SceneError> {
        Ok(())
    }

    /// This scene is on top again
    fn resume(&mut self, _world: &mut World) -> Result<(), SceneError> {
        Ok(())
    }

    /// Return to the freshly initialized state
    fn reset(&mut self, world: &mut World) -> Result<(), SceneError> {
        self.base().cleanup(world);
        self.init(world)
    }

    /// Per-frame logic
    fn update(&mut self, _world: &mut World, _delta_time: f32) -> Result<(), SceneError> {
        Ok(())
    }

    /// Release everything the scene put in the world
    fn dispose(&mut self, world: &mut World) -> Result<(), SceneError> {
        self.base().cleanup(world);
        Ok(())
    }
}
