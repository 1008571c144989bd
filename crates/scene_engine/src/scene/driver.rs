//! Per-frame scene lifecycle driver

use super::SceneManager;
use crate::ecs::{System, SystemError, World};

/// System that advances the world's [`SceneManager`] once per frame
///
/// Register it before any system that expects this frame's scene entities to
/// exist. Each run disposes scenes queued for unload, creates and initializes
/// a pending scene, then forwards `update` to the active scene.
///
/// A missing manager resource is an error, not a skipped frame.
pub struct SceneLifecycleSystem {
    key: String,
}

impl SceneLifecycleSystem {
    /// Driver for the manager at [`SceneManager::RESOURCE_KEY`]
    pub fn new() -> Self {
        Self::with_key(SceneManager::RESOURCE_KEY)
    }

    /// Driver for a manager registered under another key
    pub fn with_key(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

impl Default for SceneLifecycleSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl System for SceneLifecycleSystem {
    fn run(&mut self, world: &mut World, delta_time: f32) -> Result<(), SystemError> {
        world
            .resource_scope(&self.key, |world, manager: &mut SceneManager| {
                manager.advance(world, delta_time)
            })?
            .map_err(|err| SystemError::failed(self.name(), err))
    }

    fn name(&self) -> &str {
        "SceneLifecycleSystem"
    }
}
