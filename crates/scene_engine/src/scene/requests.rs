//! Scene transitions requested from inside the frame loop
//!
//! While the lifecycle driver runs, the [`SceneManager`](super::SceneManager)
//! is lifted out of the world, so scene hooks and systems cannot reach it.
//! They queue a [`SceneCommand`] here instead; the manager applies the queue
//! on its next [`advance`](super::SceneManager::advance).

use std::fmt;

use super::Scene;
use crate::ecs::{EcsError, World};

/// A transition to carry out on the scene manager
pub enum SceneCommand {
    /// Replace every scene with this one
    Load(Box<dyn Scene>),
    /// Pause the current scene and put this one on top
    Push(Box<dyn Scene>),
    /// Dispose the current scene and resume the one under it
    Pop,
    /// Reset the current scene
    Reset,
}

impl fmt::Debug for SceneCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SceneCommand::Load(scene) => write!(f, "Load({:?})", scene.id()),
            SceneCommand::Push(scene) => write!(f, "Push({:?})", scene.id()),
            SceneCommand::Pop => f.write_str("Pop"),
            SceneCommand::Reset => f.write_str("Reset"),
        }
    }
}

/// Queue of pending [`SceneCommand`]s, stored as a world resource
#[derive(Debug, Default)]
pub struct SceneRequests {
    pending: Vec<SceneCommand>,
}

impl SceneRequests {
    /// Resource key the queue is registered under
    pub const RESOURCE_KEY: &'static str = "scene_requests";

    /// Queue `command` in the world, registering the queue on first use
    pub fn submit(world: &mut World, command: SceneCommand) -> Result<(), EcsError> {
        if !world.has_resource(Self::RESOURCE_KEY) {
            world.add_resource(Self::RESOURCE_KEY, SceneRequests::default());
        }
        log::debug!("Scene request queued: {:?}", command);
        world.resource_mut::<SceneRequests>(Self::RESOURCE_KEY)?.pending.push(command);
        Ok(())
    }

    /// Drain the world's queue in submission order
    ///
    /// Empty when no queue is registered.
    pub fn take(world: &mut World) -> Vec<SceneCommand> {
        world
            .try_resource_mut::<SceneRequests>(Self::RESOURCE_KEY)
            .map(|requests| std::mem::take(&mut requests.pending))
            .unwrap_or_default()
    }

    /// Number of queued commands
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Whether nothing is queued
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
