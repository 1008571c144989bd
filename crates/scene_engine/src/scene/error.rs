//! Scene error types

use thiserror::Error;

use crate::ecs::EcsError;

/// Errors raised by scenes and the scene manager
#[derive(Error, Debug)]
pub enum SceneError {
    /// A store operation failed inside a scene hook
    #[error(transparent)]
    Ecs(#[from] EcsError),

    /// A scene hook reported a failure of its own
    #[error("scene '{scene}' failed in {hook}: {message}")]
    Hook {
        /// Scene id
        scene: String,
        /// Lifecycle hook that failed
        hook: &'static str,
        /// What went wrong
        message: String,
    },

    /// A scene with this id is already current or paused
    #[error("scene '{0}' is already current or paused")]
    DuplicateSceneId(String),
}

impl SceneError {
    /// Build a [`SceneError::Hook`]
    pub fn hook(scene: impl Into<String>, hook: &'static str, message: impl Into<String>) -> Self {
        Self::Hook {
            scene: scene.into(),
            hook,
            message: message.into(),
        }
    }
}
