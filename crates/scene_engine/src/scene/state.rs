//! Scene manager state

use std::fmt;

/// Lifecycle state of a [`SceneManager`](super::SceneManager)
///
/// ```text
/// Unloaded -> Loading -> Active -> Paused
///                          |
///                          +----> Unloading -> Unloaded
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SceneState {
    /// No current scene and nothing paused
    #[default]
    Unloaded,
    /// The current scene is waiting for the driver to create and init it
    Loading,
    /// The current scene is live and receives `update`
    Active,
    /// The current scene was paused in place and receives no `update`
    Paused,
    /// Retired scenes are waiting for the driver to dispose them
    Unloading,
}

impl fmt::Display for SceneState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Unloaded => "unloaded",
            Self::Loading => "loading",
            Self::Active => "active",
            Self::Paused => "paused",
            Self::Unloading => "unloading",
        };
        f.write_str(name)
    }
}
