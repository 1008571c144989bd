//! Scene management
//!
//! Scenes are named units of game state that own entities through a [`Tag`]
//! component. A [`SceneManager`] keeps the current scene and a stack of
//! paused ones; [`SceneLifecycleSystem`] drives deferred loads and unloads
//! from the frame loop.
//!
//! ## Lifecycle
//!
//! ```text
//! load_scene ──> Loading ──(driver: create + init)──> Active
//!                                                       │
//!                      push_scene: pause ───────────────┤
//!                      pop_scene:  dispose top, resume ─┤
//!                                                       │
//! load_scene ──> Unloading ──(driver: dispose)──> Loading ...
//! ```
//!
//! `push_scene` and `pop_scene` pause, resume and dispose immediately, so a
//! key press takes effect the same frame. Whole-scene swaps through
//! `load_scene` wait for the driver's next run.
//!
//! Code running inside a scene hook submits a [`SceneCommand`] to
//! [`SceneRequests`] instead of calling the manager directly.

mod base;
mod driver;
mod error;
mod hud;
mod manager;
mod requests;
mod state;
mod tag;
mod traits;

pub use base::SceneBase;
pub use driver::SceneLifecycleSystem;
pub use error::SceneError;
pub use hud::{HudContent, HudLayout, HudPanel, HudPanelKind, HudScene, PanelAnchor, HUD_LAYOUT_KEY};
pub use manager::{with_scene_manager, HookId, SceneManager};
pub use requests::{SceneCommand, SceneRequests};
pub use state::SceneState;
pub use tag::Tag;
pub use traits::Scene;

#[cfg(test)]
mod tests;
