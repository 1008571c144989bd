//! # Scene Engine
//!
//! An entity-component-system world with a stack-based scene layer on top.
//!
//! ## Features
//!
//! - **ECS Architecture**: per-type component storage, tuple queries, named
//!   resources, named event queues and ordered systems
//! - **Scenes**: tag-based entity ownership, HUD scenes, a push/pop scene
//!   stack and a per-frame lifecycle driver
//! - **Configuration**: TOML or RON engine settings
//!
//! ## Quick Start
//!
//! ```rust
//! use scene_engine::prelude::*;
//!
//! struct Title {
//!     base: SceneBase,
//! }
//!
//! impl Scene for Title {
//!     fn base(&self) -> &SceneBase {
//!         &self.base
//!     }
//!
//!     fn init(&mut self, world: &mut World) -> Result<(), SceneError> {
//!         self.base.create_entity(world);
//!         Ok(())
//!     }
//! }
//!
//! fn main() -> Result<(), EngineError> {
//!     let mut engine = Engine::new(EngineConfig::default())?;
//!     engine.with_scenes(|scenes, _| {
//!         scenes.load_scene(Box::new(Title { base: SceneBase::new("title") }))
//!     })?;
//!     engine.run_frames(2, 1.0 / 60.0)?;
//!
//!     assert_eq!(engine.scenes()?.state(), SceneState::Active);
//!     assert_eq!(engine.world().entity_count(), 1);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod foundation;
pub mod config;
pub mod ecs;
pub mod scene;

mod application;
mod engine;

pub use application::{Application, AppError};
pub use engine::{Engine, EngineError};

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        Application, AppError,
        Engine, EngineError,
        config::{Config, ConfigError, EngineConfig, SceneConfig, WorldConfig},
        foundation::time::FrameTimer,
        ecs::{Component, EcsError, Entity, Query, System, SystemError, World},
        scene::{
            HudContent, HudLayout, HudPanel, HudScene, Scene, SceneBase, SceneCommand, SceneError,
            SceneLifecycleSystem, SceneManager, SceneRequests, SceneState, Tag,
        },
    };
}
