//! Stack-based scene manager
//!
//! The manager holds one current scene and a stack of paused scenes under it.
//! Structural calls (`load_scene`, `push_scene`, `pop_scene`) rearrange that
//! stack right away. Creating, initializing and disposing scenes that come
//! and go through `load_scene` is deferred to the lifecycle driver, which
//! calls [`SceneManager::advance`] once per frame.
//!
//! The manager lives in the world as the resource [`SceneManager::RESOURCE_KEY`];
//! [`with_scene_manager`] lifts it out so it can be used alongside the world.

use std::collections::VecDeque;
use std::fmt;

use super::{Scene, SceneCommand, SceneError, SceneRequests, SceneState};
use crate::config::SceneConfig;
use crate::ecs::{EcsError, World};

/// Handle returned when registering a load or unload hook
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HookId(u64);

type SceneHook = Box<dyn FnMut(&str)>;

/// A scene plus what the manager knows about its lifecycle
struct SceneSlot {
    scene: Box<dyn Scene>,
    /// `create` and `init` have been attempted
    activated: bool,
    /// `create` and `init` both succeeded, so the scene may `update`
    ready: bool,
    /// `pause` ran without a matching `resume`
    suspended: bool,
}

impl SceneSlot {
    fn pending(scene: Box<dyn Scene>) -> Self {
        Self {
            scene,
            activated: false,
            ready: false,
            suspended: false,
        }
    }
}

/// Owns the current scene, the paused stack and scenes awaiting disposal
pub struct SceneManager {
    config: SceneConfig,
    current: Option<SceneSlot>,
    paused: Vec<SceneSlot>,
    unloading: VecDeque<Box<dyn Scene>>,
    state_override: Option<SceneState>,
    load_hooks: Vec<(HookId, SceneHook)>,
    unload_hooks: Vec<(HookId, SceneHook)>,
    next_hook_id: u64,
}

impl SceneManager {
    /// Resource key the manager is registered under
    pub const RESOURCE_KEY: &'static str = "scene_manager";

    /// Create an empty manager with default configuration
    pub fn new() -> Self {
        Self::with_config(SceneConfig::default())
    }

    /// Create an empty manager
    pub fn with_config(config: SceneConfig) -> Self {
        Self {
            config,
            current: None,
            paused: Vec::new(),
            unloading: VecDeque::new(),
            state_override: None,
            load_hooks: Vec::new(),
            unload_hooks: Vec::new(),
            next_hook_id: 0,
        }
    }

    /// Active configuration
    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    // ------------------------------------------------------------------
    // Transitions
    // ------------------------------------------------------------------

    /// Replace the current scene and everything paused under it
    ///
    /// Scenes that were already initialized are queued for disposal, top of
    /// the stack first; a scene that never got initialized is dropped. The new
    /// scene is created and initialized by the next [`advance`](Self::advance).
    pub fn load_scene(&mut self, scene: Box<dyn Scene>) {
        self.state_override = None;
        if let Some(slot) = self.current.take() {
            self.retire(slot);
        }
        while let Some(slot) = self.paused.pop() {
            self.retire(slot);
        }

        self.log_transition(format_args!("Loading scene '{}'", scene.id()));
        self.current = Some(SceneSlot::pending(scene));
    }

    /// Pause the current scene and put `scene` on top of it
    ///
    /// Fails with [`SceneError::DuplicateSceneId`] when `unique_scene_ids` is
    /// set and a scene with the same id is current or paused.
    pub fn push_scene(&mut self, world: &mut World, scene: Box<dyn Scene>) -> Result<(), SceneError> {
        if self.config.unique_scene_ids && self.contains_scene(scene.id()) {
            return Err(SceneError::DuplicateSceneId(scene.id().to_string()));
        }
        self.state_override = None;

        if let Some(slot) = self.current.as_mut() {
            if slot.activated && !slot.suspended {
                slot.scene.pause(world)?;
                slot.suspended = true;
            }
        }
        if let Some(slot) = self.current.take() {
            self.log_transition(format_args!("Pausing scene '{}'", slot.scene.id()));
            self.paused.push(slot);
        }

        self.log_transition(format_args!("Pushing scene '{}'", scene.id()));
        self.current = Some(SceneSlot::pending(scene));
        Ok(())
    }

    /// Dispose the current scene and resume the one under it
    ///
    /// Does nothing when there is no current scene. A resumed scene that was
    /// never initialized is left for the driver to create and init. Popping
    /// the last scene also disposes anything still queued for unload, so the
    /// manager ends up [`SceneState::Unloaded`].
    pub fn pop_scene(&mut self, world: &mut World) -> Result<(), SceneError> {
        let Some(mut slot) = self.current.take() else {
            log::debug!("pop_scene with no current scene");
            return Ok(());
        };
        self.state_override = None;

        let mut outcome = Ok(());
        if slot.activated {
            outcome = slot.scene.dispose(world);
            if outcome.is_ok() {
                self.notify_unload(slot.scene.id());
            }
        }
        self.log_transition(format_args!("Popped scene '{}'", slot.scene.id()));

        if let Some(mut next) = self.paused.pop() {
            if next.suspended {
                let resumed = next.scene.resume(world);
                next.suspended = false;
                outcome = outcome.and(resumed);
            }
            self.log_transition(format_args!("Resuming scene '{}'", next.scene.id()));
            self.current = Some(next);
        } else {
            outcome = outcome.and(self.dispose_retired(world));
        }
        outcome
    }

    /// Reset the current scene; ignored unless the state is [`SceneState::Active`]
    ///
    /// Returns whether a reset happened.
    pub fn reset_current_scene(&mut self, world: &mut World) -> Result<bool, SceneError> {
        if self.state() != SceneState::Active {
            log::debug!("Ignoring reset while {}", self.state());
            return Ok(false);
        }
        if let Some(id) = self.current_scene_id() {
            self.log_transition(format_args!("Resetting scene '{}'", id));
        }
        let Some(slot) = self.current.as_mut() else {
            return Ok(false);
        };
        slot.scene.reset(world)?;
        Ok(true)
    }

    /// Pause the current scene in place; it stops receiving `update`
    ///
    /// Only acts while [`SceneState::Active`]. Returns whether it paused.
    pub fn pause_current(&mut self, world: &mut World) -> Result<bool, SceneError> {
        if self.state() != SceneState::Active {
            return Ok(false);
        }
        let Some(slot) = self.current.as_mut() else {
            return Ok(false);
        };
        slot.scene.pause(world)?;
        slot.suspended = true;
        Ok(true)
    }

    /// Resume a scene paused with [`pause_current`](Self::pause_current)
    pub fn resume_current(&mut self, world: &mut World) -> Result<bool, SceneError> {
        if self.state() != SceneState::Paused {
            return Ok(false);
        }
        let Some(slot) = self.current.as_mut() else {
            return Ok(false);
        };
        slot.scene.resume(world)?;
        slot.suspended = false;
        Ok(true)
    }

    /// Dispose every scene the manager holds, current first
    pub fn shutdown(&mut self, world: &mut World) -> Result<(), SceneError> {
        self.state_override = None;
        if let Some(slot) = self.current.take() {
            self.retire(slot);
        }
        while let Some(slot) = self.paused.pop() {
            self.retire(slot);
        }
        self.dispose_retired(world)
    }

    // ------------------------------------------------------------------
    // Driver
    // ------------------------------------------------------------------

    /// Run one frame of the scene lifecycle
    ///
    /// Applies queued [`SceneRequests`], disposes scenes queued by
    /// `load_scene`, creates and initializes a pending current scene, then
    /// forwards `update` if the state is [`SceneState::Active`]. Requests made
    /// during that `update` are applied before returning. With nothing pending
    /// and no current scene this does nothing.
    ///
    /// `create` and `init` are attempted once per scene. If either fails the
    /// scene never receives `update`, but it still counts as initialized so
    /// its later disposal cleans up whatever it spawned.
    pub fn advance(&mut self, world: &mut World, delta_time: f32) -> Result<(), SceneError> {
        self.apply_requests(world)?;
        self.dispose_retired(world)?;

        let mut activated = None;
        if let Some(slot) = self.current.as_mut().filter(|slot| !slot.activated) {
            slot.activated = true;
            slot.scene.create()?;
            slot.scene.init(world)?;
            slot.ready = true;
            activated = Some(slot.scene.id().to_string());
        }
        if let Some(id) = activated {
            self.log_transition(format_args!("Scene '{}' is active", id));
            self.notify_load(&id);
        }

        if self.state() == SceneState::Active {
            if let Some(slot) = self.current.as_mut().filter(|slot| slot.ready) {
                slot.scene.update(world, delta_time)?;
            }
        }
        self.apply_requests(world)
    }

    /// Carry out transitions queued in the world's [`SceneRequests`]
    pub fn apply_requests(&mut self, world: &mut World) -> Result<(), SceneError> {
        for command in SceneRequests::take(world) {
            match command {
                SceneCommand::Load(scene) => self.load_scene(scene),
                SceneCommand::Push(scene) => self.push_scene(world, scene)?,
                SceneCommand::Pop => self.pop_scene(world)?,
                SceneCommand::Reset => {
                    self.reset_current_scene(world)?;
                }
            }
        }
        Ok(())
    }

    fn retire(&mut self, slot: SceneSlot) {
        if slot.activated {
            self.log_transition(format_args!("Unloading scene '{}'", slot.scene.id()));
            self.unloading.push_back(slot.scene);
        } else {
            log::debug!("Dropping scene '{}' before it was initialized", slot.scene.id());
        }
    }

    fn dispose_retired(&mut self, world: &mut World) -> Result<(), SceneError> {
        while let Some(mut scene) = self.unloading.pop_front() {
            scene.dispose(world)?;
            self.log_transition(format_args!("Scene '{}' unloaded", scene.id()));
            self.notify_unload(scene.id());
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Hooks
    // ------------------------------------------------------------------

    /// Call `hook` with the scene id whenever a scene finishes loading
    pub fn on_scene_load(&mut self, hook: impl FnMut(&str) + 'static) -> HookId {
        let id = self.next_hook_id();
        self.load_hooks.push((id, Box::new(hook)));
        id
    }

    /// Call `hook` with the scene id whenever a scene finishes unloading
    pub fn on_scene_unload(&mut self, hook: impl FnMut(&str) + 'static) -> HookId {
        let id = self.next_hook_id();
        self.unload_hooks.push((id, Box::new(hook)));
        id
    }

    /// Unregister a load or unload hook; returns whether it was registered
    pub fn remove_hook(&mut self, id: HookId) -> bool {
        let before = self.load_hooks.len() + self.unload_hooks.len();
        self.load_hooks.retain(|(hook_id, _)| *hook_id != id);
        self.unload_hooks.retain(|(hook_id, _)| *hook_id != id);
        before != self.load_hooks.len() + self.unload_hooks.len()
    }

    fn next_hook_id(&mut self) -> HookId {
        self.next_hook_id += 1;
        HookId(self.next_hook_id)
    }

    fn notify_load(&mut self, scene_id: &str) {
        for (_, hook) in &mut self.load_hooks {
            hook(scene_id);
        }
    }

    fn notify_unload(&mut self, scene_id: &str) {
        for (_, hook) in &mut self.unload_hooks {
            hook(scene_id);
        }
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// Current lifecycle state
    ///
    /// Derived from the stack unless [`override_state`](Self::override_state)
    /// is in effect.
    pub fn state(&self) -> SceneState {
        if let Some(state) = self.state_override {
            return state;
        }
        match &self.current {
            None => SceneState::Unloaded,
            Some(_) if !self.unloading.is_empty() => SceneState::Unloading,
            Some(slot) if !slot.activated => SceneState::Loading,
            Some(slot) if slot.suspended => SceneState::Paused,
            Some(_) => SceneState::Active,
        }
    }

    /// Force the reported state until the next transition
    ///
    /// Debugging aid: the override gates `reset`, pause and update forwarding
    /// exactly like a real state would.
    pub fn override_state(&mut self, state: SceneState) {
        log::warn!("Scene state overridden to {}", state);
        self.state_override = Some(state);
    }

    /// Drop a state override
    pub fn clear_state_override(&mut self) {
        self.state_override = None;
    }

    /// The current scene, if any
    pub fn current_scene(&self) -> Option<&dyn Scene> {
        self.current.as_ref().map(|slot| slot.scene.as_ref())
    }

    /// Id of the current scene, if any
    pub fn current_scene_id(&self) -> Option<&str> {
        self.current.as_ref().map(|slot| slot.scene.id())
    }

    /// Number of paused scenes under the current one
    pub fn scene_stack_depth(&self) -> usize {
        self.paused.len()
    }

    /// Paused scenes plus the current scene
    pub fn total_scene_count(&self) -> usize {
        self.paused.len() + usize::from(self.current.is_some())
    }

    /// Paused scenes, oldest first
    pub fn scene_stack(&self) -> Vec<&dyn Scene> {
        self.paused.iter().map(|slot| slot.scene.as_ref()).collect()
    }

    /// Ids of the paused scenes, oldest first
    pub fn scene_stack_ids(&self) -> Vec<&str> {
        self.paused.iter().map(|slot| slot.scene.id()).collect()
    }

    /// Whether the scene `id` is paused, on the stack or in place
    pub fn is_scene_paused(&self, id: &str) -> bool {
        self.paused.iter().any(|slot| slot.scene.id() == id)
            || self.current.as_ref().is_some_and(|slot| slot.suspended && slot.scene.id() == id)
    }

    /// Whether a scene with this id is current or paused
    pub fn contains_scene(&self, id: &str) -> bool {
        self.current_scene_id() == Some(id) || self.paused.iter().any(|slot| slot.scene.id() == id)
    }

    /// Scenes waiting for the driver to dispose them
    pub fn pending_unload_count(&self) -> usize {
        self.unloading.len()
    }

    fn log_transition(&self, args: fmt::Arguments<'_>) {
        let level = if self.config.log_transitions {
            log::Level::Info
        } else {
            log::Level::Debug
        };
        log::log!(level, "{}", args);
    }
}

impl Default for SceneManager {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SceneManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SceneManager")
            .field("state", &self.state())
            .field("current", &self.current_scene_id())
            .field("stack", &self.scene_stack_ids())
            .field("pending_unload", &self.unloading.len())
            .finish()
    }
}

/// Run `f` with the world's scene manager lifted out of the resources
///
/// Fails with [`EcsError::ResourceNotFound`] when no manager is registered,
/// which includes calls from inside scene hooks while the driver holds it.
/// Scenes ask for transitions through [`SceneRequests`] instead.
pub fn with_scene_manager<R>(
    world: &mut World,
    f: impl FnOnce(&mut SceneManager, &mut World) -> R,
) -> Result<R, EcsError> {
    world.resource_scope(SceneManager::RESOURCE_KEY, |world, manager: &mut SceneManager| {
        f(manager, world)
    })
}
