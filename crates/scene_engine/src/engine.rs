//! Core engine implementation

use thiserror::Error;

use crate::{
    application::{AppError, Application},
    config::{ConfigError, EngineConfig},
    ecs::{EcsError, SystemError, World},
    foundation::time::FrameTimer,
    scene::{with_scene_manager, SceneError, SceneLifecycleSystem, SceneManager},
};

/// Main engine struct
///
/// The engine owns one [`World`] with a [`SceneManager`] installed as a
/// resource and the [`SceneLifecycleSystem`] registered as its first system,
/// so scene transitions settle before any gameplay system runs.
pub struct Engine {
    world: World,

    /// Frame timing
    timer: FrameTimer,

    config: EngineConfig,

    /// Whether the engine should continue running
    running: bool,
}

impl Engine {
    /// Create a new engine instance
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        config.validate()?;
        log::info!("Initializing engine...");

        let mut world = World::with_config(config.world.clone());
        world.add_resource(
            SceneManager::RESOURCE_KEY,
            SceneManager::with_config(config.scenes.clone()),
        );
        world.add_system(SceneLifecycleSystem::new());

        Ok(Self {
            world,
            timer: FrameTimer::new(config.max_frame_delta),
            config,
            running: true,
        })
    }

    /// Run the engine main loop with the given application
    ///
    /// Loops until the application or a system calls [`Engine::quit`], then
    /// lets the application clean up and disposes every scene.
    pub fn run<T: Application>(config: EngineConfig, app: &mut T) -> Result<(), EngineError> {
        let mut engine = Self::new(config)?;

        app.initialize(&mut engine)
            .map_err(|e| EngineError::application("initialization", &e))?;

        log::info!("Starting main loop...");

        while engine.running {
            let delta_time = engine.timer.tick();

            app.update(&mut engine, delta_time)
                .map_err(|e| EngineError::application("update", &e))?;
            if !engine.running {
                break;
            }
            engine.frame(delta_time)?;
        }

        app.cleanup(&mut engine);
        engine.shutdown()?;

        log::info!("Engine shutdown complete");
        Ok(())
    }

    /// Run every system once with `delta_time`
    pub fn frame(&mut self, delta_time: f32) -> Result<(), EngineError> {
        self.world.update_systems(delta_time)?;
        Ok(())
    }

    /// Measure the time since the last tick and run one frame with it
    pub fn tick(&mut self) -> Result<f32, EngineError> {
        let delta_time = self.timer.tick();
        self.frame(delta_time)?;
        Ok(delta_time)
    }

    /// Run `frames` frames with a fixed step, stopping early on error or quit
    pub fn run_frames(&mut self, frames: usize, delta_time: f32) -> Result<(), EngineError> {
        for _ in 0..frames {
            if !self.running {
                break;
            }
            self.timer.advance(delta_time);
            self.frame(delta_time)?;
        }
        Ok(())
    }

    /// Use the scene manager alongside the world
    pub fn with_scenes<R>(
        &mut self,
        f: impl FnOnce(&mut SceneManager, &mut World) -> R,
    ) -> Result<R, EngineError> {
        Ok(with_scene_manager(&mut self.world, f)?)
    }

    /// The scene manager
    pub fn scenes(&self) -> Result<&SceneManager, EngineError> {
        Ok(self.world.resource::<SceneManager>(SceneManager::RESOURCE_KEY)?)
    }

    /// Request engine shutdown
    pub fn quit(&mut self) {
        log::info!("Engine shutdown requested");
        self.running = false;
    }

    /// Whether the main loop should keep going
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Dispose every scene and stop the loop
    pub fn shutdown(&mut self) -> Result<(), EngineError> {
        self.running = false;
        self.with_scenes(|scenes, world| scenes.shutdown(world))??;
        Ok(())
    }

    /// Get the ECS world
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Get mutable access to the ECS world
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Frame timer
    pub fn timer(&self) -> &FrameTimer {
        &self.timer
    }

    /// Active configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}

/// Engine-level errors
#[derive(Error, Debug)]
pub enum EngineError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A system failed during a frame
    #[error("System error: {0}")]
    System(#[from] SystemError),

    /// A scene hook failed outside the frame loop
    #[error("Scene error: {0}")]
    Scene(#[from] SceneError),

    /// Store access failed (e.g. the scene manager resource is missing)
    #[error("World error: {0}")]
    Ecs(#[from] EcsError),

    /// Application error
    #[error("Application {phase} failed: {message}")]
    Application {
        /// Lifecycle phase that failed
        phase: &'static str,
        /// Rendered application error
        message: String,
    },
}

impl EngineError {
    fn application(phase: &'static str, error: &AppError) -> Self {
        Self::Application {
            phase,
            message: error.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::Component;
    use crate::scene::{Scene, SceneBase, SceneState};

    struct Ticker {
        base: SceneBase,
    }

    struct Ticks(u32);
    impl Component for Ticks {}

    impl Scene for Ticker {
        fn base(&self) -> &SceneBase {
            &self.base
        }

        fn init(&mut self, world: &mut World) -> Result<(), SceneError> {
            let e = self.base.create_entity(world);
            world.add(e, Ticks(0))?;
            Ok(())
        }

        fn update(&mut self, world: &mut World, _delta_time: f32) -> Result<(), SceneError> {
            for (_, ticks) in world.query_mut::<Ticks>() {
                ticks.0 += 1;
            }
            Ok(())
        }
    }

    fn ticker() -> Box<dyn Scene> {
        Box::new(Ticker { base: SceneBase::new("ticker") })
    }

    #[test]
    fn test_new_installs_scene_manager() {
        let engine = Engine::new(EngineConfig::default()).unwrap();
        assert_eq!(engine.world().system_count(), 1);
        assert_eq!(engine.scenes().unwrap().state(), SceneState::Unloaded);
        assert!(engine.is_running());
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = EngineConfig::default().with_max_frame_delta(-1.0);
        assert!(matches!(Engine::new(config), Err(EngineError::Config(_))));
    }

    #[test]
    fn test_scene_updates_after_gameplay_setup() {
        let mut engine = Engine::new(EngineConfig::default()).unwrap();
        engine.with_scenes(|scenes, _| scenes.load_scene(ticker())).unwrap();
        engine.run_frames(3, 1.0 / 60.0).unwrap();

        let ticks: Vec<u32> = engine.world().query::<(Ticks,)>().iter().map(|(_, (t,))| t.0).collect();
        assert_eq!(ticks, vec![3]);
        assert_eq!(engine.timer().frame_count(), 3);
    }

    #[test]
    fn test_shutdown_disposes_scenes() {
        let mut engine = Engine::new(EngineConfig::default()).unwrap();
        engine.with_scenes(|scenes, _| scenes.load_scene(ticker())).unwrap();
        engine.frame(0.016).unwrap();
        assert_eq!(engine.world().entity_count(), 1);

        engine.shutdown().unwrap();
        assert_eq!(engine.world().entity_count(), 0);
        assert!(!engine.is_running());
        engine.run_frames(5, 0.016).unwrap();
        assert_eq!(engine.timer().frame_count(), 0);
    }

    #[test]
    fn test_run_stops_on_quit() {
        struct ThreeFrames {
            frames: u32,
            cleaned: bool,
        }

        impl Application for ThreeFrames {
            fn initialize(&mut self, engine: &mut Engine) -> Result<(), AppError> {
                engine.with_scenes(|scenes, _| scenes.load_scene(ticker()))?;
                Ok(())
            }

            fn update(&mut self, engine: &mut Engine, _delta_time: f32) -> Result<(), AppError> {
                self.frames += 1;
                if self.frames > 3 {
                    engine.quit();
                }
                Ok(())
            }

            fn cleanup(&mut self, engine: &mut Engine) {
                self.cleaned = engine.world().entity_count() == 1;
            }
        }

        let mut app = ThreeFrames { frames: 0, cleaned: false };
        Engine::run(EngineConfig::default(), &mut app).unwrap();
        assert_eq!(app.frames, 4);
        assert!(app.cleaned);
    }

    #[test]
    fn test_application_error_is_wrapped() {
        struct Broken;

        impl Application for Broken {
            fn initialize(&mut self, _engine: &mut Engine) -> Result<(), AppError> {
                Err(AppError::Custom("no save file".to_string()))
            }

            fn update(&mut self, _engine: &mut Engine, _delta_time: f32) -> Result<(), AppError> {
                Ok(())
            }
        }

        let err = Engine::run(EngineConfig::default(), &mut Broken).unwrap_err();
        assert!(matches!(err, EngineError::Application { phase: "initialization", .. }));
    }
}
