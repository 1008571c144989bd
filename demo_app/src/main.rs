//! Headless scene stack demo
//!
//! Plays a scripted session with no window: title screen, asteroid field,
//! pause overlay pushed and popped, a restart, then back to the title.
//!
//! Usage: `demo_app [config.toml|config.ron]`

mod components;
mod scenes;
mod systems;

use scene_engine::foundation::logging;
use scene_engine::prelude::*;
use thiserror::Error;

use components::{Label, Player};
use scenes::{asteroid_field, PauseOverlay, TitleScene};
use systems::{movement_system, scoring_system, Playfield, PLAYFIELD_KEY, SCORE_KEY};

const ASTEROID_COUNT: usize = 12;
const FIELD_SEED: u64 = 0x5eed;

/// Simulated key presses, by frame number
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Input {
    Start,
    Pause,
    Unpause,
    Restart,
    Quit,
    Exit,
}

const SCRIPT: &[(u64, Input)] = &[
    (30, Input::Start),
    (150, Input::Pause),
    (180, Input::Unpause),
    (240, Input::Restart),
    (400, Input::Quit),
    (420, Input::Exit),
];

#[derive(Error, Debug)]
enum DemoError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Engine(#[from] EngineError),
}

struct DemoApp {
    frame: u64,
}

impl DemoApp {
    fn handle(&mut self, engine: &mut Engine, input: Input) -> Result<(), AppError> {
        log::info!("Frame {}: {:?}", self.frame, input);
        match input {
            Input::Start => engine.with_scenes(|scenes, _| {
                scenes.load_scene(Box::new(asteroid_field(ASTEROID_COUNT, FIELD_SEED)));
            })?,
            Input::Pause => engine
                .with_scenes(|scenes, world| scenes.push_scene(world, Box::new(PauseOverlay::new())))??,
            Input::Unpause => engine.with_scenes(|scenes, world| scenes.pop_scene(world))??,
            Input::Restart => {
                let reset = engine.with_scenes(|scenes, world| scenes.reset_current_scene(world))??;
                if reset {
                    *engine.world_mut().resource_mut::<u32>(SCORE_KEY).map_err(EngineError::from)? = 0;
                }
            }
            Input::Quit => engine.with_scenes(|scenes, _| scenes.load_scene(Box::new(TitleScene::new())))?,
            Input::Exit => engine.quit(),
        }
        Ok(())
    }
}

impl Application for DemoApp {
    fn initialize(&mut self, engine: &mut Engine) -> Result<(), AppError> {
        let world = engine.world_mut();
        world.add_resource(PLAYFIELD_KEY, Playfield::default());
        world.add_resource(SCORE_KEY, 0_u32);
        world.add_system(movement_system);
        world.add_system(scoring_system);

        engine.with_scenes(|scenes, _| {
            scenes.on_scene_load(|id| log::info!("Loaded scene '{}'", id));
            scenes.on_scene_unload(|id| log::info!("Unloaded scene '{}'", id));
            scenes.load_scene(Box::new(TitleScene::new()));
        })?;
        Ok(())
    }

    fn update(&mut self, engine: &mut Engine, _delta_time: f32) -> Result<(), AppError> {
        self.frame += 1;
        let now = self.frame;
        for &(_, input) in SCRIPT.iter().filter(|(frame, _)| *frame == now) {
            self.handle(engine, input)?;
        }
        Ok(())
    }

    fn cleanup(&mut self, engine: &mut Engine) {
        let world = engine.world();
        let score = world.resource::<u32>(SCORE_KEY).copied().unwrap_or_default();
        let kills: u32 = world.query::<(Player,)>().iter().map(|(_, (player,))| player.kills).sum();
        for (_, (label,)) in world.query::<(Label,)>() {
            log::debug!("On screen: {}", label.0);
        }
        log::info!(
            "Session over after {} frames ({:.1} fps): score {}, {} kills this round, {} entities alive",
            self.frame,
            engine.timer().average_fps(),
            score,
            kills,
            world.entity_count()
        );
    }
}

fn load_config() -> Result<EngineConfig, DemoError> {
    match std::env::args().nth(1) {
        Some(path) => Ok(EngineConfig::load_from_file(path)?),
        None => Ok(EngineConfig::default()),
    }
}

fn main() -> Result<(), DemoError> {
    let config = load_config()?;
    logging::init_with_level(&config.log_level);

    let mut app = DemoApp { frame: 0 };
    Engine::run(config, &mut app)?;
    Ok(())
}
