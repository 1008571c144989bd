//! Demo scenes

use nalgebra::Vector2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use scene_engine::prelude::*;

use crate::components::{Asteroid, Label, Player, Transform, Velocity};
use crate::systems::{AsteroidDestroyed, ASTEROID_DESTROYED};

/// Title screen with a single label
pub struct TitleScene {
    base: SceneBase,
}

impl TitleScene {
    /// Scene id
    pub const ID: &'static str = "title";

    /// Create the title scene
    pub fn new() -> Self {
        Self { base: SceneBase::new(Self::ID) }
    }
}

impl Default for TitleScene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene for TitleScene {
    fn base(&self) -> &SceneBase {
        &self.base
    }

    fn init(&mut self, world: &mut World) -> Result<(), SceneError> {
        let title = self.base.create_entity(world);
        world.add(title, Label("ASTEROIDS - press start".to_string()))?;
        Ok(())
    }
}

/// Gameplay content of the asteroid field scene
pub struct AsteroidField {
    asteroid_count: usize,
    seed: u64,
    rng: StdRng,
    since_last_kill: f32,
}

impl AsteroidField {
    /// Scene id
    pub const ID: &'static str = "asteroid_field";

    /// Field with `asteroid_count` asteroids placed from `seed`
    pub fn new(asteroid_count: usize, seed: u64) -> Self {
        Self {
            asteroid_count,
            seed,
            rng: StdRng::seed_from_u64(seed),
            since_last_kill: 0.0,
        }
    }
}

impl HudContent for AsteroidField {
    fn instructions(&self) -> String {
        "Arrows: steer  Space: fire  Esc: pause  R: restart".to_string()
    }

    fn description(&self) -> String {
        format!("Clear {} asteroids", self.asteroid_count)
    }

    fn populate(&mut self, scene: &SceneBase, world: &mut World) -> Result<(), SceneError> {
        // Same layout after every restart
        self.rng = StdRng::seed_from_u64(self.seed);
        self.since_last_kill = 0.0;

        let ship = scene.create_entity(world);
        world.add(ship, Transform::at(0.0, 0.0))?;
        world.add(ship, Velocity { linear: Vector2::zeros(), angular: 0.0 })?;
        world.add(ship, Player::default())?;

        for _ in 0..self.asteroid_count {
            let asteroid = scene.create_entity(world);
            let position = Vector2::new(self.rng.gen_range(-90.0..90.0), self.rng.gen_range(-90.0..90.0));
            let heading = self.rng.gen_range(0.0..std::f32::consts::TAU);
            world.add(asteroid, Transform { position, rotation: heading })?;
            world.add(
                asteroid,
                Velocity {
                    linear: Vector2::new(heading.cos(), heading.sin()) * self.rng.gen_range(5.0..20.0),
                    angular: self.rng.gen_range(-1.0..1.0),
                },
            )?;
            world.add(asteroid, Asteroid { radius: self.rng.gen_range(2.0..8.0) })?;
        }
        log::info!("Spawned {} asteroids", self.asteroid_count);
        Ok(())
    }

    fn update(&mut self, scene: &SceneBase, world: &mut World, delta_time: f32) -> Result<(), SceneError> {
        // Stand-in for collisions: the ship downs one asteroid per second
        self.since_last_kill += delta_time;
        if self.since_last_kill < 1.0 {
            return Ok(());
        }
        self.since_last_kill = 0.0;

        let Some((target, radius)) = world
            .query::<(Asteroid, Tag)>()
            .iter()
            .find(|(_, (_, tag))| tag.is(scene.id()))
            .map(|(entity, (asteroid, _))| (entity, asteroid.radius))
        else {
            return Ok(());
        };

        world.destroy_entity(target);
        world.emit_event(ASTEROID_DESTROYED, AsteroidDestroyed { points: points_for(radius) });
        for (_, player) in world.query_mut::<Player>() {
            player.kills += 1;
        }
        Ok(())
    }
}

/// Smaller asteroids are worth more
fn points_for(radius: f32) -> u32 {
    if radius < 4.0 {
        100
    } else if radius < 6.0 {
        50
    } else {
        20
    }
}

/// The asteroid field with its HUD
pub fn asteroid_field(asteroid_count: usize, seed: u64) -> HudScene<AsteroidField> {
    HudScene::new(AsteroidField::ID, AsteroidField::new(asteroid_count, seed))
}

/// Overlay pushed over gameplay while paused
pub struct PauseOverlay {
    base: SceneBase,
}

impl PauseOverlay {
    /// Scene id
    pub const ID: &'static str = "pause_overlay";

    /// Create the overlay
    pub fn new() -> Self {
        Self { base: SceneBase::new(Self::ID) }
    }
}

impl Default for PauseOverlay {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene for PauseOverlay {
    fn base(&self) -> &SceneBase {
        &self.base
    }

    fn init(&mut self, world: &mut World) -> Result<(), SceneError> {
        let label = self.base.create_entity(world);
        world.add(label, Label("PAUSED".to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_reset_restores_layout() {
        let mut world = World::new();
        let mut field = asteroid_field(4, 7);
        field.init(&mut world).unwrap();
        let before: Vec<Vector2<f32>> = world
            .query::<(Transform, Asteroid)>()
            .iter()
            .map(|(_, (t, _))| t.position)
            .collect();

        for _ in 0..3 {
            field.update(&mut world, 1.0).unwrap();
        }
        assert_eq!(world.query::<(Asteroid,)>().count(), 1);
        assert_eq!(world.peek_events::<AsteroidDestroyed>(ASTEROID_DESTROYED).count(), 3);

        field.reset(&mut world).unwrap();
        let after: Vec<Vector2<f32>> = world
            .query::<(Transform, Asteroid)>()
            .iter()
            .map(|(_, (t, _))| t.position)
            .collect();
        assert_eq!(before, after);
        assert_eq!(world.query::<(HudPanel,)>().count(), 2);
        assert_eq!(world.query::<(Player,)>().count(), 1);
    }
}
