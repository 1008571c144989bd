//! Gameplay systems

use scene_engine::prelude::*;

use crate::components::{Transform, Velocity};

/// Resource key of the playfield bounds
pub const PLAYFIELD_KEY: &str = "playfield";

/// Event emitted when an asteroid is destroyed
pub const ASTEROID_DESTROYED: &str = "asteroid_destroyed";

/// Resource key of the running score
pub const SCORE_KEY: &str = "score";

/// Square playfield; entities leaving one edge re-enter on the other
#[derive(Debug, Clone, Copy)]
pub struct Playfield {
    /// Half the side length
    pub half_extent: f32,
}

impl Default for Playfield {
    fn default() -> Self {
        Self { half_extent: 100.0 }
    }
}

/// Payload of [`ASTEROID_DESTROYED`]
#[derive(Debug, Clone, Copy)]
pub struct AsteroidDestroyed {
    /// Points awarded
    pub points: u32,
}

/// Integrate velocities and wrap positions around the playfield
pub fn movement_system(world: &mut World, delta_time: f32) -> Result<(), SystemError> {
    let half_extent = match world.try_resource::<Playfield>(PLAYFIELD_KEY) {
        Some(playfield) => playfield.half_extent,
        None => Playfield::default().half_extent,
    };

    let moving: Vec<(Entity, Velocity)> = world
        .query::<(Velocity, Transform)>()
        .iter()
        .map(|(entity, (velocity, _))| (entity, velocity.clone()))
        .collect();

    for (entity, velocity) in moving {
        if let Some(transform) = world.get_mut::<Transform>(entity) {
            transform.position += velocity.linear * delta_time;
            transform.rotation += velocity.angular * delta_time;
            transform.position.x = wrap(transform.position.x, half_extent);
            transform.position.y = wrap(transform.position.y, half_extent);
        }
    }
    Ok(())
}

/// Fold destroyed-asteroid events into the score resource
pub fn scoring_system(world: &mut World, _delta_time: f32) -> Result<(), SystemError> {
    let earned: u32 = world
        .drain_events::<AsteroidDestroyed>(ASTEROID_DESTROYED)
        .iter()
        .map(|event| event.points)
        .sum();
    if earned > 0 {
        *world.resource_mut::<u32>(SCORE_KEY)? += earned;
    }
    Ok(())
}

fn wrap(value: f32, half_extent: f32) -> f32 {
    let span = half_extent * 2.0;
    (value + half_extent).rem_euclid(span) - half_extent
}
