//! Game-specific components

use nalgebra::Vector2;
use scene_engine::prelude::*;

/// Position and heading in the playfield
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    /// Position in playfield units
    pub position: Vector2<f32>,

    /// Heading in radians
    pub rotation: f32,
}

impl Component for Transform {}

impl Transform {
    /// Transform at `position` facing +x
    pub fn at(x: f32, y: f32) -> Self {
        Self {
            position: Vector2::new(x, y),
            rotation: 0.0,
        }
    }
}

/// Linear and angular velocity
#[derive(Debug, Clone, PartialEq)]
pub struct Velocity {
    /// Units per second
    pub linear: Vector2<f32>,

    /// Radians per second
    pub angular: f32,
}

impl Component for Velocity {}

/// Player ship
#[derive(Debug, Clone, Default)]
pub struct Player {
    /// Asteroids destroyed this round
    pub kills: u32,
}

impl Component for Player {}

/// Asteroid with a collision radius
#[derive(Debug, Clone)]
pub struct Asteroid {
    /// Collision radius
    pub radius: f32,
}

impl Component for Asteroid {}

/// Static text shown by non-HUD scenes
#[derive(Debug, Clone)]
pub struct Label(pub String);

impl Component for Label {}
