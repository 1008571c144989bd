//! Scenes with an on-screen HUD
//!
//! A [`HudScene`] owns two panel entities, one for instructions and one for
//! a description of the scene. Everything else in the scene comes from its
//! [`HudContent`]. Resetting the scene rebuilds the content but keeps the
//! panels, so the HUD does not flicker or lose its place.

use super::{Scene, SceneBase, SceneError};
use crate::ecs::{Component, Entity, World};

/// Resource key of the shared [`HudLayout`]
pub const HUD_LAYOUT_KEY: &str = "hud_layout";

/// Which HUD panel an entity represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HudPanelKind {
    /// How to play or navigate
    Instructions,
    /// What this scene is about
    Description,
}

/// Screen corner a panel is pinned to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PanelAnchor {
    /// Top left corner
    TopLeft,
    /// Top right corner
    TopRight,
    /// Bottom left corner
    BottomLeft,
    /// Bottom right corner
    BottomRight,
}

/// Text panel component
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HudPanel {
    /// Panel role
    pub kind: HudPanelKind,
    /// Displayed text
    pub text: String,
    /// Placement on screen
    pub anchor: PanelAnchor,
}

impl Component for HudPanel {}

/// Panel placement shared by every HUD scene
///
/// Optional: register it under [`HUD_LAYOUT_KEY`] to move the panels. Scenes
/// fall back to the default layout when it is absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HudLayout {
    /// Anchor of the instructions panel
    pub instructions: PanelAnchor,
    /// Anchor of the description panel
    pub description: PanelAnchor,
}

impl Default for HudLayout {
    fn default() -> Self {
        Self {
            instructions: PanelAnchor::TopLeft,
            description: PanelAnchor::BottomLeft,
        }
    }
}

/// Scene-specific part of a [`HudScene`]
pub trait HudContent {
    /// Text of the instructions panel
    fn instructions(&self) -> String;

    /// Text of the description panel
    fn description(&self) -> String;

    /// Prepare state that does not touch the world
    fn create(&mut self) -> Result<(), SceneError> {
        Ok(())
    }

    /// Spawn the scene's own entities; runs on init and after every reset
    fn populate(&mut self, scene: &SceneBase, world: &mut World) -> Result<(), SceneError>;

    /// Another scene was pushed on top; the panels stay spawned
    fn pause(&mut self, _scene: &SceneBase, _world: &mut World) -> Result<(), SceneError> {
        Ok(())
    }

    /// The scene on top was popped
    fn resume(&mut self, _scene: &SceneBase, _world: &mut World) -> Result<(), SceneError> {
        Ok(())
    }

    /// Per-frame logic
    fn update(&mut self, _scene: &SceneBase, _world: &mut World, _delta_time: f32) -> Result<(), SceneError> {
        Ok(())
    }
}

/// A scene with a persistent instructions/description HUD
pub struct HudScene<C: HudContent> {
    base: SceneBase,
    content: C,
    panels: Option<[Entity; 2]>,
}

impl<C: HudContent> HudScene<C> {
    /// Create a HUD scene named `id`
    pub fn new(id: impl Into<String>, content: C) -> Self {
        Self {
            base: SceneBase::new(id),
            content,
            panels: None,
        }
    }

    /// Scene-specific content
    pub fn content(&self) -> &C {
        &self.content
    }

    /// Scene-specific content, mutably
    pub fn content_mut(&mut self) -> &mut C {
        &mut self.content
    }

    /// Instructions and description panel entities, once initialized
    pub fn panels(&self) -> Option<[Entity; 2]> {
        self.panels
    }

    fn spawn_panels(&mut self, world: &mut World) -> Result<(), SceneError> {
        let layout = match world.try_resource::<HudLayout>(HUD_LAYOUT_KEY) {
            Some(layout) => *layout,
            None => {
                log::warn!(
                    "No '{}' resource; scene '{}' uses the default HUD layout",
                    HUD_LAYOUT_KEY,
                    self.base.id()
                );
                HudLayout::default()
            }
        };

        let instructions = self.base.create_entity(world);
        world.add(
            instructions,
            HudPanel {
                kind: HudPanelKind::Instructions,
                text: self.content.instructions(),
                anchor: layout.instructions,
            },
        )?;
        let description = self.base.create_entity(world);
        world.add(
            description,
            HudPanel {
                kind: HudPanelKind::Description,
                text: self.content.description(),
                anchor: layout.description,
            },
        )?;

        self.panels = Some([instructions, description]);
        Ok(())
    }
}

impl<C: HudContent> Scene for HudScene<C> {
    fn base(&self) -> &SceneBase {
        &self.base
    }

    fn create(&mut self) -> Result<(), SceneError> {
        self.content.create()
    }

    fn init(&mut self, world: &mut World) -> Result<(), SceneError> {
        self.spawn_panels(world)?;
        self.content.populate(&self.base, world)
    }

    fn pause(&mut self, world: &mut World) -> Result<(), SceneError> {
        self.content.pause(&self.base, world)
    }

    fn resume(&mut self, world: &mut World) -> Result<(), SceneError> {
        self.content.resume(&self.base, world)
    }

    fn reset(&mut self, world: &mut World) -> Result<(), SceneError> {
        let keep: Vec<Entity> = self
            .panels
            .into_iter()
            .flatten()
            .filter(|&panel| world.entity_exists(panel))
            .collect();
        self.base.cleanup_except(world, &keep);

        if keep.len() != 2 {
            // Panels were never spawned or someone destroyed one
            for panel in keep {
                world.destroy_entity(panel);
            }
            self.spawn_panels(world)?;
        }
        self.content.populate(&self.base, world)
    }

    fn update(&mut self, world: &mut World, delta_time: f32) -> Result<(), SceneError> {
        self.content.update(&self.base, world, delta_time)
    }

    fn dispose(&mut self, world: &mut World) -> Result<(), SceneError> {
        self.base.cleanup(world);
        self.panels = None;
        Ok(())
    }
}
