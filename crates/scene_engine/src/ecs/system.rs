//! System trait and implementations

use thiserror::Error;

use super::{EcsError, World};

/// System trait for processing entities and components
///
/// Systems run once per frame, in registration order, through
/// [`World::update_systems`]. Closures taking `(&mut World, f32)` are systems
/// too.
pub trait System {
    /// Run the system for one frame
    fn run(&mut self, world: &mut World, delta_time: f32) -> Result<(), SystemError>;

    /// Name used in logs and errors
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

impl<F> System for F
where
    F: FnMut(&mut World, f32) -> Result<(), SystemError>,
{
    fn run(&mut self, world: &mut World, delta_time: f32) -> Result<(), SystemError> {
        self(world, delta_time)
    }
}

/// Errors returned by systems
#[derive(Error, Debug)]
pub enum SystemError {
    /// A store operation failed (e.g. a required resource is missing)
    #[error(transparent)]
    Ecs(#[from] EcsError),

    /// Any other failure, tagged with the failing system
    #[error("system '{system}' failed: {source}")]
    Failed {
        /// Name of the failing system
        system: String,
        /// Underlying error
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl SystemError {
    /// Wrap an arbitrary error raised by `system`
    pub fn failed(
        system: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::Failed {
            system: system.into(),
            source: source.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct CountingSystem {
        runs: usize,
    }

    impl System for CountingSystem {
        fn run(&mut self, _world: &mut World, _delta_time: f32) -> Result<(), SystemError> {
            self.runs += 1;
            Ok(())
        }

        fn name(&self) -> &str {
            "CountingSystem"
        }
    }

    #[test]
    fn test_struct_system() {
        let mut world = World::new();
        let mut system = CountingSystem { runs: 0 };
        system.run(&mut world, 0.016).unwrap();
        system.run(&mut world, 0.016).unwrap();
        assert_eq!(system.runs, 2);
        assert_eq!(system.name(), "CountingSystem");
    }

    #[test]
    fn test_closure_system() {
        let mut world = World::new();
        let mut spawner = |world: &mut World, _dt: f32| -> Result<(), SystemError> {
            world.create_entity();
            Ok(())
        };
        spawner.run(&mut world, 0.0).unwrap();
        assert_eq!(world.entity_count(), 1);
    }

    #[test]
    fn test_failed_message() {
        let err = SystemError::failed("Spawner", "out of slots");
        assert_eq!(err.to_string(), "system 'Spawner' failed: out of slots");
    }
}
