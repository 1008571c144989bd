//! ECS error types

use thiserror::Error;

use super::Entity;

/// Errors raised by the entity/component store
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EcsError {
    /// A required resource was never registered (or was removed)
    #[error("resource '{key}' not found")]
    ResourceNotFound {
        /// Resource key
        key: String,
    },

    /// A resource exists under the key but holds a different type
    #[error("resource '{key}' is not a {expected}")]
    ResourceTypeMismatch {
        /// Resource key
        key: String,
        /// Type the caller asked for
        expected: &'static str,
    },

    /// A required component is missing from an entity
    #[error("{entity} has no {component} component")]
    ComponentNotFound {
        /// Entity that was looked up
        entity: Entity,
        /// Component type name
        component: &'static str,
    },

    /// The entity was destroyed or never allocated by this world
    #[error("{0} is not alive")]
    StaleEntity(Entity),
}
