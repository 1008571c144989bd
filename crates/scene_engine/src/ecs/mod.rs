//! Entity-Component-System implementation
//!
//! Per-type component storage, set-intersection queries, named resources,
//! named event queues and an ordered list of per-frame systems, all owned by
//! a single [`World`].

pub mod world;
pub mod entity;
pub mod component;
pub mod storage;
pub mod system;
pub mod query;
pub mod resources;
pub mod events;
mod error;

pub use world::World;
pub use entity::Entity;
pub use component::Component;
pub use storage::ComponentStorage;
pub use system::{System, SystemError};
pub use query::{Query, QueryData, QueryIter};
pub use resources::Resources;
pub use events::EventQueue;
pub use error::EcsError;

#[cfg(test)]
mod tests;
