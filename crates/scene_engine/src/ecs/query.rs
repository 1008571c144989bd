//! Query system for component access
//!
//! A query selects the entities owning every component type in a tuple:
//!
//! ```
//! use scene_engine::ecs::{Component, World};
//!
//! struct Position(f32);
//! struct Velocity(f32);
//! impl Component for Position {}
//! impl Component for Velocity {}
//!
//! let mut world = World::new();
//! let e = world.create_entity();
//! world.add(e, Position(0.0)).unwrap();
//! world.add(e, Velocity(1.0)).unwrap();
//!
//! for (entity, (pos, vel)) in world.query::<(Position, Velocity)>() {
//!     assert_eq!(entity, e);
//!     assert_eq!(pos.0 + vel.0, 1.0);
//! }
//! ```
//!
//! The first tuple element drives iteration: only entities in its store are
//! visited, then the other types are looked up in order. Results come out in the
//! driving store's order.
//!
//! Iteration reads the live store; nothing is cached. While a [`Query`] is
//! alive the world is borrowed, so structural changes cannot happen under it.
//! To destroy entities while walking a query, take a snapshot with
//! [`Query::entities`] (or [`World::query_entities`]) and mutate the world
//! while walking the snapshot. Entities destroyed earlier in that walk are
//! simply no longer alive when reached.

use std::marker::PhantomData;

use super::{Component, Entity, World};

/// A set of component types that can be fetched together
pub trait QueryData {
    /// What one match yields
    type Item<'w>;

    /// Entities of the driving (first) store
    fn driver(world: &World) -> &[Entity];

    /// Fetch every component for `entity`, or `None` if any is missing
    fn fetch(world: &World, entity: Entity) -> Option<Self::Item<'_>>;
}

macro_rules! impl_query_data {
    ($first:ident $(, $rest:ident)*) => {
        impl<$first: Component $(, $rest: Component)*> QueryData for ($first, $($rest,)*) {
            type Item<'w> = (&'w $first, $(&'w $rest,)*);

            fn driver(world: &World) -> &[Entity] {
                world.storage::<$first>().map_or(&[][..], |storage| storage.entities())
            }

            fn fetch(world: &World, entity: Entity) -> Option<Self::Item<'_>> {
                Some((world.get::<$first>(entity)?, $(world.get::<$rest>(entity)?,)*))
            }
        }
    };
}

impl_query_data!(A);
impl_query_data!(A, B);
impl_query_data!(A, B, C);
impl_query_data!(A, B, C, D);

/// Live view over the entities matching `Q`
pub struct Query<'w, Q: QueryData> {
    world: &'w World,
    _marker: PhantomData<Q>,
}

impl<'w, Q: QueryData> Query<'w, Q> {
    pub(crate) fn new(world: &'w World) -> Self {
        Self {
            world,
            _marker: PhantomData,
        }
    }

    /// Iterate current matches
    pub fn iter(&self) -> QueryIter<'w, Q> {
        QueryIter {
            world: self.world,
            driver: Q::driver(self.world).iter(),
            _marker: PhantomData,
        }
    }

    /// Materialize the matching entities, safe to walk while mutating the world
    pub fn entities(&self) -> Vec<Entity> {
        self.iter().map(|(entity, _)| entity).collect()
    }

    /// Number of current matches
    pub fn count(&self) -> usize {
        self.iter().count()
    }

    /// Whether nothing matches
    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }
}

impl<'w, Q: QueryData> IntoIterator for Query<'w, Q> {
    type Item = (Entity, Q::Item<'w>);
    type IntoIter = QueryIter<'w, Q>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'w, Q: QueryData> IntoIterator for &Query<'w, Q> {
    type Item = (Entity, Q::Item<'w>);
    type IntoIter = QueryIter<'w, Q>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over query matches
pub struct QueryIter<'w, Q: QueryData> {
    world: &'w World,
    driver: std::slice::Iter<'w, Entity>,
    _marker: PhantomData<Q>,
}

impl<'w, Q: QueryData> Iterator for QueryIter<'w, Q> {
    type Item = (Entity, Q::Item<'w>);

    fn next(&mut self) -> Option<Self::Item> {
        for &entity in self.driver.by_ref() {
            if let Some(item) = Q::fetch(self.world, entity) {
                return Some((entity, item));
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.driver.size_hint().1)
    }
}
