//! Randomized check that queries equal the brute-force intersection of `has`

use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::ecs::{Component, Entity, World};

struct A(u32);
struct B(u32);
struct C(u32);
impl Component for A {}
impl Component for B {}
impl Component for C {}

fn populate(world: &mut World, rng: &mut StdRng, count: usize) -> Vec<Entity> {
    let mut entities = Vec::with_capacity(count);
    for i in 0..count {
        let e = world.create_entity();
        if rng.gen_bool(0.6) {
            world.add(e, A(i as u32)).unwrap();
        }
        if rng.gen_bool(0.5) {
            world.add(e, B(i as u32)).unwrap();
        }
        if rng.gen_bool(0.4) {
            world.add(e, C(i as u32)).unwrap();
        }
        entities.push(e);
    }
    entities
}

fn brute_force(world: &World, pred: impl Fn(&World, Entity) -> bool) -> HashSet<Entity> {
    world.all_entities().into_iter().filter(|&e| pred(world, e)).collect()
}

fn churn(world: &mut World, rng: &mut StdRng, entities: &[Entity]) {
    for &e in entities {
        match rng.gen_range(0..6) {
            0 => {
                world.destroy_entity(e);
            }
            1 => {
                world.remove::<A>(e);
            }
            2 => {
                world.remove::<B>(e);
            }
            3 if world.entity_exists(e) => {
                world.add(e, C(0)).unwrap();
            }
            _ => {}
        }
    }
}

#[test]
fn test_query_matches_brute_force_intersection() {
    for seed in 0..32_u64 {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut world = World::new();
        let count = rng.gen_range(0..120);
        let entities = populate(&mut world, &mut rng, count);

        for round in 0..2 {
            let ab: HashSet<Entity> = world.query_entities::<(A, B)>().into_iter().collect();
            assert_eq!(ab, brute_force(&world, |w, e| w.has::<A>(e) && w.has::<B>(e)), "seed {seed} round {round}");

            let cb: HashSet<Entity> = world.query_entities::<(C, B)>().into_iter().collect();
            assert_eq!(cb, brute_force(&world, |w, e| w.has::<C>(e) && w.has::<B>(e)), "seed {seed} round {round}");

            let abc: HashSet<Entity> = world.query_entities::<(A, B, C)>().into_iter().collect();
            assert_eq!(
                abc,
                brute_force(&world, |w, e| w.has::<A>(e) && w.has::<B>(e) && w.has::<C>(e)),
                "seed {seed} round {round}"
            );

            let a: HashSet<Entity> = world.query_entities::<(A,)>().into_iter().collect();
            assert_eq!(a, brute_force(&world, |w, e| w.has::<A>(e)), "seed {seed} round {round}");

            // no duplicates either
            assert_eq!(world.query::<(A, B, C)>().count(), abc.len());

            churn(&mut world, &mut rng, &entities);
        }
    }
}

#[test]
fn test_query_items_belong_to_their_entity() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut world = World::new();
    let entities = populate(&mut world, &mut rng, 200);

    for (entity, (a, b)) in world.query::<(A, B)>() {
        let index = entities.iter().position(|&e| e == entity).unwrap() as u32;
        assert_eq!(a.0, index);
        assert_eq!(b.0, index);
    }
}
