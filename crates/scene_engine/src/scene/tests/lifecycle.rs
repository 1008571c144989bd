use super::{recorder, Journal};
use crate::ecs::{System, World};
use crate::scene::{
    with_scene_manager, Scene, SceneBase, SceneCommand, SceneError, SceneLifecycleSystem, SceneManager,
    SceneRequests, SceneState, Tag,
};

fn world_with_manager() -> World {
    let mut world = World::new();
    world.add_resource(SceneManager::RESOURCE_KEY, SceneManager::new());
    world.add_system(SceneLifecycleSystem::new());
    world
}

fn manager(world: &World) -> &SceneManager {
    world.resource::<SceneManager>(SceneManager::RESOURCE_KEY).unwrap()
}

#[test]
fn test_dispose_round_trip_spares_other_owners() {
    let mut world = World::new();
    let a = SceneBase::new("scene-a");
    let b = SceneBase::new("scene-b");
    for _ in 0..3 {
        a.create_entity(&mut world);
    }
    for _ in 0..2 {
        b.create_entity(&mut world);
    }
    world.create_entity();
    assert_eq!(world.all_entities().len(), 6);

    let mut scene_a = recorder("scene-a", 0, &Journal::default());
    scene_a.dispose(&mut world).unwrap();

    let survivors = world.all_entities();
    assert_eq!(survivors.len(), 3);
    assert!(survivors
        .iter()
        .all(|&e| world.get::<Tag>(e).map_or(true, |tag| tag.is("scene-b"))));
}

#[test]
fn test_reset_is_idempotent() {
    struct Triple(SceneBase);

    impl Scene for Triple {
        fn base(&self) -> &SceneBase {
            &self.0
        }

        fn init(&mut self, world: &mut World) -> Result<(), SceneError> {
            for _ in 0..3 {
                self.0.create_entity(world);
            }
            Ok(())
        }
    }

    let mut world = World::new();
    let bystander = world.create_entity();
    let mut scene = Triple(SceneBase::new("triple"));
    scene.init(&mut world).unwrap();

    for _ in 0..5 {
        scene.reset(&mut world).unwrap();
        assert_eq!(world.entity_count(), 4);
    }
    assert!(world.entity_exists(bystander));
}

#[test]
fn test_load_over_stack_leaves_one_scene() {
    let journal = Journal::default();
    let mut world = world_with_manager();

    with_scene_manager(&mut world, |manager, world| -> Result<(), SceneError> {
        manager.load_scene(recorder("base", 1, &journal));
        manager.advance(world, 0.0)?;
        manager.push_scene(world, recorder("a", 1, &journal))?;
        manager.advance(world, 0.0)?;
        manager.push_scene(world, recorder("b", 1, &journal))?;
        manager.advance(world, 0.0)?;
        manager.load_scene(recorder("c", 1, &journal));
        Ok(())
    })
    .unwrap()
    .unwrap();

    world.update_systems(0.016).unwrap();

    let manager = manager(&world);
    assert_eq!(manager.total_scene_count(), 1);
    assert_eq!(manager.current_scene_id(), Some("c"));
    assert_eq!(manager.state(), SceneState::Active);
    assert_eq!(world.entity_count(), 1);
    for id in ["base", "a", "b"] {
        assert_eq!(journal.count(&format!("{id}:dispose")), 1, "{id}");
    }
}

#[test]
fn test_overlay_push_pop_scenario() {
    let journal = Journal::default();
    let mut world = world_with_manager();

    with_scene_manager(&mut world, |manager, _| manager.load_scene(recorder("base", 3, &journal))).unwrap();
    world.update_systems(0.016).unwrap();
    assert_eq!(world.all_entities().len(), 3);

    with_scene_manager(&mut world, |manager, world| {
        manager.push_scene(world, recorder("overlay", 1, &journal))
    })
    .unwrap()
    .unwrap();
    assert_eq!(journal.count("base:pause"), 1);
    world.update_systems(0.016).unwrap();

    assert_eq!(world.all_entities().len(), 4);
    assert_eq!(manager(&world).current_scene_id(), Some("overlay"));
    assert_eq!(journal.count("base:pause"), 1);

    with_scene_manager(&mut world, |manager, world| manager.pop_scene(world))
        .unwrap()
        .unwrap();
    assert_eq!(world.all_entities().len(), 3);
    assert_eq!(journal.count("base:resume"), 1);
    assert!(world.query::<(Tag,)>().iter().all(|(_, (tag,))| tag.is("base")));
    assert_eq!(manager(&world).current_scene_id(), Some("base"));
}

#[test]
fn test_paused_scene_gets_no_updates() {
    let journal = Journal::default();
    let mut world = world_with_manager();

    with_scene_manager(&mut world, |manager, _| manager.load_scene(recorder("base", 0, &journal))).unwrap();
    world.update_systems(0.016).unwrap();
    with_scene_manager(&mut world, |manager, world| {
        manager.push_scene(world, recorder("overlay", 0, &journal))
    })
    .unwrap()
    .unwrap();
    for _ in 0..3 {
        world.update_systems(0.016).unwrap();
    }

    assert_eq!(journal.count("base:update"), 1);
    assert_eq!(journal.count("overlay:update"), 3);
}

#[test]
fn test_driver_without_manager_fails() {
    let mut world = World::new();
    let mut driver = SceneLifecycleSystem::new();
    assert!(driver.run(&mut world, 0.016).is_err());
}

#[test]
fn test_driver_reports_scene_failures() {
    let journal = Journal::default();
    let mut world = world_with_manager();
    with_scene_manager(&mut world, |manager, _| {
        manager.load_scene(super::failing_recorder("broken", &journal));
    })
    .unwrap();

    let err = world.update_systems(0.016).unwrap_err();
    assert!(err.to_string().contains("broken"), "{err}");
    assert!(world.has_resource(SceneManager::RESOURCE_KEY));
}

#[test]
fn test_scene_requests_transition_from_update() {
    /// Opens an overlay on its first update
    struct Menu {
        base: SceneBase,
        journal: Journal,
        frames: u32,
    }

    impl Scene for Menu {
        fn base(&self) -> &SceneBase {
            &self.base
        }

        fn init(&mut self, _world: &mut World) -> Result<(), SceneError> {
            Ok(())
        }

        fn update(&mut self, world: &mut World, _delta_time: f32) -> Result<(), SceneError> {
            self.frames += 1;
            if self.frames == 1 {
                // The manager is lifted out while this runs
                assert!(with_scene_manager(world, |_, _| ()).is_err());
                SceneRequests::submit(world, SceneCommand::Push(recorder("options", 1, &self.journal)))?;
            }
            Ok(())
        }
    }

    let journal = Journal::default();
    let mut world = world_with_manager();
    with_scene_manager(&mut world, |manager, _| {
        manager.load_scene(Box::new(Menu {
            base: SceneBase::new("menu"),
            journal: journal.clone(),
            frames: 0,
        }));
    })
    .unwrap();

    world.update_systems(0.016).unwrap();
    assert_eq!(manager(&world).current_scene_id(), Some("options"));
    assert_eq!(manager(&world).scene_stack_ids(), vec!["menu"]);
    assert_eq!(journal.count("options:init"), 0);

    world.update_systems(0.016).unwrap();
    assert_eq!(journal.count("options:init"), 1);
    assert_eq!(journal.count("options:update"), 1);
    assert_eq!(world.entity_count(), 1);

    SceneRequests::submit(&mut world, SceneCommand::Pop).unwrap();
    world.update_systems(0.016).unwrap();
    assert_eq!(manager(&world).current_scene_id(), Some("menu"));
    assert_eq!(journal.count("options:dispose"), 1);
    assert_eq!(world.entity_count(), 0);
    assert!(world
        .resource::<SceneRequests>(SceneRequests::RESOURCE_KEY)
        .unwrap()
        .is_empty());
}
