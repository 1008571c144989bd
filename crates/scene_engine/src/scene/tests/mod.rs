//! Scene lifecycle scenarios and shared test scenes

mod lifecycle;

use std::cell::RefCell;
use std::rc::Rc;

use crate::ecs::World;
use crate::scene::{Scene, SceneBase, SceneError};

/// Shared log of `"<scene>:<hook>"` entries in call order
#[derive(Clone, Default)]
pub(crate) struct Journal(Rc<RefCell<Vec<String>>>);

impl Journal {
    fn record(&self, scene: &str, hook: &str) {
        self.0.borrow_mut().push(format!("{scene}:{hook}"));
    }

    pub(crate) fn entries(&self) -> Vec<String> {
        self.0.borrow().clone()
    }

    pub(crate) fn count(&self, entry: &str) -> usize {
        self.0.borrow().iter().filter(|e| *e == entry).count()
    }

    pub(crate) fn count_suffix(&self, suffix: &str) -> usize {
        self.0.borrow().iter().filter(|e| e.ends_with(suffix)).count()
    }

    pub(crate) fn clear(&self) {
        self.0.borrow_mut().clear();
    }
}

/// Scene that spawns a fixed number of tagged entities and journals every hook
pub(crate) struct Recorder {
    base: SceneBase,
    spawn: usize,
    fail_init: bool,
    journal: Journal,
}

impl Recorder {
    fn populate(&self, world: &mut World) {
        for _ in 0..self.spawn {
            self.base.create_entity(world);
        }
    }
}

impl Scene for Recorder {
    fn base(&self) -> &SceneBase {
        &self.base
    }

    fn create(&mut self) -> Result<(), SceneError> {
        self.journal.record(self.base.id(), "create");
        Ok(())
    }

    fn init(&mut self, world: &mut World) -> Result<(), SceneError> {
        self.journal.record(self.base.id(), "init");
        self.populate(world);
        if self.fail_init {
            return Err(SceneError::hook(self.base.id(), "init", "refused"));
        }
        Ok(())
    }

    fn pause(&mut self, _world: &mut World) -> Result<(), SceneError> {
        self.journal.record(self.base.id(), "pause");
        Ok(())
    }

    fn resume(&mut self, _world: &mut World) -> Result<(), SceneError> {
        self.journal.record(self.base.id(), "resume");
        Ok(())
    }

    fn reset(&mut self, world: &mut World) -> Result<(), SceneError> {
        self.journal.record(self.base.id(), "reset");
        self.base.cleanup(world);
        self.populate(world);
        Ok(())
    }

    fn update(&mut self, _world: &mut World, _delta_time: f32) -> Result<(), SceneError> {
        self.journal.record(self.base.id(), "update");
        Ok(())
    }

    fn dispose(&mut self, world: &mut World) -> Result<(), SceneError> {
        self.journal.record(self.base.id(), "dispose");
        self.base.cleanup(world);
        Ok(())
    }
}

pub(crate) fn recorder(id: &str, spawn: usize, journal: &Journal) -> Box<dyn Scene> {
    Box::new(Recorder {
        base: SceneBase::new(id),
        spawn,
        fail_init: false,
        journal: journal.clone(),
    })
}

/// Recorder whose `init` spawns one entity and then fails
pub(crate) fn failing_recorder(id: &str, journal: &Journal) -> Box<dyn Scene> {
    Box::new(Recorder {
        base: SceneBase::new(id),
        spawn: 1,
        fail_init: true,
        journal: journal.clone(),
    })
}
