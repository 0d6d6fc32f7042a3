//! # Task Manager
//!
//! Bounded slot tables for running applications.
//!
//! ## Philosophy
//!
//! Two arenas of fixed slots, `None` as the empty sentinel, no hidden
//! allocation beyond the boxes the caller already made:
//!
//! - **System table** (capacity [`MAX_SYSTEM_APPS`]): pre-registered
//!   built-ins in registration order. Never evicted, started in place;
//!   they keep process id 0 because they never occupy an opened slot.
//! - **Opened table** (capacity [`MAX_OPENED_APPS`]): externally opened
//!   applications, process id = slot + 1. When full, the slot 0 occupant
//!   is retired — exactly one `on_exit`, then dropped — and the newcomer
//!   takes slot 0. First registered, first evicted; deliberately not LRU.

use app_api::{AppContext, Application};
use core_types::{AppId, ProcessId};
use thiserror::Error;

/// Capacity of the system application table.
pub const MAX_SYSTEM_APPS: usize = 16;
/// Capacity of the opened application table.
pub const MAX_OPENED_APPS: usize = 4;

/// Task table errors.
#[derive(Debug, Error)]
pub enum TaskError {
    #[error("All {MAX_SYSTEM_APPS} system application slots are occupied")]
    SystemSlotsFull,
}

/// The two bounded application tables.
pub struct TaskManager {
    system: [Option<Box<dyn Application>>; MAX_SYSTEM_APPS],
    opened: [Option<Box<dyn Application>>; MAX_OPENED_APPS],
}

impl TaskManager {
    pub fn new() -> Self {
        Self {
            system: std::array::from_fn(|_| None),
            opened: std::array::from_fn(|_| None),
        }
    }

    /// Registers a system application into the first empty slot.
    ///
    /// A full table refuses without mutating; the rejected app is dropped
    /// with the error.
    pub fn register_application(&mut self, app: Box<dyn Application>) -> Result<(), TaskError> {
        match self.system.iter_mut().find(|slot| slot.is_none()) {
            Some(slot) => {
                *slot = Some(app);
                Ok(())
            }
            None => Err(TaskError::SystemSlotsFull),
        }
    }

    /// Finds the system slot holding `app_id`
    pub fn find_system(&self, app_id: AppId) -> Option<usize> {
        self.system.iter().position(|slot| {
            slot.as_ref()
                .is_some_and(|app| app.app_id() == app_id)
        })
    }

    /// Opens a registered system application in place.
    ///
    /// Starts it once while its process id is still unassigned; returns
    /// the slot, or `None` when no such app is registered.
    pub fn open_registered(&mut self, app_id: AppId, ctx: &mut AppContext) -> Option<usize> {
        let slot = self.find_system(app_id)?;
        if let Some(app) = self.system[slot].as_mut() {
            if !app.process_id().is_assigned() {
                app.on_start(ctx);
            }
        }
        Some(slot)
    }

    /// Mutable access to a system slot's occupant
    pub fn system_app_mut(&mut self, slot: usize) -> Option<&mut Box<dyn Application>> {
        self.system.get_mut(slot).and_then(|s| s.as_mut())
    }

    /// Registered system application ids, in slot order
    pub fn system_ids(&self) -> Vec<AppId> {
        self.system
            .iter()
            .flatten()
            .map(|app| app.app_id())
            .collect()
    }

    /// Opens an application into the bounded opened table.
    ///
    /// Returns the slot taken. On overflow the slot 0 occupant receives
    /// exactly one `on_exit` and is destroyed; the newcomer always reuses
    /// slot 0, never the least-recently-used one.
    pub fn open_app(&mut self, mut app: Box<dyn Application>) -> usize {
        match self.opened.iter().position(Option::is_none) {
            Some(slot) => {
                app.set_process_id(ProcessId::from_slot(slot));
                self.opened[slot] = Some(app);
                slot
            }
            None => {
                if let Some(mut evicted) = self.opened[0].take() {
                    evicted.on_exit();
                }
                app.set_process_id(ProcessId::from_slot(0));
                self.opened[0] = Some(app);
                0
            }
        }
    }

    /// Read access to an opened slot's occupant
    pub fn opened_app(&self, slot: usize) -> Option<&dyn Application> {
        self.opened.get(slot).and_then(|s| s.as_deref())
    }

    /// Occupied opened slots
    pub fn opened_count(&self) -> usize {
        self.opened.iter().flatten().count()
    }
}

impl Default for TaskManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use app_api::AppCore;
    use std::cell::Cell;
    use std::rc::Rc;

    struct ProbeApp {
        core: AppCore,
        exits: Rc<Cell<u32>>,
        starts: Rc<Cell<u32>>,
    }

    impl ProbeApp {
        fn boxed(app_id: u8) -> Box<dyn Application> {
            Box::new(Self::with_probes(
                app_id,
                Rc::new(Cell::new(0)),
                Rc::new(Cell::new(0)),
            ))
        }

        fn with_probes(app_id: u8, starts: Rc<Cell<u32>>, exits: Rc<Cell<u32>>) -> Self {
            Self {
                core: AppCore::new(AppId::new(app_id)),
                exits,
                starts,
            }
        }
    }

    impl Application for ProbeApp {
        fn core(&self) -> &AppCore {
            &self.core
        }
        fn core_mut(&mut self) -> &mut AppCore {
            &mut self.core
        }
        fn on_start(&mut self, _ctx: &mut AppContext) {
            self.starts.set(self.starts.get() + 1);
        }
        fn on_update(&mut self, _ctx: &mut AppContext) {}
        fn on_draw(&mut self, _ctx: &mut AppContext) {}
        fn on_exit(&mut self) {
            self.exits.set(self.exits.get() + 1);
        }
    }

    #[test]
    fn test_register_fills_then_refuses() {
        let mut tasks = TaskManager::new();
        for i in 0..MAX_SYSTEM_APPS {
            tasks.register_application(ProbeApp::boxed(i as u8)).unwrap();
        }

        let result = tasks.register_application(ProbeApp::boxed(63));
        assert!(matches!(result, Err(TaskError::SystemSlotsFull)));

        let ids = tasks.system_ids();
        assert_eq!(ids.len(), MAX_SYSTEM_APPS);
        for (i, id) in ids.iter().enumerate() {
            assert_eq!(*id, AppId::new(i as u8));
        }
    }

    #[test]
    fn test_find_system() {
        let mut tasks = TaskManager::new();
        tasks.register_application(ProbeApp::boxed(0)).unwrap();
        tasks.register_application(ProbeApp::boxed(5)).unwrap();

        assert_eq!(tasks.find_system(AppId::new(5)), Some(1));
        assert_eq!(tasks.find_system(AppId::new(9)), None);
    }

    #[test]
    fn test_open_app_assigns_slot_process_ids() {
        let mut tasks = TaskManager::new();
        for i in 0..MAX_OPENED_APPS {
            let slot = tasks.open_app(ProbeApp::boxed(64 + i as u8));
            assert_eq!(slot, i);
            let pid = tasks.opened_app(slot).unwrap().process_id();
            assert_eq!(pid.raw() as usize, i + 1);
        }
        assert_eq!(tasks.opened_count(), MAX_OPENED_APPS);
    }

    #[test]
    fn test_open_app_overflow_evicts_slot_zero_only() {
        let mut tasks = TaskManager::new();
        let first_exits = Rc::new(Cell::new(0));
        tasks.open_app(Box::new(ProbeApp::with_probes(
            64,
            Rc::new(Cell::new(0)),
            first_exits.clone(),
        )));
        for i in 1..MAX_OPENED_APPS {
            tasks.open_app(ProbeApp::boxed(64 + i as u8));
        }

        let slot = tasks.open_app(ProbeApp::boxed(99));
        assert_eq!(slot, 0);
        assert_eq!(first_exits.get(), 1);

        // newcomer took slot 0 with pid 1; the other slots are untouched
        assert_eq!(tasks.opened_app(0).unwrap().app_id(), AppId::new(99));
        assert_eq!(tasks.opened_app(0).unwrap().process_id().raw(), 1);
        for i in 1..MAX_OPENED_APPS {
            assert_eq!(
                tasks.opened_app(i).unwrap().app_id(),
                AppId::new(64 + i as u8)
            );
            assert_eq!(tasks.opened_app(i).unwrap().process_id().raw() as usize, i + 1);
        }
    }
}
