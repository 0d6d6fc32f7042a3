//! # Application API
//!
//! The contract between the kernel and every application it runs.
//!
//! ## Philosophy
//!
//! Applications are cooperative guests. The kernel hands each hook a fresh
//! [`AppContext`] borrowing the device capabilities for exactly that call —
//! no application stores hardware references, and anything that would
//! mutate the kernel itself (switching the foreground app) is deferred
//! through a [`KernelRequest`] applied after the hook returns.
//!
//! ## Lifecycle
//!
//! - `on_start` — once per session, when the app is opened with no process id
//! - `on_update` — once per tick while foreground
//! - `on_draw` — one-shot full draw right after launch
//! - `on_exit` — cleanup; called only on slot eviction

mod context;

pub use context::{AppContext, KernelRequest, NetStatus};

use core_types::{AppId, ProcessId};

/// State every application embeds.
#[derive(Debug, Clone, Copy)]
pub struct AppCore {
    app_id: AppId,
    process_id: ProcessId,
    /// Set by [`Application::force_redraw`]; applications clear it after
    /// repainting
    pub needs_redraw: bool,
}

impl AppCore {
    pub fn new(app_id: AppId) -> Self {
        Self {
            app_id,
            process_id: ProcessId::UNASSIGNED,
            needs_redraw: true,
        }
    }
}

/// A runnable application.
pub trait Application {
    fn core(&self) -> &AppCore;

    fn core_mut(&mut self) -> &mut AppCore;

    /// Session setup
    fn on_start(&mut self, ctx: &mut AppContext);

    /// One cooperative tick of foreground execution
    fn on_update(&mut self, ctx: &mut AppContext);

    /// One-shot draw right after launch
    fn on_draw(&mut self, ctx: &mut AppContext);

    /// Cleanup before the slot is reclaimed
    fn on_exit(&mut self);

    fn app_id(&self) -> AppId {
        self.core().app_id
    }

    fn process_id(&self) -> ProcessId {
        self.core().process_id
    }

    /// Slot tables call this; applications never do
    fn set_process_id(&mut self, pid: ProcessId) {
        self.core_mut().process_id = pid;
    }

    /// Tells the app its screen content was clobbered and must be redrawn
    fn force_redraw(&mut self) {
        self.core_mut().needs_redraw = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NullApp {
        core: AppCore,
    }

    impl Application for NullApp {
        fn core(&self) -> &AppCore {
            &self.core
        }
        fn core_mut(&mut self) -> &mut AppCore {
            &mut self.core
        }
        fn on_start(&mut self, _ctx: &mut AppContext) {}
        fn on_update(&mut self, _ctx: &mut AppContext) {}
        fn on_draw(&mut self, _ctx: &mut AppContext) {}
        fn on_exit(&mut self) {}
    }

    #[test]
    fn test_core_defaults() {
        let mut app = NullApp {
            core: AppCore::new(AppId::new(7)),
        };
        assert_eq!(app.app_id(), AppId::new(7));
        assert!(!app.process_id().is_assigned());

        app.set_process_id(ProcessId::from_slot(2));
        assert_eq!(app.process_id().raw(), 3);

        app.core_mut().needs_redraw = false;
        app.force_redraw();
        assert!(app.core().needs_redraw);
    }
}
