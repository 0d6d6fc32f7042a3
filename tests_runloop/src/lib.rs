//! # Run Loop Scenario Tests
//!
//! Cross-crate scenarios driving the assembled kernel the way the device
//! would be driven: scripted touches in, recorded drawing out, hand-turned
//! clock, simulated mesh node.
//!
//! ## Test Philosophy
//!
//! - **Whole-device flows**: boot → launch → touch → observe, not unit
//!   slices
//! - **Deterministic**: every input (touch, time, network) is scripted
//! - **Invariants over pixels**: drawing is asserted by recorded text
//!   runs and call counts, never exact coordinates

use core_types::{Point, Rect, Rgb565};
use hal::{
    Clock, Device, DisplayPanel, DrawOp, MemoryCredentials, MemoryStore, RecordingDisplay,
    ScriptedTouch, StorageMedium, StubLink, TextAnchor, TouchPanel,
};
use kernel::Kernel;
use mesh_api::SimMeshNode;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Handles a test keeps into a device the kernel owns.
pub struct DeviceProbes {
    pub display: Rc<RefCell<RecordingDisplay>>,
    pub touch: Rc<RefCell<ScriptedTouch>>,
    pub clock: Rc<Cell<u64>>,
}

impl DeviceProbes {
    /// Queues one tap: a pressed frame, then a release frame
    pub fn tap(&self, x: i32, y: i32) {
        let mut touch = self.touch.borrow_mut();
        touch.press(x, y);
        touch.idle(1);
    }

    /// Queues `count` untouched frames
    pub fn idle(&self, count: usize) {
        self.touch.borrow_mut().idle(count);
    }

    /// True if any recorded text run contains `needle`
    pub fn drew_text(&self, needle: &str) -> bool {
        self.display.borrow().drew_text(needle)
    }

    /// Forgets the recorded call stream
    pub fn clear_display(&self) {
        self.display.borrow_mut().clear_ops();
    }
}

struct SharedDisplay(Rc<RefCell<RecordingDisplay>>);

impl DisplayPanel for SharedDisplay {
    fn width(&self) -> i32 {
        self.0.borrow().width()
    }
    fn height(&self) -> i32 {
        self.0.borrow().height()
    }
    fn fill_screen(&mut self, color: Rgb565) {
        self.0.borrow_mut().fill_screen(color);
    }
    fn fill_rect(&mut self, rect: Rect, color: Rgb565) {
        self.0.borrow_mut().fill_rect(rect, color);
    }
    fn draw_rect(&mut self, rect: Rect, color: Rgb565) {
        self.0.borrow_mut().draw_rect(rect, color);
    }
    fn fill_round_rect(&mut self, rect: Rect, radius: i32, color: Rgb565) {
        self.0.borrow_mut().fill_round_rect(rect, radius, color);
    }
    fn draw_round_rect(&mut self, rect: Rect, radius: i32, color: Rgb565) {
        self.0.borrow_mut().draw_round_rect(rect, radius, color);
    }
    fn draw_hline(&mut self, x: i32, y: i32, w: i32, color: Rgb565) {
        self.0.borrow_mut().draw_hline(x, y, w, color);
    }
    fn draw_vline(&mut self, x: i32, y: i32, h: i32, color: Rgb565) {
        self.0.borrow_mut().draw_vline(x, y, h, color);
    }
    fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Rgb565) {
        self.0.borrow_mut().draw_line(x0, y0, x1, y1, color);
    }
    fn fill_circle(&mut self, cx: i32, cy: i32, radius: i32, color: Rgb565) {
        self.0.borrow_mut().fill_circle(cx, cy, radius, color);
    }
    fn draw_text(
        &mut self,
        text: &str,
        x: i32,
        y: i32,
        anchor: TextAnchor,
        color: Rgb565,
        bg: Option<Rgb565>,
    ) {
        self.0.borrow_mut().draw_text(text, x, y, anchor, color, bg);
    }
    fn text_width(&self, text: &str) -> i32 {
        self.0.borrow().text_width(text)
    }
}

struct SharedTouch(Rc<RefCell<ScriptedTouch>>);

impl TouchPanel for SharedTouch {
    fn sample(&mut self) -> Option<Point> {
        self.0.borrow_mut().sample()
    }
}

struct SharedClock(Rc<Cell<u64>>);

impl Clock for SharedClock {
    fn poll_millis(&mut self) -> u64 {
        self.0.get()
    }
}

/// Builds a booted kernel over probe-backed hardware.
///
/// The link knows one network ("HomeNet"); storage is present and empty
/// unless `storage` says otherwise.
pub fn test_kernel_with_storage(
    storage: Box<dyn StorageMedium>,
) -> (Kernel<SimMeshNode>, DeviceProbes) {
    let display = Rc::new(RefCell::new(RecordingDisplay::new()));
    let touch = Rc::new(RefCell::new(ScriptedTouch::new()));
    let clock = Rc::new(Cell::new(0));

    let mut link = StubLink::new();
    link.add_network("HomeNet", -55);

    let device = Device::new(
        Box::new(SharedDisplay(display.clone())),
        Box::new(SharedTouch(touch.clone())),
        storage,
        Box::new(MemoryCredentials::new()),
        Box::new(link),
        Box::new(SharedClock(clock.clone())),
    );

    let mut kernel = Kernel::new(device, SimMeshNode::new());
    kernel.boot();

    (
        kernel,
        DeviceProbes {
            display,
            touch,
            clock,
        },
    )
}

/// [`test_kernel_with_storage`] over a present, empty medium
pub fn test_kernel() -> (Kernel<SimMeshNode>, DeviceProbes) {
    test_kernel_with_storage(Box::new(MemoryStore::new()))
}

/// Registers the three system applications the device ships with
pub fn register_system_apps(
    kernel: &mut Kernel<SimMeshNode>,
) -> Result<(), services_tasks::TaskError> {
    kernel.register_application(Box::new(sys_apps::HomeApp::new()))?;
    kernel.register_application(Box::new(sys_apps::SettingsApp::new()))?;
    kernel.register_application(Box::new(sys_apps::MessengerApp::new()))?;
    Ok(())
}

/// Counts full-screen clears in the recorded stream
pub fn screen_clears(probes: &DeviceProbes) -> usize {
    probes
        .display
        .borrow()
        .ops()
        .iter()
        .filter(|op| matches!(op, DrawOp::FillScreen(_)))
        .count()
}

#[cfg(test)]
mod scenarios;
