//! # System Applications
//!
//! The built-in applications shipped with the device: the home grid, the
//! settings dashboard, and the mesh messenger. Each implements the
//! [`app_api::Application`] contract and draws through the display
//! primitives — there is no widget toolkit beyond the few shared helpers
//! in [`widgets`].

pub mod home;
pub mod messenger;
pub mod settings;
mod widgets;

pub use home::HomeApp;
pub use messenger::MessengerApp;
pub use settings::SettingsApp;

use core_types::{AppId, Point};
use hal::TouchState;

/// App id of the home grid.
pub const HOME_APP_ID: AppId = AppId::new(0);
/// App id of the settings dashboard.
pub const SETTINGS_APP_ID: AppId = AppId::new(1);
/// App id of the messenger.
pub const MESSENGER_APP_ID: AppId = AppId::new(2);

/// Reports the touch position once per press.
///
/// Screens act on the press edge, not the level, so a finger resting on
/// the panel across ticks triggers exactly one action.
pub(crate) fn press_edge(was_down: &mut bool, touch: TouchState) -> Option<Point> {
    let edge = touch.pressed && !*was_down;
    *was_down = touch.pressed;
    if edge {
        Some(touch.pos)
    } else {
        None
    }
}
