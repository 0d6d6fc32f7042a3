//! Per-call capability bundle

use core_types::{AppId, NodeId, Rgb565};
use hal::Device;
use mesh_api::MeshNode;
use services_keypad::ModalInput;
use services_launcher::{LauncherError, ShortcutRegistry};
use services_peers::NodeDirectory;
use services_toast::{ToastOverlay, ToastStyle};
use themes::ThemePalette;

/// Kernel operations an application may ask for during a hook.
///
/// Applied by the run loop after the hook returns, so the foreground app
/// is never mutated out from under itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KernelRequest {
    /// Switch the foreground application
    Launch(AppId),
}

/// Network state the kernel exposes read-only to applications.
#[derive(Debug, Clone, Copy, Default)]
pub struct NetStatus {
    /// True once the mesh node reported joining a network
    pub mesh_joined: bool,
}

/// Everything an application may touch during one hook invocation.
pub struct AppContext<'a> {
    pub hw: &'a mut Device,
    pub theme: &'a ThemePalette,
    pub mesh: &'a mut dyn MeshNode,
    pub keypad: &'a mut ModalInput,
    pub toast: &'a mut ToastOverlay,
    pub launcher: &'a mut ShortcutRegistry,
    pub peers: &'a NodeDirectory,
    pub net: &'a mut NetStatus,
    pub requests: &'a mut Vec<KernelRequest>,
}

impl AppContext<'_> {
    /// Asks the kernel to switch the foreground app after this hook
    pub fn request_launch(&mut self, app_id: AppId) {
        self.requests.push(KernelRequest::Launch(app_id));
    }

    /// Raises a toast stamped with the device clock
    pub fn show_toast(&mut self, message: &str, style: ToastStyle, duration_ms: u64) {
        let now = self.hw.now_ms();
        self.toast.show(message, style, duration_ms, now);
    }

    /// Runs one tick of the shared keypad against the current touch state
    pub fn keypad_tick(&mut self) {
        let touch = self.hw.touch();
        self.keypad.update(touch, self.hw.display.as_mut(), self.theme);
    }

    /// Installs an external shortcut and persists the registry
    pub fn install_app(
        &mut self,
        name: &str,
        path: &str,
        color: Rgb565,
    ) -> Result<(), LauncherError> {
        self.launcher
            .install(name, path, color, self.hw.storage.as_mut())
    }

    /// Discovered peers in append order
    pub fn discovered_nodes(&self) -> &[NodeId] {
        self.peers.nodes()
    }
}
