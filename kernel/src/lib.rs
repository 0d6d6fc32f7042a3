//! # Kernel
//!
//! The application kernel: composition root and cooperative run loop.
//!
//! ## Philosophy
//!
//! One logical thread of control. A tick runs to completion with no
//! preemption and no suspension points, so no state here needs a lock:
//!
//! 1. poll the mesh node (non-blocking) and apply its events
//! 2. sample the touch panel
//! 3. run the foreground application's update hook
//! 4. apply any kernel requests the hook deferred
//! 5. update the toast overlay, and hand the foreground app exactly one
//!    forced redraw when the overlay just left the screen
//!
//! Nothing in the kernel aborts. Missing storage, unknown app ids, an
//! unready network — each degrades into a diagnostic entry or a UI
//! affordance, and the device keeps ticking.

pub mod diag;

pub use diag::{DiagnosticLog, LogEntry, LogLevel, MAX_DIAG_HISTORY};

use app_api::{AppContext, Application, KernelRequest, NetStatus};
use core_types::{AppId, NodeId, Rgb565};
use hal::{Device, TextAnchor};
use mesh_api::{DeliveryPolicy, DiscoveryMode, MeshEvent, MeshNode};
use services_keypad::ModalInput;
use services_launcher::{LauncherError, ShortcutRegistry};
use services_peers::NodeDirectory;
use services_tasks::{TaskError, TaskManager};
use services_toast::{ToastOverlay, ToastStyle};
use themes::ThemePalette;

/// The device kernel, generic over the mesh node implementation.
pub struct Kernel<N: MeshNode> {
    device: Device,
    theme: ThemePalette,
    mesh: N,
    tasks: TaskManager,
    registry: ShortcutRegistry,
    keypad: ModalInput,
    toast: ToastOverlay,
    peers: NodeDirectory,
    net: NetStatus,
    requests: Vec<KernelRequest>,
    foreground: Option<AppId>,
    toast_was_active: bool,
    diag: DiagnosticLog,
}

impl<N: MeshNode> Kernel<N> {
    pub fn new(device: Device, mesh: N) -> Self {
        Self {
            device,
            theme: ThemePalette::default(),
            mesh,
            tasks: TaskManager::new(),
            registry: ShortcutRegistry::new(),
            keypad: ModalInput::new(),
            toast: ToastOverlay::new(),
            peers: NodeDirectory::new(),
            net: NetStatus::default(),
            requests: Vec::new(),
            foreground: None,
            toast_was_active: false,
            diag: DiagnosticLog::new(),
        }
    }

    /// Brings the device up: profile restore, registry load, peer reset,
    /// mesh node configuration, splash.
    pub fn boot(&mut self) {
        // TODO: load palette overrides from storage instead of the built-in
        self.theme = ThemePalette::default();

        self.device.restore_link();
        self.registry.load(self.device.storage.as_ref());
        self.peers.reset();

        if let Err(err) = self.mesh.init(NodeId::new(0), NodeId::new(0)) {
            self.diag
                .push(LogEntry::warn("Mesh node init failed").with_field("error", err.to_string()));
        }
        self.mesh.set_accept_level(1);
        self.mesh.set_delivery_policy(DeliveryPolicy::SkipOnFailure);
        self.mesh.set_discovery_mode(DiscoveryMode::SenderOnly);
        self.mesh.set_sync_error_budget(250);

        self.splash();
        self.diag.push(
            LogEntry::info("Boot complete")
                .with_field("storage", self.device.storage.available().to_string())
                .with_field("shortcuts", self.registry.len().to_string()),
        );
    }

    fn splash(&mut self) {
        let theme = self.theme;
        self.device.reset_screen(theme.bg);
        let w = self.device.display.width();
        let h = self.device.display.height();
        self.device.display.draw_text(
            "SLATE",
            w / 2,
            h / 2 - 20,
            TextAnchor::MiddleCenter,
            theme.text_main,
            Some(theme.bg),
        );
        self.device.display.draw_text(
            "modular mesh os",
            w / 2,
            h / 2 + 12,
            TextAnchor::MiddleCenter,
            theme.text_muted,
            Some(theme.bg),
        );
    }

    /// Registers a system application into the task table
    pub fn register_application(&mut self, app: Box<dyn Application>) -> Result<(), TaskError> {
        let result = self.tasks.register_application(app);
        if let Err(err) = &result {
            self.diag.push(
                LogEntry::warn("System application registration refused")
                    .with_field("error", err.to_string()),
            );
        }
        result
    }

    /// Switches the foreground application.
    ///
    /// The target is looked up (and started in place, if needed) in the
    /// system table, given a one-shot draw on a cleared screen, and made
    /// foreground. The outgoing app receives no exit hook; only slot
    /// eviction does that.
    pub fn launch_app(&mut self, app_id: AppId) {
        if app_id.is_external() {
            self.diag.push(
                LogEntry::warn("External applications cannot be launched")
                    .with_field("app_id", app_id.to_string()),
            );
            return;
        }

        let bg = self.theme.bg;
        let launched = {
            let (tasks, mut ctx) = Self::split_ctx(self);
            match tasks.open_registered(app_id, &mut ctx) {
                Some(slot) => {
                    ctx.hw.reset_screen(bg);
                    if let Some(app) = tasks.system_app_mut(slot) {
                        app.on_draw(&mut ctx);
                    }
                    true
                }
                None => false,
            }
        };

        if launched {
            self.foreground = Some(app_id);
        } else {
            self.diag.push(
                LogEntry::warn("System app not registered").with_field("app_id", app_id.to_string()),
            );
        }
    }

    /// Executes one cooperative tick
    pub fn run(&mut self) {
        for event in self.mesh.poll() {
            self.apply_mesh_event(event);
        }

        self.device.update_input();

        if let Some(app_id) = self.foreground {
            let (tasks, mut ctx) = Self::split_ctx(self);
            if let Some(slot) = tasks.find_system(app_id) {
                if let Some(app) = tasks.system_app_mut(slot) {
                    app.on_update(&mut ctx);
                }
            }
        }

        let requests = std::mem::take(&mut self.requests);
        for request in requests {
            match request {
                KernelRequest::Launch(app_id) => self.launch_app(app_id),
            }
        }

        let now = self.device.clock.poll_millis();
        if self.toast.update(now) {
            self.toast.paint(self.device.display.as_mut(), &self.theme);
        }
        let toast_active = self.toast.is_active();
        if self.toast_was_active && !toast_active {
            if let Some(app_id) = self.foreground {
                if let Some(slot) = self.tasks.find_system(app_id) {
                    if let Some(app) = self.tasks.system_app_mut(slot) {
                        app.force_redraw();
                    }
                }
            }
        }
        self.toast_was_active = toast_active;
    }

    /// Records a discovered peer, deduplicated by id and segment
    pub fn add_node(&mut self, id: NodeId) {
        if self.peers.add_node(id) {
            self.diag
                .push(LogEntry::new(LogLevel::Debug, "Peer discovered").with_field("node", id.to_string()));
        }
    }

    /// Discovered peers in append order
    pub fn discovered_nodes(&self) -> &[NodeId] {
        self.peers.nodes()
    }

    /// Installs an external shortcut and persists the registry
    pub fn install_shortcut(
        &mut self,
        name: &str,
        path: &str,
        color: Rgb565,
    ) -> Result<(), LauncherError> {
        self.registry
            .install(name, path, color, self.device.storage.as_mut())
    }

    fn apply_mesh_event(&mut self, event: MeshEvent) {
        match event {
            MeshEvent::IdentifierAccepted(id) | MeshEvent::SyncCompleted(id) => {
                self.add_node(id);
            }
            MeshEvent::JoinedNetwork { .. } => {
                self.net.mesh_joined = true;
                let now = self.device.clock.poll_millis();
                self.toast
                    .show("Node connected to a network", ToastStyle::Info, 1000, now);
            }
            // payloads wait inside the node until the foreground app pulls
            // them; the rest is telemetry the kernel has no state for
            MeshEvent::PayloadReceived { .. }
            | MeshEvent::Discovered(_)
            | MeshEvent::TransferCompleted { .. } => {}
        }
    }

    fn split_ctx(kernel: &mut Self) -> (&mut TaskManager, AppContext<'_>) {
        let Kernel {
            device,
            theme,
            mesh,
            tasks,
            registry,
            keypad,
            toast,
            peers,
            net,
            requests,
            ..
        } = kernel;
        (
            tasks,
            AppContext {
                hw: device,
                theme,
                mesh,
                keypad,
                toast,
                launcher: registry,
                peers,
                net,
                requests,
            },
        )
    }

    // Capability accessors

    pub fn theme(&self) -> &ThemePalette {
        &self.theme
    }

    pub fn device(&self) -> &Device {
        &self.device
    }

    pub fn device_mut(&mut self) -> &mut Device {
        &mut self.device
    }

    pub fn mesh(&self) -> &N {
        &self.mesh
    }

    pub fn mesh_mut(&mut self) -> &mut N {
        &mut self.mesh
    }

    pub fn toast(&self) -> &ToastOverlay {
        &self.toast
    }

    pub fn toast_mut(&mut self) -> &mut ToastOverlay {
        &mut self.toast
    }

    pub fn registry(&self) -> &ShortcutRegistry {
        &self.registry
    }

    pub fn tasks(&self) -> &TaskManager {
        &self.tasks
    }

    pub fn tasks_mut(&mut self) -> &mut TaskManager {
        &mut self.tasks
    }

    pub fn foreground(&self) -> Option<AppId> {
        self.foreground
    }

    pub fn net_status(&self) -> NetStatus {
        self.net
    }

    pub fn diagnostics(&self) -> &DiagnosticLog {
        &self.diag
    }
}
