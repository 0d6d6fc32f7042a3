//! Host runtime
//!
//! Assembles a host device around the kernel and drives the tick loop.

use crate::host::{ConsoleDisplay, DirStorage, FileCredentials, SystemClock};
use crate::touch_script::{parse_touch_script, TouchScriptError};
use core_types::NodeId;
use hal::{Device, ScriptedTouch, StorageError, StubLink};
use kernel::Kernel;
use mesh_api::{MeshEvent, SimMeshNode};
use services_tasks::TaskError;
use std::path::PathBuf;
use std::thread;
use std::time::Duration;
use sys_apps::{HomeApp, MessengerApp, SettingsApp, HOME_APP_ID};
use thiserror::Error;

/// Host runtime error types.
#[derive(Debug, Error)]
pub enum HostRuntimeError {
    #[error("State directory unusable: {0}")]
    Storage(#[from] StorageError),

    #[error("Touch script rejected: {0}")]
    Script(#[from] TouchScriptError),

    #[error("Task table: {0}")]
    Tasks(#[from] TaskError),
}

/// Host runtime configuration.
#[derive(Debug, Clone)]
pub struct HostRuntimeConfig {
    /// Directory holding the registry resource and credentials
    pub state_dir: PathBuf,
    /// Optional touch script text
    pub script: Option<String>,
    /// Ticks to run before exiting (0 = run until killed)
    pub max_steps: u64,
    /// Demo peers to announce right after boot
    pub seed_peers: u32,
    /// Echo drawn text runs to stdout
    pub echo_draw: bool,
}

impl Default for HostRuntimeConfig {
    fn default() -> Self {
        Self {
            state_dir: PathBuf::from("./slate-state"),
            script: None,
            max_steps: 0,
            seed_peers: 0,
            echo_draw: false,
        }
    }
}

/// The assembled host: kernel + host HAL + simulated mesh.
pub struct HostRuntime {
    kernel: Kernel<SimMeshNode>,
    config: HostRuntimeConfig,
    steps: u64,
}

impl HostRuntime {
    /// Builds the device, boots the kernel and launches the home app
    pub fn new(config: HostRuntimeConfig) -> Result<Self, HostRuntimeError> {
        let storage = DirStorage::open(&config.state_dir)?;
        let credentials = FileCredentials::open(config.state_dir.join("credentials.json"));

        let touch = match &config.script {
            Some(text) => parse_touch_script(text)?,
            None => ScriptedTouch::new(),
        };

        let mut link = StubLink::new();
        link.add_network("HomeNet", -55);
        link.add_network("Workshop", -72);

        let device = Device::new(
            Box::new(ConsoleDisplay::new(config.echo_draw)),
            Box::new(touch),
            Box::new(storage),
            Box::new(credentials),
            Box::new(link),
            Box::new(SystemClock::new()),
        );

        let mut kernel = Kernel::new(device, SimMeshNode::new());
        kernel.boot();
        kernel.register_application(Box::new(HomeApp::new()))?;
        kernel.register_application(Box::new(SettingsApp::new()))?;
        kernel.register_application(Box::new(MessengerApp::new()))?;

        for i in 0..config.seed_peers {
            // one peer per segment so each survives deduplication
            let id = NodeId::new((u64::from(i) + 1) << 44);
            kernel
                .mesh_mut()
                .inject_event(MeshEvent::IdentifierAccepted(id));
        }
        if config.seed_peers > 0 {
            kernel.mesh_mut().inject_event(MeshEvent::JoinedNetwork {
                network: NodeId::new(1 << 44),
                node: NodeId::new(0),
            });
        }

        kernel.launch_app(HOME_APP_ID);

        Ok(Self {
            kernel,
            config,
            steps: 0,
        })
    }

    /// Drives the run loop until the step budget is spent
    pub fn run(&mut self) {
        loop {
            self.kernel.run();
            self.steps += 1;
            if self.config.max_steps > 0 && self.steps >= self.config.max_steps {
                return;
            }
            thread::sleep(Duration::from_millis(10));
        }
    }

    /// Ticks executed so far
    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn kernel(&self) -> &Kernel<SimMeshNode> {
        &self.kernel
    }

    pub fn kernel_mut(&mut self) -> &mut Kernel<SimMeshNode> {
        &mut self.kernel
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn config_in(dir: &std::path::Path) -> HostRuntimeConfig {
        HostRuntimeConfig {
            state_dir: dir.join("state"),
            script: None,
            max_steps: 5,
            seed_peers: 2,
            echo_draw: false,
        }
    }

    #[test]
    fn test_runtime_boots_and_runs_bounded() {
        let dir = tempdir().unwrap();
        let mut runtime = HostRuntime::new(config_in(dir.path())).unwrap();
        runtime.run();

        assert_eq!(runtime.steps(), 5);
        assert_eq!(runtime.kernel().foreground(), Some(HOME_APP_ID));
        // both seeded peers land in distinct segments
        assert_eq!(runtime.kernel().discovered_nodes().len(), 2);
        assert!(runtime.kernel().net_status().mesh_joined);
    }

    #[test]
    fn test_runtime_rejects_bad_script() {
        let dir = tempdir().unwrap();
        let config = HostRuntimeConfig {
            script: Some("swipe 1 2".to_string()),
            ..config_in(dir.path())
        };
        assert!(matches!(
            HostRuntime::new(config),
            Err(HostRuntimeError::Script(_))
        ));
    }

    #[test]
    fn test_registry_persists_across_runtimes() {
        let dir = tempdir().unwrap();
        let config = config_in(dir.path());

        {
            let mut runtime = HostRuntime::new(config.clone()).unwrap();
            runtime
                .kernel_mut()
                .install_shortcut("Doom", "/doom.bin", core_types::Rgb565::new(0xF800))
                .unwrap();
        }

        let runtime = HostRuntime::new(config).unwrap();
        assert_eq!(runtime.kernel().registry().len(), 3);
    }
}
