//! # SlateOS Host Daemon
//!
//! This crate runs the device kernel on a development host.
//!
//! ## Philosophy
//!
//! - **The kernel is unchanged**: the same crates that would drive the
//!   panel drive this process; only the HAL implementations differ
//! - **Deterministic first**: touch input comes from a script, the mesh
//!   node is the in-process simulator, storage is a plain directory
//! - **Bounded runs**: `--max-steps` makes demo runs reproducible

pub mod host;
pub mod runtime;
pub mod touch_script;

pub use host::{ConsoleDisplay, DirStorage, FileCredentials, SystemClock};
pub use runtime::{HostRuntime, HostRuntimeConfig, HostRuntimeError};
pub use touch_script::{parse_touch_script, TouchScriptError};
