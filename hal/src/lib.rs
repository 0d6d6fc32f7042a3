//! # Hardware Abstraction Layer (HAL)
//!
//! This crate defines the hardware collaborator traits.
//!
//! ## Philosophy
//!
//! **The kernel never touches hardware directly.**
//!
//! Every device the kernel or an application needs — display, touch panel,
//! storage, credential store, wireless link, clock — is reached through a
//! trait defined here. Concrete panels and buses live behind the boundary;
//! the whole system runs on a host against the in-memory implementations
//! shipped alongside each trait.
//!
//! ## Design Principles
//!
//! 1. **Poll-based**: Every device answers immediately; nothing blocks
//! 2. **Trait-per-device**: One concern per trait, mockable in isolation
//! 3. **Ready test doubles**: Each module ships a deterministic in-memory
//!    implementation next to the trait it implements
//! 4. **One bundle**: [`Device`] owns one of each and carries the per-tick
//!    input state

pub mod clock;
pub mod credentials;
pub mod device;
pub mod display;
pub mod link;
pub mod storage;
pub mod touch;

pub use clock::{Clock, ManualClock};
pub use credentials::{CredentialStore, MemoryCredentials};
pub use device::{Device, TouchState, WIFI_NAMESPACE};
pub use display::{DisplayPanel, DrawOp, RecordingDisplay, TextAnchor};
pub use link::{LinkStatus, NetworkInfo, StubLink, WirelessLink};
pub use storage::{MemoryStore, StorageError, StorageMedium};
pub use touch::{ScriptedTouch, TouchPanel};
