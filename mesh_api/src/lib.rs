//! # Mesh API
//!
//! The boundary to the external mesh network node.
//!
//! ## Philosophy
//!
//! The node's protocol engine — synchronization, routing, driver binding —
//! is a black box. The kernel only calls a fixed operation set and reacts
//! to a fixed callback surface:
//!
//! - **Operations** are methods on [`MeshNode`]; `poll` is the only one on
//!   the tick path and is required to return without blocking. If it
//!   blocks, the whole device UI stalls — that contract sits on the node
//!   implementation, not on the kernel.
//! - **Callbacks** are [`MeshEvent`] values. Whatever interrupt or buffer
//!   machinery a node uses internally, events surface only through the
//!   bounded [`EventInbox`] drained synchronously by `poll`, preserving the
//!   single thread of control.
//!
//! [`SimMeshNode`] is the deterministic in-process node used by the host
//! runtime and by tests.

pub mod event;
pub mod node;
pub mod sim;

pub use event::{EventInbox, MeshEvent, DEFAULT_INBOX_CAPACITY};
pub use node::{
    CounterKind, Datagram, DeliveryPolicy, DiscoveryMode, LinkKind, MeshError, MeshNode,
};
pub use sim::SimMeshNode;
