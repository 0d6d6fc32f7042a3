//! Identifiers for applications and mesh peers

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of an application.
///
/// The value range encodes the kind: ids below 64 are system (built-in)
/// applications, ids from 64 upward are external (installed) applications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AppId(u8);

impl AppId {
    /// First id of the external range.
    pub const EXTERNAL_BASE: u8 = 64;

    /// Creates an application id from its raw value
    pub const fn new(raw: u8) -> Self {
        Self(raw)
    }

    /// Returns the raw id value
    pub const fn raw(self) -> u8 {
        self.0
    }

    /// Returns true for system (built-in) applications
    pub const fn is_system(self) -> bool {
        self.0 < Self::EXTERNAL_BASE
    }

    /// Returns true for external (installed) applications
    pub const fn is_external(self) -> bool {
        !self.is_system()
    }
}

impl fmt::Display for AppId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "App({})", self.0)
    }
}

/// Identifier of a running application, derived from its slot.
///
/// A value of 0 means "not started yet"; a started application holds
/// `slot index + 1`. Assignment is the slot table's job; applications
/// only ever read it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ProcessId(u8);

impl ProcessId {
    /// The "not started yet" sentinel.
    pub const UNASSIGNED: Self = Self(0);

    /// Derives the process id for an opened slot index (1-based)
    pub const fn from_slot(slot: usize) -> Self {
        Self(slot as u8 + 1)
    }

    /// Returns the raw value (0 when unassigned)
    pub const fn raw(self) -> u8 {
        self.0
    }

    /// Returns true once a slot has been assigned
    pub const fn is_assigned(self) -> bool {
        self.0 != 0
    }
}

impl fmt::Display for ProcessId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Pid({})", self.0)
    }
}

/// Kind of an application shortcut.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppKind {
    /// Built into the firmware, dispatched by exec token
    Internal,
    /// Installed from storage
    External,
}

/// 64-bit identifier of a remote mesh peer.
///
/// The top 20 bits form the peer's [`Segment`]; the peer directory treats
/// two identifiers sharing a segment as the same peer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(u64);

impl NodeId {
    /// Creates a peer identifier from its raw wire value
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw wire value
    pub const fn raw(self) -> u64 {
        self.0
    }

    /// Returns the top-20-bit segment of this identifier
    pub const fn segment(self) -> Segment {
        Segment((self.0 >> 44) as u32)
    }

    /// Returns the segment as an addressable identifier.
    ///
    /// Datagrams routed to a whole segment are pushed to this value.
    pub const fn segment_address(self) -> NodeId {
        NodeId(self.0 >> 44)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Node({:#018x})", self.0)
    }
}

/// Top-20-bit grouping of a [`NodeId`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Segment(u32);

impl Segment {
    /// Returns the raw segment value
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Segment({:#07x})", self.0)
    }
}
