//! Node operation surface

use core_types::NodeId;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::event::MeshEvent;

/// Physical transport a node driver can bind to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkKind {
    Inet4,
    Bluetooth,
}

/// Traffic counters a node maintains.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterKind {
    DatagramsSent,
    DatagramsReceived,
    DatagramsRouted,
}

/// What the node does with a datagram it cannot deliver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryPolicy {
    /// Drop and move on
    SkipOnFailure,
    /// Keep retrying until acknowledged
    Strict,
}

/// How eagerly the node takes part in peer discovery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscoveryMode {
    Disabled,
    /// Announce self, don't probe
    SenderOnly,
    Bidirectional,
}

/// A typed payload addressed to a peer or a segment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Datagram {
    pub typeset: u16,
    pub payload: Vec<u8>,
}

impl Datagram {
    pub fn new(typeset: u16, payload: Vec<u8>) -> Self {
        Self { typeset, payload }
    }

    /// Wraps a text message
    pub fn from_text(typeset: u16, text: &str) -> Self {
        Self::new(typeset, text.as_bytes().to_vec())
    }

    /// Payload interpreted as UTF-8, with invalid bytes replaced
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.payload).into_owned()
    }
}

/// Mesh operation errors.
#[derive(Debug, Error)]
pub enum MeshError {
    #[error("No driver bound for {0:?}")]
    DriverUnavailable(LinkKind),

    #[error("Peer unreachable: {0}")]
    Unreachable(NodeId),

    #[error("Node rejected operation: {0}")]
    Rejected(String),
}

/// The external network node, as the kernel is allowed to use it.
pub trait MeshNode {
    /// One-time identity setup at boot
    fn init(&mut self, identity: NodeId, sponsor: NodeId) -> Result<(), MeshError>;

    /// How permissive the node is toward inbound identifier requests
    fn set_accept_level(&mut self, level: u8);

    fn set_delivery_policy(&mut self, policy: DeliveryPolicy);

    fn set_discovery_mode(&mut self, mode: DiscoveryMode);

    /// Largest tolerated time-sync error, in milliseconds
    fn set_sync_error_budget(&mut self, max_error_ms: u32);

    /// Runs one slice of the protocol engine and drains pending events.
    ///
    /// MUST return without blocking; called once per kernel tick.
    fn poll(&mut self) -> Vec<MeshEvent>;

    /// Queues a datagram toward a peer or segment address
    fn push(&mut self, to: NodeId, datagram: Datagram) -> Result<(), MeshError>;

    /// Takes the next datagram received from `from`, if any
    fn pull(&mut self, from: NodeId) -> Result<Option<Datagram>, MeshError>;

    /// Asks the network to resolve a route for `id` carrying `typeset`
    fn locate(&mut self, id: NodeId, typeset: u16) -> Result<(), MeshError>;

    /// Starts a best-effort discovery round
    fn discovery(&mut self);

    /// Binds a transport driver to a local endpoint
    fn enable_driver(&mut self, kind: LinkKind, endpoint: &str) -> Result<(), MeshError>;

    /// Leaves the current network and releases the driver
    fn unbind_network(&mut self);

    /// Reads one traffic counter
    fn statistic(&self, counter: CounterKind) -> u32;

    /// Network-synchronized timestamp in milliseconds
    fn synced_timestamp(&self) -> u64;

    /// Protocol engine version string
    fn version(&self) -> String;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_datagram_text_roundtrip() {
        let d = Datagram::from_text(1, "ciao");
        assert_eq!(d.typeset, 1);
        assert_eq!(d.text(), "ciao");
    }

    #[test]
    fn test_datagram_text_lossy() {
        let d = Datagram::new(1, vec![0x68, 0x69, 0xFF]);
        assert_eq!(d.text(), "hi\u{FFFD}");
    }
}
