//! Deterministic in-process mesh node

use core_types::NodeId;
use std::collections::HashMap;
use std::collections::VecDeque;

use crate::event::{EventInbox, MeshEvent};
use crate::node::{
    CounterKind, Datagram, DeliveryPolicy, DiscoveryMode, LinkKind, MeshError, MeshNode,
};

/// In-process [`MeshNode`] with scripted traffic.
///
/// Tests and the host runtime feed it with [`SimMeshNode::inject_event`]
/// and [`SimMeshNode::deliver`]; everything the kernel or an application
/// sends is recorded and can be read back.
pub struct SimMeshNode {
    inbox: EventInbox,
    inbound: HashMap<NodeId, VecDeque<Datagram>>,
    sent: Vec<(NodeId, Datagram)>,
    locates: Vec<(NodeId, u16)>,
    identity: Option<NodeId>,
    accept_level: u8,
    delivery_policy: DeliveryPolicy,
    discovery_mode: DiscoveryMode,
    sync_error_budget_ms: u32,
    driver: Option<(LinkKind, String)>,
    discovery_rounds: u32,
    sent_count: u32,
    received_count: u32,
    routed_count: u32,
    clock_ms: u64,
}

impl SimMeshNode {
    pub fn new() -> Self {
        Self {
            inbox: EventInbox::default(),
            inbound: HashMap::new(),
            sent: Vec::new(),
            locates: Vec::new(),
            identity: None,
            accept_level: 0,
            delivery_policy: DeliveryPolicy::SkipOnFailure,
            discovery_mode: DiscoveryMode::Disabled,
            sync_error_budget_ms: 0,
            driver: None,
            discovery_rounds: 0,
            sent_count: 0,
            received_count: 0,
            routed_count: 0,
            clock_ms: 0,
        }
    }

    /// Queues an event for the next poll
    pub fn inject_event(&mut self, event: MeshEvent) {
        self.inbox.push(event);
    }

    /// Delivers a datagram from `from`, raising the matching event
    pub fn deliver(&mut self, from: NodeId, datagram: Datagram) {
        self.received_count += 1;
        self.inbox.push(MeshEvent::PayloadReceived {
            from,
            typeset: datagram.typeset,
            size: datagram.payload.len(),
        });
        self.inbound.entry(from).or_default().push_back(datagram);
    }

    /// Everything pushed so far, in order
    pub fn sent(&self) -> &[(NodeId, Datagram)] {
        &self.sent
    }

    /// Every locate request so far, in order
    pub fn locates(&self) -> &[(NodeId, u16)] {
        &self.locates
    }

    pub fn discovery_rounds(&self) -> u32 {
        self.discovery_rounds
    }

    pub fn driver(&self) -> Option<&(LinkKind, String)> {
        self.driver.as_ref()
    }

    /// Moves the network-synchronized clock forward
    pub fn advance_clock(&mut self, millis: u64) {
        self.clock_ms += millis;
    }
}

impl Default for SimMeshNode {
    fn default() -> Self {
        Self::new()
    }
}

impl MeshNode for SimMeshNode {
    fn init(&mut self, identity: NodeId, _sponsor: NodeId) -> Result<(), MeshError> {
        self.identity = Some(identity);
        Ok(())
    }

    fn set_accept_level(&mut self, level: u8) {
        self.accept_level = level;
    }

    fn set_delivery_policy(&mut self, policy: DeliveryPolicy) {
        self.delivery_policy = policy;
    }

    fn set_discovery_mode(&mut self, mode: DiscoveryMode) {
        self.discovery_mode = mode;
    }

    fn set_sync_error_budget(&mut self, max_error_ms: u32) {
        self.sync_error_budget_ms = max_error_ms;
    }

    fn poll(&mut self) -> Vec<MeshEvent> {
        self.inbox.drain()
    }

    fn push(&mut self, to: NodeId, datagram: Datagram) -> Result<(), MeshError> {
        self.sent_count += 1;
        self.sent.push((to, datagram));
        Ok(())
    }

    fn pull(&mut self, from: NodeId) -> Result<Option<Datagram>, MeshError> {
        Ok(self
            .inbound
            .get_mut(&from)
            .and_then(|queue| queue.pop_front()))
    }

    fn locate(&mut self, id: NodeId, typeset: u16) -> Result<(), MeshError> {
        self.locates.push((id, typeset));
        Ok(())
    }

    fn discovery(&mut self) {
        self.discovery_rounds += 1;
    }

    fn enable_driver(&mut self, kind: LinkKind, endpoint: &str) -> Result<(), MeshError> {
        self.driver = Some((kind, endpoint.to_string()));
        Ok(())
    }

    fn unbind_network(&mut self) {
        self.driver = None;
    }

    fn statistic(&self, counter: CounterKind) -> u32 {
        match counter {
            CounterKind::DatagramsSent => self.sent_count,
            CounterKind::DatagramsReceived => self.received_count,
            CounterKind::DatagramsRouted => self.routed_count,
        }
    }

    fn synced_timestamp(&self) -> u64 {
        self.clock_ms
    }

    fn version(&self) -> String {
        "sim-1.2.0".to_string()
    }
}
