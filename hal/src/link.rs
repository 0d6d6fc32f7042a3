//! Wireless link abstraction
//!
//! Station-mode Wi-Fi as the kernel sees it: a link that can scan, join a
//! network, and report its state. An unready link is a normal state the UI
//! renders around, never a fault.

/// Link connection state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkStatus {
    Connected,
    Disconnected,
}

/// One network found by a scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkInfo {
    pub ssid: String,
    /// Signal strength in dBm
    pub rssi: i16,
}

/// A station-mode wireless link.
pub trait WirelessLink {
    fn status(&self) -> LinkStatus;

    /// Scans for nearby networks; may take a moment, called only from
    /// explicit user flows
    fn scan(&mut self) -> Vec<NetworkInfo>;

    /// Begins joining the named network; completion shows up in `status`
    fn connect(&mut self, ssid: &str, passphrase: &str);

    fn disconnect(&mut self);

    /// SSID of the joined (or joining) network
    fn ssid(&self) -> Option<String>;

    /// Passphrase of the joined network, for profile persistence
    fn passphrase(&self) -> Option<String>;

    /// Signal strength of the joined network in dBm
    fn rssi(&self) -> i16;

    /// Local address:port usable as a mesh driver endpoint, when connected
    fn local_endpoint(&self) -> Option<String>;
}

/// Deterministic link double.
///
/// `connect` succeeds against any of the configured networks; everything
/// else reads back the resulting state.
#[derive(Debug, Default)]
pub struct StubLink {
    networks: Vec<NetworkInfo>,
    joined: Option<(String, String)>,
    rssi: i16,
}

impl StubLink {
    pub fn new() -> Self {
        Self {
            networks: Vec::new(),
            joined: None,
            rssi: -127,
        }
    }

    /// Adds a network future scans will report
    pub fn add_network(&mut self, ssid: &str, rssi: i16) {
        self.networks.push(NetworkInfo {
            ssid: ssid.to_string(),
            rssi,
        });
    }
}

impl WirelessLink for StubLink {
    fn status(&self) -> LinkStatus {
        if self.joined.is_some() {
            LinkStatus::Connected
        } else {
            LinkStatus::Disconnected
        }
    }

    fn scan(&mut self) -> Vec<NetworkInfo> {
        self.networks.clone()
    }

    fn connect(&mut self, ssid: &str, passphrase: &str) {
        if let Some(info) = self.networks.iter().find(|n| n.ssid == ssid) {
            self.rssi = info.rssi;
            self.joined = Some((ssid.to_string(), passphrase.to_string()));
        }
    }

    fn disconnect(&mut self) {
        self.joined = None;
        self.rssi = -127;
    }

    fn ssid(&self) -> Option<String> {
        self.joined.as_ref().map(|(ssid, _)| ssid.clone())
    }

    fn passphrase(&self) -> Option<String> {
        self.joined.as_ref().map(|(_, pass)| pass.clone())
    }

    fn rssi(&self) -> i16 {
        self.rssi
    }

    fn local_endpoint(&self) -> Option<String> {
        self.joined.as_ref().map(|_| "10.0.0.2:9909".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connect_to_known_network() {
        let mut link = StubLink::new();
        link.add_network("Den", -58);
        assert_eq!(link.status(), LinkStatus::Disconnected);

        link.connect("Den", "hunter2");
        assert_eq!(link.status(), LinkStatus::Connected);
        assert_eq!(link.ssid().as_deref(), Some("Den"));
        assert_eq!(link.passphrase().as_deref(), Some("hunter2"));
        assert_eq!(link.rssi(), -58);
        assert!(link.local_endpoint().is_some());
    }

    #[test]
    fn test_connect_to_unknown_network_stays_down() {
        let mut link = StubLink::new();
        link.connect("Nowhere", "pw");
        assert_eq!(link.status(), LinkStatus::Disconnected);
        assert_eq!(link.local_endpoint(), None);
    }

    #[test]
    fn test_disconnect_clears_state() {
        let mut link = StubLink::new();
        link.add_network("Den", -58);
        link.connect("Den", "pw");
        link.disconnect();
        assert_eq!(link.status(), LinkStatus::Disconnected);
        assert_eq!(link.ssid(), None);
    }
}
