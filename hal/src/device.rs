//! The assembled device
//!
//! [`Device`] owns one boxed implementation of every collaborator trait and
//! carries the state that belongs to the hardware boundary itself: the
//! per-tick touch sample and the Wi-Fi profile restore/save flows.

use crate::clock::Clock;
use crate::credentials::CredentialStore;
use crate::display::DisplayPanel;
use crate::link::{LinkStatus, WirelessLink};
use crate::storage::StorageMedium;
use crate::touch::TouchPanel;
use core_types::{Point, Rect, Rgb565};

/// Credential namespace holding the saved Wi-Fi profile.
pub const WIFI_NAMESPACE: &str = "wifi";
const WIFI_SSID_KEY: &str = "ssid";
const WIFI_PASS_KEY: &str = "pass";

/// Latest touch sample, latched once per tick.
///
/// Coordinates keep their last pressed value while the finger is up,
/// matching how the panel hardware reports.
#[derive(Debug, Clone, Copy, Default)]
pub struct TouchState {
    pub pressed: bool,
    pub pos: Point,
}

/// The full hardware bundle handed to the kernel at boot.
pub struct Device {
    pub display: Box<dyn DisplayPanel>,
    pub touch_panel: Box<dyn TouchPanel>,
    pub storage: Box<dyn StorageMedium>,
    pub credentials: Box<dyn CredentialStore>,
    pub link: Box<dyn WirelessLink>,
    pub clock: Box<dyn Clock>,
    touch: TouchState,
}

impl Device {
    pub fn new(
        display: Box<dyn DisplayPanel>,
        touch_panel: Box<dyn TouchPanel>,
        storage: Box<dyn StorageMedium>,
        credentials: Box<dyn CredentialStore>,
        link: Box<dyn WirelessLink>,
        clock: Box<dyn Clock>,
    ) -> Self {
        Self {
            display,
            touch_panel,
            storage,
            credentials,
            link,
            clock,
            touch: TouchState::default(),
        }
    }

    /// Samples the touch panel into the latched state
    pub fn update_input(&mut self) {
        match self.touch_panel.sample() {
            Some(pos) => {
                self.touch.pressed = true;
                self.touch.pos = pos;
            }
            None => self.touch.pressed = false,
        }
    }

    /// Touch state latched by the last [`Device::update_input`]
    pub fn touch(&self) -> TouchState {
        self.touch
    }

    /// True while pressed inside `rect`
    pub fn touch_in_rect(&self, rect: Rect) -> bool {
        self.touch.pressed && rect.contains(self.touch.pos)
    }

    /// Clears the screen to `bg`
    pub fn reset_screen(&mut self, bg: Rgb565) {
        self.display.fill_screen(bg);
    }

    /// Monotonic milliseconds since boot
    pub fn now_ms(&mut self) -> u64 {
        self.clock.poll_millis()
    }

    /// Restores the saved Wi-Fi profile and begins joining it.
    ///
    /// Returns false when no profile is stored.
    pub fn restore_link(&mut self) -> bool {
        let Some(ssid) = self.credentials.read(WIFI_NAMESPACE, WIFI_SSID_KEY) else {
            return false;
        };
        if ssid.is_empty() {
            return false;
        }
        let pass = self
            .credentials
            .read(WIFI_NAMESPACE, WIFI_PASS_KEY)
            .unwrap_or_default();
        self.link.connect(&ssid, &pass);
        true
    }

    /// Persists the joined network as the Wi-Fi profile.
    ///
    /// Returns true only once the link reports connected and the profile
    /// was written.
    pub fn save_link_credentials(&mut self) -> bool {
        if self.link.status() != LinkStatus::Connected {
            return false;
        }
        let (Some(ssid), Some(pass)) = (self.link.ssid(), self.link.passphrase()) else {
            return false;
        };
        self.credentials
            .write(WIFI_NAMESPACE, WIFI_SSID_KEY, &ssid)
            .and_then(|_| self.credentials.write(WIFI_NAMESPACE, WIFI_PASS_KEY, &pass))
            .is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::credentials::MemoryCredentials;
    use crate::display::RecordingDisplay;
    use crate::link::StubLink;
    use crate::storage::MemoryStore;
    use crate::touch::ScriptedTouch;

    fn test_device(link: StubLink, creds: MemoryCredentials) -> Device {
        Device::new(
            Box::new(RecordingDisplay::new()),
            Box::new(ScriptedTouch::new()),
            Box::new(MemoryStore::new()),
            Box::new(creds),
            Box::new(link),
            Box::new(ManualClock::new()),
        )
    }

    #[test]
    fn test_touch_latches_last_position() {
        let mut touch = ScriptedTouch::new();
        touch.press(100, 200);
        touch.idle(1);
        let mut device = Device::new(
            Box::new(RecordingDisplay::new()),
            Box::new(touch),
            Box::new(MemoryStore::new()),
            Box::new(MemoryCredentials::new()),
            Box::new(StubLink::new()),
            Box::new(ManualClock::new()),
        );

        device.update_input();
        assert!(device.touch().pressed);
        assert!(device.touch_in_rect(Rect::new(90, 190, 20, 20)));

        device.update_input();
        assert!(!device.touch().pressed);
        assert!(!device.touch_in_rect(Rect::new(90, 190, 20, 20)));
        assert_eq!(device.touch().pos, Point::new(100, 200));
    }

    #[test]
    fn test_restore_link_with_saved_profile() {
        let mut creds = MemoryCredentials::new();
        creds.write(WIFI_NAMESPACE, "ssid", "Den").unwrap();
        creds.write(WIFI_NAMESPACE, "pass", "hunter2").unwrap();
        let mut link = StubLink::new();
        link.add_network("Den", -60);

        let mut device = test_device(link, creds);
        assert!(device.restore_link());
        assert_eq!(device.link.status(), LinkStatus::Connected);
    }

    #[test]
    fn test_restore_link_without_profile() {
        let mut device = test_device(StubLink::new(), MemoryCredentials::new());
        assert!(!device.restore_link());
    }

    #[test]
    fn test_save_link_credentials_requires_connection() {
        let mut device = test_device(StubLink::new(), MemoryCredentials::new());
        assert!(!device.save_link_credentials());

        let mut link = StubLink::new();
        link.add_network("Den", -60);
        let mut device = test_device(link, MemoryCredentials::new());
        device.link.connect("Den", "hunter2");
        assert!(device.save_link_credentials());
        assert_eq!(
            device.credentials.read(WIFI_NAMESPACE, "ssid").as_deref(),
            Some("Den")
        );
        assert_eq!(
            device.credentials.read(WIFI_NAMESPACE, "pass").as_deref(),
            Some("hunter2")
        );
    }
}
