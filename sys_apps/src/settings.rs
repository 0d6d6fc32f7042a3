//! Settings dashboard application

use app_api::{AppContext, AppCore, Application};
use core_types::{Point, Rect};
use hal::{LinkStatus, NetworkInfo, TextAnchor};
use mesh_api::{CounterKind, LinkKind};
use services_toast::ToastStyle;

use crate::widgets::{draw_button, draw_header, draw_signal_bars, draw_tile};
use crate::{press_edge, HOME_APP_ID, SETTINGS_APP_ID};

const LIST_ITEM_H: i32 = 50;
const MAX_LISTED_NETWORKS: usize = 5;
const STATS_REFRESH_MS: u64 = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SettingsPage {
    Main,
    WifiScan,
    WifiPassword,
    Mesh,
    Stats,
}

/// Dashboard over the device radios, the mesh node and system stats.
pub struct SettingsApp {
    core: AppCore,
    page: SettingsPage,
    bt_enabled: bool,
    session_saved: bool,
    target_ssid: String,
    scanned: Vec<NetworkInfo>,
    last_stats_ms: u64,
    local_din: u64,
    touch_was_down: bool,
}

impl SettingsApp {
    pub fn new() -> Self {
        Self {
            core: AppCore::new(SETTINGS_APP_ID),
            page: SettingsPage::Main,
            bt_enabled: false,
            session_saved: true,
            target_ssid: String::new(),
            scanned: Vec::new(),
            last_stats_ms: 0,
            local_din: 123_456_789,
            touch_was_down: false,
        }
    }

    fn goto(&mut self, page: SettingsPage) {
        self.page = page;
        self.core.needs_redraw = true;
    }

    // --- Main dashboard ---

    fn draw_main(&mut self, ctx: &mut AppContext) {
        let theme = *ctx.theme;
        let wifi_up = ctx.hw.link.status() == LinkStatus::Connected;
        let mesh_joined = ctx.net.mesh_joined;
        let display = ctx.hw.display.as_mut();

        draw_header(display, &theme, "DASHBOARD", true);
        draw_tile(
            display,
            &theme,
            0,
            "Wi-Fi",
            if wifi_up { "Online" } else { "Offline" },
            if wifi_up { theme.accent_primary } else { theme.text_muted },
        );
        draw_tile(
            display,
            &theme,
            1,
            "Bluetooth",
            if self.bt_enabled { "Active" } else { "Disabled" },
            if self.bt_enabled { theme.accent_primary } else { theme.text_muted },
        );
        draw_tile(
            display,
            &theme,
            2,
            "Mesh Cloud",
            if mesh_joined { "Connected" } else { "Configure" },
            if mesh_joined { theme.accent_primary } else { theme.accent_warn },
        );
        draw_tile(display, &theme, 3, "System", "View Stats", theme.accent_alert);
    }

    fn handle_main_touch(&mut self, ctx: &mut AppContext, at: Point) {
        if at.y < 50 && at.x < 50 {
            ctx.request_launch(HOME_APP_ID);
            return;
        }

        let row = if at.y > 60 && at.y < 150 {
            0
        } else if at.y > 160 && at.y < 250 {
            1
        } else {
            return;
        };
        let col = i32::from(at.x >= 120);

        match row * 2 + col {
            0 => self.goto(SettingsPage::WifiScan),
            1 => {
                self.bt_enabled = !self.bt_enabled;
                self.core.needs_redraw = true;
            }
            2 => self.goto(SettingsPage::Mesh),
            3 => self.goto(SettingsPage::Stats),
            _ => {}
        }
    }

    // --- Wi-Fi scan list ---

    fn draw_wifi_page(&mut self, ctx: &mut AppContext) {
        let theme = *ctx.theme;
        draw_header(ctx.hw.display.as_mut(), &theme, "SCANNING...", true);

        self.scanned = ctx.hw.link.scan();

        let display = ctx.hw.display.as_mut();
        draw_header(display, &theme, "WI-FI", true);
        if self.scanned.is_empty() {
            display.draw_text("No AP Found", 20, 60, TextAnchor::TopLeft, theme.text_muted, Some(theme.bg));
            return;
        }
        for (i, network) in self.scanned.iter().take(MAX_LISTED_NETWORKS).enumerate() {
            let y = 50 + i as i32 * LIST_ITEM_H;
            let w = display.width();
            let mut ssid = network.ssid.clone();
            if ssid.len() > 10 {
                ssid.truncate(9);
                ssid.push('.');
            }
            display.fill_rect(Rect::new(5, y, w - 10, LIST_ITEM_H - 5), theme.panel_bg);
            display.draw_rect(Rect::new(5, y, w - 10, LIST_ITEM_H - 5), theme.border);
            display.draw_text(
                &format!("{} ({})", ssid, network.rssi),
                15,
                y + LIST_ITEM_H / 2 - 2,
                TextAnchor::MiddleLeft,
                theme.text_main,
                Some(theme.panel_bg),
            );
            display.draw_text(
                ">",
                w - 15,
                y + LIST_ITEM_H / 2 - 2,
                TextAnchor::MiddleRight,
                theme.text_main,
                Some(theme.panel_bg),
            );
        }
    }

    fn handle_wifi_touch(&mut self, _ctx: &mut AppContext, at: Point) {
        if at.y < 40 && at.x < 50 {
            self.goto(SettingsPage::Main);
            return;
        }
        if at.y < 50 {
            return;
        }
        let index = ((at.y - 50) / LIST_ITEM_H) as usize;
        if index < self.scanned.len().min(MAX_LISTED_NETWORKS) {
            self.target_ssid = self.scanned[index].ssid.clone();
            self.goto(SettingsPage::WifiPassword);
        }
    }

    fn run_password_entry(&mut self, ctx: &mut AppContext) {
        if self.core.needs_redraw {
            ctx.keypad.begin("Enter Wi-Fi password:", "");
            self.core.needs_redraw = false;
        }
        ctx.keypad_tick();

        if !ctx.keypad.is_done() {
            return;
        }
        if !ctx.keypad.was_cancelled() {
            let pass = ctx.keypad.result().to_string();
            ctx.hw.link.disconnect();
            ctx.hw.link.connect(&self.target_ssid, &pass);
            // the auto-save in on_update persists the profile once the
            // link actually comes up
            self.session_saved = false;
        }
        self.goto(SettingsPage::Main);
    }

    // --- Mesh node page ---

    fn draw_mesh_page(&mut self, ctx: &mut AppContext) {
        let theme = *ctx.theme;
        let wifi_up = ctx.hw.link.status() == LinkStatus::Connected;
        let endpoint = ctx.hw.link.local_endpoint();
        let bt_ready = self.bt_enabled;
        let display = ctx.hw.display.as_mut();
        let w = display.width();

        draw_header(display, &theme, "MESH CONFIG", true);

        // connection status card
        let card = Rect::new(10, 60, w - 20, 90);
        display.fill_round_rect(card, 8, theme.panel_bg);
        display.draw_round_rect(card, 8, theme.border);

        let status_color = if wifi_up || bt_ready {
            theme.accent_primary
        } else {
            theme.accent_alert
        };
        display.fill_circle(30, 85, 6, status_color);
        let status_label = if wifi_up {
            "Wi-Fi Active"
        } else if bt_ready {
            "Bluetooth Active"
        } else {
            "No Connection"
        };
        display.draw_text(status_label, 45, 85, TextAnchor::MiddleLeft, theme.text_main, Some(theme.panel_bg));

        let uri = match (&endpoint, bt_ready) {
            (Some(endpoint), _) => endpoint.clone(),
            (None, true) => format!("bt:{}", self.local_din),
            (None, false) => "Unavailable".to_string(),
        };
        display.draw_text(&uri, 30, 115, TextAnchor::MiddleLeft, theme.text_muted, Some(theme.panel_bg));

        if wifi_up || bt_ready {
            draw_button(
                display,
                &theme,
                Rect::new(10, 170, w - 20, 45),
                "ENABLE DRIVER",
                theme.accent_primary,
                theme.text_main,
            );
        } else {
            // no link: the affordance renders disabled instead of failing
            draw_button(
                display,
                &theme,
                Rect::new(10, 170, w - 20, 45),
                "No Link Available",
                theme.panel_shadow,
                theme.text_muted,
            );
        }

        let btn_w = (w - 30) / 2;
        draw_button(
            display,
            &theme,
            Rect::new(10, 230, btn_w, 45),
            "UNBIND",
            theme.accent_alert,
            theme.text_main,
        );
        draw_button(
            display,
            &theme,
            Rect::new(20 + btn_w, 230, btn_w, 45),
            "DISCOVER",
            theme.accent_warn,
            theme.text_main,
        );
    }

    fn handle_mesh_touch(&mut self, ctx: &mut AppContext, at: Point) {
        let w = ctx.hw.display.width();
        if at.y < 50 && at.x < 50 {
            self.goto(SettingsPage::Main);
            return;
        }

        if Rect::new(10, 170, w - 20, 45).contains(at) {
            let endpoint = ctx.hw.link.local_endpoint();
            if let Some(endpoint) = endpoint {
                match ctx.mesh.enable_driver(LinkKind::Inet4, &endpoint) {
                    Ok(()) => ctx.show_toast("Driver Enabled (Wi-Fi)", ToastStyle::Info, 2500),
                    Err(_) => ctx.show_toast("Driver refused endpoint", ToastStyle::Error, 2500),
                }
            } else if self.bt_enabled {
                let uri = format!("bt:{}", self.local_din);
                match ctx.mesh.enable_driver(LinkKind::Bluetooth, &uri) {
                    Ok(()) => ctx.show_toast("Driver Enabled (BT)", ToastStyle::Info, 2500),
                    Err(_) => ctx.show_toast("Driver refused endpoint", ToastStyle::Error, 2500),
                }
            }
            return;
        }

        let btn_w = (w - 30) / 2;
        if Rect::new(10, 230, btn_w, 45).contains(at) {
            ctx.mesh.unbind_network();
            ctx.net.mesh_joined = false;
            self.core.needs_redraw = true;
            ctx.show_toast("Network Unbound", ToastStyle::Info, 2500);
            return;
        }
        if Rect::new(20 + btn_w, 230, btn_w, 45).contains(at) {
            ctx.mesh.discovery();
            ctx.show_toast("Discovery Started", ToastStyle::Info, 1000);
        }
    }

    // --- Stats page ---

    fn draw_stats_page(&mut self, ctx: &mut AppContext) {
        let theme = *ctx.theme;
        let sent = ctx.mesh.statistic(CounterKind::DatagramsSent);
        let received = ctx.mesh.statistic(CounterKind::DatagramsReceived);
        let routed = ctx.mesh.statistic(CounterKind::DatagramsRouted);
        let version = ctx.mesh.version();
        let uptime_s = ctx.hw.now_ms() / 1000;
        let wifi_up = ctx.hw.link.status() == LinkStatus::Connected;
        let rssi = ctx.hw.link.rssi();
        let display = ctx.hw.display.as_mut();
        let w = display.width();
        let m = 10;

        draw_header(display, &theme, "SYSTEM STATS", true);

        // traffic card: three counters side by side
        let traffic = Rect::new(m, 60, w - 2 * m, 80);
        display.fill_round_rect(traffic, 8, theme.panel_bg);
        display.draw_round_rect(traffic, 8, theme.border);
        display.draw_text(
            "MESH TRAFFIC",
            m + 10,
            65,
            TextAnchor::TopLeft,
            theme.accent_primary,
            Some(theme.panel_bg),
        );

        let col_w = (w - 2 * m) / 3;
        let columns = [
            ("SENT", sent, theme.text_main),
            ("RECV", received, theme.accent_primary),
            ("ROUT", routed, theme.accent_warn),
        ];
        for (i, (label, value, color)) in columns.iter().enumerate() {
            let center = m + i as i32 * col_w + col_w / 2;
            display.draw_text(
                &value.to_string(),
                center,
                90,
                TextAnchor::TopCenter,
                *color,
                Some(theme.panel_bg),
            );
            display.draw_text(label, center, 110, TextAnchor::TopCenter, theme.text_muted, Some(theme.panel_bg));
            if i < 2 {
                display.draw_vline(m + (i as i32 + 1) * col_w, 90, 30, theme.border);
            }
        }

        // system card: uptime and node version
        let system = Rect::new(m, 150, w - 2 * m, 90);
        display.fill_round_rect(system, 8, theme.panel_bg);
        display.draw_text("Up:", m + 15, 170, TextAnchor::TopLeft, theme.text_muted, Some(theme.panel_bg));
        display.draw_text(
            &format!("{uptime_s}s"),
            w / 2 - 5,
            170,
            TextAnchor::TopRight,
            theme.text_main,
            Some(theme.panel_bg),
        );
        display.draw_text("Ver:", w / 2 + 10, 170, TextAnchor::TopLeft, theme.text_muted, Some(theme.panel_bg));
        display.draw_text(
            &version,
            w - m - 15,
            170,
            TextAnchor::TopRight,
            theme.text_main,
            Some(theme.panel_bg),
        );
        display.draw_vline(w / 2, 165, 60, theme.border);

        // signal card
        let signal = Rect::new(m, 250, w - 2 * m, 50);
        display.fill_round_rect(signal, 8, theme.panel_bg);
        display.draw_text(
            "Wi-Fi Signal",
            m + 15,
            275,
            TextAnchor::MiddleLeft,
            theme.text_main,
            Some(theme.panel_bg),
        );
        let bars = if wifi_up {
            match rssi {
                r if r > -55 => 4,
                r if r > -65 => 3,
                r if r > -75 => 2,
                r if r > -85 => 1,
                _ => 0,
            }
        } else {
            0
        };
        let lit_color = if bars < 2 { theme.accent_alert } else { theme.accent_primary };
        draw_signal_bars(display, &theme, w - m - 70, 285, 4, bars, lit_color);
        display.draw_text(
            &format!("{rssi}dBm"),
            w - m - 10,
            260,
            TextAnchor::TopRight,
            theme.text_muted,
            Some(theme.panel_bg),
        );
    }

    fn handle_stats_touch(&mut self, _ctx: &mut AppContext, at: Point) {
        if at.y < 40 && at.x < 100 {
            self.goto(SettingsPage::Main);
        }
    }
}

impl Default for SettingsApp {
    fn default() -> Self {
        Self::new()
    }
}

impl Application for SettingsApp {
    fn core(&self) -> &AppCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut AppCore {
        &mut self.core
    }

    fn on_start(&mut self, _ctx: &mut AppContext) {
        self.page = SettingsPage::Main;
        self.core.needs_redraw = true;
    }

    fn on_update(&mut self, ctx: &mut AppContext) {
        // persist the profile once a changed link actually comes up
        if ctx.hw.link.status() == LinkStatus::Connected && !self.session_saved {
            self.session_saved = ctx.hw.save_link_credentials();
            self.core.needs_redraw = true;
        }

        let touched = press_edge(&mut self.touch_was_down, ctx.hw.touch());
        match self.page {
            SettingsPage::Main => {
                if self.core.needs_redraw {
                    self.draw_main(ctx);
                    self.core.needs_redraw = false;
                }
                if let Some(at) = touched {
                    self.handle_main_touch(ctx, at);
                }
            }
            SettingsPage::WifiScan => {
                if self.core.needs_redraw {
                    self.draw_wifi_page(ctx);
                    self.core.needs_redraw = false;
                }
                if let Some(at) = touched {
                    self.handle_wifi_touch(ctx, at);
                }
            }
            SettingsPage::WifiPassword => self.run_password_entry(ctx),
            SettingsPage::Mesh => {
                if self.core.needs_redraw {
                    self.draw_mesh_page(ctx);
                    self.core.needs_redraw = false;
                }
                if let Some(at) = touched {
                    self.handle_mesh_touch(ctx, at);
                }
            }
            SettingsPage::Stats => {
                let now = ctx.hw.now_ms();
                if self.core.needs_redraw || now - self.last_stats_ms > STATS_REFRESH_MS {
                    self.draw_stats_page(ctx);
                    self.core.needs_redraw = false;
                    self.last_stats_ms = now;
                }
                if let Some(at) = touched {
                    self.handle_stats_touch(ctx, at);
                }
            }
        }
    }

    fn on_draw(&mut self, _ctx: &mut AppContext) {}

    fn on_exit(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_on_main_page() {
        let app = SettingsApp::new();
        assert_eq!(app.page, SettingsPage::Main);
        assert!(app.session_saved);
    }
}
