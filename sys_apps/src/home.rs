//! Home grid application

use app_api::{AppContext, AppCore, Application};
use core_types::{AppKind, Point, Rect, Rgb565};
use hal::{LinkStatus, TextAnchor};
use services_launcher::{EXEC_MESSENGER, EXEC_SETTINGS};
use services_toast::ToastStyle;

use crate::{press_edge, HOME_APP_ID, MESSENGER_APP_ID, SETTINGS_APP_ID};

const COLS: usize = 3;
const ROWS: usize = 3;
const ICON_SIZE: i32 = 60;
const GAP: i32 = 15;
const START_X: i32 = 15;
const START_Y: i32 = 60;
const ROW_STEP: i32 = ICON_SIZE + 35;
const STATUS_BAR_H: i32 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HomePage {
    Grid,
    /// Naming a new shortcut through the shared keypad
    NameEntry,
}

/// The launcher grid: one tile per shortcut plus an install tile.
pub struct HomeApp {
    core: AppCore,
    page: HomePage,
    touch_was_down: bool,
}

impl HomeApp {
    pub fn new() -> Self {
        Self {
            core: AppCore::new(HOME_APP_ID),
            page: HomePage::Grid,
            touch_was_down: false,
        }
    }

    fn tile_origin(index: usize) -> Point {
        let col = (index % COLS) as i32;
        let row = (index / COLS) as i32;
        Point::new(START_X + col * (ICON_SIZE + GAP), START_Y + row * ROW_STEP)
    }

    fn draw_icon(ctx: &mut AppContext, index: usize, label: &str, color: Rgb565, add_tile: bool) {
        let theme = *ctx.theme;
        let origin = Self::tile_origin(index);
        let display = ctx.hw.display.as_mut();

        display.fill_round_rect(
            Rect::new(origin.x, origin.y + 4, ICON_SIZE, ICON_SIZE),
            14,
            theme.panel_shadow,
        );
        display.fill_round_rect(Rect::new(origin.x, origin.y, ICON_SIZE, ICON_SIZE), 14, color);

        let glyph_color = if add_tile { theme.text_muted } else { theme.text_main };
        let glyph = if add_tile {
            "+".to_string()
        } else {
            label.chars().next().unwrap_or('?').to_uppercase().to_string()
        };
        display.draw_text(
            &glyph,
            origin.x + ICON_SIZE / 2,
            origin.y + ICON_SIZE / 2,
            TextAnchor::MiddleCenter,
            glyph_color,
            None,
        );

        display.draw_text(
            label,
            origin.x + ICON_SIZE / 2,
            origin.y + ICON_SIZE + 8,
            TextAnchor::TopCenter,
            theme.text_main,
            Some(theme.bg),
        );
    }

    fn draw_status_bar(ctx: &mut AppContext) {
        let theme = *ctx.theme;
        let up_seconds = ctx.mesh.synced_timestamp() / 1000;
        let link_up = ctx.hw.link.status() == LinkStatus::Connected;
        let rssi = ctx.hw.link.rssi();
        let display = ctx.hw.display.as_mut();
        let w = display.width();

        display.fill_rect(Rect::new(0, 0, w, STATUS_BAR_H), theme.header_bg);
        display.draw_hline(0, STATUS_BAR_H, w, theme.panel_shadow);

        let mins = (up_seconds / 60) % 60;
        let hrs = (up_seconds / 3600) % 24;
        display.draw_text(
            &format!("{hrs:02}:{mins:02}"),
            8,
            STATUS_BAR_H / 2,
            TextAnchor::MiddleLeft,
            theme.text_main,
            Some(theme.header_bg),
        );

        // battery glyph, right-aligned
        let mut x = w - 10;
        let y_center = STATUS_BAR_H / 2;
        display.draw_rect(Rect::new(x - 20, y_center - 5, 18, 10), theme.text_muted);
        display.fill_rect(Rect::new(x - 18, y_center - 3, 10, 6), theme.text_main);
        display.fill_rect(Rect::new(x - 2, y_center - 2, 2, 4), theme.text_muted);
        x -= 28;

        if link_up {
            for i in 0..3 {
                let bar_h = 4 + i * 3;
                let lit = i == 0 || (i == 1 && rssi > -80) || (i == 2 && rssi > -60);
                let color = if lit { theme.text_main } else { theme.panel_shadow };
                display.fill_rect(Rect::new(x - 10 + i * 4, y_center + 5 - bar_h, 3, bar_h), color);
            }
        } else {
            display.draw_text(
                "x",
                x,
                y_center,
                TextAnchor::MiddleRight,
                theme.text_muted,
                Some(theme.header_bg),
            );
        }
    }

    fn draw_grid(&mut self, ctx: &mut AppContext) {
        let bg = ctx.theme.bg;
        ctx.hw.reset_screen(bg);
        Self::draw_status_bar(ctx);

        let shortcuts: Vec<(String, Rgb565)> = ctx
            .launcher
            .shortcuts()
            .iter()
            .map(|s| (s.name.clone(), s.color))
            .collect();

        let mut count = 0;
        for (name, color) in &shortcuts {
            if count / COLS >= ROWS {
                break;
            }
            Self::draw_icon(ctx, count, name, *color, false);
            count += 1;
        }
        if count / COLS < ROWS {
            let panel = ctx.theme.panel_bg;
            Self::draw_icon(ctx, count, "Add", panel, true);
        }
    }

    fn highlight_tile(ctx: &mut AppContext, index: usize) {
        let accent = ctx.theme.accent_primary;
        let origin = Self::tile_origin(index);
        ctx.hw.display.draw_round_rect(
            Rect::new(origin.x - 2, origin.y - 2, ICON_SIZE + 4, ICON_SIZE + 4),
            16,
            accent,
        );
    }

    fn handle_grid_touch(&mut self, ctx: &mut AppContext, at: Point) {
        // taps on the status bar are dead
        if at.y < STATUS_BAR_H + 10 {
            return;
        }

        let total = ctx.launcher.shortcuts().len() + 1;
        for index in 0..total {
            let origin = Self::tile_origin(index);
            if !Rect::new(origin.x, origin.y, ICON_SIZE, ICON_SIZE).contains(at) {
                continue;
            }
            Self::highlight_tile(ctx, index);

            if index == total - 1 {
                self.page = HomePage::NameEntry;
                self.core.needs_redraw = true;
                return;
            }

            let (kind, exec_path) = {
                let shortcut = &ctx.launcher.shortcuts()[index];
                (shortcut.kind, shortcut.exec_path.clone())
            };
            match kind {
                AppKind::Internal => {
                    if exec_path == EXEC_SETTINGS {
                        ctx.request_launch(SETTINGS_APP_ID);
                    } else if exec_path == EXEC_MESSENGER {
                        ctx.request_launch(MESSENGER_APP_ID);
                    }
                }
                AppKind::External => {
                    ctx.show_toast("No loader for external apps", ToastStyle::Warning, 2000);
                    self.core.needs_redraw = true;
                }
            }
            return;
        }
    }

    fn run_name_entry(&mut self, ctx: &mut AppContext) {
        if self.core.needs_redraw {
            ctx.keypad.begin("New app name:", "");
            self.core.needs_redraw = false;
        }
        ctx.keypad_tick();

        if !ctx.keypad.is_done() {
            return;
        }
        if !ctx.keypad.was_cancelled() && !ctx.keypad.result().is_empty() {
            let name = ctx.keypad.result().to_string();
            let path = format!("/apps/{}.bin", name.to_lowercase().replace(' ', "_"));
            let color = ctx.theme.accent_warn;
            match ctx.install_app(&name, &path, color) {
                Ok(()) => ctx.show_toast("Shortcut installed", ToastStyle::Success, 2000),
                Err(_) => ctx.show_toast("Install failed", ToastStyle::Error, 2500),
            }
        }
        self.page = HomePage::Grid;
        self.core.needs_redraw = true;
    }
}

impl Default for HomeApp {
    fn default() -> Self {
        Self::new()
    }
}

impl Application for HomeApp {
    fn core(&self) -> &AppCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut AppCore {
        &mut self.core
    }

    fn on_start(&mut self, _ctx: &mut AppContext) {
        self.page = HomePage::Grid;
        self.core.needs_redraw = true;
    }

    fn on_update(&mut self, ctx: &mut AppContext) {
        match self.page {
            HomePage::Grid => {
                if self.core.needs_redraw {
                    self.draw_grid(ctx);
                    self.core.needs_redraw = false;
                }
                if let Some(at) = press_edge(&mut self.touch_was_down, ctx.hw.touch()) {
                    self.handle_grid_touch(ctx, at);
                }
            }
            HomePage::NameEntry => self.run_name_entry(ctx),
        }
    }

    fn on_draw(&mut self, _ctx: &mut AppContext) {}

    fn on_exit(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tile_origins_follow_grid() {
        assert_eq!(HomeApp::tile_origin(0), Point::new(START_X, START_Y));
        assert_eq!(
            HomeApp::tile_origin(1),
            Point::new(START_X + ICON_SIZE + GAP, START_Y)
        );
        assert_eq!(HomeApp::tile_origin(3), Point::new(START_X, START_Y + ROW_STEP));
    }
}
