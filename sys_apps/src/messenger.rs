//! Mesh messenger application

use app_api::{AppContext, AppCore, Application};
use core_types::{NodeId, Point, Rect, Rgb565};
use hal::{DisplayPanel, TextAnchor};
use mesh_api::Datagram;
use services_toast::ToastStyle;
use themes::ThemePalette;

use crate::{press_edge, HOME_APP_ID, MESSENGER_APP_ID};

const ROW_H: i32 = 70;
const INPUT_BAR_H: i32 = 50;
const LIST_TOP: i32 = 50;
/// Typeset carried by chat datagrams.
const CHAT_TYPESET: u16 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MessengerPage {
    Contacts,
    Chat,
    Compose,
}

#[derive(Debug, Clone)]
struct Contact {
    node: NodeId,
    last_msg: String,
    online: bool,
    color: Rgb565,
}

#[derive(Debug, Clone)]
struct ChatMessage {
    text: String,
    mine: bool,
}

/// Chat over the mesh: contacts come from the kernel peer directory,
/// messages ride datagrams pulled and pushed through the node.
pub struct MessengerApp {
    core: AppCore,
    page: MessengerPage,
    contacts: Vec<Contact>,
    transcript: Vec<ChatMessage>,
    selected: Option<usize>,
    touch_was_down: bool,
}

fn peer_label(node: NodeId) -> String {
    format!("{:X}", node.raw())
}

impl MessengerApp {
    pub fn new() -> Self {
        Self {
            core: AppCore::new(MESSENGER_APP_ID),
            page: MessengerPage::Contacts,
            contacts: Vec::new(),
            transcript: Vec::new(),
            selected: None,
            touch_was_down: false,
        }
    }

    /// Rebuilds the contact list from the discovered peers
    fn refresh_contacts(&mut self, ctx: &AppContext) {
        self.contacts = ctx
            .discovered_nodes()
            .iter()
            .map(|node| Contact {
                node: *node,
                last_msg: "Hey!".to_string(),
                online: true,
                color: Rgb565::new(0x07E0),
            })
            .collect();
    }

    fn selected_contact(&self) -> Option<&Contact> {
        self.selected.and_then(|i| self.contacts.get(i))
    }

    // --- contact list ---

    fn draw_contacts(&mut self, ctx: &mut AppContext) {
        let theme = *ctx.theme;
        let display = ctx.hw.display.as_mut();
        let w = display.width();
        let h = display.height();

        display.fill_screen(theme.bg);
        display.fill_rect(Rect::new(0, 0, w, 40), theme.header_bg);
        display.draw_text("MESSAGES", w / 2, 20, TextAnchor::MiddleCenter, theme.accent_warn, Some(theme.header_bg));
        display.draw_text("<", 10, 10, TextAnchor::TopLeft, theme.accent_warn, Some(theme.header_bg));

        for (i, contact) in self.contacts.iter().enumerate() {
            let y = LIST_TOP + i as i32 * ROW_H;
            if y + ROW_H < LIST_TOP || y > h {
                continue;
            }

            display.draw_line(20, y + ROW_H - 1, w - 20, y + ROW_H - 1, theme.panel_shadow);

            // avatar with the peer's leading hex digit
            let av_x = 35;
            let av_y = y + ROW_H / 2;
            display.fill_circle(av_x, av_y, 22, contact.color);
            let label = peer_label(contact.node);
            let initial = label.chars().next().unwrap_or('?').to_string();
            display.draw_text(&initial, av_x, av_y, TextAnchor::MiddleCenter, theme.text_main, Some(contact.color));

            if contact.online {
                display.fill_circle(av_x + 15, av_y + 15, 6, theme.bg);
                display.fill_circle(av_x + 15, av_y + 15, 4, Rgb565::new(0x07E0));
            }

            display.draw_text(&label, 70, y + 15, TextAnchor::TopLeft, theme.text_main, Some(theme.bg));
            let mut preview = contact.last_msg.clone();
            if preview.len() > 20 {
                preview.truncate(19);
                preview.push_str("...");
            }
            display.draw_text(&preview, 70, y + 40, TextAnchor::TopLeft, theme.text_muted, Some(theme.bg));
        }
    }

    fn handle_contacts_touch(&mut self, ctx: &mut AppContext, at: Point) {
        if at.y < 50 && at.x < 50 {
            ctx.request_launch(HOME_APP_ID);
            return;
        }
        if at.y < LIST_TOP {
            return;
        }
        let index = ((at.y - LIST_TOP) / ROW_H) as usize;
        if index < self.contacts.len() {
            self.open_chat(index);
        }
    }

    fn open_chat(&mut self, index: usize) {
        self.selected = Some(index);
        self.page = MessengerPage::Chat;
        self.core.needs_redraw = true;
        self.transcript.clear();
        self.transcript.push(ChatMessage {
            text: self.contacts[index].last_msg.clone(),
            mine: false,
        });
    }

    // --- chat view ---

    fn draw_chat(&mut self, ctx: &mut AppContext) {
        let Some(contact) = self.selected_contact().cloned() else {
            return;
        };
        let theme = *ctx.theme;
        let display = ctx.hw.display.as_mut();
        let w = display.width();
        let h = display.height();

        display.fill_screen(theme.bg);

        display.fill_rect(Rect::new(0, 0, w, 50), theme.header_bg);
        display.draw_hline(0, 50, w, theme.panel_shadow);
        display.draw_text("<", 10, 15, TextAnchor::TopLeft, theme.accent_warn, Some(theme.header_bg));
        display.fill_circle(40, 25, 15, contact.color);
        display.draw_text(
            &peer_label(contact.node),
            65,
            25,
            TextAnchor::MiddleLeft,
            theme.text_main,
            Some(theme.header_bg),
        );

        let mut y = 60;
        for message in &self.transcript {
            Self::draw_bubble(display, &theme, message, y);
            y += 45;
        }

        // input bar
        let bar_y = h - INPUT_BAR_H;
        display.fill_rect(Rect::new(0, bar_y, w, INPUT_BAR_H), theme.panel_bg);
        display.draw_hline(0, bar_y, w, theme.border);
        display.fill_round_rect(Rect::new(10, bar_y + 8, w - 60, 34), 17, theme.bg);
        display.draw_text(
            "Message...",
            20,
            bar_y + 24,
            TextAnchor::MiddleLeft,
            theme.text_muted,
            Some(theme.bg),
        );
        display.fill_circle(w - 25, bar_y + 25, 18, theme.accent_primary);
        display.draw_text(
            ">",
            w - 25,
            bar_y + 25,
            TextAnchor::MiddleCenter,
            theme.text_main,
            Some(theme.accent_primary),
        );
    }

    fn draw_bubble(
        display: &mut dyn DisplayPanel,
        theme: &ThemePalette,
        message: &ChatMessage,
        y: i32,
    ) {
        let w = display.width();
        let max_bubble_w = w * 7 / 10;
        let bubble_w = (display.text_width(&message.text) + 20).min(max_bubble_w);
        let bubble_h = 35;

        if message.mine {
            let x = w - bubble_w - 10;
            display.fill_round_rect(Rect::new(x, y, bubble_w, bubble_h), 12, theme.accent_primary);
            display.draw_text(
                &message.text,
                x + bubble_w - 10,
                y + bubble_h / 2,
                TextAnchor::MiddleRight,
                theme.text_main,
                Some(theme.accent_primary),
            );
        } else {
            let x = 10;
            display.fill_round_rect(Rect::new(x, y, bubble_w, bubble_h), 12, theme.panel_bg);
            display.draw_text(
                &message.text,
                x + 10,
                y + bubble_h / 2,
                TextAnchor::MiddleLeft,
                theme.text_main,
                Some(theme.panel_bg),
            );
        }
    }

    fn handle_chat_touch(&mut self, ctx: &mut AppContext, at: Point) {
        if at.y < 50 && at.x < 60 {
            self.page = MessengerPage::Contacts;
            self.core.needs_redraw = true;
            return;
        }
        let input_top = ctx.hw.display.height() - INPUT_BAR_H;
        if at.y > input_top {
            self.page = MessengerPage::Compose;
            self.core.needs_redraw = true;
        }
    }

    /// Drains one queued datagram from the open peer per tick
    fn poll_incoming(&mut self, ctx: &mut AppContext) {
        let Some(contact) = self.selected_contact() else {
            return;
        };
        let node = contact.node;
        match ctx.mesh.pull(node) {
            Ok(Some(datagram)) => {
                let text = datagram.text();
                self.transcript.push(ChatMessage {
                    text: text.clone(),
                    mine: false,
                });
                if let Some(index) = self.selected {
                    self.contacts[index].last_msg = text;
                }
                self.core.needs_redraw = true;
            }
            Ok(None) => {}
            Err(_) => {}
        }
    }

    fn send_message(&mut self, ctx: &mut AppContext, text: &str) {
        if text.is_empty() {
            return;
        }
        let Some(index) = self.selected else {
            return;
        };
        let node = self.contacts[index].node;

        self.transcript.push(ChatMessage {
            text: text.to_string(),
            mine: true,
        });
        self.contacts[index].last_msg = format!("You: {text}");

        // route resolution goes to the peer, the payload to its segment
        let located = ctx.mesh.locate(node, CHAT_TYPESET);
        let pushed = ctx
            .mesh
            .push(node.segment_address(), Datagram::from_text(CHAT_TYPESET, text));
        if located.is_err() || pushed.is_err() {
            ctx.show_toast("Send failed", ToastStyle::Error, 2500);
        }
    }

    fn run_compose(&mut self, ctx: &mut AppContext) {
        if self.core.needs_redraw {
            let prompt = self
                .selected_contact()
                .map(|c| format!("Message {}:", peer_label(c.node)))
                .unwrap_or_else(|| "Message:".to_string());
            ctx.keypad.begin(&prompt, "");
            self.core.needs_redraw = false;
        }
        ctx.keypad_tick();

        if !ctx.keypad.is_done() {
            return;
        }
        if !ctx.keypad.was_cancelled() {
            let text = ctx.keypad.result().to_string();
            self.send_message(ctx, &text);
        }
        self.page = MessengerPage::Chat;
        self.core.needs_redraw = true;
    }
}

impl Default for MessengerApp {
    fn default() -> Self {
        Self::new()
    }
}

impl Application for MessengerApp {
    fn core(&self) -> &AppCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut AppCore {
        &mut self.core
    }

    fn on_start(&mut self, _ctx: &mut AppContext) {
        self.page = MessengerPage::Contacts;
        self.core.needs_redraw = true;
    }

    fn on_update(&mut self, ctx: &mut AppContext) {
        if self.page == MessengerPage::Chat {
            self.poll_incoming(ctx);
        }

        match self.page {
            MessengerPage::Contacts => {
                if self.core.needs_redraw {
                    self.refresh_contacts(ctx);
                    self.draw_contacts(ctx);
                    self.core.needs_redraw = false;
                }
                if let Some(at) = press_edge(&mut self.touch_was_down, ctx.hw.touch()) {
                    self.handle_contacts_touch(ctx, at);
                }
            }
            MessengerPage::Chat => {
                if self.core.needs_redraw {
                    self.draw_chat(ctx);
                    self.core.needs_redraw = false;
                }
                if let Some(at) = press_edge(&mut self.touch_was_down, ctx.hw.touch()) {
                    self.handle_chat_touch(ctx, at);
                }
            }
            MessengerPage::Compose => self.run_compose(ctx),
        }
    }

    fn on_draw(&mut self, ctx: &mut AppContext) {
        self.refresh_contacts(ctx);
    }

    fn on_exit(&mut self) {}
}
