//! # Modal Keypad
//!
//! The shared on-screen keyboard and its modal text-input session.
//!
//! ## Philosophy
//!
//! One keypad exists device-wide. An application that calls
//! [`ModalInput::begin`] owns the keyboard surface until the session
//! leaves the collecting state; every other consumer waits. Each
//! [`ModalInput::update`] processes at most one discrete input event —
//! a press edge decodes to exactly one [`KeyAction`].
//!
//! Touch decoding is separated from drawing so the session logic is
//! testable without a panel, mirroring the split between key translation
//! and key devices elsewhere in the system.

mod layout;
mod paint;

pub use layout::KeyAction;

use hal::{DisplayPanel, TouchState};
use themes::ThemePalette;

/// Longest accepted input.
const MAX_BUFFER: usize = 30;

/// Where a modal session stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Accepting input events
    Collecting,
    /// Submitted; result is valid
    Finished,
    /// Abandoned; result is the buffer at cancel time
    Cancelled,
}

/// The device-wide modal text-input controller.
#[derive(Debug)]
pub struct ModalInput {
    prompt: String,
    buffer: String,
    state: SessionState,
    shift: bool,
    numeric: bool,
    needs_redraw: bool,
    touch_was_down: bool,
}

impl ModalInput {
    pub fn new() -> Self {
        Self {
            prompt: String::new(),
            buffer: String::new(),
            state: SessionState::Finished,
            shift: false,
            numeric: false,
            needs_redraw: false,
            touch_was_down: false,
        }
    }

    /// Starts a fresh collecting session, invalidating any previous result
    pub fn begin(&mut self, prompt: &str, initial: &str) {
        self.prompt = prompt.to_string();
        self.buffer = initial.to_string();
        self.state = SessionState::Collecting;
        self.shift = false;
        self.numeric = false;
        self.needs_redraw = true;
        self.touch_was_down = false;
    }

    /// Runs one tick of the session: repaint if needed, then decode at
    /// most one input event from the touch state
    pub fn update(
        &mut self,
        touch: TouchState,
        display: &mut dyn DisplayPanel,
        theme: &ThemePalette,
    ) {
        if self.state != SessionState::Collecting {
            return;
        }
        if self.needs_redraw {
            paint::draw_keyboard(display, theme, &self.prompt, &self.buffer, self.shift, self.numeric);
            self.needs_redraw = false;
        }

        let pressed_edge = touch.pressed && !self.touch_was_down;
        self.touch_was_down = touch.pressed;
        if !pressed_edge {
            return;
        }

        if let Some(action) = layout::decode(touch.pos, self.shift, self.numeric) {
            self.apply(action);
        }
    }

    /// True once the session left the collecting state
    pub fn is_done(&self) -> bool {
        self.state != SessionState::Collecting
    }

    pub fn was_cancelled(&self) -> bool {
        self.state == SessionState::Cancelled
    }

    /// The collected text; meaningful only once [`ModalInput::is_done`]
    pub fn result(&self) -> &str {
        &self.buffer
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    fn apply(&mut self, action: KeyAction) {
        match action {
            KeyAction::Append(c) => {
                if self.buffer.len() < MAX_BUFFER {
                    self.buffer.push(c);
                }
                if self.shift {
                    self.shift = false;
                }
                self.needs_redraw = true;
            }
            KeyAction::Backspace => {
                self.buffer.pop();
                self.needs_redraw = true;
            }
            KeyAction::ToggleMode => {
                self.numeric = !self.numeric;
                self.shift = false;
                self.needs_redraw = true;
            }
            KeyAction::ToggleShift => {
                if !self.numeric {
                    self.shift = !self.shift;
                    self.needs_redraw = true;
                }
            }
            KeyAction::Submit => self.state = SessionState::Finished,
            KeyAction::Cancel => self.state = SessionState::Cancelled,
        }
    }
}

impl Default for ModalInput {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::Point;
    use hal::RecordingDisplay;
    use themes::SLATE_THEME;

    fn touch_at(x: i32, y: i32) -> TouchState {
        TouchState {
            pressed: true,
            pos: Point::new(x, y),
        }
    }

    fn released() -> TouchState {
        TouchState::default()
    }

    fn tick(input: &mut ModalInput, touch: TouchState) {
        let mut display = RecordingDisplay::new();
        input.update(touch, &mut display, &SLATE_THEME);
    }

    /// Center of the 'q' key: row 0, col 0.
    fn q_key() -> TouchState {
        touch_at(4 + 10, 150 + 19)
    }

    /// Center of the OK key in the function row.
    fn ok_key() -> TouchState {
        touch_at(200, 150 + 3 * 41 + 19)
    }

    /// Shift key in the function row.
    fn shift_key() -> TouchState {
        touch_at(40, 150 + 3 * 41 + 19)
    }

    #[test]
    fn test_begin_resets_session() {
        let mut input = ModalInput::new();
        input.begin("Name:", "seed");
        assert_eq!(input.state(), SessionState::Collecting);
        assert!(!input.is_done());
        assert_eq!(input.result(), "seed");
    }

    #[test]
    fn test_append_one_char_per_press_edge() {
        let mut input = ModalInput::new();
        input.begin("Name:", "");

        tick(&mut input, q_key());
        // finger held down: no repeat
        tick(&mut input, q_key());
        tick(&mut input, q_key());
        assert_eq!(input.result(), "q");

        tick(&mut input, released());
        tick(&mut input, q_key());
        assert_eq!(input.result(), "qq");
    }

    #[test]
    fn test_shift_applies_to_one_char() {
        let mut input = ModalInput::new();
        input.begin("Name:", "");

        tick(&mut input, shift_key());
        tick(&mut input, released());
        tick(&mut input, q_key());
        tick(&mut input, released());
        tick(&mut input, q_key());
        assert_eq!(input.result(), "Qq");
    }

    #[test]
    fn test_submit_finishes_session() {
        let mut input = ModalInput::new();
        input.begin("Name:", "abc");

        tick(&mut input, ok_key());
        assert!(input.is_done());
        assert!(!input.was_cancelled());
        assert_eq!(input.result(), "abc");
    }

    #[test]
    fn test_header_touch_cancels() {
        let mut input = ModalInput::new();
        input.begin("Name:", "abc");

        tick(&mut input, touch_at(10, 10));
        assert!(input.is_done());
        assert!(input.was_cancelled());
    }

    #[test]
    fn test_buffer_capped() {
        let mut input = ModalInput::new();
        input.begin("Name:", &"x".repeat(MAX_BUFFER));

        tick(&mut input, q_key());
        assert_eq!(input.result().len(), MAX_BUFFER);
    }

    #[test]
    fn test_done_session_ignores_input() {
        let mut input = ModalInput::new();
        input.begin("Name:", "");
        tick(&mut input, ok_key());
        tick(&mut input, released());
        tick(&mut input, q_key());
        assert_eq!(input.result(), "");
        assert!(input.is_done());
    }
}
