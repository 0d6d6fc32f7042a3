//! Keyboard surface drawing

use core_types::{Rect, Rgb565};
use hal::{DisplayPanel, TextAnchor};
use themes::ThemePalette;

use crate::layout::{
    active_bank, GAP, KEYS_PER_ROW, KEY_H, KEY_W, ROW_OFFSET_X, START_X, START_Y,
};

const INPUT_BOX_Y: i32 = 65;
const VISIBLE_TAIL: usize = 18;

fn draw_button(
    display: &mut dyn DisplayPanel,
    theme: &ThemePalette,
    rect: Rect,
    label: &str,
    bg: Rgb565,
    text: Rgb565,
) {
    let radius = 5;
    let shadow = Rect::new(rect.x, rect.y + 3, rect.w, rect.h);
    display.fill_round_rect(shadow, radius, theme.panel_shadow);
    display.fill_round_rect(rect, radius, bg);
    display.draw_text(
        label,
        rect.x + rect.w / 2,
        rect.y + rect.h / 2 + 1,
        TextAnchor::MiddleCenter,
        text,
        Some(bg),
    );
}

pub(crate) fn draw_keyboard(
    display: &mut dyn DisplayPanel,
    theme: &ThemePalette,
    prompt: &str,
    buffer: &str,
    shift: bool,
    numeric: bool,
) {
    display.fill_screen(theme.bg);

    // prompt above the input line
    display.draw_text(
        prompt,
        10,
        INPUT_BOX_Y - 5,
        TextAnchor::BottomLeft,
        theme.accent_primary,
        Some(theme.bg),
    );

    // input value with a cursor, long values keep their tail
    let shown = if buffer.len() > VISIBLE_TAIL {
        format!("...{}", &buffer[buffer.len() - VISIBLE_TAIL..])
    } else {
        buffer.to_string()
    };
    display.draw_text(
        &format!("{shown}_"),
        10,
        INPUT_BOX_Y + 15,
        TextAnchor::MiddleLeft,
        theme.text_main,
        Some(theme.bg),
    );

    // the underline is the text box
    display.draw_line(5, INPUT_BOX_Y + 30, 235, INPUT_BOX_Y + 30, theme.border);
    display.draw_line(5, INPUT_BOX_Y + 31, 235, INPUT_BOX_Y + 31, theme.panel_shadow);

    // character rows
    let bank = active_bank(shift, numeric);
    let mut index = 0usize;
    for row in 0..3 {
        for col in 0..KEYS_PER_ROW[row] {
            let x = START_X + ROW_OFFSET_X[row] + col * (KEY_W + GAP);
            let y = START_Y + row as i32 * (KEY_H + GAP);
            let label = (bank[index] as char).to_string();
            draw_button(
                display,
                theme,
                Rect::new(x, y, KEY_W, KEY_H),
                &label,
                theme.panel_bg,
                theme.text_main,
            );
            index += 1;
        }
    }

    // function row: mode, shift, space, backspace, submit
    let y_fn = START_Y + 3 * (KEY_H + GAP);
    let mut x = START_X;

    draw_button(
        display,
        theme,
        Rect::new(x, y_fn, 30, KEY_H),
        if numeric { "Ab" } else { "12" },
        theme.panel_bg,
        theme.text_muted,
    );
    x += 30 + GAP;

    let (shift_bg, shift_text) = if shift {
        (theme.accent_primary, theme.text_main)
    } else {
        (theme.panel_bg, theme.text_muted)
    };
    draw_button(
        display,
        theme,
        Rect::new(x, y_fn, 30, KEY_H),
        "^",
        shift_bg,
        shift_text,
    );
    x += 30 + GAP;

    draw_button(
        display,
        theme,
        Rect::new(x, y_fn, 85, KEY_H),
        "",
        theme.panel_bg,
        theme.text_main,
    );
    display.draw_hline(x + 30, y_fn + KEY_H / 2, 25, theme.text_muted);
    x += 85 + GAP;

    draw_button(
        display,
        theme,
        Rect::new(x, y_fn, 30, KEY_H),
        "<",
        theme.accent_alert,
        theme.text_main,
    );
    x += 30 + GAP;

    draw_button(
        display,
        theme,
        Rect::new(x, y_fn, 45, KEY_H),
        "OK",
        theme.accent_primary,
        theme.text_main,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use hal::RecordingDisplay;
    use themes::SLATE_THEME;

    #[test]
    fn test_draws_prompt_and_buffer() {
        let mut display = RecordingDisplay::new();
        draw_keyboard(&mut display, &SLATE_THEME, "Password:", "abc", false, false);
        assert!(display.drew_text("Password:"));
        assert!(display.drew_text("abc_"));
        assert!(display.drew_text("OK"));
    }

    #[test]
    fn test_long_buffer_shows_tail() {
        let mut display = RecordingDisplay::new();
        let long = "abcdefghijklmnopqrstuvwxyz";
        draw_keyboard(&mut display, &SLATE_THEME, "P:", long, false, false);
        assert!(display.drew_text("...ijklmnopqrstuvwxyz_"));
    }

    #[test]
    fn test_mode_key_reflects_bank() {
        let mut display = RecordingDisplay::new();
        draw_keyboard(&mut display, &SLATE_THEME, "P:", "", false, true);
        assert!(display.drew_text("Ab"));
        assert!(display.drew_text("1"));
    }
}
