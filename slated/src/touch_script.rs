//! Touch script parser
//!
//! A simple line-based format for deterministic demos and tests. Each
//! kernel tick consumes one queued frame, so a script is also a timeline:
//!
//! - `tap X Y` — one pressed frame at (X, Y) followed by one release
//! - `hold X Y N` — N pressed frames at (X, Y)
//! - `idle N` — N frames with the panel untouched
//! - `# ...` — comment
//!
//! ## Example
//!
//! ```text
//! # let the home grid paint, then open settings
//! idle 2
//! tap 45 90
//! idle 10
//! ```

use hal::ScriptedTouch;
use thiserror::Error;

/// Touch script error types.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TouchScriptError {
    #[error("Parse error at line {line}: {message}")]
    ParseError { line: usize, message: String },
}

fn parse_number(token: Option<&str>, line: usize) -> Result<i32, TouchScriptError> {
    token
        .and_then(|t| t.parse().ok())
        .ok_or(TouchScriptError::ParseError {
            line,
            message: "expected a number".to_string(),
        })
}

/// Parses a script into a preloaded touch panel
pub fn parse_touch_script(text: &str) -> Result<ScriptedTouch, TouchScriptError> {
    let mut touch = ScriptedTouch::new();

    for (index, raw) in text.lines().enumerate() {
        let line = index + 1;
        let content = raw.split('#').next().unwrap_or("").trim();
        if content.is_empty() {
            continue;
        }

        let mut tokens = content.split_whitespace();
        match tokens.next() {
            Some("tap") => {
                let x = parse_number(tokens.next(), line)?;
                let y = parse_number(tokens.next(), line)?;
                touch.press(x, y);
                touch.idle(1);
            }
            Some("hold") => {
                let x = parse_number(tokens.next(), line)?;
                let y = parse_number(tokens.next(), line)?;
                let frames = parse_number(tokens.next(), line)?;
                for _ in 0..frames {
                    touch.press(x, y);
                }
            }
            Some("idle") => {
                let frames = parse_number(tokens.next(), line)?;
                touch.idle(frames.max(0) as usize);
            }
            Some(other) => {
                return Err(TouchScriptError::ParseError {
                    line,
                    message: format!("unknown action: {other}"),
                });
            }
            None => {}
        }
    }

    Ok(touch)
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::Point;
    use hal::TouchPanel;

    #[test]
    fn test_parse_tap_and_idle() {
        let mut touch = parse_touch_script("# comment\ntap 10 20\nidle 2\n").unwrap();
        assert_eq!(touch.sample(), Some(Point::new(10, 20)));
        assert_eq!(touch.sample(), None);
        assert_eq!(touch.sample(), None);
        assert_eq!(touch.sample(), None);
        assert_eq!(touch.remaining(), 0);
    }

    #[test]
    fn test_parse_hold() {
        let mut touch = parse_touch_script("hold 5 6 3").unwrap();
        for _ in 0..3 {
            assert_eq!(touch.sample(), Some(Point::new(5, 6)));
        }
        assert_eq!(touch.sample(), None);
    }

    #[test]
    fn test_inline_comment() {
        let mut touch = parse_touch_script("tap 1 2   # open the first tile").unwrap();
        assert_eq!(touch.sample(), Some(Point::new(1, 2)));
    }

    #[test]
    fn test_unknown_action_errors() {
        let err = parse_touch_script("swipe 1 2").unwrap_err();
        assert!(matches!(err, TouchScriptError::ParseError { line: 1, .. }));
    }

    #[test]
    fn test_missing_number_errors() {
        assert!(parse_touch_script("tap 1").is_err());
        assert!(parse_touch_script("idle many").is_err());
    }
}
