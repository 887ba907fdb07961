//! Headless replay of pointer gestures.
//!
//! One event per line:
//!
//! ```text
//! # comments and blank lines are ignored
//! pan off
//! press 150 150
//! move 170 150
//! release
//! ```

use crate::geometry::Point;
use thiserror::Error;

use super::state::EditorState;

#[derive(Debug, Error, PartialEq)]
pub enum ScriptError {
    #[error("line {line}: unknown event '{event}'")]
    UnknownEvent { line: usize, event: String },
    #[error("line {line}: expected {expected}")]
    BadArguments { line: usize, expected: &'static str },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Press(Point),
    Move(Point),
    Release,
    PanMode(bool),
}

fn parse_point(args: &[&str], line: usize) -> Result<Point, ScriptError> {
    let bad = || ScriptError::BadArguments {
        line,
        expected: "two numbers",
    };
    let [x, y] = args else {
        return Err(bad());
    };
    let x = x.parse::<f64>().map_err(|_| bad())?;
    let y = y.parse::<f64>().map_err(|_| bad())?;
    Ok(Point::new(x, y))
}

/// Parse a whole script up front so a bad line rejects the script before any event runs.
pub fn parse_script(text: &str) -> Result<Vec<PointerEvent>, ScriptError> {
    let mut events = Vec::new();
    for (idx, raw) in text.lines().enumerate() {
        let line = idx + 1;
        let raw = raw.trim();
        if raw.is_empty() || raw.starts_with('#') {
            continue;
        }
        let parts: Vec<&str> = raw.split_whitespace().collect();
        let (event, args) = (parts[0], &parts[1..]);
        let ev = match event {
            "press" => PointerEvent::Press(parse_point(args, line)?),
            "move" => PointerEvent::Move(parse_point(args, line)?),
            "release" => PointerEvent::Release,
            "pan" => match args {
                ["on"] => PointerEvent::PanMode(true),
                ["off"] => PointerEvent::PanMode(false),
                _ => {
                    return Err(ScriptError::BadArguments {
                        line,
                        expected: "'on' or 'off'",
                    });
                }
            },
            other => {
                return Err(ScriptError::UnknownEvent {
                    line,
                    event: other.to_string(),
                });
            }
        };
        events.push(ev);
    }
    Ok(events)
}

impl EditorState {
    pub fn apply_event(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Press(p) => self.press(p),
            PointerEvent::Move(p) => {
                self.pointer_move(p);
            }
            PointerEvent::Release => self.release(),
            PointerEvent::PanMode(on) => self.pan_mode = on,
        }
    }

    /// Parse and run a gesture script; returns the number of events applied.
    pub fn replay(&mut self, text: &str) -> Result<usize, ScriptError> {
        let events = parse_script(text)?;
        for ev in &events {
            self.apply_event(*ev);
        }
        Ok(events.len())
    }
}
