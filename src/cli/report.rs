use hibc::DecodeError;
use std::fmt::Write;
use std::io::IsTerminal;

const RED: &str = "\x1b[1;31m";
const CYAN: &str = "\x1b[1;36m";
const RESET: &str = "\x1b[0m";

/// Check if colored output should be used
pub fn should_use_color(no_color: bool) -> bool {
    // Respect NO_COLOR environment variable
    if no_color || std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    std::io::stderr().is_terminal()
}

/// Renders a decode failure with the input, a caret under the offending
/// character, and a hint.
pub fn render_decode_error(input: &str, err: &DecodeError, use_color: bool) -> String {
    let mut out = String::new();
    let (red, cyan, reset) = if use_color {
        (RED, CYAN, RESET)
    } else {
        ("", "", "")
    };

    let _ = writeln!(out, "{}error:{} {}", red, reset, err);
    if let Some(position) = err.position() {
        let _ = writeln!(out);
        let (echo, column) = escape_input(input, position);
        let _ = writeln!(out, "  {}", echo);
        let _ = writeln!(out, "  {}{}^{}", " ".repeat(column), red, reset);
    }
    let _ = writeln!(out);
    let _ = write!(out, "{}hint:{} {}", cyan, reset, err.hint());
    out
}

/// Echoes `input` with anything outside printable ASCII escaped, and
/// returns the column where character `position` starts.
fn escape_input(input: &str, position: usize) -> (String, usize) {
    let mut echo = String::with_capacity(input.len());
    let mut column = None;
    for (index, c) in input.chars().enumerate() {
        if index == position {
            column = Some(echo.len());
        }
        if c == ' ' || c.is_ascii_graphic() {
            echo.push(c);
        } else {
            echo.extend(c.escape_default());
        }
    }
    let column =
        column.unwrap_or_else(|| echo.len() + position.saturating_sub(input.chars().count()));
    (echo, column)
}

/// Renders any other failure as a single `error:` line.
pub fn render_message(message: &str, use_color: bool) -> String {
    if use_color {
        format!("{}error:{} {}", RED, RESET, message)
    } else {
        format!("error: {}", message)
    }
}
