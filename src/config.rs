//! Display configuration.

use log::warn;
use std::env;

/// Default display width (units are in pixels)
pub const DEFAULT_WIDTH: i32 = 800;
/// Default display height (units are in pixels)
pub const DEFAULT_HEIGHT: i32 = 600;

/// The size of the playfield, handed to every off-screen predicate.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Display {
    pub width: i32,
    pub height: i32,
}

impl Display {
    pub const fn new(width: i32, height: i32) -> Display {
        Display { width, height }
    }

    /// Read the display size from the environment.
    ///
    /// # Environment variables
    ///
    /// * `DISPLAY_WIDTH`: Playfield width in pixels.
    /// * `DISPLAY_HEIGHT`: Playfield height in pixels.
    ///
    /// Missing variables fall back to the defaults. Values that are not positive integers are
    /// logged and ignored.
    pub fn from_env() -> Display {
        let width = env::var("DISPLAY_WIDTH").ok();
        let height = env::var("DISPLAY_HEIGHT").ok();

        Display {
            width: parse_dimension("DISPLAY_WIDTH", width.as_deref(), DEFAULT_WIDTH),
            height: parse_dimension("DISPLAY_HEIGHT", height.as_deref(), DEFAULT_HEIGHT),
        }
    }
}

impl Default for Display {
    fn default() -> Self {
        Display::new(DEFAULT_WIDTH, DEFAULT_HEIGHT)
    }
}

fn parse_dimension(name: &str, value: Option<&str>, default: i32) -> i32 {
    match value.map(|value| value.trim().parse::<i32>()) {
        None => default,
        Some(Ok(value)) if value > 0 => value,
        Some(_) => {
            warn!("Ignoring {name}={:?}, using {default}", value.unwrap_or_default());
            default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_dimension() {
        assert_eq!(parse_dimension("W", None, 800), 800);
        assert_eq!(parse_dimension("W", Some("1024"), 800), 1024);
        assert_eq!(parse_dimension("W", Some(" 640 "), 800), 640);
        assert_eq!(parse_dimension("W", Some("wide"), 800), 800, "Garbage is ignored");
        assert_eq!(parse_dimension("W", Some("0"), 800), 800, "Zero is ignored");
        assert_eq!(parse_dimension("W", Some("-20"), 800), 800, "Negatives are ignored");
    }

    #[test]
    fn test_default_display() {
        let display = Display::default();
        assert_eq!(display, Display::new(DEFAULT_WIDTH, DEFAULT_HEIGHT));
    }
}
