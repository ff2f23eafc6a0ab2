// Copyright (c) 2026 rezky_nightky

use std::io::IsTerminal;

use clap::Parser;
use crossterm::style::Color;

pub const FONT_ENV: &str = "TIMER_FONT";
pub const LOG_ENV: &str = "TIMER_LOG";
pub const FALLBACK_FONT: &str = "block";

pub const EXAMPLES: &str = "\
DURATION is the duration of your timer. It can be either:
  - A duration string (__h__m__s)
  - An absolute datetime (YYYY-MM-DDTHH:MM)
  - A time only, meaning the next occurrence (T14:00)

EXAMPLES:
  timer 1h30m
  timer 25m
  timer 15m30s
  timer 2026-01-25T14:00
  timer T14:00
  timer 25m --font digital
  timer --list-fonts

KEYS:
  q, Esc, Ctrl+C   quit";

fn colors_allowed() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    !matches!(std::env::var("CLICOLOR").ok().as_deref(), Some("0"))
}

pub fn color_enabled_stdout() -> bool {
    colors_allowed() && std::io::stdout().is_terminal()
}

pub fn color_enabled_stderr() -> bool {
    colors_allowed() && std::io::stderr().is_terminal()
}

pub fn default_font() -> String {
    std::env::var(FONT_ENV)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| FALLBACK_FONT.to_string())
}

#[derive(Parser, Debug, Clone)]
#[command(
    name = "timer",
    version,
    long_version = concat!(
        env!("CARGO_PKG_VERSION"),
        " (",
        env!("TIMER_BUILD"),
        ", ",
        env!("TIMER_GIT_SHA"),
        ")"
    ),
    about = "A big ASCII-art countdown timer for the terminal",
    after_help = EXAMPLES
)]
pub struct Args {
    #[arg(
        value_name = "DURATION",
        help = "Duration (__h__m__s), datetime (YYYY-MM-DDTHH:MM) or time of day (THH:MM)"
    )]
    pub duration: Option<String>,

    #[arg(
        short = 'm',
        long = "message",
        default_value = "",
        hide_default_value = true,
        help = "The message to display under the timer"
    )]
    pub message: String,

    #[arg(
        long = "no-bell",
        help = "Do not ring the terminal bell once the timer is over"
    )]
    pub no_bell: bool,

    #[arg(
        long = "font",
        default_value_t = default_font(),
        help = "Font used to render the timer (overrides TIMER_FONT env var)"
    )]
    pub font: String,

    #[arg(long = "list-fonts", help = "List available fonts and exit")]
    pub list_fonts: bool,
}

/// Fractions of the starting duration at which the clock changes color.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Thresholds {
    pub high: f64,
    pub low: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            high: 0.5,
            low: 0.2,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BandColors {
    pub high: Color,
    pub mid: Color,
    pub low: Color,
}

#[derive(Clone, Debug, PartialEq)]
pub struct DisplayConfig {
    pub thresholds: Thresholds,
    pub bands: BandColors,
    pub message: Color,
    pub expired_fg: Color,
    pub expired_bg: Color,
    pub label: String,
}

impl DisplayConfig {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            thresholds: Thresholds::default(),
            bands: BandColors {
                high: Color::Green,
                mid: Color::Yellow,
                low: Color::Red,
            },
            message: Color::Cyan,
            expired_fg: Color::White,
            expired_bg: Color::DarkRed,
            label: label.into(),
        }
    }
}
