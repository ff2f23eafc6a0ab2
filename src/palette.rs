// Copyright (c) 2026 rezky_nightky

use crate::frame::Look;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColorMode {
    Mono,
    Ansi,
}

impl ColorMode {
    pub fn detect() -> Self {
        Self::from_env(
            std::env::var_os("NO_COLOR").is_some(),
            &std::env::var("TERM").unwrap_or_default(),
        )
    }

    fn from_env(no_color: bool, term: &str) -> Self {
        if no_color || term.eq_ignore_ascii_case("dumb") {
            ColorMode::Mono
        } else {
            ColorMode::Ansi
        }
    }

    /// Mono terminals keep the attributes but lose every color, so urgency
    /// can only be told apart by bold.
    pub fn adapt(self, look: Look) -> Look {
        match self {
            ColorMode::Ansi => look,
            ColorMode::Mono => Look {
                fg: crossterm::style::Color::Reset,
                bg: None,
                message_fg: crossterm::style::Color::Reset,
                bold: look.bold || look.border,
                ..look
            },
        }
    }
}
