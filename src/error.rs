// Copyright (c) 2026 rezky_nightky

use thiserror::Error;

pub const FORMAT_HINT: &str =
    "Please use the available formats (__h__m__s, YYYY-MM-DDTHH:MM, THH:MM) or view the help for example usage.";

/// Everything a user can get wrong before the countdown starts.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TimerError {
    #[error("Invalid datetime: {input} (expected YYYY-MM-DDTHH:MM[:SS])")]
    InvalidDatetime { input: String },

    #[error("Invalid time of day: {input} (expected THH:MM, e.g. T14:00)")]
    InvalidTimeOfDay { input: String },

    #[error("Invalid duration string: {input} \n\n{}", FORMAT_HINT)]
    InvalidDuration { input: String },

    #[error("The timer duration cannot be zero.")]
    ZeroDuration,

    #[error("Target datetime is in the past: {input}")]
    PastTarget { input: String },

    #[error("Invalid font '{name}'. Use --list-fonts to list available fonts.")]
    InvalidFont { name: String },

    #[error("Please specify a timer duration. \n\n{}", FORMAT_HINT)]
    MissingArgument,
}
