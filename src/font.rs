// Copyright (c) 2026 rezky_nightky

//! Built-in ASCII-art fonts for the clock face.
//!
//! Every font covers the digits, `:` and space. Anything else renders as a
//! blank cell of the font's glyph width.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use crate::error::TimerError;

const BITMAP_HEIGHT: usize = 5;

const BITMAP_DIGITS: [[&str; BITMAP_HEIGHT]; 10] = [
    ["###", "# #", "# #", "# #", "###"],
    [" # ", "## ", " # ", " # ", "###"],
    ["###", "  #", "###", "#  ", "###"],
    ["###", "  #", "###", "  #", "###"],
    ["# #", "# #", "###", "  #", "  #"],
    ["###", "#  ", "###", "  #", "###"],
    ["###", "#  ", "###", "# #", "###"],
    ["###", "  #", "  #", "  #", "  #"],
    ["###", "# #", "###", "# #", "###"],
    ["###", "# #", "###", "  #", "###"],
];
const BITMAP_COLON: [&str; BITMAP_HEIGHT] = [" ", "#", " ", "#", " "];
const BITMAP_BLANK: [&str; BITMAP_HEIGHT] = ["   "; BITMAP_HEIGHT];

const SEGMENT_HEIGHT: usize = 3;

const SEGMENT_DIGITS: [[&str; SEGMENT_HEIGHT]; 10] = [
    [" _ ", "| |", "|_|"],
    ["   ", "  |", "  |"],
    [" _ ", " _|", "|_ "],
    [" _ ", " _|", " _|"],
    ["   ", "|_|", "  |"],
    [" _ ", "|_ ", " _|"],
    [" _ ", "|_ ", "|_|"],
    [" _ ", "  |", "  |"],
    [" _ ", "|_|", "|_|"],
    [" _ ", "|_|", " _|"],
];
const SEGMENT_COLON: [&str; SEGMENT_HEIGHT] = [" ", ".", "."];
const SEGMENT_BLANK: [&str; SEGMENT_HEIGHT] = ["   "; SEGMENT_HEIGHT];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Style {
    Plain,
    Segment,
    Bitmap {
        fill: char,
        scale_x: usize,
        scale_y: usize,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Font {
    pub name: &'static str,
    style: Style,
}

pub static FONTS: [Font; 7] = [
    Font {
        name: "plain",
        style: Style::Plain,
    },
    Font {
        name: "digital",
        style: Style::Segment,
    },
    Font {
        name: "block",
        style: Style::Bitmap {
            fill: '█',
            scale_x: 1,
            scale_y: 1,
        },
    },
    Font {
        name: "hash",
        style: Style::Bitmap {
            fill: '#',
            scale_x: 1,
            scale_y: 1,
        },
    },
    Font {
        name: "dots",
        style: Style::Bitmap {
            fill: 'o',
            scale_x: 1,
            scale_y: 1,
        },
    },
    Font {
        name: "wide",
        style: Style::Bitmap {
            fill: '█',
            scale_x: 2,
            scale_y: 1,
        },
    },
    Font {
        name: "big",
        style: Style::Bitmap {
            fill: '█',
            scale_x: 2,
            scale_y: 2,
        },
    },
];

pub fn find(name: &str) -> Option<&'static Font> {
    FONTS.iter().find(|f| f.name == name)
}

pub fn require(name: &str) -> Result<&'static Font, TimerError> {
    find(name).ok_or_else(|| TimerError::InvalidFont {
        name: name.to_string(),
    })
}

fn bitmap_glyph(c: char) -> &'static [&'static str; BITMAP_HEIGHT] {
    match c {
        '0'..='9' => &BITMAP_DIGITS[c as usize - '0' as usize],
        ':' => &BITMAP_COLON,
        _ => &BITMAP_BLANK,
    }
}

fn segment_glyph(c: char) -> &'static [&'static str; SEGMENT_HEIGHT] {
    match c {
        '0'..='9' => &SEGMENT_DIGITS[c as usize - '0' as usize],
        ':' => &SEGMENT_COLON,
        _ => &SEGMENT_BLANK,
    }
}

impl Font {
    pub fn height(&self) -> usize {
        match self.style {
            Style::Plain => 1,
            Style::Segment => SEGMENT_HEIGHT,
            Style::Bitmap { scale_y, .. } => BITMAP_HEIGHT * scale_y,
        }
    }

    pub fn render(&self, text: &str) -> String {
        self.render_lines(text).join("\n")
    }

    pub fn render_lines(&self, text: &str) -> Vec<String> {
        match self.style {
            Style::Plain => vec![text.to_string()],
            Style::Segment => (0..SEGMENT_HEIGHT)
                .map(|row| text.chars().map(|c| segment_glyph(c)[row]).collect())
                .collect(),
            Style::Bitmap {
                fill,
                scale_x,
                scale_y,
            } => {
                let mut lines = Vec::with_capacity(BITMAP_HEIGHT * scale_y);
                for row in 0..BITMAP_HEIGHT {
                    let mut line = String::new();
                    for (i, c) in text.chars().enumerate() {
                        if i > 0 {
                            line.extend(std::iter::repeat(' ').take(scale_x));
                        }
                        for px in bitmap_glyph(c)[row].chars() {
                            let ch = if px == '#' { fill } else { ' ' };
                            line.extend(std::iter::repeat(ch).take(scale_x));
                        }
                    }
                    for _ in 0..scale_y {
                        lines.push(line.clone());
                    }
                }
                lines
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum SizeClass {
    Normal,
    Tiny,
    Small,
    Medium,
    Large,
    Huge,
}

impl SizeClass {
    pub fn of_height(h: usize) -> Self {
        match h {
            0 | 1 => SizeClass::Normal,
            2 => SizeClass::Tiny,
            3 | 4 => SizeClass::Small,
            5..=7 => SizeClass::Medium,
            8 | 9 => SizeClass::Large,
            _ => SizeClass::Huge,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SizeClass::Normal => "NORMAL",
            SizeClass::Tiny => "TINY",
            SizeClass::Small => "SMALL",
            SizeClass::Medium => "MEDIUM",
            SizeClass::Large => "LARGE",
            SizeClass::Huge => "HUGE",
        }
    }
}

pub const SAMPLE: &str = "12:34:56";

/// The `--list-fonts` report: fonts grouped by rendered height, smallest
/// group first, each followed by a sample.
pub fn catalog_listing(color: bool) -> String {
    let mut groups: BTreeMap<SizeClass, Vec<&Font>> = BTreeMap::new();
    for font in &FONTS {
        groups
            .entry(SizeClass::of_height(font.height()))
            .or_default()
            .push(font);
    }

    let mut out = String::new();
    if color {
        out.push_str("\x1b[1mAvailable fonts:\x1b[0m\n");
    } else {
        out.push_str("Available fonts:\n");
    }
    for (class, mut fonts) in groups {
        fonts.sort_by_key(|f| f.name);
        let heading = format!("{} FONTS ({})", class.label(), fonts.len());
        if color {
            let _ = writeln!(out, "\n\x1b[1;31m{}\x1b[0m", heading);
        } else {
            let _ = writeln!(out, "\n{}", heading);
        }
        for f in fonts {
            let _ = writeln!(out, "  {}", f.name);
            let _ = writeln!(out, "{}", f.render(SAMPLE));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_font_renders_rows_of_its_height_and_equal_width() {
        for font in &FONTS {
            let lines = font.render_lines("09:41:27");
            assert_eq!(lines.len(), font.height(), "{}", font.name);
            let w = lines[0].chars().count();
            assert!(lines.iter().all(|l| l.chars().count() == w), "{}", font.name);
        }
    }

    #[test]
    fn plain_is_identity() {
        assert_eq!(require("plain").unwrap().render("00:00:05"), "00:00:05");
    }

    #[test]
    fn block_digit_shapes() {
        let art = require("hash").unwrap().render("1");
        assert_eq!(art, " # \n## \n # \n # \n###");
    }

    #[test]
    fn scaling_doubles_cells() {
        let block = find("block").unwrap().render_lines("8");
        let big = find("big").unwrap().render_lines("8");
        assert_eq!(big.len(), block.len() * 2);
        assert_eq!(big[0].chars().count(), block[0].chars().count() * 2);
        assert_eq!(big[0], big[1]);
    }

    #[test]
    fn segment_font_draws_seven_segment_digits() {
        assert_eq!(
            find("digital").unwrap().render_lines("10"),
            vec!["    _ ", "  || |", "  ||_|"]
        );
    }

    #[test]
    fn unknown_font_is_invalid_font() {
        assert_eq!(
            require("comic-sans"),
            Err(TimerError::InvalidFont {
                name: "comic-sans".into()
            })
        );
    }

    #[test]
    fn size_classes_follow_height_buckets() {
        assert_eq!(SizeClass::of_height(1), SizeClass::Normal);
        assert_eq!(SizeClass::of_height(2), SizeClass::Tiny);
        assert_eq!(SizeClass::of_height(3), SizeClass::Small);
        assert_eq!(SizeClass::of_height(5), SizeClass::Medium);
        assert_eq!(SizeClass::of_height(9), SizeClass::Large);
        assert_eq!(SizeClass::of_height(10), SizeClass::Huge);
    }

    #[test]
    fn listing_groups_and_samples() {
        let listing = catalog_listing(false);
        assert!(listing.starts_with("Available fonts:"));
        assert!(listing.contains("NORMAL FONTS (1)"));
        assert!(listing.contains("SMALL FONTS (1)"));
        assert!(listing.contains("MEDIUM FONTS (4)"));
        assert!(listing.contains("HUGE FONTS (1)"));
        assert!(!listing.contains("LARGE FONTS"));
        assert!(listing.contains(SAMPLE));
        let normal = listing.find("NORMAL").unwrap();
        let huge = listing.find("HUGE").unwrap();
        assert!(normal < huge);
    }
}
