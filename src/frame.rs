// Copyright (c) 2026 rezky_nightky

use crossterm::style::Color;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::cell::{Cell, WIDE_TAIL};
use crate::config::DisplayConfig;
use crate::countdown::{Phase, UrgencyBand};

/// How one countdown frame is painted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Look {
    pub fg: Color,
    pub bg: Option<Color>,
    pub bold: bool,
    pub blink: bool,
    pub message_fg: Color,
    pub border: bool,
}

impl Look {
    pub fn for_phase(phase: Phase, config: &DisplayConfig) -> Self {
        match phase {
            Phase::Armed(band) => Look {
                fg: match band {
                    UrgencyBand::High => config.bands.high,
                    UrgencyBand::Mid => config.bands.mid,
                    UrgencyBand::Low => config.bands.low,
                },
                bg: None,
                bold: false,
                blink: false,
                message_fg: config.message,
                border: false,
            },
            Phase::Expired => Look {
                fg: config.expired_fg,
                bg: Some(config.expired_bg),
                bold: true,
                blink: true,
                message_fg: config.expired_fg,
                border: true,
            },
        }
    }
}

#[derive(Clone, Debug)]
pub struct Frame {
    pub width: u16,
    pub height: u16,
    pub cells: Vec<Cell>,
    blank: Cell,
}

impl Frame {
    pub fn new(width: u16, height: u16, bg: Option<Color>) -> Self {
        let blank = Cell::blank_with_bg(bg);
        Self {
            width,
            height,
            cells: vec![blank; width as usize * height as usize],
            blank,
        }
    }

    pub fn clear_with_bg(&mut self, bg: Option<Color>) {
        self.blank = Cell::blank_with_bg(bg);
        self.cells.fill(self.blank);
    }

    pub fn index(&self, x: u16, y: u16) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    #[cfg(test)]
    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        self.index(x, y).map(|i| &self.cells[i])
    }

    pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
        if let Some(i) = self.index(x, y) {
            self.cells[i] = cell;
        }
    }

    /// Writes `text` left to right from `(x, y)`, clipping at the edge.
    /// A double-width char fills its own cell plus a [`WIDE_TAIL`] cell, and
    /// is dropped rather than split when only half of it would fit.
    pub fn put_str(&mut self, x: i32, y: i32, text: &str, template: Cell) {
        if y < 0 || y >= self.height as i32 {
            return;
        }
        let mut cx = x;
        for ch in text.chars() {
            let w = ch.width().unwrap_or(0) as i32;
            if w == 0 {
                continue;
            }
            if cx + w > self.width as i32 {
                break;
            }
            if cx >= 0 {
                self.set(cx as u16, y as u16, Cell { ch, ..template });
                for tail in 1..w {
                    self.set((cx + tail) as u16, y as u16, Cell {
                        ch: WIDE_TAIL,
                        ..template
                    });
                }
            }
            cx += w;
        }
    }

    fn draw_border(&mut self, look: &Look) {
        if self.width < 2 || self.height < 2 {
            return;
        }
        let edge = Cell {
            ch: '─',
            fg: Some(look.fg),
            bg: look.bg,
            bold: false,
            blink: false,
        };
        let (r, b) = (self.width - 1, self.height - 1);
        for x in 1..r {
            self.set(x, 0, edge);
            self.set(x, b, edge);
        }
        for y in 1..b {
            self.set(0, y, Cell { ch: '│', ..edge });
            self.set(r, y, Cell { ch: '│', ..edge });
        }
        self.set(0, 0, Cell { ch: '┌', ..edge });
        self.set(r, 0, Cell { ch: '┐', ..edge });
        self.set(0, b, Cell { ch: '└', ..edge });
        self.set(r, b, Cell { ch: '┘', ..edge });
    }

    /// Lays out the art centered on screen with the message on the line
    /// below it, centered under the art.
    pub fn compose(&mut self, art: &[String], message: &str, look: &Look) {
        self.clear_with_bg(look.bg);
        if look.border {
            self.draw_border(look);
        }

        let art_w = art.iter().map(|l| l.width()).max().unwrap_or(0) as i32;
        let msg_w = message.width() as i32;
        let block_h = art.len() as i32 + i32::from(msg_w > 0);
        let top = (self.height as i32 - block_h) / 2;
        let left = (self.width as i32 - art_w) / 2;

        let art_cell = Cell {
            ch: ' ',
            fg: Some(look.fg),
            bg: look.bg,
            bold: look.bold,
            blink: look.blink,
        };
        for (row, line) in art.iter().enumerate() {
            self.put_str(left, top + row as i32, line, art_cell);
        }

        if msg_w > 0 {
            let msg_left = if msg_w <= art_w {
                left + (art_w - msg_w) / 2
            } else {
                (self.width as i32 - msg_w) / 2
            };
            let msg_cell = Cell {
                fg: Some(look.message_fg),
                bold: false,
                blink: false,
                ..art_cell
            };
            self.put_str(msg_left, top + art.len() as i32, message, msg_cell);
        }
    }
}
