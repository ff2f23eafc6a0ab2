// Copyright (c) 2026 rezky_nightky

use std::io::{stdout, Result, Stdout, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, ExecutableCommand, QueueableCommand,
};

use crate::cell::{Cell, WIDE_TAIL};
use crate::config::DisplayConfig;
use crate::countdown::{
    AlarmSink, Phase, RenderInstruction, RenderSink, TickSource, UrgencyBand, Wait,
};
use crate::font::Font;
use crate::frame::{Frame, Look};
use crate::palette::ColorMode;

const POLL_SLICE: Duration = Duration::from_millis(100);
const BEL: &str = "\x07";

/// Raw mode plus the alternate screen, released on drop.
pub struct Terminal {
    stdout: Stdout,
    last: Option<Frame>,
}

impl Terminal {
    pub fn new() -> Result<Self> {
        let mut out = stdout();
        terminal::enable_raw_mode()?;
        let init_res: Result<()> = (|| {
            out.execute(terminal::EnterAlternateScreen)?;
            out.execute(cursor::Hide)?;
            let _ = out.execute(terminal::DisableLineWrap);
            out.execute(SetAttribute(Attribute::Reset))?;
            out.execute(ResetColor)?;
            out.execute(terminal::Clear(terminal::ClearType::All))?;
            out.flush()?;
            Ok(())
        })();
        if let Err(e) = init_res {
            restore_terminal_best_effort();
            return Err(e);
        }
        Ok(Self {
            stdout: out,
            last: None,
        })
    }

    pub fn size(&self) -> Result<(u16, u16)> {
        terminal::size()
    }

    fn queue_style(&mut self, cell: &Cell) -> Result<()> {
        self.stdout.queue(SetAttribute(Attribute::Reset))?;
        self.stdout
            .queue(SetForegroundColor(cell.fg.unwrap_or(Color::Reset)))?;
        self.stdout
            .queue(SetBackgroundColor(cell.bg.unwrap_or(Color::Reset)))?;
        if cell.bold {
            self.stdout.queue(SetAttribute(Attribute::Bold))?;
        }
        if cell.blink {
            self.stdout.queue(SetAttribute(Attribute::SlowBlink))?;
        }
        Ok(())
    }

    /// Flushes `frame`, writing only runs of cells that differ from the last
    /// frame drawn. A size change forces a full repaint.
    pub fn draw(&mut self, frame: &Frame) -> Result<()> {
        let full = self
            .last
            .as_ref()
            .map(|l| l.width != frame.width || l.height != frame.height)
            .unwrap_or(true);
        if full {
            self.stdout
                .queue(terminal::Clear(terminal::ClearType::All))?;
        }

        let width = frame.width as usize;
        let mut cur_style: Option<Cell> = None;
        let mut run = String::with_capacity(64);

        for y in 0..frame.height {
            let row = y as usize * width;
            let mut x = 0usize;
            while x < width {
                let cell = frame.cells[row + x];
                let unchanged = !full
                    && self
                        .last
                        .as_ref()
                        .is_some_and(|l| l.cells[row + x] == cell);
                if unchanged {
                    x += 1;
                    continue;
                }

                let x0 = x;
                run.clear();
                if cell.ch != WIDE_TAIL {
                    run.push(cell.ch);
                }
                x += 1;
                while x < width {
                    let next = frame.cells[row + x];
                    if !next.same_style(&cell) {
                        break;
                    }
                    let next_unchanged = !full
                        && self
                            .last
                            .as_ref()
                            .is_some_and(|l| l.cells[row + x] == next);
                    if next_unchanged {
                        break;
                    }
                    if next.ch != WIDE_TAIL {
                        run.push(next.ch);
                    }
                    x += 1;
                }

                self.stdout.queue(cursor::MoveTo(x0 as u16, y))?;
                if cur_style.map_or(true, |s| !s.same_style(&cell)) {
                    self.queue_style(&cell)?;
                    cur_style = Some(cell);
                }
                self.stdout.queue(Print(run.as_str()))?;
            }
        }

        self.stdout.queue(SetAttribute(Attribute::Reset))?;
        self.stdout.queue(ResetColor)?;
        self.stdout.flush()?;
        self.last = Some(frame.clone());
        Ok(())
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        let _ = self.stdout.execute(SetAttribute(Attribute::Reset));
        let _ = self.stdout.execute(ResetColor);
        let _ = self.stdout.execute(cursor::Show);
        let _ = self.stdout.execute(terminal::EnableLineWrap);
        let _ = self.stdout.execute(terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
        let _ = self.stdout.flush();
    }
}

pub fn restore_terminal_best_effort() {
    let mut out = stdout();
    let _ = out.execute(SetAttribute(Attribute::Reset));
    let _ = out.execute(ResetColor);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::EnableLineWrap);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();
    let _ = out.flush();
}

/// The countdown face: art in the chosen font, message underneath.
pub struct Screen {
    term: Terminal,
    font: &'static Font,
    config: DisplayConfig,
    mode: ColorMode,
}

impl Screen {
    pub fn new(term: Terminal, font: &'static Font, config: DisplayConfig) -> Self {
        Self {
            term,
            font,
            config,
            mode: ColorMode::detect(),
        }
    }

    fn paint(&mut self, art: &[String], phase: Phase) -> Result<()> {
        let (w, h) = self.term.size()?;
        let look = self.mode.adapt(Look::for_phase(phase, &self.config));
        let mut frame = Frame::new(w, h, look.bg);
        frame.compose(art, &self.config.label, &look);
        self.term.draw(&frame)
    }

    /// Shows the message alone until the first tick brings the clock.
    pub fn show_label(&mut self) -> Result<()> {
        self.paint(&[], Phase::Armed(UrgencyBand::High))
    }
}

impl RenderSink for Screen {
    fn render(&mut self, instr: &RenderInstruction) -> Result<()> {
        let art = self.font.render_lines(&instr.text);
        self.paint(&art, instr.phase)
    }
}

pub struct Bell;

impl AlarmSink for Bell {
    fn ring(&mut self) -> Result<()> {
        let mut out = stdout();
        out.queue(Print(BEL))?;
        out.flush()
    }
}

/// Wall-clock ticks that wake early for quit keys or a signal.
pub struct Ticker {
    cancel: Arc<AtomicBool>,
}

impl Ticker {
    pub fn new(cancel: Arc<AtomicBool>) -> Self {
        Self { cancel }
    }

    fn quit_requested(&self) -> Result<bool> {
        while event::poll(Duration::ZERO)? {
            if let Event::Key(k) = event::read()? {
                if is_quit_key(&k) {
                    return Ok(true);
                }
            }
        }
        Ok(false)
    }
}

/// `q`, `Esc` or `Ctrl+C`, on press only.
fn is_quit_key(k: &KeyEvent) -> bool {
    if k.kind != KeyEventKind::Press {
        return false;
    }
    match (k.code, k.modifiers) {
        (KeyCode::Char('q'), _) | (KeyCode::Esc, _) => true,
        (KeyCode::Char('c'), m) => m.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

impl TickSource for Ticker {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn wait(&mut self, period: Duration) -> Result<Wait> {
        let deadline = Instant::now() + period;
        loop {
            if self.cancel.load(Ordering::SeqCst) || self.quit_requested()? {
                return Ok(Wait::Cancelled);
            }
            let now = Instant::now();
            if now >= deadline {
                return Ok(Wait::Elapsed);
            }
            // Wakes on any input; the loop re-checks the keys.
            let _ = event::poll((deadline - now).min(POLL_SLICE))?;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn key(code: KeyCode, modifiers: KeyModifiers, kind: KeyEventKind) -> KeyEvent {
        KeyEvent {
            code,
            modifiers,
            kind,
            state: KeyEventState::NONE,
        }
    }

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        key(code, modifiers, KeyEventKind::Press)
    }

    #[test]
    fn quit_keys_are_q_esc_and_ctrl_c() {
        assert!(is_quit_key(&press(KeyCode::Char('q'), KeyModifiers::NONE)));
        assert!(is_quit_key(&press(KeyCode::Esc, KeyModifiers::NONE)));
        assert!(is_quit_key(&press(KeyCode::Char('c'), KeyModifiers::CONTROL)));
    }

    #[test]
    fn other_keys_do_not_quit() {
        assert!(!is_quit_key(&press(KeyCode::Char('c'), KeyModifiers::NONE)));
        assert!(!is_quit_key(&press(KeyCode::Char('x'), KeyModifiers::NONE)));
        assert!(!is_quit_key(&press(KeyCode::Enter, KeyModifiers::NONE)));
    }

    #[test]
    fn releases_and_repeats_are_ignored() {
        let q = KeyCode::Char('q');
        assert!(!is_quit_key(&key(q, KeyModifiers::NONE, KeyEventKind::Release)));
        assert!(!is_quit_key(&key(q, KeyModifiers::NONE, KeyEventKind::Repeat)));
    }

    #[test]
    fn raised_signal_flag_cancels_wait_immediately() {
        let mut ticker = Ticker::new(Arc::new(AtomicBool::new(true)));
        let began = Instant::now();
        let res = ticker.wait(Duration::from_secs(10)).unwrap();
        assert_eq!(res, Wait::Cancelled);
        assert!(began.elapsed() < POLL_SLICE);
    }
}
