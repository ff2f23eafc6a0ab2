// Copyright (c) 2026 rezky_nightky

use std::io;
use std::time::Duration;

use chrono::{DateTime, Timelike, Utc};

use crate::config::Thresholds;
use crate::timespec::Target;

pub const TICK: Duration = Duration::from_secs(1);
pub const ALARM_INTERVAL: Duration = Duration::from_secs(10);
pub const EXPIRED_TEXT: &str = "00:00:00";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UrgencyBand {
    High,
    Mid,
    Low,
}

impl UrgencyBand {
    /// `(high, 1]` is High, `(low, high]` is Mid, everything below is Low.
    pub fn classify(remaining: i64, total: i64, thresholds: &Thresholds) -> Self {
        let ratio = remaining as f64 / total.max(1) as f64;
        if ratio > thresholds.high {
            UrgencyBand::High
        } else if ratio > thresholds.low {
            UrgencyBand::Mid
        } else {
            UrgencyBand::Low
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Armed(UrgencyBand),
    Expired,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderInstruction {
    pub text: String,
    pub phase: Phase,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Wait {
    Elapsed,
    Cancelled,
}

/// Why `run` returned. The alarm phase only ever ends by cancellation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Cancelled,
}

pub trait TickSource {
    /// A real instant; local clock changes must not move it.
    fn now(&self) -> DateTime<Utc>;
    fn wait(&mut self, period: Duration) -> io::Result<Wait>;
}

pub trait RenderSink {
    fn render(&mut self, instr: &RenderInstruction) -> io::Result<()>;
}

pub trait AlarmSink {
    fn ring(&mut self) -> io::Result<()>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CountdownState {
    pub remaining_seconds: i64,
    pub total_seconds: i64,
}

fn clamp_field(v: i64) -> i64 {
    v.max(0)
}

/// Formats already-split fields as `HH:MM:SS`. No carrying between fields.
pub fn format_hms(hours: i64, minutes: i64, seconds: i64) -> String {
    format!(
        "{:02}:{:02}:{:02}",
        clamp_field(hours),
        clamp_field(minutes),
        clamp_field(seconds)
    )
}

pub fn format_remaining(total_secs: i64) -> String {
    let total_secs = total_secs.max(0);
    format_hms(total_secs / 3600, (total_secs / 60) % 60, total_secs % 60)
}

fn whole_seconds_until(target: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let now = now.with_nanosecond(0).unwrap_or(now);
    (target - now).num_seconds()
}

pub struct CountdownEngine<'a> {
    target: Target,
    thresholds: &'a Thresholds,
    bell: bool,
}

impl<'a> CountdownEngine<'a> {
    pub fn new(target: Target, thresholds: &'a Thresholds, bell: bool) -> Self {
        Self {
            target,
            thresholds,
            bell,
        }
    }

    pub fn run<T, R, A>(&self, ticks: &mut T, screen: &mut R, alarm: &mut A) -> io::Result<Outcome>
    where
        T: TickSource,
        R: RenderSink,
        A: AlarmSink,
    {
        let total = whole_seconds_until(self.target.instant, ticks.now());
        if total > 0 {
            let mut state = CountdownState {
                remaining_seconds: total,
                total_seconds: total,
            };
            log::debug!("armed: {} s until {}", total, self.target.instant);

            loop {
                if ticks.wait(TICK)? == Wait::Cancelled {
                    return Ok(Outcome::Cancelled);
                }
                state.remaining_seconds = whole_seconds_until(self.target.instant, ticks.now());
                if state.remaining_seconds <= 0 {
                    break;
                }
                let band = UrgencyBand::classify(
                    state.remaining_seconds,
                    state.total_seconds,
                    self.thresholds,
                );
                log::trace!("tick: {} s left, {:?}", state.remaining_seconds, band);
                screen.render(&RenderInstruction {
                    text: format_remaining(state.remaining_seconds),
                    phase: Phase::Armed(band),
                })?;
            }
        } else {
            log::warn!("target {} is not in the future", self.target.instant);
        }

        log::info!("countdown expired at {}", ticks.now());
        self.sound_alarm(ticks, screen, alarm)
    }

    fn sound_alarm<T, R, A>(&self, ticks: &mut T, screen: &mut R, alarm: &mut A) -> io::Result<Outcome>
    where
        T: TickSource,
        R: RenderSink,
        A: AlarmSink,
    {
        let expired = RenderInstruction {
            text: EXPIRED_TEXT.to_string(),
            phase: Phase::Expired,
        };
        loop {
            if self.bell {
                alarm.ring()?;
            }
            screen.render(&expired)?;
            if ticks.wait(ALARM_INTERVAL)? == Wait::Cancelled {
                return Ok(Outcome::Cancelled);
            }
        }
    }
}
