// Copyright (c) 2026 rezky_nightky

//! Turns the positional DURATION argument into an absolute target.
//!
//! Three forms are accepted, tried in this order:
//! - an ISO-like datetime, `2026-01-25T14:00[:SS]`
//! - a time of day, `T14:00`, meaning its next occurrence
//! - a duration, `1h30m`, `25m`, `15m30s`
//!
//! Wall-clock forms are read in the caller's time zone. The resulting
//! [`Target`] is a UTC instant, so durations are real elapsed time even
//! across a DST change.

use std::sync::LazyLock;

use chrono::{
    DateTime, Days, Duration, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeZone,
    Timelike, Utc,
};
use regex::Regex;

use crate::error::TimerError;

static DURATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:([0-9]{1,2})h)?(?:([0-9]{1,2})m)?(?:([0-9]{1,2})s)?$")
        .expect("duration pattern is valid")
});

const DATETIME_FORMATS: [&str; 6] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// How far back to look for the offset in force before a skipped hour.
const GAP_LOOKBACK_HOURS: i64 = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimeSpec {
    Duration {
        hours: Option<u32>,
        minutes: Option<u32>,
        seconds: Option<u32>,
    },
    AbsoluteInstant(NaiveDateTime),
    TimeOfDay(NaiveTime),
}

/// Instant at which the countdown hits zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Target {
    pub instant: DateTime<Utc>,
    /// Parse-time `now`, truncated to the second.
    pub start: DateTime<Utc>,
}

impl Target {
    pub fn total_seconds(&self) -> i64 {
        (self.instant - self.start).num_seconds()
    }
}

fn looks_like_date(s: &str) -> bool {
    let b = s.as_bytes();
    b.len() >= 5 && b[..4].iter().all(u8::is_ascii_digit) && b[4] == b'-'
}

fn parse_datetime(s: &str) -> Result<NaiveDateTime, TimerError> {
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(dt);
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map(|d| d.and_time(NaiveTime::MIN))
        .map_err(|_| TimerError::InvalidDatetime {
            input: s.to_string(),
        })
}

fn parse_component(cap: Option<regex::Match<'_>>) -> Option<u32> {
    // At most two digits, so this cannot overflow.
    cap.and_then(|m| m.as_str().parse().ok())
}

/// Maps a wall-clock reading in `tz` to a real instant.
///
/// A repeated (fall-back) reading takes its first occurrence. A reading
/// inside a spring-forward gap is taken with the offset in force before the
/// gap, so `02:30` in a skipped hour lands at `03:30`.
fn resolve_local<Tz: TimeZone>(tz: &Tz, naive: NaiveDateTime) -> Option<DateTime<Utc>> {
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => Some(dt.with_timezone(&Utc)),
        LocalResult::Ambiguous(first, _second) => Some(first.with_timezone(&Utc)),
        LocalResult::None => {
            let before = tz.from_local_datetime(&(naive - Duration::hours(GAP_LOOKBACK_HOURS))).earliest()?;
            let offset = i64::from(before.offset().fix().local_minus_utc());
            Some(Utc.from_utc_datetime(&(naive - Duration::seconds(offset))))
        }
    }
}

fn whole_second(dt: DateTime<Utc>) -> DateTime<Utc> {
    dt.with_nanosecond(0).unwrap_or(dt)
}

impl TimeSpec {
    pub fn classify(raw: &str) -> Result<Self, TimerError> {
        let s = raw.trim();
        if s.is_empty() {
            return Err(TimerError::MissingArgument);
        }

        if looks_like_date(s) {
            return parse_datetime(s).map(TimeSpec::AbsoluteInstant);
        }

        if let Some(rest) = s.strip_prefix('T') {
            return NaiveTime::parse_from_str(rest, "%H:%M")
                .map(TimeSpec::TimeOfDay)
                .map_err(|_| TimerError::InvalidTimeOfDay {
                    input: s.to_string(),
                });
        }

        let invalid = || TimerError::InvalidDuration {
            input: s.to_string(),
        };
        let caps = DURATION_RE.captures(s).ok_or_else(invalid)?;
        let hours = parse_component(caps.get(1));
        let minutes = parse_component(caps.get(2));
        let seconds = parse_component(caps.get(3));
        if hours.is_none() && minutes.is_none() && seconds.is_none() {
            return Err(invalid());
        }
        Ok(TimeSpec::Duration {
            hours,
            minutes,
            seconds,
        })
    }

    /// Anchors this time spec to `now`, reading wall-clock forms in the
    /// time zone `now` carries.
    ///
    /// An explicit seconds field adds one extra second to the target so the
    /// first frame, drawn one tick after start, still shows the requested
    /// seconds value.
    pub fn resolve<Tz: TimeZone>(
        self,
        raw: &str,
        now: &DateTime<Tz>,
    ) -> Result<Target, TimerError> {
        let start = whole_second(now.with_timezone(&Utc));
        let tz = now.timezone();
        let instant = match self {
            TimeSpec::Duration {
                hours,
                minutes,
                seconds,
            } => {
                let h = i64::from(hours.unwrap_or(0));
                let m = i64::from(minutes.unwrap_or(0));
                let s = i64::from(seconds.unwrap_or(0));
                let total = h * 3600 + m * 60 + s;
                if total == 0 {
                    return Err(TimerError::ZeroDuration);
                }
                let offset = i64::from(seconds.is_some());
                start + Duration::seconds(total + offset)
            }
            TimeSpec::AbsoluteInstant(naive) => {
                let dt = resolve_local(&tz, naive).map(whole_second).ok_or_else(|| {
                    TimerError::InvalidDatetime {
                        input: raw.trim().to_string(),
                    }
                })?;
                if dt <= start {
                    return Err(TimerError::PastTarget {
                        input: raw.trim().to_string(),
                    });
                }
                dt
            }
            TimeSpec::TimeOfDay(t) => {
                let invalid = || TimerError::InvalidTimeOfDay {
                    input: raw.trim().to_string(),
                };
                let today = now.date_naive();
                let candidate = resolve_local(&tz, today.and_time(t)).ok_or_else(invalid)?;
                if candidate <= start {
                    let tomorrow = today.checked_add_days(Days::new(1)).ok_or_else(invalid)?;
                    resolve_local(&tz, tomorrow.and_time(t)).ok_or_else(invalid)?
                } else {
                    candidate
                }
            }
        };
        Ok(Target { instant, start })
    }
}

pub fn parse<Tz: TimeZone>(raw: &str, now: &DateTime<Tz>) -> Result<Target, TimerError> {
    let spec = TimeSpec::classify(raw)?;
    log::debug!("classified {:?} as {:?}", raw, spec);
    spec.resolve(raw, now)
}
