//! # Time formatting
//!
//! Timestamps are rendered with strftime-style patterns. Everything chrono
//! understands is passed through to chrono verbatim; on top of that this
//! module adds one directive of its own:
//!
//! ```ascii
//!     %[N]    nanosecond remainder, 9 digits, zero padded
//!     %[dN]   same, preceded by the single separator character `d`
//! ```
//!
//! Both forms expand to nothing at all (separator included) when the
//! remainder is zero, so `"%H:%M:%S%[.N]"` prints `12:00:00` for a whole
//! second and `12:00:00.000000250` otherwise.
//!
//! Durations are rendered by `format_duration` in the coarsest unit that
//! fits. Months and years are fixed 31 and 365 day buckets laid over the
//! epoch calendar, not calendar-accurate spans; this is only meant for
//! human-readable elapsed times.
use std::fmt::{self, Write};
use std::time::Duration;

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Datelike, Local, TimeZone, Timelike, Utc};

use crate::error::{Error, Result};
use crate::timestamp::Timestamp;

pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%[.N]";

const MINUTE: u64 = 60;
const HOUR: u64 = 60 * MINUTE;
const DAY: u64 = 24 * HOUR;
const MONTH: u64 = 31 * DAY;
const YEAR: u64 = 365 * DAY;

/// How to render a `Timestamp`.
#[derive(Debug, Clone, Copy)]
pub struct TimestampFormat<'a> {
    pattern: &'a str,
    special: bool,
    local: bool,
    width: usize,
}

impl<'a> TimestampFormat<'a> {
    /// Special rendering of sentinels and local time are on by default.
    pub fn new(pattern: &'a str) -> TimestampFormat<'a> {
        TimestampFormat {
            pattern,
            special: true,
            local: true,
            width: 0,
        }
    }

    /// Render sentinels as `<unknown>`, `<nonexistent>` and `<unreal>`.
    pub fn special(mut self, special: bool) -> TimestampFormat<'a> {
        self.special = special;
        self
    }

    pub fn local(mut self, local: bool) -> TimestampFormat<'a> {
        self.local = local;
        self
    }

    /// Right-align the output in a field of `width` characters. Not
    /// supported together with `%[N]`.
    pub fn width(mut self, width: usize) -> TimestampFormat<'a> {
        self.width = width;
        self
    }

    pub fn render(&self, ts: Timestamp) -> Result<String> {
        let mut out = String::new();
        self.write_to(&mut out, ts)?;
        if out.chars().count() < self.width {
            out = format!("{:>width$}", out, width = self.width);
        }
        Ok(out)
    }

    fn write_to(&self, out: &mut String, ts: Timestamp) -> Result<()> {
        if self.special {
            if let Some(tag) = ts.special_tag() {
                out.push_str(tag);
                return Ok(());
            }
        }

        let utc = DateTime::from_timestamp(ts.seconds(), 0).ok_or(Error::TimeOutOfRange {
            secs: ts.seconds(),
            nanos: ts.subsec_nanos(),
        })?;
        if self.local {
            self.write_chunks(out, &utc.with_timezone(&Local), ts.subsec_nanos())
        } else {
            self.write_chunks(out, &utc, ts.subsec_nanos())
        }
    }

    /// Splits the pattern into runs handed to chrono and `%[..]` directives
    /// handled here. `%x` pairs other than `%[` are skipped over as a unit so
    /// that `%%[` stays a literal.
    fn write_chunks<Tz>(&self, out: &mut String, dt: &DateTime<Tz>, nanos: u32) -> Result<()>
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        let chars: Vec<char> = self.pattern.chars().collect();
        let n = chars.len();
        let (mut i, mut j) = (0, 0);

        while j < n {
            if chars[j] != '%' || j + 1 == n {
                j += 1;
                continue;
            }
            if chars[j + 1] != '[' {
                j += 2;
                continue;
            }

            if self.width != 0 {
                return Err(Error::Format(
                    "padding is not supported when printing nanoseconds".to_string(),
                ));
            }
            put_time(out, dt, &chars[i..j])?;

            let mut k = j + 2;
            let mut separator = None;
            if k < n && chars[k] != 'N' {
                separator = Some(chars[k]);
                k += 1;
            }
            if k >= n || chars[k] != 'N' {
                return Err(self.malformed("expected 'N'"));
            }
            k += 1;
            if k >= n || chars[k] != ']' {
                return Err(self.malformed("expected ']'"));
            }

            if nanos != 0 {
                if let Some(d) = separator {
                    out.push(d);
                }
                write!(out, "{nanos:09}")?;
            }

            i = k + 1;
            j = i;
        }

        put_time(out, dt, &chars[i..n])
    }

    fn malformed(&self, what: &str) -> Error {
        Error::Format(format!("invalid %[ directive in '{}': {what}", self.pattern))
    }
}

fn put_time<Tz>(out: &mut String, dt: &DateTime<Tz>, run: &[char]) -> Result<()>
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    if run.is_empty() {
        return Ok(());
    }
    let run: String = run.iter().collect();
    let items: Vec<Item> = StrftimeItems::new(&run).collect();
    if items.iter().any(|item| matches!(item, Item::Error)) {
        return Err(Error::Format(format!("invalid format string '{run}'")));
    }
    write!(out, "{}", dt.format_with_items(items.into_iter()))?;
    Ok(())
}

impl fmt::Display for Timestamp {
    /// `%Y-%m-%d %H:%M:%S%[.N]` in local time, sentinels as tags.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = TimestampFormat::new(DEFAULT_TIMESTAMP_FORMAT)
            .render(*self)
            .map_err(|_| fmt::Error)?;
        f.write_str(&s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DurationUnit {
    Years,
    Months,
    Days,
    Hours,
    Minutes,
    Seconds,
    SubSecond,
}

impl DurationUnit {
    fn of(secs: u64) -> DurationUnit {
        match secs {
            s if s >= YEAR => DurationUnit::Years,
            s if s >= MONTH => DurationUnit::Months,
            s if s >= DAY => DurationUnit::Days,
            s if s >= HOUR => DurationUnit::Hours,
            s if s >= MINUTE => DurationUnit::Minutes,
            s if s >= 1 => DurationUnit::Seconds,
            _ => DurationUnit::SubSecond,
        }
    }

    fn name(self, nanos: bool) -> &'static str {
        match self {
            DurationUnit::Years => "years",
            DurationUnit::Months => "months",
            DurationUnit::Days => "days",
            DurationUnit::Hours => "hours",
            DurationUnit::Minutes => "minutes",
            DurationUnit::Seconds => "seconds",
            DurationUnit::SubSecond if nanos => "nanoseconds",
            DurationUnit::SubSecond => "seconds",
        }
    }
}

/// Renders an elapsed time, e.g. `05:07 minutes` or `01.000000250 seconds`.
///
/// The whole seconds are laid over the epoch calendar and printed with the
/// year counted from 1970 and month and day zero-based. With `nanos` set the
/// sub-second remainder is appended after a decimal point when non-zero, and
/// durations below one second are printed as a plain nanosecond count.
pub fn format_duration(d: Duration, nanos: bool) -> Result<String> {
    let secs = d.as_secs();
    let unit = DurationUnit::of(secs);
    let mut out = String::new();

    if unit != DurationUnit::SubSecond {
        let dt = i64::try_from(secs)
            .ok()
            .and_then(|s| DateTime::<Utc>::from_timestamp(s, 0))
            .ok_or(Error::TimeOutOfRange {
                secs: i64::MAX,
                nanos: d.subsec_nanos(),
            })?;
        let (h, m, s) = (dt.hour(), dt.minute(), dt.second());
        match unit {
            DurationUnit::Years => write!(
                out,
                "{}-{:02}-{:02} {h:02}:{m:02}:{s:02}",
                dt.year() - 1970,
                dt.month0(),
                dt.day0()
            )?,
            DurationUnit::Months => write!(
                out,
                "{:02}-{:02} {h:02}:{m:02}:{s:02}",
                dt.month0(),
                dt.day0()
            )?,
            DurationUnit::Days => write!(out, "{:02} {h:02}:{m:02}:{s:02}", dt.day0())?,
            DurationUnit::Hours => write!(out, "{h:02}:{m:02}:{s:02}")?,
            DurationUnit::Minutes => write!(out, "{m:02}:{s:02}")?,
            _ => write!(out, "{s:02}")?,
        }
    }

    let remainder = d.subsec_nanos();
    match (nanos && remainder != 0, unit) {
        (true, DurationUnit::SubSecond) => write!(out, "{remainder}")?,
        (true, _) => write!(out, ".{remainder:09}")?,
        (false, DurationUnit::SubSecond) => out.push('0'),
        (false, _) => {}
    }

    write!(out, " {}", unit.name(nanos))?;
    Ok(out)
}

/// `Display` adapter for an elapsed time with nanoseconds.
#[derive(Debug, Clone, Copy)]
pub struct Elapsed(pub Duration);

impl fmt::Display for Elapsed {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = format_duration(self.0, true).map_err(|_| fmt::Error)?;
        f.write_str(&s)
    }
}
