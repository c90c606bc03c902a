//! Timestamps
//! ----------
//!
//! A `Timestamp` is a point in time with nanosecond resolution, stored as the
//! signed number of nanoseconds since the Unix epoch. Three tick values right
//! around the epoch are reserved as sentinels that do not denote real points
//! in time:
//!
//! ```ascii
//!     -1  unknown      (query not attempted / not applicable)
//!      0  nonexistent  (entry vanished between enumeration and query)
//!      1  unreal       (reserved)
//! ```
//!
//! Equality and ordering are plain comparisons of the tick count, so checking
//! for a sentinel is exact. Elapsed time, however, only makes sense between
//! two real timestamps; see `Timestamp::duration_since`.
//!
//! Conversion to and from the host representation (`filetime::FileTime`,
//! seconds plus sub-second nanoseconds) happens only where metadata is read
//! from the filesystem.
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use filetime::FileTime;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub(crate) const NANOS_PER_SEC: i64 = 1_000_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp {
    ticks: i64,
}

impl Timestamp {
    pub const UNKNOWN: Timestamp = Timestamp { ticks: -1 };
    pub const NONEXISTENT: Timestamp = Timestamp { ticks: 0 };
    pub const UNREAL: Timestamp = Timestamp { ticks: 1 };

    pub const fn from_nanos(ticks: i64) -> Timestamp {
        Timestamp { ticks }
    }

    pub const fn as_nanos(self) -> i64 {
        self.ticks
    }

    /// Current time according to the host system clock.
    pub fn now() -> Timestamp {
        let ticks = match SystemTime::now().duration_since(UNIX_EPOCH) {
            Ok(d) => i64::try_from(d.as_nanos()).unwrap_or(i64::MAX),
            Err(e) => i64::try_from(e.duration().as_nanos()).map_or(i64::MIN, |n| -n),
        };
        Timestamp { ticks }
    }

    /// Builds a timestamp from the host's seconds + nanoseconds pair.
    pub fn from_os_time(secs: i64, nanos: u32) -> Result<Timestamp> {
        if i64::from(nanos) >= NANOS_PER_SEC {
            return Err(Error::TimeOutOfRange { secs, nanos });
        }
        secs.checked_mul(NANOS_PER_SEC)
            .and_then(|t| t.checked_add(i64::from(nanos)))
            .map(Timestamp::from_nanos)
            .ok_or(Error::TimeOutOfRange { secs, nanos })
    }

    pub fn from_file_time(time: FileTime) -> Result<Timestamp> {
        Timestamp::from_os_time(time.unix_seconds(), time.nanoseconds())
    }

    pub fn to_os_time(self) -> FileTime {
        FileTime::from_unix_time(self.seconds(), self.subsec_nanos())
    }

    /// Whole seconds since the epoch, rounded towards negative infinity so
    /// that `subsec_nanos` is never negative.
    pub fn seconds(self) -> i64 {
        self.ticks.div_euclid(NANOS_PER_SEC)
    }

    pub fn subsec_nanos(self) -> u32 {
        // rem_euclid keeps this in [0, 1e9).
        self.ticks.rem_euclid(NANOS_PER_SEC) as u32
    }

    pub fn is_special(self) -> bool {
        self.special_tag().is_some()
    }

    pub fn special_tag(self) -> Option<&'static str> {
        match self {
            Timestamp::UNKNOWN => Some("<unknown>"),
            Timestamp::NONEXISTENT => Some("<nonexistent>"),
            Timestamp::UNREAL => Some("<unreal>"),
            _ => None,
        }
    }

    /// Time elapsed from `earlier` to `self`.
    ///
    /// Returns `None` if either side is a sentinel or if `earlier` is in fact
    /// later than `self`.
    pub fn duration_since(self, earlier: Timestamp) -> Option<Duration> {
        if self.is_special() || earlier.is_special() {
            return None;
        }
        let span = self.ticks.checked_sub(earlier.ticks)?;
        u64::try_from(span).ok().map(Duration::from_nanos)
    }
}
