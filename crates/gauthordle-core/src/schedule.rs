//! Puzzle schedule: which commits a puzzle draws from and how it is seeded.
//!
//! Daily puzzles are seeded from the start of the current day in a fixed UTC
//! offset together with [`PUZZLE_VERSION`], so everyone playing on the same
//! day gets the same puzzle. Bumping the version is the only sanctioned way
//! to change a given day's puzzle.

use chrono::{
    DateTime, Days, FixedOffset, Months, NaiveTime, Offset, SecondsFormat, TimeDelta, TimeZone,
    Utc,
};
use serde::Serialize;
use sha2::{Digest, Sha256};

/// Mixed into every daily seed.
pub const PUZZLE_VERSION: u32 = 1;

/// Offset east of UTC, in seconds, at which a new daily puzzle starts.
pub const DAILY_UTC_OFFSET_SECS: i32 = 0;

/// How far back the commit window starts.
pub const HISTORY_MONTHS: u32 = 18;

/// How far before today the commit window ends, so stale clones still have
/// every commit in it.
pub const RECENT_LAG_DAYS: u64 = 7;

/// Daily puzzle or a one-off random one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PuzzleMode {
    Daily,
    Random,
}

impl PuzzleMode {
    pub fn seed(self, now: DateTime<Utc>) -> u64 {
        match self {
            PuzzleMode::Daily => daily_seed(now),
            PuzzleMode::Random => random_seed(now),
        }
    }
}

/// Half-open window of commit dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimeRange {
    pub start: DateTime<FixedOffset>,
    pub end: DateTime<FixedOffset>,
}

impl TimeRange {
    /// `--since` value for `git log`: the start instant with its offset.
    ///
    /// A bare date would be read by git as that date at the current local
    /// time of day, moving the window while the day goes on.
    pub fn since_arg(&self) -> String {
        self.start.to_rfc3339_opts(SecondsFormat::Secs, false)
    }

    /// `--until` value for `git log`. Git includes the bound, so this is the
    /// last second before `end`.
    pub fn until_arg(&self) -> String {
        (self.end - TimeDelta::seconds(1)).to_rfc3339_opts(SecondsFormat::Secs, false)
    }
}

pub fn daily_offset() -> FixedOffset {
    FixedOffset::east_opt(DAILY_UTC_OFFSET_SECS).unwrap_or_else(|| Utc.fix())
}

/// Midnight of `now`'s calendar day in the daily offset.
pub fn day_start(now: DateTime<Utc>) -> DateTime<FixedOffset> {
    let offset = daily_offset();
    let local = now.with_timezone(&offset);
    let midnight = local.date_naive().and_time(NaiveTime::MIN);
    offset
        .from_local_datetime(&midnight)
        .earliest()
        .unwrap_or(local)
}

/// Commit window for the puzzle played at `now`.
pub fn puzzle_time_range(now: DateTime<Utc>) -> TimeRange {
    let today = day_start(now);
    TimeRange {
        start: today
            .checked_sub_months(Months::new(HISTORY_MONTHS))
            .unwrap_or(today),
        end: today
            .checked_sub_days(Days::new(RECENT_LAG_DAYS))
            .unwrap_or(today),
    }
}

/// Seed shared by every daily puzzle played on `now`'s day.
pub fn daily_seed(now: DateTime<Utc>) -> u64 {
    let day = day_start(now).timestamp();
    seed_from(&format!("gauthordle:v{PUZZLE_VERSION}:{day}"))
}

/// Seed for a one-off puzzle, from the wall clock.
pub fn random_seed(now: DateTime<Utc>) -> u64 {
    let nanos = now
        .timestamp_nanos_opt()
        .unwrap_or_else(|| now.timestamp());
    seed_from(&format!("gauthordle:random:{nanos}"))
}

/// Short tag players can compare to confirm they share a puzzle.
pub fn seed_fingerprint(seed: u64) -> String {
    hex::encode(&seed.to_be_bytes()[..4])
}

fn seed_from(material: &str) -> u64 {
    let digest = Sha256::digest(material.as_bytes());
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    u64::from_be_bytes(bytes)
}
