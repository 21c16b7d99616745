//! Contest window and elapsed-time progress.

use crate::error::ConfigError;
use crate::transform::round1;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

const SECONDS_PER_DAY: i64 = 86_400;

/// Start and end date of a contest. `end` is strictly after `start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawWindow")]
pub struct ContestWindow {
    start: NaiveDate,
    end: NaiveDate,
}

/// Unvalidated wire form; deserialization goes through [`ContestWindow::new`].
#[derive(Deserialize)]
struct RawWindow {
    start: NaiveDate,
    end: NaiveDate,
}

impl TryFrom<RawWindow> for ContestWindow {
    type Error = ConfigError;

    fn try_from(raw: RawWindow) -> Result<Self, Self::Error> {
        Self::new(raw.start, raw.end)
    }
}

/// How far into the contest window we are.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Progress {
    /// Whole days since the start date; negative before the contest begins.
    pub days_passed: i64,
    pub days_total: i64,
    /// Elapsed share rounded to one decimal place, at most 1.0. Not floored.
    pub fraction: f64,
}

impl ContestWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, ConfigError> {
        if end <= start {
            return Err(ConfigError::InvalidContestWindow { start, end });
        }
        Ok(Self { start, end })
    }

    /// Parse two `YYYY-MM-DD` dates.
    pub fn parse(start: &str, end: &str) -> Result<Self, ConfigError> {
        let start = parse_date("START_DATE", start)?;
        let end = parse_date("END_DATE", end)?;
        Self::new(start, end)
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn days_total(&self) -> i64 {
        (self.end - self.start).num_days()
    }

    /// Midnight UTC on the start date, the lower bound of the bar query.
    pub fn start_datetime(&self) -> DateTime<Utc> {
        self.start.and_time(NaiveTime::MIN).and_utc()
    }

    /// Progress at a given wall-clock instant.
    pub fn progress_at(&self, now: NaiveDateTime) -> Progress {
        let elapsed = now - self.start.and_time(NaiveTime::MIN);
        let days_passed = elapsed.num_seconds().div_euclid(SECONDS_PER_DAY);
        let days_total = self.days_total();
        let fraction = round1(days_passed as f64 / days_total as f64).min(1.0);

        Progress {
            days_passed,
            days_total,
            fraction,
        }
    }

    /// Progress at the local wall-clock time.
    pub fn progress_now(&self) -> Progress {
        self.progress_at(chrono::Local::now().naive_local())
    }
}

impl Progress {
    /// Progress-bar caption, e.g. `Day 10 / 30`.
    pub fn label(&self) -> String {
        format!("Day {} / {}", self.days_passed, self.days_total)
    }

    pub fn percent(&self) -> f64 {
        self.fraction * 100.0
    }

    /// True from the end date on, independent of the rounded fraction.
    pub fn is_complete(&self) -> bool {
        self.days_passed >= self.days_total
    }
}

/// Days passed, total days and clamped fraction for a contest window.
pub fn proportion_of_days_passed(
    start: NaiveDate,
    end: NaiveDate,
    now: NaiveDateTime,
) -> Result<Progress, ConfigError> {
    Ok(ContestWindow::new(start, end)?.progress_at(now))
}

/// Parse a `YYYY-MM-DD` setting value.
pub fn parse_date(key: &'static str, value: &str) -> Result<NaiveDate, ConfigError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|e| ConfigError::InvalidSetting {
        key,
        reason: format!("'{value}' is not a YYYY-MM-DD date: {e}"),
    })
}
