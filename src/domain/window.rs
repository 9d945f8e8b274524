//! Time window types
//!
//! A [`TimeWindow`] is an inclusive `[start, end]` range of instants at second
//! resolution. Adjacent windows produced by the planner satisfy
//! `previous.end + 1s == next.start`.

use chrono::{DateTime, Datelike, Duration, Months, Timelike, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Smallest time unit a window boundary is expressed in
pub fn window_resolution() -> Duration {
    Duration::seconds(1)
}

/// Inclusive time range over which transcripts are paginated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "WindowBounds")]
pub struct TimeWindow {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

/// Unchecked bounds; deserialization goes through [`TimeWindow::new`]
#[derive(Deserialize)]
struct WindowBounds {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl TryFrom<WindowBounds> for TimeWindow {
    type Error = String;

    fn try_from(bounds: WindowBounds) -> Result<Self, Self::Error> {
        TimeWindow::new(bounds.start, bounds.end)
    }
}

impl TimeWindow {
    /// Creates a window, rejecting empty or inverted ranges
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, String> {
        if start >= end {
            return Err(format!(
                "Window start {} must be before end {}",
                start.to_rfc3339(),
                end.to_rfc3339()
            ));
        }
        Ok(Self { start, end })
    }

    /// First instant of the window
    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    /// Last instant of the window (inclusive)
    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// Whether the instant falls inside the window
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        instant >= self.start && instant <= self.end
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} .. {}",
            self.start.format("%Y-%m-%dT%H:%M:%SZ"),
            self.end.format("%Y-%m-%dT%H:%M:%SZ")
        )
    }
}

/// Calendar-relative length of one export window
///
/// Parsed from strings such as `"1 month"`, `"3 months"` or `"10 days"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum WindowLength {
    /// Whole calendar months
    Months(u32),
    /// Whole days
    Days(u32),
}

impl WindowLength {
    /// Adds `n` window lengths to an instant using exact calendar arithmetic
    pub fn advance(&self, from: DateTime<Utc>, n: u32) -> Option<DateTime<Utc>> {
        match *self {
            WindowLength::Months(months) => {
                from.checked_add_months(Months::new(months.checked_mul(n)?))
            }
            WindowLength::Days(days) => {
                let total = i64::from(days)
                    .checked_mul(i64::from(n))
                    .and_then(Duration::try_days)?;
                from.checked_add_signed(total)
            }
        }
    }

    /// Whether `instant` is the first instant of a period of this length
    pub fn is_aligned(&self, instant: DateTime<Utc>) -> bool {
        let midnight = instant.num_seconds_from_midnight() == 0 && instant.nanosecond() == 0;
        match self {
            WindowLength::Months(_) => midnight && instant.day() == 1,
            WindowLength::Days(_) => midnight,
        }
    }

    /// Label of the period starting at `start`, used to name output files
    pub fn period_label(&self, start: DateTime<Utc>) -> String {
        match self {
            WindowLength::Months(_) => start.format("%Y-%m").to_string(),
            WindowLength::Days(_) => start.format("%Y-%m-%d").to_string(),
        }
    }
}

impl fmt::Display for WindowLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WindowLength::Months(1) => write!(f, "1 month"),
            WindowLength::Months(n) => write!(f, "{n} months"),
            WindowLength::Days(1) => write!(f, "1 day"),
            WindowLength::Days(n) => write!(f, "{n} days"),
        }
    }
}

impl FromStr for WindowLength {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        let (amount, unit) = normalized
            .split_once(char::is_whitespace)
            .map(|(a, u)| (a.trim(), u.trim()))
            .ok_or_else(|| {
                format!("Invalid window length '{s}'. Expected e.g. '1 month' or '10 days'")
            })?;

        let amount: u32 = amount
            .parse()
            .map_err(|_| format!("Invalid window length amount '{amount}' in '{s}'"))?;
        if amount == 0 {
            return Err(format!("Window length must be positive, got '{s}'"));
        }

        match unit {
            "month" | "months" => Ok(WindowLength::Months(amount)),
            "day" | "days" => Ok(WindowLength::Days(amount)),
            _ => Err(format!(
                "Invalid window length unit '{unit}'. Must be one of: month(s), day(s)"
            )),
        }
    }
}

impl TryFrom<String> for WindowLength {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<WindowLength> for String {
    fn from(value: WindowLength) -> Self {
        value.to_string()
    }
}
