use chrono::{Local, NaiveDate};
use regex::Regex;

lazy_static::lazy_static! {
    /// Four-digit year; month and day may drop their leading zero.
    static ref DATE_SHAPE: Regex =
        Regex::new(r"^[0-9]{4}-[0-9]{1,2}-[0-9]{1,2}$").expect("valid date pattern");
}

/// Date formats used by the referral table.
#[allow(non_camel_case_types)]
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy)]
pub enum TimeFormat {
    /// `YYYY-MM-DD`
    YYYYMMDD,
}

impl TimeFormat {
    pub fn pattern(&self) -> &'static str {
        match self {
            TimeFormat::YYYYMMDD => "%Y-%m-%d",
        }
    }
}

/// Source of "today" for intake stamps and bonus windows.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// Local wall-clock date.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalClock;

impl Clock for LocalClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Always reports the same date.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

pub fn format_date(date: NaiveDate, format: TimeFormat) -> String {
    date.format(format.pattern()).to_string()
}

/// Parses a `YYYY-MM-DD` date, `None` when the text is not a calendar date.
/// Signs, surrounding whitespace and short years are rejected.
pub fn parse_date(input: &str) -> Option<NaiveDate> {
    if !DATE_SHAPE.is_match(input) {
        return None;
    }
    NaiveDate::parse_from_str(input, TimeFormat::YYYYMMDD.pattern()).ok()
}
