// 📅 Session - one scheduled meeting with a student
//
// A session is identified by WHEN it happens. Two sessions at the same date
// and time are the same session, whatever their subject or fee.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Result, TuitionError};

// ============================================================================
// SESSION DATE
// ============================================================================

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M";
const DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M";

// chrono alone accepts space-padded fields and signed years; the shape is fixed first
static DATE_SHAPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("valid date shape"));

static TIME_SHAPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{2}:[0-9]{2}$").expect("valid time shape"));

/// Seconds, if written, must be zero
static ISO_SHAPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([0-9]{4}-[0-9]{2}-[0-9]{2})T([0-9]{2}:[0-9]{2})(?::00)?$")
        .expect("valid date-time shape")
});

/// Calendar date plus time of day of a session
///
/// Built from `YYYY-MM-DD` and `HH:MM`, or from the combined ISO form
/// `YYYY-MM-DDTHH:MM` that storage writes back out (a `:00` seconds suffix is
/// tolerated). Always minute precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SessionDate {
    date: NaiveDate,
    time: NaiveTime,
}

impl SessionDate {
    pub const MESSAGE_CONSTRAINTS: &'static str =
        "Format of date and time should be of the format YYYY-MM-DD and HH:MM.";

    pub fn new(date_value: &str, time_value: &str) -> Result<Self> {
        let date = parse_date(date_value)?;
        let time = parse_time(time_value)?;
        Ok(SessionDate { date, time })
    }

    /// Parse the combined ISO-8601 form, e.g. `2024-01-01T10:00`
    pub fn parse_iso(value: &str) -> Result<Self> {
        let captures = ISO_SHAPE
            .captures(value)
            .ok_or_else(|| unparsable(value))?;
        Self::new(&captures[1], &captures[2])
    }

    pub fn is_valid(date_value: &str, time_value: &str) -> bool {
        Self::new(date_value, time_value).is_ok()
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn time(&self) -> NaiveTime {
        self.time
    }

    pub fn date_time(&self) -> NaiveDateTime {
        self.date.and_time(self.time)
    }

    /// True when both fall on the same time of day, whatever the date
    pub fn has_same_time(a: &SessionDate, b: &SessionDate) -> bool {
        a.time == b.time
    }

    /// Whole calendar days from `a` (inclusive) to `b` (exclusive).
    ///
    /// Negative when `b` falls before `a`; callers wanting a count pass them in order.
    pub fn days_between(a: &SessionDate, b: &SessionDate) -> i64 {
        (b.date - a.date).num_days()
    }
}

impl fmt::Display for SessionDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.date_time().format(DATE_TIME_FORMAT))
    }
}

impl FromStr for SessionDate {
    type Err = TuitionError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse_iso(s)
    }
}

impl TryFrom<String> for SessionDate {
    type Error = TuitionError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse_iso(&value)
    }
}

impl From<SessionDate> for String {
    fn from(value: SessionDate) -> String {
        value.to_string()
    }
}

fn parse_date(value: &str) -> Result<NaiveDate> {
    if !DATE_SHAPE.is_match(value) {
        return Err(unparsable(value));
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(constraint_error)
}

fn parse_time(value: &str) -> Result<NaiveTime> {
    if !TIME_SHAPE.is_match(value) {
        return Err(unparsable(value));
    }
    NaiveTime::parse_from_str(value, TIME_FORMAT).map_err(constraint_error)
}

fn unparsable(value: &str) -> TuitionError {
    constraint_error(format!("Text '{}' could not be parsed", value))
}

fn constraint_error(detail: impl fmt::Display) -> TuitionError {
    TuitionError::validation(
        "session date",
        format!("{} {}", SessionDate::MESSAGE_CONSTRAINTS, detail),
    )
}

// ============================================================================
// DURATION
// ============================================================================

/// Length of a session in whole minutes (1 to 1440)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Duration(u32);

impl Duration {
    pub const MESSAGE_CONSTRAINTS: &'static str =
        "Duration should be a positive whole number of minutes, at most 1440";

    const MAX_MINUTES: u32 = 24 * 60;

    pub fn from_minutes(minutes: u32) -> Result<Self> {
        if (1..=Self::MAX_MINUTES).contains(&minutes) {
            Ok(Duration(minutes))
        } else {
            Err(TuitionError::validation("duration", Self::MESSAGE_CONSTRAINTS))
        }
    }

    pub fn new(value: &str) -> Result<Self> {
        if value.is_empty() || !value.chars().all(|c| c.is_ascii_digit()) {
            return Err(TuitionError::validation("duration", Self::MESSAGE_CONSTRAINTS));
        }
        let minutes = value
            .parse::<u32>()
            .map_err(|_| TuitionError::validation("duration", Self::MESSAGE_CONSTRAINTS))?;
        Self::from_minutes(minutes)
    }

    pub fn minutes(&self) -> u32 {
        self.0
    }

    pub fn as_chrono(&self) -> chrono::Duration {
        chrono::Duration::minutes(i64::from(self.0))
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} min", self.0)
    }
}

impl FromStr for Duration {
    type Err = TuitionError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl TryFrom<u32> for Duration {
    type Error = TuitionError;

    fn try_from(value: u32) -> Result<Self> {
        Self::from_minutes(value)
    }
}

impl From<Duration> for u32 {
    fn from(value: Duration) -> u32 {
        value.0
    }
}

// ============================================================================
// SUBJECT
// ============================================================================

static SUBJECT_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9 ]*$").expect("valid subject pattern"));

fn is_valid_subject(value: &str) -> bool {
    SUBJECT_PATTERN.is_match(value)
}

string_value_object!(
    /// What is taught in a session, e.g. "Math" or "A Math"
    Subject,
    field = "subject",
    constraints = "Subjects should only contain alphanumeric characters and spaces, and it should not be blank",
    valid = is_valid_subject
);

// ============================================================================
// FEE
// ============================================================================

static FEE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([0-9]+)(?:\.([0-9]{1,2}))?$").expect("valid fee pattern"));

/// Amount charged for a session, held in cents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Fee(u64);

impl Fee {
    pub const MESSAGE_CONSTRAINTS: &'static str =
        "Fee should be a non-negative amount with at most two decimal places";

    pub fn new(value: &str) -> Result<Self> {
        let invalid = || TuitionError::validation("fee", Self::MESSAGE_CONSTRAINTS);

        let captures = FEE_PATTERN.captures(value).ok_or_else(invalid)?;
        let whole: u64 = captures[1].parse().map_err(|_| invalid())?;
        let cents: u64 = match captures.get(2) {
            Some(m) if m.as_str().len() == 1 => {
                m.as_str().parse::<u64>().map_err(|_| invalid())? * 10
            }
            Some(m) => m.as_str().parse().map_err(|_| invalid())?,
            None => 0,
        };

        whole
            .checked_mul(100)
            .and_then(|w| w.checked_add(cents))
            .map(Fee)
            .ok_or_else(invalid)
    }

    pub fn cents(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for Fee {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

impl FromStr for Fee {
    type Err = TuitionError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl TryFrom<String> for Fee {
    type Error = TuitionError;

    fn try_from(value: String) -> Result<Self> {
        Self::new(&value)
    }
}

impl From<Fee> for String {
    fn from(value: Fee) -> String {
        value.to_string()
    }
}

// ============================================================================
// SESSION
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    session_date: SessionDate,
    duration: Duration,
    subject: Subject,
    fee: Fee,
}

impl Session {
    pub fn new(session_date: SessionDate, duration: Duration, subject: Subject, fee: Fee) -> Self {
        Session {
            session_date,
            duration,
            subject,
            fee,
        }
    }

    /// Build from parts that may not all have been supplied.
    ///
    /// Fails with `MissingField` naming the first absent part.
    pub fn from_parts(
        session_date: Option<SessionDate>,
        duration: Option<Duration>,
        subject: Option<Subject>,
        fee: Option<Fee>,
    ) -> Result<Self> {
        Ok(Session {
            session_date: session_date.ok_or(TuitionError::MissingField("session date"))?,
            duration: duration.ok_or(TuitionError::MissingField("duration"))?,
            subject: subject.ok_or(TuitionError::MissingField("subject"))?,
            fee: fee.ok_or(TuitionError::MissingField("fee"))?,
        })
    }

    pub fn session_date(&self) -> &SessionDate {
        &self.session_date
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn subject(&self) -> &Subject {
        &self.subject
    }

    pub fn fee(&self) -> Fee {
        self.fee
    }

    /// When the session finishes
    pub fn ends_at(&self) -> NaiveDateTime {
        self.session_date.date_time() + self.duration.as_chrono()
    }

    /// Weak identity: same date and time of day
    pub fn is_same_session(&self, other: &Session) -> bool {
        std::ptr::eq(self, other) || self.session_date == other.session_date
    }
}

impl fmt::Display for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}; Duration: {}; Subject: {}; Fee: {}",
            self.session_date, self.duration, self.subject, self.fee
        )
    }
}

// ============================================================================
// TESTS
// ============================================================================
