// 📚 Tuition - aggregate root: one Student plus their sessions
//
// Identity and equality both come from the Student. The session list is NOT
// part of equality: two tuitions for an identical student with different
// sessions compare equal. The store's exact-match lookup relies on that.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::session::Session;
use super::student::Student;
use crate::error::{Result, TuitionError};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "TuitionRecord")]
pub struct Tuition {
    student: Student,
    /// Insertion-ordered, no two entries are the same session
    sessions: Vec<Session>,
}

impl Tuition {
    pub fn new(student: Student) -> Self {
        Tuition {
            student,
            sessions: Vec::new(),
        }
    }

    /// Tuition with an initial session list, rejecting same-time duplicates
    pub fn with_sessions(student: Student, sessions: Vec<Session>) -> Result<Self> {
        let mut tuition = Tuition::new(student);
        for session in sessions {
            tuition.add_session(session)?;
        }
        Ok(tuition)
    }

    pub fn student(&self) -> &Student {
        &self.student
    }

    pub fn sessions(&self) -> &[Session] {
        &self.sessions
    }

    /// Same tuition, new student details, sessions carried over
    pub fn with_student(&self, student: Student) -> Self {
        Tuition {
            student,
            sessions: self.sessions.clone(),
        }
    }

    /// True if an existing session is at the same date and time
    pub fn contains(&self, session: &Session) -> bool {
        self.sessions.iter().any(|s| s.is_same_session(session))
    }

    pub fn add_session(&mut self, session: Session) -> Result<()> {
        if self.contains(&session) {
            return Err(TuitionError::DuplicateSession);
        }
        self.sessions.push(session);
        Ok(())
    }

    /// Weak identity, delegated to the student
    pub fn is_same_tuition(&self, other: &Tuition) -> bool {
        std::ptr::eq(self, other) || self.student.is_same_student(&other.student)
    }

    /// Earliest session starting at or after `now`
    pub fn upcoming_session(&self, now: NaiveDateTime) -> Option<&Session> {
        self.sessions
            .iter()
            .filter(|s| s.session_date().date_time() >= now)
            .min_by_key(|s| s.session_date().date_time())
    }

    /// Sessions held on a calendar day, in insertion order
    pub fn sessions_on(&self, date: NaiveDate) -> Vec<&Session> {
        self.sessions
            .iter()
            .filter(|s| s.session_date().date() == date)
            .collect()
    }
}

/// Equality delegates to full Student equality; sessions are ignored.
impl PartialEq for Tuition {
    fn eq(&self, other: &Self) -> bool {
        self.student == other.student
    }
}

impl Eq for Tuition {}

impl fmt::Display for Tuition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.student)
    }
}

/// Unchecked shape used while deserializing
#[derive(Deserialize)]
struct TuitionRecord {
    student: Student,
    #[serde(default)]
    sessions: Vec<Session>,
}

impl TryFrom<TuitionRecord> for Tuition {
    type Error = TuitionError;

    fn try_from(record: TuitionRecord) -> Result<Self> {
        Tuition::with_sessions(record.student, record.sessions)
    }
}

// ============================================================================
// TESTS
// ============================================================================
