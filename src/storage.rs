// 💾 Storage - SQLite snapshot of the tuition book, plus JSON import/export
//
// The store only needs two things from persistence: write out the whole
// ordered list, read the whole ordered list back. Rows are re-validated through
// the value-object constructors on load; a bad row fails the whole load.

use anyhow::{Context, Result};
use rusqlite::{params, Connection};
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::entities::{
    Address, Duration, Email, Fee, Name, Phone, Relationship, Session, SessionDate, Student,
    StudyLevel, Subject, Tuition,
};

pub fn setup_database(conn: &Connection) -> Result<()> {
    // Enable WAL mode for crash recovery (in-memory databases ignore it)
    conn.pragma_update(None, "journal_mode", "WAL")?;
    conn.pragma_update(None, "foreign_keys", "ON")?;

    // ==========================================================================
    // Students Table (position = order in the book)
    // ==========================================================================
    conn.execute(
        "CREATE TABLE IF NOT EXISTS students (
            position INTEGER PRIMARY KEY,
            name TEXT UNIQUE NOT NULL,
            phone TEXT NOT NULL,
            email TEXT NOT NULL,
            address TEXT NOT NULL,
            study_level TEXT NOT NULL,
            guardian_phone TEXT NOT NULL,
            relationship TEXT NOT NULL
        )",
        [],
    )?;

    // ==========================================================================
    // Sessions Table (seq = order within a student's sessions)
    // ==========================================================================
    conn.execute(
        "CREATE TABLE IF NOT EXISTS sessions (
            student_position INTEGER NOT NULL REFERENCES students(position) ON DELETE CASCADE,
            seq INTEGER NOT NULL,
            session_date TEXT NOT NULL,
            duration_minutes INTEGER NOT NULL,
            subject TEXT NOT NULL,
            fee TEXT NOT NULL,
            PRIMARY KEY (student_position, seq),
            UNIQUE (student_position, session_date)
        )",
        [],
    )?;

    Ok(())
}

/// Replace the stored snapshot with `tuitions`, atomically
pub fn save_tuitions(conn: &mut Connection, tuitions: &[Tuition]) -> Result<usize> {
    let tx = conn.transaction()?;

    tx.execute("DELETE FROM sessions", [])?;
    tx.execute("DELETE FROM students", [])?;

    for (position, tuition) in tuitions.iter().enumerate() {
        let student = tuition.student();
        tx.execute(
            "INSERT INTO students (
                position, name, phone, email, address, study_level, guardian_phone, relationship
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                position as i64,
                student.name().as_str(),
                student.phone().as_str(),
                student.email().as_str(),
                student.address().as_str(),
                student.study_level().as_str(),
                student.guardian_phone().as_str(),
                student.relationship().as_str(),
            ],
        )
        .with_context(|| format!("Failed to save student {}", student.name()))?;

        for (seq, session) in tuition.sessions().iter().enumerate() {
            tx.execute(
                "INSERT INTO sessions (
                    student_position, seq, session_date, duration_minutes, subject, fee
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    position as i64,
                    seq as i64,
                    session.session_date().to_string(),
                    session.duration().minutes(),
                    session.subject().as_str(),
                    session.fee().to_string(),
                ],
            )?;
        }
    }

    tx.commit()?;
    debug!(count = tuitions.len(), "tuition book saved");

    Ok(tuitions.len())
}

struct StudentRow {
    position: i64,
    name: String,
    phone: String,
    email: String,
    address: String,
    study_level: String,
    guardian_phone: String,
    relationship: String,
}

struct SessionRow {
    student_position: i64,
    session_date: String,
    duration_minutes: u32,
    subject: String,
    fee: String,
}

/// Read the stored snapshot back, in book order
pub fn load_tuitions(conn: &Connection) -> Result<Vec<Tuition>> {
    let mut stmt = conn.prepare(
        "SELECT position, name, phone, email, address, study_level, guardian_phone, relationship
         FROM students
         ORDER BY position",
    )?;
    let student_rows = stmt
        .query_map([], |row| {
            Ok(StudentRow {
                position: row.get(0)?,
                name: row.get(1)?,
                phone: row.get(2)?,
                email: row.get(3)?,
                address: row.get(4)?,
                study_level: row.get(5)?,
                guardian_phone: row.get(6)?,
                relationship: row.get(7)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    let mut stmt = conn.prepare(
        "SELECT student_position, session_date, duration_minutes, subject, fee
         FROM sessions
         ORDER BY student_position, seq",
    )?;
    let session_rows = stmt
        .query_map([], |row| {
            Ok(SessionRow {
                student_position: row.get(0)?,
                session_date: row.get(1)?,
                duration_minutes: row.get(2)?,
                subject: row.get(3)?,
                fee: row.get(4)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    let mut tuitions = Vec::with_capacity(student_rows.len());
    for row in student_rows {
        let student = student_from_row(&row)
            .with_context(|| format!("Invalid student record at position {}", row.position))?;

        let sessions = session_rows
            .iter()
            .filter(|s| s.student_position == row.position)
            .map(session_from_row)
            .collect::<Result<Vec<_>>>()
            .with_context(|| format!("Invalid session for {}", row.name))?;

        let tuition = Tuition::with_sessions(student, sessions)
            .with_context(|| format!("Invalid sessions for {}", row.name))?;
        tuitions.push(tuition);
    }

    debug!(count = tuitions.len(), "tuition book loaded");
    Ok(tuitions)
}

fn student_from_row(row: &StudentRow) -> Result<Student> {
    Ok(Student::new(
        Name::new(row.name.as_str())?,
        Phone::new(row.phone.as_str())?,
        Email::new(row.email.as_str())?,
        Address::new(row.address.as_str())?,
        StudyLevel::new(row.study_level.as_str())?,
        Phone::new(row.guardian_phone.as_str())?,
        Relationship::new(row.relationship.as_str())?,
    ))
}

fn session_from_row(row: &SessionRow) -> Result<Session> {
    Ok(Session::new(
        SessionDate::parse_iso(&row.session_date)?,
        Duration::from_minutes(row.duration_minutes)?,
        Subject::new(row.subject.as_str())?,
        Fee::new(&row.fee)?,
    ))
}

pub fn count_tuitions(conn: &Connection) -> Result<i64> {
    let count: i64 = conn.query_row("SELECT COUNT(*) FROM students", [], |row| row.get(0))?;

    Ok(count)
}

// ============================================================================
// JSON SNAPSHOTS
// ============================================================================

pub fn export_json(path: &Path, tuitions: &[Tuition]) -> Result<()> {
    let json = serde_json::to_string_pretty(tuitions)?;
    fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

/// Parse a JSON snapshot. Field values and per-student sessions are validated;
/// cross-record uniqueness is left to the store.
pub fn import_json(path: &Path) -> Result<Vec<Tuition>> {
    let json =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let tuitions: Vec<Tuition> =
        serde_json::from_str(&json).context("Failed to deserialize tuition snapshot")?;
    Ok(tuitions)
}

// ============================================================================
// TESTS
// ============================================================================
