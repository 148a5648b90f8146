// 🌱 Sample data - a few students to seed an empty book

use crate::entities::{
    Address, Duration, Email, Fee, Name, Phone, Relationship, Session, SessionDate, Student,
    StudyLevel, Subject, Tuition,
};
use crate::error::Result;

struct SampleStudent {
    name: &'static str,
    phone: &'static str,
    email: &'static str,
    address: &'static str,
    study_level: &'static str,
    guardian_phone: &'static str,
    relationship: &'static str,
    /// (date, time, minutes, subject, fee)
    sessions: &'static [(&'static str, &'static str, u32, &'static str, &'static str)],
}

const SAMPLES: &[SampleStudent] = &[
    SampleStudent {
        name: "Alex Yeoh",
        phone: "87438807",
        email: "alexyeoh@example.com",
        address: "Blk 30 Geylang Street 29, #06-40",
        study_level: "Sec 3",
        guardian_phone: "91234567",
        relationship: "Mother",
        sessions: &[
            ("2024-03-04", "16:00", 90, "A Math", "60"),
            ("2024-03-11", "16:00", 90, "A Math", "60"),
        ],
    },
    SampleStudent {
        name: "Bernice Yu",
        phone: "99272758",
        email: "berniceyu@example.com",
        address: "Blk 30 Lorong 3 Serangoon Gardens, #07-18",
        study_level: "JC 2",
        guardian_phone: "98765432",
        relationship: "Father",
        sessions: &[("2024-03-05", "19:30", 120, "Chemistry", "85.50")],
    },
    SampleStudent {
        name: "Charlotte Oliveiro",
        phone: "93210283",
        email: "charlotte@example.com",
        address: "Blk 11 Ang Mo Kio Street 74, #11-04",
        study_level: "P5",
        guardian_phone: "93210000",
        relationship: "Mother",
        sessions: &[],
    },
    SampleStudent {
        name: "David Li",
        phone: "91031282",
        email: "lidavid@example.com",
        address: "Blk 436 Serangoon Gardens Street 26, #16-43",
        study_level: "Sec 1",
        guardian_phone: "91030000",
        relationship: "Grandmother",
        sessions: &[("2024-03-06", "10:00", 60, "English", "45")],
    },
];

/// Small, valid, duplicate-free book
pub fn sample_tuitions() -> Result<Vec<Tuition>> {
    SAMPLES.iter().map(build).collect()
}

fn build(sample: &SampleStudent) -> Result<Tuition> {
    let student = Student::new(
        Name::new(sample.name)?,
        Phone::new(sample.phone)?,
        Email::new(sample.email)?,
        Address::new(sample.address)?,
        StudyLevel::new(sample.study_level)?,
        Phone::new(sample.guardian_phone)?,
        Relationship::new(sample.relationship)?,
    );

    let sessions = sample
        .sessions
        .iter()
        .map(|&(date, time, minutes, subject, fee)| {
            Ok(Session::new(
                SessionDate::new(date, time)?,
                Duration::from_minutes(minutes)?,
                Subject::new(subject)?,
                Fee::new(fee)?,
            ))
        })
        .collect::<Result<Vec<_>>>()?;

    Tuition::with_sessions(student, sessions)
}
