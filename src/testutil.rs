// Test fixtures: a Tuition builder with sensible defaults and a few typical records

use crate::entities::{
    Address, Duration, Email, Fee, Name, Phone, Relationship, Session, SessionDate, Student,
    StudyLevel, Subject, Tuition,
};

pub const ALICE_NAME: &str = "Alice Pauline";
pub const BOB_NAME: &str = "Bob Choo";
pub const CARL_NAME: &str = "Carl Kurz";

#[derive(Debug, Clone)]
pub struct TuitionBuilder {
    name: String,
    phone: String,
    email: String,
    address: String,
    study_level: String,
    guardian_phone: String,
    relationship: String,
    sessions: Vec<Session>,
}

impl TuitionBuilder {
    pub fn new() -> Self {
        TuitionBuilder {
            name: "Amy Bee".to_string(),
            phone: "85355255".to_string(),
            email: "amy@gmail.com".to_string(),
            address: "123, Jurong West Ave 6, #08-111".to_string(),
            study_level: "Sec 5".to_string(),
            guardian_phone: "33333333".to_string(),
            relationship: "Mother".to_string(),
            sessions: Vec::new(),
        }
    }

    pub fn from_tuition(tuition: &Tuition) -> Self {
        let student = tuition.student();
        TuitionBuilder {
            name: student.name().to_string(),
            phone: student.phone().to_string(),
            email: student.email().to_string(),
            address: student.address().to_string(),
            study_level: student.study_level().to_string(),
            guardian_phone: student.guardian_phone().to_string(),
            relationship: student.relationship().to_string(),
            sessions: tuition.sessions().to_vec(),
        }
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    pub fn with_phone(mut self, phone: &str) -> Self {
        self.phone = phone.to_string();
        self
    }

    pub fn with_email(mut self, email: &str) -> Self {
        self.email = email.to_string();
        self
    }

    pub fn with_address(mut self, address: &str) -> Self {
        self.address = address.to_string();
        self
    }

    pub fn with_study_level(mut self, study_level: &str) -> Self {
        self.study_level = study_level.to_string();
        self
    }

    pub fn with_guardian_phone(mut self, guardian_phone: &str) -> Self {
        self.guardian_phone = guardian_phone.to_string();
        self
    }

    pub fn with_relationship(mut self, relationship: &str) -> Self {
        self.relationship = relationship.to_string();
        self
    }

    pub fn with_session(mut self, date: &str, time: &str, subject: &str) -> Self {
        self.sessions.push(session(date, time, subject));
        self
    }

    pub fn build(self) -> Tuition {
        let student = Student::new(
            Name::new(self.name).unwrap(),
            Phone::new(self.phone).unwrap(),
            Email::new(self.email).unwrap(),
            Address::new(self.address).unwrap(),
            StudyLevel::new(self.study_level).unwrap(),
            Phone::new(self.guardian_phone).unwrap(),
            Relationship::new(self.relationship).unwrap(),
        );
        Tuition::with_sessions(student, self.sessions).unwrap()
    }
}

pub fn session(date: &str, time: &str, subject: &str) -> Session {
    Session::new(
        SessionDate::new(date, time).unwrap(),
        Duration::from_minutes(60).unwrap(),
        Subject::new(subject).unwrap(),
        Fee::new("50").unwrap(),
    )
}

pub fn alice() -> Tuition {
    TuitionBuilder::new()
        .with_name(ALICE_NAME)
        .with_phone("94351253")
        .with_email("alice@example.com")
        .with_address("123, Jurong West Ave 6, #08-111")
        .with_study_level("Sec 2")
        .with_guardian_phone("98765432")
        .with_relationship("Mother")
        .build()
}

pub fn bob() -> Tuition {
    TuitionBuilder::new()
        .with_name(BOB_NAME)
        .with_phone("87487765")
        .with_email("bob@example.com")
        .with_address("Block 123, Bobby Street 3")
        .with_study_level("JC 1")
        .with_guardian_phone("91234567")
        .with_relationship("Father")
        .build()
}

pub fn carl() -> Tuition {
    TuitionBuilder::new()
        .with_name(CARL_NAME)
        .with_phone("95352563")
        .with_email("heinz@example.com")
        .with_address("wall street")
        .with_study_level("P6")
        .with_guardian_phone("95352000")
        .with_relationship("Guardian")
        .build()
}

pub fn typical_tuitions() -> Vec<Tuition> {
    vec![alice(), bob(), carl()]
}
