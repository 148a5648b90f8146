// 🎓 Student Entity - who is being taught
//
// "Same student" means same name (exact, case-sensitive). Full equality
// compares all seven fields. Edits never mutate: a StudentDescriptor is layered
// over an existing Student to produce a new one.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::fields::{Address, Email, Name, Phone, Relationship, StudyLevel};

// ============================================================================
// STUDENT
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Student {
    name: Name,
    phone: Phone,
    email: Email,
    address: Address,
    study_level: StudyLevel,
    guardian_phone: Phone,
    relationship: Relationship,
}

impl Student {
    pub fn new(
        name: Name,
        phone: Phone,
        email: Email,
        address: Address,
        study_level: StudyLevel,
        guardian_phone: Phone,
        relationship: Relationship,
    ) -> Self {
        Student {
            name,
            phone,
            email,
            address,
            study_level,
            guardian_phone,
            relationship,
        }
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    pub fn phone(&self) -> &Phone {
        &self.phone
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn address(&self) -> &Address {
        &self.address
    }

    pub fn study_level(&self) -> &StudyLevel {
        &self.study_level
    }

    pub fn guardian_phone(&self) -> &Phone {
        &self.guardian_phone
    }

    pub fn relationship(&self) -> &Relationship {
        &self.relationship
    }

    /// Weak identity used for duplicate detection: names match exactly
    pub fn is_same_student(&self, other: &Student) -> bool {
        std::ptr::eq(self, other) || self.name.as_str() == other.name.as_str()
    }
}

impl fmt::Display for Student {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}; Phone: {}; Email: {}; Address: {}; Study Level: {}; Guardian Phone: {}; Relationship: {}",
            self.name,
            self.phone,
            self.email,
            self.address,
            self.study_level,
            self.guardian_phone,
            self.relationship
        )
    }
}

// ============================================================================
// STUDENT DESCRIPTOR (partial edit)
// ============================================================================

/// The fields an edit wants to change. `None` keeps the original value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentDescriptor {
    pub name: Option<Name>,
    pub phone: Option<Phone>,
    pub email: Option<Email>,
    pub address: Option<Address>,
    pub study_level: Option<StudyLevel>,
    pub guardian_phone: Option<Phone>,
    pub relationship: Option<Relationship>,
}

impl StudentDescriptor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Descriptor that would overwrite every field with `student`'s values
    pub fn from_student(student: &Student) -> Self {
        StudentDescriptor {
            name: Some(student.name.clone()),
            phone: Some(student.phone.clone()),
            email: Some(student.email.clone()),
            address: Some(student.address.clone()),
            study_level: Some(student.study_level.clone()),
            guardian_phone: Some(student.guardian_phone.clone()),
            relationship: Some(student.relationship.clone()),
        }
    }

    pub fn with_name(mut self, name: Name) -> Self {
        self.name = Some(name);
        self
    }

    pub fn with_phone(mut self, phone: Phone) -> Self {
        self.phone = Some(phone);
        self
    }

    pub fn with_email(mut self, email: Email) -> Self {
        self.email = Some(email);
        self
    }

    pub fn with_address(mut self, address: Address) -> Self {
        self.address = Some(address);
        self
    }

    pub fn with_study_level(mut self, study_level: StudyLevel) -> Self {
        self.study_level = Some(study_level);
        self
    }

    pub fn with_guardian_phone(mut self, guardian_phone: Phone) -> Self {
        self.guardian_phone = Some(guardian_phone);
        self
    }

    pub fn with_relationship(mut self, relationship: Relationship) -> Self {
        self.relationship = Some(relationship);
        self
    }

    pub fn is_any_field_edited(&self) -> bool {
        self.name.is_some()
            || self.phone.is_some()
            || self.email.is_some()
            || self.address.is_some()
            || self.study_level.is_some()
            || self.guardian_phone.is_some()
            || self.relationship.is_some()
    }

    /// New Student with the set fields replaced and the rest copied from `original`
    pub fn apply(&self, original: &Student) -> Student {
        Student {
            name: self.name.clone().unwrap_or_else(|| original.name.clone()),
            phone: self.phone.clone().unwrap_or_else(|| original.phone.clone()),
            email: self.email.clone().unwrap_or_else(|| original.email.clone()),
            address: self.address.clone().unwrap_or_else(|| original.address.clone()),
            study_level: self
                .study_level
                .clone()
                .unwrap_or_else(|| original.study_level.clone()),
            guardian_phone: self
                .guardian_phone
                .clone()
                .unwrap_or_else(|| original.guardian_phone.clone()),
            relationship: self
                .relationship
                .clone()
                .unwrap_or_else(|| original.relationship.clone()),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
