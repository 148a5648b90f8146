// Entity Models
//
// Value objects validate on construction and never change afterwards.
// Aggregates compare two ways:
// - is_same_*: weak identity, used for duplicate detection
// - ==: full field equality, used for exact-match lookup and removal

/// Declares a validated, string-backed value object.
///
/// The generated type accepts its raw form only through `new` / `FromStr` /
/// `TryFrom<String>` (which serde also goes through), so an instance in hand
/// always satisfies `is_valid`.
macro_rules! string_value_object {
    ($(#[$meta:meta])* $name:ident, field = $field:literal, constraints = $constraints:expr, valid = $is_valid:path) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            pub const MESSAGE_CONSTRAINTS: &'static str = $constraints;

            pub fn new(value: impl Into<String>) -> $crate::error::Result<Self> {
                let value = value.into();
                if Self::is_valid(&value) {
                    Ok($name(value))
                } else {
                    Err($crate::error::TuitionError::validation(
                        $field,
                        Self::MESSAGE_CONSTRAINTS,
                    ))
                }
            }

            pub fn is_valid(value: &str) -> bool {
                $is_valid(value)
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::error::TuitionError;

            fn from_str(s: &str) -> $crate::error::Result<Self> {
                Self::new(s)
            }
        }

        impl TryFrom<String> for $name {
            type Error = $crate::error::TuitionError;

            fn try_from(value: String) -> $crate::error::Result<Self> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> String {
                value.0
            }
        }
    };
}

pub mod fields;
pub mod session;
pub mod student;
pub mod tuition;

pub use fields::{Address, Email, Name, Phone, Relationship, StudyLevel};
pub use session::{Duration, Fee, Session, SessionDate, Subject};
pub use student::{Student, StudentDescriptor};
pub use tuition::Tuition;

/// First character present and not whitespace
pub(crate) fn is_not_blank(value: &str) -> bool {
    value.chars().next().is_some_and(|c| !c.is_whitespace())
}
