// 🪪 Student Fields - self-validating value objects
//
// Each type wraps the raw string it was built from. Construction is the only
// place validation happens, so holding a value means it is valid.

use once_cell::sync::Lazy;
use regex::Regex;

use super::is_not_blank;

// ============================================================================
// PATTERNS
// ============================================================================

static NAME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9 ]*$").expect("valid name pattern"));

static PHONE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{3,}$").expect("valid phone pattern"));

/// local-part@domain
///
/// - local part: alphanumerics and `+_.-`, must start and end with an alphanumeric
/// - domain: dot-separated labels of alphanumerics and `-`, labels start and end
///   with an alphanumeric, the last label is at least two characters long
static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"^[A-Za-z0-9]([A-Za-z0-9+_.-]*[A-Za-z0-9])?",
        r"@([A-Za-z0-9]([A-Za-z0-9-]*[A-Za-z0-9])?\.)*",
        r"[A-Za-z0-9][A-Za-z0-9-]*[A-Za-z0-9]$",
    ))
    .expect("valid email pattern")
});

static RELATIONSHIP_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z][A-Za-z ]*$").expect("valid relationship pattern"));

fn is_valid_name(value: &str) -> bool {
    NAME_PATTERN.is_match(value)
}

fn is_valid_phone(value: &str) -> bool {
    PHONE_PATTERN.is_match(value)
}

fn is_valid_email(value: &str) -> bool {
    EMAIL_PATTERN.is_match(value)
}

fn is_valid_relationship(value: &str) -> bool {
    RELATIONSHIP_PATTERN.is_match(value)
}

// ============================================================================
// VALUE OBJECTS
// ============================================================================

string_value_object!(
    /// Student's full name. Identity of a student is decided by this value alone.
    Name,
    field = "name",
    constraints = "Names should only contain alphanumeric characters and spaces, and it should not be blank",
    valid = is_valid_name
);

string_value_object!(
    /// Contact number, used for both the student and the guardian
    Phone,
    field = "phone",
    constraints = "Phone numbers should only contain numbers, and it should be at least 3 digits long",
    valid = is_valid_phone
);

string_value_object!(
    Email,
    field = "email",
    constraints = "Emails should be of the format local-part@domain and adhere to the following constraints:\n\
        1. The local-part should only contain alphanumeric characters and these special characters, excluding \
        the parentheses, (+_.-). The local-part may not start or end with any special characters.\n\
        2. This is followed by a '@' and then a domain name. The domain name is made up of domain labels \
        separated by periods.\n\
        The domain name must:\n\
        - end with a domain label at least 2 characters long\n\
        - have each domain label start and end with alphanumeric characters\n\
        - have each domain label consist of alphanumeric characters, separated only by hyphens, if any.",
    valid = is_valid_email
);

string_value_object!(
    Address,
    field = "address",
    constraints = "Addresses can take any values, and it should not be blank",
    valid = is_not_blank
);

string_value_object!(
    /// Free-form level of study, e.g. "Sec 3" or "P6"
    StudyLevel,
    field = "study level",
    constraints = "Study level can take any values, and it should not be blank",
    valid = is_not_blank
);

string_value_object!(
    /// Guardian's relationship to the student, e.g. "Mother"
    Relationship,
    field = "relationship",
    constraints = "Relationship should only contain letters and spaces, and it should not be blank",
    valid = is_valid_relationship
);

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TuitionError;

    #[test]
    fn test_name_validation() {
        assert!(Name::is_valid("Alice Pauline"));
        assert!(Name::is_valid("12345"));
        assert!(Name::is_valid("Capital Tan 2nd"));

        assert!(!Name::is_valid(""));
        assert!(!Name::is_valid(" "));
        assert!(!Name::is_valid(" Alice"));
        assert!(!Name::is_valid("^"));
        assert!(!Name::is_valid("peter*"));
    }

    #[test]
    fn test_name_keeps_raw_value() {
        let name = Name::new("Alice Pauline").unwrap();
        assert_eq!(name.as_str(), "Alice Pauline");
        assert_eq!(name.to_string(), "Alice Pauline");
    }

    #[test]
    fn test_invalid_name_reports_constraints() {
        let err = Name::new("").unwrap_err();
        assert_eq!(
            err,
            TuitionError::Validation {
                field: "name",
                message: Name::MESSAGE_CONSTRAINTS.to_string(),
            }
        );
        assert_eq!(err.to_string(), Name::MESSAGE_CONSTRAINTS);
    }

    #[test]
    fn test_phone_validation() {
        assert!(Phone::is_valid("911"));
        assert!(Phone::is_valid("93121534"));
        assert!(Phone::is_valid("124293842033123"));

        assert!(!Phone::is_valid(""));
        assert!(!Phone::is_valid("91"));
        assert!(!Phone::is_valid("phone"));
        assert!(!Phone::is_valid("9011p041"));
        assert!(!Phone::is_valid("9312 1534"));
    }

    #[test]
    fn test_email_validation() {
        assert!(Email::is_valid("amy@gmail.com"));
        assert!(Email::is_valid("PeterJack_1190@example.com"));
        assert!(Email::is_valid("a1+be.d@example1.com"));
        assert!(Email::is_valid("peter_jack@very-very-very-long-example.com"));
        assert!(Email::is_valid("e1234567@u.nus.edu"));
        assert!(Email::is_valid("a@bc"));

        assert!(!Email::is_valid(""));
        assert!(!Email::is_valid("@example.com"));
        assert!(!Email::is_valid("peterjackexample.com"));
        assert!(!Email::is_valid("peterjack@"));
        assert!(!Email::is_valid("-peterjack@example.com"));
        assert!(!Email::is_valid("peterjack-@example.com"));
        assert!(!Email::is_valid("peterjack@example.c"));
        assert!(!Email::is_valid("peterjack@-example.com"));
        assert!(!Email::is_valid("peter jack@example.com"));
    }

    #[test]
    fn test_address_validation() {
        assert!(Address::is_valid("Blk 456, Den Road, #01-355"));
        assert!(Address::is_valid("-"));
        assert!(!Address::is_valid(""));
        assert!(!Address::is_valid(" "));
    }

    #[test]
    fn test_study_level_and_relationship() {
        assert!(StudyLevel::new("Sec 3").is_ok());
        assert!(StudyLevel::new("").is_err());

        assert!(Relationship::new("Mother").is_ok());
        assert!(Relationship::new("Grand Aunt").is_ok());
        assert!(Relationship::new("Mum2").is_err());
        assert!(Relationship::new("").is_err());
    }

    #[test]
    fn test_parse_and_serde_validate() {
        let phone: Phone = "98765432".parse().unwrap();
        assert_eq!(phone.as_str(), "98765432");
        assert!("98 76".parse::<Phone>().is_err());

        let json = serde_json::to_string(&phone).unwrap();
        assert_eq!(json, "\"98765432\"");
        let back: Phone = serde_json::from_str(&json).unwrap();
        assert_eq!(back, phone);

        assert!(serde_json::from_str::<Email>("\"not-an-email\"").is_err());
    }
}
