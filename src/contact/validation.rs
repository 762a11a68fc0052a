//! Contact form validation

use super::input::FormInput;
use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

/// `local@domain.tld` with no whitespace and a single `@`
static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex")
});

/// Reasons a submission attempt is rejected before anything is sent.
/// The display text is what the visitor sees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Vennligst fyll ut alle påkrevde felt.")]
    MissingRequiredFields,
    #[error("Vennligst oppgi en gyldig e-postadresse.")]
    InvalidEmail,
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

/// Required fields first, then email syntax
pub fn validate(input: &FormInput) -> Result<(), ValidationError> {
    let required = [&input.name, &input.email, &input.phone, &input.description];
    if required.iter().any(|value| value.trim().is_empty()) {
        return Err(ValidationError::MissingRequiredFields);
    }
    if !is_valid_email(&input.email) {
        return Err(ValidationError::InvalidEmail);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_input() -> FormInput {
        FormInput {
            name: "Ola".to_string(),
            email: "ola@example.com".to_string(),
            phone: "12345678".to_string(),
            location: String::new(),
            project_type: "takreparasjon".to_string(),
            description: "Lekkasje i tak".to_string(),
            want_site_visit: false,
        }
    }

    mod email {
        use super::*;

        #[test]
        fn test_accepts_plain_address() {
            assert!(is_valid_email("ola@example.com"));
            assert!(is_valid_email("post@danivanov-tak.no"));
            assert!(is_valid_email("a.b+c@sub.domain.co.uk"));
        }

        #[test]
        fn test_rejects_missing_at() {
            assert!(!is_valid_email("not-an-email"));
        }

        #[test]
        fn test_rejects_missing_dot_in_domain() {
            assert!(!is_valid_email("a@b"));
            assert!(!is_valid_email("foo@bar"));
        }

        #[test]
        fn test_rejects_whitespace() {
            assert!(!is_valid_email("a@b.com "));
            assert!(!is_valid_email(" a@b.com"));
            assert!(!is_valid_email("ola nordmann@example.com"));
        }

        #[test]
        fn test_rejects_double_at() {
            assert!(!is_valid_email("a@@b.com"));
            assert!(!is_valid_email("a@b@c.com"));
        }

        #[test]
        fn test_rejects_empty_parts() {
            assert!(!is_valid_email("@b.com"));
            assert!(!is_valid_email("a@.com"));
            assert!(!is_valid_email("a@b."));
            assert!(!is_valid_email(""));
        }

        #[test]
        fn test_is_pure() {
            for email in ["ola@example.com", "a@b", ""] {
                assert_eq!(is_valid_email(email), is_valid_email(email));
            }
        }
    }

    mod required_fields {
        use super::*;

        #[test]
        fn test_valid_input_passes() {
            assert_eq!(validate(&valid_input()), Ok(()));
        }

        #[test]
        fn test_each_required_field_is_checked() {
            let clear: [fn(&mut FormInput); 4] = [
                |i| i.name.clear(),
                |i| i.email.clear(),
                |i| i.phone.clear(),
                |i| i.description.clear(),
            ];
            for clear_field in clear {
                let mut input = valid_input();
                clear_field(&mut input);
                assert_eq!(validate(&input), Err(ValidationError::MissingRequiredFields));
            }
        }

        #[test]
        fn test_whitespace_only_counts_as_empty() {
            let input = FormInput {
                name: "   ".to_string(),
                ..valid_input()
            };
            assert_eq!(validate(&input), Err(ValidationError::MissingRequiredFields));
        }

        #[test]
        fn test_optional_fields_may_be_empty() {
            let input = FormInput {
                location: String::new(),
                want_site_visit: false,
                ..valid_input()
            };
            assert!(validate(&input).is_ok());
        }

        #[test]
        fn test_required_check_runs_before_email_check() {
            let input = FormInput {
                email: "not-an-email".to_string(),
                phone: String::new(),
                ..valid_input()
            };
            assert_eq!(validate(&input), Err(ValidationError::MissingRequiredFields));
        }

        #[test]
        fn test_malformed_email_message() {
            let input = FormInput {
                email: "foo@bar".to_string(),
                ..valid_input()
            };
            let err = validate(&input).unwrap_err();
            assert_eq!(err, ValidationError::InvalidEmail);
            assert_eq!(err.to_string(), "Vennligst oppgi en gyldig e-postadresse.");
        }

        #[test]
        fn test_missing_fields_message() {
            assert_eq!(
                ValidationError::MissingRequiredFields.to_string(),
                "Vennligst fyll ut alle påkrevde felt."
            );
        }
    }
}
