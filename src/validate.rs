use lazy_static::lazy_static;
use regex::Regex;

use crate::error::{ApiError, FieldError};

/// Registration passwords must be at least this long.
pub const MIN_PASSWORD_LEN: usize = 6;

pub fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

/// Collects field-level failures and turns them into the structured 400
/// payload once every check has run, so a bad request reports all of its
/// problems in one response.
#[derive(Debug, Default)]
pub struct Validator {
    errors: Vec<FieldError>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn require(&mut self, value: &str, param: &'static str, msg: &'static str) -> &mut Self {
        if value.trim().is_empty() {
            self.errors.push(FieldError { msg, param });
        }
        self
    }

    pub fn require_email(&mut self, value: &str, param: &'static str) -> &mut Self {
        if !is_valid_email(value.trim()) {
            self.errors.push(FieldError {
                msg: "Please include a valid email",
                param,
            });
        }
        self
    }

    pub fn require_present<T>(
        &mut self,
        value: &Option<T>,
        param: &'static str,
        msg: &'static str,
    ) -> &mut Self {
        if value.is_none() {
            self.errors.push(FieldError { msg, param });
        }
        self
    }

    pub fn require_min_len(
        &mut self,
        value: &str,
        min: usize,
        param: &'static str,
        msg: &'static str,
    ) -> &mut Self {
        if value.len() < min {
            self.errors.push(FieldError { msg, param });
        }
        self
    }

    pub fn finish(&mut self) -> Result<(), ApiError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ApiError::Validation(std::mem::take(&mut self.errors)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_addresses() {
        assert!(is_valid_email("matt@example.com"));
        assert!(is_valid_email("a.b+c@sub.domain.org"));
    }

    #[test]
    fn rejects_malformed_addresses() {
        assert!(!is_valid_email("matt"));
        assert!(!is_valid_email("matt@"));
        assert!(!is_valid_email("matt@example"));
        assert!(!is_valid_email("ma tt@example.com"));
    }

    #[test]
    fn collects_every_failure() {
        let mut v = Validator::new();
        v.require("", "name", "Name is required")
            .require_email("nope", "email")
            .require_min_len("abc", MIN_PASSWORD_LEN, "password", "too short");
        let err = v.finish().unwrap_err();
        match err {
            ApiError::Validation(errors) => {
                assert_eq!(errors.len(), 3);
                assert_eq!(errors[0].param, "name");
                assert_eq!(errors[1].param, "email");
                assert_eq!(errors[2].param, "password");
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn require_present_flags_missing_values() {
        let mut v = Validator::new();
        v.require_present(&None::<i64>, "from", "From date is required");
        let err = v.finish().unwrap_err();
        match err {
            ApiError::Validation(errors) => {
                assert_eq!(errors.len(), 1);
                assert_eq!(errors[0].param, "from");
                assert_eq!(errors[0].msg, "From date is required");
            }
            other => panic!("expected validation error, got {other:?}"),
        }

        let mut v = Validator::new();
        v.require_present(&Some(1), "from", "From date is required");
        assert!(v.finish().is_ok());
    }

    #[test]
    fn finish_is_ok_when_clean() {
        let mut v = Validator::new();
        v.require("Matt", "name", "Name is required")
            .require_email("matt@example.com", "email");
        assert!(v.finish().is_ok());
    }
}
