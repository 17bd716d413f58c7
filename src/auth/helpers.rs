//! Form validation and the demo credential check.

use super::models::{
    AuthUser, Credentials, ProfileUpdate, Registration, DEMO_EMAIL, DEMO_PASSWORD,
};
use crate::error::{Result, StoreError};

pub const MIN_PASSWORD_LENGTH: usize = 8;

/// `local@domain.tld` with no whitespace and a single `@`.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.contains('@') => domain
            .char_indices()
            .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len()),
        _ => false,
    }
}

fn require(value: &str, label: &str) -> Result<()> {
    if value.trim().is_empty() {
        Err(StoreError::Validation(format!("{label} is required")))
    } else {
        Ok(())
    }
}

fn require_email_format(email: &str) -> Result<()> {
    if is_valid_email(email) {
        Ok(())
    } else {
        Err(StoreError::Validation(
            "Please enter a valid email address".to_string(),
        ))
    }
}

/// Checks a login form before it is sent anywhere.
pub fn validate_login(credentials: &Credentials) -> Result<()> {
    require(&credentials.email, "Email")?;
    require(&credentials.password, "Password")?;
    require_email_format(&credentials.email)
}

/// Checks a sign-up form: required fields, email format, password length
/// and matching confirmation.
pub fn validate_registration(form: &Registration) -> Result<()> {
    require(&form.first_name, "FirstName")?;
    require(&form.last_name, "LastName")?;
    require(&form.email, "Email")?;
    require(&form.password, "Password")?;
    require_email_format(&form.email)?;
    require_password_length(&form.password)?;
    require_confirmation(&form.password, &form.confirm_password)
}

fn require_password_length(password: &str) -> Result<()> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(StoreError::Validation(format!(
            "Password must be at least {MIN_PASSWORD_LENGTH} characters long"
        )));
    }
    Ok(())
}

fn require_confirmation(password: &str, confirmation: &str) -> Result<()> {
    if password != confirmation {
        return Err(StoreError::Validation("Passwords do not match".to_string()));
    }
    Ok(())
}

/// 10 or 11 ASCII digits.
pub fn is_valid_phone(phone: &str) -> bool {
    (10..=11).contains(&phone.len()) && phone.bytes().all(|b| b.is_ascii_digit())
}

/// Checks a profile edit. The phone number is optional; an empty one is
/// treated as absent.
pub fn validate_profile(form: &ProfileUpdate) -> Result<()> {
    require(&form.first_name, "FirstName")?;
    require(&form.last_name, "LastName")?;
    require(&form.email, "Email")?;
    require_email_format(&form.email)?;

    match form.phone.as_deref() {
        Some(phone) if !phone.is_empty() && !is_valid_phone(phone) => Err(
            StoreError::Validation("Please enter a valid phone number".to_string()),
        ),
        _ => Ok(()),
    }
}

/// Checks a password change. The confirmation is compared before the length.
pub fn validate_password_change(current: &str, new: &str, confirmation: &str) -> Result<()> {
    require(current, "Current password")?;
    require(new, "New password")?;
    require_confirmation(new, confirmation)?;
    require_password_length(new)
}

pub fn validate_password_reset_request(email: &str) -> Result<()> {
    require(email, "Email")?;
    require_email_format(email)
}

/// Same rules as [`validate_password_change`], with a reset token in place
/// of the current password.
pub fn validate_password_reset(token: &str, new: &str, confirmation: &str) -> Result<()> {
    require(token, "Reset token")?;
    require(new, "New password")?;
    require_confirmation(new, confirmation)?;
    require_password_length(new)
}

/// Exact match against the single demo account.
pub fn check_demo_credentials(credentials: &Credentials) -> Option<AuthUser> {
    (credentials.email == DEMO_EMAIL && credentials.password == DEMO_PASSWORD)
        .then(AuthUser::demo)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(result: Result<()>) -> String {
        match result {
            Err(StoreError::Validation(msg)) => msg,
            other => panic!("expected a validation error, got {other:?}"),
        }
    }

    #[test]
    fn email_format() {
        assert!(is_valid_email("user@example.com"));
        assert!(is_valid_email("a.b@c.d"));
        assert!(!is_valid_email("user@example"));
        assert!(!is_valid_email("user@.com"));
        assert!(!is_valid_email("user@example."));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("us er@example.com"));
        assert!(!is_valid_email("a@b@c.com"));
    }

    #[test]
    fn login_validation_order() {
        assert_eq!(message(validate_login(&Credentials::new(" ", "x"))), "Email is required");
        assert_eq!(
            message(validate_login(&Credentials::new("user@example.com", ""))),
            "Password is required"
        );
        assert_eq!(
            message(validate_login(&Credentials::new("nope", "x"))),
            "Please enter a valid email address"
        );
        assert!(validate_login(&Credentials::new("user@example.com", "x")).is_ok());
    }

    #[test]
    fn registration_rules() {
        let mut form = Registration {
            first_name: "An".into(),
            last_name: "Nguyễn".into(),
            email: "an@example.vn".into(),
            password: "short".into(),
            confirm_password: "short".into(),
        };
        assert_eq!(
            message(validate_registration(&form)),
            "Password must be at least 8 characters long"
        );

        form.password = "longenough".into();
        assert_eq!(message(validate_registration(&form)), "Passwords do not match");

        form.confirm_password = "longenough".into();
        assert!(validate_registration(&form).is_ok());

        form.first_name.clear();
        assert_eq!(message(validate_registration(&form)), "FirstName is required");
    }

    fn profile() -> ProfileUpdate {
        ProfileUpdate {
            first_name: "An".into(),
            last_name: "Nguyễn".into(),
            email: "an@example.vn".into(),
            phone: None,
        }
    }

    #[test]
    fn profile_rules() {
        assert!(validate_profile(&profile()).is_ok());

        let mut form = profile();
        form.last_name = "  ".into();
        assert_eq!(message(validate_profile(&form)), "LastName is required");

        let mut form = profile();
        form.email = "an@example".into();
        assert_eq!(message(validate_profile(&form)), "Please enter a valid email address");

        let mut form = profile();
        form.phone = Some("012345678".into());
        assert_eq!(message(validate_profile(&form)), "Please enter a valid phone number");
        form.phone = Some("0123456789".into());
        assert!(validate_profile(&form).is_ok());
        form.phone = Some("01234567890".into());
        assert!(validate_profile(&form).is_ok());
        form.phone = Some("012345678901".into());
        assert!(validate_profile(&form).is_err());
        form.phone = Some("0123-45678".into());
        assert!(validate_profile(&form).is_err());
        form.phone = Some(String::new());
        assert!(validate_profile(&form).is_ok());
    }

    #[test]
    fn password_change_rules() {
        assert_eq!(
            message(validate_password_change("", "longenough", "longenough")),
            "Current password is required"
        );
        assert_eq!(
            message(validate_password_change("old", " ", " ")),
            "New password is required"
        );
        // mismatch is reported before length
        assert_eq!(
            message(validate_password_change("old", "short", "other")),
            "Passwords do not match"
        );
        assert_eq!(
            message(validate_password_change("old", "short", "short")),
            "Password must be at least 8 characters long"
        );
        assert!(validate_password_change("old", "longenough", "longenough").is_ok());
    }

    #[test]
    fn password_reset_request_rules() {
        assert_eq!(message(validate_password_reset_request("")), "Email is required");
        assert_eq!(
            message(validate_password_reset_request("not-an-email")),
            "Please enter a valid email address"
        );
        assert!(validate_password_reset_request("user@example.com").is_ok());
    }

    #[test]
    fn password_reset_rules() {
        assert_eq!(
            message(validate_password_reset(" ", "longenough", "longenough")),
            "Reset token is required"
        );
        assert_eq!(
            message(validate_password_reset("tok", "", "")),
            "New password is required"
        );
        assert_eq!(
            message(validate_password_reset("tok", "longenough", "longenougH")),
            "Passwords do not match"
        );
        assert_eq!(
            message(validate_password_reset("tok", "1234567", "1234567")),
            "Password must be at least 8 characters long"
        );
        assert!(validate_password_reset("tok", "12345678", "12345678").is_ok());
    }

    #[test]
    fn demo_credentials_need_an_exact_match() {
        assert_eq!(
            check_demo_credentials(&Credentials::new(DEMO_EMAIL, DEMO_PASSWORD)),
            Some(AuthUser::demo())
        );
        assert_eq!(
            check_demo_credentials(&Credentials::new("USER@example.com", DEMO_PASSWORD)),
            None
        );
        assert_eq!(check_demo_credentials(&Credentials::new(DEMO_EMAIL, "wrong")), None);
    }
}
