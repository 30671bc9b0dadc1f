//! Input validation helpers
//!
//! Pure functions applied at the request boundary, before anything
//! reaches the gateway.

use crate::error::AuthError;

/// Maximum length for names, emails, and passwords
const MAX_FIELD_LENGTH: usize = 200;

/// Minimum password length
const MIN_PASSWORD_LENGTH: usize = 8;

/// Passwords rejected outright regardless of composition
const COMMON_PASSWORDS: &[&str] = &[
    "password",
    "123456",
    "123456789",
    "qwerty",
    "abc123",
    "password123",
    "admin",
    "letmein",
    "welcome",
    "monkey",
];

/// Normalize an email: trim, drop stray whitespace, lower-case
pub fn sanitize_email(email: &str) -> String {
    email
        .trim()
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_lowercase()
}

/// Validate a display name
pub fn validate_name(name: &str) -> Result<(), AuthError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(AuthError::Validation("Name cannot be empty".to_string()));
    }
    if trimmed.len() > MAX_FIELD_LENGTH {
        return Err(AuthError::Validation(format!(
            "Name exceeds maximum length of {} characters",
            MAX_FIELD_LENGTH
        )));
    }
    Ok(())
}

/// Validate email structure
pub fn validate_email(email: &str) -> Result<(), AuthError> {
    let invalid = || AuthError::Validation("Invalid email address".to_string());

    if email.is_empty() || email.len() > MAX_FIELD_LENGTH {
        return Err(invalid());
    }
    let Some((local, domain)) = email.split_once('@') else {
        return Err(invalid());
    };
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return Err(invalid());
    }
    let Some((host, tld)) = domain.rsplit_once('.') else {
        return Err(invalid());
    };
    if host.is_empty() || tld.is_empty() {
        return Err(invalid());
    }
    if email.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return Err(invalid());
    }
    Ok(())
}

/// Validate password strength, collecting every issue
pub fn validate_password(password: &str) -> Result<(), AuthError> {
    let mut issues = Vec::new();

    if password.len() < MIN_PASSWORD_LENGTH {
        issues.push(format!(
            "Password must be at least {} characters long",
            MIN_PASSWORD_LENGTH
        ));
    }
    if password.len() > MAX_FIELD_LENGTH {
        issues.push(format!(
            "Password exceeds maximum length of {} characters",
            MAX_FIELD_LENGTH
        ));
    }
    if !password.chars().any(|c| c.is_uppercase()) {
        issues.push("Password must contain at least one uppercase letter".to_string());
    }
    if !password.chars().any(|c| c.is_lowercase()) {
        issues.push("Password must contain at least one lowercase letter".to_string());
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        issues.push("Password must contain at least one number".to_string());
    }
    if !password.chars().any(|c| "!@#$%^&*()_+-=[]{}|;:,.<>?".contains(c)) {
        issues.push("Password must contain at least one special character".to_string());
    }
    if COMMON_PASSWORDS.contains(&password.to_lowercase().as_str()) {
        issues.push("Password is too common".to_string());
    }

    if issues.is_empty() {
        Ok(())
    } else {
        Err(AuthError::Validation(issues.join("; ")))
    }
}

/// Normalize a phone number to a standard format
///
/// Accepts 7 to 15 digits after stripping separators. Ten-digit and
/// eleven-digit North American numbers get a formatted rendering;
/// anything else is kept as its digit string.
pub fn normalize_phone(phone: &str) -> Result<String, AuthError> {
    let digits: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();

    if digits.len() < 7 || digits.len() > 15 {
        return Err(AuthError::Validation(
            "Invalid phone number".to_string(),
        ));
    }

    if digits.len() == 10 {
        Ok(format!(
            "({}) {}-{}",
            &digits[..3],
            &digits[3..6],
            &digits[6..]
        ))
    } else if digits.len() == 11 && digits.starts_with('1') {
        Ok(format!(
            "+1 ({}) {}-{}",
            &digits[1..4],
            &digits[4..7],
            &digits[7..]
        ))
    } else {
        Ok(digits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_email() {
        assert_eq!(sanitize_email("  Ann@X.Com "), "ann@x.com");
        assert_eq!(sanitize_email("a nn@x.com"), "ann@x.com");
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("ann@x.com").is_ok());
        assert!(validate_email("ann.b@mail.example.org").is_ok());
        assert!(validate_email("").is_err());
        assert!(validate_email("ann").is_err());
        assert!(validate_email("ann@").is_err());
        assert!(validate_email("@x.com").is_err());
        assert!(validate_email("ann@xcom").is_err());
        assert!(validate_email("ann@x.").is_err());
        assert!(validate_email("a nn@x.com").is_err());
    }

    #[test]
    fn test_validate_password() {
        assert!(validate_password("Str0ng!Pass").is_ok());
        assert!(validate_password("short").is_err());
        assert!(validate_password("alllowercase1!").is_err());
        assert!(validate_password("ALLUPPERCASE1!").is_err());
        assert!(validate_password("NoDigits!!").is_err());
        assert!(validate_password("NoSpecial123").is_err());
        assert!(validate_password("Password123").is_err());
    }

    #[test]
    fn test_common_password_rejected() {
        let result = validate_password("letmein");
        let Err(AuthError::Validation(msg)) = result else {
            panic!("expected validation error");
        };
        assert!(msg.contains("too common"));
    }

    #[test]
    fn test_normalize_phone() {
        assert_eq!(normalize_phone("5551234567").unwrap(), "(555) 123-4567");
        assert_eq!(normalize_phone("(555) 123-4567").unwrap(), "(555) 123-4567");
        assert_eq!(
            normalize_phone("1-555-123-4567").unwrap(),
            "+1 (555) 123-4567"
        );
        assert_eq!(normalize_phone("123 4567").unwrap(), "1234567");
        assert!(normalize_phone("123").is_err());
        assert!(normalize_phone("1234567890123456").is_err());
        assert!(normalize_phone("no digits here").is_err());
    }
}
