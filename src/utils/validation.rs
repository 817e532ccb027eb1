//! Input validation utilities

use std::sync::LazyLock;

use regex::Regex;

use crate::constants;

static SLUG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").expect("valid slug regex"));

/// Validate username format
pub fn validate_username(username: &str) -> Result<(), &'static str> {
    if username.len() < 3 {
        return Err("Username must be at least 3 characters");
    }
    if username.len() > 32 {
        return Err("Username must be at most 32 characters");
    }
    if !username
        .chars()
        .all(|c| c.is_alphanumeric() || c == '_' || c == '-')
    {
        return Err("Username can only contain letters, numbers, underscores, and hyphens");
    }
    if !username.chars().next().map(|c| c.is_alphabetic()).unwrap_or(false) {
        return Err("Username must start with a letter");
    }
    Ok(())
}

/// Validate email format (basic validation)
pub fn validate_email(email: &str) -> Result<(), &'static str> {
    if !email.contains('@') {
        return Err("Invalid email format");
    }
    let parts: Vec<&str> = email.split('@').collect();
    if parts.len() != 2 {
        return Err("Invalid email format");
    }
    if parts[0].is_empty() || parts[1].is_empty() {
        return Err("Invalid email format");
    }
    if !parts[1].contains('.') {
        return Err("Invalid email domain");
    }
    Ok(())
}

/// Validate password strength
pub fn validate_password(password: &str) -> Result<(), &'static str> {
    if password.len() < 8 {
        return Err("Password must be at least 8 characters");
    }
    if password.len() > 128 {
        return Err("Password must be at most 128 characters");
    }
    if !password.chars().any(|c| c.is_lowercase()) {
        return Err("Password must contain at least one lowercase letter");
    }
    if !password.chars().any(|c| c.is_uppercase()) {
        return Err("Password must contain at least one uppercase letter");
    }
    if !password.chars().any(|c| c.is_numeric()) {
        return Err("Password must contain at least one number");
    }
    Ok(())
}

/// Validate a course slug (lowercase, digits, single hyphens)
pub fn validate_slug(slug: &str) -> Result<(), &'static str> {
    if slug.is_empty() {
        return Err("Slug cannot be empty");
    }
    if slug.len() > 64 {
        return Err("Slug must be at most 64 characters");
    }
    if !SLUG_RE.is_match(slug) {
        return Err("Slug can only contain lowercase letters, numbers, and single hyphens");
    }
    Ok(())
}

/// Validate programming language
pub fn validate_language(language: &str) -> Result<(), &'static str> {
    if constants::languages::ALL.contains(&language) {
        Ok(())
    } else {
        Err("Unsupported programming language")
    }
}

/// Validate course/problem-set difficulty
pub fn validate_difficulty(difficulty: &str) -> Result<(), &'static str> {
    if constants::difficulties::ALL.contains(&difficulty) {
        Ok(())
    } else {
        Err("Invalid difficulty level")
    }
}

/// Validate user role
pub fn validate_role(role: &str) -> Result<(), &'static str> {
    if constants::roles::ALL.contains(&role) {
        Ok(())
    } else {
        Err("Invalid role")
    }
}

/// Validate contest visibility
pub fn validate_visibility(visibility: &str) -> Result<(), &'static str> {
    if constants::visibility::ALL.contains(&visibility) {
        Ok(())
    } else {
        Err("Invalid visibility setting")
    }
}

/// Validate contest registration mode
pub fn validate_registration_mode(mode: &str) -> Result<(), &'static str> {
    if constants::registration_modes::ALL.contains(&mode) {
        Ok(())
    } else {
        Err("Invalid registration mode")
    }
}

/// Validate enrollment status
pub fn validate_enrollment_status(status: &str) -> Result<(), &'static str> {
    if constants::enrollment_statuses::ALL.contains(&status) {
        Ok(())
    } else {
        Err("Invalid enrollment status")
    }
}

/// Validate tag list (count and per-tag length)
pub fn validate_tags(tags: &[String]) -> Result<(), &'static str> {
    if tags.len() > constants::MAX_TAGS {
        return Err("Too many tags");
    }
    for tag in tags {
        if tag.is_empty() {
            return Err("Tags cannot be empty");
        }
        if tag.len() > constants::MAX_TAG_LENGTH {
            return Err("Tag is too long");
        }
    }
    Ok(())
}

/// Validate source code size
pub fn validate_source_code(code: &str) -> Result<(), &'static str> {
    if code.is_empty() {
        return Err("Source code cannot be empty");
    }
    if code.len() > constants::MAX_SOURCE_CODE_SIZE {
        return Err("Source code exceeds maximum size");
    }
    Ok(())
}

/// Sanitize string input (remove control characters, trim whitespace)
pub fn sanitize_string(input: &str) -> String {
    input
        .chars()
        .filter(|c| !c.is_control() || *c == '\n' || *c == '\t')
        .collect::<String>()
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_username() {
        assert!(validate_username("alice").is_ok());
        assert!(validate_username("Alice_123").is_ok());
        assert!(validate_username("ab").is_err()); // Too short
        assert!(validate_username("123abc").is_err()); // Starts with number
        assert!(validate_username("user@name").is_err()); // Invalid character
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("user@example.com").is_ok());
        assert!(validate_email("invalid").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("user@").is_err());
    }

    #[test]
    fn test_validate_password() {
        assert!(validate_password("Password123").is_ok());
        assert!(validate_password("short").is_err());
        assert!(validate_password("nouppercase123").is_err());
        assert!(validate_password("NOLOWERCASE123").is_err());
        assert!(validate_password("NoNumbers").is_err());
    }

    #[test]
    fn test_validate_slug() {
        assert!(validate_slug("rust-fundamentals").is_ok());
        assert!(validate_slug("intro-2-algorithms").is_ok());
        assert!(validate_slug("").is_err());
        assert!(validate_slug("Has-Caps").is_err());
        assert!(validate_slug("double--hyphen").is_err());
        assert!(validate_slug("-leading").is_err());
        assert!(validate_slug("trailing-").is_err());
    }

    #[test]
    fn test_validate_difficulty() {
        assert!(validate_difficulty("beginner").is_ok());
        assert!(validate_difficulty("expert").is_ok());
        assert!(validate_difficulty("impossible").is_err());
    }

    #[test]
    fn test_validate_language() {
        assert!(validate_language("python").is_ok());
        assert!(validate_language("cpp").is_err());
    }

    #[test]
    fn test_validate_tags() {
        assert!(validate_tags(&["rust".to_string(), "basics".to_string()]).is_ok());
        assert!(validate_tags(&["".to_string()]).is_err());

        let too_many: Vec<String> = (0..20).map(|i| format!("tag{}", i)).collect();
        assert!(validate_tags(&too_many).is_err());
    }

    #[test]
    fn test_sanitize_string() {
        assert_eq!(sanitize_string("  hello\u{0000} world  "), "hello world");
        assert_eq!(sanitize_string("line\nbreak"), "line\nbreak");
    }
}
