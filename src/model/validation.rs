//! Validation helpers for request DTOs.

use validator::ValidationError;

/// Rejects strings that are empty or whitespace only.
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("Value must not be blank".into());
        return Err(err);
    }

    Ok(())
}

/// Usernames are 3 to 32 characters of `[A-Za-z0-9_.-]`.
pub fn validate_username(value: &str) -> Result<(), ValidationError> {
    let len = value.chars().count();
    if !(3..=32).contains(&len) {
        let mut err = ValidationError::new("username_length");
        err.message = Some(format!("Username must be 3 to 32 characters (got {})", len).into());
        return Err(err);
    }

    if !value
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
    {
        let mut err = ValidationError::new("username_format");
        err.message =
            Some("Username may only contain letters, digits, '_', '.' and '-'".into());
        return Err(err);
    }

    Ok(())
}

/// Version strings are 1 to 50 characters of `[0-9A-Za-z.+-]` not starting with `.`.
///
/// Used as a path segment of the stored binary.
pub fn validate_version(value: &str) -> Result<(), ValidationError> {
    let len = value.chars().count();
    if !(1..=50).contains(&len) {
        let mut err = ValidationError::new("version_length");
        err.message = Some(format!("Version must be 1 to 50 characters (got {})", len).into());
        return Err(err);
    }

    if !value
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '+' | '-'))
    {
        let mut err = ValidationError::new("version_format");
        err.message = Some("Version may only contain letters, digits, '.', '+' and '-'".into());
        return Err(err);
    }

    if value.starts_with('.') {
        let mut err = ValidationError::new("version_format");
        err.message = Some("Version must not start with '.'".into());
        return Err(err);
    }

    Ok(())
}

/// File names are a single path segment.
pub fn validate_file_name(value: &str) -> Result<(), ValidationError> {
    if value.is_empty()
        || value.len() > 255
        || value == "."
        || value == ".."
        || value.contains(['/', '\\', '\0'])
    {
        let mut err = ValidationError::new("file_name");
        err.message = Some("File name must be a single path segment".into());
        return Err(err);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_blank_values() {
        assert!(validate_not_blank("").is_err());
        assert!(validate_not_blank("   \n").is_err());
        assert!(validate_not_blank(" a ").is_ok());
    }

    #[test]
    fn validates_usernames() {
        assert!(validate_username("forge_master.01").is_ok());
        assert!(validate_username("ab").is_err());
        assert!(validate_username(&"a".repeat(33)).is_err());
        assert!(validate_username("has space").is_err());
        assert!(validate_username("émile").is_err());
    }

    #[test]
    fn validates_versions() {
        assert!(validate_version("1.2.3").is_ok());
        assert!(validate_version("2.0.0-beta+7").is_ok());
        assert!(validate_version("").is_err());
        assert!(validate_version("1.0 final").is_err());
        assert!(validate_version(&"1".repeat(51)).is_err());
        assert!(validate_version(".").is_err());
        assert!(validate_version("..").is_err());
        assert!(validate_version(".1").is_err());
    }

    #[test]
    fn validates_file_names() {
        assert!(validate_file_name("game.zip").is_ok());
        assert!(validate_file_name("../game.zip").is_err());
        assert!(validate_file_name("dir/game.zip").is_err());
        assert!(validate_file_name("dir\\game.zip").is_err());
        assert!(validate_file_name("..").is_err());
        assert!(validate_file_name("").is_err());
    }
}
