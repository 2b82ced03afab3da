//! Identifier validation
//!
//! Table and column names are interpolated into SQL text unquoted, so every
//! identifier a schema declares goes through this allow-list once, when the
//! schema is defined. PostgreSQL folds unquoted identifiers to lowercase, so
//! only lowercase names come back from the store under the name they were
//! declared with.

use std::fmt;

/// PostgreSQL identifier length limit
const MAX_IDENTIFIER_LENGTH: usize = 63;

/// Validation errors for database identifiers
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Name contains invalid characters (only alphanumeric and underscore allowed)
    InvalidCharacters(String),
    /// Name is too long (PostgreSQL limit is 63 characters)
    TooLong {
        name: String,
        length: usize,
        max_length: usize,
    },
    /// Name is empty
    Empty,
    /// Name starts with invalid character (must start with letter or underscore)
    InvalidStartCharacter(String),
    /// Name contains uppercase letters, which PostgreSQL folds unquoted
    Uppercase(String),
    /// Name is a reserved SQL keyword
    ReservedKeyword(String),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::InvalidCharacters(name) => {
                write!(f, "Invalid characters in name '{}': only alphanumeric characters and underscores are allowed", name)
            }
            ValidationError::TooLong {
                name,
                length,
                max_length,
            } => {
                write!(
                    f,
                    "Name '{}' is too long: {} characters (max {})",
                    name, length, max_length
                )
            }
            ValidationError::Empty => {
                write!(f, "Name cannot be empty")
            }
            ValidationError::InvalidStartCharacter(name) => {
                write!(f, "Name '{}' must start with a letter or underscore", name)
            }
            ValidationError::Uppercase(name) => {
                write!(
                    f,
                    "Name '{}' must be lowercase; did you mean '{}'?",
                    name,
                    name.to_ascii_lowercase()
                )
            }
            ValidationError::ReservedKeyword(name) => {
                write!(f, "Name '{}' is a reserved SQL keyword", name)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// A validated table name that is safe to interpolate into SQL text
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ValidatedTableName(String);

impl ValidatedTableName {
    pub fn new(name: &str) -> Result<Self, ValidationError> {
        validate_identifier(name)?;
        Ok(Self(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for ValidatedTableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A validated column name that is safe to interpolate into SQL text
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ValidatedFieldName(String);

impl ValidatedFieldName {
    pub fn new(name: &str) -> Result<Self, ValidationError> {
        validate_identifier(name)?;
        Ok(Self(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for ValidatedFieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn validate_identifier(name: &str) -> Result<(), ValidationError> {
    let first_char = name.chars().next().ok_or(ValidationError::Empty)?;

    if name.len() > MAX_IDENTIFIER_LENGTH {
        return Err(ValidationError::TooLong {
            name: name.to_string(),
            length: name.len(),
            max_length: MAX_IDENTIFIER_LENGTH,
        });
    }

    if !first_char.is_ascii_alphabetic() && first_char != '_' {
        return Err(ValidationError::InvalidStartCharacter(name.to_string()));
    }

    if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(ValidationError::InvalidCharacters(name.to_string()));
    }

    if name.chars().any(|c| c.is_ascii_uppercase()) {
        return Err(ValidationError::Uppercase(name.to_string()));
    }

    if is_reserved_keyword(name) {
        return Err(ValidationError::ReservedKeyword(name.to_string()));
    }

    Ok(())
}

/// Keywords that cannot appear unquoted where the generated SQL expects an
/// identifier. The CURRENT_* family parses as a function call, not a column.
fn is_reserved_keyword(name: &str) -> bool {
    const RESERVED_KEYWORDS: &[&str] = &[
        "ALL",
        "AND",
        "AS",
        "ASC",
        "BETWEEN",
        "BY",
        "CASE",
        "CHECK",
        "COLUMN",
        "CONSTRAINT",
        "CREATE",
        "CURRENT_DATE",
        "CURRENT_ROLE",
        "CURRENT_TIME",
        "CURRENT_TIMESTAMP",
        "CURRENT_USER",
        "DEFAULT",
        "DELETE",
        "DESC",
        "DISTINCT",
        "DROP",
        "ELSE",
        "END",
        "EXISTS",
        "FALSE",
        "FOREIGN",
        "FROM",
        "FULL",
        "GROUP",
        "HAVING",
        "IN",
        "INNER",
        "INSERT",
        "INTO",
        "JOIN",
        "LEFT",
        "LIKE",
        "LIMIT",
        "LOCALTIME",
        "LOCALTIMESTAMP",
        "NOT",
        "NULL",
        "OFFSET",
        "ON",
        "OR",
        "ORDER",
        "OUTER",
        "PRIMARY",
        "REFERENCES",
        "RETURNING",
        "RIGHT",
        "SELECT",
        "SESSION_USER",
        "SET",
        "TABLE",
        "THEN",
        "TRUE",
        "UNION",
        "UNIQUE",
        "UPDATE",
        "USER",
        "USING",
        "VALUES",
        "WHEN",
        "WHERE",
    ];

    RESERVED_KEYWORDS.contains(&name.to_ascii_uppercase().as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_table_names() {
        let valid_names = [
            "users",
            "user_profiles",
            "_private_table",
            "table123",
            "a",
            &"a".repeat(63), // Max length
        ];

        for name in valid_names {
            assert!(
                ValidatedTableName::new(name).is_ok(),
                "Should accept valid name: {}",
                name
            );
        }
    }

    #[test]
    fn test_invalid_table_names() {
        let test_cases = [
            ("", ValidationError::Empty),
            (
                "123table",
                ValidationError::InvalidStartCharacter("123table".to_string()),
            ),
            (
                "user-name",
                ValidationError::InvalidCharacters("user-name".to_string()),
            ),
            (
                "users; DROP TABLE users",
                ValidationError::InvalidCharacters("users; DROP TABLE users".to_string()),
            ),
            (
                "UserProfiles",
                ValidationError::Uppercase("UserProfiles".to_string()),
            ),
            (
                "select",
                ValidationError::ReservedKeyword("select".to_string()),
            ),
            (
                "where",
                ValidationError::ReservedKeyword("where".to_string()),
            ),
        ];

        for (name, expected_error) in test_cases {
            let result = ValidatedTableName::new(name);
            assert_eq!(result, Err(expected_error), "Should reject: {}", name);
        }
    }

    #[test]
    fn test_too_long_name() {
        let long_name = "a".repeat(64);
        match ValidatedTableName::new(&long_name) {
            Err(ValidationError::TooLong {
                length, max_length, ..
            }) => {
                assert_eq!(length, 64);
                assert_eq!(max_length, 63);
            }
            other => panic!("Expected TooLong error, got {:?}", other),
        }
    }

    #[test]
    fn test_column_names_that_are_type_names_are_allowed() {
        // Only keywords that break the generated statements are rejected
        assert!(ValidatedFieldName::new("date").is_ok());
        assert!(ValidatedFieldName::new("timestamp").is_ok());
        assert!(ValidatedFieldName::new("name").is_ok());
        assert!(ValidatedFieldName::new("order").is_err());
    }

    #[test]
    fn test_session_value_functions_are_reserved() {
        for name in [
            "user",
            "current_user",
            "session_user",
            "current_date",
            "current_timestamp",
        ] {
            assert_eq!(
                ValidatedFieldName::new(name),
                Err(ValidationError::ReservedKeyword(name.to_string()))
            );
        }
        assert!(ValidatedFieldName::new("user_id").is_ok());
        assert!(ValidatedTableName::new("users").is_ok());
    }

    #[test]
    fn test_uppercase_is_rejected_with_suggestion() {
        let error = ValidatedFieldName::new("firstName").unwrap_err();
        assert_eq!(error, ValidationError::Uppercase("firstName".to_string()));
        assert_eq!(
            error.to_string(),
            "Name 'firstName' must be lowercase; did you mean 'firstname'?"
        );
    }

    #[test]
    fn test_display_traits() {
        let table_name = ValidatedTableName::new("users").unwrap();
        let field_name = ValidatedFieldName::new("id").unwrap();

        assert_eq!(format!("{}", table_name), "users");
        assert_eq!(format!("{}", field_name), "id");
        assert_eq!(
            ValidationError::ReservedKeyword("from".to_string()).to_string(),
            "Name 'from' is a reserved SQL keyword"
        );
    }
}
