//! Identity data consumed from the external identity provider.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Validation errors returned by [`UserId::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserIdValidationError {
    /// The identifier was blank.
    Empty,
    /// The identifier carried leading or trailing whitespace.
    SurroundingWhitespace,
}

impl fmt::Display for UserIdValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "user id must not be empty"),
            Self::SurroundingWhitespace => {
                write!(f, "user id must not have surrounding whitespace")
            }
        }
    }
}

impl std::error::Error for UserIdValidationError {}

/// Opaque user identifier issued by the identity provider.
///
/// The provider owns the format; the service only requires it to be a
/// non-empty token so it can be used as an equality filter.
///
/// # Examples
/// ```
/// use subtrack::domain::UserId;
///
/// let id = UserId::new("8a1f6a1e-0000-4000-8000-000000000001").unwrap();
/// assert_eq!(id.as_ref(), "8a1f6a1e-0000-4000-8000-000000000001");
/// assert!(UserId::new("  ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

impl UserId {
    /// Validate and construct a [`UserId`].
    pub fn new(id: impl Into<String>) -> Result<Self, UserIdValidationError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(UserIdValidationError::Empty);
        }
        if id.trim() != id {
            return Err(UserIdValidationError::SurroundingWhitespace);
        }
        Ok(Self(id))
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        value.0
    }
}

impl TryFrom<String> for UserId {
    type Error = UserIdValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// User returned by a successful password sign-in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    id: UserId,
    email: String,
}

impl AuthenticatedUser {
    /// Pair the provider identifier with the email used as display name.
    pub fn new(id: UserId, email: impl Into<String>) -> Self {
        Self {
            id,
            email: email.into(),
        }
    }

    /// Provider-issued identifier.
    pub fn id(&self) -> &UserId {
        &self.id
    }

    /// Email address shown as the display name.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", UserIdValidationError::Empty)]
    #[case("   ", UserIdValidationError::Empty)]
    #[case(" abc", UserIdValidationError::SurroundingWhitespace)]
    #[case("abc\n", UserIdValidationError::SurroundingWhitespace)]
    fn rejects_invalid_ids(#[case] raw: &str, #[case] expected: UserIdValidationError) {
        assert_eq!(UserId::new(raw).expect_err("invalid id"), expected);
    }

    #[rstest]
    #[case("3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    #[case("user-42")]
    fn accepts_opaque_tokens(#[case] raw: &str) {
        let id = UserId::new(raw).expect("valid id");
        assert_eq!(id.to_string(), raw);
    }

    #[rstest]
    fn deserialising_validates() {
        let result: Result<UserId, _> = serde_json::from_str("\"\"");
        assert!(result.is_err());
        let id: UserId = serde_json::from_str("\"u1\"").expect("valid id");
        assert_eq!(id.as_ref(), "u1");
    }
}
