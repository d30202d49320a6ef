//! Credentials forwarded to the identity provider.
//!
//! The provider owns all credential policy (email format, password strength,
//! duplicate accounts), so construction performs no local validation.

use std::fmt;

use zeroize::Zeroizing;

/// Message returned to the browser after a successful sign-up.
pub const REGISTRATION_CONFIRMATION: &str = "Check your email to confirm!";

/// Email/password pair used for sign-up and password sign-in.
///
/// The password is zeroised on drop and never rendered by `Debug`.
///
/// # Examples
/// ```
/// use subtrack::domain::Credentials;
///
/// let creds = Credentials::new("ada@example.com", "hunter2");
/// assert_eq!(creds.email(), "ada@example.com");
/// assert!(!format!("{creds:?}").contains("hunter2"));
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    email: String,
    password: Zeroizing<String>,
}

impl Credentials {
    /// Wrap raw email and password inputs.
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: Zeroizing::new(password.into()),
        }
    }

    /// Email address exactly as supplied.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Password exactly as supplied.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}
