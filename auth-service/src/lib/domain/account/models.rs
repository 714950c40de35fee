use std::fmt;
use std::str::FromStr;

use auth::Credentials;
use auth::Gender;
use auth::Profile;
use chrono::NaiveDate;

use super::errors::EmailError;
use super::errors::PasswordPolicyError;
use super::errors::ProfileError;
use super::errors::SignUpError;
use super::errors::UsernameError;

/// Username value type
///
/// Ensures username is 3-32 characters and contains only alphanumeric, underscore, and hyphen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Username(String);

impl Username {
    const MIN_LENGTH: usize = 3;
    const MAX_LENGTH: usize = 32;

    /// Create a new valid username.
    ///
    /// # Errors
    /// * `TooShort` - Username shorter than 3 characters
    /// * `TooLong` - Username longer than 32 characters
    /// * `InvalidCharacters` - Contains non-alphanumeric characters (except _ and -)
    pub fn new(username: String) -> Result<Self, UsernameError> {
        let username = Self::with_valid_length(username)?;
        let username = Self::with_valid_chars(username)?;
        Ok(Self(username))
    }

    fn with_valid_length(username: String) -> Result<String, UsernameError> {
        let length = username.chars().count();
        if length < Self::MIN_LENGTH {
            Err(UsernameError::TooShort {
                min: Self::MIN_LENGTH,
                actual: length,
            })
        } else if length > Self::MAX_LENGTH {
            Err(UsernameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(username)
        }
    }

    fn with_valid_chars(username: String) -> Result<String, UsernameError> {
        if username
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            Ok(username)
        } else {
            Err(UsernameError::InvalidCharacters)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type
///
/// Validates email format using RFC 5322 compliant parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// # Errors
    /// * `InvalidFormat` - Email does not conform to RFC 5322
    pub fn new(email: String) -> Result<Self, EmailError> {
        email_address::EmailAddress::from_str(&email)
            .map(|_| EmailAddress(email))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

/// Plaintext password that satisfies the signup policy.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    const MIN_LENGTH: usize = 8;

    /// # Errors
    /// * `TooShort` - Fewer than 8 characters
    pub fn new(password: String) -> Result<Self, PasswordPolicyError> {
        if password.chars().count() < Self::MIN_LENGTH {
            return Err(PasswordPolicyError::TooShort {
                min: Self::MIN_LENGTH,
            });
        }
        Ok(Self(password))
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(<redacted>)")
    }
}

/// Validated signup data, ready for the authentication core.
#[derive(Debug)]
pub struct SignUpCommand {
    pub username: Username,
    pub password: Password,
    pub first_name: String,
    pub last_name: String,
    pub gender: Gender,
    pub birthdate: NaiveDate,
    pub email: Option<EmailAddress>,
}

impl SignUpCommand {
    /// Validate raw signup fields.
    ///
    /// # Errors
    /// * `SignUpError` - First failing field
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        username: String,
        password: String,
        first_name: String,
        last_name: String,
        gender: Gender,
        birthdate: NaiveDate,
        email: Option<String>,
    ) -> Result<Self, SignUpError> {
        let username = Username::new(username)?;
        let password = Password::new(password)?;
        let first_name = non_blank(first_name, "First name")?;
        let last_name = non_blank(last_name, "Last name")?;
        let email = email.map(EmailAddress::new).transpose()?;

        Ok(Self {
            username,
            password,
            first_name,
            last_name,
            gender,
            birthdate,
            email,
        })
    }

    /// Split into the credentials and profile the core registers.
    pub fn into_parts(self) -> (Credentials, Profile) {
        let credentials = Credentials::new(self.username.into_inner(), self.password.0);
        let profile = Profile {
            first_name: self.first_name,
            last_name: self.last_name,
            gender: self.gender,
            birthdate: self.birthdate,
            email: self.email.map(EmailAddress::into_inner),
        };
        (credentials, profile)
    }
}

fn non_blank(value: String, field: &'static str) -> Result<String, ProfileError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ProfileError::Blank(field));
    }
    Ok(trimmed.to_string())
}
