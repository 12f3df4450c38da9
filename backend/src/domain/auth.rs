//! Authentication primitives: login credentials and registration requests.
//!
//! Inbound adapters build these from raw strings; the constructors validate
//! before a handler talks to a port. Passwords are held in [`Zeroizing`]
//! buffers so they are wiped on drop.

use zeroize::Zeroizing;

use super::{DisplayName, Email, Role, UserValidationError};

/// Minimum accepted password length, in characters.
pub const PASSWORD_MIN: usize = 8;

/// Validation failures for login payloads.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoginValidationError {
    #[error("email must be a valid address")]
    InvalidEmail,
    #[error("password must not be empty")]
    EmptyPassword,
}

/// Validation failures for registration payloads.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistrationValidationError {
    #[error(transparent)]
    User(#[from] UserValidationError),
    #[error("password must be at least {min} characters")]
    PasswordTooShort { min: usize },
}

/// Validated login credentials.
///
/// # Examples
/// ```
/// use encore::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts("Ada@Example.com", "hunter22").expect("valid");
/// assert_eq!(creds.email().as_ref(), "ada@example.com");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: Email,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, LoginValidationError> {
        let email = Email::new(email).map_err(|_| LoginValidationError::InvalidEmail)?;
        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }
        Ok(Self {
            email,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Validated sign-up request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    name: DisplayName,
    email: Email,
    password: Zeroizing<String>,
    role: Role,
}

impl Registration {
    /// Validate raw registration fields.
    ///
    /// The password keeps caller-provided whitespace; only its length is
    /// checked.
    pub fn try_from_parts(
        name: &str,
        email: &str,
        password: &str,
        role: &str,
    ) -> Result<Self, RegistrationValidationError> {
        let name = DisplayName::new(name)?;
        let email = Email::new(email)?;
        if password.chars().count() < PASSWORD_MIN {
            return Err(RegistrationValidationError::PasswordTooShort { min: PASSWORD_MIN });
        }
        let role = role.parse::<Role>()?;
        Ok(Self {
            name,
            email,
            password: Zeroizing::new(password.to_owned()),
            role,
        })
    }

    pub fn name(&self) -> &DisplayName {
        &self.name
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn password(&self) -> &str {
        self.password.as_str()
    }

    pub fn role(&self) -> Role {
        self.role
    }
}
