//! Credential-checker interface boundary.
//!
//! Authentication proper lives outside the policy engine; this module fixes
//! the seam. [`UserFile`] parses the conventional newline-delimited
//! `user:passwordHash` format and answers [`CredentialChecker`] queries,
//! delegating hash validation entirely to an injected
//! [`PasswordVerifier`] — hashing schemes are not this crate's concern.

use std::fmt;
use std::path::Path;

use crate::error::HtgateError;
use crate::types::ConfigError;

/// Outcome of a credential check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthStatus {
    Granted,
    Denied,
    /// The backing store could not answer (for checkers with fallible
    /// backends).
    Error,
}

/// Validates a presented password against a stored hash.
pub trait PasswordVerifier {
    fn verify(&self, password: &str, hash: &str) -> bool;
}

impl<F> PasswordVerifier for F
where
    F: Fn(&str, &str) -> bool,
{
    fn verify(&self, password: &str, hash: &str) -> bool {
        self(password, hash)
    }
}

/// Answers whether a user/password pair is acceptable.
pub trait CredentialChecker {
    fn check_password(&self, user: &str, password: &str) -> AuthStatus;
}

#[derive(Debug, Clone)]
struct UserEntry {
    user: String,
    hash: String,
}

/// A parsed `user:passwordHash` credential file.
///
/// Lines are trimmed; blank lines and `#` comments are skipped. The part
/// before the first `:` is the user, the remainder the stored hash.
#[derive(Clone)]
pub struct UserFile<V> {
    entries: Vec<UserEntry>,
    verifier: V,
}

impl<V> UserFile<V> {
    /// Parse credential text.
    ///
    /// # Errors
    ///
    /// [`ConfigError::MalformedUserLine`] for a non-comment line without a
    /// `:` separator.
    pub fn parse(text: &str, verifier: V) -> Result<Self, ConfigError> {
        let mut entries = Vec::new();
        for (number, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let (user, hash) = line
                .split_once(':')
                .ok_or(ConfigError::MalformedUserLine { line: number + 1 })?;
            entries.push(UserEntry {
                user: user.to_owned(),
                hash: hash.to_owned(),
            });
        }
        Ok(Self { entries, verifier })
    }

    /// Read and parse a credential file.
    ///
    /// # Errors
    ///
    /// I/O failures and malformed lines, through the unified error type.
    pub fn load(path: impl AsRef<Path>, verifier: V) -> Result<Self, HtgateError> {
        let text = std::fs::read_to_string(path)?;
        Ok(Self::parse(&text, verifier)?)
    }

    /// Number of credential entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<V> fmt::Debug for UserFile<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserFile")
            .field("entries", &self.entries.len())
            .finish()
    }
}

impl<V: PasswordVerifier> CredentialChecker for UserFile<V> {
    fn check_password(&self, user: &str, password: &str) -> AuthStatus {
        for entry in &self.entries {
            // User comparison is case sensitive: jay != JAY.
            if entry.user == user && self.verifier.verify(password, &entry.hash) {
                return AuthStatus::Granted;
            }
        }
        AuthStatus::Denied
    }
}
