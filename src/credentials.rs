//! API credentials for MailNuggets requests.

use crate::{Error, Result};
use serde::Deserialize;
use std::fmt;

/// Environment variable holding the numeric API user id.
pub const ENV_USER_ID: &str = "MAILNUGGETS_API_USER_ID";
/// Environment variable holding the API key.
pub const ENV_API_KEY: &str = "MAILNUGGETS_API_KEY";
/// Environment variable holding the signing secret.
pub const ENV_SECRET_KEY: &str = "MAILNUGGETS_API_SECRET_KEY";

/// Account credentials from <https://www.mailnuggets.com/usersettings>.
///
/// All three values are opaque tokens. `user_id` and `api_key` travel in the
/// query string of every request; `secret_key` only keys the request signature
/// and is never sent.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct Credentials {
    user_id: String,
    api_key: String,
    secret_key: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("user_id", &self.user_id)
            .field("api_key", &"<redacted>")
            .field("secret_key", &"<redacted>")
            .finish()
    }
}

impl Credentials {
    /// Create credentials from their three parts.
    ///
    /// No validation happens here; [`ClientBuilder::build`](crate::ClientBuilder::build)
    /// rejects empty values.
    pub fn new(
        user_id: impl Into<String>,
        api_key: impl Into<String>,
        secret_key: impl Into<String>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            api_key: api_key.into(),
            secret_key: secret_key.into(),
        }
    }

    /// Load credentials from [`ENV_USER_ID`], [`ENV_API_KEY`] and [`ENV_SECRET_KEY`].
    ///
    /// # Errors
    /// Returns [`Error::Configuration`] naming the first variable that is unset
    /// or not valid unicode.
    pub fn from_env() -> Result<Self> {
        let read = |name: &str| {
            std::env::var(name)
                .map_err(|e| Error::Configuration(format!("environment variable {name}: {e}")))
        };
        Ok(Self::new(
            read(ENV_USER_ID)?,
            read(ENV_API_KEY)?,
            read(ENV_SECRET_KEY)?,
        ))
    }

    /// The API user id.
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// The API key.
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub(crate) fn secret_key(&self) -> &str {
        &self.secret_key
    }

    /// Reject credentials with an empty (or whitespace-only) part.
    pub(crate) fn ensure_complete(&self) -> Result<()> {
        let parts = [
            ("user_id", &self.user_id),
            ("api_key", &self.api_key),
            ("secret_key", &self.secret_key),
        ];
        for (field, value) in parts {
            if value.trim().is_empty() {
                return Err(Error::Configuration(format!("missing credential `{field}`")));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_redacts_keys() {
        let creds = Credentials::new("123", "key-abc", "s3cr3t");
        let printed = format!("{creds:?}");
        assert!(printed.contains("123"));
        assert!(!printed.contains("key-abc"));
        assert!(!printed.contains("s3cr3t"));
    }

    #[test]
    fn empty_parts_are_rejected() {
        let err = Credentials::new("123", "  ", "s3cr3t")
            .ensure_complete()
            .unwrap_err();
        assert!(matches!(err, Error::Configuration(msg) if msg.contains("api_key")));

        assert!(Credentials::new("", "abc", "s").ensure_complete().is_err());
        assert!(Credentials::new("1", "abc", "").ensure_complete().is_err());
        assert!(Credentials::new("1", "abc", "s").ensure_complete().is_ok());
    }
}
