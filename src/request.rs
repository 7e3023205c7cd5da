//! Request shapes and canonical query construction.
//!
//! The service verifies the signature over the literal URL, so every operation
//! emits its parameters in one fixed order:
//!
//! | Operation | Path | Parameters |
//! |---|---|---|
//! | list all throwaways | `listall` | `APIUSERID, APIKEY` |
//! | lookup throwaway | `lookup` | `APIUSERID, APIKEY, THROWAWAYNAME` |
//! | add throwaway | `add` | `APIUSERID, APIKEY, THROWAWAYNAME` |
//! | remove throwaway | `remove` | `APIUSERID, APIKEY, THROWAWAYNAME` |
//! | list emails | `listemails` | `APIUSERID, APIKEY, EMAILID` |
//! | repost email | `repostemail` | `APIUSERID, APIKEY, EMAILID` |
//!
//! Values are inserted as-is. Validation keeps names and ids alphanumeric so
//! they never need escaping.

use crate::{Credentials, Error, Result};
use std::borrow::Cow;
use std::fmt;

pub(crate) const PARAM_USER_ID: &str = "APIUSERID";
pub(crate) const PARAM_API_KEY: &str = "APIKEY";
pub(crate) const PARAM_THROWAWAY_NAME: &str = "THROWAWAYNAME";
pub(crate) const PARAM_EMAIL_ID: &str = "EMAILID";

type Param<'a> = (&'static str, Cow<'a, str>);

/// The six MailNuggets API operations.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
    /// List every active throwaway address.
    ListAllThrowaways,
    /// Look up a single throwaway address.
    LookupThrowaway,
    /// Create a throwaway address.
    AddThrowaway,
    /// Delete a throwaway address.
    RemoveThrowaway,
    /// List emails received in the last 48 hours.
    ListEmails,
    /// Re-deliver an email to its original destination.
    RepostEmail,
}

impl Operation {
    /// URL path segment appended to the endpoint.
    pub fn path(self) -> &'static str {
        match self {
            Operation::ListAllThrowaways => "listall",
            Operation::LookupThrowaway => "lookup",
            Operation::AddThrowaway => "add",
            Operation::RemoveThrowaway => "remove",
            Operation::ListEmails => "listemails",
            Operation::RepostEmail => "repostemail",
        }
    }

    /// Short name used in logs and error messages.
    pub fn name(self) -> &'static str {
        match self {
            Operation::ListAllThrowaways => "list_all_throwaways",
            Operation::LookupThrowaway => "lookup_throwaway",
            Operation::AddThrowaway => "add_throwaway",
            Operation::RemoveThrowaway => "remove_throwaway",
            Operation::ListEmails => "list_emails",
            Operation::RepostEmail => "repost_email",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One API call with its operation-specific parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ApiRequest {
    /// `listall`
    ListAllThrowaways,
    /// `lookup`; `name` is required.
    LookupThrowaway { name: String },
    /// `add`; the service generates a name when `name` is `None`, empty or blank.
    AddThrowaway { name: Option<String> },
    /// `remove`; `name` is required.
    RemoveThrowaway { name: String },
    /// `listemails`; `email_id` restricts the feed to emails after that id.
    /// `None`, empty and blank ids all mean "the whole 48-hour window".
    ListEmails { email_id: Option<String> },
    /// `repostemail`; `email_id` is required.
    RepostEmail { email_id: String },
}

impl ApiRequest {
    /// The operation this request targets.
    pub fn operation(&self) -> Operation {
        match self {
            ApiRequest::ListAllThrowaways => Operation::ListAllThrowaways,
            ApiRequest::LookupThrowaway { .. } => Operation::LookupThrowaway,
            ApiRequest::AddThrowaway { .. } => Operation::AddThrowaway,
            ApiRequest::RemoveThrowaway { .. } => Operation::RemoveThrowaway,
            ApiRequest::ListEmails { .. } => Operation::ListEmails,
            ApiRequest::RepostEmail { .. } => Operation::RepostEmail,
        }
    }

    /// Check required parameters and their shape without touching the network.
    ///
    /// # Errors
    /// Returns [`Error::Validation`] when a required value is missing, a throwaway
    /// name is not lowercase alphanumeric, or an email id is not numeric.
    pub fn validate(&self) -> Result<()> {
        let op = self.operation().name();
        match self {
            ApiRequest::ListAllThrowaways => Ok(()),
            ApiRequest::LookupThrowaway { name } | ApiRequest::RemoveThrowaway { name } => {
                validate_throwaway_name(op, name)
            }
            ApiRequest::AddThrowaway { name } => match non_empty(name.as_deref()) {
                Some(name) => validate_throwaway_name(op, name),
                None => Ok(()),
            },
            ApiRequest::ListEmails { email_id } => match non_empty(email_id.as_deref()) {
                Some(id) => validate_email_id(op, id),
                None => Ok(()),
            },
            ApiRequest::RepostEmail { email_id } => validate_email_id(op, email_id),
        }
    }

    /// Ordered `(key, value)` pairs, credentials first.
    fn params<'a>(&'a self, credentials: &'a Credentials) -> Vec<Param<'a>> {
        let mut params = vec![
            (PARAM_USER_ID, Cow::Borrowed(credentials.user_id())),
            (PARAM_API_KEY, Cow::Borrowed(credentials.api_key())),
        ];

        match self {
            ApiRequest::ListAllThrowaways => {}
            ApiRequest::LookupThrowaway { name } | ApiRequest::RemoveThrowaway { name } => {
                params.push((PARAM_THROWAWAY_NAME, Cow::Borrowed(name.as_str())));
            }
            ApiRequest::AddThrowaway { name } => {
                let name = non_empty(name.as_deref()).unwrap_or("");
                params.push((PARAM_THROWAWAY_NAME, Cow::Borrowed(name)));
            }
            ApiRequest::ListEmails { email_id } => {
                let email_id = non_empty(email_id.as_deref()).unwrap_or("");
                params.push((PARAM_EMAIL_ID, Cow::Borrowed(email_id)));
            }
            ApiRequest::RepostEmail { email_id } => {
                params.push((PARAM_EMAIL_ID, Cow::Borrowed(email_id.as_str())));
            }
        }

        params
    }

    /// The canonical query string (without `?` and without the signature).
    pub fn canonical_query(&self, credentials: &Credentials) -> String {
        self.params(credentials)
            .iter()
            .map(|(key, value)| format!("{key}={value}"))
            .collect::<Vec<_>>()
            .join("&")
    }

    /// Endpoint + path + `?` + canonical query. This is the exact string that gets signed.
    pub fn unsigned_url(&self, endpoint: &str, credentials: &Credentials) -> String {
        format!(
            "{}/{}?{}",
            endpoint.trim_end_matches('/'),
            self.operation().path(),
            self.canonical_query(credentials)
        )
    }
}

/// Optional values that are empty or whitespace-only count as omitted.
fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

fn validate_throwaway_name(op: &'static str, name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(Error::validation(op, "throwaway name is required"));
    }
    if !name
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
    {
        return Err(Error::validation(
            op,
            format!("throwaway name `{name}` must be lowercase alphanumeric"),
        ));
    }
    Ok(())
}

fn validate_email_id(op: &'static str, email_id: &str) -> Result<()> {
    if email_id.trim().is_empty() {
        return Err(Error::validation(op, "email id is required"));
    }
    if !email_id.chars().all(|c| c.is_ascii_digit()) {
        return Err(Error::validation(
            op,
            format!("email id `{email_id}` must be numeric"),
        ));
    }
    Ok(())
}
