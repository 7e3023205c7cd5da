//! # MailNuggets Client
//! Asynchronous wrapper around the MailNuggets HTTP API: manage throwaway (disposable, receive-only) addresses, read the feed of emails received over the last 48 hours, and trigger a repost of an email to its original remote script, using [`Client`] and [`ClientBuilder`].
//!
//! ## Request signing
//! Every call is a GET whose query parameters appear in a fixed, operation-specific order. The full URL is signed with HMAC-SHA256 keyed by the account secret and the lowercase hex digest is appended as `&SIGNATURE=`. See [`ApiRequest`] and [`signer`].
//!
//! ## Runtime requirements
//! Async-only; run inside a Tokio (v1) runtime. HTTP calls use `reqwest` through the [`Transport`] trait, which can be swapped for tests.
//!
//! ## Out of scope
//! Responses are returned as raw XML ([`Response`]); parsing is left to the caller ([`models`] mirrors the element names). No retries, rate limiting or caching.
//!
//! ## Errors
//! Empty credentials or a bad endpoint fail at build time with [`Error::Configuration`]. Malformed parameters fail before any I/O with [`Error::Validation`]. Network failures surface as [`Error::Transport`]. An `<errors>` document is returned as a normal [`Response`]; [`Response::error_for_remote`] turns it into [`Error::Remote`].
//!
//! ## Example
//! ```no_run
//! use mailnuggets_client::{Client, Credentials};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), mailnuggets_client::Error> {
//!     let client = Client::new(Credentials::new("123", "api-key", "secret-key"))?;
//!
//!     let created = client.add_throwaway(None).await?.error_for_remote()?;
//!     println!("{}", created.text()?);
//!
//!     let feed = client.list_emails(None).await?;
//!     println!("{}", feed.text()?);
//!     Ok(())
//! }
//! ```

mod client;
mod credentials;
mod error;
pub mod models;
mod request;
mod response;
pub mod signer;
mod transport;

pub use client::{Client, ClientBuilder};
pub use credentials::{Credentials, ENV_API_KEY, ENV_SECRET_KEY, ENV_USER_ID};
pub use error::Error;
pub use request::{ApiRequest, Operation};
pub use response::Response;
pub use transport::{HttpTransport, Transport};

/// Result type alias for MailNuggets operations.
///
/// This is equivalent to `std::result::Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
