//! MailNuggets async client implementation.
//!
//! This module provides an async [`Client`] and [`ClientBuilder`] for the
//! MailNuggets API.
//!
//! Every call follows the same path:
//! 1) build the [`ApiRequest`] and validate it locally
//! 2) render the canonical URL and sign it ([`crate::signer`])
//! 3) send one GET through the [`Transport`]
//! 4) hand back the raw [`Response`]

use crate::signer;
use crate::{ApiRequest, Credentials, Error, HttpTransport, Response, Result, Transport};
use regex::Regex;
use reqwest::Url;
use std::fmt;
use std::time::Duration;
use tracing::{debug, warn};

const BASE_URL: &str = "https://www.mailnuggets.com/users/api/";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const USER_AGENT_VALUE: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Async client for the MailNuggets API.
///
/// The client holds only immutable configuration, so it is `Send + Sync` and
/// can be shared or cloned freely across tasks. Each method performs exactly
/// one HTTP request and never retries.
///
/// Responses are returned unparsed. An `<errors>` document is still a
/// successful call at this layer; see [`Response::is_remote_error`].
#[derive(Clone)]
pub struct Client<T = HttpTransport> {
    transport: T,
    credentials: Credentials,
    base_url: String,
}

impl<T: fmt::Debug> fmt::Debug for Client<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("transport", &self.transport)
            .field("credentials", &self.credentials)
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl Client {
    /// Create a [`ClientBuilder`] for configuring a new client.
    ///
    /// # Examples
    /// ```no_run
    /// # use mailnuggets_client::{Client, Credentials};
    /// # use std::time::Duration;
    /// # fn main() -> Result<(), mailnuggets_client::Error> {
    /// let client = Client::builder(Credentials::new("123", "api-key", "secret"))
    ///     .timeout(Duration::from_secs(10))
    ///     .build()?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn builder(credentials: Credentials) -> ClientBuilder {
        ClientBuilder::new(credentials)
    }

    /// Create a client with default settings.
    ///
    /// # Errors
    /// Returns [`Error::Configuration`] if a credential is empty or the HTTP
    /// client cannot be constructed.
    pub fn new(credentials: Credentials) -> Result<Self> {
        ClientBuilder::new(credentials).build()
    }

    /// Create a client with default settings and credentials from the environment.
    ///
    /// # Errors
    /// See [`Credentials::from_env`] and [`Client::new`].
    pub fn from_env() -> Result<Self> {
        Self::new(Credentials::from_env()?)
    }
}

impl<T: Transport> Client<T> {
    /// The credentials requests are signed with.
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// The API endpoint operation paths are appended to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// List every active throwaway address.
    ///
    /// The body is an `<allthrowaways>` document.
    ///
    /// # Errors
    /// Returns [`Error::Transport`] if the request could not be completed.
    ///
    /// # Examples
    /// ```no_run
    /// # use mailnuggets_client::Client;
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), mailnuggets_client::Error> {
    /// let client = Client::from_env()?;
    /// let response = client.list_all_throwaways().await?;
    /// println!("{}", response.text()?);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn list_all_throwaways(&self) -> Result<Response> {
        self.execute(&ApiRequest::ListAllThrowaways).await
    }

    /// Look up a single throwaway address.
    ///
    /// # Errors
    /// Returns [`Error::Validation`] if `name` is empty or not lowercase
    /// alphanumeric, or [`Error::Transport`] if the request fails.
    pub async fn lookup_throwaway(&self, name: &str) -> Result<Response> {
        self.execute(&ApiRequest::LookupThrowaway {
            name: name.to_string(),
        })
        .await
    }

    /// Create a throwaway address.
    ///
    /// With `None` (or an empty name) the service generates one. Either way the
    /// `<success>` document contains the final name.
    ///
    /// # Errors
    /// Returns [`Error::Validation`] if a supplied name is not lowercase
    /// alphanumeric, or [`Error::Transport`] if the request fails.
    ///
    /// # Examples
    /// ```no_run
    /// # use mailnuggets_client::Client;
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), mailnuggets_client::Error> {
    /// let client = Client::from_env()?;
    /// let response = client.add_throwaway(Some("newsletter42")).await?.error_for_remote()?;
    /// println!("{}", response.text()?);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn add_throwaway(&self, name: Option<&str>) -> Result<Response> {
        self.execute(&ApiRequest::AddThrowaway {
            name: name.map(str::to_string),
        })
        .await
    }

    /// Delete a throwaway address.
    ///
    /// # Errors
    /// Returns [`Error::Validation`] if `name` is empty or not lowercase
    /// alphanumeric, or [`Error::Transport`] if the request fails.
    pub async fn remove_throwaway(&self, name: &str) -> Result<Response> {
        self.execute(&ApiRequest::RemoveThrowaway {
            name: name.to_string(),
        })
        .await
    }

    /// List emails received in the last 48 hours.
    ///
    /// With `Some(id)` only emails received after `id` are listed. Message bodies
    /// and attachments are not included.
    ///
    /// # Errors
    /// Returns [`Error::Validation`] if `email_id` is not numeric, or
    /// [`Error::Transport`] if the request fails.
    pub async fn list_emails(&self, email_id: Option<&str>) -> Result<Response> {
        self.execute(&ApiRequest::ListEmails {
            email_id: email_id.map(str::to_string),
        })
        .await
    }

    /// Re-deliver an email to the remote script it was originally POSTed to.
    ///
    /// Only emails younger than two days can be reposted.
    ///
    /// # Errors
    /// Returns [`Error::Validation`] without sending anything if `email_id` is
    /// empty or not numeric, or [`Error::Transport`] if the request fails.
    pub async fn repost_email(&self, email_id: &str) -> Result<Response> {
        self.execute(&ApiRequest::RepostEmail {
            email_id: email_id.to_string(),
        })
        .await
    }

    /// Validate, sign and send an arbitrary request.
    ///
    /// # Errors
    /// Returns [`Error::Validation`] before any I/O for malformed requests, or
    /// [`Error::Transport`] if the request fails.
    pub async fn execute(&self, request: &ApiRequest) -> Result<Response> {
        let operation = request.operation();
        let url = self.signed_url(request)?;

        debug!(%operation, url = %redact_url(&url), "sending MailNuggets request");

        match self.transport.get(&url).await {
            Ok(response) => {
                debug!(
                    %operation,
                    status = response.status(),
                    bytes = response.body().len(),
                    remote_error = response.is_remote_error(),
                    "MailNuggets response received"
                );
                Ok(response)
            }
            Err(err) => {
                warn!(%operation, error = %err, "MailNuggets request failed");
                Err(err)
            }
        }
    }

    /// The exact signed URL [`Client::execute`] would request.
    ///
    /// # Errors
    /// Returns [`Error::Validation`] for malformed requests, or
    /// [`Error::Configuration`] if a credential contains characters (`#`,
    /// spaces, ...) that would make the sent URL differ from the signed one.
    pub fn signed_url(&self, request: &ApiRequest) -> Result<String> {
        request.validate()?;
        let unsigned = request.unsigned_url(&self.base_url, &self.credentials);
        let signed = signer::signed_url(&unsigned, self.credentials.secret_key())?;
        ensure_sent_verbatim(&signed)?;
        Ok(signed)
    }
}

/// Check that the HTTP stack will send the query of `signed` unchanged.
///
/// Credentials are inserted literally. A `#` in one turns the rest of the URL,
/// signature included, into a fragment that is never sent; spaces and other
/// characters get percent-encoded and no longer match the signed bytes.
fn ensure_sent_verbatim(signed: &str) -> Result<()> {
    let parsed = Url::parse(signed)
        .map_err(|e| Error::Configuration(format!("signed URL does not parse: {e}")))?;
    let signed_query = signed.split_once('?').map(|(_, query)| query);

    if parsed.fragment().is_some() || parsed.query() != signed_query {
        return Err(Error::Configuration(
            "a credential contains characters that would alter the signed URL in transit"
                .to_string(),
        ));
    }
    Ok(())
}

/// Mask the API key and signature in a request URL for logging.
fn redact_url(url: &str) -> String {
    let mut redacted = url.to_string();

    let patterns = [r"(APIKEY=)[^&]*", r"(SIGNATURE=)[^&]*"];

    for pattern in patterns {
        if let Ok(re) = Regex::new(pattern) {
            redacted = re.replace_all(&redacted, "${1}<redacted>").to_string();
        }
    }

    redacted
}

/// Builder for configuring a MailNuggets [`Client`].
///
/// Start with [`Client::builder`], override what you need, then call
/// [`ClientBuilder::build`].
///
/// # Defaults
/// - The public MailNuggets endpoint
/// - TLS certificate verification enabled
/// - 30 second request timeout
/// - No proxy
/// - `mailnuggets-client/<version>` user agent
#[derive(Debug, Clone)]
pub struct ClientBuilder {
    credentials: Credentials,
    proxy: Option<String>,
    danger_accept_invalid_certs: bool,
    user_agent: String,
    base_url: String,
    timeout: Duration,
}

impl ClientBuilder {
    /// Create a new builder with default settings.
    ///
    /// See [`ClientBuilder`] for the list of defaults.
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            proxy: None,
            danger_accept_invalid_certs: false,
            user_agent: USER_AGENT_VALUE.to_string(),
            base_url: BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Set a proxy URL (e.g. `"http://127.0.0.1:8080"` or `"socks5://127.0.0.1:1080"`).
    pub fn proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }

    /// Configure whether to accept invalid TLS certificates (default: `false`).
    ///
    /// # Security
    /// Turning verification off exposes the API key and every response to anyone
    /// able to intercept the connection. Only use it against a local test server.
    pub fn danger_accept_invalid_certs(mut self, value: bool) -> Self {
        self.danger_accept_invalid_certs = value;
        self
    }

    /// Override the default user agent string.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Override the API endpoint (default `https://www.mailnuggets.com/users/api/`).
    ///
    /// Operation paths such as `listall` are appended to it.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the per-request timeout (default 30 seconds).
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build the [`Client`] with the reqwest-backed [`HttpTransport`].
    ///
    /// No network traffic happens here.
    ///
    /// # Errors
    /// Returns [`Error::Configuration`] if:
    /// - a credential is empty,
    /// - the endpoint is not an absolute `http`/`https` URL,
    /// - the proxy URL is invalid or the HTTP client cannot be constructed.
    pub fn build(self) -> Result<Client> {
        let mut builder = reqwest::Client::builder()
            .danger_accept_invalid_certs(self.danger_accept_invalid_certs)
            .timeout(self.timeout)
            .user_agent(self.user_agent.as_str());

        if self.danger_accept_invalid_certs {
            warn!("TLS certificate verification is disabled");
        }

        if let Some(proxy_url) = &self.proxy {
            let proxy = reqwest::Proxy::all(proxy_url)
                .map_err(|e| Error::Configuration(format!("invalid proxy `{proxy_url}`: {e}")))?;
            builder = builder.proxy(proxy);
        }

        let http = builder
            .build()
            .map_err(|e| Error::Configuration(format!("cannot build HTTP client: {e}")))?;

        self.build_with_transport(HttpTransport::new(http))
    }

    /// Build a [`Client`] that sends requests through `transport`.
    ///
    /// Proxy, TLS, timeout and user agent settings only apply to the default
    /// transport and are ignored here.
    ///
    /// # Errors
    /// Returns [`Error::Configuration`] if a credential is empty or the endpoint
    /// is not an absolute `http`/`https` URL.
    pub fn build_with_transport<T: Transport>(self, transport: T) -> Result<Client<T>> {
        self.credentials.ensure_complete()?;

        let endpoint = Url::parse(&self.base_url).map_err(|e| {
            Error::Configuration(format!("invalid base URL `{}`: {e}", self.base_url))
        })?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(Error::Configuration(format!(
                "base URL `{}` must use http or https",
                self.base_url
            )));
        }

        debug!(base_url = %self.base_url, "MailNuggets client configured");

        Ok(Client {
            transport,
            credentials: self.credentials,
            base_url: self.base_url,
        })
    }
}
