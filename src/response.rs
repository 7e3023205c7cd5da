//! Raw API responses.

use crate::{Error, Result};
use std::fmt;

/// Root element the service uses for error documents.
const ERRORS_ROOT: &str = "errors";

/// The unmodified HTTP response of one API call.
///
/// MailNuggets answers with UTF-8 XML. The body is kept byte-for-byte; parsing
/// it is up to the caller.
#[derive(Clone, PartialEq, Eq)]
pub struct Response {
    status: u16,
    body: Vec<u8>,
}

impl fmt::Debug for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Response")
            .field("status", &self.status)
            .field("body", &String::from_utf8_lossy(&self.body))
            .finish()
    }
}

impl Response {
    /// Wrap a status code and body.
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// HTTP status code.
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Raw body bytes.
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Consume the response and return the raw body.
    pub fn into_body(self) -> Vec<u8> {
        self.body
    }

    /// Body as UTF-8 text.
    ///
    /// # Errors
    /// Returns [`Error::Utf8`] if the body is not valid UTF-8.
    pub fn text(&self) -> Result<&str> {
        Ok(std::str::from_utf8(&self.body)?)
    }

    /// Name of the document's root element, if one can be found.
    ///
    /// Skips a leading BOM, whitespace, processing instructions (`<?xml ...?>`),
    /// comments and doctype declarations. This is a sniff, not a parse: the rest
    /// of the document is not looked at.
    pub fn root_element(&self) -> Option<&str> {
        let text = std::str::from_utf8(&self.body).ok()?;
        let mut rest = text.trim_start_matches('\u{feff}');

        loop {
            rest = rest.trim_start();
            if let Some(after) = rest.strip_prefix("<?") {
                rest = &after[after.find("?>")? + 2..];
            } else if let Some(after) = rest.strip_prefix("<!--") {
                rest = &after[after.find("-->")? + 3..];
            } else if let Some(after) = rest.strip_prefix("<!") {
                rest = &after[after.find('>')? + 1..];
            } else {
                break;
            }
        }

        let tag = rest.strip_prefix('<')?;
        let end = tag
            .find(|c: char| c.is_whitespace() || c == '>' || c == '/')
            .unwrap_or(tag.len());
        let name = &tag[..end];
        (!name.is_empty()).then_some(name)
    }

    /// Whether the body is an `<errors>` document.
    pub fn is_remote_error(&self) -> bool {
        self.root_element() == Some(ERRORS_ROOT)
    }

    /// Turn an `<errors>` document into [`Error::Remote`]; pass anything else through.
    ///
    /// # Errors
    /// Returns [`Error::Remote`] carrying the unmodified body.
    pub fn error_for_remote(self) -> Result<Self> {
        if self.is_remote_error() {
            return Err(Error::Remote {
                body: String::from_utf8_lossy(&self.body).into_owned(),
            });
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ERRORS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
        <errors>
            <error> Example error message </error>
        </errors>"#;

    #[test]
    fn root_element_skips_prolog() {
        let response = Response::new(200, ERRORS);
        assert_eq!(response.root_element(), Some("errors"));

        let response = Response::new(
            200,
            "\u{feff}<!-- note --><!DOCTYPE x>\n<allthrowaways><throwaway/></allthrowaways>",
        );
        assert_eq!(response.root_element(), Some("allthrowaways"));

        let response = Response::new(200, "<success>1</success>");
        assert_eq!(response.root_element(), Some("success"));
    }

    #[test]
    fn root_element_of_garbage_is_none() {
        assert_eq!(Response::new(200, "").root_element(), None);
        assert_eq!(Response::new(200, "plain text").root_element(), None);
        assert_eq!(Response::new(200, "<?xml unterminated").root_element(), None);
        assert_eq!(Response::new(200, vec![0xff, 0xfe, 0x00]).root_element(), None);
    }

    #[test]
    fn remote_errors_are_detected() {
        let response = Response::new(200, ERRORS);
        assert!(response.is_remote_error());

        let err = response.error_for_remote().unwrap_err();
        match err {
            Error::Remote { body } => assert_eq!(body, ERRORS),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn error_like_names_are_not_remote_errors() {
        let response = Response::new(200, "<errorsx/>");
        assert!(!response.is_remote_error());

        let response = Response::new(200, "<success><email><emailid>56135</emailid></email></success>");
        let passed = response.clone().error_for_remote().unwrap();
        assert_eq!(passed, response);
    }

    #[test]
    fn text_rejects_invalid_utf8() {
        assert!(matches!(
            Response::new(200, vec![0xc3, 0x28]).text(),
            Err(Error::Utf8(_))
        ));
        assert_eq!(Response::new(200, "<success>1</success>").text().unwrap(), "<success>1</success>");
    }
}
