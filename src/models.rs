//! Record shapes returned by the MailNuggets API.
//!
//! The client itself never parses responses. These types mirror the XML element
//! names so callers can hand a [`Response`](crate::Response) body to the serde
//! XML deserializer of their choice.

use serde::Deserialize;

/// A throwaway (disposable, receive-only) address.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Throwaway {
    /// Lowercase alphanumeric local part, unique per account.
    pub name: String,
    /// Creation time, `YYYY-MM-DD HH:MM:SS`.
    #[serde(rename = "createddate", default)]
    pub created_date: String,
    /// Expiry time, `YYYY-MM-DD HH:MM:SS`.
    #[serde(rename = "expiresdate", default)]
    pub expires_date: String,
}

/// Root of a `listall` response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AllThrowaways {
    /// Every active throwaway.
    #[serde(rename = "throwaway", default)]
    pub throwaways: Vec<Throwaway>,
}

/// One entry of the 48-hour email feed.
///
/// Free-text fields arrive entity-escaped (`&lt;` for `<`); an XML
/// deserializer unescapes them.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Email {
    /// Service-assigned, monotonically increasing id.
    #[serde(rename = "emailid")]
    pub email_id: String,
    /// Subject line.
    #[serde(default)]
    pub subject: String,
    /// `Message-ID` header.
    #[serde(rename = "messageid", default)]
    pub message_id: String,
    /// Sender.
    #[serde(default)]
    pub from: String,
    /// Recipient.
    #[serde(default)]
    pub to: String,
    /// `"1"` when the email carried attachments.
    #[serde(rename = "hasattachment", default)]
    pub has_attachment: String,
    /// Receive time in Unix seconds.
    #[serde(rename = "createdtimestamp", default)]
    pub created_timestamp: String,
    /// `"1"` once the email was POSTed to the remote script.
    #[serde(rename = "postsent", default)]
    pub post_sent: String,
    /// What the remote script answered.
    #[serde(rename = "postresponse", default)]
    pub post_response: String,
}

impl Email {
    /// Whether the email carried attachments.
    pub fn has_attachment(&self) -> bool {
        flag(&self.has_attachment)
    }

    /// Whether the email has been POSTed to the remote script.
    pub fn post_sent(&self) -> bool {
        flag(&self.post_sent)
    }

    /// Receive time in Unix seconds, if the field is numeric.
    pub fn created_timestamp(&self) -> Option<u64> {
        self.created_timestamp.trim().parse().ok()
    }
}

/// Root of a `listemails` response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Emails {
    /// Emails in the feed, oldest first.
    #[serde(rename = "email", default)]
    pub emails: Vec<Email>,
}

fn flag(raw: &str) -> bool {
    matches!(raw.trim(), "1" | "true")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn email() -> Email {
        Email {
            email_id: "123456542".into(),
            subject: "Example email 1".into(),
            message_id: "abc@mail.gmail.com".into(),
            from: "Van Stokes &lt;mail@vanstokes.com&gt;".into(),
            to: "mail@apitester.mailnuggets.com".into(),
            has_attachment: "0".into(),
            created_timestamp: "1317955927".into(),
            post_sent: "1".into(),
            post_response: String::new(),
        }
    }

    #[test]
    fn flags_and_timestamp() {
        let email = email();
        assert!(!email.has_attachment());
        assert!(email.post_sent());
        assert_eq!(email.created_timestamp(), Some(1_317_955_927));
    }

    #[test]
    fn deserializes_listall_document() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
            <allthrowaways>
                <throwaway>
                    <name>846543ef</name>
                    <createddate>2010-11-23 03:31:44</createddate>
                    <expiresdate>2999-10-26 00:00:00</expiresdate>
                </throwaway>
                <throwaway>
                    <name>bb1eb24f</name>
                    <createddate>2010-11-23 03:33:24</createddate>
                    <expiresdate>2999-10-26 00:00:00</expiresdate>
                </throwaway>
            </allthrowaways>"#;

        let all: AllThrowaways = quick_xml::de::from_str(xml).unwrap();

        assert_eq!(all.throwaways.len(), 2);
        assert_eq!(
            all.throwaways[0],
            Throwaway {
                name: "846543ef".into(),
                created_date: "2010-11-23 03:31:44".into(),
                expires_date: "2999-10-26 00:00:00".into(),
            }
        );
        assert_eq!(all.throwaways[1].name, "bb1eb24f");
    }

    #[test]
    fn deserializes_email_feed() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
            <emails>
                <email>
                    <emailid>123456542</emailid>
                    <subject>Example email 1</subject>
                    <messageid>abc@mail.gmail.com</messageid>
                    <from>Van Stokes &lt;mail@vanstokes.com&gt;</from>
                    <to>mail@apitester.mailnuggets.com</to>
                    <hasattachment>0</hasattachment>
                    <createdtimestamp>1317955927</createdtimestamp>
                    <postsent>0</postsent>
                    <postresponse></postresponse>
                </email>
            </emails>"#;

        let feed: Emails = quick_xml::de::from_str(xml).unwrap();

        assert_eq!(feed.emails.len(), 1);
        let email = &feed.emails[0];
        assert_eq!(email.email_id, "123456542");
        assert_eq!(email.from, "Van Stokes <mail@vanstokes.com>");
        assert_eq!(email.created_timestamp(), Some(1_317_955_927));
        assert!(!email.has_attachment());
        assert!(!email.post_sent());
        assert_eq!(email.post_response, "");
    }

    #[test]
    fn empty_feed_deserializes() {
        let feed: Emails = quick_xml::de::from_str("<emails></emails>").unwrap();
        assert!(feed.emails.is_empty());
    }

    #[test]
    fn malformed_timestamp_is_none() {
        let mut email = email();
        email.created_timestamp = "soon".into();
        assert_eq!(email.created_timestamp(), None);
    }
}
