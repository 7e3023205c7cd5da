//! HMAC-SHA256 request signing.
//!
//! The signature covers the full unsigned URL (scheme, host, path and query),
//! keyed by the account secret, and is appended as the last query parameter.

use crate::{Error, Result};
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

pub(crate) const PARAM_SIGNATURE: &str = "SIGNATURE";

/// Lowercase hex HMAC-SHA256 of `url` keyed by `secret_key`.
///
/// # Errors
/// Returns [`Error::Configuration`] if the MAC rejects the key. HMAC accepts keys
/// of any length, so in practice this does not happen.
pub fn sign(url: &str, secret_key: &str) -> Result<String> {
    let mut mac = HmacSha256::new_from_slice(secret_key.as_bytes())
        .map_err(|e| Error::Configuration(format!("unusable secret key: {e}")))?;
    mac.update(url.as_bytes());
    Ok(hex::encode(mac.finalize().into_bytes()))
}

/// `url` with `&SIGNATURE=<digest>` appended.
///
/// # Errors
/// See [`sign`].
pub fn signed_url(url: &str, secret_key: &str) -> Result<String> {
    let signature = sign(url, secret_key)?;
    Ok(format!("{url}&{PARAM_SIGNATURE}={signature}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    const URL: &str =
        "https://www.mailnuggets.com/users/api/add?APIUSERID=123&APIKEY=abc&THROWAWAYNAME=test";

    #[test]
    fn pinned_vector() {
        assert_eq!(
            sign(URL, "s3cr3t").unwrap(),
            "a7f596948d19f751aa9feb34375818843bdd5e3ecc13f47a75f429369fa860ba"
        );
    }

    #[test]
    fn deterministic() {
        assert_eq!(sign(URL, "s3cr3t").unwrap(), sign(URL, "s3cr3t").unwrap());
    }

    #[test]
    fn any_change_moves_the_digest() {
        let base = sign(URL, "s3cr3t").unwrap();

        let tweaked_url = URL.replace("THROWAWAYNAME=test", "THROWAWAYNAME=tesu");
        let by_url = sign(&tweaked_url, "s3cr3t").unwrap();
        assert_eq!(
            by_url,
            "24791fecd6ea42ae6a028460653f1e5355cecb4311dfd17f3c5a9b4829accc82"
        );
        assert_ne!(base, by_url);

        let by_key = sign(URL, "s3cr3u").unwrap();
        assert_eq!(
            by_key,
            "58d0355ef2a73dc5e4f565742a7d433052bf0f8f93620fbc53d3245740fb6a18"
        );
        assert_ne!(base, by_key);
    }

    #[test]
    fn signature_is_appended_last_and_secret_is_absent() {
        let signed = signed_url(URL, "s3cr3t").unwrap();
        assert!(signed.starts_with(URL));
        assert!(signed.ends_with(
            "&SIGNATURE=a7f596948d19f751aa9feb34375818843bdd5e3ecc13f47a75f429369fa860ba"
        ));
        assert!(!signed.contains("s3cr3t"));
    }

    #[test]
    fn digest_is_lowercase_hex() {
        let digest = sign(URL, "s3cr3t").unwrap();
        assert_eq!(digest.len(), 64);
        assert!(digest.chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }
}
