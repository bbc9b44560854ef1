//! Flash Message Transport
//!
//! One-shot user messages carried across a redirect in the query string
//! instead of server-side session state. The message travels with a SHA-256
//! tag over the secret key, so a hand-crafted `?flash=` parameter without the
//! secret is ignored at render time.

use sha2::{Digest, Sha256};

/// Tag for a flash message under the given secret.
pub fn flash_tag(secret: &str, message: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(secret.as_bytes());
    // Domain separator between secret and message.
    hasher.update([0u8]);
    hasher.update(message.as_bytes());
    hex::encode(hasher.finalize())
}

/// Accepts a message only if its tag was produced with the same secret.
pub fn verify_flash(secret: &str, message: &str, tag: &str) -> bool {
    flash_tag(secret, message) == tag
}

/// Redirect target for the index page carrying a flashed message.
pub fn flash_redirect_target(secret: &str, message: &str) -> String {
    format!(
        "/?flash={}&tag={}",
        urlencoding::encode(message),
        flash_tag(secret, message)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_roundtrip() {
        let tag = flash_tag("s3cret", "Data saved successfully.");
        assert!(verify_flash("s3cret", "Data saved successfully.", &tag));
    }

    #[test]
    fn test_tampered_message_rejected() {
        let tag = flash_tag("s3cret", "Data saved successfully.");
        assert!(!verify_flash("s3cret", "Dados apagados.", &tag));
        assert!(!verify_flash("s3cret", "Data saved successfully.", "deadbeef"));
    }

    #[test]
    fn test_different_secrets_disagree() {
        let tag = flash_tag("secret-a", "Invalid signs.");
        assert!(!verify_flash("secret-b", "Invalid signs.", &tag));
    }

    #[test]
    fn test_redirect_target_is_percent_encoded() {
        let target = flash_redirect_target("s3cret", "Invalid signs.");
        assert!(target.starts_with("/?flash=Invalid%20signs."));
        assert!(target.contains("&tag="));
    }
}
