use sha2::{Digest, Sha256};

/// Gravatar URL derived deterministically from the email at registration.
/// Gravatar accepts SHA-256 email hashes; the email is trimmed and lowercased
/// first per their hashing rules. 200px, PG-rated, "mystery person" fallback.
pub fn gravatar_url(email: &str) -> String {
    let normalized = email.trim().to_lowercase();
    let digest = Sha256::digest(normalized.as_bytes());
    format!(
        "https://www.gravatar.com/avatar/{}?s=200&r=pg&d=mm",
        hex::encode(digest)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deterministic_for_same_email() {
        assert_eq!(
            gravatar_url("matt@example.com"),
            gravatar_url("matt@example.com")
        );
    }

    #[test]
    fn normalizes_case_and_whitespace() {
        assert_eq!(
            gravatar_url("  Matt@Example.COM "),
            gravatar_url("matt@example.com")
        );
    }

    #[test]
    fn carries_size_rating_and_default() {
        let url = gravatar_url("matt@example.com");
        assert!(url.starts_with("https://www.gravatar.com/avatar/"));
        assert!(url.ends_with("?s=200&r=pg&d=mm"));
    }
}
