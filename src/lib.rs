//! # Status Pages
//!
//! `status-pages` serves the pages users land on after following an email
//! confirmation link or a password reset link. The identity service performs
//! the actual confirmation or reset and then redirects to
//! `/confirmation-status?status=<code>` or `/password-reset-status?status=<code>`.
//! This service only turns the status code into a sentence.
//!
//! ## Flows
//!
//! | flow           | codes                                   |
//! |----------------|-----------------------------------------|
//! | confirmation   | `success`, `already_confirmed`, `failure` |
//! | password reset | `success`, `failure`                    |
//!
//! A missing or unknown code never produces an error page: it renders the
//! flow's `failure` message.

pub mod api;
pub mod cli;
pub mod pages;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

/// First seven characters of a commit hash, or the whole value when shorter.
#[must_use]
pub fn short_commit(hash: &str) -> &str {
    let hash = hash.trim();
    hash.get(..7).unwrap_or(hash)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_commit_truncates() {
        assert_eq!(short_commit("0123456789abcdef"), "0123456");
        assert_eq!(short_commit(" abc "), "abc");
        assert_eq!(short_commit("unknown"), "unknown");
    }

    #[test]
    fn test_git_commit_hash_format() {
        if GIT_COMMIT_HASH == "unknown" {
            // Acceptable in non-git build environments
            return;
        }
        assert!(
            GIT_COMMIT_HASH.chars().all(|c| c.is_ascii_hexdigit()),
            "GIT_COMMIT_HASH should be a hex string, got: {GIT_COMMIT_HASH}"
        );
        assert!(
            GIT_COMMIT_HASH.len() >= 7,
            "GIT_COMMIT_HASH should be at least 7 characters long, got: {GIT_COMMIT_HASH}"
        );
    }
}
