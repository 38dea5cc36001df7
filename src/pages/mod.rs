//! Status message lookup for the result pages.
//!
//! The identity service finishes an email confirmation or a password reset and
//! redirects the user to one of these pages with the outcome in the `status`
//! query parameter. Each flow owns a closed vocabulary of status codes and a
//! fixed message per code. Anything the flow does not recognize, including a
//! missing parameter, resolves to the flow's `failure` message.

pub mod confirmation;
pub mod link;
pub mod password_reset;
pub mod render;

pub use self::confirmation::ConfirmationStatus;
pub use self::link::result_page_url;
pub use self::password_reset::PasswordResetStatus;
pub use self::render::StatusPage;

use std::fmt;

/// Name of the query parameter carrying the status code.
pub const STATUS_QUERY_KEY: &str = "status";

/// A closed set of status codes together with the message table of one flow.
pub trait StatusCode: Copy + Sized + 'static {
    /// Result page this vocabulary belongs to.
    const FLOW: Flow;

    /// Code used whenever the incoming value is missing or unknown.
    const FAILURE: Self;

    /// Every code of the flow, in table order.
    const ALL: &'static [Self];

    /// Wire token, as found in `?status=`.
    fn as_str(self) -> &'static str;

    /// Human readable sentence shown on the page.
    fn message(self) -> &'static str;

    /// Exact, case-sensitive match against the wire tokens.
    #[must_use]
    fn parse(raw: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|code| code.as_str() == raw)
    }
}

/// Resolve the message for a raw `status` value, falling back to `failure`.
#[must_use]
pub fn resolve<S: StatusCode>(raw: Option<&str>) -> &'static str {
    resolve_code::<S>(raw).message()
}

/// Same as [`resolve`] but returns the code that was picked.
#[must_use]
pub fn resolve_code<S: StatusCode>(raw: Option<&str>) -> S {
    raw.and_then(S::parse).unwrap_or(S::FAILURE)
}

/// The two result pages served by this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Flow {
    Confirmation,
    PasswordReset,
}

impl Flow {
    pub const ALL: [Self; 2] = [Self::Confirmation, Self::PasswordReset];

    /// Route of the result page.
    #[must_use]
    pub const fn route(self) -> &'static str {
        match self {
            Self::Confirmation => "/confirmation-status",
            Self::PasswordReset => "/password-reset-status",
        }
    }

    /// Short name used on the command line.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Confirmation => "confirmation",
            Self::PasswordReset => "password-reset",
        }
    }

    /// Heading shown above the status message.
    #[must_use]
    pub const fn heading(self) -> &'static str {
        match self {
            Self::Confirmation => "Email confirmation",
            Self::PasswordReset => "Password reset",
        }
    }

    /// Resolve a raw status value using this flow's table.
    #[must_use]
    pub fn resolve(self, raw: Option<&str>) -> &'static str {
        match self {
            Self::Confirmation => resolve::<ConfirmationStatus>(raw),
            Self::PasswordReset => resolve::<PasswordResetStatus>(raw),
        }
    }

    /// Check that `raw` is a code of this flow and return its canonical token.
    #[must_use]
    pub fn status_token(self, raw: &str) -> Option<&'static str> {
        match self {
            Self::Confirmation => ConfirmationStatus::parse(raw).map(StatusCode::as_str),
            Self::PasswordReset => PasswordResetStatus::parse(raw).map(StatusCode::as_str),
        }
    }
}

impl fmt::Display for Flow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Flow {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|flow| flow.as_str() == s)
            .ok_or_else(|| format!("unknown flow: {s} (expected confirmation or password-reset)"))
    }
}
