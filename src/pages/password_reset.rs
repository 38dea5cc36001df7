use super::{Flow, StatusCode};

/// Outcome of following a password reset link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PasswordResetStatus {
    Success,
    Failure,
}

impl StatusCode for PasswordResetStatus {
    const FLOW: Flow = Flow::PasswordReset;
    const FAILURE: Self = Self::Failure;
    const ALL: &'static [Self] = &[Self::Success, Self::Failure];

    fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Failure => "failure",
        }
    }

    fn message(self) -> &'static str {
        match self {
            Self::Success => {
                "Your password has been successfully reset! We have sent a new one to your email."
            }
            Self::Failure => "This link is no longer valid. You can request a new one in the app.",
        }
    }
}
