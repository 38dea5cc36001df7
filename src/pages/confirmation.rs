use super::{Flow, StatusCode};

/// Outcome of following an email confirmation link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfirmationStatus {
    Success,
    AlreadyConfirmed,
    Failure,
}

impl StatusCode for ConfirmationStatus {
    const FLOW: Flow = Flow::Confirmation;
    const FAILURE: Self = Self::Failure;
    const ALL: &'static [Self] = &[Self::Success, Self::AlreadyConfirmed, Self::Failure];

    fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::AlreadyConfirmed => "already_confirmed",
            Self::Failure => "failure",
        }
    }

    fn message(self) -> &'static str {
        match self {
            Self::Success => "Your email has been successfully confirmed!",
            Self::AlreadyConfirmed => "Your email is already confirmed.",
            Self::Failure => {
                "This confirmation link is no longer valid. You can request a new one in the app."
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pages::resolve;

    #[test]
    fn success() {
        assert_eq!(
            resolve::<ConfirmationStatus>(Some("success")),
            "Your email has been successfully confirmed!"
        );
    }

    #[test]
    fn already_confirmed() {
        assert_eq!(
            resolve::<ConfirmationStatus>(Some("already_confirmed")),
            "Your email is already confirmed."
        );
    }

    #[test]
    fn failure_and_missing_share_a_message() {
        let expected =
            "This confirmation link is no longer valid. You can request a new one in the app.";
        assert_eq!(resolve::<ConfirmationStatus>(Some("failure")), expected);
        assert_eq!(resolve::<ConfirmationStatus>(None), expected);
    }
}
