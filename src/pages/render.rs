use super::Flow;
use askama::Template;

/// Id of the element that receives the status message.
pub const DISPLAY_TARGET_ID: &str = "statusMessage";

/// A result page with its message already resolved.
///
/// The message is picked once, when the page is built, and never changes
/// afterwards; rendering the same page twice yields the same document.
#[derive(Template, Debug, Clone, PartialEq, Eq)]
#[template(path = "status.html")]
pub struct StatusPage<'a> {
    flow: Flow,
    title: &'a str,
    message: &'static str,
}

impl<'a> StatusPage<'a> {
    #[must_use]
    pub fn new(flow: Flow, title: &'a str, status: Option<&str>) -> Self {
        Self {
            flow,
            title,
            message: flow.resolve(status),
        }
    }

    #[must_use]
    pub const fn flow(&self) -> Flow {
        self.flow
    }

    #[must_use]
    pub const fn message(&self) -> &'static str {
        self.message
    }
}
