/// Severity of a user-visible notification.
///
/// Determines the toast's visual styling through the
/// `notification-{severity}` class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    /// Neutral informational message. Used for placeholder popups.
    #[default]
    Info,
    /// Indicates a successful operation or a positive call to action.
    Success,
}

impl Severity {
    /// Returns the lowercase name used in the toast's class list.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Success => "success",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// A notification payload handed to the presenter.
///
/// Created on demand by a handler and consumed immediately; it has no
/// identity beyond the toast node rendered from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationRequest {
    /// Bold heading of the toast.
    pub title: String,
    /// Body text of the toast.
    pub message: String,
    /// Severity, determining the toast's visual style.
    pub severity: Severity,
}

impl NotificationRequest {
    /// Creates a request with the given severity.
    pub fn new(title: impl Into<String>, message: impl Into<String>, severity: Severity) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            severity,
        }
    }

    /// Creates an informational request.
    pub fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(title, message, Severity::Info)
    }

    /// Creates a success request.
    pub fn success(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(title, message, Severity::Success)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_set_correct_severity() {
        assert_eq!(NotificationRequest::info("a", "b").severity, Severity::Info);
        assert_eq!(
            NotificationRequest::success("a", "b").severity,
            Severity::Success
        );
    }

    #[test]
    fn severity_class_names() {
        assert_eq!(Severity::Info.to_string(), "info");
        assert_eq!(Severity::Success.as_str(), "success");
    }
}
