use std::fmt;

use crate::{dom::Dom, formatting::collapse_whitespace};

const BUTTON_SELECTOR: &str = ".btn";

/// A tracked user interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyticsEvent {
    pub category: String,
    pub action: String,
    pub label: String,
}

impl AnalyticsEvent {
    pub fn new(
        category: impl Into<String>,
        action: impl Into<String>,
        label: impl Into<String>,
    ) -> Self {
        Self {
            category: category.into(),
            action: action.into(),
            label: label.into(),
        }
    }
}

impl fmt::Display for AnalyticsEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {} - {}", self.category, self.action, self.label)
    }
}

/// Records `event`. There is no analytics backend; events go to the log.
pub fn track(event: &AnalyticsEvent) {
    log::info!(target: "analytics", "Event: {event}");
}

/// Tracks clicks on `.btn` elements, labelled with the button text.
pub fn handle_click<D: Dom>(dom: &D, target: &D::Node) -> Option<AnalyticsEvent> {
    let button = dom.closest(target, BUTTON_SELECTOR)?;
    let label = collapse_whitespace(&dom.text_content(&button));
    let event = AnalyticsEvent::new("Button", "Click", label);
    track(&event);
    Some(event)
}
