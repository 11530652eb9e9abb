//! Page event and response types shared by a page platform (the browser
//! DOM, or an in-memory stand-in) and the interaction layer behind the
//! site's navigation, scroll effects, hero rotator and placeholder
//! notifications.
//!
//! Every [`PageEvent`] goes from the platform to the interaction layer,
//! which replies with a [`Disposition`]. The reply only says whether the
//! browser's default action is suppressed.
//!
//! Nothing here touches the DOM, so the crate compiles the same on native
//! and `wasm32` targets.

pub mod config;
pub mod intent;
pub mod notification;

/// Page events forwarded by the platform to the interaction layer.
///
/// `N` is the platform's element handle type.
#[derive(Debug, Clone, PartialEq)]
pub enum PageEvent<N> {
    /// A click anywhere in the document, carrying the innermost element hit.
    Click {
        /// The element the click originated on.
        target: N,
    },
    /// The window scrolled.
    Scroll,
    /// A form was submitted.
    Submit {
        /// The submitted form element.
        form: N,
    },
    /// The window finished loading all resources.
    Load,
}

/// What the platform should do with the browser's default action for an
/// event once the interaction layer has handled it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Disposition {
    /// Let the default action happen (follow the link, submit the form).
    #[default]
    Proceed,
    /// Call `preventDefault` on the event.
    PreventDefault,
}

impl Disposition {
    /// Combines two outcomes for the same event. Suppression wins, since
    /// `preventDefault` cannot be undone by a later handler.
    #[must_use]
    pub fn merge(self, other: Disposition) -> Disposition {
        if self == Disposition::PreventDefault || other == Disposition::PreventDefault {
            Disposition::PreventDefault
        } else {
            Disposition::Proceed
        }
    }

    /// Returns `true` when the default action must be suppressed.
    #[must_use]
    pub fn is_prevented(self) -> bool {
        self == Disposition::PreventDefault
    }
}
