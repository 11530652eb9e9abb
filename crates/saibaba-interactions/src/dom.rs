//! Platform traits the behaviors are written against.
//!
//! [`Dom`] mirrors the subset of the document API the site needs and
//! [`Scheduler`] the browser's timer and frame queues. The browser platform
//! lives in the frontend crate; [`crate::memory`] provides an in-memory one.

use std::time::Duration;

/// Errors raised by a page platform.
#[derive(Debug, thiserror::Error)]
pub enum DomError {
    /// The document has no `<body>` to attach nodes to.
    #[error("document has no body")]
    MissingBody,
    /// The platform refused to create an element.
    #[error("failed to create <{0}> element")]
    CreateElement(String),
    /// A platform capability is not available in this environment.
    #[error("{0} is not supported")]
    Unsupported(&'static str),
    /// The platform refused to queue an animation frame.
    #[error("animation frame request rejected: {0}")]
    FrameRejected(String),
}

/// Whether an intersection callback wants to keep watching its element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Observation {
    /// Keep observing.
    Keep,
    /// Stop observing this element.
    Release,
}

/// Parameters of an intersection observer.
#[derive(Debug, Clone, PartialEq)]
pub struct ObserverOptions {
    /// Visible fraction at which the callback fires.
    pub threshold: f64,
    /// CSS margin around the viewport.
    pub root_margin: String,
}

impl Default for ObserverOptions {
    fn default() -> Self {
        Self {
            threshold: 0.0,
            root_margin: "0px".to_owned(),
        }
    }
}

/// Callback invoked when an observed element enters the viewport.
pub type IntersectionCallback<N> = Box<dyn FnMut(&N) -> Observation>;

/// Read and write access to the live document.
///
/// All methods take `&self`: the document is a single shared tree mutated
/// from one thread, like the browser's. Lookups on absent elements return
/// `None` or empty collections rather than failing.
pub trait Dom {
    /// Handle to an element. Equality is element identity.
    type Node: Clone + PartialEq + std::fmt::Debug + 'static;

    /// The document body.
    fn body(&self) -> Option<Self::Node>;
    /// First element in document order matching `selector`.
    fn query(&self, selector: &str) -> Option<Self::Node>;
    /// All elements in document order matching `selector`.
    fn query_all(&self, selector: &str) -> Vec<Self::Node>;
    /// First descendant of `scope` matching `selector`.
    fn query_in(&self, scope: &Self::Node, selector: &str) -> Option<Self::Node>;
    /// All descendants of `scope` matching `selector`.
    fn query_all_in(&self, scope: &Self::Node, selector: &str) -> Vec<Self::Node>;
    /// Element whose `id` attribute equals `id`.
    fn element_by_id(&self, id: &str) -> Option<Self::Node>;
    /// `node` itself or its nearest ancestor matching `selector`.
    fn closest(&self, node: &Self::Node, selector: &str) -> Option<Self::Node>;

    fn attribute(&self, node: &Self::Node, name: &str) -> Option<String>;
    fn set_attribute(&self, node: &Self::Node, name: &str, value: &str);
    fn has_class(&self, node: &Self::Node, class: &str) -> bool;
    fn add_class(&self, node: &Self::Node, class: &str);
    fn remove_class(&self, node: &Self::Node, class: &str);
    /// Sets an inline style property.
    fn set_style(&self, node: &Self::Node, property: &str, value: &str);
    /// Concatenated text of the element and its descendants.
    fn text_content(&self, node: &Self::Node) -> String;

    /// Creates a detached element.
    fn create_element(&self, tag: &str) -> Result<Self::Node, DomError>;
    /// Replaces the element's children with a single text node.
    fn set_text(&self, node: &Self::Node, text: &str);
    fn append_child(&self, parent: &Self::Node, child: &Self::Node);
    /// Detaches the element from the document. Detaching twice is a no-op.
    fn remove(&self, node: &Self::Node);

    /// Top of the element's border box relative to the viewport.
    fn bounding_top(&self, node: &Self::Node) -> f64;
    /// Top of the element relative to the document.
    fn offset_top(&self, node: &Self::Node) -> f64;
    /// Current vertical scroll position of the window.
    fn scroll_y(&self) -> f64;
    /// Smoothly scrolls the window to `top`.
    fn scroll_to(&self, top: f64);

    /// Value of the named field inside `form`.
    fn form_value(&self, form: &Self::Node, field: &str) -> Option<String>;
    /// Restores the form's fields to their initial values.
    fn reset_form(&self, form: &Self::Node);

    fn supports_intersection_observer(&self) -> bool;
    /// Watches `targets` and invokes `on_enter` each time one of them starts
    /// intersecting the viewport. Elements for which the callback returns
    /// [`Observation::Release`] are no longer watched.
    fn observe_intersections(
        &self,
        targets: &[Self::Node],
        options: &ObserverOptions,
        on_enter: IntersectionCallback<Self::Node>,
    ) -> Result<(), DomError>;
}

/// The event loop's timer and frame queues.
///
/// There is no cancellation: a scheduled callback always runs.
pub trait Scheduler {
    /// Runs `callback` once after `delay`.
    fn set_timeout(&self, delay: Duration, callback: Box<dyn FnOnce()>);
    /// Runs `callback` every `period`, forever.
    fn set_interval(&self, period: Duration, callback: Box<dyn FnMut()>);
    /// Runs `callback` before the next repaint. On error the callback is
    /// dropped and will never run.
    fn request_animation_frame(&self, callback: Box<dyn FnOnce()>) -> Result<(), DomError>;
}

/// Strips the leading `#` of an in-page href and returns the fragment, or
/// `None` for hrefs that do not name a fragment (`#`, `#!`, external URLs).
pub fn fragment_id(href: &str) -> Option<&str> {
    let fragment = href.strip_prefix('#')?;
    if fragment.is_empty() || fragment == "!" {
        None
    } else {
        Some(fragment)
    }
}

/// Looks up the element an in-page href points at.
///
/// Always queried live so that content added later takes over from
/// placeholders.
pub fn anchor_target<D: Dom>(dom: &D, href: &str) -> Option<D::Node> {
    fragment_id(href).and_then(|id| dom.element_by_id(id))
}
