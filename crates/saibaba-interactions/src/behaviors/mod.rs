//! Page behaviors independent of the notification system.
//!
//! Each behavior binds to its own elements and degrades to a no-op when
//! they are missing from the page.
//!
//! # Components
//!
//! - [`mobile_menu`] - hamburger menu toggle and outside-click close
//! - [`smooth_scroll`] - offset scrolling for in-page anchors
//! - [`header_shrink`] - frame-throttled compact header
//! - [`active_nav`] - highlights the link of the section in view
//! - [`hero_slider`] - timed hero image rotation
//! - [`lazy_images`] - deferred `img[data-src]` loading
//! - [`scroll_reveal`] - fade-in of content blocks
//! - [`external_links`] - `rel` hardening for new-tab links
//! - [`analytics`] - button click tracking
//! - [`contact_form`] - contact form submission stub

pub mod active_nav;
pub mod analytics;
pub mod contact_form;
pub mod external_links;
pub mod header_shrink;
pub mod hero_slider;
pub mod lazy_images;
pub mod mobile_menu;
pub mod scroll_reveal;
pub mod smooth_scroll;

pub use active_nav::ActiveNav;
pub use analytics::AnalyticsEvent;
pub use contact_form::{ContactForm, ContactSubmission};
pub use header_shrink::HeaderShrink;
pub use hero_slider::HeroSlider;
pub use mobile_menu::MobileMenu;
pub use smooth_scroll::SmoothScroll;
