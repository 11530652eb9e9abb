//! Client-side behaviors of the Saibaba Group site.
//!
//! Everything here is written against the [`dom::Dom`] and
//! [`dom::Scheduler`] traits. The browser implements them in
//! `saibaba-frontend`; [`memory`] implements them in memory for tests and
//! the headless preview.
//!
//! # Components
//!
//! - [`notifications`] - toast presenter and the contextual message table
//! - [`dispatcher`] - classifies clicks into intents and presents their popups
//! - [`behaviors`] - menu, scrolling effects, hero rotation, lazy images,
//!   link hardening, analytics and the contact form
//! - [`app`] - `SiteContext`, routing page events through all of the above
//! - [`config`] - configuration embedded in the page

pub mod app;
pub mod behaviors;
pub mod config;
pub mod dispatcher;
pub mod dom;
pub mod formatting;
pub mod memory;
pub mod notifications;
mod runtime;

pub use crate::app::SiteContext;
pub use crate::runtime::start;
