//! Toast notifications standing in for features without a server behind
//! them.
//!
//! # Components
//!
//! - [`presenter`] - `Presenter` rendering toasts and driving their
//!   enter/auto-dismiss/close lifecycle
//! - [`message_table`] - `MessageTable` mapping anchors, headings and
//!   buttons to their fixed popup copy

pub mod message_table;
pub mod presenter;

pub use message_table::{MessageTable, MessageTemplate, READ_MORE_KEY};
pub use presenter::{Presenter, Toast, ToastPhase};
