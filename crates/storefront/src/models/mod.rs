//! Domain types for the storefront.
//!
//! These are the validated, display-ready shapes route handlers and stores
//! work with, separate from the wire DTOs in [`crate::api::types`].

pub mod event;
pub mod order;
pub mod session;

pub use event::Event;
pub use order::{Attendee, Order, OrderLine};
pub use session::{CurrentUser, PendingLogin, session_keys};
