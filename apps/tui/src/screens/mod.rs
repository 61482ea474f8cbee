//! TUI screens.
//!
//! The contact list owns its own state and rendering; the detail panel is a
//! stateless view drawn beside it.

pub(crate) mod contacts;
mod details;
