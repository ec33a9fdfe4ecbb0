//! Feature slices for the TUI.

pub mod auth;
pub mod catalog;
pub mod nav;
