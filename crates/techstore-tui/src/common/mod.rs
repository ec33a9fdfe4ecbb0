//! Shared helpers for the TUI.

pub mod text;

pub use text::truncate_with_ellipsis;
