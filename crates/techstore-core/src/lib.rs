//! Core library for TechStore: configuration, logging, the static product
//! catalog, and the session client for the external auth service.

pub mod catalog;
pub mod config;
pub mod logging;
pub mod session;
