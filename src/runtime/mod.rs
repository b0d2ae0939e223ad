//! # Runtime Module
//!
//! Startup components for the image puller: tracing setup, metrics
//! registration and the one-time configuration resolution.

pub mod initialization;

pub use initialization::*;
