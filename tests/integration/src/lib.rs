//! Integration test utilities for the Rextrix API
//!
//! This crate provides helpers for running end-to-end tests against
//! a live server bound to a loopback port.

pub mod helpers;
pub mod fixtures;

pub use helpers::*;
pub use fixtures::*;
