//! Common error handling utilities for the scribe engine
//!
//! This crate provides the error enum shared across the server crates. It
//! keeps error payloads as plain strings so no transcript or patient content
//! leaks into error chains by accident.

pub mod types;

pub use types::*;
