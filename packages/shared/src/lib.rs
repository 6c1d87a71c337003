//! Shared utilities for the Sahaya chat application.
//!
//! This crate provides logging setup and time utilities used by both the
//! server and the client.

pub mod logger;
pub mod time;
