//! mapfill
//!
//! Turns an indexed image into an ordered list of `/fill` rectangle commands.
//! This library exposes modules for integration testing.

pub mod error;
pub mod models;
pub mod services;
