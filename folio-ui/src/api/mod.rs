//! Relay and auth provider calls.

pub mod client;

pub use client::*;
