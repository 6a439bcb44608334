//! API middleware stack.
//!
//! A single layer: access logging, applied to the whole router so
//! every request (including 404s) produces one log line.

pub mod access;
