//! Test helpers shared across crates in the easy-config workspace.
//!
//! Populate calls snapshot the real process environment, so tests that set or
//! clear variables must serialise those mutations. The [`env`] module offers
//! RAII guards for that, and [`os`] builds values that are not valid UTF-8.

pub mod env;
#[cfg(any(unix, windows))]
pub mod os;
