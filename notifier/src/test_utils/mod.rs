//! Test utilities
//!
//! Manual mock implementations and test fixtures for unit testing.
//!
//! Why manual mocks instead of mockall?
//! - Tests need to inspect what a port was asked to do after the fact
//! - Manual mocks are more explicit and easier to debug

pub mod fixtures;
pub mod http;
pub mod mocks;

pub use fixtures::*;
pub use http::*;
pub use mocks::*;
