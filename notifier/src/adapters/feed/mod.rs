//! Free-game feed adapter
//!
//! Implementation of the feed client over HTTP.

pub mod client;

pub use client::HttpGameFeed;
