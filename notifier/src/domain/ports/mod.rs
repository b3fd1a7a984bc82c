//! Domain ports (traits)
//!
//! Port traits define interfaces that the notifier requires from its host.
//! Adapters provide concrete implementations of these traits.

pub mod feed;
pub mod messaging;
pub mod renderer;
pub mod scheduler;
pub mod snapshot;

pub use feed::GameFeedClient;
pub use messaging::{Bot, Session};
pub use renderer::HtmlRenderer;
pub use scheduler::{RepeatingTask, TaskCallback, TaskHandle};
pub use snapshot::SnapshotStore;
