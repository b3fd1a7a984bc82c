//! Adapters layer
//!
//! Implementations of port traits for external systems.

pub mod cron_scheduler;
pub mod feed;
pub mod onebot;
pub mod renderer;
pub mod snapshot_file;

pub use cron_scheduler::CronScheduler;
pub use feed::HttpGameFeed;
pub use onebot::{OneBotClient, OneBotSession, ReplyTarget};
pub use renderer::HttpRenderService;
pub use snapshot_file::FileSnapshotStore;
