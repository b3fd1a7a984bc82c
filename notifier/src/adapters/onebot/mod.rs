//! OneBot adapter
//!
//! Bot connections speaking the OneBot v11 HTTP API, and the reply session
//! bound to an incoming message event.

pub mod client;
pub mod session;

pub use client::OneBotClient;
pub use session::{OneBotSession, ReplyTarget};
