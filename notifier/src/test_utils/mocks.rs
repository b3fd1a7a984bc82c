//! Mock implementations of port traits
//!
//! These are in-memory implementations that can be configured for testing.
//! They record what they were asked to do so tests can verify behavior.

use async_trait::async_trait;
use serde_json::Value;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, RwLock};
use tokio::sync::Notify;

use crate::domain::entities::{GameEntry, Image, Message};
use crate::domain::ports::{
    Bot, GameFeedClient, HtmlRenderer, RepeatingTask, Session, SnapshotStore, TaskCallback,
    TaskHandle,
};
use crate::error::{FeedError, RenderError, ScheduleError, SendError, SnapshotError};

// ============================================================================
// Mock Game Feed
// ============================================================================

/// Pauses the first fetch of a `MockGameFeed` until released
#[derive(Clone, Default)]
pub struct FeedGate {
    held: Arc<Notify>,
    released: Arc<Notify>,
}

impl FeedGate {
    /// Resolves once a fetch is parked at the gate
    pub async fn wait_until_held(&self) {
        self.held.notified().await;
    }

    pub fn release(&self) {
        self.released.notify_one();
    }
}

pub struct MockGameFeed {
    body: RwLock<Value>,
    fail: bool,
    gate: Mutex<Option<FeedGate>>,
    fetch_count: AtomicUsize,
}

impl MockGameFeed {
    /// A feed answering with an empty list
    pub fn new() -> Self {
        Self::with_body(Value::Array(Vec::new()))
    }

    pub fn with_body(body: Value) -> Self {
        Self {
            body: RwLock::new(body),
            fail: false,
            gate: Mutex::new(None),
            fetch_count: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new()
        }
    }

    /// Replace the body answered by later fetches
    pub fn set_body(&self, body: Value) {
        *self.body.write().unwrap() = body;
    }

    /// Hold the next fetch until the returned gate is released
    pub fn hold(&self) -> FeedGate {
        let gate = FeedGate::default();
        *self.gate.lock().unwrap() = Some(gate.clone());
        gate
    }

    pub fn fetch_count(&self) -> usize {
        self.fetch_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl GameFeedClient for MockGameFeed {
    async fn fetch_body(&self) -> Result<Value, FeedError> {
        self.fetch_count.fetch_add(1, Ordering::SeqCst);

        let gate = self.gate.lock().unwrap().take();
        if let Some(gate) = gate {
            gate.held.notify_one();
            gate.released.notified().await;
        }

        if self.fail {
            return Err(FeedError::Api {
                status: 502,
                message: "Bad Gateway".to_string(),
            });
        }
        Ok(self.body.read().unwrap().clone())
    }
}

// ============================================================================
// Mock Renderer
// ============================================================================

/// Records rendered HTML and answers with a distinct image per call
#[derive(Clone, Default)]
pub struct MockRenderer {
    rendered: Arc<RwLock<Vec<String>>>,
    fail: bool,
}

impl MockRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// HTML documents passed to `render`, in call order
    pub fn rendered(&self) -> Vec<String> {
        self.rendered.read().unwrap().clone()
    }

    /// The image returned for the `index`-th render call
    pub fn image_for(&self, index: usize) -> Image {
        Image::png(format!("png-{}", index).into_bytes())
    }
}

#[async_trait]
impl HtmlRenderer for MockRenderer {
    async fn render(&self, html: &str) -> Result<Image, RenderError> {
        if self.fail {
            return Err(RenderError::Service {
                status: 500,
                message: "browser crashed".to_string(),
            });
        }

        let mut rendered = self.rendered.write().unwrap();
        rendered.push(html.to_string());
        Ok(self.image_for(rendered.len() - 1))
    }
}

// ============================================================================
// In-Memory Snapshot Store
// ============================================================================

#[derive(Clone, Default)]
pub struct InMemorySnapshotStore {
    games: Arc<RwLock<Option<Vec<GameEntry>>>>,
    fail_load: bool,
    fail_save: bool,
    loads: Arc<AtomicUsize>,
    saves: Arc<AtomicUsize>,
}

impl InMemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate with a stored snapshot
    pub fn with_games(self, games: Vec<GameEntry>) -> Self {
        *self.games.write().unwrap() = Some(games);
        self
    }

    pub fn failing_load(self) -> Self {
        Self {
            fail_load: true,
            ..self
        }
    }

    pub fn failing_save(self) -> Self {
        Self {
            fail_save: true,
            ..self
        }
    }

    pub fn games(&self) -> Option<Vec<GameEntry>> {
        self.games.read().unwrap().clone()
    }

    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }

    /// Number of successful saves
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SnapshotStore for InMemorySnapshotStore {
    async fn load(&self) -> Result<Option<Vec<GameEntry>>, SnapshotError> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        if self.fail_load {
            return Err(SnapshotError::Io(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "snapshot unreadable",
            )));
        }
        Ok(self.games())
    }

    async fn save(&self, games: &[GameEntry]) -> Result<(), SnapshotError> {
        if self.fail_save {
            return Err(SnapshotError::Io(std::io::Error::new(
                std::io::ErrorKind::Other,
                "disk full",
            )));
        }
        *self.games.write().unwrap() = Some(games.to_vec());
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

// ============================================================================
// Mock Bot
// ============================================================================

pub struct MockBot {
    id: String,
    fail: bool,
    sent: RwLock<Vec<(String, Message)>>,
}

impl MockBot {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            fail: false,
            sent: RwLock::new(Vec::new()),
        }
    }

    /// A bot whose every send is rejected
    pub fn failing(id: &str) -> Self {
        Self {
            fail: true,
            ..Self::new(id)
        }
    }

    /// Successfully sent `(destination, message)` pairs
    pub fn sent(&self) -> Vec<(String, Message)> {
        self.sent.read().unwrap().clone()
    }
}

#[async_trait]
impl Bot for MockBot {
    fn id(&self) -> &str {
        &self.id
    }

    async fn send_message(&self, destination: &str, message: Message) -> Result<(), SendError> {
        if self.fail {
            return Err(SendError::Rejected {
                retcode: 100,
                message: "bot offline".to_string(),
            });
        }
        self.sent
            .write()
            .unwrap()
            .push((destination.to_string(), message));
        Ok(())
    }
}

// ============================================================================
// Recording Session
// ============================================================================

#[derive(Default)]
pub struct RecordingSession {
    messages: RwLock<Vec<Message>>,
}

impl RecordingSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<Message> {
        self.messages.read().unwrap().clone()
    }

    pub fn texts(&self) -> Vec<String> {
        self.messages()
            .into_iter()
            .filter_map(|m| match m {
                Message::Text(text) => Some(text),
                Message::Image(_) => None,
            })
            .collect()
    }

    pub fn images(&self) -> Vec<Image> {
        self.messages()
            .into_iter()
            .filter_map(|m| match m {
                Message::Image(image) => Some(image),
                Message::Text(_) => None,
            })
            .collect()
    }
}

#[async_trait]
impl Session for RecordingSession {
    async fn send(&self, message: Message) -> Result<(), SendError> {
        self.messages.write().unwrap().push(message);
        Ok(())
    }
}

// ============================================================================
// Manual Scheduler
// ============================================================================

struct ScheduledTask {
    expression: String,
    callback: TaskCallback,
    cancelled: Arc<AtomicBool>,
}

/// Scheduler whose ticks are fired by the test
#[derive(Default)]
pub struct ManualScheduler {
    tasks: Mutex<Vec<ScheduledTask>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Expressions of the tasks still registered
    pub fn expressions(&self) -> Vec<String> {
        self.tasks
            .lock()
            .unwrap()
            .iter()
            .filter(|t| !t.cancelled.load(Ordering::SeqCst))
            .map(|t| t.expression.clone())
            .collect()
    }

    /// Run every registered callback once, to completion
    pub async fn tick(&self) {
        let callbacks: Vec<TaskCallback> = self
            .tasks
            .lock()
            .unwrap()
            .iter()
            .filter(|t| !t.cancelled.load(Ordering::SeqCst))
            .map(|t| Arc::clone(&t.callback))
            .collect();

        for callback in callbacks {
            callback().await;
        }
    }
}

impl RepeatingTask for ManualScheduler {
    fn schedule(
        &self,
        expression: &str,
        callback: TaskCallback,
    ) -> Result<TaskHandle, ScheduleError> {
        let cancelled = Arc::new(AtomicBool::new(false));
        self.tasks.lock().unwrap().push(ScheduledTask {
            expression: expression.to_string(),
            callback,
            cancelled: Arc::clone(&cancelled),
        });
        Ok(TaskHandle::new(move || {
            cancelled.store(true, Ordering::SeqCst)
        }))
    }
}
