//! Notifier service
//!
//! Fetches the Epic free-game feed, renders the two sections to images and
//! delivers them, either as a reply to a command session or as a broadcast
//! from every bot connection to the configured group. The scheduled path
//! compares against the last pushed snapshot and only pushes on change.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use futures_util::FutureExt;

use crate::app::commands::CommandHandler;
use crate::domain::entities::{
    canonical_json, classify, games_from_body, GameEntry, Image, Message,
};
use crate::domain::ports::{
    Bot, GameFeedClient, HtmlRenderer, RepeatingTask, Session, SnapshotStore, TaskCallback,
    TaskHandle,
};
use crate::error::{FeedError, NotifierError, RenderError, ScheduleError, SendError};
use crate::render::{build_html, NOW_FREE_TITLE, UPCOMING_TITLE};

/// Acknowledgement sent before the command starts fetching
pub const WAIT_MESSAGE: &str = "Fetching Epic free games, please wait...";
/// Reply when the feed returned no entries
pub const NO_DATA_MESSAGE: &str = "No game data found.";
/// Reply when fetching or rendering failed
pub const FAILURE_MESSAGE: &str = "Failed to fetch Epic free games, please try again later.";

/// Result of a fetch
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    Games(Vec<GameEntry>),
    /// The feed answered with an empty list
    NoData,
}

/// Result of one bot connection's delivery attempt
#[derive(Debug)]
pub struct DeliveryOutcome {
    pub bot_id: String,
    pub result: Result<(), SendError>,
}

impl DeliveryOutcome {
    pub fn is_delivered(&self) -> bool {
        self.result.is_ok()
    }
}

/// What `send_games` did
#[derive(Debug)]
pub enum Delivery {
    /// Both images went to the command session
    Replied,
    /// Per-bot results of the group broadcast
    Broadcast(Vec<DeliveryOutcome>),
    /// No session and no destination configured
    Skipped,
}

/// Result of one scheduled cycle
#[derive(Debug)]
pub enum CycleOutcome {
    /// A previous cycle was still running
    Overlapping,
    NoData,
    /// Fresh data matched the snapshot
    Unchanged,
    Pushed {
        deliveries: Vec<DeliveryOutcome>,
        /// Whether the new snapshot was stored
        persisted: bool,
    },
    /// The cycle aborted on a fetch or render error
    Failed,
}

enum Target<'a> {
    Session(&'a dyn Session),
    Group(&'a str),
}

/// Clears the in-progress flag even if the cycle future is dropped
struct CycleGuard<'a>(&'a AtomicBool);

impl Drop for CycleGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Service for fetching, rendering and delivering free-game notices
pub struct NotifierService<F, R, S>
where
    F: GameFeedClient,
    R: HtmlRenderer,
    S: SnapshotStore,
{
    feed: Arc<F>,
    renderer: Arc<R>,
    snapshots: Arc<S>,
    bots: Vec<Arc<dyn Bot>>,
    group_id: Option<String>,
    cycle_running: AtomicBool,
}

impl<F, R, S> NotifierService<F, R, S>
where
    F: GameFeedClient,
    R: HtmlRenderer,
    S: SnapshotStore,
{
    pub fn new(
        feed: Arc<F>,
        renderer: Arc<R>,
        snapshots: Arc<S>,
        bots: Vec<Arc<dyn Bot>>,
        group_id: Option<String>,
    ) -> Self {
        Self {
            feed,
            renderer,
            snapshots,
            bots,
            group_id,
            cycle_running: AtomicBool::new(false),
        }
    }

    /// Fetch the current entry list
    ///
    /// An empty list is reported as `FetchOutcome::NoData`; transport and
    /// body decoding failures are logged and returned.
    pub async fn fetch_games(&self) -> Result<FetchOutcome, FeedError> {
        let games = match self.feed.fetch_body().await {
            Ok(body) => games_from_body(body),
            Err(e) => {
                tracing::error!(error = %e, "Failed to fetch Epic free games");
                return Err(e);
            }
        };

        if games.is_empty() {
            tracing::info!("No game data returned by the feed");
            return Ok(FetchOutcome::NoData);
        }

        tracing::debug!(count = games.len(), "Fetched Epic free games");
        Ok(FetchOutcome::Games(games))
    }

    /// Render both sections and deliver them
    ///
    /// With a session the images are replies; otherwise they are broadcast
    /// to the configured group through every bot. Without either this is a
    /// no-op and nothing is rendered.
    pub async fn send_games(
        &self,
        games: &[GameEntry],
        session: Option<&dyn Session>,
    ) -> Result<Delivery, NotifierError> {
        let target = match (session, self.group_id.as_deref()) {
            (Some(session), _) => Target::Session(session),
            (None, Some(group_id)) => Target::Group(group_id),
            (None, None) => return Ok(Delivery::Skipped),
        };

        let (now_free, upcoming) = self.render_sections(games).await?;

        match target {
            Target::Session(session) => {
                session.send(Message::Image(now_free)).await?;
                session.send(Message::Image(upcoming)).await?;
                Ok(Delivery::Replied)
            }
            Target::Group(group_id) => Ok(Delivery::Broadcast(
                self.broadcast(group_id, &[now_free, upcoming]).await,
            )),
        }
    }

    async fn render_sections(&self, games: &[GameEntry]) -> Result<(Image, Image), RenderError> {
        let classified = classify(games);

        let now_free_html = build_html(NOW_FREE_TITLE, &classified.now_free);
        let upcoming_html = build_html(UPCOMING_TITLE, &classified.upcoming);

        let now_free = self.renderer.render(&now_free_html).await?;
        let upcoming = self.renderer.render(&upcoming_html).await?;

        Ok((now_free, upcoming))
    }

    async fn broadcast(&self, group_id: &str, images: &[Image]) -> Vec<DeliveryOutcome> {
        let mut outcomes = Vec::with_capacity(self.bots.len());

        for bot in &self.bots {
            let result = push_images(bot.as_ref(), group_id, images).await;
            match &result {
                Ok(()) => tracing::debug!(bot = bot.id(), group_id, "Pushed free games"),
                Err(e) => tracing::error!(
                    bot = bot.id(),
                    group_id,
                    error = %e,
                    "Failed to push free games"
                ),
            }
            outcomes.push(DeliveryOutcome {
                bot_id: bot.id().to_string(),
                result,
            });
        }

        outcomes
    }

    /// Command path: acknowledge, fetch and reply with both images
    pub async fn handle_command(&self, session: &dyn Session) {
        reply(session, WAIT_MESSAGE).await;

        let result = match self.fetch_games().await {
            Ok(FetchOutcome::Games(games)) => self.send_games(&games, Some(session)).await,
            Ok(FetchOutcome::NoData) => {
                reply(session, NO_DATA_MESSAGE).await;
                return;
            }
            Err(e) => Err(e.into()),
        };

        if let Err(e) = result {
            tracing::error!(error = %e, "Free-game command failed");
            reply(session, FAILURE_MESSAGE).await;
        }
    }

    /// Scheduled path: push to the group only when the feed changed
    ///
    /// Never fails; errors are logged and reported as `CycleOutcome::Failed`.
    /// A tick arriving while a previous cycle still runs is skipped.
    pub async fn run_scheduled_cycle(&self) -> CycleOutcome {
        if self.cycle_running.swap(true, Ordering::AcqRel) {
            tracing::warn!("Previous free-game cycle still running, skipping this tick");
            return CycleOutcome::Overlapping;
        }
        let _guard = CycleGuard(&self.cycle_running);

        match self.scheduled_cycle().await {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::error!(error = %e, "Scheduled free-game push failed");
                CycleOutcome::Failed
            }
        }
    }

    async fn scheduled_cycle(&self) -> Result<CycleOutcome, NotifierError> {
        let previous = self.load_snapshot().await;

        let games = match self.fetch_games().await? {
            FetchOutcome::Games(games) => games,
            FetchOutcome::NoData => return Ok(CycleOutcome::NoData),
        };

        let fresh = canonical_json(&games)?;
        let last = previous.as_deref().map(canonical_json).transpose()?;
        if last.as_deref() == Some(fresh.as_str()) {
            tracing::info!("Epic free games unchanged");
            return Ok(CycleOutcome::Unchanged);
        }

        tracing::info!(count = games.len(), "Epic free games updated, pushing");
        let deliveries = match self.send_games(&games, None).await? {
            Delivery::Broadcast(outcomes) => outcomes,
            Delivery::Replied | Delivery::Skipped => Vec::new(),
        };

        tracing::info!(
            bots = deliveries.len(),
            delivered = deliveries.iter().filter(|d| d.is_delivered()).count(),
            "Free-game push finished"
        );

        let persisted = match self.snapshots.save(&games).await {
            Ok(()) => true,
            Err(e) => {
                tracing::error!(error = %e, "Failed to store free-game snapshot");
                false
            }
        };

        Ok(CycleOutcome::Pushed {
            deliveries,
            persisted,
        })
    }

    async fn load_snapshot(&self) -> Option<Vec<GameEntry>> {
        match self.snapshots.load().await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read snapshot, treating as first run");
                None
            }
        }
    }
}

impl<F, R, S> NotifierService<F, R, S>
where
    F: GameFeedClient + 'static,
    R: HtmlRenderer + 'static,
    S: SnapshotStore + 'static,
{
    /// Register the scheduled cycle with a repeating-task capability
    pub fn register_schedule<T: RepeatingTask + ?Sized>(
        self: &Arc<Self>,
        scheduler: &T,
        expression: &str,
    ) -> Result<TaskHandle, ScheduleError> {
        let service = Arc::clone(self);
        let callback: TaskCallback = Arc::new(move || {
            let service = Arc::clone(&service);
            async move {
                service.run_scheduled_cycle().await;
            }
            .boxed()
        });

        let handle = scheduler.schedule(expression, callback)?;
        tracing::info!(schedule = expression, "Scheduled free-game push registered");
        Ok(handle)
    }
}

#[async_trait]
impl<F, R, S> CommandHandler for NotifierService<F, R, S>
where
    F: GameFeedClient,
    R: HtmlRenderer,
    S: SnapshotStore,
{
    async fn handle(&self, session: Arc<dyn Session>) {
        self.handle_command(session.as_ref()).await;
    }
}

async fn push_images(bot: &dyn Bot, group_id: &str, images: &[Image]) -> Result<(), SendError> {
    for image in images {
        bot.send_message(group_id, Message::Image(image.clone())).await?;
    }
    Ok(())
}

async fn reply(session: &dyn Session, text: &str) {
    if let Err(e) = session.send(Message::text(text)).await {
        tracing::warn!(error = %e, "Failed to reply to command session");
    }
}
