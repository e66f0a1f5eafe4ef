//! Live schedule feed for one followed team.
//!
//! A [`GameFeed`] owns at most one [`SyncSession`]. The session owns the
//! polling task; dropping it aborts the task. Results are published through a
//! `watch` channel so every subscriber sees whole snapshots only.
use crate::client::{ApiResult, HomecourtApi, normalize_schedule};
use crate::wire::RawGame;
use crate::{DisplayGame, teams};
use chrono::{DateTime, Utc};
use log::{debug, warn};
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};

pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(60);
const MIN_REFRESH_INTERVAL: Duration = Duration::from_millis(1);

/// Anything that can answer "what are this team's next games".
pub trait ScheduleSource: Send + Sync + 'static {
    fn fetch_schedule(&self, team_key: &str) -> impl Future<Output = ApiResult<Vec<RawGame>>> + Send;
}

impl ScheduleSource for HomecourtApi {
    fn fetch_schedule(&self, team_key: &str) -> impl Future<Output = ApiResult<Vec<RawGame>>> + Send {
        HomecourtApi::fetch_schedule(self, team_key)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FeedConfig {
    pub refresh_interval: Duration,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self { refresh_interval: DEFAULT_REFRESH_INTERVAL }
    }
}

/// What subscribers observe. Replaced wholesale on every publish.
#[derive(Debug, Clone, Default)]
pub struct FeedSnapshot {
    /// Team the games belong to; `None` before the first selection.
    pub team: Option<String>,
    pub games: Arc<Vec<DisplayGame>>,
    /// Bumped on every change, including the reset when the team changes.
    pub revision: u64,
    pub last_refreshed: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedError {
    EmptyTeam,
}

impl fmt::Display for FeedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedError::EmptyTeam => write!(f, "no team selected"),
        }
    }
}

impl std::error::Error for FeedError {}

/// One active subscription: a team plus the task polling for it.
#[derive(Debug)]
pub struct SyncSession {
    team: String,
    request_key: String,
    task: JoinHandle<()>,
}

impl SyncSession {
    pub fn team(&self) -> &str {
        &self.team
    }

    /// The key sent upstream: the team's code, or the raw selection.
    pub fn request_key(&self) -> &str {
        &self.request_key
    }
}

impl Drop for SyncSession {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// State shared between the feed and its polling task.
#[derive(Debug)]
struct Shared {
    snapshot: watch::Sender<FeedSnapshot>,
    /// Only cycles started under the current epoch may publish. Read and
    /// written while holding the watch lock.
    epoch: AtomicU64,
}

impl Shared {
    /// Invalidate in-flight cycles. With `Some(team)` the snapshot is also
    /// reset to an empty list for that team.
    fn begin_epoch(&self, team: Option<&str>) -> u64 {
        let mut epoch = 0;
        self.snapshot.send_if_modified(|snapshot| {
            epoch = self.epoch.fetch_add(1, Ordering::SeqCst) + 1;
            let Some(team) = team else {
                return false;
            };
            *snapshot = FeedSnapshot {
                team: Some(team.to_owned()),
                games: Arc::default(),
                revision: snapshot.revision + 1,
                last_refreshed: None,
            };
            true
        });
        epoch
    }

    fn publish(&self, epoch: u64, games: Vec<DisplayGame>) -> bool {
        self.snapshot.send_if_modified(|snapshot| {
            if self.epoch.load(Ordering::SeqCst) != epoch {
                return false;
            }
            snapshot.games = Arc::new(games);
            snapshot.revision += 1;
            snapshot.last_refreshed = Some(Utc::now());
            true
        })
    }
}

/// Keeps the displayed schedule for one team fresh.
pub struct GameFeed<S: ScheduleSource> {
    source: Arc<S>,
    config: FeedConfig,
    shared: Arc<Shared>,
    session: Option<SyncSession>,
}

impl<S: ScheduleSource> GameFeed<S> {
    pub fn new(source: S, config: FeedConfig) -> Self {
        let (snapshot, _) = watch::channel(FeedSnapshot::default());
        Self {
            source: Arc::new(source),
            config: FeedConfig {
                refresh_interval: config.refresh_interval.max(MIN_REFRESH_INTERVAL),
            },
            shared: Arc::new(Shared { snapshot, epoch: AtomicU64::new(0) }),
            session: None,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<FeedSnapshot> {
        self.shared.snapshot.subscribe()
    }

    pub fn snapshot(&self) -> FeedSnapshot {
        self.shared.snapshot.borrow().clone()
    }

    /// Most recently published games.
    pub fn last_games(&self) -> Arc<Vec<DisplayGame>> {
        self.shared.snapshot.borrow().games.clone()
    }

    pub fn session(&self) -> Option<&SyncSession> {
        self.session.as_ref()
    }

    pub fn is_running(&self) -> bool {
        self.session.is_some()
    }

    pub fn active_team(&self) -> Option<&str> {
        self.session.as_ref().map(SyncSession::team)
    }

    /// Follow `team`: fetch now, then every refresh interval.
    ///
    /// A blank team stops any running session and is rejected before a
    /// request is made. Starting the team that is already running is a no-op.
    /// Must be called from within a tokio runtime.
    pub fn start(&mut self, team: &str) -> Result<(), FeedError> {
        let team = team.trim();
        if team.is_empty() {
            self.stop();
            return Err(FeedError::EmptyTeam);
        }
        if self.active_team() == Some(team) {
            return Ok(());
        }

        self.stop();
        let epoch = self.shared.begin_epoch(Some(team));
        self.spawn_session(team, epoch);
        Ok(())
    }

    /// Restart the current session so it fetches immediately. Keeps the
    /// games already on screen until the new cycle publishes.
    pub fn refresh(&mut self) {
        let Some(session) = self.session.take() else {
            return;
        };
        let epoch = self.shared.begin_epoch(None);
        let team = session.team.clone();
        drop(session);
        self.spawn_session(&team, epoch);
    }

    /// Cancel the polling task. Safe to call at any time.
    pub fn stop(&mut self) {
        if let Some(session) = self.session.take() {
            self.shared.begin_epoch(None);
            debug!("stopped schedule feed for {}", session.team);
        }
    }

    fn spawn_session(&mut self, team: &str, epoch: u64) {
        let request_key = teams::name_to_code(team)
            .map(str::to_owned)
            .unwrap_or_else(|| team.to_owned());
        let refresh_interval = self.config.refresh_interval;

        debug!("starting schedule feed for {team} ({request_key}) every {refresh_interval:?}");
        let task = tokio::spawn(poll_schedule(
            self.source.clone(),
            self.shared.clone(),
            request_key.clone(),
            epoch,
            refresh_interval,
        ));

        self.session = Some(SyncSession {
            team: team.to_owned(),
            request_key,
            task,
        });
    }
}

impl<S: ScheduleSource> Drop for GameFeed<S> {
    fn drop(&mut self) {
        self.stop();
    }
}

async fn poll_schedule<S: ScheduleSource>(
    source: Arc<S>,
    shared: Arc<Shared>,
    request_key: String,
    epoch: u64,
    refresh_interval: Duration,
) {
    let mut ticker = interval(refresh_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        // First tick completes immediately.
        ticker.tick().await;
        run_cycle(source.as_ref(), &shared, &request_key, epoch).await;
    }
}

/// One fetch-normalize-publish pass. Failures leave the snapshot untouched.
async fn run_cycle<S: ScheduleSource>(source: &S, shared: &Shared, request_key: &str, epoch: u64) {
    match source.fetch_schedule(request_key).await {
        Ok(raw) => {
            let games = normalize_schedule(request_key, &raw);
            let count = games.len();
            if shared.publish(epoch, games) {
                debug!("published {count} games for {request_key}");
            } else {
                debug!("discarded stale schedule for {request_key}");
            }
        }
        Err(e) => warn!("schedule refresh for {request_key} failed: {e}"),
    }
}
