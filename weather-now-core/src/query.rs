//! Request lifecycle for a single place-name lookup.
//!
//! Every submission bumps an epoch. Only the submission holding the latest
//! epoch may publish its outcome; older ones are dropped at each resumption
//! point and again at commit time.

use std::sync::{Arc, Mutex, PoisonError};

use serde::Serialize;
use tokio::{sync::watch, task::JoinHandle};
use tracing::{Instrument, debug, error, info, info_span, warn};

use crate::{
    Config, QueryError, WeatherResult,
    condition::classify,
    provider::{LocationResolver, WeatherFetcher, open_meteo_from_config},
};

pub const LOCATION_FAILURE: &str = "Failed to find location";
pub const WEATHER_FAILURE: &str = "Failed to fetch weather data";

/// Observable lifecycle of the most recent submission.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(tag = "state", content = "data", rename_all = "snake_case")]
pub enum QueryState {
    #[default]
    Idle,
    Pending,
    Resolved(WeatherResult),
    Failed(String),
}

impl QueryState {
    pub fn is_pending(&self) -> bool {
        matches!(self, QueryState::Pending)
    }

    pub fn result(&self) -> Option<&WeatherResult> {
        match self {
            QueryState::Resolved(result) => Some(result),
            _ => None,
        }
    }

    pub fn failure(&self) -> Option<&str> {
        match self {
            QueryState::Failed(reason) => Some(reason),
            _ => None,
        }
    }
}

/// Orchestrates geocoding, the weather fetch and classification.
///
/// Cloning is cheap and every clone drives the same state.
#[derive(Debug, Clone)]
pub struct WeatherQuery {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    resolver: Arc<dyn LocationResolver>,
    fetcher: Arc<dyn WeatherFetcher>,
    /// Latest issued epoch. Held while publishing so the check and the write
    /// are a single step.
    epoch: Mutex<u64>,
    state: watch::Sender<QueryState>,
}

/// Handle to a submission running in the background.
#[derive(Debug)]
pub struct Submission {
    epoch: u64,
    handle: JoinHandle<()>,
    inner: Arc<Inner>,
}

impl Submission {
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Wait until the submission has either published or been discarded.
    ///
    /// A task that panicked or was cancelled leaves its epoch `Failed`
    /// rather than `Pending`, unless a newer submission took over.
    pub async fn wait(self) {
        if let Err(err) = self.handle.await {
            error!(epoch = self.epoch, error = %err, "submission task did not complete");
            self.inner
                .commit(self.epoch, QueryState::Failed(WEATHER_FAILURE.to_string()));
        }
    }
}

impl WeatherQuery {
    pub fn new(resolver: Arc<dyn LocationResolver>, fetcher: Arc<dyn WeatherFetcher>) -> Self {
        let (state, _) = watch::channel(QueryState::Idle);
        Self {
            inner: Arc::new(Inner {
                resolver,
                fetcher,
                epoch: Mutex::new(0),
                state,
            }),
        }
    }

    /// Wire up the Open-Meteo providers described by `config`.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let (resolver, fetcher) = open_meteo_from_config(config)?;
        Ok(Self::new(resolver, fetcher))
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> QueryState {
        self.inner.state.borrow().clone()
    }

    /// Receiver notified on every state transition.
    pub fn subscribe(&self) -> watch::Receiver<QueryState> {
        self.inner.state.subscribe()
    }

    /// Start a lookup for `query`.
    ///
    /// Blank input is rejected without touching the state. Otherwise the
    /// state is `Pending` by the time this returns and the lookup continues
    /// on a spawned task, so this must be called within a tokio runtime.
    pub fn submit(&self, query: &str) -> Result<Submission, QueryError> {
        if query.trim().is_empty() {
            return Err(QueryError::Input);
        }

        let epoch = self.inner.begin();
        let task = Arc::clone(&self.inner);
        let query = query.to_owned();
        let span = info_span!("submission", epoch, query = %query);

        let handle = tokio::spawn(async move { task.run(epoch, &query).await }.instrument(span));

        Ok(Submission { epoch, handle, inner: Arc::clone(&self.inner) })
    }

    /// Submit, wait for completion and return the resulting state.
    ///
    /// If another submission was issued meanwhile, the returned state is
    /// that newer submission's.
    pub async fn run(&self, query: &str) -> Result<QueryState, QueryError> {
        self.submit(query)?.wait().await;
        Ok(self.state())
    }
}

impl Inner {
    fn begin(&self) -> u64 {
        let mut epoch = self.epoch.lock().unwrap_or_else(PoisonError::into_inner);
        *epoch += 1;
        self.state.send_replace(QueryState::Pending);
        debug!(epoch = *epoch, "entered pending");
        *epoch
    }

    fn is_current(&self, epoch: u64) -> bool {
        *self.epoch.lock().unwrap_or_else(PoisonError::into_inner) == epoch
    }

    /// Publish `next` if `epoch` is still the latest. Returns whether it was.
    fn commit(&self, epoch: u64, next: QueryState) -> bool {
        let latest = self.epoch.lock().unwrap_or_else(PoisonError::into_inner);
        if *latest != epoch {
            warn!(epoch, latest = *latest, "discarding superseded outcome");
            return false;
        }
        self.state.send_replace(next);
        true
    }

    async fn run(&self, epoch: u64, query: &str) {
        let location = match self.resolver.resolve(query).await {
            Ok(location) => location,
            Err(err) => {
                warn!(error = %err, "location lookup failed");
                self.commit(epoch, QueryState::Failed(LOCATION_FAILURE.to_string()));
                return;
            }
        };

        if !self.is_current(epoch) {
            debug!("superseded after geocoding; skipping weather fetch");
            return;
        }

        let observation = match self
            .fetcher
            .fetch_observation(location.latitude, location.longitude)
            .await
        {
            Ok(observation) => observation,
            Err(err) => {
                warn!(error = %err, "weather fetch failed");
                self.commit(epoch, QueryState::Failed(WEATHER_FAILURE.to_string()));
                return;
            }
        };

        let condition = classify(observation.weather_code);
        let result = WeatherResult { location, observation, condition };

        if self.commit(epoch, QueryState::Resolved(result)) {
            info!(%condition, "weather resolved");
        }
    }
}
