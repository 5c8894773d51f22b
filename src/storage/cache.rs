//! Process-wide load-once cache for the skill collection.
//!
//! The first caller to find the cache empty starts a background load; every
//! caller that arrives while it is in flight waits on the same outcome. A
//! failed load is not retained as a value: the next call starts a fresh one.

use std::sync::Arc;

use parking_lot::Mutex;
use serde::Serialize;
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::core::skill::Skill;
use crate::error::LoadError;
use crate::storage::snapshot::{SnapshotSource, load_skills};

type LoadOutcome = Result<Arc<[Skill]>, LoadError>;

/// Observable state of a [`SnapshotCache`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadStatus {
    Empty,
    Loading,
    Loaded,
    Failed,
}

enum CacheState {
    Empty,
    Loading(watch::Receiver<Option<LoadOutcome>>),
    Loaded(Arc<[Skill]>),
    Failed(LoadError),
}

/// Shared handle to the cached collection. Clones share one cache.
pub struct SnapshotCache<S> {
    source: Arc<S>,
    state: Arc<Mutex<CacheState>>,
}

impl<S> Clone for SnapshotCache<S> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
            state: Arc::clone(&self.state),
        }
    }
}

impl<S: SnapshotSource> SnapshotCache<S> {
    pub fn new(source: S) -> Self {
        Self {
            source: Arc::new(source),
            state: Arc::new(Mutex::new(CacheState::Empty)),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn status(&self) -> LoadStatus {
        match &*self.state.lock() {
            CacheState::Empty => LoadStatus::Empty,
            CacheState::Loading(_) => LoadStatus::Loading,
            CacheState::Loaded(_) => LoadStatus::Loaded,
            CacheState::Failed(_) => LoadStatus::Failed,
        }
    }

    /// The collection, if a load has already completed.
    pub fn get(&self) -> Option<Arc<[Skill]>> {
        match &*self.state.lock() {
            CacheState::Loaded(skills) => Some(Arc::clone(skills)),
            _ => None,
        }
    }

    /// Error from the most recent failed load, if that is the current state.
    pub fn last_error(&self) -> Option<LoadError> {
        match &*self.state.lock() {
            CacheState::Failed(err) => Some(err.clone()),
            _ => None,
        }
    }

    /// Return the cached collection, loading it at most once per success.
    ///
    /// A snapshot without any table yields an empty collection. Any other
    /// load error is delivered to every concurrent waiter and the cache
    /// becomes eligible for a retry.
    pub async fn ensure_loaded(&self) -> Result<Arc<[Skill]>, LoadError> {
        let mut receiver = {
            let mut state = self.state.lock();
            match &*state {
                CacheState::Loaded(skills) => return Ok(Arc::clone(skills)),
                CacheState::Loading(receiver) => {
                    debug!("joining in-flight snapshot load");
                    receiver.clone()
                }
                CacheState::Empty | CacheState::Failed(_) => {
                    let (sender, receiver) = watch::channel(None);
                    *state = CacheState::Loading(receiver.clone());
                    self.spawn_load(sender);
                    receiver
                }
            }
        };

        let outcome = match receiver.wait_for(Option::is_some).await {
            Ok(outcome) => Option::clone(&outcome),
            Err(_) => None,
        };
        outcome.unwrap_or_else(|| {
            self.abandon_load(&receiver);
            Err(LoadError::SnapshotUnavailable {
                location: self.source.describe(),
                reason: "snapshot load ended without a result".to_string(),
            })
        })
    }

    fn spawn_load(&self, sender: watch::Sender<Option<LoadOutcome>>) {
        let source = Arc::clone(&self.source);
        let state = Arc::clone(&self.state);
        debug!(location = %source.describe(), "starting snapshot load");

        tokio::spawn(async move {
            let outcome: LoadOutcome = match load_skills(source.as_ref()).await {
                Ok(skills) => Ok(Arc::from(skills)),
                Err(LoadError::NoTableFound { location }) => {
                    warn!(location = %location, "snapshot has no tables; serving an empty catalog");
                    Ok(Arc::from(Vec::new()))
                }
                Err(err) => {
                    warn!(error = %err, "snapshot load failed");
                    Err(err)
                }
            };

            *state.lock() = match &outcome {
                Ok(skills) => CacheState::Loaded(Arc::clone(skills)),
                Err(err) => CacheState::Failed(err.clone()),
            };
            sender.send_replace(Some(outcome));
        });
    }

    /// Reset a load that ended without a result. A newer load started by
    /// another caller is left alone.
    fn abandon_load(&self, receiver: &watch::Receiver<Option<LoadOutcome>>) {
        let mut state = self.state.lock();
        if let CacheState::Loading(current) = &*state
            && current.same_channel(receiver)
        {
            *state = CacheState::Empty;
        }
    }
}
