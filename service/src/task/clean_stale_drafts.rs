//! [`CleanStaleDrafts`] [`Task`].

use std::{convert::Infallible, error::Error, time};

use common::{
    operations::{By, Perform, Start},
    DateTime,
};
use tokio::time::interval;
use tracing as log;

#[cfg(doc)]
use crate::domain::Draft;
use crate::Service;

use super::Task;

/// Configuration for [`CleanStaleDrafts`] [`Task`].
#[derive(Clone, Copy, Debug)]
pub struct Config {
    /// Interval between cleaning passes.
    pub interval: time::Duration,

    /// Timeout after which an untouched draft session is considered
    /// abandoned.
    pub timeout: time::Duration,
}

/// [`Task`] for pruning abandoned draft form sessions.
///
/// Navigating away abandons the in-progress [`Draft`] with no save; this
/// task is what eventually reclaims it.
#[derive(Clone, Copy, Debug)]
pub struct CleanStaleDrafts<S> {
    /// [`Config`] of this [`Task`].
    config: Config,

    /// [`Service`] instance.
    service: S,
}

impl<S, M> Task<Start<By<CleanStaleDrafts<Self>, Config>>> for Service<S, M>
where
    CleanStaleDrafts<Service<S, M>>:
        Task<Perform<()>, Ok = (), Err: Error> + Send + Sync + 'static,
    Self: Clone,
{
    type Ok = ();
    type Err = Infallible;

    async fn execute(
        &self,
        Start(by): Start<By<CleanStaleDrafts<Self>, Config>>,
    ) -> Result<Self::Ok, Self::Err> {
        let config = by.into_inner();
        let task = CleanStaleDrafts {
            config,
            service: self.clone(),
        };

        let mut interval = interval(task.config.interval);
        loop {
            let _ = interval.tick().await;
            _ = task.execute(Perform(())).await.map_err(|e| {
                log::error!("`task::CleanStaleDrafts` failed: {e}");
            });
        }
    }
}

impl<S, M> Task<Perform<()>> for CleanStaleDrafts<Service<S, M>> {
    type Ok = ();
    type Err = Infallible;

    async fn execute(&self, _: Perform<()>) -> Result<Self::Ok, Self::Err> {
        let deadline = DateTime::now() - self.config.timeout;
        let pruned = self.service.sessions().prune(deadline).await;
        if pruned > 0 {
            log::debug!("pruned {pruned} abandoned draft session(s)");
        }
        Ok(())
    }
}
