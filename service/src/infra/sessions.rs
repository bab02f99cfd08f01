//! Draft form [`Sessions`] registry.

use std::collections::HashMap;

use common::DateTime;
use derive_more::{Display, Error as StdError, From, FromStr, Into};
use tokio::sync::Mutex;
use uuid::Uuid;

#[cfg(doc)]
use crate::domain::Listing;
use crate::domain::Draft;

/// Registry of live draft form sessions.
///
/// Each session exclusively owns one [`Draft`] for the lifetime of one
/// editing flow. Abandoning a session ("navigating away") simply leaves it
/// untouched until the background cleanup prunes it — a draft is a UI
/// session object, not durable state.
#[derive(Debug, Default)]
pub struct Sessions {
    /// Live session entries.
    entries: Mutex<HashMap<Id, Entry>>,
}

/// Entry of a single live session.
#[derive(Debug)]
struct Entry {
    /// [`Draft`] owned by the session.
    draft: Draft,

    /// [`DateTime`] of the last interaction with the session.
    touched_at: DateTime,

    /// Indicator whether a submission of this [`Draft`] is in flight.
    ///
    /// Guards against duplicate [`Listing`]s from double-clicked submits.
    is_submitting: bool,
}

/// ID of a draft form session.
#[derive(
    Clone, Copy, Debug, Display, Eq, From, FromStr, Hash, Into, PartialEq,
)]
pub struct Id(Uuid);

impl Id {
    /// Creates a new random [`Id`].
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for Id {
    fn default() -> Self {
        Self::new()
    }
}

impl Sessions {
    /// Opens a new session owning the given [`Draft`].
    pub async fn open(&self, draft: Draft) -> Id {
        let id = Id::new();
        drop(self.entries.lock().await.insert(
            id,
            Entry {
                draft,
                touched_at: DateTime::now(),
                is_submitting: false,
            },
        ));
        id
    }

    /// Runs `f` over the [`Draft`] of the session with the given `id`,
    /// refreshing its last-interaction time.
    ///
    /// # Errors
    ///
    /// - [`Error::NotExists`] if no such session is open;
    /// - [`Error::SubmissionPending`] if the session is being submitted.
    pub async fn with<R>(
        &self,
        id: Id,
        f: impl FnOnce(&mut Draft) -> R,
    ) -> Result<R, Error> {
        let mut entries = self.entries.lock().await;
        let entry = entries.get_mut(&id).ok_or(Error::NotExists(id))?;
        if entry.is_submitting {
            return Err(Error::SubmissionPending(id));
        }
        entry.touched_at = DateTime::now();
        Ok(f(&mut entry.draft))
    }

    /// Runs `f` over the [`Draft`] of the session with the given `id`
    /// read-only, refreshing its last-interaction time.
    ///
    /// # Errors
    ///
    /// [`Error::NotExists`] if no such session is open.
    pub async fn peek<R>(
        &self,
        id: Id,
        f: impl FnOnce(&Draft) -> R,
    ) -> Result<R, Error> {
        let mut entries = self.entries.lock().await;
        let entry = entries.get_mut(&id).ok_or(Error::NotExists(id))?;
        entry.touched_at = DateTime::now();
        Ok(f(&entry.draft))
    }

    /// Checks out the [`Draft`] of the session with the given `id` for
    /// submission, marking the session as submitting.
    ///
    /// No session lock is held while the submission runs; the flag alone
    /// disables re-submission until [`Sessions::finish_submit()`] releases
    /// it.
    ///
    /// # Errors
    ///
    /// - [`Error::NotExists`] if no such session is open;
    /// - [`Error::SubmissionPending`] if a submission is already in flight.
    pub async fn begin_submit(&self, id: Id) -> Result<Draft, Error> {
        let mut entries = self.entries.lock().await;
        let entry = entries.get_mut(&id).ok_or(Error::NotExists(id))?;
        if entry.is_submitting {
            return Err(Error::SubmissionPending(id));
        }
        entry.is_submitting = true;
        entry.touched_at = DateTime::now();
        Ok(entry.draft.clone())
    }

    /// Finishes an in-flight submission of the session with the given `id`:
    /// removes the session on success, releases it for correction and retry
    /// otherwise.
    pub async fn finish_submit(&self, id: Id, succeeded: bool) {
        let mut entries = self.entries.lock().await;
        if succeeded {
            drop(entries.remove(&id));
        } else if let Some(entry) = entries.get_mut(&id) {
            entry.is_submitting = false;
            entry.touched_at = DateTime::now();
        }
    }

    /// Discards the session with the given `id` without submitting it.
    ///
    /// # Errors
    ///
    /// [`Error::NotExists`] if no such session is open.
    pub async fn discard(&self, id: Id) -> Result<(), Error> {
        self.entries
            .lock()
            .await
            .remove(&id)
            .map(drop)
            .ok_or(Error::NotExists(id))
    }

    /// Prunes the sessions not interacted with since the given `deadline`,
    /// returning the number of pruned sessions.
    ///
    /// Sessions with an in-flight submission are kept.
    pub async fn prune(&self, deadline: DateTime) -> usize {
        let mut entries = self.entries.lock().await;
        let before = entries.len();
        entries.retain(|_, e| e.is_submitting || e.touched_at >= deadline);
        before - entries.len()
    }
}

/// Error of a [`Sessions`] operation.
#[derive(Clone, Copy, Debug, Display, StdError)]
pub enum Error {
    /// No session with the given [`Id`] is open.
    #[display("draft session `{_0}` does not exist")]
    NotExists(#[error(not(source))] Id),

    /// A submission of the session is already in flight.
    #[display("draft session `{_0}` is being submitted")]
    SubmissionPending(#[error(not(source))] Id),
}

#[cfg(test)]
mod spec {
    use std::time::Duration;

    use common::DateTime;

    use crate::domain::{listing::TransactionKind, Draft};

    use super::{Error, Sessions};

    #[tokio::test]
    async fn with_touches_an_open_session() {
        let sessions = Sessions::default();
        let id = sessions.open(Draft::new()).await;

        let kind = sessions.with(id, |d| d.transaction_kind()).await.unwrap();
        assert_eq!(kind, TransactionKind::Sale);

        sessions.discard(id).await.unwrap();
        assert!(matches!(
            sessions.with(id, |_| ()).await,
            Err(Error::NotExists(_)),
        ));
    }

    #[tokio::test]
    async fn double_submission_is_rejected() {
        let sessions = Sessions::default();
        let id = sessions.open(Draft::new()).await;

        let _draft = sessions.begin_submit(id).await.unwrap();
        assert!(matches!(
            sessions.begin_submit(id).await,
            Err(Error::SubmissionPending(_)),
        ));
        assert!(matches!(
            sessions.with(id, |_| ()).await,
            Err(Error::SubmissionPending(_)),
        ));

        // A failed submission releases the session for retry.
        sessions.finish_submit(id, false).await;
        let _draft = sessions.begin_submit(id).await.unwrap();

        // A successful one removes it.
        sessions.finish_submit(id, true).await;
        assert!(matches!(
            sessions.begin_submit(id).await,
            Err(Error::NotExists(_)),
        ));
    }

    #[tokio::test]
    async fn prune_skips_live_and_submitting_sessions() {
        let sessions = Sessions::default();
        let stale = sessions.open(Draft::new()).await;
        let submitting = sessions.open(Draft::new()).await;
        let _draft = sessions.begin_submit(submitting).await.unwrap();

        let pruned =
            sessions.prune(DateTime::now() - Duration::from_secs(60)).await;
        assert_eq!(pruned, 0);

        let pruned =
            sessions.prune(DateTime::now() + Duration::from_secs(1)).await;
        assert_eq!(pruned, 1);

        assert!(matches!(
            sessions.peek(stale, |_| ()).await,
            Err(Error::NotExists(_)),
        ));
        sessions.finish_submit(submitting, true).await;
    }
}
