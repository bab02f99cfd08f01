//! [`Command`] for discarding a [`Draft`] form session.

use tracerr::Traced;

#[cfg(doc)]
use crate::domain::Draft;
use crate::{infra::sessions, Service};

use super::Command;

/// [`Command`] for discarding the [`Draft`] of a form session without
/// submitting it.
#[derive(Clone, Copy, Debug)]
pub struct DiscardDraft {
    /// ID of the [`Draft`] session to discard.
    pub session_id: sessions::Id,
}

impl<S, M> Command<DiscardDraft> for Service<S, M> {
    type Ok = ();
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: DiscardDraft) -> Result<Self::Ok, Self::Err> {
        let DiscardDraft { session_id } = cmd;

        self.sessions()
            .discard(session_id)
            .await
            .map_err(tracerr::from_and_wrap!(=> ExecutionError))
    }
}

/// Error of [`DiscardDraft`] [`Command`] execution.
pub type ExecutionError = sessions::Error;
