//! [`Command`] for patching the [`Draft`] of a form session.

use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{draft, Draft},
    infra::sessions,
    Service,
};

use super::Command;

/// [`Command`] for applying a [`Patch`] to the [`Draft`] of a form session.
///
/// [`Patch`]: draft::Patch
#[derive(Clone, Debug)]
pub struct UpdateDraft {
    /// ID of the [`Draft`] session to patch.
    pub session_id: sessions::Id,

    /// [`Patch`] to apply.
    ///
    /// [`Patch`]: draft::Patch
    pub patch: draft::Patch,
}

impl<S, M> Command<UpdateDraft> for Service<S, M> {
    type Ok = Draft;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: UpdateDraft) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UpdateDraft { session_id, patch } = cmd;

        self.sessions()
            .with(session_id, |draft| {
                // The patch lands on a scratch copy first, so a rejected one
                // leaves the session state untouched.
                let mut candidate = draft.clone();
                candidate.apply(patch)?;
                *draft = candidate.clone();
                Ok(candidate)
            })
            .await
            .map_err(tracerr::from_and_wrap!(=> E))?
            .map_err(E::Update)
            .map_err(tracerr::wrap!())
    }
}

/// Error of [`UpdateDraft`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// Draft session operation failed.
    #[display("draft session operation failed: {_0}")]
    Session(sessions::Error),

    /// The [`Patch`] was rejected by the [`Draft`] state machine.
    ///
    /// [`Patch`]: draft::Patch
    #[display("draft update rejected: {_0}")]
    Update(draft::UpdateError),
}
