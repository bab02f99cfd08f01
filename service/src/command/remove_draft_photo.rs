//! [`Command`] for removing a photo from a [`Draft`].

use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{draft, Draft},
    infra::sessions,
    Service,
};

use super::Command;

/// [`Command`] for removing the photo at the given index from the [`Draft`]
/// of a form session.
#[derive(Clone, Copy, Debug)]
pub struct RemoveDraftPhoto {
    /// ID of the [`Draft`] session to remove the photo from.
    pub session_id: sessions::Id,

    /// Index of the photo to remove.
    pub index: usize,
}

impl<S, M> Command<RemoveDraftPhoto> for Service<S, M> {
    type Ok = Draft;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: RemoveDraftPhoto,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let RemoveDraftPhoto { session_id, index } = cmd;

        self.sessions()
            .with(session_id, |draft| {
                draft.remove_photo(index).map(|()| draft.clone())
            })
            .await
            .map_err(tracerr::from_and_wrap!(=> E))?
            .map_err(E::Update)
            .map_err(tracerr::wrap!())
    }
}

/// Error of [`RemoveDraftPhoto`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// Draft session operation failed.
    #[display("draft session operation failed: {_0}")]
    Session(sessions::Error),

    /// The photo removal was rejected by the [`Draft`] state machine.
    #[display("draft update rejected: {_0}")]
    Update(draft::UpdateError),
}
