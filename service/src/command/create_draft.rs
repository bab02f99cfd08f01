//! [`Command`] for opening a new [`Draft`] form session.

use common::operations::{By, Select};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{listing, Draft, Listing},
    infra::{sessions, store, Store},
    Service,
};

use super::Command;

/// [`Command`] for opening a new [`Draft`] form session, optionally hydrated
/// from an existing [`Listing`] (edit flow).
#[derive(Clone, Copy, Debug, Default)]
pub struct CreateDraft {
    /// ID of the [`Listing`] to hydrate the [`Draft`] from, if editing.
    pub listing_id: Option<listing::Id>,
}

/// Output of [`CreateDraft`] [`Command`].
#[derive(Clone, Debug)]
pub struct Output {
    /// ID of the opened session.
    pub session_id: sessions::Id,

    /// [`Draft`] state right after opening.
    pub draft: Draft,
}

impl<S, M> Command<CreateDraft> for Service<S, M>
where
    S: Store<
        Select<By<Option<Listing>, listing::Id>>,
        Ok = Option<Listing>,
        Err = Traced<store::Error>,
    >,
{
    type Ok = Output;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: CreateDraft) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let draft = match cmd.listing_id {
            Some(id) => {
                let listing = self
                    .store()
                    .execute(Select(By::new(id)))
                    .await
                    .map_err(tracerr::map_from_and_wrap!(=> E))?
                    .ok_or(E::ListingNotExists(id))
                    .map_err(tracerr::wrap!())?;
                Draft::hydrate(&listing)
            }
            None => Draft::new(),
        };

        let session_id = self.sessions().open(draft.clone()).await;

        Ok(Output { session_id, draft })
    }
}

/// Error of [`CreateDraft`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Store`] error.
    #[display("`Store` operation failed: {_0}")]
    Store(store::Error),

    /// [`Listing`] with the provided ID does not exist.
    #[display("`Listing(id: {_0})` does not exist")]
    #[from(ignore)]
    ListingNotExists(#[error(not(source))] listing::Id),
}
