//! [`Command`] for changing the [`Status`] of a [`Listing`].

use common::operations::{By, Select, Update};
use derive_more::{Display, Error, From};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::listing::Status;
use crate::{
    domain::{listing, Listing},
    infra::{store, Store},
    Service,
};

use super::Command;

/// [`Command`] for transitioning a [`Listing`] into the given [`Status`]
/// (pause, resume, archive).
///
/// The transition is expressed as a whole-record replacement: a persisted
/// [`Listing`] is never mutated field-by-field.
#[derive(Clone, Copy, Debug)]
pub struct SetListingStatus {
    /// ID of the [`Listing`] to transition.
    pub id: listing::Id,

    /// [`Status`] to transition into.
    pub status: listing::Status,
}

impl<S, M> Command<SetListingStatus> for Service<S, M>
where
    S: Store<
            Select<By<Option<Listing>, listing::Id>>,
            Ok = Option<Listing>,
            Err = Traced<store::Error>,
        > + Store<
            Update<(listing::Id, listing::New)>,
            Ok = Listing,
            Err = Traced<store::Error>,
        >,
{
    type Ok = Listing;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: SetListingStatus,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let SetListingStatus { id, status } = cmd;

        let listing = self
            .store()
            .execute(Select(By::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::ListingNotExists(id))
            .map_err(tracerr::wrap!())?;

        let mut replacement = listing::New::from(listing);
        replacement.status = status;

        self.store()
            .execute(Update((id, replacement)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
    }
}

/// Error of [`SetListingStatus`] [`Command`] execution.
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
