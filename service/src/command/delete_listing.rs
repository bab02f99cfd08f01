//! [`Command`] for deleting a [`Listing`].

use common::operations::{By, Delete, Select};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{listing, Listing},
    infra::{store, Store},
    Service,
};

use super::Command;

/// [`Command`] for deleting a [`Listing`] record.
///
/// Only the record is removed; already uploaded media files are kept (they
/// are cleaned up only when a failed submission orphans them).
#[derive(Clone, Copy, Debug)]
pub struct DeleteListing {
    /// ID of the [`Listing`] to delete.
    pub id: listing::Id,
}

impl<S, M> Command<DeleteListing> for Service<S, M>
where
    S: Store<
            Select<By<Option<Listing>, listing::Id>>,
            Ok = Option<Listing>,
            Err = Traced<store::Error>,
        > + Store<
            Delete<By<Listing, listing::Id>>,
            Ok = (),
            Err = Traced<store::Error>,
        >,
{
    type Ok = ();
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: DeleteListing) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let DeleteListing { id } = cmd;

        drop(
            self.store()
                .execute(Select(By::new(id)))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))?
                .ok_or(E::ListingNotExists(id))
                .map_err(tracerr::wrap!())?,
        );

        self.store()
            .execute(Delete(By::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
    }
}

/// Error of [`DeleteListing`] [`Command`] execution.
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
