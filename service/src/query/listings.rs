//! [`Query`] collection related to the multiple [`Listing`]s.

use common::operations::{By, Subscribe};
use tokio::sync::broadcast;
use tracerr::Traced;

#[cfg(doc)]
use crate::read::listing::list::Filter;
use crate::{
    domain::Listing,
    infra::{store, Store},
    read, Service,
};

use super::{Query, StoreQuery};

/// Queries a list of [`Listing`]s matching a [`Filter`].
pub type List = StoreQuery<By<Vec<Listing>, read::listing::list::Filter>>;

/// [`Query`] subscribing to full snapshots of all the [`Listing`]s.
///
/// Every mutation of the store re-emits the whole collection, newest first.
#[derive(Clone, Copy, Debug)]
pub struct WatchAll;

impl<S, M> Query<WatchAll> for Service<S, M>
where
    S: Store<
        Subscribe,
        Ok = broadcast::Receiver<Vec<Listing>>,
        Err = Traced<store::Error>,
    >,
{
    type Ok = broadcast::Receiver<Vec<Listing>>;
    type Err = Traced<store::Error>;

    async fn execute(&self, _: WatchAll) -> Result<Self::Ok, Self::Err> {
        self.store()
            .execute(Subscribe)
            .await
            .map_err(tracerr::wrap!())
    }
}
