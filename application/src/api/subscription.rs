//! GraphQL [`Subscription`]s definitions.

use common::DateTime;
use futures::{
    stream::{self, BoxStream},
    FutureExt as _, StreamExt as _,
};
use juniper::graphql_subscription;
use service::{domain, query, read, Query as _};
use tokio::sync::broadcast;

use crate::{api, context, AsError, Context, Error};

/// Root of all GraphQL subscription.
#[derive(Clone, Copy, Debug)]
pub struct Subscription;

#[graphql_subscription(context = Context)]
impl Subscription {
    /// Subscription streaming the full `Listing` collection, newest first:
    /// once on connect and again after every mutation of the store.
    ///
    /// Unauthenticated callers only ever see `ACTIVE` listings.
    pub async fn listings(
        &self,
        ctx: &Context,
    ) -> Result<BoxStream<'static, Result<Vec<api::Listing>, Error>>, Error>
    {
        let is_admin = ctx.try_current_session().await?.is_some();

        let initial = ctx
            .service()
            .execute(query::listings::List::by(
                read::listing::list::Filter::default(),
            ))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?;
        let events = ctx
            .service()
            .execute(query::listings::WatchAll)
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?;

        let updates = stream::unfold(events, |mut events| async move {
            loop {
                match events.recv().await {
                    Ok(snapshot) => return Some((snapshot, events)),
                    Err(broadcast::error::RecvError::Lagged(_)) => {}
                    Err(broadcast::error::RecvError::Closed) => return None,
                }
            }
        });

        Ok(stream::once(async move { initial })
            .chain(updates)
            .map(move |snapshot| {
                Ok(snapshot
                    .into_iter()
                    .filter(|l| {
                        is_admin
                            || l.status == domain::listing::Status::Active
                    })
                    .map(Into::into)
                    .collect())
            })
            .boxed())
    }

    /// Subscription waiting for the current authenticated session to expire.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHORIZATION_REQUIRED` - if the current session is not
    ///                              authenticated or session expired.
    pub async fn wait_session(
        &self,
        ctx: &Context,
    ) -> Result<BoxStream<'static, Result<bool, Error>>, Error> {
        let session = ctx.current_session().await?;
        let timeout = session.expires_at - DateTime::now();
        Ok(stream::once(
            tokio::time::sleep(timeout).map(|()| {
                Err(context::AuthError::AuthroizationRequired.into())
            }),
        )
        .boxed())
    }
}
