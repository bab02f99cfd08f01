//! GraphQL [`Query`]s definitions.

use juniper::graphql_object;
use service::{domain, query, read, registry, Query as _};

use crate::{api, define_error, AsError, Context, Error};

/// Root of all GraphQL queries.
#[derive(Clone, Copy, Debug)]
pub struct Query;

impl Query {
    /// Name of the [`tracing::Span`] for the queries.
    pub(crate) const SPAN_NAME: &'static str = "GraphQL query";
}

#[graphql_object(context = Context)]
impl Query {
    /// Fetches the `Listing`s matching the provided equality filters, newest
    /// first.
    ///
    /// Unauthenticated callers only ever see `ACTIVE` listings.
    #[tracing::instrument(
        skip_all,
        fields(
            category = ?category,
            city = ?city.as_ref().map(ToString::to_string),
            gql.name = "listings",
            otel.name = Self::SPAN_NAME,
            status = ?status,
            transaction_kind = ?transaction_kind,
        ),
    )]
    pub async fn listings(
        category: Option<api::listing::Category>,
        city: Option<api::listing::City>,
        status: Option<api::listing::Status>,
        transaction_kind: Option<api::listing::TransactionKind>,
        ctx: &Context,
    ) -> Result<Vec<api::Listing>, Error> {
        let is_admin = ctx.try_current_session().await?.is_some();
        let status = if is_admin {
            status.map(Into::into)
        } else {
            Some(domain::listing::Status::Active)
        };

        ctx.service()
            .execute(query::listings::List::by(read::listing::list::Filter {
                category: category.map(Into::into),
                city: city.map(Into::into),
                status,
                transaction_kind: transaction_kind.map(Into::into),
            }))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|all| all.into_iter().map(Into::into).collect())
    }

    /// Returns the `Listing` with the specified ID.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `LISTING_NOT_EXISTS` - the `Listing` with the specified ID does not
    ///                          exist (or is not visible to the caller).
    #[tracing::instrument(
        skip_all,
        fields(
            id = %id,
            gql.name = "listing",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn listing(
        id: api::listing::Id,
        ctx: &Context,
    ) -> Result<api::Listing, Error> {
        let is_admin = ctx.try_current_session().await?.is_some();

        let listing = ctx
            .service()
            .execute(query::listing::ById::by(id.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?
            .ok_or_else(|| ListingError::NotExists.into())
            .map_err(ctx.error())?;

        if !is_admin && listing.status != domain::listing::Status::Active {
            return Err(ListingError::NotExists.into())
                .map_err(ctx.error());
        }

        Ok(listing.into())
    }

    /// Returns the state of the draft form session with the specified ID.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `DRAFT_NOT_EXISTS` - no draft session with the specified ID is open.
    #[tracing::instrument(
        skip_all,
        fields(
            id = %id,
            gql.name = "draft",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn draft(
        id: api::draft::Id,
        ctx: &Context,
    ) -> Result<api::Draft, Error> {
        let _session = ctx.current_session().await?;

        let session_id = id.into();
        ctx.service()
            .sessions()
            .peek(session_id, Clone::clone)
            .await
            .map(|draft| api::Draft::new(session_id, draft))
            .map_err(AsError::into_error)
            .map_err(ctx.error())
    }

    /// Returns the intake schemas of all the categories.
    #[tracing::instrument(
        skip_all,
        fields(gql.name = "categories", otel.name = Self::SPAN_NAME),
    )]
    #[must_use]
    pub fn categories() -> Vec<api::CategorySchema> {
        registry::category::all().into_iter().map(Into::into).collect()
    }

    /// Returns the intake schema of the specified category.
    #[tracing::instrument(
        skip_all,
        fields(
            category = ?category,
            gql.name = "category",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    #[must_use]
    pub fn category(category: api::listing::Category) -> api::CategorySchema {
        registry::category::of(category.into()).into()
    }

    /// Returns the registered city names, in registry order.
    #[tracing::instrument(
        skip_all,
        fields(gql.name = "cities", otel.name = Self::SPAN_NAME),
    )]
    #[must_use]
    pub fn cities() -> Vec<String> {
        registry::location::cities().map(ToOwned::to_owned).collect()
    }

    /// Returns the neighborhoods of the specified city, flattened across its
    /// zones. A city unknown to the registry yields an empty list.
    #[tracing::instrument(
        skip_all,
        fields(
            city = %city,
            gql.name = "neighborhoods",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    #[must_use]
    pub fn neighborhoods(city: api::listing::City) -> Vec<String> {
        registry::location::neighborhoods(&city.into())
            .into_iter()
            .map(ToOwned::to_owned)
            .collect()
    }
}

define_error! {
    enum ListingError {
        #[code = "LISTING_NOT_EXISTS"]
        #[status = NOT_FOUND]
        #[message = "`Listing` with the specified ID does not exist"]
        NotExists,
    }
}
