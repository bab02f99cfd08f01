//! GraphQL API definitions.

pub mod draft;
pub mod listing;
mod mutation;
mod query;
pub mod registry;
pub mod scalar;
pub mod session;
mod subscription;

pub use self::{
    draft::Draft,
    listing::Listing,
    mutation::Mutation,
    query::Query,
    registry::CategorySchema,
    subscription::Subscription,
};

/// GraphQL schema.
pub type Schema = juniper::RootNode<'static, Query, Mutation, Subscription>;
