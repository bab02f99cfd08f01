//! [`Query`] collection related to a single [`Listing`].

use common::operations::By;

use crate::domain::{listing, Listing};

use super::StoreQuery;

/// Queries a [`Listing`] by its ID.
pub type ById = StoreQuery<By<Option<Listing>, listing::Id>>;
