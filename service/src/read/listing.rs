//! [`Listing`]-related read definitions.

#[cfg(doc)]
use crate::domain::Listing;

pub mod list {
    //! [`Listing`] list definitions.

    use crate::domain::{
        listing::{Category, City, Status, TransactionKind},
        Listing,
    };

    /// Equality filter for selecting [`Listing`]s.
    ///
    /// Mirrors the collaborator contract: every present field must match
    /// exactly.
    #[derive(Clone, Debug, Default)]
    pub struct Filter {
        /// [`Category`] to match.
        pub category: Option<Category>,

        /// [`City`] to match.
        pub city: Option<City>,

        /// [`Status`] to match.
        pub status: Option<Status>,

        /// [`TransactionKind`] to match.
        pub transaction_kind: Option<TransactionKind>,
    }

    impl Filter {
        /// Indicates whether the given [`Listing`] matches this [`Filter`].
        #[must_use]
        pub fn matches(&self, listing: &Listing) -> bool {
            self.category.is_none_or(|c| listing.category == c)
                && self.city.as_ref().is_none_or(|c| &listing.city == c)
                && self.status.is_none_or(|s| listing.status == s)
                && self
                    .transaction_kind
                    .is_none_or(|k| listing.transaction_kind == k)
        }
    }
}
