//! Service contains the business logic of the application.
//!
//! List of available Cargo features:
#![doc = document_features::document_features!()]
#![deny(
    nonstandard_style,
    rust_2018_idioms,
    rustdoc::all,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code
)]
#![forbid(non_ascii_idents)]
#![warn(
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    clippy::pedantic,
    clippy::wildcard_enum_match_arm,
    deprecated_in_future,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unreachable_pub,
    unused_crate_dependencies,
    unused_import_braces,
    unused_labels,
    unused_lifetimes,
    unused_qualifications,
    unused_results
)]

pub mod command;
pub mod domain;
pub mod infra;
pub mod query;
pub mod read;
pub mod registry;
pub mod task;

use std::sync::Arc;

use common::operations::{By, Start};
use derive_more::Debug;

use crate::infra::sessions::Sessions;

pub use self::{command::Command, query::Query, task::Task};

/// [`Service`] configuration.
#[derive(Clone, Debug)]
pub struct Config {
    /// [JWT] encoding key.
    ///
    /// [JWT]: https://datatracker.ietf.org/doc/html/rfc7519
    #[debug(skip)]
    pub jwt_encoding_key: jsonwebtoken::EncodingKey,

    /// [JWT] decoding key.
    ///
    /// [JWT]: https://datatracker.ietf.org/doc/html/rfc7519
    #[debug(skip)]
    pub jwt_decoding_key: jsonwebtoken::DecodingKey,

    /// Operator credentials gating the admin surface.
    pub admin: domain::admin::Credentials,

    /// Contact block stamped onto every published listing.
    pub contact: domain::listing::Contact,

    /// [`task::CleanStaleDrafts`] configuration.
    pub clean_stale_drafts: task::clean_stale_drafts::Config,
}

/// Domain service.
#[derive(Clone, Debug)]
pub struct Service<S, M> {
    /// Configuration of this [`Service`].
    config: Config,

    /// Listing store of this [`Service`].
    store: S,

    /// Media storage of this [`Service`].
    media: M,

    /// Draft form [`Sessions`] owned by this [`Service`].
    sessions: Arc<Sessions>,
}

impl<S, M> Service<S, M> {
    /// Creates a new [`Service`] with the provided parameters.
    pub fn new(config: Config, store: S, media: M) -> (Self, task::Background)
    where
        Self: Task<
                Start<
                    By<
                        task::CleanStaleDrafts<Self>,
                        task::clean_stale_drafts::Config,
                    >,
                >,
                Ok = (),
                Err: std::error::Error,
            > + Clone
            + 'static,
    {
        let this = Service {
            config,
            store,
            media,
            sessions: Arc::new(Sessions::default()),
        };

        let mut bg = task::Background::default();
        let svc = this.clone();
        bg.spawn(async move {
            svc.execute(Start(By::new(svc.config().clean_stale_drafts)))
                .await
        });

        (this, bg)
    }

    /// Returns [`Config`] of this [`Service`].
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the listing store of this [`Service`].
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Returns the media storage of this [`Service`].
    #[must_use]
    pub fn media(&self) -> &M {
        &self.media
    }

    /// Returns the draft form [`Sessions`] of this [`Service`].
    #[must_use]
    pub fn sessions(&self) -> &Sessions {
        &self.sessions
    }
}
