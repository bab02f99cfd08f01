//! Admin session definitions.

use common::DateTime;
use derive_more::{AsRef, Display, From, Into};
use juniper::{GraphQLEnum, GraphQLObject, GraphQLScalar};
use service::domain::admin;

use crate::{api::scalar, Context};

/// Login of the admin.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(name = "AdminLogin", with = scalar::Via::<admin::Login>)]
pub struct Login(admin::Login);

/// Password of the admin.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(name = "AdminPassword", with = scalar::Via::<admin::Password>)]
pub struct Password(admin::Password);

/// Role exposed by an authorized session.
#[derive(Clone, Copy, Debug, Eq, GraphQLEnum, PartialEq)]
pub enum Role {
    /// The trusted marketplace operator.
    Admin,
}

impl From<admin::Role> for Role {
    fn from(role: admin::Role) -> Self {
        match role {
            admin::Role::Admin => Self::Admin,
        }
    }
}

/// Result of creating an admin session.
#[derive(Clone, Debug, GraphQLObject)]
#[graphql(context = Context, name = "AdminSessionCreateResult")]
pub struct CreateResult {
    /// Bearer token of the created session.
    pub token: String,

    /// Role the created session exposes.
    pub role: Role,

    /// `DateTime` when the session expires.
    pub expires_at: DateTime,
}
