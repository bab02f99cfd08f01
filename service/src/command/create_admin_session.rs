//! [`Command`] for creating an admin [`Session`].

use std::time::Duration;

use common::DateTime;
use derive_more::{Debug, Display, Error, From};
use secrecy::{ExposeSecret as _, SecretBox};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::admin::{Login, Password};
use crate::{
    domain::admin::{self, session, Session},
    Service,
};

use super::Command;

/// [`Command`] for creating an admin [`Session`] by the operator
/// credentials.
#[derive(Debug)]
pub struct CreateAdminSession {
    /// [`Login`] of the admin.
    pub login: admin::Login,

    /// [`Password`] of the admin.
    #[debug(skip)]
    pub password: SecretBox<admin::Password>,
}

impl CreateAdminSession {
    /// [`Duration`] of [`Session`] expiration.
    const EXPIRATION_DURATION: Duration = Duration::from_secs(30 * 60);
}

/// Output of [`CreateAdminSession`] [`Command`].
#[derive(Clone, Debug)]
pub struct Output {
    /// [`Token`] of the created [`Session`].
    ///
    /// [`Token`]: session::Token
    pub token: session::Token,

    /// [`Role`] the created [`Session`] exposes.
    ///
    /// [`Role`]: admin::Role
    pub role: admin::Role,

    /// [`DateTime`] when the [`Session`] expires.
    pub expires_at: session::ExpirationDateTime,
}

impl<S, M> Command<CreateAdminSession> for Service<S, M> {
    type Ok = Output;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: CreateAdminSession,
    ) -> Result<Self::Ok, Self::Err> {
        use CreateAdminSession as Cmd;
        use ExecutionError as E;

        let CreateAdminSession { login, password } = cmd;

        let admin::Credentials {
            login: expected_login,
            password_hash: expected_hash,
        } = &self.config().admin;
        let hash = admin::PasswordHash::new(password.expose_secret());
        if &login != expected_login || &hash != expected_hash {
            return Err(tracerr::new!(E::WrongCredentials));
        }

        let expires_at = (DateTime::now() + Cmd::EXPIRATION_DURATION).coerce();
        let session = Session {
            role: admin::Role::Admin,
            expires_at,
        };
        let token = jsonwebtoken::encode::<Session>(
            &jsonwebtoken::Header::default(),
            &session,
            &self.config().jwt_encoding_key,
        )
        .map_err(tracerr::from_and_wrap!(=> E))?;

        // SAFETY: `jsonwebtoken::encode` always returns a valid
        //         `session::Token`.
        #[expect(unsafe_code, reason = "invariants are preserved")]
        let token = unsafe { session::Token::new_unchecked(token) };

        Ok(Output {
            token,
            role: session.role,
            expires_at,
        })
    }
}

/// Error of [`CreateAdminSession`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`jsonwebtoken`] encoding error.
    #[display("Failed to encode a JSON Web Token: {_0}")]
    JsonWebTokenEncodeError(jsonwebtoken::errors::Error),

    /// Provided credentials do not match the operator configuration.
    #[display("Wrong admin credentials")]
    WrongCredentials,
}

#[cfg(test)]
mod spec {
    use secrecy::SecretBox;

    use crate::{
        command::{AuthorizeAdminSession, Command as _},
        domain::admin,
        Service,
    };

    use super::CreateAdminSession;

    fn service() -> Service<(), ()> {
        let secret = b"secret";
        let config = crate::Config {
            jwt_encoding_key: jsonwebtoken::EncodingKey::from_secret(secret),
            jwt_decoding_key: jsonwebtoken::DecodingKey::from_secret(secret),
            admin: admin::Credentials {
                login: admin::Login::new("admin@auto-immo.ga").unwrap(),
                password_hash: admin::PasswordHash::new(
                    &admin::Password::from("admin"),
                ),
            },
            contact: crate::domain::listing::Contact {
                name: "auto-immo (Sonny)".to_owned(),
                phone: "+241 07 10 02 75".to_owned(),
                email: "contact@auto-immo.info".to_owned(),
            },
            clean_stale_drafts: crate::task::clean_stale_drafts::Config {
                interval: std::time::Duration::from_secs(60 * 60),
                timeout: std::time::Duration::from_secs(60 * 60),
            },
        };
        Service::new(config, (), ()).0
    }

    #[tokio::test]
    async fn issues_an_authorizable_token() {
        let service = service();

        let output = service
            .execute(CreateAdminSession {
                login: admin::Login::new("admin@auto-immo.ga").unwrap(),
                password: SecretBox::init_with(|| {
                    admin::Password::from("admin")
                }),
            })
            .await
            .unwrap();
        assert_eq!(output.role, admin::Role::Admin);

        let session = service
            .execute(AuthorizeAdminSession {
                token: output.token,
            })
            .await
            .unwrap();
        assert_eq!(session.role, admin::Role::Admin);
    }

    #[tokio::test]
    async fn rejects_wrong_credentials() {
        let service = service();

        let denied = service
            .execute(CreateAdminSession {
                login: admin::Login::new("admin@auto-immo.ga").unwrap(),
                password: SecretBox::init_with(|| {
                    admin::Password::from("nimda")
                }),
            })
            .await;
        assert!(denied.is_err());
    }
}
