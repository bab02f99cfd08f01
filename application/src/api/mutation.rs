//! GraphQL [`Mutation`]s definitions.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use juniper::graphql_object;
use service::{command, infra::sessions, Command as _};

use crate::{api, define_error, AsError, Context, Error, Session};

/// Root of all GraphQL mutations.
#[derive(Clone, Copy, Debug)]
pub struct Mutation;

impl Mutation {
    /// Name of the [`tracing::Span`] for the mutations.
    const SPAN_NAME: &'static str = "GraphQL mutation";
}

#[graphql_object(context = Context)]
impl Mutation {
    /// Creates a new admin session with the operator credentials.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `WRONG_CREDENTIALS` - provided credentials do not match the
    ///                         operator configuration.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "createAdminSession",
            login = %login,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn create_admin_session(
        login: api::session::Login,
        password: api::session::Password,
        ctx: &Context,
    ) -> Result<api::session::CreateResult, Error> {
        let output = ctx
            .service()
            .execute(command::CreateAdminSession {
                login: login.into(),
                password: secrecy::SecretBox::init_with(move || {
                    password.into()
                }),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?;

        ctx.set_current_session(Session {
            role: output.role,
            token: output.token.clone(),
            expires_at: output.expires_at.coerce(),
        })
        .await;

        Ok(api::session::CreateResult {
            token: output.token.to_string(),
            role: output.role.into(),
            expires_at: output.expires_at.coerce(),
        })
    }

    /// Opens a new draft form session, optionally hydrated from an existing
    /// `Listing` (edit flow).
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `LISTING_NOT_EXISTS` - the `Listing` to edit does not exist.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "createListingDraft",
            listing_id = ?listing_id.as_ref().map(ToString::to_string),
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn create_listing_draft(
        listing_id: Option<api::listing::Id>,
        ctx: &Context,
    ) -> Result<api::Draft, Error> {
        let _session = ctx.current_session().await?;

        ctx.service()
            .execute(command::CreateDraft {
                listing_id: listing_id.map(Into::into),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|output| api::Draft::new(output.session_id, output.draft))
    }

    /// Applies a field-by-field patch to the draft of a form session and
    /// returns its new state, with the derived title and quality recomputed.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `DRAFT_NOT_EXISTS` - no draft session with the specified ID;
    /// - `SUBMISSION_PENDING` - a submission of this draft is in flight;
    /// - `INVALID_DRAFT_UPDATE` - the patch was rejected by the wizard
    ///                            rules;
    /// - `INVALID_INPUT` - a patch value failed to parse.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "updateListingDraft",
            id = %id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn update_listing_draft(
        id: api::draft::Id,
        patch: api::draft::DraftPatch,
        ctx: &Context,
    ) -> Result<api::Draft, Error> {
        let _session = ctx.current_session().await?;

        let patch = patch.try_into().map_err(ctx.error())?;
        let session_id: sessions::Id = id.into();

        ctx.service()
            .execute(command::UpdateDraft { session_id, patch })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|draft| api::Draft::new(session_id, draft))
    }

    /// Decodes the provided photo payloads and attaches them to the draft.
    ///
    /// Photos are appended in decode-completion order; non-image payloads
    /// are skipped.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `DRAFT_NOT_EXISTS` - no draft session with the specified ID;
    /// - `SUBMISSION_PENDING` - a submission of this draft is in flight;
    /// - `INVALID_PHOTO` - a payload is not a valid base64 `data:` URI.
    #[tracing::instrument(
        skip_all,
        fields(
            count = photos.len(),
            gql.name = "addDraftPhotos",
            id = %id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn add_draft_photos(
        id: api::draft::Id,
        photos: Vec<api::draft::PhotoUpload>,
        ctx: &Context,
    ) -> Result<api::Draft, Error> {
        let _session = ctx.current_session().await?;

        let session_id: sessions::Id = id.into();
        ctx.service()
            .execute(command::AddDraftPhotos {
                session_id,
                photos: photos
                    .into_iter()
                    .map(|p| command::PhotoUpload {
                        name: p.name,
                        data_uri: p.data_uri,
                    })
                    .collect(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|draft| api::Draft::new(session_id, draft))
    }

    /// Removes the photo at the specified index from the draft.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `DRAFT_NOT_EXISTS` - no draft session with the specified ID;
    /// - `INVALID_DRAFT_UPDATE` - no photo exists at the index.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "removeDraftPhoto",
            id = %id,
            index = index,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn remove_draft_photo(
        id: api::draft::Id,
        index: i32,
        ctx: &Context,
    ) -> Result<api::Draft, Error> {
        let _session = ctx.current_session().await?;

        let index = usize::try_from(index)
            .map_err(|_| Error::invalid_input(&"`index` is out of range"))
            .map_err(ctx.error())?;
        let session_id: sessions::Id = id.into();

        ctx.service()
            .execute(command::RemoveDraftPhoto { session_id, index })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|draft| api::Draft::new(session_id, draft))
    }

    /// Discards the draft of a form session without submitting it.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `DRAFT_NOT_EXISTS` - no draft session with the specified ID.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "discardListingDraft",
            id = %id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn discard_listing_draft(
        id: api::draft::Id,
        ctx: &Context,
    ) -> Result<bool, Error> {
        let _session = ctx.current_session().await?;

        ctx.service()
            .execute(command::DiscardDraft {
                session_id: id.into(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|()| true)
    }

    /// Submits the draft of a form session as a new (or re-published)
    /// `Listing`.
    ///
    /// On failure nothing is persisted and the draft stays in place for
    /// correction and manual retry.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `DRAFT_NOT_EXISTS` - no draft session with the specified ID;
    /// - `SUBMISSION_PENDING` - a submission of this draft is already in
    ///                          flight;
    /// - `VALIDATION_FAILED` - the draft misses photos or required fields.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "submitListingDraft",
            id = %id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn submit_listing_draft(
        id: api::draft::Id,
        ctx: &Context,
    ) -> Result<api::Listing, Error> {
        let _session = ctx.current_session().await?;

        ctx.service()
            .execute(command::SubmitDraft {
                session_id: id.into(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Transitions the `Listing` with the specified ID into the given
    /// status (pause, resume, archive).
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `LISTING_NOT_EXISTS` - the `Listing` with the specified ID does not
    ///                          exist.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "setListingStatus",
            id = %id,
            otel.name = Self::SPAN_NAME,
            status = ?status,
        ),
    )]
    pub async fn set_listing_status(
        id: api::listing::Id,
        status: api::listing::Status,
        ctx: &Context,
    ) -> Result<api::Listing, Error> {
        let _session = ctx.current_session().await?;

        ctx.service()
            .execute(command::SetListingStatus {
                id: id.into(),
                status: status.into(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Deletes the `Listing` with the specified ID.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `LISTING_NOT_EXISTS` - the `Listing` with the specified ID does not
    ///                          exist.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "deleteListing",
            id = %id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn delete_listing(
        id: api::listing::Id,
        ctx: &Context,
    ) -> Result<bool, Error> {
        let _session = ctx.current_session().await?;

        ctx.service()
            .execute(command::DeleteListing { id: id.into() })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|()| true)
    }

    /// Uploads a promotional video and returns its public URL.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `VIDEO_TOO_LARGE` - the video exceeds the accepted size;
    /// - `INVALID_INPUT` - the payload is not a base64 video `data:` URI.
    #[tracing::instrument(
        skip_all,
        fields(
            file_name = %file_name,
            gql.name = "uploadVideo",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn upload_video(
        file_name: String,
        data_uri: String,
        ctx: &Context,
    ) -> Result<String, Error> {
        let _session = ctx.current_session().await?;

        let content = data_uri
            .strip_prefix("data:")
            .and_then(|rest| rest.split_once(";base64,"))
            .filter(|(mime, _)| mime.starts_with("video/"))
            .and_then(|(_, payload)| BASE64.decode(payload).ok())
            .ok_or_else(|| {
                Error::invalid_input(
                    &"`data_uri` is not a base64 video `data:` URI",
                )
            })
            .map_err(ctx.error())?;

        ctx.service()
            .execute(command::UploadVideo { file_name, content })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|url| url.to_string())
    }
}

impl AsError for command::create_admin_session::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "WRONG_CREDENTIALS"]
                #[status = FORBIDDEN]
                #[message = "Provided credentials do not match the operator \
                             configuration"]
                WrongCredentials,
            }
        }

        match self {
            Self::JsonWebTokenEncodeError(_) => None,
            Self::WrongCredentials => Some(Error::WrongCredentials.into()),
        }
    }
}

impl AsError for command::create_draft::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "LISTING_NOT_EXISTS"]
                #[status = NOT_FOUND]
                #[message = "`Listing` with the specified ID does not exist"]
                ListingNotExists,
            }
        }

        match self {
            Self::Store(e) => e.try_as_error(),
            Self::ListingNotExists(_) => Some(Error::ListingNotExists.into()),
        }
    }
}

impl AsError for command::update_draft::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Session(e) => e.try_as_error(),
            Self::Update(e) => Some(Error {
                code: "INVALID_DRAFT_UPDATE",
                status_code: http::StatusCode::BAD_REQUEST,
                message: e.to_string(),
                backtrace: None,
            }),
        }
    }
}

impl AsError for command::add_draft_photos::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Session(e) => e.try_as_error(),
            Self::Update(e) => Some(Error {
                code: "INVALID_DRAFT_UPDATE",
                status_code: http::StatusCode::BAD_REQUEST,
                message: e.to_string(),
                backtrace: None,
            }),
            Self::Decode(e) => Some(Error {
                code: "INVALID_PHOTO",
                status_code: http::StatusCode::BAD_REQUEST,
                message: e.to_string(),
                backtrace: None,
            }),
        }
    }
}

impl AsError for command::remove_draft_photo::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Session(e) => e.try_as_error(),
            Self::Update(e) => Some(Error {
                code: "INVALID_DRAFT_UPDATE",
                status_code: http::StatusCode::BAD_REQUEST,
                message: e.to_string(),
                backtrace: None,
            }),
        }
    }
}

impl AsError for command::submit_draft::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Session(e) => e.try_as_error(),
            Self::Validation(e) => Some(Error {
                code: "VALIDATION_FAILED",
                status_code: http::StatusCode::BAD_REQUEST,
                message: e.to_string(),
                backtrace: None,
            }),
            Self::Store(e) => e.try_as_error(),
            Self::Media(e) => e.try_as_error(),
        }
    }
}

impl AsError for command::set_listing_status::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "LISTING_NOT_EXISTS"]
                #[status = NOT_FOUND]
                #[message = "`Listing` with the specified ID does not exist"]
                ListingNotExists,
            }
        }

        match self {
            Self::Store(e) => e.try_as_error(),
            Self::ListingNotExists(_) => Some(Error::ListingNotExists.into()),
        }
    }
}

impl AsError for command::delete_listing::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "LISTING_NOT_EXISTS"]
                #[status = NOT_FOUND]
                #[message = "`Listing` with the specified ID does not exist"]
                ListingNotExists,
            }
        }

        match self {
            Self::Store(e) => e.try_as_error(),
            Self::ListingNotExists(_) => Some(Error::ListingNotExists.into()),
        }
    }
}

impl AsError for command::upload_video::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Media(e) => e.try_as_error(),
            Self::TooLarge { .. } => Some(Error {
                code: "VIDEO_TOO_LARGE",
                status_code: http::StatusCode::PAYLOAD_TOO_LARGE,
                message: self.to_string(),
                backtrace: None,
            }),
        }
    }
}
