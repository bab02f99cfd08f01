//! [`Command`] definition.

pub mod add_draft_photos;
pub mod authorize_admin_session;
pub mod create_admin_session;
pub mod create_draft;
pub mod delete_listing;
pub mod discard_draft;
pub mod remove_draft_photo;
pub mod set_listing_status;
pub mod submit_draft;
pub mod update_draft;
pub mod upload_video;

/// [`Command`] of the [`Service`].
///
/// [`Service`]: crate::Service
pub use common::Handler as Command;

pub use self::{
    add_draft_photos::{AddDraftPhotos, PhotoUpload},
    authorize_admin_session::AuthorizeAdminSession,
    create_admin_session::CreateAdminSession, create_draft::CreateDraft,
    delete_listing::DeleteListing, discard_draft::DiscardDraft,
    remove_draft_photo::RemoveDraftPhoto,
    set_listing_status::SetListingStatus, submit_draft::SubmitDraft,
    update_draft::UpdateDraft, upload_video::UploadVideo,
};
