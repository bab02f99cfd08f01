//! [`Command`] for uploading a promotional video.

use derive_more::{Debug, Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::listing::MediaUrl,
    infra::{media, Media},
    Service,
};

use super::Command;

/// [`Command`] for uploading a promotional video file.
///
/// The size cap is enforced here, by the caller of the media storage, not by
/// the storage itself.
#[derive(Clone, Debug)]
pub struct UploadVideo {
    /// Display name of the video file.
    pub file_name: String,

    /// Raw content of the video file.
    #[debug(skip)]
    pub content: Vec<u8>,
}

impl<S, M> Command<UploadVideo> for Service<S, M>
where
    M: Media<media::Upload, Ok = MediaUrl, Err = Traced<media::Error>>,
{
    type Ok = MediaUrl;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: UploadVideo) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UploadVideo { file_name, content } = cmd;

        if content.len() > media::MAX_VIDEO_BYTES {
            return Err(tracerr::new!(E::TooLarge {
                size: content.len(),
            }));
        }

        self.media()
            .execute(media::Upload {
                file_name,
                content,
                path_hint: "videos",
            })
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
    }
}

/// Error of [`UploadVideo`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Media`] storage error.
    #[display("`Media` operation failed: {_0}")]
    Media(media::Error),

    /// The video exceeds the accepted size.
    #[display(
        "video of {size} bytes exceeds the {} bytes limit",
        media::MAX_VIDEO_BYTES
    )]
    TooLarge {
        /// Size of the rejected video, in bytes.
        size: usize,
    },
}
