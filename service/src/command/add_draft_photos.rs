//! [`Command`] for decoding and attaching photos to a [`Draft`].

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use derive_more::{Debug, Display, Error, From};
use futures::{stream::FuturesUnordered, StreamExt as _};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{draft, Draft},
    infra::sessions,
    Service,
};

use super::Command;

/// Payload of a single photo to attach.
#[derive(Clone, Debug)]
pub struct PhotoUpload {
    /// Display name of the photo file.
    pub name: String,

    /// `data:` URI of the photo content, as produced by a client-side file
    /// reader.
    #[debug(skip)]
    pub data_uri: String,
}

/// [`Command`] for decoding the provided photo payloads and attaching them
/// to the [`Draft`] of a form session.
#[derive(Clone, Debug)]
pub struct AddDraftPhotos {
    /// ID of the [`Draft`] session to attach the photos to.
    pub session_id: sessions::Id,

    /// Photo payloads to decode.
    pub photos: Vec<PhotoUpload>,
}

impl<S, M> Command<AddDraftPhotos> for Service<S, M> {
    type Ok = Draft;
    type Err = Traced<ExecutionError>;

    /// Decodes all the payloads concurrently and appends every accepted
    /// photo to the [`Draft`] as its decode completes: the resulting order
    /// is completion order, not selection order. Removing a photo while
    /// other decodes are in flight does not cancel them.
    ///
    /// Non-image payloads are skipped. A malformed payload fails the command
    /// once the remaining decodes have landed.
    async fn execute(
        &self,
        cmd: AddDraftPhotos,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let AddDraftPhotos { session_id, photos } = cmd;

        let mut decodes: FuturesUnordered<_> = photos
            .into_iter()
            .map(|upload| async move { decode(upload) })
            .collect();

        let mut first_error = None;
        while let Some(decoded) = decodes.next().await {
            match decoded {
                Ok(Some(photo)) => {
                    self.sessions()
                        .with(session_id, |draft| draft.push_photo(photo))
                        .await
                        .map_err(tracerr::from_and_wrap!(=> E))?
                        .map_err(E::Update)
                        .map_err(tracerr::wrap!())?;
                }
                Ok(None) => {}
                Err(e) => first_error = first_error.or(Some(e)),
            }
        }
        if let Some(e) = first_error {
            return Err(tracerr::new!(E::Decode(e)));
        }

        self.sessions()
            .peek(session_id, Clone::clone)
            .await
            .map_err(tracerr::from_and_wrap!(=> E))
    }
}

/// Decodes the given [`PhotoUpload`] into a [`draft::Photo`].
///
/// [`None`] is returned for non-image payloads, which the intake silently
/// skips.
fn decode(upload: PhotoUpload) -> Result<Option<draft::Photo>, DecodeError> {
    let PhotoUpload { name, data_uri } = upload;

    let Some((mime, payload)) = data_uri
        .strip_prefix("data:")
        .and_then(|rest| rest.split_once(";base64,"))
    else {
        return Err(DecodeError { name });
    };

    if !mime.starts_with("image/") {
        log::debug!("skipping non-image photo payload `{name}`");
        return Ok(None);
    }

    let bytes = BASE64
        .decode(payload)
        .map_err(|_| DecodeError { name: name.clone() })?;

    Ok(Some(draft::Photo {
        name,
        preview: draft::Preview::Content {
            mime: mime.to_owned(),
            bytes,
        },
    }))
}

/// Error of decoding a [`PhotoUpload`].
#[derive(Clone, Debug, Display, Error)]
#[display("photo `{name}` payload is not a valid base64 `data:` URI")]
pub struct DecodeError {
    /// Display name of the rejected photo.
    pub name: String,
}

/// Error of [`AddDraftPhotos`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// Draft session operation failed.
    #[display("draft session operation failed: {_0}")]
    Session(sessions::Error),

    /// The photo append was rejected by the [`Draft`] state machine.
    #[display("draft update rejected: {_0}")]
    Update(draft::UpdateError),

    /// A photo payload could not be decoded.
    #[display("{_0}")]
    Decode(DecodeError),
}

#[cfg(test)]
mod spec {
    use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};

    use super::{decode, PhotoUpload};

    fn upload(name: &str, mime: &str, bytes: &[u8]) -> PhotoUpload {
        PhotoUpload {
            name: name.to_owned(),
            data_uri: format!("data:{mime};base64,{}", BASE64.encode(bytes)),
        }
    }

    #[test]
    fn decodes_image_payloads() {
        let photo = decode(upload("front.jpg", "image/jpeg", &[0xff, 0xd8]))
            .unwrap()
            .unwrap();
        assert_eq!(photo.name, "front.jpg");
        assert!(photo.preview.uri().starts_with("data:image/jpeg;base64,"));
    }

    #[test]
    fn skips_non_image_payloads() {
        let skipped =
            decode(upload("notes.pdf", "application/pdf", b"%PDF")).unwrap();
        assert!(skipped.is_none());
    }

    #[test]
    fn rejects_malformed_payloads() {
        assert!(decode(PhotoUpload {
            name: "junk".to_owned(),
            data_uri: "not-a-data-uri".to_owned(),
        })
        .is_err());
        assert!(decode(PhotoUpload {
            name: "junk.jpg".to_owned(),
            data_uri: "data:image/jpeg;base64,@@@".to_owned(),
        })
        .is_err());
    }
}
