//! [`Media`] storage backed by a locally served directory.

use std::{io, path::PathBuf, sync::Arc};

use common::operations::Delete;
use derive_more::{Display, Error as StdError, From};
use tracerr::Traced;
use uuid::Uuid;

use crate::{
    domain::listing::MediaUrl,
    infra::{media, Media},
};

/// Configuration of a [`Local`] media storage.
#[derive(Clone, Debug)]
pub struct Config {
    /// Root directory the files are stored under.
    pub root: PathBuf,

    /// Public base URL the root directory is served at.
    pub base_url: String,
}

/// [`Media`] storage writing files under a locally served directory.
#[derive(Clone, Debug)]
pub struct Local {
    /// [`Config`] of this storage.
    config: Arc<Config>,
}

impl Local {
    /// Creates a new [`Local`] storage, making sure its root directory
    /// exists.
    ///
    /// # Errors
    ///
    /// If the root directory cannot be created.
    pub fn new(config: Config) -> Result<Self, Traced<media::Error>> {
        std::fs::create_dir_all(&config.root)
            .map_err(Error::Io)
            .map_err(tracerr::from_and_wrap!(=> media::Error))?;
        Ok(Self {
            config: Arc::new(config),
        })
    }

    /// Replaces every character unsafe for a file name.
    fn sanitize(name: &str) -> String {
        let cleaned: String = name
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                    c
                } else {
                    '-'
                }
            })
            .collect();
        if cleaned.is_empty() {
            "file".to_owned()
        } else {
            cleaned
        }
    }
}

impl Media<media::Upload> for Local {
    type Ok = MediaUrl;
    type Err = Traced<media::Error>;

    async fn execute(
        &self,
        op: media::Upload,
    ) -> Result<Self::Ok, Self::Err> {
        let media::Upload {
            file_name,
            content,
            path_hint,
        } = op;

        let file_name =
            format!("{}_{}", Uuid::new_v4(), Self::sanitize(&file_name));
        let dir = self.config.root.join(path_hint);
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(Error::Io)
            .map_err(tracerr::from_and_wrap!(=> media::Error))?;
        tokio::fs::write(dir.join(&file_name), content)
            .await
            .map_err(Error::Io)
            .map_err(tracerr::from_and_wrap!(=> media::Error))?;

        let base = self.config.base_url.trim_end_matches('/');
        // SAFETY: Built from a trimmed base URL and sanitized file name.
        #[expect(unsafe_code, reason = "invariants are preserved")]
        let url = unsafe {
            MediaUrl::new_unchecked(format!("{base}/{path_hint}/{file_name}"))
        };
        Ok(url)
    }
}

impl Media<Delete<MediaUrl>> for Local {
    type Ok = ();
    type Err = Traced<media::Error>;

    async fn execute(
        &self,
        Delete(url): Delete<MediaUrl>,
    ) -> Result<Self::Ok, Self::Err> {
        let base = self.config.base_url.trim_end_matches('/');
        let full: &str = url.as_ref();
        let rel = full
            .strip_prefix(base)
            .and_then(|rel| rel.strip_prefix('/'))
            .filter(|rel| !rel.split('/').any(|seg| seg == ".."))
            .ok_or_else(|| {
                tracerr::new!(media::Error::from(Error::ForeignUrl(
                    url.clone()
                )))
            })?;

        tokio::fs::remove_file(self.config.root.join(rel))
            .await
            .map_err(Error::Io)
            .map_err(tracerr::from_and_wrap!(=> media::Error))
    }
}

/// [`Local`] media storage error.
#[derive(Debug, Display, From, StdError)]
pub enum Error {
    /// File I/O failed.
    #[display("media file I/O failed: {_0}")]
    Io(io::Error),

    /// The URL does not belong to this storage.
    #[display("URL `{_0}` does not belong to this storage")]
    #[from(ignore)]
    ForeignUrl(#[error(not(source))] MediaUrl),
}

#[cfg(test)]
mod spec {
    use common::operations::Delete;

    use crate::{domain::listing::MediaUrl, infra::media, infra::Media as _};

    use super::{Config, Local};

    fn storage(root: &std::path::Path) -> Local {
        Local::new(Config {
            root: root.to_path_buf(),
            base_url: "/media".to_owned(),
        })
        .unwrap()
    }

    #[tokio::test]
    async fn upload_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let media = storage(dir.path());

        let url = media
            .execute(media::Upload {
                file_name: "façade avant.jpg".to_owned(),
                content: vec![0xff, 0xd8, 0xff],
                path_hint: "images",
            })
            .await
            .unwrap();
        assert!(url.to_string().starts_with("/media/images/"));
        assert!(url.to_string().ends_with("fa-ade-avant.jpg"));

        media.execute(Delete(url.clone())).await.unwrap();
        assert!(media.execute(Delete(url)).await.is_err());
    }

    #[tokio::test]
    async fn foreign_urls_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let media = storage(dir.path());

        for url in ["/elsewhere/images/a.jpg", "/media/../../etc/passwd"] {
            let url = MediaUrl::new(url).unwrap();
            assert!(media.execute(Delete(url)).await.is_err());
        }
    }
}
