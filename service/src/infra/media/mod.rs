//! Media storage implementations.

pub mod local;

use derive_more::{Debug, Display, Error as StdError, From};

pub use self::local::Local;

/// Media storage operation.
pub use common::Handler as Media;

/// Maximum accepted size of an uploaded video, in bytes.
///
/// The limit is enforced by the calling command, not by the storage itself.
pub const MAX_VIDEO_BYTES: usize = 100 * 1024 * 1024;

/// Operation to upload a media file.
#[derive(Clone, Debug)]
pub struct Upload {
    /// Display name of the uploaded file.
    pub file_name: String,

    /// Raw content of the uploaded file.
    #[debug(skip)]
    pub content: Vec<u8>,

    /// Directory hint the file should be stored under.
    pub path_hint: &'static str,
}

/// [`Media`] error.
#[derive(Debug, Display, From, StdError)]
pub enum Error {
    /// [`Local`] error.
    Local(local::Error),
}
