//! Infrastructure layer.

pub mod media;
pub mod sessions;
pub mod store;

#[cfg(feature = "memory")]
pub use self::store::{memory, Memory};
pub use self::{
    media::{Local, Media},
    sessions::Sessions,
    store::Store,
};
