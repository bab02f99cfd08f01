//! Static configuration registries consulted read-only by the pipeline.

pub mod category;
pub mod location;
