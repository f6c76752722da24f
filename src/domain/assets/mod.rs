//! Assets module - Environment-aware resolution of therapist photo paths.
//!
//! The hosting page tells us two things: whether it was opened from a local
//! file, and the hostname it was served from. Both arrive as an explicit
//! [`RuntimeEnvironment`] value; nothing here reads global state.

mod resolver;

pub use resolver::{AssetPathResolver, AssetPaths, RuntimeEnvironment};
