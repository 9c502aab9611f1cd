//! Infrastructure adapters for cleandroid.
//!
//! This crate implements the ports defined in `cleandroid_core::application::ports`.
//! It contains all I/O: the real and in-memory filesystems and project file
//! discovery.

pub mod filesystem;
pub mod locator;

pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use locator::WalkdirLocator;
