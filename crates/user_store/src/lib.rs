//! User storage for the user registry.
//!
//! This crate provides the storage abstraction behind the HTTP surface. The
//! only backend is an in-memory store that lives as long as the process.

mod error;
mod memory;
mod traits;

pub use error::*;
pub use memory::*;
pub use traits::*;
