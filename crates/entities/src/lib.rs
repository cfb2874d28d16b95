//! Core entity definitions for the user registry.
//!
//! This crate defines the record kept by the store along with the payload
//! shapes accepted when creating, replacing and patching it.

mod user;

pub use user::*;
