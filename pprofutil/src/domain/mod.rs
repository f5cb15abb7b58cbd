//! Domain model for pprofutil
//!
//! This module contains the structured error types shared by the profile
//! loader and the exporters.

pub mod errors;

pub use errors::{ExportError, ProfileError};
