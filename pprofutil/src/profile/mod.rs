//! Profile data model
//!
//! An in-memory, already-decoded view of a pprof profile: samples point at
//! locations, locations carry one line entry per (possibly inlined) frame,
//! and line entries point at functions. Nothing in this crate decodes the
//! protobuf wire format; [`loader`] only reads a normalized JSON rendition
//! of the same tables, which is what the CLI and the tests consume.

pub mod loader;
pub mod model;

pub use model::{Function, Line, Location, Profile, RawSample, ValueType};
