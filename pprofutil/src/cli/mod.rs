//! Command-line interface for pprofutil
//!
//! This module contains CLI argument parsing and configuration

pub mod args;

pub use args::{Args, Command};
