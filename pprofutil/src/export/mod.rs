//! Stack export functionality
//!
//! This module provides functionality for exporting walked samples to other
//! tools. Currently supports the folded ("collapsed") stack format consumed by
//! `flamegraph.pl`, inferno and speedscope.

pub mod folded;

pub use folded::FoldedStackExporter;
