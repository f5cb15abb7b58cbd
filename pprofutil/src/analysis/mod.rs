//! Analysis logic for profiling data
//!
//! This module contains pure logic for summarizing profiles, separated from
//! the CLI presentation layer.

pub mod hotspot_analyzer;

pub use hotspot_analyzer::{analyze_hotspots, GroupBy, Hotspot, HotspotStats};
