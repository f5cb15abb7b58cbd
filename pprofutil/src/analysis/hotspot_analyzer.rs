//! Hotspot analysis for profiling data.
//!
//! This module aggregates flattened samples by the leaf frame's parsed symbol
//! to identify hotspots: the functions, types or packages whose own code
//! accounts for the largest share of the sampled value.
//!
//! # Architecture
//!
//! - **`HotspotStats`** - Incremental aggregation, one sample at a time
//! - **`analyze_hotspots()`** - Batch analysis of a whole `Profile`
//!
//! ## Data Flow
//!
//! ```text
//! Profile.sample
//!     │
//!     ├──► walk_samples()          ← flatten stack, skip empty samples
//!     │
//!     ├──► parse_func_name(leaf)   ← pkg / type / func
//!     │
//!     └──► HotspotStats.record()   ← sum values per group key
//! ```
//!
//! # Performance
//!
//! - `record()`: O(1) amortized (HashMap insert/update)
//! - `to_hotspots()`: O(n log n) where n = unique group keys (sorting)

// Percentage calculations intentionally convert i64 to f64
#![allow(clippy::cast_precision_loss)]

use clap::ValueEnum;
use std::collections::HashMap;

use crate::profile::Profile;
use crate::symbol::Symbol;
use crate::walker::Sample;

// =============================================================================
// GROUPING
// =============================================================================

/// How samples are bucketed into hotspots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum GroupBy {
    /// `path/pkg.Type.method` or `path/pkg.func`, closures folded into their parent.
    #[default]
    Function,
    /// `path/pkg.Type` for methods. Free functions are grouped under `path/pkg`.
    Type,
    /// Full package import path.
    Package,
}

impl GroupBy {
    /// Group key for a parsed symbol, falling back to the raw function name
    /// when the symbol lacks the needed parts.
    fn key(self, sym: &Symbol<'_>, raw_name: &str) -> String {
        let key = match self {
            GroupBy::Function => sym.qualified_name(),
            GroupBy::Type if sym.is_method() => format!("{}.{}", sym.pkg_path, sym.type_name),
            GroupBy::Type => sym.pkg_path.to_string(),
            GroupBy::Package => sym.pkg_path.to_string(),
        };
        if key.is_empty() {
            raw_name.to_string()
        } else {
            key
        }
    }
}

// =============================================================================
// HOTSPOT (OUTPUT TYPE)
// =============================================================================

/// An aggregated hotspot, ready for display.
///
/// ```text
/// VALUE          %      SAMPLES  NAME
/// 1.20s      42.3%         120   runtime.mallocgc
/// 530.00ms   18.7%          53   encoding/json.decodeState.object
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Hotspot {
    /// Group key (see [`GroupBy`]).
    pub name: String,

    /// Sum of sample values whose leaf falls into this group, saturating
    /// at `i64::MAX`.
    pub value: i64,

    /// Number of samples whose leaf falls into this group.
    pub count: usize,

    /// Share of the total value (0.0 - 100.0).
    pub percentage: f64,

    /// Source file of the first leaf seen for this group.
    pub file: Option<String>,

    /// Line number of the first leaf seen for this group.
    pub line: Option<i64>,
}

// =============================================================================
// HOTSPOT STATS (AGGREGATOR)
// =============================================================================

/// Incremental hotspot aggregator.
#[derive(Debug, Default)]
pub struct HotspotStats {
    group_by: GroupBy,
    groups: HashMap<String, GroupStats>,
    total_value: i64,
    total_samples: usize,
}

#[derive(Debug, Clone)]
struct GroupStats {
    value: i64,
    count: usize,
    file: Option<String>,
    line: Option<i64>,
}

impl HotspotStats {
    #[must_use]
    pub fn new(group_by: GroupBy) -> Self {
        Self { group_by, ..Self::default() }
    }

    /// Record one flattened sample under its leaf frame.
    pub fn record(&mut self, sample: &Sample<'_>) {
        let Some(leaf) = sample.stack.first() else {
            return;
        };

        self.total_value = self.total_value.saturating_add(sample.value);
        self.total_samples += 1;

        let raw_name = leaf.function.name.as_str();
        let key = self.group_by.key(&Symbol::parse(raw_name), raw_name);

        let stats = self.groups.entry(key).or_insert_with(|| GroupStats {
            value: 0,
            count: 0,
            file: Some(leaf.function.filename.clone()).filter(|f| !f.is_empty()),
            line: Some(leaf.line).filter(|&l| l > 0),
        });
        stats.value = stats.value.saturating_add(sample.value);
        stats.count += 1;
    }

    #[must_use]
    pub fn total_value(&self) -> i64 {
        self.total_value
    }

    #[must_use]
    pub fn total_samples(&self) -> usize {
        self.total_samples
    }

    /// Hotspots sorted by value (descending), ties broken by name.
    #[must_use]
    pub fn to_hotspots(&self) -> Vec<Hotspot> {
        let mut hotspots: Vec<Hotspot> = self
            .groups
            .iter()
            .map(|(name, stats)| Hotspot {
                name: name.clone(),
                value: stats.value,
                count: stats.count,
                percentage: if self.total_value > 0 {
                    (stats.value as f64 / self.total_value as f64) * 100.0
                } else {
                    0.0
                },
                file: stats.file.clone(),
                line: stats.line,
            })
            .collect();

        hotspots.sort_unstable_by(|a, b| b.value.cmp(&a.value).then_with(|| a.name.cmp(&b.name)));
        hotspots
    }
}

// =============================================================================
// BATCH ANALYSIS
// =============================================================================

/// Analyze a profile to identify hotspots (batch analysis).
///
/// Samples with empty stacks are ignored, like in
/// [`walk_samples`](crate::walker::walk_samples).
#[must_use]
pub fn analyze_hotspots(profile: &Profile, group_by: GroupBy) -> Vec<Hotspot> {
    let mut stats = HotspotStats::new(group_by);
    profile.walk_samples(|sample| stats.record(&sample));
    stats.to_hotspots()
}
