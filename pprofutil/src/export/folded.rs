use log::info;
use std::collections::BTreeMap;
use std::io::Write;

use crate::domain::ExportError;
use crate::profile::Profile;
use crate::symbol::Symbol;
use crate::walker::Sample;

/// Folded stack exporter
///
/// Accumulates walked samples and writes one line per unique stack:
///
/// ```text
/// main.main;main.work;runtime.mallocgc 70
/// ```
///
/// Frames are ordered outermost caller first and rendered with
/// [`Symbol::qualified_name`], so closures collapse into their parent frame
/// and packages sharing a short name stay apart. Values saturate at
/// `i64::MAX`.
#[derive(Debug, Default)]
pub struct FoldedStackExporter {
    /// Folded stack -> summed value. Ordered for deterministic output.
    stacks: BTreeMap<String, i64>,
}

impl FoldedStackExporter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect every non-empty sample of `profile`.
    #[must_use]
    pub fn from_profile(profile: &Profile) -> Self {
        let mut exporter = Self::new();
        profile.walk_samples(|sample| exporter.record(&sample));
        exporter
    }

    pub fn record(&mut self, sample: &Sample<'_>) {
        let folded = sample
            .stack
            .iter()
            .rev()
            .map(|line| frame_name(&line.function.name))
            .collect::<Vec<_>>()
            .join(";");
        let total = self.stacks.entry(folded).or_insert(0);
        *total = total.saturating_add(sample.value);
    }

    /// Number of unique stacks recorded.
    #[must_use]
    pub fn len(&self) -> usize {
        self.stacks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stacks.is_empty()
    }

    /// Write all recorded stacks.
    ///
    /// # Errors
    /// Returns an error if writing to `writer` fails.
    pub fn export<W: Write>(&self, mut writer: W) -> Result<(), ExportError> {
        for (stack, value) in &self.stacks {
            writeln!(writer, "{stack} {value}")?;
        }
        writer.flush()?;
        info!("Exported {} folded stacks", self.stacks.len());
        Ok(())
    }
}

fn frame_name(raw: &str) -> String {
    let sym = Symbol::parse(raw);
    if sym.is_empty() {
        raw.to_string()
    } else {
        sym.qualified_name()
    }
}
