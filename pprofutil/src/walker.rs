//! Sample stack flattening
//!
//! A pprof sample stores its call stack as a list of locations, and each
//! location may expand into several line entries when calls were inlined.
//! Most consumers only want one flat list of frames per sample, which is
//! what [`walk_samples`] and [`Samples`] produce.
//!
//! ```text
//! sample.location = [ loc A (2 lines: a1, a2), loc B (1 line: b1) ]
//!                              │
//!                              ▼
//! Sample.stack    = [ a1, a2, b1 ]     leaf first, outermost caller last
//! ```

use log::debug;

use crate::profile::{Line, Profile, RawSample};

/// Index into `RawSample::value` reported by the walker.
///
/// Go CPU profiles record `[samples/count, cpu/nanoseconds]`, so column 1
/// is the time spent.
const VALUE_INDEX: usize = 1;

/// One flattened sample.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sample<'a> {
    /// Second value column of the raw sample, e.g. CPU nanoseconds.
    pub value: i64,

    /// Line entries for this sample.
    /// `stack[0]` is the current function, `stack[1..]` are its callers.
    ///
    /// Never empty for samples produced by this module.
    pub stack: Vec<&'a Line>,
}

impl<'a> Sample<'a> {
    /// The innermost frame, `None` only for a hand-built empty stack.
    #[must_use]
    pub fn leaf(&self) -> Option<&'a Line> {
        self.stack.first().copied()
    }
}

/// Iterator over the flattened, non-empty samples of a profile.
///
/// Samples with no locations, or whose leaf location has no line entries,
/// are skipped.
pub struct Samples<I> {
    raw: I,
    skipped: usize,
}

impl<I: Iterator> Samples<I> {
    pub fn new<T>(samples: T) -> Self
    where
        T: IntoIterator<IntoIter = I>,
    {
        Self { raw: samples.into_iter(), skipped: 0 }
    }

    /// Number of raw samples skipped so far for having an empty stack.
    #[must_use]
    pub fn skipped(&self) -> usize {
        self.skipped
    }
}

impl<'a, I> Iterator for Samples<I>
where
    I: Iterator<Item = &'a RawSample>,
{
    type Item = Sample<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let raw = self.raw.next()?;
            match raw.location.first() {
                Some(leaf) if !leaf.line.is_empty() => return Some(flatten(raw)),
                _ => self.skipped += 1,
            }
        }
    }
}

fn flatten(raw: &RawSample) -> Sample<'_> {
    let value = raw.value.get(VALUE_INDEX).copied().unwrap_or_else(|| {
        debug!("Sample has {} value columns, reporting 0", raw.value.len());
        0
    });
    let stack = raw.location.iter().flat_map(|loc| loc.line.iter()).collect();
    Sample { value, stack }
}

/// Call `visit` once for every sample with a non-empty stack, in order.
///
/// Each visited [`Sample`] owns its stack vector, so it may outlive the
/// callback (but not the samples it borrows from).
pub fn walk_samples<'a, T, F>(samples: T, mut visit: F)
where
    T: IntoIterator<Item = &'a RawSample>,
    F: FnMut(Sample<'a>),
{
    let mut iter = Samples::new(samples);
    for sample in iter.by_ref() {
        visit(sample);
    }
    if iter.skipped() > 0 {
        debug!("Skipped {} samples with empty stacks", iter.skipped());
    }
}

impl Profile {
    /// Walk this profile's samples. See [`walk_samples`].
    pub fn walk_samples<'a, F>(&'a self, visit: F)
    where
        F: FnMut(Sample<'a>),
    {
        walk_samples(&self.sample, visit);
    }

    /// Iterate this profile's flattened samples.
    #[must_use]
    pub fn samples(&self) -> Samples<std::slice::Iter<'_, RawSample>> {
        Samples::new(&self.sample)
    }
}
