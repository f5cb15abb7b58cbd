use std::sync::Arc;

/// Describes one column of `RawSample::value` (e.g. `cpu`/`nanoseconds`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValueType {
    pub kind: String,
    pub unit: String,
}

/// A function from the profile's function table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Function {
    pub id: u64,
    /// Linker name, e.g. `net/http.(*conn).serve`.
    pub name: String,
    pub system_name: String,
    pub filename: String,
    pub start_line: i64,
}

/// A single source line within a location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub function: Arc<Function>,
    pub line: i64,
}

/// A program location.
///
/// When functions were inlined, `line` holds several entries: `line[0]` is
/// the innermost inlined function, the last entry is the caller it was
/// inlined into.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Location {
    pub id: u64,
    pub address: u64,
    pub line: Vec<Line>,
}

/// A sample as recorded in the profile.
///
/// `location[0]` is the leaf frame, the last entry is the outermost caller.
/// `value` has one entry per [`Profile::sample_type`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawSample {
    pub value: Vec<i64>,
    pub location: Vec<Arc<Location>>,
}

/// A decoded profile.
#[derive(Debug, Clone, Default)]
pub struct Profile {
    pub sample_type: Vec<ValueType>,
    pub sample: Vec<RawSample>,
    pub location: Vec<Arc<Location>>,
    pub function: Vec<Arc<Function>>,
}

impl Profile {
    /// Type of the value reported by the sample walker (column 1), if the
    /// profile declares one.
    #[must_use]
    pub fn walked_value_type(&self) -> Option<&ValueType> {
        self.sample_type.get(1)
    }
}
