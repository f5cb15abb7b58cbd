//! # pprofutil - Go Profile Symbol Decoding and Stack Walking
//!
//! Helpers for working with profiles produced by Go's `runtime/pprof`:
//!
//! - [`symbol`]: split linker function names such as
//!   `github.com/quasilyte/gogrep.(*matcher).matchNodeWithInst.func1` into
//!   package path, package name, receiver type and function name, folding
//!   compiler-generated closure suffixes back into their parent.
//! - [`walker`]: flatten each sample's locations (and inlined line entries)
//!   into one leaf-first stack and hand it to a visitor.
//!
//! Built on top of those:
//!
//! - [`analysis`]: hotspot aggregation by function, type or package
//! - [`export`]: folded stack output for flamegraph tools
//! - [`profile`]: the decoded profile data model and a JSON loader
//! - [`domain`]: structured error types
//! - [`cli`]: command-line argument parsing
//!
//! ## Example
//!
//! ```
//! use pprofutil::symbol::parse_func_name;
//!
//! let sym = parse_func_name("testing.(*B).launch");
//! assert_eq!(sym.pkg_path, "testing");
//! assert_eq!(sym.type_name, "B");
//! assert_eq!(sym.func_name, "launch");
//! ```
//!
//! ## Pipeline
//!
//! ```text
//! profile.json ──► Profile ──► walk_samples() ──► Sample { value, stack }
//!                                                     │
//!                                   parse_func_name() ┤
//!                                                     ├──► analyze_hotspots()
//!                                                     └──► FoldedStackExporter
//! ```

pub mod analysis;
pub mod cli;
pub mod domain;
pub mod export;
pub mod profile;
pub mod symbol;
pub mod walker;

pub use profile::Profile;
pub use symbol::{parse_func_name, Symbol};
pub use walker::{walk_samples, Sample};
