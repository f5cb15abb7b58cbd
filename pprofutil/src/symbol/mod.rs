//! # Go Function Name Decomposition
//!
//! Profiles written by the Go runtime record each function under its linker
//! name, for example:
//!
//! ```text
//! github.com/quasilyte/gogrep.(*matcher).matchNodeWithInst.func1
//! └──────────┬──────────────┘ └───┬────┘ └───────┬───────┘ └─┬─┘
//!       package path           receiver       method        closure
//! ```
//!
//! This module splits such names into a [`Symbol`] so reports can group
//! samples by package, type or function.
//!
//! ## Grammar
//!
//! ```text
//! [path-prefix/]pkg.[(recv).]func[.closure-suffix]*
//! ```
//!
//! - The package name is the text up to the first `.` after the last `/`.
//!   Dots before the last `/` belong to the path (`gopkg.in/yaml.v3`).
//! - An explicit receiver is parenthesized and may be pointer-qualified.
//! - Closures are named `outer.func1`, nested ones `outer.func1.2` or
//!   `outer.func1.func2`. All of these fold back to `outer`.
//!
//! ## Ambiguity
//!
//! Value-receiver methods may also appear without parentheses
//! (`reflectlite.flag.kind`), which makes `x.func1` ambiguous between
//! "method `func1` of type `x`" and "first closure inside `x`". The parser
//! always picks the closure reading unless the receiver is parenthesized.
//! See <https://groups.google.com/g/golang-nuts/c/sAY9RDSfZX8>.

pub mod parser;

pub use parser::{parse_func_name, trim_closure_suffix, Symbol};
