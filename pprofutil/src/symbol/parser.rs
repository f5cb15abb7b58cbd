use serde::Serialize;
use std::fmt;

/// Marker the Go compiler appends to name an anonymous function (`outer.func1`).
const CLOSURE_MARKER: &str = ".func";

/// A parsed `profile.proto` `Function.name`.
///
/// Every field borrows from the parsed string. A field is empty when it
/// cannot be determined; an entirely empty symbol means the name was
/// malformed (see [`Symbol::is_empty`]).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Symbol<'a> {
    /// Full import path, e.g. `github.com/quasilyte/gogrep`.
    pub pkg_path: &'a str,
    /// Last import path element, e.g. `gogrep`.
    pub pkg_name: &'a str,
    /// Receiver type for methods, empty for free functions.
    pub type_name: &'a str,
    /// Function or method name with closure suffixes stripped.
    pub func_name: &'a str,
}

impl<'a> Symbol<'a> {
    /// Parse a profile function name. Same as [`parse_func_name`].
    #[must_use]
    pub fn parse(name: &'a str) -> Self {
        parse_func_name(name)
    }

    /// True when no field could be determined.
    ///
    /// This is only produced for malformed receiver syntax (or an empty
    /// input). A bare name without dots still fills `func_name`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pkg_path.is_empty()
            && self.pkg_name.is_empty()
            && self.type_name.is_empty()
            && self.func_name.is_empty()
    }

    #[must_use]
    pub fn is_method(&self) -> bool {
        !self.type_name.is_empty()
    }

    /// Compact display form: `pkg.Type.func`, `pkg.func` or `func`.
    #[must_use]
    pub fn short_name(&self) -> String {
        self.to_string()
    }

    /// Display form keyed by the full import path: `path/pkg.Type.func`,
    /// `path/pkg.func` or `func`.
    ///
    /// Unlike [`Symbol::short_name`], packages that share a last path
    /// element (`errors` and `github.com/pkg/errors`) stay distinct.
    #[must_use]
    pub fn qualified_name(&self) -> String {
        let mut name = String::new();
        for part in [self.pkg_path, self.type_name] {
            if !part.is_empty() {
                name.push_str(part);
                name.push('.');
            }
        }
        name.push_str(self.func_name);
        name
    }
}

impl fmt::Display for Symbol<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.pkg_name.is_empty() {
            write!(f, "{}.", self.pkg_name)?;
        }
        if !self.type_name.is_empty() {
            write!(f, "{}.", self.type_name)?;
        }
        f.write_str(self.func_name)
    }
}

/// Parse a `profile.proto` `Function.name` into its components.
///
/// The expected shape is `[path/]pkg.[(recv).]func[.closure]*`, where the
/// receiver may be pointer-qualified (`(*T)`). Names of the form `x.y`
/// without parentheses are read as type `x` and method `y`, unless `y` is a
/// closure marker (`func1`, `func1.2`, ...), in which case `x` is the
/// function and the marker is dropped.
///
/// Never fails. Unmatched receiver parentheses yield an empty [`Symbol`].
///
/// ```
/// use pprofutil::symbol::parse_func_name;
///
/// let sym = parse_func_name("aaa/bbb.(*CCC).fff.func1");
/// assert_eq!(sym.pkg_path, "aaa/bbb");
/// assert_eq!(sym.pkg_name, "bbb");
/// assert_eq!(sym.type_name, "CCC");
/// assert_eq!(sym.func_name, "fff");
/// ```
#[must_use]
pub fn parse_func_name(s: &str) -> Symbol<'_> {
    let last_slash = s.rfind('/');
    let local = match last_slash {
        Some(pos) => &s[pos + 1..],
        None => s,
    };

    let Some(dot) = local.find('.') else {
        return Symbol { func_name: s, ..Symbol::default() };
    };

    let pkg_name = &local[..dot];
    let pkg_path = match last_slash {
        Some(pos) => &s[..pos + 1 + dot],
        None => pkg_name,
    };
    let rest = &local[dot + 1..];
    let mut sym = Symbol { pkg_path, pkg_name, ..Symbol::default() };

    // Explicit receiver: pkg.(T).m or pkg.(*T).m
    if let Some(recv) = rest.strip_prefix('(') {
        let recv = recv.strip_prefix('*').unwrap_or(recv);
        let Some(rparen) = recv.find(')') else {
            return Symbol::default();
        };
        sym.type_name = &recv[..rparen];
        let after = &recv[rparen + 1..];
        sym.func_name = trim_closure_suffix(after.strip_prefix('.').unwrap_or(after));
        return sym;
    }

    // `x.func1` is either method func1 on type x, or the first closure
    // inside function x. Methods named func<N> are rare, so prefer the
    // closure reading.
    let rest = trim_closure_suffix(rest);
    match rest.find('.') {
        Some(pos) => {
            sym.type_name = &rest[..pos];
            sym.func_name = &rest[pos + 1..];
        }
        None => sym.func_name = rest,
    }
    sym
}

/// Strip trailing closure suffixes from a function name.
///
/// Folds any chain of `.func<N>` markers and bare `.<N>` indices, so
/// `f.func1`, `f.func1.2`, `f.func10.func20.30` all become `f`. A name
/// that is itself `func<N>` (no leading dot) is kept. Idempotent.
#[must_use]
pub fn trim_closure_suffix(s: &str) -> &str {
    let mut name = s;
    loop {
        let head = name.trim_end_matches(|c: char| c.is_ascii_digit());
        if let Some(outer) = head.strip_suffix(CLOSURE_MARKER) {
            name = outer;
        } else if let Some(outer) = head.strip_suffix('.') {
            name = outer;
        } else {
            return name;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sym<'a>(pkg_path: &'a str, pkg_name: &'a str, type_name: &'a str, func_name: &'a str) -> Symbol<'a> {
        Symbol { pkg_path, pkg_name, type_name, func_name }
    }

    #[test]
    fn test_parse_func_name_table() {
        let tests = [
            ("", sym("", "", "", "")),
            ("indexbyte", sym("", "", "", "indexbyte")),
            ("strings.SplitN", sym("strings", "strings", "", "SplitN")),
            ("testing.(*B).launch", sym("testing", "testing", "B", "launch")),
            ("a.(Example).b", sym("a", "a", "Example", "b")),
            ("a.(Example).b.func1.1", sym("a", "a", "Example", "b")),
            ("runtime.gcBgMarkWorker.func2", sym("runtime", "runtime", "", "gcBgMarkWorker")),
            ("runtime.gcMarkDone.func1.1", sym("runtime", "runtime", "", "gcMarkDone")),
            (
                "github.com/quasilyte/gogrep.(*matcher).matchNodeWithInst",
                sym("github.com/quasilyte/gogrep", "gogrep", "matcher", "matchNodeWithInst"),
            ),
            (
                "github.com/quasilyte/gogrep.(*matcher).matchNodeWithInst.func1",
                sym("github.com/quasilyte/gogrep", "gogrep", "matcher", "matchNodeWithInst"),
            ),
            (
                "github.com/quasilyte/gogrep.(*matcher).matchNodeWithInst.func1.1",
                sym("github.com/quasilyte/gogrep", "gogrep", "matcher", "matchNodeWithInst"),
            ),
            ("aaa/bbb.(CCC).fff.func1", sym("aaa/bbb", "bbb", "CCC", "fff")),
            ("aaa/bbb.(*CCC).fff.func1", sym("aaa/bbb", "bbb", "CCC", "fff")),
            ("/aaa/bbb.(*CCC).fff.func1", sym("/aaa/bbb", "bbb", "CCC", "fff")),
            ("/aaa/bbb.(*CCC).fff.func10.20.30", sym("/aaa/bbb", "bbb", "CCC", "fff")),
            ("/aaa/bbb.(*CCC).fff.func10.func20.30", sym("/aaa/bbb", "bbb", "CCC", "fff")),
            ("/aaa/bbb.(*CCC).fff.func10.func20.func30", sym("/aaa/bbb", "bbb", "CCC", "fff")),
            ("/aaa/bbb.(*CCC).func10", sym("/aaa/bbb", "bbb", "CCC", "func10")),
            ("/aaa/bbb.(*CCC).func10.1", sym("/aaa/bbb", "bbb", "CCC", "func10")),
            ("/aaa/bbb.(*CCC).func10.func1", sym("/aaa/bbb", "bbb", "CCC", "func10")),
            ("aaa.com/bbb.ccc/ddd.(EEE).fff", sym("aaa.com/bbb.ccc/ddd", "ddd", "EEE", "fff")),
            ("aaa.com/bbb.ccc/ddd.EEE.fff", sym("aaa.com/bbb.ccc/ddd", "ddd", "EEE", "fff")),
            ("aaa.com/bbb.ccc/ddd.EEE.fff.func10", sym("aaa.com/bbb.ccc/ddd", "ddd", "EEE", "fff")),
            ("aaa.com/bbb.ccc/ddd.EEE.fff.func10.1", sym("aaa.com/bbb.ccc/ddd", "ddd", "EEE", "fff")),
            ("aaa.com/bbb.ccc/ddd.EEE.fff.func10.func1", sym("aaa.com/bbb.ccc/ddd", "ddd", "EEE", "fff")),
            ("reflectlite.flag.kind", sym("reflectlite", "reflectlite", "flag", "kind")),
            ("internal/reflectlite.flag.kind", sym("internal/reflectlite", "reflectlite", "flag", "kind")),
            // Ambiguous x.func1: closure wins unless the receiver is explicit.
            ("pkg.sym.func1", sym("pkg", "pkg", "", "sym")),
            ("pkg.(sym).func1", sym("pkg", "pkg", "sym", "func1")),
            ("aaa.com/bbb/pkg.sym.func1", sym("aaa.com/bbb/pkg", "pkg", "", "sym")),
            ("aaa.com/bbb/pkg.(sym).func1", sym("aaa.com/bbb/pkg", "pkg", "sym", "func1")),
            ("pkg.sym.func1.2", sym("pkg", "pkg", "", "sym")),
            ("pkg.(sym).func1.2", sym("pkg", "pkg", "sym", "func1")),
            ("aaa.com/bbb/pkg.sym.func1.2", sym("aaa.com/bbb/pkg", "pkg", "", "sym")),
            ("aaa.com/bbb/pkg.(sym).func1.2", sym("aaa.com/bbb/pkg", "pkg", "sym", "func1")),
            ("pkg.sym.func1.func2", sym("pkg", "pkg", "", "sym")),
            ("pkg.(sym).func1.func2", sym("pkg", "pkg", "sym", "func1")),
            ("aaa.com/bbb/pkg.sym.func1.func2", sym("aaa.com/bbb/pkg", "pkg", "", "sym")),
            ("aaa.com/bbb/pkg.(sym).func1.func2", sym("aaa.com/bbb/pkg", "pkg", "sym", "func1")),
        ];

        for (input, want) in tests {
            let have = parse_func_name(input);
            assert_eq!(have, want, "parse_func_name({input:?})");
        }
    }

    #[test]
    fn test_unmatched_paren_is_empty() {
        assert!(parse_func_name("pkg.(sym").is_empty());
        assert!(parse_func_name("aaa/bbb.(*CCC.fff").is_empty());
    }

    #[test]
    fn test_bare_name_is_not_failure() {
        let s = parse_func_name("indexbyte");
        assert!(!s.is_empty());
        assert_eq!(s.func_name, "indexbyte");
    }

    #[test]
    fn test_receiver_without_method() {
        assert_eq!(parse_func_name("pkg.(T)"), sym("pkg", "pkg", "T", ""));
        assert_eq!(parse_func_name("pkg.(*T)."), sym("pkg", "pkg", "T", ""));
    }

    #[test]
    fn test_receiver_followed_by_name_without_dot() {
        assert_eq!(parse_func_name("pkg.(T)xy"), sym("pkg", "pkg", "T", "xy"));
        assert_eq!(parse_func_name("pkg.(*T)xy.func1"), sym("pkg", "pkg", "T", "xy"));
    }

    #[test]
    fn test_pointer_receiver_matches_value_receiver() {
        let by_ptr = parse_func_name("net/http.(*Server).Serve");
        let by_val = parse_func_name("net/http.(Server).Serve");
        assert_eq!(by_ptr, by_val);
        assert_eq!(by_ptr.type_name, "Server");
    }

    #[test]
    fn test_pkg_name_is_last_path_segment() {
        for input in [
            "strings.SplitN",
            "aaa.com/bbb.ccc/ddd.EEE.fff",
            "/aaa/bbb.(*CCC).fff.func1",
            "internal/reflectlite.flag.kind",
        ] {
            let s = parse_func_name(input);
            assert_eq!(s.pkg_path.rsplit('/').next(), Some(s.pkg_name), "{input}");
        }
    }

    #[test]
    fn test_non_ascii_names() {
        let s = parse_func_name("例子/包.(*类型).方法.func1");
        assert_eq!(s, sym("例子/包", "包", "类型", "方法"));
    }

    #[test]
    fn test_trim_closure_suffix_chains() {
        for input in ["f.func10.20.30", "f.func10.func20.30", "f.func10.func20.func30", "f.func1", "f.1"] {
            assert_eq!(trim_closure_suffix(input), "f", "{input}");
        }
    }

    #[test]
    fn test_trim_closure_suffix_idempotent() {
        for input in ["f.func1.2", "func10", "abc123", "123", "", "Type.method"] {
            let once = trim_closure_suffix(input);
            assert_eq!(trim_closure_suffix(once), once, "{input}");
        }
    }

    #[test]
    fn test_trim_keeps_plain_names() {
        assert_eq!(trim_closure_suffix("func10"), "func10");
        assert_eq!(trim_closure_suffix("abc123"), "abc123");
        assert_eq!(trim_closure_suffix("123"), "123");
        assert_eq!(trim_closure_suffix(""), "");
    }

    #[test]
    fn test_display() {
        assert_eq!(parse_func_name("testing.(*B).launch").to_string(), "testing.B.launch");
        assert_eq!(parse_func_name("strings.SplitN").short_name(), "strings.SplitN");
        assert_eq!(parse_func_name("indexbyte").short_name(), "indexbyte");
    }

    #[test]
    fn test_qualified_name_keeps_full_path() {
        assert_eq!(
            parse_func_name("encoding/json.(*decodeState).object.func1").qualified_name(),
            "encoding/json.decodeState.object"
        );
        assert_eq!(parse_func_name("github.com/pkg/errors.New").qualified_name(), "github.com/pkg/errors.New");
        assert_eq!(parse_func_name("errors.New").qualified_name(), "errors.New");
        assert_eq!(parse_func_name("indexbyte").qualified_name(), "indexbyte");
    }

    #[test]
    fn test_serialize() {
        let json = serde_json::to_value(parse_func_name("testing.(*B).launch")).unwrap();
        assert_eq!(json["pkg_path"], "testing");
        assert_eq!(json["type_name"], "B");
        assert_eq!(json["func_name"], "launch");
    }
}
