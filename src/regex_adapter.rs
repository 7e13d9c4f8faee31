/// Thin wrapper around the host regex engine: compiles a pattern under the
/// process-wide flag triple and iterates non-overlapping, leftmost matches
/// over a byte slice.
use crate::error::{Result, SrekError};
pub use regex::bytes::Regex;
use regex::bytes::RegexBuilder;

/// The three CLI flags that affect every compiled pattern for a run.
#[derive(Debug, Clone, Copy)]
pub struct RegexFlags {
    pub ignorecase: bool,
    pub extended: bool,
    pub regnewline: bool,
}

impl Default for RegexFlags {
    fn default() -> Self {
        RegexFlags {
            ignorecase: false,
            extended: true,
            regnewline: false,
        }
    }
}

/// Compiles `pattern` under `flags`.
///
/// `flags.extended` has no effect on the underlying engine's grammar: the
/// `regex` crate only accepts one (ERE/PCRE-flavored) syntax, so the
/// POSIX basic-vs-extended distinction is a documented syntax-compatibility
/// gap rather than a behavioral one (see DESIGN.md).
pub fn compile(pattern: &str, flags: RegexFlags) -> Result<Regex> {
    RegexBuilder::new(pattern)
        .case_insensitive(flags.ignorecase)
        .dot_matches_new_line(!flags.regnewline)
        .build()
        .map_err(|e| SrekError::RegexCompileFailed {
            pattern: pattern.to_string(),
            message: e.to_string(),
        })
}

/// Non-overlapping leftmost matches over `slice`. Zero-length matches are
/// skipped and the search cursor is advanced by one byte past them, so the
/// iteration always terminates.
pub fn find_all(regex: &Regex, slice: &[u8]) -> Vec<(usize, usize)> {
    let mut out = Vec::new();
    let mut pos = 0;
    while pos <= slice.len() {
        let m = match regex.find_at(slice, pos) {
            Some(m) => m,
            None => break,
        };
        if m.end() == m.start() {
            pos = m.start() + 1;
            continue;
        }
        out.push((m.start(), m.end()));
        pos = m.end();
    }
    out
}
