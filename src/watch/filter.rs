// src/watch/filter.rs

//! Ignore-pattern matching for changed paths.

use std::fmt;
use std::path::Path;

use globset::{GlobBuilder, GlobMatcher};

use crate::errors::{GowatchError, Result};

/// Ordered list of compiled ignore globs.
///
/// Patterns use shell glob semantics (`*`, `?`, `[...]`) where `*` never
/// crosses a path separator. A path is ignored when any pattern matches
/// either the whole path or its final component, so `*_test.go` ignores
/// `/proj/pkg/main_test.go` while `/proj/vendor/*` only matches entries
/// directly under that directory.
#[derive(Clone, Default)]
pub struct PathFilter {
    patterns: Vec<(String, GlobMatcher)>,
}

impl fmt::Debug for PathFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PathFilter")
            .field("patterns", &self.patterns().collect::<Vec<_>>())
            .finish()
    }
}

impl PathFilter {
    /// Compile all patterns, failing on the first malformed one.
    pub fn new<I, S>(patterns: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut compiled = Vec::new();
        for pattern in patterns {
            let pattern = pattern.as_ref();
            let glob = GlobBuilder::new(pattern)
                .literal_separator(true)
                .build()
                .map_err(|source| GowatchError::Pattern {
                    pattern: pattern.to_string(),
                    source,
                })?;
            compiled.push((pattern.to_string(), glob.compile_matcher()));
        }
        Ok(Self { patterns: compiled })
    }

    /// The configured patterns, in order.
    pub fn patterns(&self) -> impl Iterator<Item = &str> {
        self.patterns.iter().map(|(raw, _)| raw.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// First pattern matching `path`, if any.
    pub fn matching_pattern(&self, path: &Path) -> Option<&str> {
        let name = path.file_name().map(Path::new);
        self.patterns
            .iter()
            .find(|(_, matcher)| {
                matcher.is_match(path) || name.is_some_and(|n| matcher.is_match(n))
            })
            .map(|(raw, _)| raw.as_str())
    }

    pub fn should_ignore(&self, path: &Path) -> bool {
        self.matching_pattern(path).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_on_file_name_or_full_path() {
        let filter = PathFilter::new(["*_test.go", "/proj/vendor/*"]).unwrap();

        assert!(filter.should_ignore(Path::new("/proj/main_test.go")));
        assert!(filter.should_ignore(Path::new("/proj/pkg/a/b_test.go")));
        assert!(filter.should_ignore(Path::new("/proj/vendor/lib.go")));
        assert!(!filter.should_ignore(Path::new("/proj/vendor/x/lib.go")));
        assert!(!filter.should_ignore(Path::new("/proj/main.go")));
    }

    #[test]
    fn star_does_not_cross_separators() {
        let filter = PathFilter::new(["/proj/*.go"]).unwrap();
        assert!(filter.should_ignore(Path::new("/proj/main.go")));
        assert!(!filter.should_ignore(Path::new("/proj/cmd/main.go")));
    }

    #[test]
    fn question_mark_and_classes() {
        let filter = PathFilter::new(["gen?.go", "[ab]_*.go"]).unwrap();
        assert!(filter.should_ignore(Path::new("/p/gen1.go")));
        assert!(!filter.should_ignore(Path::new("/p/gen12.go")));
        assert!(filter.should_ignore(Path::new("/p/a_x.go")));
        assert!(!filter.should_ignore(Path::new("/p/c_x.go")));
    }

    #[test]
    fn malformed_pattern_is_reported_by_name() {
        let err = PathFilter::new(["*.tmp", "[unclosed"]).unwrap_err();
        match err {
            GowatchError::Pattern { pattern, .. } => assert_eq!(pattern, "[unclosed"),
            other => panic!("expected Pattern error, got {other:?}"),
        }
    }

    #[test]
    fn empty_filter_ignores_nothing() {
        let filter = PathFilter::new(Vec::<String>::new()).unwrap();
        assert!(filter.is_empty());
        assert!(!filter.should_ignore(Path::new("/proj/main.go")));
    }

    #[test]
    fn reports_first_matching_pattern() {
        let filter = PathFilter::new(["*.go", "main.*"]).unwrap();
        assert_eq!(filter.matching_pattern(Path::new("/p/main.go")), Some("*.go"));
        assert_eq!(filter.matching_pattern(Path::new("/p/main.rs")), Some("main.*"));
    }
}
