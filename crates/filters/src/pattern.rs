use std::ffi::OsStr;
use std::sync::Arc;

use globset::{GlobBuilder, GlobMatcher};

use crate::FilterError;
use crate::candidates::{Candidates, MatchCandidate};

/// Compiled, ordered list of shell glob patterns.
///
/// Supported syntax is `*`, `?`, character classes (`[a-z]`, `[!a-z]`) and
/// `\` escapes. `PatternList` is cheaply cloneable (the compiled matchers live
/// behind an [`Arc`]).
///
/// # Examples
///
/// ```
/// use filters::PatternList;
///
/// let list = PatternList::compile(["*.iso", "*.png"]).unwrap();
/// assert_eq!(list.len(), 2);
/// assert!(PatternList::compile(["src/**"]).is_err());
/// ```
#[derive(Clone, Debug, Default)]
pub struct PatternList {
    patterns: Arc<[CompiledPattern]>,
}

#[derive(Debug)]
struct CompiledPattern {
    text: String,
    matcher: GlobMatcher,
}

impl PatternList {
    /// Compiles `patterns` in order. Empty strings are ignored.
    pub fn compile<I, S>(patterns: I) -> Result<Self, FilterError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut compiled = Vec::new();
        for pattern in patterns {
            let text = pattern.as_ref();
            if text.is_empty() {
                continue;
            }
            compiled.push(CompiledPattern::new(text)?);
        }

        Ok(Self {
            patterns: compiled.into(),
        })
    }

    /// Returns `true` when the list holds no patterns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Number of compiled patterns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Iterates over the original pattern text in definition order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.patterns.iter().map(|pattern| pattern.text.as_str())
    }

    /// Returns the first pattern, in definition order, matching any candidate.
    pub(crate) fn first_match(&self, candidates: &Candidates<'_>) -> Option<&str> {
        self.patterns
            .iter()
            .find(|pattern| candidates.iter().any(|candidate| pattern.matches(candidate)))
            .map(|pattern| pattern.text.as_str())
    }
}

impl CompiledPattern {
    fn new(text: &str) -> Result<Self, FilterError> {
        if text.contains("**") {
            return Err(FilterError::RecursiveWildcard {
                pattern: text.to_owned(),
            });
        }

        let glob = GlobBuilder::new(text)
            .case_insensitive(false)
            .literal_separator(true)
            .backslash_escape(true)
            .build()
            .map_err(|source| FilterError::InvalidGlob {
                pattern: text.to_owned(),
                source,
            })?;

        Ok(Self {
            text: text.to_owned(),
            matcher: glob.compile_matcher(),
        })
    }

    fn matches(&self, candidate: &MatchCandidate<'_>) -> bool {
        candidate.path.as_os_str() == OsStr::new(&self.text)
            || self.matcher.is_match_candidate(&candidate.glob)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn matches(pattern: &str, path: &str, relative: &str) -> bool {
        let list = PatternList::compile([pattern]).expect("pattern compiles");
        list.first_match(&Candidates::new(Path::new(path), Path::new(relative)))
            .is_some()
    }

    #[test]
    fn empty_patterns_are_ignored() {
        let list = PatternList::compile(["", "*.iso", ""]).expect("compiles");
        assert_eq!(list.iter().collect::<Vec<_>>(), vec!["*.iso"]);
    }

    #[test]
    fn star_does_not_cross_separator() {
        assert!(!matches("a*c", "/r/a/c", "a/c"));
        assert!(matches("a*c", "/r/abc", "abc"));
    }

    #[test]
    fn component_match_applies_at_any_depth() {
        assert!(matches(".git", "/r/x/.git/config", "x/.git/config"));
        assert!(matches("*.iso", "/r/sub/b.iso", "sub/b.iso"));
    }

    #[test]
    fn relative_path_pattern_matches() {
        assert!(matches("sub/*.iso", "/r/sub/b.iso", "sub/b.iso"));
        assert!(!matches("sub/*.iso", "/r/other/b.iso", "other/b.iso"));
    }

    #[test]
    fn absolute_pattern_matches_full_path() {
        assert!(matches("/r/sub", "/r/sub", "sub"));
        assert!(!matches("/r/sub", "/q/sub", "sub"));
    }

    #[test]
    fn matching_is_case_sensitive() {
        assert!(!matches("*.ISO", "/r/b.iso", "b.iso"));
    }

    #[test]
    fn character_classes_and_question_marks() {
        assert!(matches("file[0-9].txt", "/r/file7.txt", "file7.txt"));
        assert!(!matches("file[!0-9].txt", "/r/file7.txt", "file7.txt"));
        assert!(matches("?.txt", "/r/a.txt", "a.txt"));
    }

    #[test]
    fn literal_text_matches_even_with_metacharacters() {
        assert!(matches("[draft]", "/r/[draft]", "[draft]"));
    }

    #[test]
    fn recursive_wildcard_is_rejected() {
        let error = PatternList::compile(["ok", "a/**/b"]).expect_err("rejected");
        assert!(matches!(error, FilterError::RecursiveWildcard { .. }));
        assert_eq!(error.pattern(), "a/**/b");
    }

    #[test]
    fn malformed_class_is_rejected() {
        let error = PatternList::compile(["[abc"]).expect_err("rejected");
        assert!(matches!(error, FilterError::InvalidGlob { .. }));
    }

    #[test]
    fn first_match_respects_definition_order() {
        let list = PatternList::compile(["*.txt", "a.*"]).expect("compiles");
        let candidates = Candidates::new(Path::new("/r/a.txt"), Path::new("a.txt"));
        assert_eq!(list.first_match(&candidates), Some("*.txt"));
    }
}
