use std::path::Path;

use logging::trace_filter;

use crate::candidates::Candidates;
use crate::{FilterError, PathDecision, PatternList, SkipReason};

/// Decides whether a visited path is mirrored.
///
/// Exclude patterns are consulted first; when one matches, the include
/// patterns get a chance to reinstate the path. Include patterns never cause a
/// path that no exclude pattern matched to be skipped.
#[derive(Clone, Debug, Default)]
pub struct PathFilter {
    include: PatternList,
    exclude: PatternList,
}

impl PathFilter {
    /// Creates a filter from already compiled lists.
    #[must_use]
    pub const fn new(include: PatternList, exclude: PatternList) -> Self {
        Self { include, exclude }
    }

    /// Compiles both lists and creates a filter.
    pub fn from_patterns<I, E, S, T>(include: I, exclude: E) -> Result<Self, FilterError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
        E: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        Ok(Self::new(
            PatternList::compile(include)?,
            PatternList::compile(exclude)?,
        ))
    }

    /// Include patterns, in definition order.
    #[must_use]
    pub const fn include(&self) -> &PatternList {
        &self.include
    }

    /// Exclude patterns, in definition order.
    #[must_use]
    pub const fn exclude(&self) -> &PatternList {
        &self.exclude
    }

    /// Evaluates `path` (absolute) and `relative` (relative to the source
    /// root) against the lists.
    #[must_use]
    pub fn should_skip(&self, path: &Path, relative: &Path) -> PathDecision {
        let candidates = Candidates::new(path, relative);

        let Some(excluded_by) = self.exclude.first_match(&candidates) else {
            return PathDecision::Keep;
        };

        if let Some(included_by) = self.include.first_match(&candidates) {
            trace_filter!(
                "include '{}' overrides exclude '{}' for {}",
                included_by,
                excluded_by,
                path.display()
            );
            return PathDecision::Keep;
        }

        trace_filter!("exclude '{}' matched {}", excluded_by, path.display());
        PathDecision::Skip(SkipReason::Excluded {
            pattern: excluded_by.to_owned(),
        })
    }

    /// Like [`should_skip`](Self::should_skip) for a regular file of `len`
    /// bytes. Empty files are always skipped.
    #[must_use]
    pub fn should_skip_file(&self, path: &Path, relative: &Path, len: u64) -> PathDecision {
        if len == 0 {
            trace_filter!("skipping empty file {}", path.display());
            return PathDecision::Skip(SkipReason::Empty);
        }
        self.should_skip(path, relative)
    }
}
