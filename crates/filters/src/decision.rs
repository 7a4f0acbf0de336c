/// Outcome of evaluating a path against the include/exclude lists.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PathDecision {
    /// The path is mirrored (or, for directories, descended into).
    Keep,
    /// The path is skipped; directories prune their whole subtree.
    Skip(SkipReason),
}

impl PathDecision {
    /// Returns `true` when the path should not be mirrored.
    #[must_use]
    pub const fn is_skip(&self) -> bool {
        matches!(self, Self::Skip(_))
    }
}

/// Explains why a path was skipped.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SkipReason {
    /// An exclude pattern matched and no include pattern reinstated the path.
    Excluded {
        /// Text of the first exclude pattern that matched.
        pattern: String,
    },
    /// The file has no content.
    Empty,
}
