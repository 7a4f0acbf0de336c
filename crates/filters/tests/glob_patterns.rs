//! Glob syntax as seen through [`PathFilter`].

use std::path::{Path, PathBuf};

use filters::{FilterError, OperationFilter, PathFilter, PatternList};

const ROOT: &str = "/srv/data";

fn skipped(exclude: &[&str], relative: &str) -> bool {
    let filter = PathFilter::from_patterns::<_, _, &str, _>([], exclude).expect("patterns compile");
    let path = PathBuf::from(ROOT).join(relative);
    filter.should_skip(&path, Path::new(relative)).is_skip()
}

// ==================== Wildcards ====================

#[test]
fn star_does_not_cross_separators() {
    assert!(skipped(&["*.log"], "debug.log"));
    assert!(skipped(&["*.log"], "nested/deeper/debug.log"));
    assert!(!skipped(&["logs/*.log"], "logs/nested/debug.log"));
    assert!(skipped(&["logs/*.log"], "logs/debug.log"));
}

#[test]
fn question_mark_matches_one_character() {
    assert!(skipped(&["file?.txt"], "file1.txt"));
    assert!(!skipped(&["file?.txt"], "file10.txt"));
}

#[test]
fn character_classes_and_negation() {
    assert!(skipped(&["[ab].txt"], "a.txt"));
    assert!(!skipped(&["[ab].txt"], "c.txt"));
    assert!(skipped(&["[!ab].txt"], "c.txt"));
    assert!(!skipped(&["[!ab].txt"], "b.txt"));
}

#[test]
fn escaped_metacharacters_are_literal() {
    assert!(skipped(&[r"report\*.pdf"], "report*.pdf"));
    assert!(!skipped(&[r"report\*.pdf"], "report-final.pdf"));
}

#[test]
fn absolute_patterns_match_absolute_paths() {
    assert!(skipped(&["/srv/data/cache"], "cache"));
    assert!(skipped(&["/srv/data/*/tmp"], "build/tmp"));
    assert!(!skipped(&["/other/cache"], "cache"));
}

#[test]
fn matching_is_case_sensitive() {
    assert!(!skipped(&["*.LOG"], "debug.log"));
}

// ==================== Compilation ====================

#[test]
fn recursive_wildcard_is_rejected_with_its_text() {
    let error = PatternList::compile(["*.tmp", "cache/**/x"]).expect_err("`**` is rejected");
    assert!(matches!(error, FilterError::RecursiveWildcard { .. }));
    assert_eq!(error.pattern(), "cache/**/x");
}

#[test]
fn malformed_class_is_rejected() {
    let error = PatternList::compile(["[abc"]).expect_err("unterminated class");
    assert!(matches!(error, FilterError::InvalidGlob { .. }));
    assert!(error.to_string().contains("[abc"));
}

#[test]
fn empty_patterns_are_ignored() {
    let list = PatternList::compile(["", "*.iso", ""]).expect("compiles");
    assert_eq!(list.iter().collect::<Vec<_>>(), ["*.iso"]);
}

// ==================== Operations ====================

#[test]
fn operation_lists_use_the_same_candidates() {
    let filter = OperationFilter::new(
        PatternList::compile(["media"]).expect("compiles"),
        PatternList::default(),
    );
    let ops = filter.resolve(
        Path::new("/srv/data/media/clip.mov"),
        Path::new("media/clip.mov"),
    );
    assert!(!ops.compress);
    assert!(ops.encrypt);
}
