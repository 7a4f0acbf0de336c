use std::path::{Component, Path};

use globset::Candidate;

/// A single string a pattern is tested against.
pub(crate) struct MatchCandidate<'a> {
    pub(crate) path: &'a Path,
    pub(crate) glob: Candidate<'a>,
}

/// The candidates derived from one visited path.
///
/// Order: absolute path, relative path, then each relative component from the
/// root downwards. Duplicates are dropped so a single-component relative path
/// is only tested once.
pub(crate) struct Candidates<'a> {
    items: Vec<MatchCandidate<'a>>,
}

impl<'a> Candidates<'a> {
    pub(crate) fn new(path: &'a Path, relative: &'a Path) -> Self {
        let mut items = Vec::with_capacity(2 + relative.components().count());
        items.push(MatchCandidate::new(path));

        if !relative.as_os_str().is_empty() && relative != path {
            items.push(MatchCandidate::new(relative));
        }

        if relative.components().nth(1).is_some() {
            for component in relative.components() {
                if let Component::Normal(name) = component {
                    items.push(MatchCandidate::new(Path::new(name)));
                }
            }
        }

        Self { items }
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &MatchCandidate<'a>> {
        self.items.iter()
    }
}

impl<'a> MatchCandidate<'a> {
    fn new(path: &'a Path) -> Self {
        Self {
            path,
            glob: Candidate::new(path),
        }
    }
}
