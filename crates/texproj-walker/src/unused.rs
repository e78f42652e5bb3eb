//! Find project files that no document includes or references

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use ignore::WalkBuilder;
use texproj_core::{TexError, canonicalize, match_asset_reference, resolve_reference};
use tracing::{Span, debug, info, info_span, warn};

use crate::config::FinderOptions;
use crate::visitor::{TexVisitor, Traversal};

const LOG_TARGET: &str = "texproj::unused";

/// Candidate files keyed by their extension-stripped canonical path.
///
/// A key leaves the map the first time it is visited or referenced and is
/// never reinserted.
type Candidates = BTreeMap<PathBuf, Vec<PathBuf>>;

pub struct UnusedFinder {
    traversal: Traversal,
    candidates: Candidates,
    exclude_dirs: Vec<PathBuf>,
    span: Span,
}

impl UnusedFinder {
    /// Enumerate every file under the project root, minus excluded extensions.
    pub fn new(root_file: impl Into<PathBuf>, options: &FinderOptions) -> Result<Self, TexError> {
        let traversal = Traversal::new(root_file)?;
        let span = info_span!(
            target: LOG_TARGET,
            "find_unused",
            root = %traversal.root_file().display()
        );

        let candidates = {
            let _enter = span.enter();
            collect_candidates(traversal.root_dir(), &options.exclude_extensions)?
        };
        let exclude_dirs = options
            .exclude_dirs
            .iter()
            .map(|dir| canonicalize(&traversal.root_dir().join(dir), false))
            .collect();

        Ok(Self {
            traversal,
            candidates,
            exclude_dirs,
            span,
        })
    }

    /// Number of files not yet seen as used.
    pub fn candidate_count(&self) -> usize {
        self.candidates.values().map(Vec::len).sum()
    }

    /// Walk the project and return the files that remain unused, outside
    /// the excluded directories, ordered by canonical path.
    pub fn run(mut self) -> Result<Vec<PathBuf>, TexError> {
        let span = self.span.clone();
        let _enter = span.enter();

        let mut pruner = Pruner {
            root_dir: self.traversal.root_dir(),
            candidates: &mut self.candidates,
        };
        self.traversal.walk(&mut pruner)?;

        let unused: Vec<PathBuf> = self
            .candidates
            .into_values()
            .flatten()
            .filter(|path| !self.exclude_dirs.iter().any(|dir| path.starts_with(dir)))
            .collect();

        for path in &unused {
            info!(target: LOG_TARGET, "Unused file: {}", display_relative(path).display());
        }
        info!(target: LOG_TARGET, "Total {} unused files", unused.len());

        Ok(unused)
    }
}

struct Pruner<'a> {
    root_dir: &'a Path,
    candidates: &'a mut Candidates,
}

impl Pruner<'_> {
    fn mark_used(&mut self, path: &Path) {
        let key = canonicalize(path, true);
        if self.candidates.remove(&key).is_some() {
            debug!(target: LOG_TARGET, "Used: {}", key.display());
        }
    }
}

impl TexVisitor for Pruner<'_> {
    fn on_file(&mut self, path: &Path) -> Result<(), TexError> {
        self.mark_used(path);
        Ok(())
    }

    fn on_line(&mut self, line: &str) -> Result<(), TexError> {
        if let Some(reference) = match_asset_reference(line) {
            let target = resolve_reference(self.root_dir, reference.path());
            self.mark_used(&target);
        }
        Ok(())
    }
}

fn collect_candidates(
    root_dir: &Path,
    exclude_extensions: &[String],
) -> Result<Candidates, TexError> {
    if !root_dir.is_dir() {
        warn!(target: LOG_TARGET, "Project directory {} is missing", root_dir.display());
        return Ok(Candidates::new());
    }

    let walker = WalkBuilder::new(root_dir)
        .standard_filters(false)
        .hidden(true)
        .sort_by_file_name(|a, b| a.cmp(b))
        .build();

    let mut candidates = Candidates::new();
    for result in walker {
        let entry = result.map_err(|e| TexError::io(root_dir, walk_error(e)))?;
        let Some(file_type) = entry.file_type() else {
            continue;
        };
        // Links are not followed by the walker; a link to a directory is still a directory.
        if file_type.is_dir() || (file_type.is_symlink() && entry.path().is_dir()) {
            continue;
        }

        let path = entry.path();
        let text = path.to_string_lossy();
        if exclude_extensions.iter().any(|ext| text.ends_with(ext.as_str())) {
            continue;
        }

        candidates
            .entry(canonicalize(path, true))
            .or_default()
            .push(canonicalize(path, false));
    }

    debug!(
        target: LOG_TARGET,
        "Collected {} candidate files under {}",
        candidates.values().map(Vec::len).sum::<usize>(),
        root_dir.display()
    );
    Ok(candidates)
}

fn walk_error(error: ignore::Error) -> std::io::Error {
    match error.into_io_error() {
        Some(io) => io,
        None => std::io::Error::other("failed to walk project directory"),
    }
}

/// Path as seen from the working directory, climbing out with `..` if needed.
fn display_relative(path: &Path) -> PathBuf {
    match std::env::current_dir() {
        Ok(cwd) => relative_to(path, &cwd),
        Err(_) => path.to_path_buf(),
    }
}

pub(crate) fn relative_to(path: &Path, base: &Path) -> PathBuf {
    pathdiff::diff_paths(path, base).unwrap_or_else(|| path.to_path_buf())
}
