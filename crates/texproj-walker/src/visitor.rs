//! Depth-first traversal over the `\input{}` graph

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use texproj_core::{TexError, canonicalize, is_comment, match_inclusion, resolve_inclusion};
use tracing::{debug, warn};

const LOG_TARGET: &str = "texproj::visitor";

/// Hooks invoked by [`Traversal::walk`]. Both default to doing nothing.
pub trait TexVisitor {
    /// Called once per visited document, before it is read and even when it
    /// turns out to be missing.
    fn on_file(&mut self, _path: &Path) -> Result<(), TexError> {
        Ok(())
    }

    /// Called for every line that is neither a comment nor an inclusion,
    /// with its line terminator still attached.
    fn on_line(&mut self, _line: &str) -> Result<(), TexError> {
        Ok(())
    }
}

/// The root document of a project and the directory references resolve against.
#[derive(Debug, Clone)]
pub struct Traversal {
    root_file: PathBuf,
    root_dir: PathBuf,
}

impl Traversal {
    pub fn new(root_file: impl Into<PathBuf>) -> Result<Self, TexError> {
        let root_file = root_file.into();
        if root_file.to_string_lossy().contains(' ') {
            return Err(TexError::PathContainsSpace(root_file));
        }

        let root_dir = match root_file.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };

        Ok(Self {
            root_file,
            root_dir,
        })
    }

    pub fn root_file(&self) -> &Path {
        &self.root_file
    }

    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    /// Visit the root document and, recursively, everything it includes.
    pub fn walk<V: TexVisitor + ?Sized>(&self, visitor: &mut V) -> Result<(), TexError> {
        let mut open = Vec::new();
        self.visit(&self.root_file, visitor, &mut open)
    }

    fn visit<V: TexVisitor + ?Sized>(
        &self,
        path: &Path,
        visitor: &mut V,
        open: &mut Vec<PathBuf>,
    ) -> Result<(), TexError> {
        let key = canonicalize(path, false);
        if open.contains(&key) {
            let mut chain = open.clone();
            chain.push(key.clone());
            return Err(TexError::CircularInclusion { path: key, chain });
        }

        visitor.on_file(path)?;
        if !path.exists() {
            warn!(target: LOG_TARGET, "File {} is missing", path.display());
            return Ok(());
        }

        let file = File::open(path).map_err(|e| TexError::io(path, e))?;
        let mut reader = BufReader::new(file);

        open.push(key);
        let result = self.visit_lines(path, &mut reader, visitor, open);
        open.pop();
        result
    }

    fn visit_lines<V: TexVisitor + ?Sized>(
        &self,
        path: &Path,
        reader: &mut impl BufRead,
        visitor: &mut V,
        open: &mut Vec<PathBuf>,
    ) -> Result<(), TexError> {
        let mut line = String::new();
        loop {
            line.clear();
            let read = reader
                .read_line(&mut line)
                .map_err(|e| TexError::io(path, e))?;
            if read == 0 {
                return Ok(());
            }

            if is_comment(&line) {
                continue;
            }

            match match_inclusion(&line) {
                Some(reference) => {
                    let target = resolve_inclusion(&self.root_dir, reference);
                    debug!(target: LOG_TARGET, "{} includes {}", path.display(), target.display());
                    self.visit(&target, visitor, open)?;
                }
                None => visitor.on_line(&line)?,
            }
        }
    }
}
