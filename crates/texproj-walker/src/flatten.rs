//! Flatten a project into a single document

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use texproj_core::TexError;
use tracing::{Span, info, info_span};

use crate::visitor::{TexVisitor, Traversal};

const LOG_TARGET: &str = "texproj::flatten";

/// Default destination of `texproj flat`.
pub const DEFAULT_OUTPUT: &str = "out.tex";

/// Writes every retained line of the project, in depth-first pre-order, to
/// one output document.
pub struct Flattener {
    traversal: Traversal,
    output: PathBuf,
    span: Span,
}

impl Flattener {
    pub fn new(
        root_file: impl Into<PathBuf>,
        output: impl Into<PathBuf>,
    ) -> Result<Self, TexError> {
        let traversal = Traversal::new(root_file)?;
        let output = output.into();
        let span = info_span!(
            target: LOG_TARGET,
            "flatten",
            root = %traversal.root_file().display()
        );

        Ok(Self {
            traversal,
            output,
            span,
        })
    }

    /// Flatten into the output file, replacing any previous content.
    pub fn run(&self) -> Result<&Path, TexError> {
        let _enter = self.span.enter();

        let file = File::create(&self.output).map_err(|e| TexError::io(&self.output, e))?;
        let mut writer = BufWriter::new(file);
        self.write_to(&mut writer, &self.output)?;
        writer.flush().map_err(|e| TexError::io(&self.output, e))?;

        info!(target: LOG_TARGET, "The output has been written to {}", self.output.display());
        Ok(&self.output)
    }

    /// Flatten into an arbitrary writer instead of the output file.
    pub fn flatten_into<W: Write>(&self, writer: &mut W) -> Result<(), TexError> {
        let _enter = self.span.enter();
        self.write_to(writer, Path::new("<writer>"))?;
        writer.flush().map_err(|e| TexError::io("<writer>", e))
    }

    fn write_to<W: Write>(&self, writer: &mut W, destination: &Path) -> Result<(), TexError> {
        let mut sink = LineSink {
            writer,
            destination,
        };
        self.traversal.walk(&mut sink)
    }
}

struct LineSink<'a, W: Write> {
    writer: &'a mut W,
    destination: &'a Path,
}

impl<W: Write> TexVisitor for LineSink<'_, W> {
    fn on_file(&mut self, path: &Path) -> Result<(), TexError> {
        info!(target: LOG_TARGET, "Visit {}", path.display());
        Ok(())
    }

    fn on_line(&mut self, line: &str) -> Result<(), TexError> {
        self.writer
            .write_all(line.as_bytes())
            .map_err(|e| TexError::io(self.destination, e))
    }
}
