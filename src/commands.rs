//! CLI command implementations

use anyhow::Context;
use std::path::{Path, PathBuf};
use texproj_walker::{
    DEFAULT_OUTPUT, FinderOptions, Flattener, ProjectConfig, Traversal, UnusedFinder,
};

/// Locate the project directory of `root` and read its `.texproj.toml`.
fn load_project(root: &Path) -> anyhow::Result<(PathBuf, ProjectConfig)> {
    let project_dir = Traversal::new(root)?.root_dir().to_path_buf();
    let config = ProjectConfig::load(&project_dir)?;
    Ok((project_dir, config))
}

/// An output path from the config file is relative to the project directory.
pub fn flat(root: PathBuf, output: Option<PathBuf>) -> anyhow::Result<()> {
    let (project_dir, config) = load_project(&root)?;
    let output = output
        .or_else(|| config.flat.output.map(|o| project_dir.join(o)))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT));

    Flattener::new(&root, output)?
        .run()
        .with_context(|| format!("Failed to flatten {}", root.display()))?;
    Ok(())
}

pub fn find_unused(
    root: PathBuf,
    exclude_dirs: &str,
    exclude_extensions: &str,
) -> anyhow::Result<()> {
    let (_, config) = load_project(&root)?;
    let options = FinderOptions::from_comma_lists(exclude_dirs, exclude_extensions)
        .or_config(&config.find_unused);
    tracing::debug!(target: "texproj::main", "Unused file options: {:?}", options);

    UnusedFinder::new(&root, &options)?
        .run()
        .with_context(|| format!("Failed to find unused files of {}", root.display()))?;
    Ok(())
}
