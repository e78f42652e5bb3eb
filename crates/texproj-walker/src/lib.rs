//! Recursive `\input{}` traversal with flatten and unused-file strategies

pub mod config;
pub mod flatten;
pub mod unused;
pub mod visitor;



pub use config::{CONFIG_FILE, FinderOptions, ProjectConfig, split_list};
pub use flatten::{DEFAULT_OUTPUT, Flattener};
pub use unused::UnusedFinder;
pub use visitor::{TexVisitor, Traversal};
