//! Texproj core: path canonicalization, directive matching and error types

pub mod directives;
pub mod error;
pub mod paths;


pub use directives::{AssetReference, is_comment, match_asset_reference, match_inclusion};
pub use error::{Result, TexError};
pub use paths::{
    TEX_EXTENSION, canonicalize, normalize_extension, resolve_inclusion, resolve_reference,
};
