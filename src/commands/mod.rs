//! CLI command implementations for rgremap.
//!
//! - [`rewrite`] - Rewrite read group tags from a mapping file

#![allow(clippy::missing_errors_doc, clippy::must_use_candidate, clippy::uninlined_format_args)]

pub mod command;
pub mod common;
pub mod rewrite;
