//! dtsgen: TypeScript declarations from class metadata.
//!
//! This crate provides the generation pipeline:
//! - `typegen` - type mapping, member resolution and declaration emission
//! - `sink` - output destinations for the generated text

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

use std::path::PathBuf;

pub mod sink;
pub mod typegen;

#[cfg(test)]
pub mod test_utils;

pub use sink::{OutputSink, Sink};
pub use typegen::typescript::{Config, Emitter};

/// Errors raised while generating declarations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("cannot open output file {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot write to {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot close {}: {source}", .path.display())]
    Close {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot read base template {}: {source}", .path.display())]
    Template {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot determine working directory: {0}")]
    CurrentDir(#[source] std::io::Error),

    #[error("invalid alias table: {0}")]
    AliasTable(#[source] regex::Error),

    #[error(transparent)]
    Database(#[from] dtsgen_core::Error),
}

/// Result type for generation.
pub type Result<T> = std::result::Result<T, Error>;
