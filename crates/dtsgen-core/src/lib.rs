#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core data structures for dtsgen class metadata.
//!
//! Two layers:
//! - **Model layer** (`meta`): 1:1 mapping to the JSON metadata records
//! - **Database layer** (`database`): name-indexed lookup and hierarchy flattening

use std::path::PathBuf;

pub mod database;
pub mod meta;
pub mod utils;

#[cfg(test)]
mod meta_tests;

pub use database::{HierarchyFlat, MetaDatabase, MetaDb};
pub use meta::{
    Access, ClassKind, ClassMetadata, Definition, MemberKind, MemberMetadata, MemberType, Param,
    PropertyMetadata, SuperClass, TypeRef,
};

/// Errors raised while building a metadata database.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to walk {}: {source}", .path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("invalid metadata in {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("metadata record has no class name")]
    MissingClassName,

    #[error("class `{0}` is defined more than once")]
    DuplicateClass(String),
}

/// Result type for database operations.
pub type Result<T> = std::result::Result<T, Error>;
