//! TypeScript declaration emitter.
//!
//! Turns the class metadata of an object-oriented JavaScript library into a
//! single ambient `.d.ts` file: one `declare module` block per namespace,
//! one class or interface declaration per described class.

mod config;
mod emitter;
mod jsdoc;
mod render;
mod resolve;
mod types;

#[cfg(test)]
mod jsdoc_tests;
#[cfg(test)]
mod types_tests;

pub use config::{Config, DEFAULT_OUTPUT};
pub use emitter::Emitter;
pub use resolve::{HierarchyResolver, Resolution};
pub use types::{AliasTable, TypeMapper, ANY};

use dtsgen_core::MetaDatabase;

use crate::Result;

/// Emit declarations for every class in `db` into a string.
pub fn emit<D: MetaDatabase>(db: &D, config: &Config) -> Result<String> {
    Emitter::new(db, config)?.emit()
}

/// Write declarations for every class in `db` to the configured output file.
pub fn process<D: MetaDatabase>(db: &D, config: &Config) -> Result<()> {
    Emitter::new(db, config)?.process()
}
