//! Declaration generation from class metadata.
//!
//! Reads class metadata through a [`dtsgen_core::MetaDatabase`] and writes
//! ambient declarations for a target language. Currently supports
//! TypeScript `.d.ts` generation.
//!
//! # Example
//!
//! ```ignore
//! use dtsgen_core::MetaDb;
//! use dtsgen_lib::typegen::typescript::{self, Config};
//!
//! let db = MetaDb::load_dir("compiled/meta")?;
//! typescript::process(&db, &Config::new().output("qooxdoo.d.ts"))?;
//! ```

pub mod typescript;
