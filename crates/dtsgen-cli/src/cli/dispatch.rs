//! Dispatch logic: extract params from ArgMatches and convert to command args.
//!
//! This module contains:
//! - `*Params` structs that mirror command `*Args` but are populated from clap
//! - `from_matches()` extractors
//! - `Into<*Args>` impls to bridge dispatch → command handlers

use std::path::PathBuf;

use clap::ArgMatches;

use crate::commands::generate::GenerateArgs;
use crate::commands::map_type::MapTypeArgs;

pub struct GenerateParams {
    pub meta_dir: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub template: Option<PathBuf>,
    pub timestamp: Option<String>,
}

impl GenerateParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            meta_dir: m.get_one::<PathBuf>("meta_dir").cloned(),
            output: m.get_one::<PathBuf>("output").cloned(),
            config: m.get_one::<PathBuf>("config").cloned(),
            template: m.get_one::<PathBuf>("template").cloned(),
            timestamp: m.get_one::<String>("timestamp").cloned(),
        }
    }
}

impl From<GenerateParams> for GenerateArgs {
    fn from(p: GenerateParams) -> Self {
        Self {
            meta_dir: p.meta_dir,
            output: p.output,
            settings: p.config,
            template: p.template,
            timestamp: p.timestamp,
        }
    }
}

pub struct MapTypeParams {
    pub exprs: Vec<String>,
    pub meta_dir: Option<PathBuf>,
    pub config: Option<PathBuf>,
}

impl MapTypeParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            exprs: m
                .get_many::<String>("exprs")
                .map(|values| values.cloned().collect())
                .unwrap_or_default(),
            meta_dir: m.get_one::<PathBuf>("meta_dir").cloned(),
            config: m.get_one::<PathBuf>("config").cloned(),
        }
    }
}

impl From<MapTypeParams> for MapTypeArgs {
    fn from(p: MapTypeParams) -> Self {
        Self {
            exprs: p.exprs,
            meta_dir: p.meta_dir,
            settings: p.config,
        }
    }
}
