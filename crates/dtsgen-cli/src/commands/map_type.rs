use std::path::PathBuf;

use dtsgen_core::MetaDb;
use dtsgen_lib::Emitter;

use super::settings::load_config;
use super::{CommandError, exit_with};

pub struct MapTypeArgs {
    pub exprs: Vec<String>,
    pub meta_dir: Option<PathBuf>,
    pub settings: Option<PathBuf>,
}

pub fn run(args: MapTypeArgs) {
    match execute(&args) {
        Ok(mapped) => {
            for (expr, ty) in args.exprs.iter().zip(mapped) {
                println!("{expr} => {ty}");
            }
        }
        Err(err) => exit_with(err),
    }
}

/// Map every expression; without a metadata directory no class is known.
pub(crate) fn execute(args: &MapTypeArgs) -> Result<Vec<String>, CommandError> {
    let db = match &args.meta_dir {
        Some(dir) => MetaDb::load_dir(dir)?,
        None => MetaDb::new("."),
    };
    let config = load_config(args.settings.as_deref())?;
    let emitter = Emitter::new(&db, &config)?;
    let types = emitter.types();

    Ok(args
        .exprs
        .iter()
        .map(|expr| types.map_type(Some(expr.as_str())))
        .collect())
}
