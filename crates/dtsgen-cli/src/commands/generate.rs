use std::path::PathBuf;

use dtsgen_core::MetaDb;
use dtsgen_lib::Emitter;

use super::settings::load_config;
use super::{CommandError, exit_with};

pub struct GenerateArgs {
    pub meta_dir: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub settings: Option<PathBuf>,
    pub template: Option<PathBuf>,
    pub timestamp: Option<String>,
}

pub fn run(args: GenerateArgs) {
    if let Err(err) = execute(args) {
        exit_with(err);
    }
}

/// Load the metadata, build the config and write the declaration file.
///
/// Command-line flags take precedence over the settings file.
pub(crate) fn execute(args: GenerateArgs) -> Result<PathBuf, CommandError> {
    let meta_dir = args
        .meta_dir
        .ok_or(CommandError::MissingArgument("--meta-dir"))?;

    let mut config = load_config(args.settings.as_deref())?;
    if let Some(output) = args.output {
        config = config.output(output);
    }
    if let Some(template) = args.template {
        config = config.base_template(template);
    }
    if let Some(timestamp) = args.timestamp {
        config = config.timestamp(timestamp);
    }

    let db = MetaDb::load_dir(&meta_dir)?;
    tracing::info!(classes = db.len(), dir = %meta_dir.display(), "loaded metadata");

    Emitter::new(&db, &config)?.process()?;
    Ok(config.output_path().to_path_buf())
}
