pub mod generate;
pub mod map_type;
pub mod settings;


use settings::SettingsError;

/// Anything that makes a command fail.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("missing required argument {0}")]
    MissingArgument(&'static str),

    #[error(transparent)]
    Settings(#[from] SettingsError),

    #[error(transparent)]
    Database(#[from] dtsgen_core::Error),

    #[error(transparent)]
    Generate(#[from] dtsgen_lib::Error),
}

/// Print the error the way every command does and exit.
fn exit_with(err: CommandError) -> ! {
    eprintln!("error: {err}");
    std::process::exit(1);
}
