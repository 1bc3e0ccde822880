//! Command builders for the CLI.
//!
//! Each command is built using the shared arg builders from `args.rs`.

use clap::Command;

use super::args::*;

/// Build the complete CLI with all subcommands.
pub fn build_cli() -> Command {
    Command::new("dtsgen")
        .about("TypeScript declarations from class metadata")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(generate_command())
        .subcommand(map_type_command())
}

/// Generate the declaration file for a metadata directory.
pub fn generate_command() -> Command {
    Command::new("generate")
        .about("Generate a .d.ts file from class metadata")
        .override_usage("  dtsgen generate --meta-dir <DIR> [-o <FILE>] [-c <FILE>]")
        .after_help(
            r#"EXAMPLES:
  dtsgen generate --meta-dir compiled/meta
  dtsgen generate --meta-dir compiled/meta -o types/qx.d.ts
  dtsgen generate --meta-dir compiled/meta -c dtsgen.json
  dtsgen generate --meta-dir compiled/meta --timestamp 'build 42'"#,
        )
        .arg(meta_dir_arg().required(true))
        .arg(output_arg())
        .arg(config_arg())
        .arg(template_arg())
        .arg(timestamp_arg())
}

/// Show how annotation types map to declaration types.
///
/// Known-class qualification only applies when `--meta-dir` is given.
pub fn map_type_command() -> Command {
    Command::new("map-type")
        .about("Print the declaration type for annotation type expressions")
        .after_help(
            r#"EXAMPLES:
  dtsgen map-type String 'Array<Number>' 'Promise<Map>'
  dtsgen map-type Widget --meta-dir compiled/meta
  dtsgen map-type Foo -c dtsgen.json"#,
        )
        .arg(type_exprs_arg())
        .arg(meta_dir_arg())
        .arg(config_arg())
}
