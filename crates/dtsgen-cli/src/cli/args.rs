//! Shared argument builders for CLI commands.
//!
//! Each function returns a `clap::Arg` that can be composed into commands.

use std::path::PathBuf;

use clap::{Arg, ArgAction, value_parser};

/// Directory of class metadata records (--meta-dir).
pub fn meta_dir_arg() -> Arg {
    Arg::new("meta_dir")
        .long("meta-dir")
        .value_name("DIR")
        .value_parser(value_parser!(PathBuf))
        .help("Directory of class metadata JSON files")
}

/// Output file (-o/--output).
pub fn output_arg() -> Arg {
    Arg::new("output")
        .short('o')
        .long("output")
        .value_name("FILE")
        .value_parser(value_parser!(PathBuf))
        .help("Declaration file to write [default: qooxdoo.d.ts]")
}

/// JSON settings file (-c/--config).
pub fn config_arg() -> Arg {
    Arg::new("config")
        .short('c')
        .long("config")
        .value_name("FILE")
        .value_parser(value_parser!(PathBuf))
        .help("JSON file with output, aliases, suppress and baseTemplate settings")
}

/// Base declaration template (--template).
pub fn template_arg() -> Arg {
    Arg::new("template")
        .long("template")
        .value_name("FILE")
        .value_parser(value_parser!(PathBuf))
        .help("Base declarations written before the generated classes")
}

/// Fixed header timestamp (--timestamp).
pub fn timestamp_arg() -> Arg {
    Arg::new("timestamp")
        .long("timestamp")
        .value_name("TEXT")
        .help("Use TEXT as the header timestamp (for reproducible output)")
}

/// Type expressions to map (positional, repeated).
pub fn type_exprs_arg() -> Arg {
    Arg::new("exprs")
        .value_name("EXPR")
        .required(true)
        .action(ArgAction::Append)
        .help("Type expressions as written in the source annotations")
}
