#![forbid(unsafe_code)]
#![deny(unused_must_use, missing_debug_implementations)]
#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::todo,
    clippy::unimplemented,
    clippy::dbg_macro
)]

//! `oasgraph` command line: convert OpenAPI documents to IR JSON and report
//! their dialect.

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

mod cli;
mod document;

#[derive(Parser, Debug)]
#[command(
    name = "oasgraph",
    version,
    about = "Convert OpenAPI 3.x documents into a version-independent IR"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Convert a document and print the IR as JSON
    Convert(cli::convert::ConvertArgs),
    /// Print the dialect a document is decoded with
    Version(cli::version::VersionArgs),
}

fn main() {
    init_tracing();
    let cli = Cli::parse();
    let code = match cli.command {
        Commands::Convert(args) => cli::convert::run(args),
        Commands::Version(args) => cli::version::run(args),
    };
    std::process::exit(code);
}

fn init_tracing() {
    // OASGRAPH_LOG controls log level: "trace", "debug", "info", "warn", "error"
    // or a full tracing filter spec like "oasgraph_core=trace"
    let filter = match std::env::var("OASGRAPH_LOG") {
        Ok(level) if is_plain_level(&level) => workspace_filter(&level),
        Ok(spec) => spec,
        Err(_) => workspace_filter("info"),
    };

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .with_file(true)
        .with_filter(EnvFilter::new(filter));

    if tracing_subscriber::registry()
        .with(fmt_layer)
        .try_init()
        .is_err()
    {
        eprintln!("Warning: tracing subscriber already initialized");
    }
}

fn workspace_filter(level: &str) -> String {
    let crate_root = module_path!();
    format!("{crate_root}={level},oasgraph_core={level}")
}

fn is_plain_level(s: &str) -> bool {
    matches!(
        s.to_ascii_lowercase().as_str(),
        "trace" | "debug" | "info" | "warn" | "error"
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_is_plain_level() {
        assert!(is_plain_level("debug"));
        assert!(is_plain_level("WARN"));
        assert!(!is_plain_level("oasgraph_core=trace"));
    }

    #[test]
    fn test_workspace_filter() {
        assert_eq!(workspace_filter("debug"), "oasgraph=debug,oasgraph_core=debug");
    }

    #[test]
    fn test_parse_convert_flags() {
        let cli = Cli::try_parse_from([
            "oasgraph", "convert", "--input", "api.yaml", "--validate", "--compact",
        ])
        .unwrap();
        assert!(matches!(
            cli.command,
            Commands::Convert(ref args) if args.validate && args.compact && args.out.is_none()
        ));
    }
}
