use clap::{
    error::{ContextKind, ContextValue, ErrorKind},
    CommandFactory, Parser, ValueEnum,
};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::EnvFilter;

use rktdoc_compiler::{
    compile_file, error::DocError, render::render, write_output, Destination, OutputFormat,
};

#[derive(Parser)]
#[command(name = "rktdoc", version)]
#[command(about = "Generate C-style structure definitions from RKT format documentation")]
#[command(after_long_help = concat!(
    "OUTPUT can be '-' to write to stdout.\n\n",
    "Example:\n\trktdoc rocksim.txt result.h\n\n",
    "NOTE: the output is not always valid C, a few names in the documentation contain '-'.",
))]
struct Cli {
    /// Documentation text file to read
    input: PathBuf,

    /// File to write the listing to, or `-` for stdout
    output: String,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::C)]
    format: Format,

    /// Log parsing progress to stderr (overridden by RUST_LOG)
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    /// C-style struct declarations
    C,
    /// The parsed records as JSON
    Json,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::C => OutputFormat::CHeader,
            Format::Json => OutputFormat::Json,
        }
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli) -> Result<(), DocError> {
    let document = compile_file(&cli.input)?;
    let text = render(&document, cli.format.into())?;
    let destination = Destination::from(cli.output.as_str());
    write_output(&destination, &text)?;
    info!(%destination, structures = document.structures.len(), "done");
    Ok(())
}

/// Whether a parse failure is a wrong number of positional arguments.
/// Those get the usage text and a successful exit; every other argument
/// error is reported by clap.
fn is_wrong_argument_count(err: &clap::Error) -> bool {
    match err.kind() {
        ErrorKind::MissingRequiredArgument => true,
        ErrorKind::UnknownArgument => match err.get(ContextKind::InvalidArg) {
            Some(ContextValue::String(arg)) => arg == "-" || !arg.starts_with('-'),
            _ => false,
        },
        _ => false,
    }
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if is_wrong_argument_count(&err) => {
            let _ = Cli::command().print_long_help();
            return ExitCode::SUCCESS;
        }
        Err(err) => err.exit(),
    };

    init_logging(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("ERROR: {}", err);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_positional_arguments() {
        let cli = Cli::try_parse_from(["rktdoc", "rocksim.txt", "-"]).unwrap();
        assert_eq!(cli.input, PathBuf::from("rocksim.txt"));
        assert_eq!(Destination::from(cli.output.as_str()), Destination::Stdout);
        assert_eq!(OutputFormat::from(cli.format), OutputFormat::CHeader);
        assert!(!cli.verbose);
    }

    #[test]
    fn test_json_format_flag() {
        let cli =
            Cli::try_parse_from(["rktdoc", "--format", "json", "in.txt", "out.json"]).unwrap();
        assert_eq!(OutputFormat::from(cli.format), OutputFormat::Json);
    }

    fn parse_error(args: &[&str]) -> clap::Error {
        match Cli::try_parse_from(args) {
            Ok(_) => panic!("expected {:?} to be rejected", args),
            Err(err) => err,
        }
    }

    #[test]
    fn test_wrong_argument_count_shows_usage() {
        assert!(is_wrong_argument_count(&parse_error(&["rktdoc"])));
        assert!(is_wrong_argument_count(&parse_error(&["rktdoc", "only-input.txt"])));
        assert!(is_wrong_argument_count(&parse_error(&["rktdoc", "a", "b", "c"])));
    }

    #[test]
    fn test_bad_options_are_errors() {
        let err = parse_error(&["rktdoc", "--format", "xml", "in.txt", "-"]);
        assert_eq!(err.kind(), ErrorKind::InvalidValue);
        assert!(!is_wrong_argument_count(&err));

        let err = parse_error(&["rktdoc", "in.txt", "-", "--bogus"]);
        assert_eq!(err.kind(), ErrorKind::UnknownArgument);
        assert!(!is_wrong_argument_count(&err));
        assert_ne!(err.exit_code(), 0);
    }
}
