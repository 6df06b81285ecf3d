// Command-line interface for pagefold
//
// This binary converts documents between Markdown, PDF and DOCX. The work is done by the
// pagefold-babel crate; this layer resolves paths and flags, talks to the user and maps
// failures to an exit status.
//
// Converting:
//
// The source format is always taken from the input extension. The target comes from the
// output extension when -o is given, otherwise from --format, in which case the output
// path is the input path with the target extension.
// Usage:
//  pagefold <input> [-o <output>] [-f md|markdown|docx|pdf]   - Convert (default)
//  pagefold convert <input> ...                              - Same as above (explicit)
//  pagefold inspect <input> [summary|json|text]              - Show the parsed document
//  pagefold clean-locks [dir]                                - Remove orphaned lock files
//  pagefold --list-formats                                   - List supported extensions
//
// Configuration:
//
// Footer and page settings come from the embedded defaults, then ./pagefold.toml, then the
// file given with --config. Convert flags win over all of them.

mod locks;

use clap::{Arg, ArgAction, ArgMatches, Command, ValueHint};
use pagefold_babel::format::extension_of;
use pagefold_babel::{Converter, FormatError, FormatRegistry};
use pagefold_config::{Loader, PageSizeSetting, PagefoldConfig, LOCAL_CONFIG_FILE};
use std::io::{self, BufRead, IsTerminal, Write};
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::EnvFilter;

const SUBCOMMANDS: &[&str] = &["convert", "inspect", "clean-locks", "help"];
const TARGET_FORMATS: &[&str] = &["md", "markdown", "docx", "pdf"];
const INSPECT_VIEWS: &[&str] = &["summary", "json", "text"];

fn build_cli() -> Command {
    Command::new("pagefold")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert documents between Markdown, PDF and DOCX")
        .long_about(
            "pagefold converts documents between Markdown, PDF and DOCX through a shared\n\
            document model. PDF and DOCX output carry a configurable page footer.\n\n\
            Commands:\n  \
            - convert: Convert a file (default, the word 'convert' may be omitted)\n  \
            - inspect: Print the parsed document as a summary, JSON or plain text\n  \
            - clean-locks: Remove orphaned editor lock files from a directory\n\n\
            Examples:\n  \
            pagefold notes.md -o notes.pdf              # Markdown to PDF\n  \
            pagefold report.pdf -f md                   # PDF to report.md\n  \
            pagefold notes.md -f docx --footer-layout double\n  \
            pagefold inspect notes.md json              # Dump the document model",
        )
        .arg_required_else_help(true)
        .subcommand_required(false)
        .arg(
            Arg::new("list-formats")
                .long("list-formats")
                .help("List supported input and output formats")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to a pagefold.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log progress to stderr")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(
            Command::new("convert")
                .about("Convert a document (default command)")
                .long_about(
                    "Convert a document between formats.\n\n\
                    Input formats:  .md .markdown .pdf\n\
                    Output formats: .md .markdown .pdf .docx\n\n\
                    Footer templates may use {date} and {page}; write {{ and }} for\n\
                    literal braces. With --footer-layout double the left and right\n\
                    footers swap on even pages.",
                )
                .arg(
                    Arg::new("input")
                        .help("Input file path")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("Output file path (derived from the input and --format if omitted)")
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .help("Target format, used when no output path is given")
                        .ignore_case(true)
                        .value_parser(clap::builder::PossibleValuesParser::new(TARGET_FORMATS)),
                )
                .arg(
                    Arg::new("overwrite")
                        .long("overwrite")
                        .help("Replace the output file if it exists")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("no-footer")
                        .long("no-footer")
                        .help("Disable the page footer")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("footer-layout")
                        .long("footer-layout")
                        .help("Footer layout: single or double sided")
                        .ignore_case(true)
                        .value_parser(["single", "double"]),
                )
                .arg(
                    Arg::new("footer-left")
                        .long("footer-left")
                        .value_name("TEMPLATE")
                        .help("Left footer template"),
                )
                .arg(
                    Arg::new("footer-right")
                        .long("footer-right")
                        .value_name("TEMPLATE")
                        .help("Right footer template"),
                )
                .arg(
                    Arg::new("date-format")
                        .long("date-format")
                        .value_name("FORMAT")
                        .help("strftime pattern for {date}"),
                )
                .arg(
                    Arg::new("page-size")
                        .long("page-size")
                        .help("Page size for PDF and DOCX output")
                        .ignore_case(true)
                        .value_parser(["letter", "a4"]),
                ),
        )
        .subcommand(
            Command::new("inspect")
                .about("Print the parsed document model")
                .arg(
                    Arg::new("path")
                        .help("Path to a Markdown or PDF file")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("view")
                        .help("What to print. Defaults to 'summary'")
                        .index(2)
                        .value_parser(clap::builder::PossibleValuesParser::new(INSPECT_VIEWS)),
                ),
        )
        .subcommand(
            Command::new("clean-locks")
                .about("Remove orphaned lock files from a directory")
                .arg(
                    Arg::new("dir")
                        .help("Directory to sweep. Defaults to the current directory")
                        .index(1)
                        .value_hint(ValueHint::DirPath),
                ),
        )
}

fn main() {
    // Try to parse args. If no subcommand is provided, inject "convert"
    let args: Vec<String> = std::env::args().collect();

    let cli = build_cli();
    let matches = match cli.clone().try_get_matches_from(&args) {
        Ok(m) => m,
        Err(e) => {
            if args.len() > 1
                && !args[1].starts_with('-')
                && !SUBCOMMANDS.contains(&args[1].as_str())
            {
                let mut new_args = vec![args[0].clone(), "convert".to_string()];
                new_args.extend_from_slice(&args[1..]);

                match cli.try_get_matches_from(&new_args) {
                    Ok(m) => m,
                    Err(e2) => e2.exit(),
                }
            } else {
                e.exit();
            }
        }
    };

    init_logging(matches.get_flag("verbose"));

    if matches.get_flag("list-formats") {
        handle_list_formats_command();
        return;
    }

    let mut config = load_cli_config(matches.get_one::<String>("config").map(|s| s.as_str()));

    match matches.subcommand() {
        Some(("convert", sub_matches)) => {
            apply_config_overrides(&mut config, sub_matches);
            handle_convert_command(sub_matches, &config);
        }
        Some(("inspect", sub_matches)) => {
            let path = sub_matches
                .get_one::<String>("path")
                .expect("path is required");
            let view = sub_matches
                .get_one::<String>("view")
                .map(|s| s.as_str())
                .unwrap_or("summary");
            handle_inspect_command(Path::new(path), view);
        }
        Some(("clean-locks", sub_matches)) => {
            let dir = sub_matches
                .get_one::<String>("dir")
                .map(|s| s.as_str())
                .unwrap_or(".");
            handle_clean_locks_command(Path::new(dir));
        }
        _ => {
            eprintln!("No input given. Use --help for usage information.");
            std::process::exit(1);
        }
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with_writer(io::stderr)
        .init();
}

fn fail(message: impl std::fmt::Display) -> ! {
    eprintln!("Error: {message}");
    std::process::exit(1);
}

/// Handle the convert command
fn handle_convert_command(matches: &ArgMatches, config: &PagefoldConfig) {
    let input = PathBuf::from(
        matches
            .get_one::<String>("input")
            .expect("input is required"),
    );
    let converter = Converter::default();
    let registry = converter.registry();

    if !input.exists() {
        fail(FormatError::NotFound {
            path: input.clone(),
        });
    }
    let input_ext = extension_of(&input).unwrap_or_default();
    if registry.reader_for(&input).is_err() {
        fail(format!(
            "Unsupported input format '{input_ext}'. Use --list-formats to see supported formats."
        ));
    }

    let target = matches.get_one::<String>("format").map(|s| s.to_lowercase());
    let output = match matches.get_one::<String>("output") {
        Some(path) => {
            let output = PathBuf::from(path);
            if let Some(target) = &target {
                let detected = registry.detect_format_from_filename(path);
                if detected.as_deref() != Some(format_name(target)) {
                    println!(
                        "Warning: Specified format doesn't match output file extension. Using extension: {}",
                        extension_of(&output).unwrap_or_default()
                    );
                }
            }
            output
        }
        None => match &target {
            Some(target) => default_output_path(registry, &input, target)
                .unwrap_or_else(|e| fail(e)),
            None => fail("Either --output or --format must be specified when output path is not provided."),
        },
    };

    let output_ext = extension_of(&output).unwrap_or_default();
    if registry.writer_for(&output).is_err() {
        fail(format!(
            "Unsupported output format '{output_ext}'. Use --list-formats to see supported formats."
        ));
    }
    if !registry.is_conversion_supported(&input_ext, &output_ext) {
        fail(format!(
            "Conversion from {input_ext} to {output_ext} is not supported."
        ));
    }

    let options = config.serialize_options().unwrap_or_else(|e| fail(e));

    if output.exists() && !config.convert.overwrite && !confirm_overwrite(&output) {
        println!("Operation cancelled.");
        std::process::exit(1);
    }

    println!(
        "Converting '{}' ({input_ext}) to '{}' ({output_ext})...",
        input.display(),
        output.display()
    );

    match converter.convert(&input, &output, &options) {
        Ok(report) => {
            println!("✓ Successfully converted to '{}'", report.output.display());
            println!("  Input:  {} ({input_ext})", report.input.display());
            println!("  Output: {} ({output_ext})", report.output.display());
            println!("  Size:   {} bytes", group_thousands(report.bytes_written));
        }
        Err(e) => {
            eprintln!("Error: {e}");
            locks::cleanup_lock_files(&output);
            std::process::exit(1);
        }
    }
}

/// Ask before replacing `output`. Without a terminal there is no one to ask.
fn confirm_overwrite(output: &Path) -> bool {
    let stdin = io::stdin();
    if !stdin.is_terminal() {
        fail(format!(
            "Output file '{}' already exists. Use --overwrite to replace it.",
            output.display()
        ));
    }

    print!(
        "Output file '{}' already exists. Overwrite? [y/N]: ",
        output.display()
    );
    let _ = io::stdout().flush();

    let mut answer = String::new();
    if stdin.lock().read_line(&mut answer).is_err() {
        return false;
    }
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

/// Registry name for a `--format` choice.
fn format_name(choice: &str) -> &str {
    match choice {
        "md" => "markdown",
        other => other,
    }
}

/// `input` with its extension replaced by the target format's primary one.
fn default_output_path(
    registry: &FormatRegistry,
    input: &Path,
    choice: &str,
) -> Result<PathBuf, FormatError> {
    let format = registry.get(format_name(choice))?;
    let ext = format
        .file_extensions()
        .first()
        .map(|ext| ext.trim_start_matches('.'))
        .unwrap_or(choice);
    Ok(input.with_extension(ext))
}

/// Handle the inspect command
fn handle_inspect_command(path: &Path, view: &str) {
    let doc = Converter::default()
        .read_document(path)
        .unwrap_or_else(|e| fail(e));

    let output = match view {
        "json" => serde_json::to_string_pretty(&doc).unwrap_or_else(|e| fail(e)),
        "text" => doc.text_content(),
        _ => doc.summary(),
    };
    println!("{output}");
}

/// Handle the clean-locks command
fn handle_clean_locks_command(dir: &Path) {
    match locks::cleanup_directory(dir) {
        Ok(0) => println!("No lock files found"),
        Ok(removed) => println!("Cleaned up {removed} lock file(s)"),
        Err(e) => fail(format!("Cannot read directory '{}': {e}", dir.display())),
    }
}

/// Handle the list-formats flag
fn handle_list_formats_command() {
    let registry = FormatRegistry::default();

    println!("Supported input formats:");
    for ext in registry.input_extensions() {
        println!("  {ext}");
    }

    println!("\nSupported output formats:");
    for ext in registry.output_extensions() {
        println!("  {ext}");
    }
}

fn load_cli_config(explicit_path: Option<&str>) -> PagefoldConfig {
    let loader = Loader::new().with_optional_file(LOCAL_CONFIG_FILE);
    let loader = if let Some(path) = explicit_path {
        loader.with_file(path)
    } else {
        loader
    };

    loader
        .build()
        .unwrap_or_else(|err| fail(format!("Failed to load configuration: {err}")))
}

/// Fold convert flags into the loaded configuration.
fn apply_config_overrides(config: &mut PagefoldConfig, matches: &ArgMatches) {
    let footer = &mut config.footer;
    if matches.get_flag("no-footer") {
        footer.enabled = false;
    }
    if let Some(layout) = matches.get_one::<String>("footer-layout") {
        footer.layout = layout.to_lowercase();
    }
    if let Some(left) = matches.get_one::<String>("footer-left") {
        footer.left = left.clone();
    }
    if let Some(right) = matches.get_one::<String>("footer-right") {
        footer.right = right.clone();
    }
    if let Some(date_format) = matches.get_one::<String>("date-format") {
        footer.date_format = date_format.clone();
    }

    if let Some(size) = matches.get_one::<String>("page-size") {
        config.convert.page_size = match size.to_lowercase().as_str() {
            "a4" => PageSizeSetting::A4,
            _ => PageSizeSetting::Letter,
        };
    }
    if matches.get_flag("overwrite") {
        config.convert.overwrite = true;
    }

    debug!(?config, "effective configuration");
}

/// `1234567` → `1,234,567`.
fn group_thousands(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
