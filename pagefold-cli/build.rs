use clap::{Arg, ArgAction, Command, ValueHint};
use clap_complete::{generate_to, shells::*};
use std::env;
use std::io::Error;

// Mirror of the format choices accepted by src/main.rs
// We need to duplicate this here since build scripts can't access src/ modules
const TARGET_FORMATS: &[&str] = &["md", "markdown", "docx", "pdf"];
const INSPECT_VIEWS: &[&str] = &["summary", "json", "text"];

fn main() -> Result<(), Error> {
    let outdir = match env::var_os("OUT_DIR") {
        None => return Ok(()),
        Some(outdir) => outdir,
    };

    let mut cmd = Command::new("pagefold")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert documents between Markdown, PDF and DOCX")
        .arg_required_else_help(true)
        .arg(
            Arg::new("list-formats")
                .long("list-formats")
                .help("List supported input and output formats")
                .action(ArgAction::SetTrue),
        )
        .subcommand(
            Command::new("convert")
                .arg(
                    Arg::new("input")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .value_parser(clap::builder::PossibleValuesParser::new(TARGET_FORMATS)),
                )
                .arg(
                    Arg::new("footer-layout")
                        .long("footer-layout")
                        .value_parser(["single", "double"]),
                )
                .arg(
                    Arg::new("page-size")
                        .long("page-size")
                        .value_parser(["letter", "a4"]),
                ),
        )
        .subcommand(
            Command::new("inspect")
                .arg(
                    Arg::new("path")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("view")
                        .index(2)
                        .value_parser(clap::builder::PossibleValuesParser::new(INSPECT_VIEWS)),
                ),
        )
        .subcommand(
            Command::new("clean-locks").arg(
                Arg::new("dir")
                    .index(1)
                    .value_hint(ValueHint::DirPath),
            ),
        );

    // Generate completions for bash
    generate_to(Bash, &mut cmd, "pagefold", &outdir)?;

    // Generate completions for zsh
    generate_to(Zsh, &mut cmd, "pagefold", &outdir)?;

    // Generate completions for fish
    generate_to(Fish, &mut cmd, "pagefold", &outdir)?;

    println!("cargo:warning=Shell completions generated in {outdir:?}");

    Ok(())
}
