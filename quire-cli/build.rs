use clap::{Arg, ArgAction, Command, ValueHint};
use clap_complete::{generate_to, shells::*};
use std::env;
use std::io::Error;

// Mirror of the built-in exporters registered by ExporterRegistry::with_defaults
// We need to duplicate this here since build scripts can't access src/ modules
const AVAILABLE_EXPORTERS: &[&str] = &["css", "html", "latex"];

fn sheet_arg() -> Arg {
    Arg::new("sheet")
        .help("Path to the format sheet")
        .required(true)
        .index(1)
        .value_hint(ValueHint::FilePath)
}

fn main() -> Result<(), Error> {
    let outdir = match env::var_os("OUT_DIR") {
        None => return Ok(()),
        Some(outdir) => outdir,
    };

    let mut cmd = Command::new("quire")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for inspecting and exporting quire format sheets")
        .arg_required_else_help(true)
        .arg(
            Arg::new("list-exporters")
                .long("list-exporters")
                .help("List available exporters")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::Count),
        )
        .subcommand(Command::new("inspect").arg(sheet_arg()))
        .subcommand(Command::new("format").arg(sheet_arg()))
        .subcommand(
            Command::new("aggregate").arg(sheet_arg()).arg(
                Arg::new("json")
                    .long("json")
                    .action(ArgAction::SetTrue),
            ),
        )
        .subcommand(
            Command::new("export")
                .arg(sheet_arg())
                .arg(
                    Arg::new("to")
                        .long("to")
                        .value_parser(clap::builder::PossibleValuesParser::new(
                            AVAILABLE_EXPORTERS,
                        ))
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .value_hint(ValueHint::FilePath),
                ),
        )
        .subcommand(Command::new("bullets"));

    // Generate completions for bash
    generate_to(Bash, &mut cmd, "quire", &outdir)?;

    // Generate completions for zsh
    generate_to(Zsh, &mut cmd, "quire", &outdir)?;

    // Generate completions for fish
    generate_to(Fish, &mut cmd, "quire", &outdir)?;

    println!("cargo:warning=Shell completions generated in {outdir:?}");

    Ok(())
}
