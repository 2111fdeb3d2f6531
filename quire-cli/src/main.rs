// Command-line interface for quire format sheets
//
// A format sheet is the `<Formats>` XML file the editor stores shared formats
// in. This binary inspects, normalizes, aggregates and exports such sheets.
//
// Usage:
//  quire inspect <sheet>                        - Describe every format of the sheet
//  quire format <sheet>                         - Re-write the sheet in canonical form
//  quire aggregate <sheet> [--json]             - Summarize the sheet per capability
//  quire export <sheet> --to <exporter> [-o f]  - Export a specimen document
//  quire bullets                                - List the standard bullets
//  quire --list-exporters                       - List available exporters
//
// Extra Parameters:
//
// Exporter-specific parameters can be passed using --extra-<parameter-name> <value>.
// The CLI layer strips the "extra-" prefix and passes the parameters to the exporter.
// Example:
//  quire export sheet.xml --to html --extra-style html4 --extra-title Specimen

mod commands;

use clap::{Arg, ArgAction, ArgMatches, Command, ValueHint};
use commands::{CommandError, InspectOptions};
use quire_config::{Loader, QuireConfig};
use std::collections::HashMap;
use tracing::metadata::LevelFilter;

/// Parse extra-* arguments from command line args
/// Returns (cleaned_args_without_extras, extra_params_map)
///
/// Supports both:
/// - `--extra-<key> <value>` (explicit value)
/// - `--extra-<key>` (boolean flag, defaults to "true")
fn parse_extra_args(args: &[String]) -> (Vec<String>, HashMap<String, String>) {
    let mut cleaned_args = Vec::new();
    let mut extra_params = HashMap::new();
    let mut i = 0;

    while i < args.len() {
        let arg = &args[i];

        if let Some(key) = arg.strip_prefix("--extra-") {
            let has_value = args.get(i + 1).is_some_and(|next| !next.starts_with('-'));
            if has_value {
                extra_params.insert(key.to_string(), args[i + 1].clone());
                i += 2;
            } else {
                extra_params.insert(key.to_string(), "true".to_string());
                i += 1;
            }
            continue;
        }

        cleaned_args.push(arg.clone());
        i += 1;
    }

    (cleaned_args, extra_params)
}

fn sheet_arg() -> Arg {
    Arg::new("sheet")
        .help("Path to the format sheet")
        .required(true)
        .index(1)
        .value_hint(ValueHint::FilePath)
}

fn build_cli() -> Command {
    Command::new("quire")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for inspecting and exporting quire format sheets")
        .long_about(
            "quire works with format sheets: the <Formats> XML files holding the\n\
            shared paragraph, list and character formats of a document.\n\n\
            Extra Parameters:\n  \
            Use --extra-<name> [value] to pass exporter-specific options.\n  \
            Boolean flags can omit the value (defaults to 'true').\n\n\
            Examples:\n  \
            quire inspect sheet.xml                      # Describe each format\n  \
            quire aggregate sheet.xml --json             # Capability summaries as JSON\n  \
            quire export sheet.xml --to latex            # LaTeX specimen to stdout\n  \
            quire export sheet.xml -o specimen.html      # Exporter picked from extension",
        )
        .arg_required_else_help(true)
        .arg(
            Arg::new("list-exporters")
                .long("list-exporters")
                .help("List available exporters")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to a quire.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Increase logging verbosity (-v info, -vv debug, -vvv trace)")
                .action(ArgAction::Count)
                .global(true),
        )
        .subcommand(
            Command::new("inspect")
                .about("Describe every format of a sheet")
                .long_about(
                    "Print, for each format of the sheet, its identifier, type name,\n\
                    capabilities and validity. The canonical string and CSS lines are\n\
                    controlled by [inspect] in the configuration, or per run with\n\
                    --extra-show-string and --extra-show-css.",
                )
                .arg(sheet_arg()),
        )
        .subcommand(
            Command::new("format")
                .about("Re-write a sheet in canonical form")
                .long_about(
                    "Read the sheet and write it back to stdout: default values are\n\
                    omitted and attributes follow the fixed chain order.",
                )
                .arg(sheet_arg()),
        )
        .subcommand(
            Command::new("aggregate")
                .about("Summarize a sheet per capability")
                .arg(sheet_arg())
                .arg(
                    Arg::new("json")
                        .long("json")
                        .help("Print the summaries as JSON")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("export")
                .about("Export a specimen document using the sheet's formats")
                .long_about(
                    "Build a document with one sample paragraph per paragraph format of\n\
                    the sheet (character formats become runs of a shared paragraph)\n\
                    and export it.\n\n\
                    The exporter is given by --to, or detected from the -o extension.\n\
                    Use --list-exporters to see all options.",
                )
                .arg(sheet_arg())
                .arg(
                    Arg::new("to")
                        .long("to")
                        .help("Exporter to use (html, latex, css)")
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("Output file path (defaults to stdout)")
                        .value_hint(ValueHint::FilePath),
                ),
        )
        .subcommand(Command::new("bullets").about("List the standard bullet table"))
}

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let (cleaned_args, mut extra_params) = parse_extra_args(&args);
    let matches = build_cli().get_matches_from(&cleaned_args);

    setup_tracing(matches.get_count("verbose"));

    if matches.get_flag("list-exporters") {
        print!("{}", commands::list_exporters());
        return;
    }

    let mut config = load_cli_config(matches.get_one::<String>("config").map(|s| s.as_str()));
    apply_config_overrides(&mut config, &mut extra_params);

    config.fonts.apply();
    quire_format::register_all();

    match run(&matches, &config, &extra_params) {
        Ok(Some(output)) => print!("{output}"),
        Ok(None) => {}
        Err(err) => {
            eprintln!("Error: {err}");
            std::process::exit(1);
        }
    }
}

fn run(
    matches: &ArgMatches,
    config: &QuireConfig,
    extra_params: &HashMap<String, String>,
) -> Result<Option<String>, CommandError> {
    let sheet = |sub_matches: &ArgMatches| {
        let path = sub_matches
            .get_one::<String>("sheet")
            .expect("sheet is required");
        commands::load_sheet(path)
    };

    match matches.subcommand() {
        Some(("inspect", sub_matches)) => Ok(Some(commands::inspect(
            &sheet(sub_matches)?,
            InspectOptions::from(config),
        ))),
        Some(("format", sub_matches)) => Ok(Some(commands::normalize(&sheet(sub_matches)?))),
        Some(("aggregate", sub_matches)) => {
            let organizer = sheet(sub_matches)?;
            if sub_matches.get_flag("json") {
                commands::aggregate_json(&organizer).map(Some)
            } else {
                Ok(Some(commands::aggregate(&organizer)))
            }
        }
        Some(("export", sub_matches)) => commands::export(
            &sheet(sub_matches)?,
            sub_matches.get_one::<String>("to").map(|s| s.as_str()),
            sub_matches.get_one::<String>("output").map(|s| s.as_str()),
            config,
            extra_params,
        ),
        Some(("bullets", _)) => Ok(Some(commands::bullets())),
        _ => {
            eprintln!("Unknown subcommand. Use --help for usage information.");
            std::process::exit(1);
        }
    }
}

/// Log to stderr; `-v` raises the level from warnings up to trace.
fn setup_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    tracing_subscriber::fmt()
        .without_time()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn load_cli_config(explicit_path: Option<&str>) -> QuireConfig {
    let loader = Loader::new().with_optional_file("quire.toml");
    let loader = if let Some(path) = explicit_path {
        loader.with_file(path)
    } else {
        loader
    };

    loader.build().unwrap_or_else(|err| {
        eprintln!("Failed to load configuration: {err}");
        std::process::exit(1);
    })
}

fn apply_config_overrides(config: &mut QuireConfig, extra_params: &mut HashMap<String, String>) {
    if let Some(raw) = extra_params.remove("show-css") {
        config.inspect.show_css = parse_bool_arg("show-css", &raw);
    }
    if let Some(raw) = extra_params.remove("show-string") {
        config.inspect.show_string = parse_bool_arg("show-string", &raw);
    }
}

fn parse_bool_arg(name: &str, raw: &str) -> bool {
    match raw.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => true,
        "false" | "0" | "no" | "off" => false,
        _ => {
            eprintln!("Invalid value for --extra-{name}: '{raw}' (expected true or false)");
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|arg| arg.to_string()).collect()
    }

    #[test]
    fn extra_args_are_stripped() {
        let (cleaned, extras) = parse_extra_args(&args(&[
            "quire",
            "export",
            "sheet.xml",
            "--extra-style",
            "html4",
            "--extra-standalone",
            "--to",
            "html",
        ]));
        assert_eq!(cleaned, args(&["quire", "export", "sheet.xml", "--to", "html"]));
        assert_eq!(extras.get("style").map(String::as_str), Some("html4"));
        assert_eq!(extras.get("standalone").map(String::as_str), Some("true"));
    }

    #[test]
    fn cli_definition_is_consistent() {
        build_cli().debug_assert();
    }

    #[test]
    fn inspect_overrides_update_config() {
        let mut config = quire_config::load_defaults().expect("defaults");
        let mut extras: HashMap<String, String> =
            [("show-css".to_string(), "false".to_string())].into();
        apply_config_overrides(&mut config, &mut extras);
        assert!(!config.inspect.show_css);
        assert!(extras.is_empty());
    }
}
