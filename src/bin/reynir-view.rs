//! Command-line interface for reynir-view
//! Renders analysis server responses (token JSON) into interactive HTML and other formats.
//!
//! Usage:
//!   reynir-view render `<path>` [--format `<format>`] [--config `<file>`]  - Render a token file
//!   reynir-view names `<path>` [--config `<file>`]                       - List the name register
//!   reynir-view formats                                                - List output formats

use clap::{Arg, Command};
use reynir_view::view::config::{Loader, ViewConfig};
use reynir_view::view::formats::FormatRegistry;
use reynir_view::view::tokens::Analysis;
use reynir_view::RenderSession;
use tracing_subscriber::EnvFilter;

fn config_arg() -> Arg {
    Arg::new("config")
        .long("config")
        .short('c')
        .help("TOML file layered over the built-in defaults")
}

fn path_arg() -> Arg {
    Arg::new("path")
        .help("Path to an analysis response or a bare token document (JSON)")
        .required(true)
        .index(1)
}

fn main() {
    // Logs go to stderr, rendered output to stdout
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let matches = Command::new("reynir-view")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Render parsed Icelandic text as interactive HTML")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("render")
                .about("Render a token file")
                .arg(path_arg())
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .help("Output format (html, page, text, json)"),
                )
                .arg(config_arg()),
        )
        .subcommand(
            Command::new("names")
                .about("List the displayable name register of a token file")
                .arg(path_arg())
                .arg(config_arg()),
        )
        .subcommand(Command::new("formats").about("List available output formats"))
        .get_matches();

    match matches.subcommand() {
        Some(("render", render_matches)) => {
            let path = required(render_matches, "path");
            let config = load_config(render_matches.get_one::<String>("config"));
            let format = render_matches.get_one::<String>("format").cloned();
            handle_render_command(path, format, &config);
        }
        Some(("names", names_matches)) => {
            let path = required(names_matches, "path");
            let config = load_config(names_matches.get_one::<String>("config"));
            handle_names_command(path, &config);
        }
        Some(("formats", _)) => {
            handle_formats_command();
        }
        _ => unreachable!(),
    }
}

fn required<'a>(matches: &'a clap::ArgMatches, name: &str) -> &'a str {
    match matches.get_one::<String>(name) {
        Some(value) => value,
        None => {
            eprintln!("Error: missing argument '{}'", name);
            std::process::exit(2);
        }
    }
}

fn load_config(path: Option<&String>) -> ViewConfig {
    let loader = match path {
        Some(path) => Loader::new().with_file(path),
        None => Loader::new(),
    };
    loader.build().unwrap_or_else(|e| {
        eprintln!("Configuration error: {}", e);
        std::process::exit(1);
    })
}

fn read_source(path: &str) -> String {
    std::fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading file: {}", e);
        std::process::exit(1);
    })
}

/// Handle the render command
fn handle_render_command(path: &str, format: Option<String>, config: &ViewConfig) {
    let source = read_source(path);

    let mut session = RenderSession::default();
    if let Err(e) = session.render_json(&source) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    let format = format.unwrap_or_else(|| FormatRegistry::default_format(&config.html).to_string());

    let registry = FormatRegistry::with_config(&config.html);
    let output = registry
        .serialize(session.model(), session.names(), &format)
        .unwrap_or_else(|e| {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        });

    print!("{}", output);
}

/// Handle the names command
fn handle_names_command(path: &str, config: &ViewConfig) {
    let source = read_source(path);
    let analysis = Analysis::from_json(&source).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });

    let names = analysis.names();
    for entry in names.list_displayable_in(&config.names.locale) {
        println!("{}\t{}", entry.name, entry.title);
    }
}

/// Handle the formats command
fn handle_formats_command() {
    let registry = FormatRegistry::with_defaults();
    println!("Available formats:\n");
    for (name, description) in registry.formats() {
        println!("  {}", name);
        println!("    {}", description);
    }
}
