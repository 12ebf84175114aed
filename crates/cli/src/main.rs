mod commands;
mod config;

use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use composer_core::JsonFactory;
use composer_render::{register_defaults, ViewNode};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Output format for CLI responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Text,
    Json,
}

/// Declarative view hierarchy renderer.
#[derive(Parser)]
#[command(name = "composer", version, about = "Declarative view hierarchy renderer")]
struct Cli {
    /// Output format (text or json)
    #[arg(long, global = true, default_value = "text", value_enum)]
    output: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    quiet: bool,

    /// Log dropped nodes and rule decisions to stderr
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Where rule values come from.
#[derive(clap::Args, Debug)]
pub(crate) struct RuleArgs {
    /// TOML file with a [rules] table of name = true|false
    #[arg(long)]
    rules: Option<PathBuf>,

    /// Set a rule value, e.g. --set logged_in=true (repeatable, wins over --rules)
    #[arg(long = "set", value_name = "NAME=BOOL")]
    set: Vec<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a document and print the realized view tree
    Render {
        /// Path to the JSON document
        document: PathBuf,
        #[command(flatten)]
        rules: RuleArgs,
    },

    /// Compile a document and print the component tree without realizing it
    Inspect {
        /// Path to the JSON document
        document: PathBuf,
        #[command(flatten)]
        rules: RuleArgs,
    },

    /// List the registered type tags
    Types,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Render { document, rules } => {
            commands::render::cmd_render(&document, &rules, cli.output, cli.quiet);
        }
        Commands::Inspect { document, rules } => {
            commands::inspect::cmd_inspect(&document, &rules, cli.output, cli.quiet);
        }
        Commands::Types => {
            commands::types::cmd_types(cli.output);
        }
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        tracing_subscriber::EnvFilter::new("debug")
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into())
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Build the factory used by `render` and `inspect`: the default layouts
/// and widgets plus one constant rule per configured name.
///
/// Exits with status 1 if the rule configuration is invalid.
pub(crate) fn build_factory(
    rules: &RuleArgs,
    output: OutputFormat,
    quiet: bool,
) -> JsonFactory<ViewNode> {
    let values = match config::resolve_rules(rules.rules.as_deref(), &rules.set) {
        Ok(values) => values,
        Err(msg) => {
            report_error(&msg, output, quiet);
            process::exit(1);
        }
    };

    let mut factory = JsonFactory::new();
    register_defaults(&mut factory);
    for (name, value) in values {
        tracing::debug!(rule = %name, value, "registering rule");
        factory.register_rule(name, move || value);
    }
    factory
}

/// Read and parse a JSON document, exiting with status 1 on failure.
pub(crate) fn read_document(path: &Path, output: OutputFormat, quiet: bool) -> serde_json::Value {
    let text = match std::fs::read_to_string(path) {
        Ok(s) => s,
        Err(e) => {
            let msg = format!("error reading file '{}': {}", path.display(), e);
            report_error(&msg, output, quiet);
            process::exit(1);
        }
    };
    match serde_json::from_str(&text) {
        Ok(v) => v,
        Err(e) => {
            let msg = format!("error parsing JSON in '{}': {}", path.display(), e);
            report_error(&msg, output, quiet);
            process::exit(1);
        }
    }
}

/// Print an error message to stderr in the appropriate format.
pub(crate) fn report_error(msg: &str, output: OutputFormat, quiet: bool) {
    if quiet {
        return;
    }
    match output {
        OutputFormat::Text => eprintln!("{}", msg),
        OutputFormat::Json => {
            eprintln!("{}", serde_json::json!({ "error": msg }));
        }
    }
}
