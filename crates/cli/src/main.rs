mod commands;
mod config;
mod logging;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Output format for CLI responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Text,
    Json,
}

/// GraphLang to graphing-calculator document compiler.
#[derive(Parser)]
#[command(
    name = "graphlang",
    version,
    about = "GraphLang to graphing-calculator document compiler"
)]
struct Cli {
    /// Output format for status and error messages (text or json)
    #[arg(long, global = true, default_value = "text", value_enum)]
    output: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    quiet: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a .graphlang file to a calculator document
    Compile {
        /// Path to the .graphlang source file
        file: PathBuf,
        /// Write the document here instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
        /// Pretty-print the document
        #[arg(long)]
        pretty: bool,
        /// Directory searched for imports not found next to the source
        #[arg(long)]
        stdlib: Option<PathBuf>,
        /// Maximum nesting of macro and import expansion
        #[arg(long)]
        max_expansion_depth: Option<usize>,
        /// Path to a graphlang.toml configuration file
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Validate a document JSON file against the document schema
    Validate {
        /// Path to the document JSON file
        document: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.quiet);

    match cli.command {
        Commands::Compile {
            file,
            out,
            pretty,
            stdlib,
            max_expansion_depth,
            config,
        } => {
            commands::compile::cmd_compile(commands::compile::CompileArgs {
                file: &file,
                out: out.as_deref(),
                pretty,
                stdlib,
                max_expansion_depth,
                config: config.as_deref(),
                output: cli.output,
                quiet: cli.quiet,
            });
        }
        Commands::Validate { document } => {
            commands::validate::cmd_validate(&document, cli.output, cli.quiet);
        }
    }
}

/// Report a plain error message on stderr in the selected format.
pub(crate) fn report_error(msg: &str, output: OutputFormat, quiet: bool) {
    match output {
        OutputFormat::Text => {
            if !quiet {
                eprintln!("error: {}", msg);
            }
        }
        OutputFormat::Json => {
            let json = serde_json::json!({ "error": msg });
            eprintln!("{}", json);
        }
    }
}
