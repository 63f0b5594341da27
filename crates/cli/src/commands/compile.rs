use std::path::{Path, PathBuf};
use std::process;

use crate::config::{self, Overrides};
use crate::{report_error, OutputFormat};

pub(crate) struct CompileArgs<'a> {
    pub file: &'a Path,
    pub out: Option<&'a Path>,
    pub pretty: bool,
    pub stdlib: Option<PathBuf>,
    pub max_expansion_depth: Option<usize>,
    pub config: Option<&'a Path>,
    pub output: OutputFormat,
    pub quiet: bool,
}

pub(crate) fn cmd_compile(args: CompileArgs<'_>) {
    let output = args.output;
    let quiet = args.quiet;

    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let config = match config::load_config(args.config, &cwd) {
        Ok(c) => c,
        Err(msg) => {
            report_error(&msg, output, quiet);
            process::exit(1);
        }
    };
    let options = config::resolve_options(
        &config,
        Overrides {
            max_expansion_depth: args.max_expansion_depth,
            stdlib_dir: args.stdlib,
        },
    );
    tracing::info!(
        file = %args.file.display(),
        stdlib = %options.stdlib_dir.display(),
        max_expansion_depth = options.max_expansion_depth,
        "compiling"
    );

    let doc = match graphlang_core::compile_file(args.file, &options) {
        Ok(doc) => doc,
        Err(e) => {
            match output {
                OutputFormat::Json => {
                    let err_json =
                        serde_json::to_string_pretty(&e.to_json_value()).unwrap_or_default();
                    eprintln!("{}", err_json);
                }
                OutputFormat::Text => {
                    if !quiet {
                        eprint!("{}", e.render(&args.file.display().to_string()));
                    }
                }
            }
            process::exit(1);
        }
    };

    let text = match doc.to_json_string(args.pretty) {
        Ok(t) => t,
        Err(e) => {
            report_error(&format!("serialization error: {}", e), output, quiet);
            process::exit(1);
        }
    };

    match args.out {
        None => println!("{}", text),
        Some(path) => {
            if let Err(e) = std::fs::write(path, format!("{}\n", text)) {
                let msg = format!("error writing '{}': {}", path.display(), e);
                report_error(&msg, output, quiet);
                process::exit(1);
            }
            if !quiet {
                let items = doc.items().len();
                match output {
                    OutputFormat::Text => println!("wrote {} items to {}", items, path.display()),
                    OutputFormat::Json => println!(
                        "{}",
                        serde_json::json!({ "out": path.display().to_string(), "items": items })
                    ),
                }
            }
        }
    }
}
