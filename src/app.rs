//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - resolves configuration and sets up logging
//! - loads the prediction pipeline once
//! - dispatches to the form (TUI) or a one-shot command

use clap::Parser;

use crate::cli::{Command, ModelArgs, PredictArgs};
use crate::config::AppConfig;
use crate::error::{AppError, EXIT_RUNTIME};

pub mod pipeline;

use pipeline::Session;

/// Entry point for the `exam` binary.
pub fn run() -> Result<(), AppError> {
    // `exam` and `exam --model x.json` behave like `exam tui ...`.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Tui(args) => handle_tui(args),
        Command::Predict(args) => handle_predict(args),
        Command::Schema => {
            print!("{}", crate::report::format_schema());
            Ok(())
        }
        Command::Inspect(args) => handle_inspect(args),
    }
}

fn handle_tui(args: ModelArgs) -> Result<(), AppError> {
    let config = AppConfig::from_env(args.model);
    if let Some(path) = &config.log_file {
        crate::logging::init_file(path)?;
    }

    // Load before touching the terminal so a load failure prints normally.
    let session = Session::start(config)?;
    crate::tui::run(session.pipeline())
}

fn handle_predict(args: PredictArgs) -> Result<(), AppError> {
    crate::logging::init_stderr();
    let config = AppConfig::from_env(args.model.model.clone());
    let session = Session::start(config)?;
    let model = session.pipeline();

    let prediction = crate::form::run_prediction(model.as_ref(), &args.raw_inputs())?;

    if args.json {
        let body = serde_json::json!({
            "request": prediction.request,
            "score": prediction.score,
            "display": crate::report::format_score(prediction.score),
        });
        let text = serde_json::to_string_pretty(&body)
            .map_err(|e| AppError::new(EXIT_RUNTIME, format!("Failed to encode JSON: {e}")))?;
        println!("{text}");
    } else {
        println!("{}", prediction.message());
    }
    Ok(())
}

fn handle_inspect(args: ModelArgs) -> Result<(), AppError> {
    crate::logging::init_stderr();
    let session = Session::start(AppConfig::from_env(args.model))?;
    println!("Artifact: {}", session.config.model_path.display());
    print!(
        "{}",
        crate::report::format_artifact_summary(session.pipeline().artifact())
    );
    Ok(())
}

/// Rewrite argv so `exam` defaults to `exam tui`.
///
/// Rules:
/// - `exam`                        -> `exam tui`
/// - `exam --model m.json`         -> `exam tui --model m.json`
/// - `exam --help/--version/-h`    -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("tui".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "tui" | "predict" | "schema" | "inspect");
    if is_subcommand {
        return argv;
    }

    if arg1.starts_with('-') {
        argv.insert(1, "tui".to_string());
        return argv;
    }

    argv
}
