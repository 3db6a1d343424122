//! Copydesk command line.
//!
//! This binary is the composition root. It:
//!
//! 1. **Parses settings** from flags and environment ([`config::Settings`]).
//! 2. **Wires logging**: a `tracing-subscriber` formatter on stderr, plain or
//!    JSON, filtered by `COPYDESK_LOG`. Every span and event emitted by the
//!    workspace crates flows through it.
//! 3. **Constructs infrastructure** (completion provider, text analysis, the
//!    flat-file stores) and injects it into [`nodes::ContentPipeline`].
//! 4. **Runs one subcommand** and prints its result as JSON on stdout.
//!
//! A failed pipeline operation still prints its failure payload; the process
//! then exits with status 1.

use std::io::Read;
use std::process::ExitCode;

use anyhow::{anyhow, Context};
use clap::{Parser, Subcommand};
use memory::{GuidelinesFile, PreferencesFile};
use pipeline::{ContentType, RequestId};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod wiring;

use commands::{
    analyze_text, parse_content_type, parse_request_id, AnalyzeArgs, CreateArgs, FeedbackArgs,
    GuidelinesArgs, PreferencesArgs,
};
use config::{LogFormat, Settings};
use wiring::{build_pipeline, Completion};

#[derive(Parser, Debug)]
#[command(name = "copydesk", version, about = "Plan, write and review content with a language model")]
struct Cli {
    #[command(flatten)]
    settings: Settings,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a content request through routing, planning, writing and review
    Create(CreateArgs),
    /// Record reviewer feedback for a finished request
    Feedback(FeedbackArgs),
    /// Show the review status of a request
    Status {
        #[arg(value_parser = parse_request_id)]
        request_id: RequestId,
    },
    /// Show performance metrics over the content history
    Analytics,
    /// Look for patterns in successful content
    Patterns {
        /// Only consider successful content of this type
        #[arg(long, value_parser = parse_content_type)]
        content_type: Option<ContentType>,
    },
    /// Score a text locally without calling the model
    Analyze(AnalyzeArgs),
    /// Show or edit the brand guidelines
    Guidelines(GuidelinesArgs),
    /// Show or edit the stored user preferences
    Preferences(PreferencesArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(&cli.settings)?;
    run(cli).await
}

fn init_tracing(settings: &Settings) -> anyhow::Result<()> {
    let filter = EnvFilter::try_new(&settings.log_filter)
        .with_context(|| format!("invalid log filter '{}'", settings.log_filter))?;
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    match settings.log_format {
        LogFormat::Text => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    }
    .map_err(|e| anyhow!(e))
}

async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let settings = cli.settings;

    match cli.command {
        Command::Create(args) => {
            let request = args.into_request()?;
            let mut pipeline = build_pipeline(&settings, Completion::Required)?;
            info!(request_id = %request.request_id, "submitting content request");
            let outcome = pipeline.process_request(request).await;
            print_json(&outcome)?;
            Ok(exit_code(outcome.is_success()))
        }
        Command::Feedback(args) => {
            let mut pipeline = build_pipeline(&settings, Completion::Optional)?;
            let outcome = pipeline.process_feedback(args.request_id, args.into_feedback());
            print_json(&outcome)?;
            Ok(exit_code(outcome.is_success()))
        }
        Command::Status { request_id } => {
            let pipeline = build_pipeline(&settings, Completion::Optional)?;
            match pipeline.content_status(request_id) {
                Some(status) => {
                    let mut value = serde_json::to_value(&status)?;
                    value["found"] = serde_json::Value::Bool(true);
                    print_json(&value)?;
                    Ok(ExitCode::SUCCESS)
                }
                None => {
                    print_json(&serde_json::json!({ "found": false, "request_id": request_id }))?;
                    Ok(ExitCode::FAILURE)
                }
            }
        }
        Command::Analytics => {
            let pipeline = build_pipeline(&settings, Completion::Optional)?;
            print_json(&pipeline.performance_metrics())?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Patterns { content_type } => {
            let pipeline = build_pipeline(&settings, Completion::Optional)?;
            print_json(&pipeline.pattern_report(content_type))?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Analyze(args) => {
            let text = match &args.file {
                Some(path) => std::fs::read_to_string(path)
                    .with_context(|| format!("failed to read '{}'", path.display()))?,
                None => {
                    let mut text = String::new();
                    std::io::stdin()
                        .read_to_string(&mut text)
                        .context("failed to read stdin")?;
                    text
                }
            };
            print_json(&analyze_text(&text, &args.title, args.keywords))?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Guidelines(args) => {
            let mut file = GuidelinesFile::in_dir(&settings.data_dir);
            if args.has_changes() {
                file.update(|g| args.apply(g))?;
                info!("brand guidelines updated");
            }
            if args.render {
                println!("{}", file.guidelines().render());
            } else {
                print_json(file.guidelines())?;
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Preferences(args) => {
            let mut file = PreferencesFile::in_dir(&settings.data_dir);
            if args.has_changes() {
                file.update(|p| args.apply(p))?;
                info!("user preferences updated");
            }
            print_json(file.preferences())?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn exit_code(success: bool) -> ExitCode {
    if success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
