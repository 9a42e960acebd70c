// Command-line front end for the media transform engine.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use serde_json::Value;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use media_transform::{
    BatchItem, EngineConfig, JsonConfigStore, ConfigStore, MediaFileRef, OptionSet,
    OperationRegistry, Progress, ProgressType, TransformEngine,
};

#[derive(Parser)]
#[command(name = "media-transform", version, about = "Apply registered image operations to media files")]
struct Cli {
    /// Engine settings (JSON)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List registered operations
    List {
        /// Only operations that accept this extension
        #[arg(long)]
        extension: Option<String>,
    },
    /// Print the controls an operation needs for a file
    Controls {
        #[arg(long)]
        operation: String,
        file: PathBuf,
    },
    /// Apply an operation to files
    Apply {
        #[arg(long)]
        operation: String,
        /// Operation option as name=value (repeatable)
        #[arg(long = "option", value_name = "NAME=VALUE")]
        options: Vec<String>,
        /// Options from a JSON object file, overridden by --option
        #[arg(long)]
        options_file: Option<PathBuf>,
        /// Write results here instead of overwriting the sources
        #[arg(long)]
        out_dir: Option<PathBuf>,
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
}

fn main() -> ExitCode {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_file(false)         // Remove file path
        .with_line_number(false)  // Remove line numbers
        .with_thread_ids(false)   // Remove thread IDs
        .with_thread_names(false) // Remove thread names
        .with_target(false)       // Remove module path
        .with_writer(std::io::stderr)
        .compact();

    subscriber.init();

    match run(Cli::parse()) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

/// Returns `Ok(false)` when some files failed.
fn run(cli: Cli) -> Result<bool> {
    let config = match &cli.config {
        Some(path) => EngineConfig::from_json_file(path)?,
        None => EngineConfig::default(),
    };
    debug!("Engine config: {:?}", config);

    let engine = TransformEngine::new(OperationRegistry::with_defaults(), config);

    match cli.command {
        Command::List { extension } => {
            let descriptors: Vec<_> = match &extension {
                Some(ext) => engine.registry().list_for_extension(ext).collect(),
                None => engine.registry().descriptors().collect(),
            };
            println!("{}", serde_json::to_string_pretty(&descriptors)?);
            Ok(true)
        }
        Command::Controls { operation, file } => {
            let controls = engine.describe_controls(
                &MediaFileRef::from_path(file),
                &operation,
                &OptionSet::new(),
            )?;
            println!("{}", serde_json::to_string_pretty(&controls)?);
            Ok(true)
        }
        Command::Apply {
            operation,
            options,
            options_file,
            out_dir,
            files,
        } => {
            let mut option_set = match options_file {
                Some(path) => JsonConfigStore::from_json_file(path)?.to_option_set(),
                None => OptionSet::new(),
            };
            for raw in &options {
                let (name, value) = parse_option(raw)?;
                option_set.insert(name, value);
            }

            let items = files
                .into_iter()
                .map(|path| batch_item(path, out_dir.as_deref()))
                .collect::<Result<Vec<_>>>()?;

            let runtime = tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()
                .context("Failed to start runtime")?;

            let processor = engine.batch_processor();
            let outcomes = runtime.block_on(processor.run(
                items,
                &operation,
                &option_set,
                report_progress,
            ))?;

            let failed = outcomes.iter().filter(|o| !o.is_success()).count();
            for outcome in &outcomes {
                match &outcome.result {
                    Ok(report) => println!(
                        "ok    {} ({}x{}, {} bytes)",
                        report.path.display(),
                        report.width,
                        report.height,
                        report.new_size
                    ),
                    Err(e) => println!("fail  {}: {}", outcome.source.display(), e),
                }
            }
            info!("{} of {} files transformed", outcomes.len() - failed, outcomes.len());
            Ok(failed == 0)
        }
    }
}

fn report_progress(progress: Progress) {
    if progress.progress_type == ProgressType::Progress || progress.progress_type == ProgressType::Error {
        debug!(
            "[{}%] {}/{}",
            progress.progress_percentage, progress.completed_tasks, progress.total_tasks
        );
    }
}

fn batch_item(path: PathBuf, out_dir: Option<&Path>) -> Result<BatchItem> {
    let file = MediaFileRef::from_path(&path);
    match out_dir {
        None => Ok(BatchItem::overwrite(file)),
        Some(dir) => {
            let name = path
                .file_name()
                .with_context(|| format!("{} has no file name", path.display()))?;
            Ok(BatchItem::to_destination(file, dir.join(name)))
        }
    }
}

/// Parses `name=value`; the value is read as JSON when it parses, else as a string.
fn parse_option(raw: &str) -> Result<(String, Value)> {
    let Some((name, value)) = raw.split_once('=') else {
        bail!("option '{raw}' must look like name=value");
    };
    let name = name.trim();
    if name.is_empty() {
        bail!("option '{raw}' has an empty name");
    }
    let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
    Ok((name.to_string(), value))
}
