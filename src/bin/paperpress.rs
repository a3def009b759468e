//! Command-line front end for paperpress.
//!
//! Loads one file from disk, reports whether it is accepted, and runs a
//! conversion or split into an output directory.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{ArgGroup, Parser, Subcommand};
use paperpress::{
    Converter, ConverterConfig, DirectorySink, Feedback, InputFile, MimeType, Operation,
    OutputFile, Presenter, SplitCriteria,
};
use serde::Serialize;

/// Convert a JPEG, PNG or text file to a one-page PDF, or split a text file.
#[derive(Parser, Debug)]
#[command(name = "paperpress", version, arg_required_else_help = true)]
struct Cli {
    /// JSON configuration file; missing keys keep their defaults.
    #[arg(long, global = true, env = "PAPERPRESS_CONFIG")]
    config: Option<PathBuf>,

    /// Declared MIME type, overriding detection from the file extension.
    #[arg(long, global = true)]
    mime: Option<String>,

    /// Directory receiving the generated files.
    #[arg(short, long, global = true, default_value = ".")]
    output: PathBuf,

    /// Print a JSON summary on stdout.
    #[arg(long, global = true)]
    json: bool,

    /// Verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert the file to a one-page PDF.
    Convert {
        /// Input file
        input: PathBuf,
    },
    /// Split a text file into parts.
    #[command(group(ArgGroup::new("criteria").required(true).multiple(false)))]
    Split {
        /// Input file
        input: PathBuf,
        /// Lines per part
        #[arg(long, group = "criteria", allow_negative_numbers = true)]
        lines: Option<i64>,
        /// Words per part
        #[arg(long, group = "criteria", allow_negative_numbers = true)]
        words: Option<i64>,
        /// Kilobytes per part
        #[arg(long = "size-kb", group = "criteria", allow_negative_numbers = true)]
        size_kb: Option<i64>,
        /// Criterion as `kind:n` (lines:10, words:100, size:4)
        #[arg(long, group = "criteria")]
        by: Option<SplitCriteria>,
    },
    /// Only check whether the file would be accepted.
    Check {
        /// Input file
        input: PathBuf,
    },
}

/// Prints feedback to stderr.
struct StderrPresenter;

impl Presenter for StderrPresenter {
    fn display(&mut self, feedback: &Feedback) {
        if feedback.is_error() {
            eprintln!("error: {}", feedback);
        } else {
            eprintln!("{}", feedback);
        }
    }
}

#[derive(Serialize)]
struct Summary<'a> {
    input: &'a str,
    mime: &'a str,
    feedback: &'a Feedback,
    outputs: &'a [OutputFile],
}

fn load_config(path: Option<&Path>) -> Result<ConverterConfig> {
    match path {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config {}", path.display()))?;
            ConverterConfig::from_json(&json)
                .with_context(|| format!("Invalid config {}", path.display()))
        },
        None => Ok(ConverterConfig::default()),
    }
}

fn load_input(path: &Path, mime: Option<&str>) -> Result<InputFile> {
    let content =
        fs::read(path).with_context(|| format!("Failed to read input {}", path.display()))?;
    let mime_type = mime.map(MimeType::parse).unwrap_or_else(|| MimeType::from_path(path));
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    Ok(InputFile::new(name, mime_type, content))
}

fn split_criteria(
    lines: Option<i64>,
    words: Option<i64>,
    size_kb: Option<i64>,
    by: Option<SplitCriteria>,
) -> Result<SplitCriteria> {
    let criteria = match (lines, words, size_kb, by) {
        (Some(n), ..) => SplitCriteria::from_parts("lines", n)?,
        (_, Some(n), ..) => SplitCriteria::from_parts("words", n)?,
        (_, _, Some(n), _) => SplitCriteria::from_parts("size", n)?,
        (_, _, _, Some(criteria)) => criteria,
        _ => anyhow::bail!("one of --lines, --words, --size-kb or --by is required"),
    };
    Ok(criteria)
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();

    let config = load_config(cli.config.as_deref())?;
    let converter = Converter::with_config(config);
    let mut presenter = StderrPresenter;

    let (input, operation) = match &cli.command {
        Command::Convert { input } => (input, Some(Operation::Convert)),
        Command::Split {
            input,
            lines,
            words,
            size_kb,
            by,
        } => (input, Some(Operation::Split(split_criteria(*lines, *words, *size_kb, *by)?))),
        Command::Check { input } => (input, None),
    };
    let file = load_input(input, cli.mime.as_deref())?;

    let loaded = converter.load(&file);
    presenter.display(&loaded);

    let (feedback, outputs) = if loaded.is_error() {
        (loaded, Vec::new())
    } else if let Some(operation) = operation {
        let mut sink = DirectorySink::new(&cli.output);
        match converter.run_into(Some(&file), operation, &mut sink) {
            Ok(outputs) => {
                let names: Vec<&str> = outputs.iter().map(|o| o.name.as_str()).collect();
                let feedback = if names.is_empty() {
                    Feedback::success("Nothing to write: the text is empty.")
                } else {
                    Feedback::success(format!("Wrote {}", names.join(", ")))
                };
                presenter.display(&feedback);
                (feedback, outputs)
            },
            Err(err) => {
                log::debug!("{} failed: {}", operation, err);
                let feedback = Feedback::from_error(&err);
                presenter.display(&feedback);
                (feedback, Vec::new())
            },
        }
    } else {
        (loaded, Vec::new())
    };

    if cli.json {
        let summary = Summary {
            input: file.name(),
            mime: file.mime_type().as_str(),
            feedback: &feedback,
            outputs: &outputs,
        };
        println!("{}", serde_json::to_string_pretty(&summary)?);
    }

    Ok(if feedback.is_error() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}
