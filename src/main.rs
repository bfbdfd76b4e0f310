use crate::config::Config;
use clap::{Parser, Subcommand};
use ruxtab::RuxError as LibRuxError;
use ruxtab::{
    convert_lines, detect_tuning, merge_parts, parse_part, render_sections, Tuning,
};
use std::path::{Path, PathBuf};

mod config;

fn main() {
    let result = main_result();
    std::process::exit(match result {
        Ok(()) => 0,
        Err(err) => {
            // use Display instead of Debug for user friendly error messages
            log::error!("{err}");
            1
        }
    });
}

pub fn main_result() -> Result<(), AppError> {
    // args
    let args = CliArgs::parse();

    // setup logging, verbosity only changes what gets reported
    let level = match args.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(format!("ruxtab={level}")),
    )
    .init();

    match args.command {
        Command::Convert {
            input,
            output,
            config,
            source_tuning,
        } => convert_command(&input, &output, &config, source_tuning.as_deref()),
        Command::Merge {
            inputs,
            output,
            config,
            source_tuning,
        } => merge_command(&inputs, &output, &config, &source_tuning),
    }
}

fn convert_command(
    input: &Path,
    output: &Path,
    config_path: &Path,
    source_tuning: Option<&str>,
) -> Result<(), AppError> {
    let config = Config::read_config(config_path)?;
    let target = Tuning::parse(config.target_tuning()?)?;

    let lines = read_lines(input)?;
    let source_labels = match source_tuning {
        Some(list) => split_note_list(list),
        None => {
            let detected = detect_tuning(&lines).ok_or(LibRuxError::NoTuningDetected)?;
            log::info!("detected source tuning: {}", detected.join(" "));
            detected
        }
    };
    let source = Tuning::parse(&source_labels)?;

    let converted = convert_lines(&lines, &source, &target)?;
    write_lines(output, &converted)?;
    log::info!("converted tabs written to {output:?}");
    Ok(())
}

fn merge_command(
    inputs: &[PathBuf],
    output: &Path,
    config_path: &Path,
    source_tunings: &[String],
) -> Result<(), AppError> {
    let config = Config::read_config(config_path)?;
    let target = Tuning::parse(config.target_tuning()?)?;
    let limits = config.limits();

    let mut parts = Vec::with_capacity(inputs.len());
    for (index, input) in inputs.iter().enumerate() {
        let lines = read_lines(input)?;
        // explicit override wins, order matched to the inputs
        let labels = match source_tunings.get(index) {
            Some(list) => split_note_list(list),
            None => {
                let detected = detect_tuning(&lines).ok_or(LibRuxError::NoTuningDetected)?;
                log::info!("{input:?}: detected source tuning {}", detected.join(" "));
                detected
            }
        };
        let name = input.display().to_string();
        let part = parse_part(&name, &lines, &labels, limits.max_fret)?;
        log::info!(
            "{name}: {:?} part with {} section(s)",
            part.role,
            part.sections.len()
        );
        parts.push(part);
    }

    let outcome = merge_parts(&parts, &target, &limits);
    for diagnostic in &outcome.diagnostics {
        log::warn!("{diagnostic}");
    }

    let lines = render_sections(&outcome.sections, &target);
    write_lines(output, &lines)?;
    log::info!("merged {} file(s) into {output:?}", inputs.len());
    log::info!(
        "combined {} section(s) with {} total lines",
        outcome.sections.len(),
        lines.len()
    );
    Ok(())
}

fn read_lines(path: &Path) -> Result<Vec<String>, AppError> {
    let content = std::fs::read_to_string(path)
        .map_err(|err| AppError::OtherError(format!("could not read {path:?}: {err}")))?;
    Ok(content.lines().map(str::to_string).collect())
}

/// Write all lines at once, with a trailing newline.
fn write_lines(path: &Path, lines: &[String]) -> Result<(), AppError> {
    let mut content = lines.join("\n");
    content.push('\n');
    std::fs::write(path, content)
        .map_err(|err| AppError::OtherError(format!("could not write {path:?}: {err}")))
}

fn split_note_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(|note| note.trim().to_string())
        .filter(|note| !note.is_empty())
        .collect()
}

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct CliArgs {
    /// Diagnostic verbosity, repeat up to -vvv.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert a tab file to the target tuning
    Convert {
        /// Input tab file
        input: PathBuf,
        /// Output tab file
        output: PathBuf,
        /// Configuration file with the target tuning
        #[arg(short, long)]
        config: PathBuf,
        /// Source tuning as a comma separated note list (e.g. E2,A2,D3,G3,B3,E4),
        /// detected from the input file when omitted
        #[arg(short, long)]
        source_tuning: Option<String>,
    },
    /// Merge tab files onto a single target tuning
    Merge {
        /// Input tab files
        #[arg(required = true)]
        inputs: Vec<PathBuf>,
        /// Output tab file
        #[arg(short, long)]
        output: PathBuf,
        /// Configuration file with the target tuning
        #[arg(short, long)]
        config: PathBuf,
        /// Per-file source tuning override as a comma separated note list,
        /// order matched to the inputs
        #[arg(short, long)]
        source_tuning: Vec<String>,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    ConfigError(String),
    #[error("configuration error: missing required key '{0}'")]
    ConfigMissingKey(String),
    #[error("parsing error: {0}")]
    ParsingError(String),
    #[error("other error: {0}")]
    OtherError(String),
}

impl From<LibRuxError> for AppError {
    fn from(error: LibRuxError) -> Self {
        match error {
            LibRuxError::IoError(s) => Self::OtherError(s),
            other => Self::ParsingError(other.to_string()),
        }
    }
}
