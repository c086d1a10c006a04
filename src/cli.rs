// src/cli.rs
use std::{ffi::OsString, path::PathBuf, time::Duration};

use clap::{error::ErrorKind, CommandFactory, Parser, ValueEnum};
use color_eyre::eyre::{eyre, Result};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use crate::config::consts::{DETAIL_WORKERS, RETRY_LIMIT, TIMEOUT_MS};
use crate::config::options::{AppOptions, ExportFormat, ExportOptions, SchoolSource};
use crate::formats::classify::ClassifierMode;
use crate::progress::{NullProgress, Progress};
use crate::runner::{self, RunOutcome};

#[derive(Parser, Debug)]
#[command(name = "schulfinder")]
#[command(version)]
#[command(about = "Export school data from schulfinder.kultus-bw.de", long_about = None)]
#[command(disable_help_flag = true)]
pub struct Cli {
    /// Output file
    #[arg(value_name = "FILE")]
    pub files: Vec<PathBuf>,

    /// Specify selection criteria by link generated through web interface
    #[arg(short, long, value_name = "URL")]
    pub url: Option<String>,

    /// Use froide's public bodies format (for Frag den Staat)
    #[arg(short, long)]
    pub froide: bool,

    /// Save schools with problems, if any, into separate file (requires --froide)
    #[arg(short, long, value_name = "FILE")]
    pub problems: Option<PathBuf>,

    /// Show only errors
    #[arg(short, long)]
    pub quiet: bool,

    /// Classification strategy for --froide
    #[arg(long, value_enum, default_value_t = ClassifierArg::TypeTable)]
    pub classifier: ClassifierArg,

    /// Retries per request
    #[arg(long, value_name = "N", default_value_t = RETRY_LIMIT)]
    pub retries: u32,

    /// Timeout per request in milliseconds
    #[arg(long, value_name = "MS", default_value_t = TIMEOUT_MS)]
    pub timeout: u64,

    /// Concurrent detail requests
    #[arg(long, value_name = "N", default_value_t = DETAIL_WORKERS)]
    pub workers: usize,

    /// Append debug log lines to this file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Print help
    #[arg(short, long)]
    pub help: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClassifierArg {
    TypeTable,
    NameAcronym,
}

impl From<ClassifierArg> for ClassifierMode {
    fn from(arg: ClassifierArg) -> Self {
        match arg {
            ClassifierArg::TypeTable => ClassifierMode::TypeTable,
            ClassifierArg::NameAcronym => ClassifierMode::NameAcronym,
        }
    }
}

#[derive(Debug)]
pub enum Invocation {
    /// Print this text, exit 0.
    Print(String),
    Run(AppOptions),
}

pub fn help_text() -> String {
    Cli::command().render_help().to_string()
}

/// Map arguments onto options. `Err` carries a message for the user.
pub fn parse_args<I, T>(args: I) -> Result<Invocation, String>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(e) if e.kind() == ErrorKind::DisplayVersion => return Ok(Invocation::Print(e.to_string())),
        Err(e) => {
            let rendered = e.to_string();
            let first = rendered.lines().next().unwrap_or_default();
            return Err(first.trim_start_matches("error: ").to_string());
        }
    };

    if cli.help || cli.files.is_empty() {
        return Ok(Invocation::Print(help_text()));
    }
    if cli.files.len() > 1 {
        return Err("Too many arguments.".to_string());
    }
    if cli.workers == 0 {
        return Err("Option `--workers` must be at least 1".to_string());
    }

    let mut opts = AppOptions::default();
    opts.quiet = cli.quiet;
    opts.log_file = cli.log_file;

    opts.fetch.source = match cli.url {
        Some(url) => SchoolSource::Url(url),
        None => SchoolSource::AllDistricts,
    };
    opts.fetch.retry_limit = cli.retries;
    opts.fetch.timeout = Duration::from_millis(cli.timeout);
    opts.fetch.detail_workers = cli.workers;

    let out = cli.files.into_iter().next().unwrap_or_default();
    opts.export = if cli.froide {
        ExportOptions::froide(out).with_classifier(cli.classifier.into())
    } else {
        ExportOptions { format: ExportFormat::Json, out_path: out, ..ExportOptions::default() }
    };
    opts.export.problems_path = cli.problems;
    opts.export.check()?;

    Ok(Invocation::Run(opts))
}

/* ---------------- Terminal output ---------------- */

pub fn print_error(message: &str) {
    eprintln!("  {} - {}", " Error ".white().on_bright_red().bold(), message.bold());
}

/// Spinner line per step.
pub struct SpinnerProgress {
    bar: Option<ProgressBar>,
    step: String,
}

impl SpinnerProgress {
    pub fn new() -> Self {
        Self { bar: None, step: String::new() }
    }
}

impl Default for SpinnerProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl Progress for SpinnerProgress {
    fn begin(&mut self, step: &str, _total: Option<usize>) {
        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        bar.set_message(step.to_string());
        bar.enable_steady_tick(Duration::from_millis(80));
        self.step = step.to_string();
        self.bar = Some(bar);
    }

    fn log(&mut self, msg: &str) {
        if let Some(bar) = &self.bar {
            bar.set_message(msg.to_string());
        }
    }

    fn warn(&mut self, msg: &str) {
        let line = format!("{} {}", "⚠".yellow(), msg);
        match &self.bar {
            Some(bar) if !bar.is_finished() => bar.println(line),
            _ => eprintln!("{line}"),
        }
    }

    fn finish(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.finish_with_message(format!("{} {}", "✔".green(), self.step));
        }
    }
}

const CONTINUE_PROMPT: &str = "Do you want to continue?";

/// Prints the warning, then asks. Quiet mode included.
fn confirm(warning: &str) -> bool {
    eprintln!("{} {}", "⚠".yellow(), warning);
    dialoguer::Confirm::new()
        .with_prompt(CONTINUE_PROMPT)
        .default(false)
        .interact()
        .unwrap_or(false)
}

/// Entry point of the binary. Returns the exit code for argument problems
/// and declined confirmations; runtime failures come back as `Err`.
pub fn run<I, T>(args: I) -> Result<i32>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let opts = match parse_args(args) {
        Ok(Invocation::Print(text)) => {
            println!("{text}");
            return Ok(0);
        }
        Ok(Invocation::Run(opts)) => opts,
        Err(msg) => {
            print_error(&msg);
            eprintln!("\n{}", help_text());
            return Ok(1);
        }
    };

    if let Some(path) = &opts.log_file {
        crate::log::init(path).map_err(|e| eyre!("Cannot open log file {}: {e}", path.display()))?;
    }

    let mut spinner = SpinnerProgress::new();
    let mut null = NullProgress;
    let progress: &mut dyn Progress = if opts.quiet { &mut null } else { &mut spinner };

    match runner::run(&opts, progress, &mut confirm) {
        Ok(RunOutcome::Done(summary)) => {
            logf!("Run: done, {} schools → {:?}", summary.school_count, summary.files_written);
            Ok(0)
        }
        Ok(RunOutcome::Aborted) => {
            print_error("Aborted");
            Ok(1)
        }
        Err(e) => {
            loge!("Run: {e}");
            Err(eyre!("{e}"))
        }
    }
}
