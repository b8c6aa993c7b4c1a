use anyhow::{bail, Context, Result};
use clap::{Args, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Duration;
use watchlog_core::codec::{export, import, ExportFormat};

use crate::commands::AppContext;
use crate::output::Output;

#[derive(Args)]
pub struct ImportArgs {
    /// Path to a .json or .csv file
    pub file: PathBuf,
}

#[derive(Args)]
pub struct ExportArgs {
    /// Destination path (.json or .csv)
    pub file: PathBuf,

    /// Override the format chosen by extension
    #[arg(long, value_enum)]
    pub format: Option<ExportFormatArg>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormatArg {
    Json,
    Csv,
}

impl From<ExportFormatArg> for ExportFormat {
    fn from(arg: ExportFormatArg) -> Self {
        match arg {
            ExportFormatArg::Json => ExportFormat::Json,
            ExportFormatArg::Csv => ExportFormat::Csv,
        }
    }
}

pub fn run_import(args: ImportArgs, output: &Output) -> Result<()> {
    let Some(format) = ExportFormat::from_path(&args.file) else {
        bail!("Unsupported file type: {:?}. Use a .json or .csv file", args.file);
    };

    let content = std::fs::read_to_string(&args.file)
        .with_context(|| format!("Failed to read {:?}", args.file))?;

    let spinner = progress_spinner(output, "Parsing import file...");
    // File-level errors abort here with no mutation; row-level problems were
    // already coerced or skipped inside the codec
    let parsed = match format {
        ExportFormat::Json => import::from_json(&content),
        ExportFormat::Csv => import::from_csv(&content),
    };
    spinner.finish_and_clear();
    let records = parsed?;

    let mut ctx = AppContext::open()?;
    let report = ctx.store.merge_import(records);
    ctx.flush()?;

    output.success(format!(
        "Imported {} entries, skipped {} duplicates",
        report.imported, report.skipped_duplicates
    ));
    Ok(())
}

pub fn run_export(args: ExportArgs, output: &Output) -> Result<()> {
    let format = match args.format {
        Some(arg) => arg.into(),
        None => match ExportFormat::from_path(&args.file) {
            Some(format) => format,
            None => bail!("Unsupported file type: {:?}. Use a .json or .csv file, or pass --format", args.file),
        },
    };

    let ctx = AppContext::open()?;
    let content = match format {
        ExportFormat::Json => export::to_json(ctx.store.records())?,
        ExportFormat::Csv => export::to_csv(ctx.store.records())?,
    };

    if let Some(parent) = args.file.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&args.file, content).with_context(|| format!("Failed to write {:?}", args.file))?;

    output.success(format!("Exported {} entries to {:?}", ctx.store.len(), args.file));
    Ok(())
}

fn progress_spinner(output: &Output, message: &'static str) -> ProgressBar {
    if output.is_quiet() {
        return ProgressBar::hidden();
    }
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::with_template("{spinner} {msg}").unwrap_or_else(|_| ProgressStyle::default_spinner()));
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}
