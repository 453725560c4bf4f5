//! Upload command - quota-gated batch upload and export.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use sdbx_core::{BatchEvent, BatchReport, DateFilter, FileState, SelectedFile, UploadQueue};

/// Arguments for the upload command.
#[derive(Args)]
pub struct UploadArgs {
    /// Tool slug (e.g. dataprocess)
    tool: String,

    /// Files or glob patterns to upload
    #[arg(required = true, value_name = "FILE")]
    files: Vec<String>,

    /// Output directory or .xlsx path for the workbook
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Send the workbook by email instead of writing it locally
    #[arg(long)]
    send: bool,

    /// Recipient for --send (repeatable; defaults to export.email_recipients)
    #[arg(long = "email", value_name = "ADDRESS", requires = "send")]
    email: Vec<String>,

    /// Write a per-file summary CSV to this path
    #[arg(long, value_name = "PATH")]
    summary: Option<PathBuf>,
}

pub async fn run(args: UploadArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = super::load_config(config_path)?;
    let schema = super::lookup_schema(&args.tool)?;
    if args.send && args.email.is_empty() && config.export.email_recipients.is_empty() {
        // Caught before the batch starts so a bad invocation cannot consume quota.
        anyhow::bail!("no recipients: pass --email or set export.email_recipients in the config");
    }
    let session = super::load_session()?;
    let api = super::api_client(&config, &session)?;

    let paths = collect_paths(&args.files, &config.upload.extension)?;
    if paths.is_empty() {
        anyhow::bail!("no matching .{} files found", config.upload.extension);
    }

    println!(
        "{} Found {} file(s) to upload",
        style("ℹ").blue(),
        paths.len()
    );

    let mut files = Vec::with_capacity(paths.len());
    for path in &paths {
        let file = SelectedFile::from_path(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        files.push(file);
    }

    let queue = UploadQueue::new(files);
    let pb = ProgressBar::new(queue.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("=>-"),
    );

    let report = queue
        .run(&api, &args.tool, &session.user_id, |event| match event {
            BatchEvent::FileStarted { name } => pb.set_message(name),
            BatchEvent::FileCompleted { .. } | BatchEvent::FileFailed { .. } => pb.inc(1),
            BatchEvent::Finished { .. } => pb.finish_with_message("done"),
            _ => {}
        })
        .await?;

    println!();
    for status in &report.statuses {
        match status.state {
            FileState::Completed => println!(
                "  {} {} ({} record(s))",
                style("✓").green(),
                status.name,
                status.records
            ),
            FileState::Error => println!(
                "  {} {} - {}",
                style("✗").red(),
                status.name,
                status.error.as_deref().unwrap_or("unknown error")
            ),
            _ => {}
        }
    }
    println!();
    println!(
        "{} {} succeeded, {} failed",
        style("ℹ").blue(),
        report.succeeded(),
        report.failed()
    );
    if let Some(quota) = report.quota_after {
        if let Some(remaining) = quota.available_count {
            println!("{} {} upload(s) remaining", style("ℹ").blue(), remaining);
        }
    }

    if let Some(summary_path) = &args.summary {
        write_summary(summary_path, &report)?;
        println!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    if report.records.is_empty() {
        println!("{} No records to export.", style("⚠").yellow());
    } else {
        // Fresh uploads are exported unfiltered.
        super::deliver_workbook(
            &api,
            &config,
            &args.tool,
            &schema,
            &report.records,
            &DateFilter::default(),
            super::Delivery {
                output: args.output.as_deref(),
                send: args.send,
                recipients: &args.email,
            },
        )
        .await?;
    }

    if report.succeeded() == 0 {
        anyhow::bail!("all {} upload(s) failed", report.failed());
    }

    Ok(())
}

/// Expand paths and glob patterns, keeping the accepted extension.
///
/// Command-line order is upload order; duplicates keep their first
/// position. Files with another extension are skipped with a warning.
fn collect_paths(patterns: &[String], extension: &str) -> anyhow::Result<Vec<PathBuf>> {
    let mut paths: Vec<PathBuf> = Vec::new();
    let mut seen = HashSet::new();

    for pattern in patterns {
        let direct = Path::new(pattern);
        if direct.is_file() {
            if seen.insert(direct.to_path_buf()) {
                paths.push(direct.to_path_buf());
            }
            continue;
        }
        for entry in
            glob::glob(pattern).with_context(|| format!("invalid pattern: {pattern}"))?
        {
            let path = entry?;
            if path.is_file() && seen.insert(path.clone()) {
                paths.push(path);
            }
        }
    }

    let (keep, skipped): (Vec<_>, Vec<_>) = paths.into_iter().partition(|p| {
        p.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case(extension))
    });
    for path in &skipped {
        println!(
            "{} Skipping {} (not a .{} file)",
            style("⚠").yellow(),
            path.display(),
            extension
        );
    }

    Ok(keep)
}

/// Per-file outcome CSV, one row per uploaded file.
fn write_summary(path: &Path, report: &BatchReport) -> anyhow::Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(["file", "status", "records", "error"])?;

    for status in &report.statuses {
        let records = status.records.to_string();
        let outcome = match status.state {
            FileState::Completed => "ok",
            FileState::Error => "failed",
            FileState::Pending | FileState::InProgress => "pending",
        };
        writer.write_record([
            status.name.as_str(),
            outcome,
            records.as_str(),
            status.error.as_deref().unwrap_or(""),
        ])?;
    }

    writer.flush()?;
    Ok(())
}
