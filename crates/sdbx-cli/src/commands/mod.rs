//! CLI subcommands and shared plumbing.

pub mod config;
pub mod history;
pub mod login;
pub mod quota;
pub mod tools;
pub mod upload;

use std::path::{Path, PathBuf};

use anyhow::Context;
use console::style;
use tracing::warn;

use sdbx_core::error::{ApiError, ExportError};
use sdbx_core::export::{self, DateFilter, ExportSchema, export_filename, write_workbook};
use sdbx_core::{ApiClient, ProcessedRecord, SdbxConfig, Session};

/// Default location of the config file.
fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("sdbx")
        .join("config.json")
}

/// Location of the session file.
fn session_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("sdbx")
        .join("session.json")
}

/// Resolve the config file path, honouring --config.
fn config_path(override_path: Option<&str>) -> PathBuf {
    override_path
        .map(PathBuf::from)
        .unwrap_or_else(default_config_path)
}

/// Load the config file.
///
/// An explicitly requested path must exist; only the implicit default
/// location may be absent, in which case defaults apply.
fn load_config(override_path: Option<&str>) -> anyhow::Result<SdbxConfig> {
    let path = config_path(override_path);
    if path.exists() {
        SdbxConfig::from_file(&path).with_context(|| format!("failed to read {}", path.display()))
    } else if override_path.is_some() {
        anyhow::bail!("config file not found: {}", path.display())
    } else {
        Ok(SdbxConfig::default())
    }
}

/// Load the stored session.
fn load_session() -> anyhow::Result<Session> {
    let path = session_path();
    if !path.exists() {
        anyhow::bail!("not signed in. Run 'sdbx login' first.");
    }
    Session::from_file(&path).with_context(|| format!("failed to read {}", path.display()))
}

/// Authenticated client from config and session.
fn api_client(config: &SdbxConfig, session: &Session) -> anyhow::Result<ApiClient> {
    Ok(ApiClient::new(&config.api.base_url)?.with_token(&session.token))
}

/// Attach a re-login hint when the stored session was rejected.
fn auth_hint(err: ApiError) -> anyhow::Error {
    match err {
        ApiError::Unauthorized => {
            anyhow::anyhow!("session rejected by the server. Run 'sdbx login' again.")
        }
        other => other.into(),
    }
}

/// Destination for a finished workbook.
struct Delivery<'a> {
    /// Explicit output path or directory; `None` uses the configured one.
    output: Option<&'a Path>,
    /// Hand the workbook to the backend mailer instead of writing it.
    send: bool,
    /// Recipients for --send; empty falls back to the config.
    recipients: &'a [String],
}

/// Export records and deliver the workbook to disk or by email.
///
/// Zero rows after the filter is reported and skipped, not fatal. The
/// download audit event is best effort and never fails the export.
async fn deliver_workbook(
    api: &ApiClient,
    config: &SdbxConfig,
    tool: &str,
    schema: &ExportSchema,
    records: &[ProcessedRecord],
    filter: &DateFilter,
    delivery: Delivery<'_>,
) -> anyhow::Result<()> {
    let row_count = export::filter_records(records, filter).len();
    let bytes = match write_workbook(schema, records, filter) {
        Ok(bytes) => bytes,
        Err(ExportError::NoRows) => {
            println!(
                "{} No records match the export filter; nothing to export.",
                style("⚠").yellow()
            );
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    let filename = export_filename(tool);

    if delivery.send {
        let recipients = if delivery.recipients.is_empty() {
            config.export.email_recipients.as_slice()
        } else {
            delivery.recipients
        };
        if recipients.is_empty() {
            anyhow::bail!(
                "no recipients: pass --email or set export.email_recipients in the config"
            );
        }
        api.send_processed_file(tool, &filename, bytes, recipients)
            .await
            .map_err(auth_hint)?;
        println!(
            "{} Sent {} ({} row(s)) to {}",
            style("✓").green(),
            filename,
            row_count,
            recipients.join(", ")
        );
    } else {
        let path = resolve_output(config, delivery.output, &filename);
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(&path, &bytes)?;
        println!(
            "{} Wrote {} row(s) to {}",
            style("✓").green(),
            row_count,
            path.display()
        );
    }

    if let Err(e) = api.log_download(tool, &filename, row_count).await {
        warn!(error = %e, "failed to record the download event");
    }

    Ok(())
}

/// Target path for the workbook: an explicit .xlsx path, a directory,
/// or the configured output directory.
fn resolve_output(config: &SdbxConfig, output: Option<&Path>, filename: &str) -> PathBuf {
    match output {
        Some(path) if path.extension().is_some_and(|e| e.eq_ignore_ascii_case("xlsx")) => {
            path.to_path_buf()
        }
        Some(dir) => dir.join(filename),
        None => config.export.output_dir.join(filename),
    }
}

/// Resolve a tool slug to its builtin schema or fail with the known list.
fn lookup_schema(tool: &str) -> anyhow::Result<ExportSchema> {
    export::tools::builtin(tool).with_context(|| {
        format!(
            "unknown tool '{}'. Known tools: {}",
            tool,
            export::tools::KNOWN.join(", ")
        )
    })
}
