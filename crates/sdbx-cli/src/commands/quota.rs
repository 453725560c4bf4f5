//! Quota command - show remaining uploads for a tool.

use clap::Args;
use console::style;

use sdbx_core::QuotaGate;

/// Arguments for the quota command.
#[derive(Args)]
pub struct QuotaArgs {
    /// Tool slug (e.g. dataprocess)
    tool: String,
}

pub async fn run(args: QuotaArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = super::load_config(config_path)?;
    let session = super::load_session()?;
    let api = super::api_client(&config, &session)?;

    let gate = QuotaGate::check(&api, &args.tool)
        .await
        .map_err(super::auth_hint)?;

    match (gate.remaining(), gate.limit()) {
        (Some(remaining), Some(limit)) => println!(
            "{} {}: {} of {} upload(s) remaining",
            style("ℹ").blue(),
            args.tool,
            style(remaining).bold(),
            limit
        ),
        (Some(remaining), None) => println!(
            "{} {}: {} upload(s) remaining",
            style("ℹ").blue(),
            args.tool,
            style(remaining).bold()
        ),
        (None, _) => println!(
            "{} {}: no usage information reported",
            style("ℹ").blue(),
            args.tool
        ),
    }

    if !gate.can_upload() {
        println!(
            "{} Usage quota exhausted. Contact your administrator to raise the limit.",
            style("⚠").yellow()
        );
    }

    Ok(())
}
