//! History command - export previously processed records.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Args;
use console::style;

use sdbx_core::DateFilter;

/// Arguments for the history command.
#[derive(Args)]
pub struct HistoryArgs {
    /// Tool slug (e.g. dataprocess)
    tool: String,

    /// Keep records from this date (YYYY-MM-DD), inclusive
    #[arg(long, value_name = "DATE")]
    from: Option<NaiveDate>,

    /// Keep records up to this date (YYYY-MM-DD), inclusive
    #[arg(long, value_name = "DATE")]
    to: Option<NaiveDate>,

    /// Output directory or .xlsx path for the workbook
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Send the workbook by email instead of writing it locally
    #[arg(long)]
    send: bool,

    /// Recipient for --send (repeatable; defaults to export.email_recipients)
    #[arg(long = "email", value_name = "ADDRESS", requires = "send")]
    email: Vec<String>,
}

pub async fn run(args: HistoryArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = super::load_config(config_path)?;
    let schema = super::lookup_schema(&args.tool)?;
    let session = super::load_session()?;
    let api = super::api_client(&config, &session)?;

    let records = api
        .processed_data(&args.tool, &session.user_id)
        .await
        .map_err(super::auth_hint)?;
    println!(
        "{} {} stored record(s) for {}",
        style("ℹ").blue(),
        records.len(),
        args.tool
    );

    let filter = DateFilter::new(config.export.date_field.clone(), args.from, args.to);
    super::deliver_workbook(
        &api,
        &config,
        &args.tool,
        &schema,
        &records,
        &filter,
        super::Delivery {
            output: args.output.as_deref(),
            send: args.send,
            recipients: &args.email,
        },
    )
    .await
}
