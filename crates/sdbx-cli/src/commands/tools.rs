//! Tools command - list builtin export layouts.

use clap::{Args, Subcommand};

use sdbx_core::export::tools::{KNOWN, builtin};

/// Arguments for the tools command.
#[derive(Args)]
pub struct ToolsArgs {
    #[command(subcommand)]
    command: Option<ToolsCommand>,
}

#[derive(Subcommand)]
enum ToolsCommand {
    /// List known tools
    List,

    /// Show the column layout of a tool
    Show {
        /// Tool slug
        tool: String,
    },
}

pub async fn run(args: ToolsArgs) -> anyhow::Result<()> {
    match args.command.unwrap_or(ToolsCommand::List) {
        ToolsCommand::List => list(),
        ToolsCommand::Show { tool } => show(&tool),
    }
}

fn list() -> anyhow::Result<()> {
    println!("Known tools:");
    for slug in KNOWN {
        let Some(schema) = builtin(slug) else { continue };
        if schema.tool == *slug {
            println!("  {:<20} {} columns", slug, schema.columns.len());
        } else {
            println!("  {:<20} alias of {}", slug, schema.tool);
        }
    }
    Ok(())
}

fn show(tool: &str) -> anyhow::Result<()> {
    let schema = super::lookup_schema(tool)?;

    println!(
        "{} ({} columns, key field '{}')",
        schema.tool,
        schema.columns.len(),
        schema.key_field
    );
    for (index, column) in schema.columns.iter().enumerate() {
        if column.header == column.field {
            println!("  {:>2}. {}", index + 1, column.header);
        } else {
            println!("  {:>2}. {} ({})", index + 1, column.header, column.field);
        }
    }
    Ok(())
}
