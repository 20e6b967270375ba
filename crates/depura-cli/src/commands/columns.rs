use crate::commands::{print_json, Context};
use crate::util::join_or_none;
use anyhow::Result;
use clap::Args;
use depura_core::suggest_selection;
use depura_sheets::load_tables;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ColumnsArgs {
    #[arg(required = true, value_name = "FILE")]
    pub files: Vec<PathBuf>,
}

#[derive(Debug, Serialize)]
struct ColumnsReport {
    headers: Vec<String>,
    phone_columns: Vec<String>,
    name_columns: Vec<String>,
    warnings: Vec<String>,
}

pub fn columns(ctx: &Context<'_>, args: ColumnsArgs) -> Result<()> {
    let loaded = load_tables(&args.files)?;
    let headers = loaded.table.headers();
    let selection = suggest_selection(
        headers,
        &ctx.config.columns.phone_keywords,
        &ctx.config.columns.name_keywords,
    );
    let report = ColumnsReport {
        headers: headers.to_vec(),
        phone_columns: selection.phone_columns,
        name_columns: selection.name_columns,
        warnings: loaded.warnings,
    };

    if ctx.json {
        return print_json(&report);
    }

    println!("Headers: {}", join_or_none(&report.headers));
    println!("Phone columns: {}", join_or_none(&report.phone_columns));
    println!("Name columns: {}", join_or_none(&report.name_columns));
    for warning in &report.warnings {
        println!("warning: {}", warning);
    }
    Ok(())
}
