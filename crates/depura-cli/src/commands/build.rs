use crate::commands::{print_json, Context};
use crate::error::{invalid_input, not_found};
use crate::util::{join_or_none, render_contacts, resolve_export_format};
use anyhow::{Context as _, Result};
use clap::{Args, ValueEnum};
use depura_config::validate_sheet_name;
use depura_core::domain::{ColumnSelection, ContactRecord};
use depura_core::rules::NamePolicyKind;
use depura_core::{
    build_contacts_chunked, build_contacts_with_stats, suggest_columns, BuildOutcome, BuildStats,
};
use depura_sheets::{export_contacts, load_tables, write_csv, ExportFormat, SourceSummary};
use serde::Serialize;
use std::io;
use std::num::NonZeroUsize;
use std::path::PathBuf;
use tracing::{debug, warn};

const NO_CONTACTS: &str = "no valid phone numbers found in the selected columns";

#[derive(Debug, Args)]
pub struct InputArgs {
    /// Spreadsheets to combine (.xlsx, .xls, .xlsm, .ods, .csv)
    #[arg(required = true, value_name = "FILE")]
    pub files: Vec<PathBuf>,
    /// Column to search for phone numbers; repeat to set priority order
    #[arg(long = "phone-col", value_name = "COLUMN")]
    pub phone_columns: Vec<String>,
    /// Column to search for names; repeat to set priority order
    #[arg(long = "name-col", value_name = "COLUMN")]
    pub name_columns: Vec<String>,
    #[arg(long, value_enum)]
    pub policy: Option<PolicyArg>,
    #[arg(long)]
    pub fallback_name: Option<String>,
    /// Split the rows across this many worker threads
    #[arg(long)]
    pub jobs: Option<NonZeroUsize>,
}

#[derive(Debug, Args)]
pub struct BuildArgs {
    #[command(flatten)]
    pub input: InputArgs,
    #[arg(long, value_enum)]
    pub format: Option<FormatArg>,
    #[arg(long)]
    pub out: Option<PathBuf>,
    #[arg(long)]
    pub sheet_name: Option<String>,
}

#[derive(Debug, Args)]
pub struct PreviewArgs {
    #[command(flatten)]
    pub input: InputArgs,
    #[arg(long, default_value_t = 20)]
    pub limit: usize,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum PolicyArg {
    Permissive,
    Strict,
}

impl From<PolicyArg> for NamePolicyKind {
    fn from(policy: PolicyArg) -> Self {
        match policy {
            PolicyArg::Permissive => NamePolicyKind::Permissive,
            PolicyArg::Strict => NamePolicyKind::Strict,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum FormatArg {
    Xlsx,
    Csv,
}

impl From<FormatArg> for ExportFormat {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Xlsx => ExportFormat::Xlsx,
            FormatArg::Csv => ExportFormat::Csv,
        }
    }
}

#[derive(Debug, Serialize)]
struct BuildReport {
    sources: Vec<SourceSummary>,
    warnings: Vec<String>,
    phone_columns: Vec<String>,
    name_columns: Vec<String>,
    policy: NamePolicyKind,
    stats: BuildStats,
    count: usize,
    format: String,
    output: Option<String>,
}

#[derive(Debug, Serialize)]
struct PreviewReport<'a> {
    count: usize,
    stats: BuildStats,
    contacts: Vec<&'a ContactRecord>,
}

struct Extraction {
    sources: Vec<SourceSummary>,
    warnings: Vec<String>,
    selection: ColumnSelection,
    policy: NamePolicyKind,
    outcome: BuildOutcome,
}

pub fn build(ctx: &Context<'_>, args: BuildArgs) -> Result<()> {
    let sheet_name = match args.sheet_name.as_deref() {
        Some(name) => validate_sheet_name(name)?,
        None => ctx.config.export.sheet_name.clone(),
    };
    let format = resolve_export_format(args.format.map(Into::into), args.out.as_deref());
    let out = match (args.out, format) {
        (Some(path), _) => Some(path),
        (None, ExportFormat::Xlsx) => Some(PathBuf::from(&ctx.config.export.file_name)),
        (None, ExportFormat::Csv) => None,
    };
    if ctx.json && out.is_none() {
        return Err(invalid_input("--json requires --out for csv export"));
    }

    let extraction = extract(ctx, &args.input)?;
    let contacts = &extraction.outcome.contacts;

    match out.as_deref() {
        Some(path) => {
            export_contacts(contacts, path, format, &sheet_name)
                .with_context(|| format!("write export file {}", path.display()))?;
            debug!(path = %path.display(), count = contacts.len(), "export written");
        }
        None => {
            let stdout = io::stdout().lock();
            write_csv(contacts, stdout).with_context(|| "write csv to stdout")?;
            return Ok(());
        }
    }

    let report = BuildReport {
        sources: extraction.sources,
        warnings: extraction.warnings,
        phone_columns: extraction.selection.phone_columns,
        name_columns: extraction.selection.name_columns,
        policy: extraction.policy,
        stats: extraction.outcome.stats,
        count: contacts.len(),
        format: format.extension().to_string(),
        output: out.as_ref().map(|path| path.display().to_string()),
    };

    if ctx.json {
        return print_json(&report);
    }

    println!(
        "Combined {} files into {} rows",
        report.sources.len(),
        report.stats.rows_scanned
    );
    println!(
        "Generated base with {} unique contacts -> {}",
        report.count,
        report.output.as_deref().unwrap_or("-")
    );
    println!(
        "Skipped {} rows without phone, {} duplicates; {} contacts use the fallback name",
        report.stats.rows_without_phone, report.stats.duplicates_dropped, report.stats.fallback_names
    );
    print_warnings(&report.warnings);
    Ok(())
}

pub fn preview(ctx: &Context<'_>, args: PreviewArgs) -> Result<()> {
    let extraction = extract(ctx, &args.input)?;
    let contacts = &extraction.outcome.contacts;

    if ctx.json {
        return print_json(&PreviewReport {
            count: contacts.len(),
            stats: extraction.outcome.stats,
            contacts: contacts.iter().take(args.limit).collect(),
        });
    }

    print!("{}", render_contacts(contacts, args.limit));
    if contacts.len() > args.limit {
        println!("... {} more", contacts.len() - args.limit);
    }
    println!("{} unique contacts", contacts.len());
    print_warnings(&extraction.warnings);
    Ok(())
}

/// Loads the inputs, settles the column selection and runs the extraction.
/// An empty result is reported as not found.
fn extract(ctx: &Context<'_>, input: &InputArgs) -> Result<Extraction> {
    let policy = input
        .policy
        .map(NamePolicyKind::from)
        .unwrap_or(ctx.config.extract.policy);
    let mut extract_config = ctx.config.extract.clone();
    if let Some(name) = &input.fallback_name {
        extract_config.fallback_name = name.clone();
    }
    let options = extract_config.options_for(policy)?;

    let loaded = load_tables(&input.files)?;
    for warning in &loaded.warnings {
        debug!(%warning, "load warning");
    }
    let headers = loaded.table.headers();

    let phone_columns = if input.phone_columns.is_empty() {
        suggest_columns(headers, &ctx.config.columns.phone_keywords)
    } else {
        input.phone_columns.clone()
    };
    let name_columns = if input.name_columns.is_empty() {
        suggest_columns(headers, &ctx.config.columns.name_keywords)
    } else {
        input.name_columns.clone()
    };
    if phone_columns.is_empty() {
        return Err(invalid_input(format!(
            "no phone columns selected; pass --phone-col (headers: {})",
            join_or_none(headers)
        )));
    }

    let selection = ColumnSelection {
        phone_columns,
        name_columns,
    };
    let mut warnings = loaded.warnings.clone();
    for column in selection.missing_from(headers) {
        warn!(column, "selected column not found in any input file");
        warnings.push(format!("column {column:?} not found in any input file"));
    }
    if selection.name_columns.is_empty() {
        warn!("no name columns selected");
        warnings.push(format!(
            "no name columns selected; every contact is named {:?}",
            options.fallback_name()
        ));
    }
    debug!(
        phone = %selection.phone_columns.join(", "),
        name = %selection.name_columns.join(", "),
        ?policy,
        "column selection"
    );

    let outcome = match input.jobs {
        Some(workers) => build_contacts_chunked(&loaded.table, &selection, &options, workers),
        None => build_contacts_with_stats(&loaded.table, &selection, &options),
    };
    debug!(stats = ?outcome.stats, "extraction finished");

    if outcome.contacts.is_empty() {
        print_warnings_stderr(&warnings);
        return Err(not_found(NO_CONTACTS));
    }

    Ok(Extraction {
        sources: loaded.sources,
        warnings,
        selection,
        policy: options.policy.kind(),
        outcome,
    })
}

fn print_warnings(warnings: &[String]) {
    if warnings.is_empty() {
        return;
    }
    println!("Warnings:");
    for warning in warnings {
        println!("- {}", warning);
    }
}

fn print_warnings_stderr(warnings: &[String]) {
    for warning in warnings {
        eprintln!("warning: {}", warning);
    }
}
