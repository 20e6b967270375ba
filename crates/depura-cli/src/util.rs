use depura_core::domain::ContactTable;
use depura_sheets::ExportFormat;
use std::path::Path;

const NAME_COLUMN_WIDTH: usize = 24;

/// `--format` wins; otherwise a `.csv` output path means csv; otherwise xlsx.
pub fn resolve_export_format(explicit: Option<ExportFormat>, out: Option<&Path>) -> ExportFormat {
    if let Some(format) = explicit {
        return format;
    }
    let is_csv = out
        .and_then(|path| path.extension())
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
    if is_csv {
        ExportFormat::Csv
    } else {
        ExportFormat::Xlsx
    }
}

pub fn render_contacts(contacts: &ContactTable, limit: usize) -> String {
    let mut out = String::new();
    out.push_str(&format!("{:<12} {}\n", "PHONE", "NAME"));
    for record in contacts.iter().take(limit) {
        out.push_str(&format!(
            "{:<12} {}\n",
            record.phone_number.as_str(),
            truncate(&record.primary_name, NAME_COLUMN_WIDTH)
        ));
    }
    out
}

fn truncate(value: &str, max_chars: usize) -> String {
    if value.chars().count() <= max_chars {
        return value.to_string();
    }
    let mut out: String = value.chars().take(max_chars.saturating_sub(1)).collect();
    out.push('…');
    out
}

pub fn join_or_none(values: &[String]) -> String {
    if values.is_empty() {
        "(none)".to_string()
    } else {
        values.join(", ")
    }
}
