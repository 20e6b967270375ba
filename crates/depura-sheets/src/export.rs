use crate::error::{Result, SheetError};
use depura_core::domain::ContactTable;
use depura_core::export::{export_row, EXPORT_HEADERS};
use rust_xlsxwriter::{Format, Workbook};
use std::fs;
use std::io::Write;
use std::path::Path;

const PHONE_COLUMN_WIDTH: f64 = 16.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Xlsx,
    Csv,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Xlsx => "xlsx",
            ExportFormat::Csv => "csv",
        }
    }
}

/// Writes `contacts` to `path`, creating the parent directory if needed.
pub fn export_contacts(
    contacts: &ContactTable,
    path: &Path,
    format: ExportFormat,
    sheet_name: &str,
) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    match format {
        ExportFormat::Xlsx => write_xlsx(contacts, path, sheet_name),
        ExportFormat::Csv => {
            let file = fs::File::create(path)?;
            write_csv(contacts, file)
        }
    }
}

/// One worksheet named `sheet_name`: the header row, then one row per
/// contact. Every cell is written as text so phones keep their digits.
pub fn write_xlsx(contacts: &ContactTable, path: &Path, sheet_name: &str) -> Result<()> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();
    let text_format = Format::new().set_num_format("@");

    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet_name)?;
    worksheet.set_column_width(0, PHONE_COLUMN_WIDTH)?;
    worksheet.set_column_format(0, &text_format)?;

    for (column, header) in EXPORT_HEADERS.iter().enumerate() {
        worksheet.write_string_with_format(0, column as u16, *header, &header_format)?;
    }

    for (index, record) in contacts.iter().enumerate() {
        let row =
            u32::try_from(index + 1).map_err(|_| SheetError::TooManyRows(contacts.len()))?;
        for (column, value) in export_row(record).iter().enumerate() {
            if value.is_empty() {
                continue;
            }
            worksheet.write_string(row, column as u16, *value)?;
        }
    }

    workbook.save(path)?;
    Ok(())
}

pub fn write_csv<W: Write>(contacts: &ContactTable, writer: W) -> Result<()> {
    let mut writer = csv::Writer::from_writer(writer);
    writer.write_record(EXPORT_HEADERS)?;
    for record in contacts {
        writer.write_record(export_row(record))?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{write_csv, ExportFormat};
    use depura_core::domain::{ContactRecord, ContactTable, PhoneNumber};

    #[test]
    fn csv_uses_template_header_order() {
        let contacts = ContactTable::from_records([ContactRecord::new(
            PhoneNumber::new("3001234567").expect("phone"),
            "Ana",
        )]);
        let mut out = Vec::new();
        write_csv(&contacts, &mut out).expect("write csv");
        let text = String::from_utf8(out).expect("utf8");
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("Numero telefono,value1,value2,value3,value4,value5,Estado")
        );
        assert_eq!(lines.next(), Some("3001234567,Ana,,,,,"));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn extension_matches_format() {
        assert_eq!(ExportFormat::Xlsx.extension(), "xlsx");
        assert_eq!(ExportFormat::Csv.extension(), "csv");
    }
}
