use calamine::{open_workbook_auto, Reader};
use depura_core::domain::{ColumnSelection, RowAccess, Table};
use depura_core::rules::ExtractOptions;
use depura_core::{build_contacts, ContactTable};
use depura_sheets::{export_contacts, read_table, ExportFormat};
use std::fs;
use tempfile::TempDir;

fn sample_contacts() -> ContactTable {
    let mut table = Table::new(["Tel", "Nombre"]);
    table.push_row(["3001234567", "ana maria"]);
    table.push_row(["3009876543", ""]);
    table.push_row(["3001234567", "beto"]);
    build_contacts(
        &table,
        &ColumnSelection::new(["Tel"], ["Nombre"]),
        &ExtractOptions::default(),
    )
}

#[test]
fn xlsx_export_uses_sheet_name_and_header_order() {
    let temp = TempDir::new().expect("temp dir");
    let path = temp.path().join("out").join("BASE_APPP_mensajeria.xlsx");

    export_contacts(&sample_contacts(), &path, ExportFormat::Xlsx, "BASE APPP")
        .expect("export xlsx");

    let workbook = open_workbook_auto(&path).expect("open export");
    assert_eq!(workbook.sheet_names(), vec!["BASE APPP".to_string()]);

    let table = read_table(&path).expect("read export");
    assert_eq!(
        table.headers(),
        ["Numero telefono", "value1", "value2", "value3", "value4", "value5", "Estado"]
    );
    assert_eq!(table.len(), 2);
    let first = table.row(0).expect("row");
    assert_eq!(first.text("Numero telefono"), "3001234567");
    assert_eq!(first.text("value1"), "Ana");
    let second = table.row(1).expect("row");
    assert_eq!(second.text("value1"), "Contacto");
    assert_eq!(second.text("Estado"), "");
}

#[test]
fn csv_export_writes_file() {
    let temp = TempDir::new().expect("temp dir");
    let path = temp.path().join("base.csv");

    export_contacts(&sample_contacts(), &path, ExportFormat::Csv, "ignored").expect("export csv");

    let text = fs::read_to_string(&path).expect("read csv");
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[1], "3001234567,Ana,,,,,");
    assert_eq!(lines[2], "3009876543,Contacto,,,,,");
}

#[test]
fn xlsx_export_rejects_invalid_sheet_names() {
    let temp = TempDir::new().expect("temp dir");
    let path = temp.path().join("base.xlsx");
    let result = export_contacts(&sample_contacts(), &path, ExportFormat::Xlsx, "bad/name");
    assert!(result.is_err());
}
