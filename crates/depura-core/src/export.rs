//! Column layout of the bulk-messaging base file.

use crate::domain::contact::ContactRecord;

pub const EXPORT_HEADERS: [&str; 7] = [
    "Numero telefono",
    "value1",
    "value2",
    "value3",
    "value4",
    "value5",
    "Estado",
];

pub const DEFAULT_SHEET_NAME: &str = "BASE APPP";
pub const DEFAULT_EXPORT_FILE_NAME: &str = "BASE_APPP_mensajeria.xlsx";

/// Cells of `record` in [`EXPORT_HEADERS`] order.
pub fn export_row(record: &ContactRecord) -> [&str; 7] {
    [
        record.phone_number.as_str(),
        &record.primary_name,
        &record.extra1,
        &record.extra2,
        &record.extra3,
        &record.extra4,
        &record.status,
    ]
}
