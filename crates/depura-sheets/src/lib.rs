pub mod error;
pub mod export;
pub mod read;

pub use error::{Result, SheetError};
pub use export::{export_contacts, write_csv, write_xlsx, ExportFormat};
pub use read::{load_tables, read_table, LoadReport, SheetFormat, SourceSummary};
