use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SheetError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("unsupported file format: {0}")]
    UnsupportedFormat(PathBuf),
    #[error("failed to open workbook {path}: {source}")]
    Workbook {
        path: PathBuf,
        #[source]
        source: calamine::Error,
    },
    #[error("workbook has no worksheets: {0}")]
    EmptyWorkbook(PathBuf),
    #[error("missing header row: {0}")]
    MissingHeader(PathBuf),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("xlsx error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
    #[error("too many rows for one worksheet: {0}")]
    TooManyRows(usize),
    #[error("none of the {0} input files could be read")]
    NoReadableFiles(usize),
}

pub type Result<T> = std::result::Result<T, SheetError>;
