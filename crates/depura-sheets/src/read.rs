use crate::error::{Result, SheetError};
use calamine::{open_workbook_auto, Data, Reader};
use depura_core::domain::{CellValue, Table};
use serde::Serialize;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

const DELIMITER_CANDIDATES: [u8; 4] = [b',', b';', b'\t', b'|'];
const DELIMITER_SAMPLE_LINES: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetFormat {
    Workbook,
    Csv,
}

impl SheetFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("xlsx" | "xlsm" | "xlsb" | "xls" | "ods") => Ok(SheetFormat::Workbook),
            Some("csv" | "txt") => Ok(SheetFormat::Csv),
            _ => Err(SheetError::UnsupportedFormat(path.to_path_buf())),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SourceSummary {
    pub path: String,
    pub rows: usize,
    pub columns: usize,
}

/// The combined table of every file that could be read.
#[derive(Debug, Clone)]
pub struct LoadReport {
    pub table: Table,
    pub sources: Vec<SourceSummary>,
    pub warnings: Vec<String>,
}

/// Reads each file and stacks them into one table. Unreadable files are
/// skipped with a warning; it is an error only when none can be read.
pub fn load_tables<P: AsRef<Path>>(paths: &[P]) -> Result<LoadReport> {
    let mut tables = Vec::new();
    let mut sources = Vec::new();
    let mut warnings = Vec::new();

    for path in paths {
        let path = path.as_ref();
        match read_table(path) {
            Ok(table) => {
                debug!(
                    path = %path.display(),
                    rows = table.len(),
                    columns = table.headers().len(),
                    "sheet loaded"
                );
                sources.push(SourceSummary {
                    path: path.display().to_string(),
                    rows: table.len(),
                    columns: table.headers().len(),
                });
                tables.push(table);
            }
            Err(err) => {
                warn!(path = %path.display(), error = %err, "skipping unreadable file");
                warnings.push(format!("skipping {}: {err}", path.display()));
            }
        }
    }

    if tables.is_empty() {
        return Err(SheetError::NoReadableFiles(paths.len()));
    }

    Ok(LoadReport {
        table: Table::concat(tables),
        sources,
        warnings,
    })
}

/// Reads the first worksheet of a workbook, or a delimited text file. The
/// first row holds the column names.
pub fn read_table(path: &Path) -> Result<Table> {
    match SheetFormat::from_path(path)? {
        SheetFormat::Workbook => read_workbook(path),
        SheetFormat::Csv => read_csv(path),
    }
}

fn read_workbook(path: &Path) -> Result<Table> {
    let mut workbook = open_workbook_auto(path).map_err(|source| SheetError::Workbook {
        path: path.to_path_buf(),
        source,
    })?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| SheetError::EmptyWorkbook(path.to_path_buf()))?
        .map_err(|source| SheetError::Workbook {
            path: path.to_path_buf(),
            source,
        })?;

    let grid = range
        .rows()
        .map(|row| row.iter().map(cell_from_data).collect::<Vec<_>>());
    table_from_grid(path, grid)
}

fn cell_from_data(data: &Data) -> CellValue {
    match data {
        Data::Empty | Data::Error(_) => CellValue::Empty,
        Data::String(value) => CellValue::Text(value.clone()),
        Data::Int(value) => CellValue::Int(*value),
        Data::Float(value) => CellValue::Float(*value),
        Data::Bool(value) => CellValue::Bool(*value),
        other => CellValue::Text(other.to_string()),
    }
}

fn read_csv(path: &Path) -> Result<Table> {
    let bytes = fs::read(path)?;
    let content = decode_text(&bytes);
    let delimiter = detect_delimiter(&content);
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(content.as_bytes());

    let mut grid = Vec::new();
    for record in reader.records() {
        let record = record?;
        grid.push(
            record
                .iter()
                .map(|field| {
                    if field.trim().is_empty() {
                        CellValue::Empty
                    } else {
                        CellValue::Text(field.to_string())
                    }
                })
                .collect::<Vec<_>>(),
        );
    }
    table_from_grid(path, grid.into_iter())
}

/// UTF-8 when valid (minus a byte order mark), Windows-1252 otherwise, which
/// is what spreadsheet applications on Spanish-locale systems emit.
fn decode_text(bytes: &[u8]) -> String {
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(_) => {
            let (text, _, _) = encoding_rs::WINDOWS_1252.decode(bytes);
            text.into_owned()
        }
    }
}

/// Scores each candidate over the first lines by how often it appears and
/// how steady that count is from line to line. Ties keep the earlier
/// candidate, so `,` wins when nothing else stands out.
fn detect_delimiter(content: &str) -> u8 {
    let sample: Vec<&str> = content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .take(DELIMITER_SAMPLE_LINES)
        .collect();
    if sample.is_empty() {
        return b',';
    }

    let mut best = b',';
    let mut best_score = 0.0f32;
    for candidate in DELIMITER_CANDIDATES {
        let counts: Vec<f32> = sample
            .iter()
            .map(|line| unquoted_count(line, candidate) as f32)
            .collect();
        let mean = counts.iter().sum::<f32>() / counts.len() as f32;
        let variance =
            counts.iter().map(|count| (count - mean).powi(2)).sum::<f32>() / counts.len() as f32;
        let score = mean / (1.0 + variance.sqrt());
        if score > best_score {
            best = candidate;
            best_score = score;
        }
    }
    best
}

/// Occurrences of `delimiter` outside double-quoted fields.
fn unquoted_count(line: &str, delimiter: u8) -> usize {
    let mut quoted = false;
    let mut count = 0;
    for byte in line.bytes() {
        if byte == b'"' {
            quoted = !quoted;
        } else if byte == delimiter && !quoted {
            count += 1;
        }
    }
    count
}

fn table_from_grid<I>(path: &Path, grid: I) -> Result<Table>
where
    I: Iterator<Item = Vec<CellValue>>,
{
    let mut grid = grid.skip_while(|row| row.iter().all(CellValue::is_blank));
    let header = grid
        .next()
        .ok_or_else(|| SheetError::MissingHeader(path.to_path_buf()))?;

    let mut table = Table::new(header_names(&header));
    for row in grid {
        if row.iter().all(CellValue::is_blank) {
            continue;
        }
        table.push_row(row);
    }
    Ok(table)
}

/// Column names from the header row. Blank headers become `column_<n>`
/// (1-based) and repeated names get a `_<k>` suffix from the second copy on.
fn header_names(cells: &[CellValue]) -> Vec<String> {
    let mut names: Vec<String> = Vec::with_capacity(cells.len());
    for (position, cell) in cells.iter().enumerate() {
        let text = cell.as_text();
        let base = match text.trim() {
            "" => format!("column_{}", position + 1),
            trimmed => trimmed.to_string(),
        };
        let mut name = base.clone();
        let mut copy = 1;
        while names.contains(&name) {
            copy += 1;
            name = format!("{base}_{copy}");
        }
        names.push(name);
    }
    names
}

#[cfg(test)]
mod tests {
    use super::{decode_text, detect_delimiter, header_names, unquoted_count, SheetFormat};
    use depura_core::domain::CellValue;
    use std::path::Path;

    #[test]
    fn format_follows_extension() {
        assert_eq!(
            SheetFormat::from_path(Path::new("base.XLSX")).expect("xlsx"),
            SheetFormat::Workbook
        );
        assert_eq!(
            SheetFormat::from_path(Path::new("base.csv")).expect("csv"),
            SheetFormat::Csv
        );
        assert!(SheetFormat::from_path(Path::new("base.pdf")).is_err());
        assert!(SheetFormat::from_path(Path::new("base")).is_err());
    }

    #[test]
    fn detect_delimiter_prefers_most_frequent() {
        assert_eq!(detect_delimiter("Nombre;Tel;Correo\nAna;3001234567;a@b.co"), b';');
        assert_eq!(detect_delimiter("Nombre,Tel\n"), b',');
        assert_eq!(detect_delimiter("Nombre\n"), b',');
        assert_eq!(detect_delimiter(""), b',');
    }

    #[test]
    fn detect_delimiter_weighs_every_sampled_line() {
        let content = "Nombre;Telefono, celular\nAna;3001234567\nBeto;3009876543\n";
        assert_eq!(detect_delimiter(content), b';');
    }

    #[test]
    fn detect_delimiter_ignores_quoted_delimiters() {
        assert_eq!(unquoted_count("\"a;b\";c", b';'), 1);
        assert_eq!(
            detect_delimiter("\"Tel;fijo\",Nombre\n\"3001234567\",Ana\n"),
            b','
        );
    }

    #[test]
    fn decode_text_falls_back_to_windows_1252() {
        assert_eq!(decode_text(b"Jos\xe9"), "José");
        assert_eq!(decode_text("\u{feff}Nombre".as_bytes()), "Nombre");
    }

    #[test]
    fn header_names_fill_blanks_and_dedupe() {
        let cells = vec![
            CellValue::from("Tel"),
            CellValue::Empty,
            CellValue::from("Tel"),
            CellValue::from(" Nombre "),
            CellValue::from("Tel"),
        ];
        assert_eq!(
            header_names(&cells),
            vec!["Tel", "column_2", "Tel_2", "Nombre", "Tel_3"]
        );
    }
}
