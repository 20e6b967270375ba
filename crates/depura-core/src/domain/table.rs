use crate::domain::cell::CellValue;
use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap};
use std::ops::Range;

/// Read access to one input row by column name.
///
/// A column the row does not have reads as an empty cell.
pub trait RowAccess {
    fn cell(&self, column: &str) -> Option<&CellValue>;

    fn text(&self, column: &str) -> Cow<'_, str> {
        self.cell(column)
            .map(CellValue::as_text)
            .unwrap_or(Cow::Borrowed(""))
    }
}

impl<T: RowAccess + ?Sized> RowAccess for &T {
    fn cell(&self, column: &str) -> Option<&CellValue> {
        (**self).cell(column)
    }
}

impl RowAccess for HashMap<String, CellValue> {
    fn cell(&self, column: &str) -> Option<&CellValue> {
        self.get(column)
    }
}

impl RowAccess for BTreeMap<String, CellValue> {
    fn cell(&self, column: &str) -> Option<&CellValue> {
        self.get(column)
    }
}

/// A parsed sheet: named columns and rows of cells.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    headers: Vec<String>,
    index: HashMap<String, usize>,
    rows: Vec<Vec<CellValue>>,
}

impl Table {
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let headers: Vec<String> = headers.into_iter().map(Into::into).collect();
        let mut index = HashMap::with_capacity(headers.len());
        for (position, header) in headers.iter().enumerate() {
            index.entry(header.clone()).or_insert(position);
        }
        Self {
            headers,
            index,
            rows: Vec::new(),
        }
    }

    /// Appends a row, padding short rows with empty cells and dropping cells
    /// past the last header.
    pub fn push_row<I, V>(&mut self, cells: I)
    where
        I: IntoIterator<Item = V>,
        V: Into<CellValue>,
    {
        let mut row: Vec<CellValue> = cells
            .into_iter()
            .take(self.headers.len())
            .map(Into::into)
            .collect();
        row.resize(self.headers.len(), CellValue::Empty);
        self.rows.push(row);
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.index.get(column).copied()
    }

    pub fn row(&self, position: usize) -> Option<Row<'_>> {
        self.rows.get(position).map(|cells| Row { table: self, cells })
    }

    pub fn rows(&self) -> impl Iterator<Item = Row<'_>> + '_ {
        self.rows_range(0..self.rows.len())
    }

    /// Rows in `range`, clamped to the table length.
    pub fn rows_range(&self, range: Range<usize>) -> impl Iterator<Item = Row<'_>> + '_ {
        let end = range.end.min(self.rows.len());
        let start = range.start.min(end);
        self.rows[start..end]
            .iter()
            .map(move |cells| Row { table: self, cells })
    }

    /// Stacks tables vertically, unioning their headers by name in
    /// first-seen order. Cells a source table lacks are empty.
    pub fn concat<I>(tables: I) -> Table
    where
        I: IntoIterator<Item = Table>,
    {
        let tables: Vec<Table> = tables.into_iter().collect();
        let mut headers: Vec<String> = Vec::new();
        for table in &tables {
            for header in &table.headers {
                if !headers.contains(header) {
                    headers.push(header.clone());
                }
            }
        }

        let mut combined = Table::new(headers);
        for table in tables {
            let mapping: Vec<Option<usize>> = combined
                .headers
                .iter()
                .map(|header| table.column_index(header))
                .collect();
            for mut cells in table.rows {
                let row: Vec<CellValue> = mapping
                    .iter()
                    .map(|source| match source {
                        Some(position) => std::mem::take(&mut cells[*position]),
                        None => CellValue::Empty,
                    })
                    .collect();
                combined.rows.push(row);
            }
        }
        combined
    }
}

/// A borrowed view of one table row.
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    table: &'a Table,
    cells: &'a [CellValue],
}

impl RowAccess for Row<'_> {
    fn cell(&self, column: &str) -> Option<&CellValue> {
        self.table
            .column_index(column)
            .and_then(|position| self.cells.get(position))
    }
}
