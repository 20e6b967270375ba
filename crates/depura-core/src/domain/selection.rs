use serde::{Deserialize, Serialize};

/// Candidate columns for each field, in scan priority order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSelection {
    pub phone_columns: Vec<String>,
    pub name_columns: Vec<String>,
}

impl ColumnSelection {
    pub fn new<P, N>(phone_columns: P, name_columns: N) -> Self
    where
        P: IntoIterator,
        P::Item: Into<String>,
        N: IntoIterator,
        N::Item: Into<String>,
    {
        Self {
            phone_columns: phone_columns.into_iter().map(Into::into).collect(),
            name_columns: name_columns.into_iter().map(Into::into).collect(),
        }
    }

    /// Columns named here that `headers` does not contain.
    pub fn missing_from<'a>(&'a self, headers: &[String]) -> Vec<&'a str> {
        let mut missing: Vec<&str> = Vec::new();
        for column in self.phone_columns.iter().chain(self.name_columns.iter()) {
            if !headers.contains(column) && !missing.contains(&column.as_str()) {
                missing.push(column.as_str());
            }
        }
        missing
    }
}
