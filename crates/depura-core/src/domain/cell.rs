use std::borrow::Cow;

/// A single spreadsheet cell after parsing.
///
/// Values are matched against text patterns, so every variant has a text
/// form. Integral floats render without a fractional part, which keeps phone
/// numbers stored as numeric cells matchable.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    #[default]
    Empty,
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl CellValue {
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            CellValue::Empty => Cow::Borrowed(""),
            CellValue::Text(value) => Cow::Borrowed(value.as_str()),
            CellValue::Int(value) => Cow::Owned(value.to_string()),
            CellValue::Float(value) => Cow::Owned(format_float(*value)),
            CellValue::Bool(value) => Cow::Borrowed(if *value { "true" } else { "false" }),
        }
    }

    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(value) => value.trim().is_empty(),
            _ => false,
        }
    }
}

fn format_float(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
        return (value as i64).to_string();
    }
    value.to_string()
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Int(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Float(value)
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        CellValue::Bool(value)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::CellValue;

    #[test]
    fn empty_cell_is_blank_text() {
        assert_eq!(CellValue::Empty.as_text(), "");
        assert!(CellValue::Empty.is_blank());
        assert!(CellValue::from("   ").is_blank());
    }

    #[test]
    fn integral_float_drops_fraction() {
        assert_eq!(CellValue::Float(3001234567.0).as_text(), "3001234567");
        assert_eq!(CellValue::Float(2.5).as_text(), "2.5");
    }

    #[test]
    fn numbers_and_bools_render_as_text() {
        assert_eq!(CellValue::Int(3001234567).as_text(), "3001234567");
        assert_eq!(CellValue::Bool(true).as_text(), "true");
        assert!(!CellValue::Int(0).is_blank());
    }

    #[test]
    fn missing_option_becomes_empty() {
        let value: CellValue = Option::<&str>::None.into();
        assert_eq!(value, CellValue::Empty);
    }
}
