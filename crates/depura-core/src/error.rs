use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("invalid phone number: {0}")]
    InvalidPhoneNumber(String),
    #[error("fallback name is required")]
    EmptyFallbackName,
    #[error("invalid {field} value: {value}")]
    InvalidNameThreshold { field: &'static str, value: usize },
}
