use crate::error::CoreError;
use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::sync::LazyLock;

pub const PHONE_DIGITS: usize = 10;
pub const PHONE_PREFIX: char = '3';

// Ten ASCII digits starting with 3, standing alone as a word.
static PHONE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b3[0-9]{9}\b").expect("phone pattern is valid"));

/// A phone number that matches the accepted pattern exactly.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    pub fn new(raw: &str) -> Result<Self, CoreError> {
        let trimmed = raw.trim();
        if !is_valid_phone(trimmed) {
            return Err(CoreError::InvalidPhoneNumber(raw.to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl AsRef<str> for PhoneNumber {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

pub fn is_valid_phone(value: &str) -> bool {
    value.len() == PHONE_DIGITS
        && value.starts_with(PHONE_PREFIX)
        && value.bytes().all(|byte| byte.is_ascii_digit())
}

/// Leftmost phone number standing alone in `text`.
pub fn first_phone_in(text: &str) -> Option<PhoneNumber> {
    PHONE_PATTERN
        .find(text)
        .map(|found| PhoneNumber(found.as_str().to_string()))
}
