use crate::domain::contact::DEFAULT_FALLBACK_NAME;
use crate::error::CoreError;
use serde::{Deserialize, Serialize};

pub const DEFAULT_MIN_TOKEN_CHARS: usize = 3;
pub const DEFAULT_MIN_TOKENS: usize = 2;
pub const DEFAULT_MIN_LETTERS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum NamePolicyKind {
    #[default]
    Permissive,
    Strict,
}

/// How a name cell is judged and reduced to a first name.
///
/// `Permissive` cleans the cell and takes the first token of at least
/// `min_token_chars` letters. `Strict` first requires the raw cell to hold at
/// least `min_tokens` words and `min_letters` letters, then takes the first
/// cleaned token whatever its length. A single-word cell like "Alberto"
/// passes the first and fails the second.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "lowercase")]
pub enum NamePolicy {
    Permissive {
        min_token_chars: usize,
    },
    Strict {
        min_tokens: usize,
        min_letters: usize,
    },
}

impl Default for NamePolicy {
    fn default() -> Self {
        NamePolicy::Permissive {
            min_token_chars: DEFAULT_MIN_TOKEN_CHARS,
        }
    }
}

impl NamePolicy {
    pub fn permissive(min_token_chars: usize) -> Result<Self, CoreError> {
        if min_token_chars == 0 {
            return Err(CoreError::InvalidNameThreshold {
                field: "min_token_chars",
                value: min_token_chars,
            });
        }
        Ok(NamePolicy::Permissive { min_token_chars })
    }

    pub fn strict(min_tokens: usize, min_letters: usize) -> Result<Self, CoreError> {
        if min_tokens == 0 {
            return Err(CoreError::InvalidNameThreshold {
                field: "min_tokens",
                value: min_tokens,
            });
        }
        if min_letters == 0 {
            return Err(CoreError::InvalidNameThreshold {
                field: "min_letters",
                value: min_letters,
            });
        }
        Ok(NamePolicy::Strict {
            min_tokens,
            min_letters,
        })
    }

    pub fn kind(&self) -> NamePolicyKind {
        match self {
            NamePolicy::Permissive { .. } => NamePolicyKind::Permissive,
            NamePolicy::Strict { .. } => NamePolicyKind::Strict,
        }
    }

    /// The first name `raw` yields under this policy, capitalized.
    pub fn accept(&self, raw: &str) -> Option<String> {
        if raw.trim().is_empty() {
            return None;
        }

        match *self {
            NamePolicy::Permissive { min_token_chars } => {
                let cleaned = strip_non_letters(raw);
                cleaned
                    .split_whitespace()
                    .find(|token| token.chars().count() >= min_token_chars)
                    .map(capitalize)
            }
            NamePolicy::Strict {
                min_tokens,
                min_letters,
            } => {
                let tokens = raw.split_whitespace().count();
                let letters = raw.chars().filter(|ch| ch.is_alphabetic()).count();
                if tokens < min_tokens || letters < min_letters {
                    return None;
                }
                let cleaned = strip_non_letters(raw);
                cleaned.split_whitespace().next().map(capitalize)
            }
        }
    }
}

/// Name policy plus the name used when no column yields one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractOptions {
    pub policy: NamePolicy,
    fallback_name: String,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            policy: NamePolicy::default(),
            fallback_name: DEFAULT_FALLBACK_NAME.to_string(),
        }
    }
}

impl ExtractOptions {
    pub fn new(policy: NamePolicy, fallback_name: &str) -> Result<Self, CoreError> {
        let trimmed = fallback_name.trim();
        if trimmed.is_empty() {
            return Err(CoreError::EmptyFallbackName);
        }
        Ok(Self {
            policy,
            fallback_name: trimmed.to_string(),
        })
    }

    pub fn with_policy(policy: NamePolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    pub fn fallback_name(&self) -> &str {
        &self.fallback_name
    }
}

fn strip_non_letters(raw: &str) -> String {
    raw.chars()
        .filter(|ch| ch.is_alphabetic() || ch.is_whitespace())
        .collect()
}

fn capitalize(token: &str) -> String {
    let mut chars = token.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
