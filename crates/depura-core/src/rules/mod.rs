pub mod name;

pub use name::{
    ExtractOptions, NamePolicy, NamePolicyKind, DEFAULT_MIN_LETTERS, DEFAULT_MIN_TOKENS,
    DEFAULT_MIN_TOKEN_CHARS,
};
