pub mod domain;
pub mod error;
pub mod export;
pub mod extract;
pub mod normalize;
pub mod rules;
pub mod suggest;

pub use domain::*;
pub use error::CoreError;
pub use extract::{extract_name, find_name, find_phone};
pub use normalize::{
    build_contacts, build_contacts_chunked, build_contacts_with_stats, build_from_rows,
    BuildOutcome, BuildStats,
};
pub use rules::*;
pub use suggest::{suggest_columns, suggest_selection};
