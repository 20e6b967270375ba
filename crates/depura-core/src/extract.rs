//! Per-row field lookup. Both searches walk the candidate columns in order
//! and stop at the first column that yields a value.

use crate::domain::phone::{first_phone_in, PhoneNumber};
use crate::domain::table::RowAccess;
use crate::rules::name::{ExtractOptions, NamePolicy};

/// First phone found in the first candidate column that holds any.
pub fn find_phone<R, S>(row: &R, phone_columns: &[S]) -> Option<PhoneNumber>
where
    R: RowAccess + ?Sized,
    S: AsRef<str>,
{
    phone_columns
        .iter()
        .find_map(|column| first_phone_in(&row.text(column.as_ref())))
}

/// First name accepted by `policy`, scanning `name_columns` in order.
pub fn find_name<R, S>(row: &R, name_columns: &[S], policy: &NamePolicy) -> Option<String>
where
    R: RowAccess + ?Sized,
    S: AsRef<str>,
{
    name_columns
        .iter()
        .find_map(|column| policy.accept(&row.text(column.as_ref())))
}

/// Like [`find_name`], falling back to the configured sentinel name.
pub fn extract_name<R, S>(row: &R, name_columns: &[S], options: &ExtractOptions) -> String
where
    R: RowAccess + ?Sized,
    S: AsRef<str>,
{
    name_or_fallback(row, name_columns, options).0
}

/// The extracted name, and whether it is the fallback.
pub(crate) fn name_or_fallback<R, S>(
    row: &R,
    name_columns: &[S],
    options: &ExtractOptions,
) -> (String, bool)
where
    R: RowAccess + ?Sized,
    S: AsRef<str>,
{
    match find_name(row, name_columns, &options.policy) {
        Some(name) => (name, false),
        None => (options.fallback_name().to_string(), true),
    }
}
