//! Header keyword matching used to pre-fill the column selection. Nothing in
//! the extraction path calls into this module.

use crate::domain::selection::ColumnSelection;

pub const DEFAULT_PHONE_KEYWORDS: [&str; 6] =
    ["tel", "phone", "telefono", "grupo", "email", "correo"];
pub const DEFAULT_NAME_KEYWORDS: [&str; 4] = ["nombre", "name", "tutor", "student"];

/// Headers whose lowercase form contains any of `keywords`, in header order.
pub fn suggest_columns<H, K>(headers: &[H], keywords: &[K]) -> Vec<String>
where
    H: AsRef<str>,
    K: AsRef<str>,
{
    let keywords: Vec<String> = keywords
        .iter()
        .map(|keyword| keyword.as_ref().trim().to_lowercase())
        .filter(|keyword| !keyword.is_empty())
        .collect();

    headers
        .iter()
        .map(|header| header.as_ref())
        .filter(|header| {
            let lower = header.to_lowercase();
            keywords.iter().any(|keyword| lower.contains(keyword.as_str()))
        })
        .map(str::to_string)
        .collect()
}

pub fn suggest_selection<H, P, N>(
    headers: &[H],
    phone_keywords: &[P],
    name_keywords: &[N],
) -> ColumnSelection
where
    H: AsRef<str>,
    P: AsRef<str>,
    N: AsRef<str>,
{
    ColumnSelection {
        phone_columns: suggest_columns(headers, phone_keywords),
        name_columns: suggest_columns(headers, name_keywords),
    }
}
