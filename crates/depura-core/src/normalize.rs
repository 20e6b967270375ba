use crate::domain::contact::{ContactRecord, ContactTable};
use crate::domain::selection::ColumnSelection;
use crate::domain::table::{RowAccess, Table};
use crate::extract::{find_phone, name_or_fallback};
use crate::rules::name::ExtractOptions;
use serde::Serialize;
use std::num::NonZeroUsize;
use std::thread;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BuildStats {
    pub rows_scanned: usize,
    pub rows_without_phone: usize,
    pub duplicates_dropped: usize,
    pub fallback_names: usize,
}

impl BuildStats {
    fn absorb(&mut self, other: BuildStats) {
        self.rows_scanned += other.rows_scanned;
        self.rows_without_phone += other.rows_without_phone;
        self.duplicates_dropped += other.duplicates_dropped;
        self.fallback_names += other.fallback_names;
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildOutcome {
    pub contacts: ContactTable,
    pub stats: BuildStats,
}

pub fn build_contacts(
    table: &Table,
    selection: &ColumnSelection,
    options: &ExtractOptions,
) -> ContactTable {
    build_contacts_with_stats(table, selection, options).contacts
}

pub fn build_contacts_with_stats(
    table: &Table,
    selection: &ColumnSelection,
    options: &ExtractOptions,
) -> BuildOutcome {
    build_from_rows(table.rows(), selection, options)
}

/// Single pass over `rows`: rows without a phone are dropped, the rest
/// become records, then duplicates by phone are removed keeping the first.
pub fn build_from_rows<I>(
    rows: I,
    selection: &ColumnSelection,
    options: &ExtractOptions,
) -> BuildOutcome
where
    I: IntoIterator,
    I::Item: RowAccess,
{
    let mut stats = BuildStats::default();
    let mut records = Vec::new();

    for row in rows {
        stats.rows_scanned += 1;
        let Some(phone) = find_phone(&row, &selection.phone_columns) else {
            stats.rows_without_phone += 1;
            continue;
        };

        let (name, fell_back) = name_or_fallback(&row, &selection.name_columns, options);
        if fell_back {
            stats.fallback_names += 1;
        }
        records.push(ContactRecord::new(phone, name));
    }

    let (contacts, dropped) = ContactTable::dedup(records);
    stats.duplicates_dropped = dropped;
    BuildOutcome { contacts, stats }
}

/// Splits the rows into contiguous chunks, one per worker, and merges the
/// partial tables in row order. The result equals
/// [`build_contacts_with_stats`] for any worker count.
pub fn build_contacts_chunked(
    table: &Table,
    selection: &ColumnSelection,
    options: &ExtractOptions,
    workers: NonZeroUsize,
) -> BuildOutcome {
    let total = table.len();
    let workers = workers.get().min(total.max(1));
    if workers == 1 {
        return build_contacts_with_stats(table, selection, options);
    }

    let chunk = total.div_ceil(workers);
    let parts: Vec<BuildOutcome> = thread::scope(|scope| {
        let handles: Vec<_> = (0..total)
            .step_by(chunk)
            .map(|start| {
                let end = (start + chunk).min(total);
                scope.spawn(move || {
                    build_from_rows(table.rows_range(start..end), selection, options)
                })
            })
            .collect();
        handles
            .into_iter()
            .map(|handle| {
                handle
                    .join()
                    .unwrap_or_else(|payload| std::panic::resume_unwind(payload))
            })
            .collect()
    });

    let mut stats = BuildStats::default();
    let mut tables = Vec::with_capacity(parts.len());
    for part in parts {
        stats.absorb(part.stats);
        tables.push(part.contacts);
    }
    let (contacts, dropped) = ContactTable::merge_ordered(tables);
    stats.duplicates_dropped += dropped;
    BuildOutcome { contacts, stats }
}
