use crate::domain::phone::PhoneNumber;
use serde::Serialize;
use std::collections::HashSet;

pub const DEFAULT_FALLBACK_NAME: &str = "Contacto";

/// One output row: a phone, a first name and the blank columns the bulk
/// messaging template expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactRecord {
    pub phone_number: PhoneNumber,
    pub primary_name: String,
    pub extra1: String,
    pub extra2: String,
    pub extra3: String,
    pub extra4: String,
    pub status: String,
}

impl ContactRecord {
    pub fn new(phone_number: PhoneNumber, primary_name: impl Into<String>) -> Self {
        Self {
            phone_number,
            primary_name: primary_name.into(),
            extra1: String::new(),
            extra2: String::new(),
            extra3: String::new(),
            extra4: String::new(),
            status: String::new(),
        }
    }
}

/// Contacts unique by phone number, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ContactTable {
    records: Vec<ContactRecord>,
}

impl ContactTable {
    /// Keeps the first record for each phone number and drops the rest,
    /// whatever their names.
    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = ContactRecord>,
    {
        Self::dedup(records).0
    }

    pub(crate) fn dedup<I>(records: I) -> (Self, usize)
    where
        I: IntoIterator<Item = ContactRecord>,
    {
        let mut seen: HashSet<PhoneNumber> = HashSet::new();
        let mut kept = Vec::new();
        let mut dropped = 0;
        for record in records {
            if seen.insert(record.phone_number.clone()) {
                kept.push(record);
            } else {
                dropped += 1;
            }
        }
        (Self { records: kept }, dropped)
    }

    /// Joins partial tables built from consecutive row ranges. `parts` must
    /// be in row order; the earliest part wins on shared phone numbers.
    /// Also returns how many records were dropped as duplicates.
    pub fn merge_ordered<I>(parts: I) -> (Self, usize)
    where
        I: IntoIterator<Item = ContactTable>,
    {
        Self::dedup(parts.into_iter().flat_map(|part| part.records))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[ContactRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ContactRecord> {
        self.records.iter()
    }

}

impl IntoIterator for ContactTable {
    type Item = ContactRecord;
    type IntoIter = std::vec::IntoIter<ContactRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl<'a> IntoIterator for &'a ContactTable {
    type Item = &'a ContactRecord;
    type IntoIter = std::slice::Iter<'a, ContactRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
