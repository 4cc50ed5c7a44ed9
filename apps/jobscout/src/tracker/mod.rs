//! The application tracker: one entry per company, built from spreadsheet
//! rows by a pure, order-dependent reducer.

use std::collections::BTreeMap;

use crate::models::TrackerEntry;

pub mod categories;
pub mod hr_contacts;
pub mod reader;

pub use categories::{categorize, CategoryRule};
pub use hr_contacts::parse_hr_contacts;
pub use reader::read_tracker;

/// Status keywords and their weight when two rows name the same company.
const MERGE_PRIORITY: &[(&str, u8)] = &[("review", 5), ("progress", 4), ("done", 3), ("reject", 2)];

/// Highest weight among the keywords contained in `status`, 0 when none.
pub fn merge_priority(status: &str) -> u8 {
    let status = status.to_lowercase();
    MERGE_PRIORITY
        .iter()
        .filter(|(keyword, _)| status.contains(keyword))
        .map(|(_, weight)| *weight)
        .max()
        .unwrap_or(0)
}

/// Folds a later row for the same company into the current entry.
///
/// The row replaces the entry only when its status weighs strictly more.
/// Afterwards, missing HR contacts and role link are taken from the row.
pub fn merge_row(current: TrackerEntry, incoming: TrackerEntry) -> TrackerEntry {
    let (mut kept, other) = if merge_priority(&incoming.status) > merge_priority(&current.status) {
        (incoming, current)
    } else {
        (current, incoming)
    };

    if kept.hr_contacts.is_empty() && !other.hr_contacts.is_empty() {
        kept.hr_contacts = other.hr_contacts;
    }
    if kept.role_link.is_empty() && !other.role_link.is_empty() {
        kept.role_link = other.role_link;
    }
    kept
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrackerTable {
    entries: BTreeMap<String, TrackerEntry>,
}

impl TrackerTable {
    pub fn from_rows<I>(rows: I) -> Self
    where
        I: IntoIterator<Item = TrackerEntry>,
    {
        let mut entries: BTreeMap<String, TrackerEntry> = BTreeMap::new();
        for mut row in rows {
            row.company = row.company.trim().to_string();
            if row.company.is_empty() {
                continue;
            }
            let key = row.company.clone();
            let merged = match entries.remove(&key) {
                Some(current) => merge_row(current, row),
                None => row,
            };
            entries.insert(key, merged);
        }
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in company-name order.
    pub fn iter(&self) -> impl Iterator<Item = &TrackerEntry> {
        self.entries.values()
    }

    pub fn companies(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Entries grouped by role category. Companies whose role matches no rule
    /// are left out.
    pub fn by_category<'t>(&'t self, rules: &[CategoryRule]) -> BTreeMap<String, Vec<&'t TrackerEntry>> {
        let mut grouped: BTreeMap<String, Vec<&TrackerEntry>> = BTreeMap::new();
        for entry in self.iter() {
            if let Some(category) = categorize(&entry.role, rules) {
                grouped.entry(category.to_string()).or_default().push(entry);
            }
        }
        grouped
    }
}
