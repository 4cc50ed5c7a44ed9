//! Reads the tracker workbook (first worksheet, header on the first row).
//!
//! Columns: company, role, role link, status, HR contacts. The HR column is
//! read as a formula when it has one, so `HYPERLINK(...)` parts survive.

use std::path::Path;

use calamine::{open_workbook_auto, Data, Range, Reader, Sheets};
use thiserror::Error;
use tracing::{info, warn};

use crate::models::TrackerEntry;
use crate::tracker::{parse_hr_contacts, TrackerTable};

/// Rows whose company cell contains this are section headings, not companies.
const SECTION_MARKER: &str = "Program/Product";

const COL_COMPANY: u32 = 0;
const COL_ROLE: u32 = 1;
const COL_ROLE_LINK: u32 = 2;
const COL_STATUS: u32 = 3;
const COL_HR: u32 = 4;

#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("workbook error: {0}")]
    Calamine(#[from] calamine::Error),

    #[error("copy error: {0}")]
    Io(#[from] std::io::Error),

    #[error("workbook has no worksheet")]
    NoWorksheet,
}

/// Reads the tracker at `path`. Never fails: an unreadable workbook is logged
/// and yields an empty tracker.
pub fn read_tracker(path: &Path) -> TrackerTable {
    match load(path) {
        Ok(table) => {
            info!("Tracker updated from workbook: {} companies", table.len());
            table
        }
        Err(e) => {
            warn!("Could not read tracker {}: {e}", path.display());
            TrackerTable::default()
        }
    }
}

fn load(path: &Path) -> Result<TrackerTable, TrackerError> {
    match open_workbook_auto(path) {
        Ok(mut workbook) => read_first_sheet(&mut workbook),
        Err(e) => {
            warn!("Workbook is locked or unreadable ({e}), reading from a temp copy...");
            load_from_copy(path)
        }
    }
}

/// Copies the workbook aside and reads the copy. The copy is removed on drop.
fn load_from_copy(path: &Path) -> Result<TrackerTable, TrackerError> {
    let suffix = path
        .extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .unwrap_or_else(|| ".xlsx".to_string());
    let copy = tempfile::Builder::new()
        .prefix("tracker-")
        .suffix(&suffix)
        .tempfile()?;
    std::fs::copy(path, copy.path())?;

    let mut workbook = open_workbook_auto(copy.path())?;
    read_first_sheet(&mut workbook)
}

fn read_first_sheet<RS>(workbook: &mut Sheets<RS>) -> Result<TrackerTable, TrackerError>
where
    RS: std::io::Read + std::io::Seek,
{
    let sheet = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or(TrackerError::NoWorksheet)?;
    let values = workbook.worksheet_range(&sheet)?;
    let formulas = match workbook.worksheet_formula(&sheet) {
        Ok(range) => Some(range),
        Err(e) => {
            warn!("No formulas read from '{sheet}': {e}");
            None
        }
    };

    Ok(TrackerTable::from_rows(rows_from_ranges(
        &values,
        formulas.as_ref(),
    )))
}

/// Turns the sheet ranges into tracker rows, skipping the header row.
pub fn rows_from_ranges(values: &Range<Data>, formulas: Option<&Range<String>>) -> Vec<TrackerEntry> {
    let (Some((first_row, _)), Some((last_row, _))) = (values.start(), values.end()) else {
        return Vec::new();
    };

    ((first_row + 1)..=last_row)
        .filter_map(|row| {
            let company = cell_text(values, row, COL_COMPANY);
            if company.is_empty() || company.contains(SECTION_MARKER) {
                return None;
            }

            let role_link = cell_text(values, row, COL_ROLE_LINK);
            let role_link = if role_link.starts_with("http") {
                role_link
            } else {
                String::new()
            };

            let hr_raw = formulas
                .and_then(|f| f.get_value((row, COL_HR)))
                .map(|f| f.trim())
                .filter(|f| !f.is_empty())
                .map(|f| if f.starts_with('=') { f.to_string() } else { format!("={f}") })
                .unwrap_or_else(|| cell_text(values, row, COL_HR));

            Some(TrackerEntry {
                company,
                role: cell_text(values, row, COL_ROLE),
                role_link,
                status: cell_text(values, row, COL_STATUS),
                hr_contacts: parse_hr_contacts(&hr_raw),
            })
        })
        .collect()
}

fn cell_text(range: &Range<Data>, row: u32, col: u32) -> String {
    range
        .get_value((row, col))
        .map(|cell| cell.to_string().trim().to_string())
        .unwrap_or_default()
}
