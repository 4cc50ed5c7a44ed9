//! Sticky hot-jobs file: the per-category "current best leads" and the
//! permanent blocklist of removed (company, role) pairs.
//!
//! The file is pretty-printed JSON. A missing file is an empty state; a
//! corrupt one is logged and also treated as empty.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::JobListing;

/// Slots per category.
pub const CAPACITY: usize = 5;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("sticky file I/O: {0}")]
    Io(#[from] std::io::Error),

    #[error("sticky file encoding: {0}")]
    Json(#[from] serde_json::Error),
}

/// A blocklist entry.
///
/// New entries are (company, role) pairs stored as `company||role`. Older
/// files hold bare company names; those stay company-only and keep matching
/// the company in either direction, whatever the role.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BlockKey {
    Pair { company: String, role: String },
    Company(String),
}

fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

impl BlockKey {
    pub fn new(company: &str, role: &str) -> Self {
        Self::Pair {
            company: normalize(company),
            role: normalize(role),
        }
    }

    pub fn parse(raw: &str) -> Self {
        match raw.split_once("||") {
            Some((company, role)) => Self::new(company, role),
            None => Self::Company(normalize(raw)),
        }
    }

    /// Whether a listing's company and title fall under this entry.
    pub fn matches(&self, company: &str, title: &str) -> bool {
        let company = normalize(company);
        match self {
            Self::Pair {
                company: key_company,
                role,
            } => {
                !key_company.is_empty()
                    && company.contains(key_company.as_str())
                    && title.to_lowercase().contains(role.as_str())
            }
            Self::Company(key_company) => {
                !key_company.is_empty()
                    && !company.is_empty()
                    && (company.contains(key_company.as_str()) || key_company.contains(&company))
            }
        }
    }
}

impl From<String> for BlockKey {
    fn from(raw: String) -> Self {
        Self::parse(&raw)
    }
}

impl From<BlockKey> for String {
    fn from(key: BlockKey) -> Self {
        key.to_string()
    }
}

impl fmt::Display for BlockKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pair { company, role } => write!(f, "{company}||{role}"),
            Self::Company(company) => f.write_str(company),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StickyState {
    pub last_updated: Option<NaiveDate>,
    pub current_jobs: BTreeMap<String, Vec<JobListing>>,
    pub blocklist: BTreeSet<BlockKey>,
}

impl StickyState {
    pub fn touch(&mut self, today: NaiveDate) {
        self.last_updated = Some(today);
    }

    pub fn is_blocklisted(&self, company: &str, title: &str) -> bool {
        self.blocklist.iter().any(|key| key.matches(company, title))
    }

    pub fn total_jobs(&self) -> usize {
        self.current_jobs.values().map(Vec::len).sum()
    }
}

pub struct StickyStore {
    path: PathBuf,
}

impl StickyStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn load(&self) -> StickyState {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No sticky file at {}, starting empty", self.path.display());
                return StickyState::default();
            }
            Err(e) => {
                warn!("Cannot read sticky file {}: {e}", self.path.display());
                return StickyState::default();
            }
        };

        serde_json::from_str(&raw).unwrap_or_else(|e| {
            warn!(
                "Sticky file {} is corrupt, starting empty: {e}",
                self.path.display()
            );
            StickyState::default()
        })
    }

    /// Writes to a temp file next to the target, then renames it into place.
    pub fn save(&self, state: &StickyState) -> Result<(), StoreError> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(dir)?;

        let mut tmp = NamedTempFile::new_in(dir)?;
        serde_json::to_writer_pretty(&mut tmp, state)?;
        tmp.write_all(b"\n")?;
        tmp.persist(&self.path).map_err(|e| e.error)?;

        debug!(
            "Saved {} hot jobs to {}",
            state.total_jobs(),
            self.path.display()
        );
        Ok(())
    }
}
