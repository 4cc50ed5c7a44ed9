use std::fmt;

use serde::{Deserialize, Serialize};

/// Job board a listing was fetched from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Source {
    #[default]
    #[serde(rename = "LinkedIn")]
    LinkedIn,
    #[serde(rename = "RemoteOK")]
    RemoteOk,
    Remotive,
    Arbeitnow,
    Jobicy,
    #[serde(rename = "We Work Remotely")]
    WeWorkRemotely,
}

impl Source {
    pub fn name(self) -> &'static str {
        match self {
            Source::LinkedIn => "LinkedIn",
            Source::RemoteOk => "RemoteOK",
            Source::Remotive => "Remotive",
            Source::Arbeitnow => "Arbeitnow",
            Source::Jobicy => "Jobicy",
            Source::WeWorkRemotely => "We Work Remotely",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single job posting, normalized across providers.
///
/// Sticky hot-job records written by older runs only carried company, title,
/// url and location, so the remaining fields default when absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobListing {
    pub company: String,
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub source: Source,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub tags: String,
    /// ISO `YYYY-MM-DD`, empty when the provider gave no date.
    #[serde(default)]
    pub posted_date: String,
}

impl JobListing {
    /// Normalized (company, title) pair used for duplicate detection.
    pub fn dedup_key(&self) -> (String, String) {
        (normalize(&self.company), normalize(&self.title))
    }

    /// True when the posting itself says it is remote.
    pub fn is_explicit_remote(&self) -> bool {
        [&self.location, &self.title, &self.tags]
            .iter()
            .any(|field| field.to_lowercase().contains("remote"))
    }
}

pub fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

/// First ten characters of a provider timestamp, i.e. the ISO date part.
pub fn iso_date_prefix(raw: &str) -> String {
    raw.trim().chars().take(10).collect()
}
