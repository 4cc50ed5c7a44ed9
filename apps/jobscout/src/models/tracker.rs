use serde::{Deserialize, Serialize};

/// A recruiter or HR person recorded against a company. `url` may be empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HrContact {
    pub name: String,
    pub url: String,
}

/// One company row of the application tracker after duplicate rows were merged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackerEntry {
    pub company: String,
    pub role: String,
    pub role_link: String,
    pub status: String,
    pub hr_contacts: Vec<HrContact>,
}

impl TrackerEntry {
    pub fn status_kind(&self) -> StatusKind {
        StatusKind::classify(&self.status)
    }
}

/// Coarse category of the free-text tracker status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusKind {
    Review,
    Progress,
    Applied,
    NoJobs,
    Rejected,
    Uncategorized,
}

impl StatusKind {
    pub fn classify(status: &str) -> Self {
        let status = status.to_lowercase();
        if status.contains("review") {
            StatusKind::Review
        } else if status.contains("progress") {
            StatusKind::Progress
        } else if status.contains("done") || status.contains("applied") {
            StatusKind::Applied
        } else if status.contains("not available") || status.contains("nothing") {
            StatusKind::NoJobs
        } else if status.contains("reject") {
            StatusKind::Rejected
        } else {
            StatusKind::Uncategorized
        }
    }

    /// Position of the status group in the report tables.
    pub fn display_rank(self) -> u8 {
        match self {
            StatusKind::Uncategorized => 0,
            StatusKind::Review => 1,
            StatusKind::Progress => 2,
            StatusKind::Applied => 3,
            StatusKind::NoJobs => 4,
            StatusKind::Rejected => 5,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            StatusKind::Review => "Review",
            StatusKind::Progress => "Progress",
            StatusKind::Applied => "Applied",
            StatusKind::NoJobs => "No jobs",
            StatusKind::Rejected => "Rejected",
            StatusKind::Uncategorized => "NC",
        }
    }

    pub fn section_title(self) -> &'static str {
        match self {
            StatusKind::Uncategorized => "NOT CONTACTED",
            StatusKind::Review => "UNDER REVIEW",
            StatusKind::Progress => "IN PROGRESS",
            StatusKind::Applied => "APPLIED",
            StatusKind::NoJobs => "NO JOBS AVAILABLE",
            StatusKind::Rejected => "REJECTED",
        }
    }

    /// CSS class used by the report stylesheet.
    pub fn css_class(self) -> &'static str {
        match self {
            StatusKind::Review => "s-review",
            StatusKind::Progress => "s-progress",
            StatusKind::Applied => "s-applied",
            StatusKind::NoJobs => "s-nothing",
            StatusKind::Rejected => "s-rejected",
            StatusKind::Uncategorized => "s-new",
        }
    }
}
