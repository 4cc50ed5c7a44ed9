use std::path::PathBuf;

use clap::Parser;

/// Daily job-search report, sticky hot jobs and remote roles.
#[derive(Parser, Debug)]
#[command(name = "jobscout", version)]
#[command(about = "Job search reports built from your application tracker", long_about = None)]
pub struct Cli {
    /// Only run the hot-jobs check and print it
    #[arg(long, conflicts_with = "remote")]
    pub hot_jobs: bool,

    /// Clear one hot-jobs category, or all of them, before the run
    #[arg(long, value_name = "CATEGORY", num_args = 0..=1, requires = "hot_jobs")]
    pub refresh: Option<Option<String>>,

    /// Drop a hot job and never show that company/role pair again
    #[arg(long, num_args = 2, value_names = ["COMPANY", "ROLE"], requires = "hot_jobs")]
    pub remove: Option<Vec<String>>,

    /// Build the remote-roles report instead of the daily one
    #[arg(long)]
    pub remote: bool,

    /// Report file to write (defaults to REPORT_DIR/<kind>-<date>.html)
    #[arg(long, value_name = "PATH", conflicts_with = "hot_jobs")]
    pub out: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Refresh {
    All,
    Category(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Daily,
    HotJobs {
        refresh: Option<Refresh>,
        remove: Option<(String, String)>,
    },
    Remote,
}

impl Cli {
    pub fn mode(&self) -> Mode {
        if self.hot_jobs {
            Mode::HotJobs {
                refresh: self.refresh.as_ref().map(|category| match category {
                    Some(name) => Refresh::Category(name.clone()),
                    None => Refresh::All,
                }),
                remove: self.remove.as_ref().and_then(|pair| match pair.as_slice() {
                    [company, role] => Some((company.clone(), role.clone())),
                    _ => None,
                }),
            }
        } else if self.remote {
            Mode::Remote
        } else {
            Mode::Daily
        }
    }
}
