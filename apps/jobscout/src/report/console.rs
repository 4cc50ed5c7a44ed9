use std::fmt::Write;

use crate::models::JobListing;
use crate::ranking::TierTable;

/// Plain-text listing printed by the standalone hot-jobs run.
pub fn format_hot_jobs(categories: &[(&str, &[JobListing])], tiers: &TierTable) -> String {
    let total: usize = categories.iter().map(|(_, jobs)| jobs.len()).sum();
    if total == 0 {
        return "No hot jobs found.\n".to_string();
    }

    let rule = "=".repeat(60);
    let mut out = String::new();
    let _ = writeln!(out, "\n{rule}");
    let _ = writeln!(
        out,
        "  {total} Hot Jobs across {} categories",
        categories.len()
    );
    let _ = writeln!(out, "{rule}\n");

    for (name, jobs) in categories {
        let _ = writeln!(out, "  {name} ({})", jobs.len());
        let _ = writeln!(out, "  {}", "-".repeat(40));
        for job in jobs.iter() {
            let tier = tiers.tier_for(&job.location);
            let _ = writeln!(out, "    {}", job.company);
            let _ = writeln!(out, "      {}", job.title);
            let _ = writeln!(out, "      [{}] {}", tier.label, job.location);
            let _ = writeln!(out, "      {}", job.url);
            let _ = writeln!(out);
        }
    }
    out
}
