pub mod listing;
pub mod tracker;

pub use listing::{JobListing, Source};
pub use tracker::{HrContact, StatusKind, TrackerEntry};
