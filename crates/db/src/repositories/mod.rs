//! Repository abstractions for data access.

pub mod chart;
pub mod entry;
pub mod reconciliation;
pub mod report;

pub use chart::ChartRepository;
pub use entry::EntryRepository;
pub use reconciliation::ReconciliationRepository;
pub use report::ReportRepository;
