//! SYCEBNL chart of accounts.
//!
//! This module implements the account registry:
//! - Account and class domain types
//! - The immutable-after-load `ChartOfAccounts` registry with parent/child index
//! - Advisory consistency checking
//! - The embedded SYCEBNL reference plan

pub mod account;
pub mod plan;
pub mod registry;

pub use account::{Account, AccountClass};
pub use registry::{ChartIssue, ChartIssueKind, ChartOfAccounts};
