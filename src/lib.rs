pub mod cli;
pub mod core;
pub mod utils;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use crate::core::audit::{
    AuditConfig, AuditDecision, AuditUi, BranchAction, BranchAudit, BranchAuditor,
};
pub use crate::core::git::{BranchSummary, Commit, GitBackend, GitRepository, GitService};
pub use crate::utils::{ClearBranchesError, Result};
