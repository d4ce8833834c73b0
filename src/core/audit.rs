use crate::core::git::{BranchSummary, Commit, GitBackend};
use crate::utils::error::Result;

/// Immutable configuration for one audit run.
#[derive(Debug, Clone)]
pub struct AuditConfig {
    pub develop_branch: String,
    pub remote: String,
    pub require_merge_evidence: bool,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            develop_branch: "develop".to_string(),
            remote: "origin".to_string(),
            require_merge_evidence: false,
        }
    }
}

/// Classification of a single branch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuditDecision {
    SkippedRemote,
    SkippedCurrentHead,
    SkippedTracked { upstream: String },
    DevelopBranchMissing,
    MergeFound { commit: String },
    MergeNotFound,
}

impl AuditDecision {
    /// Whether the branch is offered for deletion. A branch without merge
    /// evidence is still offered unless the stricter policy is enabled.
    pub fn is_deletion_candidate(&self, require_merge_evidence: bool) -> bool {
        match self {
            AuditDecision::MergeFound { .. } => true,
            AuditDecision::MergeNotFound => !require_merge_evidence,
            AuditDecision::SkippedRemote
            | AuditDecision::SkippedCurrentHead
            | AuditDecision::SkippedTracked { .. }
            | AuditDecision::DevelopBranchMissing => false,
        }
    }
}

/// What happened to a deletion candidate after confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BranchAction {
    Deleted,
    SkippedByUser,
    DeleteFailed { reason: String },
}

/// Per-branch outcome of an audit run, in enumeration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchAudit {
    pub branch: String,
    pub decision: AuditDecision,
    pub action: Option<BranchAction>,
}

/// Confirmation and reporting capability supplied by the caller. The console
/// implementation prompts interactively; tests script the answers.
pub trait AuditUi {
    fn status(&mut self, message: &str);
    fn verbose(&mut self, message: &str);
    fn warning(&mut self, message: &str);
    fn should_proceed(&mut self, branch: &str, action: &str) -> bool;
}

/// Classifies every branch of a repository and drives the deletion of the
/// ones that are local-only, not checked out, and untracked.
pub struct BranchAuditor<'a, G: GitBackend> {
    git: &'a G,
    config: &'a AuditConfig,
}

impl<'a, G: GitBackend> BranchAuditor<'a, G> {
    pub fn new(git: &'a G, config: &'a AuditConfig) -> Self {
        Self { git, config }
    }

    /// The commit-message substring that counts as merge evidence.
    pub fn merge_pattern(&self, branch: &str) -> String {
        format!(
            "Merge branch '{}' into '{}'",
            branch, self.config.develop_branch
        )
    }

    /// Classify one branch against the develop history. `None` means the
    /// develop branch does not exist in this repository.
    pub fn classify(
        &self,
        branch: &BranchSummary,
        develop_history: Option<&[Commit]>,
    ) -> AuditDecision {
        if branch.is_remote {
            return AuditDecision::SkippedRemote;
        }
        if branch.is_current {
            return AuditDecision::SkippedCurrentHead;
        }
        if let Some(upstream) = &branch.upstream {
            return AuditDecision::SkippedTracked {
                upstream: upstream.clone(),
            };
        }

        let history = match develop_history {
            Some(history) => history,
            None => return AuditDecision::DevelopBranchMissing,
        };

        let pattern = self.merge_pattern(&branch.name);
        match history
            .iter()
            .find(|commit| commit.message.contains(&pattern))
        {
            Some(commit) => AuditDecision::MergeFound {
                commit: commit.id.clone(),
            },
            None => AuditDecision::MergeNotFound,
        }
    }

    /// Audit every branch, report through `ui`, and delete the candidates the
    /// user confirms. Per-branch failures are recorded and the run continues.
    pub fn run(&self, ui: &mut dyn AuditUi) -> Result<Vec<BranchAudit>> {
        let branches = self.git.list_branches()?;
        let develop_history = self.load_develop_history()?;

        let mut audits = Vec::new();
        for branch in &branches {
            let decision = self.classify(branch, develop_history.as_deref());
            self.report_decision(branch, &decision, ui);

            let action = if decision.is_deletion_candidate(self.config.require_merge_evidence) {
                Some(self.delete_after_confirmation(&branch.name, ui))
            } else {
                None
            };

            audits.push(BranchAudit {
                branch: branch.name.clone(),
                decision,
                action,
            });
        }

        Ok(audits)
    }

    // The develop lookup happens once per run; every candidate shares it.
    fn load_develop_history(&self) -> Result<Option<Vec<Commit>>> {
        if self.git.branch_exists(&self.config.develop_branch)? {
            Ok(Some(self.git.list_commits(&self.config.develop_branch)?))
        } else {
            Ok(None)
        }
    }

    fn report_decision(&self, branch: &BranchSummary, decision: &AuditDecision, ui: &mut dyn AuditUi) {
        match decision {
            AuditDecision::SkippedRemote | AuditDecision::SkippedCurrentHead => {}
            AuditDecision::SkippedTracked { upstream } => {
                ui.verbose(&format!(
                    "Branch '{}' tracks '{}', leaving it alone.",
                    branch.name, upstream
                ));
            }
            AuditDecision::DevelopBranchMissing => {
                ui.verbose(&format!("Branch '{}' has no upstream.", branch.name));
                ui.warning(&format!(
                    "Develop branch '{}' does not exist.",
                    self.config.develop_branch
                ));
            }
            AuditDecision::MergeFound { commit } => {
                ui.verbose(&format!("Branch '{}' has no upstream.", branch.name));
                ui.status(&format!(
                    "Merge commit found for branch '{}' in '{}': {}",
                    branch.name, self.config.develop_branch, commit
                ));
            }
            AuditDecision::MergeNotFound => {
                ui.verbose(&format!("Branch '{}' has no upstream.", branch.name));
                ui.status(&format!(
                    "No merge commit found for branch '{}' in '{}'.",
                    branch.name, self.config.develop_branch
                ));
                if self.config.require_merge_evidence {
                    ui.status(&format!(
                        "Keeping branch '{}': no merge evidence in '{}'.",
                        branch.name, self.config.develop_branch
                    ));
                }
            }
        }
    }

    fn delete_after_confirmation(&self, branch: &str, ui: &mut dyn AuditUi) -> BranchAction {
        let action = format!("Delete branch '{}'", branch);
        if !ui.should_proceed(branch, &action) {
            ui.status(&format!("Skipping branch: {}", branch));
            return BranchAction::SkippedByUser;
        }

        match self.git.delete_branch(branch) {
            Ok(()) => {
                ui.status(&format!("Branch '{}' deleted successfully.", branch));
                BranchAction::Deleted
            }
            Err(e) => {
                ui.warning(&e.to_string());
                BranchAction::DeleteFailed {
                    reason: e.to_string(),
                }
            }
        }
    }
}
