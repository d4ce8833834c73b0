use crate::core::git::GitValidator;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "clear-branches")]
#[command(about = "Prune local branches that were merged upstream and lost their remote tracking")]
#[command(version, long_about = None)]
pub struct Cli {
    /// Path to the repository working copy
    #[arg(long, value_name = "PATH")]
    pub repository_path: PathBuf,

    /// Integration branch whose history is searched for merge commits
    #[arg(long, value_name = "NAME", default_value = "develop")]
    pub develop_branch: String,

    /// Remote to fetch before auditing
    #[arg(long, value_name = "NAME", default_value = "origin")]
    pub remote: String,

    /// Delete every offered branch without prompting
    #[arg(long, conflicts_with = "dry_run")]
    pub confirm_all: bool,

    /// Report what would be deleted without touching anything
    #[arg(long)]
    pub dry_run: bool,

    /// Only offer a branch for deletion when a merge commit was found
    #[arg(long)]
    pub require_merge_evidence: bool,

    /// Show per-branch classification detail
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

impl Cli {
    pub fn validate(&self) -> crate::utils::Result<()> {
        GitValidator::validate_branch_name(&self.develop_branch)?;
        GitValidator::validate_remote_name(&self.remote)?;
        Ok(())
    }
}
