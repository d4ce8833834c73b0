use crate::cli::parser::Cli;
use crate::core::audit::{AuditConfig, AuditUi, BranchAction, BranchAudit, BranchAuditor};
use crate::core::git::{GitRepository, GitService};
use crate::utils::{ClearBranchesError, Result};
use dialoguer::theme::ColorfulTheme;
use dialoguer::Confirm;

pub fn execute(args: Cli) -> Result<()> {
    if !GitRepository::is_valid(&args.repository_path) {
        return Err(ClearBranchesError::invalid_repository(
            args.repository_path.display().to_string(),
        ));
    }

    let git = GitService::open(&args.repository_path)?;
    git.fetch(&args.remote)?;

    let config = AuditConfig {
        develop_branch: args.develop_branch.clone(),
        remote: args.remote.clone(),
        require_merge_evidence: args.require_merge_evidence,
    };

    let mut ui = ConsoleUi::new(&args);
    if matches!(ui.mode, ConfirmMode::DryRun) {
        println!("Dry run: no branches will be deleted.");
    }

    let auditor = BranchAuditor::new(&git, &config);
    let audits = auditor.run(&mut ui)?;

    show_summary(&audits);
    Ok(())
}

enum ConfirmMode {
    Prompt,
    AcceptAll,
    DryRun,
}

struct ConsoleUi {
    verbose: bool,
    mode: ConfirmMode,
    interactive: bool,
}

impl ConsoleUi {
    fn new(args: &Cli) -> Self {
        let mode = if args.confirm_all {
            ConfirmMode::AcceptAll
        } else if args.dry_run {
            ConfirmMode::DryRun
        } else {
            ConfirmMode::Prompt
        };

        Self {
            verbose: args.verbose,
            mode,
            interactive: atty::is(atty::Stream::Stdin),
        }
    }
}

impl AuditUi for ConsoleUi {
    fn status(&mut self, message: &str) {
        println!("{}", message);
    }

    fn verbose(&mut self, message: &str) {
        if self.verbose {
            println!("{}", message);
        }
    }

    fn warning(&mut self, message: &str) {
        println!("⚠️  Warning: {}", message);
    }

    fn should_proceed(&mut self, branch: &str, action: &str) -> bool {
        match self.mode {
            ConfirmMode::AcceptAll => true,
            ConfirmMode::DryRun => false,
            ConfirmMode::Prompt => {
                if !self.interactive {
                    println!(
                        "Standard input is not a terminal, keeping branch '{}'.",
                        branch
                    );
                    return false;
                }

                Confirm::with_theme(&ColorfulTheme::default())
                    .with_prompt(format!("{}?", action))
                    .default(false)
                    .interact()
                    .unwrap_or(false)
            }
        }
    }
}

fn show_summary(audits: &[BranchAudit]) {
    let deleted = audits
        .iter()
        .filter(|a| a.action == Some(BranchAction::Deleted))
        .count();
    let skipped = audits
        .iter()
        .filter(|a| a.action == Some(BranchAction::SkippedByUser))
        .count();
    let failed = audits
        .iter()
        .filter(|a| matches!(a.action, Some(BranchAction::DeleteFailed { .. })))
        .count();

    println!();
    println!("Audit completed:");
    println!("  Branches deleted: {}", deleted);
    println!("  Branches skipped: {}", skipped);
    if failed > 0 {
        println!("  Deletions failed: {}", failed);
    }
}
