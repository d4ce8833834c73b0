use super::repository::{execute_git_command, GitRepository};
use super::validation::GitValidator;
use crate::utils::error::{ClearBranchesError, Result};

/// One branch as enumerated from the repository, local or remote-tracking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchSummary {
    pub name: String,
    pub is_remote: bool,
    pub is_current: bool,
    pub upstream: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    pub id: String,
    pub message: String,
}

pub struct BranchManager<'a> {
    repo: &'a GitRepository,
}

// NUL-separated fields: full refname, short name, upstream, HEAD marker.
const REF_FORMAT: &str = "%(refname)%00%(refname:short)%00%(upstream:short)%00%(HEAD)";

// Unit separator between hash and message, record separator after each commit.
const LOG_FORMAT: &str = "%H%x1f%B%x1e";

impl<'a> BranchManager<'a> {
    pub fn new(repo: &'a GitRepository) -> Self {
        Self { repo }
    }

    /// Enumerate all local and remote-tracking branches with their upstream
    /// and current-HEAD flags.
    pub fn list_branches(&self) -> Result<Vec<BranchSummary>> {
        let format = format!("--format={}", REF_FORMAT);
        let output = execute_git_command(
            self.repo,
            &["for-each-ref", &format, "refs/heads", "refs/remotes"],
        )?;

        let mut branches = Vec::new();
        for line in output.lines() {
            if let Some(branch) = parse_ref_line(line) {
                branches.push(branch);
            }
        }

        Ok(branches)
    }

    pub fn branch_exists(&self, name: &str) -> Result<bool> {
        let result = execute_git_command(
            self.repo,
            &["rev-parse", "--verify", &format!("refs/heads/{}", name)],
        );
        Ok(result.is_ok())
    }

    /// Full history of `branch`, newest first.
    pub fn list_commits(&self, branch: &str) -> Result<Vec<Commit>> {
        let format = format!("--format={}", LOG_FORMAT);
        let output = execute_git_command(self.repo, &["log", &format, branch, "--"])?;
        Ok(parse_log_output(&output))
    }

    /// Force-delete a local branch. The currently checked-out branch is
    /// refused before git is even asked.
    pub fn delete_branch(&self, name: &str) -> Result<()> {
        GitValidator::validate_branch_name(name)?;

        let current_branch = self.repo.get_current_branch()?;
        if current_branch == name {
            return Err(ClearBranchesError::deletion(
                name,
                "cannot delete the checked-out branch",
            ));
        }

        execute_git_command(self.repo, &["branch", "-D", name])
            .map(|_| ())
            .map_err(|e| ClearBranchesError::deletion(name, e.to_string()))
    }

    pub fn get_branch_commit(&self, branch: &str) -> Result<String> {
        execute_git_command(self.repo, &["rev-parse", branch])
    }
}

fn parse_ref_line(line: &str) -> Option<BranchSummary> {
    let mut fields = line.split('\0');
    let refname = fields.next()?;
    let short_name = fields.next()?;
    // Trailing fields can be trimmed away with the surrounding whitespace.
    let upstream = fields.next().unwrap_or("").trim();
    let head_marker = fields.next().unwrap_or("").trim();

    if refname.is_empty() || short_name.is_empty() {
        return None;
    }

    let is_remote = refname.starts_with("refs/remotes/");

    // The remote HEAD symref (e.g. origin/HEAD) is not a branch.
    if is_remote && short_name.ends_with("/HEAD") {
        return None;
    }

    Some(BranchSummary {
        name: short_name.to_string(),
        is_remote,
        is_current: head_marker == "*",
        upstream: if upstream.is_empty() {
            None
        } else {
            Some(upstream.to_string())
        },
    })
}

fn parse_log_output(output: &str) -> Vec<Commit> {
    output
        .split('\u{1e}')
        .filter_map(|record| {
            let (id, message) = record.split_once('\u{1f}')?;
            let id = id.trim();
            if id.is_empty() {
                return None;
            }
            Some(Commit {
                id: id.to_string(),
                message: message.trim_end().to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::test_helpers::*;

    #[test]
    fn test_parse_ref_line_local_branch() {
        let line = "refs/heads/feature/x\0feature/x\0\0 ";
        let branch = parse_ref_line(line).expect("Should parse local branch");
        assert_eq!(branch.name, "feature/x");
        assert!(!branch.is_remote);
        assert!(!branch.is_current);
        assert_eq!(branch.upstream, None);
    }

    #[test]
    fn test_parse_ref_line_tracked_branch() {
        let line = "refs/heads/main\0main\0origin/main\0 ";
        let branch = parse_ref_line(line).expect("Should parse tracked branch");
        assert_eq!(branch.upstream, Some("origin/main".to_string()));
    }

    #[test]
    fn test_parse_ref_line_current_branch() {
        let line = "refs/heads/main\0main\0\0*";
        let branch = parse_ref_line(line).expect("Should parse current branch");
        assert!(branch.is_current);
    }

    #[test]
    fn test_parse_ref_line_remote_branch() {
        let line = "refs/remotes/origin/feature/x\0origin/feature/x\0\0 ";
        let branch = parse_ref_line(line).expect("Should parse remote branch");
        assert!(branch.is_remote);
        assert_eq!(branch.name, "origin/feature/x");
    }

    #[test]
    fn test_parse_ref_line_filters_remote_head() {
        let line = "refs/remotes/origin/HEAD\0origin/HEAD\0\0 ";
        assert!(parse_ref_line(line).is_none());
    }

    #[test]
    fn test_parse_ref_line_tolerates_trimmed_marker() {
        // The last line of the output loses its trailing blank marker to trim.
        let line = "refs/heads/feature/x\0feature/x\0";
        let branch = parse_ref_line(line).expect("Should parse trimmed line");
        assert!(!branch.is_current);
        assert_eq!(branch.upstream, None);
    }

    #[test]
    fn test_parse_ref_line_rejects_garbage() {
        assert!(parse_ref_line("").is_none());
        assert!(parse_ref_line("no separators here").is_none());
    }

    #[test]
    fn test_parse_log_output() {
        let output = "abc123\u{1f}Second commit\n\u{1e}\ndef456\u{1f}Initial commit\n\u{1e}";
        let commits = parse_log_output(output);
        assert_eq!(commits.len(), 2);
        assert_eq!(commits[0].id, "abc123");
        assert_eq!(commits[0].message, "Second commit");
        assert_eq!(commits[1].id, "def456");
        assert_eq!(commits[1].message, "Initial commit");
    }

    #[test]
    fn test_parse_log_output_multiline_message() {
        let output = "abc123\u{1f}Merge branch 'feature/x' into 'develop'\n\nSee merge request !42\n\u{1e}";
        let commits = parse_log_output(output);
        assert_eq!(commits.len(), 1);
        assert!(commits[0]
            .message
            .contains("Merge branch 'feature/x' into 'develop'"));
        assert!(commits[0].message.contains("See merge request !42"));
    }

    #[test]
    fn test_list_branches_flags() {
        let (temp_dir, service) = setup_repo_with_remote();
        let repo_path = temp_dir.path().join("work");

        run_git(&repo_path, &["branch", "feature/local-only"]);
        run_git(&repo_path, &["branch", "feature/tracked"]);
        run_git(&repo_path, &["push", "-u", "origin", "feature/tracked"]);

        let branches = service
            .branch_manager()
            .list_branches()
            .expect("Failed to list branches");

        let find = |name: &str| {
            branches
                .iter()
                .find(|b| b.name == name)
                .unwrap_or_else(|| panic!("Branch {} not found", name))
        };

        let main = find("main");
        assert!(main.is_current);
        assert!(!main.is_remote);
        assert_eq!(main.upstream, Some("origin/main".to_string()));

        let local_only = find("feature/local-only");
        assert!(!local_only.is_current);
        assert_eq!(local_only.upstream, None);

        let tracked = find("feature/tracked");
        assert_eq!(tracked.upstream, Some("origin/feature/tracked".to_string()));

        let remote = find("origin/main");
        assert!(remote.is_remote);
    }

    #[test]
    fn test_list_commits_newest_first() {
        let (temp_dir, service) = setup_test_repo();

        commit_file(temp_dir.path(), "a.txt", "Add a");
        commit_file(temp_dir.path(), "b.txt", "Add b");

        let commits = service
            .branch_manager()
            .list_commits("main")
            .expect("Failed to list commits");

        assert_eq!(commits.len(), 3);
        assert_eq!(commits[0].message, "Add b");
        assert_eq!(commits[1].message, "Add a");
        assert_eq!(commits[2].message, "Initial commit");
        assert!(commits.iter().all(|c| c.id.len() == 40));
    }

    #[test]
    fn test_delete_branch() {
        let (temp_dir, service) = setup_test_repo();
        let manager = service.branch_manager();

        run_git(temp_dir.path(), &["branch", "feature/done"]);
        assert!(manager
            .branch_exists("feature/done")
            .expect("Failed to check branch"));

        manager
            .delete_branch("feature/done")
            .expect("Failed to delete branch");

        assert!(!manager
            .branch_exists("feature/done")
            .expect("Failed to check branch"));
    }

    #[test]
    fn test_delete_branch_refuses_current() {
        let (_temp_dir, service) = setup_test_repo();
        let result = service.branch_manager().delete_branch("main");
        assert!(matches!(
            result,
            Err(ClearBranchesError::Deletion { .. })
        ));
    }

    #[test]
    fn test_delete_branch_missing() {
        let (_temp_dir, service) = setup_test_repo();
        let result = service.branch_manager().delete_branch("feature/ghost");
        assert!(matches!(
            result,
            Err(ClearBranchesError::Deletion { .. })
        ));
    }

    #[test]
    fn test_get_branch_commit() {
        let (_temp_dir, service) = setup_test_repo();
        let commit = service
            .branch_manager()
            .get_branch_commit("main")
            .expect("Failed to resolve branch commit");
        assert_eq!(commit.len(), 40);
    }
}
