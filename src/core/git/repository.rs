use crate::utils::error::{ClearBranchesError, Result};
use std::path::{Path, PathBuf};
use std::process::Command;

#[derive(Debug, Clone)]
pub struct GitRepository {
    pub root: PathBuf,
    pub git_dir: PathBuf,
}

impl GitRepository {
    /// Check whether `path` points into a valid git repository without opening it.
    pub fn is_valid(path: &Path) -> bool {
        if !path.is_dir() {
            return false;
        }

        Command::new("git")
            .current_dir(path)
            .args(["rev-parse", "--git-dir"])
            .output()
            .map(|output| output.status.success())
            .unwrap_or(false)
    }

    /// Open the repository at `path`, failing with `InvalidRepository` when the
    /// path does not resolve to one.
    pub fn open(path: &Path) -> Result<Self> {
        if !Self::is_valid(path) {
            return Err(ClearBranchesError::invalid_repository(
                path.display().to_string(),
            ));
        }

        Self::discover_from(path)
    }

    pub fn discover_from(path: &Path) -> Result<Self> {
        let output = Command::new("git")
            .current_dir(path)
            .args(["rev-parse", "--show-toplevel"])
            .output()
            .map_err(|e| {
                ClearBranchesError::git_operation(format!("Failed to execute git: {}", e))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ClearBranchesError::git_operation(format!(
                "Not a git repository or git not found: {}",
                stderr.trim()
            )));
        }

        let root = String::from_utf8_lossy(&output.stdout).trim().to_string();
        let root = PathBuf::from(root);

        let git_dir = Self::get_git_dir(&root)?;

        Ok(Self { root, git_dir })
    }

    pub fn validate(&self) -> Result<()> {
        if !self.root.exists() {
            return Err(ClearBranchesError::git_operation(
                "Repository root does not exist".to_string(),
            ));
        }

        if !self.git_dir.exists() {
            return Err(ClearBranchesError::git_operation(
                "Git directory does not exist".to_string(),
            ));
        }

        Ok(())
    }

    pub fn get_current_branch(&self) -> Result<String> {
        execute_git_command(self, &["rev-parse", "--abbrev-ref", "HEAD"])
    }

    /// Fetch the latest refs from `remote`. Failures are surfaced as a
    /// `Fetch` error so callers can abort before any branch is touched.
    pub fn fetch(&self, remote: &str) -> Result<()> {
        let output = Command::new("git")
            .current_dir(&self.root)
            .args(["fetch", remote])
            .output()
            .map_err(|e| {
                ClearBranchesError::fetch(remote, format!("Failed to execute git: {}", e))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ClearBranchesError::fetch(remote, stderr.trim().to_string()));
        }

        Ok(())
    }

    fn get_git_dir(repo_root: &Path) -> Result<PathBuf> {
        let output = Command::new("git")
            .current_dir(repo_root)
            .args(["rev-parse", "--git-dir"])
            .output()
            .map_err(|e| {
                ClearBranchesError::git_operation(format!("Failed to get git dir: {}", e))
            })?;

        if !output.status.success() {
            return Err(ClearBranchesError::git_operation(
                "Failed to determine git directory".to_string(),
            ));
        }

        let git_dir = String::from_utf8_lossy(&output.stdout).trim().to_string();
        let git_dir = if git_dir.starts_with('/') {
            PathBuf::from(git_dir)
        } else {
            repo_root.join(git_dir)
        };

        Ok(git_dir)
    }
}

pub fn execute_git_command(repo: &GitRepository, args: &[&str]) -> Result<String> {
    let output = Command::new("git")
        .current_dir(&repo.root)
        .args(args)
        .output()
        .map_err(|e| ClearBranchesError::git_operation(format!("Failed to execute git: {}", e)))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(ClearBranchesError::git_operation(format!(
            "Git command failed ({}): {}",
            args.join(" "),
            stderr.trim()
        )));
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    Ok(stdout.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::test_helpers::*;
    use tempfile::TempDir;

    #[test]
    fn test_is_valid_rejects_plain_directory() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        assert!(!GitRepository::is_valid(temp_dir.path()));
        assert!(!GitRepository::is_valid(&temp_dir.path().join("missing")));
    }

    #[test]
    fn test_is_valid_accepts_repository() {
        let (temp_dir, _service) = setup_test_repo();
        assert!(GitRepository::is_valid(temp_dir.path()));
    }

    #[test]
    fn test_open_invalid_path() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let result = GitRepository::open(temp_dir.path());
        assert!(matches!(
            result,
            Err(ClearBranchesError::InvalidRepository { .. })
        ));
    }

    #[test]
    fn test_open_and_validate() {
        let (temp_dir, _service) = setup_test_repo();
        let repo = GitRepository::open(temp_dir.path()).expect("Failed to open repo");
        assert_eq!(repo.root, temp_dir.path().canonicalize().unwrap());
        assert!(repo.git_dir.exists());
        assert!(repo.validate().is_ok());
    }

    #[test]
    fn test_get_current_branch() {
        let (_temp_dir, service) = setup_test_repo();
        let branch = service
            .repository()
            .get_current_branch()
            .expect("Failed to get current branch");
        assert_eq!(branch, "main");
    }

    #[test]
    fn test_fetch_from_file_remote() {
        let (_temp_dir, service) = setup_repo_with_remote();
        service
            .repository()
            .fetch("origin")
            .expect("Fetch from local remote should succeed");
    }

    #[test]
    fn test_fetch_unknown_remote() {
        let (_temp_dir, service) = setup_test_repo();
        let result = service.repository().fetch("nowhere");
        match result {
            Err(ClearBranchesError::Fetch { remote, .. }) => assert_eq!(remote, "nowhere"),
            other => panic!("Expected fetch error, got {:?}", other.map(|_| ())),
        }
    }
}
