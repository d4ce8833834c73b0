pub mod test_helpers {
    use crate::core::git::GitService;
    use std::fs;
    use std::path::Path;
    use std::process::Command;
    use tempfile::TempDir;

    pub fn run_git(path: &Path, args: &[&str]) {
        let status = Command::new("git")
            .current_dir(path)
            .args(args)
            .status()
            .expect("Failed to execute git");
        assert!(status.success(), "git {:?} failed in {:?}", args, path);
    }

    pub fn commit_file(repo_path: &Path, name: &str, message: &str) {
        fs::write(repo_path.join(name), message).expect("Failed to write file");
        run_git(repo_path, &["add", name]);
        run_git(repo_path, &["commit", "-m", message]);
    }

    fn init_repo(repo_path: &Path) {
        run_git(repo_path, &["init", "--initial-branch=main"]);
        run_git(repo_path, &["config", "user.name", "Test User"]);
        run_git(repo_path, &["config", "user.email", "test@example.com"]);

        fs::write(repo_path.join("README.md"), "# Test Repository")
            .expect("Failed to write README");
        run_git(repo_path, &["add", "README.md"]);
        run_git(repo_path, &["commit", "-m", "Initial commit"]);
    }

    pub fn setup_test_repo() -> (TempDir, GitService) {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        init_repo(temp_dir.path());

        let service = GitService::discover_from(temp_dir.path()).expect("Failed to discover repo");
        (temp_dir, service)
    }

    /// A working copy at `<tmp>/work` pushed to a bare remote at
    /// `<tmp>/origin.git`, with `main` tracking `origin/main`.
    pub fn setup_repo_with_remote() -> (TempDir, GitService) {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");

        let remote_path = temp_dir.path().join("origin.git");
        fs::create_dir_all(&remote_path).expect("Failed to create remote dir");
        run_git(&remote_path, &["init", "--bare", "--initial-branch=main"]);

        let repo_path = temp_dir.path().join("work");
        fs::create_dir_all(&repo_path).expect("Failed to create work dir");
        init_repo(&repo_path);

        let remote_url = remote_path.to_string_lossy().to_string();
        run_git(&repo_path, &["remote", "add", "origin", &remote_url]);
        run_git(&repo_path, &["push", "-u", "origin", "main"]);

        let service = GitService::discover_from(&repo_path).expect("Failed to discover repo");
        (temp_dir, service)
    }
}
