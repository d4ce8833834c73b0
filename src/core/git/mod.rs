use crate::utils::error::Result;
use std::path::Path;

pub mod branch;
pub mod repository;
pub mod validation;

pub use branch::{BranchManager, BranchSummary, Commit};
pub use repository::GitRepository;
pub use validation::GitValidator;

/// The repository operations the audit consumes. Any backend that can
/// enumerate branches, walk history, and delete refs is interchangeable.
pub trait GitBackend {
    fn list_branches(&self) -> Result<Vec<BranchSummary>>;
    fn branch_exists(&self, name: &str) -> Result<bool>;
    fn list_commits(&self, branch: &str) -> Result<Vec<Commit>>;
    fn delete_branch(&self, name: &str) -> Result<()>;
}

pub struct GitService {
    repo: GitRepository,
}

impl GitService {
    /// Open the repository at `path` and verify it is usable.
    pub fn open(path: &Path) -> Result<Self> {
        let repo = GitRepository::open(path)?;
        repo.validate()?;
        Ok(Self { repo })
    }

    pub fn discover_from(path: &Path) -> Result<Self> {
        let repo = GitRepository::discover_from(path)?;
        repo.validate()?;
        Ok(Self { repo })
    }

    pub fn repository(&self) -> &GitRepository {
        &self.repo
    }

    pub fn branch_manager(&self) -> BranchManager<'_> {
        BranchManager::new(&self.repo)
    }

    pub fn fetch(&self, remote: &str) -> Result<()> {
        self.repo.fetch(remote)
    }
}

impl GitBackend for GitService {
    fn list_branches(&self) -> Result<Vec<BranchSummary>> {
        self.branch_manager().list_branches()
    }

    fn branch_exists(&self, name: &str) -> Result<bool> {
        self.branch_manager().branch_exists(name)
    }

    fn list_commits(&self, branch: &str) -> Result<Vec<Commit>> {
        self.branch_manager().list_commits(branch)
    }

    fn delete_branch(&self, name: &str) -> Result<()> {
        self.branch_manager().delete_branch(name)
    }
}
