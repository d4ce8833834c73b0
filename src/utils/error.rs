use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClearBranchesError {
    #[error("Git operation failed: {message}")]
    GitOperation { message: String },

    #[error("Invalid repository path: {path}")]
    InvalidRepository { path: String },

    #[error("Fetch from remote '{remote}' failed: {message}")]
    Fetch { remote: String, message: String },

    #[error("Failed to delete branch '{branch}': {message}")]
    Deletion { branch: String, message: String },

    #[error("Invalid arguments: {message}")]
    InvalidArgs { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),
}

pub type Result<T> = std::result::Result<T, ClearBranchesError>;

impl ClearBranchesError {
    pub fn git_operation(message: impl Into<String>) -> Self {
        Self::GitOperation {
            message: message.into(),
        }
    }

    pub fn invalid_repository(path: impl Into<String>) -> Self {
        Self::InvalidRepository { path: path.into() }
    }

    pub fn fetch(remote: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Fetch {
            remote: remote.into(),
            message: message.into(),
        }
    }

    pub fn deletion(branch: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Deletion {
            branch: branch.into(),
            message: message.into(),
        }
    }

    pub fn invalid_args(message: impl Into<String>) -> Self {
        Self::InvalidArgs {
            message: message.into(),
        }
    }
}
