use crate::utils::error::{ClearBranchesError, Result};
use regex::Regex;

/// Validation for user-supplied ref and remote names before they reach git
pub struct GitValidator;

impl GitValidator {
    /// Validate a branch name according to Git's ref naming rules
    pub fn validate_branch_name(name: &str) -> Result<()> {
        if name.is_empty() {
            return Err(ClearBranchesError::invalid_args(
                "Branch name cannot be empty".to_string(),
            ));
        }

        if name.len() > 250 {
            return Err(ClearBranchesError::invalid_args(
                "Branch name too long".to_string(),
            ));
        }

        let invalid_patterns = vec![
            r"\.\.+",              // Contains ..
            r"^-",                 // Starts with -
            r"/$",                 // Ends with /
            r"\x00",               // Contains null byte
            r"[ \t]",              // Contains whitespace
            r"[\x00-\x1f\x7f]",    // Contains control characters
            r"~|\^|:|\\|\*|\?|\[", // Contains special Git characters
            r"^@$",                // Exactly "@"
            r"/\.",                // Contains "/.
            r"@\{",                // Contains "@{"
        ];

        for pattern in invalid_patterns {
            let regex = Regex::new(pattern)?;
            if regex.is_match(name) {
                return Err(ClearBranchesError::invalid_args(format!(
                    "Invalid branch name '{}': contains invalid characters or patterns",
                    name
                )));
            }
        }

        if name.starts_with("refs/") {
            return Err(ClearBranchesError::invalid_args(
                "Branch name cannot start with 'refs/'".to_string(),
            ));
        }

        Ok(())
    }

    /// Validate a remote name as configured in the repository
    pub fn validate_remote_name(name: &str) -> Result<()> {
        if name.is_empty() {
            return Err(ClearBranchesError::invalid_args(
                "Remote name cannot be empty".to_string(),
            ));
        }

        if name.starts_with('-') {
            return Err(ClearBranchesError::invalid_args(format!(
                "Invalid remote name '{}': cannot start with '-'",
                name
            )));
        }

        if name
            .chars()
            .any(|c| c.is_whitespace() || c.is_control() || c == '/')
        {
            return Err(ClearBranchesError::invalid_args(format!(
                "Invalid remote name '{}': contains invalid characters",
                name
            )));
        }

        Ok(())
    }
}
