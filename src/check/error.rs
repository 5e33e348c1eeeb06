use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Which side of the merge a branch argument stands for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BranchRole {
    Source,
    Target,
}

impl BranchRole {
    /// Command line flag the branch was passed with
    pub fn flag(self) -> &'static str {
        match self {
            BranchRole::Source => "--source",
            BranchRole::Target => "--target",
        }
    }
}

impl fmt::Display for BranchRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BranchRole::Source => f.write_str("source"),
            BranchRole::Target => f.write_str("target"),
        }
    }
}

#[derive(Error, Debug)]
pub enum CheckError {
    #[error("\"{}\" is not a valid Git repository", .path.display())]
    InvalidRepository { path: PathBuf },

    #[error("{role} branch \"{name}\" does not exist")]
    UnknownBranch { role: BranchRole, name: String },

    /// git could not answer a query: not installed, crashed, printed something unexpected
    #[error(transparent)]
    Query(#[from] anyhow::Error),
}

impl CheckError {
    /// Message shown to whoever ran the check
    pub fn diagnostic(&self) -> String {
        match self {
            CheckError::InvalidRepository { .. } =>
                "The argument passed to \"--repository\" is not a valid Git repository".to_string(),
            CheckError::UnknownBranch { role, .. } => format!(
                "The argument passed to \"{}\" is not an existing branch in the Git repository",
                role.flag(),
            ),
            CheckError::Query(err) => format!("Unable to query the Git repository: {:#}", err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn test_unknown_branch_names_flag() {
        let err = CheckError::UnknownBranch { role: BranchRole::Target, name: "main".to_string() };
        assert_eq!(
            err.diagnostic(),
            "The argument passed to \"--target\" is not an existing branch in the Git repository"
        );
        assert_eq!(err.to_string(), "target branch \"main\" does not exist");
    }
    #[test]
    fn test_invalid_repository_message() {
        let err = CheckError::InvalidRepository { path: PathBuf::from("/tmp/nothing") };
        assert!(err.diagnostic().contains("\"--repository\""));
        assert_eq!(err.to_string(), "\"/tmp/nothing\" is not a valid Git repository");
    }
    #[test]
    fn test_query_keeps_context_chain() {
        let inner: anyhow::Result<()> = Err(anyhow::Error::msg("exit status 128"));
        let err: CheckError = inner.context("Unable to list local branches").unwrap_err().into();
        assert_eq!(
            err.diagnostic(),
            "Unable to query the Git repository: Unable to list local branches: exit status 128"
        );
    }
}
