//! Module deciding whether a merge keeps history linear

pub mod diag;
pub mod error;

pub use diag::{Diagnostics, LogSink};
pub use error::{BranchRole, CheckError};

use crate::git::{CommitId, GitCli, Vcs};

use log::debug;
use std::path::Path;

const PASSED: &str = "CHECK PASSED: Merging will result in linear Git history";
const FAILED: &str = "CHECK FAILED: Merging will result in non-linear Git history.";
const HINT_REBASE: &str =
    "If both branches have some common ancestor, try rebasing the source on the target.";
const HINT_PARENTS: &str =
    "Remember that child branches should be rebased on their parents, not the opposite.";
const UNRELATED: &str = "The source and target branches do not share any common ancestor.";

/// Outcome of a check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Merging source into target is a fast-forward
    Linear,
    /// Target moved on since the common ancestor, a merge commit would be needed
    NonLinear,
}

/// Decides merge linearity against any `Vcs`, reporting through a `Diagnostics` sink.
/// Never writes to the repository
pub struct MergeLinearityChecker<'a, V: Vcs + ?Sized, D: Diagnostics + ?Sized> {
    vcs: &'a V,
    diag: &'a D,
}

impl<'a, V: Vcs + ?Sized, D: Diagnostics + ?Sized> MergeLinearityChecker<'a, V, D> {
    pub fn new(vcs: &'a V, diag: &'a D) -> Self {
        MergeLinearityChecker { vcs, diag }
    }

    /// Check whether merging `source` into `target` would be a fast-forward.
    /// Verdict and errors are both reported to the sink before being returned
    pub fn check(&self, source: &str, target: &str) -> Result<Verdict, CheckError> {
        let result = self.evaluate(source, target);
        match &result {
            Ok(Verdict::Linear) => self.diag.info(PASSED),
            Ok(Verdict::NonLinear) => {
                self.diag.info(FAILED);
                self.diag.info(HINT_REBASE);
                self.diag.info(HINT_PARENTS);
            }
            Err(err) => self.diag.error(&err.diagnostic()),
        }
        result
    }

    fn evaluate(&self, source: &str, target: &str) -> Result<Verdict, CheckError> {
        if !self.vcs.is_repository_root()? {
            return Err(CheckError::InvalidRepository { path: self.vcs.path().to_path_buf() })
        }

        let branches = self.vcs.branches()?;
        for &(role, name) in &[(BranchRole::Source, source), (BranchRole::Target, target)] {
            if !branches.iter().any(|b| b == name) {
                return Err(CheckError::UnknownBranch { role, name: name.to_string() })
            }
        }

        let base = match select_merge_base(self.vcs.merge_bases(source, target)?) {
            Some(base) => base,
            None => {
                self.diag.info(UNRELATED);
                return Ok(Verdict::NonLinear)
            }
        };
        let tip = self.vcs.branch_tip(target)?;
        debug!("Merge base of {} and {} is {}, {} is at {}", source, target, base, target, tip);

        if base == tip {
            Ok(Verdict::Linear)
        } else {
            Ok(Verdict::NonLinear)
        }
    }
}

/// Criss-cross histories have several merge bases. Pick the smallest id so the
/// choice never depends on the order git lists them in
pub fn select_merge_base(bases: Vec<CommitId>) -> Option<CommitId> {
    bases.into_iter().min_by_key(CommitId::to_hex)
}

/// Process exit code for a finished check: 0 only for a linear verdict.
/// Errors and a non-linear verdict both exit 1, only their messages differ
pub fn exit_code(result: &Result<Verdict, CheckError>) -> u8 {
    match result {
        Ok(Verdict::Linear) => 0,
        Ok(Verdict::NonLinear) | Err(_) => 1,
    }
}

/// Run the check against the repository at `repo_path` using the `git` binary
pub fn check_linearity<D: Diagnostics + ?Sized>(
    git: &Path, repo_path: &Path, source: &str, target: &str, diag: &D,
) -> Result<Verdict, CheckError> {
    let vcs = GitCli::new(git, repo_path);
    MergeLinearityChecker::new(&vcs, diag).check(source, target)
}
