use super::cmd;

use anyhow::{Context, Error, Result};
use git_hash::ObjectId;
use log::debug;

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Identifier of a single commit. Equal iff both name the same commit.
/// SHA-256 repositories have no `ObjectId` here, their ids are kept as validated hex
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitId {
    Sha1(ObjectId),
    Sha256(String),
}

impl CommitId {
    pub fn from_hex(hex: &str) -> Result<Self> {
        let hex = hex.trim();
        match hex.len() {
            40 => {
                let id = ObjectId::from_hex(hex.as_bytes())
                    .with_context(|| format!("\"{}\" is not a commit id", hex))?;
                Ok(CommitId::Sha1(id))
            }
            64 if hex.bytes().all(|b| b.is_ascii_hexdigit()) =>
                Ok(CommitId::Sha256(hex.to_ascii_lowercase())),
            _ => Err(Error::msg(format!("\"{}\" is not a commit id", hex))),
        }
    }
    pub fn to_hex(&self) -> String {
        match self {
            CommitId::Sha1(id) => id.to_sha1_hex_string(),
            CommitId::Sha256(hex) => hex.clone(),
        }
    }
}

impl fmt::Display for CommitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Read-only queries against a version-control repository.
///
/// Branch names are local branch short names (`main`, `feature/x`), never full refs.
/// Every commit-graph computation is answered by the implementation.
pub trait Vcs {
    /// Where the repository is expected to live
    fn path(&self) -> &Path;
    /// Whether `path` is the root of an initialized repository
    fn is_repository_root(&self) -> Result<bool>;
    /// Names of all local branches
    fn branches(&self) -> Result<Vec<String>>;
    /// Every best common ancestor of the two branches. Empty for unrelated histories
    fn merge_bases(&self, a: &str, b: &str) -> Result<Vec<CommitId>>;
    /// Commit the branch currently points to
    fn branch_tip(&self, branch: &str) -> Result<CommitId>;
}

/// `Vcs` answered by running the git binary against a repository path
#[derive(Debug, Clone)]
pub struct GitCli {
    /// git binary to execute
    git: PathBuf,
    /// Repository being queried
    path: PathBuf,
}

impl GitCli {
    pub fn new<G: Into<PathBuf>, P: Into<PathBuf>>(git: G, path: P) -> Self {
        let cli = GitCli { git: git.into(), path: path.into() };
        debug!("Querying repository at \"{}\" with {}", cli.path.display(), cli.git.display());
        cli
    }
}

fn branch_ref(branch: &str) -> String {
    format!("refs/heads/{}", branch)
}

fn same_dir(a: &Path, b: &Path) -> Result<bool> {
    let a = fs::canonicalize(a).with_context(|| format!("Unable to resolve {}", a.display()))?;
    let b = fs::canonicalize(b).with_context(|| format!("Unable to resolve {}", b.display()))?;
    Ok(a == b)
}

impl Vcs for GitCli {
    fn path(&self) -> &Path {
        &self.path
    }

    // A work tree counts only at its top level. A bare repository, or the .git
    // directory of a work tree, counts only when the path is the git dir itself
    fn is_repository_root(&self) -> Result<bool> {
        let args = ["rev-parse", "--absolute-git-dir", "--is-inside-work-tree", "--show-prefix"];
        let output = cmd::run(&self.git, &self.path, &args)?;
        if !output.status.success() {
            debug!(
                "rev-parse rejected {}: {}",
                self.path.display(),
                String::from_utf8_lossy(&output.stderr).trim(),
            );
            return Ok(false)
        }
        let out = cmd::text(output.stdout, &args)?;
        let mut lines = out.lines();
        let git_dir = lines.next()
            .ok_or_else(|| Error::msg(format!("git rev-parse printed nothing for {}", self.path.display())))?;
        let in_work_tree = lines.next() == Some("true");
        let prefix = lines.next().unwrap_or("");
        debug!("git dir {}, in work tree {}, prefix \"{}\"", git_dir, in_work_tree, prefix);

        if in_work_tree {
            Ok(prefix.is_empty())
        } else {
            same_dir(&self.path, Path::new(git_dir))
        }
    }

    fn branches(&self) -> Result<Vec<String>> {
        let out = cmd::stdout(
            &self.git, &self.path, &["for-each-ref", "--format=%(refname:strip=2)", "refs/heads/"],
        ).context("Unable to list local branches")?;
        let branches: Vec<String> = out.lines()
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .collect();
        debug!("Local branches: {:?}", branches);
        Ok(branches)
    }

    fn merge_bases(&self, a: &str, b: &str) -> Result<Vec<CommitId>> {
        let (ref_a, ref_b) = (branch_ref(a), branch_ref(b));
        let args = ["merge-base", "--all", ref_a.as_str(), ref_b.as_str()];
        let output = cmd::run(&self.git, &self.path, &args)?;
        // merge-base exits 1 with no output when there is no common ancestor
        if output.status.code() == Some(1) && output.stdout.is_empty() {
            debug!("No merge base between {} and {}", a, b);
            return Ok(Vec::new())
        }
        if !output.status.success() {
            return Err(Error::msg(format!(
                "Unable to compute merge base of {} and {}: {}",
                a, b, String::from_utf8_lossy(&output.stderr).trim(),
            )))
        }
        let bases = cmd::text(output.stdout, &args)?
            .lines()
            .map(CommitId::from_hex)
            .collect::<Result<Vec<_>>>()
            .with_context(|| format!("Unable to parse merge bases of {} and {}", a, b))?;
        debug!("Merge bases of {} and {}: {:?}", a, b, bases);
        Ok(bases)
    }

    fn branch_tip(&self, branch: &str) -> Result<CommitId> {
        let spec = format!("{}^{{commit}}", branch_ref(branch));
        let hex = cmd::stdout(&self.git, &self.path, &["rev-parse", "--verify", "--quiet", &spec])
            .with_context(|| format!("Unable to resolve branch {}", branch))?;
        let tip = CommitId::from_hex(&hex)?;
        debug!("Branch {} points to {}", branch, tip);
        Ok(tip)
    }
}
