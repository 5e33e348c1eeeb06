//! Mod to run git commands live in repository

use anyhow::{Context, Error, Result};
use log::trace;
use std::path::Path;
use std::process::{Command, Output};

/// Run `git -C <repo> <args>` and hand back the raw output, whatever the exit status.
/// Only fails if git could not be spawned
pub fn run(git: &Path, repo: &Path, args: &[&str]) -> Result<Output> {
    trace!("Running {} -C {} {}", git.display(), repo.display(), args.join(" "));
    // Inherited repository overrides would point git somewhere other than `repo`
    let output = Command::new(git)
        .arg("-C").arg(repo)
        .args(args)
        .env_remove("GIT_DIR")
        .env_remove("GIT_WORK_TREE")
        .output()
        .with_context(|| format!(
            "Failed to run \"{} {}\" in {}", git.display(), args.join(" "), repo.display(),
        ))?;
    trace!("git {} exited with {}", args.join(" "), output.status);
    Ok(output)
}

/// Run a git command that has to succeed and return its stdout, trailing newlines removed
pub fn stdout(git: &Path, repo: &Path, args: &[&str]) -> Result<String> {
    let output = run(git, repo, args)?;
    if !output.status.success() {
        return Err(Error::msg(format!(
            "git {} failed with {}: {}",
            args.join(" "),
            output.status,
            String::from_utf8_lossy(&output.stderr).trim(),
        )));
    }
    text(output.stdout, args)
}

/// Decode git output
pub fn text(bytes: Vec<u8>, args: &[&str]) -> Result<String> {
    let out = String::from_utf8(bytes)
        .with_context(|| format!("Output of git {} is not valid UTF-8", args.join(" ")))?;
    Ok(out.trim_end_matches('\n').to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_binary() {
        let dir = TempDir::new().unwrap();
        let err = run(Path::new("/nonexistent/bin/git"), dir.path(), &["status"]).unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to run"));
    }
    #[test]
    fn test_stdout_reports_failure() {
        let dir = TempDir::new().unwrap();
        let err = stdout(Path::new("git"), dir.path(), &["no-such-subcommand"]).unwrap_err();
        assert!(err.to_string().contains("git no-such-subcommand failed"));
    }
    #[test]
    fn test_text_trims_newlines_only() {
        let out = text(b"  a\nb\n\n".to_vec(), &["log"]).unwrap();
        assert_eq!(out, "  a\nb");
    }
    #[test]
    fn test_text_rejects_invalid_utf8() {
        assert!(text(vec![0xff, 0xfe], &["log"]).is_err());
    }
}
