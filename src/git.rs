//! Module answering repository queries by asking git

pub mod cmd;
pub mod repo;

pub use repo::{CommitId, GitCli, Vcs};
