/// Create cli options struct in module so can be imported by main and tests
use std::path::PathBuf;
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "linhist",
    after_help = "For more help on Linhist check https://github.com/wiltonloch/linhist"
)]
/// A tool to check and maintain a linear Git history
pub struct Opts {
    /// Enable verbose logging (-v, -vv, etc)
    #[structopt(short, long, parse(from_occurrences), global = true)]
    pub verbose: usize,
    /// Silence all log output. The exit code still carries the verdict
    #[structopt(short, long, global = true)]
    pub quiet: bool,
    /// Git binary used to query the repository
    #[structopt(long, default_value = "git", env = "LINHIST_GIT", parse(from_os_str), global = true)]
    pub git: PathBuf,
    #[structopt(subcommand)]
    pub cmd: Command,
}

#[derive(Debug, StructOpt)]
pub enum Command {
    /// Checks if a merge operation would result in linear history
    CheckMerge(CheckMerge),
}

#[derive(Debug, StructOpt)]
pub struct CheckMerge {
    /// Path to the repository where to perform the check
    #[structopt(long, default_value = ".", env = "LINHIST_REPOSITORY", parse(from_os_str))]
    pub repository: PathBuf,
    /// Source branch for the merge check
    #[structopt(long)]
    pub source: String,
    /// Target branch for the merge check
    #[structopt(long)]
    pub target: String,
}
