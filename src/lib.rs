//! Check that merging one branch into another keeps a linear Git history

pub mod check;
pub mod cli;
pub mod git;
