//! Command implementations for the installer CLI

pub mod completions;
pub mod disks;
pub mod install;
pub mod plan;
pub mod version;
