//! Version command implementation

use crate::error::Result;
use crate::render::{FINAL_CONFIG, FLAKE, INSTALL_CONFIG};

fn version_lines() -> Vec<String> {
    vec![
        format!("snowy-lab-installer {}", env!("CARGO_PKG_VERSION")),
        String::new(),
        "Build info:".to_string(),
        format!("  Rust version: {}", env!("CARGO_PKG_RUST_VERSION")),
        format!(
            "  Profile: {}",
            if cfg!(debug_assertions) {
                "debug"
            } else {
                "release"
            }
        ),
        format!(
            "  Target: {}-{}",
            std::env::consts::ARCH,
            std::env::consts::OS
        ),
        format!("  Embedded templates: {INSTALL_CONFIG}, {FINAL_CONFIG}, {FLAKE}"),
    ]
}

/// Run version command
pub fn run() -> Result<()> {
    for line in version_lines() {
        println!("{line}");
    }
    Ok(())
}
