//! Target NixOS configuration files
//!
//! Templates are embedded in the binary and rendered with `minijinja`.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use minijinja::Environment;
use serde::Serialize;

use crate::error::Result;

/// Transient configuration used by `nixos-install`
pub const INSTALL_CONFIG: &str = "configuration_install.nix";

/// Final configuration left on the installed system
pub const FINAL_CONFIG: &str = "configuration.nix";

/// Flake wrapping the final configuration
pub const FLAKE: &str = "flake.nix";

/// Values substituted into the templates
#[derive(Debug, Clone, Serialize)]
pub struct TemplateContext {
    pub hostname: String,
    pub username: String,
    pub disk_name: String,
    pub is_efi: bool,
}

/// Template set for the target system
pub struct Templates {
    env: Environment<'static>,
}

impl Templates {
    pub fn new() -> Result<Self> {
        let mut env = Environment::new();
        env.set_trim_blocks(true);
        env.set_keep_trailing_newline(true);
        env.add_template(
            INSTALL_CONFIG,
            include_str!("../templates/configuration_install.nix.j2"),
        )?;
        env.add_template(FINAL_CONFIG, include_str!("../templates/configuration.nix.j2"))?;
        env.add_template(FLAKE, include_str!("../templates/flake.nix.j2"))?;
        Ok(Self { env })
    }

    pub fn render(&self, name: &str, context: &TemplateContext) -> Result<String> {
        Ok(self.env.get_template(name)?.render(context)?)
    }

    /// Render `name` into `path`, replacing any existing file, and sync it
    pub fn write(&self, name: &str, context: &TemplateContext, path: &Path) -> Result<()> {
        let rendered = self.render(name, context)?;
        write_synced(path, rendered.as_bytes())
    }
}

fn write_synced(path: &Path, contents: &[u8]) -> Result<()> {
    let mut file = File::create(path)
        .map_err(|e| crate::file_error_context!("Failed to create", path.display(), e))?;
    file.write_all(contents)
        .map_err(|e| crate::file_error_context!("Failed to write", path.display(), e))?;
    file.sync_all()
        .map_err(|e| crate::file_error_context!("Failed to sync", path.display(), e))?;
    Ok(())
}
