//! Facts about the machine the installer runs on

pub mod boot_mode;

pub use boot_mode::BootMode;

/// Whether the process runs with an effective uid of root
pub fn is_root() -> bool {
    // SAFETY: geteuid has no preconditions and cannot fail.
    unsafe { libc::geteuid() == 0 }
}
