//! Partition table layout and partition device naming
//!
//! Both are pure functions of the disk name and the boot mode. Partition 1
//! always exists; partition 2 exists only on EFI machines.

use std::path::Path;

use serde::Serialize;

use crate::config::{BOOT_LABEL, ROOT_LABEL};
use crate::exec::Cmd;
use crate::system::BootMode;

/// Kernel driver family, inferred from the device name prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceClass {
    /// `sd*`: partitions are `sda1`, `sda2`
    Scsi,
    /// `nvme*`: partitions are `nvme0n1p1`, `nvme0n1p2`
    Nvme,
    /// Anything else, named like `sd*` without any guarantee
    Untested,
}

impl DeviceClass {
    pub fn of(disk_name: &str) -> Self {
        let lower = disk_name.to_lowercase();
        if lower.starts_with("sd") {
            DeviceClass::Scsi
        } else if lower.starts_with("nvme") {
            DeviceClass::Nvme
        } else {
            DeviceClass::Untested
        }
    }
}

/// Kernel name of one partition of a disk
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PartitionNode {
    pub name: String,
    pub class: DeviceClass,
}

impl PartitionNode {
    /// The naming scheme was guessed rather than known for this device class
    pub fn is_untested(&self) -> bool {
        self.class == DeviceClass::Untested
    }
}

/// Name of partition `index` (1-based) of `disk_name`.
///
/// Unknown device classes fall back to the `sd` convention, which may not
/// match what the kernel actually creates.
pub fn partition_name(disk_name: &str, index: u32) -> PartitionNode {
    let class = DeviceClass::of(disk_name);
    let name = match class {
        DeviceClass::Nvme => format!("{disk_name}p{index}"),
        DeviceClass::Scsi | DeviceClass::Untested => format!("{disk_name}{index}"),
    };
    PartitionNode { name, class }
}

/// Message shown when a disk's partition naming is a guess
pub fn untested_device_warning(disk_name: &str) -> String {
    format!(
        "this type of device driver has not been thoroughly tested with the installer, \
         and its partition naming scheme may differ from what we expect. Type: {disk_name}"
    )
}

/// Partition table format, as understood by `parted mklabel`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TableKind {
    Gpt,
    Msdos,
}

impl TableKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TableKind::Gpt => "gpt",
            TableKind::Msdos => "msdos",
        }
    }
}

/// Filesystem created on a partition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Filesystem {
    Fat32,
    Ext4,
}

/// One entry of the partition table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PartitionSpec {
    /// 1-based partition number
    pub index: u32,

    /// `parted mkpart` name (GPT) or type (MBR)
    pub part_name: &'static str,

    /// Filesystem type hint passed to `mkpart`, if any
    pub fs_hint: Option<&'static str>,

    pub start: &'static str,
    pub end: &'static str,

    /// Carries the ESP flag
    pub esp: bool,

    pub filesystem: Filesystem,
    pub label: &'static str,
}

/// Full layout for the selected disk
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PartitionPlan {
    pub disk: String,
    pub boot_mode: BootMode,
    pub table: TableKind,
    pub partitions: Vec<PartitionSpec>,
}

impl PartitionPlan {
    /// EFI gets GPT with a 512 MiB ESP and a root partition; legacy gets MBR
    /// with a single root partition.
    pub fn new(disk_name: &str, boot_mode: BootMode) -> Self {
        let partitions = match boot_mode {
            BootMode::Efi => vec![
                PartitionSpec {
                    index: 1,
                    part_name: "ESP",
                    fs_hint: Some("fat32"),
                    start: "1MiB",
                    end: "512MiB",
                    esp: true,
                    filesystem: Filesystem::Fat32,
                    label: BOOT_LABEL,
                },
                PartitionSpec {
                    index: 2,
                    part_name: "primary",
                    fs_hint: None,
                    start: "512MiB",
                    end: "100%",
                    esp: false,
                    filesystem: Filesystem::Ext4,
                    label: ROOT_LABEL,
                },
            ],
            BootMode::Legacy => vec![PartitionSpec {
                index: 1,
                part_name: "primary",
                fs_hint: None,
                start: "1MiB",
                end: "100%",
                esp: false,
                filesystem: Filesystem::Ext4,
                label: ROOT_LABEL,
            }],
        };

        Self {
            disk: disk_name.to_string(),
            boot_mode,
            table: match boot_mode {
                BootMode::Efi => TableKind::Gpt,
                BootMode::Legacy => TableKind::Msdos,
            },
            partitions,
        }
    }

    /// Kernel name of a planned partition
    pub fn node(&self, index: u32) -> PartitionNode {
        partition_name(&self.disk, index)
    }

    /// The disk's naming scheme is a guess
    pub fn has_untested_naming(&self) -> bool {
        self.node(1).is_untested()
    }

    /// `parted` invocations that write the table, in order
    pub fn parted_commands(&self, dev_dir: &Path) -> Vec<Cmd> {
        let disk_path = dev_dir.join(&self.disk).display().to_string();
        let parted = |args: &[&str]| {
            Cmd::new("parted")
                .args([disk_path.as_str(), "-s", "--"])
                .args(args.iter().copied())
        };

        let mut commands = vec![parted(&["mklabel", self.table.as_str()])];
        for spec in &self.partitions {
            let mut args = vec!["mkpart", spec.part_name];
            args.extend(spec.fs_hint);
            args.extend([spec.start, spec.end]);
            commands.push(parted(&args));

            if spec.esp {
                let index = spec.index.to_string();
                commands.push(parted(&["set", index.as_str(), "esp", "on"]));
            }
        }
        commands
    }

    /// `mkfs` invocations, in partition order
    pub fn format_commands(&self, dev_dir: &Path) -> Vec<Cmd> {
        self.partitions
            .iter()
            .map(|spec| {
                let node = dev_dir
                    .join(self.node(spec.index).name)
                    .display()
                    .to_string();
                match spec.filesystem {
                    Filesystem::Fat32 => {
                        Cmd::new("mkfs.fat").args(["-F", "32", "-n", spec.label, node.as_str()])
                    }
                    Filesystem::Ext4 => Cmd::new("mkfs.ext4").args(["-L", spec.label, node.as_str()]),
                }
            })
            .collect()
    }

    /// Mount invocations for the target tree, root first
    pub fn mount_commands(&self, label_dir: &Path, mount_point: &Path) -> Vec<Cmd> {
        let root_label = label_dir.join(ROOT_LABEL).display().to_string();
        let target = mount_point.display().to_string();

        let mut commands = vec![Cmd::new("mount").args([root_label, target])];
        if self.boot_mode.is_efi() {
            let boot_label = label_dir.join(BOOT_LABEL).display().to_string();
            let boot_target = mount_point.join("boot").display().to_string();
            commands.push(Cmd::new("mkdir").args(["-p", boot_target.as_str()]));
            commands.push(Cmd::new("mount").args([boot_label, boot_target]));
        }
        commands
    }
}
