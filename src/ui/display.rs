//! Display functions for disks and partition plans

use std::path::Path;

use console::Style;

use crate::config::InstallerConfig;
use crate::disk::partition::untested_device_warning;
use crate::disk::{Disk, PartitionPlan};

/// Print the numbered disk list the selection prompt refers to
pub fn display_disks(disks: &[Disk]) {
    for (number, disk) in disks.iter().enumerate() {
        println!(
            "  {} {}",
            Style::new().cyan().bold().apply_to(format!("{:>2})", number + 1)),
            disk.summary_line()
        );
    }
}

/// Human-readable partition table, one line per partition
pub fn plan_lines(plan: &PartitionPlan, dev_dir: &Path) -> Vec<String> {
    let mut lines = vec![format!(
        "{} boot, {} partition table on {}",
        plan.boot_mode,
        plan.table.as_str(),
        dev_dir.join(&plan.disk).display()
    )];

    for spec in &plan.partitions {
        let node = dev_dir.join(plan.node(spec.index).name);
        let mut line = format!(
            "  {}  {:<8} {:>7} - {:<7} {:?} label={}",
            node.display(),
            spec.part_name,
            spec.start,
            spec.end,
            spec.filesystem,
            spec.label
        );
        if spec.esp {
            line.push_str(" [esp]");
        }
        lines.push(line);
    }

    lines
}

/// Print the plan and every command `install` would issue for it
pub fn display_plan(plan: &PartitionPlan, config: &InstallerConfig) {
    if plan.has_untested_naming() {
        super::warning(&untested_device_warning(&plan.disk));
    }

    for line in plan_lines(plan, &config.dev_dir) {
        println!("{line}");
    }

    let sections = [
        ("Partition", plan.parted_commands(&config.dev_dir)),
        ("Format", plan.format_commands(&config.dev_dir)),
        (
            "Mount",
            plan.mount_commands(&config.label_dir, &config.mount_point),
        ),
    ];
    for (title, commands) in sections {
        println!();
        println!("{}", Style::new().bold().apply_to(format!("{title}:")));
        for cmd in commands {
            println!("  {cmd}");
        }
    }
}
