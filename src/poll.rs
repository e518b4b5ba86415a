//! Bounded polling for kernel/udev side effects
//!
//! Device nodes and label symlinks show up asynchronously after `parted`,
//! `mkfs` and `blockdev` return. Both waits here fail open: running out of
//! attempts is reported to the caller, never raised as an error.

use std::path::Path;
use std::thread;

use crate::config::PollSettings;
use crate::exec::{Cmd, CommandRunner};

/// Outcome of a bounded wait
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Readiness {
    /// Appeared on the given 1-based attempt
    Ready { attempt: u32 },
    TimedOut,
}

impl Readiness {
    pub fn is_ready(self) -> bool {
        matches!(self, Readiness::Ready { .. })
    }
}

/// Check for `path` up to `poll.attempts` times, sleeping between checks
pub fn wait_for_path(path: &Path, poll: PollSettings) -> Readiness {
    for attempt in 1..=poll.attempts {
        if path.exists() {
            tracing::debug!(path = %path.display(), attempt, "path is present");
            return Readiness::Ready { attempt };
        }

        tracing::debug!(path = %path.display(), attempt, "path not present yet");
        if attempt < poll.attempts {
            thread::sleep(poll.interval());
        }
    }

    Readiness::TimedOut
}

/// Ask the kernel to re-read `disk_path`'s partition table until
/// `label_path` appears.
///
/// A failing `blockdev` only costs that attempt.
pub fn refresh_until_label(
    runner: &mut dyn CommandRunner,
    disk_path: &str,
    label_path: &Path,
    poll: PollSettings,
) -> Readiness {
    let reread = Cmd::new("blockdev").args(["--rereadpt", disk_path]);

    for attempt in 1..=poll.attempts {
        if let Err(e) = runner.run(&reread) {
            tracing::debug!(attempt, error = %e, "partition table re-read failed");
            if attempt < poll.attempts {
                thread::sleep(poll.interval());
            }
            continue;
        }

        thread::sleep(poll.interval());
        if label_path.exists() {
            tracing::debug!(path = %label_path.display(), attempt, "label symlink is present");
            return Readiness::Ready { attempt };
        }
    }

    Readiness::TimedOut
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::RecordingRunner;
    use std::time::{Duration, Instant};

    fn fast(attempts: u32) -> PollSettings {
        PollSettings {
            attempts,
            interval_ms: 10,
        }
    }

    #[test]
    fn test_present_path_is_ready_immediately() {
        let temp = tempfile::TempDir::new().unwrap();
        let node = temp.path().join("sda1");
        std::fs::write(&node, "").unwrap();

        assert_eq!(
            wait_for_path(&node, fast(10)),
            Readiness::Ready { attempt: 1 }
        );
    }

    #[test]
    fn test_missing_path_times_out_within_bound() {
        let temp = tempfile::TempDir::new().unwrap();
        let node = temp.path().join("sda1");

        let started = Instant::now();
        let outcome = wait_for_path(&node, fast(10));

        assert_eq!(outcome, Readiness::TimedOut);
        assert!(started.elapsed() < Duration::from_secs(2));
    }

    #[test]
    fn test_path_appearing_later_is_seen() {
        let temp = tempfile::TempDir::new().unwrap();
        let node = temp.path().join("nvme0n1p1");
        let writer = node.clone();

        let handle = std::thread::spawn(move || {
            std::thread::sleep(Duration::from_millis(30));
            std::fs::write(writer, "").unwrap();
        });
        let outcome = wait_for_path(
            &node,
            PollSettings {
                attempts: 100,
                interval_ms: 10,
            },
        );
        handle.join().unwrap();

        assert!(outcome.is_ready());
    }

    #[test]
    fn test_zero_attempts_times_out() {
        let temp = tempfile::TempDir::new().unwrap();
        assert_eq!(
            wait_for_path(&temp.path().join("x"), fast(0)),
            Readiness::TimedOut
        );
    }

    #[test]
    fn test_refresh_stops_once_label_exists() {
        let temp = tempfile::TempDir::new().unwrap();
        let label = temp.path().join("nixos");
        std::fs::write(&label, "").unwrap();

        let mut runner = RecordingRunner::new();
        let outcome = refresh_until_label(&mut runner, "/dev/sda", &label, fast(10));

        assert_eq!(outcome, Readiness::Ready { attempt: 1 });
        assert_eq!(runner.commands(), vec!["blockdev --rereadpt /dev/sda"]);
    }

    #[test]
    fn test_refresh_retries_transient_failures() {
        let temp = tempfile::TempDir::new().unwrap();
        let label = temp.path().join("nixos");
        std::fs::write(&label, "").unwrap();

        let mut runner = RecordingRunner::new();
        runner.fail_times("blockdev", 2);
        let outcome = refresh_until_label(&mut runner, "/dev/sda", &label, fast(10));

        assert_eq!(outcome, Readiness::Ready { attempt: 3 });
        assert_eq!(runner.commands().len(), 3);
    }

    #[test]
    fn test_refresh_gives_up_after_attempts() {
        let temp = tempfile::TempDir::new().unwrap();
        let label = temp.path().join("nixos");

        let mut runner = RecordingRunner::new();
        let started = Instant::now();
        let outcome = refresh_until_label(&mut runner, "/dev/sda", &label, fast(10));

        assert_eq!(outcome, Readiness::TimedOut);
        assert_eq!(runner.commands().len(), 10);
        assert!(started.elapsed() < Duration::from_secs(2));
    }

    #[test]
    fn test_refresh_final_failure_returns_without_sleeping() {
        let temp = tempfile::TempDir::new().unwrap();
        let label = temp.path().join("nixos");

        let mut runner = RecordingRunner::new();
        runner.fail_always("blockdev");
        let slow = PollSettings {
            attempts: 1,
            interval_ms: 500,
        };
        let started = Instant::now();
        let outcome = refresh_until_label(&mut runner, "/dev/sda", &label, slow);

        assert_eq!(outcome, Readiness::TimedOut);
        assert_eq!(runner.commands().len(), 1);
        assert!(started.elapsed() < Duration::from_millis(400));
    }
}
